// src/runner.rs
//! Match analysis orchestrator.
//!
//! A run moves through `Loading → Validating → Analyzing → Rendering → Done`,
//! dropping to `Failed` from any non-terminal stage. Everything is rendered in
//! memory first; files are only written once the whole run has succeeded.

use std::error::Error;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::{
    analysis::{
        document::MatchDocument,
        index::{team_info, PlayerIndex, TeamIndex},
        live::{batting_with, bowling_with, live_innings_with, partnerships, recent_overs},
        report::{render_processed, render_report, render_summary},
        summary::{innings_with, match_info, match_summary},
        timeline::{ball_rows, extract_ball_by_ball, extract_timeline, generate_timeline_report},
        views::*,
    },
    config::{
        consts::PLAYER_FETCH_PAUSE_SECS,
        options::{AnalysisMode, RunOptions, Source},
    },
    core::{
        access::{field, text},
        net,
    },
    error::{AnalysisError, Result},
    file::{normalize_separators, write_all_or_nothing, Artifact},
    progress::{NullProgress, Progress},
    source::{FileSource, HttpSource, PageSource, TextSource},
    specs::{
        player_stats::{self, PlayerStats},
        team_roster,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Loading,
    Validating,
    Analyzing,
    Rendering,
    Done,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }

    /// Forward by exactly one step, or to `Failed` from anywhere not yet finished.
    pub fn can_advance_to(self, next: Stage) -> bool {
        use Stage::*;
        match (self, next) {
            (Loading, Validating)
            | (Validating, Analyzing)
            | (Analyzing, Rendering)
            | (Rendering, Done) => true,
            (from, Failed) => !from.is_terminal(),
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Loading    => "loading",
            Stage::Validating => "validating",
            Stage::Analyzing  => "analyzing",
            Stage::Rendering  => "rendering",
            Stage::Done       => "done",
            Stage::Failed     => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendered outputs of one match run, not yet on disk.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub mode: AnalysisMode,
    pub artifacts: Vec<Artifact>,
    /// What the CLI prints after writing.
    pub console: String,
}

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    pub console: String,
}

/* ---------------- entry points ---------------- */

/// Top-level runner: resolve the source, analyze, then write every artifact.
pub fn run(
    opts: &RunOptions,
    progress: Option<&mut dyn Progress>,
) -> std::result::Result<RunSummary, Box<dyn Error>> {
    let source = opts
        .source
        .as_ref()
        .ok_or("No input given (use --match-file, --match-url, --player-file, --player-url, --team-file, --team-full or --page)")?;
    let name = normalize_separators(&opts.output_name());
    logf!("Run: {} (mode {}, output {name})", source.describe(), opts.mode);

    let (artifacts, console) = match source {
        Source::MatchFile(p) => {
            let a = analyze_source(&FileSource(p.clone()), opts.mode, &name, progress)?;
            (a.artifacts, a.console)
        }
        Source::MatchUrl(u) => {
            let a = analyze_source(&HttpSource(u.clone()), opts.mode, &name, progress)?;
            (a.artifacts, a.console)
        }
        Source::PlayerFile(p) => {
            let html = fs::read_to_string(p)?;
            player_artifacts(&player_stats::parse_doc(&html, &p.to_string_lossy()), &name)?
        }
        Source::PlayerUrl(u) => player_artifacts(&player_stats::fetch(u)?, &name)?,
        Source::TeamFile(p) => {
            let roster = team_roster::load_roster(&fs::read_to_string(p)?)?;
            let console = match opts.team_url.as_deref().and_then(team_roster::team_display_name) {
                Some(team) => format!("Task Completed: Collected all {} players from {team}.", roster.len()),
                None => format!("Task Completed: Collected all {} players.", roster.len()),
            };
            (vec![roster_artifact(&name, &roster)?], console)
        }
        Source::TeamFull(p) => {
            let mut roster = team_roster::load_roster(&fs::read_to_string(p)?)?;
            let mut null = NullProgress;
            let sink: &mut dyn Progress = match progress {
                Some(p) => p,
                None => &mut null,
            };
            sink.log(&format!("Filling {} players from {}", roster.len(), source.describe()));

            let fetched = team_roster::fill_full_data(
                &mut roster,
                player_stats::fetch,
                |r| {
                    write_all_or_nothing(&[roster_artifact(&name, r)?])?;
                    Ok(())
                },
                Duration::from_secs(PLAYER_FETCH_PAUSE_SECS),
                sink,
            )?;
            let console = format!("Fetched {fetched} players; {} in roster.", roster.len());
            (vec![roster_artifact(&name, &roster)?], console)
        }
        Source::Page(u) => {
            let html = net::http_get(u)?;
            let console = format!("Page: {} bytes from {u}", html.len());
            (vec![Artifact::new(join!(&name, ".html"), html)], console)
        }
    };

    let files_written = write_all_or_nothing(&artifacts)?;
    for p in &files_written {
        logf!("Run: wrote {}", p.display());
    }
    Ok(RunSummary { files_written, console })
}

/// Load from `source`, then validate, analyze and render.
pub fn analyze_source(
    source: &dyn PageSource,
    mode: AnalysisMode,
    name: &str,
    progress: Option<&mut dyn Progress>,
) -> Result<Analysis> {
    let mut null = NullProgress;
    let sink: &mut dyn Progress = match progress {
        Some(p) => p,
        None => &mut null,
    };
    let mut t = Tracker::start(sink);

    t.progress.log(&format!("Loading match data from {}", source.describe()));
    let doc = match source.fetch().and_then(|raw| MatchDocument::parse(&raw)) {
        Ok(doc) => doc,
        Err(e) => return Err(t.fail(e)),
    };
    t.advance(Stage::Validating);
    t.analyze(&doc, mode, name)
}

/// Same as [`analyze_source`] for a page already in memory.
pub fn analyze_text(
    raw: &str,
    mode: AnalysisMode,
    name: &str,
    progress: Option<&mut dyn Progress>,
) -> Result<Analysis> {
    analyze_source(&TextSource(s!(raw)), mode, name, progress)
}

/// Entry for a document that is already parsed; starts at `Validating`.
pub fn analyze_document(
    doc: &MatchDocument,
    mode: AnalysisMode,
    name: &str,
    progress: Option<&mut dyn Progress>,
) -> Result<Analysis> {
    let mut null = NullProgress;
    let sink: &mut dyn Progress = match progress {
        Some(p) => p,
        None => &mut null,
    };
    let mut t = Tracker::start(sink);
    t.advance(Stage::Validating);
    t.analyze(doc, mode, name)
}

/* ---------------- state tracking ---------------- */

struct Tracker<'p> {
    stage: Stage,
    progress: &'p mut dyn Progress,
}

impl<'p> Tracker<'p> {
    fn start(progress: &'p mut dyn Progress) -> Self {
        progress.stage(Stage::Loading);
        Self { stage: Stage::Loading, progress }
    }

    fn advance(&mut self, next: Stage) {
        if !self.stage.can_advance_to(next) {
            loge!("Run: illegal transition {} -> {next}", self.stage);
            return;
        }
        logd!("Run: {} -> {next}", self.stage);
        self.stage = next;
        self.progress.stage(next);
        if next.is_terminal() {
            self.progress.finish();
        }
    }

    fn fail(&mut self, err: AnalysisError) -> AnalysisError {
        loge!("Run: failed while {}: {err}", self.stage);
        self.advance(Stage::Failed);
        err
    }

    fn analyze(&mut self, doc: &MatchDocument, mode: AnalysisMode, name: &str) -> Result<Analysis> {
        if !doc.is_match_data() {
            return Err(self.fail(AnalysisError::NotMatchData));
        }
        self.advance(Stage::Analyzing);
        self.progress.log(&format!("Running {mode} analysis"));

        match self.render_mode(doc, mode, name) {
            Ok(a) => {
                self.advance(Stage::Done);
                Ok(a)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /* ---------- per-mode rendering ---------- */

    fn render_mode(&mut self, doc: &MatchDocument, mode: AnalysisMode, name: &str) -> Result<Analysis> {
        let json_path = mode.json_path(name);

        let (json, mut artifacts, console) = match mode {
            AnalysisMode::Comprehensive => {
                let p = project_all(doc);
                self.progress.item_done("projections");
                self.advance(Stage::Rendering);
                let human_report = render_report(&p.summary, &p.innings, &p.batting, &p.bowling, &p.partnerships);
                let processed = render_processed(&p.summary, &p.innings, p.live.as_ref(), &p.batting, &p.bowling);
                let out = ComprehensiveOutput {
                    raw_data: doc.root(),
                    analysis: AnalysisSection {
                        match_summary: &p.summary,
                        innings_data: &p.innings,
                        batting_stats: &p.batting,
                        bowling_stats: &p.bowling,
                        partnerships: &p.partnerships,
                        recent_overs: &p.recent,
                        ball_by_ball: &p.rows,
                        human_report: &human_report,
                    },
                    processed: ProcessedSection {
                        structured_data: StructuredSection {
                            match_info: &p.summary,
                            innings: &p.innings,
                            current_batting: &p.batting,
                            current_bowling: &p.bowling,
                        },
                        live_innings: p.live.as_ref(),
                        human_readable: &processed,
                    },
                    extracted: ExtractedSection {
                        match_info: &p.info,
                        team_info: &p.teams,
                        innings_data: &p.innings,
                        live_batting: &p.batting,
                        live_bowling: &p.bowling,
                        ball_by_ball: &p.overs,
                        partnerships: &p.partnerships,
                        timeline: &p.timeline,
                    },
                };
                (to_json("comprehensive analysis", &out)?, Vec::new(), human_report)
            }
            AnalysisMode::Summary => {
                let teams = TeamIndex::build(doc);
                let players = PlayerIndex::build(doc);
                let info = match_info(doc);
                let innings = innings_with(doc, &teams);
                let live = live_innings_with(doc, &teams);
                let batting = batting_with(doc, &players);
                self.advance(Stage::Rendering);
                let human_readable = render_summary(&info, &innings, live.as_ref(), &batting);
                let out = SummaryOutput {
                    match_info: &info,
                    team_info: team_info(doc),
                    innings_summary: &innings,
                    human_readable: &human_readable,
                };
                (to_json("match summary", &out)?, Vec::new(), human_readable)
            }
            AnalysisMode::Live => {
                let players = PlayerIndex::build(doc);
                let batting = batting_with(doc, &players);
                let bowling = bowling_with(doc, &players);
                let out = LiveOutput {
                    current_batting: &batting,
                    current_bowling: &bowling,
                    partnerships: partnerships(doc),
                    recent_overs: recent_overs(doc),
                    live_innings: live_innings_with(doc, &TeamIndex::build(doc)),
                    timestamp: text(field(doc.live(), "timestamp")),
                };
                self.advance(Stage::Rendering);
                (to_json("live state", &out)?, Vec::new(), live_console(&batting, &bowling))
            }
            AnalysisMode::Structured => {
                let teams = TeamIndex::build(doc);
                let players = PlayerIndex::build(doc);
                let summary = match_summary(doc);
                let out = StructuredOutput {
                    innings_summary: innings_with(doc, &teams),
                    batting_stats: batting_with(doc, &players),
                    bowling_stats: bowling_with(doc, &players),
                    ball_by_ball: ball_rows(doc),
                    match_summary: &summary,
                };
                self.advance(Stage::Rendering);
                let console = join!("Match Summary:\n", &to_json("match summary", &summary)?);
                (to_json("structured data", &out)?, Vec::new(), console)
            }
            AnalysisMode::Timeline => {
                let events = extract_timeline(doc);
                self.advance(Stage::Rendering);
                let report = generate_timeline_report(doc);
                let out = TimelineOutput {
                    total_events: events.len(),
                    timeline_events: &events,
                    timeline_report: &report,
                };
                let json = to_json("timeline", &out)?;
                let mut extra = Vec::new();
                if let Some(txt) = mode.text_path(name) {
                    extra.push(Artifact::new(txt, report.clone()));
                }
                (json, extra, report)
            }
        };

        artifacts.insert(0, Artifact::new(json_path, json));
        for a in &artifacts {
            self.progress.item_done(&a.path.to_string_lossy());
        }
        Ok(Analysis { mode, artifacts, console })
    }
}

/// Every projection the comprehensive mode needs. Independent groups run on
/// scoped threads; they only share `&MatchDocument` and the lookup tables.
struct Projections {
    summary: MatchSummary,
    info: MatchInfo,
    teams: Vec<TeamView>,
    innings: Vec<InningsView>,
    batting: Vec<BatterView>,
    bowling: Vec<BowlerView>,
    partnerships: Vec<PartnershipView>,
    recent: Vec<RecentOver>,
    live: Option<LiveInningsView>,
    overs: Vec<OverView>,
    rows: Vec<BallRow>,
    timeline: Vec<TimelineEvent>,
}

fn project_all(doc: &MatchDocument) -> Projections {
    let teams_idx = TeamIndex::build(doc);
    let players_idx = PlayerIndex::build(doc);
    let (teams_idx, players_idx) = (&teams_idx, &players_idx);

    thread::scope(|s| {
        let meta = s.spawn(move || {
            (match_summary(doc), match_info(doc), team_info(doc), innings_with(doc, teams_idx))
        });
        let live = s.spawn(move || {
            (
                batting_with(doc, players_idx),
                bowling_with(doc, players_idx),
                partnerships(doc),
                recent_overs(doc),
                live_innings_with(doc, teams_idx),
            )
        });
        let balls = s.spawn(move || (extract_ball_by_ball(doc), ball_rows(doc), extract_timeline(doc)));

        let (summary, info, teams, innings) = joined(meta.join());
        let (batting, bowling, partnerships, recent, live) = joined(live.join());
        let (overs, rows, timeline) = joined(balls.join());

        Projections {
            summary, info, teams, innings,
            batting, bowling, partnerships, recent, live,
            overs, rows, timeline,
        }
    })
}

// Projectors do not fail; a panic in one is a bug and is re-raised as-is.
fn joined<T>(r: thread::Result<T>) -> T {
    match r {
        Ok(v) => v,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

fn live_console(batting: &[BatterView], bowling: &[BowlerView]) -> String {
    let mut out = s!("Current Batting:\n");
    for b in batting.iter().filter(|b| b.at_crease()) {
        out.push_str(&format!("  {}: {}* ({}b) SR: {:.2}\n", b.status, b.runs, b.balls, b.strike_rate));
    }
    out.push_str("\nCurrent Bowling:\n");
    for b in bowling {
        out.push_str(&format!(
            "  {}-{}-{}-{} Econ: {:.2}\n",
            b.overs, b.maidens, b.runs, b.wickets, b.economy
        ));
    }
    out
}

fn to_json<T: Serialize + ?Sized>(what: &'static str, value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|source| AnalysisError::Serialize { what, source })
}

/* ---------------- player pages ---------------- */

fn player_artifacts(
    stats: &PlayerStats,
    name: &str,
) -> std::result::Result<(Vec<Artifact>, String), Box<dyn Error>> {
    let json = to_json("player stats", stats)?;
    let console = format!(
        "Player: {} ({} stat groups)",
        stats.player_name,
        stats.stats.len()
    );
    Ok((vec![Artifact::new(join!(name, ".json"), json)], console))
}

fn roster_artifact(name: &str, roster: &[Value]) -> Result<Artifact> {
    Ok(Artifact::new(join!(name, ".json"), to_json("team roster", roster)?))
}

/* ---------------- payloads ---------------- */

#[derive(Serialize)]
struct ComprehensiveOutput<'a> {
    raw_data: &'a Value,
    analysis: AnalysisSection<'a>,
    processed: ProcessedSection<'a>,
    extracted: ExtractedSection<'a>,
}

#[derive(Serialize)]
struct AnalysisSection<'a> {
    match_summary: &'a MatchSummary,
    innings_data: &'a [InningsView],
    batting_stats: &'a [BatterView],
    bowling_stats: &'a [BowlerView],
    partnerships: &'a [PartnershipView],
    recent_overs: &'a [RecentOver],
    ball_by_ball: &'a [BallRow],
    human_report: &'a str,
}

#[derive(Serialize)]
struct ProcessedSection<'a> {
    structured_data: StructuredSection<'a>,
    live_innings: Option<&'a LiveInningsView>,
    human_readable: &'a str,
}

#[derive(Serialize)]
struct StructuredSection<'a> {
    match_info: &'a MatchSummary,
    innings: &'a [InningsView],
    current_batting: &'a [BatterView],
    current_bowling: &'a [BowlerView],
}

#[derive(Serialize)]
struct ExtractedSection<'a> {
    match_info: &'a MatchInfo,
    team_info: &'a [TeamView],
    innings_data: &'a [InningsView],
    live_batting: &'a [BatterView],
    live_bowling: &'a [BowlerView],
    ball_by_ball: &'a [OverView],
    partnerships: &'a [PartnershipView],
    timeline: &'a [TimelineEvent],
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    match_info: &'a MatchInfo,
    team_info: Vec<TeamView>,
    innings_summary: &'a [InningsView],
    human_readable: &'a str,
}

#[derive(Serialize)]
struct LiveOutput<'a> {
    current_batting: &'a [BatterView],
    current_bowling: &'a [BowlerView],
    partnerships: Vec<PartnershipView>,
    recent_overs: Vec<RecentOver>,
    live_innings: Option<LiveInningsView>,
    timestamp: String,
}

#[derive(Serialize)]
struct StructuredOutput<'a> {
    match_summary: &'a MatchSummary,
    innings_summary: Vec<InningsView>,
    batting_stats: Vec<BatterView>,
    bowling_stats: Vec<BowlerView>,
    ball_by_ball: Vec<BallRow>,
}

#[derive(Serialize)]
struct TimelineOutput<'a> {
    timeline_events: &'a [TimelineEvent],
    timeline_report: &'a str,
    total_events: usize,
}
