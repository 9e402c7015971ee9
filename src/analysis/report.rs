// src/analysis/report.rs
//! Plain-text reports built from already-projected views.
//!
//! Renderers are pure: they take views, never the document, so the same
//! data can be rendered in any order or on any thread.

use std::fmt::Write as _;

use crate::analysis::live::current_partnership;
use crate::analysis::views::{
    BatterView, BowlerView, InningsView, LiveInningsView, MatchInfo, MatchSummary,
    PartnershipView,
};
use crate::config::consts::REPORT_WIDTH;

/// Full match report: header, every innings, then the live batting, bowling
/// and partnership sections when there is anything to show.
pub fn render_report(
    summary: &MatchSummary,
    innings: &[InningsView],
    batting: &[BatterView],
    bowling: &[BowlerView],
    partnerships: &[PartnershipView],
) -> String {
    let d = &summary.match_details;
    let mut out = String::new();

    banner(&mut out, "CRICKET MATCH REPORT");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", d.title);
    let _ = writeln!(out, "Date: {}", d.date);
    let _ = writeln!(out, "Venue: {}, {}", d.venue, d.city);
    let _ = writeln!(out, "Format: {}", d.format);
    let _ = writeln!(out);
    let _ = writeln!(out, "RESULT: {}", d.result);

    banner(&mut out, "INNINGS SUMMARY");
    for inn in innings {
        let _ = writeln!(out);
        let _ = writeln!(out, "Innings {}: {}", inn.innings_number, inn.batting_team);
        let _ = writeln!(out, "Score: {}/{} ({} overs)", inn.runs, inn.wickets, inn.overs);
        let _ = writeln!(out, "Run Rate: {:.2}/over", inn.run_rate);
        let _ = writeln!(out, "Extras: {}", inn.extras);
        let _ = writeln!(out, "Status: {}", inn.status);
        if inn.is_chase() {
            let _ = writeln!(out, "Target: {}", inn.target);
        }
    }

    if !batting.is_empty() {
        banner(&mut out, "CURRENT BATTING");
        for b in batting.iter().filter(|b| b.at_crease()) {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{}: {}* ({} balls, {}x4, {}x6)",
                b.player, b.runs, b.balls, b.fours, b.sixes
            );
            let _ = writeln!(out, "Strike Rate: {:.2} | Status: {}", b.strike_rate, b.status);
        }
    }

    if !bowling.is_empty() {
        banner(&mut out, "CURRENT BOWLING");
        for b in bowling {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{}: {} overs, {} runs, {} wickets",
                b.bowler, b.overs, b.runs, b.wickets
            );
            let _ = writeln!(out, "Economy: {:.2} | Status: {}", b.economy, b.status);
        }
    }

    if let Some(cp) = current_partnership(partnerships) {
        banner(&mut out, "CURRENT PARTNERSHIP");
        let _ = writeln!(
            out,
            "Partnership for {} wicket: {} runs in {} overs",
            cp.wicket_number, cp.partnership_runs, cp.partnership_overs
        );
        let _ = writeln!(out, "Run Rate: {:.2}/over", cp.run_rate);
    }

    out
}

/// Short summary for the summary mode. The current-state block only appears
/// while an innings is live.
pub fn render_summary(
    info: &MatchInfo,
    innings: &[InningsView],
    live: Option<&LiveInningsView>,
    batting: &[BatterView],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "=== CRICKET MATCH SUMMARY ===");
    let _ = writeln!(out);
    let _ = writeln!(out, "Match: {}", info.match_title);
    let _ = writeln!(out, "Date: {}", info.date);
    let _ = writeln!(out, "Venue: {}, {}", info.venue, info.city);
    let _ = writeln!(out, "Series: {}", info.series);
    let _ = writeln!(out, "Format: {}", info.match_type);
    let _ = writeln!(out);
    let _ = writeln!(out, "RESULT: {}", info.result);
    let _ = writeln!(out);
    let _ = writeln!(out, "=== INNINGS SUMMARY ===");

    for (i, inn) in innings.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Innings {}: {}", i + 1, inn.batting_team);
        let _ = writeln!(out, "Score: {}/{} ({} overs)", inn.runs, inn.wickets, inn.overs);
        let _ = writeln!(out, "Run Rate: {:.2}", inn.run_rate);
        let _ = writeln!(out, "Extras: {}", inn.extras);
    }

    if let Some(live) = live {
        let _ = writeln!(out);
        let _ = writeln!(out, "=== CURRENT STATE ===");
        let _ = writeln!(out, "Score: {}/{} ({} overs)", live.runs, live.wickets, live.overs);
        let _ = writeln!(out, "Target: {}", live.target);
        let _ = writeln!(out, "Required: {} per over", live.required_run_rate);
        let _ = writeln!(out);
        let _ = write!(out, "Current Batsmen:");
        for b in batting.iter().filter(|b| b.at_crease()) {
            let _ = write!(
                out,
                "\n  {}: {}* ({}b, {}x4, {}x6) SR: {:.2}",
                b.status, b.runs, b.balls, b.fours, b.sixes, b.strike_rate
            );
        }
        out.push('\n');
    }

    out
}

/// Compact report carried in the comprehensive output's `processed` section.
pub fn render_processed(
    summary: &MatchSummary,
    innings: &[InningsView],
    live: Option<&LiveInningsView>,
    batting: &[BatterView],
    bowling: &[BowlerView],
) -> String {
    let d = &summary.match_details;
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "CRICKET MATCH SUMMARY");
    let _ = writeln!(out, "{}", rule!('━', REPORT_WIDTH));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", d.title);
    let _ = writeln!(out, "Date: {}", d.date);
    let _ = writeln!(out, "Venue: {}", d.venue);
    let _ = writeln!(out, "Result: {}", d.result);
    let _ = writeln!(out);
    let _ = writeln!(out, "INNINGS SUMMARY");
    let _ = writeln!(out, "{}", rule!('─', REPORT_WIDTH));

    for (i, inn) in innings.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Innings {}: {}", i + 1, inn.batting_team);
        let _ = writeln!(out, "Score: {}/{} ({} overs)", inn.runs, inn.wickets, inn.overs);
        let _ = writeln!(out, "Run Rate: {:.2} per over", inn.run_rate);
    }

    if let Some(live) = live {
        let _ = writeln!(out);
        let _ = writeln!(out, "CURRENT MATCH STATE");
        let _ = writeln!(out, "{}", rule!('─', REPORT_WIDTH));
        let _ = writeln!(
            out,
            "{} batting: {}/{} ({} overs)",
            live.batting_team, live.runs, live.wickets, live.overs
        );
        let _ = writeln!(out, "Target: {}", live.target);
        let _ = writeln!(out, "Run Rate: {:.2}", live.run_rate);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Current Batsmen:");
    for b in batting.iter().filter(|b| b.at_crease()) {
        let _ = writeln!(
            out,
            "  {} ({}): {}* ({}b) SR: {:.2}",
            b.player, b.status, b.runs, b.balls, b.strike_rate
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Current Bowlers:");
    for b in bowling {
        let _ = writeln!(
            out,
            "  {}: {}-{}-{}-{} (Econ: {:.2})",
            b.bowler, b.overs, b.maidens, b.runs, b.wickets, b.economy
        );
    }

    out
}

/* ---------- helpers ---------- */

fn banner(out: &mut String, title: &str) {
    let wide = rule!('=', REPORT_WIDTH);
    let _ = writeln!(out);
    let _ = writeln!(out, "{wide}");
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{wide}");
}
