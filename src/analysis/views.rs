// src/analysis/views.rs
//
// Flat output records produced by the projectors. Each one owns its data;
// nothing here borrows from the source document.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::consts::{STATUS_CURRENT_PARTNERSHIP, STATUS_NON_STRIKER, STATUS_STRIKER};

/* ---------------- match / innings ---------------- */

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MatchDetails {
    pub title: String,
    pub date: String,
    pub venue: String,
    pub city: String,
    pub series: String,
    pub format: String,
    pub result: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MatchSummary {
    pub match_details: MatchDetails,
    /// Participating teams only, keyed by canonical team id.
    pub teams: BTreeMap<String, String>,
}

/// Extended metadata used by the summary and timeline reports.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MatchInfo {
    pub match_title: String,
    pub date: String,
    pub venue: String,
    pub city: String,
    pub country: String,
    pub series: String,
    pub match_type: String,
    pub result: String,
    pub toss_winner: String,
    pub winner: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InningsView {
    pub innings_number: i64,
    pub batting_team_id: String,
    pub bowling_team_id: String,
    pub batting_team: String,
    pub runs: i64,
    pub wickets: i64,
    /// "overs.balls", kept verbatim.
    pub overs: String,
    pub run_rate: f64,
    pub extras: i64,
    /// 0 when the innings is not a chase.
    pub target: i64,
    pub status: String,
}

impl InningsView {
    pub fn is_chase(&self) -> bool { self.target > 0 }
}

/* ---------------- roster ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerView {
    pub player_id: String,
    pub name: String,
    pub role: String,
    pub batting_style: String,
    pub bowling_style: String,
    pub captain: bool,
    pub keeper: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TeamView {
    pub team_id: String,
    pub name: String,
    pub abbreviation: String,
    pub captain: Option<String>,
    pub wicket_keeper: Option<String>,
    pub players: Vec<PlayerView>,
}

/* ---------------- live state ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatterView {
    pub player: String,
    pub player_id: String,
    pub runs: i64,
    pub balls: i64,
    pub fours: i64,
    pub sixes: i64,
    pub strike_rate: f64,
    pub status: String,
    pub position: i64,
}

impl BatterView {
    /// Striker or non-striker; everyone else has not batted yet or is out.
    pub fn at_crease(&self) -> bool {
        self.status == STATUS_STRIKER || self.status == STATUS_NON_STRIKER
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BowlerView {
    pub bowler: String,
    pub player_id: String,
    pub overs: String,
    pub maidens: i64,
    pub runs: i64,
    pub wickets: i64,
    pub economy: f64,
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DismissedPlayer {
    pub runs: i64,
    pub balls: i64,
    pub dismissal: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PartnershipView {
    pub wicket_number: i64,
    pub runs_scored: i64,
    pub overs_batted: String,
    pub partnership_runs: i64,
    pub partnership_overs: String,
    pub run_rate: f64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissed_player: Option<DismissedPlayer>,
}

impl PartnershipView {
    pub fn is_current(&self) -> bool { self.status == STATUS_CURRENT_PARTNERSHIP }
}

/// The in-progress innings from `live.innings`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LiveInningsView {
    pub batting_team_id: String,
    pub batting_team: String,
    pub runs: i64,
    pub wickets: i64,
    pub overs: String,
    /// "N/A" when the source has none.
    pub target: String,
    pub run_rate: f64,
    pub required_run_rate: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecentBall {
    pub ball_number: i64,
    /// Runs off the ball, or its symbol ("W", "1lb", …).
    pub runs: String,
    pub extras: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecentOver {
    pub over_number: i64,
    pub balls: Vec<RecentBall>,
    pub runs_in_over: i64,
}

/* ---------------- ball by ball ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BallView {
    pub over: String,
    pub bowler_to_batter: String,
    pub event: String,
    pub dismissal: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverView {
    pub over_number: i64,
    pub innings_number: i64,
    pub runs_after_over: i64,
    pub wickets_after_over: i64,
    pub balls: Vec<BallView>,
}

/// One row per delivery; the flat table shape of the ball-by-ball data.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BallRow {
    pub over: i64,
    pub ball: String,
    pub matchup: String,
    pub outcome: String,
    pub dismissal: String,
    pub innings: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineEvent {
    pub over: String,
    pub over_number: i64,
    pub innings: i64,
    pub players: String,
    pub event: String,
    pub dismissal: String,
    pub text: String,
    pub speed_kph: String,
    pub speed_mph: String,
}
