// src/analysis/live.rs
//! Live-state projections: who is batting, who is bowling, the partnerships
//! so far and the last few overs.
//!
//! Entries come out in source order (batting order / bowling order). Nothing
//! is filtered by status here; `BatterView::at_crease` and
//! `PartnershipView::is_current` are for callers that want the active subset.

use serde_json::Value;

use crate::analysis::document::MatchDocument;
use crate::analysis::index::{canonical_id, PlayerIndex, TeamIndex};
use crate::analysis::views::{
    BatterView, BowlerView, DismissedPlayer, LiveInningsView, PartnershipView, RecentBall,
    RecentOver,
};
use crate::core::access::{field, integer, numeric, round2, text, text_or};

pub fn current_batting(doc: &MatchDocument) -> Vec<BatterView> {
    batting_with(doc, &PlayerIndex::build(doc))
}

pub fn current_bowling(doc: &MatchDocument) -> Vec<BowlerView> {
    bowling_with(doc, &PlayerIndex::build(doc))
}

pub(crate) fn batting_with(doc: &MatchDocument, players: &PlayerIndex) -> Vec<BatterView> {
    doc.live_batting()
        .iter()
        .map(|b| {
            let id = field(b, "player_id");
            BatterView {
                player: players.name(&id),
                player_id: canonical_id(&id),
                runs: integer(field(b, "runs"), 0),
                balls: integer(field(b, "balls_faced"), 0),
                fours: integer(field(b, "fours"), 0),
                sixes: integer(field(b, "sixes"), 0),
                strike_rate: numeric(field(b, "strike_rate"), 0.0),
                status: text(field(b, "live_current_name")),
                position: integer(field(b, "batting_position"), 0),
            }
        })
        .collect()
}

pub(crate) fn bowling_with(doc: &MatchDocument, players: &PlayerIndex) -> Vec<BowlerView> {
    doc.live_bowling()
        .iter()
        .map(|b| {
            let id = field(b, "player_id");
            BowlerView {
                bowler: players.name(&id),
                player_id: canonical_id(&id),
                overs: text(field(b, "overs")),
                maidens: integer(field(b, "maidens"), 0),
                runs: integer(field(b, "conceded"), 0),
                wickets: integer(field(b, "wickets"), 0),
                economy: numeric(field(b, "economy_rate"), 0.0),
                status: text(field(b, "live_current_name")),
            }
        })
        .collect()
}

/// One view per fall-of-wicket record, in source order.
pub fn partnerships(doc: &MatchDocument) -> Vec<PartnershipView> {
    doc.live_fow().iter().map(partnership_view).collect()
}

fn partnership_view(fow: &Value) -> PartnershipView {
    let dismissed_player = field(fow, "out_player")
        .filter(|p| p.as_object().is_some_and(|m| !m.is_empty()))
        .map(|p| DismissedPlayer {
            runs: integer(field(p, "runs"), 0),
            balls: integer(field(p, "balls_faced"), 0),
            dismissal: text(field(p, "dismissal_string")),
        });

    PartnershipView {
        wicket_number: integer(field(fow, "fow_wickets"), 0),
        runs_scored: integer(field(fow, "fow_runs"), 0),
        overs_batted: text(field(fow, "fow_overs")),
        partnership_runs: integer(field(fow, "partnership_runs"), 0),
        partnership_overs: text(field(fow, "partnership_overs")),
        run_rate: round2(numeric(field(fow, "partnership_rate"), 0.0)),
        status: text(field(fow, "live_current_name")),
        dismissed_player,
    }
}

/// First partnership tagged as current. Extra matches are logged and ignored.
pub fn current_partnership(partnerships: &[PartnershipView]) -> Option<&PartnershipView> {
    let mut current = partnerships.iter().filter(|p| p.is_current());
    let first = current.next();
    let extra = current.count();
    if extra > 0 {
        logd!("Partnerships: {extra} extra 'current partnership' entries ignored");
    }
    first
}

/// The innings in progress, when `live.innings.live_current == 1`.
pub fn live_innings(doc: &MatchDocument) -> Option<LiveInningsView> {
    live_innings_with(doc, &TeamIndex::build(doc))
}

pub(crate) fn live_innings_with(doc: &MatchDocument, teams: &TeamIndex) -> Option<LiveInningsView> {
    let inn = doc.live_innings();
    if integer(field(inn, "live_current"), 0) != 1 {
        return None;
    }
    let batting = field(inn, "batting_team_id");
    Some(LiveInningsView {
        batting_team_id: canonical_id(&batting),
        batting_team: teams.name(&batting),
        runs: integer(field(inn, "runs"), 0),
        wickets: integer(field(inn, "wickets"), 0),
        overs: text(field(inn, "overs")),
        target: text_or(field(inn, "target"), "N/A"),
        run_rate: round2(numeric(field(inn, "run_rate"), 0.0)),
        required_run_rate: text_or(field(inn, "required_run_rate"), "N/A"),
    })
}

/// `live.recent_overs`: each over is a list of balls. Only integer ball
/// values count toward `runs_in_over`; symbols such as "W" add nothing.
pub fn recent_overs(doc: &MatchDocument) -> Vec<RecentOver> {
    doc.recent_overs()
        .iter()
        .map(|over| {
            let balls_src: &[Value] = over.as_array().map(Vec::as_slice).unwrap_or(&[]);
            let over_number = balls_src
                .first()
                .map(|b| integer(field(b, "over_number"), 0))
                .unwrap_or(0);

            let mut runs_in_over = 0;
            let balls = balls_src
                .iter()
                .map(|b| {
                    let ball = field(b, "ball");
                    if let Some(n) = ball.and_then(Value::as_i64) {
                        runs_in_over += n;
                    }
                    RecentBall {
                        ball_number: integer(field(b, "ball_number"), 0),
                        runs: text(ball),
                        extras: text(field(b, "extras")),
                    }
                })
                .collect();

            RecentOver { over_number, balls, runs_in_over }
        })
        .collect()
}
