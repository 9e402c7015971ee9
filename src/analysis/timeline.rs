// src/analysis/timeline.rs
//! Ball-by-ball projections over the `comms` section.
//!
//! `comms` is a list of overs, each carrying its deliveries under `ball`.
//! [`extract_ball_by_ball`] keeps that nesting and the source order;
//! [`extract_timeline`] flattens it and orders it chronologically.

use std::cmp::Ordering;
use std::fmt::Write as _;

use serde_json::Value;

use crate::analysis::document::MatchDocument;
use crate::analysis::summary::match_info;
use crate::analysis::views::{BallRow, BallView, OverView, TimelineEvent};
use crate::config::consts::{INNINGS_RULE_WIDTH, REPORT_WIDTH};
use crate::core::access::{field, integer, items, text};

/// One entry per over, balls nested, in source order.
pub fn extract_ball_by_ball(doc: &MatchDocument) -> Vec<OverView> {
    doc.comms()
        .iter()
        .map(|comm| OverView {
            over_number: integer(field(comm, "over_number"), 0),
            innings_number: integer(field(comm, "innings_number"), 0),
            runs_after_over: integer(field(comm, "runs"), 0),
            wickets_after_over: integer(field(comm, "wickets"), 0),
            balls: items(comm, "ball")
                .iter()
                .map(|b| BallView {
                    over: text(field(b, "overs_actual")),
                    bowler_to_batter: text(field(b, "players")),
                    event: text(field(b, "event")),
                    dismissal: text(field(b, "dismissal")),
                    text: text(field(b, "text")),
                })
                .collect(),
        })
        .collect()
}

/// Flat table, one row per delivery. Ball-level over/innings numbers win;
/// the enclosing over's values fill in when a ball lacks them.
pub fn ball_rows(doc: &MatchDocument) -> Vec<BallRow> {
    let mut rows = Vec::new();
    for comm in doc.comms() {
        let over = integer(field(comm, "over_number"), 0);
        let innings = integer(field(comm, "innings_number"), 0);
        for b in items(comm, "ball") {
            rows.push(BallRow {
                over: integer(field(b, "over_number"), over),
                ball: text(field(b, "overs_actual")),
                matchup: text(field(b, "players")),
                outcome: text(field(b, "event")),
                dismissal: text(field(b, "dismissal")),
                innings: integer(field(b, "innings_number"), innings),
            });
        }
    }
    rows
}

/// Every delivery, ordered by innings then by the `overs_actual` marker.
///
/// The marker is compared as a plain decimal, so "12.10" sorts ahead of
/// "12.2". Ties keep source order.
pub fn extract_timeline(doc: &MatchDocument) -> Vec<TimelineEvent> {
    let mut events: Vec<TimelineEvent> = doc
        .comms()
        .iter()
        .flat_map(|comm| {
            let over_number = integer(field(comm, "over_number"), 0);
            let innings = integer(field(comm, "innings_number"), 0);
            items(comm, "ball").iter().map(move |b| timeline_event(b, over_number, innings))
        })
        .collect();

    sort_timeline(&mut events);
    events
}

fn timeline_event(ball: &Value, over_number: i64, innings: i64) -> TimelineEvent {
    TimelineEvent {
        over: text(field(ball, "overs_actual")),
        over_number,
        innings,
        players: text(field(ball, "players")),
        event: text(field(ball, "event")),
        dismissal: text(field(ball, "dismissal")),
        text: text(field(ball, "text")),
        speed_kph: text(field(ball, "speed_kph")),
        speed_mph: text(field(ball, "speed_mph")),
    }
}

/// Stable sort by `(innings, over marker as decimal)`.
pub fn sort_timeline(events: &mut [TimelineEvent]) {
    events.sort_by(timeline_order);
}

/// Timeline ordering; unparseable over markers compare as 0.
pub fn timeline_order(a: &TimelineEvent, b: &TimelineEvent) -> Ordering {
    a.innings.cmp(&b.innings).then_with(|| over_key(&a.over).total_cmp(&over_key(&b.over)))
}

fn over_key(over: &str) -> f64 {
    over.trim().parse::<f64>().ok().filter(|f| f.is_finite()).unwrap_or(0.0)
}

/// Plain-text timeline: match header, then innings and over sections.
pub fn generate_timeline_report(doc: &MatchDocument) -> String {
    let events = extract_timeline(doc);
    let info = match_info(doc);
    let wide = rule!('=', REPORT_WIDTH);

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "CRICKET MATCH TIMELINE");
    let _ = writeln!(out, "{wide}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Match: {}", info.match_title);
    let _ = writeln!(out, "Date: {}", info.date);
    let _ = writeln!(out, "Venue: {}, {}", info.venue, info.city);
    let _ = writeln!(out, "Result: {}", info.result);
    let _ = writeln!(out);
    let _ = writeln!(out, "{wide}");
    let _ = writeln!(out, "EVENT-BY-EVENT TIMELINE");
    let _ = writeln!(out, "{wide}");

    let mut innings: Option<i64> = None;
    let mut over: Option<i64> = None;
    for e in &events {
        if innings != Some(e.innings) {
            innings = Some(e.innings);
            over = None;
            let _ = writeln!(out, "\nINNINGS {}", e.innings);
            let _ = writeln!(out, "{}", rule!('-', INNINGS_RULE_WIDTH));
        }
        if over != Some(e.over_number) {
            over = Some(e.over_number);
            let _ = writeln!(out, "\nOver {}:", e.over_number);
        }

        let _ = write!(out, "  {}: {} - {}", e.over, e.players, e.event);
        if !e.dismissal.is_empty() {
            let _ = write!(out, " ({})", e.dismissal);
        }
        if !e.speed_kph.is_empty() {
            let _ = write!(out, " [Speed: {} km/h]", e.speed_kph);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> MatchDocument {
        MatchDocument::from_value(json!({
            "match": { "cms_match_title": "Nepal v Namibia", "date": "2024-02-27",
                       "ground_name": "TU Ground", "town_name": "Kirtipur" },
            "live": { "status": "Namibia won by 20 runs" },
            "comms": [
                { "over_number": 13, "innings_number": 2, "runs": 88, "wickets": 3, "ball": [
                    { "overs_actual": "12.2", "players": "Lamichhane to Erasmus", "event": "FOUR",
                      "speed_kph": "88.1" },
                    { "overs_actual": "12.10", "players": "Lamichhane to Erasmus", "event": "1 run" }
                ] },
                { "over_number": 20, "innings_number": 1, "runs": 150, "wickets": 8, "ball": [
                    { "overs_actual": "19.6", "players": "Trumpelmann to Airee", "event": "OUT",
                      "dismissal": "c Smit b Trumpelmann", "over_number": 20, "innings_number": 1 }
                ] },
                { "over_number": 1, "innings_number": 1, "ball": [
                    { "overs_actual": "0.1", "players": "Scholtz to Bhurtel", "event": "no run" },
                    { "players": "Scholtz to Bhurtel", "event": "wide" }
                ] },
                { "over_number": 2, "innings_number": 1 }
            ]
        }))
    }

    #[test]
    fn ball_by_ball_keeps_source_order() {
        let overs = extract_ball_by_ball(&doc());
        assert_eq!(overs.len(), 4);
        assert_eq!(overs[0].over_number, 13);
        assert_eq!(overs[0].runs_after_over, 88);
        assert_eq!(overs[0].balls[0].bowler_to_batter, "Lamichhane to Erasmus");
        assert_eq!(overs[1].balls[0].dismissal, "c Smit b Trumpelmann");
        assert!(overs[3].balls.is_empty());
    }

    #[test]
    fn ball_rows_fall_back_to_enclosing_over() {
        let rows = ball_rows(&doc());
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].over, 13);
        assert_eq!(rows[0].innings, 2);
        assert_eq!(rows[2].outcome, "OUT");
        assert_eq!(rows[2].innings, 1);
    }

    #[test]
    fn timeline_sorts_by_innings_then_over_decimal() {
        let tl = extract_timeline(&doc());
        let overs: Vec<_> = tl.iter().map(|e| (e.innings, e.over.as_str())).collect();
        assert_eq!(overs, vec![
            (1, ""),
            (1, "0.1"),
            (1, "19.6"),
            (2, "12.10"),
            (2, "12.2"),
        ]);
        for pair in tl.windows(2) {
            assert_ne!(timeline_order(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn timeline_is_idempotent() {
        let once = extract_timeline(&doc());
        let mut twice = once.clone();
        sort_timeline(&mut twice);
        assert_eq!(once, twice);
        assert_eq!(extract_timeline(&doc()), once);
    }

    #[test]
    fn report_groups_by_innings_and_over() {
        let report = generate_timeline_report(&doc());
        assert!(report.starts_with("\nCRICKET MATCH TIMELINE\n"));
        assert!(report.contains("Venue: TU Ground, Kirtipur"));
        assert!(report.contains("Result: Namibia won by 20 runs"));
        assert!(report.contains("\nINNINGS 1\n----------------------------------------\n"));
        assert!(report.contains("  19.6: Trumpelmann to Airee - OUT (c Smit b Trumpelmann)\n"));
        assert!(report.contains("  12.2: Lamichhane to Erasmus - FOUR [Speed: 88.1 km/h]\n"));
        assert_eq!(report.matches("INNINGS 2").count(), 1);
        assert_eq!(report.matches("\nOver 13:").count(), 1);

        let i1 = report.find("INNINGS 1").unwrap();
        let i2 = report.find("INNINGS 2").unwrap();
        assert!(i1 < i2);
    }

    #[test]
    fn empty_comms_still_render_header() {
        let doc = MatchDocument::from_value(json!({ "match": {} }));
        assert!(extract_timeline(&doc).is_empty());
        let report = generate_timeline_report(&doc);
        assert!(report.contains("EVENT-BY-EVENT TIMELINE"));
        assert!(!report.contains("INNINGS"));
    }
}
