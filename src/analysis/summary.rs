// src/analysis/summary.rs
//
// Match metadata and per-innings summaries.

use std::collections::BTreeMap;

use crate::analysis::document::MatchDocument;
use crate::analysis::index::{canonical_id, TeamIndex};
use crate::analysis::views::{InningsView, MatchDetails, MatchInfo, MatchSummary};
use crate::core::access::{field, integer, numeric, round2, text};

/// Headline metadata plus the two participating teams.
pub fn match_summary(doc: &MatchDocument) -> MatchSummary {
    let m = doc.match_info();
    let live = doc.live();

    let match_details = MatchDetails {
        title: text(doc.description()),
        date: text(field(m, "date")),
        venue: text(field(m, "ground_name")),
        city: text(field(m, "town_name")),
        series: text(field(m, "series_name")),
        format: text(field(m, "international_class_name")),
        result: text(field(live, "status")),
    };

    let mut teams = BTreeMap::new();
    for side in ["team1", "team2"] {
        let id = canonical_id(&field(m, &join!(side, "_id")));
        let name = text(field(m, &join!(side, "_name")));
        teams.insert(id, name);
    }

    MatchSummary { match_details, teams }
}

pub fn match_info(doc: &MatchDocument) -> MatchInfo {
    let m = doc.match_info();
    MatchInfo {
        match_title: text(field(m, "cms_match_title")),
        date: text(field(m, "date")),
        venue: text(field(m, "ground_name")),
        city: text(field(m, "town_name")),
        country: text(field(m, "country_name")),
        series: text(field(m, "series_name")),
        match_type: text(field(m, "international_class_name")),
        result: text(field(doc.live(), "status")),
        toss_winner: canonical_id(&field(m, "toss_winner_team_id")),
        winner: canonical_id(&field(m, "winner_team_id")),
    }
}

/// One view per innings, in source order.
pub fn innings_summary(doc: &MatchDocument) -> Vec<InningsView> {
    let teams = TeamIndex::build(doc);
    innings_with(doc, &teams)
}

pub(crate) fn innings_with(doc: &MatchDocument, teams: &TeamIndex) -> Vec<InningsView> {
    doc.innings()
        .iter()
        .map(|inn| {
            let batting = field(inn, "batting_team_id");
            InningsView {
                innings_number: integer(field(inn, "innings_number"), 0),
                batting_team_id: canonical_id(&batting),
                bowling_team_id: canonical_id(&field(inn, "bowling_team_id")),
                batting_team: teams.name(&batting),
                runs: integer(field(inn, "runs"), 0),
                wickets: integer(field(inn, "wickets"), 0),
                overs: text(field(inn, "overs")),
                run_rate: round2(numeric(field(inn, "run_rate"), 0.0)),
                extras: integer(field(inn, "extras"), 0),
                target: integer(field(inn, "target"), 0),
                status: text(field(inn, "event_name")),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> MatchDocument {
        MatchDocument::from_value(json!({
            "description": "Nepal v Namibia, 3rd Match",
            "match": {
                "date": "2024-02-27", "ground_name": "Tribhuvan University Ground",
                "town_name": "Kirtipur", "series_name": "Nepal T20I Tri-Series",
                "international_class_name": "T20I",
                "team1_id": "32", "team1_name": "Nepal",
                "team2_id": 28, "team2_name": "Namibia",
                "toss_winner_team_id": 28
            },
            "live": { "status": "Namibia need 71 runs" },
            "team": [
                { "team_id": "32", "team_name": "Nepal" },
                { "team_id": "28", "team_name": "Namibia" }
            ],
            "innings": [
                { "innings_number": 1, "batting_team_id": 32, "bowling_team_id": 28,
                  "runs": 150, "wickets": 8, "overs": "20", "run_rate": "6.333",
                  "extras": 9, "event_name": "complete" },
                { "innings_number": "2", "batting_team_id": "28", "runs": 80, "wickets": 3,
                  "overs": "12.4", "run_rate": "-", "target": 151 },
                { "innings_number": 3, "batting_team_id": 99 }
            ]
        }))
    }

    #[test]
    fn summary_defaults_absent_fields() {
        let s = match_summary(&MatchDocument::from_value(json!({ "match": {} })));
        assert_eq!(s.match_details, MatchDetails::default());
    }

    #[test]
    fn summary_maps_participating_teams() {
        let s = match_summary(&doc());
        assert_eq!(s.match_details.title, "Nepal v Namibia, 3rd Match");
        assert_eq!(s.match_details.venue, "Tribhuvan University Ground");
        assert_eq!(s.match_details.result, "Namibia need 71 runs");
        assert_eq!(s.teams.get("32").map(String::as_str), Some("Nepal"));
        assert_eq!(s.teams.get("28").map(String::as_str), Some("Namibia"));
    }

    #[test]
    fn innings_resolve_teams_and_round_rates() {
        let inns = innings_summary(&doc());
        assert_eq!(inns.len(), 3);

        assert_eq!(inns[0].batting_team, "Nepal");
        assert_eq!(inns[0].run_rate, 6.33);
        assert_eq!(inns[0].target, 0);
        assert!(!inns[0].is_chase());

        assert_eq!(inns[1].innings_number, 2);
        assert_eq!(inns[1].batting_team, "Namibia");
        assert_eq!(inns[1].run_rate, 0.0);
        assert_eq!(inns[1].target, 151);
        assert!(inns[1].is_chase());

        assert_eq!(inns[2].batting_team, "Unknown");
        assert_eq!(inns[2].overs, "");
    }

    #[test]
    fn match_info_normalizes_winner_ids() {
        let info = match_info(&doc());
        assert_eq!(info.toss_winner, "28");
        assert_eq!(info.winner, "");
        assert_eq!(info.match_type, "T20I");
    }
}
