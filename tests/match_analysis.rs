// tests/match_analysis.rs
use cricket_scrape::analysis::{self, MatchDocument};
use cricket_scrape::config::options::AnalysisMode;
use cricket_scrape::error::AnalysisError;
use cricket_scrape::runner::analyze_text;

const MATCH: &str = include_str!("fixtures/match.json");

fn doc() -> MatchDocument {
    MatchDocument::parse(MATCH).unwrap()
}

#[test]
fn fixture_is_match_data() {
    assert!(doc().is_match_data());
}

#[test]
fn end_to_end_report_lists_both_innings() {
    let d = doc();
    let report = analysis::render_report(
        &analysis::match_summary(&d),
        &analysis::innings_summary(&d),
        &analysis::current_batting(&d),
        &analysis::current_bowling(&d),
        &analysis::partnerships(&d),
    );

    assert!(report.contains("Score: 150/8 (20 overs)"));
    assert!(report.contains("Innings 2: Namibia"));
    assert!(report.contains("Target: 151"));
    assert!(report.contains("Gerhard Erasmus: 41* (30 balls, 4x4, 1x6)"));
    assert!(report.contains("JJ Smit: 9*"));
    assert!(!report.contains("Zane Green: 27"));
    assert!(report.contains("Sandeep Lamichhane: 3.4 overs, 22 runs, 2 wickets"));
    assert!(report.contains("Partnership for 4 wicket: 19 runs in 3.2 overs"));
}

#[test]
fn lookups_resolve_numeric_and_string_ids() {
    let d = doc();
    let bats = analysis::current_batting(&d);
    let names: Vec<_> = bats.iter().map(|b| b.player.as_str()).collect();
    assert_eq!(names, vec!["Zane Green", "Gerhard Erasmus", "JJ Smit"]);

    let inns = analysis::innings_summary(&d);
    assert_eq!(inns[0].batting_team, "Nepal");
    assert_eq!(inns[0].innings_number, 1);
    assert_eq!(inns[0].run_rate, 7.5);
}

#[test]
fn only_one_current_partnership() {
    let ps = analysis::partnerships(&doc());
    let current: Vec<_> = ps.iter().filter(|p| p.is_current()).collect();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].partnership_runs, 19);
    assert_eq!(ps[0].run_rate, 7.2);
}

#[test]
fn timeline_orders_innings_then_overs() {
    let tl = analysis::extract_timeline(&doc());
    let order: Vec<_> = tl.iter().map(|e| (e.innings, e.over.as_str())).collect();
    assert_eq!(order, vec![
        (1, "19.5"), (1, "19.6"),
        (2, "12.1"), (2, "12.2"), (2, "12.3"), (2, "12.4"),
    ]);

    let report = analysis::generate_timeline_report(&doc());
    assert!(report.contains("  19.5: Trumpelmann to Airee - OUT (c Smit b Trumpelmann) [Speed: 138.0 km/h]"));
    assert!(report.find("INNINGS 1").unwrap() < report.find("INNINGS 2").unwrap());
}

#[test]
fn recent_overs_total_numeric_balls() {
    let overs = analysis::recent_overs(&doc());
    assert_eq!(overs.iter().map(|o| o.runs_in_over).collect::<Vec<_>>(), vec![5, 11]);
    assert_eq!(overs[1].over_number, 13);
}

#[test]
fn team_info_carries_squads() {
    let teams = analysis::team_info(&doc());
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[1].captain.as_deref(), Some("Gerhard Erasmus"));
    assert_eq!(teams[1].wicket_keeper.as_deref(), Some("Zane Green"));
    assert_eq!(teams[0].players.len(), 4);
}

#[test]
fn page_wrapped_json_is_accepted() {
    let page = format!("<html><head></head><body><pre>{}</pre></body></html>", MATCH);
    let a = analyze_text(&page, AnalysisMode::Summary, "nep", None).unwrap();
    assert!(a.console.contains("=== CURRENT STATE ==="));
    assert!(a.console.contains("Required: 9.68 per over"));
}

#[test]
fn malformed_and_player_documents_are_rejected() {
    let err = analyze_text("{\"match\": ", AnalysisMode::Live, "x", None).unwrap_err();
    assert!(matches!(err, AnalysisError::Parse(_)));

    let err = analyze_text("{\"player_name\": \"Rohit Kumar\", \"stats\": {}}", AnalysisMode::Live, "x", None)
        .unwrap_err();
    assert!(matches!(err, AnalysisError::NotMatchData));
    assert!(err.is_malformed());
}
