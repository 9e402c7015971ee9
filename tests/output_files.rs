// tests/output_files.rs
use std::fs;
use std::path::{Path, PathBuf};

use cricket_scrape::config::options::{AnalysisMode, RunOptions, Source};
use cricket_scrape::progress::RecordingProgress;
use cricket_scrape::runner::{self, Stage};

const MATCH: &str = include_str!("fixtures/match.json");
const PLAYER: &str = include_str!("fixtures/player.html");

fn write_input(dir: &Path, name: &str, body: &str) -> PathBuf {
    let p = dir.join(name);
    fs::write(&p, body).unwrap();
    p
}

fn opts(source: Source, mode: AnalysisMode, out: &Path) -> RunOptions {
    RunOptions {
        source: Some(source),
        mode,
        output: out.to_string_lossy().into_owned(),
        ..RunOptions::default()
    }
}

#[test]
fn every_mode_writes_its_named_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "match.json", MATCH);
    let base = dir.path().join("out").join("nep");

    for mode in AnalysisMode::ALL {
        let summary = runner::run(&opts(Source::MatchFile(input.clone()), mode, &base), None).unwrap();
        let expected: Vec<PathBuf> = std::iter::once(mode.json_path(&base.to_string_lossy()))
            .chain(mode.text_path(&base.to_string_lossy()))
            .collect();
        assert_eq!(summary.files_written, expected, "mode {mode}");
        for p in &expected {
            assert!(p.is_file(), "{} missing", p.display());
        }
    }
}

#[test]
fn timeline_text_file_holds_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "match.json", MATCH);
    let base = dir.path().join("tl");

    runner::run(&opts(Source::MatchFile(input), AnalysisMode::Timeline, &base), None).unwrap();

    let txt = fs::read_to_string(dir.path().join("tl.txt")).unwrap();
    assert!(txt.contains("CRICKET MATCH TIMELINE"));
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("tl.json")).unwrap()).unwrap();
    assert_eq!(json["total_events"], 6);
    assert_eq!(json["timeline_report"].as_str(), Some(txt.as_str()));
}

#[test]
fn failed_run_writes_nothing_and_keeps_old_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "bad.json", "{\"match\": [");
    let base = dir.path().join("nep");
    let existing = dir.path().join("nep_summary.json");
    fs::write(&existing, "previous run").unwrap();

    let mut rec = RecordingProgress::default();
    let res = runner::run(&opts(Source::MatchFile(input), AnalysisMode::Summary, &base), Some(&mut rec));

    assert!(res.is_err());
    assert_eq!(rec.stages.last(), Some(&Stage::Failed));
    assert_eq!(fs::read_to_string(&existing).unwrap(), "previous run");
    let names: Vec<_> = fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
    assert_eq!(names.len(), 2);
}

#[test]
fn player_data_is_refused_as_match_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "player.json", "{\"player_name\": \"Rohit Kumar\", \"Mat\": \"40\"}");
    let base = dir.path().join("p");

    let err = runner::run(&opts(Source::MatchFile(input), AnalysisMode::Comprehensive, &base), None)
        .unwrap_err();
    assert!(err.to_string().contains("does not appear to be cricket match data"));
    assert!(!dir.path().join("p_comprehensive.json").exists());
}

#[test]
fn missing_input_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("x");
    let missing = dir.path().join("nope.json");
    assert!(runner::run(&opts(Source::MatchFile(missing), AnalysisMode::Live, &base), None).is_err());
}

#[test]
fn player_page_writes_stats_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "1122886.html", PLAYER);
    let base = dir.path().join("rohit");

    let summary = runner::run(&opts(Source::PlayerFile(input), AnalysisMode::default(), &base), None).unwrap();
    assert_eq!(summary.files_written, vec![dir.path().join("rohit.json")]);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("rohit.json")).unwrap()).unwrap();
    assert_eq!(json["player_name"], "Rohit Kumar");
    assert_eq!(json["stats"]["v Namibia"][0]["Mat"], "8");
    assert!(json["stats"].get("v UAE").is_none());
}

#[test]
fn team_roster_is_deduplicated_and_saved() {
    let dir = tempfile::tempdir().unwrap();
    let roster = r#"{"total": 3, "results": [
        {"objectId": 1122886, "name": "Rohit Paudel"},
        {"objectId": 1151263, "name": "Kushal Bhurtel"},
        {"objectId": 1122886, "name": "Rohit Paudel"}
    ]}"#;
    let input = write_input(dir.path(), "raw.json", roster);
    let base = dir.path().join("nepal");

    let mut o = opts(Source::TeamFile(input), AnalysisMode::default(), &base);
    o.team_url = Some("https://www.espncricinfo.com/team/nepal-33".into());
    let summary = runner::run(&o, None).unwrap();

    assert_eq!(summary.files_written, vec![dir.path().join("nepal.json")]);
    assert_eq!(summary.console, "Task Completed: Collected all 2 players from nepal.");
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("nepal.json")).unwrap()).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(2));
}

#[test]
fn filled_roster_resumes_without_fetching() {
    let dir = tempfile::tempdir().unwrap();
    let roster = r#"[
        {"objectId": 1, "full_data": {"player_name": "A B", "player_id": "1", "stats": {}}},
        {"objectId": 2, "full_data": {"player_name": "C D", "player_id": "2", "stats": {}}},
        {"name": "no id"}
    ]"#;
    let input = write_input(dir.path(), "team.json", roster);
    let base = dir.path().join("team_full");

    let summary = runner::run(&opts(Source::TeamFull(input), AnalysisMode::default(), &base), None).unwrap();
    assert_eq!(summary.console, "Fetched 0 players; 3 in roster.");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("team_full.json")).unwrap()).unwrap();
    assert_eq!(json[1]["full_data"]["player_name"], "C D");
}

#[test]
fn bad_roster_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "team.json", "{\"total\": 0}");
    let base = dir.path().join("t");

    let err = runner::run(&opts(Source::TeamFile(input), AnalysisMode::default(), &base), None).unwrap_err();
    assert!(err.to_string().starts_with("invalid team roster"));
    assert!(!dir.path().join("t.json").exists());
}

#[test]
fn unreachable_page_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("page");
    let src = Source::Page("http://127.0.0.1:9/".into());
    assert!(runner::run(&opts(src, AnalysisMode::default(), &base), None).is_err());
    assert!(!dir.path().join("page.html").exists());
}
