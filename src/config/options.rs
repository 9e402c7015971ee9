// src/config/options.rs
use std::fmt;
use std::path::PathBuf;

use super::consts::*;
use crate::specs::team_roster::team_output_name;

/// Which projection set a match run produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnalysisMode {
    #[default]
    Comprehensive,
    Summary,
    Live,
    Structured,
    Timeline,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 5] = [
        AnalysisMode::Comprehensive,
        AnalysisMode::Summary,
        AnalysisMode::Live,
        AnalysisMode::Structured,
        AnalysisMode::Timeline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Comprehensive => "comprehensive",
            AnalysisMode::Summary       => "summary",
            AnalysisMode::Live          => "live",
            AnalysisMode::Structured    => "structured",
            AnalysisMode::Timeline      => "timeline",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let lc = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|m| m.as_str() == lc)
    }

    /// Suffix appended to the output name before `.json`.
    /// Timeline writes the bare name.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            AnalysisMode::Comprehensive => "_comprehensive",
            AnalysisMode::Summary       => "_summary",
            AnalysisMode::Live          => "_live",
            AnalysisMode::Structured    => "_structured",
            AnalysisMode::Timeline      => "",
        }
    }

    pub fn json_path(&self, name: &str) -> PathBuf {
        PathBuf::from(join!(name, self.file_suffix(), ".json"))
    }

    /// Only the timeline mode writes a sibling `.txt` report.
    pub fn text_path(&self, name: &str) -> Option<PathBuf> {
        match self {
            AnalysisMode::Timeline => Some(PathBuf::from(join!(name, ".txt"))),
            _ => None,
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly one data source per invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    MatchFile(PathBuf),
    MatchUrl(String),
    PlayerFile(PathBuf),
    PlayerUrl(String),
    /// Saved team roster, rewritten as a clean player list.
    TeamFile(PathBuf),
    /// Saved (or half-filled) roster whose players get their career stats.
    TeamFull(PathBuf),
    /// Any page, saved as raw HTML.
    Page(String),
}

impl Source {
    pub fn describe(&self) -> String {
        match self {
            Source::MatchFile(p) | Source::PlayerFile(p) => format!("file {}", p.display()),
            Source::TeamFile(p) | Source::TeamFull(p) => format!("roster {}", p.display()),
            Source::MatchUrl(u) | Source::PlayerUrl(u) | Source::Page(u) => format!("URL {u}"),
        }
    }

    pub fn is_team(&self) -> bool {
        matches!(self, Source::TeamFile(_) | Source::TeamFull(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub source: Option<Source>,
    pub mode: AnalysisMode,
    /// Output name without extension; may include a directory.
    pub output: String,
    /// Team page the roster came from; names the output when `output` is left default.
    pub team_url: Option<String>,
}

impl RunOptions {
    /// `output`, unless it is still the default and a team page names the run.
    pub fn output_name(&self) -> String {
        match &self.team_url {
            Some(url) if self.output == DEFAULT_OUTPUT_NAME => team_output_name(url),
            _ => self.output.clone(),
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            source: None,
            mode: AnalysisMode::default(),
            output: s!(DEFAULT_OUTPUT_NAME),
            team_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_round_trip_case_insensitively() {
        for m in AnalysisMode::ALL {
            assert_eq!(AnalysisMode::parse(&m.as_str().to_uppercase()), Some(m));
        }
        assert_eq!(AnalysisMode::parse("replay"), None);
    }

    #[test]
    fn output_paths_follow_mode_suffix() {
        assert_eq!(AnalysisMode::Live.json_path("nep"), PathBuf::from("nep_live.json"));
        assert_eq!(AnalysisMode::Timeline.json_path("nep"), PathBuf::from("nep.json"));
        assert_eq!(AnalysisMode::Timeline.text_path("nep"), Some(PathBuf::from("nep.txt")));
        assert_eq!(AnalysisMode::Summary.text_path("nep"), None);
    }

    #[test]
    fn team_page_names_default_output() {
        let mut o = RunOptions {
            team_url: Some(s!("https://www.espncricinfo.com/team/nepal-33")),
            ..RunOptions::default()
        };
        assert_eq!(o.output_name(), "nepal_33");
        o.output = s!("squads/nep");
        assert_eq!(o.output_name(), "squads/nep");
    }
}
