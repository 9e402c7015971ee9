// src/config/consts.rs

// Net config
pub const USER_AGENT: &str = "cricket_scrape/0.3";
pub const NET_TIMEOUT_SECS: u64 = 15;
pub const PLAYER_STATS_PREFIX: &str = "https://stats.espncricinfo.com/ci/engine/player/";
pub const PLAYER_STATS_QUERY: &str = ".html?class=11;template=results;type=allround";
// Between player pages while filling a team roster.
pub const PLAYER_FETCH_PAUSE_SECS: u64 = 5;

// Local cache
pub const LOG_FILE: &str = ".store/debug.log";

// Export
pub const DEFAULT_OUTPUT_NAME: &str = "output";
pub const TMP_SUFFIX: &str = ".partial";
pub const BACKUP_SUFFIX: &str = ".previous";

// Live snapshot status tags
pub const STATUS_STRIKER: &str = "striker";
pub const STATUS_NON_STRIKER: &str = "non-striker";
pub const STATUS_CURRENT_PARTNERSHIP: &str = "current partnership";

// Lookup placeholders
pub const UNKNOWN_TEAM: &str = "Unknown";
pub const PLAYER_PLACEHOLDER_PREFIX: &str = "Player_";

// Document classification
pub const MATCH_KEYS: &[&str] = &["match", "live", "innings", "team", "comms"];
pub const PLAYER_STAT_KEYS: &[&str] =
    &["player_name", "player_id", "Span", "Mat", "Runs", "HS", "Ave", "SR"];

// Reports
pub const REPORT_WIDTH: usize = 60;
pub const INNINGS_RULE_WIDTH: usize = 40;
