// src/analysis/mod.rs
//! Read-only projections over a loaded match document.
//!
//! ```text
//! MatchDocument ─┬─ index    (team / player lookup)
//!                ├─ summary  (match metadata, innings)
//!                ├─ live     (batting, bowling, partnerships, recent overs)
//!                └─ timeline (ball by ball, sorted events)
//!                         ↘ report (plain-text renderers over the views)
//! ```
//!
//! Projectors never fail once a `MatchDocument` exists: absent fields take
//! defaults and lookup misses produce placeholders.

pub mod document;
pub mod index;
pub mod live;
pub mod report;
pub mod summary;
pub mod timeline;
pub mod views;

pub use document::MatchDocument;
pub use index::{build_player_index, build_team_index, team_info, PlayerIndex, TeamIndex};
pub use live::{current_batting, current_bowling, current_partnership, live_innings, partnerships, recent_overs};
pub use report::{render_processed, render_report, render_summary};
pub use summary::{innings_summary, match_info, match_summary};
pub use timeline::{ball_rows, extract_ball_by_ball, extract_timeline, generate_timeline_report};
