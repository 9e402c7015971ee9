// src/analysis/document.rs
//! The loaded match snapshot.
//!
//! A `MatchDocument` owns the parsed JSON tree and hands out read-only section
//! views. Nothing downstream mutates it; every projector borrows `&MatchDocument`.

use serde_json::Value;

use crate::config::consts::{MATCH_KEYS, PLAYER_STAT_KEYS};
use crate::core::access::{items, section};
use crate::core::html::extract_json_payload;
use crate::error::{AnalysisError, Result};

#[derive(Clone, Debug)]
pub struct MatchDocument {
    root: Value,
}

impl MatchDocument {
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Parse raw input: plain JSON, or a page with the JSON wrapped in `<pre>`/`<body>`.
    pub fn parse(raw: &str) -> Result<Self> {
        let payload = extract_json_payload(raw).ok_or(AnalysisError::NoPayload)?;
        let root: Value = serde_json::from_str(&payload).map_err(AnalysisError::Parse)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Value { &self.root }

    /// Match data carries at least one match section and none of the
    /// player-statistics keys.
    pub fn is_match_data(&self) -> bool {
        let Some(map) = self.root.as_object() else { return false };
        let has_match = MATCH_KEYS.iter().any(|k| map.contains_key(*k));
        let has_player = PLAYER_STAT_KEYS.iter().any(|k| map.contains_key(*k));
        has_match && !has_player
    }

    /* ---------- sections ---------- */

    pub fn description(&self) -> Option<&Value> { self.root.get("description") }
    pub fn match_info(&self) -> &Value { section(&self.root, "match") }
    pub fn live(&self) -> &Value { section(&self.root, "live") }
    pub fn innings(&self) -> &[Value] { items(&self.root, "innings") }
    pub fn teams(&self) -> &[Value] { items(&self.root, "team") }
    pub fn comms(&self) -> &[Value] { items(&self.root, "comms") }

    pub fn live_batting(&self) -> &[Value] { items(self.live(), "batting") }
    pub fn live_bowling(&self) -> &[Value] { items(self.live(), "bowling") }
    pub fn live_fow(&self) -> &[Value] { items(self.live(), "fow") }
    pub fn live_innings(&self) -> &Value { section(self.live(), "innings") }
    pub fn recent_overs(&self) -> &[Value] { items(self.live(), "recent_overs") }
}
