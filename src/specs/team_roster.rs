// src/specs/team_roster.rs
//! Team rosters (`/team/<slug>-<id>` and `/cricketers/team/<slug>-<id>`).
//!
//! The roster itself is the list of player records the team page loads as it
//! scrolls. It is read from a saved JSON file: either the plain list, or one
//! of the page's `{"total": n, "results": [...]}` responses. Each record carries
//! an `objectId`, which is also the player's stats-page id.
//!
//! Filling a roster walks every record, fetches that player's career stats and
//! stores them under `full_data`. Records that already have `full_data` are
//! skipped, so feeding a half-filled roster back in resumes the walk.

use std::collections::HashSet;
use std::error::Error;
use std::thread;
use std::time::Duration;

use serde_json::Value;

use crate::analysis::index::IdKey;
use crate::error::{AnalysisError, Result};
use crate::progress::Progress;
use crate::specs::player_stats::PlayerStats;

const TEAM_URL_PREFIXES: &[&str] = &[
    "https://www.espncricinfo.com/team/",
    "https://www.espncricinfo.com/cricketers/team/",
];

pub const FULL_DATA_KEY: &str = "full_data";

/* ---------- team URLs ---------- */

/// A team page link: one of the two team prefixes followed by a single
/// `<slug>-<id>` segment, nothing after it.
pub fn verify_team_link(url: &str) -> bool {
    let url = url.trim();
    let Some(rest) = TEAM_URL_PREFIXES.iter().find_map(|p| url.strip_prefix(p)) else {
        return false;
    };
    if rest.is_empty() || rest.contains('/') {
        return false;
    }
    split_slug(rest).is_some()
}

/// `…/team/afghanistan-40?x#y` → `afghanistan-40`
pub fn team_slug(url: &str) -> &str {
    let last = url.trim().trim_end_matches('/').rsplit('/').next().unwrap_or("");
    let last = last.split('?').next().unwrap_or(last);
    last.split('#').next().unwrap_or(last)
}

/// Output name for a team: the slug with `-` turned into `_`.
pub fn team_output_name(url: &str) -> String {
    team_slug(url).replace('-', "_")
}

/// `united-arab-emirates-27` → "united arab emirates"
pub fn team_display_name(url: &str) -> Option<String> {
    split_slug(team_slug(url)).map(|(name, _)| name.replace('-', " "))
}

/// `name-part…-<digits>` → (name, id)
fn split_slug(slug: &str) -> Option<(&str, &str)> {
    let (name, id) = slug.rsplit_once('-')?;
    let ok = !name.is_empty() && !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit());
    ok.then_some((name, id))
}

/* ---------- roster files ---------- */

/// Player records from a saved roster. Repeated `objectId`s keep the first
/// record; the page re-sends players as it scrolls.
pub fn load_roster(raw: &str) -> Result<Vec<Value>> {
    let root: Value = serde_json::from_str(raw.trim())
        .map_err(|e| AnalysisError::Roster(e.to_string()))?;
    let records = match root {
        Value::Array(list) => list,
        Value::Object(mut page) => match page.remove("results") {
            Some(Value::Array(list)) => list,
            _ => return Err(AnalysisError::Roster(s!("expected a list of players or a `results` list"))),
        },
        _ => return Err(AnalysisError::Roster(s!("expected a list of players"))),
    };

    let mut seen = HashSet::new();
    let mut roster = Vec::with_capacity(records.len());
    for (i, rec) in records.into_iter().enumerate() {
        if !rec.is_object() {
            return Err(AnalysisError::Roster(format!("entry {i} is not an object")));
        }
        match object_id(&rec) {
            Some(id) if !seen.insert(id.clone()) => logd!("Roster: duplicate player {id} dropped"),
            _ => roster.push(rec),
        }
    }
    logf!("Roster: {} players loaded", roster.len());
    Ok(roster)
}

pub fn object_id(record: &Value) -> Option<String> {
    record.get("objectId").canonical().filter(|id| !id.is_empty())
}

/// Fetch career stats for every record still missing them.
///
/// `checkpoint` sees the whole roster after each player so an interrupted
/// walk loses at most the player in flight. Returns how many players were
/// fetched in this call.
pub fn fill_full_data<F, C>(
    roster: &mut [Value],
    mut fetch: F,
    mut checkpoint: C,
    pause: Duration,
    progress: &mut dyn Progress,
) -> std::result::Result<usize, Box<dyn Error>>
where
    F: FnMut(&str) -> std::result::Result<PlayerStats, Box<dyn Error>>,
    C: FnMut(&[Value]) -> std::result::Result<(), Box<dyn Error>>,
{
    let total = roster.len();
    let mut fetched = 0usize;

    for i in 0..total {
        if roster[i].get(FULL_DATA_KEY).is_some() {
            continue;
        }
        let Some(id) = object_id(&roster[i]) else {
            logd!("Roster: entry {i} has no objectId, skipped");
            continue;
        };
        if fetched > 0 && !pause.is_zero() {
            thread::sleep(pause);
        }

        let stats = fetch(&id)?;
        let value = serde_json::to_value(&stats)
            .map_err(|source| AnalysisError::Serialize { what: "player stats", source })?;
        if let Some(rec) = roster[i].as_object_mut() {
            rec.insert(s!(FULL_DATA_KEY), value);
        }
        fetched += 1;

        checkpoint(&*roster)?;
        progress.item_done(&format!("{} ({}/{total})", stats.player_name, i + 1));
    }
    Ok(fetched)
}
