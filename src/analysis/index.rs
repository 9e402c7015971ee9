// src/analysis/index.rs
//! Team and player lookup tables built from the roster section.
//!
//! Ids arrive as strings in the roster and as numbers in the live sections
//! (or the other way round). Both the build and the lookup side go through
//! [`IdKey::canonical`] so `"101"`, `101` and `101.0` all land on the same key.

use std::collections::HashMap;

use serde_json::Value;

use crate::analysis::document::MatchDocument;
use crate::analysis::views::{PlayerView, TeamView};
use crate::config::consts::{PLAYER_PLACEHOLDER_PREFIX, UNKNOWN_TEAM};
use crate::core::access::{field, flag, items, text};

/// Anything usable as a team/player id.
pub trait IdKey {
    /// Canonical string form, `None` when the id is absent or not scalar.
    fn canonical(&self) -> Option<String>;
}

impl IdKey for Value {
    fn canonical(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() { return Some(i.to_string()); }
                if let Some(u) = n.as_u64() { return Some(u.to_string()); }
                let f = n.as_f64()?;
                if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 {
                    Some((f as i64).to_string())
                } else {
                    Some(f.to_string())
                }
            }
            _ => None,
        }
    }
}

impl IdKey for Option<&Value> {
    fn canonical(&self) -> Option<String> {
        self.and_then(|v| v.canonical())
    }
}

impl IdKey for str {
    fn canonical(&self) -> Option<String> { Some(self.trim().to_string()) }
}

impl IdKey for String {
    fn canonical(&self) -> Option<String> { self.as_str().canonical() }
}

macro_rules! int_id_key {
    ($($t:ty),*) => {$(
        impl IdKey for $t {
            fn canonical(&self) -> Option<String> { Some(self.to_string()) }
        }
    )*};
}
int_id_key!(i32, i64, u32, u64);

/// Canonical id string; `""` when absent.
pub fn canonical_id<K: IdKey + ?Sized>(id: &K) -> String {
    id.canonical().unwrap_or_default()
}

/* ---------------- teams ---------------- */

#[derive(Clone, Debug, Default)]
pub struct TeamIndex {
    names: HashMap<String, String>,
}

impl TeamIndex {
    pub fn build(doc: &MatchDocument) -> Self {
        let mut names = HashMap::new();
        for team in doc.teams() {
            let Some(id) = field(team, "team_id").canonical() else { continue };
            let name = text(field(team, "team_name"));
            if names.contains_key(&id) {
                logd!("Team index: duplicate team id {id}; keeping first entry");
                continue;
            }
            names.insert(id, name);
        }
        Self { names }
    }

    pub fn get<K: IdKey + ?Sized>(&self, id: &K) -> Option<&str> {
        let key = id.canonical()?;
        self.names.get(&key).map(String::as_str)
    }

    /// Team name, or `"Unknown"` on a miss.
    pub fn name<K: IdKey + ?Sized>(&self, id: &K) -> String {
        self.get(id).map(str::to_string).unwrap_or_else(|| s!(UNKNOWN_TEAM))
    }

    pub fn len(&self) -> usize { self.names.len() }
    pub fn is_empty(&self) -> bool { self.names.is_empty() }
}

/* ---------------- players ---------------- */

#[derive(Clone, Debug, Default)]
pub struct PlayerIndex {
    names: HashMap<String, String>,
}

impl PlayerIndex {
    pub fn build(doc: &MatchDocument) -> Self {
        let mut names = HashMap::new();
        for team in doc.teams() {
            for player in items(team, "player") {
                let Some(id) = field(player, "player_id").canonical() else { continue };
                // First roster entry wins, same as a front-to-back scan.
                names.entry(id).or_insert_with(|| text(field(player, "known_as")));
            }
        }
        Self { names }
    }

    pub fn get<K: IdKey + ?Sized>(&self, id: &K) -> Option<&str> {
        let key = id.canonical()?;
        self.names.get(&key).map(String::as_str)
    }

    /// Display name, or `Player_<id>` on a miss. Never fails.
    pub fn name<K: IdKey + ?Sized>(&self, id: &K) -> String {
        match self.get(id) {
            Some(name) => name.to_string(),
            None => join!(PLAYER_PLACEHOLDER_PREFIX, &canonical_id(id)),
        }
    }

    pub fn len(&self) -> usize { self.names.len() }
    pub fn is_empty(&self) -> bool { self.names.is_empty() }
}

pub fn build_team_index(doc: &MatchDocument) -> TeamIndex { TeamIndex::build(doc) }
pub fn build_player_index(doc: &MatchDocument) -> PlayerIndex { PlayerIndex::build(doc) }

/// Every team with its full squad, in roster order.
pub fn team_info(doc: &MatchDocument) -> Vec<TeamView> {
    doc.teams()
        .iter()
        .map(|team| {
            let players: Vec<PlayerView> = items(team, "player")
                .iter()
                .map(|p| PlayerView {
                    player_id: canonical_id(&field(p, "player_id")),
                    name: text(field(p, "known_as")),
                    role: text(field(p, "player_primary_role")),
                    batting_style: text(field(p, "batting_style_long")),
                    bowling_style: text(field(p, "bowling_style_long")),
                    captain: flag(field(p, "captain")),
                    keeper: flag(field(p, "keeper")),
                })
                .collect();

            TeamView {
                team_id: canonical_id(&field(team, "team_id")),
                name: text(field(team, "team_name")),
                abbreviation: text(field(team, "team_abbreviation")),
                captain: players.iter().find(|p| p.captain).map(|p| p.name.clone()),
                wicket_keeper: players.iter().find(|p| p.keeper).map(|p| p.name.clone()),
                players,
            }
        })
        .collect()
}
