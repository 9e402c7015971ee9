// src/specs/mod.rs
//! # Page "specs"
//!
//! Page-specific scraping specifications. Each spec covers one kind of page
//! and encodes *where the data lives in the HTML* and *how to pull it out
//! robustly*.
//!
//! ## What lives here
//! - **Pure HTML parsing** of fetched pages, via the tolerant `core::html`
//!   helpers (case-insensitive tag blocks, tag stripping, entity/whitespace
//!   normalization) plus small hand-rolled scans where they hold up better.
//! - **Column choice**: which header set applies to which page variant.
//! - **Light shaping** into small result structs that serialize straight to
//!   the output JSON.
//!
//! ## What does **not** live here
//! - Match-JSON analysis (`analysis`), output writing (`file`), or choosing
//!   what to fetch (`runner`).
//!
//! ## Conventions
//! - Specs are testable **offline** against saved HTML; `parse_doc` never
//!   touches the network, `fetch` is a thin wrapper around it.
//! - Keep selectors resilient to whitespace, attribute order and case.
//!
//! ## Current specs
//! - `player_stats` – career figures from `/ci/engine/player/<id>.html`.
//! - `team_roster` – team page links and saved roster lists, filled player by
//!   player from `player_stats`.
pub mod player_stats;
pub mod team_roster;
