// src/specs/player_stats.rs
//! Career statistics page (`/ci/engine/player/<id>.html?class=…`).
//!
//! Every `engineTable` on the page is read; rows with class `data1`/`data2`
//! carry the figures. The first cell is the row's heading (e.g. "v Namibia",
//! "2023"), the rest map onto the column set chosen by the `class=` query
//! parameter.

use std::error::Error;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::consts::{PLAYER_STATS_PREFIX, PLAYER_STATS_QUERY};
use crate::core::html::{inner_html, opening_tag, tag_blocks, visible_text};
use crate::core::{net, sanitize::normalize_entities};

const ALL_FORMAT_COLUMNS: &[&str] = &[
    "Heading", "Span", "Mat", "Runs", "HS", "Bat Av", "100",
    "Wkts", "BBI", "Bowl Av", "5", "Ct", "St", "Ave Diff",
];

// ODI pages drop "Span".
const ODI_COLUMNS: &[&str] = &[
    "Heading", "Mat", "Runs", "HS", "Bat Av", "100",
    "Wkts", "BBI", "Bowl Av", "5", "Ct", "St", "Ave Diff",
];

const MIN_ROW_FIELDS: usize = 7;
const FALLBACK_NAME: &str = "player_data";

/// One row of figures: (column, value) pairs in column order, blanks skipped.
pub type StatRow = Vec<(String, String)>;

#[derive(Clone, Debug, PartialEq)]
pub struct StatGroup {
    pub heading: String,
    pub rows: Vec<StatRow>,
}

/// Parsed page. Serializes as `{player_name, player_id, stats: {heading: [row…]}}`
/// with headings and columns in page order.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerStats {
    pub player_name: String,
    pub player_id: Option<String>,
    pub stats: Vec<StatGroup>,
}

impl PlayerStats {
    pub fn group(&self, heading: &str) -> Option<&StatGroup> {
        self.stats.iter().find(|g| g.heading == heading)
    }
}

/// Canonical all-round stats URL for a bare player id; full URLs pass through.
pub fn player_url(id_or_url: &str) -> String {
    let t = id_or_url.trim();
    if t.contains("://") {
        s!(t)
    } else {
        join!(PLAYER_STATS_PREFIX, t, PLAYER_STATS_QUERY)
    }
}

pub fn fetch(id_or_url: &str) -> Result<PlayerStats, Box<dyn Error>> {
    let url = player_url(id_or_url);
    logf!("Player stats: fetching {url}");
    let html_doc = net::http_get(&url)?;
    Ok(parse_doc(&html_doc, &url))
}

/// Parse a stats page already in memory. `url` selects the column set and
/// supplies the player id.
pub fn parse_doc(html_doc: &str, url: &str) -> PlayerStats {
    let mut columns: Vec<String> = columns_for(url).iter().map(|c| s!(*c)).collect();
    let mut stats: Vec<StatGroup> = Vec::new();

    for table in tag_blocks(html_doc, "table") {
        if !opening_tag(table).contains("enginetable") { continue; }

        let rows = data_rows(table);
        let Some(first) = rows.first() else { continue };

        // Wider tables get generic names for the overflow columns.
        let base = columns.len();
        for i in 0..first.len().saturating_sub(base) {
            columns.push(format!("extra_{i}"));
        }

        for cells in rows {
            let mut heading: Option<String> = None;
            let mut row: StatRow = Vec::new();
            for (i, val) in cells.into_iter().enumerate() {
                if val.is_empty() { continue; }
                let Some(col) = columns.get(i) else { continue };
                if i == 0 {
                    heading = Some(val);
                } else {
                    row.push((col.clone(), val));
                }
            }
            let Some(heading) = heading else { continue };

            match stats.iter_mut().find(|g| g.heading == heading) {
                Some(g) => g.rows.push(row),
                None => stats.push(StatGroup { heading, rows: vec![row] }),
            }
        }
    }

    for g in &mut stats {
        g.rows.retain(|r| r.len() >= MIN_ROW_FIELDS);
    }
    stats.retain(|g| !g.rows.is_empty());

    PlayerStats {
        player_name: player_name(html_doc).unwrap_or_else(|| s!(FALLBACK_NAME)),
        player_id: player_id_from_url(url),
        stats,
    }
}

/* ---------- helpers ---------- */

fn columns_for(url: &str) -> &'static [&'static str] {
    match class_id(url).as_deref() {
        Some("3") => ODI_COLUMNS,
        _ => ALL_FORMAT_COLUMNS,
    }
}

fn class_id(url: &str) -> Option<String> {
    let i = url.find("class=")? + "class=".len();
    let digits: String = url[i..].chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() { None } else { Some(digits) }
}

/// `…/player/<digits>.html…` → `<digits>`
fn player_id_from_url(url: &str) -> Option<String> {
    let i = url.find("/player/")? + "/player/".len();
    let rest = &url[i..];
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() || !rest[digits.len()..].starts_with(".html") {
        return None;
    }
    Some(digits)
}

/// Cell texts of every `data1`/`data2` row in a table.
fn data_rows(table: &str) -> Vec<Vec<String>> {
    tag_blocks(table, "tr")
        .filter(|tr| {
            let open = opening_tag(tr);
            open.contains("data1") || open.contains("data2")
        })
        .map(|tr| {
            tag_blocks(tr, "td")
                .map(|td| visible_text(&normalize_entities(inner_html(td))))
                .collect()
        })
        .collect()
}

/// Name from the first player-page anchor. Its text reads like
/// "Players / Nepal / Rohit Kumar Paudel"; the first two words of the third
/// segment are kept.
fn player_name(html_doc: &str) -> Option<String> {
    let anchor = tag_blocks(html_doc, "a").find(|a| is_player_href(&opening_tag(a)))?;
    let text = normalize_entities(&visible_text(inner_html(anchor)));
    let segment = text.split('/').nth(2)?;
    let words: Vec<&str> = segment.split_whitespace().collect();
    match words.as_slice() {
        [first, second, ..] => Some(format!("{first} {second}")),
        _ => None,
    }
}

fn is_player_href(open_lc: &str) -> bool {
    let Some(i) = open_lc.find("/ci/engine/player/") else { return false };
    let rest = &open_lc[i + "/ci/engine/player/".len()..];
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && rest[digits..].starts_with(".html")
}

/* ---------- output ---------- */

struct Row<'a>(&'a StatRow);

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct Groups<'a>(&'a [StatGroup]);

impl Serialize for Groups<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for g in self.0 {
            let rows: Vec<Row<'_>> = g.rows.iter().map(Row).collect();
            map.serialize_entry(&g.heading, &rows)?;
        }
        map.end()
    }
}

impl Serialize for PlayerStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("player_name", &self.player_name)?;
        map.serialize_entry("player_id", &self.player_id)?;
        map.serialize_entry("stats", &Groups(&self.stats))?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str =
        "https://stats.espncricinfo.com/ci/engine/player/1122886.html?class=11;template=results;type=allround";

    fn row(cells: &[&str]) -> String {
        let tds: String = cells.iter().map(|c| format!("<td class=\"left\">{c}</td>")).collect();
        format!("<tr class=\"data1\">{tds}</tr>")
    }

    fn page(rows: &[String]) -> String {
        format!(
            "<html><body>\
             <a href=\"/ci/engine/player/1122886.html\">Players / Nepal / Rohit Kumar Paudel</a>\
             <table class=\"engineTable\"><tr class=\"head\"><th>x</th></tr>{}</table>\
             <table class=\"other\"><tr class=\"data1\"><td>ignored</td></tr></table>\
             </body></html>",
            rows.concat()
        )
    }

    #[test]
    fn groups_rows_by_heading() {
        let html = page(&[
            row(&["v Namibia", "2019-2024", "8", "201", "64", "28.71", "0", "3", "2/11", "20.33", "0", "4", "0", "8.38"]),
            row(&["v Oman", "2021-2024", "5", "88", "40", "17.60", "0", "", "", "", "", "1", "0", ""]),
            row(&["v Namibia", "2024", "1", "12", "12", "12.00", "0", "0", "-", "-", "0", "0", "0", "-"]),
            row(&["v UAE", "2022", "1", "", "", "", "", "", "", "", "", "", "", ""]),
        ]);
        let stats = parse_doc(&html, URL);

        assert_eq!(stats.player_name, "Rohit Kumar");
        assert_eq!(stats.player_id.as_deref(), Some("1122886"));

        let headings: Vec<_> = stats.stats.iter().map(|g| g.heading.as_str()).collect();
        assert_eq!(headings, vec!["v Namibia", "v Oman"]);

        let nam = stats.group("v Namibia").unwrap();
        assert_eq!(nam.rows.len(), 2);
        assert_eq!(nam.rows[0][0], (s!("Span"), s!("2019-2024")));
        assert_eq!(nam.rows[0].len(), 13);
        assert!(stats.group("v UAE").is_none());
    }

    #[test]
    fn odi_pages_have_no_span_column() {
        let url = "https://stats.espncricinfo.com/ci/engine/player/1122886.html?class=3;template=results";
        let html = page(&[row(&["overall", "30", "812", "95", "29.00", "0", "4", "2/20", "40.1", "0", "9", "0", "-11.1"])]);
        let stats = parse_doc(&html, url);
        let first = &stats.group("overall").unwrap().rows[0];
        assert_eq!(first[0], (s!("Mat"), s!("30")));
        assert_eq!(first.last().map(|(k, _)| k.as_str()), Some("Ave Diff"));
    }

    #[test]
    fn wide_tables_get_extra_columns() {
        let mut cells = vec!["2024", "2024", "3", "50", "30*", "25.00", "0", "1", "1/9", "30.0", "0", "2", "0", "-5.0"];
        cells.extend(["x1", "x2"]);
        let stats = parse_doc(&page(&[row(&cells)]), URL);
        let r = &stats.group("2024").unwrap().rows[0];
        assert_eq!(r[r.len() - 2], (s!("extra_0"), s!("x1")));
        assert_eq!(r[r.len() - 1], (s!("extra_1"), s!("x2")));
    }

    #[test]
    fn name_skips_tags_that_only_start_like_anchors() {
        let html = format!(
            "<html><body><abbr title=\"bats\">RHB</abbr> <article>bio</article>\
             <a href=\"/ci/engine/player/1122886.html\">Players / Nepal / Rohit Kumar Paudel</a>\
             <table class=\"engineTable\"><track kind=\"x\"></track>{}</table></body></html>",
            row(&["v Oman", "2021", "5", "88", "40", "17.60", "0", "1", "1/5", "9.0", "0", "1", "0", "1.0"])
        );
        let stats = parse_doc(&html, URL);
        assert_eq!(stats.player_name, "Rohit Kumar");
        assert_eq!(stats.group("v Oman").unwrap().rows[0][0], (s!("Span"), s!("2021")));
    }

    #[test]
    fn missing_anchor_falls_back_to_default_name() {
        let stats = parse_doc("<html></html>", "file.html");
        assert_eq!(stats.player_name, "player_data");
        assert_eq!(stats.player_id, None);
        assert!(stats.stats.is_empty());
    }

    #[test]
    fn serializes_in_page_order() {
        let html = page(&[
            row(&["v Oman", "2021", "5", "88", "40", "17.60", "0", "1", "1/5", "9.0", "0", "1", "0", "1.0"]),
            row(&["v Namibia", "2019", "8", "201", "64", "28.71", "0", "3", "2/11", "20.33", "0", "4", "0", "8.38"]),
        ]);
        let json = serde_json::to_string(&parse_doc(&html, URL)).unwrap();
        assert!(json.starts_with(r#"{"player_name":"Rohit Kumar","player_id":"1122886","stats":{"v Oman":[{"Span":"2021","#));
        assert!(json.find("v Oman").unwrap() < json.find("v Namibia").unwrap());
    }

    #[test]
    fn bare_ids_expand_to_stats_url() {
        assert_eq!(player_url(" 1122886 "), join!(PLAYER_STATS_PREFIX, "1122886", PLAYER_STATS_QUERY));
        assert_eq!(player_url(URL), URL);
    }
}
