// src/core/html.rs
//! Just enough HTML for stats pages and browser-saved JSON: tag blocks found
//! by element name, their inner markup and their visible text.
//!
//! Matching is ASCII case-insensitive against a lowered copy of the page;
//! ASCII lowering keeps byte offsets identical, so ranges found in the copy
//! slice the original directly.

use super::sanitize::{decode_text_entities, normalize_ws};

/// `<name …>…</name>` blocks in document order.
///
/// The close is the first `</name>` after the opener, so same-name nesting is
/// not tracked. Stats tables never nest rows or cells.
pub struct TagBlocks<'a> {
    src: &'a str,
    lc: String,
    open: String,
    close: String,
    pos: usize,
}

pub fn tag_blocks<'a>(src: &'a str, name: &str) -> TagBlocks<'a> {
    let name = name.to_ascii_lowercase();
    TagBlocks {
        src,
        lc: src.to_ascii_lowercase(),
        open: join!("<", &name),
        close: join!("</", &name, ">"),
        pos: 0,
    }
}

impl<'a> Iterator for TagBlocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let start = self.lc.get(self.pos..)?.find(&self.open)? + self.pos;
            let name_end = start + self.open.len();
            if !ends_tag_name(self.lc.as_bytes().get(name_end).copied()) {
                // `<a` inside `<abbr`, `<tr` inside `<track`: keep looking.
                self.pos = name_end;
                continue;
            }
            let open_end = self.lc[name_end..].find('>')? + name_end + 1;
            let end = self.lc[open_end..].find(&self.close)? + open_end + self.close.len();
            self.pos = end;
            return Some(&self.src[start..end]);
        }
    }
}

fn ends_tag_name(next: Option<u8>) -> bool {
    match next {
        Some(b) => b.is_ascii_whitespace() || b == b'>' || b == b'/',
        None => true,
    }
}

/// Opening tag of a block, lowercased (`<TD Class="x">…` → `<td class="x"`).
pub fn opening_tag(block: &str) -> String {
    let end = block.find('>').unwrap_or(block.len());
    block[..end].to_ascii_lowercase()
}

/// Markup between a block's opening tag and its closing tag.
pub fn inner_html(block: &str) -> &str {
    match (block.find('>'), block.rfind('<')) {
        (Some(open_end), Some(close_start)) if close_start > open_end => &block[open_end + 1..close_start],
        _ => "",
    }
}

/// Text with every tag removed and whitespace collapsed.
pub fn visible_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    for (i, piece) in markup.split('<').enumerate() {
        let text = if i == 0 {
            piece
        } else {
            piece.split_once('>').map_or("", |(_, after)| after)
        };
        out.push_str(text);
    }
    normalize_ws(&out)
}

/// Pull a JSON payload out of a fetched page.
/// Browsers wrap raw JSON responses in `<pre>`; fall back to the whole `<body>`.
/// Text that already looks like JSON is returned as-is.
pub fn extract_json_payload(doc: &str) -> Option<String> {
    let trimmed = doc.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Some(doc.trim().to_string());
    }
    let block = tag_blocks(doc, "pre")
        .next()
        .or_else(|| tag_blocks(doc, "body").next())?;
    let payload = decode_text_entities(inner_html(block).trim());
    if payload.is_empty() { None } else { Some(payload) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_blocks_case_insensitively() {
        let doc = r#"<TABLE class="engineTable"><TR class="data1"><td>A</td></TR></TABLE>"#;
        let tr = tag_blocks(doc, "tr").next().unwrap();
        assert!(tr.ends_with("</TR>"));
        assert_eq!(opening_tag(tr), r#"<tr class="data1""#);
        assert_eq!(visible_text(inner_html(tr)), "A");
    }

    #[test]
    fn tag_names_must_end_at_a_boundary() {
        let doc = r#"<abbr title="right-hand bat">RHB</abbr> <aside>x</aside>
                     <a href="/ci/engine/player/1.html">one</a><A
                     href="/two">two</A>"#;
        let anchors: Vec<_> = tag_blocks(doc, "a").map(|a| visible_text(inner_html(a))).collect();
        assert_eq!(anchors, vec!["one", "two"]);

        let table = "<table><track src=x></track><tr class=data1><td>1</td></tr></table>";
        let rows: Vec<_> = tag_blocks(table, "tr").collect();
        assert_eq!(rows, vec!["<tr class=data1><td>1</td></tr>"]);
    }

    #[test]
    fn visible_text_drops_nested_markup() {
        assert_eq!(visible_text("  <b>Rohit</b>\n <i>Kumar</i> "), "Rohit Kumar");
        assert_eq!(visible_text("no tags"), "no tags");
        assert_eq!(inner_html("<td>"), "");
    }

    #[test]
    fn json_payload_from_pre_or_body() {
        let pre = r#"<html><body><pre style="x">{"match":{"date":"2024"},"a":"&lt;b&gt;"}</pre></body></html>"#;
        assert_eq!(
            extract_json_payload(pre).unwrap(),
            r#"{"match":{"date":"2024"},"a":"<b>"}"#
        );

        let body = "<html><BODY class=x>\n  {\"live\":{}}\n</BODY></html>";
        assert_eq!(extract_json_payload(body).unwrap(), r#"{"live":{}}"#);

        assert_eq!(extract_json_payload("  {\"team\":[]}\n").unwrap(), r#"{"team":[]}"#);
        assert!(extract_json_payload("<html><p>nothing</p></html>").is_none());
    }
}
