// src/core/access.rs
//! Tolerant field access over the loosely-typed match document.
//!
//! Every projector read goes through these helpers. None of them fail:
//! absent keys, `null`, empty strings and the `"-"` placeholder all collapse
//! to a default, and numbers stored as strings are parsed on the way out.

use serde_json::Value;

/// Numeric value of `value`, or `default` when it is absent, null, `""`, `"-"`
/// or not parseable as a number.
pub fn numeric(value: Option<&Value>, default: f64) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
        Some(Value::String(s)) => {
            let t = s.trim();
            if t.is_empty() || t == "-" { return default; }
            t.parse::<f64>().unwrap_or(default)
        }
        Some(Value::Bool(b)) => if *b { 1.0 } else { 0.0 },
        _ => default,
    }
}

/// Integer view of `value` (truncated toward zero), `default` on anything unusable.
pub fn integer(value: Option<&Value>, default: i64) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(default),
        other => {
            let f = numeric(other, f64::NAN);
            if f.is_finite() { f.trunc() as i64 } else { default }
        }
    }
}

/// String view of `value`: strings as-is, numbers/bools in JSON form, else `""`.
pub fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => s!(),
    }
}

/// Like [`text`], but absent/empty values become `fallback`.
pub fn text_or(value: Option<&Value>, fallback: &str) -> String {
    let t = text(value);
    if t.is_empty() { s!(fallback) } else { t }
}

/// Truthiness of a roster flag (`captain`, `keeper`, `live_current`).
pub fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(Value::String(s)) => {
            let t = s.trim();
            !(t.is_empty() || t == "0" || t.eq_ignore_ascii_case("false"))
        }
        _ => false,
    }
}

/// `obj[key]` when `obj` is a mapping and the key is present.
pub fn field<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    obj.as_object().and_then(|m| m.get(key))
}

/// `obj[key]` as a sequence; absent or non-sequence values read as empty.
pub fn items<'a>(obj: &'a Value, key: &str) -> &'a [Value] {
    field(obj, key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// `obj[key]` as a mapping, or a shared `null` so chained lookups keep defaulting.
pub fn section<'a>(obj: &'a Value, key: &str) -> &'a Value {
    static NULL: Value = Value::Null;
    match field(obj, key) {
        Some(v) if v.is_object() => v,
        _ => &NULL,
    }
}

/// Round half away from zero to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
