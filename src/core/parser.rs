// DealBook - core/parser.rs
//
// Heuristic line-oriented parsing of pasted deal text into ParsedDeal
// records. One block of newline-separated text describes one property;
// blocks are separated by blank lines.
//
// The precedence chain is an explicit ordered table of tagged matchers
// evaluated until the first success per line, so each rule can be reasoned
// about (and tested) in isolation. The parser never fails: an unparseable
// block simply yields an empty ParsedDeal.

use crate::core::fields;
use crate::core::model::ParsedDeal;
use crate::util::constants;
use regex::Regex;
use std::sync::OnceLock;

/// Split pasted text into deal blocks separated by blank-line runs.
///
/// Blocks that are entirely whitespace are dropped.
pub fn split_blocks(text: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let splitter = RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("split_blocks: invalid regex"));

    splitter
        .split(text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

/// A single parse rule: tag for trace logging, matcher that consumes the
/// line (returning true) or passes it to the next rule (returning false).
type Matcher = fn(&str, &mut ParsedDeal) -> bool;

/// The precedence chain of heuristics. First match wins per
/// line; the ordering is load-bearing (ARV before asking, address only
/// while unset) and must not be reshuffled.
const RULES: &[(&str, Matcher)] = &[
    ("address", rule_address),
    ("county", rule_county),
    ("beds-baths", rule_beds_baths),
    ("arv", rule_arv),
    ("asking", rule_asking),
    ("access", rule_access),
    ("pictures", rule_pictures),
];

/// Parse one deal block into a best-effort `ParsedDeal`.
///
/// Lines are trimmed; blank lines inside the block are ignored. Lines no
/// rule claims fall through to the notes buffer when longer than
/// `MIN_NOTE_LINE_CHARS` characters, preserving original order.
pub fn parse_block(text: &str) -> ParsedDeal {
    let mut deal = ParsedDeal::default();
    let mut notes: Vec<&str> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let mut consumed = false;
        for (tag, matcher) in RULES {
            if matcher(line, &mut deal) {
                tracing::trace!(rule = tag, line, "Line matched");
                consumed = true;
                break;
            }
        }

        if !consumed && line.len() > constants::MIN_NOTE_LINE_CHARS {
            notes.push(line);
        }
    }

    deal.notes = notes.join("\n");
    deal
}

// =============================================================================
// Rules, in precedence order
// =============================================================================

/// Address/city/zip line. Only fires while the address is still unset.
///
/// Strict form first: `<digits-leading address>, <city>, PA <5-digit zip>`
/// with the zip optional. Falls back to a looser `<digits-leading
/// address>, <city-words>` form that rejects county lines. `PA` is the
/// hard-coded single-state assumption of the source data. Multi-unit
/// ("177-179 Pine St") and directional ("1317 W. 3rd St") addresses pass:
/// the address run is anything digits-leading up to the first comma.
fn rule_address(line: &str, deal: &mut ParsedDeal) -> bool {
    if !deal.address.is_empty() {
        return false;
    }

    static STRICT: OnceLock<Regex> = OnceLock::new();
    let strict = STRICT.get_or_init(|| {
        Regex::new(&format!(
            r"^(\d[^,]*),\s*([^,]+?),\s*{}\b\s*(\d{{5}})?\s*$",
            constants::STATE_TOKEN
        ))
        .expect("rule_address: invalid strict regex")
    });

    if let Some(caps) = strict.captures(line) {
        deal.address = caps[1].trim().to_string();
        deal.city = caps[2].trim().to_string();
        deal.zip = caps.get(3).map(|m| m.as_str().to_string());
        return true;
    }

    static LOOSE: OnceLock<Regex> = OnceLock::new();
    let loose = LOOSE.get_or_init(|| {
        Regex::new(r"^(\d[^,]*),\s*([A-Za-z][A-Za-z .'-]*)$")
            .expect("rule_address: invalid loose regex")
    });

    if line.to_lowercase().contains("county") {
        return false;
    }
    if let Some(caps) = loose.captures(line) {
        deal.address = caps[1].trim().to_string();
        deal.city = caps[2].trim().to_string();
        return true;
    }

    false
}

/// County line: any line containing the word "county".
fn rule_county(line: &str, deal: &mut ParsedDeal) -> bool {
    match fields::county_name(line) {
        Some(name) => {
            deal.county = Some(name);
            true
        }
        None => false,
    }
}

/// Beds/baths line. Both patterns may bind from the same line
/// ("2 bed 2 bath"); either alone is enough to consume it.
fn rule_beds_baths(line: &str, deal: &mut ParsedDeal) -> bool {
    let beds = fields::bed_count(line);
    let baths = fields::bath_count(line);
    if beds.is_none() && baths.is_none() {
        return false;
    }
    if let Some(b) = beds {
        deal.beds = Some(f64::from(b));
    }
    if let Some(b) = baths {
        deal.baths = Some(b);
    }
    true
}

/// ARV/worth line. Checked before generic price matching so an ARV line is
/// never misattributed as the asking price. Requires a K-suffixed number:
/// "ARV $275,000" has none and falls through to notes.
fn rule_arv(line: &str, deal: &mut ParsedDeal) -> bool {
    let lower = line.to_lowercase();
    if !lower.contains("arv") && !lower.contains("worth") {
        return false;
    }
    match fields::price_in_k(line) {
        Some(amount) => {
            deal.arv = Some(amount);
            true
        }
        None => false,
    }
}

/// Asking-price line: contains "asking" or is a bare `$?<n>k` line, and
/// carries a K-suffixed number. A line already claimed by the ARV rule
/// never reaches here.
fn rule_asking(line: &str, deal: &mut ParsedDeal) -> bool {
    static BARE_K: OnceLock<Regex> = OnceLock::new();
    let bare = BARE_K.get_or_init(|| {
        Regex::new(r"(?i)^\$?\d+(?:\.\d+)?k$").expect("rule_asking: invalid regex")
    });

    if !line.to_lowercase().contains("asking") && !bare.is_match(line) {
        return false;
    }
    match fields::price_in_k(line) {
        Some(amount) => {
            deal.asking = Some(amount);
            true
        }
        None => false,
    }
}

/// Access line: lockbox codes, door instructions, showing contacts.
fn rule_access(line: &str, deal: &mut ParsedDeal) -> bool {
    match fields::access_text(line) {
        Some(text) => {
            deal.access = Some(text);
            true
        }
        None => false,
    }
}

/// Picture link line: photo-hosting keywords or any URL. The first URL
/// token becomes the pictures link; a keyword line with no URL is still
/// consumed so it does not pollute the notes.
fn rule_pictures(line: &str, deal: &mut ParsedDeal) -> bool {
    const KEYWORDS: &[&str] = &["dropbox", "photos", "pics"];
    let lower = line.to_lowercase();
    let url = fields::first_url(line);
    if !KEYWORDS.iter().any(|k| lower.contains(k)) && url.is_none() {
        return false;
    }
    if let Some(u) = url {
        deal.pictures = Some(u.to_string());
    }
    true
}
