// DealBook - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Property (the canonical stored record)
// =============================================================================

/// A single property deal record.
///
/// This is the core data unit that flows through validation, import,
/// querying, aggregation, and export. The wire shape is camelCase JSON;
/// unrecognised keys round-trip unchanged through `extra` so a newer
/// exporter's records can be imported without loss.
///
/// `None` on any optional field means "unknown", never zero. `address` and
/// `city` are required for a record to be storable; everything else is
/// best-effort.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Property {
    /// Opaque unique identifier. Uniqueness is enforced only at import
    /// time; `None` and a missing key are the same dedup bucket.
    pub id: Option<String>,

    /// Street address. Required, non-empty after trimming.
    pub address: String,

    /// City name. Required, non-empty after trimming.
    pub city: String,

    /// 5-digit ZIP with optional `-4digit` extension.
    pub zip: Option<String>,

    /// County name, without the word "county".
    pub county: Option<String>,

    /// Property type.
    #[serde(rename = "type")]
    pub kind: PropertyType,

    /// Bedroom count. Kept as f64 so out-of-range import values reach the
    /// validator instead of failing deserialisation.
    pub beds: Option<f64>,

    /// Bathroom count; may be fractional in 0.5 steps.
    pub baths: Option<f64>,

    /// Interior square footage.
    pub sqft: Option<i64>,

    /// Asking price in whole dollars.
    pub asking: Option<i64>,

    /// After-repair value in whole dollars.
    pub arv: Option<i64>,

    /// Estimated rehab cost in whole dollars.
    pub rehab: Option<i64>,

    /// Pipeline stage.
    pub stage: Stage,

    /// Access instructions (lockbox code, contact, etc.).
    pub access: Option<String>,

    /// Link to a photo album.
    pub pictures: Option<String>,

    /// Link to the purchase contract.
    pub contract_link: Option<String>,

    /// Link to the investor one-pager.
    pub investor_sheet_link: Option<String>,

    /// Free-text notes, one source line per `\n`-separated entry.
    pub notes: Option<String>,

    /// Latitude from geocoding.
    pub lat: Option<f64>,

    /// Longitude from geocoding.
    pub lng: Option<f64>,

    /// Confidence level of the coordinate lookup.
    pub geo_precision: GeoPrecision,

    /// When the record was first stored.
    pub date_added: Option<DateTime<Utc>>,

    /// When the record was last modified.
    pub last_updated: Option<DateTime<Utc>>,

    /// Unrecognised wire fields, passed through unchanged.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Property {
    /// Build a storable record from a parsed deal block.
    ///
    /// Assigns a fresh UUID, stage `New`, type `Unknown`, and both
    /// timestamps from `now`. An empty notes buffer becomes `None`.
    /// The `ParsedDeal` is consumed; it has no life after this point.
    pub fn from_parsed(deal: ParsedDeal, now: DateTime<Utc>) -> Self {
        Self {
            id: Some(uuid::Uuid::new_v4().to_string()),
            address: deal.address,
            city: deal.city,
            zip: deal.zip,
            county: deal.county,
            kind: PropertyType::Unknown,
            beds: deal.beds,
            baths: deal.baths,
            sqft: deal.sqft,
            asking: deal.asking,
            arv: deal.arv,
            rehab: deal.rehab,
            stage: Stage::New,
            access: deal.access,
            pictures: deal.pictures,
            contract_link: deal.contract_link,
            investor_sheet_link: deal.investor_sheet_link,
            notes: if deal.notes.is_empty() {
                None
            } else {
                Some(deal.notes)
            },
            lat: None,
            lng: None,
            geo_precision: GeoPrecision::None,
            date_added: Some(now),
            last_updated: Some(now),
            extra: serde_json::Map::new(),
        }
    }
}

// =============================================================================
// Stage
// =============================================================================

/// Pipeline status of a deal, ordered by workflow progression.
///
/// Unrecognised wire strings deserialise to `New`, so an import from a
/// newer schema never fails on a stage this binary does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum Stage {
    #[default]
    #[serde(rename = "New")]
    New,
    #[serde(rename = "Ready to Blast")]
    ReadyToBlast,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "Too High")]
    TooHigh,
    #[serde(rename = "Sold")]
    Sold,
}

impl Stage {
    /// Returns the five stages in pipeline order.
    pub fn all() -> &'static [Stage] {
        &[
            Stage::New,
            Stage::ReadyToBlast,
            Stage::OnHold,
            Stage::TooHigh,
            Stage::Sold,
        ]
    }

    /// Human-readable label, identical to the wire string.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::New => "New",
            Stage::ReadyToBlast => "Ready to Blast",
            Stage::OnHold => "On Hold",
            Stage::TooHigh => "Too High",
            Stage::Sold => "Sold",
        }
    }

    /// Parse a stage from its label. Case-insensitive.
    pub fn from_label(s: &str) -> Option<Stage> {
        Stage::all()
            .iter()
            .copied()
            .find(|stage| stage.label().eq_ignore_ascii_case(s.trim()))
    }
}

impl<'de> Deserialize<'de> for Stage {
    fn deserialize<D>(deserializer: D) -> Result<Stage, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Stage::from_label(&s).unwrap_or_default())
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Property type
// =============================================================================

/// Broad property classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum PropertyType {
    #[serde(rename = "SFH")]
    Sfh,
    #[serde(rename = "MFH")]
    Mfh,
    #[serde(rename = "Lot")]
    Lot,
    /// Absent or unrecognised type. Plays the "empty" role in histograms.
    #[default]
    Unknown,
}

impl PropertyType {
    /// Human-readable label, identical to the wire string.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Sfh => "SFH",
            PropertyType::Mfh => "MFH",
            PropertyType::Lot => "Lot",
            PropertyType::Unknown => "Unknown",
        }
    }

    /// Parse a type from its label. Case-insensitive.
    pub fn from_label(s: &str) -> Option<PropertyType> {
        [PropertyType::Sfh, PropertyType::Mfh, PropertyType::Lot]
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s.trim()))
    }
}

impl<'de> Deserialize<'de> for PropertyType {
    fn deserialize<D>(deserializer: D) -> Result<PropertyType, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(PropertyType::from_label(&s).unwrap_or_default())
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Geocoding precision
// =============================================================================

/// Confidence level of a coordinate lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeoPrecision {
    /// Full address matched.
    Exact,
    /// Only the city matched.
    Approx,
    /// No lookup, or lookup failed.
    #[default]
    None,
}

impl GeoPrecision {
    pub fn label(&self) -> &'static str {
        match self {
            GeoPrecision::Exact => "exact",
            GeoPrecision::Approx => "approx",
            GeoPrecision::None => "none",
        }
    }
}

// =============================================================================
// Parsed deal (intermediate output of the block parser)
// =============================================================================

/// Best-effort extraction from one pasted text block.
///
/// Same shape as `Property` minus id, stage, type, timestamps and
/// coordinates. Every field may be empty or null; the block parser never
/// fails. Created per block, consumed immediately by
/// `Property::from_parsed`, then discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDeal {
    pub address: String,
    pub city: String,
    pub zip: Option<String>,
    pub county: Option<String>,
    pub beds: Option<f64>,
    pub baths: Option<f64>,
    pub sqft: Option<i64>,
    pub asking: Option<i64>,
    pub arv: Option<i64>,
    pub rehab: Option<i64>,
    pub access: Option<String>,
    pub pictures: Option<String>,
    pub contract_link: Option<String>,
    pub investor_sheet_link: Option<String>,
    /// Unmatched lines in original order, joined with `\n`.
    pub notes: String,
}

// =============================================================================
// Import report
// =============================================================================

/// Outcome of a successful batch import.
#[derive(Debug, Clone)]
pub struct ImportReport {
    /// Deduplicated records in first-occurrence order.
    pub properties: Vec<Property>,

    /// Input length minus kept length.
    pub duplicates_removed: usize,
}

// =============================================================================
// Stage counts
// =============================================================================

/// Per-stage record counts for the stats sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageCounts {
    pub new: usize,
    pub ready_to_blast: usize,
    pub on_hold: usize,
    pub too_high: usize,
    pub sold: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_labels_round_trip() {
        for stage in Stage::all() {
            assert_eq!(Stage::from_label(stage.label()), Some(*stage));
        }
        assert_eq!(
            Stage::from_label("ready to blast"),
            Some(Stage::ReadyToBlast)
        );
        assert_eq!(Stage::from_label("nope"), None);
    }

    #[test]
    fn unknown_stage_string_behaves_as_new() {
        let p: Property =
            serde_json::from_str(r#"{"address":"1 Elm","city":"Erie","stage":"Archived"}"#)
                .unwrap();
        assert_eq!(p.stage, Stage::New);
        assert_eq!(p.stage.label(), "New");
    }

    #[test]
    fn extra_fields_round_trip() {
        let json = r#"{"address":"1 Elm St","city":"Erie","sellerPhone":"555-0100"}"#;
        let p: Property = serde_json::from_str(json).unwrap();
        assert_eq!(
            p.extra.get("sellerPhone").and_then(|v| v.as_str()),
            Some("555-0100")
        );

        let out = serde_json::to_value(&p).unwrap();
        assert_eq!(out["sellerPhone"], "555-0100");
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let p = Property {
            address: "1 Elm St".into(),
            city: "Erie".into(),
            contract_link: Some("https://example.com/c".into()),
            ..Default::default()
        };
        let out = serde_json::to_value(&p).unwrap();
        assert!(out.get("contractLink").is_some());
        assert!(out.get("geoPrecision").is_some());
        assert_eq!(out["type"], "Unknown");
    }

    #[test]
    fn from_parsed_fills_defaults() {
        let deal = ParsedDeal {
            address: "105 Mohawk St".into(),
            city: "Bruin".into(),
            notes: String::new(),
            ..Default::default()
        };
        let now = Utc::now();
        let p = Property::from_parsed(deal, now);
        assert!(p.id.is_some());
        assert_eq!(p.stage, Stage::New);
        assert_eq!(p.kind, PropertyType::Unknown);
        assert_eq!(p.geo_precision, GeoPrecision::None);
        assert_eq!(p.date_added, Some(now));
        assert_eq!(p.last_updated, Some(now));
        assert_eq!(p.notes, None);
    }
}
