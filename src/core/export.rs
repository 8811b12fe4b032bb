// DealBook - core/export.rs
//
// CSV serialisation of a record collection for spreadsheet tools. The
// format is write-only: this system never re-imports its own CSV.
//
// The quoting policy is fixed per column, not content-driven: address,
// access and notes (the free-text columns) are always wrapped in double
// quotes, with embedded quotes doubled in notes; every other column is
// emitted bare even when empty. Downstream sheets are built against
// exactly this shape.

use crate::core::model::Property;
use crate::util::constants;
use chrono::{DateTime, Utc};

/// Serialise the collection to CSV: fixed 23-column header plus one row
/// per record. An empty collection yields the header only.
///
/// `now` is the export instant, used for the `daysSinceAdded` column;
/// passing it in keeps the function pure and testable.
pub fn export_csv(collection: &[Property], now: DateTime<Utc>) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(collection.len() + 1);
    lines.push(constants::CSV_HEADER.to_string());

    for property in collection {
        lines.push(row(property, now));
    }

    lines.join("\n")
}

fn row(p: &Property, now: DateTime<Utc>) -> String {
    let cells: [String; 23] = [
        quoted(&p.address),
        p.city.clone(),
        opt_str(p.zip.as_deref()),
        opt_str(p.county.as_deref()),
        p.kind.label().to_string(),
        opt_f64(p.beds),
        opt_f64(p.baths),
        opt_i64(p.sqft),
        price_cell(p.asking),
        price_cell(p.arv),
        price_cell(p.rehab),
        quoted(p.access.as_deref().unwrap_or("")),
        p.stage.label().to_string(),
        quoted_doubling(p.notes.as_deref().unwrap_or("")),
        opt_str(p.pictures.as_deref()),
        opt_str(p.contract_link.as_deref()),
        opt_str(p.investor_sheet_link.as_deref()),
        opt_f64(p.lat),
        opt_f64(p.lng),
        p.geo_precision.label().to_string(),
        opt_date(p.date_added),
        days_since(p.date_added, now),
        opt_date(p.last_updated),
    ];
    cells.join(",")
}

/// Always-quoted free-text cell, content written verbatim.
fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}

/// Always-quoted cell with embedded double quotes doubled (notes only).
fn quoted_doubling(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn opt_str(value: Option<&str>) -> String {
    value.unwrap_or("").to_string()
}

fn opt_i64(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Whole numbers print without a decimal point ("2", not "2.0").
fn opt_f64(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v}"),
        None => String::new(),
    }
}

/// Price columns preserve the original falsy check: a 0 exports as an
/// empty cell, the same as absent. See DESIGN.md for the rationale.
fn price_cell(value: Option<i64>) -> String {
    match value {
        Some(v) if v != 0 => v.to_string(),
        _ => String::new(),
    }
}

fn opt_date(value: Option<DateTime<Utc>>) -> String {
    value.map(|d| d.to_rfc3339()).unwrap_or_default()
}

/// Absolute whole-day difference from the export instant; empty when the
/// record has no dateAdded.
fn days_since(date_added: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    date_added
        .map(|d| (now - d).num_days().abs().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{GeoPrecision, PropertyType, Stage};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_collection_is_header_only() {
        let out = export_csv(&[], now());
        assert_eq!(out, constants::CSV_HEADER);
        assert_eq!(out.matches(',').count(), 22); // 23 columns
    }

    #[test]
    fn full_record_row() {
        let added = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        let p = Property {
            id: Some("abc".into()),
            address: "105 Mohawk St".into(),
            city: "Bruin".into(),
            zip: Some("16022".into()),
            county: Some("Butler".into()),
            kind: PropertyType::Sfh,
            beds: Some(2.0),
            baths: Some(1.5),
            sqft: Some(1400),
            asking: Some(29_900),
            arv: Some(80_000),
            rehab: Some(20_000),
            stage: Stage::ReadyToBlast,
            access: Some("3333 front door".into()),
            pictures: Some("https://www.dropbox.com/x".into()),
            notes: Some("Gas heat, central air".into()),
            lat: Some(41.05),
            lng: Some(-79.73),
            geo_precision: GeoPrecision::Exact,
            date_added: Some(added),
            last_updated: Some(added),
            ..Default::default()
        };
        let out = export_csv(&[p], now());
        let row = out.lines().nth(1).unwrap();

        assert!(row.starts_with("\"105 Mohawk St\",Bruin,16022,Butler,SFH,2,1.5,1400,29900,80000,20000,\"3333 front door\",Ready to Blast,\"Gas heat, central air\","));
        assert!(row.contains("https://www.dropbox.com/x"));
        assert!(row.contains("41.05,-79.73,exact,"));
        assert!(row.contains(",10,")); // daysSinceAdded
    }

    #[test]
    fn free_text_columns_always_quoted_others_bare() {
        let p = Property {
            address: "1 Elm St".into(),
            city: "Erie".into(),
            ..Default::default()
        };
        let out = export_csv(&[p], now());
        let row = out.lines().nth(1).unwrap();
        // address quoted, empty access and notes still quoted, the rest bare.
        assert!(row.starts_with("\"1 Elm St\",Erie,,,Unknown,,,,,,,\"\",New,\"\","));
    }

    #[test]
    fn quotes_in_notes_are_doubled() {
        let p = Property {
            address: "1 Elm St".into(),
            city: "Erie".into(),
            notes: Some(r#"seller says "as-is""#.into()),
            ..Default::default()
        };
        let out = export_csv(&[p], now());
        assert!(out.contains(r#""seller says ""as-is""""#));
    }

    #[test]
    fn zero_prices_export_as_empty_cells() {
        let p = Property {
            address: "1 Elm St".into(),
            city: "Erie".into(),
            asking: Some(0),
            arv: Some(0),
            rehab: Some(0),
            beds: Some(0.0),
            ..Default::default()
        };
        let out = export_csv(&[p], now());
        let row = out.lines().nth(1).unwrap();
        let cells: Vec<&str> = row.split(',').collect();
        // beds (index 5) keeps its zero; the price columns (8-10) go blank.
        assert_eq!(cells[5], "0");
        assert_eq!(cells[8], "");
        assert_eq!(cells[9], "");
        assert_eq!(cells[10], "");
    }

    #[test]
    fn missing_date_added_leaves_days_empty() {
        let p = Property {
            address: "1 Elm St".into(),
            city: "Erie".into(),
            ..Default::default()
        };
        let out = export_csv(&[p], now());
        let row = out.lines().nth(1).unwrap();
        let cells: Vec<&str> = row.split(',').collect();
        assert_eq!(cells[20], ""); // dateAdded
        assert_eq!(cells[21], ""); // daysSinceAdded
    }
}
