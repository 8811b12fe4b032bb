// DealBook - core/stats.rs
//
// Aggregation over a record collection: stage counts for the sidebar,
// county/type histograms, and the spread calculation. Read-only over the
// input collection.

use crate::core::model::{Property, PropertyType, Stage, StageCounts};

/// Count records per stage bucket, plus the total.
pub fn compute_stats(collection: &[Property]) -> StageCounts {
    let mut counts = StageCounts {
        total: collection.len(),
        ..Default::default()
    };
    for property in collection {
        match property.stage {
            Stage::New => counts.new += 1,
            Stage::ReadyToBlast => counts.ready_to_blast += 1,
            Stage::OnHold => counts.on_hold += 1,
            Stage::TooHigh => counts.too_high += 1,
            Stage::Sold => counts.sold += 1,
        }
    }
    counts
}

/// County histogram, sorted by count descending. Ties keep discovery
/// order (first appearance in the collection); records with a missing or
/// empty county are excluded.
pub fn compute_county_counts(collection: &[Property]) -> Vec<(String, usize)> {
    let mut counts = tally(collection.iter().filter_map(|p| {
        p.county
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }));
    // Stable sort, so equal counts retain discovery order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Type histogram in discovery order. `Unknown` is the absent value and
/// is excluded, mirroring the missing-county exclusion.
pub fn compute_type_counts(collection: &[Property]) -> Vec<(String, usize)> {
    tally(
        collection
            .iter()
            .filter(|p| p.kind != PropertyType::Unknown)
            .map(|p| p.kind.label()),
    )
}

/// Accumulate counts keyed by first appearance order.
fn tally<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(k, _)| k == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value.to_string(), 1)),
        }
    }
    counts
}

/// Estimated investor margin: ARV minus asking minus rehab.
///
/// Returns `None` when ARV or asking is missing OR zero -- the zero case
/// is deliberate compatibility with the original falsy check, where an
/// unpriced deal was stored as 0 as often as null. Rehab defaults to 0.
/// The result may be negative.
pub fn compute_spread(arv: Option<i64>, asking: Option<i64>, rehab: Option<i64>) -> Option<i64> {
    match (arv, asking) {
        (Some(a), Some(k)) if a != 0 && k != 0 => Some(a - k - rehab.unwrap_or(0)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(city: &str, stage: Stage) -> Property {
        Property {
            address: "1 Elm St".into(),
            city: city.into(),
            stage,
            ..Default::default()
        }
    }

    #[test]
    fn stage_counts_cover_all_buckets() {
        let collection = vec![
            record("Erie", Stage::New),
            record("Erie", Stage::New),
            record("Erie", Stage::ReadyToBlast),
            record("Erie", Stage::OnHold),
            record("Erie", Stage::TooHigh),
            record("Erie", Stage::Sold),
        ];
        let counts = compute_stats(&collection);
        assert_eq!(counts.new, 2);
        assert_eq!(counts.ready_to_blast, 1);
        assert_eq!(counts.on_hold, 1);
        assert_eq!(counts.too_high, 1);
        assert_eq!(counts.sold, 1);
        assert_eq!(counts.total, 6);
    }

    #[test]
    fn county_counts_sort_descending_with_stable_ties() {
        let mk = |county: &str| Property {
            address: "1 Elm St".into(),
            city: "x".into(),
            county: Some(county.into()),
            ..Default::default()
        };
        let collection = vec![
            mk("Butler"),
            mk("Venango"),
            mk("Mercer"),
            mk("Venango"),
            Property {
                county: None,
                ..mk("ignored")
            },
            Property {
                county: Some("  ".into()),
                ..mk("ignored")
            },
        ];
        let counts = compute_county_counts(&collection);
        assert_eq!(
            counts,
            vec![
                ("Venango".to_string(), 2),
                // Tie between Butler and Mercer keeps discovery order.
                ("Butler".to_string(), 1),
                ("Mercer".to_string(), 1),
            ]
        );
    }

    #[test]
    fn type_counts_exclude_unknown() {
        let mk = |kind: PropertyType| Property {
            address: "1 Elm St".into(),
            city: "x".into(),
            kind,
            ..Default::default()
        };
        let collection = vec![
            mk(PropertyType::Sfh),
            mk(PropertyType::Unknown),
            mk(PropertyType::Lot),
            mk(PropertyType::Sfh),
        ];
        let counts = compute_type_counts(&collection);
        assert_eq!(
            counts,
            vec![("SFH".to_string(), 2), ("Lot".to_string(), 1)]
        );
    }

    #[test]
    fn spread_requires_truthy_arv_and_asking() {
        // None iff arv or asking is falsy: zero and null both count.
        assert_eq!(compute_spread(None, Some(30_000), None), None);
        assert_eq!(compute_spread(Some(80_000), None, None), None);
        assert_eq!(compute_spread(Some(0), Some(30_000), None), None);
        assert_eq!(compute_spread(Some(80_000), Some(0), None), None);
    }

    #[test]
    fn spread_subtracts_rehab_and_may_go_negative() {
        assert_eq!(
            compute_spread(Some(80_000), Some(29_900), Some(20_000)),
            Some(30_100)
        );
        assert_eq!(compute_spread(Some(80_000), Some(29_900), None), Some(50_100));
        assert_eq!(
            compute_spread(Some(50_000), Some(60_000), Some(10_000)),
            Some(-20_000)
        );
    }
}
