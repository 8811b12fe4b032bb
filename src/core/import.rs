// DealBook - core/import.rs
//
// Batch import of externally supplied records: shape validation,
// per-record required-field checks, and stable dedup by identifier.
// Malformed input is a typed failure value, never a panic; either the
// whole batch imports or none of it does.

use crate::core::model::{ImportReport, Property};
use crate::util::error::ImportError;
use std::collections::HashSet;

/// Import a batch of records supplied as raw JSON.
///
/// Preconditions: the value must be an array, and every element must have
/// truthy `address` and `city` (JS truthiness: null, false, 0 and "" are
/// falsy — the import surface is JSON produced by the original exporter).
/// Either failure rejects the whole batch.
///
/// On success, records are deduplicated by the literal `id` value keeping
/// the first occurrence in input order. Two records that both lack an id
/// share the null bucket and dedupe against each other. Extra fields pass
/// through into the stored records unchanged.
pub fn import_batch(input: &serde_json::Value) -> Result<ImportReport, ImportError> {
    let items = input.as_array().ok_or(ImportError::NotAnArray)?;

    for (index, item) in items.iter().enumerate() {
        if !is_truthy(item.get("address")) || !is_truthy(item.get("city")) {
            return Err(ImportError::MissingRequiredFields { index });
        }
    }

    let mut seen: HashSet<Option<String>> = HashSet::new();
    let mut properties: Vec<Property> = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let record: Property = serde_json::from_value(item.clone())
            .map_err(|source| ImportError::Record { index, source })?;

        if seen.insert(record.id.clone()) {
            properties.push(record);
        }
    }

    let duplicates_removed = items.len() - properties.len();
    tracing::debug!(
        kept = properties.len(),
        duplicates_removed,
        "Import batch merged"
    );

    Ok(ImportReport {
        properties,
        duplicates_removed,
    })
}

/// JS truthiness over a JSON value. A missing key is falsy.
fn is_truthy(value: Option<&serde_json::Value>) -> bool {
    match value {
        None => false,
        Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::Bool(b)) => *b,
        Some(serde_json::Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(serde_json::Value::String(s)) => !s.is_empty(),
        Some(serde_json::Value::Array(_)) | Some(serde_json::Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_array_input() {
        for input in [json!(null), json!(true), json!(42), json!({"address": "x"})] {
            assert!(matches!(
                import_batch(&input),
                Err(ImportError::NotAnArray)
            ));
        }
    }

    #[test]
    fn rejects_batch_with_missing_required_fields() {
        let input = json!([
            {"id": "1", "address": "1 Oak St", "city": "Erie"},
            {"id": "2", "address": "", "city": "Erie"},
        ]);
        assert!(matches!(
            import_batch(&input),
            Err(ImportError::MissingRequiredFields { index: 1 })
        ));
    }

    #[test]
    fn dedupes_by_id_keeping_first() {
        let input = json!([
            {"id": "1", "address": "1 Oak St", "city": "Erie", "asking": 50000},
            {"id": "1", "address": "1 Oak St updated", "city": "Erie"},
            {"id": "2", "address": "22 Elm St", "city": "Corry"},
        ]);
        let report = import_batch(&input).unwrap();
        assert_eq!(report.properties.len(), 2);
        assert_eq!(report.duplicates_removed, 1);
        // First occurrence retained.
        assert_eq!(report.properties[0].address, "1 Oak St");
        assert_eq!(report.properties[0].asking, Some(50_000));
    }

    #[test]
    fn null_ids_dedupe_against_each_other() {
        // The dedup key is the literal id value, not "has an id".
        let input = json!([
            {"id": null, "address": "1 Oak St", "city": "Erie"},
            {"address": "22 Elm St", "city": "Corry"},
        ]);
        let report = import_batch(&input).unwrap();
        assert_eq!(report.properties.len(), 1);
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(report.properties[0].address, "1 Oak St");
    }

    #[test]
    fn import_is_idempotent_on_its_own_output() {
        let input = json!([
            {"id": "1", "address": "1 Oak St", "city": "Erie"},
            {"id": "1", "address": "1 Oak St", "city": "Erie"},
            {"id": "2", "address": "22 Elm St", "city": "Corry"},
        ]);
        let first = import_batch(&input).unwrap();
        assert_eq!(first.duplicates_removed, 1);

        let again = serde_json::to_value(&first.properties).unwrap();
        let second = import_batch(&again).unwrap();
        assert_eq!(second.duplicates_removed, 0);
        assert_eq!(second.properties.len(), first.properties.len());
    }

    #[test]
    fn extra_fields_survive_import() {
        let input = json!([
            {"id": "1", "address": "1 Oak St", "city": "Erie", "sellerPhone": "555-0100"},
        ]);
        let report = import_batch(&input).unwrap();
        assert_eq!(
            report.properties[0]
                .extra
                .get("sellerPhone")
                .and_then(|v| v.as_str()),
            Some("555-0100")
        );
    }

    #[test]
    fn truthiness_matches_js_semantics() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(is_truthy(Some(&json!("1 Oak St"))));
        assert!(is_truthy(Some(&json!(5))));
        assert!(is_truthy(Some(&json!({}))));
    }
}
