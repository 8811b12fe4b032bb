// DealBook - core/dedupe.rs
//
// Fuzzy duplicate detection against an existing collection, used before
// inserting a freshly parsed record. Deliberately loose: the paste flow
// often carries slightly different address spellings for the same house.

use crate::core::model::Property;

/// Find the first record that looks like the same property.
///
/// A match requires a case-insensitive city equality and address
/// containment in either direction ("105 Mohawk" vs "105 Mohawk St").
/// Returns `None` when either query field is blank — a blank address
/// would "contain" everything.
pub fn find_duplicate<'a>(
    collection: &'a [Property],
    address: &str,
    city: &str,
) -> Option<&'a Property> {
    let address = address.trim().to_lowercase();
    let city = city.trim().to_lowercase();
    if address.is_empty() || city.is_empty() {
        return None;
    }

    collection.iter().find(|p| {
        if !p.city.trim().eq_ignore_ascii_case(&city) {
            return false;
        }
        let existing = p.address.trim().to_lowercase();
        existing.contains(&address) || address.contains(&existing)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(address: &str, city: &str) -> Property {
        Property {
            address: address.into(),
            city: city.into(),
            ..Default::default()
        }
    }

    #[test]
    fn matches_shorter_address_against_longer() {
        let collection = vec![record("105 Mohawk St", "Bruin")];
        let hit = find_duplicate(&collection, "105 Mohawk", "Bruin");
        assert_eq!(hit.map(|p| p.address.as_str()), Some("105 Mohawk St"));
    }

    #[test]
    fn matches_longer_address_against_shorter() {
        let collection = vec![record("105 Mohawk", "Bruin")];
        assert!(find_duplicate(&collection, "105 Mohawk St", "Bruin").is_some());
    }

    #[test]
    fn city_must_match_case_insensitively() {
        let collection = vec![record("105 Mohawk St", "Bruin")];
        assert!(find_duplicate(&collection, "105 Mohawk St", "BRUIN").is_some());
        assert!(find_duplicate(&collection, "105 Mohawk St", "Erie").is_none());
    }

    #[test]
    fn blank_inputs_never_match() {
        let collection = vec![record("105 Mohawk St", "Bruin")];
        assert!(find_duplicate(&collection, "", "Bruin").is_none());
        assert!(find_duplicate(&collection, "105 Mohawk St", "  ").is_none());
    }

    #[test]
    fn first_match_wins() {
        let collection = vec![
            record("105 Mohawk St", "Bruin"),
            record("105 Mohawk Street", "Bruin"),
        ];
        let hit = find_duplicate(&collection, "105 Mohawk", "Bruin").unwrap();
        assert_eq!(hit.address, "105 Mohawk St");
    }
}
