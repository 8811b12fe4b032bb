// DealBook - core/validate.rs
//
// Field-level constraint checks for candidate records. All checks run and
// all violations are returned; nothing short-circuits and nothing panics.
// An empty list means the record is accepted. The exact wording matters:
// UIs display the first message verbatim.

use crate::core::model::Property;
use crate::util::constants;
use regex::Regex;
use std::sync::OnceLock;

/// Validate a candidate record, returning every violation found.
///
/// Numeric bounds apply only when the field is present; `None` means
/// "unknown", not zero, and is never a violation.
pub fn validate(property: &Property) -> Vec<String> {
    let mut violations = Vec::new();

    if property.address.trim().is_empty() {
        violations.push("Address is required".to_string());
    }
    if property.city.trim().is_empty() {
        violations.push("City is required".to_string());
    }

    check_range_f64(&mut violations, "Beds", property.beds, constants::MAX_BEDS);
    check_range_f64(&mut violations, "Baths", property.baths, constants::MAX_BATHS);
    check_range_i64(&mut violations, "Sqft", property.sqft, constants::MAX_SQFT);
    check_range_i64(&mut violations, "Asking", property.asking, constants::MAX_PRICE);
    check_range_i64(&mut violations, "ARV", property.arv, constants::MAX_PRICE);
    check_range_i64(&mut violations, "Rehab", property.rehab, constants::MAX_PRICE);

    check_url(&mut violations, "Pictures", property.pictures.as_deref());
    check_url(&mut violations, "Contract link", property.contract_link.as_deref());
    check_url(
        &mut violations,
        "Investor sheet link",
        property.investor_sheet_link.as_deref(),
    );

    if let Some(zip) = property.zip.as_deref() {
        if !zip.is_empty() && !zip_pattern().is_match(zip) {
            violations.push("Zip must be 5 digits with an optional 4-digit extension".to_string());
        }
    }

    violations
}

fn check_range_f64(violations: &mut Vec<String>, field: &str, value: Option<f64>, max: f64) {
    if let Some(v) = value {
        if !(0.0..=max).contains(&v) {
            violations.push(format!("{field} must be between 0 and {max:.0}"));
        }
    }
}

fn check_range_i64(violations: &mut Vec<String>, field: &str, value: Option<i64>, max: i64) {
    if let Some(v) = value {
        if !(0..=max).contains(&v) {
            violations.push(format!("{field} must be between 0 and {max}"));
        }
    }
}

/// Link fields must be absolute URLs with a scheme; a plain string like
/// "dropbox folder" is a violation. Empty strings pass (same as absent).
fn check_url(violations: &mut Vec<String>, field: &str, value: Option<&str>) {
    if let Some(v) = value {
        if !v.is_empty() && url::Url::parse(v).is_err() {
            violations.push(format!("{field} must be a valid URL"));
        }
    }
}

fn zip_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("zip_pattern: invalid regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> Property {
        Property {
            address: "105 Mohawk St".into(),
            city: "Bruin".into(),
            ..Default::default()
        }
    }

    #[test]
    fn minimal_record_passes() {
        assert!(validate(&valid_record()).is_empty());
    }

    #[test]
    fn missing_required_fields_accumulate() {
        let p = Property {
            address: "   ".into(),
            city: String::new(),
            ..Default::default()
        };
        let violations = validate(&p);
        assert_eq!(
            violations,
            vec!["Address is required".to_string(), "City is required".to_string()]
        );
    }

    #[test]
    fn beds_boundaries() {
        for (beds, ok) in [(0.0, true), (50.0, true), (-1.0, false), (51.0, false)] {
            let p = Property {
                beds: Some(beds),
                ..valid_record()
            };
            let violations = validate(&p);
            if ok {
                assert!(violations.is_empty(), "beds={beds} should pass");
            } else {
                assert_eq!(violations, vec!["Beds must be between 0 and 50".to_string()]);
            }
        }
    }

    #[test]
    fn price_bounds() {
        let p = Property {
            asking: Some(100_000_001),
            arv: Some(-5),
            ..valid_record()
        };
        let violations = validate(&p);
        assert!(violations.contains(&"Asking must be between 0 and 100000000".to_string()));
        assert!(violations.contains(&"ARV must be between 0 and 100000000".to_string()));
    }

    #[test]
    fn sqft_bounds() {
        let p = Property {
            sqft: Some(1_000_001),
            ..valid_record()
        };
        assert_eq!(
            validate(&p),
            vec!["Sqft must be between 0 and 1000000".to_string()]
        );
    }

    #[test]
    fn link_fields_need_a_scheme() {
        let p = Property {
            pictures: Some("dropbox folder".into()),
            contract_link: Some("https://example.com/contract.pdf".into()),
            investor_sheet_link: Some("example.com/sheet".into()),
            ..valid_record()
        };
        let violations = validate(&p);
        assert_eq!(
            violations,
            vec![
                "Pictures must be a valid URL".to_string(),
                "Investor sheet link must be a valid URL".to_string(),
            ]
        );
    }

    #[test]
    fn empty_link_is_not_a_violation() {
        let p = Property {
            pictures: Some(String::new()),
            ..valid_record()
        };
        assert!(validate(&p).is_empty());
    }

    #[test]
    fn zip_formats() {
        for (zip, ok) in [
            ("16022", true),
            ("16022-1234", true),
            ("", true),
            ("1602", false),
            ("16022-12", false),
            ("ABCDE", false),
        ] {
            let p = Property {
                zip: Some(zip.into()),
                ..valid_record()
            };
            assert_eq!(validate(&p).is_empty(), ok, "zip={zip:?}");
        }
    }

    #[test]
    fn null_numeric_fields_are_not_violations() {
        // None means unknown, not zero.
        assert!(validate(&valid_record()).is_empty());
    }
}
