// DealBook - core/query.rs
//
// Filter and sort engine over a record collection. All active filters are
// AND-combined; the result is a new, sorted vector and the input is never
// mutated (the collection is referenced concurrently by a rendering
// layer). Null/empty sort keys always land last regardless of direction.

use crate::core::model::{Property, PropertyType, Stage};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

// =============================================================================
// Options
// =============================================================================

/// Stage bucket selector: a named stage, or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageFilter {
    #[default]
    All,
    Stage(Stage),
}

impl StageFilter {
    /// Parse a filter key: "all" or a stage label.
    pub fn from_key(key: &str) -> Option<StageFilter> {
        if key.trim().eq_ignore_ascii_case("all") {
            return Some(StageFilter::All);
        }
        Stage::from_label(key).map(StageFilter::Stage)
    }
}

/// Field the result set is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Address,
    City,
    County,
    Type,
    Beds,
    Baths,
    Asking,
    Arv,
    Stage,
    #[default]
    DateAdded,
}

impl SortField {
    /// Parse a sort key as it appears in the options object.
    pub fn from_key(key: &str) -> Option<SortField> {
        match key.trim() {
            "address" => Some(SortField::Address),
            "city" => Some(SortField::City),
            "county" => Some(SortField::County),
            "type" => Some(SortField::Type),
            "beds" => Some(SortField::Beds),
            "baths" => Some(SortField::Baths),
            "asking" => Some(SortField::Asking),
            "arv" => Some(SortField::Arv),
            "stage" => Some(SortField::Stage),
            "dateAdded" => Some(SortField::DateAdded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn from_key(key: &str) -> Option<SortDirection> {
        match key.trim() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Complete query state, the only configuration surface of the engine.
///
/// Defaults: all stages, no county/type filter, empty search, newest
/// first by date added.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Stage bucket to match; `All` always passes.
    pub current_filter: StageFilter,

    /// Exact county to match. `None` = no filter.
    pub county_filter: Option<String>,

    /// Exact property type to match. `None` = no filter.
    pub type_filter: Option<PropertyType>,

    /// Case-insensitive substring search over address, city, county and
    /// notes. Empty = no filter.
    pub search_term: String,

    /// Sort key.
    pub sort_field: SortField,

    /// Sort direction. Null/empty keys sort last either way.
    pub sort_direction: SortDirection,
}

// =============================================================================
// Filtering
// =============================================================================

/// Produce a filtered, sorted view of the collection.
///
/// Non-mutating: the input slice is read only and the result is a fresh
/// vector. The sort is stable, so equal keys retain their relative input
/// order.
pub fn get_filtered(collection: &[Property], options: &QueryOptions) -> Vec<Property> {
    let search_lower = options.search_term.to_lowercase();

    let mut result: Vec<Property> = collection
        .iter()
        .filter(|p| matches_all(p, options, &search_lower))
        .cloned()
        .collect();

    result.sort_by(|a, b| compare(a, b, options.sort_field, options.sort_direction));
    result
}

/// Check a single record against every active filter.
fn matches_all(property: &Property, options: &QueryOptions, search_lower: &str) -> bool {
    // Stage bucket
    if let StageFilter::Stage(stage) = options.current_filter {
        if property.stage != stage {
            return false;
        }
    }

    // County equality (the value comes from the county histogram, so it is
    // always a stored spelling)
    if let Some(ref county) = options.county_filter {
        if property.county.as_deref() != Some(county.as_str()) {
            return false;
        }
    }

    // Type equality
    if let Some(kind) = options.type_filter {
        if property.kind != kind {
            return false;
        }
    }

    // Text search (case-insensitive substring over four fields)
    if !search_lower.is_empty() {
        let hit = property.address.to_lowercase().contains(search_lower)
            || property.city.to_lowercase().contains(search_lower)
            || property
                .county
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(search_lower))
            || property
                .notes
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(search_lower));
        if !hit {
            return false;
        }
    }

    true
}

// =============================================================================
// Sorting
// =============================================================================

/// Extracted sort key. Within one sort pass every key is the same variant,
/// so cross-variant comparison never happens.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    /// Lowercased for case-insensitive ordering.
    Text(String),
    Num(f64),
    Date(DateTime<Utc>),
}

/// Extract the sort key for a record, `None` when the field is null or
/// empty so the record is pushed to the end.
fn sort_key(property: &Property, field: SortField) -> Option<SortKey> {
    fn text(s: &str) -> Option<SortKey> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(SortKey::Text(trimmed.to_lowercase()))
        }
    }

    match field {
        SortField::Address => text(&property.address),
        SortField::City => text(&property.city),
        SortField::County => property.county.as_deref().and_then(text),
        SortField::Type => text(property.kind.label()),
        SortField::Beds => property.beds.map(SortKey::Num),
        SortField::Baths => property.baths.map(SortKey::Num),
        SortField::Asking => property.asking.map(|v| SortKey::Num(v as f64)),
        SortField::Arv => property.arv.map(|v| SortKey::Num(v as f64)),
        SortField::Stage => text(property.stage.label()),
        SortField::DateAdded => property.date_added.map(SortKey::Date),
    }
}

/// Comparator with the null-ordering rule baked in: missing keys compare
/// greater than present ones in both directions, so they always land last.
fn compare(a: &Property, b: &Property, field: SortField, direction: SortDirection) -> Ordering {
    match (sort_key(a, field), sort_key(b, field)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(ka), Some(kb)) => {
            let natural = match (ka, kb) {
                (SortKey::Text(x), SortKey::Text(y)) => x.cmp(&y),
                (SortKey::Num(x), SortKey::Num(y)) => {
                    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
                }
                (SortKey::Date(x), SortKey::Date(y)) => x.cmp(&y),
                // Mixed variants cannot occur for a single field.
                _ => Ordering::Equal,
            };
            match direction {
                SortDirection::Asc => natural,
                SortDirection::Desc => natural.reverse(),
            }
        }
    }
}
