// DealBook - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "DealBook";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "DealBook";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Parsing
// =============================================================================

/// State token the strict address pattern anchors on. The source data is
/// single-state; out-of-state lines fall through to the loose form or to
/// notes.
pub const STATE_TOKEN: &str = "PA";

/// Lines at most this many characters long are dropped rather than
/// appended to the notes buffer (stray "ok", "n/a" fragments).
pub const MIN_NOTE_LINE_CHARS: usize = 3;

// =============================================================================
// Validation bounds
// =============================================================================

/// Maximum bedroom count a record may carry.
pub const MAX_BEDS: f64 = 50.0;

/// Maximum bathroom count a record may carry.
pub const MAX_BATHS: f64 = 50.0;

/// Maximum interior square footage.
pub const MAX_SQFT: i64 = 1_000_000;

/// Maximum dollar amount for asking, ARV and rehab.
pub const MAX_PRICE: i64 = 100_000_000;

// =============================================================================
// Export
// =============================================================================

/// Fixed 23-column CSV header, in the exact order rows are written.
pub const CSV_HEADER: &str = "address,city,zip,county,type,beds,baths,sqft,asking,arv,rehab,\
                              access,stage,notes,pictures,contractLink,investorSheetLink,\
                              lat,lng,geoPrecision,dateAdded,daysSinceAdded,lastUpdated";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
