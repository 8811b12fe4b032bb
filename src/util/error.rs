// DealBook - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors preserve the causal
// chain for diagnostic logging. Data-shape problems in the core are
// values, not panics: the parser returns a best-effort record, the
// validator returns a message list, and the importer returns these
// typed failures.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all DealBook operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum DealBookError {
    /// Batch import was rejected.
    Import(ImportError),

    /// Export operation failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// JSON (de)serialisation failed outside the import path.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for DealBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Import(e) => write!(f, "Import error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Json { path, source } => {
                write!(f, "JSON error in '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DealBookError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Import(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Import errors
// ---------------------------------------------------------------------------

/// Rejection reasons for a batch import. The batch is all-or-nothing;
/// any of these means no records were stored.
#[derive(Debug)]
pub enum ImportError {
    /// The supplied JSON is not an array (object, number, bool, null).
    NotAnArray,

    /// A record is missing a truthy address or city.
    MissingRequiredFields { index: usize },

    /// A record failed to deserialise into the property shape.
    Record {
        index: usize,
        source: serde_json::Error,
    },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnArray => write!(f, "Import data must be an array of records"),
            Self::MissingRequiredFields { index } => write!(
                f,
                "Every record must have an address and a city (record {index} does not)"
            ),
            Self::Record { index, source } => {
                write!(f, "Record {index} is malformed: {source}")
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Record { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ImportError> for DealBookError {
    fn from(e: ImportError) -> Self {
        Self::Import(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to writing an export to disk. Serialisation itself is
/// infallible; only the surrounding I/O can fail.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for DealBookError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for DealBook results.
pub type Result<T> = std::result::Result<T, DealBookError>;
