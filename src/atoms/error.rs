// ── Sentir Atoms: Error Types ──────────────────────────────────────────────
// Single canonical error enum for the crate, built with `thiserror`.
//
// Design rules:
//   • Only caller contract violations and I/O-facing failures are errors.
//     Sparse data (too few entries, unknown labels, degenerate distributions)
//     is a modeled outcome returned normally, never a `MetricsError`.
//   • The `#[from]` attribute wires std/external error conversions automatically.
//   • `MetricsError` → `String` conversion is provided via `Display` so that
//     command-style boundaries (`Result<T, String>`) stay boilerplate-free.

use thiserror::Error;

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum MetricsError {
    /// An entry violates the caller contract (checked at the window boundary).
    #[error("Invalid entry #{index}: {reason}")]
    Validation { index: usize, reason: String },

    /// Metrics configuration is inconsistent (weights, thresholds…).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Entry repository failure.
    #[error("Store error: {0}")]
    Store(String),

    /// Entry id not present in the repository.
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Filesystem or OS-level I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML configuration could not be parsed.
    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML configuration could not be rendered.
    #[error("Config render error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Catch-all for errors that do not yet have a dedicated variant.
    #[error("{0}")]
    Other(String),
}

// ── Convenience constructors ───────────────────────────────────────────────

impl MetricsError {
    /// Create a validation error for the entry at `index`.
    pub fn validation(index: usize, reason: impl Into<String>) -> Self {
        Self::Validation {
            index,
            reason: reason.into(),
        }
    }

    /// True for caller-contract violations.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<String> for MetricsError {
    fn from(s: String) -> Self {
        MetricsError::Other(s)
    }
}

impl From<&str> for MetricsError {
    fn from(s: &str) -> Self {
        MetricsError::Other(s.to_string())
    }
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// Fallible operations in this crate return this type.
pub type MetricsResult<T> = Result<T, MetricsError>;

// ── Conversion: MetricsError → String ─────────────────────────────────────

impl From<MetricsError> for String {
    fn from(e: MetricsError) -> Self {
        e.to_string()
    }
}
