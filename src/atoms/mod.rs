// ── Sentir Atoms Layer ─────────────────────────────────────────────────────
// Pure data types, configuration and error types: zero side effects, no I/O.
// Dependency rule: atoms may only depend on std and external pure crates.
// Nothing here may import from engine/, analytics.rs or store.rs.

pub mod config;
pub mod constants;
pub mod error;
pub mod metric_types;
pub mod types;
