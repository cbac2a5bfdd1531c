// Sentir: emotional metrics from self-reported check-ins.
//
// Layers:
//   atoms/     pure types, configuration, constants, errors
//   engine/    scorers over validated entry windows
//   store      repository seam + in-memory/JSON implementation
//   analytics  period slicing and the combined panel payload

pub mod analytics;
pub mod atoms;
pub mod engine;
pub mod store;

pub use analytics::{build_payload, panel_from_history, AnalyticsService};
pub use atoms::config::MetricsConfig;
pub use atoms::error::{MetricsError, MetricsResult};
pub use atoms::metric_types::*;
pub use atoms::types::*;
pub use engine::{
    axes_of, classify_emotional_state, compute_deam_score, compute_emotional_awareness,
    compute_granularity, compute_inertia, compute_intervention_effects, crossing_inertia_hours,
    DescriptionSelector, EntryWindow, FirstDescription, RotatingDescription,
};
pub use store::{EntryRepository, InMemoryEntryStore};
