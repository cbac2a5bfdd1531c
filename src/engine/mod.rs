// ── Sentir Engine: Emotional Metrics ────────────────────────────────────────
//
// Pure scorers over validated check-in windows.
//
// Flow:
//   raw entries → EntryWindow (validate, resolve axes/quadrant, sort) → scorers
//
// Sub-modules:
//   - axes: label → (valence, arousal) table, 100 labels across 4 families
//   - window: the validation boundary plus period slicing and distribution
//   - state: weighted affect summary and state category
//   - deam: five-submetric DEAM EQ composite with inertia penalty
//   - granularity: entropy-based label differentiation score
//   - awareness: five-dimension self-awareness score with insights
//   - inertia: peak recovery time and negative→positive crossing time
//   - interventions: per-technique intensity reduction
//   - trend: percent change, deadbands and rounding shared by the above

pub mod awareness;
pub mod axes;
pub mod deam;
pub mod granularity;
pub mod inertia;
pub mod interventions;
pub mod state;
pub mod trend;
pub mod window;

// Re-exports for convenience
pub use awareness::{compute_emotional_awareness, entry_breakdown, generate_insights};
pub use axes::{axes_of, family_of, is_known, known_labels};
pub use deam::{compute_deam_score, deam_composite, deam_submetrics};
pub use granularity::{compute_granularity, granularity_snapshot, normalized_entropy};
pub use inertia::{compute_inertia, crossing_inertia_hours, format_recovery_time, recovery_summary};
pub use interventions::compute_intervention_effects;
pub use state::{
    classify_emotional_state, quadrant_for, DescriptionSelector, FirstDescription,
    RotatingDescription,
};
pub use window::{
    quadrant_distribution, rescale_intensity, split_periods, validate_entry, EntryWindow,
    ResolvedEntry,
};
