// ── Sentir Atoms: Constants ────────────────────────────────────────────────
// Fixed strings and limits that are not product-tunable.
// Tunable thresholds and weights live in `atoms::config::MetricsConfig`.

// ── Inertia display strings ────────────────────────────────────────────
pub const NO_DATA_LABEL: &str = "Sin datos";
pub const NO_PEAKS_LABEL: &str = "Sin picos";

// ── Insufficient-data messages ─────────────────────────────────────────
pub const STATE_NOT_ENOUGH_DATA: &str =
    "Registra al menos {required} emociones en este periodo para ver tu estado emocional";

// ── Numeric guards ─────────────────────────────────────────────────────
/// Floor used as the denominator of percentage trends when the previous value is 0.
pub const TREND_EPSILON: f64 = 1e-6;

/// Tolerance when checking that a weight set sums to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

// ── Scales ─────────────────────────────────────────────────────────────
/// Upper bound of the canonical intensity scale.
pub const INTENSITY_MAX: u8 = 10;

/// Upper bound of the percent intensity scale accepted at the boundary.
pub const INTENSITY_PERCENT_MAX: u8 = 100;

pub const SECS_PER_HOUR: f64 = 3600.0;
pub const SECS_PER_DAY: f64 = 86_400.0;
