// ── Engine: Trend Helpers ───────────────────────────────────────────────────
// Period-over-period comparisons shared by the granularity, awareness and
// inertia scorers. Every helper is finite for finite inputs.

use crate::atoms::constants::TREND_EPSILON;
use crate::atoms::metric_types::TrendDirection;

/// Relative change in percent. A zero previous value is floored to
/// `TREND_EPSILON` so the result never becomes NaN or infinite.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    let delta = current - previous;
    if delta == 0.0 {
        return 0.0;
    }
    let denom = previous.abs().max(TREND_EPSILON);
    delta / denom * 100.0
}

/// Bucket a change into up/down/stable with a symmetric deadband.
pub fn direction(change: f64, deadband: f64) -> TrendDirection {
    if change > deadband {
        TrendDirection::Up
    } else if change < -deadband {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    }
}

/// Round to two decimals for display fields.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round a 0–100 composite to an integer score.
pub fn to_score(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_change_guards_zero_previous() {
        let pct = percent_change(40.0, 0.0);
        assert!(pct.is_finite(), "pct={pct}");
        assert!(pct > 0.0);
        assert_eq!(percent_change(0.0, 0.0), 0.0);
    }

    #[test]
    fn percent_change_is_relative() {
        assert!((percent_change(55.0, 50.0) - 10.0).abs() < 1e-9);
        assert!((percent_change(45.0, 50.0) + 10.0).abs() < 1e-9);
    }

    #[test]
    fn deadband_is_inclusive() {
        assert_eq!(direction(5.0, 5.0), TrendDirection::Stable);
        assert_eq!(direction(-5.0, 5.0), TrendDirection::Stable);
        assert_eq!(direction(5.1, 5.0), TrendDirection::Up);
        assert_eq!(direction(-5.1, 5.0), TrendDirection::Down);
    }

    #[test]
    fn score_rounding_clamps() {
        assert_eq!(to_score(49.5), 50);
        assert_eq!(to_score(-3.0), 0);
        assert_eq!(to_score(140.0), 100);
    }
}
