// ── Sentir Atoms: Metrics Configuration ────────────────────────────────────
//
// Every product-tunable threshold and weight used by the engine, grouped per
// component. Defaults reproduce the shipped behaviour; a TOML file may
// override any subset (missing keys fall back to the defaults).

use super::constants::WEIGHT_SUM_TOLERANCE;
use super::error::{MetricsError, MetricsResult};
use serde::{Deserialize, Serialize};

/// Root configuration object passed into every scorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub state: StateConfig,
    pub deam: DeamConfig,
    pub granularity: GranularityConfig,
    pub awareness: AwarenessConfig,
    pub inertia: InertiaConfig,
}

// ── State classifier ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// Entries required before a state is classified.
    pub min_entries: usize,
    /// Tv: valence threshold for quadrant classification.
    pub valence_threshold: f64,
    /// Ta: arousal threshold for quadrant classification.
    pub arousal_threshold: f64,
    /// Confidence assumed when an entry does not carry one.
    pub default_confidence: f64,
    /// Weight floor: w = w_time × (floor + (1 − floor) × confidence).
    pub confidence_floor: f64,
    /// Recency half-life (days) for windows up to 7 days.
    pub tau_week_days: f64,
    /// Recency half-life (days) for windows up to 14 days.
    pub tau_fortnight_days: f64,
    /// Recency half-life (days) for longer windows.
    pub tau_month_days: f64,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            min_entries: 3,
            valence_threshold: 0.15,
            arousal_threshold: 0.15,
            default_confidence: 0.7,
            confidence_floor: 0.7,
            tau_week_days: 3.0,
            tau_fortnight_days: 6.0,
            tau_month_days: 10.0,
        }
    }
}

impl StateConfig {
    /// Half-life for a window of `days` days.
    pub fn tau_for_days(&self, days: u32) -> f64 {
        match days {
            0..=7 => self.tau_week_days,
            8..=14 => self.tau_fortnight_days,
            _ => self.tau_month_days,
        }
    }
}

// ── DEAM EQ ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeamConfig {
    /// Entries required before the composite is reported.
    pub min_entries: usize,
    /// α: granularity weight.
    pub weight_granularity: f64,
    /// β: perception weight.
    pub weight_perception: f64,
    /// γ: context-consciousness weight.
    pub weight_context: f64,
    /// δ: adaptability weight.
    pub weight_adaptability: f64,
    /// Maximum share of the score inertia can remove.
    pub inertia_penalty: f64,
    /// Cap on the distinct-label denominator of G.
    pub max_known_emotions: f64,
    /// Fraction of entries expected to carry a distinct label.
    pub unique_ratio: f64,
    pub expected_entries_per_day: f64,
    /// Multiplier applied to the mean intensity reduction before clamping.
    pub adaptability_scale: f64,
    /// Neutral prior for A and Ie when there is no evidence.
    pub neutral_prior: f64,
    /// Consecutive negative entries closer than this count toward Ie.
    pub inertia_gap_hours: f64,
}

impl Default for DeamConfig {
    fn default() -> Self {
        Self {
            min_entries: 4,
            weight_granularity: 0.2,
            weight_perception: 0.15,
            weight_context: 0.25,
            weight_adaptability: 0.4,
            inertia_penalty: 0.5,
            max_known_emotions: 25.0,
            unique_ratio: 0.7,
            expected_entries_per_day: 2.0,
            adaptability_scale: 2.0,
            neutral_prior: 0.5,
            inertia_gap_hours: 24.0,
        }
    }
}

// ── Granularity ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GranularityConfig {
    pub label_weight: f64,
    pub family_weight: f64,
    /// Top-label share above which the repetition penalty starts.
    pub repetition_knee: f64,
    /// Maximum fraction of G_raw removed by the repetition penalty.
    pub repetition_strength: f64,
    /// ±percent band treated as a stable trend.
    pub trend_deadband_pct: f64,
    pub top_n: usize,
}

impl Default for GranularityConfig {
    fn default() -> Self {
        Self {
            label_weight: 0.6,
            family_weight: 0.4,
            repetition_knee: 0.35,
            repetition_strength: 0.35,
            trend_deadband_pct: 5.0,
            top_n: 5,
        }
    }
}

// ── Emotional awareness ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwarenessConfig {
    pub weight_contextual: f64,
    pub weight_bodily: f64,
    pub weight_temporal: f64,
    pub weight_meta: f64,
    pub weight_elaborative: f64,
    /// ±points band treated as a stable trend.
    pub trend_deadband_points: f64,
    /// Subgroup mean difference needed to emit an insight.
    pub insight_threshold: f64,
}

impl Default for AwarenessConfig {
    fn default() -> Self {
        Self {
            weight_contextual: 0.25,
            weight_bodily: 0.20,
            weight_temporal: 0.20,
            weight_meta: 0.25,
            weight_elaborative: 0.10,
            trend_deadband_points: 5.0,
            insight_threshold: 10.0,
        }
    }
}

// ── Inertia ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InertiaConfig {
    /// Entries required before recovery is searched.
    pub min_entries: usize,
    /// Red/blue entries at or above this intensity are peaks.
    pub peak_threshold: u8,
    /// An entry recovers once its intensity is within this margin above baseline.
    pub recovery_margin: f64,
    /// Search horizon; unrecovered peaks count as this many hours.
    pub max_recovery_hours: f64,
    /// Most recent entries averaged into the baseline.
    pub baseline_window: usize,
    /// Crossing inertia: valence below this starts a negative episode.
    pub crossing_negative_valence: f64,
    /// Crossing inertia: valence above this ends it.
    pub crossing_positive_valence: f64,
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self {
            min_entries: 2,
            peak_threshold: 7,
            recovery_margin: 2.0,
            max_recovery_hours: 72.0,
            baseline_window: 30,
            crossing_negative_valence: -0.3,
            crossing_positive_valence: 0.3,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Loading & validation
// ═══════════════════════════════════════════════════════════════════════════

impl MetricsConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(raw: &str) -> MetricsResult<Self> {
        let config: MetricsConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> MetricsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject weight sets that do not sum to 1 and non-positive thresholds.
    pub fn validate(&self) -> MetricsResult<()> {
        let d = &self.deam;
        check_weights(
            "deam",
            &[
                d.weight_granularity,
                d.weight_perception,
                d.weight_context,
                d.weight_adaptability,
            ],
        )?;
        let a = &self.awareness;
        check_weights(
            "awareness",
            &[
                a.weight_contextual,
                a.weight_bodily,
                a.weight_temporal,
                a.weight_meta,
                a.weight_elaborative,
            ],
        )?;
        let g = &self.granularity;
        check_weights("granularity", &[g.label_weight, g.family_weight])?;

        check_unit("deam.inertia_penalty", d.inertia_penalty)?;
        check_unit("deam.neutral_prior", d.neutral_prior)?;
        check_unit("granularity.repetition_knee", g.repetition_knee)?;
        check_unit("granularity.repetition_strength", g.repetition_strength)?;
        check_unit("state.default_confidence", self.state.default_confidence)?;
        check_unit("state.confidence_floor", self.state.confidence_floor)?;

        let s = &self.state;
        check_positive("state.valence_threshold", s.valence_threshold)?;
        check_positive("state.arousal_threshold", s.arousal_threshold)?;
        check_positive("state.tau_week_days", s.tau_week_days)?;
        check_positive("state.tau_fortnight_days", s.tau_fortnight_days)?;
        check_positive("state.tau_month_days", s.tau_month_days)?;
        check_positive("deam.max_known_emotions", d.max_known_emotions)?;
        check_positive("deam.expected_entries_per_day", d.expected_entries_per_day)?;
        check_positive("deam.inertia_gap_hours", d.inertia_gap_hours)?;
        check_positive("inertia.max_recovery_hours", self.inertia.max_recovery_hours)?;

        if g.repetition_knee >= 1.0 {
            return Err(MetricsError::Config(
                "granularity.repetition_knee must be below 1".into(),
            ));
        }
        if self.inertia.baseline_window == 0 {
            return Err(MetricsError::Config(
                "inertia.baseline_window must be at least 1".into(),
            ));
        }
        if self.inertia.crossing_negative_valence >= self.inertia.crossing_positive_valence {
            return Err(MetricsError::Config(
                "inertia crossing thresholds must satisfy negative < positive".into(),
            ));
        }
        Ok(())
    }
}

fn check_weights(section: &str, weights: &[f64]) -> MetricsResult<()> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(MetricsError::Config(format!(
            "{section}: weights must be finite and non-negative"
        )));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(MetricsError::Config(format!(
            "{section}: weights sum to {sum:.4}, expected 1.0"
        )));
    }
    Ok(())
}

fn check_unit(name: &str, value: f64) -> MetricsResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(MetricsError::Config(format!(
            "{name} must be within [0, 1], got {value}"
        )));
    }
    Ok(())
}

fn check_positive(name: &str, value: f64) -> MetricsResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(MetricsError::Config(format!(
            "{name} must be positive, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        MetricsConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_toml_overrides_fall_back_to_defaults() {
        let cfg = MetricsConfig::from_toml_str(
            r#"
            [inertia]
            peak_threshold = 8

            [granularity]
            top_n = 3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.inertia.peak_threshold, 8);
        assert_eq!(cfg.granularity.top_n, 3);
        assert_eq!(cfg.inertia.max_recovery_hours, 72.0);
        assert_eq!(cfg.deam, DeamConfig::default());
    }

    #[test]
    fn unbalanced_weights_are_rejected() {
        let err = MetricsConfig::from_toml_str(
            r#"
            [deam]
            weight_adaptability = 0.5
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, MetricsError::Config(_)), "err={err}");
    }

    #[test]
    fn toml_round_trip_preserves_defaults() {
        let cfg = MetricsConfig::default();
        let rendered = cfg.to_toml_string().unwrap();
        assert!(rendered.contains("[deam]"));
        assert_eq!(MetricsConfig::from_toml_str(&rendered).unwrap(), cfg);
    }

    #[test]
    fn tau_follows_window_length() {
        let s = StateConfig::default();
        assert_eq!(s.tau_for_days(7), 3.0);
        assert_eq!(s.tau_for_days(14), 6.0);
        assert_eq!(s.tau_for_days(30), 10.0);
        assert_eq!(s.tau_for_days(10), 6.0);
    }
}
