// ── Sentir Atoms: Metric Result Types ──────────────────────────────────────
//
// Read-only results produced by the engine scorers and assembled into the
// analytics payload. Pure data types (no logic, no I/O).
//
// Follows the project pattern: structs in atoms/, impls in engine/.

use super::types::{Period, Quadrant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 1: Shared
// ═══════════════════════════════════════════════════════════════════════════

/// Direction of a period-over-period change after deadband bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

/// A label with its frequency in a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionCount {
    pub emotion: String,
    pub count: usize,
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 2: Emotional state
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateCategory {
    Calm,
    LowMood,
    Energetic,
    Tense,
}

impl StateCategory {
    /// The entry family sharing this category's sign combination.
    pub fn quadrant(&self) -> Quadrant {
        match self {
            StateCategory::Calm => Quadrant::Green,
            StateCategory::Energetic => Quadrant::Yellow,
            StateCategory::Tense => Quadrant::Red,
            StateCategory::LowMood => Quadrant::Blue,
        }
    }

    pub fn from_quadrant(quadrant: Quadrant) -> Self {
        match quadrant {
            Quadrant::Green => StateCategory::Calm,
            Quadrant::Yellow => StateCategory::Energetic,
            Quadrant::Red => StateCategory::Tense,
            Quadrant::Blue => StateCategory::LowMood,
        }
    }
}

/// A classified emotional state for a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalState {
    pub category: StateCategory,
    pub label: String,
    pub description: String,
    pub valence_mean: f64,
    pub arousal_mean: f64,
    pub stability: f64,
    pub entry_count: usize,
    pub period_label: String,
    pub has_enough_data: bool,
}

/// Result of state classification: either a state or an explicit shortfall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EmotionalStateOutcome {
    Classified(EmotionalState),
    InsufficientData {
        entry_count: usize,
        required: usize,
        message: String,
        period_label: String,
    },
}

impl EmotionalStateOutcome {
    pub fn has_enough_data(&self) -> bool {
        matches!(self, EmotionalStateOutcome::Classified(_))
    }

    pub fn state(&self) -> Option<&EmotionalState> {
        match self {
            EmotionalStateOutcome::Classified(s) => Some(s),
            EmotionalStateOutcome::InsufficientData { .. } => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 3: DEAM EQ
// ═══════════════════════════════════════════════════════════════════════════

/// The five normalized DEAM inputs, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeamSubmetrics {
    /// G: distinct labels relative to what the window could hold.
    pub granularity: f64,
    /// P: logging frequency relative to the expected rate.
    pub perception: f64,
    /// C: share of entries with context or notes.
    pub context: f64,
    /// A: intensity reduction after interventions.
    pub adaptability: f64,
    /// Ie: persistence of negative states (multiplicative penalty).
    pub inertia: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeamScore {
    /// 0–100.
    pub score: u32,
    pub previous_score: u32,
    /// Absolute point difference, current − previous.
    pub delta: i32,
    pub submetrics: DeamSubmetrics,
    pub previous_submetrics: DeamSubmetrics,
    pub entry_count: usize,
    pub has_enough_data: bool,
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 4: Granularity
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GranularityResult {
    /// Display score, 0–100.
    pub score: u32,
    /// G_norm in [0, 1].
    pub normalized: f64,
    /// Normalized entropy over labels.
    pub label_entropy: f64,
    /// Normalized entropy over the four families.
    pub family_entropy: f64,
    pub repetition_penalty: f64,
    pub distinct_emotions: usize,
    pub entry_count: usize,
    pub previous_score: u32,
    /// Relative change vs. the previous period, in percent.
    pub trend_percent: f64,
    pub trend: TrendDirection,
    pub top_emotions: Vec<EmotionCount>,
    pub new_emotions: Vec<EmotionCount>,
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 5: Emotional awareness
// ═══════════════════════════════════════════════════════════════════════════

/// The five awareness subscores, each 0–100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AwarenessBreakdown {
    pub contextual: f64,
    pub bodily: f64,
    pub temporal: f64,
    pub meta: f64,
    pub elaborative: f64,
}

/// A qualitative observation derived from comparing two entry subgroups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwarenessInsight {
    pub id: String,
    pub message: String,
    /// Mean difference (with − without) that triggered the insight.
    pub difference: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwarenessResult {
    /// Composite ceScore, 0–100.
    pub score: u32,
    pub averages: AwarenessBreakdown,
    pub previous_score: u32,
    pub delta: i32,
    pub trend: TrendDirection,
    pub insights: Vec<AwarenessInsight>,
    pub entry_count: usize,
    pub has_data: bool,
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 6: Inertia
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InertiaTrend {
    pub previous_avg_hours: f64,
    /// current − previous, in hours.
    pub difference_hours: f64,
    pub percent_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InertiaResult {
    pub avg_recovery_time_hours: f64,
    /// "45 min", "5,0 h", "Sin datos"…
    pub formatted: String,
    pub peak_count: usize,
    pub recovered_peaks: usize,
    pub recovery_rate: f64,
    pub baseline_intensity: f64,
    pub has_data: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<InertiaTrend>,
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 7: Interventions & distribution
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionEffect {
    pub intervention: String,
    pub uses: usize,
    /// Uses with both before and after intensity.
    pub paired: usize,
    /// Mean (before − after) on the 0–10 scale. Negative means intensity rose.
    pub mean_reduction: f64,
    /// Share of paired uses where intensity dropped.
    pub improvement_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterventionSummary {
    pub effects: Vec<InterventionEffect>,
    pub total_paired: usize,
    pub overall_mean_reduction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadrantShare {
    pub quadrant: Quadrant,
    pub count: usize,
    pub share: f64,
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 8: Analytics payload
// ═══════════════════════════════════════════════════════════════════════════

/// Everything the presentation layer needs for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsPayload {
    pub period: Period,
    pub period_label: String,
    pub generated_at: DateTime<Utc>,
    pub entry_count: usize,
    pub previous_entry_count: usize,
    pub state: EmotionalStateOutcome,
    pub deam: DeamScore,
    pub granularity: GranularityResult,
    pub awareness: AwarenessResult,
    pub inertia: InertiaResult,
    /// Simple negative→positive crossing time, in hours.
    pub crossing_inertia_hours: f64,
    pub interventions: InterventionSummary,
    pub quadrants: Vec<QuadrantShare>,
}
