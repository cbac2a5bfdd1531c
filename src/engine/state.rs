// ── Engine: Emotional State Classifier ──────────────────────────────────────
//
// Summarises a window into one of four states (calm, low mood, energetic,
// tense) from recency- and confidence-weighted mean valence/arousal.
//
//   w_time = exp(-age_days / tau)          tau: 3 / 6 / 10 days for 7 / 14 / 30-day windows
//   w      = w_time × (0.7 + 0.3 × confidence)
//   stability = max(0, 1 − (var_V + var_A) / 2)   (unweighted population variance)
//
// Too few entries is an ordinary outcome (`InsufficientData`), not an error.
// Description text is cosmetic and chosen through `DescriptionSelector`, so
// the numeric classification stays deterministic.

use crate::atoms::config::{MetricsConfig, StateConfig};
use crate::atoms::constants::{SECS_PER_DAY, STATE_NOT_ENOUGH_DATA};
use crate::atoms::metric_types::{EmotionalState, EmotionalStateOutcome, StateCategory};
use crate::atoms::types::{Period, Quadrant};
use crate::engine::trend::round2;
use crate::engine::window::EntryWindow;
use std::sync::atomic::{AtomicUsize, Ordering};

// ═════════════════════════════════════════════════════════════════════════════
// Quadrant rule
// ═════════════════════════════════════════════════════════════════════════════

/// Classify a (valence, arousal) point into a family.
///
/// Points inside the deep-neutral box (|v| < Tv and |a| < Ta) are calm.
pub fn quadrant_for(valence: f64, arousal: f64, cfg: &StateConfig) -> Quadrant {
    let tv = cfg.valence_threshold;
    let ta = cfg.arousal_threshold;
    if valence.abs() < tv && arousal.abs() < ta {
        return Quadrant::Green;
    }
    if arousal <= -ta {
        if valence >= -tv {
            Quadrant::Green
        } else {
            Quadrant::Blue
        }
    } else if valence >= -tv {
        Quadrant::Yellow
    } else {
        Quadrant::Red
    }
}

pub fn category_for(valence: f64, arousal: f64, cfg: &StateConfig) -> StateCategory {
    StateCategory::from_quadrant(quadrant_for(valence, arousal, cfg))
}

// ═════════════════════════════════════════════════════════════════════════════
// Labels & descriptions
// ═════════════════════════════════════════════════════════════════════════════

pub fn category_label(category: StateCategory) -> &'static str {
    match category {
        StateCategory::Calm => "Calma",
        StateCategory::LowMood => "Ánimo bajo",
        StateCategory::Energetic => "Energía",
        StateCategory::Tense => "Tensión",
    }
}

pub fn descriptions(category: StateCategory) -> &'static [&'static str] {
    match category {
        StateCategory::Calm => &[
            "Has transitado este periodo con serenidad y pocas sacudidas.",
            "Predomina una sensación de calma y equilibrio.",
            "Tus registros reflejan un estado tranquilo y estable.",
        ],
        StateCategory::LowMood => &[
            "Tus registros muestran un ánimo bajo y poca energía.",
            "Ha sido un periodo más apagado; date espacio para recuperarte.",
            "Predominan emociones de baja energía y tono desagradable.",
        ],
        StateCategory::Energetic => &[
            "Has tenido un periodo activo y con buen tono emocional.",
            "Predomina la energía positiva en tus registros.",
            "Tus emociones muestran entusiasmo y activación agradable.",
        ],
        StateCategory::Tense => &[
            "Tus registros reflejan tensión y activación desagradable.",
            "Ha sido un periodo exigente; aparecen emociones intensas y difíciles.",
            "Predomina la tensión; puede ayudarte una pausa para regularte.",
        ],
    }
}

/// Picks which description template to show.
pub trait DescriptionSelector {
    /// Index into a list of `count` (≥ 1) templates for `category`.
    fn select(&self, category: StateCategory, count: usize) -> usize;
}

/// Always the first template.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstDescription;

impl DescriptionSelector for FirstDescription {
    fn select(&self, _category: StateCategory, _count: usize) -> usize {
        0
    }
}

/// Cycles through templates on each call. Owned by the caller; never shared
/// across users.
#[derive(Debug, Default)]
pub struct RotatingDescription {
    next: AtomicUsize,
}

impl DescriptionSelector for RotatingDescription {
    fn select(&self, _category: StateCategory, count: usize) -> usize {
        self.next.fetch_add(1, Ordering::Relaxed) % count.max(1)
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Classification
// ═════════════════════════════════════════════════════════════════════════════

/// Weighted centre and spread of a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffectSummary {
    pub valence_mean: f64,
    pub arousal_mean: f64,
    pub stability: f64,
}

/// Weighted means and stability; `None` for an empty window.
pub fn summarize_affect(window: &EntryWindow, tau_days: f64, cfg: &StateConfig) -> Option<AffectSummary> {
    if window.is_empty() {
        return None;
    }
    let now = window.now();
    let floor = cfg.confidence_floor;

    let mut weight_sum = 0.0;
    let mut v_acc = 0.0;
    let mut a_acc = 0.0;
    for r in window.iter() {
        let age_days = ((now - r.timestamp()).num_milliseconds() as f64 / 1000.0 / SECS_PER_DAY).max(0.0);
        let w_time = (-age_days / tau_days).exp();
        let w = w_time * (floor + (1.0 - floor) * r.confidence);
        weight_sum += w;
        v_acc += w * r.valence();
        a_acc += w * r.arousal();
    }

    let n = window.len() as f64;
    let v_plain = window.iter().map(|r| r.valence()).sum::<f64>() / n;
    let a_plain = window.iter().map(|r| r.arousal()).sum::<f64>() / n;

    // Very old windows can underflow every weight to zero.
    let (valence_mean, arousal_mean) = if weight_sum > f64::MIN_POSITIVE {
        (v_acc / weight_sum, a_acc / weight_sum)
    } else {
        (v_plain, a_plain)
    };

    let var_v = window
        .iter()
        .map(|r| (r.valence() - v_plain).powi(2))
        .sum::<f64>()
        / n;
    let var_a = window
        .iter()
        .map(|r| (r.arousal() - a_plain).powi(2))
        .sum::<f64>()
        / n;
    let stability = (1.0 - (var_v + var_a) / 2.0).max(0.0);

    Some(AffectSummary {
        valence_mean,
        arousal_mean,
        stability,
    })
}

/// Classify the emotional state of a window.
pub fn classify_emotional_state(
    window: &EntryWindow,
    period: Period,
    config: &MetricsConfig,
    selector: &dyn DescriptionSelector,
) -> EmotionalStateOutcome {
    let cfg = &config.state;
    let entry_count = window.len();

    let summary = if entry_count < cfg.min_entries {
        None
    } else {
        summarize_affect(window, cfg.tau_for_days(period.days()), cfg)
    };
    let Some(summary) = summary else {
        return EmotionalStateOutcome::InsufficientData {
            entry_count,
            required: cfg.min_entries,
            message: STATE_NOT_ENOUGH_DATA.replace("{required}", &cfg.min_entries.to_string()),
            period_label: period.label(),
        };
    };

    let category = category_for(summary.valence_mean, summary.arousal_mean, cfg);
    let templates = descriptions(category);
    let idx = selector.select(category, templates.len()).min(templates.len() - 1);

    EmotionalStateOutcome::Classified(EmotionalState {
        category,
        label: category_label(category).to_string(),
        description: templates[idx].to_string(),
        valence_mean: round2(summary.valence_mean),
        arousal_mean: round2(summary.arousal_mean),
        stability: round2(summary.stability),
        entry_count,
        period_label: period.label(),
        has_enough_data: true,
    })
}

// ═════════════════════════════════════════════════════════════════════════════
// Tests
// ═════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::types::EmotionEntry;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap()
    }

    fn window(labels: &[(&str, i64)]) -> EntryWindow {
        let n = now();
        let entries: Vec<EmotionEntry> = labels
            .iter()
            .map(|(l, h)| EmotionEntry::new(*l, n - Duration::hours(*h)))
            .collect();
        EntryWindow::new(&entries, n, &MetricsConfig::default()).unwrap()
    }

    fn classify(w: &EntryWindow) -> EmotionalStateOutcome {
        classify_emotional_state(w, Period::Week, &MetricsConfig::default(), &FirstDescription)
    }

    #[test]
    fn quadrant_rule_thresholds() {
        let cfg = StateConfig::default();
        assert_eq!(quadrant_for(0.5, -0.5, &cfg), Quadrant::Green);
        assert_eq!(quadrant_for(-0.5, -0.5, &cfg), Quadrant::Blue);
        assert_eq!(quadrant_for(0.5, 0.5, &cfg), Quadrant::Yellow);
        assert_eq!(quadrant_for(-0.5, 0.5, &cfg), Quadrant::Red);
        // Boundary: arousal exactly −Ta counts as deactivated.
        assert_eq!(quadrant_for(-0.5, -0.15, &cfg), Quadrant::Blue);
        // Valence exactly −Tv counts as pleasant-side.
        assert_eq!(quadrant_for(-0.15, 0.5, &cfg), Quadrant::Yellow);
    }

    #[test]
    fn deep_neutral_zone_is_calm() {
        let cfg = StateConfig::default();
        assert_eq!(quadrant_for(-0.14, 0.14, &cfg), Quadrant::Green);
        assert_eq!(quadrant_for(0.0, 0.0, &cfg), Quadrant::Green);
        assert_eq!(category_for(-0.1, 0.1, &cfg), StateCategory::Calm);
    }

    #[test]
    fn fewer_than_three_entries_is_insufficient() {
        let out = classify(&window(&[("Feliz", 1), ("Triste", 2)]));
        match out {
            EmotionalStateOutcome::InsufficientData {
                entry_count,
                required,
                ref message,
                ..
            } => {
                assert_eq!(entry_count, 2);
                assert_eq!(required, 3);
                assert!(message.contains('3'), "message={message}");
            }
            other => panic!("expected insufficient data, got {other:?}"),
        }
        assert!(!classify(&EntryWindow::empty(now())).has_enough_data());
    }

    #[test]
    fn tense_window_classifies_tense() {
        let out = classify(&window(&[("Ansioso", 1), ("Estresado", 5), ("Enojado", 20)]));
        let state = out.state().expect("classified");
        assert_eq!(state.category, StateCategory::Tense);
        assert_eq!(state.label, "Tensión");
        assert!(state.valence_mean < 0.0 && state.arousal_mean > 0.0);
        assert_eq!(state.entry_count, 3);
        assert!(state.has_enough_data);
    }

    #[test]
    fn recent_entries_dominate_the_mean() {
        // Two old low-mood entries, three fresh energetic ones.
        let out = classify(&window(&[
            ("Triste", 24 * 6),
            ("Deprimido", 24 * 6),
            ("Feliz", 1),
            ("Motivado", 2),
            ("Entusiasmado", 3),
        ]));
        assert_eq!(out.state().unwrap().category, StateCategory::Energetic);
    }

    #[test]
    fn identical_entries_are_fully_stable() {
        let out = classify(&window(&[("Tranquilo", 1), ("Tranquilo", 2), ("Tranquilo", 3)]));
        let state = out.state().unwrap();
        assert_eq!(state.stability, 1.0);
        assert_eq!(state.valence_mean, 0.55);
        assert_eq!(state.arousal_mean, -0.6);
    }

    #[test]
    fn classification_is_deterministic() {
        let w = window(&[("Ansioso", 1), ("Feliz", 5), ("Triste", 20), ("Relajado", 40)]);
        assert_eq!(classify(&w), classify(&w));
    }

    #[test]
    fn rotating_selector_cycles_descriptions() {
        let w = window(&[("Feliz", 1), ("Alegre", 2), ("Motivado", 3)]);
        let rot = RotatingDescription::default();
        let cfg = MetricsConfig::default();
        let a = classify_emotional_state(&w, Period::Week, &cfg, &rot);
        let b = classify_emotional_state(&w, Period::Week, &cfg, &rot);
        let (sa, sb) = (a.state().unwrap(), b.state().unwrap());
        assert_ne!(sa.description, sb.description);
        assert_eq!(sa.valence_mean, sb.valence_mean);
        assert_eq!(sa.category, sb.category);
    }
}
