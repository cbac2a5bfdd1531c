// ── Engine: DEAM EQ Composite Score ─────────────────────────────────────────
//
// Five normalized submetrics, each in [0, 1]:
//   G  granularity: distinct labels / min(25, n × 0.7)
//   P  perception: n / (period_days × 2)
//   C  context: share of entries with context or notes
//   A  adaptability: mean max(0, before − after)/10 × 2   (0.5 without interventions)
//   Ie inertia: mean gap between consecutive red/blue entries < 24h, / 24h
//      (0.5 without evidence)
//
//   deamEQ = round(100 × (αG + βP + γC + δA) × (1 − Ie × 0.5))
//
// Inertia is a multiplicative penalty: it can remove at most half the score.
// The previous period is scored by the same snapshot function; nothing here
// ever reaches for a period before `previous`.

use crate::atoms::config::{DeamConfig, MetricsConfig};
use crate::atoms::constants::{INTENSITY_MAX, SECS_PER_HOUR};
use crate::atoms::metric_types::{DeamScore, DeamSubmetrics};
use crate::atoms::types::Period;
use crate::engine::trend::{mean, to_score};
use crate::engine::window::EntryWindow;
use log::debug;
use std::collections::HashSet;

// ═════════════════════════════════════════════════════════════════════════════
// Submetrics
// ═════════════════════════════════════════════════════════════════════════════

pub fn granularity_component(window: &EntryWindow, cfg: &DeamConfig) -> f64 {
    let unique: HashSet<&str> = window.iter().map(|r| r.label.as_str()).collect();
    let denom = cfg
        .max_known_emotions
        .min(window.len() as f64 * cfg.unique_ratio);
    if denom <= 0.0 {
        return 0.0;
    }
    (unique.len() as f64 / denom).min(1.0)
}

pub fn perception_component(window: &EntryWindow, period: Period, cfg: &DeamConfig) -> f64 {
    let expected = f64::from(period.days()) * cfg.expected_entries_per_day;
    if expected <= 0.0 {
        return 0.0;
    }
    (window.len() as f64 / expected).min(1.0)
}

pub fn context_component(window: &EntryWindow) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let with_context = window
        .iter()
        .filter(|r| r.entry.has_context() || r.entry.notes_text().is_some())
        .count();
    with_context as f64 / window.len() as f64
}

pub fn adaptability_component(window: &EntryWindow, cfg: &DeamConfig) -> f64 {
    let reductions: Vec<f64> = window
        .iter()
        .filter_map(|r| r.entry.paired_intensity())
        .map(|(before, after)| {
            f64::from(before.saturating_sub(after)) / f64::from(INTENSITY_MAX)
        })
        .collect();
    if reductions.is_empty() {
        return cfg.neutral_prior;
    }
    (mean(&reductions) * cfg.adaptability_scale).clamp(0.0, 1.0)
}

pub fn inertia_component(window: &EntryWindow, cfg: &DeamConfig) -> f64 {
    let negatives: Vec<_> = window
        .iter()
        .filter(|r| r.quadrant.is_negative())
        .map(|r| r.timestamp())
        .collect();
    if negatives.len() < 2 {
        return cfg.neutral_prior;
    }
    let gaps: Vec<f64> = negatives
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_seconds() as f64 / SECS_PER_HOUR)
        .filter(|hours| *hours < cfg.inertia_gap_hours)
        .collect();
    if gaps.is_empty() {
        return cfg.neutral_prior;
    }
    (mean(&gaps) / cfg.inertia_gap_hours).clamp(0.0, 1.0)
}

/// All five submetrics for one window.
pub fn deam_submetrics(window: &EntryWindow, period: Period, cfg: &DeamConfig) -> DeamSubmetrics {
    DeamSubmetrics {
        granularity: granularity_component(window, cfg),
        perception: perception_component(window, period, cfg),
        context: context_component(window),
        adaptability: adaptability_component(window, cfg),
        inertia: inertia_component(window, cfg),
    }
}

/// The weighted composite, 0–100, before any minimum-entry gate.
pub fn deam_composite(sub: &DeamSubmetrics, cfg: &DeamConfig) -> u32 {
    let weighted = cfg.weight_granularity * sub.granularity
        + cfg.weight_perception * sub.perception
        + cfg.weight_context * sub.context
        + cfg.weight_adaptability * sub.adaptability;
    to_score(100.0 * weighted * (1.0 - sub.inertia * cfg.inertia_penalty))
}

/// Score one window: (score, submetrics, enough data?).
fn deam_snapshot(window: &EntryWindow, period: Period, cfg: &DeamConfig) -> (u32, DeamSubmetrics, bool) {
    let sub = deam_submetrics(window, period, cfg);
    let enough = window.len() >= cfg.min_entries;
    let score = if enough { deam_composite(&sub, cfg) } else { 0 };
    (score, sub, enough)
}

// ═════════════════════════════════════════════════════════════════════════════
// Entry point
// ═════════════════════════════════════════════════════════════════════════════

/// DEAM EQ for `current`, with the point delta against `previous`.
pub fn compute_deam_score(
    current: &EntryWindow,
    previous: &EntryWindow,
    period: Period,
    config: &MetricsConfig,
) -> DeamScore {
    let cfg = &config.deam;
    let (score, submetrics, has_enough_data) = deam_snapshot(current, period, cfg);
    let (previous_score, previous_submetrics, _) = deam_snapshot(previous, period, cfg);
    let delta = score as i32 - previous_score as i32;

    debug!(
        "[metrics::deam] score={} prev={} G={:.2} P={:.2} C={:.2} A={:.2} Ie={:.2}",
        score,
        previous_score,
        submetrics.granularity,
        submetrics.perception,
        submetrics.context,
        submetrics.adaptability,
        submetrics.inertia,
    );

    DeamScore {
        score,
        previous_score,
        delta,
        submetrics,
        previous_submetrics,
        entry_count: current.len(),
        has_enough_data,
    }
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

    fn win(entries: Vec<EmotionEntry>) -> EntryWindow {
        EntryWindow::new(&entries, now(), &MetricsConfig::default()).unwrap()
    }

    fn ago(hours: i64) -> DateTime<Utc> {
        now() - Duration::hours(hours)
    }

    fn sample() -> EntryWindow {
        win(vec![
            EmotionEntry::new("Ansioso", ago(48))
                .with_intensity(8)
                .with_intervention("respiración", 4)
                .with_notes("reunión difícil"),
            EmotionEntry::new("Ansioso", ago(40)).with_intensity(7),
            EmotionEntry::new("Feliz", ago(20)).with_activity("trabajo"),
            EmotionEntry::new("Tranquilo", ago(2)),
        ])
    }

    #[test]
    fn empty_window_uses_documented_defaults() {
        let empty = EntryWindow::empty(now());
        let out = compute_deam_score(&empty, &empty, Period::Month, &MetricsConfig::default());
        assert_eq!(out.submetrics.granularity, 0.0);
        assert_eq!(out.submetrics.perception, 0.0);
        assert_eq!(out.submetrics.context, 0.0);
        assert_eq!(out.submetrics.adaptability, 0.5);
        assert_eq!(out.submetrics.inertia, 0.5);
        assert_eq!(out.score, 0);
        assert_eq!(out.delta, 0);
        assert!(!out.has_enough_data);
    }

    #[test]
    fn composite_matches_the_formula() {
        let cfg = MetricsConfig::default();
        let w = sample();
        let sub = deam_submetrics(&w, Period::Week, &cfg.deam);
        assert_eq!(sub.granularity, 1.0);
        assert!((sub.perception - 4.0 / 14.0).abs() < 1e-9, "P={}", sub.perception);
        assert!((sub.context - 0.5).abs() < 1e-9);
        assert!((sub.adaptability - 0.8).abs() < 1e-9);
        assert!((sub.inertia - 8.0 / 24.0).abs() < 1e-9);

        let out = compute_deam_score(&w, &EntryWindow::empty(now()), Period::Week, &cfg);
        assert_eq!(out.score, 57);
        assert_eq!(out.previous_score, 0);
        assert_eq!(out.delta, 57);
        assert!(out.has_enough_data);
    }

    #[test]
    fn below_four_entries_scores_zero_but_reports_submetrics() {
        let w = win(vec![
            EmotionEntry::new("Feliz", ago(3)).with_notes("cena con amigos"),
            EmotionEntry::new("Triste", ago(2)),
        ]);
        let out = compute_deam_score(&w, &w, Period::Week, &MetricsConfig::default());
        assert_eq!(out.score, 0);
        assert!(!out.has_enough_data);
        assert!((out.submetrics.context - 0.5).abs() < 1e-9);
    }

    #[test]
    fn inertia_penalty_never_exceeds_half() {
        let cfg = MetricsConfig::default();
        let full = DeamSubmetrics {
            granularity: 1.0,
            perception: 1.0,
            context: 1.0,
            adaptability: 1.0,
            inertia: 1.0,
        };
        assert_eq!(deam_composite(&full, &cfg.deam), 50);
        let no_inertia = DeamSubmetrics { inertia: 0.0, ..full };
        assert_eq!(deam_composite(&no_inertia, &cfg.deam), 100);
    }

    #[test]
    fn intensity_increase_does_not_count_as_adaptation() {
        let w = win(vec![EmotionEntry::new("Ansioso", ago(1))
            .with_intensity(4)
            .with_intervention("caminar", 6)]);
        assert_eq!(adaptability_component(&w, &DeamConfig::default()), 0.0);
    }

    #[test]
    fn distant_negative_entries_fall_back_to_prior() {
        let w = win(vec![
            EmotionEntry::new("Triste", ago(100)),
            EmotionEntry::new("Ansioso", ago(30)),
        ]);
        assert_eq!(inertia_component(&w, &DeamConfig::default()), 0.5);
    }

    #[test]
    fn delta_is_point_difference() {
        let cfg = MetricsConfig::default();
        let current = sample();
        let previous = win(vec![
            EmotionEntry::new("Triste", now() - Duration::days(9)),
            EmotionEntry::new("Triste", now() - Duration::days(9) + Duration::hours(2)),
            EmotionEntry::new("Triste", now() - Duration::days(10)),
            EmotionEntry::new("Triste", now() - Duration::days(11)),
        ]);
        let out = compute_deam_score(&current, &previous, Period::Week, &cfg);
        assert_eq!(out.delta, out.score as i32 - out.previous_score as i32);
        assert!(out.previous_score < out.score);
    }

    #[test]
    fn label_casing_does_not_inflate_granularity() {
        let cfg = DeamConfig::default();
        let labelled = |labels: [&str; 4]| {
            win(labels
                .iter()
                .enumerate()
                .map(|(i, l)| EmotionEntry::new(*l, ago(i as i64)))
                .collect())
        };
        let same = labelled(["Ansioso"; 4]);
        let cased = labelled(["Ansioso", "ansioso", "ANSIOSO", "AnSioso"]);
        let expected = 1.0 / (4.0 * 0.7);
        assert!((granularity_component(&same, &cfg) - expected).abs() < 1e-9);
        assert_eq!(granularity_component(&cased, &cfg), granularity_component(&same, &cfg));
    }

    #[test]
    fn submetrics_stay_in_unit_range() {
        let cfg = MetricsConfig::default();
        let entries: Vec<EmotionEntry> = (0..60)
            .map(|i| {
                EmotionEntry::new(if i % 2 == 0 { "Triste" } else { "Ansioso" }, ago(i))
                    .with_intensity(10)
                    .with_intervention("respiración", 0)
                    .with_tag("casa")
            })
            .collect();
        let sub = deam_submetrics(&win(entries), Period::Week, &cfg.deam);
        for v in [
            sub.granularity,
            sub.perception,
            sub.context,
            sub.adaptability,
            sub.inertia,
        ] {
            assert!((0.0..=1.0).contains(&v), "value={v}");
        }
    }
}
