// ── Engine: Emotional Awareness ─────────────────────────────────────────────
//
// Five per-entry subscores (0–100) from optional check-in metadata:
//   CC  contextual: activity +40, company +40, free text +20
//   CB  bodily: body locations, elaborated by free text
//   CT  temporal: how close in time the event is to the check-in
//   MC  meta: self-reported certainty about the label
//   CEe elaborative: length of the free text
//
// Window composite: round(0.25·CC + 0.20·CB + 0.20·CT + 0.25·MC + 0.10·CEe)
// over subscore averages. Insights compare subgroup means with a fixed
// threshold; new rules only need a row in `INSIGHT_RULES`.

use crate::atoms::config::{AwarenessConfig, MetricsConfig};
use crate::atoms::metric_types::{AwarenessBreakdown, AwarenessInsight, AwarenessResult};
use crate::atoms::types::{CertaintyBucket, EmotionEntry, TimeReference};
use crate::engine::trend::{direction, mean, to_score};
use crate::engine::window::{EntryWindow, ResolvedEntry};

// ═════════════════════════════════════════════════════════════════════════════
// Per-entry subscores
// ═════════════════════════════════════════════════════════════════════════════

pub fn contextual_score(entry: &EmotionEntry) -> f64 {
    let mut score = 0.0;
    if entry.has_activity() {
        score += 40.0;
    }
    if entry.has_company() {
        score += 40.0;
    }
    if entry.notes_text().is_some() {
        score += 20.0;
    }
    score
}

pub fn bodily_score(entry: &EmotionEntry) -> f64 {
    let locations = entry.body_signals.len();
    let elaborated = entry.notes_text().is_some();
    match (locations, elaborated) {
        (0, _) => 0.0,
        (_, true) => 100.0,
        (1, false) => 70.0,
        (_, false) => 85.0,
    }
}

pub fn temporal_score(reference: TimeReference) -> f64 {
    match reference {
        TimeReference::JustNow | TimeReference::FewHoursAgo => 100.0,
        TimeReference::WithinDay => 80.0,
        TimeReference::FewDaysAgo | TimeReference::OverMonthAgo => 60.0,
        TimeReference::NotYetHappened => 40.0,
        TimeReference::Unset => 60.0,
    }
}

pub fn meta_score(certainty: CertaintyBucket) -> f64 {
    match certainty {
        CertaintyBucket::SeventyToHundred => 100.0,
        CertaintyBucket::FiftyToSeventy => 80.0,
        CertaintyBucket::TwentyToFifty => 60.0,
        CertaintyBucket::FiveToTwenty => 40.0,
        CertaintyBucket::ZeroToFive => 20.0,
        CertaintyBucket::DontKnow => 30.0,
        CertaintyBucket::Unset => 60.0,
    }
}

pub fn elaborative_score(entry: &EmotionEntry) -> f64 {
    match entry.notes_text().map(|t| t.chars().count()) {
        None => 0.0,
        Some(len) if len < 20 => 50.0,
        Some(len) if len < 100 => 75.0,
        Some(_) => 100.0,
    }
}

pub fn entry_breakdown(entry: &EmotionEntry) -> AwarenessBreakdown {
    AwarenessBreakdown {
        contextual: contextual_score(entry),
        bodily: bodily_score(entry),
        temporal: temporal_score(entry.time_reference),
        meta: meta_score(entry.certainty),
        elaborative: elaborative_score(entry),
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Aggregation
// ═════════════════════════════════════════════════════════════════════════════

/// Mean of each subscore across entries; all zeros for an empty slice.
pub fn average_breakdown(items: &[AwarenessBreakdown]) -> AwarenessBreakdown {
    let pick = |f: fn(&AwarenessBreakdown) -> f64| -> f64 {
        mean(&items.iter().map(f).collect::<Vec<_>>())
    };
    AwarenessBreakdown {
        contextual: pick(|b| b.contextual),
        bodily: pick(|b| b.bodily),
        temporal: pick(|b| b.temporal),
        meta: pick(|b| b.meta),
        elaborative: pick(|b| b.elaborative),
    }
}

pub fn composite_score(avg: &AwarenessBreakdown, cfg: &AwarenessConfig) -> u32 {
    to_score(
        cfg.weight_contextual * avg.contextual
            + cfg.weight_bodily * avg.bodily
            + cfg.weight_temporal * avg.temporal
            + cfg.weight_meta * avg.meta
            + cfg.weight_elaborative * avg.elaborative,
    )
}

fn window_score(window: &EntryWindow, cfg: &AwarenessConfig) -> (u32, AwarenessBreakdown) {
    if window.is_empty() {
        return (0, AwarenessBreakdown::default());
    }
    let items: Vec<AwarenessBreakdown> = window.iter().map(|r| entry_breakdown(&r.entry)).collect();
    let avg = average_breakdown(&items);
    (composite_score(&avg, cfg), avg)
}

// ═════════════════════════════════════════════════════════════════════════════
// Insights
// ═════════════════════════════════════════════════════════════════════════════

/// "Entries matching `splits` score higher on `measure` than the rest."
struct InsightRule {
    id: &'static str,
    splits: fn(&ResolvedEntry) -> bool,
    measure: fn(&AwarenessBreakdown) -> f64,
    message: &'static str,
}

const INSIGHT_RULES: &[InsightRule] = &[
    InsightRule {
        id: "body_signals_certainty",
        splits: |r| !r.entry.body_signals.is_empty(),
        measure: |b| b.meta,
        message: "Cuando registras sensaciones en tu cuerpo, identificas tus emociones con más seguridad.",
    },
    InsightRule {
        id: "notes_certainty",
        splits: |r| r.entry.notes_text().is_some(),
        measure: |b| b.meta,
        message: "Escribir sobre lo que sientes se asocia con más claridad sobre tus emociones.",
    },
    InsightRule {
        id: "in_the_moment_certainty",
        splits: |r| {
            matches!(
                r.entry.time_reference,
                TimeReference::JustNow | TimeReference::FewHoursAgo
            )
        },
        measure: |b| b.meta,
        message: "Registrar tus emociones en el momento te ayuda a reconocerlas con más precisión.",
    },
];

pub fn generate_insights(window: &EntryWindow, cfg: &AwarenessConfig) -> Vec<AwarenessInsight> {
    let scored: Vec<(&ResolvedEntry, AwarenessBreakdown)> =
        window.iter().map(|r| (r, entry_breakdown(&r.entry))).collect();

    INSIGHT_RULES
        .iter()
        .filter_map(|rule| {
            let (with, without): (Vec<_>, Vec<_>) = scored.iter().partition(|(r, _)| (rule.splits)(r));
            if with.is_empty() || without.is_empty() {
                return None;
            }
            let mean_of = |group: &[&(&ResolvedEntry, AwarenessBreakdown)]| -> f64 {
                mean(&group.iter().map(|(_, b)| (rule.measure)(b)).collect::<Vec<_>>())
            };
            let difference = mean_of(&with) - mean_of(&without);
            (difference > cfg.insight_threshold).then(|| AwarenessInsight {
                id: rule.id.to_string(),
                message: rule.message.to_string(),
                difference,
            })
        })
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════════
// Entry point
// ═════════════════════════════════════════════════════════════════════════════

/// Awareness composite for `current`, with the point delta against `previous`.
pub fn compute_emotional_awareness(
    current: &EntryWindow,
    previous: &EntryWindow,
    config: &MetricsConfig,
) -> AwarenessResult {
    let cfg = &config.awareness;
    let (score, averages) = window_score(current, cfg);
    let (previous_score, _) = window_score(previous, cfg);
    let delta = score as i32 - previous_score as i32;

    AwarenessResult {
        score,
        averages,
        previous_score,
        delta,
        trend: direction(f64::from(delta), cfg.trend_deadband_points),
        insights: generate_insights(current, cfg),
        entry_count: current.len(),
        has_data: !current.is_empty(),
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Tests
// ═════════════════════════════════════════════════════════════════════════════
