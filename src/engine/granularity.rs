// ── Engine: Emotional Granularity ───────────────────────────────────────────
//
// How finely the user distinguishes emotions, scored from normalized Shannon
// entropy:
//
//   Hn_labels = H(labels)   / ln(distinct labels)     (0 for a single label)
//   Hn_family = H(families) / ln(distinct families)
//   G_raw     = 0.6 · Hn_labels + 0.4 · Hn_family
//   penalty   = clamp((p_top − 0.35) / 0.65, 0, 1)
//   G_norm    = clamp(G_raw × (1 − 0.35 · penalty), 0, 1)
//   score     = round(G_norm × 100)
//
// Entropy rewards spreading entries over many labels; the repetition penalty
// also catches one dominant label hiding among many rare ones.

use crate::atoms::config::MetricsConfig;
use crate::atoms::metric_types::{EmotionCount, GranularityResult};
use crate::atoms::types::Quadrant;
use crate::engine::state::quadrant_for;
use crate::engine::trend::{direction, percent_change, to_score};
use crate::engine::window::EntryWindow;
use std::collections::{BTreeMap, HashSet};

// ═════════════════════════════════════════════════════════════════════════════
// Entropy
// ═════════════════════════════════════════════════════════════════════════════

/// Shannon entropy of `counts` divided by ln(k), k = non-zero buckets.
/// Returns 0 when fewer than two buckets are populated.
pub fn normalized_entropy(counts: &[usize]) -> f64 {
    let populated: Vec<f64> = counts.iter().filter(|&&c| c > 0).map(|&c| c as f64).collect();
    if populated.len() < 2 {
        return 0.0;
    }
    let total: f64 = populated.iter().sum();
    let h: f64 = populated
        .iter()
        .map(|c| {
            let p = c / total;
            -p * p.ln()
        })
        .sum();
    (h / (populated.len() as f64).ln()).clamp(0.0, 1.0)
}

/// Label frequencies keyed by canonical label.
fn label_counts(window: &EntryWindow) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for r in window.iter() {
        *counts.entry(r.label.clone()).or_insert(0) += 1;
    }
    counts
}

/// Frequency-descending, then alphabetical.
fn ranked(counts: &BTreeMap<String, usize>) -> Vec<EmotionCount> {
    let mut out: Vec<EmotionCount> = counts
        .iter()
        .map(|(emotion, &count)| EmotionCount {
            emotion: emotion.clone(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.emotion.cmp(&b.emotion)));
    out
}

// ═════════════════════════════════════════════════════════════════════════════
// Snapshot
// ═════════════════════════════════════════════════════════════════════════════

/// Granularity of a single window, without any comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct GranularitySnapshot {
    pub normalized: f64,
    pub label_entropy: f64,
    pub family_entropy: f64,
    pub repetition_penalty: f64,
    pub distinct_emotions: usize,
    pub counts: BTreeMap<String, usize>,
}

impl GranularitySnapshot {
    pub fn score(&self) -> u32 {
        to_score(self.normalized * 100.0)
    }
}

pub fn granularity_snapshot(window: &EntryWindow, config: &MetricsConfig) -> GranularitySnapshot {
    let cfg = &config.granularity;
    let counts = label_counts(window);
    let label_freqs: Vec<usize> = counts.values().copied().collect();
    let label_entropy = normalized_entropy(&label_freqs);

    let mut family_freqs = [0usize; 4];
    for r in window.iter() {
        let family = quadrant_for(r.valence(), r.arousal(), &config.state);
        let slot = Quadrant::ALL.iter().position(|q| *q == family).unwrap_or(0);
        family_freqs[slot] += 1;
    }
    let family_entropy = normalized_entropy(&family_freqs);

    let g_raw = cfg.label_weight * label_entropy + cfg.family_weight * family_entropy;

    let p_top = if window.is_empty() {
        0.0
    } else {
        label_freqs.iter().copied().max().unwrap_or(0) as f64 / window.len() as f64
    };
    let knee = cfg.repetition_knee;
    let repetition_penalty = ((p_top - knee) / (1.0 - knee)).clamp(0.0, 1.0);
    let normalized = (g_raw * (1.0 - cfg.repetition_strength * repetition_penalty)).clamp(0.0, 1.0);

    GranularitySnapshot {
        normalized,
        label_entropy,
        family_entropy,
        repetition_penalty,
        distinct_emotions: counts.len(),
        counts,
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Entry point
// ═════════════════════════════════════════════════════════════════════════════

/// Granularity for `current`, with trend and new emotions against `previous`.
pub fn compute_granularity(
    current: &EntryWindow,
    previous: &EntryWindow,
    config: &MetricsConfig,
) -> GranularityResult {
    let cfg = &config.granularity;
    let now = granularity_snapshot(current, config);
    let before = granularity_snapshot(previous, config);

    let trend_percent = percent_change(now.normalized, before.normalized);
    let ranked_now = ranked(&now.counts);

    let seen_before: HashSet<&str> = before.counts.keys().map(String::as_str).collect();
    let new_emotions: Vec<EmotionCount> = ranked_now
        .iter()
        .filter(|c| !seen_before.contains(c.emotion.as_str()))
        .cloned()
        .collect();
    let top_emotions: Vec<EmotionCount> = ranked_now.into_iter().take(cfg.top_n).collect();

    GranularityResult {
        score: now.score(),
        normalized: now.normalized,
        label_entropy: now.label_entropy,
        family_entropy: now.family_entropy,
        repetition_penalty: now.repetition_penalty,
        distinct_emotions: now.distinct_emotions,
        entry_count: current.len(),
        previous_score: before.score(),
        trend_percent,
        trend: direction(trend_percent, cfg.trend_deadband_pct),
        top_emotions,
        new_emotions,
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Tests
// ═════════════════════════════════════════════════════════════════════════════
