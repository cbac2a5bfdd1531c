// ── Engine: Entry Window (boundary) ─────────────────────────────────────────
//
// The only place raw check-ins enter the engine. Building an `EntryWindow`:
//   1. validates the caller contract (fail fast on garbage input)
//   2. resolves the canonical label and missing valence/arousal via the axis table
//   3. resolves the quadrant (stored value wins, else derived from the axes)
//   4. applies the default confidence
//   5. sorts chronologically (stable for equal timestamps)
//
// Scorers only ever see resolved, ordered entries and never mutate them.

use crate::atoms::config::MetricsConfig;
use crate::atoms::constants::{INTENSITY_MAX, INTENSITY_PERCENT_MAX};
use crate::atoms::error::{MetricsError, MetricsResult};
use crate::atoms::metric_types::QuadrantShare;
use crate::atoms::types::{Axes, EmotionEntry, IntensityScale, Period, Quadrant, TimeRange};
use crate::engine::axes;
use crate::engine::state::quadrant_for;
use chrono::{DateTime, Utc};
use log::debug;

/// A check-in with every derived field filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntry {
    pub entry: EmotionEntry,
    /// Label identity for counting: table spelling, else the trimmed label.
    pub label: String,
    pub axes: Axes,
    pub quadrant: Quadrant,
    pub confidence: f64,
}

impl ResolvedEntry {
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.entry.timestamp
    }

    pub fn valence(&self) -> f64 {
        self.axes.valence
    }

    pub fn arousal(&self) -> f64 {
        self.axes.arousal
    }

    pub fn intensity(&self) -> Option<u8> {
        self.entry.intensity_before
    }
}

/// A validated, chronologically ordered slice of history ending at `now`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryWindow {
    entries: Vec<ResolvedEntry>,
    now: DateTime<Utc>,
}

impl EntryWindow {
    pub fn new(
        entries: &[EmotionEntry],
        now: DateTime<Utc>,
        config: &MetricsConfig,
    ) -> MetricsResult<Self> {
        for (index, entry) in entries.iter().enumerate() {
            validate_entry(index, entry, now)?;
        }

        let mut resolved: Vec<ResolvedEntry> = entries
            .iter()
            .map(|entry| {
                let axes = resolve_axes(entry);
                let quadrant = entry
                    .quadrant
                    .unwrap_or_else(|| quadrant_for(axes.valence, axes.arousal, &config.state));
                ResolvedEntry {
                    entry: entry.clone(),
                    label: axes::canonical_label(&entry.emotion),
                    axes,
                    quadrant,
                    confidence: entry.confidence.unwrap_or(config.state.default_confidence),
                }
            })
            .collect();
        resolved.sort_by_key(|r| r.entry.timestamp);

        let unknown = resolved
            .iter()
            .filter(|r| r.entry.valence.is_none() && !axes::is_known(&r.entry.emotion))
            .count();
        if unknown > 0 {
            debug!(
                "[metrics::window] {} of {} entries use an unknown label, resolved to neutral axes",
                unknown,
                resolved.len()
            );
        }

        Ok(Self {
            entries: resolved,
            now,
        })
    }

    /// A window with no entries.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            entries: Vec::new(),
            now,
        }
    }

    pub fn entries(&self) -> &[ResolvedEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reference time all ages are measured from.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Contract checks
// ═════════════════════════════════════════════════════════════════════════════

/// Check one entry against the caller contract.
pub fn validate_entry(index: usize, entry: &EmotionEntry, now: DateTime<Utc>) -> MetricsResult<()> {
    if entry.timestamp > now {
        return Err(MetricsError::validation(
            index,
            format!(
                "timestamp {} is after the reference time {}",
                entry.timestamp.to_rfc3339(),
                now.to_rfc3339()
            ),
        ));
    }
    if entry.intensity_after.is_some() && entry.intensity_before.is_none() {
        return Err(MetricsError::validation(
            index,
            "intensity_after is set but intensity_before is missing",
        ));
    }
    for (field, value) in [
        ("intensity_before", entry.intensity_before),
        ("intensity_after", entry.intensity_after),
    ] {
        if let Some(v) = value {
            if v > INTENSITY_MAX {
                return Err(MetricsError::validation(
                    index,
                    format!("{field}={v} exceeds the 0–{INTENSITY_MAX} scale"),
                ));
            }
        }
    }
    for (field, value) in [("valence", entry.valence), ("arousal", entry.arousal)] {
        if let Some(v) = value {
            if !(-1.0..=1.0).contains(&v) {
                return Err(MetricsError::validation(
                    index,
                    format!("{field}={v} is outside [-1, 1]"),
                ));
            }
        }
    }
    if let Some(c) = entry.confidence {
        if !(0.0..=1.0).contains(&c) {
            return Err(MetricsError::validation(
                index,
                format!("confidence={c} is outside [0, 1]"),
            ));
        }
    }
    Ok(())
}

/// Stored axes win; missing components come from the label table.
pub fn resolve_axes(entry: &EmotionEntry) -> Axes {
    let looked_up = axes::axes_of(&entry.emotion);
    Axes::new(
        entry.valence.unwrap_or(looked_up.valence),
        entry.arousal.unwrap_or(looked_up.arousal),
    )
}

/// Convert one intensity given on `scale` to the 0–10 scale.
pub fn rescale_value(value: u8, scale: IntensityScale, field: &str) -> MetricsResult<u8> {
    let (max, divisor) = match scale {
        IntensityScale::Ten => (INTENSITY_MAX, 1.0),
        IntensityScale::Hundred => (INTENSITY_PERCENT_MAX, 10.0),
    };
    if value > max {
        return Err(MetricsError::Validation {
            index: 0,
            reason: format!("{field}={value} exceeds the 0–{max} scale"),
        });
    }
    Ok((f64::from(value) / divisor).round() as u8)
}

/// Convert an entry captured on another intensity scale to the 0–10 scale.
pub fn rescale_intensity(mut entry: EmotionEntry, scale: IntensityScale) -> MetricsResult<EmotionEntry> {
    entry.intensity_before = entry
        .intensity_before
        .map(|v| rescale_value(v, scale, "intensity_before"))
        .transpose()?;
    entry.intensity_after = entry
        .intensity_after
        .map(|v| rescale_value(v, scale, "intensity_after"))
        .transpose()?;
    Ok(entry)
}

// ═════════════════════════════════════════════════════════════════════════════
// Slicing helpers
// ═════════════════════════════════════════════════════════════════════════════

/// Split a full history into the current period and the one before it.
pub fn split_periods(
    history: &[EmotionEntry],
    now: DateTime<Utc>,
    period: Period,
) -> (Vec<EmotionEntry>, Vec<EmotionEntry>) {
    let current = TimeRange::current(period, now);
    let previous = TimeRange::previous(period, now);
    let pick = |range: TimeRange| -> Vec<EmotionEntry> {
        history
            .iter()
            .filter(|e| range.contains(e.timestamp))
            .cloned()
            .collect()
    };
    (pick(current), pick(previous))
}

/// Count and share of entries per quadrant, in `Quadrant::ALL` order.
pub fn quadrant_distribution(window: &EntryWindow) -> Vec<QuadrantShare> {
    let total = window.len();
    Quadrant::ALL
        .iter()
        .map(|&quadrant| {
            let count = window.iter().filter(|r| r.quadrant == quadrant).count();
            let share = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            };
            QuadrantShare {
                quadrant,
                count,
                share,
            }
        })
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════════
// Tests
// ═════════════════════════════════════════════════════════════════════════════
