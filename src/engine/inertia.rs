// ── Engine: Emotional Inertia ───────────────────────────────────────────────
//
// Two deliberately distinct measures of how long negative states persist.
//
// (a) Peak recovery (`compute_inertia`):
//     baseline = mean intensity of the most recent ≤30 entries
//     peak     = red/blue entry with intensity ≥ 7
//     recovery = first later entry with intensity ≤ baseline + 2, searched for
//                at most 72h; unrecovered peaks count as exactly 72h
//                (right-censored, never dropped).
//
// (b) Crossing time (`crossing_inertia_hours`):
//     every entry with valence < −0.3 is paired with the next later entry with
//     valence > 0.3; the mean elapsed hours is returned. No baseline and no
//     quadrant restriction, so the two numbers can and do differ.

use crate::atoms::config::{InertiaConfig, MetricsConfig};
use crate::atoms::constants::{NO_DATA_LABEL, NO_PEAKS_LABEL, SECS_PER_HOUR};
use crate::atoms::metric_types::{InertiaResult, InertiaTrend};
use crate::engine::trend::{mean, percent_change};
use crate::engine::window::{EntryWindow, ResolvedEntry};
use chrono::{DateTime, Utc};
use log::debug;

fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_seconds() as f64 / SECS_PER_HOUR
}

// ═════════════════════════════════════════════════════════════════════════════
// Peak recovery
// ═════════════════════════════════════════════════════════════════════════════

/// Recovery statistics for one window, without any period comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoverySummary {
    pub avg_recovery_time_hours: f64,
    pub peak_count: usize,
    pub recovered_peaks: usize,
    pub baseline_intensity: f64,
    pub has_data: bool,
}

impl RecoverySummary {
    fn empty() -> Self {
        Self {
            avg_recovery_time_hours: 0.0,
            peak_count: 0,
            recovered_peaks: 0,
            baseline_intensity: 0.0,
            has_data: false,
        }
    }

    pub fn recovery_rate(&self) -> f64 {
        if self.peak_count == 0 {
            0.0
        } else {
            self.recovered_peaks as f64 / self.peak_count as f64
        }
    }
}

/// Mean intensity of the most recent `window_size` entries that carry one.
pub fn baseline_intensity(entries: &[ResolvedEntry], window_size: usize) -> Option<f64> {
    let recent: Vec<f64> = entries
        .iter()
        .rev()
        .filter_map(|r| r.intensity())
        .take(window_size)
        .map(f64::from)
        .collect();
    if recent.is_empty() {
        None
    } else {
        Some(mean(&recent))
    }
}

/// Hours until the peak at `peak_idx` recovers, or `None` within the horizon.
fn recovery_hours(entries: &[ResolvedEntry], peak_idx: usize, baseline: f64, cfg: &InertiaConfig) -> Option<f64> {
    let peak_at = entries[peak_idx].timestamp();
    for later in &entries[peak_idx + 1..] {
        let elapsed = hours_between(peak_at, later.timestamp());
        if elapsed > cfg.max_recovery_hours {
            return None;
        }
        if let Some(intensity) = later.intensity() {
            if f64::from(intensity) <= baseline + cfg.recovery_margin {
                return Some(elapsed);
            }
        }
    }
    None
}

/// Peak detection and recovery search over one window.
pub fn recovery_summary(window: &EntryWindow, cfg: &InertiaConfig) -> RecoverySummary {
    if window.len() < cfg.min_entries {
        return RecoverySummary::empty();
    }
    let entries = window.entries();
    let Some(baseline) = baseline_intensity(entries, cfg.baseline_window) else {
        return RecoverySummary::empty();
    };

    let mut durations = Vec::new();
    let mut recovered_peaks = 0;
    for (idx, r) in entries.iter().enumerate() {
        let is_peak = r.quadrant.is_negative()
            && r.intensity().map(|i| i >= cfg.peak_threshold).unwrap_or(false);
        if !is_peak {
            continue;
        }
        match recovery_hours(entries, idx, baseline, cfg) {
            Some(hours) => {
                recovered_peaks += 1;
                durations.push(hours);
            }
            None => durations.push(cfg.max_recovery_hours),
        }
    }

    RecoverySummary {
        avg_recovery_time_hours: mean(&durations),
        peak_count: durations.len(),
        recovered_peaks,
        baseline_intensity: baseline,
        has_data: true,
    }
}

/// "45 min" below one hour, otherwise hours with one decimal and a decimal comma.
pub fn format_recovery_time(hours: f64) -> String {
    let minutes = (hours * 60.0).round() as i64;
    if minutes < 60 {
        format!("{minutes} min")
    } else {
        format!("{:.1} h", hours).replace('.', ",")
    }
}

/// Peak-recovery inertia for `window`, compared with `previous` when given.
///
/// The previous window is summarised with `recovery_summary`, which never
/// looks further back.
pub fn compute_inertia(
    window: &EntryWindow,
    previous: Option<&EntryWindow>,
    config: &MetricsConfig,
) -> InertiaResult {
    let cfg = &config.inertia;
    let current = recovery_summary(window, cfg);

    let formatted = if !current.has_data {
        NO_DATA_LABEL.to_string()
    } else if current.peak_count == 0 {
        NO_PEAKS_LABEL.to_string()
    } else {
        format_recovery_time(current.avg_recovery_time_hours)
    };

    let trend = previous
        .map(|p| recovery_summary(p, cfg))
        .filter(|prev| prev.has_data)
        .map(|prev| InertiaTrend {
            previous_avg_hours: prev.avg_recovery_time_hours,
            difference_hours: current.avg_recovery_time_hours - prev.avg_recovery_time_hours,
            percent_change: percent_change(
                current.avg_recovery_time_hours,
                prev.avg_recovery_time_hours,
            ),
        });

    debug!(
        "[metrics::inertia] peaks={} recovered={} avg={:.2}h baseline={:.2}",
        current.peak_count,
        current.recovered_peaks,
        current.avg_recovery_time_hours,
        current.baseline_intensity,
    );

    InertiaResult {
        avg_recovery_time_hours: current.avg_recovery_time_hours,
        formatted,
        peak_count: current.peak_count,
        recovered_peaks: current.recovered_peaks,
        recovery_rate: current.recovery_rate(),
        baseline_intensity: current.baseline_intensity,
        has_data: current.has_data,
        trend,
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Crossing time
// ═════════════════════════════════════════════════════════════════════════════

/// Mean hours from a clearly negative entry to the next clearly positive one.
/// 0 when no such pair exists.
pub fn crossing_inertia_hours(window: &EntryWindow, config: &MetricsConfig) -> f64 {
    let cfg = &config.inertia;
    let entries = window.entries();
    let crossings: Vec<f64> = entries
        .iter()
        .enumerate()
        .filter(|(_, r)| r.valence() < cfg.crossing_negative_valence)
        .filter_map(|(idx, low)| {
            entries[idx + 1..]
                .iter()
                .find(|r| r.valence() > cfg.crossing_positive_valence)
                .map(|high| hours_between(low.timestamp(), high.timestamp()))
        })
        .collect();
    mean(&crossings)
}

// ═════════════════════════════════════════════════════════════════════════════
// Tests
// ═════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::types::{EmotionEntry, Quadrant};
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
    }

    fn at(hours: i64) -> DateTime<Utc> {
        start() + Duration::hours(hours)
    }

    fn win(entries: Vec<EmotionEntry>) -> EntryWindow {
        EntryWindow::new(&entries, at(24 * 30), &MetricsConfig::default()).unwrap()
    }

    fn red(hours: i64, intensity: u8) -> EmotionEntry {
        EmotionEntry::new("Ansioso", at(hours))
            .with_quadrant(Quadrant::Red)
            .with_intensity(intensity)
    }

    fn calm(hours: i64, intensity: u8) -> EmotionEntry {
        EmotionEntry::new("Tranquilo", at(hours)).with_intensity(intensity)
    }

    #[test]
    fn recovery_detected_against_baseline() {
        let out = compute_inertia(&win(vec![red(0, 9), red(5, 4)]), None, &MetricsConfig::default());
        assert_eq!(out.baseline_intensity, 6.5);
        assert_eq!(out.avg_recovery_time_hours, 5.0);
        assert_eq!(out.peak_count, 1);
        assert_eq!(out.recovered_peaks, 1);
        assert_eq!(out.recovery_rate, 1.0);
        assert_eq!(out.formatted, "5,0 h");
        assert!(out.trend.is_none());
    }

    #[test]
    fn unrecovered_peak_is_truncated_not_dropped() {
        let entries = vec![
            calm(-100, 2),
            calm(-99, 2),
            calm(-98, 2),
            calm(-97, 2),
            calm(-96, 2),
            red(0, 9),
            calm(80, 2),
        ];
        let out = compute_inertia(&win(entries), None, &MetricsConfig::default());
        assert_eq!(out.peak_count, 1);
        assert_eq!(out.recovered_peaks, 0);
        assert_eq!(out.avg_recovery_time_hours, 72.0);
        assert_eq!(out.recovery_rate, 0.0);
    }

    #[test]
    fn trailing_peak_counts_as_censored() {
        let entries = vec![calm(0, 2), calm(1, 3), red(2, 5), red(3, 4), red(4, 9)];
        let out = compute_inertia(&win(entries), None, &MetricsConfig::default());
        assert_eq!(out.peak_count, 1);
        assert_eq!(out.avg_recovery_time_hours, 72.0);
    }

    #[test]
    fn fewer_than_two_entries_is_no_data() {
        let cfg = MetricsConfig::default();
        let out = compute_inertia(&win(vec![red(0, 9)]), None, &cfg);
        assert!(!out.has_data);
        assert_eq!(out.formatted, "Sin datos");
        assert_eq!(out.avg_recovery_time_hours, 0.0);
        assert_eq!(out.peak_count, 0);
        let out = compute_inertia(&EntryWindow::empty(at(0)), None, &cfg);
        assert_eq!(out.formatted, "Sin datos");
    }

    #[test]
    fn window_without_peaks_is_labelled() {
        let out = compute_inertia(&win(vec![calm(0, 3), calm(2, 4)]), None, &MetricsConfig::default());
        assert!(out.has_data);
        assert_eq!(out.peak_count, 0);
        assert_eq!(out.formatted, "Sin picos");
    }

    #[test]
    fn short_recoveries_format_as_minutes() {
        let entries = vec![
            red(0, 9),
            EmotionEntry::new("Tranquilo", at(0) + Duration::minutes(45)).with_intensity(3),
        ];
        let out = compute_inertia(&win(entries), None, &MetricsConfig::default());
        assert_eq!(out.avg_recovery_time_hours, 0.75);
        assert_eq!(out.formatted, "45 min");
    }

    #[test]
    fn trend_compares_against_previous_window() {
        let cfg = MetricsConfig::default();
        let current = win(vec![red(0, 9), red(5, 4)]);
        let previous = win(vec![red(-200, 9), red(-190, 4)]);
        let out = compute_inertia(&current, Some(&previous), &cfg);
        let trend = out.trend.expect("trend present");
        assert_eq!(trend.previous_avg_hours, 10.0);
        assert_eq!(trend.difference_hours, -5.0);
        assert!((trend.percent_change + 50.0).abs() < 1e-9);
    }

    #[test]
    fn trend_against_previous_window_without_peaks() {
        let cfg = MetricsConfig::default();
        let current = win(vec![red(0, 9), red(5, 4)]);
        let previous = win(vec![calm(-200, 3), calm(-190, 3)]);
        let out = compute_inertia(&current, Some(&previous), &cfg);
        let trend = out.trend.expect("previous window had data");
        assert_eq!(trend.previous_avg_hours, 0.0);
        assert_eq!(trend.difference_hours, 5.0);
        assert!(trend.percent_change.is_finite() && trend.percent_change > 0.0);
    }

    #[test]
    fn previous_window_without_data_has_no_trend() {
        let cfg = MetricsConfig::default();
        let current = win(vec![red(0, 9), red(5, 4)]);
        let out = compute_inertia(&current, Some(&EntryWindow::empty(at(0))), &cfg);
        assert!(out.trend.is_none());
    }

    #[test]
    fn minutes_switch_to_hours_after_rounding() {
        assert_eq!(format_recovery_time(0.5), "30 min");
        assert_eq!(format_recovery_time(0.9999), "1,0 h");
        assert_eq!(format_recovery_time(59.4 / 60.0), "59 min");
    }

    #[test]
    fn baseline_uses_most_recent_entries() {
        let w = win((0..40).map(|h| calm(h, if h < 10 { 10 } else { 2 })).collect());
        assert_eq!(baseline_intensity(w.entries(), 30), Some(2.0));
    }

    #[test]
    fn crossing_time_pairs_negative_with_next_positive() {
        let entries = vec![
            EmotionEntry::new("Triste", at(0)),
            EmotionEntry::new("Ansioso", at(2)),
            EmotionEntry::new("Reflexivo", at(3)),
            EmotionEntry::new("Feliz", at(6)),
        ];
        // Triste → Feliz = 6h, Ansioso → Feliz = 4h. Reflexivo (0.25) is not positive enough.
        let hours = crossing_inertia_hours(&win(entries), &MetricsConfig::default());
        assert!((hours - 5.0).abs() < 1e-9, "hours={hours}");
    }

    #[test]
    fn crossing_time_is_zero_without_recovery() {
        let entries = vec![
            EmotionEntry::new("Triste", at(0)),
            EmotionEntry::new("Ansioso", at(2)),
        ];
        assert_eq!(crossing_inertia_hours(&win(entries), &MetricsConfig::default()), 0.0);
    }

    #[test]
    fn two_inertia_measures_may_disagree() {
        // Recovery by intensity without any positive entry afterwards.
        let w = win(vec![red(0, 9), red(5, 4)]);
        let cfg = MetricsConfig::default();
        assert_eq!(compute_inertia(&w, None, &cfg).avg_recovery_time_hours, 5.0);
        assert_eq!(crossing_inertia_hours(&w, &cfg), 0.0);
    }
}
