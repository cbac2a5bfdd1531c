// ── Sentir: Analytics Panel ─────────────────────────────────────────────────
//
// Assembles every metric for one period into a single `AnalyticsPayload`.
//
//   current  = (now − period, now]
//   previous = (now − 2·period, now − period]
//
// Both windows are built once and handed to each scorer. The scorers share no
// state, so the order they run in does not matter.

use crate::atoms::config::MetricsConfig;
use crate::atoms::error::MetricsResult;
use crate::atoms::metric_types::AnalyticsPayload;
use crate::atoms::types::{EmotionEntry, Period, TimeRange};
use crate::engine::awareness::compute_emotional_awareness;
use crate::engine::deam::compute_deam_score;
use crate::engine::granularity::compute_granularity;
use crate::engine::inertia::{compute_inertia, crossing_inertia_hours};
use crate::engine::interventions::compute_intervention_effects;
use crate::engine::state::{classify_emotional_state, DescriptionSelector, FirstDescription};
use crate::engine::window::{quadrant_distribution, split_periods, EntryWindow};
use crate::store::EntryRepository;
use chrono::{DateTime, Utc};
use log::info;

/// Run every scorer over an already-built pair of windows.
pub fn build_payload(
    current: &EntryWindow,
    previous: &EntryWindow,
    period: Period,
    config: &MetricsConfig,
    selector: &dyn DescriptionSelector,
) -> AnalyticsPayload {
    AnalyticsPayload {
        period,
        period_label: period.label(),
        generated_at: current.now(),
        entry_count: current.len(),
        previous_entry_count: previous.len(),
        state: classify_emotional_state(current, period, config, selector),
        deam: compute_deam_score(current, previous, period, config),
        granularity: compute_granularity(current, previous, config),
        awareness: compute_emotional_awareness(current, previous, config),
        inertia: compute_inertia(current, Some(previous), config),
        crossing_inertia_hours: crossing_inertia_hours(current, config),
        interventions: compute_intervention_effects(current),
        quadrants: quadrant_distribution(current),
    }
}

/// Panel over an in-memory history, without a repository.
pub fn panel_from_history(
    history: &[EmotionEntry],
    period: Period,
    now: DateTime<Utc>,
    config: &MetricsConfig,
) -> MetricsResult<AnalyticsPayload> {
    let (current, previous) = split_periods(history, now, period);
    let current = EntryWindow::new(&current, now, config)?;
    let previous = EntryWindow::new(&previous, now, config)?;
    Ok(build_payload(&current, &previous, period, config, &FirstDescription))
}

// ═════════════════════════════════════════════════════════════════════════════
// Service
// ═════════════════════════════════════════════════════════════════════════════

/// Repository-backed analytics with a fixed configuration.
pub struct AnalyticsService<R: EntryRepository> {
    repository: R,
    config: MetricsConfig,
    selector: Box<dyn DescriptionSelector + Send + Sync>,
}

impl<R: EntryRepository> AnalyticsService<R> {
    /// Fails when `config` does not validate.
    pub fn new(repository: R, config: MetricsConfig) -> MetricsResult<Self> {
        config.validate()?;
        Ok(Self {
            repository,
            config,
            selector: Box::new(FirstDescription),
        })
    }

    /// Replace the description selector used for the state summary.
    pub fn with_selector(mut self, selector: impl DescriptionSelector + Send + Sync + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Both windows for `period` ending at `now`.
    pub fn load_windows(&self, period: Period, now: DateTime<Utc>) -> MetricsResult<(EntryWindow, EntryWindow)> {
        let current = self
            .repository
            .fetch_entries(&TimeRange::current(period, now))?;
        let previous = self
            .repository
            .fetch_entries(&TimeRange::previous(period, now))?;
        Ok((
            EntryWindow::new(&current, now, &self.config)?,
            EntryWindow::new(&previous, now, &self.config)?,
        ))
    }

    pub fn compute_panel(&self, period: Period, now: DateTime<Utc>) -> MetricsResult<AnalyticsPayload> {
        let (current, previous) = self.load_windows(period, now)?;
        info!(
            "[analytics] {} → {} current / {} previous entries",
            period.label(),
            current.len(),
            previous.len()
        );
        Ok(build_payload(
            &current,
            &previous,
            period,
            &self.config,
            self.selector.as_ref(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::config::DeamConfig;
    use crate::atoms::error::MetricsError;
    use crate::store::InMemoryEntryStore;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap()
    }

    fn history() -> Vec<EmotionEntry> {
        vec![
            EmotionEntry::new("Ansioso", now() - Duration::hours(30)).with_intensity(8),
            EmotionEntry::new("Tranquilo", now() - Duration::hours(26)).with_intensity(3),
            EmotionEntry::new("Feliz", now() - Duration::hours(5)).with_activity("paseo"),
            EmotionEntry::new("Triste", now() - Duration::days(9)),
        ]
    }

    #[test]
    fn service_matches_in_memory_panel() {
        let store = InMemoryEntryStore::with_entries(history()).unwrap();
        let service = AnalyticsService::new(store, MetricsConfig::default()).unwrap();
        let from_service = service.compute_panel(Period::Week, now()).unwrap();
        let from_history = panel_from_history(&history(), Period::Week, now(), &MetricsConfig::default()).unwrap();
        assert_eq!(from_service, from_history);
        assert_eq!(from_service.entry_count, 3);
        assert_eq!(from_service.previous_entry_count, 1);
        assert_eq!(from_service.inertia.peak_count, 1);
        assert!(from_service.state.has_enough_data());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = MetricsConfig {
            deam: DeamConfig {
                weight_context: 0.9,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = AnalyticsService::new(InMemoryEntryStore::new(), config).err();
        assert!(matches!(err, Some(MetricsError::Config(_))));
    }
}
