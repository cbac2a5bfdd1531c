// End-to-end checks: repository → windows → every scorer → payload.

use chrono::{DateTime, Duration, TimeZone, Utc};
use sentir::engine::window::split_periods;
use sentir::{
    axes_of, classify_emotional_state, compute_deam_score, compute_emotional_awareness,
    compute_granularity, compute_inertia, panel_from_history, AnalyticsService, BodyLocation,
    CertaintyBucket, EmotionEntry, EmotionalStateOutcome, EntryRepository, EntryWindow,
    FirstDescription, InMemoryEntryStore, MetricsConfig, Period, Quadrant, StateCategory,
    TimeReference, TrendDirection,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap()
}

fn ago(hours: i64) -> DateTime<Utc> {
    now() - Duration::hours(hours)
}

/// A realistic fortnight: an anxious stretch last week, calmer this week.
fn fortnight() -> Vec<EmotionEntry> {
    vec![
        // previous week
        EmotionEntry::new("Ansioso", ago(24 * 12)).with_intensity(8),
        EmotionEntry::new("Ansioso", ago(24 * 12 - 3)).with_intensity(8),
        EmotionEntry::new("Estresado", ago(24 * 11)).with_intensity(7),
        EmotionEntry::new("Triste", ago(24 * 10)).with_intensity(6),
        // current week
        EmotionEntry::new("Ansioso", ago(100))
            .with_intensity(9)
            .with_intervention("respiración", 5)
            .with_body(&[BodyLocation::Chest, BodyLocation::Stomach])
            .with_certainty(CertaintyBucket::SeventyToHundred)
            .with_time_reference(TimeReference::JustNow)
            .with_notes("Presentación delante de todo el equipo mañana"),
        EmotionEntry::new("Tranquilo", ago(95)).with_intensity(3).with_activity("paseo"),
        EmotionEntry::new("Agradecido", ago(60)).with_intensity(4).with_company("familia"),
        EmotionEntry::new("Feliz", ago(30)).with_intensity(5),
        EmotionEntry::new("Relajado", ago(6))
            .with_intensity(2)
            .with_certainty(CertaintyBucket::FiftyToSeventy),
    ]
}

fn service() -> AnalyticsService<InMemoryEntryStore> {
    let store = InMemoryEntryStore::with_entries(fortnight()).unwrap();
    AnalyticsService::new(store, MetricsConfig::default()).unwrap()
}

#[test]
fn full_panel_over_a_repository() {
    let panel = service().compute_panel(Period::Week, now()).unwrap();

    assert_eq!(panel.entry_count, 5);
    assert_eq!(panel.previous_entry_count, 4);
    assert_eq!(panel.period_label, "Última semana");
    assert_eq!(panel.generated_at, now());

    let state = panel.state.state().expect("five entries classify");
    assert_eq!(state.category, StateCategory::Calm);
    assert!((0.0..=1.0).contains(&state.stability));

    assert!(panel.deam.has_enough_data);
    assert!(panel.deam.score <= 100);
    assert_eq!(panel.deam.delta, panel.deam.score as i32 - panel.deam.previous_score as i32);

    assert!(panel.granularity.score <= 100);
    assert_eq!(panel.granularity.distinct_emotions, 5);

    assert!(panel.awareness.has_data);
    assert!(panel.awareness.score <= 100);

    assert_eq!(panel.inertia.peak_count, 1);
    assert_eq!(panel.inertia.recovered_peaks, 1);
    assert_eq!(panel.inertia.avg_recovery_time_hours, 5.0);
    assert_eq!(panel.inertia.formatted, "5,0 h");
    // Previous week: three red peaks averaging 16h to settle.
    let trend = panel.inertia.trend.expect("previous week had peaks");
    assert_eq!(trend.previous_avg_hours, 16.0);
    assert_eq!(trend.difference_hours, -11.0);

    // Ansioso → Tranquilo, 5h later.
    assert!((panel.crossing_inertia_hours - 5.0).abs() < 1e-9);

    assert_eq!(panel.interventions.total_paired, 1);
    assert_eq!(panel.interventions.effects[0].mean_reduction, 4.0);

    let shares: f64 = panel.quadrants.iter().map(|q| q.share).sum();
    assert!((shares - 1.0).abs() < 1e-9);
}

#[test]
fn panel_is_deterministic_and_idempotent() {
    let svc = service();
    let first = svc.compute_panel(Period::Week, now()).unwrap();
    let second = svc.compute_panel(Period::Week, now()).unwrap();
    assert_eq!(first, second);

    let json_a = serde_json::to_string(&first).unwrap();
    let json_b = serde_json::to_string(&second).unwrap();
    assert_eq!(json_a, json_b);
}

#[test]
fn input_order_does_not_change_results() {
    let cfg = MetricsConfig::default();
    let mut reversed = fortnight();
    reversed.reverse();
    let a = panel_from_history(&fortnight(), Period::Week, now(), &cfg).unwrap();
    let b = panel_from_history(&reversed, Period::Week, now(), &cfg).unwrap();
    assert_eq!(a, b);
}

#[test]
fn scorers_do_not_mutate_entries() {
    let cfg = MetricsConfig::default();
    let entries = fortnight();
    let snapshot = entries.clone();
    let window = EntryWindow::new(&entries, now(), &cfg).unwrap();
    let copy = window.clone();
    let empty = EntryWindow::empty(now());
    let _ = compute_deam_score(&window, &empty, Period::Fortnight, &cfg);
    let _ = compute_granularity(&window, &empty, &cfg);
    let _ = compute_emotional_awareness(&window, &empty, &cfg);
    let _ = compute_inertia(&window, None, &cfg);
    assert_eq!(window, copy);
    assert_eq!(entries, snapshot);
}

#[test]
fn empty_history_produces_modeled_outcomes() {
    let svc = AnalyticsService::new(InMemoryEntryStore::new(), MetricsConfig::default()).unwrap();
    let panel = svc.compute_panel(Period::Month, now()).unwrap();
    assert!(matches!(
        panel.state,
        EmotionalStateOutcome::InsufficientData { entry_count: 0, required: 3, .. }
    ));
    assert_eq!(panel.deam.score, 0);
    assert_eq!(panel.deam.submetrics.adaptability, 0.5);
    assert_eq!(panel.deam.submetrics.inertia, 0.5);
    assert_eq!(panel.granularity.score, 0);
    assert_eq!(panel.granularity.trend, TrendDirection::Stable);
    assert!(!panel.awareness.has_data);
    assert_eq!(panel.inertia.formatted, "Sin datos");
    assert_eq!(panel.crossing_inertia_hours, 0.0);
    assert!(panel.interventions.effects.is_empty());
}

#[test]
fn appended_entries_flow_into_the_next_panel() {
    let svc = service();
    let before = svc.compute_panel(Period::Week, now()).unwrap();
    let id = svc
        .repository()
        .append_entry(EmotionEntry {
            intervention: Some("caminar".into()),
            ..EmotionEntry::new("Frustrado", ago(2)).with_intensity(8)
        })
        .unwrap();
    svc.repository().record_intensity_after(&id, 4).unwrap();
    let after = svc.compute_panel(Period::Week, now()).unwrap();
    assert_eq!(after.entry_count, before.entry_count + 1);
    assert_eq!(after.interventions.total_paired, before.interventions.total_paired + 1);
}

#[test]
fn split_periods_matches_repository_ranges() {
    let (current, previous) = split_periods(&fortnight(), now(), Period::Week);
    let store = InMemoryEntryStore::with_entries(fortnight()).unwrap();
    let fetched = store
        .fetch_entries(&sentir::TimeRange::current(Period::Week, now()))
        .unwrap();
    assert_eq!(current.len(), fetched.len());
    assert_eq!(previous.len(), 4);
}

#[test]
fn state_outcome_serializes_with_status_tag() {
    let cfg = MetricsConfig::default();
    let window = EntryWindow::new(&fortnight()[..2], now(), &cfg).unwrap();
    let outcome = classify_emotional_state(&window, Period::Week, &cfg, &FirstDescription);
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["status"], "insufficient_data");
    assert_eq!(json["required"], 3);
}

#[test]
fn axis_lookup_is_total() {
    let a = axes_of("Feliz");
    assert!(a.valence > 0.0 && a.arousal > 0.0);
    let unknown = axes_of("NoEsUnaEmoción");
    assert_eq!((unknown.valence, unknown.arousal), (0.0, 0.0));
    assert_eq!(sentir::engine::axes::family_of("triste"), Some(Quadrant::Blue));
}

#[test]
fn config_round_trips_through_toml() {
    let cfg = MetricsConfig::default();
    let raw = cfg.to_toml_string().unwrap();
    let back = MetricsConfig::from_toml_str(&raw).unwrap();
    assert_eq!(back, cfg);
}
