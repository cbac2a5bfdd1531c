// ── Engine: Intervention Effectiveness ──────────────────────────────────────
// Per-technique aggregation of before/after intensity pairs. Entries that
// name a technique but never recorded the "after" side still count as uses.

use crate::atoms::metric_types::{InterventionEffect, InterventionSummary};
use crate::engine::trend::mean;
use crate::engine::window::EntryWindow;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Default)]
struct Tally {
    uses: usize,
    reductions: Vec<f64>,
}

/// Effects sorted by mean reduction (largest first), then by name.
pub fn compute_intervention_effects(window: &EntryWindow) -> InterventionSummary {
    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();
    let mut all = Vec::new();

    for r in window.iter() {
        let Some(name) = r.entry.intervention.as_deref().map(str::trim) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let tally = tallies.entry(name.to_string()).or_default();
        tally.uses += 1;
        if let Some((before, after)) = r.entry.paired_intensity() {
            let reduction = f64::from(before) - f64::from(after);
            tally.reductions.push(reduction);
            all.push(reduction);
        }
    }

    let mut effects: Vec<InterventionEffect> = tallies
        .into_iter()
        .map(|(intervention, tally)| {
            let paired = tally.reductions.len();
            let improved = tally.reductions.iter().filter(|d| **d > 0.0).count();
            InterventionEffect {
                intervention,
                uses: tally.uses,
                paired,
                mean_reduction: mean(&tally.reductions),
                improvement_rate: if paired == 0 {
                    0.0
                } else {
                    improved as f64 / paired as f64
                },
            }
        })
        .collect();
    effects.sort_by(|a, b| {
        b.mean_reduction
            .partial_cmp(&a.mean_reduction)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.intervention.cmp(&b.intervention))
    });

    InterventionSummary {
        effects,
        total_paired: all.len(),
        overall_mean_reduction: mean(&all),
    }
}
