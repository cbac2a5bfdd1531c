// Text and JSON rendering for CLI results.

use sentir::{
    AnalyticsPayload, AwarenessResult, DeamScore, EmotionalStateOutcome, GranularityResult,
    InertiaResult, MetricsResult, TrendDirection,
};
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> MetricsResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// JSON when requested, otherwise the human renderer.
pub fn emit<T: Serialize>(json: bool, value: &T, human: fn(&T)) -> MetricsResult<()> {
    if json {
        print_json(value)
    } else {
        human(value);
        Ok(())
    }
}

fn arrow(trend: TrendDirection) -> &'static str {
    match trend {
        TrendDirection::Up => "↑",
        TrendDirection::Down => "↓",
        TrendDirection::Stable => "→",
    }
}

pub fn state(outcome: &EmotionalStateOutcome) {
    match outcome {
        EmotionalStateOutcome::Classified(s) => {
            println!("Estado: {} ({})", s.label, s.period_label);
            println!("  {}", s.description);
            println!(
                "  valencia {:+.2} · activación {:+.2} · estabilidad {:.2} · {} registros",
                s.valence_mean, s.arousal_mean, s.stability, s.entry_count
            );
        }
        EmotionalStateOutcome::InsufficientData {
            entry_count,
            message,
            ..
        } => println!("Estado: {message} ({entry_count} registros)"),
    }
}

pub fn deam(d: &DeamScore) {
    let note = if d.has_enough_data { "" } else { " (datos insuficientes)" };
    println!("DEAM EQ: {}{} · anterior {} · Δ {:+}", d.score, note, d.previous_score, d.delta);
    let s = &d.submetrics;
    println!(
        "  G {:.2} · P {:.2} · C {:.2} · A {:.2} · Ie {:.2}",
        s.granularity, s.perception, s.context, s.adaptability, s.inertia
    );
}

pub fn granularity(g: &GranularityResult) {
    println!(
        "Granularidad: {} {} ({:+.1}%) · {} emociones distintas",
        g.score,
        arrow(g.trend),
        g.trend_percent,
        g.distinct_emotions
    );
    if !g.top_emotions.is_empty() {
        let top: Vec<String> = g
            .top_emotions
            .iter()
            .map(|c| format!("{} ×{}", c.emotion, c.count))
            .collect();
        println!("  Más frecuentes: {}", top.join(", "));
    }
    if !g.new_emotions.is_empty() {
        let new: Vec<&str> = g.new_emotions.iter().map(|c| c.emotion.as_str()).collect();
        println!("  Nuevas: {}", new.join(", "));
    }
}

pub fn awareness(a: &AwarenessResult) {
    println!("Conciencia emocional: {} {} (Δ {:+})", a.score, arrow(a.trend), a.delta);
    let b = &a.averages;
    println!(
        "  contexto {:.0} · cuerpo {:.0} · tiempo {:.0} · meta {:.0} · elaboración {:.0}",
        b.contextual, b.bodily, b.temporal, b.meta, b.elaborative
    );
    for insight in &a.insights {
        println!("  • {}", insight.message);
    }
}

pub fn inertia(i: &InertiaResult) {
    println!(
        "Inercia: {} · {} picos, {} recuperados",
        i.formatted, i.peak_count, i.recovered_peaks
    );
    if let Some(t) = &i.trend {
        println!(
            "  anterior {:.1} h · diferencia {:+.1} h ({:+.0}%)",
            t.previous_avg_hours, t.difference_hours, t.percent_change
        );
    }
}

pub fn panel(p: &AnalyticsPayload) {
    println!(
        "── {} · {} registros (anterior {}) ──",
        p.period_label, p.entry_count, p.previous_entry_count
    );
    state(&p.state);
    deam(&p.deam);
    granularity(&p.granularity);
    awareness(&p.awareness);
    inertia(&p.inertia);
    let shares: Vec<String> = p
        .quadrants
        .iter()
        .map(|q| format!("{} {:.0}%", q.quadrant, q.share * 100.0))
        .collect();
    println!("Cuadrantes: {}", shares.join(" · "));
    for effect in &p.interventions.effects {
        println!(
            "  {}: {} usos, reducción media {:+.1}",
            effect.intervention, effect.uses, effect.mean_reduction
        );
    }
}
