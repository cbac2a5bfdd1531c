// ── Engine: Emotion-Axis Lookup ─────────────────────────────────────────────
//
// Maps an emotion label to its (valence, arousal) coordinates.
// 100 labels, 25 per affective family. Lookup is case-insensitive on the
// trimmed label; unknown labels resolve to the neutral origin.
//
// Pure table lookup, no allocation beyond the lowercase key.

use crate::atoms::types::{Axes, Quadrant};

/// (label, valence, arousal, family)
type AxisRow = (&'static str, f64, f64, Quadrant);

use crate::atoms::types::Quadrant::{Blue, Green, Red, Yellow};

// ═════════════════════════════════════════════════════════════════════════════
// Emotion table
// ═════════════════════════════════════════════════════════════════════════════

const EMOTION_AXES: &[AxisRow] = &[
    // ── Green: pleasant, calm ────────────────────────────────────
    ("Tranquilo", 0.55, -0.60, Green),
    ("Relajado", 0.60, -0.70, Green),
    ("Sereno", 0.55, -0.65, Green),
    ("En paz", 0.65, -0.70, Green),
    ("Satisfecho", 0.70, -0.30, Green),
    ("Agradecido", 0.75, -0.25, Green),
    ("Contento", 0.70, -0.20, Green),
    ("Cómodo", 0.50, -0.50, Green),
    ("Descansado", 0.45, -0.75, Green),
    ("Seguro", 0.55, -0.25, Green),
    ("Equilibrado", 0.50, -0.45, Green),
    ("Aliviado", 0.60, -0.55, Green),
    ("Realizado", 0.75, -0.20, Green),
    ("Conectado", 0.65, -0.20, Green),
    ("Pleno", 0.80, -0.30, Green),
    ("Bendecido", 0.80, -0.35, Green),
    ("Compasivo", 0.55, -0.30, Green),
    ("Reflexivo", 0.25, -0.50, Green),
    ("Despreocupado", 0.50, -0.60, Green),
    ("Apacible", 0.50, -0.70, Green),
    ("Cariñoso", 0.70, -0.20, Green),
    ("Calmado", 0.45, -0.70, Green),
    ("Sosegado", 0.45, -0.75, Green),
    ("Complacido", 0.60, -0.30, Green),
    ("Centrado", 0.45, -0.40, Green),
    // ── Yellow: pleasant, activated ──────────────────────────────
    ("Feliz", 0.85, 0.45, Yellow),
    ("Alegre", 0.80, 0.50, Yellow),
    ("Emocionado", 0.75, 0.80, Yellow),
    ("Entusiasmado", 0.80, 0.75, Yellow),
    ("Motivado", 0.70, 0.60, Yellow),
    ("Inspirado", 0.75, 0.55, Yellow),
    ("Optimista", 0.70, 0.35, Yellow),
    ("Orgulloso", 0.75, 0.45, Yellow),
    ("Eufórico", 0.90, 0.90, Yellow),
    ("Energético", 0.60, 0.80, Yellow),
    ("Animado", 0.70, 0.55, Yellow),
    ("Juguetón", 0.65, 0.60, Yellow),
    ("Esperanzado", 0.60, 0.25, Yellow),
    ("Sorprendido", 0.35, 0.80, Yellow),
    ("Curioso", 0.45, 0.50, Yellow),
    ("Enfocado", 0.40, 0.40, Yellow),
    ("Divertido", 0.75, 0.60, Yellow),
    ("Exaltado", 0.65, 0.85, Yellow),
    ("Encantado", 0.85, 0.50, Yellow),
    ("Productivo", 0.55, 0.45, Yellow),
    ("Confiado", 0.60, 0.30, Yellow),
    ("Extasiado", 0.90, 0.85, Yellow),
    ("Festivo", 0.80, 0.70, Yellow),
    ("Vivaz", 0.70, 0.70, Yellow),
    ("Asombrado", 0.50, 0.75, Yellow),
    // ── Red: unpleasant, activated ───────────────────────────────
    ("Ansioso", -0.60, 0.75, Red),
    ("Enojado", -0.70, 0.80, Red),
    ("Estresado", -0.65, 0.70, Red),
    ("Frustrado", -0.65, 0.55, Red),
    ("Nervioso", -0.50, 0.70, Red),
    ("Preocupado", -0.55, 0.50, Red),
    ("Irritado", -0.60, 0.60, Red),
    ("Furioso", -0.85, 0.90, Red),
    ("Asustado", -0.70, 0.80, Red),
    ("Tenso", -0.50, 0.60, Red),
    ("Agobiado", -0.70, 0.65, Red),
    ("Inquieto", -0.40, 0.60, Red),
    ("Celoso", -0.60, 0.50, Red),
    ("Abrumado", -0.75, 0.70, Red),
    ("Molesto", -0.55, 0.45, Red),
    ("Alarmado", -0.60, 0.85, Red),
    ("Impaciente", -0.45, 0.55, Red),
    ("Avergonzado", -0.65, 0.40, Red),
    ("Indignado", -0.70, 0.70, Red),
    ("Aterrado", -0.90, 0.95, Red),
    ("Resentido", -0.70, 0.35, Red),
    ("Disgustado", -0.65, 0.40, Red),
    ("Presionado", -0.55, 0.65, Red),
    ("Conmocionado", -0.60, 0.85, Red),
    ("Rabioso", -0.90, 0.90, Red),
    // ── Blue: unpleasant, deactivated ────────────────────────────
    ("Triste", -0.70, -0.45, Blue),
    ("Cansado", -0.35, -0.75, Blue),
    ("Aburrido", -0.40, -0.60, Blue),
    ("Desanimado", -0.60, -0.50, Blue),
    ("Solo", -0.65, -0.40, Blue),
    ("Deprimido", -0.85, -0.65, Blue),
    ("Agotado", -0.55, -0.85, Blue),
    ("Decepcionado", -0.65, -0.30, Blue),
    ("Melancólico", -0.50, -0.45, Blue),
    ("Apático", -0.40, -0.70, Blue),
    ("Desesperanzado", -0.85, -0.55, Blue),
    ("Vacío", -0.70, -0.70, Blue),
    ("Culpable", -0.65, -0.20, Blue),
    ("Nostálgico", -0.30, -0.35, Blue),
    ("Herido", -0.70, -0.25, Blue),
    ("Desmotivado", -0.55, -0.60, Blue),
    ("Excluido", -0.65, -0.30, Blue),
    ("Desolado", -0.85, -0.50, Blue),
    ("Abatido", -0.75, -0.60, Blue),
    ("Indiferente", -0.25, -0.55, Blue),
    ("Rechazado", -0.75, -0.25, Blue),
    ("Incomprendido", -0.60, -0.25, Blue),
    ("Vulnerable", -0.50, -0.30, Blue),
    ("Exhausto", -0.60, -0.90, Blue),
    ("Perdido", -0.55, -0.35, Blue),
];

// ═════════════════════════════════════════════════════════════════════════════
// Lookup
// ═════════════════════════════════════════════════════════════════════════════

fn find(label: &str) -> Option<&'static AxisRow> {
    let key = label.trim().to_lowercase();
    if key.is_empty() {
        return None;
    }
    EMOTION_AXES
        .iter()
        .find(|(name, _, _, _)| name.to_lowercase() == key)
}

/// Valence/arousal for a label; neutral `{0, 0}` when the label is unknown.
pub fn axes_of(label: &str) -> Axes {
    find(label)
        .map(|(_, valence, arousal, _)| Axes::new(*valence, *arousal))
        .unwrap_or(Axes::NEUTRAL)
}

/// The family a known label belongs to.
pub fn family_of(label: &str) -> Option<Quadrant> {
    find(label).map(|(_, _, _, family)| *family)
}

pub fn is_known(label: &str) -> bool {
    find(label).is_some()
}

/// Table spelling for a known label, else the trimmed input.
pub fn canonical_label(label: &str) -> String {
    match find(label) {
        Some((name, _, _, _)) => (*name).to_string(),
        None => label.trim().to_string(),
    }
}

/// All labels in table order.
pub fn known_labels() -> impl Iterator<Item = &'static str> {
    EMOTION_AXES.iter().map(|(name, _, _, _)| *name)
}

/// Labels of one family in table order.
pub fn labels_in(family: Quadrant) -> impl Iterator<Item = &'static str> {
    EMOTION_AXES
        .iter()
        .filter(move |(_, _, _, f)| *f == family)
        .map(|(name, _, _, _)| *name)
}

// ═════════════════════════════════════════════════════════════════════════════
// Tests
// ═════════════════════════════════════════════════════════════════════════════
