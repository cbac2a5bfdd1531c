// ── Sentir Atoms: Check-in Data Types ─────────────────────────────────────────
// Plain struct/enum definitions for emotional check-ins.
// Atoms layer rule: no I/O, no side effects, no imports from engine/.
//
// Optional metadata is modeled as closed enums with an explicit `Unset`
// variant so the scorers can match exhaustively instead of sniffing strings.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 1: Affective families
// ═══════════════════════════════════════════════════════════════════════════

/// Coarse affective family formed by the signs of valence × arousal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    /// Pleasant, deactivated (calm).
    Green,
    /// Pleasant, activated (energetic).
    Yellow,
    /// Unpleasant, activated (tense).
    Red,
    /// Unpleasant, deactivated (low mood).
    Blue,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::Green,
        Quadrant::Yellow,
        Quadrant::Red,
        Quadrant::Blue,
    ];

    /// Red and blue are the negative-valence families.
    pub fn is_negative(&self) -> bool {
        matches!(self, Quadrant::Red | Quadrant::Blue)
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quadrant::Green => write!(f, "green"),
            Quadrant::Yellow => write!(f, "yellow"),
            Quadrant::Red => write!(f, "red"),
            Quadrant::Blue => write!(f, "blue"),
        }
    }
}

/// A (valence, arousal) pair, both in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub valence: f64,
    pub arousal: f64,
}

impl Axes {
    pub const NEUTRAL: Axes = Axes {
        valence: 0.0,
        arousal: 0.0,
    };

    pub const fn new(valence: f64, arousal: f64) -> Self {
        Self { valence, arousal }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 2: Optional check-in metadata
// ═══════════════════════════════════════════════════════════════════════════

/// Where in the body a feeling was noticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyLocation {
    Head,
    Jaw,
    Throat,
    Neck,
    Shoulders,
    Chest,
    Stomach,
    Back,
    Arms,
    Hands,
    Legs,
    WholeBody,
}

/// When the event behind the emotion happened, relative to the check-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeReference {
    JustNow,
    /// One to two hours ago.
    FewHoursAgo,
    /// Within the last 24 hours.
    WithinDay,
    /// Three or more days ago.
    FewDaysAgo,
    /// More than a month ago.
    OverMonthAgo,
    /// Anticipated; hasn't happened yet.
    NotYetHappened,
    #[default]
    Unset,
}

/// How sure the user is about the emotion they named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertaintyBucket {
    /// 0–5%
    ZeroToFive,
    /// 5–20%
    FiveToTwenty,
    /// 20–50%
    TwentyToFifty,
    /// 50–70%
    FiftyToSeventy,
    /// 70–100%
    SeventyToHundred,
    DontKnow,
    #[default]
    Unset,
}

/// Scale an intensity value was captured on. The engine works on `Ten`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityScale {
    /// 0–10
    #[default]
    Ten,
    /// 0–100
    Hundred,
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 3: EmotionEntry
// ═══════════════════════════════════════════════════════════════════════════

/// One emotional check-in. Treated as an immutable fact by every scorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionEntry {
    /// Repository-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// When the check-in was recorded.
    pub timestamp: DateTime<Utc>,
    /// Emotion label, e.g. "Ansioso".
    pub emotion: String,
    /// Stored family; re-derived from the axes when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quadrant: Option<Quadrant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arousal: Option<f64>,
    /// Intensity at logging time, 0–10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity_before: Option<u8>,
    /// Intensity after an intervention, 0–10. Requires `intensity_before`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity_after: Option<u8>,
    /// Self-reported confidence in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context_tags: Vec<String>,
    /// Activity tag or custom activity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    /// Company tag or custom company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body_signals: Vec<BodyLocation>,
    #[serde(default)]
    pub time_reference: TimeReference,
    #[serde(default)]
    pub certainty: CertaintyBucket,
    /// Coping technique applied, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intervention: Option<String>,
}

impl EmotionEntry {
    pub fn new(emotion: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            emotion: emotion.into(),
            timestamp,
            ..Default::default()
        }
    }

    pub fn with_intensity(mut self, before: u8) -> Self {
        self.intensity_before = Some(before);
        self
    }

    pub fn with_intervention(mut self, technique: impl Into<String>, after: u8) -> Self {
        self.intervention = Some(technique.into());
        self.intensity_after = Some(after);
        self
    }

    pub fn with_quadrant(mut self, quadrant: Quadrant) -> Self {
        self.quadrant = Some(quadrant);
        self
    }

    pub fn with_axes(mut self, valence: f64, arousal: f64) -> Self {
        self.valence = Some(valence);
        self.arousal = Some(arousal);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
        self.activity = Some(activity.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.context_tags.push(tag.into());
        self
    }

    pub fn with_body(mut self, locations: &[BodyLocation]) -> Self {
        self.body_signals.extend_from_slice(locations);
        self
    }

    pub fn with_time_reference(mut self, reference: TimeReference) -> Self {
        self.time_reference = reference;
        self
    }

    pub fn with_certainty(mut self, certainty: CertaintyBucket) -> Self {
        self.certainty = certainty;
        self
    }

    /// Non-blank free text, trimmed.
    pub fn notes_text(&self) -> Option<&str> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn has_activity(&self) -> bool {
        non_blank(self.activity.as_deref())
    }

    pub fn has_company(&self) -> bool {
        non_blank(self.company.as_deref())
    }

    /// Any situational metadata attached (tags, activity or company).
    pub fn has_context(&self) -> bool {
        self.context_tags.iter().any(|t| !t.trim().is_empty())
            || self.has_activity()
            || self.has_company()
    }

    /// Both sides of an intervention were recorded.
    pub fn paired_intensity(&self) -> Option<(u8, u8)> {
        match (self.intensity_before, self.intensity_after) {
            (Some(before), Some(after)) => Some((before, after)),
            _ => None,
        }
    }
}

fn non_blank(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 4: Periods and ranges
// ═══════════════════════════════════════════════════════════════════════════

/// Analysis period length. Current and previous windows share it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    #[default]
    Week,
    Fortnight,
    Month,
    Custom { days: u32 },
}

impl Period {
    /// Map a day count to a named period where one exists.
    pub fn from_days(days: u32) -> Self {
        match days {
            7 => Period::Week,
            14 => Period::Fortnight,
            30 => Period::Month,
            n => Period::Custom { days: n.max(1) },
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            Period::Week => 7,
            Period::Fortnight => 14,
            Period::Month => 30,
            Period::Custom { days } => *days,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::days(i64::from(self.days()))
    }

    /// User-facing label.
    pub fn label(&self) -> String {
        match self {
            Period::Week => "Última semana".to_string(),
            Period::Fortnight => "Últimas 2 semanas".to_string(),
            Period::Month => "Último mes".to_string(),
            Period::Custom { days } => format!("Últimos {} días", days),
        }
    }
}

/// Half-open time range `(start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The period ending at `now`.
    pub fn current(period: Period, now: DateTime<Utc>) -> Self {
        Self::new(now - period.duration(), now)
    }

    /// The period of equal length immediately before the current one.
    pub fn previous(period: Period, now: DateTime<Utc>) -> Self {
        let end = now - period.duration();
        Self::new(end - period.duration(), end)
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts > self.start && ts <= self.end
    }
}
