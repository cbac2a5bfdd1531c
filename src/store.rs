// ── Sentir: Entry Repository ────────────────────────────────────────────────
//
// Persistence seam for check-ins. The engine never reads storage directly;
// callers fetch a range through `EntryRepository` and hand the entries to
// `EntryWindow::new`.
//
// `InMemoryEntryStore` keeps entries in a `parking_lot::RwLock` and can be
// loaded from / saved to a JSON array file (the CLI's storage format).

use crate::atoms::constants::INTENSITY_MAX;
use crate::atoms::error::{MetricsError, MetricsResult};
use crate::atoms::types::{EmotionEntry, TimeRange};
use crate::engine::window::validate_entry;
use chrono::Utc;
use log::{debug, info};
use parking_lot::RwLock;
use std::path::Path;

/// Source of check-ins for the analytics layer.
pub trait EntryRepository {
    /// Entries whose timestamp falls in `range`, chronological.
    fn fetch_entries(&self, range: &TimeRange) -> MetricsResult<Vec<EmotionEntry>>;

    /// Store a new check-in and return its id.
    fn append_entry(&self, entry: EmotionEntry) -> MetricsResult<String>;

    /// Attach the post-intervention intensity to an existing check-in.
    fn record_intensity_after(&self, id: &str, value: u8) -> MetricsResult<()>;
}

// ═════════════════════════════════════════════════════════════════════════════
// In-memory store
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct InMemoryEntryStore {
    entries: RwLock<Vec<EmotionEntry>>,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing entries. Every entry is validated and
    /// entries without an id get one.
    pub fn with_entries(entries: Vec<EmotionEntry>) -> MetricsResult<Self> {
        let now = Utc::now();
        let mut checked = Vec::with_capacity(entries.len());
        for (index, mut entry) in entries.into_iter().enumerate() {
            validate_entry(index, &entry, now)?;
            if entry.id.is_none() {
                entry.id = Some(new_id());
            }
            checked.push(entry);
        }
        checked.sort_by_key(|e| e.timestamp);
        Ok(Self {
            entries: RwLock::new(checked),
        })
    }

    pub fn from_json_str(json: &str) -> MetricsResult<Self> {
        let entries: Vec<EmotionEntry> = serde_json::from_str(json)?;
        Self::with_entries(entries)
    }

    /// Load a JSON array of entries. A missing file yields an empty store.
    pub fn load_json_file(path: &Path) -> MetricsResult<Self> {
        if !path.exists() {
            info!("[store] {} does not exist, starting empty", path.display());
            return Ok(Self::new());
        }
        let raw = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&raw)?;
        info!("[store] Loaded {} entries from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn to_json_string(&self) -> MetricsResult<String> {
        Ok(serde_json::to_string_pretty(&*self.entries.read())?)
    }

    pub fn save_json_file(&self, path: &Path) -> MetricsResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_string()?)?;
        info!("[store] Saved {} entries to {}", self.len(), path.display());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Snapshot of every stored entry, chronological.
    pub fn all_entries(&self) -> Vec<EmotionEntry> {
        self.entries.read().clone()
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl EntryRepository for InMemoryEntryStore {
    fn fetch_entries(&self, range: &TimeRange) -> MetricsResult<Vec<EmotionEntry>> {
        let out: Vec<EmotionEntry> = self
            .entries
            .read()
            .iter()
            .filter(|e| range.contains(e.timestamp))
            .cloned()
            .collect();
        debug!(
            "[store] fetch ({} .. {}] → {} entries",
            range.start.to_rfc3339(),
            range.end.to_rfc3339(),
            out.len()
        );
        Ok(out)
    }

    fn append_entry(&self, mut entry: EmotionEntry) -> MetricsResult<String> {
        let mut entries = self.entries.write();
        validate_entry(entries.len(), &entry, Utc::now())?;
        if let Some(id) = entry.id.as_deref() {
            if entries.iter().any(|e| e.id.as_deref() == Some(id)) {
                return Err(MetricsError::Store(format!("duplicate entry id {id}")));
            }
        }
        let id = entry.id.get_or_insert_with(new_id).clone();
        // Keep chronological order; equal timestamps stay in insertion order.
        let pos = entries.partition_point(|e| e.timestamp <= entry.timestamp);
        entries.insert(pos, entry);
        info!("[store] Appended entry {}", id);
        Ok(id)
    }

    fn record_intensity_after(&self, id: &str, value: u8) -> MetricsResult<()> {
        if value > INTENSITY_MAX {
            return Err(MetricsError::Store(format!(
                "intensity_after={value} exceeds the 0–{INTENSITY_MAX} scale"
            )));
        }
        let mut entries = self.entries.write();
        let entry = entries
            .iter_mut()
            .find(|e| e.id.as_deref() == Some(id))
            .ok_or_else(|| MetricsError::NotFound(id.to_string()))?;
        if entry.intensity_before.is_none() {
            return Err(MetricsError::Store(format!(
                "entry {id} has no intensity_before to pair with"
            )));
        }
        if entry.intensity_after.is_some() {
            return Err(MetricsError::Store(format!(
                "entry {id} already has an intensity_after"
            )));
        }
        entry.intensity_after = Some(value);
        info!("[store] Recorded intensity_after={} for {}", value, id);
        Ok(())
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Tests
// ═════════════════════════════════════════════════════════════════════════════
