use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::scoring::AssessmentResult;
use crate::Result;

/// Retained history length; older entries are evicted on append.
pub const MAX_HISTORY: usize = 20;

/// Score changes within this many points either way count as stable.
pub const TREND_NOISE: i16 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// ISO-8601 creation instant.
    pub date: String,
    pub result: AssessmentResult,
}

impl HistoryEntry {
    pub fn new(result: AssessmentResult, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            result,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        })
    }
}

/// Direction of change between the two newest entries of a newest-first history.
///
/// Returns `None` with fewer than two entries. Entries past the second are ignored.
pub fn trend(history: &[HistoryEntry]) -> Option<Trend> {
    let [latest, previous, ..] = history else {
        return None;
    };
    let latest = i16::from(latest.result.overall_score);
    let previous = i16::from(previous.result.overall_score);
    let trend = if latest > previous + TREND_NOISE {
        Trend::Up
    } else if latest < previous - TREND_NOISE {
        Trend::Down
    } else {
        Trend::Stable
    };
    debug!(latest, previous, %trend, "computed score trend");
    Some(trend)
}

/// Short display date such as `Oct 19, 2026`; unparsable input is returned as is.
pub fn format_date(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Bounded, newest-first persistence of past results.
pub trait HistoryStore {
    /// Prepends `entry`, keeping at most [`MAX_HISTORY`] entries.
    fn append(&mut self, entry: HistoryEntry) -> Result<()>;
    /// All entries, newest first. Missing or unreadable data reads as empty.
    fn read_all(&self) -> Vec<HistoryEntry>;
    fn clear(&mut self) -> Result<()>;
}

/// Wraps `result` in a new entry stamped with `now` and appends it to `store`.
pub fn record<S: HistoryStore + ?Sized>(
    store: &mut S,
    result: AssessmentResult,
    now: DateTime<Utc>,
) -> Result<HistoryEntry> {
    let entry = HistoryEntry::new(result, now);
    store.append(entry.clone())?;
    Ok(entry)
}

fn push_front(entries: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    entries.insert(0, entry);
    entries.truncate(MAX_HISTORY);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistory {
    fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        push_front(&mut self.entries, entry);
        Ok(())
    }

    fn read_all(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

/// History kept as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    path: PathBuf,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileHistory {
    fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.read_all();
        push_front(&mut entries, entry);
        fs::write(&self.path, serde_json::to_vec(&entries)?)?;
        info!(path = %self.path.display(), retained = entries.len(), "saved assessment to history");
        Ok(())
    }

    fn read_all(&self) -> Vec<HistoryEntry> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "history unreadable, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_slice::<Vec<HistoryEntry>>(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "history corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scoring::ReadinessLevel;
    use chrono::TimeZone;

    fn result(overall_score: u8) -> AssessmentResult {
        let readiness_level = ReadinessLevel::from_score(overall_score);
        AssessmentResult {
            overall_score,
            category_scores: vec![],
            readiness_level,
            estimated_prep_time: readiness_level.prep_time().to_string(),
            next_steps: vec![],
        }
    }

    fn entry(overall_score: u8) -> HistoryEntry {
        HistoryEntry::new(result(overall_score), Utc::now())
    }

    fn history(scores: &[u8]) -> Vec<HistoryEntry> {
        scores.iter().map(|&score| entry(score)).collect()
    }

    #[test]
    fn test_trend_needs_two_entries() {
        assert_eq!(trend(&[]), None);
        assert_eq!(trend(&history(&[70])), None);
    }

    #[test]
    fn test_trend_noise_band() {
        assert_eq!(trend(&history(&[66, 60])), Some(Trend::Up));
        assert_eq!(trend(&history(&[65, 60])), Some(Trend::Stable));
        assert_eq!(trend(&history(&[55, 60])), Some(Trend::Stable));
        assert_eq!(trend(&history(&[54, 60])), Some(Trend::Down));
        assert_eq!(trend(&history(&[60, 60])), Some(Trend::Stable));
        assert_eq!(trend(&history(&[0, 100])), Some(Trend::Down));
        assert_eq!(trend(&history(&[3, 0])), Some(Trend::Stable));
    }

    #[test]
    fn test_trend_ignores_older_entries() {
        assert_eq!(
            trend(&history(&[80, 70, 0])),
            trend(&history(&[80, 70, 100, 5]))
        );
    }

    #[test]
    fn test_entry_stamp() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        let entry = HistoryEntry::new(result(50), now);
        assert_eq!(entry.date, "2026-10-19T08:30:00.000Z");
        assert!(Uuid::parse_str(&entry.id).is_ok());
        assert_ne!(entry.id, HistoryEntry::new(result(50), now).id);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-10-19T08:30:00.000Z"), "Oct 19, 2026");
        assert_eq!(format_date("2026-03-05T23:59:59Z"), "Mar 5, 2026");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_memory_history_is_bounded() {
        let mut store = MemoryHistory::new();
        for score in 0..25u8 {
            record(&mut store, result(score), Utc::now()).unwrap();
        }
        let entries = store.read_all();
        assert_eq!(entries.len(), MAX_HISTORY);
        assert_eq!(entries[0].result.overall_score, 24);
        assert_eq!(entries[MAX_HISTORY - 1].result.overall_score, 5);

        store.clear().unwrap();
        assert!(store.read_all().is_empty());
    }

    #[test]
    fn test_file_history_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileHistory::new(dir.path().join("history.json"));
        assert!(store.read_all().is_empty());

        let first = record(&mut store, result(40), Utc::now()).unwrap();
        let second = record(&mut store, result(52), Utc::now()).unwrap();
        let entries = store.read_all();
        assert_eq!(entries, vec![second, first]);
        assert_eq!(trend(&entries), Some(Trend::Up));

        store.clear().unwrap();
        assert!(store.read_all().is_empty());
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_file_history_corrupt_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, b"{not json").unwrap();
        let mut store = JsonFileHistory::new(&path);
        assert!(store.read_all().is_empty());

        record(&mut store, result(10), Utc::now()).unwrap();
        assert_eq!(store.read_all().len(), 1);
    }

    #[test]
    fn test_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileHistory::new(dir.path().join("history.json"));
        record(&mut store, result(61), Utc::now()).unwrap();
        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(raw[0]["result"]["overallScore"], 61);
        assert_eq!(raw[0]["result"]["readinessLevel"], "advanced");
        assert!(raw[0]["date"].is_string());
    }
}
