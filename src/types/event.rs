//! Canonical play event shared by both history schemas

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Wall-clock format of `end_time` (UTC, minute precision)
pub const END_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Placeholder for missing track/artist names
pub const UNKNOWN: &str = "Unknown";

/// One normalized play record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayEvent {
    /// `YYYY-MM-DD HH:MM`, UTC; `None` excludes the event from time-based stats
    pub end_time: Option<String>,
    pub ms_played: u64,
    pub track_name: String,
    pub artist_name: String,
    /// Only set for events read from the extended schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended: Option<ExtendedDetails>,
}

/// Per-stream metadata carried only by the extended export
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedDetails {
    pub album_name: String,
    pub skipped: bool,
    pub platform: String,
    pub shuffle: bool,
    pub offline: bool,
    pub incognito: bool,
    pub reason_start: String,
    pub reason_end: String,
}

impl PlayEvent {
    /// Build an event, applying the `"Unknown"` defaults for blank names
    pub fn new(
        end_time: Option<String>,
        ms_played: u64,
        track_name: Option<String>,
        artist_name: Option<String>,
    ) -> Self {
        Self {
            end_time,
            ms_played,
            track_name: name_or_unknown(track_name),
            artist_name: name_or_unknown(artist_name),
            extended: None,
        }
    }

    /// Parsed `end_time`, if present and well formed
    pub fn played_at(&self) -> Option<NaiveDateTime> {
        self.end_time.as_deref().and_then(parse_end_time)
    }

    /// Date portion of `end_time` (`YYYY-MM-DD`), unparsed
    pub fn date_part(&self) -> Option<&str> {
        self.end_time
            .as_deref()
            .and_then(|t| t.split(' ').next())
            .filter(|d| !d.is_empty())
    }

    pub fn is_skipped(&self) -> bool {
        self.extended.as_ref().is_some_and(|x| x.skipped)
    }

    pub fn is_shuffled(&self) -> bool {
        self.extended.as_ref().is_some_and(|x| x.shuffle)
    }
}

fn name_or_unknown(name: Option<String>) -> String {
    match name {
        Some(n) if !n.is_empty() => n,
        _ => UNKNOWN.to_string(),
    }
}

/// Parse a canonical `YYYY-MM-DD HH:MM` stamp
pub fn parse_end_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, END_TIME_FORMAT).ok()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
