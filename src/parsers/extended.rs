//! Extended streaming history parser (`Streaming_History_Audio_*.json`)

use crate::types::{parse_end_time, ExtendedDetails, PlayEvent, END_TIME_FORMAT};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{lenient_ms, HistoryParser};

/// One record of the extended export
#[derive(Deserialize)]
struct ExtendedRecord {
    ts: Option<String>,
    #[serde(default, deserialize_with = "lenient_ms")]
    ms_played: u64,
    master_metadata_track_name: Option<String>,
    master_metadata_album_artist_name: Option<String>,
    master_metadata_album_album_name: Option<String>,
    skipped: Option<bool>,
    platform: Option<String>,
    shuffle: Option<bool>,
    offline: Option<bool>,
    incognito_mode: Option<bool>,
    reason_start: Option<String>,
    reason_end: Option<String>,
}

/// Parser for the extended (per-stream, raw timestamp) export
pub struct ExtendedHistoryParser;

impl HistoryParser for ExtendedHistoryParser {
    fn name(&self) -> &str {
        "extended"
    }

    fn file_prefix(&self) -> &str {
        "Streaming_History_Audio_"
    }

    fn parse_record(&self, record: Value) -> Option<PlayEvent> {
        let record: ExtendedRecord = match serde_json::from_value(record) {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "skipping malformed extended record");
                return None;
            }
        };

        // No track name: podcast episode, audiobook or other non-music content
        let track = record.master_metadata_track_name?;

        let mut event = PlayEvent::new(
            record.ts.as_deref().and_then(minute_stamp),
            record.ms_played,
            Some(track),
            record.master_metadata_album_artist_name,
        );
        event.extended = Some(ExtendedDetails {
            album_name: record.master_metadata_album_album_name.unwrap_or_default(),
            skipped: record.skipped.unwrap_or(false),
            platform: record.platform.unwrap_or_default(),
            shuffle: record.shuffle.unwrap_or(false),
            offline: record.offline.unwrap_or(false),
            incognito: record.incognito_mode.unwrap_or(false),
            reason_start: record.reason_start.unwrap_or_default(),
            reason_end: record.reason_end.unwrap_or_default(),
        });
        Some(event)
    }
}

/// `2024-12-12T10:02:52Z` → `2024-12-12 10:02`
///
/// Offsets other than `Z` are converted to UTC. Anything that is not RFC 3339
/// falls back to swapping the separator and truncating to minutes, and must
/// still yield a valid stamp.
fn minute_stamp(ts: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc).format(END_TIME_FORMAT).to_string());
    }

    let swapped = ts.replacen('T', " ", 1);
    let truncated = swapped.get(..16)?;
    parse_end_time(truncated).map(|_| truncated.to_string())
}
