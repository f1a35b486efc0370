//! Standard streaming history parser (`StreamingHistory_music_*.json`)

use crate::types::{parse_end_time, PlayEvent};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{lenient_ms, HistoryParser};

/// One record of the standard export; already in canonical shape
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StandardRecord {
    end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_ms")]
    ms_played: u64,
    track_name: Option<String>,
    artist_name: Option<String>,
}

/// Parser for the standard (pre-formatted `endTime`) export
pub struct StandardHistoryParser;

impl HistoryParser for StandardHistoryParser {
    fn name(&self) -> &str {
        "standard"
    }

    fn file_prefix(&self) -> &str {
        "StreamingHistory_music_"
    }

    fn parse_record(&self, record: Value) -> Option<PlayEvent> {
        let record: StandardRecord = match serde_json::from_value(record) {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "skipping malformed standard record");
                return None;
            }
        };

        // Keep only stamps the time-based stats can use
        let end_time = record.end_time.filter(|t| parse_end_time(t).is_some());

        Some(PlayEvent::new(
            end_time,
            record.ms_played,
            record.track_name,
            record.artist_name,
        ))
    }
}
