//! Aggregated listening metrics handed to the label renderer

use serde::Serialize;

/// Number of entries kept in every top list
pub const TOP_N: usize = 10;

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArtistStat {
    pub name: String,
    pub ms: u64,
    pub hours: u64,
    pub minutes: u64,
}

impl ArtistStat {
    pub fn new(name: String, ms: u64) -> Self {
        let (hours, minutes) = split_hours_minutes(ms);
        Self {
            name,
            ms,
            hours,
            minutes,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrackStat {
    pub artist: String,
    pub track: String,
    pub ms: u64,
    pub plays: u64,
    pub hours: u64,
    pub minutes: u64,
}

impl TrackStat {
    pub fn new(artist: String, track: String) -> Self {
        Self {
            artist,
            track,
            ms: 0,
            plays: 0,
            hours: 0,
            minutes: 0,
        }
    }

    pub fn add(&mut self, ms: u64) {
        self.ms = self.ms.saturating_add(ms);
        self.plays = self.plays.saturating_add(1);
    }

    /// Fill in the display split once accumulation is done
    pub fn finish(mut self) -> Self {
        (self.hours, self.minutes) = split_hours_minutes(self.ms);
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenreStat {
    pub name: String,
    pub seconds: u64,
}

/// Profile fields of `Identity.json`
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct IdentitySummary {
    pub display_name: Option<String>,
    pub image_url: Option<String>,
}

/// Counts derived from follow, playlist, library and marquee documents.
/// A missing document counts as zero.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SocialStats {
    pub following: u64,
    pub followers: u64,
    pub playlist_count: u64,
    pub playlist_tracks: u64,
    pub liked_tracks: u64,
    pub super_listeners: u64,
}

/// Flattened yearly summary. Absent fields mean "unknown", never zero.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct WrappedSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_artists: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_tracks: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listening_days: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak_days: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artists_discovered: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub night_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sad_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub love_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chill_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_albums: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_genres: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listening_age: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_start_year: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decade_phase: Option<String>,
}

/// Skip/shuffle totals, only available from the extended schema
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ExtendedStats {
    pub skipped: u64,
    pub shuffled: u64,
}

/// Everything the label shows for one range selection
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListeningMetrics {
    pub total_streams: u64,
    pub total_ms: u64,
    /// Whole minutes listened
    pub total_minutes: u64,
    /// `total_minutes` split into hours + remainder minutes
    pub total_hours: u64,
    pub remaining_minutes: u64,
    pub total_days: f64,
    pub unique_artists: u64,
    pub unique_tracks: u64,
    pub top_artists: Vec<ArtistStat>,
    pub top_tracks: Vec<TrackStat>,
    pub hour_ms: [u64; 24],
    pub hour_norm: [f64; 24],
    pub peak_hour: usize,
    pub top_genres: Vec<GenreStat>,
    pub earliest: Option<String>,
    pub latest: Option<String>,
    pub identity: Option<IdentitySummary>,
    pub social: SocialStats,
    pub wrapped: WrappedSummary,
    pub avg_track_secs: u64,
    pub top_day: Option<String>,
    pub extended: Option<ExtendedStats>,
    pub has_extended_data: bool,
}

/// Split milliseconds into whole hours and leftover minutes
pub fn split_hours_minutes(ms: u64) -> (u64, u64) {
    (ms / MS_PER_HOUR, (ms % MS_PER_HOUR) / MS_PER_MINUTE)
}

/// `"3h 12m"`, or just `"12m"` below an hour
pub fn format_duration(hours: u64, minutes: u64) -> String {
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Format a number with thousand separators (e.g., 1234567 -> "1,234,567")
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let len = s.len();
    let mut result = String::with_capacity(len + len / 3);

    // Digits are ASCII, so byte indexing is safe
    for (i, ch) in s.bytes().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch as char);
    }

    result
}
