//! Aggregator service for computing listening statistics

use std::collections::HashMap;

use chrono::{Datelike, Timelike};
use serde_json::Value;

use crate::types::{
    ArtistStat, ExtendedStats, Extras, GenreStat, IdentitySummary, ListeningMetrics, PlayEvent,
    SocialStats, TrackStat, WrappedSummary, TOP_N,
};

/// Day names indexed by days-from-Sunday
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const SUPER_LISTENERS: &str = "Super Listeners";

/// Aggregator for computing listening statistics
pub struct Aggregator;

impl Aggregator {
    /// Reduce events and extras into the label metrics.
    ///
    /// Never fails: anything missing simply leaves its metric empty.
    /// `extended` tells whether the events came from the extended schema.
    pub fn process(events: &[PlayEvent], extended: bool, extras: &Extras) -> ListeningMetrics {
        let tally = EventTally::from_events(events);

        let mut wrapped = extras
            .wrapped
            .as_ref()
            .map(flatten_wrapped)
            .unwrap_or_default();

        if extended && tally.count > 0 && wrapped.skip_percent.is_none() {
            wrapped.skip_percent = Some(tally.skipped as f64 / tally.count as f64 * 100.0);
        }

        let total_minutes = tally.total_ms / 60_000;
        let (hour_norm, peak_hour) = normalize_hours(&tally.hour_ms);

        ListeningMetrics {
            total_streams: tally.count,
            total_ms: tally.total_ms,
            total_minutes,
            total_hours: total_minutes / 60,
            remaining_minutes: total_minutes % 60,
            total_days: (total_minutes as f64 / 1440.0 * 10.0).round() / 10.0,
            unique_artists: tally.artists.len() as u64,
            unique_tracks: tally.tracks.len() as u64,
            top_artists: top_artists(&tally.artists),
            top_tracks: top_tracks(&tally.tracks),
            hour_ms: tally.hour_ms,
            hour_norm,
            peak_hour,
            top_genres: extras.capsule.as_ref().map(top_genres).unwrap_or_default(),
            earliest: tally.earliest.map(String::from),
            latest: tally.latest.map(String::from),
            identity: extras.identity.as_ref().and_then(identity_summary),
            social: social_stats(extras),
            wrapped,
            avg_track_secs: average_track_secs(tally.total_ms, tally.count),
            top_day: tally.top_day(),
            extended: extended.then(|| ExtendedStats {
                skipped: tally.skipped,
                shuffled: tally.shuffled,
            }),
            has_extended_data: extended,
        }
    }
}

/// Per-call accumulator over the event list
struct EventTally<'a> {
    count: u64,
    total_ms: u64,
    /// Artist name → ms, first-encounter order
    artists: Vec<(&'a str, u64)>,
    tracks: Vec<TrackStat>,
    hour_ms: [u64; 24],
    day_ms: [u64; 7],
    timed_events: u64,
    earliest: Option<&'a str>,
    latest: Option<&'a str>,
    skipped: u64,
    shuffled: u64,
}

impl<'a> EventTally<'a> {
    fn from_events(events: &'a [PlayEvent]) -> Self {
        let mut tally = EventTally {
            count: 0,
            total_ms: 0,
            artists: Vec::new(),
            tracks: Vec::new(),
            hour_ms: [0; 24],
            day_ms: [0; 7],
            timed_events: 0,
            earliest: None,
            latest: None,
            skipped: 0,
            shuffled: 0,
        };
        let mut artist_index: HashMap<&str, usize> = HashMap::new();
        let mut track_index: HashMap<String, usize> = HashMap::new();

        for event in events {
            let ms = event.ms_played;
            tally.count += 1;
            tally.total_ms = tally.total_ms.saturating_add(ms);

            let artist = event.artist_name.as_str();
            let slot = *artist_index.entry(artist).or_insert_with(|| {
                tally.artists.push((artist, 0));
                tally.artists.len() - 1
            });
            tally.artists[slot].1 = tally.artists[slot].1.saturating_add(ms);

            let key = format!("{}|||{}", event.artist_name, event.track_name);
            let slot = *track_index.entry(key).or_insert_with(|| {
                tally
                    .tracks
                    .push(TrackStat::new(event.artist_name.clone(), event.track_name.clone()));
                tally.tracks.len() - 1
            });
            tally.tracks[slot].add(ms);

            if let Some(date) = event.date_part() {
                if tally.earliest.map_or(true, |e| date < e) {
                    tally.earliest = Some(date);
                }
                if tally.latest.map_or(true, |l| date > l) {
                    tally.latest = Some(date);
                }
            }

            if let Some(played_at) = event.played_at() {
                tally.timed_events += 1;
                let hour = &mut tally.hour_ms[played_at.hour() as usize];
                *hour = hour.saturating_add(ms);
                let day = &mut tally.day_ms[played_at.weekday().num_days_from_sunday() as usize];
                *day = day.saturating_add(ms);
            }

            if event.is_skipped() {
                tally.skipped += 1;
            }
            if event.is_shuffled() {
                tally.shuffled += 1;
            }
        }

        tally
    }

    /// Day with the most listening; `None` when no event has a usable time
    fn top_day(&self) -> Option<String> {
        if self.timed_events == 0 {
            return None;
        }
        Some(DAY_NAMES[first_max_index(&self.day_ms)].to_string())
    }
}

fn top_artists(artists: &[(&str, u64)]) -> Vec<ArtistStat> {
    let mut ranked = artists.to_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(TOP_N)
        .map(|(name, ms)| ArtistStat::new(name.to_string(), ms))
        .collect()
}

fn top_tracks(tracks: &[TrackStat]) -> Vec<TrackStat> {
    let mut ranked = tracks.to_vec();
    ranked.sort_by(|a, b| b.ms.cmp(&a.ms));
    ranked.truncate(TOP_N);
    ranked.into_iter().map(TrackStat::finish).collect()
}

/// Scale hour buckets to `[0, 1]` by the largest bucket; also returns the
/// first peak hour
pub fn normalize_hours(hour_ms: &[u64; 24]) -> ([f64; 24], usize) {
    let max = hour_ms.iter().copied().max().unwrap_or(0);
    let mut norm = [0.0; 24];
    if max > 0 {
        for (n, &v) in norm.iter_mut().zip(hour_ms) {
            *n = v as f64 / max as f64;
        }
    }
    (norm, first_max_index(hour_ms))
}

fn first_max_index(values: &[u64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// Rounded mean seconds per stream
pub fn average_track_secs(total_ms: u64, count: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    (total_ms as f64 / (count as f64 * 1000.0)).round() as u64
}

/// Genres summed over every capsule period, top 10 by seconds
pub fn top_genres(capsule: &Value) -> Vec<GenreStat> {
    let mut genres: Vec<GenreStat> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let periods = capsule.get("stats").and_then(Value::as_array);
    for period in periods.into_iter().flatten() {
        let period_genres = period.get("topGenres").and_then(Value::as_array);
        for genre in period_genres.into_iter().flatten() {
            let Some(name) = genre.get("name").and_then(Value::as_str) else {
                continue;
            };
            let seconds = genre.get("secondsPlayed").and_then(as_count).unwrap_or(0);
            let slot = *index.entry(name.to_string()).or_insert_with(|| {
                genres.push(GenreStat {
                    name: name.to_string(),
                    seconds: 0,
                });
                genres.len() - 1
            });
            genres[slot].seconds = genres[slot].seconds.saturating_add(seconds);
        }
    }

    genres.sort_by(|a, b| b.seconds.cmp(&a.seconds));
    genres.truncate(TOP_N);
    genres
}

pub fn identity_summary(identity: &Value) -> Option<IdentitySummary> {
    identity.as_object()?;
    Some(IdentitySummary {
        display_name: text(identity, "displayName"),
        image_url: text(identity, "largeImageUrl").or_else(|| text(identity, "imageUrl")),
    })
}

/// Social graph, playlist and library counts
pub fn social_stats(extras: &Extras) -> SocialStats {
    let mut stats = SocialStats::default();

    if let Some(follow) = &extras.follow {
        stats.following = array_len(follow, "userIsFollowing");
        stats.followers = array_len(follow, "userIsFollowedBy");
    }

    if let Some(playlists) = extras
        .playlists
        .as_ref()
        .and_then(|p| p.get("playlists"))
        .and_then(Value::as_array)
    {
        stats.playlist_count = playlists.len() as u64;
        stats.playlist_tracks = playlists.iter().map(|p| array_len(p, "items")).sum();
    }

    if let Some(library) = &extras.library {
        stats.liked_tracks = array_len(library, "tracks");
    }

    if let Some(segments) = extras.marquee.as_ref().and_then(Value::as_array) {
        stats.super_listeners = segments
            .iter()
            .filter(|m| m.get("segment").and_then(Value::as_str) == Some(SUPER_LISTENERS))
            .count() as u64;
    }

    stats
}

/// Copy the known yearly-summary fields. A missing section leaves its
/// fields `None`.
pub fn flatten_wrapped(wrapped: &Value) -> WrappedSummary {
    let mut w = WrappedSummary::default();

    if let Some(yearly) = wrapped.get("yearlyMetrics") {
        w.minutes = yearly
            .get("totalMsListened")
            .and_then(as_count)
            .map(|ms| ms / 60_000);
    }
    if let Some(clubs) = wrapped.get("clubs") {
        w.club = text(clubs, "userClub");
    }
    if let Some(artists) = wrapped.get("topArtists") {
        w.num_artists = count(artists, "numUniqueArtists");
    }
    if let Some(tracks) = wrapped.get("topTracks") {
        w.num_tracks = count(tracks, "numUniqueTracks");
    }
    if let Some(party) = wrapped.get("party") {
        w.listening_days = count(party, "totalNumListeningDays");
        w.streak_days = count(party, "streakNumListeningDays");
        w.artists_discovered = count(party, "numArtistsDiscovered");
        w.skip_percent = percent(party, "percentMusicSkips");
        w.night_percent = percent(party, "percentListenedNight");
        w.explicit_percent = percent(party, "percentListenedExplicit");
        w.sad_percent = percent(party, "percentSadTracks");
        w.party_percent = percent(party, "percentPartyTracks");
        w.love_percent = percent(party, "percentLoveTracks");
        w.chill_percent = percent(party, "percentChillTracks");
    }
    if let Some(albums) = wrapped.get("topAlbums") {
        w.completed_albums = count(albums, "numCompletedAlbums");
    }
    if let Some(genres) = wrapped.get("topGenres") {
        w.total_genres = count(genres, "totalNumGenres");
    }
    if let Some(age) = wrapped.get("listeningAge") {
        w.listening_age = count(age, "listeningAge");
        w.window_start_year = count(age, "windowStartYear");
        w.decade_phase = text(age, "decadePhase");
    }

    w
}

fn as_count(v: &Value) -> Option<u64> {
    v.as_u64()
        .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
}

fn count(obj: &Value, key: &str) -> Option<u64> {
    obj.get(key).and_then(as_count)
}

fn percent(obj: &Value, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64)
}

fn text(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(String::from)
}

fn array_len(obj: &Value, key: &str) -> u64 {
    obj.get(key)
        .and_then(Value::as_array)
        .map_or(0, |a| a.len() as u64)
}
