//! Fun-fact candidates derived from the metrics, and the pick of one of them

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{format_duration, format_number, parse_date, ListeningMetrics};

/// Shown when no fact qualifies
pub const FALLBACK_FACT: &str = "You have impeccable taste (and data)!";

/// Speed of sound, metres per second
const SOUND_SPEED_MPS: f64 = 343.0;
const MOON_DISTANCE_KM: u64 = 384_400;
const EARTH_CIRCUMFERENCE_KM: u64 = 40_075;
const MARATHON_KM: f64 = 42.195;

/// Every fact that qualifies for these metrics, in a fixed order
pub fn fun_fact_candidates(m: &ListeningMetrics) -> Vec<String> {
    let mut facts = Vec::new();
    let span = day_span(m);

    if let Some(top) = m.top_artists.first() {
        let km = (top.ms as f64 / 1000.0 * SOUND_SPEED_MPS / 1000.0).round() as u64;
        facts.push(format!(
            "You listened to {} for {}. At the speed of sound, that's {} km of travel!",
            top.name,
            format_duration(top.hours, top.minutes),
            format_number(km)
        ));
        if km > MOON_DISTANCE_KM {
            facts.push(format!("That's enough {} to reach the Moon.", top.name));
        } else if km > EARTH_CIRCUMFERENCE_KM {
            facts.push(format!("You've circled the Earth with {}!", top.name));
        }
        let marathons = (km as f64 / MARATHON_KM).floor() as u64;
        if marathons > 1 {
            facts.push(format!(
                "Your {} listening could soundtrack {} marathons!",
                top.name,
                format_number(marathons)
            ));
        }
    }

    if let Some(track) = m.top_tracks.first() {
        facts.push(format!(
            "\"{}\" was played {} times. That's {} of pure commitment.",
            track.track,
            track.plays,
            format_duration(track.hours, track.minutes)
        ));
        if let Some(days) = span {
            let per_day = format!("{:.1}", track.plays as f64 / days as f64);
            if per_day.parse::<f64>().is_ok_and(|p| p >= 1.0) {
                facts.push(format!(
                    "You averaged {}x per day on \"{}\". An anthem.",
                    per_day, track.track
                ));
            }
        }
    }

    let total_hours = m.total_minutes as f64 / 60.0;
    let movies = (total_hours / 2.0).floor() as u64;
    if movies > 10 {
        facts.push(format!(
            "Your listening time equals {} movies! (at 2 hours each).",
            format_number(movies)
        ));
    }
    let books = (total_hours / 7.0).floor() as u64;
    if books > 2 {
        facts.push(format!(
            "You could have finished {} audiobooks! (at 7 hours each).",
            books
        ));
    }
    let flights = (total_hours / 12.0).floor() as u64;
    if flights > 1 {
        facts.push(format!("That's {} flights from New York to Tokyo!", flights));
    }
    let nights = (total_hours / 8.0).floor() as u64;
    if nights > 5 {
        facts.push(format!(
            "You could have slept for {} full nights in the time you spent listening!",
            nights
        ));
    }

    if let Some(days) = span {
        let per_day = (m.total_minutes as f64 / days as f64).round() as u64;
        let verdict = if per_day > 60 {
            "over an hour daily! Serious dedication!"
        } else if per_day > 30 {
            "a solid listening habit!"
        } else {
            "a chill listening pace."
        };
        facts.push(format!(
            "You averaged {} minutes per day of music. That's {}",
            per_day, verdict
        ));
    }

    if let Some(night) = m.wrapped.night_percent {
        if night > 50.0 {
            facts.push(format!(
                "You're a certified Night Owl: {:.0}% of your listening happens after dark.",
                night
            ));
        } else if night < 20.0 {
            facts.push(format!(
                "You're an Early Bird: only {:.0}% of your listening is at night.",
                night
            ));
        }
    }

    if let Some(skip) = m.wrapped.skip_percent {
        if skip > 40.0 {
            facts.push(format!("You skipped {:.0}% of tracks. Picky listener alert.", skip));
        } else if skip < 15.0 {
            facts.push(format!("Only {:.0}% skip rate. You commit to every song.", skip));
        }
    }

    if m.unique_artists > 500 {
        facts.push(format!(
            "{} unique artists. Your taste spans a whole continent.",
            format_number(m.unique_artists)
        ));
    } else if m.unique_artists > 100 {
        facts.push(format!(
            "{} unique artists streamed. Explorer energy.",
            format_number(m.unique_artists)
        ));
    }

    facts
}

/// Pick one candidate uniformly at random
pub fn pick_fun_fact<R: Rng + ?Sized>(candidates: &[String], rng: &mut R) -> String {
    candidates
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| FALLBACK_FACT.to_string())
}

/// Pick a candidate by index (wrapping), for callers that choose themselves
pub fn pick_fun_fact_at(candidates: &[String], index: usize) -> String {
    if candidates.is_empty() {
        return FALLBACK_FACT.to_string();
    }
    candidates[index % candidates.len()].clone()
}

/// Whole days between earliest and latest activity, at least 1
fn day_span(m: &ListeningMetrics) -> Option<i64> {
    let first = parse_date(m.earliest.as_deref()?)?;
    let last = parse_date(m.latest.as_deref()?)?;
    Some((last - first).num_days().max(1))
}
