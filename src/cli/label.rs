//! Plain-text nutrition label for terminal output

use std::fmt::Write;

use super::{total_listening, LabelReport};
use crate::types::{format_duration, format_number};

const WIDTH: usize = 44;

pub fn render(report: &LabelReport) -> String {
    let m = &report.metrics;
    let mut out = String::new();
    let thick = "█".repeat(WIDTH);
    let thin = "─".repeat(WIDTH);

    let _ = writeln!(out, "Nutrition Facts");
    if let Some(name) = m.identity.as_ref().and_then(|i| i.display_name.as_deref()) {
        let _ = writeln!(out, "for {}", name);
    }
    let _ = writeln!(out, "Range: {}", report.range);
    let _ = writeln!(out, "{}", thick);

    row(&mut out, "Total streams", &format_number(m.total_streams));
    row(&mut out, "Listening time", &total_listening(m));
    row(&mut out, "Days of audio", &format!("{:.1}", m.total_days));
    row(&mut out, "Unique artists", &format_number(m.unique_artists));
    row(&mut out, "Unique tracks", &format_number(m.unique_tracks));
    row(&mut out, "Avg track length", &format!("{}s", m.avg_track_secs));
    if let (Some(first), Some(last)) = (&m.earliest, &m.latest) {
        row(&mut out, "Active", &format!("{} → {}", first, last));
    }
    if let Some(day) = &m.top_day {
        row(&mut out, "Favourite day", day);
    }
    row(&mut out, "Peak hour", &format!("{:02}:00", m.peak_hour));

    if !m.top_artists.is_empty() {
        let _ = writeln!(out, "{}", thin);
        let _ = writeln!(out, "Top Artists");
        for (i, a) in m.top_artists.iter().enumerate() {
            row(&mut out, &format!("{:>2}. {}", i + 1, a.name), &format_duration(a.hours, a.minutes));
        }
    }

    if !m.top_tracks.is_empty() {
        let _ = writeln!(out, "{}", thin);
        let _ = writeln!(out, "Top Tracks");
        for (i, t) in m.top_tracks.iter().enumerate() {
            row(
                &mut out,
                &format!("{:>2}. {} - {}", i + 1, t.track, t.artist),
                &format!("{} plays", t.plays),
            );
        }
    }

    if !m.top_genres.is_empty() {
        let _ = writeln!(out, "{}", thin);
        let _ = writeln!(out, "Top Genres");
        for (i, g) in m.top_genres.iter().enumerate() {
            let (hours, minutes) = (g.seconds / 3600, (g.seconds % 3600) / 60);
            row(&mut out, &format!("{:>2}. {}", i + 1, g.name), &format_duration(hours, minutes));
        }
    }

    let _ = writeln!(out, "{}", thin);
    let _ = writeln!(out, "Listening Hours");
    let _ = writeln!(out, "{}", hour_sparkline(&m.hour_norm));

    let s = &m.social;
    let _ = writeln!(out, "{}", thin);
    row(&mut out, "Playlists", &format!("{} ({} tracks)", s.playlist_count, format_number(s.playlist_tracks)));
    row(&mut out, "Liked tracks", &format_number(s.liked_tracks));
    row(&mut out, "Following / followers", &format!("{} / {}", s.following, s.followers));
    if s.super_listeners > 0 {
        row(&mut out, "Super listener of", &format!("{} artists", s.super_listeners));
    }

    let w = &m.wrapped;
    if let Some(minutes) = w.minutes {
        row(&mut out, "Wrapped minutes", &format_number(minutes));
    }
    if let Some(club) = &w.club {
        row(&mut out, "Club", club);
    }
    if let Some(skip) = w.skip_percent {
        row(&mut out, "Skip rate", &format!("{:.0}%", skip));
    }
    if let Some(stats) = &m.extended {
        row(&mut out, "Shuffled streams", &format_number(stats.shuffled));
    }

    let _ = writeln!(out, "{}", thick);
    let _ = writeln!(out, "{}", report.fun_fact);
    out
}

fn row(out: &mut String, label: &str, value: &str) {
    let used = label.chars().count() + value.chars().count();
    let pad = WIDTH.saturating_sub(used).max(1);
    let _ = writeln!(out, "{}{}{}", label, " ".repeat(pad), value);
}

/// One block character per hour, scaled by the normalized profile
fn hour_sparkline(norm: &[f64; 24]) -> String {
    const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    norm.iter()
        .map(|v| BLOCKS[((v * 7.0).round() as usize).min(7)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{Aggregator, TimeRange};
    use crate::types::{Extras, PlayEvent};

    fn report() -> LabelReport {
        let events = vec![PlayEvent::new(
            Some("2024-01-01 10:00".into()),
            180_000,
            Some("X".into()),
            Some("A".into()),
        )];
        LabelReport {
            range: TimeRange::All,
            metrics: Aggregator::process(&events, false, &Extras::default()),
            fun_facts: Vec::new(),
            fun_fact: "fact".into(),
        }
    }

    #[test]
    fn test_render_contains_sections() {
        let text = render(&report());
        assert!(text.starts_with("Nutrition Facts\n"));
        assert!(text.contains("Top Artists"));
        assert!(text.contains(" 1. X - A"));
        assert!(!text.contains("Top Genres"));
        assert!(text.trim_end().ends_with("fact"));
    }

    #[test]
    fn test_row_padding() {
        let mut out = String::new();
        row(&mut out, "Label", "1");
        assert_eq!(out.trim_end().chars().count(), WIDTH);
    }

    #[test]
    fn test_hour_sparkline() {
        let mut norm = [0.0; 24];
        norm[10] = 1.0;
        norm[11] = 0.5;
        let line = hour_sparkline(&norm);
        assert_eq!(line.chars().count(), 24);
        assert_eq!(line.chars().nth(10), Some('█'));
        assert_eq!(line.chars().nth(0), Some('▁'));
    }
}
