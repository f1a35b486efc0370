//! Time-range filtering relative to an explicit reference instant

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use serde::Serialize;

use crate::types::PlayEvent;

/// Named listening window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    All,
    Year,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "3mo")]
    ThreeMonths,
    Month,
    Week,
}

impl TimeRange {
    pub const ALL: [TimeRange; 6] = [
        TimeRange::All,
        TimeRange::Year,
        TimeRange::SixMonths,
        TimeRange::ThreeMonths,
        TimeRange::Month,
        TimeRange::Week,
    ];

    /// Map a UI token; unknown tokens mean `All`
    pub fn from_token(token: &str) -> Self {
        match token {
            "year" => TimeRange::Year,
            "6mo" => TimeRange::SixMonths,
            "3mo" => TimeRange::ThreeMonths,
            "month" => TimeRange::Month,
            "week" => TimeRange::Week,
            _ => TimeRange::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::All => "all",
            TimeRange::Year => "year",
            TimeRange::SixMonths => "6mo",
            TimeRange::ThreeMonths => "3mo",
            TimeRange::Month => "month",
            TimeRange::Week => "week",
        }
    }

    /// Start of the window: midnight (UTC) of the calendar date reached by
    /// stepping back from `now`. `None` for `All`.
    ///
    /// Month steps clamp to the last day of a shorter month
    /// (Aug 31 minus six months is Feb 28/29).
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let today = now.date_naive();
        let start: NaiveDate = match self {
            TimeRange::All => return None,
            TimeRange::Year => today.checked_sub_months(Months::new(12))?,
            TimeRange::SixMonths => today.checked_sub_months(Months::new(6))?,
            TimeRange::ThreeMonths => today.checked_sub_months(Months::new(3))?,
            TimeRange::Month => today.checked_sub_months(Months::new(1))?,
            TimeRange::Week => today.checked_sub_days(Days::new(7))?,
        };
        start.and_hms_opt(0, 0, 0).map(|t| t.and_utc())
    }
}

impl FromStr for TimeRange {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TimeRange::from_token(s))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events inside `range`, in their original order.
///
/// `All` returns every event. Any other range drops events whose
/// `end_time` is missing or unparseable.
pub fn filter_by_range(events: &[PlayEvent], range: TimeRange, now: DateTime<Utc>) -> Vec<PlayEvent> {
    let Some(cutoff) = range.cutoff(now) else {
        return events.to_vec();
    };

    events
        .iter()
        .filter(|e| e.played_at().is_some_and(|t| t.and_utc() >= cutoff))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 15, 7, 38, 0).unwrap()
    }

    fn event(end_time: Option<&str>) -> PlayEvent {
        PlayEvent::new(end_time.map(String::from), 1000, Some("X".into()), Some("A".into()))
    }

    fn cutoff_date(range: TimeRange) -> String {
        range.cutoff(now()).unwrap().format("%Y-%m-%d %H:%M").to_string()
    }

    // ========== Token parsing ==========

    #[test]
    fn test_from_token_roundtrip() {
        for range in TimeRange::ALL {
            assert_eq!(TimeRange::from_token(range.as_str()), range);
        }
    }

    #[test]
    fn test_unknown_token_is_all() {
        assert_eq!(TimeRange::from_token("decade"), TimeRange::All);
        assert_eq!("".parse::<TimeRange>().unwrap(), TimeRange::All);
    }

    // ========== Cutoffs ==========

    #[test]
    fn test_cutoffs_are_calendar_steps() {
        assert!(TimeRange::All.cutoff(now()).is_none());
        assert_eq!(cutoff_date(TimeRange::Year), "2025-02-15 00:00");
        assert_eq!(cutoff_date(TimeRange::SixMonths), "2025-08-15 00:00");
        assert_eq!(cutoff_date(TimeRange::ThreeMonths), "2025-11-15 00:00");
        assert_eq!(cutoff_date(TimeRange::Month), "2026-01-15 00:00");
        assert_eq!(cutoff_date(TimeRange::Week), "2026-02-08 00:00");
    }

    #[test]
    fn test_month_end_clamped() {
        let now = Utc.with_ymd_and_hms(2025, 8, 31, 12, 0, 0).unwrap();
        let cutoff = TimeRange::SixMonths.cutoff(now).unwrap();
        assert_eq!(cutoff.date_naive().to_string(), "2025-02-28");
    }

    #[test]
    fn test_leap_day_year_back() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        let cutoff = TimeRange::Year.cutoff(now).unwrap();
        assert_eq!(cutoff.date_naive().to_string(), "2023-02-28");
    }

    // ========== Filtering ==========

    #[test]
    fn test_all_is_identity() {
        let events = vec![event(None), event(Some("1999-01-01 00:00")), event(Some("bad"))];
        assert_eq!(filter_by_range(&events, TimeRange::All, now()), events);
    }

    #[test]
    fn test_week_filter_inclusive_cutoff() {
        let events = vec![
            event(Some("2026-02-07 23:59")),
            event(Some("2026-02-08 00:00")),
            event(Some("2026-02-14 12:00")),
        ];
        let kept = filter_by_range(&events, TimeRange::Week, now());
        assert_eq!(kept, events[1..].to_vec());
    }

    #[test]
    fn test_missing_end_time_excluded() {
        let events = vec![event(None), event(Some("2026-02-14 12:00")), event(Some("garbage"))];
        let kept = filter_by_range(&events, TimeRange::Year, now());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].end_time.as_deref(), Some("2026-02-14 12:00"));
    }

    #[test]
    fn test_input_not_mutated() {
        let events = vec![event(Some("2020-01-01 00:00")), event(Some("2026-02-14 00:00"))];
        let before = events.clone();
        let _ = filter_by_range(&events, TimeRange::Month, now());
        assert_eq!(events, before);
    }

    // ========== Properties ==========

    fn arb_event() -> impl Strategy<Value = PlayEvent> {
        let stamp = (2023i32..=2026, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60)
            .prop_map(|(y, m, d, h, mi)| format!("{:04}-{:02}-{:02} {:02}:{:02}", y, m, d, h, mi));
        (proptest::option::of(stamp), 0u64..600_000).prop_map(|(t, ms)| PlayEvent::new(t, ms, None, None))
    }

    fn is_subsequence(needle: &[PlayEvent], hay: &[PlayEvent]) -> bool {
        let mut it = hay.iter();
        needle.iter().all(|n| it.any(|h| h == n))
    }

    proptest! {
        #[test]
        fn prop_all_is_identity(events in proptest::collection::vec(arb_event(), 0..40)) {
            prop_assert_eq!(filter_by_range(&events, TimeRange::All, now()), events);
        }

        #[test]
        fn prop_narrower_range_is_subsequence(events in proptest::collection::vec(arb_event(), 0..40)) {
            let chain = [
                TimeRange::All,
                TimeRange::Year,
                TimeRange::SixMonths,
                TimeRange::ThreeMonths,
                TimeRange::Month,
                TimeRange::Week,
            ];
            for pair in chain.windows(2) {
                let wide = filter_by_range(&events, pair[0], now());
                let narrow = filter_by_range(&events, pair[1], now());
                prop_assert!(is_subsequence(&narrow, &wide));
            }
        }
    }
}
