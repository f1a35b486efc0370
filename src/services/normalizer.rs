//! History normalization service
//!
//! Detects which export schema is present in the file bag and converts all
//! of its history files into one canonical event list.

use tracing::info;

use crate::parsers::ParserRegistry;
use crate::types::{FileBag, PlayEvent, Result, TunefactsError};

/// Canonical events plus the schema they came from
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedHistory {
    pub events: Vec<PlayEvent>,
    /// True when the extended schema was used
    pub extended: bool,
}

/// Normalize the bag's streaming history.
///
/// Extended-schema files take precedence; standard files are only read when
/// no extended file exists. Fails with [`TunefactsError::NoHistoryFound`]
/// when no event survives.
///
/// # Examples
/// ```
/// use tunefacts::services::normalizer::normalize_history;
/// use tunefacts::types::FileBag;
///
/// let mut bag = FileBag::new();
/// bag.insert(
///     "StreamingHistory_music_0.json",
///     r#"[{"endTime":"2024-01-01 10:00","msPlayed":1000,"artistName":"A","trackName":"X"}]"#,
/// );
/// let history = normalize_history(&bag).unwrap();
/// assert_eq!(history.events.len(), 1);
/// assert!(!history.extended);
/// ```
pub fn normalize_history(bag: &FileBag) -> Result<NormalizedHistory> {
    normalize_with(&ParserRegistry::new(), bag)
}

/// Normalize using an explicit parser registry
pub fn normalize_with(registry: &ParserRegistry, bag: &FileBag) -> Result<NormalizedHistory> {
    let parser = registry.detect(bag).ok_or(TunefactsError::NoHistoryFound)?;
    let events = parser.parse_bag(bag);

    if events.is_empty() {
        return Err(TunefactsError::NoHistoryFound);
    }

    info!(schema = parser.name(), events = events.len(), "normalized streaming history");

    Ok(NormalizedHistory {
        events,
        extended: parser.name() == "extended",
    })
}
