//! Session data loading: file bag → normalized history + extras, then
//! per-range metrics
//!
//! History and extras are parsed once per session. Every range selection
//! re-filters and re-aggregates from scratch.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::services::archive::ArchiveExtractor;
use crate::services::extras_loader::load_extras;
use crate::services::normalizer::normalize_history;
use crate::services::range_filter::{filter_by_range, TimeRange};
use crate::services::Aggregator;
use crate::types::{Extras, FileBag, ListeningMetrics, PlayEvent, Result, TunefactsError};

/// Result of loading input files from disk
#[derive(Debug)]
pub struct LoadResult {
    pub service: DataLoaderService,
    /// Files that could not be read; they were skipped
    pub read_errors: Vec<TunefactsError>,
}

/// Parsed session state for one archive
#[derive(Debug, Clone)]
pub struct DataLoaderService {
    events: Vec<PlayEvent>,
    extended: bool,
    extras: Extras,
}

impl DataLoaderService {
    /// Normalize history and load extras from an assembled bag
    pub fn from_bag(bag: &FileBag) -> Result<Self> {
        let history = normalize_history(bag)?;
        let extras = load_extras(bag);

        Ok(Self {
            events: history.events,
            extended: history.extended,
            extras,
        })
    }

    /// Read files (zip or json) from disk and load them.
    ///
    /// Unreadable files are returned in `read_errors`; only a missing
    /// history is fatal.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<LoadResult> {
        let mut extractor = ArchiveExtractor::new();
        for path in paths {
            extractor.add_path(path.as_ref());
        }
        let (bag, read_errors) = extractor.finish();
        info!(files = bag.len(), skipped = read_errors.len(), "collected input files");

        Ok(LoadResult {
            service: Self::from_bag(&bag)?,
            read_errors,
        })
    }

    /// Metrics for `range`, with cutoffs measured back from `now`
    pub fn metrics(&self, range: TimeRange, now: DateTime<Utc>) -> ListeningMetrics {
        let filtered = filter_by_range(&self.events, range, now);
        Aggregator::process(&filtered, self.extended, &self.extras)
    }

    pub fn events(&self) -> &[PlayEvent] {
        &self.events
    }

    pub fn is_extended(&self) -> bool {
        self.extended
    }

    pub fn extras(&self) -> &Extras {
        &self.extras
    }
}
