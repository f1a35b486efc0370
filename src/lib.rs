//! Listening statistics from a streaming-history export
//!
//! The pipeline: [`services::ArchiveExtractor`] builds a [`types::FileBag`],
//! [`services::normalize_history`] and [`services::load_extras`] read it,
//! [`services::filter_by_range`] narrows the events and
//! [`services::Aggregator`] produces the [`types::ListeningMetrics`].

pub mod cli;
pub mod parsers;
pub mod services;
pub mod types;
