//! Services for extraction, normalization and aggregation

pub mod aggregator;
pub mod archive;
pub mod data_loader;
pub mod extras_loader;
pub mod fun_facts;
pub mod normalizer;
pub mod range_filter;

pub use aggregator::Aggregator;
pub use archive::ArchiveExtractor;
pub use data_loader::{DataLoaderService, LoadResult};
pub use extras_loader::load_extras;
pub use fun_facts::{fun_fact_candidates, pick_fun_fact, pick_fun_fact_at};
pub use normalizer::{normalize_history, NormalizedHistory};
pub use range_filter::{filter_by_range, TimeRange};
