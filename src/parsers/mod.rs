//! Parser trait and implementations for the two streaming-history export schemas

mod extended;
mod standard;

pub use extended::ExtendedHistoryParser;
pub use standard::StandardHistoryParser;

use crate::types::{FileBag, PlayEvent, Result, TunefactsError};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

/// Trait for parsing one history export schema
pub trait HistoryParser: Send + Sync {
    /// Parser name (e.g., "extended")
    fn name(&self) -> &str;

    /// Filename prefix identifying this schema's history files
    fn file_prefix(&self) -> &str;

    /// Convert one raw JSON record; `None` drops the record
    fn parse_record(&self, record: Value) -> Option<PlayEvent>;

    /// Whether a bag entry is a history file of this schema
    fn matches(&self, file_name: &str) -> bool {
        file_name.starts_with(self.file_prefix()) && file_name.ends_with(".json")
    }

    /// Whether any file in the bag belongs to this schema
    fn detect(&self, bag: &FileBag) -> bool {
        bag.names().any(|n| self.matches(n))
    }

    /// Parse one history file's text
    fn parse_text(&self, text: &str) -> Result<Vec<PlayEvent>> {
        let records = parse_records(text)?;
        Ok(records
            .into_iter()
            .filter_map(|r| self.parse_record(r))
            .collect())
    }

    /// Parse every matching file in bag order. Unparseable files are skipped.
    fn parse_bag(&self, bag: &FileBag) -> Vec<PlayEvent> {
        let mut events = Vec::new();

        for (name, text) in bag.iter().filter(|(n, _)| self.matches(n)) {
            match self.parse_text(text) {
                Ok(parsed) => {
                    debug!(file = name, events = parsed.len(), parser = self.name(), "parsed history file");
                    events.extend(parsed);
                }
                Err(e) => warn!(file = name, error = %e, "skipping unparseable history file"),
            }
        }

        events
    }
}

/// Registry of history parsers, in detection precedence order
pub struct ParserRegistry {
    parsers: Vec<Box<dyn HistoryParser>>,
}

impl ParserRegistry {
    /// Extended schema first, standard schema as fallback
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(ExtendedHistoryParser),
                Box::new(StandardHistoryParser),
            ],
        }
    }

    pub fn parsers(&self) -> &[Box<dyn HistoryParser>] {
        &self.parsers
    }

    /// First parser whose files are present in the bag
    pub fn detect(&self, bag: &FileBag) -> Option<&dyn HistoryParser> {
        self.parsers
            .iter()
            .find(|p| p.detect(bag))
            .map(|p| p.as_ref())
    }

    pub fn get(&self, name: &str) -> Option<&dyn HistoryParser> {
        self.parsers
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a history file into its top-level array of raw records
fn parse_records(text: &str) -> Result<Vec<Value>> {
    let mut bytes = text.as_bytes().to_vec();
    simd_json::from_slice(&mut bytes).map_err(|e| TunefactsError::Parse(e.to_string()))
}

/// Playback milliseconds: negative, fractional, null or non-numeric values
/// collapse to a non-negative integer (0 when unusable)
fn lenient_ms<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        _ => 0,
    })
}
