//! Archive extraction: zip containers and loose JSON files → [`FileBag`]

use std::io::{Cursor, Read};
use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, warn};
use zip::ZipArchive;

use crate::types::{FileBag, TunefactsError};

/// Collects input files into one filename → text bag.
///
/// Per-file failures are recorded and never stop the remaining files.
#[derive(Debug, Default)]
pub struct ArchiveExtractor {
    bag: FileBag,
    errors: Vec<TunefactsError>,
}

impl ArchiveExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one input file by name: `.zip` is unpacked, `.json` is stored as is,
    /// anything else is ignored
    pub fn add_file(&mut self, name: &str, bytes: &[u8]) {
        if name.ends_with(".zip") {
            self.add_zip(name, bytes);
        } else if name.ends_with(".json") {
            match decode_text(name, bytes.to_vec()) {
                Ok(text) => self.bag.insert(base_name(name), text),
                Err(e) => self.record(e),
            }
        } else {
            debug!(file = name, "ignoring non-json input");
        }
    }

    /// Read a file from disk and add it
    pub fn add_path(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match std::fs::read(path) {
            Ok(bytes) => self.add_file(&name, &bytes),
            Err(e) => self.record(TunefactsError::read(path.display().to_string(), e)),
        }
    }

    /// Unpack every `.json` entry of a zip container.
    ///
    /// Entries are decompressed and decoded in parallel; the bag is only
    /// written once all of them are done, in archive order.
    pub fn add_zip(&mut self, container: &str, bytes: &[u8]) {
        let archive = match ZipArchive::new(Cursor::new(bytes)) {
            Ok(a) => a,
            Err(e) => {
                self.record(TunefactsError::read(container, e));
                return;
            }
        };

        let entries: Vec<(String, Result<String, TunefactsError>)> = (0..archive.len())
            .into_par_iter()
            .filter_map(|index| read_entry(archive.clone(), index))
            .collect();

        debug!(container, entries = entries.len(), "extracted zip");

        for (name, text) in entries {
            match text {
                Ok(text) => self.bag.insert(name, text),
                Err(e) => self.record(e),
            }
        }
    }

    pub fn bag(&self) -> &FileBag {
        &self.bag
    }

    pub fn errors(&self) -> &[TunefactsError] {
        &self.errors
    }

    /// Hand back the assembled bag and any per-file read errors
    pub fn finish(self) -> (FileBag, Vec<TunefactsError>) {
        (self.bag, self.errors)
    }

    fn record(&mut self, error: TunefactsError) {
        warn!(error = %error, "skipping unreadable input");
        self.errors.push(error);
    }
}

/// Read one archive entry. `None` for directories and non-json entries.
fn read_entry(
    mut archive: ZipArchive<Cursor<&[u8]>>,
    index: usize,
) -> Option<(String, Result<String, TunefactsError>)> {
    let mut file = match archive.by_index(index) {
        Ok(f) => f,
        Err(e) => {
            let label = format!("entry #{}", index);
            return Some((label.clone(), Err(TunefactsError::read(label, e))));
        }
    };

    if file.is_dir() || file.name().contains("__MACOSX/") {
        return None;
    }

    let name = base_name(file.name()).to_string();
    if !name.ends_with(".json") {
        return None;
    }

    let mut buf = Vec::with_capacity(usize::try_from(file.size()).unwrap_or(0));
    let text = match file.read_to_end(&mut buf) {
        Ok(_) => decode_text(&name, buf),
        Err(e) => Err(TunefactsError::read(name.as_str(), e)),
    };
    Some((name, text))
}

/// Decode raw bytes as UTF-8, dropping a leading byte-order mark
fn decode_text(name: &str, bytes: Vec<u8>) -> Result<String, TunefactsError> {
    let mut text = String::from_utf8(bytes).map_err(|e| TunefactsError::read(name, e))?;
    if text.starts_with('\u{feff}') {
        text.drain(..'\u{feff}'.len_utf8());
    }
    Ok(text)
}

/// Strip any directory prefix from an archive path
fn base_name(path: &str) -> &str {
    path.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(path)
}
