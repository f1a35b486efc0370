//! Ordered filename → text mapping built by the archive extractor

use std::collections::HashMap;

/// Raw file contents keyed by base filename.
///
/// Iteration follows first-insertion order. Inserting an existing name
/// replaces its text but keeps its original position, so first-match scans
/// over the bag stay deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileBag {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl FileBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a file
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        let name = name.into();
        let text = text.into();
        match self.index.get(&name) {
            Some(&i) => self.entries[i].1 = text,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, text));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, text)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl<N: Into<String>, T: Into<String>> FromIterator<(N, T)> for FileBag {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut bag = FileBag::new();
        for (name, text) in iter {
            bag.insert(name, text);
        }
        bag
    }
}
