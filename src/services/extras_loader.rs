//! Best-effort loading of the auxiliary export documents

use serde_json::Value;
use tracing::{debug, warn};

use crate::types::{Extras, ExtrasField, FileBag};

/// How an extras document is located in the bag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMatch {
    /// File named exactly this
    Exact(&'static str),
    /// First file (bag order) with this prefix that parses
    Prefix(&'static str),
}

impl FileMatch {
    fn matches(&self, name: &str) -> bool {
        match self {
            FileMatch::Exact(n) => name == *n,
            FileMatch::Prefix(p) => name.starts_with(p),
        }
    }
}

/// Known extras documents. Adding a document type is a new row here.
pub const EXTRAS_SOURCES: &[(ExtrasField, FileMatch)] = &[
    (ExtrasField::Identity, FileMatch::Exact("Identity.json")),
    (ExtrasField::Follow, FileMatch::Exact("Follow.json")),
    (ExtrasField::Playlists, FileMatch::Exact("Playlist1.json")),
    (ExtrasField::Marquee, FileMatch::Exact("Marquee.json")),
    (ExtrasField::Wrapped, FileMatch::Prefix("Wrapped")),
    (ExtrasField::Library, FileMatch::Exact("YourLibrary.json")),
    (ExtrasField::Capsule, FileMatch::Exact("YourSoundCapsule.json")),
];

/// Load every known extras document. Never fails; a missing or malformed
/// document leaves only its own field empty.
pub fn load_extras(bag: &FileBag) -> Extras {
    let mut extras = Extras::default();
    for &(field, file_match) in EXTRAS_SOURCES {
        extras.set(field, find_document(bag, file_match));
    }
    extras
}

/// First matching file in bag order that parses as JSON
fn find_document(bag: &FileBag, file_match: FileMatch) -> Option<Value> {
    bag.iter()
        .filter(|(name, _)| file_match.matches(name))
        .find_map(|(name, text)| match serde_json::from_str::<Value>(text) {
            Ok(value) => {
                debug!(file = name, "loaded extras document");
                Some(value)
            }
            Err(e) => {
                warn!(file = name, error = %e, "ignoring malformed extras document");
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(files: &[(&str, &str)]) -> FileBag {
        files.iter().copied().collect()
    }

    #[test]
    fn test_empty_bag_all_none() {
        assert_eq!(load_extras(&FileBag::new()), Extras::default());
    }

    #[test]
    fn test_every_source_loaded() {
        let b = bag(&[
            ("Identity.json", r#"{"displayName":"me"}"#),
            ("Follow.json", r#"{"userIsFollowing":[]}"#),
            ("Playlist1.json", r#"{"playlists":[]}"#),
            ("Marquee.json", r#"[]"#),
            ("Wrapped2024.json", r#"{"clubs":{}}"#),
            ("YourLibrary.json", r#"{"tracks":[]}"#),
            ("YourSoundCapsule.json", r#"{"stats":[]}"#),
        ]);

        let extras = load_extras(&b);
        for &(field, _) in EXTRAS_SOURCES {
            assert!(extras.get(field).is_some(), "{:?} not loaded", field);
        }
        assert_eq!(extras.identity, Some(json!({"displayName": "me"})));
    }

    #[test]
    fn test_corrupt_document_isolated() {
        let b = bag(&[
            ("Identity.json", "{not json"),
            ("Follow.json", r#"{"userIsFollowing":["a"]}"#),
        ]);

        let extras = load_extras(&b);
        assert!(extras.identity.is_none());
        assert_eq!(extras.follow, Some(json!({"userIsFollowing": ["a"]})));
    }

    #[test]
    fn test_wrapped_first_parseable_prefix_match() {
        let b = bag(&[
            ("Wrapped2023.json", "broken"),
            ("Wrapped2024.json", r#"{"year":2024}"#),
            ("Wrapped2025.json", r#"{"year":2025}"#),
        ]);
        assert_eq!(load_extras(&b).wrapped, Some(json!({"year": 2024})));
    }

    #[test]
    fn test_marquee_requires_exact_name() {
        let b = bag(&[("Marquee_2024.json", "[]")]);
        assert!(load_extras(&b).marquee.is_none());
    }

    #[test]
    fn test_other_playlist_files_ignored() {
        let b = bag(&[("Playlist2.json", r#"{"playlists":[]}"#)]);
        assert!(load_extras(&b).playlists.is_none());
    }
}
