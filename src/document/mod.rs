// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! CKS document parsing and validation.
//!
//! A CKS document is a JSON object mapping song display names to song
//! bodies. Keys beginning with `_` are reserved; `_version` carries the
//! format version. Song bodies are held as raw JSON so that fields the
//! converter does not interpret round-trip untouched.

use serde_json::{Map, Value};
use thiserror::Error;

/// Current format version written on export.
pub const FORMAT_VERSION: u64 = 2;

/// Oldest format version this converter understands. Version 0 used an
/// incompatible legacy layout and fails fast.
pub const MIN_FORMAT_VERSION: u64 = 1;

/// Errors raised while parsing a CKS document
#[derive(Debug, Error)]
pub enum FormatError {
    /// The text is not syntactically valid JSON
    #[error("document is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    /// The root is not an object keyed by song name
    #[error("document root must be an object keyed by song name")]
    NotAnObject,
    /// A song entry's value is not an object
    #[error("song entry '{0}' is not an object")]
    MalformedSong(String),
    /// The version marker is present but not an integer
    #[error("format version marker is not an integer")]
    BadVersionMarker,
    /// The document uses a version this converter cannot read
    #[error("unsupported format version {0} (oldest supported is {MIN_FORMAT_VERSION})")]
    UnsupportedVersion(u64),
}

/// A parsed, version-checked CKS document.
///
/// Song bodies stay as raw [`Value`]s; typed interpretation happens in
/// the import engine so that unknown fields survive a round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct CksDocument {
    version: u64,
    songs: Map<String, Value>,
    reserved: Map<String, Value>,
}

/// Parse raw text as a CKS document.
///
/// Fails with [`FormatError`] if the text is not valid JSON, the root
/// is not a song-keyed object, or the version marker is incompatible.
/// Unknown future versions are accepted; their forward-compatible
/// fields are carried opaquely.
pub fn parse_document(text: &str) -> Result<CksDocument, FormatError> {
    let root: Value = serde_json::from_str(text)?;
    let Value::Object(mut root) = root else {
        return Err(FormatError::NotAnObject);
    };

    let version = match root.remove("_version") {
        Some(marker) => marker.as_u64().ok_or(FormatError::BadVersionMarker)?,
        None => FORMAT_VERSION,
    };
    if version < MIN_FORMAT_VERSION {
        return Err(FormatError::UnsupportedVersion(version));
    }

    let mut songs = Map::new();
    let mut reserved = Map::new();
    for (key, value) in root {
        if key.starts_with('_') {
            reserved.insert(key, value);
            continue;
        }
        if !value.is_object() {
            return Err(FormatError::MalformedSong(key));
        }
        songs.insert(key, value);
    }

    Ok(CksDocument {
        version,
        songs,
        reserved,
    })
}

impl CksDocument {
    /// Create a document from pre-built song bodies (export path)
    pub fn from_songs(songs: Map<String, Value>) -> Self {
        Self {
            version: FORMAT_VERSION,
            songs,
            reserved: Map::new(),
        }
    }

    /// Format version of this document
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Song names in iteration order.
    ///
    /// The order is an implementation detail of the underlying map and
    /// not a contract with callers.
    pub fn song_names(&self) -> Vec<&str> {
        self.songs.keys().map(String::as_str).collect()
    }

    /// Number of songs in the document
    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    /// Whether the document contains no songs
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Get a song body by name
    pub fn song(&self, name: &str) -> Option<&Value> {
        self.songs.get(name)
    }

    /// Rebuild the root JSON value, version marker included
    pub fn to_value(&self) -> Value {
        let mut root = Map::new();
        root.insert("_version".to_string(), Value::from(self.version));
        for (key, value) in &self.reserved {
            root.insert(key.clone(), value.clone());
        }
        for (name, body) in &self.songs {
            root.insert(name.clone(), body.clone());
        }
        Value::Object(root)
    }

    /// Serialize to pretty-printed JSON suitable for writing to disk
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let doc = parse_document(r#"{"_version": 2, "My Song": {"tempo": 120}}"#).unwrap();
        assert_eq!(doc.version(), 2);
        assert_eq!(doc.song_names(), vec!["My Song"]);
        assert_eq!(doc.song("My Song").unwrap()["tempo"], 120);
    }

    #[test]
    fn test_missing_version_defaults_to_current() {
        let doc = parse_document(r#"{"Song": {}}"#).unwrap();
        assert_eq!(doc.version(), FORMAT_VERSION);
    }

    #[test]
    fn test_future_version_is_accepted() {
        let doc = parse_document(r#"{"_version": 9, "Song": {}}"#).unwrap();
        assert_eq!(doc.version(), 9);
    }

    #[test]
    fn test_legacy_version_fails_fast() {
        let err = parse_document(r#"{"_version": 0, "Song": {}}"#).unwrap_err();
        assert!(matches!(err, FormatError::UnsupportedVersion(0)));
    }

    #[test]
    fn test_bad_version_marker() {
        let err = parse_document(r#"{"_version": "two", "Song": {}}"#).unwrap_err();
        assert!(matches!(err, FormatError::BadVersionMarker));
    }

    #[test]
    fn test_invalid_json_fails() {
        assert!(matches!(
            parse_document("not json at all"),
            Err(FormatError::Syntax(_))
        ));
    }

    #[test]
    fn test_non_object_root_fails() {
        assert!(matches!(
            parse_document("[1, 2, 3]"),
            Err(FormatError::NotAnObject)
        ));
    }

    #[test]
    fn test_non_object_song_fails() {
        let err = parse_document(r#"{"Song": 42}"#).unwrap_err();
        match err {
            FormatError::MalformedSong(name) => assert_eq!(name, "Song"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_reserved_keys_round_trip() {
        let doc = parse_document(r#"{"_notes": "hi", "Song": {}}"#).unwrap();
        assert_eq!(doc.song_count(), 1);
        let value = doc.to_value();
        assert_eq!(value["_notes"], "hi");
        assert_eq!(value["_version"], FORMAT_VERSION);
    }

    #[test]
    fn test_empty_document() {
        let doc = parse_document("{}").unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.song_count(), 0);
    }
}
