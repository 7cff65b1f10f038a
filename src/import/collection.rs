// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Batch import of every song in a CKS document.
//!
//! Songs are processed sequentially so that the persistence callback
//! for song N completes (or fails and is recorded) before song N+1
//! begins. A failure in either the import or the persist step is
//! recorded against that song and the batch continues; the loop is a
//! Result-collecting fold, and one bad song never aborts the batch.

use tracing::{debug, warn};

use super::{import_song, ImportResult};
use crate::document::CksDocument;

/// Top-level condition of a batch import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionOutcome {
    /// The document contained songs and the batch ran to completion
    Completed,
    /// The document contained no songs at all
    NoSongs,
}

/// One song's failure within a batch
#[derive(Debug, Clone, PartialEq)]
pub struct SongFailure {
    /// Song display name
    pub song_name: String,
    /// Human-readable failure description
    pub error: String,
}

/// Summary of a batch import
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionResult {
    /// Songs imported and persisted
    pub success_count: usize,
    /// Songs that failed import or persistence
    pub failure_count: usize,
    /// Names of the successfully persisted songs
    pub song_names: Vec<String>,
    /// Per-song failures, in processing order
    pub errors: Vec<SongFailure>,
    /// Whether there was anything to process
    pub outcome: CollectionOutcome,
}

impl CollectionResult {
    /// Whether the document contained no songs
    pub fn no_songs(&self) -> bool {
        self.outcome == CollectionOutcome::NoSongs
    }
}

/// Import every song in the document, up to `max_songs`.
///
/// `persist` is called once per successfully imported song and returns
/// the storage identifier it assigned; its side effects are the
/// caller's responsibility. Always returns a [`CollectionResult`],
/// even in total failure — callers distinguish "no songs found" from
/// "all songs failed" via [`CollectionResult::outcome`].
pub fn import_collection<F>(
    document: &CksDocument,
    max_songs: usize,
    mut persist: F,
) -> CollectionResult
where
    F: FnMut(&str, &ImportResult) -> anyhow::Result<String>,
{
    let names: Vec<String> = document
        .song_names()
        .into_iter()
        .take(max_songs)
        .map(str::to_string)
        .collect();

    if document.is_empty() {
        return CollectionResult {
            success_count: 0,
            failure_count: 0,
            song_names: Vec::new(),
            errors: Vec::new(),
            outcome: CollectionOutcome::NoSongs,
        };
    }

    let mut result = CollectionResult {
        success_count: 0,
        failure_count: 0,
        song_names: Vec::new(),
        errors: Vec::new(),
        outcome: CollectionOutcome::Completed,
    };

    for name in names {
        let stored = import_song(document, &name)
            .map_err(anyhow::Error::from)
            .and_then(|imported| {
                let id = persist(&name, &imported)?;
                Ok((imported, id))
            });

        match stored {
            Ok((imported, id)) => {
                debug!(
                    song = %name,
                    id = %id,
                    patterns = imported.stats.pattern_count,
                    "song persisted"
                );
                result.success_count += 1;
                result.song_names.push(name);
            }
            Err(error) => {
                warn!(song = %name, %error, "song failed during batch import");
                result.failure_count += 1;
                result.errors.push(SongFailure {
                    song_name: name,
                    error: error.to_string(),
                });
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;
    use crate::pattern::CksPattern;
    use serde_json::json;

    fn song_body(tempo: serde_json::Value) -> serde_json::Value {
        json!({
            "tempo": tempo,
            "tracks": [{"name": "Track 1"}],
            "patterns": {"p1": serde_json::to_value(CksPattern::new(0)).unwrap()},
            "scenes": {"A": {"patterns": {"p1": {"track": 0}}}}
        })
    }

    #[test]
    fn test_all_songs_succeed() {
        let doc = parse_document(
            &json!({
                "One": song_body(json!(100)),
                "Two": song_body(json!(110))
            })
            .to_string(),
        )
        .unwrap();

        let mut persisted = Vec::new();
        let result = import_collection(&doc, 64, |name, imported| {
            persisted.push((name.to_string(), imported.stats.tempo));
            Ok(format!("id-{}", persisted.len()))
        });

        assert_eq!(result.success_count, 2);
        assert_eq!(result.failure_count, 0);
        assert_eq!(result.outcome, CollectionOutcome::Completed);
        assert_eq!(persisted.len(), 2);
    }

    #[test]
    fn test_bad_song_does_not_abort_batch() {
        let doc = parse_document(
            &json!({
                "Song 1": song_body(json!(100)),
                "Song 2": song_body(json!("broken")),
                "Song 3": song_body(json!(120))
            })
            .to_string(),
        )
        .unwrap();

        let mut persisted = Vec::new();
        let result = import_collection(&doc, 64, |name, _| {
            persisted.push(name.to_string());
            Ok(name.to_string())
        });

        assert_eq!(result.success_count, 2);
        assert_eq!(result.failure_count, 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].song_name, "Song 2");
        assert!(persisted.contains(&"Song 1".to_string()));
        assert!(persisted.contains(&"Song 3".to_string()));
        assert!(!persisted.contains(&"Song 2".to_string()));
    }

    #[test]
    fn test_persist_failure_is_isolated() {
        let doc = parse_document(
            &json!({
                "Keep": song_body(json!(100)),
                "Reject": song_body(json!(100))
            })
            .to_string(),
        )
        .unwrap();

        let result = import_collection(&doc, 64, |name, _| {
            if name == "Reject" {
                anyhow::bail!("storage full");
            }
            Ok("id".to_string())
        });

        assert_eq!(result.success_count, 1);
        assert_eq!(result.failure_count, 1);
        assert_eq!(result.errors[0].song_name, "Reject");
        assert!(result.errors[0].error.contains("storage full"));
        assert_eq!(result.song_names, vec!["Keep".to_string()]);
    }

    #[test]
    fn test_zero_songs_is_not_an_error() {
        let doc = parse_document("{}").unwrap();
        let result = import_collection(&doc, 64, |_, _| Ok("id".to_string()));
        assert_eq!(result.success_count, 0);
        assert_eq!(result.failure_count, 0);
        assert!(result.no_songs());
    }

    #[test]
    fn test_max_songs_limit() {
        let doc = parse_document(
            &json!({
                "A": song_body(json!(100)),
                "B": song_body(json!(100)),
                "C": song_body(json!(100))
            })
            .to_string(),
        )
        .unwrap();

        let result = import_collection(&doc, 2, |name, _| Ok(name.to_string()));
        assert_eq!(result.success_count, 2);
        assert_eq!(result.outcome, CollectionOutcome::Completed);
    }
}
