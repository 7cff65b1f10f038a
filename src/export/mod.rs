// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Export engine: internal arrangement model → CKS document.
//!
//! The inverse of the import engine. Every pattern is checked against
//! the hardware's invariants before anything is emitted; a violation
//! is a hard [`ExportError`], never silent padding or truncation.
//! Step arrays are fixed `[T; 16]` fields in the model, so the
//! remaining run-time checks are bar count, the `bar_count` field, and
//! reference resolution.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::arrangement::Song;
use crate::document::CksDocument;
use crate::pattern::MAX_BARS;

/// Errors raised while exporting a song
#[derive(Debug, Error)]
pub enum ExportError {
    /// A pattern has more bars than the hardware allows
    #[error("pattern '{pattern}' has {count} bars; the hardware limit is {MAX_BARS}")]
    TooManyBars { pattern: String, count: usize },
    /// A pattern has no bars at all
    #[error("pattern '{pattern}' has no bars")]
    EmptyPattern { pattern: String },
    /// A pattern's declared bar count disagrees with its bars
    #[error("pattern '{pattern}' declares {declared} bars but holds {actual}")]
    BarCountMismatch {
        pattern: String,
        declared: u32,
        actual: usize,
    },
    /// A pattern references a track id that is not in the song
    #[error("pattern '{pattern}' references unknown track '{track}'")]
    UnknownTrack { pattern: String, track: String },
    /// A pattern references a scene id that is not in the song
    #[error("pattern '{pattern}' references unknown scene '{scene}'")]
    UnknownScene { pattern: String, scene: String },
    /// Pattern data failed to serialize
    #[error("failed to serialize pattern data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Options controlling a song export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Name the song is stored under in the document
    pub song_name: String,
    /// Whether to include the opaque UI metadata block
    pub include_ui_meta: bool,
}

impl ExportOptions {
    /// Create options for the given song name
    pub fn new(song_name: impl Into<String>) -> Self {
        Self {
            song_name: song_name.into(),
            include_ui_meta: true,
        }
    }

    /// Builder: toggle UI metadata inclusion
    pub fn with_ui_meta(mut self, include: bool) -> Self {
        self.include_ui_meta = include;
        self
    }
}

/// Export one song to a fresh CKS document.
pub fn export_song(song: &Song, options: &ExportOptions) -> Result<CksDocument, ExportError> {
    validate(song)?;

    let mut body = Map::new();
    body.insert("tempo".to_string(), Value::from(song.tempo()));
    body.insert("tracks".to_string(), export_tracks(song));
    body.insert("patterns".to_string(), export_patterns(song)?);
    body.insert("scenes".to_string(), export_scenes(song));
    if options.include_ui_meta {
        if let Some(meta) = song.ui_meta() {
            body.insert("meta".to_string(), meta.clone());
        }
    }

    let mut songs = Map::new();
    songs.insert(options.song_name.clone(), Value::Object(body));

    debug!(
        song = %options.song_name,
        patterns = song.pattern_count(),
        "song exported"
    );
    Ok(CksDocument::from_songs(songs))
}

fn validate(song: &Song) -> Result<(), ExportError> {
    for (id, pattern) in song.patterns() {
        let bars = pattern.data.bars.len();
        if bars == 0 {
            return Err(ExportError::EmptyPattern {
                pattern: id.clone(),
            });
        }
        if bars > MAX_BARS {
            return Err(ExportError::TooManyBars {
                pattern: id.clone(),
                count: bars,
            });
        }
        if pattern.data.bar_count as usize != bars {
            return Err(ExportError::BarCountMismatch {
                pattern: id.clone(),
                declared: pattern.data.bar_count,
                actual: bars,
            });
        }
        if song.track(&pattern.track_id).is_none() {
            return Err(ExportError::UnknownTrack {
                pattern: id.clone(),
                track: pattern.track_id.clone(),
            });
        }
        if song.scene(&pattern.scene_id).is_none() {
            return Err(ExportError::UnknownScene {
                pattern: id.clone(),
                scene: pattern.scene_id.clone(),
            });
        }
    }
    Ok(())
}

fn export_tracks(song: &Song) -> Value {
    let tracks: Vec<Value> = song
        .tracks()
        .iter()
        .map(|track| {
            let mut entry = Map::new();
            entry.insert("name".to_string(), Value::from(track.name.clone()));
            if let Some(color) = &track.color {
                entry.insert("color".to_string(), Value::from(color.clone()));
            }
            Value::Object(entry)
        })
        .collect();
    Value::Array(tracks)
}

fn export_patterns(song: &Song) -> Result<Value, ExportError> {
    let mut patterns = Map::new();
    for (id, pattern) in song.patterns() {
        patterns.insert(id.clone(), serde_json::to_value(&pattern.data)?);
    }
    Ok(Value::Object(patterns))
}

/// Rebuild the scene objects, mapping each placed pattern back to its
/// track by display name. References were validated beforehand.
fn export_scenes(song: &Song) -> Value {
    let mut scenes = Map::new();
    for scene in song.scenes() {
        let mut placed = Map::new();
        for (id, pattern) in song.patterns() {
            if pattern.scene_id != scene.id {
                continue;
            }
            let track_name = song
                .track(&pattern.track_id)
                .map(|t| t.name.clone())
                .unwrap_or_default();
            let mut placement = Map::new();
            placement.insert("track".to_string(), Value::from(track_name));
            placed.insert(id.clone(), Value::Object(placement));
        }

        let mut entry = Map::new();
        entry.insert("position".to_string(), Value::from(scene.position));
        entry.insert("length".to_string(), Value::from(scene.length));
        entry.insert("patterns".to_string(), Value::Object(placed));
        scenes.insert(scene.name.clone(), Value::Object(entry));
    }
    Value::Object(scenes)
}
