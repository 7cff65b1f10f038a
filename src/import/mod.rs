// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Import engine: CKS document song → internal arrangement model.
//!
//! One song is imported at a time. Patterns are gated through the
//! structural validators first; a pattern that fails the gate (or
//! fails typed deserialization, or breaks its own bar-count invariant)
//! is skipped and recorded in the result rather than aborting the
//! song. Tempo is copied verbatim with no bounds checking beyond
//! "finite and positive" — display-level bounds belong to the UI.

pub mod collection;

pub use collection::{import_collection, CollectionOutcome, CollectionResult, SongFailure};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::arrangement::{IdAllocator, Pattern, Scene, Song, Track};
use crate::document::CksDocument;
use crate::pattern::{bar_is_valid, pattern_is_valid, CksPattern};

/// Default length in beats for scenes that carry no explicit region.
const DEFAULT_SCENE_BEATS: f64 = 16.0;

/// Errors raised while importing a single song
#[derive(Debug, Error)]
pub enum ImportError {
    /// The requested song key does not exist in the document
    #[error("song '{0}' not found in document")]
    SongNotFound(String),
    /// The song's tempo is missing, non-finite, or not positive
    #[error("song '{song}' has invalid tempo: {found}")]
    InvalidTempo { song: String, found: String },
    /// A song collection has the wrong JSON kind
    #[error("song '{song}' has a malformed '{section}' section")]
    MalformedSection {
        song: String,
        section: &'static str,
    },
}

/// Summary of one song import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStats {
    /// Song display name
    pub song_name: String,
    /// Tempo in BPM
    pub tempo: u32,
    /// Tracks imported
    pub track_count: usize,
    /// Patterns imported
    pub pattern_count: usize,
    /// Scenes imported
    pub scene_count: usize,
    /// Pattern identifiers skipped by structural validation
    pub skipped_patterns: Vec<String>,
}

/// A constructed song plus its import summary
#[derive(Debug, Clone)]
pub struct ImportResult {
    /// The imported arrangement
    pub song: Song,
    /// Import summary
    pub stats: ImportStats,
}

/// Where on the timeline a pattern was placed by its scene
struct Placement {
    scene_id: String,
    position: f64,
    duration: f64,
    track_spec: Option<Value>,
}

/// Import one song from a parsed document into the internal model.
pub fn import_song(document: &CksDocument, song_key: &str) -> Result<ImportResult, ImportError> {
    let body = document
        .song(song_key)
        .ok_or_else(|| ImportError::SongNotFound(song_key.to_string()))?;

    let tempo = read_tempo(body, song_key)?;
    let mut ids = IdAllocator::new();
    let mut song = Song::new(song_key, tempo);

    import_tracks(body, song_key, &mut song, &mut ids)?;
    let placements = import_scenes(body, song_key, &mut song, &mut ids)?;

    let patterns = match body.get("patterns") {
        None => None,
        Some(value) => Some(value.as_object().ok_or(ImportError::MalformedSection {
            song: song_key.to_string(),
            section: "patterns",
        })?),
    };

    let mut skipped = Vec::new();
    if let Some(patterns) = patterns {
        // Fallback targets for patterns no scene claims
        if !patterns.is_empty() && song.track_count() == 0 {
            song.add_track(Track::new(ids.track_id(), "Track 1"));
        }
        if !patterns.is_empty() && song.scene_count() == 0 {
            song.add_scene(Scene::new(ids.scene_id(), "Main", 0.0, DEFAULT_SCENE_BEATS));
        }

        for (pattern_id, raw) in patterns {
            match build_pattern(pattern_id, raw, &song, &placements) {
                Some(pattern) => song.add_pattern(pattern),
                None => {
                    warn!(song = song_key, pattern = %pattern_id, "skipping invalid pattern");
                    skipped.push(pattern_id.clone());
                }
            }
        }
    }

    song.set_ui_meta(body.get("meta").cloned());

    let stats = ImportStats {
        song_name: song_key.to_string(),
        tempo,
        track_count: song.track_count(),
        pattern_count: song.pattern_count(),
        scene_count: song.scene_count(),
        skipped_patterns: skipped,
    };
    debug!(
        song = song_key,
        tracks = stats.track_count,
        patterns = stats.pattern_count,
        scenes = stats.scene_count,
        skipped = stats.skipped_patterns.len(),
        "song imported"
    );

    Ok(ImportResult { song, stats })
}

fn read_tempo(body: &Value, song_key: &str) -> Result<u32, ImportError> {
    let invalid = |found: String| ImportError::InvalidTempo {
        song: song_key.to_string(),
        found,
    };
    let tempo = body
        .get("tempo")
        .ok_or_else(|| invalid("missing".to_string()))?;
    let value = tempo
        .as_f64()
        .ok_or_else(|| invalid(tempo.to_string()))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(tempo.to_string()));
    }
    Ok(value as u32)
}

fn import_tracks(
    body: &Value,
    song_key: &str,
    song: &mut Song,
    ids: &mut IdAllocator,
) -> Result<(), ImportError> {
    let Some(tracks) = body.get("tracks") else {
        return Ok(());
    };
    let entries = tracks.as_array().ok_or(ImportError::MalformedSection {
        song: song_key.to_string(),
        section: "tracks",
    })?;

    for (index, entry) in entries.iter().enumerate() {
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Track {}", index + 1));
        let mut track = Track::new(ids.track_id(), name);
        if let Some(color) = entry.get("color").and_then(Value::as_str) {
            track = track.with_color(color);
        }
        song.add_track(track);
    }
    Ok(())
}

/// Import scenes and collect per-pattern placements from their
/// `patterns` sub-maps. Scenes without an explicit region are laid
/// out sequentially in [`DEFAULT_SCENE_BEATS`]-sized blocks.
fn import_scenes(
    body: &Value,
    song_key: &str,
    song: &mut Song,
    ids: &mut IdAllocator,
) -> Result<Vec<(String, Placement)>, ImportError> {
    let Some(scenes) = body.get("scenes") else {
        return Ok(Vec::new());
    };
    let entries = scenes.as_object().ok_or(ImportError::MalformedSection {
        song: song_key.to_string(),
        section: "scenes",
    })?;

    let mut placements = Vec::new();
    for (index, (scene_name, scene_body)) in entries.iter().enumerate() {
        let position = scene_body
            .get("position")
            .and_then(Value::as_f64)
            .unwrap_or(index as f64 * DEFAULT_SCENE_BEATS);
        let length = scene_body
            .get("length")
            .and_then(Value::as_f64)
            .unwrap_or(DEFAULT_SCENE_BEATS);
        let scene = Scene::new(ids.scene_id(), scene_name, position, length);

        if let Some(placed) = scene_body.get("patterns").and_then(Value::as_object) {
            for (pattern_id, placement) in placed {
                placements.push((
                    pattern_id.clone(),
                    Placement {
                        scene_id: scene.id.clone(),
                        position,
                        duration: length,
                        track_spec: placement.get("track").cloned(),
                    },
                ));
            }
        }
        song.add_scene(scene);
    }
    Ok(placements)
}

/// Gate, parse, and place one raw pattern. `None` means skip.
fn build_pattern(
    pattern_id: &str,
    raw: &Value,
    song: &Song,
    placements: &[(String, Placement)],
) -> Option<Pattern> {
    if !pattern_is_valid(raw) {
        return None;
    }
    let bars = raw.get("bars")?.as_array()?;
    if !bars.iter().all(bar_is_valid) {
        return None;
    }
    let data: CksPattern = serde_json::from_value(raw.clone()).ok()?;
    if !data.is_consistent() {
        return None;
    }

    let placement = placements.iter().find(|(id, _)| id == pattern_id);
    let (scene_id, position, duration, track_spec) = match placement {
        Some((_, p)) => (
            p.scene_id.clone(),
            p.position,
            p.duration,
            p.track_spec.as_ref(),
        ),
        None => {
            let scene = song.scenes().first()?;
            (scene.id.clone(), scene.position, scene.length, None)
        }
    };
    let track_id = resolve_track_id(song, track_spec, data.creator_track)?;

    Some(Pattern {
        id: pattern_id.to_string(),
        track_id,
        scene_id,
        position,
        duration,
        data,
    })
}

/// Resolve a placement's track reference to a track id.
///
/// A string refers to a track by name, a number by index. A missing
/// spec falls back to the pattern's creator track, then the first
/// track. A spec that names a nonexistent track is unresolvable.
fn resolve_track_id(song: &Song, spec: Option<&Value>, creator_track: u32) -> Option<String> {
    match spec {
        Some(Value::String(name)) => song.track_by_name(name).map(|t| t.id.clone()),
        Some(value) if value.is_u64() => {
            let index = value.as_u64()? as usize;
            song.tracks().get(index).map(|t| t.id.clone())
        }
        Some(_) => None,
        None => song
            .tracks()
            .get(creator_track as usize)
            .or_else(|| song.tracks().first())
            .map(|t| t.id.clone()),
    }
}
