// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Song model: the internal arrangement aggregate.
//!
//! A song owns its tracks (ordered), scenes (ordered), and patterns
//! (unordered, keyed by id). Each pattern places one hardware pattern
//! on the timeline by referencing exactly one track and one scene.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::scene::Scene;
use super::track::Track;
use crate::pattern::CksPattern;

/// A hardware pattern placed on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// Opaque identifier, unique within the song for the session
    pub id: String,
    /// Identifier of the track this pattern sits on
    pub track_id: String,
    /// Identifier of the scene this pattern belongs to
    pub scene_id: String,
    /// Timeline position in beats
    pub position: f64,
    /// Duration in beats
    pub duration: f64,
    /// The hardware pattern data
    pub data: CksPattern,
}

/// A complete arrangement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Song name
    name: String,
    /// Tempo in BPM
    tempo: u32,
    /// Tracks in display order
    tracks: Vec<Track>,
    /// Patterns keyed by identifier
    patterns: HashMap<String, Pattern>,
    /// Scenes in timeline order
    scenes: Vec<Scene>,
    /// Opaque UI metadata carried through import/export untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ui_meta: Option<Value>,
}

impl Song {
    /// Create a new empty song
    pub fn new(name: impl Into<String>, tempo: u32) -> Self {
        Self {
            name: name.into(),
            tempo,
            tracks: Vec::new(),
            patterns: HashMap::new(),
            scenes: Vec::new(),
            ui_meta: None,
        }
    }

    /// Get song name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get tempo in BPM
    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    /// Set tempo in BPM
    pub fn set_tempo(&mut self, tempo: u32) {
        self.tempo = tempo;
    }

    /// Tracks in display order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Scenes in timeline order
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Patterns keyed by identifier
    pub fn patterns(&self) -> &HashMap<String, Pattern> {
        &self.patterns
    }

    /// Opaque UI metadata, if present
    pub fn ui_meta(&self) -> Option<&Value> {
        self.ui_meta.as_ref()
    }

    /// Set the opaque UI metadata block
    pub fn set_ui_meta(&mut self, meta: Option<Value>) {
        self.ui_meta = meta;
    }

    /// Add a track
    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Add a scene
    pub fn add_scene(&mut self, scene: Scene) {
        self.scenes.push(scene);
    }

    /// Add a pattern, replacing any previous pattern with the same id
    pub fn add_pattern(&mut self, pattern: Pattern) {
        self.patterns.insert(pattern.id.clone(), pattern);
    }

    /// Remove a pattern by id
    pub fn remove_pattern(&mut self, id: &str) -> Option<Pattern> {
        self.patterns.remove(id)
    }

    /// Look up a track by id
    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Look up a track by display name
    pub fn track_by_name(&self, name: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.name == name)
    }

    /// Look up a scene by id
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    /// Number of tracks
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Number of patterns
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Number of scenes
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Builder: add a track
    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    /// Builder: add a scene
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scenes.push(scene);
        self
    }

    /// Builder: add a pattern
    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.add_pattern(pattern);
        self
    }
}
