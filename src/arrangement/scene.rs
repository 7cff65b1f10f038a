// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scene model: named timeline regions.

use serde::{Deserialize, Serialize};

/// A named region of the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Opaque identifier, unique within the song for the session
    pub id: String,
    /// Display name
    pub name: String,
    /// Region start in beats
    pub position: f64,
    /// Region length in beats
    pub length: f64,
}

impl Scene {
    /// Create a new scene
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: f64, length: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            length: length.max(1.0),
        }
    }

    /// Region end in beats
    pub fn end(&self) -> f64 {
        self.position + self.length
    }

    /// Whether a beat position falls inside this scene
    pub fn contains(&self, beat: f64) -> bool {
        beat >= self.position && beat < self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_region() {
        let scene = Scene::new("scn-1", "Intro", 16.0, 32.0);
        assert_eq!(scene.end(), 48.0);
        assert!(scene.contains(16.0));
        assert!(scene.contains(47.9));
        assert!(!scene.contains(48.0));
        assert!(!scene.contains(15.0));
    }

    #[test]
    fn test_length_floor() {
        let scene = Scene::new("scn-1", "Tiny", 0.0, 0.0);
        assert_eq!(scene.length, 1.0);
    }
}
