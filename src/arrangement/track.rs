// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Track lane model.

use serde::{Deserialize, Serialize};

/// An ordered, named, colorable timeline lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Opaque identifier, unique within the song for the session
    pub id: String,
    /// Display name
    pub name: String,
    /// UI color (e.g. "#3fa7d6"), if assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Track {
    /// Create a new track
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
        }
    }

    /// Builder: set color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_creation() {
        let track = Track::new("trk-1", "Bass").with_color("#ff0000");
        assert_eq!(track.id, "trk-1");
        assert_eq!(track.name, "Bass");
        assert_eq!(track.color.as_deref(), Some("#ff0000"));
    }
}
