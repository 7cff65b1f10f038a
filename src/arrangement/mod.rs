// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Internal arrangement model.
//!
//! This module provides:
//! - Tracks: ordered, named, colorable timeline lanes
//! - Scenes: named timeline regions
//! - Songs: tempo plus tracks, patterns, and scenes
//! - Session-unique identifier allocation

pub mod scene;
pub mod song;
pub mod track;

pub use scene::Scene;
pub use song::{Pattern, Song};
pub use track::Track;

/// Allocates opaque identifiers for model objects.
///
/// Counters only ever move forward, so an id freed by deletion is
/// never handed out again within a session.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next_track: u64,
    next_scene: u64,
    next_pattern: u64,
}

impl IdAllocator {
    /// Create a fresh allocator
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a track id
    pub fn track_id(&mut self) -> String {
        self.next_track += 1;
        format!("trk-{}", self.next_track)
    }

    /// Allocate a scene id
    pub fn scene_id(&mut self) -> String {
        self.next_scene += 1;
        format!("scn-{}", self.next_scene)
    }

    /// Allocate a pattern id
    pub fn pattern_id(&mut self) -> String {
        self.next_pattern += 1;
        format!("pat-{}", self.next_pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_monotonic() {
        let mut ids = IdAllocator::new();
        let a = ids.track_id();
        let b = ids.track_id();
        assert_ne!(a, b);
        assert_eq!(a, "trk-1");
        assert_eq!(b, "trk-2");
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.track_id(), "trk-1");
        assert_eq!(ids.scene_id(), "scn-1");
        assert_eq!(ids.pattern_id(), "pat-1");
    }
}
