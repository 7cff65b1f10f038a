// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Hardware pattern data model.
//!
//! This module provides:
//! - Bars: fixed 16-step parameter arrays with playback scalars
//! - Patterns: bar sequences with aux assignments and accumulators
//! - Structural validators gating raw data before deserialization

pub mod accumulator;
pub mod bar;
pub mod validate;

pub use accumulator::{AccumulatorChannel, AccumulatorConfig, AccumulatorMode, OverflowPolicy};
pub use bar::{Bar, Direction, STEP_COUNT};
pub use validate::{bar_is_valid, pattern_is_valid, STEP_ARRAY_FIELDS};

use serde::{Deserialize, Serialize};

/// Type marker carried by every pattern object on the wire.
pub const PATTERN_TYPE: &str = "P3";

/// Maximum number of bars in a pattern.
pub const MAX_BARS: usize = 16;

/// A hardware pattern: an ordered sequence of 1-16 bars plus
/// pattern-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CksPattern {
    /// Type marker, always [`PATTERN_TYPE`]
    #[serde(rename = "type")]
    pub kind: String,
    /// Index of the track that created this pattern on the hardware
    pub creator_track: u32,
    /// Whether the pattern has been saved on the hardware
    pub saved: bool,
    /// Declared bar count; must equal `bars.len()`
    pub bar_count: u32,
    /// The bars, in playback order
    pub bars: Vec<Bar>,
    /// Aux channel assignments in A-D order (e.g. a MIDI CC mapping)
    #[serde(default)]
    pub aux_assign: [String; 4],
    /// Loop start bar (1-based), if a loop range is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_start: Option<u8>,
    /// Loop end bar (1-based), if a loop range is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_end: Option<u8>,
    /// Accumulator configuration, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accumulator: Option<AccumulatorConfig>,
}

impl CksPattern {
    /// Create a single-bar pattern for the given creator track
    pub fn new(creator_track: u32) -> Self {
        Self {
            kind: PATTERN_TYPE.to_string(),
            creator_track,
            saved: false,
            bar_count: 1,
            bars: vec![Bar::new()],
            aux_assign: Default::default(),
            loop_start: None,
            loop_end: None,
            accumulator: None,
        }
    }

    /// Append a bar, keeping `bar_count` in step
    pub fn push_bar(&mut self, bar: Bar) {
        self.bars.push(bar);
        self.bar_count = self.bars.len() as u32;
    }

    /// Whether the pattern satisfies its own invariants: correct type
    /// marker, 1-16 bars, and a `bar_count` that matches.
    pub fn is_consistent(&self) -> bool {
        self.kind == PATTERN_TYPE
            && !self.bars.is_empty()
            && self.bars.len() <= MAX_BARS
            && self.bar_count as usize == self.bars.len()
    }

    /// Builder: mark as saved
    pub fn with_saved(mut self, saved: bool) -> Self {
        self.saved = saved;
        self
    }

    /// Builder: set an aux assignment (channel 0-3)
    pub fn with_aux_assign(mut self, channel: usize, assign: impl Into<String>) -> Self {
        if channel < self.aux_assign.len() {
            self.aux_assign[channel] = assign.into();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pattern_is_consistent() {
        let pattern = CksPattern::new(2);
        assert_eq!(pattern.kind, PATTERN_TYPE);
        assert_eq!(pattern.creator_track, 2);
        assert!(pattern.is_consistent());
    }

    #[test]
    fn test_push_bar_updates_count() {
        let mut pattern = CksPattern::new(0);
        pattern.push_bar(Bar::new());
        assert_eq!(pattern.bar_count, 2);
        assert!(pattern.is_consistent());
    }

    #[test]
    fn test_inconsistent_bar_count() {
        let mut pattern = CksPattern::new(0);
        pattern.bar_count = 5;
        assert!(!pattern.is_consistent());
    }

    #[test]
    fn test_too_many_bars() {
        let mut pattern = CksPattern::new(0);
        for _ in 0..16 {
            pattern.push_bar(Bar::new());
        }
        assert_eq!(pattern.bars.len(), 17);
        assert!(!pattern.is_consistent());
    }

    #[test]
    fn test_aux_assign_builder() {
        let pattern = CksPattern::new(0)
            .with_aux_assign(0, "cc 74")
            .with_aux_assign(3, "pb");
        assert_eq!(pattern.aux_assign[0], "cc 74");
        assert_eq!(pattern.aux_assign[3], "pb");
        assert_eq!(pattern.aux_assign[1], "");
    }

    #[test]
    fn test_serde_round_trip() {
        let pattern = CksPattern::new(1).with_saved(true).with_aux_assign(1, "cc 1");
        let value = serde_json::to_value(&pattern).unwrap();
        assert_eq!(value["type"], "P3");
        let back: CksPattern = serde_json::from_value(value).unwrap();
        assert_eq!(pattern, back);
    }
}
