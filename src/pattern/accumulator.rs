// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Accumulator configuration.
//!
//! An accumulator is a per-pattern stateful transform applied across
//! bar repeats. Each of the four channels (A-D) has its own limit,
//! wrap behavior, and overflow policy; two pattern-level flags control
//! reset timing and transpose interaction on channel D.

use serde::{Deserialize, Serialize};

/// What an accumulator does when it reaches its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccumulatorMode {
    /// Wrap around to the opposite extreme
    Wrap,
    /// Hold at the limit
    Hold,
    /// Reset to zero
    Reset,
}

impl Default for AccumulatorMode {
    fn default() -> Self {
        AccumulatorMode::Wrap
    }
}

/// How accumulated values that exceed the value range are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Clip to the valid range
    Clip,
    /// Wrap within the valid range
    Wrap,
}

impl Default for OverflowPolicy {
    fn default() -> Self {
        OverflowPolicy::Clip
    }
}

/// Configuration for one accumulator channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AccumulatorChannel {
    /// Accumulation limit
    #[serde(default)]
    pub limit: u8,
    /// Behavior at the limit
    #[serde(default)]
    pub mode: AccumulatorMode,
    /// Behavior outside the value range
    #[serde(default)]
    pub overflow: OverflowPolicy,
}

/// Per-pattern accumulator configuration (channels A-D)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AccumulatorConfig {
    /// Channel configurations in A, B, C, D order
    #[serde(default)]
    pub channels: [AccumulatorChannel; 4],
    /// Reset all channels when the pattern starts
    #[serde(default)]
    pub reset_on_start: bool,
    /// Defeat pattern transpose while channel D is accumulating
    #[serde(default)]
    pub defeat_transpose_on_d: bool,
}
