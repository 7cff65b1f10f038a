// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Bar data model.
//!
//! A bar is one repeatable unit of a hardware pattern. It carries a
//! handful of playback scalars and sixteen parallel step arrays, each
//! exactly [`STEP_COUNT`] entries long. The fixed length is enforced
//! by the field types themselves; anything arriving over the wire with
//! a different length never deserializes into a [`Bar`].

use serde::{Deserialize, Serialize};

/// Number of steps in a bar. Every step array has exactly this length.
pub const STEP_COUNT: usize = 16;

/// Step playback order within a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// First step to last step
    Forward,
    /// Last step to first step
    ReverseA,
    /// Last step to first step, variant timing
    ReverseB,
    /// Forward then backward, repeating end steps
    Alternate,
    /// Forward then backward, not repeating end steps
    Pendulum,
    /// Uniform random step selection
    Random,
    /// Random walk between neighboring steps
    Brownian,
    /// Random choice of direction at each step
    Eitherway,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Forward
    }
}

/// One bar of a hardware pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Step playback order
    pub direction: Direction,
    /// Timebase code (e.g. "16", "8T")
    pub timebase: String,
    /// Number of active steps (1-16)
    pub last_step: u8,
    /// Bar transpose in semitones (-60 to 60)
    pub transpose: i8,
    /// Times this bar plays before the next (1-99)
    pub repeats: u8,
    /// Whether the bar re-syncs to the global bar clock
    pub global_bar_sync: bool,

    /// Per-step note names
    pub note: [String; STEP_COUNT],
    /// Per-step velocity (1-127)
    pub velocity: [u8; STEP_COUNT],
    /// Per-step gate length in ticks
    pub length: [u16; STEP_COUNT],
    /// Per-step delay in ticks (0-47)
    pub delay: [u8; STEP_COUNT],

    /// Auxiliary channel A values (0-127)
    pub aux_a: [u8; STEP_COUNT],
    /// Auxiliary channel B values (0-127)
    pub aux_b: [u8; STEP_COUNT],
    /// Auxiliary channel C values (0-127)
    pub aux_c: [u8; STEP_COUNT],
    /// Auxiliary channel D values (0-127)
    pub aux_d: [u8; STEP_COUNT],
    /// Auxiliary channel A send flags
    pub aux_a_flag: [bool; STEP_COUNT],
    /// Auxiliary channel B send flags
    pub aux_b_flag: [bool; STEP_COUNT],
    /// Auxiliary channel C send flags
    pub aux_c_flag: [bool; STEP_COUNT],
    /// Auxiliary channel D send flags
    pub aux_d_flag: [bool; STEP_COUNT],

    /// Per-step gate flags
    pub gate: [bool; STEP_COUNT],
    /// Per-step tie flags
    pub tie: [bool; STEP_COUNT],
    /// Per-step skip flags
    pub skip: [bool; STEP_COUNT],
    /// Per-step transpose-defeat flags
    pub xpose_defeat: [bool; STEP_COUNT],
}

impl Default for Bar {
    fn default() -> Self {
        Self {
            direction: Direction::Forward,
            timebase: "16".to_string(),
            last_step: STEP_COUNT as u8,
            transpose: 0,
            repeats: 1,
            global_bar_sync: false,
            note: std::array::from_fn(|_| "C 5".to_string()),
            velocity: [100; STEP_COUNT],
            length: [12; STEP_COUNT],
            delay: [0; STEP_COUNT],
            aux_a: [0; STEP_COUNT],
            aux_b: [0; STEP_COUNT],
            aux_c: [0; STEP_COUNT],
            aux_d: [0; STEP_COUNT],
            aux_a_flag: [false; STEP_COUNT],
            aux_b_flag: [false; STEP_COUNT],
            aux_c_flag: [false; STEP_COUNT],
            aux_d_flag: [false; STEP_COUNT],
            gate: [false; STEP_COUNT],
            tie: [false; STEP_COUNT],
            skip: [false; STEP_COUNT],
            xpose_defeat: [false; STEP_COUNT],
        }
    }
}

impl Bar {
    /// Create a bar with default step data
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active step count (clamped to 1-16)
    pub fn set_last_step(&mut self, step: u8) {
        self.last_step = step.clamp(1, STEP_COUNT as u8);
    }

    /// Set bar transpose (clamped to -60..60)
    pub fn set_transpose(&mut self, semitones: i8) {
        self.transpose = semitones.clamp(-60, 60);
    }

    /// Set repeat count (clamped to 1-99)
    pub fn set_repeats(&mut self, repeats: u8) {
        self.repeats = repeats.clamp(1, 99);
    }

    /// Set a step's note name
    pub fn set_note(&mut self, step: usize, name: impl Into<String>) {
        if step < STEP_COUNT {
            self.note[step] = name.into();
        }
    }

    /// Set a step's velocity (clamped to 1-127)
    pub fn set_velocity(&mut self, step: usize, velocity: u8) {
        if step < STEP_COUNT {
            self.velocity[step] = velocity.clamp(1, 127);
        }
    }

    /// Set a step's gate length in ticks
    pub fn set_length(&mut self, step: usize, ticks: u16) {
        if step < STEP_COUNT {
            self.length[step] = ticks;
        }
    }

    /// Set a step's delay (clamped to 0-47 ticks)
    pub fn set_delay(&mut self, step: usize, ticks: u8) {
        if step < STEP_COUNT {
            self.delay[step] = ticks.min(47);
        }
    }

    /// Set a step's gate flag
    pub fn set_gate(&mut self, step: usize, on: bool) {
        if step < STEP_COUNT {
            self.gate[step] = on;
        }
    }

    /// Number of steps the bar actually plays
    pub fn active_steps(&self) -> usize {
        self.last_step as usize
    }

    /// Builder: set active step count
    pub fn with_last_step(mut self, step: u8) -> Self {
        self.set_last_step(step);
        self
    }

    /// Builder: set direction
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Builder: set repeat count
    pub fn with_repeats(mut self, repeats: u8) -> Self {
        self.set_repeats(repeats);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bar() {
        let bar = Bar::new();
        assert_eq!(bar.direction, Direction::Forward);
        assert_eq!(bar.last_step, 16);
        assert_eq!(bar.repeats, 1);
        assert_eq!(bar.note.len(), STEP_COUNT);
        assert!(bar.note.iter().all(|n| n == "C 5"));
        assert!(bar.gate.iter().all(|g| !g));
    }

    #[test]
    fn test_clamped_setters() {
        let mut bar = Bar::new();
        bar.set_last_step(0);
        assert_eq!(bar.last_step, 1);
        bar.set_last_step(20);
        assert_eq!(bar.last_step, 16);

        bar.set_transpose(-100);
        assert_eq!(bar.transpose, -60);
        bar.set_repeats(0);
        assert_eq!(bar.repeats, 1);
        bar.set_repeats(120);
        assert_eq!(bar.repeats, 99);

        bar.set_velocity(3, 0);
        assert_eq!(bar.velocity[3], 1);
        bar.set_delay(3, 99);
        assert_eq!(bar.delay[3], 47);
    }

    #[test]
    fn test_out_of_range_step_is_ignored() {
        let mut bar = Bar::new();
        bar.set_velocity(16, 50);
        assert!(bar.velocity.iter().all(|&v| v == 100));
    }

    #[test]
    fn test_builder() {
        let bar = Bar::new()
            .with_last_step(8)
            .with_direction(Direction::Pendulum)
            .with_repeats(4);
        assert_eq!(bar.active_steps(), 8);
        assert_eq!(bar.direction, Direction::Pendulum);
        assert_eq!(bar.repeats, 4);
    }

    #[test]
    fn test_serde_round_trip() {
        let bar = Bar::new().with_direction(Direction::Brownian);
        let json = serde_json::to_string(&bar).unwrap();
        assert!(json.contains("\"brownian\""));
        let back: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, back);
    }

    #[test]
    fn test_short_array_fails_to_deserialize() {
        let mut value = serde_json::to_value(Bar::new()).unwrap();
        value["velocity"] = serde_json::json!([100, 100, 100]);
        assert!(serde_json::from_value::<Bar>(value).is_err());
    }
}
