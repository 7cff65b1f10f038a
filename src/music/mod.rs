// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music value utilities for CKSIO.
//!
//! This module provides conversion between the hardware's note-name
//! rendering and numeric MIDI values.

pub mod note;

pub use note::{increment_note, midi_to_note, note_to_midi, INVALID_NOTE, MIDDLE_C, NO_NOTE};
