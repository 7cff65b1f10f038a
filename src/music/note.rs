// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note-name / MIDI value codec.
//!
//! The hardware renders notes in a three-character prefix followed by
//! the octave: natural notes carry a space in the accidental slot
//! (`"C 4"`), sharps carry a `#` (`"D#4"`). Middle C is `"C 5"`,
//! value 60, so the usable range 0-127 spans octaves 0-10.

/// Sentinel returned by [`note_to_midi`] for unparseable input.
pub const INVALID_NOTE: i32 = -1;

/// Sentinel rendering for values outside 0-127.
pub const NO_NOTE: &str = "---";

/// Middle C ("C 5" in hardware rendering).
pub const MIDDLE_C: i32 = 60;

/// Pitch-class names with the accidental slot filled in
const NOTE_NAMES: [&str; 12] = [
    "C ", "C#", "D ", "D#", "E ", "F ", "F#", "G ", "G#", "A ", "A#", "B ",
];

/// Parse a note name into a MIDI value.
///
/// Accepts the hardware rendering with or without the separating space
/// (`"C 4"`, `"C4"`, `"D#4"`) in either letter case. Flats (`"Db4"`)
/// are accepted on input even though the canonical rendering is sharp.
///
/// Returns [`INVALID_NOTE`] for empty input, an unrecognized letter,
/// a missing octave, or a value outside 0-127.
pub fn note_to_midi(name: &str) -> i32 {
    match parse_note(name) {
        Some(value) => value as i32,
        None => INVALID_NOTE,
    }
}

/// Render a MIDI value as a note name.
///
/// Returns [`NO_NOTE`] for any value outside 0-127.
pub fn midi_to_note(value: i32) -> String {
    if !(0..=127).contains(&value) {
        return NO_NOTE.to_string();
    }
    let pitch_class = (value % 12) as usize;
    let octave = value / 12;
    format!("{}{}", NOTE_NAMES[pitch_class], octave)
}

/// Shift a note name by `delta` semitones, clamped to 0-127.
///
/// An unparseable input name resolves to middle C before the shift.
pub fn increment_note(name: &str, delta: i32) -> String {
    let value = parse_note(name).map(i32::from).unwrap_or(MIDDLE_C);
    midi_to_note((value + delta).clamp(0, 127))
}

fn parse_note(name: &str) -> Option<u8> {
    let trimmed = name.trim();
    let mut chars = trimmed.chars();

    let pitch_class: i32 = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    // The accidental slot may hold '#', 'b', a space, or nothing at all
    let rest = chars.as_str();
    let (accidental, octave_str) = match rest.chars().next() {
        Some('#') => (1, &rest[1..]),
        Some('b') => (-1, &rest[1..]),
        Some(' ') => (0, rest),
        _ => (0, rest),
    };

    let octave: i32 = octave_str.trim().parse().ok()?;
    let value = octave * 12 + pitch_class + accidental;
    if (0..=127).contains(&value) {
        Some(value as u8)
    } else {
        None
    }
}
