// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! CKSIO - a bidirectional converter between an arrangement editor's
//! internal model and the CKS step-sequencer song-file format.
//!
//! The pipeline is synchronous end-to-end:
//!
//! ```text
//! text --parse_document--> CksDocument --import_song--> Song
//! Song --export_song--> CksDocument --to_json_string--> text
//! ```
//!
//! [`import_collection`] wraps [`import_song`] in a per-song failure
//! boundary for multi-song documents.

pub mod arrangement;
pub mod document;
pub mod export;
pub mod import;
pub mod music;
pub mod pattern;

pub use arrangement::{IdAllocator, Pattern, Scene, Song, Track};
pub use document::{parse_document, CksDocument, FormatError, FORMAT_VERSION};
pub use export::{export_song, ExportError, ExportOptions};
pub use import::{
    import_collection, import_song, CollectionOutcome, CollectionResult, ImportError,
    ImportResult, ImportStats, SongFailure,
};
pub use music::{increment_note, midi_to_note, note_to_midi};
pub use pattern::{
    bar_is_valid, pattern_is_valid, AccumulatorConfig, Bar, CksPattern, Direction, MAX_BARS,
    STEP_COUNT,
};
