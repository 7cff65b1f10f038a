// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs;

use anyhow::{Context, Result};
use cksio::{export_song, import_song, parse_document, CksDocument, ExportOptions};

fn print_usage() {
    println!("CKSIO - CKS song file converter");
    println!();
    println!("Usage: cksio <COMMAND> [ARGS]");
    println!();
    println!("Commands:");
    println!("  list <FILE>                      List songs in a CKS file");
    println!("  inspect <FILE> [SONG]            Show import statistics for a song");
    println!("  convert <IN> <OUT> [SONG]        Import a song and re-export it");
    println!("      --no-meta                    Strip the UI metadata block on export");
    println!("  --help                           Show this help message");
}

fn load_document(path: &str) -> Result<CksDocument> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read CKS file: {}", path))?;
    parse_document(&text).with_context(|| format!("Failed to parse CKS file: {}", path))
}

fn list_songs(path: &str) -> Result<()> {
    let document = load_document(path)?;
    println!("Format version: {}", document.version());
    println!("Songs: {}", document.song_count());
    for name in document.song_names() {
        println!("  {}", name);
    }
    Ok(())
}

fn pick_song<'a>(document: &'a CksDocument, requested: Option<&'a str>) -> Result<&'a str> {
    match requested {
        Some(name) => Ok(name),
        None => document
            .song_names()
            .first()
            .copied()
            .context("Document contains no songs"),
    }
}

fn inspect_song(path: &str, requested: Option<&str>) -> Result<()> {
    let document = load_document(path)?;
    let song_key = pick_song(&document, requested)?;
    let result = import_song(&document, song_key)?;

    let stats = &result.stats;
    println!("Song:     {}", stats.song_name);
    println!("Tempo:    {} BPM", stats.tempo);
    println!("Tracks:   {}", stats.track_count);
    println!("Patterns: {}", stats.pattern_count);
    println!("Scenes:   {}", stats.scene_count);
    if !stats.skipped_patterns.is_empty() {
        println!("Skipped:  {}", stats.skipped_patterns.join(", "));
    }
    Ok(())
}

fn convert_song(
    input: &str,
    output: &str,
    requested: Option<&str>,
    include_meta: bool,
) -> Result<()> {
    let document = load_document(input)?;
    let song_key = pick_song(&document, requested)?;
    let result = import_song(&document, song_key)?;

    let options = ExportOptions::new(song_key).with_ui_meta(include_meta);
    let exported = export_song(&result.song, &options)?;
    let json = exported.to_json_string()?;
    fs::write(output, json).with_context(|| format!("Failed to write CKS file: {}", output))?;

    println!(
        "Wrote '{}' ({} patterns, {} tracks) to {}",
        song_key, result.stats.pattern_count, result.stats.track_count, output
    );
    if !result.stats.skipped_patterns.is_empty() {
        println!(
            "Skipped {} invalid pattern(s): {}",
            result.stats.skipped_patterns.len(),
            result.stats.skipped_patterns.join(", ")
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let mut positional: Vec<&str> = Vec::new();
    let mut include_meta = true;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--no-meta" => include_meta = false,
            other => positional.push(other),
        }
    }

    match positional.as_slice() {
        ["list", path] => list_songs(path),
        ["inspect", path] => inspect_song(path, None),
        ["inspect", path, song] => inspect_song(path, Some(song)),
        ["convert", input, output] => convert_song(input, output, None, include_meta),
        ["convert", input, output, song] => convert_song(input, output, Some(song), include_meta),
        _ => {
            print_usage();
            Ok(())
        }
    }
}
