//! Tiles - command-line front end for the mosaic layout engine.
//!
//! Reads photos and options, prints JSON on stdout.

mod cli;
mod logging;

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tiles_api::{Photo, PhotoStream};
use tiles_layout::{GridParameters, LayoutConfig, compute_layout_with, preview};

use crate::cli::{Args, Command};
use crate::logging::setup_logging;

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => LayoutConfig::default(),
    };

    match args.command {
        Command::Grid { width } => {
            let grid = GridParameters::for_width_with(width, &config)?;
            write_json(&grid, args.pretty)
        }
        Command::Layout {
            width,
            photos,
            shuffle,
        } => {
            let mut photos = read_photos(&photos)?;
            if let Some(seed) = shuffle {
                photos = shuffled(photos, seed);
            }
            tracing::info!("Laying out {} photos at width {}", photos.len(), width);

            let layout = compute_layout_with(&photos, width, &config)?;
            write_json(&layout, args.pretty)
        }
        Command::Preview { width, height } => {
            let grid = GridParameters::for_width_with(width, &config)?;
            write_json(&preview::preview_cells(&grid, height), args.pretty)
        }
    }
}

fn load_config(path: &Path) -> Result<LayoutConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config '{}'", path.display()))?;
    let config: LayoutConfig = serde_json::from_str(&text)
        .with_context(|| format!("Invalid config '{}'", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Read a JSON photo array from a file, or stdin for `-`.
fn read_photos(source: &str) -> Result<Vec<Photo>> {
    let text = if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read photos from stdin")?;
        buf
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read photos '{source}'"))?
    };
    parse_photos(&text).with_context(|| format!("Invalid photo list in '{source}'"))
}

fn parse_photos(text: &str) -> Result<Vec<Photo>> {
    Ok(serde_json::from_str(text)?)
}

/// Run photos through a seeded stream: duplicates dropped, order shuffled.
fn shuffled(photos: Vec<Photo>, seed: u64) -> Vec<Photo> {
    let mut stream = PhotoStream::with_seed(seed);
    stream.add_photos("input", photos);
    stream.photos().to_vec()
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}").context("Failed to write output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiles_api::PhotoId;

    #[test]
    fn test_parse_photos() {
        let photos = parse_photos(
            r#"[{"id": 1, "width": 1600, "height": 900},
                {"id": 2, "width": 900, "height": 1600, "alt": "tower"}]"#,
        )
        .unwrap();

        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].id, PhotoId(1));
        assert_eq!(photos[1].alt.as_deref(), Some("tower"));
    }

    #[test]
    fn test_parse_photos_rejects_garbage() {
        assert!(parse_photos("{\"id\": 1}").is_err());
        assert!(parse_photos("not json").is_err());
    }

    #[test]
    fn test_shuffled_is_seeded_and_deduplicated() {
        let photos: Vec<Photo> = (0..20).map(|id| Photo::new(id, 100.0, 100.0)).collect();
        let mut with_dup = photos.clone();
        with_dup.push(Photo::new(3, 50.0, 50.0));

        let a = shuffled(with_dup.clone(), 7);
        let b = shuffled(with_dup, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);

        let mut ids: Vec<_> = a.iter().map(|p| p.id).collect();
        ids.sort();
        assert_eq!(ids, photos.iter().map(|p| p.id).collect::<Vec<_>>());
    }
}
