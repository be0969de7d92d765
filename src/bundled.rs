//! The built-in demo track.
//!
//! When no track is passed on the command line and none is configured, the
//! player falls back to a short synthesized piece. It is rendered once with
//! hound into the user's cache directory and then loaded like any other file.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::error::Error;
use std::f32::consts::TAU;
use std::fs;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use crate::constants::{APP_DIR, BUNDLED_TRACK_FILE};

pub const SAMPLE_RATE: u32 = 22_050;
pub const LENGTH_SECS: u32 = 40;

/// A major arpeggio (A4, C#5, E5, A5) repeated for the whole track
const NOTES_HZ: [f32; 4] = [440.0, 554.37, 659.25, 880.0];
const NOTE_SECS: f32 = 0.5;
const FADE_SECS: f32 = 0.05;
const AMPLITUDE: f32 = 0.3;

pub fn cache_dir() -> Result<PathBuf, Box<dyn Error>> {
    let cache_dir = if let Ok(xdg_cache) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg_cache).join(APP_DIR)
    } else {
        dirs::cache_dir()
            .ok_or("Unable to find cache directory")?
            .join(APP_DIR)
    };
    Ok(cache_dir)
}

/// Path to the demo track, rendering it first if the cache has none.
pub fn bundled_track_path() -> Result<PathBuf, Box<dyn Error>> {
    ensure_bundled_track(&cache_dir()?)
}

pub fn ensure_bundled_track(dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join(BUNDLED_TRACK_FILE);
    if path.exists() {
        return Ok(path);
    }

    fs::create_dir_all(dir)?;
    // The final path only ever holds a complete file
    let partial = dir.join(format!("{BUNDLED_TRACK_FILE}.part"));
    {
        let file = fs::File::create(&partial)?;
        write_bundled_track(std::io::BufWriter::new(file))?;
    }
    fs::rename(&partial, &path)?;

    log::info!("Rendered bundled track to {}", path.display());
    Ok(path)
}

pub fn write_bundled_track<W: Write + Seek>(writer: W) -> Result<(), Box<dyn Error>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut wav = WavWriter::new(writer, spec)?;

    let total = SAMPLE_RATE * LENGTH_SECS;
    let note_len = (NOTE_SECS * SAMPLE_RATE as f32) as u32;
    let fade_len = (FADE_SECS * SAMPLE_RATE as f32) as u32;

    for n in 0..total {
        let note = NOTES_HZ[((n / note_len) as usize) % NOTES_HZ.len()];
        let offset = n % note_len;
        let envelope = if offset < fade_len {
            offset as f32 / fade_len as f32
        } else if note_len - offset < fade_len {
            (note_len - offset) as f32 / fade_len as f32
        } else {
            1.0
        };
        let t = n as f32 / SAMPLE_RATE as f32;
        let sample = (TAU * note * t).sin() * envelope * AMPLITUDE;
        wav.write_sample((sample * i16::MAX as f32) as i16)?;
    }

    wav.finalize()?;
    Ok(())
}
