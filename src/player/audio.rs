//! Audio output for the player.
//!
//! [`RodioPlayback`] owns the output stream and a single sink holding one
//! decoded track. It implements [`Playback`] so the controller can drive it
//! with millisecond positions. Once the sink has drained, the track is decoded
//! again on the next seek or start, so a finished track can be replayed.

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jumpdeck::playback::{Playback, SeekResult};

pub struct RodioPlayback {
    _stream: OutputStream,
    sink: Sink,
    path: PathBuf,
    duration: Duration,
}

impl RodioPlayback {
    /// Open the default output device and load `path`, paused at the start.
    pub fn open(path: &Path) -> Result<Self, Box<dyn Error>> {
        let source = decode(path)?;
        let duration = source
            .total_duration()
            .ok_or_else(|| format!("Cannot determine the length of {}", path.display()))?;
        let channels = source.channels();
        let sample_rate = source.sample_rate();

        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| format!("No audio output available: {e}"))?;
        let sink = Sink::connect_new(stream.mixer());
        sink.pause();
        sink.append(source);

        log::info!(
            "Loaded {}: {} channels, {} Hz, {:?}",
            path.display(),
            channels,
            sample_rate,
            duration
        );

        Ok(Self {
            _stream: stream,
            sink,
            path: path.to_path_buf(),
            duration,
        })
    }

}

/// Put the track back into a drained sink.
fn reload_if_drained(sink: &Sink, path: &Path) -> Result<(), Box<dyn Error>> {
    if sink.empty() {
        log::debug!("Sink drained, decoding {} again", path.display());
        sink.append(decode(path)?);
    }
    Ok(())
}

/// Start the sink, refilling it first if it has drained. An empty sink is left
/// paused, so the next poll sees the track as finished.
fn resume(sink: &Sink, path: &Path) -> bool {
    if let Err(e) = reload_if_drained(sink, path) {
        log::error!("Could not reload track: {e}");
        return false;
    }
    sink.play();
    true
}

impl Playback for RodioPlayback {
    fn start(&mut self) {
        resume(&self.sink, &self.path);
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn seek_to(&mut self, position_ms: u64) -> SeekResult {
        reload_if_drained(&self.sink, &self.path).map_err(|e| e.to_string())?;
        self.sink
            .try_seek(Duration::from_millis(position_ms))
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    fn current_position(&self) -> u64 {
        self.sink.get_pos().as_millis() as u64
    }

    fn duration(&self) -> u64 {
        self.duration.as_millis() as u64
    }

    fn is_finished(&self) -> bool {
        self.sink.empty()
    }
}

impl Drop for RodioPlayback {
    fn drop(&mut self) {
        self.sink.stop();
        log::debug!("Audio output closed");
    }
}

fn decode(path: &Path) -> Result<Decoder<BufReader<File>>, Box<dyn Error>> {
    let file = File::open(path).map_err(|e| format!("Cannot open {}: {e}", path.display()))?;
    let decoder =
        Decoder::try_from(file).map_err(|e| format!("Cannot decode {}: {e}", path.display()))?;
    Ok(decoder)
}
