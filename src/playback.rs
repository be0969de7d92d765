//! The playback resource the controller drives.
//!
//! Implementations wrap whatever actually produces sound. The controller only
//! needs immediate-return control calls and millisecond positions, so the
//! terminal player plugs in a rodio sink and the tests plug in a scripted fake.

use std::error::Error;

pub type SeekResult = Result<(), Box<dyn Error + Send + Sync>>;

pub trait Playback {
    /// Start or resume playback from the current position.
    fn start(&mut self);

    /// Pause playback, keeping the current position.
    fn pause(&mut self);

    /// Move the playhead to an absolute position in milliseconds.
    fn seek_to(&mut self, position_ms: u64) -> SeekResult;

    /// Current playhead position in milliseconds.
    fn current_position(&self) -> u64;

    /// Total length of the loaded track in milliseconds.
    fn duration(&self) -> u64;

    /// Whether playback ran off the end of the track.
    fn is_finished(&self) -> bool {
        false
    }
}
