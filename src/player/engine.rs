use std::path::Path;

use thiserror::Error;

use crate::types::playback::{PlaybackRate, PlaybackState};

/// Notification from the playback engine, drained once per frame and
/// dispatched by the controller. Typed dispatch, no signal names.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    StateChanged(PlaybackState),
    /// Current position in milliseconds.
    PositionChanged(u64),
    /// Media duration in milliseconds, reported once known.
    DurationChanged(u64),
    /// The loaded item played through to its end.
    EndOfMedia,
    /// The engine could not play the loaded item.
    Error(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerError {
    #[error("playlist position {0} is out of range")]
    InvalidPosition(usize),
    #[error("no media loaded")]
    NoMediaLoaded,
}

/// Command surface of the playback engine. The GStreamer backend
/// implements this; tests substitute a recording mock. All calls are
/// fire-and-forget: outcomes arrive later as [`EngineEvent`]s.
pub trait MediaEngine {
    /// Replaces whatever is loaded with the media at `location`.
    fn load(&mut self, location: &Path);
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    /// Absolute seek, in milliseconds. Callers clamp to the known
    /// duration before asking.
    fn seek(&mut self, position_ms: u64);
    /// Volume on the 0–100 scale the UI uses.
    fn set_volume(&mut self, volume: u8);
    fn set_muted(&mut self, muted: bool);
    fn set_rate(&mut self, rate: PlaybackRate);
    /// Drains pending notifications. Called once per UI frame.
    fn poll_events(&mut self) -> Vec<EngineEvent>;
}
