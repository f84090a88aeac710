use std::path::PathBuf;

use log::{debug, error};

use crate::player::engine::{EngineEvent, MediaEngine, PlayerError};
use crate::types::playback::{PlaybackRate, PlaybackSettings, PlaybackState};
use crate::types::playlist::Playlist;

/// Owns the playlist, the current row, and the mirrored playback
/// state; translates transport commands into engine calls and engine
/// events into presentation state the UI renders from.
pub struct PlayerController<E: MediaEngine> {
    engine: E,
    playlist: Playlist,
    current: Option<usize>,
    state: PlaybackState,
    position_ms: u64,
    duration_ms: u64,
    settings: PlaybackSettings,
    media_loaded: bool,
}

impl<E: MediaEngine> PlayerController<E> {
    pub fn new(mut engine: E, settings: PlaybackSettings) -> Self {
        engine.set_volume(settings.volume);
        PlayerController {
            engine,
            playlist: Playlist::new(),
            current: None,
            state: PlaybackState::Stopped,
            position_ms: 0,
            duration_ms: 0,
            settings,
            media_loaded: false,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn playlist_mut(&mut self) -> &mut Playlist {
        &mut self.playlist
    }

    pub fn current_position(&self) -> Option<usize> {
        self.current
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn settings(&self) -> PlaybackSettings {
        self.settings
    }

    /// Resolves `row` through the playlist and starts playing it.
    pub fn load_and_play(&mut self, row: usize) -> Result<(), PlayerError> {
        let location: PathBuf = self
            .playlist
            .get(row)
            .ok_or(PlayerError::InvalidPosition(row))?
            .to_path_buf();

        debug!("Playing row {row}: {}", location.display());
        self.current = Some(row);
        self.position_ms = 0;
        self.duration_ms = 0;
        self.media_loaded = true;
        self.engine.load(&location);
        self.engine.play();
        self.state = PlaybackState::Playing;
        Ok(())
    }

    pub fn toggle_play_pause(&mut self) {
        match self.state {
            PlaybackState::Playing => {
                self.engine.pause();
                self.state = PlaybackState::Paused;
            }
            PlaybackState::Paused => {
                self.engine.play();
                self.state = PlaybackState::Playing;
            }
            PlaybackState::Stopped => {
                if self.media_loaded {
                    self.engine.play();
                    self.state = PlaybackState::Playing;
                } else if !self.playlist.is_empty() {
                    let _ = self.load_and_play(0);
                }
                // Idle with an empty playlist: nothing to do.
            }
        }
    }

    pub fn stop(&mut self) {
        self.engine.stop();
        self.state = PlaybackState::Stopped;
        self.position_ms = 0;
    }

    /// Advances one row; a request past the end is a silent no-op
    /// (no wraparound, no load issued).
    pub fn next(&mut self) {
        if let Some(row) = self.current {
            if row + 1 < self.playlist.len() {
                let _ = self.load_and_play(row + 1);
            }
        }
    }

    /// Retreats one row; a request before the start is a silent no-op.
    pub fn previous(&mut self) {
        if let Some(row) = self.current {
            if row > 0 {
                let _ = self.load_and_play(row - 1);
            }
        }
    }

    pub fn seek_absolute(&mut self, ms: u64) -> Result<(), PlayerError> {
        if !self.media_loaded {
            return Err(PlayerError::NoMediaLoaded);
        }
        let target = ms.min(self.duration_ms);
        self.position_ms = target;
        self.engine.seek(target);
        Ok(())
    }

    pub fn seek_relative(&mut self, delta_ms: i64) -> Result<(), PlayerError> {
        if !self.media_loaded {
            return Err(PlayerError::NoMediaLoaded);
        }
        let target = self
            .position_ms
            .saturating_add_signed(delta_ms)
            .min(self.duration_ms);
        self.position_ms = target;
        self.engine.seek(target);
        Ok(())
    }

    /// Volume outside 0–100 is clamped, not rejected.
    pub fn set_volume(&mut self, volume: i32) {
        let volume = volume.clamp(0, 100) as u8;
        self.settings.volume = volume;
        self.engine.set_volume(volume);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.engine.set_muted(muted);
    }

    pub fn toggle_muted(&mut self) {
        self.set_muted(!self.settings.muted);
    }

    pub fn set_rate(&mut self, rate: PlaybackRate) {
        self.settings.rate = rate;
        self.engine.set_rate(rate);
    }

    pub fn clear_playlist(&mut self) {
        self.stop();
        self.playlist.clear();
        self.current = None;
        self.media_loaded = false;
    }

    /// Removes a playlist row and fixes up the current row: removing
    /// the playing entry drops the selection, removing an earlier one
    /// shifts the index down, removing a later one changes nothing.
    pub fn remove_entry(&mut self, row: usize) {
        if self.playlist.remove_at(row).is_none() {
            return;
        }
        match self.current {
            Some(cur) if cur == row => self.current = None,
            Some(cur) if cur > row => self.current = Some(cur - 1),
            _ => {}
        }
    }

    /// Dispatches one engine notification. Called for every event the
    /// engine produced this frame.
    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::StateChanged(state) => self.state = state,
            EngineEvent::PositionChanged(ms) => self.position_ms = ms,
            EngineEvent::DurationChanged(ms) => self.duration_ms = ms,
            EngineEvent::EndOfMedia => self.advance_on_end(),
            EngineEvent::Error(msg) => {
                // Unplayable media: log and move on, never a dialog.
                error!("Engine error: {msg}");
                self.advance_on_end();
            }
        }
    }

    /// Drains the engine and applies every pending notification.
    pub fn poll(&mut self) {
        for event in self.engine.poll_events() {
            self.handle_event(event);
        }
    }

    /// End-of-media behaves exactly like a user `next()`: advance when
    /// there is a following row, otherwise stay stopped where we are.
    fn advance_on_end(&mut self) {
        match self.current {
            Some(row) if row + 1 < self.playlist.len() => {
                let _ = self.load_and_play(row + 1);
            }
            _ => {
                self.engine.stop();
                self.state = PlaybackState::Stopped;
                self.position_ms = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;

    /// Records every command so tests can assert on exactly what the
    /// controller asked the engine to do.
    #[derive(Default)]
    struct MockEngine {
        commands: Vec<String>,
        pending: Vec<EngineEvent>,
    }

    impl MediaEngine for MockEngine {
        fn load(&mut self, location: &Path) {
            self.commands.push(format!("load {}", location.display()));
        }
        fn play(&mut self) {
            self.commands.push("play".into());
        }
        fn pause(&mut self) {
            self.commands.push("pause".into());
        }
        fn stop(&mut self) {
            self.commands.push("stop".into());
        }
        fn seek(&mut self, position_ms: u64) {
            self.commands.push(format!("seek {position_ms}"));
        }
        fn set_volume(&mut self, volume: u8) {
            self.commands.push(format!("volume {volume}"));
        }
        fn set_muted(&mut self, muted: bool) {
            self.commands.push(format!("mute {muted}"));
        }
        fn set_rate(&mut self, rate: PlaybackRate) {
            self.commands.push(format!("rate {rate}"));
        }
        fn poll_events(&mut self) -> Vec<EngineEvent> {
            std::mem::take(&mut self.pending)
        }
    }

    fn controller_with(entries: &[&str]) -> PlayerController<MockEngine> {
        let mut c = PlayerController::new(MockEngine::default(), PlaybackSettings::default());
        for e in entries {
            c.playlist_mut().add(PathBuf::from(e));
        }
        c.engine.commands.clear();
        c
    }

    fn loads(c: &PlayerController<MockEngine>) -> usize {
        c.engine
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with("load"))
            .count()
    }

    #[test]
    fn load_and_play_out_of_range_is_invalid_position() {
        let mut c = controller_with(&["/m/a.mp4"]);
        assert_eq!(c.load_and_play(1), Err(PlayerError::InvalidPosition(1)));
        assert_eq!(c.current_position(), None);
        assert!(c.engine.commands.is_empty());
    }

    #[test]
    fn toggle_from_idle_plays_first_entry() {
        let mut c = controller_with(&["/m/a.mp4", "/m/b.mp4"]);
        c.toggle_play_pause();
        assert_eq!(c.current_position(), Some(0));
        assert_eq!(c.state(), PlaybackState::Playing);
        assert_eq!(c.engine.commands, vec!["load /m/a.mp4", "play"]);
    }

    #[test]
    fn toggle_from_idle_with_empty_playlist_is_a_noop() {
        let mut c = controller_with(&[]);
        c.toggle_play_pause();
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert!(c.engine.commands.is_empty());
    }

    #[test]
    fn toggle_pauses_and_resumes() {
        let mut c = controller_with(&["/m/a.mp4"]);
        c.load_and_play(0).unwrap();
        c.toggle_play_pause();
        assert_eq!(c.state(), PlaybackState::Paused);
        c.toggle_play_pause();
        assert_eq!(c.state(), PlaybackState::Playing);
    }

    #[test]
    fn toggle_after_stop_resumes_loaded_media() {
        let mut c = controller_with(&["/m/a.mp4"]);
        c.load_and_play(0).unwrap();
        c.stop();
        c.engine.commands.clear();
        c.toggle_play_pause();
        // Resumes the loaded item without reloading it.
        assert_eq!(c.engine.commands, vec!["play"]);
        assert_eq!(c.state(), PlaybackState::Playing);
    }

    #[test]
    fn next_at_last_entry_stays_put_without_loading() {
        let mut c = controller_with(&["/m/a.mp4", "/m/b.mp4"]);
        c.load_and_play(1).unwrap();
        c.engine.commands.clear();
        c.next();
        assert_eq!(c.current_position(), Some(1));
        assert_eq!(loads(&c), 0);
    }

    #[test]
    fn previous_at_first_entry_stays_put() {
        let mut c = controller_with(&["/m/a.mp4", "/m/b.mp4"]);
        c.load_and_play(0).unwrap();
        c.engine.commands.clear();
        c.previous();
        assert_eq!(c.current_position(), Some(0));
        assert_eq!(loads(&c), 0);
    }

    #[test]
    fn end_of_media_advances_with_exactly_one_load() {
        let mut c = controller_with(&["/m/a.mp4", "/m/b.mp4", "/m/c.mp4"]);
        c.load_and_play(0).unwrap();
        c.engine.commands.clear();

        c.handle_event(EngineEvent::EndOfMedia);
        assert_eq!(c.current_position(), Some(1));
        assert_eq!(loads(&c), 1);
        assert_eq!(c.engine.commands[0], "load /m/b.mp4");
    }

    #[test]
    fn end_of_media_at_last_entry_stops_without_loading() {
        let mut c = controller_with(&["/m/a.mp4", "/m/b.mp4", "/m/c.mp4"]);
        c.load_and_play(2).unwrap();
        c.engine.commands.clear();

        c.handle_event(EngineEvent::EndOfMedia);
        assert_eq!(c.current_position(), Some(2));
        assert_eq!(loads(&c), 0);
        assert_eq!(c.state(), PlaybackState::Stopped);
    }

    #[test]
    fn engine_error_advances_like_end_of_media() {
        let mut c = controller_with(&["/m/a.mp4", "/m/b.mp4"]);
        c.load_and_play(0).unwrap();
        c.engine.commands.clear();

        c.handle_event(EngineEvent::Error("decode failed".into()));
        assert_eq!(c.current_position(), Some(1));
        assert_eq!(loads(&c), 1);
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut c = controller_with(&["/m/a.mp4"]);
        c.load_and_play(0).unwrap();
        c.handle_event(EngineEvent::DurationChanged(60_000));
        c.engine.commands.clear();

        c.seek_absolute(90_000).unwrap();
        assert_eq!(c.engine.commands, vec!["seek 60000"]);
        assert_eq!(c.position_ms(), 60_000);
    }

    #[test]
    fn relative_seek_clamps_at_both_ends() {
        let mut c = controller_with(&["/m/a.mp4"]);
        c.load_and_play(0).unwrap();
        c.handle_event(EngineEvent::DurationChanged(60_000));
        c.handle_event(EngineEvent::PositionChanged(5_000));
        c.engine.commands.clear();

        c.seek_relative(-10_000).unwrap();
        assert_eq!(c.engine.commands, vec!["seek 0"]);
        c.handle_event(EngineEvent::PositionChanged(55_000));
        c.seek_relative(10_000).unwrap();
        assert_eq!(c.engine.commands.last().unwrap(), "seek 60000");
    }

    #[test]
    fn seek_without_media_reports_no_media() {
        let mut c = controller_with(&["/m/a.mp4"]);
        assert_eq!(c.seek_absolute(1_000), Err(PlayerError::NoMediaLoaded));
        assert_eq!(c.seek_relative(1_000), Err(PlayerError::NoMediaLoaded));
        assert!(c.engine.commands.is_empty());
    }

    #[test]
    fn volume_is_clamped_and_boundaries_round_trip() {
        let mut c = controller_with(&[]);
        c.set_volume(150);
        assert_eq!(c.settings().volume, 100);
        c.set_volume(-5);
        assert_eq!(c.settings().volume, 0);
        c.set_volume(0);
        assert_eq!(c.settings().volume, 0);
        c.set_volume(100);
        assert_eq!(c.settings().volume, 100);
    }

    #[test]
    fn removing_playing_entry_clears_selection() {
        let mut c = controller_with(&["/m/a.mp4", "/m/b.mp4", "/m/c.mp4"]);
        c.load_and_play(1).unwrap();
        c.remove_entry(1);
        assert_eq!(c.current_position(), None);
        assert_eq!(c.playlist().len(), 2);
    }

    #[test]
    fn removing_before_current_shifts_it_down() {
        let mut c = controller_with(&["/m/a.mp4", "/m/b.mp4", "/m/c.mp4"]);
        c.load_and_play(2).unwrap();
        c.remove_entry(0);
        assert_eq!(c.current_position(), Some(1));
    }

    #[test]
    fn removing_after_current_leaves_it_alone() {
        let mut c = controller_with(&["/m/a.mp4", "/m/b.mp4", "/m/c.mp4"]);
        c.load_and_play(0).unwrap();
        c.remove_entry(2);
        assert_eq!(c.current_position(), Some(0));
    }

    #[test]
    fn state_events_are_mirrored() {
        let mut c = controller_with(&["/m/a.mp4"]);
        c.load_and_play(0).unwrap();
        c.engine.pending.push(EngineEvent::StateChanged(PlaybackState::Paused));
        c.engine.pending.push(EngineEvent::PositionChanged(1_234));
        c.poll();
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.position_ms(), 1_234);
    }
}
