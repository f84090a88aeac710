use std::fmt::{self, Display, Formatter};

/// Playback state mirrored from the engine; never independently
/// authoritative. "Idle" is `Stopped` with no current playlist row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// The fixed set of playback speeds offered by the speed selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackRate {
    Half,
    ThreeQuarters,
    #[default]
    Normal,
    OneQuarterUp,
    OneHalfUp,
    Double,
}

impl PlaybackRate {
    pub const ALL: [PlaybackRate; 6] = [
        PlaybackRate::Half,
        PlaybackRate::ThreeQuarters,
        PlaybackRate::Normal,
        PlaybackRate::OneQuarterUp,
        PlaybackRate::OneHalfUp,
        PlaybackRate::Double,
    ];

    pub fn factor(self) -> f64 {
        match self {
            PlaybackRate::Half => 0.5,
            PlaybackRate::ThreeQuarters => 0.75,
            PlaybackRate::Normal => 1.0,
            PlaybackRate::OneQuarterUp => 1.25,
            PlaybackRate::OneHalfUp => 1.5,
            PlaybackRate::Double => 2.0,
        }
    }
}

impl Display for PlaybackRate {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let label = match self {
            PlaybackRate::Half => "0.5x",
            PlaybackRate::ThreeQuarters => "0.75x",
            PlaybackRate::Normal => "1.0x",
            PlaybackRate::OneQuarterUp => "1.25x",
            PlaybackRate::OneHalfUp => "1.5x",
            PlaybackRate::Double => "2.0x",
        };
        f.write_str(label)
    }
}

/// Volume, mute and speed as the controller holds them. Volume is
/// persisted across runs; mute and rate reset each launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSettings {
    pub volume: u8,
    pub muted: bool,
    pub rate: PlaybackRate,
}

impl PlaybackSettings {
    pub const DEFAULT_VOLUME: u8 = 70;

    pub fn with_volume(volume: u8) -> Self {
        PlaybackSettings {
            volume: volume.min(100),
            muted: false,
            rate: PlaybackRate::default(),
        }
    }

    /// Canonical mute model: the speaker shows muted when the explicit
    /// flag is set or the volume sits at zero.
    pub fn effectively_muted(&self) -> bool {
        self.muted || self.volume == 0
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self::with_volume(Self::DEFAULT_VOLUME)
    }
}

/// Renders milliseconds as `MM:SS`, or `HH:MM:SS` from one hour up.
pub fn format_time(ms: u64) -> String {
    let seconds = ms / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes % 60, seconds % 60)
    } else {
        format!("{:02}:{:02}", minutes, seconds % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_under_a_minute() {
        assert_eq!(format_time(5000), "00:05");
        assert_eq!(format_time(0), "00:00");
    }

    #[test]
    fn format_time_minutes_and_hours() {
        assert_eq!(format_time(65000), "01:05");
        assert_eq!(format_time(3_661_000), "01:01:01");
    }

    #[test]
    fn rate_labels_match_factors() {
        assert_eq!(PlaybackRate::Half.to_string(), "0.5x");
        assert_eq!(PlaybackRate::Normal.to_string(), "1.0x");
        assert_eq!(PlaybackRate::Double.to_string(), "2.0x");
        assert_eq!(PlaybackRate::ALL.len(), 6);
    }

    #[test]
    fn effectively_muted_covers_both_signals() {
        let mut s = PlaybackSettings::default();
        assert!(!s.effectively_muted());
        s.muted = true;
        assert!(s.effectively_muted());
        s.muted = false;
        s.volume = 0;
        assert!(s.effectively_muted());
    }
}
