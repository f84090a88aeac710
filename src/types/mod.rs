pub mod playback;
pub mod playlist;
pub mod settings;
