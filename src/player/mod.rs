pub mod controller;
pub mod engine;
pub mod gst_engine;

pub use controller::PlayerController;
pub use engine::{EngineEvent, MediaEngine, PlayerError};
pub use gst_engine::{FrameSlot, GstEngine, VideoFrame};
