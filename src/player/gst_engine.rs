use std::path::Path;
use std::sync::{Arc, Mutex};

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use gstreamer_video::VideoFrameExt;
use log::{debug, warn};

use crate::player::engine::{EngineEvent, MediaEngine};
use crate::types::playback::{PlaybackRate, PlaybackState};

/// Latest decoded video frame, written by the appsink callback on a
/// GStreamer streaming thread and read by the UI thread.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>, // tightly packed RGBA
    pub width: u32,
    pub height: u32,
}

pub type FrameSlot = Arc<Mutex<Option<VideoFrame>>>;

/// `playbin`-backed engine. Commands run on the UI thread and are
/// fire-and-forget; notifications are drained from the pipeline bus
/// once per frame via [`MediaEngine::poll_events`].
pub struct GstEngine {
    playbin: gst::Element,
    frame: FrameSlot,
    rate: f64,
    last_position_ms: Option<u64>,
    last_duration_ms: Option<u64>,
    last_state: PlaybackState,
}

impl GstEngine {
    pub fn new() -> Result<Self, gst::glib::BoolError> {
        let playbin = gst::ElementFactory::make("playbin").build()?;

        let frame: FrameSlot = Arc::new(Mutex::new(None));

        let caps = gst_video::VideoCapsBuilder::new()
            .format(gst_video::VideoFormat::Rgba)
            .build();
        let appsink = gst_app::AppSink::builder()
            .caps(&caps)
            .max_buffers(1)
            .drop(true)
            .build();

        let slot = Arc::clone(&frame);
        appsink.set_callbacks(
            gst_app::AppSinkCallbacks::builder()
                .new_sample(move |sink| {
                    let sample = sink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
                    let buffer = sample.buffer().ok_or(gst::FlowError::Error)?;
                    let caps = sample.caps().ok_or(gst::FlowError::Error)?;
                    let info = gst_video::VideoInfo::from_caps(caps)
                        .map_err(|_| gst::FlowError::Error)?;
                    let vframe =
                        gst_video::VideoFrameRef::from_buffer_ref_readable(buffer, &info)
                            .map_err(|_| gst::FlowError::Error)?;

                    let width = info.width();
                    let height = info.height();
                    let stride = vframe.plane_stride()[0] as usize;
                    let row_len = width as usize * 4;
                    let src = vframe.plane_data(0).map_err(|_| gst::FlowError::Error)?;

                    // Rows can carry stride padding; repack tightly.
                    let mut data = Vec::with_capacity(row_len * height as usize);
                    for row in src.chunks_exact(stride).take(height as usize) {
                        data.extend_from_slice(&row[..row_len]);
                    }

                    if let Ok(mut slot) = slot.lock() {
                        *slot = Some(VideoFrame {
                            data,
                            width,
                            height,
                        });
                    }
                    Ok(gst::FlowSuccess::Ok)
                })
                .build(),
        );

        playbin.set_property("video-sink", appsink.upcast_ref::<gst::Element>());

        Ok(GstEngine {
            playbin,
            frame,
            rate: 1.0,
            last_position_ms: None,
            last_duration_ms: None,
            last_state: PlaybackState::Stopped,
        })
    }

    /// Shared handle the video surface reads its texture from.
    pub fn frame_slot(&self) -> FrameSlot {
        Arc::clone(&self.frame)
    }

    fn query_position_ms(&self) -> Option<u64> {
        self.playbin
            .query_position::<gst::ClockTime>()
            .map(|t| t.mseconds())
    }

    fn query_duration_ms(&self) -> Option<u64> {
        self.playbin
            .query_duration::<gst::ClockTime>()
            .map(|t| t.mseconds())
    }

    /// Rate changes ride on a flushing seek at the current position.
    fn apply_rate(&self) {
        let Some(position) = self.playbin.query_position::<gst::ClockTime>() else {
            return;
        };
        if let Err(err) = self.playbin.seek(
            self.rate,
            gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE,
            gst::SeekType::Set,
            position,
            gst::SeekType::None,
            gst::ClockTime::NONE,
        ) {
            warn!("Rate change seek failed: {err}");
        }
    }

    fn drain_bus(&mut self, events: &mut Vec<EngineEvent>) {
        let Some(bus) = self.playbin.bus() else {
            return;
        };
        while let Some(msg) = bus.pop() {
            use gst::MessageView;
            match msg.view() {
                MessageView::Eos(..) => {
                    debug!("End of stream");
                    events.push(EngineEvent::EndOfMedia);
                }
                MessageView::Error(err) => {
                    events.push(EngineEvent::Error(err.error().to_string()));
                }
                MessageView::StateChanged(s) => {
                    let from_playbin = msg
                        .src()
                        .is_some_and(|src| src == self.playbin.upcast_ref::<gst::Object>());
                    // Intermediate transitions still have a pending state.
                    if from_playbin && s.pending() == gst::State::VoidPending {
                        let state = match s.current() {
                            gst::State::Playing => PlaybackState::Playing,
                            gst::State::Paused => PlaybackState::Paused,
                            _ => PlaybackState::Stopped,
                        };
                        if state != self.last_state {
                            self.last_state = state;
                            events.push(EngineEvent::StateChanged(state));
                        }
                    }
                }
                MessageView::AsyncDone(..) => {
                    // A freshly prerolled stream starts at 1.0x; restore
                    // the selected speed.
                    if (self.rate - 1.0).abs() > f64::EPSILON {
                        self.apply_rate();
                    }
                }
                _ => (),
            }
        }
    }
}

impl MediaEngine for GstEngine {
    fn load(&mut self, location: &Path) {
        let uri = match gst::glib::filename_to_uri(location, None) {
            Ok(uri) => uri,
            Err(err) => {
                warn!("Cannot build URI for {}: {}", location.display(), err);
                return;
            }
        };
        debug!("Loading {uri}");

        // Supersedes whatever was playing.
        let _ = self.playbin.set_state(gst::State::Null);
        if let Ok(mut slot) = self.frame.lock() {
            *slot = None;
        }
        self.last_position_ms = None;
        self.last_duration_ms = None;
        self.playbin.set_property("uri", uri.as_str());
    }

    fn play(&mut self) {
        if let Err(err) = self.playbin.set_state(gst::State::Playing) {
            warn!("Failed to start playback: {err}");
        }
    }

    fn pause(&mut self) {
        if let Err(err) = self.playbin.set_state(gst::State::Paused) {
            warn!("Failed to pause playback: {err}");
        }
    }

    fn stop(&mut self) {
        // Ready keeps the uri around so play() restarts from the top.
        if let Err(err) = self.playbin.set_state(gst::State::Ready) {
            warn!("Failed to stop playback: {err}");
        }
        if let Ok(mut slot) = self.frame.lock() {
            *slot = None;
        }
    }

    fn seek(&mut self, position_ms: u64) {
        if let Err(err) = self.playbin.seek(
            self.rate,
            gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE,
            gst::SeekType::Set,
            gst::ClockTime::from_mseconds(position_ms),
            gst::SeekType::None,
            gst::ClockTime::NONE,
        ) {
            warn!("Seek to {position_ms}ms failed: {err}");
        }
    }

    fn set_volume(&mut self, volume: u8) {
        let linear = f64::from(volume.min(100)) / 100.0;
        debug!("Setting volume to {linear}");
        self.playbin.set_property("volume", linear);
    }

    fn set_muted(&mut self, muted: bool) {
        self.playbin.set_property("mute", muted);
    }

    fn set_rate(&mut self, rate: PlaybackRate) {
        self.rate = rate.factor();
        self.apply_rate();
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        self.drain_bus(&mut events);

        if let Some(duration) = self.query_duration_ms() {
            if self.last_duration_ms != Some(duration) {
                self.last_duration_ms = Some(duration);
                events.push(EngineEvent::DurationChanged(duration));
            }
        }
        if let Some(position) = self.query_position_ms() {
            if self.last_position_ms != Some(position) {
                self.last_position_ms = Some(position);
                events.push(EngineEvent::PositionChanged(position));
            }
        }

        events
    }
}
