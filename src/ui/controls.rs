use eframe::egui;

use crate::types::playback::{format_time, PlaybackRate, PlaybackSettings, PlaybackState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlAction {
    TogglePlayPause,
    Stop,
    Previous,
    Next,
    SeekAbsolute(u64),
    SetVolume(i32),
    ToggleMute,
    SetRate(PlaybackRate),
}

/// Seek bar, transport buttons, volume and speed controls. Keeps only
/// the transient slider-drag value; everything else is drawn from the
/// controller state passed in each frame.
#[derive(Default)]
pub struct ControlsPanel {
    drag_position: Option<u64>,
}

impl ControlsPanel {
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: PlaybackState,
        position_ms: u64,
        duration_ms: u64,
        settings: PlaybackSettings,
    ) -> Vec<ControlAction> {
        let mut actions = Vec::new();

        // Progress row: position label, seek slider, duration label.
        ui.horizontal(|ui| {
            let shown = self.drag_position.unwrap_or(position_ms);
            ui.monospace(format_time(shown));

            let mut pos = shown;
            let range = 0..=duration_ms.max(1);
            let slider = egui::Slider::new(&mut pos, range).show_value(false);
            let response = ui.add_sized([ui.available_width() - 64.0, 18.0], slider);
            if response.changed() {
                // Position updates must not fight an in-progress drag.
                self.drag_position = Some(pos);
            }
            if response.drag_stopped() {
                if let Some(target) = self.drag_position.take() {
                    actions.push(ControlAction::SeekAbsolute(target));
                }
            }

            ui.monospace(format_time(duration_ms));
        });

        ui.horizontal(|ui| {
            if ui.button("⏮").clicked() {
                actions.push(ControlAction::Previous);
            }
            let play_label = match state {
                PlaybackState::Playing => "⏸",
                _ => "▶",
            };
            if ui.button(play_label).clicked() {
                actions.push(ControlAction::TogglePlayPause);
            }
            if ui.button("⏹").clicked() {
                actions.push(ControlAction::Stop);
            }
            if ui.button("⏭").clicked() {
                actions.push(ControlAction::Next);
            }

            ui.separator();

            let mute_label = if settings.effectively_muted() {
                "🔇"
            } else {
                "🔊"
            };
            if ui.button(mute_label).clicked() {
                actions.push(ControlAction::ToggleMute);
            }
            let mut volume = i32::from(settings.volume);
            if ui
                .add(egui::Slider::new(&mut volume, 0..=100).show_value(false))
                .changed()
            {
                actions.push(ControlAction::SetVolume(volume));
            }

            ui.separator();

            ui.label("Speed:");
            let mut rate = settings.rate;
            egui::ComboBox::from_id_salt("playback_rate")
                .selected_text(rate.to_string())
                .show_ui(ui, |ui| {
                    for candidate in PlaybackRate::ALL {
                        ui.selectable_value(&mut rate, candidate, candidate.to_string());
                    }
                });
            if rate != settings.rate {
                actions.push(ControlAction::SetRate(rate));
            }
        });

        actions
    }
}
