use std::time::Duration;

use eframe::egui;
use log::info;

use crate::ops::import;
use crate::player::{GstEngine, PlayerController};
use crate::types::playback::{PlaybackSettings, PlaybackState};
use crate::types::settings::{StoredSettings, WindowGeometry};
use crate::ui::controls::{ControlAction, ControlsPanel};
use crate::ui::playlist_panel::{playlist_panel, PlaylistAction};
use crate::ui::video_surface::VideoSurface;

const SEEK_STEP_MS: i64 = 10_000;
const VOLUME_STEP: i32 = 5;

pub struct MedleyApp {
    controller: PlayerController<GstEngine>,
    video: VideoSurface,
    controls: ControlsPanel,
    playlist_visible: bool,
    fullscreen: bool,
    show_about: bool,
    settings_saved: bool,
}

impl MedleyApp {
    pub fn new(engine: GstEngine, stored: &StoredSettings) -> Self {
        let frame_slot = engine.frame_slot();
        let controller =
            PlayerController::new(engine, PlaybackSettings::with_volume(stored.volume));
        MedleyApp {
            controller,
            video: VideoSurface::new(frame_slot),
            controls: ControlsPanel::default(),
            playlist_visible: true,
            fullscreen: false,
            show_about: false,
            settings_saved: false,
        }
    }

    fn toggle_fullscreen(&mut self, ctx: &egui::Context) {
        self.fullscreen = !self.fullscreen;
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.fullscreen));
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        use egui::{Key, Modifiers};

        let mut quit = false;
        let mut fullscreen = false;
        ctx.input_mut(|i| {
            if i.consume_key(Modifiers::NONE, Key::Space) {
                self.controller.toggle_play_pause();
            }
            if i.consume_key(Modifiers::NONE, Key::ArrowRight) {
                let _ = self.controller.seek_relative(SEEK_STEP_MS);
            }
            if i.consume_key(Modifiers::NONE, Key::ArrowLeft) {
                let _ = self.controller.seek_relative(-SEEK_STEP_MS);
            }
            if i.consume_key(Modifiers::NONE, Key::ArrowUp) {
                let volume = i32::from(self.controller.settings().volume) + VOLUME_STEP;
                self.controller.set_volume(volume);
            }
            if i.consume_key(Modifiers::NONE, Key::ArrowDown) {
                let volume = i32::from(self.controller.settings().volume) - VOLUME_STEP;
                self.controller.set_volume(volume);
            }
            if i.consume_key(Modifiers::NONE, Key::M) {
                self.controller.toggle_muted();
            }
            if i.consume_key(Modifiers::CTRL | Modifiers::SHIFT, Key::O) {
                self.add_folder();
            }
            if i.consume_key(Modifiers::CTRL, Key::O) {
                self.add_file();
            }
            if i.consume_key(Modifiers::CTRL, Key::Q) {
                quit = true;
            }
            if i.consume_key(Modifiers::NONE, Key::F11) {
                fullscreen = true;
            }
            if i.consume_key(Modifiers::CTRL, Key::L) {
                self.playlist_visible = !self.playlist_visible;
            }
        });
        if fullscreen {
            self.toggle_fullscreen(ctx);
        }
        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn add_file(&mut self) {
        if let Some(path) = import::pick_media_file() {
            self.controller.playlist_mut().add(path);
        }
    }

    fn add_folder(&mut self) {
        if let Some(folder) = import::pick_folder() {
            let found = import::scan_folder(&folder);
            info!(
                "Imported {} media files from {}",
                found.len(),
                folder.display()
            );
            for path in found {
                self.controller.playlist_mut().add(path);
            }
        }
    }

    fn apply_playlist_action(&mut self, action: PlaylistAction) {
        match action {
            PlaylistAction::Play(row) => {
                let _ = self.controller.load_and_play(row);
            }
            PlaylistAction::Remove(row) => self.controller.remove_entry(row),
            PlaylistAction::AddFile => self.add_file(),
            PlaylistAction::AddFolder => self.add_folder(),
            PlaylistAction::Clear => {
                self.controller.clear_playlist();
                self.video.reset();
            }
        }
    }

    fn apply_control_action(&mut self, action: ControlAction) {
        match action {
            ControlAction::TogglePlayPause => self.controller.toggle_play_pause(),
            ControlAction::Stop => {
                self.controller.stop();
                self.video.reset();
            }
            ControlAction::Previous => self.controller.previous(),
            ControlAction::Next => self.controller.next(),
            ControlAction::SeekAbsolute(ms) => {
                let _ = self.controller.seek_absolute(ms);
            }
            ControlAction::SetVolume(volume) => self.controller.set_volume(volume),
            ControlAction::ToggleMute => self.controller.toggle_muted(),
            ControlAction::SetRate(rate) => self.controller.set_rate(rate),
        }
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add(egui::Button::new("Open File").shortcut_text("Ctrl+O"))
                    .clicked()
                {
                    self.add_file();
                    ui.close_menu();
                }
                if ui
                    .add(egui::Button::new("Open Folder").shortcut_text("Ctrl+Shift+O"))
                    .clicked()
                {
                    self.add_folder();
                    ui.close_menu();
                }
                ui.separator();
                if ui
                    .add(egui::Button::new("Exit").shortcut_text("Ctrl+Q"))
                    .clicked()
                {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
            ui.menu_button("View", |ui| {
                if ui
                    .add(egui::Button::new("Fullscreen").shortcut_text("F11"))
                    .clicked()
                {
                    self.toggle_fullscreen(ctx);
                    ui.close_menu();
                }
                if ui
                    .add(egui::Button::new("Toggle Playlist").shortcut_text("Ctrl+L"))
                    .clicked()
                {
                    self.playlist_visible = !self.playlist_visible;
                    ui.close_menu();
                }
            });
            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    self.show_about = true;
                    ui.close_menu();
                }
            });
        });
    }

    fn about_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_about;
        egui::Window::new("About Medley")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Medley");
                ui.label("A media player built with egui and GStreamer.");
                ui.add_space(8.0);
                ui.label("Playlist management, speed control,");
                ui.label("keyboard shortcuts and fullscreen mode.");
            });
        self.show_about = open;
    }

    /// Writes geometry and volume once, on the close request.
    fn save_settings(&mut self, ctx: &egui::Context) {
        if self.settings_saved {
            return;
        }
        self.settings_saved = true;

        let geometry = ctx
            .input(|i| i.viewport().outer_rect)
            .map(|rect| WindowGeometry {
                x: rect.min.x,
                y: rect.min.y,
                width: rect.width(),
                height: rect.height(),
            });
        let stored = StoredSettings {
            geometry,
            volume: self.controller.settings().volume,
        };
        stored.save();
    }
}

impl eframe::App for MedleyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll();
        self.handle_shortcuts(ctx);

        if ctx.input(|i| i.viewport().close_requested()) {
            self.save_settings(ctx);
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.menu_bar(ui, ctx);
        });

        let mut actions = Vec::new();
        if self.playlist_visible {
            egui::SidePanel::left("playlist_panel")
                .resizable(true)
                .default_width(250.0)
                .width_range(200.0..=300.0)
                .show(ctx, |ui| {
                    actions.extend(playlist_panel(
                        ui,
                        self.controller.playlist(),
                        self.controller.current_position(),
                    ));
                });
        }
        for action in actions {
            self.apply_playlist_action(action);
        }

        let mut control_actions = Vec::new();
        egui::TopBottomPanel::bottom("controls_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            control_actions = self.controls.show(
                ui,
                self.controller.state(),
                self.controller.position_ms(),
                self.controller.duration_ms(),
                self.controller.settings(),
            );
            ui.add_space(4.0);
        });
        for action in control_actions {
            self.apply_control_action(action);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.video.show(ui, ctx);
            });

        if self.show_about {
            self.about_window(ctx);
        }

        // Keep frames and position labels moving while playing; idle
        // polling stays slow enough not to matter.
        let interval = match self.controller.state() {
            PlaybackState::Playing => Duration::from_millis(33),
            _ => Duration::from_millis(250),
        };
        ctx.request_repaint_after(interval);
    }
}
