use eframe::egui;

use crate::types::playlist::Playlist;

/// Gesture from the playlist panel, applied by the app after drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistAction {
    Play(usize),
    Remove(usize),
    AddFile,
    AddFolder,
    Clear,
}

/// List view plus the Add File / Add Folder / Clear button row.
/// Double-click plays a row; the context menu removes it.
pub fn playlist_panel(
    ui: &mut egui::Ui,
    playlist: &Playlist,
    current: Option<usize>,
) -> Vec<PlaylistAction> {
    let mut actions = Vec::new();

    ui.vertical(|ui| {
        ui.heading("Playlist");
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                if playlist.is_empty() {
                    ui.weak("No media added");
                }
                for row in 0..playlist.len() {
                    let name = playlist
                        .display_name(row)
                        .unwrap_or_else(|| String::from("?"));
                    let selected = current == Some(row);
                    let response = ui.selectable_label(selected, name);
                    if response.double_clicked() {
                        actions.push(PlaylistAction::Play(row));
                    }
                    response.context_menu(|ui| {
                        if ui.button("Remove").clicked() {
                            actions.push(PlaylistAction::Remove(row));
                            ui.close_menu();
                        }
                    });
                }
            });

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Add File").clicked() {
                actions.push(PlaylistAction::AddFile);
            }
            if ui.button("Add Folder").clicked() {
                actions.push(PlaylistAction::AddFolder);
            }
            if ui.button("Clear").clicked() {
                actions.push(PlaylistAction::Clear);
            }
        });
    });

    actions
}
