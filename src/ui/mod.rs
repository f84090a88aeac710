pub mod app;
pub mod controls;
pub mod playlist_panel;
pub mod video_surface;
