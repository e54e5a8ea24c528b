pub mod app;
pub mod center_panel;
pub mod controls_panel;
pub mod menu_bar;
pub mod settings;
pub mod settings_io;
