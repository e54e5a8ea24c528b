use std::path::{Path, PathBuf};
use std::sync::mpsc;

use eframe::egui;
use tracing::{info, warn};

use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::error::GenerationError;
use crate::model::game_save::{read_save, write_save, SAVE_EXTENSION};
use crate::model::session::Session;
use crate::ui::settings::UiSettings;
use crate::ui::settings_io::save_settings;

pub const APP_NAME: &str = "Narrative Nexus";

/* =========================
   UI State
   ========================= */

/// Widget-only state that is not part of the story.
#[derive(Default)]
pub struct UiState {
    pub input_text: String,
    pub should_auto_scroll: bool,
    pub show_about: bool,
    pub ui_error: Option<String>,
}

/* =========================
   App
   ========================= */

pub struct NexusApp {
    pub session: Session,
    pub ui: UiState,
    pub settings: UiSettings,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl NexusApp {
    pub fn new(
        ctx: &egui::Context,
        settings: UiSettings,
        cmd_tx: mpsc::Sender<EngineCommand>,
        resp_rx: mpsc::Receiver<EngineResponse>,
    ) -> Self {
        ctx.set_visuals(settings.theme.visuals());

        let mut app = Self {
            session: Session::default(),
            ui: UiState::default(),
            settings,
            cmd_tx,
            resp_rx,
        };
        app.push_params();
        app
    }

    fn drain_responses(&mut self) {
        while let Ok(resp) = self.resp_rx.try_recv() {
            match resp {
                EngineResponse::Configured(params) => {
                    info!(?params, "Engine reconfigured");
                }
                EngineResponse::Generated { ticket, result } => {
                    let applied = match result {
                        Ok(text) => self.session.complete_turn(ticket, &text),
                        Err(e) => self.session.fail_turn(ticket, &e),
                    };
                    if applied {
                        self.ui.should_auto_scroll = true;
                    }
                }
            }
        }
    }

    /// Sends the session's current parameters so the engine rebuilds its chain.
    pub fn push_params(&mut self) {
        let params = self.session.params();
        if self.cmd_tx.send(EngineCommand::Configure(params)).is_err() {
            warn!("Engine is gone; parameters not applied");
            self.session
                .set_status(format!("Error: {}", GenerationError::EngineUnavailable));
        }
    }

    pub fn submit(&mut self) {
        let input = std::mem::take(&mut self.ui.input_text);

        let Some((ticket, request)) = self.session.begin_turn(&input) else {
            return;
        };

        if self
            .cmd_tx
            .send(EngineCommand::Generate { ticket, request })
            .is_err()
        {
            self.session
                .fail_turn(ticket, &GenerationError::EngineUnavailable);
        }
    }

    pub fn undo(&mut self) {
        if self.session.undo() {
            self.ui.should_auto_scroll = true;
        }
    }

    pub fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.settings.theme = self.settings.theme.toggled();
        ctx.set_visuals(self.settings.theme.visuals());
        save_settings(&self.settings);
    }

    pub fn save_game(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Dungeon Save", &[SAVE_EXTENSION])
            .set_file_name(format!("adventure.{SAVE_EXTENSION}"))
            .save_file()
        else {
            return;
        };
        let path = with_save_extension(path);

        match write_save(&path, &self.session.to_save()) {
            Ok(()) => {
                info!(path = %path.display(), "Game saved");
                self.session.set_status("Game saved");
            }
            Err(e) => self.report_error(format!("Save failed: {e}")),
        }
    }

    pub fn load_game(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Dungeon Save", &[SAVE_EXTENSION])
            .pick_file()
        else {
            return;
        };
        self.load_from(&path);
    }

    /// Replaces the story with the save at `path` and reconfigures the engine
    /// with its parameters. A bad file leaves the current story in place.
    pub fn load_from(&mut self, path: &Path) {
        let result = read_save(path).and_then(|save| self.session.load(save));
        match result {
            Ok(()) => {
                self.push_params();
                self.ui.should_auto_scroll = true;
            }
            Err(e) => self.report_error(format!("Load failed: {e}")),
        }
    }

    fn report_error(&mut self, message: String) {
        warn!("{message}");
        self.session.set_status(message.clone());
        self.ui.ui_error = Some(message);
    }
}

fn with_save_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension(SAVE_EXTENSION);
    }
    path
}

/* =========================
   egui App
   ========================= */

impl eframe::App for NexusApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.ui_scale);

        self.drain_responses();

        crate::ui::menu_bar::draw_menu_bar(ctx, self);
        crate::ui::controls_panel::draw_controls_panel(ctx, self);
        draw_status_bar(ctx, &self.session);
        crate::ui::center_panel::draw_center_panel(ctx, self);

        draw_about(ctx, &mut self.ui.show_about);
        draw_error(ctx, &mut self.ui.ui_error);

        self.ui.should_auto_scroll = false;
    }
}

/* =========================
   UI Helpers
   ========================= */

fn draw_status_bar(ctx: &egui::Context, session: &Session) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if session.is_waiting() {
                ui.spinner();
            }
            ui.label(session.status());
        });
    });
}

fn draw_about(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("About")
        .open(open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading(APP_NAME);
            ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
        });
}

fn draw_error(ctx: &egui::Context, error: &mut Option<String>) {
    let Some(message) = error.clone() else {
        return;
    };

    let mut close = false;
    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(message);
            if ui.button("OK").clicked() {
                close = true;
            }
        });

    if close {
        *error = None;
    }
}
