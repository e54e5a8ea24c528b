use eframe::egui;

use crate::model::catalog::{MATURITY_LEVELS, TEMPLATES};
use super::app::NexusApp;
use super::settings::UI_SCALE_RANGE;

pub fn draw_menu_bar(ctx: &egui::Context, app: &mut NexusApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            let waiting = app.session.is_waiting();

            ui.menu_button("File", |ui| {
                if ui.button("New Game").clicked() {
                    app.session.new_game();
                    ui.close();
                }
                if ui.add_enabled(!waiting, egui::Button::new("Save Game")).clicked() {
                    ui.close();
                    app.save_game();
                }
                if ui.button("Load Game").clicked() {
                    ui.close();
                    app.load_game();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let next = app.settings.theme.toggled();
                if ui.button(format!("Switch to {} Mode", next.label())).clicked() {
                    app.toggle_theme(ui.ctx());
                    ui.close();
                }
                ui.separator();
                ui.label("UI Scale");
                if ui
                    .add(egui::Slider::new(&mut app.settings.ui_scale, UI_SCALE_RANGE))
                    .drag_stopped()
                {
                    crate::ui::settings_io::save_settings(&app.settings);
                }
            });

            ui.menu_button("Templates", |ui| {
                for template in TEMPLATES.iter() {
                    let selected = app.session.template().name == template.name;
                    if ui.radio(selected, template.name).clicked() {
                        app.session.apply_template(template);
                        ui.close();
                    }
                }
            });

            ui.menu_button("Maturity", |ui| {
                for maturity in MATURITY_LEVELS.iter() {
                    let selected = app.session.maturity().name == maturity.name;
                    if ui.radio(selected, maturity.name).clicked() {
                        app.session.set_maturity(maturity);
                        app.push_params();
                        ui.close();
                    }
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    app.ui.show_about = true;
                    ui.close();
                }
            });
        });
    });
}
