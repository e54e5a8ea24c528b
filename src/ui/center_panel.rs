use eframe::egui;

use crate::model::catalog::Mode;
use super::app::NexusApp;

pub fn draw_center_panel(ctx: &egui::Context, app: &mut NexusApp) {
    let input_id = egui::Id::new("story_input_box");

    // Player input, pinned under the transcript.
    egui::TopBottomPanel::bottom("story_input").show(ctx, |ui| {
        let waiting = app.session.is_waiting();
        let mut send_now = false;

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let response = ui.add_sized(
                [(ui.available_width() - 380.0).max(120.0), 24.0],
                egui::TextEdit::singleline(&mut app.ui.input_text)
                    .id(input_id)
                    .hint_text("What do you do?"),
            );

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                send_now = true;
            }

            let current = app.session.mode();
            for mode in Mode::ALL {
                if ui.selectable_label(current == mode, mode.label()).clicked() {
                    app.session.set_mode(mode);
                }
            }

            if ui.add_enabled(!waiting, egui::Button::new("Submit")).clicked() {
                send_now = true;
            }

            if ui.add_enabled(!waiting, egui::Button::new("Undo")).clicked() {
                app.undo();
            }
        });
        ui.add_space(4.0);

        if send_now && !waiting {
            app.submit();

            // Enter drops focus; take it back for the next command.
            ui.memory_mut(|m| m.request_focus(input_id));
        }
    });

    // ---------- Transcript ----------
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.add(
                    egui::Label::new(egui::RichText::new(app.session.transcript()).size(16.0))
                        .wrap(),
                );
                if app.ui.should_auto_scroll {
                    ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                }
            });
    });
}
