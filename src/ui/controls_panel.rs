use eframe::egui;

use crate::model::params::{RETRIEVAL_K_RANGE, TEMPERATURE_RANGE, TOP_P_RANGE};
use super::app::NexusApp;

/// Temperature, top-p and retrieval-k sliders. Any change rebuilds the
/// engine's generation chain.
pub fn draw_controls_panel(ctx: &egui::Context, app: &mut NexusApp) {
    egui::TopBottomPanel::top("controls").show(ctx, |ui| {
        let mut params = app.session.params();
        let mut changed = false;

        ui.horizontal(|ui| {
            ui.label("Temperature:");
            changed |= ui
                .add(egui::Slider::new(&mut params.temperature, TEMPERATURE_RANGE).step_by(0.1))
                .changed();

            ui.label("Top P:");
            changed |= ui
                .add(egui::Slider::new(&mut params.top_p, TOP_P_RANGE).step_by(0.1))
                .changed();

            ui.label("Retrieval K:");
            changed |= ui
                .add(egui::Slider::new(&mut params.retrieval_k, RETRIEVAL_K_RANGE))
                .changed();
        });

        if changed {
            app.session.set_params(params);
            app.push_params();
        }
    });
}
