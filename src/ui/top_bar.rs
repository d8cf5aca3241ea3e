//! Top bar UI: app title, view switcher, and status.

use super::colors;
use crate::state::{ActiveView, AppState};
use eframe::egui::{self, Color32, RichText};

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(
                    RichText::new("Globe Workbench")
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );

                ui.separator();

                for view in ActiveView::ALL {
                    let selected = state.active_view == view;
                    let text = RichText::new(view.label()).size(13.0).color(if selected {
                        colors::ui::ACTIVE
                    } else {
                        colors::ui::VALUE
                    });
                    if ui.selectable_label(selected, text).clicked() && !selected {
                        log::info!("Switched to {} view", view.label());
                        state.active_view = view;
                    }
                }

                ui.separator();

                ui.label(
                    RichText::new(&state.status_message)
                        .size(13.0)
                        .color(Color32::GRAY),
                );
            });
        });
}
