//! Modal alert for failed user actions.

use crate::state::AlertQueue;
use eframe::egui::{self, Align2, RichText, Vec2};

/// Shows the oldest pending alert until the user acknowledges it.
pub fn render_alert_window(ctx: &egui::Context, alerts: &mut AlertQueue) {
    let Some(alert) = alerts.current() else {
        return;
    };

    let title = match alerts.pending_count() {
        0 | 1 => alert.kind.title().to_string(),
        n => format!("{} (1 of {})", alert.kind.title(), n),
    };

    let mut dismissed = false;
    egui::Window::new(title)
        .id(egui::Id::new("alert_window"))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_TOP, Vec2::new(0.0, 80.0))
        .show(ctx, |ui| {
            ui.label(RichText::new(&alert.message).size(13.0));
            ui.add_space(6.0);
            dismissed = ui.button("OK").clicked();
        });

    if dismissed {
        alerts.dismiss();
    }
}
