//! Dual globe view: faded back hemisphere under the front, with click-to-connect.

use super::colors;
use super::gestures::{feature_under_pointer, globe_gestures};
use crate::geo::{self, CountryStyle};
use crate::state::{AppState, DualGlobeState, GlobeInput};
use eframe::egui::{self, Color32, RichText, ScrollArea, Sense, Stroke};
use geo_types::Coord;

pub fn render_dual_globe(ctx: &egui::Context, state: &mut AppState, graticule: &[Vec<Coord<f64>>]) {
    render_connection_panel(ctx, &mut state.dual_globe);

    egui::CentralPanel::default().show(ctx, |ui| {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, colors::globe::BACKGROUND);

        let globe = &mut state.dual_globe;

        let inputs = globe_gestures(&response, &globe.settings, globe.zoom.value(), true);
        for input in inputs {
            globe.apply(input);
        }
        if response.double_clicked() {
            globe.reset_view();
        }

        let front = globe.front_projection(rect);
        let back = globe.back_projection(rect);

        let target = feature_under_pointer(&response, &front, globe.countries.as_ref());
        globe.apply(GlobeInput::Hover { target });
        if response.clicked() {
            globe.apply(GlobeInput::Click { target });
        }
        let globe = &*globe;

        // Back hemisphere first, seen through the translucent front disc
        geo::render_lines(
            &painter,
            graticule,
            &back,
            Stroke::new(0.5, colors::dual::back_stroke()),
        );
        if let Some(countries) = &globe.countries {
            geo::render_countries(&painter, countries, &back, |_| CountryStyle {
                fill: colors::dual::back_fill(),
                stroke: Stroke::new(0.5, colors::dual::back_stroke()),
            });
        }
        geo::render_connections(
            &painter,
            &globe.connections,
            &back,
            Stroke::new(1.0, colors::dual::back_connection()),
        );

        geo::render_sphere(
            &painter,
            &front,
            colors::dual::sphere(),
            Stroke::new(1.0, colors::globe::GRATICULE),
        );
        geo::render_lines(
            &painter,
            graticule,
            &front,
            Stroke::new(0.5, colors::globe::GRATICULE),
        );
        if let Some(countries) = &globe.countries {
            geo::render_countries(&painter, countries, &front, |index| front_style(globe, index));
        }
        geo::render_connections(
            &painter,
            &globe.connections,
            &front,
            Stroke::new(1.5, colors::dual::CONNECTION),
        );
    });
}

fn front_style(globe: &DualGlobeState, index: usize) -> CountryStyle {
    let fill = if globe.selection.contains(index) {
        colors::dual::SELECTED_FILL
    } else if globe.hovered == Some(index) {
        colors::dual::HOVER_FILL
    } else {
        colors::dual::COUNTRY_FILL
    };
    let stroke = if globe.hovered == Some(index) {
        Stroke::new(1.0, Color32::WHITE)
    } else {
        Stroke::new(0.5, colors::dual::COUNTRY_STROKE)
    };
    CountryStyle { fill, stroke }
}

fn render_connection_panel(ctx: &egui::Context, globe: &mut DualGlobeState) {
    egui::SidePanel::right("connection_panel")
        .resizable(true)
        .default_width(220.0)
        .min_width(180.0)
        .max_width(350.0)
        .show(ctx, |ui| {
            ui.heading("Connections");
            ui.separator();

            let hint = match globe.selection.len() {
                0 => "Click a country to start a connection",
                _ => "Click a second country to connect",
            };
            ui.label(RichText::new(hint).size(12.0).color(colors::ui::LABEL));

            if let Some(name) = globe
                .hovered
                .and_then(|i| globe.countries.as_ref()?.get(i))
                .map(|f| f.name.as_str())
            {
                ui.label(RichText::new(name).strong().color(colors::ui::ACTIVE));
            }

            ui.add_space(5.0);
            ui.horizontal(|ui| {
                if ui.button("Reset view").clicked() {
                    globe.reset_view();
                }
                let can_clear = !globe.connections.is_empty() || !globe.selection.is_empty();
                if ui
                    .add_enabled(can_clear, egui::Button::new("Clear connections"))
                    .clicked()
                {
                    log::info!("Cleared {} connections", globe.connections.len());
                    globe.clear_connections();
                }
            });
            ui.separator();

            ScrollArea::vertical().show(ui, |ui| {
                if globe.connections.is_empty() {
                    ui.label(RichText::new("No connections").color(colors::ui::LABEL));
                }
                for (i, connection) in globe.connections.iter().enumerate() {
                    ui.label(
                        RichText::new(format!(
                            "{}. {} → {}",
                            i + 1,
                            connection.source_name,
                            connection.target_name
                        ))
                        .size(12.0)
                        .color(colors::ui::VALUE),
                    );
                }
            });
        });
}
