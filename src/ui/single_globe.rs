//! Single globe view: rotating globe fit to the viewport with a hover info panel.

use super::colors;
use super::gestures::{feature_under_pointer, globe_gestures};
use crate::geo::{self, CountryStyle};
use crate::state::{AppState, GlobeInput};
use eframe::egui::{self, Rect, RichText, Sense, Stroke, Vec2};
use geo_types::Coord;

pub fn render_single_globe(ctx: &egui::Context, state: &mut AppState, graticule: &[Vec<Coord<f64>>]) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, colors::globe::BACKGROUND);

        let globe = &mut state.single_globe;

        // Apply gestures before drawing so the frame reflects them
        let inputs = globe_gestures(&response, &globe.settings, globe.zoom.value(), false);
        for input in inputs {
            globe.apply(input);
        }
        if response.double_clicked() {
            globe.reset_view();
        }

        let projection = globe.projection(rect);
        let hovered = feature_under_pointer(&response, &projection, globe.countries.as_ref());
        globe.apply(GlobeInput::Hover { target: hovered });
        let globe = &*globe;

        geo::render_sphere(&painter, &projection, colors::globe::SPHERE, Stroke::NONE);
        geo::render_lines(
            &painter,
            graticule,
            &projection,
            Stroke::new(0.5, colors::globe::GRATICULE),
        );

        if let Some(countries) = &globe.countries {
            geo::render_countries(&painter, countries, &projection, |index| {
                if globe.hovered == Some(index) {
                    CountryStyle {
                        fill: colors::globe::HOVER_FILL,
                        stroke: Stroke::new(1.0, colors::globe::HOVER_STROKE),
                    }
                } else {
                    CountryStyle {
                        fill: colors::globe::COUNTRY_FILL,
                        stroke: Stroke::new(0.5, colors::globe::COUNTRY_STROKE),
                    }
                }
            });
        }

        draw_info_panel(ui, &rect, state);
    });
}

fn draw_info_panel(ui: &mut egui::Ui, rect: &Rect, state: &mut AppState) {
    let panel_pos = rect.left_top() + Vec2::new(10.0, 10.0);
    let panel_rect = Rect::from_min_size(panel_pos, Vec2::new(260.0, 90.0));

    ui.scope_builder(egui::UiBuilder::new().max_rect(panel_rect), |ui| {
        ui.vertical(|ui| {
            match state.single_globe.hover_info() {
                Some((name, economy)) => {
                    ui.label(RichText::new(name).strong().size(15.0).color(colors::ui::ACTIVE));
                    if let Some(economy) = economy {
                        ui.label(RichText::new(economy).size(12.0).color(colors::ui::VALUE));
                    }
                }
                None => {
                    ui.label(
                        RichText::new("Hover over a country")
                            .size(12.0)
                            .color(colors::ui::LABEL),
                    );
                }
            }

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("Zoom {:.1}x", state.single_globe.zoom.value()))
                        .monospace()
                        .size(11.0)
                        .color(colors::ui::LABEL),
                );
                if ui.small_button("Reset view").clicked() {
                    state.single_globe.reset_view();
                }
            });
        });
    });
}
