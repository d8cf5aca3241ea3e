//! Graph editor view: fixed-layout nodes and links, edit dialog, import/export.

use super::colors;
use crate::file_ops::{FileChannel, GRAPH_FILE_NAME};
use crate::state::{AppState, GraphState, NODE_RADIUS};
use eframe::egui::{self, Align2, FontId, Painter, RichText, Sense, Stroke, Vec2};

pub fn render_graph_editor(ctx: &egui::Context, state: &mut AppState, files: &FileChannel) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Export JSON").clicked() {
                if let Some(json) = state.export_graph() {
                    files.save_json(ctx.clone(), GRAPH_FILE_NAME, json);
                }
            }
            if ui.button("Import JSON").clicked() {
                files.pick_json(ctx.clone());
            }
            ui.separator();
            ui.label(
                RichText::new(format!(
                    "{} nodes, {} links. Click a node to edit it.",
                    state.graph.nodes.len(),
                    state.graph.links.len()
                ))
                .size(12.0)
                .color(colors::ui::LABEL),
            );
        });

        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, Sense::click());
        let rect = response.rect;
        state.graph_canvas = rect.size();

        painter.rect_filled(rect, 0.0, colors::graph::BACKGROUND);

        let origin = rect.min.to_vec2();
        let hovered = response
            .hover_pos()
            .and_then(|pos| state.graph.node_at(pos - origin));

        draw_graph(&painter, &state.graph, origin, hovered);

        // Canvas is inert while the dialog is open
        if state.graph.editing.is_none() && response.clicked() {
            if let Some(index) = response
                .interact_pointer_pos()
                .and_then(|pos| state.graph.node_at(pos - origin))
            {
                state.graph.begin_edit(index);
            }
        }
    });

    render_edit_dialog(ctx, state);
}

fn draw_graph(painter: &Painter, graph: &GraphState, origin: Vec2, hovered: Option<usize>) {
    for link in &graph.links {
        let (Some(source), Some(target)) =
            (graph.node_by_id(&link.source), graph.node_by_id(&link.target))
        else {
            continue;
        };
        painter.line_segment(
            [source.position() + origin, target.position() + origin],
            Stroke::new(1.5, colors::graph::LINK),
        );
    }

    for (index, node) in graph.nodes.iter().enumerate() {
        let center = node.position() + origin;
        let fill = if hovered == Some(index) {
            colors::graph::NODE_HOVER
        } else {
            colors::graph::NODE_FILL
        };
        painter.circle(
            center,
            NODE_RADIUS,
            fill,
            Stroke::new(1.5, colors::graph::NODE_STROKE),
        );
        painter.text(
            center + Vec2::new(0.0, NODE_RADIUS + 4.0),
            Align2::CENTER_TOP,
            &node.id,
            FontId::proportional(12.0),
            colors::graph::LABEL,
        );
    }
}

fn render_edit_dialog(ctx: &egui::Context, state: &mut AppState) {
    let Some(session) = state.graph.editing.as_mut() else {
        return;
    };

    let mut confirm = false;
    let mut cancel = false;

    egui::Window::new("Edit node")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            egui::Grid::new("edit_node_grid")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Name");
                    ui.text_edit_singleline(&mut session.id);
                    ui.end_row();

                    ui.label("Content");
                    ui.text_edit_multiline(&mut session.content);
                    ui.end_row();

                    ui.label("Category");
                    ui.text_edit_singleline(&mut session.category);
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                confirm = ui.button("Confirm").clicked();
                cancel = ui.button("Cancel").clicked();
            });
        });

    if confirm {
        state.save_graph_edit();
    } else if cancel {
        state.graph.cancel_edit();
    }
}
