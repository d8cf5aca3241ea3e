//! Globe rendering.
//!
//! Renders projected countries, graticule and connection arcs to the egui
//! canvas. Everything is recomputed from the projection on every frame.

use super::sphere::arc_points;
use super::{CountryFeature, CountrySet, OrthographicProjection};
use crate::state::Connection;
use eframe::egui::{epaint::Mesh, Color32, Painter, Pos2, Shape, Stroke};
use geo_types::Coord;

/// Dash and gap lengths (pixels) for connection arcs.
const DASH_LENGTH: f32 = 6.0;
const GAP_LENGTH: f32 = 4.0;

/// Fill and outline used for one country.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountryStyle {
    pub fill: Color32,
    pub stroke: Stroke,
}

/// Draws the filled disc of the sphere behind everything else.
pub fn render_sphere(painter: &Painter, projection: &OrthographicProjection, fill: Color32, stroke: Stroke) {
    let (center, radius) = projection.sphere_outline();
    painter.circle(center, radius, fill, stroke);
}

/// Renders every country, asking `style_for` for the style of each feature index.
pub fn render_countries(
    painter: &Painter,
    countries: &CountrySet,
    projection: &OrthographicProjection,
    style_for: impl Fn(usize) -> CountryStyle,
) {
    for (index, feature) in countries.features.iter().enumerate() {
        render_country(painter, feature, projection, style_for(index));
    }
}

fn render_country(
    painter: &Painter,
    feature: &CountryFeature,
    projection: &OrthographicProjection,
    style: CountryStyle,
) {
    for polygon in &feature.polygons {
        let Some(exterior) = projection.project_ring(&polygon.exterior) else {
            continue;
        };
        let holes: Vec<Vec<Pos2>> = polygon
            .holes
            .iter()
            .filter_map(|h| projection.project_ring(h))
            .collect();

        if style.fill != Color32::TRANSPARENT {
            fill_polygon(painter, &exterior, &holes, style.fill);
        }
        if style.stroke.width > 0.0 {
            painter.add(Shape::closed_line(exterior, style.stroke));
            for hole in holes {
                painter.add(Shape::closed_line(hole, style.stroke));
            }
        }
    }
}

/// Triangulates a screen-space polygon with holes and paints it as a mesh.
fn fill_polygon(painter: &Painter, exterior: &[Pos2], holes: &[Vec<Pos2>], color: Color32) {
    let mut vertices: Vec<Pos2> = Vec::with_capacity(exterior.len());
    let mut hole_indices: Vec<usize> = Vec::with_capacity(holes.len());

    vertices.extend_from_slice(exterior);
    for hole in holes {
        hole_indices.push(vertices.len());
        vertices.extend_from_slice(hole);
    }
    if vertices.len() < 3 {
        return;
    }

    let flat: Vec<f64> = vertices
        .iter()
        .flat_map(|p| [p.x as f64, p.y as f64])
        .collect();

    let indices = match earcutr::earcut(&flat, &hole_indices, 2) {
        Ok(ix) => ix,
        Err(e) => {
            log::debug!("Failed to triangulate polygon: {:?}", e);
            return;
        }
    };

    let mut mesh = Mesh::default();
    for pos in &vertices {
        mesh.colored_vertex(*pos, color);
    }
    for tri in indices.chunks_exact(3) {
        mesh.add_triangle(tri[0] as u32, tri[1] as u32, tri[2] as u32);
    }
    painter.add(Shape::mesh(mesh));
}

/// Renders polylines (graticule, arcs) split at the horizon.
pub fn render_lines(
    painter: &Painter,
    lines: &[Vec<Coord<f64>>],
    projection: &OrthographicProjection,
    stroke: Stroke,
) {
    for line in lines {
        for run in projection.project_line(line) {
            painter.add(Shape::line(run, stroke));
        }
    }
}

/// Rebuilds and draws every connection arc as a dashed great-circle path.
pub fn render_connections(
    painter: &Painter,
    connections: &[Connection],
    projection: &OrthographicProjection,
    stroke: Stroke,
) {
    for connection in connections {
        let points = arc_points(connection.source, connection.target);
        for run in projection.project_line(&points) {
            painter.extend(Shape::dashed_line(&run, stroke, DASH_LENGTH, GAP_LENGTH));
        }
        for endpoint in [connection.source, connection.target] {
            if let Some(pos) = projection.project(endpoint) {
                painter.circle_filled(pos, 3.0, stroke.color);
            }
        }
    }
}
