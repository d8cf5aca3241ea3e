//! Dual-hemisphere globe state with click-to-connect.

use super::globe::{GlobeInput, GlobeSettings, Rotation, ZoomScale};
use super::selection::{Connection, SelectionOutcome, SelectionSet};
use crate::geo::{CountrySet, OrthographicProjection, BACK_CLIP_ANGLE, FRONT_CLIP_ANGLE};
use eframe::egui::Rect;

/// Fraction of the smaller viewport side used as the globe radius at zoom 1.
const BASE_RADIUS_FRACTION: f32 = 0.45;

/// State for the front/back globe pair.
pub struct DualGlobeState {
    /// Country boundaries, once the atlas has loaded
    pub countries: Option<CountrySet>,
    /// Rotation shared by both hemispheres
    pub rotation: Rotation,
    /// Zoom shared by both hemispheres
    pub zoom: ZoomScale,
    /// Feature currently under the pointer
    pub hovered: Option<usize>,
    /// Countries armed for the next connection
    pub selection: SelectionSet,
    /// Committed connections, in creation order
    pub connections: Vec<Connection>,
    pub settings: GlobeSettings,
}

impl Default for DualGlobeState {
    fn default() -> Self {
        let settings = GlobeSettings::dual();
        Self {
            countries: None,
            rotation: Rotation::default(),
            zoom: ZoomScale::new(settings.min_scale, settings.max_scale),
            hovered: None,
            selection: SelectionSet::new(),
            connections: Vec::new(),
            settings,
        }
    }
}

impl DualGlobeState {
    /// Applies one input event. Returns true if the view needs a repaint.
    pub fn apply(&mut self, input: GlobeInput) -> bool {
        match input {
            GlobeInput::Drag { dx, dy } => {
                self.rotation
                    .apply_drag(dx, dy, self.settings.drag_sensitivity);
                true
            }
            GlobeInput::Zoom { delta_scale } => {
                let before = self.zoom.value();
                self.zoom.adjust(delta_scale);
                before != self.zoom.value()
            }
            GlobeInput::Hover { target } => {
                let changed = self.hovered != target;
                self.hovered = target;
                changed
            }
            GlobeInput::Click { target: Some(index) } => {
                self.select(index);
                true
            }
            GlobeInput::Click { target: None } => false,
        }
    }

    fn select(&mut self, index: usize) {
        match self.selection.toggle(index) {
            SelectionOutcome::Added | SelectionOutcome::Removed => {}
            SelectionOutcome::Completed([a, b]) => self.connect(a, b),
        }
    }

    /// Appends a connection between the centroids of two features.
    fn connect(&mut self, a: usize, b: usize) {
        let Some(countries) = &self.countries else {
            return;
        };
        let (Some(fa), Some(fb)) = (countries.get(a), countries.get(b)) else {
            log::warn!("Connection requested for unknown features {} and {}", a, b);
            return;
        };
        let (Some(source), Some(target)) = (fa.centroid(), fb.centroid()) else {
            log::warn!("No centroid for {} or {}", fa.name, fb.name);
            return;
        };

        log::info!(
            "Connected {} ({:.2}, {:.2}) to {} ({:.2}, {:.2})",
            fa.name,
            source.x,
            source.y,
            fb.name,
            target.x,
            target.y
        );
        self.connections.push(Connection {
            source,
            target,
            source_name: fa.name.clone(),
            target_name: fb.name.clone(),
        });
    }

    pub fn clear_connections(&mut self) {
        self.connections.clear();
        self.selection.clear();
    }

    /// Resets rotation and scale without touching selection or connections.
    pub fn reset_view(&mut self) {
        self.rotation = Rotation::default();
        self.zoom.set(1.0);
    }

    /// Projection radius for a viewport at the current zoom.
    pub fn radius(&self, rect: Rect) -> f64 {
        (rect.width().min(rect.height()) * BASE_RADIUS_FRACTION * self.zoom.value()) as f64
    }

    fn projection(&self, rect: Rect, clip_angle: f64) -> OrthographicProjection {
        let mut projection = OrthographicProjection::new(clip_angle);
        projection.update(self.rotation.as_array(), self.radius(rect), rect.center());
        projection
    }

    /// Projection for the near hemisphere.
    pub fn front_projection(&self, rect: Rect) -> OrthographicProjection {
        self.projection(rect, FRONT_CLIP_ANGLE)
    }

    /// Projection for the whole sphere, drawn faded behind the front.
    pub fn back_projection(&self, rect: Rect) -> OrthographicProjection {
        self.projection(rect, BACK_CLIP_ANGLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{CountryFeature, CountryPolygon};
    use eframe::egui::{Pos2, Vec2};
    use geo_types::Coord;

    fn square(name: &str, lon: f64, lat: f64) -> CountryFeature {
        let exterior = vec![
            Coord { x: lon - 1.0, y: lat - 1.0 },
            Coord { x: lon + 1.0, y: lat - 1.0 },
            Coord { x: lon + 1.0, y: lat + 1.0 },
            Coord { x: lon - 1.0, y: lat + 1.0 },
            Coord { x: lon - 1.0, y: lat - 1.0 },
        ];
        CountryFeature::new(
            name.to_string(),
            None,
            vec![CountryPolygon {
                exterior,
                holes: Vec::new(),
            }],
        )
    }

    fn state() -> DualGlobeState {
        let mut countries = CountrySet::new();
        countries.features.push(square("A", 10.0, 20.0));
        countries.features.push(square("B", -40.0, -5.0));
        countries.features.push(square("C", 100.0, 0.0));
        DualGlobeState {
            countries: Some(countries),
            ..Default::default()
        }
    }

    fn close(a: Coord<f64>, b: Coord<f64>) -> bool {
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
    }

    #[test]
    fn test_click_two_countries_creates_connection() {
        let mut state = state();
        state.apply(GlobeInput::Click { target: Some(0) });
        assert_eq!(state.selection.len(), 1);
        state.apply(GlobeInput::Click { target: Some(1) });

        assert_eq!(state.connections.len(), 1);
        assert!(state.selection.is_empty());

        let countries = state.countries.as_ref().unwrap();
        let connection = &state.connections[0];
        assert!(close(connection.source, countries.features[0].centroid().unwrap()));
        assert!(close(connection.target, countries.features[1].centroid().unwrap()));
        assert_eq!(connection.source_name, "A");
        assert_eq!(connection.target_name, "B");

        // A fresh first selection afterwards
        state.apply(GlobeInput::Click { target: Some(0) });
        assert_eq!(state.selection.len(), 1);
        assert!(state.selection.contains(0));
        assert_eq!(state.connections.len(), 1);
    }

    #[test]
    fn test_click_same_country_twice_deselects() {
        let mut state = state();
        state.apply(GlobeInput::Click { target: Some(2) });
        state.apply(GlobeInput::Click { target: Some(2) });
        assert!(state.selection.is_empty());
        assert!(state.connections.is_empty());
    }

    #[test]
    fn test_click_ocean_is_noop() {
        let mut state = state();
        state.apply(GlobeInput::Click { target: Some(0) });
        assert!(!state.apply(GlobeInput::Click { target: None }));
        assert_eq!(state.selection.len(), 1);
    }

    #[test]
    fn test_hemispheres_share_rotation_and_scale() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(1000.0, 800.0));
        let mut state = state();
        state.apply(GlobeInput::Drag { dx: 40.0, dy: -10.0 });
        state.apply(GlobeInput::Zoom { delta_scale: 0.5 });

        let front = state.front_projection(rect);
        let back = state.back_projection(rect);
        assert_eq!(front.rotate, back.rotate);
        assert_eq!(front.scale, back.scale);
        assert_eq!(front.clip_angle, FRONT_CLIP_ANGLE);
        assert_eq!(back.clip_angle, BACK_CLIP_ANGLE);
        assert!((front.scale - 800.0 * 0.45 * 1.5).abs() < 1e-3);
    }

    #[test]
    fn test_reset_keeps_connections() {
        let mut state = state();
        state.apply(GlobeInput::Click { target: Some(0) });
        state.apply(GlobeInput::Click { target: Some(2) });
        state.apply(GlobeInput::Drag { dx: 5.0, dy: 5.0 });
        state.reset_view();
        assert_eq!(state.connections.len(), 1);
        assert_eq!(state.rotation, Rotation::default());

        state.clear_connections();
        assert!(state.connections.is_empty());
    }
}
