//! Single-hemisphere globe state.

use super::globe::{GlobeInput, GlobeSettings, Rotation, ZoomScale};
use crate::geo::{CountrySet, OrthographicProjection, FRONT_CLIP_ANGLE};
use eframe::egui::Rect;
use geo_types::Coord;

/// State for the globe fit to the viewport with hover info.
pub struct SingleGlobeState {
    /// Country boundaries, once the dataset has loaded
    pub countries: Option<CountrySet>,
    pub rotation: Rotation,
    pub zoom: ZoomScale,
    /// Last feature the pointer passed over
    pub hovered: Option<usize>,
    pub settings: GlobeSettings,
}

impl Default for SingleGlobeState {
    fn default() -> Self {
        let settings = GlobeSettings::single();
        Self {
            countries: None,
            rotation: Rotation::default(),
            zoom: ZoomScale::new(settings.min_scale, settings.max_scale),
            hovered: None,
            settings,
        }
    }
}

impl SingleGlobeState {
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
            // Ocean keeps the last country highlighted
            GlobeInput::Hover { target: None } => false,
            GlobeInput::Hover { target } => {
                let changed = self.hovered != target;
                self.hovered = target;
                changed
            }
            GlobeInput::Click { .. } => false,
        }
    }

    /// Resets rotation and scale without touching the dataset.
    pub fn reset_view(&mut self) {
        self.rotation = Rotation::default();
        self.zoom.set(1.0);
    }

    /// Builds the projection for a viewport.
    ///
    /// The dataset is fit to the viewport enlarged by the zoom scale, then
    /// re-centered on the viewport.
    pub fn projection(&self, rect: Rect) -> OrthographicProjection {
        let mut projection = OrthographicProjection::new(FRONT_CLIP_ANGLE);
        projection.rotate = self.rotation.as_array();

        let scale = self.zoom.value();
        let (width, height) = (rect.width() * scale, rect.height() * scale);
        match &self.countries {
            Some(countries) => projection.fit_size(width, height, countries.rings()),
            None => projection.fit_size(width, height, std::iter::empty::<&[Coord<f64>]>()),
        }
        projection.translate = rect.center();
        projection
    }

    /// Name and economy text of the hovered country.
    pub fn hover_info(&self) -> Option<(&str, Option<&str>)> {
        let feature = self.countries.as_ref()?.get(self.hovered?)?;
        Some((feature.name.as_str(), feature.economy.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{Pos2, Vec2};

    const CENTERED_SQUARE: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "formal_en": "Centerland", "economy": "7. Least developed region" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-10, -10], [10, -10], [10, 10], [-10, 10], [-10, -10]]]
            }
        }]
    }"#;

    fn with_square() -> SingleGlobeState {
        SingleGlobeState {
            countries: Some(CountrySet::from_geojson(CENTERED_SQUARE).unwrap()),
            ..Default::default()
        }
    }

    fn feature_at_center(state: &SingleGlobeState, rect: Rect) -> Option<usize> {
        let projection = state.projection(rect);
        let coord = projection.invert(rect.center())?;
        state.countries.as_ref()?.feature_at(coord)
    }

    #[test]
    fn test_click_is_ignored() {
        let mut state = SingleGlobeState::default();
        assert!(!state.apply(GlobeInput::Click { target: Some(0) }));
        assert!(state.hovered.is_none());
    }

    #[test]
    fn test_zoom_enlarges_projection() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let mut state = SingleGlobeState::default();
        let base = state.projection(rect).scale;

        state.apply(GlobeInput::Zoom { delta_scale: 0.5 });
        let zoomed = state.projection(rect);
        assert!((zoomed.scale - base * 1.5).abs() < 1e-3);
        assert_eq!(zoomed.translate, rect.center());
    }

    #[test]
    fn test_hit_test_survives_long_drags() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let mut state = with_square();
        assert_eq!(feature_at_center(&state, rect), Some(0));

        // Two full turns one way, then four back
        state.apply(GlobeInput::Drag { dx: 3600.0, dy: 0.0 });
        assert!((state.rotation.lambda - 720.0).abs() < 1e-9);
        assert_eq!(feature_at_center(&state, rect), Some(0));

        state.apply(GlobeInput::Drag { dx: -7200.0, dy: 0.0 });
        assert_eq!(feature_at_center(&state, rect), Some(0));
    }

    #[test]
    fn test_hover_sticks_over_ocean() {
        let mut state = with_square();
        assert!(state.apply(GlobeInput::Hover { target: Some(0) }));
        assert!(!state.apply(GlobeInput::Hover { target: None }));
        assert_eq!(state.hovered, Some(0));
        assert_eq!(
            state.hover_info(),
            Some(("Centerland", Some("7. Least developed region")))
        );
    }

    #[test]
    fn test_reset_view() {
        let mut state = SingleGlobeState::default();
        state.apply(GlobeInput::Drag { dx: 50.0, dy: 20.0 });
        state.apply(GlobeInput::Zoom { delta_scale: 1.0 });
        state.reset_view();
        assert_eq!(state.rotation, Rotation::default());
        assert_eq!(state.zoom.value(), 1.0);
    }
}
