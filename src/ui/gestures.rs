//! Pointer gestures shared by the globe canvases.

use crate::geo::{CountrySet, OrthographicProjection};
use crate::state::{GlobeInput, GlobeSettings};
use eframe::egui::{self, Vec2};

/// Raw pointer state for one frame over a globe canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerFrame {
    pub dragged: bool,
    pub drag_delta: Vec2,
    pub hovered: bool,
    /// Wheel delta in points; positive is away from the user
    pub scroll: Vec2,
    /// Multiplicative pinch factor, 1.0 when not pinching
    pub pinch: f32,
}

impl PointerFrame {
    /// Reads this frame's drag, wheel and pinch input for `response`.
    pub fn read(response: &egui::Response) -> Self {
        let (scroll, pinch) = response
            .ctx
            .input(|i| (i.raw_scroll_delta, i.zoom_delta()));
        Self {
            dragged: response.dragged(),
            drag_delta: response.drag_delta(),
            hovered: response.hovered(),
            scroll,
            pinch,
        }
    }
}

/// Converts this frame's drag, wheel and pinch input on `response` into globe inputs.
pub fn globe_gestures(
    response: &egui::Response,
    settings: &GlobeSettings,
    current_scale: f32,
    allow_pinch: bool,
) -> Vec<GlobeInput> {
    map_gestures(&PointerFrame::read(response), settings, current_scale, allow_pinch)
}

/// Maps one frame of pointer state to globe inputs.
///
/// `current_scale` is needed to turn a multiplicative pinch factor into an
/// additive scale change. Pinch is only honored when `allow_pinch` is set.
pub fn map_gestures(
    frame: &PointerFrame,
    settings: &GlobeSettings,
    current_scale: f32,
    allow_pinch: bool,
) -> Vec<GlobeInput> {
    let mut inputs = Vec::new();

    if frame.dragged && frame.drag_delta != Vec2::ZERO {
        inputs.push(GlobeInput::Drag {
            dx: frame.drag_delta.x,
            dy: frame.drag_delta.y,
        });
    }

    if frame.hovered {
        if allow_pinch && frame.pinch != 1.0 {
            inputs.push(GlobeInput::Zoom {
                delta_scale: current_scale * (frame.pinch - 1.0),
            });
        } else if frame.scroll.y != 0.0 {
            // Positive scroll zooms in
            inputs.push(GlobeInput::Zoom {
                delta_scale: settings.zoom_step * frame.scroll.y.signum(),
            });
        }
    }

    inputs
}

/// Feature index under the pointer, if any.
pub fn feature_under_pointer(
    response: &egui::Response,
    projection: &OrthographicProjection,
    countries: Option<&CountrySet>,
) -> Option<usize> {
    let pos = response.hover_pos()?;
    let coord = projection.invert(pos)?;
    countries?.feature_at(coord)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle() -> PointerFrame {
        PointerFrame {
            dragged: false,
            drag_delta: Vec2::ZERO,
            hovered: true,
            scroll: Vec2::ZERO,
            pinch: 1.0,
        }
    }

    #[test]
    fn test_idle_frame_produces_nothing() {
        assert!(map_gestures(&idle(), &GlobeSettings::single(), 1.0, true).is_empty());
    }

    #[test]
    fn test_drag_only_while_dragged() {
        let settings = GlobeSettings::single();
        let moved = PointerFrame {
            drag_delta: Vec2::new(12.0, -4.0),
            ..idle()
        };
        assert!(map_gestures(&moved, &settings, 1.0, false).is_empty());

        let dragged = PointerFrame {
            dragged: true,
            ..moved
        };
        assert_eq!(
            map_gestures(&dragged, &settings, 1.0, false),
            vec![GlobeInput::Drag { dx: 12.0, dy: -4.0 }]
        );

        let held_still = PointerFrame {
            dragged: true,
            ..idle()
        };
        assert!(map_gestures(&held_still, &settings, 1.0, false).is_empty());
    }

    #[test]
    fn test_wheel_direction_and_step() {
        let settings = GlobeSettings::single();
        let up = PointerFrame {
            scroll: Vec2::new(0.0, 50.0),
            ..idle()
        };
        let down = PointerFrame {
            scroll: Vec2::new(0.0, -3.0),
            ..idle()
        };
        assert_eq!(
            map_gestures(&up, &settings, 1.0, false),
            vec![GlobeInput::Zoom { delta_scale: 0.1 }]
        );
        assert_eq!(
            map_gestures(&down, &settings, 1.0, false),
            vec![GlobeInput::Zoom { delta_scale: -0.1 }]
        );
    }

    #[test]
    fn test_wheel_ignored_when_not_hovered() {
        let frame = PointerFrame {
            hovered: false,
            scroll: Vec2::new(0.0, 10.0),
            pinch: 1.5,
            ..idle()
        };
        assert!(map_gestures(&frame, &GlobeSettings::dual(), 1.0, true).is_empty());
    }

    #[test]
    fn test_pinch_scales_current_value() {
        let frame = PointerFrame {
            pinch: 1.25,
            scroll: Vec2::new(0.0, 10.0),
            ..idle()
        };
        let inputs = map_gestures(&frame, &GlobeSettings::dual(), 2.0, true);
        assert_eq!(inputs.len(), 1);
        match inputs[0] {
            GlobeInput::Zoom { delta_scale } => assert!((delta_scale - 0.5).abs() < 1e-6),
            other => panic!("expected zoom, got {other:?}"),
        }
    }

    #[test]
    fn test_pinch_ignored_without_allow_pinch() {
        let pinch_only = PointerFrame {
            pinch: 1.25,
            ..idle()
        };
        let settings = GlobeSettings::single();
        assert!(map_gestures(&pinch_only, &settings, 2.0, false).is_empty());

        let pinch_and_wheel = PointerFrame {
            scroll: Vec2::new(0.0, -8.0),
            ..pinch_only
        };
        assert_eq!(
            map_gestures(&pinch_and_wheel, &settings, 2.0, false),
            vec![GlobeInput::Zoom { delta_scale: -0.1 }]
        );
    }
}
