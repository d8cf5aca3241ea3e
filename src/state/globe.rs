//! Shared globe view state: rotation, zoom scale and input events.

/// Degrees of rotation per pixel of drag.
pub const DRAG_SENSITIVITY: f64 = 0.2;

/// Tunables for one globe view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeSettings {
    /// Degrees of rotation per pixel of drag
    pub drag_sensitivity: f64,
    /// Scale change per wheel notch
    pub zoom_step: f32,
    /// Lower scale clamp
    pub min_scale: f32,
    /// Upper scale clamp
    pub max_scale: f32,
}

impl GlobeSettings {
    /// Settings for the single-hemisphere globe.
    pub fn single() -> Self {
        Self {
            drag_sensitivity: DRAG_SENSITIVITY,
            zoom_step: 0.1,
            min_scale: 0.5,
            max_scale: 2.5,
        }
    }

    /// Settings for the dual-hemisphere globe.
    pub fn dual() -> Self {
        Self {
            drag_sensitivity: DRAG_SENSITIVITY,
            zoom_step: 0.1,
            min_scale: 0.5,
            max_scale: 4.0,
        }
    }
}

/// View rotation as (lambda, phi) in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    pub lambda: f64,
    pub phi: f64,
}

impl Rotation {
    /// Adds a drag delta; screen-down lowers the latitude.
    ///
    /// Non-finite deltas are ignored.
    pub fn apply_drag(&mut self, dx: f32, dy: f32, sensitivity: f64) {
        let (dx, dy) = (dx as f64, dy as f64);
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.lambda += dx * sensitivity;
        self.phi += -dy * sensitivity;
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.lambda, self.phi]
    }
}

/// A scale multiplier that always stays within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomScale {
    value: f32,
    min: f32,
    max: f32,
}

impl ZoomScale {
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            value: 1.0_f32.clamp(min, max),
            min,
            max,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Adds `delta` and clamps. Non-finite deltas are ignored.
    pub fn adjust(&mut self, delta: f32) {
        if delta.is_finite() {
            self.value = (self.value + delta).clamp(self.min, self.max);
        }
    }

    pub fn set(&mut self, value: f32) {
        if value.is_finite() {
            self.value = value.clamp(self.min, self.max);
        }
    }
}

/// Input events consumed by the globe views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlobeInput {
    /// Pointer drag by (dx, dy) screen pixels
    Drag { dx: f32, dy: f32 },
    /// Additive change to the zoom scale
    Zoom { delta_scale: f32 },
    /// Pointer moved over a feature (or off all features)
    Hover { target: Option<usize> },
    /// Click on a feature (or on empty space)
    Click { target: Option<usize> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_accumulates_independent_of_batching() {
        let moves = [(3.0, -2.0), (10.0, 4.0), (-7.5, 1.5), (0.25, 0.0)];

        let mut stepwise = Rotation::default();
        for (dx, dy) in moves {
            stepwise.apply_drag(dx, dy, DRAG_SENSITIVITY);
        }

        let (sum_dx, sum_dy) = moves
            .iter()
            .fold((0.0_f32, 0.0_f32), |(x, y), (dx, dy)| (x + dx, y + dy));
        let mut batched = Rotation::default();
        batched.apply_drag(sum_dx, sum_dy, DRAG_SENSITIVITY);

        assert!((stepwise.lambda - batched.lambda).abs() < 1e-9);
        assert!((stepwise.phi - batched.phi).abs() < 1e-9);
        assert!((stepwise.lambda - 5.75 * DRAG_SENSITIVITY).abs() < 1e-9);
        assert!((stepwise.phi + 3.5 * DRAG_SENSITIVITY).abs() < 1e-9);
    }

    #[test]
    fn test_drag_ignores_non_finite() {
        let mut rotation = Rotation::default();
        rotation.apply_drag(f32::NAN, 1.0, DRAG_SENSITIVITY);
        rotation.apply_drag(1.0, f32::INFINITY, DRAG_SENSITIVITY);
        assert_eq!(rotation, Rotation::default());
    }

    #[test]
    fn test_zoom_always_clamped() {
        let settings = GlobeSettings::single();
        let mut zoom = ZoomScale::new(settings.min_scale, settings.max_scale);
        let deltas = [0.1, 5.0, -0.3, -100.0, 0.7, 1e9, -1e-3, f32::NAN, 2.2];
        for delta in deltas {
            zoom.adjust(delta);
            assert!(zoom.value() >= 0.5 && zoom.value() <= 2.5);
        }
    }

    #[test]
    fn test_zoom_steps() {
        let mut zoom = ZoomScale::new(0.5, 2.5);
        for _ in 0..30 {
            zoom.adjust(0.1);
        }
        assert_eq!(zoom.value(), 2.5);
        for _ in 0..30 {
            zoom.adjust(-0.1);
        }
        assert_eq!(zoom.value(), 0.5);
    }
}
