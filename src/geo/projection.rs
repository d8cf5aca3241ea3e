//! Orthographic projection and coordinate transformation.
//!
//! Handles converting between geographic coordinates (lon/lat) and
//! screen coordinates for rendering a globe on the canvas, including
//! clipping against the visible horizon.

use super::sphere::geo_interpolate;
use eframe::egui::{Pos2, Vec2};
use geo_types::Coord;
use std::f64::consts::PI;

/// Clip angle that hides the far hemisphere.
pub const FRONT_CLIP_ANGLE: f64 = 90.0;
/// Clip angle that shows the whole sphere.
pub const BACK_CLIP_ANGLE: f64 = 180.0;

/// Angular step (degrees) used when closing clipped rings along the horizon.
const HORIZON_STEP_DEG: f64 = 5.0;
/// Bisection iterations when locating a horizon crossing.
const CROSSING_ITERATIONS: usize = 20;

/// Orthographic projection of the unit sphere onto the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicProjection {
    /// Rotation as (lambda, phi) in degrees
    pub rotate: [f64; 2],
    /// Radius of the projected sphere in screen pixels
    pub scale: f64,
    /// Screen position of the projection center
    pub translate: Pos2,
    /// Maximum angular distance from the center that is drawn (degrees)
    pub clip_angle: f64,
}

impl Default for OrthographicProjection {
    fn default() -> Self {
        Self {
            rotate: [0.0, 0.0],
            scale: 250.0,
            translate: Pos2::new(480.0, 250.0),
            clip_angle: FRONT_CLIP_ANGLE,
        }
    }
}

impl OrthographicProjection {
    /// Creates a projection with the given clip angle.
    pub fn new(clip_angle: f64) -> Self {
        Self {
            clip_angle,
            ..Default::default()
        }
    }

    /// Updates the projection with the current view state.
    pub fn update(&mut self, rotate: [f64; 2], scale: f64, translate: Pos2) {
        self.rotate = rotate;
        self.scale = scale;
        self.translate = translate;
    }

    /// Returns true when the clip angle admits the whole sphere.
    pub fn shows_full_sphere(&self) -> bool {
        self.clip_angle >= BACK_CLIP_ANGLE
    }

    /// Applies the view rotation, returning (lambda, phi) in radians.
    fn rotate_radians(&self, coord: Coord<f64>) -> (f64, f64) {
        let delta_lambda = (self.rotate[0] % 360.0).to_radians();
        let delta_phi = self.rotate[1].to_radians();

        let lambda = wrap_radians(coord.x.to_radians() + delta_lambda);
        let phi = coord.y.to_radians();

        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let (sin_dp, cos_dp) = delta_phi.sin_cos();
        let k = z * cos_dp + x * sin_dp;

        (y.atan2(x * cos_dp - z * sin_dp), k.clamp(-1.0, 1.0).asin())
    }

    /// Inverse of [`Self::rotate_radians`], returning degrees.
    fn unrotate(&self, lambda: f64, phi: f64) -> Coord<f64> {
        let delta_lambda = (self.rotate[0] % 360.0).to_radians();
        let delta_phi = self.rotate[1].to_radians();

        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let (sin_dp, cos_dp) = delta_phi.sin_cos();

        let lambda = y.atan2(x * cos_dp + z * sin_dp) - delta_lambda;
        let phi = (z * cos_dp - x * sin_dp).clamp(-1.0, 1.0).asin();

        Coord {
            x: wrap_radians(lambda).to_degrees(),
            y: phi.to_degrees(),
        }
    }

    /// Checks whether a coordinate lies inside the clip circle.
    pub fn is_visible(&self, coord: Coord<f64>) -> bool {
        if self.shows_full_sphere() {
            return true;
        }
        let (lambda, phi) = self.rotate_radians(coord);
        lambda.cos() * phi.cos() > self.clip_angle.to_radians().cos()
    }

    /// Projects a coordinate regardless of clipping.
    pub fn project_unclipped(&self, coord: Coord<f64>) -> Pos2 {
        let (lambda, phi) = self.rotate_radians(coord);
        let x = phi.cos() * lambda.sin();
        let y = phi.sin();
        Pos2::new(
            self.translate.x + (self.scale * x) as f32,
            self.translate.y - (self.scale * y) as f32,
        )
    }

    /// Projects a coordinate to screen space, or `None` if it is clipped.
    pub fn project(&self, coord: Coord<f64>) -> Option<Pos2> {
        self.is_visible(coord).then(|| self.project_unclipped(coord))
    }

    /// Converts a screen position back to geographic coordinates.
    ///
    /// Returns `None` for positions outside the projected sphere.
    pub fn invert(&self, pos: Pos2) -> Option<Coord<f64>> {
        if self.scale <= 0.0 {
            return None;
        }
        let x = (pos.x - self.translate.x) as f64 / self.scale;
        let y = -(pos.y - self.translate.y) as f64 / self.scale;
        let rho = (x * x + y * y).sqrt();
        if rho > 1.0 {
            return None;
        }
        let c = rho.asin();
        let (sin_c, cos_c) = c.sin_cos();
        let lambda = (x * sin_c).atan2(rho * cos_c);
        let phi = if rho > 0.0 {
            (y * sin_c / rho).clamp(-1.0, 1.0).asin()
        } else {
            0.0
        };
        Some(self.unrotate(lambda, phi))
    }

    /// Fits scale and translate so the visible geometry fills a `width` x `height` box.
    ///
    /// The bounds are measured on the unit projection with the current
    /// rotation. When nothing is visible the full sphere is fit instead.
    pub fn fit_size<'a, I>(&mut self, width: f32, height: f32, rings: I)
    where
        I: IntoIterator<Item = &'a [Coord<f64>]>,
    {
        let mut unit = self.clone();
        unit.scale = 1.0;
        unit.translate = Pos2::ZERO;

        let mut bounds: Option<(f32, f32, f32, f32)> = None;
        for ring in rings {
            for coord in ring {
                let Some(p) = unit.project(*coord) else {
                    continue;
                };
                bounds = Some(match bounds {
                    None => (p.x, p.y, p.x, p.y),
                    Some((x0, y0, x1, y1)) => (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
                });
            }
        }

        let (x0, y0, x1, y1) = match bounds {
            Some((x0, y0, x1, y1)) if x1 > x0 && y1 > y0 => (x0, y0, x1, y1),
            _ => (-1.0, -1.0, 1.0, 1.0),
        };

        let k = (width / (x1 - x0)).min(height / (y1 - y0));
        self.scale = k as f64;
        self.translate = Pos2::new(
            (width - k * (x1 + x0)) / 2.0,
            (height - k * (y1 + y0)) / 2.0,
        );
    }

    /// Locates the horizon crossing on the geodesic from a visible to a hidden point.
    fn crossing(&self, visible: Coord<f64>, hidden: Coord<f64>) -> Pos2 {
        let (mut lo, mut hi) = (0.0, 1.0);
        for _ in 0..CROSSING_ITERATIONS {
            let mid = (lo + hi) / 2.0;
            if self.is_visible(geo_interpolate(visible, hidden, mid)) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        self.project_unclipped(geo_interpolate(visible, hidden, lo))
    }

    /// Angle of a screen position around the projection center.
    fn horizon_angle(&self, pos: Pos2) -> f64 {
        let d: Vec2 = pos - self.translate;
        (-(d.y as f64)).atan2(d.x as f64)
    }

    fn horizon_point(&self, angle: f64) -> Pos2 {
        let r = self.scale * self.clip_angle.to_radians().sin();
        Pos2::new(
            self.translate.x + (r * angle.cos()) as f32,
            self.translate.y - (r * angle.sin()) as f32,
        )
    }

    /// Appends points along the horizon from `from` to `to`, taking the shorter way round.
    ///
    /// Assumes the hidden stretch of a ring is less than half the horizon.
    /// A polygon larger than a hemisphere gets closed the wrong way round.
    fn push_horizon_arc(&self, out: &mut Vec<Pos2>, from: f64, to: f64) {
        let sweep = wrap_radians(to - from);
        let steps = (sweep.abs() / HORIZON_STEP_DEG.to_radians()).ceil() as usize;
        for i in 1..steps {
            out.push(self.horizon_point(from + sweep * i as f64 / steps as f64));
        }
    }

    /// Projects a polyline, splitting it wherever it crosses the horizon.
    pub fn project_line(&self, coords: &[Coord<f64>]) -> Vec<Vec<Pos2>> {
        if self.shows_full_sphere() {
            let line: Vec<Pos2> = coords.iter().map(|c| self.project_unclipped(*c)).collect();
            return if line.len() >= 2 { vec![line] } else { Vec::new() };
        }

        let mut runs = Vec::new();
        let mut current: Vec<Pos2> = Vec::new();
        let mut previous: Option<(Coord<f64>, bool)> = None;

        for coord in coords {
            let visible = self.is_visible(*coord);
            match previous {
                Some((prev, true)) if !visible => {
                    current.push(self.crossing(prev, *coord));
                    runs.push(std::mem::take(&mut current));
                }
                Some((prev, false)) if visible => {
                    current.push(self.crossing(*coord, prev));
                }
                _ => {}
            }
            if visible {
                current.push(self.project_unclipped(*coord));
            }
            previous = Some((*coord, visible));
        }
        runs.push(current);

        runs.retain(|run| run.len() >= 2);
        runs
    }

    /// Projects a closed ring, closing clipped stretches along the horizon.
    ///
    /// Returns `None` if no vertex of the ring is visible.
    pub fn project_ring(&self, ring: &[Coord<f64>]) -> Option<Vec<Pos2>> {
        let ring = open_ring(ring);
        if ring.len() < 3 {
            return None;
        }
        if self.shows_full_sphere() {
            return Some(ring.iter().map(|c| self.project_unclipped(*c)).collect());
        }

        let visibility: Vec<bool> = ring.iter().map(|c| self.is_visible(*c)).collect();
        let start = visibility.iter().position(|v| *v)?;
        let n = ring.len();

        let mut out = Vec::with_capacity(n);
        let mut exit_angle: Option<f64> = None;

        for i in 0..n {
            let idx = (start + i) % n;
            let next = (idx + 1) % n;
            let (cur, nxt) = (ring[idx], ring[next]);

            if visibility[idx] {
                out.push(self.project_unclipped(cur));
            }
            match (visibility[idx], visibility[next]) {
                (true, false) => {
                    let pos = self.crossing(cur, nxt);
                    out.push(pos);
                    exit_angle = Some(self.horizon_angle(pos));
                }
                (false, true) => {
                    let pos = self.crossing(nxt, cur);
                    if let Some(from) = exit_angle.take() {
                        self.push_horizon_arc(&mut out, from, self.horizon_angle(pos));
                    }
                    out.push(pos);
                }
                _ => {}
            }
        }

        (out.len() >= 3).then_some(out)
    }

    /// Returns the outline of the visible sphere as (center, radius).
    pub fn sphere_outline(&self) -> (Pos2, f32) {
        (self.translate, self.scale as f32)
    }
}

/// Drops a duplicated closing vertex, if present.
fn open_ring(ring: &[Coord<f64>]) -> &[Coord<f64>] {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// Wraps an angle in radians to [-PI, PI), however many turns it spans.
fn wrap_radians(angle: f64) -> f64 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    fn projection(rotate: [f64; 2], clip: f64) -> OrthographicProjection {
        let mut p = OrthographicProjection::new(clip);
        p.update(rotate, 100.0, Pos2::new(200.0, 150.0));
        p
    }

    #[test]
    fn test_center_projects_to_translate() {
        let p = projection([0.0, 0.0], FRONT_CLIP_ANGLE);
        let pos = p.project(c(0.0, 0.0)).unwrap();
        assert!((pos.x - 200.0).abs() < 1e-3);
        assert!((pos.y - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_rotation_brings_point_to_center() {
        // Rotating by -lon, -lat centers that location
        let p = projection([-30.0, -45.0], FRONT_CLIP_ANGLE);
        let pos = p.project(c(30.0, 45.0)).unwrap();
        assert!((pos.x - 200.0).abs() < 1e-3);
        assert!((pos.y - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_north_is_up() {
        let p = projection([0.0, 0.0], FRONT_CLIP_ANGLE);
        let pos = p.project(c(0.0, 30.0)).unwrap();
        assert!(pos.y < 150.0);
        assert!((pos.y - (150.0 - 50.0)).abs() < 1e-3);
    }

    #[test]
    fn test_far_side_clipping() {
        let front = projection([0.0, 0.0], FRONT_CLIP_ANGLE);
        let back = projection([0.0, 0.0], BACK_CLIP_ANGLE);
        assert!(front.project(c(180.0, 0.0)).is_none());
        assert!(front.project(c(120.0, 10.0)).is_none());
        assert!(back.project(c(120.0, 10.0)).is_some());
    }

    #[test]
    fn test_projection_is_deterministic() {
        let a = projection([12.5, -7.0], FRONT_CLIP_ANGLE);
        let b = projection([12.5, -7.0], FRONT_CLIP_ANGLE);
        for coord in [c(10.0, 10.0), c(-40.0, 20.0), c(0.0, -60.0)] {
            assert_eq!(a.project(coord), b.project(coord));
        }
    }

    #[test]
    fn test_invert_round_trip() {
        let p = projection([40.0, -20.0], FRONT_CLIP_ANGLE);
        let coord = c(-35.0, 25.0);
        let pos = p.project(coord).unwrap();
        let back = p.invert(pos).unwrap();
        assert!((back.x - coord.x).abs() < 1e-3);
        assert!((back.y - coord.y).abs() < 1e-3);
    }

    #[test]
    fn test_invert_after_many_turns() {
        // Two full turns past -10 degrees still center lon 10
        for lambda in [-10.0, 350.0, 710.0, -730.0, 3590.0] {
            let p = projection([lambda, -20.0], FRONT_CLIP_ANGLE);
            let back = p.invert(Pos2::new(200.0, 150.0)).unwrap();
            assert!((back.x - 10.0).abs() < 1e-6, "lambda {lambda} gave {}", back.x);
            assert!((back.y - 20.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_wrap_radians_stays_in_range() {
        for angle in [0.0, 3.0 * PI, -5.5 * PI, 40.0 * PI + 0.25, -0.1] {
            let wrapped = wrap_radians(angle);
            assert!((-PI..PI).contains(&wrapped));
            let turns = (angle - wrapped) / (2.0 * PI);
            assert!((turns - turns.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_invert_outside_disc() {
        let p = projection([0.0, 0.0], FRONT_CLIP_ANGLE);
        assert!(p.invert(Pos2::new(350.0, 150.0)).is_none());
    }

    #[test]
    fn test_line_split_at_horizon() {
        let p = projection([0.0, 0.0], FRONT_CLIP_ANGLE);
        let line = vec![c(0.0, 0.0), c(60.0, 0.0), c(120.0, 0.0), c(150.0, 0.0)];
        let runs = p.project_line(&line);
        assert_eq!(runs.len(), 1);
        let last = *runs[0].last().unwrap();
        // Crossing lands on the horizon circle
        assert!(((last.x - 200.0) - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_ring_fully_hidden() {
        let p = projection([0.0, 0.0], FRONT_CLIP_ANGLE);
        let ring = vec![c(170.0, -5.0), c(175.0, -5.0), c(175.0, 5.0), c(170.0, 5.0), c(170.0, -5.0)];
        assert!(p.project_ring(&ring).is_none());
    }

    #[test]
    fn test_ring_partially_visible_stays_inside_disc() {
        let p = projection([0.0, 0.0], FRONT_CLIP_ANGLE);
        let ring = vec![c(60.0, -20.0), c(120.0, -20.0), c(120.0, 20.0), c(60.0, 20.0), c(60.0, -20.0)];
        let projected = p.project_ring(&ring).unwrap();
        assert!(projected.len() >= 4);
        for pos in projected {
            let d = pos - Pos2::new(200.0, 150.0);
            assert!(d.length() <= 100.5);
        }
    }

    #[test]
    fn test_fit_size_full_sphere() {
        let mut p = OrthographicProjection::new(FRONT_CLIP_ANGLE);
        let empty: Vec<Coord<f64>> = Vec::new();
        p.fit_size(400.0, 300.0, [empty.as_slice()]);
        assert!((p.scale - 150.0).abs() < 1e-6);
        assert!((p.translate.x - 200.0).abs() < 1e-3);
        assert!((p.translate.y - 150.0).abs() < 1e-3);
    }
}
