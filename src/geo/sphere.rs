//! Spherical geometry helpers.
//!
//! Coordinates are `(lon, lat)` in degrees, stored as `Coord { x: lon, y: lat }`.
//! Internally points are lifted to unit vectors on the sphere.

use geo_types::Coord;
use glam::DVec3;

/// Number of interpolation intervals for a connection arc (`t` step 0.02).
pub const ARC_INTERVALS: usize = 50;

const EPSILON: f64 = 1e-9;

/// Converts a lon/lat coordinate in degrees to a unit vector.
pub fn to_cartesian(coord: Coord<f64>) -> DVec3 {
    let lambda = coord.x.to_radians();
    let phi = coord.y.to_radians();
    let cos_phi = phi.cos();
    DVec3::new(cos_phi * lambda.cos(), cos_phi * lambda.sin(), phi.sin())
}

/// Converts a (not necessarily normalized) vector back to lon/lat degrees.
pub fn to_spherical(v: DVec3) -> Coord<f64> {
    let horizontal = (v.x * v.x + v.y * v.y).sqrt();
    Coord {
        x: v.y.atan2(v.x).to_degrees(),
        y: v.z.atan2(horizontal).to_degrees(),
    }
}

/// Great-circle distance between two coordinates, in radians.
pub fn angular_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let (lon0, lat0) = (a.x.to_radians(), a.y.to_radians());
    let (lon1, lat1) = (b.x.to_radians(), b.y.to_radians());
    let h = haversin(lat1 - lat0) + lat0.cos() * lat1.cos() * haversin(lon1 - lon0);
    2.0 * h.sqrt().clamp(0.0, 1.0).asin()
}

fn haversin(x: f64) -> f64 {
    let s = (x / 2.0).sin();
    s * s
}

/// Returns the point at fraction `t` along the great circle from `a` to `b`.
///
/// `t = 0` yields `a` and `t = 1` yields `b`. Coincident endpoints return `a`
/// for every `t`.
pub fn geo_interpolate(a: Coord<f64>, b: Coord<f64>, t: f64) -> Coord<f64> {
    let d = angular_distance(a, b);
    if d < EPSILON {
        return a;
    }
    let k = d.sin();
    if k.abs() < EPSILON {
        // Antipodal endpoints: any great circle works, fall back to a linear blend.
        return to_spherical(to_cartesian(a).lerp(to_cartesian(b), t));
    }
    let td = t * d;
    let wb = td.sin() / k;
    let wa = (d - td).sin() / k;
    to_spherical(to_cartesian(a) * wa + to_cartesian(b) * wb)
}

/// Samples the geodesic between two points at `t = i / 50`, `i = 0..=50`.
pub fn arc_points(source: Coord<f64>, target: Coord<f64>) -> Vec<Coord<f64>> {
    (0..=ARC_INTERVALS)
        .map(|i| {
            let t = i as f64 / ARC_INTERVALS as f64;
            match i {
                0 => source,
                ARC_INTERVALS => target,
                _ => geo_interpolate(source, target, t),
            }
        })
        .collect()
}

/// Spherical centroid of a set of polygons (exterior + holes per polygon).
///
/// Each ring edge contributes its great-circle arc weighted by the area it
/// sweeps, so large polygons that straddle the antimeridian still resolve
/// to a sensible center. Degenerate input falls back to the normalized mean
/// of the ring vertices.
pub fn spherical_centroid<'a, I>(rings: I) -> Option<Coord<f64>>
where
    I: IntoIterator<Item = &'a [Coord<f64>]>,
{
    let mut area_weighted = DVec3::ZERO;
    let mut vertex_sum = DVec3::ZERO;
    let mut vertex_count = 0usize;

    for ring in rings {
        if ring.len() < 2 {
            continue;
        }
        let mut prev = to_cartesian(ring[ring.len() - 1]);
        for coord in ring {
            let current = to_cartesian(*coord);
            let cross = prev.cross(current);
            let m = cross.length();
            if m > EPSILON {
                let w = m.clamp(-1.0, 1.0).asin();
                area_weighted += cross * (-w / m);
            }
            vertex_sum += current;
            vertex_count += 1;
            prev = current;
        }
    }

    if vertex_count == 0 {
        return None;
    }

    // Ring orientation decides the sign; point toward the vertices.
    if area_weighted.length() > 1e-12 {
        if area_weighted.dot(vertex_sum) < 0.0 {
            area_weighted = -area_weighted;
        }
        return Some(to_spherical(area_weighted));
    }

    if vertex_sum.length() > 1e-12 {
        Some(to_spherical(vertex_sum))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    fn close(a: Coord<f64>, b: Coord<f64>) -> bool {
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
    }

    #[test]
    fn test_interpolate_endpoints() {
        let a = c(-74.0, 40.7);
        let b = c(2.35, 48.85);
        assert!(close(geo_interpolate(a, b, 0.0), a));
        assert!(close(geo_interpolate(a, b, 1.0), b));
    }

    #[test]
    fn test_interpolate_along_equator() {
        let mid = geo_interpolate(c(0.0, 0.0), c(90.0, 0.0), 0.5);
        assert!(close(mid, c(45.0, 0.0)));
    }

    #[test]
    fn test_interpolate_over_pole() {
        let mid = geo_interpolate(c(0.0, 60.0), c(180.0, 60.0), 0.5);
        assert!((mid.y - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_arc_has_51_points() {
        let a = c(10.0, 10.0);
        let b = c(-60.0, -20.0);
        let points = arc_points(a, b);
        assert_eq!(points.len(), 51);
        assert_eq!(points[0], a);
        assert_eq!(points[50], b);
    }

    #[test]
    fn test_arc_between_same_point() {
        let a = c(5.0, 5.0);
        let points = arc_points(a, a);
        assert!(points.iter().all(|p| close(*p, a)));
    }

    #[test]
    fn test_centroid_of_square() {
        let ring = vec![
            c(-10.0, -10.0),
            c(10.0, -10.0),
            c(10.0, 10.0),
            c(-10.0, 10.0),
            c(-10.0, -10.0),
        ];
        let centroid = spherical_centroid([ring.as_slice()]).unwrap();
        assert!(close(centroid, c(0.0, 0.0)));
    }

    #[test]
    fn test_centroid_across_antimeridian() {
        let ring = vec![
            c(170.0, -5.0),
            c(-170.0, -5.0),
            c(-170.0, 5.0),
            c(170.0, 5.0),
            c(170.0, -5.0),
        ];
        let centroid = spherical_centroid([ring.as_slice()]).unwrap();
        assert!((centroid.x.abs() - 180.0).abs() < 1e-6);
        assert!(centroid.y.abs() < 1e-6);
    }

    #[test]
    fn test_centroid_empty() {
        let empty: Vec<Coord<f64>> = Vec::new();
        assert!(spherical_centroid([empty.as_slice()]).is_none());
    }
}
