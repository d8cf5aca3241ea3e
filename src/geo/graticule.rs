//! Latitude/longitude grid lines.

use geo_types::Coord;

/// Spacing between grid lines in degrees.
const STEP: f64 = 10.0;
/// Sampling interval along each grid line in degrees.
const PRECISION: f64 = 2.5;
/// Latitude limit for minor meridians and for parallels.
const MINOR_LAT_LIMIT: f64 = 80.0;
/// Latitude limit for major meridians (multiples of 90 degrees).
const MAJOR_LAT_LIMIT: f64 = 90.0 - 1e-6;

/// Generates the default graticule as a list of polylines.
///
/// Meridians run every 10 degrees; those at multiples of 90 degrees extend
/// to the poles, the rest stop at +/-80 degrees. Parallels run every 10
/// degrees between -80 and 80.
pub fn graticule_lines() -> Vec<Vec<Coord<f64>>> {
    let mut lines = Vec::new();

    let meridian_count = (360.0 / STEP) as i32;
    for i in 0..meridian_count {
        let lon = -180.0 + i as f64 * STEP;
        let limit = if lon % 90.0 == 0.0 {
            MAJOR_LAT_LIMIT
        } else {
            MINOR_LAT_LIMIT
        };
        lines.push(sample(-limit, limit, |lat| Coord { x: lon, y: lat }));
    }

    let parallel_count = (2.0 * MINOR_LAT_LIMIT / STEP) as i32;
    for i in 0..=parallel_count {
        let lat = -MINOR_LAT_LIMIT + i as f64 * STEP;
        lines.push(sample(-180.0, 180.0, |lon| Coord { x: lon, y: lat }));
    }

    lines
}

fn sample(from: f64, to: f64, coord: impl Fn(f64) -> Coord<f64>) -> Vec<Coord<f64>> {
    let steps = ((to - from) / PRECISION).ceil() as usize;
    (0..=steps)
        .map(|i| coord((from + i as f64 * PRECISION).min(to)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_counts() {
        let lines = graticule_lines();
        // 36 meridians + 17 parallels
        assert_eq!(lines.len(), 53);
    }

    #[test]
    fn test_major_meridian_reaches_pole() {
        let lines = graticule_lines();
        let prime = lines.iter().find(|l| l[0].x == 0.0).unwrap();
        assert!(prime.last().unwrap().y > 89.9);

        let minor = lines.iter().find(|l| l[0].x == 10.0).unwrap();
        assert_eq!(minor.last().unwrap().y, 80.0);
    }

    #[test]
    fn test_parallel_spans_globe() {
        let lines = graticule_lines();
        let equator = lines
            .iter()
            .find(|l| l.iter().all(|c| c.y == 0.0))
            .unwrap();
        assert_eq!(equator.first().unwrap().x, -180.0);
        assert_eq!(equator.last().unwrap().x, 180.0);
    }
}
