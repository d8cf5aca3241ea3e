//! Country boundary data structures.

use super::sphere::spherical_centroid;
use geo_types::Coord;
use geojson::{Feature, GeoJson, Geometry, JsonObject, Value};

/// Property keys tried, in order, for a feature's display name.
const NAME_KEYS: &[&str] = &["formal_en", "name", "NAME", "admin", "ADMIN"];
/// Property keys tried, in order, for a feature's economy category.
const ECONOMY_KEYS: &[&str] = &["economy", "ECONOMY"];

/// A polygon in (lon, lat) degrees with optional holes.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryPolygon {
    pub exterior: Vec<Coord<f64>>,
    pub holes: Vec<Vec<Coord<f64>>>,
}

impl CountryPolygon {
    /// Iterates the exterior ring followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &[Coord<f64>]> {
        std::iter::once(self.exterior.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }

    /// Planar point-in-polygon test in lon/lat space.
    pub fn contains(&self, coord: Coord<f64>) -> bool {
        ring_contains(&self.exterior, coord) && !self.holes.iter().any(|h| ring_contains(h, coord))
    }
}

/// A country boundary that can be rendered and picked.
#[derive(Debug, Clone)]
pub struct CountryFeature {
    /// Display name
    pub name: String,
    /// Economic category text, when the dataset provides one
    pub economy: Option<String>,
    /// Polygons making up the country
    pub polygons: Vec<CountryPolygon>,
    /// Bounding box as (min_lon, min_lat, max_lon, max_lat)
    bbox: (f64, f64, f64, f64),
}

impl CountryFeature {
    pub fn new(name: String, economy: Option<String>, polygons: Vec<CountryPolygon>) -> Self {
        let bbox = polygons
            .iter()
            .flat_map(|p| p.exterior.iter())
            .fold(
                (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
                |(x0, y0, x1, y1), c| (x0.min(c.x), y0.min(c.y), x1.max(c.x), y1.max(c.y)),
            );
        Self {
            name,
            economy,
            polygons,
            bbox,
        }
    }

    /// Iterates every ring of every polygon.
    pub fn rings(&self) -> impl Iterator<Item = &[Coord<f64>]> {
        self.polygons.iter().flat_map(CountryPolygon::rings)
    }

    /// Checks whether the coordinate falls inside this country.
    pub fn contains(&self, coord: Coord<f64>) -> bool {
        let (x0, y0, x1, y1) = self.bbox;
        if coord.x < x0 || coord.x > x1 || coord.y < y0 || coord.y > y1 {
            return false;
        }
        self.polygons.iter().any(|p| p.contains(coord))
    }

    /// Spherical centroid of the country's area.
    pub fn centroid(&self) -> Option<Coord<f64>> {
        spherical_centroid(self.rings())
    }
}

/// The full set of boundary features for one globe.
#[derive(Debug, Clone, Default)]
pub struct CountrySet {
    pub features: Vec<CountryFeature>,
}

impl CountrySet {
    /// Creates a new empty set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CountryFeature> {
        self.features.get(index)
    }

    /// Iterates every ring of every feature.
    pub fn rings(&self) -> impl Iterator<Item = &[Coord<f64>]> {
        self.features.iter().flat_map(CountryFeature::rings)
    }

    /// Returns the index of the first feature containing the coordinate.
    pub fn feature_at(&self, coord: Coord<f64>) -> Option<usize> {
        self.features.iter().position(|f| f.contains(coord))
    }

    /// Loads features from a GeoJSON document.
    ///
    /// Features without polygonal geometry are skipped.
    pub fn from_geojson(geojson_str: &str) -> Result<Self, String> {
        let geojson: GeoJson = geojson_str
            .parse()
            .map_err(|e| format!("Failed to parse GeoJSON: {}", e))?;

        let mut set = Self::new();
        match geojson {
            GeoJson::FeatureCollection(fc) => {
                set.features
                    .extend(fc.features.iter().filter_map(convert_feature));
            }
            GeoJson::Feature(f) => set.features.extend(convert_feature(&f)),
            GeoJson::Geometry(g) => {
                let polygons = convert_geometry(&g);
                if !polygons.is_empty() {
                    set.features
                        .push(CountryFeature::new(String::new(), None, polygons));
                }
            }
        }

        Ok(set)
    }
}

/// Reads the first string value found under any of `keys`.
pub(crate) fn string_property(properties: Option<&JsonObject>, keys: &[&str]) -> Option<String> {
    let properties = properties?;
    keys.iter()
        .filter_map(|key| properties.get(*key))
        .find_map(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Display name for a feature's properties.
pub(crate) fn feature_name(properties: Option<&JsonObject>) -> String {
    string_property(properties, NAME_KEYS).unwrap_or_default()
}

/// Economy category for a feature's properties.
pub(crate) fn feature_economy(properties: Option<&JsonObject>) -> Option<String> {
    string_property(properties, ECONOMY_KEYS)
}

fn convert_feature(feature: &Feature) -> Option<CountryFeature> {
    let polygons = convert_geometry(feature.geometry.as_ref()?);
    if polygons.is_empty() {
        return None;
    }
    let properties = feature.properties.as_ref();
    Some(CountryFeature::new(
        feature_name(properties),
        feature_economy(properties),
        polygons,
    ))
}

fn convert_geometry(geometry: &Geometry) -> Vec<CountryPolygon> {
    match &geometry.value {
        Value::Polygon(rings) => convert_rings(rings).into_iter().collect(),
        Value::MultiPolygon(polygons) => polygons.iter().filter_map(|r| convert_rings(r)).collect(),
        Value::GeometryCollection(geometries) => {
            geometries.iter().flat_map(convert_geometry).collect()
        }
        _ => Vec::new(),
    }
}

fn convert_rings(rings: &[Vec<Vec<f64>>]) -> Option<CountryPolygon> {
    let (exterior, holes) = rings.split_first()?;
    let to_coords = |ring: &Vec<Vec<f64>>| -> Vec<Coord<f64>> {
        ring.iter()
            .filter(|c| c.len() >= 2)
            .map(|c| Coord { x: c[0], y: c[1] })
            .collect()
    };
    let exterior = to_coords(exterior);
    if exterior.len() < 3 {
        return None;
    }
    Some(CountryPolygon {
        exterior,
        holes: holes.iter().map(to_coords).collect(),
    })
}

/// Even-odd ray casting against a single ring.
fn ring_contains(ring: &[Coord<f64>], coord: Coord<f64>) -> bool {
    let mut inside = false;
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > coord.y) != (b.y > coord.y)
            && coord.x < (b.x - a.x) * (coord.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "formal_en": "Republic of Squareland", "economy": "2. Developed region: nonG7" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [
                        [[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]],
                        [[4, 4], [6, 4], [6, 6], [4, 6], [4, 4]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "Islandia" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[20, 20], [22, 20], [22, 22], [20, 22], [20, 20]]],
                        [[[30, 20], [32, 20], [32, 22], [30, 22], [30, 20]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "Just a point" },
                "geometry": { "type": "Point", "coordinates": [1, 1] }
            }
        ]
    }"#;

    #[test]
    fn test_load_feature_collection() {
        let set = CountrySet::from_geojson(SAMPLE).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.features[0].name, "Republic of Squareland");
        assert_eq!(
            set.features[0].economy.as_deref(),
            Some("2. Developed region: nonG7")
        );
        assert_eq!(set.features[1].name, "Islandia");
        assert!(set.features[1].economy.is_none());
        assert_eq!(set.features[1].polygons.len(), 2);
    }

    #[test]
    fn test_contains_respects_holes() {
        let set = CountrySet::from_geojson(SAMPLE).unwrap();
        let square = &set.features[0];
        assert!(square.contains(Coord { x: 2.0, y: 2.0 }));
        assert!(!square.contains(Coord { x: 5.0, y: 5.0 }));
        assert!(!square.contains(Coord { x: 15.0, y: 5.0 }));
    }

    #[test]
    fn test_feature_at() {
        let set = CountrySet::from_geojson(SAMPLE).unwrap();
        assert_eq!(set.feature_at(Coord { x: 31.0, y: 21.0 }), Some(1));
        assert_eq!(set.feature_at(Coord { x: -50.0, y: 0.0 }), None);
    }

    #[test]
    fn test_invalid_geojson() {
        assert!(CountrySet::from_geojson("{ not json").is_err());
    }
}
