//! TopoJSON decoding.
//!
//! Converts a TopoJSON topology (shared, optionally quantized and
//! delta-encoded arcs) into plain country polygons.

use super::layer::{feature_economy, feature_name, CountryFeature, CountryPolygon, CountrySet};
use geo_types::Coord;
use geojson::JsonObject;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Errors raised while decoding a topology.
#[derive(Debug)]
pub enum TopologyError {
    Parse(serde_json::Error),
    MissingObject(String),
    ArcOutOfRange(usize),
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyError::Parse(err) => write!(f, "TopoJSON parse error: {err}"),
            TopologyError::MissingObject(name) => write!(f, "Topology has no object named '{name}'"),
            TopologyError::ArcOutOfRange(index) => write!(f, "Arc index {index} is out of range"),
        }
    }
}

impl std::error::Error for TopologyError {}

#[derive(Debug, Deserialize)]
struct Topology {
    #[serde(default)]
    transform: Option<Transform>,
    objects: HashMap<String, TopoGeometry>,
    arcs: Vec<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum TopoGeometry {
    GeometryCollection {
        geometries: Vec<TopoGeometry>,
    },
    Polygon {
        arcs: Vec<Vec<i64>>,
        #[serde(default)]
        id: Option<serde_json::Value>,
        #[serde(default)]
        properties: Option<JsonObject>,
    },
    MultiPolygon {
        arcs: Vec<Vec<Vec<i64>>>,
        #[serde(default)]
        id: Option<serde_json::Value>,
        #[serde(default)]
        properties: Option<JsonObject>,
    },
    #[serde(other)]
    Unsupported,
}

/// Decodes the named object of a TopoJSON document into a country set.
pub fn countries_from_topojson(json: &str, object: &str) -> Result<CountrySet, TopologyError> {
    let topology: Topology = serde_json::from_str(json).map_err(TopologyError::Parse)?;
    let arcs = decode_arcs(&topology.arcs, topology.transform);

    let root = topology
        .objects
        .get(object)
        .ok_or_else(|| TopologyError::MissingObject(object.to_string()))?;

    let mut set = CountrySet::new();
    collect_features(root, &arcs, &mut set.features)?;
    Ok(set)
}

fn collect_features(
    geometry: &TopoGeometry,
    arcs: &[Vec<Coord<f64>>],
    out: &mut Vec<CountryFeature>,
) -> Result<(), TopologyError> {
    match geometry {
        TopoGeometry::GeometryCollection { geometries } => {
            for g in geometries {
                collect_features(g, arcs, out)?;
            }
        }
        TopoGeometry::Polygon {
            arcs: rings,
            id,
            properties,
        } => {
            let polygon = stitch_polygon(rings, arcs)?;
            out.push(build_feature(id, properties, polygon.into_iter().collect()));
        }
        TopoGeometry::MultiPolygon {
            arcs: polygons,
            id,
            properties,
        } => {
            let mut converted = Vec::with_capacity(polygons.len());
            for rings in polygons {
                converted.extend(stitch_polygon(rings, arcs)?);
            }
            out.push(build_feature(id, properties, converted));
        }
        TopoGeometry::Unsupported => {}
    }
    Ok(())
}

fn build_feature(
    id: &Option<serde_json::Value>,
    properties: &Option<JsonObject>,
    polygons: Vec<CountryPolygon>,
) -> CountryFeature {
    let mut name = feature_name(properties.as_ref());
    if name.is_empty() {
        name = match id {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
    }
    CountryFeature::new(name, feature_economy(properties.as_ref()), polygons)
}

/// Resolves quantized, delta-encoded arcs into absolute coordinates.
fn decode_arcs(arcs: &[Vec<Vec<f64>>], transform: Option<Transform>) -> Vec<Vec<Coord<f64>>> {
    arcs.iter()
        .map(|arc| {
            let mut x = 0.0;
            let mut y = 0.0;
            arc.iter()
                .filter(|p| p.len() >= 2)
                .map(|p| match transform {
                    Some(t) => {
                        x += p[0];
                        y += p[1];
                        Coord {
                            x: x * t.scale[0] + t.translate[0],
                            y: y * t.scale[1] + t.translate[1],
                        }
                    }
                    None => Coord { x: p[0], y: p[1] },
                })
                .collect()
        })
        .collect()
}

fn stitch_polygon(
    rings: &[Vec<i64>],
    arcs: &[Vec<Coord<f64>>],
) -> Result<Option<CountryPolygon>, TopologyError> {
    let mut stitched = Vec::with_capacity(rings.len());
    for ring in rings {
        stitched.push(stitch_ring(ring, arcs)?);
    }
    let mut iter = stitched.into_iter();
    let Some(exterior) = iter.next() else {
        return Ok(None);
    };
    if exterior.len() < 3 {
        return Ok(None);
    }
    Ok(Some(CountryPolygon {
        exterior,
        holes: iter.collect(),
    }))
}

/// Joins arcs into one ring; negative indices (`!i`) are traversed in reverse.
fn stitch_ring(indices: &[i64], arcs: &[Vec<Coord<f64>>]) -> Result<Vec<Coord<f64>>, TopologyError> {
    let mut ring: Vec<Coord<f64>> = Vec::new();
    for &index in indices {
        let (arc_index, reversed) = if index < 0 {
            ((!index) as usize, true)
        } else {
            (index as usize, false)
        };
        let arc = arcs
            .get(arc_index)
            .ok_or(TopologyError::ArcOutOfRange(arc_index))?;

        // Consecutive arcs share an endpoint
        let skip = usize::from(!ring.is_empty());
        if reversed {
            ring.extend(arc.iter().rev().skip(skip).copied());
        } else {
            ring.extend(arc.iter().skip(skip).copied());
        }
    }
    Ok(ring)
}
