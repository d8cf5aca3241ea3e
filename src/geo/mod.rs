//! Geographic data, projection and rendering for the globe views.
//!
//! This module provides loading of country boundaries (GeoJSON and
//! TopoJSON), the orthographic projection, spherical helpers, and the
//! painters that draw countries, graticules and connection arcs.

mod graticule;
mod layer;
mod projection;
mod renderer;
pub mod sphere;
mod topology;

pub use graticule::graticule_lines;
pub use layer::{CountryFeature, CountryPolygon, CountrySet};
pub use projection::{OrthographicProjection, BACK_CLIP_ANGLE, FRONT_CLIP_ANGLE};
pub use renderer::{render_connections, render_countries, render_lines, render_sphere, CountryStyle};
pub use topology::{countries_from_topojson, TopologyError};
