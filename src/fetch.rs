//! Dataset downloads bridged into the egui update loop.
//!
//! Requests run off the UI thread (a `std::thread` natively, a local future
//! on wasm) and post their decoded result through a channel that the app
//! polls each frame.

use crate::geo::{countries_from_topojson, CountrySet, TopologyError};
use eframe::egui;
use std::fmt;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Name of the TopoJSON object holding country geometries.
pub const TOPOLOGY_OBJECT: &str = "countries";

/// Which view a dataset is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetTarget {
    /// GeoJSON for the single globe
    SingleGlobe,
    /// TopoJSON for the dual globe
    DualGlobe,
}

impl DatasetTarget {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SingleGlobe => "GeoJSON",
            Self::DualGlobe => "TopoJSON",
        }
    }

    /// Decodes a downloaded body in this target's format.
    pub fn decode(&self, body: &str) -> Result<CountrySet, DatasetError> {
        match self {
            Self::SingleGlobe => CountrySet::from_geojson(body).map_err(DatasetError::Parse),
            Self::DualGlobe => {
                countries_from_topojson(body, TOPOLOGY_OBJECT).map_err(DatasetError::Topology)
            }
        }
    }
}

/// Errors from loading a dataset.
#[derive(Debug)]
pub enum DatasetError {
    /// Request failed or returned a non-success status
    Http(String),
    /// Body was not a usable GeoJSON document
    Parse(String),
    /// Body was not a usable TopoJSON document
    Topology(TopologyError),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Http(msg) => write!(f, "request failed: {msg}"),
            DatasetError::Parse(msg) => write!(f, "invalid GeoJSON: {msg}"),
            DatasetError::Topology(err) => write!(f, "invalid TopoJSON: {err}"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Topology(err) => Some(err),
            _ => None,
        }
    }
}

/// A finished download.
pub struct DatasetResult {
    pub target: DatasetTarget,
    pub url: String,
    pub result: Result<CountrySet, DatasetError>,
}

/// Channel-based dataset loader.
pub struct DatasetChannel {
    sender: Sender<DatasetResult>,
    receiver: Receiver<DatasetResult>,
}

impl Default for DatasetChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Starts downloading `url` for `target`.
    ///
    /// The decoded result is sent through the channel and a repaint is
    /// requested once it arrives.
    pub fn fetch(&self, ctx: egui::Context, target: DatasetTarget, url: String) {
        log::info!("Fetching {} dataset from {}", target.label(), url);
        let sender = self.sender.clone();

        #[cfg(not(target_arch = "wasm32"))]
        {
            std::thread::spawn(move || {
                let result = fetch_text(&url).and_then(|body| target.decode(&body));
                let _ = sender.send(DatasetResult {
                    target,
                    url,
                    result,
                });
                ctx.request_repaint();
            });
        }

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                let result = match fetch_text(&url).await {
                    Ok(body) => target.decode(&body),
                    Err(err) => Err(err),
                };
                let _ = sender.send(DatasetResult {
                    target,
                    url,
                    result,
                });
                ctx.request_repaint();
            });
        }
    }

    /// Non-blocking check for a finished download.
    pub fn try_recv(&self) -> Option<DatasetResult> {
        self.receiver.try_recv().ok()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_text(url: &str) -> Result<String, DatasetError> {
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| DatasetError::Http(e.to_string()))?;
    response.text().map_err(|e| DatasetError::Http(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: &str) -> Result<String, DatasetError> {
    let response = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| DatasetError::Http(e.to_string()))?;
    if !response.ok() {
        return Err(DatasetError::Http(format!(
            "HTTP {} {}",
            response.status(),
            response.status_text()
        )));
    }
    response
        .text()
        .await
        .map_err(|e| DatasetError::Http(e.to_string()))
}
