//! Application state management.
//!
//! Each view owns its own state; `AppState` ties them together with the
//! shared alert queue and status line.

mod alerts;
mod dual_globe;
mod globe;
pub mod graph;
mod selection;
mod single_globe;
pub mod url_state;

pub use alerts::{AlertKind, AlertQueue};
pub use dual_globe::DualGlobeState;
pub use globe::{GlobeInput, GlobeSettings};
pub use graph::{GraphState, NODE_RADIUS};
pub use selection::Connection;
pub use single_globe::SingleGlobeState;
pub use url_state::{ActiveView, LaunchParams};

use eframe::egui::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Canvas size assumed for the sample graph before the first frame is laid out.
const INITIAL_GRAPH_CANVAS: Vec2 = Vec2::new(960.0, 600.0);

/// Root application state containing all sub-states.
pub struct AppState {
    /// View shown in the central panel
    pub active_view: ActiveView,

    /// Globe fit to the viewport with hover info
    pub single_globe: SingleGlobeState,

    /// Front/back globe with country connections
    pub dual_globe: DualGlobeState,

    /// Node-graph editor
    pub graph: GraphState,

    /// Messages for failed actions
    pub alerts: AlertQueue,

    /// Application status message displayed in top bar
    pub status_message: String,

    /// Last laid-out size of the graph canvas
    pub graph_canvas: Vec2,

    /// Source of random node positions
    pub rng: StdRng,
}

impl AppState {
    pub fn new(params: LaunchParams) -> Self {
        let mut rng = StdRng::from_entropy();
        let graph = GraphState::sample(INITIAL_GRAPH_CANVAS, &mut rng);

        Self {
            active_view: params.view,
            single_globe: SingleGlobeState::default(),
            dual_globe: DualGlobeState::default(),
            graph,
            alerts: AlertQueue::new(),
            status_message: "Loading map data...".to_string(),
            graph_canvas: INITIAL_GRAPH_CANVAS,
            rng,
        }
    }

    /// Commits the open node edit, raising an alert on rejection.
    pub fn save_graph_edit(&mut self) {
        if let Err(err) = self.graph.save_edit() {
            self.alerts.push(AlertKind::Edit, err.to_string());
        }
    }

    /// Replaces the graph from an imported file, raising an alert on failure.
    pub fn import_graph(&mut self, file_name: &str, json: &str) {
        match self.graph.import_json(json, self.graph_canvas, &mut self.rng) {
            Ok(()) => {
                self.status_message = format!("Imported {}", file_name);
            }
            Err(err) => self.alerts.push(AlertKind::Import, err.to_string()),
        }
    }

    /// Serializes the graph for export, raising an alert on failure.
    pub fn export_graph(&mut self) -> Option<String> {
        match self.graph.export_json() {
            Ok(json) => Some(json),
            Err(err) => {
                self.alerts.push(AlertKind::Export, err.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        let mut state = AppState::new(LaunchParams::default());
        state.rng = StdRng::seed_from_u64(1);
        state
    }

    #[test]
    fn test_import_missing_links_raises_one_alert() {
        let mut state = state();
        let before = state.graph.nodes.clone();

        state.import_graph("bad.json", r#"{"nodes": []}"#);

        assert_eq!(state.alerts.pending_count(), 1);
        assert_eq!(state.graph.nodes, before);
    }

    #[test]
    fn test_duplicate_rename_raises_alert() {
        let mut state = state();
        let canada = state
            .graph
            .nodes
            .iter()
            .position(|n| n.id == "Canada")
            .unwrap();
        state.graph.begin_edit(canada);
        state.graph.editing.as_mut().unwrap().id = "USA".to_string();

        state.save_graph_edit();

        assert_eq!(state.alerts.pending_count(), 1);
        assert_eq!(state.graph.nodes[canada].id, "Canada");
        assert!(state.graph.editing.is_some());
    }

    #[test]
    fn test_successful_import_raises_nothing() {
        let mut state = state();
        let json = state.export_graph().unwrap();
        state.import_graph("graph.json", &json);
        assert_eq!(state.alerts.pending_count(), 0);
        assert_eq!(state.graph.nodes.len(), 3);
    }
}
