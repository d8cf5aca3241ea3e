#![warn(clippy::all)]

//! Globe Workbench - interactive country globes and a small graph editor.
//!
//! Three views share one window: a single rotating globe with hover info,
//! a front/back globe pair for drawing connections between countries, and
//! a node-graph editor with JSON import/export.

mod fetch;
mod file_ops;
mod geo;
mod state;
mod ui;

use eframe::egui;
use fetch::{DatasetChannel, DatasetTarget};
use file_ops::{FileChannel, FileEvent};
use geo_types::Coord;
use state::{ActiveView, AppState};

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "Globe Workbench",
        native_options,
        Box::new(|cc| Ok(Box::new(WorkbenchApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("app_canvas")
            .expect("Failed to find app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("app_canvas was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(WorkbenchApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct WorkbenchApp {
    /// Application state containing all sub-states
    state: AppState,

    /// Channel for dataset downloads
    datasets: DatasetChannel,

    /// Channel for graph import/export dialogs
    files: FileChannel,

    /// Latitude/longitude grid shared by both globe views
    graticule: Vec<Vec<Coord<f64>>>,

    /// Downloads still in flight
    pending_datasets: usize,
}

impl WorkbenchApp {
    /// Creates a new WorkbenchApp instance and starts loading both datasets.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let params = state::url_state::parse_from_url();
        log::info!(
            "Starting in {} view (geo: {}, topo: {})",
            params.view.label(),
            params.geo_url,
            params.topo_url
        );

        let datasets = DatasetChannel::new();
        datasets.fetch(
            cc.egui_ctx.clone(),
            DatasetTarget::SingleGlobe,
            params.geo_url.clone(),
        );
        datasets.fetch(
            cc.egui_ctx.clone(),
            DatasetTarget::DualGlobe,
            params.topo_url.clone(),
        );

        Self {
            state: AppState::new(params),
            datasets,
            files: FileChannel::new(),
            graticule: geo::graticule_lines(),
            pending_datasets: 2,
        }
    }

    /// Installs finished downloads into their views.
    fn poll_datasets(&mut self) {
        while let Some(done) = self.datasets.try_recv() {
            self.pending_datasets = self.pending_datasets.saturating_sub(1);
            match done.result {
                Ok(countries) => {
                    if countries.is_empty() {
                        log::warn!("Dataset at {} has no country polygons", done.url);
                    }
                    log::info!(
                        "Loaded {} countries from {}",
                        countries.len(),
                        done.url
                    );
                    match done.target {
                        DatasetTarget::SingleGlobe => {
                            self.state.single_globe.countries = Some(countries)
                        }
                        DatasetTarget::DualGlobe => {
                            self.state.dual_globe.countries = Some(countries)
                        }
                    }
                    if self.pending_datasets == 0 {
                        self.state.status_message = "Ready".to_string();
                    }
                }
                Err(e) => {
                    log::error!("Failed to load {}: {}", done.url, e);
                    self.state.status_message =
                        format!("Failed to load {} data: {}", done.target.label(), e);
                }
            }
        }
    }

    /// Handles finished import/export dialogs.
    fn poll_files(&mut self) {
        while let Some(event) = self.files.try_recv() {
            let now = chrono::Local::now().format("%H:%M:%S");
            match event {
                FileEvent::Picked(file) => {
                    self.state.import_graph(&file.file_name, &file.contents);
                }
                FileEvent::ReadFailed(msg) => {
                    self.state.alerts.push(state::AlertKind::Import, msg);
                }
                FileEvent::Saved(name) => {
                    log::info!("Exported graph to {}", name);
                    self.state.status_message = format!("Exported {} at {}", name, now);
                }
                FileEvent::SaveFailed(msg) => {
                    self.state.alerts.push(state::AlertKind::Export, msg);
                }
                FileEvent::Cancelled => {
                    log::debug!("File dialog cancelled");
                }
            }
        }
    }
}

impl eframe::App for WorkbenchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_datasets();
        self.poll_files();

        ui::render_top_bar(ctx, &mut self.state);

        match self.state.active_view {
            ActiveView::SingleGlobe => {
                ui::render_single_globe(ctx, &mut self.state, &self.graticule)
            }
            ActiveView::DualGlobe => ui::render_dual_globe(ctx, &mut self.state, &self.graticule),
            ActiveView::GraphEditor => ui::render_graph_editor(ctx, &mut self.state, &self.files),
        }

        ui::render_alert_window(ctx, &mut self.state.alerts);
    }
}
