//! Graph file import and export with cross-platform support.
//!
//! Uses channel-based communication to bridge async file dialogs
//! with egui's synchronous update loop.

use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Default file name offered when exporting the graph.
pub const GRAPH_FILE_NAME: &str = "graph.json";

/// A file picked for import.
#[derive(Clone)]
pub struct FilePickResult {
    pub file_name: String,
    pub contents: String,
}

/// Outcome of a file dialog, delivered on a later frame.
pub enum FileEvent {
    /// A file was picked and read
    Picked(FilePickResult),
    /// The picked file could not be read as text
    ReadFailed(String),
    /// The export was written under this name
    Saved(String),
    /// The export could not be written
    SaveFailed(String),
    /// The dialog was dismissed
    Cancelled,
}

/// Channel-based file dialogs for async dialog integration.
///
/// File dialogs are async but egui's update() is synchronous. Results are
/// sent back through the channel and picked up by [`FileChannel::try_recv`].
pub struct FileChannel {
    sender: Sender<FileEvent>,
    receiver: Receiver<FileEvent>,
}

impl Default for FileChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl FileChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Opens a file picker for a graph JSON file.
    ///
    /// On native: spawns a thread using pollster to block on the async dialog.
    /// On WASM: uses wasm_bindgen_futures::spawn_local.
    pub fn pick_json(&self, ctx: egui::Context) {
        let sender = self.sender.clone();
        spawn(move || async move {
            let event = async_pick_json().await;
            let _ = sender.send(event);
            ctx.request_repaint();
        });
    }

    /// Saves `json` under `file_name`.
    ///
    /// On native a save dialog asks for the location. On WASM the browser
    /// downloads the file directly.
    pub fn save_json(&self, ctx: egui::Context, file_name: &str, json: String) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let sender = self.sender.clone();
            let file_name = file_name.to_string();
            spawn(move || async move {
                let event = async_save_json(&file_name, json).await;
                let _ = sender.send(event);
                ctx.request_repaint();
            });
        }

        #[cfg(target_arch = "wasm32")]
        {
            let event = match download_json(file_name, &json) {
                Ok(()) => FileEvent::Saved(file_name.to_string()),
                Err(msg) => FileEvent::SaveFailed(msg),
            };
            let _ = self.sender.send(event);
            ctx.request_repaint();
        }
    }

    /// Non-blocking check for a finished dialog.
    pub fn try_recv(&self) -> Option<FileEvent> {
        self.receiver.try_recv().ok()
    }
}

/// Runs the future built by `task` off the UI thread (native) or on the
/// browser event loop (wasm).
#[cfg(not(target_arch = "wasm32"))]
fn spawn<F, Fut>(task: F)
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()>,
{
    std::thread::spawn(move || pollster::block_on(task()));
}

#[cfg(target_arch = "wasm32")]
fn spawn<F, Fut>(task: F)
where
    F: FnOnce() -> Fut + 'static,
    Fut: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(task());
}

async fn async_pick_json() -> FileEvent {
    let Some(file) = rfd::AsyncFileDialog::new()
        .set_title("Import Graph")
        .add_filter("JSON", &["json"])
        .pick_file()
        .await
    else {
        return FileEvent::Cancelled;
    };

    let file_name = file.file_name();
    let bytes = file.read().await;
    match String::from_utf8(bytes) {
        Ok(contents) => {
            log::info!("Read {} ({} bytes)", file_name, contents.len());
            FileEvent::Picked(FilePickResult {
                file_name,
                contents,
            })
        }
        Err(err) => FileEvent::ReadFailed(format!("{} is not UTF-8 text: {}", file_name, err)),
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn async_save_json(file_name: &str, json: String) -> FileEvent {
    let Some(file) = rfd::AsyncFileDialog::new()
        .set_title("Export Graph")
        .add_filter("JSON", &["json"])
        .set_file_name(file_name)
        .save_file()
        .await
    else {
        return FileEvent::Cancelled;
    };

    match file.write(json.as_bytes()).await {
        Ok(()) => FileEvent::Saved(file.file_name()),
        Err(err) => FileEvent::SaveFailed(format!("Failed to write {}: {}", file.file_name(), err)),
    }
}

/// Triggers a browser download of `json`.
#[cfg(target_arch = "wasm32")]
fn download_json(file_name: &str, json: &str) -> Result<(), String> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document available")?;

    let parts = js_sys::Array::new();
    parts.push(&wasm_bindgen::JsValue::from_str(json));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create link: {:?}", e))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "Created element is not an anchor".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}
