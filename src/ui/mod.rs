//! UI modules for the Globe Workbench application.
//!
//! The UI is split into distinct panels:
//! - Top bar: title, view switcher and status
//! - Central panel: the active view (single globe, dual globe or graph editor)
//! - Alert window: failed actions, one at a time

mod alert_window;
mod colors;
mod dual_globe;
mod gestures;
mod graph_editor;
mod single_globe;
mod top_bar;

pub use alert_window::render_alert_window;
pub use dual_globe::render_dual_globe;
pub use graph_editor::render_graph_editor;
pub use single_globe::render_single_globe;
pub use top_bar::render_top_bar;
