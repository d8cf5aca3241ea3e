//! Centralized color constants for the UI.
//!
//! This module provides consistent colors across all views.

use eframe::egui::Color32;

/// General UI colors for labels and values.
pub mod ui {
    use super::Color32;

    /// Muted gray for labels.
    pub const LABEL: Color32 = Color32::from_rgb(100, 100, 100);
    /// Slightly brighter for values.
    pub const VALUE: Color32 = Color32::from_rgb(160, 160, 160);
    /// Emphasized color for active states.
    pub const ACTIVE: Color32 = Color32::from_rgb(100, 180, 255);
}

/// Colors for the single globe.
pub mod globe {
    use super::Color32;

    pub const BACKGROUND: Color32 = Color32::from_rgb(12, 16, 24);
    /// Ocean disc.
    pub const SPHERE: Color32 = Color32::from_rgb(20, 26, 38);
    pub const COUNTRY_FILL: Color32 = Color32::from_rgb(0x33, 0x41, 0x5c);
    pub const COUNTRY_STROKE: Color32 = Color32::from_rgb(0x06, 0x0a, 0x0f);
    pub const HOVER_FILL: Color32 = Color32::from_rgb(0x6e, 0xa9, 0xff);
    pub const HOVER_STROKE: Color32 = Color32::WHITE;
    pub const GRATICULE: Color32 = Color32::from_rgb(0x23, 0x23, 0x23);
}

/// Colors for the front/back globe pair.
pub mod dual {
    use super::Color32;

    pub const COUNTRY_FILL: Color32 = Color32::from_rgb(0x33, 0x41, 0x5c);
    pub const COUNTRY_STROKE: Color32 = Color32::from_rgb(0x06, 0x0a, 0x0f);
    pub const HOVER_FILL: Color32 = Color32::from_rgb(0x6e, 0xa9, 0xff);
    /// Countries armed for a connection.
    pub const SELECTED_FILL: Color32 = Color32::from_rgb(255, 180, 50);
    pub const CONNECTION: Color32 = Color32::from_rgb(255, 100, 100);

    /// Back hemisphere countries, seen through the globe.
    pub fn back_fill() -> Color32 {
        Color32::from_rgba_unmultiplied(0x33, 0x41, 0x5c, 50)
    }

    pub fn back_stroke() -> Color32 {
        Color32::from_rgba_unmultiplied(120, 130, 150, 40)
    }

    pub fn back_connection() -> Color32 {
        Color32::from_rgba_unmultiplied(255, 100, 100, 60)
    }

    /// Translucent front disc so the back hemisphere shows through.
    pub fn sphere() -> Color32 {
        Color32::from_rgba_unmultiplied(20, 26, 38, 150)
    }
}

/// Colors for the graph editor.
pub mod graph {
    use super::Color32;

    pub const BACKGROUND: Color32 = Color32::from_rgb(20, 20, 35);
    pub const NODE_FILL: Color32 = Color32::from_rgb(60, 120, 180);
    pub const NODE_STROKE: Color32 = Color32::from_rgb(180, 200, 230);
    pub const NODE_HOVER: Color32 = Color32::from_rgb(100, 180, 255);
    pub const LINK: Color32 = Color32::from_rgb(120, 120, 140);
    pub const LABEL: Color32 = Color32::from_rgb(220, 220, 240);
}
