//! Process-wide marker style.
//!
//! The hosting application calls [`init`] once before the first frame. The
//! style never changes afterwards and needs no teardown.

use std::sync::OnceLock;

use eframe::egui::Color32;

static STYLE: OnceLock<MarkerStyle> = OnceLock::new();

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub radius: f32,
    /// Radius for the selected start and end locations.
    pub endpoint_radius: f32,
    pub outline_width: f32,
    pub start_color: Color32,
    pub end_color: Color32,
    /// Fill for locations without a fuel price.
    pub unpriced_color: Color32,
    pub label_size: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 6.0,
            endpoint_radius: 9.0,
            outline_width: 2.0,
            start_color: Color32::from_rgb(0x1E, 0x8A, 0x5A),
            end_color: Color32::from_rgb(0xC7, 0x3E, 0x1D),
            unpriced_color: Color32::from_rgb(0x8C, 0x8C, 0x8C),
            label_size: 12.0,
        }
    }
}

/// Install the marker style. Only the first call has an effect; returns
/// whether this call installed it.
pub fn init(style: MarkerStyle) -> bool {
    STYLE.set(style).is_ok()
}

/// The installed style, or the default if [`init`] was never called.
pub fn style() -> &'static MarkerStyle {
    STYLE.get_or_init(MarkerStyle::default)
}
