//! Sizing, geometry, persistence and styling constants for the picker.

/// Rotation added to the pointer angle so hue 0 sits at the top of the wheel.
pub const HUE_OFFSET_DEGREES: f64 = 90.0;

/// Gap between the drawn wheel edge and the selectable radius.
pub const WHEEL_INSET: f64 = 5.0;

/// Side length of the cached wheel raster, in pixels.
pub const WHEEL_RASTER_SIZE: u32 = 512;

/// Storage key the accent color is persisted under.
pub const ACCENT_STORAGE_KEY: &str = "formx.accent-color";

/// Fallback accent when nothing valid is persisted.
pub const DEFAULT_ACCENT: crate::HexColor = crate::HexColor::from_rgb(0x3b, 0x82, 0xf6);

/// Application directory under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "formx";

/// 1D slider track height
pub const SLIDER_HEIGHT: f32 = 16.0;

/// Cursor circle radius on the wheel
pub const CURSOR_RADIUS: f64 = 8.0;

/// Thumb radius on the brightness slider
pub const THUMB_RADIUS: f64 = 7.0;

pub const RADIUS: f32 = 4.0;

/// Gap between picker elements
pub const GAP: f32 = 8.0;

/// Padding around the whole dialog
pub const PADDING: f32 = 12.0;

pub const INPUT_WIDTH: f32 = 32.0;

pub const HEX_INPUT_WIDTH: f32 = 64.0;

pub const INPUT_FONT: f32 = 11.0;

pub const LABEL_FONT: f32 = 10.0;

pub const TITLE_FONT: f32 = 13.0;

/// Brightness step used for the hover shade of the accent.
pub const HOVER_DARKEN: f64 = 10.0;
