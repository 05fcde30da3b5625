//! # floem-accent
//!
//! An HSB accent-color picker for [Floem](https://github.com/lapce/floem).
//!
//! Angle on a circular wheel picks hue, distance from the center picks
//! saturation, and a horizontal slider picks brightness. The chosen color is
//! pushed to a [`ThemeSink`] on every change and persisted through a
//! [`ColorStore`] when the user applies it.
//!
//! The color math ([`Hsb`], [`HexColor`]), pointer geometry
//! ([`WheelGeometry`], [`SliderGeometry`]) and drag state machine
//! ([`PickerController`]) work without a running Floem application.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_accent::{accent_picker, AccentPalette, FileStore, PickerConfig, SignalTheme};
//!
//! let palette = RwSignal::new(AccentPalette::default());
//! let store = FileStore::default_location().unwrap();
//! // Use `accent_picker(...)` in your Floem view tree.
//! let _dialog = accent_picker(
//!     PickerConfig::load(),
//!     Box::new(store),
//!     Box::new(SignalTheme(palette)),
//!     |outcome| println!("{outcome:?}"),
//! );
//! ```

mod accent_dialog;
mod brightness_slider;
mod color;
mod color_wheel;
mod config;
pub mod constants;
mod error;
mod geometry;
mod inputs;
mod math;
mod picker;
mod storage;
mod theme;

pub use accent_dialog::DialogOutcome;
pub use color::{HexColor, Hsb};
pub use config::PickerConfig;
pub use error::{ColorError, StoreError};
pub use geometry::{SliderGeometry, WheelGeometry, WheelPick};
pub use picker::{DragListeners, DragState, NoCapture, PickerController, Surface};
pub use storage::{load_accent, ColorStore, FileStore, MemoryStore};
pub use theme::{AccentPalette, CssVariables, SignalTheme, ThemeSink};

use std::sync::Once;

use floem::prelude::*;
use floem::text::FONT_SYSTEM;

static LOAD_LUCIDE_FONT: Once = Once::new();

/// Creates the accent dialog view.
///
/// The dialog reads the persisted accent from `store` (falling back to
/// `config.default_accent`), reflects every edit into `theme`, and reports
/// how it was closed through `on_close`.
pub fn accent_picker(
    config: PickerConfig,
    store: Box<dyn ColorStore>,
    theme: Box<dyn ThemeSink>,
    on_close: impl Fn(DialogOutcome) + 'static,
) -> impl IntoView {
    LOAD_LUCIDE_FONT.call_once(|| {
        FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });
    accent_dialog::accent_dialog(config, store, theme, on_close)
}
