//! Accent dialog: color wheel, brightness slider, hex and HSB inputs, and the
//! Reset / Cancel / Apply actions.

use std::cell::RefCell;
use std::rc::Rc;

use floem::event::EventListener;
use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate};
use floem::ViewId;

use crate::brightness_slider::brightness_slider;
use crate::color::{HexColor, Hsb};
use crate::color_wheel::color_wheel;
use crate::config::PickerConfig;
use crate::constants;
use crate::inputs::{channel_input, copy_button, hex_input, Channel};
use crate::picker::{DragListeners, PickerController, Surface};
use crate::storage::ColorStore;
use crate::theme::ThemeSink;

/// How the dialog was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    /// The color was persisted.
    Applied(HexColor),
    /// The theme was restored to the color the dialog opened with.
    Cancelled,
}

/// Routes pointer events to the dragged view for the duration of a drag.
struct ViewCapture {
    wheel: ViewId,
    brightness: ViewId,
}

impl ViewCapture {
    fn view(&self, surface: Surface) -> ViewId {
        match surface {
            Surface::Wheel => self.wheel,
            Surface::Brightness => self.brightness,
        }
    }
}

impl DragListeners for ViewCapture {
    fn attach(&mut self, surface: Surface) {
        self.view(surface).request_active();
    }

    fn detach(&mut self, surface: Surface) {
        self.view(surface).clear_active();
    }
}

fn swatch(fill: impl Fn() -> HexColor + 'static) -> impl IntoView {
    empty().style(move |st| {
        let [r, g, b] = fill().rgb();
        st.width(32.0)
            .height(32.0)
            .border_radius(constants::RADIUS)
            .border(1.0)
            .border_color(Color::rgb8(180, 180, 180))
            .background(Color::rgb8(r, g, b))
    })
}

fn action_button(text: &'static str, primary: bool, on_press: impl Fn() + 'static) -> impl IntoView {
    container(label(move || text).style(move |s| {
        let c = if primary {
            Color::WHITE
        } else {
            Color::rgb8(60, 60, 60)
        };
        s.font_size(constants::INPUT_FONT + 1.0).color(c)
    }))
    .style(move |s| {
        let (bg, hover) = if primary {
            (Color::rgb8(37, 99, 235), Color::rgb8(29, 78, 216))
        } else {
            (Color::rgb8(228, 228, 228), Color::rgb8(214, 214, 214))
        };
        s.padding_horiz(12.0)
            .padding_vert(5.0)
            .border_radius(constants::RADIUS)
            .background(bg)
            .cursor(floem::style::CursorStyle::Pointer)
            .hover(move |s| s.background(hover))
    })
    .on_event_stop(EventListener::PointerUp, move |_| on_press())
}

/// Creates the accent dialog.
///
/// The persisted accent (or `config.default_accent`) is loaded from `store`
/// and every change is pushed to `theme` live. `on_close` fires after Apply
/// succeeds or after Cancel has restored the opening color.
pub fn accent_dialog(
    config: PickerConfig,
    store: Box<dyn ColorStore>,
    theme: Box<dyn ThemeSink>,
    on_close: impl Fn(DialogOutcome) + 'static,
) -> impl IntoView {
    let wheel_id = ViewId::new();
    let brightness_id = ViewId::new();
    let capture = ViewCapture {
        wheel: wheel_id,
        brightness: brightness_id,
    };

    let picker = Rc::new(RefCell::new(PickerController::open(
        config,
        store,
        theme,
        Box::new(capture),
    )));
    let initial = picker.borrow().initial();
    let color = RwSignal::new(picker.borrow().color());
    let status = RwSignal::new(None::<String>);
    let on_close = Rc::new(on_close);

    let publish = {
        let picker = picker.clone();
        move || color.set(picker.borrow().color())
    };

    let reset = {
        let picker = picker.clone();
        let publish = publish.clone();
        move || {
            picker.borrow_mut().reset_to_default();
            publish();
        }
    };

    let cancel = {
        let picker = picker.clone();
        let publish = publish.clone();
        let on_close = on_close.clone();
        move || {
            picker.borrow_mut().revert();
            publish();
            status.set(None);
            on_close(DialogOutcome::Cancelled);
        }
    };

    let apply = {
        let picker = picker.clone();
        move || {
            let result = picker.borrow_mut().apply();
            match result {
                Ok(hex) => {
                    status.set(None);
                    on_close(DialogOutcome::Applied(hex));
                }
                Err(e) => {
                    log::error!("Failed to save accent color: {e}");
                    status.set(Some(format!("Could not save: {e}")));
                }
            }
        }
    };

    v_stack((
        label(|| "Accent color").style(|s| {
            s.font_size(constants::TITLE_FONT)
                .font_bold()
                .color(Color::rgb8(40, 40, 40))
        }),
        color_wheel(wheel_id, picker.clone(), color),
        // Before / after swatches
        h_stack((
            swatch(move || initial),
            swatch(move || color.get().to_hex()),
            empty().style(|s| s.flex_grow(1.0)),
        ))
        .style(|st| st.items_center().gap(4.0)),
        brightness_slider(brightness_id, picker.clone(), color),
        h_stack((
            hex_input(picker.clone(), color),
            copy_button(move || color.get_untracked().to_hex().to_string()),
        ))
        .style(|st| st.gap(constants::GAP).items_center().justify_center()),
        h_stack((
            channel_input(Channel::Hue, picker.clone(), color),
            channel_input(Channel::Saturation, picker.clone(), color),
            channel_input(Channel::Brightness, picker, color),
            copy_button(move || hsb_triplet(color.get_untracked())),
        ))
        .style(|st| st.gap(constants::GAP / 2.0).items_center().justify_center()),
        label(move || status.get().unwrap_or_default()).style(move |s| {
            s.font_size(constants::LABEL_FONT)
                .color(Color::rgb8(185, 28, 28))
                .apply_if(status.get().is_none(), |s| s.hide())
        }),
        h_stack((
            action_button("Reset", false, reset),
            empty().style(|s| s.flex_grow(1.0)),
            action_button("Cancel", false, cancel),
            action_button("Apply", true, apply),
        ))
        .style(|st| st.gap(constants::GAP).items_center()),
    ))
    .style(|st| {
        st.gap(constants::GAP)
            .padding(constants::PADDING)
            .size_full()
            .background(Color::rgb8(242, 242, 242))
    })
}

fn hsb_triplet(hsb: Hsb) -> String {
    format!(
        "{}, {}, {}",
        hsb.h().round() as i64 % 360,
        hsb.s().round() as i64,
        hsb.b().round() as i64,
    )
}
