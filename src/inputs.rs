//! Text inputs for the hex value and the H/S/B channels, and the copy button.

use std::cell::RefCell;
use std::rc::Rc;

use floem::event::{Event, EventListener, EventPropagation};
use floem::keyboard::{Key, NamedKey};
use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};

use crate::color::{HexColor, Hsb};
use crate::constants;
use crate::picker::PickerController;

/// One editable HSB component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Channel {
    Hue,
    Saturation,
    Brightness,
}

impl Channel {
    fn label(self) -> &'static str {
        match self {
            Channel::Hue => "H",
            Channel::Saturation => "S",
            Channel::Brightness => "B",
        }
    }

    fn max(self) -> f64 {
        match self {
            Channel::Hue => 360.0,
            Channel::Saturation | Channel::Brightness => 100.0,
        }
    }

    fn read(self, hsb: Hsb) -> f64 {
        match self {
            Channel::Hue => hsb.h(),
            Channel::Saturation => hsb.s(),
            Channel::Brightness => hsb.b(),
        }
    }

    fn display(self, hsb: Hsb) -> String {
        let value = self.read(hsb).round() as i64;
        match self {
            // 359.6 rounds up to 360, the same hue as 0
            Channel::Hue => format!("{}", value % 360),
            _ => format!("{value}"),
        }
    }

    fn write(self, picker: &mut PickerController, value: f64) {
        let value = value.clamp(0.0, self.max());
        match self {
            Channel::Hue => picker.set_hue(value),
            Channel::Saturation => picker.set_saturation(value),
            Channel::Brightness => picker.set_brightness(value),
        }
    }
}

fn is_enter(event: &Event) -> bool {
    match event {
        Event::KeyDown(ke) => ke.key.logical_key == Key::Named(NamedKey::Enter),
        _ => false,
    }
}

fn field_style(s: floem::style::Style, width: f32) -> floem::style::Style {
    s.width(width)
        .padding(2.0)
        .font_size(constants::INPUT_FONT)
        .font_family("monospace".to_string())
        .background(Color::WHITE)
        .border(1.0)
        .border_color(Color::rgb8(200, 200, 200))
        .border_radius(3.0)
}

/// A numeric input for one HSB channel, committed on Enter or focus loss.
pub(crate) fn channel_input(
    channel: Channel,
    picker: Rc<RefCell<PickerController>>,
    color: RwSignal<Hsb>,
) -> impl IntoView {
    let text = RwSignal::new(channel.display(color.get_untracked()));

    // Color → text (drags and other inputs)
    create_effect(move |_| {
        let expected = channel.display(color.get());
        if text.get_untracked() != expected {
            text.set(expected);
        }
    });

    let on_commit = move || {
        let raw = text.get_untracked();
        match raw.trim().parse::<f64>() {
            Ok(num) if num.is_finite() => {
                let next = {
                    let mut picker = picker.borrow_mut();
                    channel.write(&mut picker, num);
                    picker.color()
                };
                color.set(next);
                let formatted = channel.display(next);
                if raw != formatted {
                    text.set(formatted);
                }
            }
            _ => {
                log::debug!("Rejected {:?} input `{raw}`", channel);
                text.set(channel.display(color.get_untracked()));
            }
        }
    };
    let on_enter = on_commit.clone();

    v_stack((
        text_input(text)
            .style(|s| field_style(s, constants::INPUT_WIDTH))
            .on_event_stop(EventListener::FocusLost, move |_| {
                on_commit();
            })
            .on_event(EventListener::KeyDown, move |e| {
                if is_enter(e) {
                    on_enter();
                    return EventPropagation::Stop;
                }
                EventPropagation::Continue
            }),
        label(move || channel.label()).style(|s| {
            s.font_size(constants::LABEL_FONT)
                .color(Color::rgb8(120, 120, 120))
                .justify_content(Some(floem::taffy::AlignContent::Center))
        }),
    ))
    .style(|s| s.items_center().gap(1.0))
}

/// A hex input that applies every complete 6-digit value as it is typed and
/// normalizes on Enter or focus loss.
pub(crate) fn hex_input(
    picker: Rc<RefCell<PickerController>>,
    color: RwSignal<Hsb>,
) -> impl IntoView {
    let text = RwSignal::new(color.get_untracked().to_hex().to_upper_digits());

    // Color → text, unless the text already spells the same color
    create_effect(move |_| {
        let hex = color.get().to_hex();
        let current = text.get_untracked();
        if HexColor::parse(&current).ok() != Some(hex) {
            text.set(hex.to_upper_digits());
        }
    });

    // Text → color on every complete keystroke
    let live_picker = picker.clone();
    create_effect(move |_| {
        let raw = text.get();
        let trimmed = raw.trim().trim_start_matches('#');
        if trimmed.len() != 6 {
            return;
        }
        let Ok(hex) = HexColor::parse(trimmed) else {
            return;
        };
        let next = {
            let mut picker = live_picker.borrow_mut();
            if picker.hex() == hex {
                return;
            }
            picker.set_hex(hex);
            picker.color()
        };
        color.set(next);
    });

    let on_commit = move || {
        let raw = text.get_untracked();
        match HexColor::parse(&raw) {
            Ok(hex) => {
                let next = {
                    let mut picker = picker.borrow_mut();
                    if picker.hex() != hex {
                        picker.set_hex(hex);
                    }
                    picker.color()
                };
                color.set(next);
                let normalized = hex.to_upper_digits();
                if raw != normalized {
                    text.set(normalized);
                }
            }
            Err(e) => {
                log::debug!("Rejected hex input: {e}");
                text.set(color.get_untracked().to_hex().to_upper_digits());
            }
        }
    };
    let on_enter = on_commit.clone();

    h_stack((
        label(|| "#").style(|s| {
            s.font_size(constants::INPUT_FONT)
                .font_family("monospace".to_string())
                .color(Color::rgb8(120, 120, 120))
        }),
        text_input(text)
            .style(|s| field_style(s, constants::HEX_INPUT_WIDTH))
            .on_event_stop(EventListener::FocusLost, move |_| {
                on_commit();
            })
            .on_event_stop(EventListener::KeyDown, move |e| {
                if is_enter(e) {
                    on_enter();
                }
            }),
    ))
    .style(|s| s.items_center().gap(1.0))
}

/// A small copy button that copies the result of `get_text` to the clipboard.
pub(crate) fn copy_button(get_text: impl Fn() -> String + 'static) -> impl IntoView {
    let pressed = RwSignal::new(false);
    container(
        label(|| lucide_icons::Icon::Copy.unicode().to_string()).style(move |s| {
            let c = if pressed.get() {
                Color::rgb8(80, 80, 80)
            } else {
                Color::rgb8(120, 120, 120)
            };
            s.font_size(14.0).font_family("lucide".to_string()).color(c)
        }),
    )
    .style(|s| {
        s.size(20.0, 20.0)
            .items_center()
            .justify_center()
            .border_radius(3.0)
            .cursor(floem::style::CursorStyle::Pointer)
            .hover(|s| s.background(Color::rgb8(230, 230, 230)))
    })
    .on_event_stop(EventListener::PointerDown, move |_| {
        pressed.set(true);
    })
    .on_event_stop(EventListener::PointerUp, move |_| {
        pressed.set(false);
        let text = get_text();
        if let Err(e) = copy_to_clipboard(&text) {
            log::warn!("Could not copy `{text}` to the clipboard: {e}");
        }
    })
}

fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    arboard::Clipboard::new()?.set_text(text)
}
