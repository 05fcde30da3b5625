//! Brightness slider (0–100).
//!
//! Renders a horizontal gradient from black (left) to the current hue and
//! saturation at full brightness (right) as a rasterized image, avoiding
//! vger's broken linear gradient coordinate handling.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use floem::kurbo::Rect;
use floem::peniko::{self, Blob, Color};

use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::Hsb;
use crate::constants;
use crate::math;
use crate::picker::{DragState, PickerController};

/// Rasterize a horizontal gradient: black on the left → `rgb` on the right.
fn rasterize_brightness_gradient(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let mut buf = vec![0u8; (width * height * 4) as usize];
    for px in 0..width {
        let t = px as f64 / (width - 1).max(1) as f64;
        let [cr, cg, cb] = rgb.map(|c| (t * c as f64 + 0.5) as u8);
        for py in 0..height {
            let offset = ((py * width + px) * 4) as usize;
            buf[offset] = cr;
            buf[offset + 1] = cg;
            buf[offset + 2] = cb;
            buf[offset + 3] = 255;
        }
    }
    buf
}

pub(crate) struct BrightnessSlider {
    id: ViewId,
    picker: Rc<RefCell<PickerController>>,
    color: RwSignal<Hsb>,
    hsb: Hsb,
    size: floem::taffy::prelude::Size<f32>,
    grad_img: Option<peniko::Image>,
    grad_hash: Vec<u8>,
    cached_color: [u8; 3],
    cached_dims: (u32, u32),
}

/// Creates the brightness slider.
///
/// `id` must be the id the controller's drag listeners capture for
/// [`Surface::Brightness`](crate::picker::Surface::Brightness).
pub(crate) fn brightness_slider(
    id: ViewId,
    picker: Rc<RefCell<PickerController>>,
    color: RwSignal<Hsb>,
) -> BrightnessSlider {
    create_effect(move |_| {
        let c = color.get();
        id.update_state(c);
    });

    BrightnessSlider {
        id,
        picker,
        color,
        hsb: color.get_untracked(),
        size: Default::default(),
        grad_img: None,
        grad_hash: Vec::new(),
        cached_color: [0, 0, 0],
        cached_dims: (0, 0),
    }
    .style(|s| {
        s.height(constants::SLIDER_HEIGHT)
            .border_radius(constants::THUMB_RADIUS as f32)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl BrightnessSlider {
    fn is_dragging(&self) -> bool {
        self.picker.borrow().drag_state() == DragState::DraggingBrightness
    }

    fn drive(&self, f: impl FnOnce(&mut PickerController)) {
        let next = {
            let mut picker = self.picker.borrow_mut();
            f(&mut picker);
            picker.color()
        };
        self.color.set(next);
    }

    fn ensure_gradient_image(&mut self, scale: f64) {
        let s = scale.max(1.0);
        let pw = (self.size.width as f64 * s).round() as u32;
        let ph = (self.size.height as f64 * s).round() as u32;
        if pw == 0 || ph == 0 {
            return;
        }

        let full = math::hsb_to_rgb(self.hsb.h(), self.hsb.s(), 100.0);
        let dims = (pw, ph);
        if self.grad_img.is_some() && self.cached_dims == dims && self.cached_color == full {
            return;
        }

        let pixels = rasterize_brightness_gradient(pw, ph, full);
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, pw, ph);

        self.grad_hash = blob.id().to_le_bytes().to_vec();
        self.grad_img = Some(img);
        self.cached_color = full;
        self.cached_dims = dims;
    }
}

impl View for BrightnessSlider {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(hsb) = state.downcast::<Hsb>() {
            self.hsb = *hsb;
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, _cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                let mut pressed = false;
                self.drive(|picker| pressed = picker.press_brightness(e.pos.x));
                if pressed {
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerMove(e) => {
                if self.is_dragging() {
                    self.drive(|picker| picker.pointer_move(e.pos));
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) => {
                if self.is_dragging() {
                    self.picker.borrow_mut().release();
                }
                EventPropagation::Continue
            }
            Event::FocusLost => {
                if self.is_dragging() {
                    self.picker.borrow_mut().cancel_drag();
                }
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        self.picker
            .borrow_mut()
            .resize_slider(self.size.width as f64);
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::THUMB_RADIUS);

        cx.save();
        cx.clip(&rrect);
        let scale = cx.scale();
        self.ensure_gradient_image(scale);
        if let Some(ref img) = self.grad_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.grad_hash,
                },
                rect,
            );
        }
        cx.restore();

        cx.stroke(
            &rrect,
            Color::rgba8(0, 0, 0, 40),
            &floem::kurbo::Stroke::new(1.0),
        );

        // Keep the whole thumb inside the track at the extremes
        let radius = constants::THUMB_RADIUS;
        let x = self.picker.borrow().slider().position_of(self.hsb.b());
        let thumb_x = x.clamp(radius, (w - radius).max(radius));
        let thumb = floem::kurbo::Circle::new((thumb_x, h / 2.0), radius);
        cx.stroke(
            &thumb,
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
        let inner = floem::kurbo::Circle::new((thumb_x, h / 2.0), radius - 1.5);
        cx.stroke(&inner, Color::WHITE, &floem::kurbo::Stroke::new(2.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_runs_black_to_color() {
        let buf = rasterize_brightness_gradient(11, 2, [200, 100, 50]);
        assert_eq!(&buf[0..4], &[0, 0, 0, 255]);
        let last = (10 * 4) as usize;
        assert_eq!(&buf[last..last + 4], &[200, 100, 50, 255]);
        // second row mirrors the first
        let row2 = (11 * 4) as usize;
        assert_eq!(&buf[row2..row2 + 4], &[0, 0, 0, 255]);
    }
}
