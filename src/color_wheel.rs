//! Circular HSB color wheel.
//!
//! Angle maps to hue and radius to saturation. The full-brightness wheel is
//! rasterized once to an RGBA8 buffer and scaled to the widget; the current
//! brightness is shown as a dark overlay. Pointer input is forwarded to the
//! shared [`PickerController`].

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use floem::kurbo::{BezPath, Circle, Point, Rect, Vec2};
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
use crate::geometry::WheelGeometry;
use crate::math;
use crate::picker::{DragState, PickerController};

/// Build a closed `BezPath` circle from line segments (no cubic curves).
fn circle_path(center: Point, radius: f64) -> BezPath {
    let mut path = BezPath::new();
    for i in 0..64 {
        let angle = std::f64::consts::TAU * i as f64 / 64.0;
        let pt = Point::new(
            center.x + angle.cos() * radius,
            center.y + angle.sin() * radius,
        );
        if i == 0 {
            path.move_to(pt);
        } else {
            path.line_to(pt);
        }
    }
    path.close_path();
    path
}

/// Feather width in raster pixels for anti-aliasing the circle edge.
const FEATHER: f64 = 3.0;

/// Rasterize the wheel at full brightness to a `size × size` RGBA8 buffer.
///
/// Saturation reaches 100 at `1 - inset_ratio` of the circle radius, matching
/// where the controller clamps picks; beyond that the color stays fully
/// saturated and only the alpha feathers out.
fn rasterize_wheel(size: u32, inset_ratio: f64, hue_offset: f64) -> Vec<u8> {
    let half = size as f64 / 2.0;
    let radius = half - FEATHER;
    let geometry = WheelGeometry::new(
        Point::new(half, half),
        radius,
        radius * inset_ratio,
        hue_offset,
    );

    let mut buf = vec![0u8; (size * size * 4) as usize];

    for py in 0..size {
        let dy = py as f64 + 0.5 - half;
        let row_offset = (py * size * 4) as usize;

        for px in 0..size {
            let dx = px as f64 + 0.5 - half;
            let offset = Vec2::new(dx, dy);
            let dist = offset.hypot();

            if dist > radius + FEATHER {
                continue;
            }

            let alpha = ((radius + FEATHER - dist) / FEATHER).clamp(0.0, 1.0);
            let (hue, fraction) = geometry.polar(offset);
            let [r, g, b] = math::hsb_to_rgb(hue, fraction.min(1.0) * 100.0, 100.0);

            let at = row_offset + (px * 4) as usize;
            buf[at] = r;
            buf[at + 1] = g;
            buf[at + 2] = b;
            buf[at + 3] = (alpha * 255.0 + 0.5) as u8;
        }
    }

    buf
}

pub(crate) struct ColorWheel {
    id: ViewId,
    picker: Rc<RefCell<PickerController>>,
    color: RwSignal<Hsb>,
    hsb: Hsb,
    size: floem::taffy::prelude::Size<f32>,
    wheel_img: Option<peniko::Image>,
    wheel_hash: Vec<u8>,
    /// Inset ratio (per mille) and hue offset the cached image was built for.
    raster_key: (u32, u64),
}

/// Creates the wheel view.
///
/// `id` must be the id the controller's drag listeners capture for
/// [`Surface::Wheel`](crate::picker::Surface::Wheel).
pub(crate) fn color_wheel(
    id: ViewId,
    picker: Rc<RefCell<PickerController>>,
    color: RwSignal<Hsb>,
) -> ColorWheel {
    create_effect(move |_| {
        let c = color.get();
        id.update_state(c);
    });

    ColorWheel {
        id,
        picker,
        color,
        hsb: color.get_untracked(),
        size: Default::default(),
        wheel_img: None,
        wheel_hash: Vec::new(),
        raster_key: (0, 0),
    }
    .style(|s| {
        s.width_full()
            .aspect_ratio(1.0)
            .min_height(120.0)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl ColorWheel {
    fn is_dragging(&self) -> bool {
        self.picker.borrow().drag_state() == DragState::DraggingWheel
    }

    /// Run `f` against the controller, then publish the resulting color.
    fn drive(&self, f: impl FnOnce(&mut PickerController)) {
        let next = {
            let mut picker = self.picker.borrow_mut();
            f(&mut picker);
            picker.color()
        };
        self.color.set(next);
    }

    fn wheel_rect(&self, geometry: &WheelGeometry) -> Rect {
        let c = geometry.center();
        let r = self.visual_radius();
        Rect::new(c.x - r, c.y - r, c.x + r, c.y + r)
    }

    fn visual_radius(&self) -> f64 {
        (self.size.width as f64).min(self.size.height as f64) / 2.0
    }

    fn ensure_wheel_image(&mut self, geometry: &WheelGeometry) {
        let visual = self.visual_radius();
        if visual <= 0.0 {
            return;
        }
        let inset_ratio = (1.0 - geometry.max_radius() / visual).clamp(0.0, 1.0);
        let key = (
            (inset_ratio * 1000.0).round() as u32,
            geometry.hue_offset().to_bits(),
        );
        if self.wheel_img.is_some() && self.raster_key == key {
            return;
        }

        let size = constants::WHEEL_RASTER_SIZE;
        let pixels = rasterize_wheel(size, key.0 as f64 / 1000.0, geometry.hue_offset());
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, size, size);

        self.wheel_hash = blob.id().to_le_bytes().to_vec();
        self.wheel_img = Some(img);
        self.raster_key = key;
    }
}

impl View for ColorWheel {
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
                self.drive(|picker| pressed = picker.press_wheel(e.pos));
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
            .resize_wheel(self.size.width as f64, self.size.height as f64);
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        if self.size.width == 0.0 || self.size.height == 0.0 {
            return;
        }

        let geometry = *self.picker.borrow().wheel();
        let center = geometry.center();
        let radius = self.visual_radius();

        // Full-brightness wheel image, scaled by the renderer
        let clip = Circle::new(center, radius);
        cx.save();
        cx.clip(&clip);
        self.ensure_wheel_image(&geometry);
        if let Some(ref img) = self.wheel_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.wheel_hash,
                },
                self.wheel_rect(&geometry),
            );
        }
        cx.restore();

        // Darken by the current brightness
        let overlay_alpha = 1.0 - self.hsb.b() / 100.0;
        if overlay_alpha > 0.001 {
            let overlay = circle_path(center, radius);
            cx.fill(&overlay, Color::rgba(0.0, 0.0, 0.0, overlay_alpha), 0.0);
        }

        // Thumb, filled with the current color
        let thumb = geometry.thumb_position(self.hsb.h(), self.hsb.s());
        let [r, g, b] = self.hsb.to_hex().rgb();
        cx.fill(
            &Circle::new(thumb, constants::CURSOR_RADIUS - 1.5),
            Color::rgb8(r, g, b),
            0.0,
        );
        cx.stroke(
            &Circle::new(thumb, constants::CURSOR_RADIUS + 1.0),
            Color::rgba8(0, 0, 0, 80),
            &floem::kurbo::Stroke::new(1.0),
        );
        cx.stroke(
            &Circle::new(thumb, constants::CURSOR_RADIUS),
            Color::WHITE,
            &floem::kurbo::Stroke::new(2.0),
        );
    }
}
