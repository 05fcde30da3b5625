//! Picker controller: owns the current color and the drag state machine.
//!
//! Pointer input arrives as press / move / release calls. While a drag is
//! active the host's drag listeners (pointer capture) stay attached so the
//! drag survives the pointer leaving the widget; they are detached on
//! release, on [`PickerController::cancel_drag`], and when the controller is
//! dropped mid-drag.

use floem::kurbo::Point;

use crate::color::{HexColor, Hsb};
use crate::config::PickerConfig;
use crate::error::StoreError;
use crate::geometry::{SliderGeometry, WheelGeometry};
use crate::storage::{self, ColorStore};
use crate::theme::ThemeSink;

/// Which surface a drag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Wheel,
    Brightness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingWheel,
    DraggingBrightness,
}

impl DragState {
    fn surface(self) -> Option<Surface> {
        match self {
            DragState::Idle => None,
            DragState::DraggingWheel => Some(Surface::Wheel),
            DragState::DraggingBrightness => Some(Surface::Brightness),
        }
    }
}

/// Host hook for routing pointer events to a surface while it is dragged.
pub trait DragListeners {
    fn attach(&mut self, surface: Surface);
    fn detach(&mut self, surface: Surface);
}

/// Listeners for hosts that already deliver every pointer event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl DragListeners for NoCapture {
    fn attach(&mut self, _surface: Surface) {}
    fn detach(&mut self, _surface: Surface) {}
}

pub struct PickerController {
    color: Hsb,
    opened_with: HexColor,
    last_applied: HexColor,
    drag: DragState,
    wheel: WheelGeometry,
    slider: SliderGeometry,
    config: PickerConfig,
    store: Box<dyn ColorStore>,
    theme: Box<dyn ThemeSink>,
    listeners: Box<dyn DragListeners>,
}

impl std::fmt::Debug for PickerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerController")
            .field("color", &self.color)
            .field("opened_with", &self.opened_with)
            .field("drag", &self.drag)
            .field("wheel", &self.wheel)
            .field("slider", &self.slider)
            .finish_non_exhaustive()
    }
}

impl PickerController {
    /// Load the persisted accent (or the configured default) and push it to
    /// the theme.
    pub fn open(
        config: PickerConfig,
        store: Box<dyn ColorStore>,
        mut theme: Box<dyn ThemeSink>,
        listeners: Box<dyn DragListeners>,
    ) -> Self {
        let color = storage::load_accent(&*store, &config.storage_key, config.default_accent);
        let hex = color.to_hex();
        theme.apply_accent(hex);
        log::debug!("Accent picker opened with {hex}");
        Self {
            color,
            opened_with: hex,
            last_applied: hex,
            drag: DragState::Idle,
            wheel: WheelGeometry::new(
                Point::ZERO,
                0.0,
                config.wheel_inset,
                config.hue_offset_degrees,
            ),
            slider: SliderGeometry::default(),
            config,
            store,
            theme,
            listeners,
        }
    }

    pub fn color(&self) -> Hsb {
        self.color
    }

    pub fn hex(&self) -> HexColor {
        self.color.to_hex()
    }

    /// The color the picker was opened with.
    pub fn initial(&self) -> HexColor {
        self.opened_with
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn wheel(&self) -> &WheelGeometry {
        &self.wheel
    }

    pub fn slider(&self) -> &SliderGeometry {
        &self.slider
    }

    /// Lay the wheel out in a `width × height` widget.
    pub fn resize_wheel(&mut self, width: f64, height: f64) {
        self.wheel = WheelGeometry::for_size(
            width,
            height,
            self.config.wheel_inset,
            self.config.hue_offset_degrees,
        );
    }

    pub fn resize_slider(&mut self, width: f64) {
        self.slider = SliderGeometry::new(width);
    }

    /// Start a wheel drag at `pos` and apply the picked hue and saturation.
    ///
    /// Returns `false` and changes nothing while a brightness drag is active.
    /// A second press on the wheel restarts the wheel drag.
    pub fn press_wheel(&mut self, pos: Point) -> bool {
        if !self.begin(DragState::DraggingWheel) {
            return false;
        }
        self.apply_wheel(pos);
        true
    }

    /// Start a brightness drag at `x` and apply the picked brightness.
    ///
    /// Returns `false` and changes nothing while a wheel drag is active.
    /// A second press on the slider restarts the brightness drag.
    pub fn press_brightness(&mut self, x: f64) -> bool {
        if !self.begin(DragState::DraggingBrightness) {
            return false;
        }
        self.apply_brightness(x);
        true
    }

    /// Feed a pointer move to the active drag. Ignored when idle.
    pub fn pointer_move(&mut self, pos: Point) {
        match self.drag {
            DragState::Idle => {}
            DragState::DraggingWheel => self.apply_wheel(pos),
            DragState::DraggingBrightness => self.apply_brightness(pos.x),
        }
    }

    /// End the active drag, keeping the color it produced.
    pub fn release(&mut self) {
        self.end("released");
    }

    /// End the active drag because input was lost (focus change, unmount).
    pub fn cancel_drag(&mut self) {
        self.end("cancelled");
    }

    pub fn set_hue(&mut self, h: f64) {
        self.set_color(self.color.with_hue(h));
    }

    pub fn set_saturation(&mut self, s: f64) {
        self.set_color(self.color.with_saturation(s));
    }

    pub fn set_brightness(&mut self, b: f64) {
        self.set_color(self.color.with_brightness(b));
    }

    /// Select a hex color. Gray and black keep the current hue so the wheel
    /// thumb does not jump.
    pub fn set_hex(&mut self, hex: HexColor) {
        let next = Hsb::from_hex(hex);
        if next.is_achromatic() {
            self.set_color(Hsb::new(self.color.h(), next.s(), next.b()));
        } else {
            self.set_color(next);
        }
    }

    pub fn set_color(&mut self, color: Hsb) {
        self.color = color;
        self.publish();
    }

    pub fn reset_to_default(&mut self) {
        self.set_hex(self.config.default_accent);
    }

    /// Persist the current color and return it.
    pub fn apply(&mut self) -> Result<HexColor, StoreError> {
        let hex = self.hex();
        self.store.set(&self.config.storage_key, &hex.to_string())?;
        self.opened_with = hex;
        log::info!("Persisted accent {hex} under `{}`", self.config.storage_key);
        Ok(hex)
    }

    /// Restore the color the picker was opened with, without persisting.
    pub fn revert(&mut self) {
        self.cancel_drag();
        let initial = self.opened_with;
        self.color = Hsb::from_hex(initial);
        self.publish();
    }

    fn begin(&mut self, next: DragState) -> bool {
        // A missed release leaves the same surface dragging; start over.
        if self.drag == next {
            self.end("restarted");
        }
        if self.drag != DragState::Idle {
            log::debug!("Ignoring press during {:?}", self.drag);
            return false;
        }
        if let Some(surface) = next.surface() {
            self.listeners.attach(surface);
        }
        self.drag = next;
        log::debug!("Drag started: {next:?}");
        true
    }

    fn end(&mut self, how: &str) {
        if let Some(surface) = self.drag.surface() {
            self.listeners.detach(surface);
            log::debug!("Drag {how}: {:?}", self.drag);
        }
        self.drag = DragState::Idle;
    }

    fn apply_wheel(&mut self, pos: Point) {
        let pick = self.wheel.pick(pos);
        self.color = Hsb::new(pick.hue, pick.saturation, self.color.b());
        self.publish();
    }

    fn apply_brightness(&mut self, x: f64) {
        self.color = self.color.with_brightness(self.slider.brightness_at(x));
        self.publish();
    }

    fn publish(&mut self) {
        let hex = self.color.to_hex();
        if hex != self.last_applied {
            self.theme.apply_accent(hex);
            self.last_applied = hex;
        }
    }
}

impl Drop for PickerController {
    fn drop(&mut self) {
        self.cancel_drag();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::constants;
    use crate::storage::MemoryStore;

    #[derive(Default)]
    struct Recorded {
        attached: Vec<Surface>,
        detached: Vec<Surface>,
        applied: Vec<HexColor>,
    }

    struct RecordingListeners(Rc<RefCell<Recorded>>);

    impl DragListeners for RecordingListeners {
        fn attach(&mut self, surface: Surface) {
            self.0.borrow_mut().attached.push(surface);
        }
        fn detach(&mut self, surface: Surface) {
            self.0.borrow_mut().detached.push(surface);
        }
    }

    fn controller(store: MemoryStore) -> (PickerController, Rc<RefCell<Recorded>>) {
        let rec = Rc::new(RefCell::new(Recorded::default()));
        let theme_rec = rec.clone();
        let mut picker = PickerController::open(
            PickerConfig::default(),
            Box::new(store),
            Box::new(move |hex: HexColor| theme_rec.borrow_mut().applied.push(hex)),
            Box::new(RecordingListeners(rec.clone())),
        );
        picker.resize_wheel(200.0, 200.0);
        picker.resize_slider(100.0);
        (picker, rec)
    }

    #[test]
    fn opens_with_default_and_applies_it() {
        let (picker, rec) = controller(MemoryStore::new());
        assert_eq!(picker.hex(), constants::DEFAULT_ACCENT);
        assert_eq!(rec.borrow().applied, vec![constants::DEFAULT_ACCENT]);
    }

    #[test]
    fn wheel_drag_updates_hue_and_saturation() {
        let (mut picker, rec) = controller(MemoryStore::new());
        let brightness = picker.color().b();

        assert!(picker.press_wheel(Point::new(195.0, 100.0)));
        assert_eq!(picker.drag_state(), DragState::DraggingWheel);
        assert_eq!(picker.color().h(), 90.0);
        assert_eq!(picker.color().s(), 100.0);
        assert_eq!(picker.color().b(), brightness);

        // Dragging far outside the widget keeps tracking the angle.
        picker.pointer_move(Point::new(100.0, 1000.0));
        assert_eq!(picker.color().h(), 180.0);
        assert_eq!(picker.color().s(), 100.0);

        picker.release();
        assert_eq!(picker.drag_state(), DragState::Idle);
        picker.pointer_move(Point::new(100.0, 100.0));
        assert_eq!(picker.color().h(), 180.0);

        let rec = rec.borrow();
        assert_eq!(rec.attached, vec![Surface::Wheel]);
        assert_eq!(rec.detached, vec![Surface::Wheel]);
        assert_eq!(rec.applied.len(), 3);
    }

    #[test]
    fn brightness_drag_keeps_hue() {
        let (mut picker, _rec) = controller(MemoryStore::new());
        let hue = picker.color().h();
        assert!(picker.press_brightness(25.0));
        assert_eq!(picker.color().b(), 25.0);
        picker.pointer_move(Point::new(-40.0, 300.0));
        assert_eq!(picker.color().b(), 0.0);
        picker.pointer_move(Point::new(60.0, 0.0));
        assert_eq!(picker.color().b(), 60.0);
        assert_eq!(picker.color().h(), hue);
        picker.release();
    }

    #[test]
    fn drags_are_mutually_exclusive() {
        let (mut picker, rec) = controller(MemoryStore::new());
        assert!(picker.press_brightness(50.0));
        let before = picker.color();
        assert!(!picker.press_wheel(Point::new(195.0, 100.0)));
        assert_eq!(picker.color(), before);
        assert_eq!(picker.drag_state(), DragState::DraggingBrightness);
        picker.release();
        assert!(picker.press_wheel(Point::new(195.0, 100.0)));
        picker.release();

        let rec = rec.borrow();
        assert_eq!(rec.attached, vec![Surface::Brightness, Surface::Wheel]);
        assert_eq!(rec.detached, vec![Surface::Brightness, Surface::Wheel]);
    }

    #[test]
    fn listeners_detach_on_drop_mid_drag() {
        let (mut picker, rec) = controller(MemoryStore::new());
        picker.press_wheel(Point::new(150.0, 100.0));
        drop(picker);
        assert_eq!(rec.borrow().detached, vec![Surface::Wheel]);
    }

    #[test]
    fn cancel_mid_drag_detaches_and_stops_tracking() {
        let (mut picker, rec) = controller(MemoryStore::new());
        assert!(picker.press_brightness(40.0));
        picker.cancel_drag();
        assert_eq!(picker.drag_state(), DragState::Idle);
        assert_eq!(rec.borrow().detached, vec![Surface::Brightness]);

        let after = picker.color();
        picker.pointer_move(Point::new(90.0, 0.0));
        assert_eq!(picker.color(), after);
        assert_eq!(picker.color().b(), 40.0);
    }

    #[test]
    fn revert_mid_drag_detaches_and_restores() {
        let (mut picker, rec) = controller(MemoryStore::new());
        let opened = picker.initial();
        assert!(picker.press_wheel(Point::new(195.0, 100.0)));
        assert_ne!(picker.hex(), opened);

        picker.revert();
        assert_eq!(picker.drag_state(), DragState::Idle);
        assert_eq!(picker.hex(), opened);
        let rec = rec.borrow();
        assert_eq!(rec.detached, vec![Surface::Wheel]);
        assert_eq!(rec.applied.last(), Some(&opened));
    }

    #[test]
    fn repress_on_same_surface_restarts_drag() {
        let (mut picker, rec) = controller(MemoryStore::new());
        assert!(picker.press_wheel(Point::new(195.0, 100.0)));
        // Release never arrived; the next press still lands.
        assert!(picker.press_wheel(Point::new(100.0, 5.0)));
        assert_eq!(picker.drag_state(), DragState::DraggingWheel);
        assert_eq!(picker.color().h(), 0.0);
        assert!(!picker.press_brightness(10.0));
        picker.release();

        let rec = rec.borrow();
        assert_eq!(rec.attached, vec![Surface::Wheel, Surface::Wheel]);
        assert_eq!(rec.detached, vec![Surface::Wheel, Surface::Wheel]);
    }

    #[test]
    fn release_when_idle_detaches_nothing() {
        let (mut picker, rec) = controller(MemoryStore::new());
        picker.release();
        picker.cancel_drag();
        drop(picker);
        assert!(rec.borrow().detached.is_empty());
    }

    #[test]
    fn gray_hex_keeps_hue() {
        let (mut picker, _rec) = controller(MemoryStore::new());
        picker.set_hue(120.0);
        picker.set_hex(HexColor::from_rgb(0x80, 0x80, 0x80));
        assert_eq!(picker.color().h(), 120.0);
        assert_eq!(picker.color().s(), 0.0);
        picker.set_hex(HexColor::from_rgb(0xff, 0x00, 0x00));
        assert_eq!(picker.color().h(), 0.0);
    }

    #[test]
    fn apply_persists_and_revert_restores() {
        let (mut picker, rec) = controller(MemoryStore::new().with_entry(
            constants::ACCENT_STORAGE_KEY,
            "#d4c273",
        ));
        let opened = picker.hex();
        assert_eq!(opened, HexColor::from_rgb(0xd4, 0xc2, 0x73));

        picker.set_hex(HexColor::from_rgb(0, 0, 255));
        picker.revert();
        assert_eq!(picker.hex(), opened);
        assert_eq!(rec.borrow().applied.last(), Some(&opened));

        picker.set_hex(HexColor::from_rgb(0, 0, 255));
        assert_eq!(picker.apply().unwrap(), HexColor::from_rgb(0, 0, 255));
        assert_eq!(picker.initial(), HexColor::from_rgb(0, 0, 255));
        assert_eq!(
            picker.store.get(constants::ACCENT_STORAGE_KEY).unwrap().as_deref(),
            Some("#0000ff")
        );
    }

    #[test]
    fn reset_selects_configured_default() {
        let (mut picker, _rec) = controller(MemoryStore::new());
        picker.set_hex(HexColor::from_rgb(0xff, 0, 0));
        picker.reset_to_default();
        assert_eq!(picker.hex(), constants::DEFAULT_ACCENT);
    }

    #[test]
    fn unchanged_hex_is_not_rebroadcast() {
        let (mut picker, rec) = controller(MemoryStore::new());
        let color = picker.color();
        picker.set_color(color);
        assert_eq!(rec.borrow().applied.len(), 1);
    }
}
