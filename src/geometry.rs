//! Pointer ↔ color mapping for the wheel and the brightness slider.
//!
//! Angles follow screen coordinates (y grows downward), so with the default
//! +90° hue offset hue 0 sits at the top of the wheel and hue grows
//! clockwise.

use floem::kurbo::{Point, Vec2};

use crate::constants;
use crate::math;

/// Result of mapping a pointer position onto the wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelPick {
    /// Hue in degrees, `[0, 360)`.
    pub hue: f64,
    /// Saturation in whole percent, `[0, 100]`.
    pub saturation: f64,
    /// The picked point in widget coordinates, pulled onto the rim when the
    /// pointer was outside it.
    pub point: Point,
    /// Whether the pointer was outside the usable radius.
    pub clamped: bool,
}

/// Geometry of a circular hue/saturation wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    center: Point,
    max_radius: f64,
    hue_offset: f64,
}

impl WheelGeometry {
    /// `visual_radius` is the drawn radius; the selectable radius is that minus
    /// `inset`, never negative.
    pub fn new(center: Point, visual_radius: f64, inset: f64, hue_offset: f64) -> Self {
        Self {
            center,
            max_radius: (visual_radius - inset).max(0.0),
            hue_offset,
        }
    }

    /// Wheel centered in a `width × height` widget, sized to the shorter side.
    pub fn for_size(width: f64, height: f64, inset: f64, hue_offset: f64) -> Self {
        let center = Point::new(width / 2.0, height / 2.0);
        Self::new(center, width.min(height) / 2.0, inset, hue_offset)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    pub fn hue_offset(&self) -> f64 {
        self.hue_offset
    }

    /// Hue and unrounded radius fraction for an offset from the center.
    ///
    /// The fraction may exceed 1.0 outside the rim.
    pub fn polar(&self, offset: Vec2) -> (f64, f64) {
        let hue = math::wrap_degrees(offset.atan2().to_degrees() + self.hue_offset);
        let fraction = if self.max_radius > 0.0 {
            offset.hypot() / self.max_radius
        } else {
            0.0
        };
        (hue, fraction)
    }

    /// Map an offset from the wheel center to hue and saturation.
    pub fn locate(&self, offset: Vec2) -> WheelPick {
        let distance = offset.hypot();
        let (hue, fraction) = self.polar(offset);
        if distance > self.max_radius {
            let on_rim = offset * (self.max_radius / distance);
            WheelPick {
                hue,
                saturation: 100.0,
                point: self.center + on_rim,
                clamped: true,
            }
        } else {
            WheelPick {
                hue,
                saturation: (fraction * 100.0).round().clamp(0.0, 100.0),
                point: self.center + offset,
                clamped: false,
            }
        }
    }

    /// Map a point in widget coordinates to hue and saturation.
    pub fn pick(&self, pos: Point) -> WheelPick {
        self.locate(pos - self.center)
    }

    /// Where the selection thumb sits for `hue` (degrees) and `saturation`
    /// (percent).
    pub fn thumb_position(&self, hue: f64, saturation: f64) -> Point {
        let angle = (hue - self.hue_offset).to_radians();
        let r = math::clamp_percent(saturation) / 100.0 * self.max_radius;
        Point::new(
            self.center.x + r * angle.cos(),
            self.center.y + r * angle.sin(),
        )
    }
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self::new(
            Point::ZERO,
            0.0,
            constants::WHEEL_INSET,
            constants::HUE_OFFSET_DEGREES,
        )
    }
}

/// Geometry of the horizontal brightness track: black on the left, full
/// brightness on the right.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SliderGeometry {
    width: f64,
}

impl SliderGeometry {
    pub fn new(width: f64) -> Self {
        Self {
            width: width.max(0.0),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Brightness in whole percent for an x offset from the left edge.
    pub fn brightness_at(&self, x: f64) -> f64 {
        if self.width <= 0.0 || !x.is_finite() {
            return 0.0;
        }
        (x.clamp(0.0, self.width) / self.width * 100.0).round()
    }

    /// X offset of the thumb for `brightness` (percent).
    pub fn position_of(&self, brightness: f64) -> f64 {
        math::clamp_percent(brightness) / 100.0 * self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn scenario_wheel() -> WheelGeometry {
        WheelGeometry::new(Point::new(100.0, 100.0), 100.0, 5.0, 90.0)
    }

    #[test]
    fn right_edge_is_hue_ninety() {
        let wheel = scenario_wheel();
        assert_eq!(wheel.max_radius(), 95.0);
        let pick = wheel.pick(Point::new(195.0, 100.0));
        assert_eq!(pick.saturation, 100.0);
        assert!((pick.hue - 90.0).abs() < EPS);
        assert!(!pick.clamped);
    }

    #[test]
    fn top_is_hue_zero() {
        let pick = scenario_wheel().pick(Point::new(100.0, 50.0));
        assert!(pick.hue.abs() < EPS);
        assert_eq!(pick.saturation, 53.0);
    }

    #[test]
    fn quadrants_go_clockwise() {
        let wheel = scenario_wheel();
        assert!((wheel.pick(Point::new(100.0, 150.0)).hue - 180.0).abs() < EPS);
        assert!((wheel.pick(Point::new(50.0, 100.0)).hue - 270.0).abs() < EPS);
    }

    #[test]
    fn outside_rim_clamps_to_full_saturation() {
        let wheel = scenario_wheel();
        let pick = wheel.pick(Point::new(100.0 + 300.0, 100.0 + 300.0));
        assert!(pick.clamped);
        assert_eq!(pick.saturation, 100.0);
        // 45° below the x axis in screen space, plus the offset.
        assert!((pick.hue - 135.0).abs() < EPS);
        let rim = pick.point - wheel.center();
        assert!((rim.hypot() - 95.0).abs() < EPS);
    }

    #[test]
    fn thumb_position_inverts_pick() {
        let wheel = scenario_wheel();
        for hue in [0.0, 17.5, 90.0, 180.0, 271.25, 359.0] {
            for sat in [0.0, 1.0, 33.0, 50.0, 99.0, 100.0] {
                let pos = wheel.thumb_position(hue, sat);
                let pick = wheel.pick(pos);
                assert!(!pick.clamped || sat == 100.0);
                assert_eq!(pick.saturation, sat, "sat for {hue},{sat}");
                if sat > 0.0 {
                    let d = (pick.hue - hue).abs();
                    assert!(d.min(360.0 - d) < 1e-6, "hue for {hue},{sat}: {}", pick.hue);
                }
            }
        }
    }

    #[test]
    fn center_is_deterministic() {
        let pick = scenario_wheel().pick(Point::new(100.0, 100.0));
        assert_eq!(pick.saturation, 0.0);
        assert!((pick.hue - 90.0).abs() < EPS);
    }

    #[test]
    fn configurable_offset_rotates_hue() {
        let wheel = WheelGeometry::new(Point::ZERO, 50.0, 0.0, 0.0);
        assert!(wheel.locate(Vec2::new(10.0, 0.0)).hue.abs() < EPS);
        assert!((wheel.locate(Vec2::new(0.0, -10.0)).hue - 270.0).abs() < EPS);
    }

    #[test]
    fn degenerate_radius_has_no_failure_mode() {
        let wheel = WheelGeometry::new(Point::ZERO, 3.0, 5.0, 90.0);
        assert_eq!(wheel.max_radius(), 0.0);
        assert_eq!(wheel.locate(Vec2::ZERO).saturation, 0.0);
        let outside = wheel.locate(Vec2::new(4.0, 0.0));
        assert_eq!(outside.saturation, 100.0);
        assert_eq!(outside.point, Point::ZERO);
    }

    #[test]
    fn for_size_uses_shorter_side() {
        let wheel = WheelGeometry::for_size(240.0, 200.0, 5.0, 90.0);
        assert_eq!(wheel.center(), Point::new(120.0, 100.0));
        assert_eq!(wheel.max_radius(), 95.0);
    }

    #[test]
    fn brightness_is_monotonic_with_fixed_ends() {
        let slider = SliderGeometry::new(200.0);
        assert_eq!(slider.brightness_at(0.0), 0.0);
        assert_eq!(slider.brightness_at(200.0), 100.0);
        assert_eq!(slider.brightness_at(-20.0), 0.0);
        assert_eq!(slider.brightness_at(250.0), 100.0);
        let mut last = 0.0;
        for step in 0..=400 {
            let b = slider.brightness_at(step as f64 * 0.5);
            assert!(b >= last);
            last = b;
        }
    }

    #[test]
    fn brightness_position_roundtrips() {
        let slider = SliderGeometry::new(173.0);
        for b in [0.0, 12.0, 50.0, 87.0, 100.0] {
            assert_eq!(slider.brightness_at(slider.position_of(b)), b);
        }
        assert_eq!(SliderGeometry::new(0.0).brightness_at(10.0), 0.0);
    }
}
