//! Color math in picker units: hue in degrees, saturation and brightness in
//! percent, channels as 0–255 bytes.

/// Wrap an angle in degrees into `[0, 360)`.
pub(crate) fn wrap_degrees(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Clamp a percentage into `[0, 100]`.
pub(crate) fn clamp_percent(pct: f64) -> f64 {
    if pct.is_finite() {
        pct.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Scale a normalized channel to a byte, rounding to nearest.
fn to_byte(c: f64) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

/// HSB → RGB bytes. `h` in degrees, `s` and `b` in percent.
pub(crate) fn hsb_to_rgb(h: f64, s: f64, b: f64) -> [u8; 3] {
    let s = clamp_percent(s) / 100.0;
    let v = clamp_percent(b) / 100.0;
    if s == 0.0 {
        let c = to_byte(v);
        return [c, c, c];
    }
    let h60 = wrap_degrees(h) / 60.0;
    let sector = h60.floor();
    let f = h60 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, bl) = match (sector as u32) % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [to_byte(r), to_byte(g), to_byte(bl)]
}

/// RGB bytes → HSB. Returns `(h, s, b)` with `h` in `[0, 360)` and `s`, `b`
/// in percent. Grays report hue 0.
pub(crate) fn rgb_to_hsb(rgb: [u8; 3]) -> (f64, f64, f64) {
    let [r, g, b] = rgb.map(|c| c as f64 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max == 0.0 { 0.0 } else { delta / max };

    let sector = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    (wrap_degrees(sector * 60.0), s * 100.0, max * 100.0)
}

/// WCAG relative luminance of an sRGB color, 0.0–1.0.
pub(crate) fn relative_luminance(rgb: [u8; 3]) -> f64 {
    let [r, g, b] = rgb.map(|c| {
        let c = c as f64 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * r + 0.7152 * g + 0.0722 * b
}
