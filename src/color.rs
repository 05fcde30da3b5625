//! Public color types: [`Hsb`] for editing and [`HexColor`] for storage and
//! display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;
use crate::math;

/// A 24-bit RGB color written as six hex digits.
///
/// Equality compares the channel bytes, so parsing is case-insensitive.
/// Displays as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor([u8; 3]);

impl HexColor {
    /// Create from 0–255 RGB values.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// The RGB channels.
    pub const fn rgb(&self) -> [u8; 3] {
        self.0
    }

    /// Parse `rrggbb` or `rgb`, with or without a leading `#`.
    pub fn parse(hex: &str) -> Result<Self, ColorError> {
        let trimmed = hex.trim();
        let stripped = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(hex.to_string()));
        }
        // Every char is an ASCII hex digit here, so byte slicing is safe.
        let digit = |i: usize| u8::from_str_radix(&stripped[i..i + 1], 16);
        let pair = |i: usize| u8::from_str_radix(&stripped[i..i + 2], 16);
        let invalid = |_| ColorError::InvalidDigit(hex.to_string());
        match stripped.len() {
            3 => {
                let r = digit(0).map_err(invalid)?;
                let g = digit(1).map_err(invalid)?;
                let b = digit(2).map_err(invalid)?;
                Ok(Self([r * 17, g * 17, b * 17]))
            }
            6 => {
                let r = pair(0).map_err(invalid)?;
                let g = pair(2).map_err(invalid)?;
                let b = pair(4).map_err(invalid)?;
                Ok(Self([r, g, b]))
            }
            _ => Err(ColorError::InvalidLength(hex.to_string())),
        }
    }

    /// Format as six uppercase digits without `#`.
    pub fn to_upper_digits(&self) -> String {
        let [r, g, b] = self.0;
        format!("{r:02X}{g:02X}{b:02X}")
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.to_string()
    }
}

/// Hue / saturation / brightness.
///
/// Hue is in degrees and always wrapped into `[0, 360)`. Saturation and
/// brightness are percentages clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    h: f64,
    s: f64,
    b: f64,
}

impl Hsb {
    /// Create a color, wrapping the hue and clamping the percentages.
    pub fn new(h: f64, s: f64, b: f64) -> Self {
        Self {
            h: math::wrap_degrees(h),
            s: math::clamp_percent(s),
            b: math::clamp_percent(b),
        }
    }

    /// Hue in degrees, `[0, 360)`.
    pub fn h(&self) -> f64 {
        self.h
    }
    /// Saturation, `[0, 100]`.
    pub fn s(&self) -> f64 {
        self.s
    }
    /// Brightness, `[0, 100]`.
    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn with_hue(self, h: f64) -> Self {
        Self::new(h, self.s, self.b)
    }

    pub fn with_saturation(self, s: f64) -> Self {
        Self::new(self.h, s, self.b)
    }

    pub fn with_brightness(self, b: f64) -> Self {
        Self::new(self.h, self.s, b)
    }

    /// True when hue carries no information (gray or black).
    pub fn is_achromatic(&self) -> bool {
        self.s == 0.0 || self.b == 0.0
    }

    /// Convert to hex, rounding each channel to the nearest byte.
    pub fn to_hex(&self) -> HexColor {
        HexColor(math::hsb_to_rgb(self.h, self.s, self.b))
    }

    /// Convert from hex. Grays report hue 0.
    pub fn from_hex(hex: HexColor) -> Self {
        let (h, s, b) = math::rgb_to_hsb(hex.rgb());
        Self::new(h, s, b)
    }
}

impl From<HexColor> for Hsb {
    fn from(hex: HexColor) -> Self {
        Self::from_hex(hex)
    }
}

impl From<Hsb> for HexColor {
    fn from(hsb: Hsb) -> Self {
        hsb.to_hex()
    }
}
