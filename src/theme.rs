//! Applying the live accent color to the host theme.

use std::collections::BTreeMap;

use floem::reactive::{RwSignal, SignalUpdate};

use crate::color::{HexColor, Hsb};
use crate::constants;
use crate::math;

/// Receives every accent change while the picker is open.
pub trait ThemeSink {
    fn apply_accent(&mut self, accent: HexColor);
}

impl<F> ThemeSink for F
where
    F: FnMut(HexColor),
{
    fn apply_accent(&mut self, accent: HexColor) {
        self(accent)
    }
}

/// Colors derived from a single accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentPalette {
    pub accent: HexColor,
    /// The accent darkened for hover states.
    pub hover: HexColor,
    /// Black or white, whichever reads better on the accent.
    pub foreground: HexColor,
}

impl AccentPalette {
    pub fn from_accent(accent: HexColor) -> Self {
        let hsb = Hsb::from_hex(accent);
        let hover = hsb.with_brightness(hsb.b() - constants::HOVER_DARKEN).to_hex();
        // Contrast against black beats contrast against white above this luminance.
        let foreground = if math::relative_luminance(accent.rgb()) > 0.179 {
            HexColor::from_rgb(0, 0, 0)
        } else {
            HexColor::from_rgb(255, 255, 255)
        };
        Self {
            accent,
            hover,
            foreground,
        }
    }

    /// CSS custom properties for this palette, in declaration order.
    pub fn css_properties(&self) -> [(&'static str, String); 4] {
        let [r, g, b] = self.accent.rgb();
        [
            ("--accent", self.accent.to_string()),
            ("--accent-rgb", format!("{r} {g} {b}")),
            ("--accent-hover", self.hover.to_string()),
            ("--accent-foreground", self.foreground.to_string()),
        ]
    }
}

impl Default for AccentPalette {
    fn default() -> Self {
        Self::from_accent(constants::DEFAULT_ACCENT)
    }
}

/// Publishes the palette through a signal so Floem styles re-run on change.
#[derive(Clone, Copy)]
pub struct SignalTheme(pub RwSignal<AccentPalette>);

impl ThemeSink for SignalTheme {
    fn apply_accent(&mut self, accent: HexColor) {
        self.0.set(AccentPalette::from_accent(accent));
    }
}

/// Accent custom properties for a stylesheet.
#[derive(Debug, Clone, Default)]
pub struct CssVariables {
    properties: BTreeMap<&'static str, String>,
}

impl CssVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Render as a single rule, e.g. `:root { --accent: #3b82f6; }`.
    pub fn to_css(&self, selector: &str) -> String {
        let mut css = format!("{selector} {{");
        for (name, value) in &self.properties {
            css.push_str(&format!(" {name}: {value};"));
        }
        css.push_str(" }");
        css
    }
}

impl ThemeSink for CssVariables {
    fn apply_accent(&mut self, accent: HexColor) {
        for (name, value) in AccentPalette::from_accent(accent).css_properties() {
            self.properties.insert(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_picks_readable_foreground() {
        let white = HexColor::from_rgb(255, 255, 255);
        let black = HexColor::from_rgb(0, 0, 0);
        assert_eq!(AccentPalette::from_accent(HexColor::from_rgb(0xfa, 0xcc, 0x15)).foreground, black);
        assert_eq!(AccentPalette::from_accent(HexColor::from_rgb(0x1e, 0x3a, 0x8a)).foreground, white);
    }

    #[test]
    fn hover_is_darker() {
        let palette = AccentPalette::default();
        let accent = Hsb::from_hex(palette.accent);
        let hover = Hsb::from_hex(palette.hover);
        assert!(hover.b() < accent.b());
        assert!((hover.h() - accent.h()).abs() < 1.0);
    }

    #[test]
    fn css_variables_render_rule() {
        let mut vars = CssVariables::new();
        vars.apply_accent(constants::DEFAULT_ACCENT);
        assert_eq!(vars.get("--accent"), Some("#3b82f6"));
        assert_eq!(vars.get("--accent-rgb"), Some("59 130 246"));
        let css = vars.to_css(":root");
        assert!(css.starts_with(":root {"));
        assert!(css.contains(" --accent: #3b82f6;"));
        assert!(css.ends_with(" }"));
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |hex: HexColor| seen.push(hex);
            sink.apply_accent(constants::DEFAULT_ACCENT);
        }
        assert_eq!(seen, vec![constants::DEFAULT_ACCENT]);
    }
}
