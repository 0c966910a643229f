//! Color parsing and adjustment helpers.
//!
//! Customization values carry colors as 6-digit RGB hex strings. This module
//! parses them into [`Color`] and provides the brightness and lightness
//! helpers the shape strategies draw with.

use image::Rgba;
use palette::{Hsl, IntoColor, Srgb};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#RRGGBB` hex string (case-insensitive, `#` optional).
    ///
    /// Returns `None` for anything that is not exactly six hex digits.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
        Some(Self::new(r, g, b))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Scales every channel by `percent` (e.g. `-10.0` darkens by 10%),
    /// clamping the result to the 0-255 range.
    pub fn adjust_brightness(self, percent: f32) -> Self {
        let factor = 1.0 + percent / 100.0;
        let scale = |c: u8| ((c as f32) * factor).round().clamp(0.0, 255.0) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Darkens the color by reducing its HSL lightness.
    pub fn darken(self, amount: f32) -> Self {
        self.shift_lightness(-amount)
    }

    /// Lightens the color by raising its HSL lightness.
    pub fn lighten(self, amount: f32) -> Self {
        self.shift_lightness(amount)
    }

    fn shift_lightness(self, amount: f32) -> Self {
        let rgb = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        );
        let mut hsl: Hsl = rgb.into_color();
        hsl.lightness = (hsl.lightness + amount).clamp(0.0, 1.0);
        let shifted: Srgb = hsl.into_color();
        Self::new(
            (shifted.red * 255.0).round() as u8,
            (shifted.green * 255.0).round() as u8,
            (shifted.blue * 255.0).round() as u8,
        )
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }

    pub fn with_alpha(self, alpha: u8) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, alpha])
    }
}
