//! Color parsing and the engine's hexadecimal color literal.
//!
//! Editor colors arrive as CSS-ish strings (`#rrggbb`, `#rgb`,
//! `rgb(r, g, b)`, `transparent`). The renderer wants `0xrrggbb`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A fill: either a solid color or nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Paint {
    Solid(Color),
    Transparent,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a color string. Returns `None` for `transparent` and for
    /// anything unrecognized; callers substitute their own default.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return parse_hex(hex);
        }

        let lower = s.to_ascii_lowercase();
        let body = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))?
            .strip_suffix(')')?;

        let mut channels = body.split(',').map(|part| part.trim().parse::<f64>().ok());
        let r = channels.next()??;
        let g = channels.next()??;
        let b = channels.next()??;
        Some(Self::rgb(channel(r), channel(g), channel(b)))
    }
}

impl Paint {
    /// Parse a fill color. `transparent` is a valid paint, unlike in
    /// [`Color::parse`].
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().eq_ignore_ascii_case("transparent") {
            return Some(Paint::Transparent);
        }
        Color::parse(raw).map(Paint::Solid)
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Paint::Solid(color) => Some(color),
            Paint::Transparent => None,
        }
    }
}

/// Renders the engine-native literal, e.g. `0xff0000`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(Color::rgb(
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 0x11);
            Some(Color::rgb(nibble(0).ok()?, nibble(1).ok()?, nibble(2).ok()?))
        }
        _ => None,
    }
}

fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
