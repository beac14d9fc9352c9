//! sRGB color parsing for CSS color values.
//!
//! The browser hands colors to the canvas as raw CSS strings, so the wasm host
//! never needs to parse them. Native surfaces do: [`Srgb::from_css`] accepts
//! the subset of CSS color syntax a stylesheet custom property realistically
//! carries (`#rgb`, `#rrggbb`, `rgb()`, `rgba()`).

use crate::error::FxError;
use serde::{Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"`. The hex round-trip has 8-bit
/// quantization, which is fine since CSS colors are 8-bit to begin with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    /// Builds a color from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Parses a hex color like `"#f6a623"`, `"f6a623"` or the shorthand `"#fa2"`.
    ///
    /// Returns `FxError::InvalidColor` for any other length or non-hex digits.
    pub fn from_hex(hex: &str) -> Result<Srgb, FxError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return Err(FxError::InvalidColor(format!("non-ascii hex color: {hex}")));
        }
        let channel = |s: &str, name: &str| {
            u8::from_str_radix(s, 16)
                .map_err(|e| FxError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        match hex.len() {
            6 => Ok(Srgb::from_u8(
                channel(&hex[0..2], "red")?,
                channel(&hex[2..4], "green")?,
                channel(&hex[4..6], "blue")?,
            )),
            3 => {
                // "#fa2" expands each digit: "#ffaa22"
                let r = channel(&hex[0..1], "red")?;
                let g = channel(&hex[1..2], "green")?;
                let b = channel(&hex[2..3], "blue")?;
                Ok(Srgb::from_u8(r * 17, g * 17, b * 17))
            }
            n => Err(FxError::InvalidColor(format!(
                "expected 3 or 6 hex digits, got {n}"
            ))),
        }
    }

    /// Parses a CSS color value: hex, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    ///
    /// Whitespace around the value is ignored. The alpha channel of `rgba()`
    /// is accepted but dropped; per-square alpha is computed by the simulator.
    pub fn from_css(value: &str) -> Result<Srgb, FxError> {
        let value = value.trim();
        if value.starts_with('#') {
            return Srgb::from_hex(value);
        }
        let lower = value.to_ascii_lowercase();
        let inner = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| FxError::InvalidColor(format!("unsupported color syntax: {value}")))?;

        let parts: Vec<&str> = inner
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(FxError::InvalidColor(format!(
                "expected 3 or 4 components, got {}",
                parts.len()
            )));
        }
        let mut rgb = [0u8; 3];
        for (slot, part) in rgb.iter_mut().zip(&parts) {
            let v: f64 = part
                .parse()
                .map_err(|_| FxError::InvalidColor(format!("invalid component: {part}")))?;
            *slot = v.round().clamp(0.0, 255.0) as u8;
        }
        Ok(Srgb::from_u8(rgb[0], rgb[1], rgb[2]))
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Quantizes to 8-bit channels with rounding.
    pub fn to_u8(self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
