//! RGB color handling with hex parsing, HSL conversion and serialization.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
// Allow intentional type casts for color math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
// Allow float comparisons in HSL conversion (standard algorithm)
#![allow(clippy::float_cmp)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color value with hex string representation.
///
/// Serialized as a `#RRGGBB` string so brand records stay readable. Parsing
/// is strict: exactly six hex digits with an optional leading `#`, no alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

/// A color in HSL space with integer components, as used by CSS variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hsl {
    /// Hue in degrees (0-360)
    pub h: u16,
    /// Saturation percentage (0-100)
    pub s: u8,
    /// Lightness percentage (0-100)
    pub l: u8,
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}% {}%", self.h, self.s, self.l)
    }
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#rrggbb", "rrggbb"
    ///
    /// # Examples
    ///
    /// ```
    /// use tradeforge::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 0, 0));
    ///
    /// let color = RgbColor::from_hex("3b82f6").unwrap();
    /// assert_eq!(color, RgbColor::new(59, 130, 246));
    ///
    /// assert!(RgbColor::from_hex("#fff").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("Invalid hex color format '{hex}'. Expected 6 hex digits (RRGGBB)");
        }

        let r = u8::from_str_radix(&hex[0..2], 16)
            .context(format!("Invalid red channel in hex color '{hex}'"))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .context(format!("Invalid green channel in hex color '{hex}'"))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .context(format!("Invalid blue channel in hex color '{hex}'"))?;

        Ok(Self::new(r, g, b))
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    ///
    /// # Examples
    ///
    /// ```
    /// use tradeforge::models::RgbColor;
    ///
    /// let color = RgbColor::new(0, 128, 255);
    /// assert_eq!(color.to_hex(), "#0080FF");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Converts the color to HSL using the min/max channel derivation.
    ///
    /// Each component is rounded to the nearest integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradeforge::models::RgbColor;
    ///
    /// let blue = RgbColor::from_hex("#3b82f6").unwrap();
    /// assert_eq!(blue.to_hsl().to_string(), "217 91% 60%");
    /// ```
    #[must_use]
    #[allow(clippy::many_single_char_names)] // Standard RGB/HSL color model uses single-char names
    pub fn to_hsl(&self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        let (h, s) = if max == min {
            (0.0, 0.0)
        } else {
            let d = max - min;
            let s = if l > 0.5 {
                d / (2.0 - max - min)
            } else {
                d / (max + min)
            };
            let h = if max == r {
                (g - b) / d + if g < b { 6.0 } else { 0.0 }
            } else if max == g {
                (b - r) / d + 2.0
            } else {
                (r - g) / d + 4.0
            };
            (h / 6.0, s)
        };

        Hsl {
            h: (h * 360.0).round() as u16,
            s: (s * 100.0).round() as u8,
            l: (l * 100.0).round() as u8,
        }
    }

    /// Returns true for colors dark enough to need light foreground text.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.to_hsl().l < 25
    }
}

/// Converts a hex color string to the CSS `"{h} {s}% {l}%"` triple.
///
/// # Errors
///
/// Returns an error if `hex` is not a 6-digit hex color.
pub fn hex_to_hsl(hex: &str) -> Result<String> {
    Ok(RgbColor::from_hex(hex)?.to_hsl().to_string())
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for RgbColor {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_with_hash() {
        let color = RgbColor::from_hex("#FF8000").unwrap();
        assert_eq!(color, RgbColor::new(255, 128, 0));
    }

    #[test]
    fn test_from_hex_lowercase_without_hash() {
        let color = RgbColor::from_hex("1e293b").unwrap();
        assert_eq!(color, RgbColor::new(0x1e, 0x29, 0x3b));
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(RgbColor::from_hex("#FFF").is_err());
        assert!(RgbColor::from_hex("#FFFFFFFF").is_err());
        assert!(RgbColor::from_hex("#GG0000").is_err());
        assert!(RgbColor::from_hex("").is_err());
        assert!(RgbColor::from_hex("#ééé").is_err());
        // from_str_radix alone would accept a sign per channel
        assert!(RgbColor::from_hex("#+f+f+f").is_err());
        assert!(hex_to_hsl("+f+f+f").is_err());
    }

    #[test]
    fn test_hex_to_hsl_reference_values() {
        assert_eq!(hex_to_hsl("#000000").unwrap(), "0 0% 0%");
        assert_eq!(hex_to_hsl("#ffffff").unwrap(), "0 0% 100%");
        assert_eq!(hex_to_hsl("#ff0000").unwrap(), "0 100% 50%");
        assert_eq!(hex_to_hsl("#3b82f6").unwrap(), "217 91% 60%");
    }

    #[test]
    fn test_hex_to_hsl_other_hues() {
        assert_eq!(hex_to_hsl("#00ff00").unwrap(), "120 100% 50%");
        assert_eq!(hex_to_hsl("#0000ff").unwrap(), "240 100% 50%");
        assert_eq!(hex_to_hsl("#808080").unwrap(), "0 0% 50%");
    }

    #[test]
    fn test_hex_to_hsl_invalid() {
        assert!(hex_to_hsl("blue").is_err());
    }

    #[test]
    fn test_is_dark() {
        assert!(RgbColor::from_hex("#0F0F1A").unwrap().is_dark());
        assert!(!RgbColor::from_hex("#FFFFFF").unwrap().is_dark());
        assert!(!RgbColor::from_hex("#F5F5F5").unwrap().is_dark());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let color = RgbColor::new(0, 102, 255);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#0066FF\"");

        let parsed: RgbColor = serde_json::from_str("\"#0066ff\"").unwrap();
        assert_eq!(parsed, color);

        assert!(serde_json::from_str::<RgbColor>("\"red\"").is_err());
    }
}
