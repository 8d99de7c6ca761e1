//! RGB color handling for accent swatches and gradient stops.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]

use serde::Serialize;
use std::fmt;

/// RGB color value with hex string representation.
///
/// Used for the logo gradient stops of each accent and for the colored
/// swatches printed by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Converts the color to a crossterm color for plain terminal output.
    #[must_use]
    pub const fn to_crossterm_color(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex_is_uppercase() {
        let color = RgbColor::new(249, 115, 22);
        assert_eq!(color.to_hex(), "#F97316");
        assert_eq!(color.to_string(), "#F97316");
    }

    #[test]
    fn test_to_crossterm_color() {
        let color = RgbColor::new(8, 145, 178);
        assert_eq!(
            color.to_crossterm_color(),
            crossterm::style::Color::Rgb {
                r: 8,
                g: 145,
                b: 178
            }
        );
    }
}
