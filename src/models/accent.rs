//! Accent color variants.
//!
//! The accent is the one user preference the site keeps: a closed set of five
//! named color themes applied uniformly across the page.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five accent themes.
///
/// The lowercase variant name is the persisted representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    /// Indigo to pink gradient
    Indigo,
    /// Emerald to cyan gradient
    Emerald,
    /// Rose to amber gradient
    Rose,
    /// Cyan to indigo gradient
    Cyan,
    /// Orange to yellow gradient
    Orange,
}

/// Accent used when nothing valid has been stored.
pub const DEFAULT_ACCENT: AccentColor = AccentColor::Orange;

impl AccentColor {
    /// Returns all variants in swatch order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Indigo,
            Self::Emerald,
            Self::Rose,
            Self::Cyan,
            Self::Orange,
        ]
    }

    /// Returns the persisted name of the variant.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Indigo => "indigo",
            Self::Emerald => "emerald",
            Self::Rose => "rose",
            Self::Cyan => "cyan",
            Self::Orange => "orange",
        }
    }

    /// Returns the human-readable label shown next to a swatch.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Indigo => "Indigo",
            Self::Emerald => "Emerald",
            Self::Rose => "Rose",
            Self::Cyan => "Cyan",
            Self::Orange => "Orange",
        }
    }

    /// Parses a stored value, treating anything outside the closed set as absent.
    ///
    /// Matching is exact apart from surrounding whitespace, the same way the
    /// browser compares the raw string it reads back.
    #[must_use]
    pub fn from_stored(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::all().iter().copied().find(|accent| accent.name() == value)
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for AccentColor {
    type Err = anyhow::Error;

    /// Parses user input case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::from_stored(&lowered).ok_or_else(|| {
            let valid: Vec<&str> = Self::all().iter().map(|a| a.name()).collect();
            anyhow::anyhow!(
                "Invalid accent '{}'. Must be one of: {}",
                s.trim(),
                valid.join(", ")
            )
        })
    }
}

impl Default for AccentColor {
    fn default() -> Self {
        DEFAULT_ACCENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_in_swatch_order() {
        let names: Vec<&str> = AccentColor::all().iter().map(|a| a.name()).collect();
        assert_eq!(names, ["indigo", "emerald", "rose", "cyan", "orange"]);
    }

    #[test]
    fn test_default_is_orange() {
        assert_eq!(AccentColor::default(), AccentColor::Orange);
    }

    #[test]
    fn test_from_stored_exact() {
        assert_eq!(AccentColor::from_stored("cyan"), Some(AccentColor::Cyan));
        assert_eq!(AccentColor::from_stored(" rose\n"), Some(AccentColor::Rose));
        assert_eq!(AccentColor::from_stored("Cyan"), None);
        assert_eq!(AccentColor::from_stored("purple"), None);
        assert_eq!(AccentColor::from_stored(""), None);
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("EMERALD".parse::<AccentColor>().unwrap(), AccentColor::Emerald);
        assert_eq!(" indigo ".parse::<AccentColor>().unwrap(), AccentColor::Indigo);

        let err = "teal".parse::<AccentColor>().unwrap_err();
        assert!(err.to_string().contains("indigo, emerald, rose, cyan, orange"));
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&AccentColor::Emerald).unwrap();
        assert_eq!(json, "\"emerald\"");

        let parsed: AccentColor = serde_json::from_str("\"rose\"").unwrap();
        assert_eq!(parsed, AccentColor::Rose);
    }

    #[test]
    fn test_display_matches_name() {
        for accent in AccentColor::all() {
            assert_eq!(accent.to_string(), accent.name());
        }
    }
}
