//! Presentation tokens derived from the active accent.
//!
//! Rendering code never branches on the accent itself; it asks for the
//! palette and applies the tokens. Class names follow Tailwind's utility
//! naming, with a `dark:` counterpart where the page needs one.

use serde::Serialize;

use super::{AccentColor, RgbColor};

/// Utility class tokens and colors for one accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccentPalette {
    /// Accent this palette was derived from
    pub accent: AccentColor,
    /// Accent text color
    pub text: &'static str,
    /// Text color on hover
    pub hover: &'static str,
    /// Text color when an enclosing group is hovered
    pub group_hover: &'static str,
    /// Filled button background with hover state
    pub bg: &'static str,
    /// Subtle accent border
    pub border: &'static str,
    /// Colored drop shadow
    pub glow: &'static str,
    /// Three-stop gradient used for the hero name
    pub gradient: &'static str,
    /// Translucent background for badges
    pub bg_light: &'static str,
    /// Swatch background in the accent switcher
    pub swatch: &'static str,
    /// Swatch color (Tailwind 500 shade)
    pub swatch_color: RgbColor,
    /// Logo gradient stops
    pub logo: LogoGradient,
}

/// Start and end stops of the logo gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogoGradient {
    /// Top-left stop
    pub start: RgbColor,
    /// Bottom-right stop
    pub end: RgbColor,
}

impl AccentPalette {
    /// Derives the palette for an accent.
    #[must_use]
    pub const fn for_accent(accent: AccentColor) -> Self {
        match accent {
            AccentColor::Indigo => Self {
                accent,
                text: "text-indigo-600 dark:text-indigo-400",
                hover: "hover:text-indigo-500 dark:hover:text-indigo-200",
                group_hover: "group-hover:text-indigo-700 dark:group-hover:text-indigo-200",
                bg: "bg-indigo-600 hover:bg-indigo-500",
                border: "border-indigo-500/20",
                glow: "shadow-indigo-600/30 dark:shadow-indigo-600/20",
                gradient: "from-indigo-600 via-purple-600 to-pink-600 dark:from-indigo-300 dark:via-purple-300 dark:to-pink-300",
                bg_light: "bg-indigo-500/10",
                swatch: "bg-indigo-500",
                swatch_color: RgbColor::new(0x63, 0x66, 0xF1),
                logo: LogoGradient {
                    start: RgbColor::new(0x4F, 0x46, 0xE5),
                    end: RgbColor::new(0x93, 0x33, 0xEA),
                },
            },
            AccentColor::Emerald => Self {
                accent,
                text: "text-emerald-600 dark:text-emerald-400",
                hover: "hover:text-emerald-500 dark:hover:text-emerald-200",
                group_hover: "group-hover:text-emerald-700 dark:group-hover:text-emerald-200",
                bg: "bg-emerald-600 hover:bg-emerald-500",
                border: "border-emerald-500/20",
                glow: "shadow-emerald-600/30 dark:shadow-emerald-600/20",
                gradient: "from-emerald-600 via-teal-600 to-cyan-600 dark:from-emerald-300 dark:via-teal-300 dark:to-cyan-300",
                bg_light: "bg-emerald-500/10",
                swatch: "bg-emerald-500",
                swatch_color: RgbColor::new(0x10, 0xB9, 0x81),
                logo: LogoGradient {
                    start: RgbColor::new(0x05, 0x96, 0x69),
                    end: RgbColor::new(0x06, 0xB6, 0xD4),
                },
            },
            AccentColor::Rose => Self {
                accent,
                text: "text-rose-600 dark:text-rose-400",
                hover: "hover:text-rose-500 dark:hover:text-rose-200",
                group_hover: "group-hover:text-rose-700 dark:group-hover:text-rose-200",
                bg: "bg-rose-600 hover:bg-rose-500",
                border: "border-rose-500/20",
                glow: "shadow-rose-600/30 dark:shadow-rose-600/20",
                gradient: "from-rose-600 via-orange-600 to-amber-600 dark:from-rose-300 dark:via-orange-300 dark:to-amber-300",
                bg_light: "bg-rose-500/10",
                swatch: "bg-rose-500",
                swatch_color: RgbColor::new(0xF4, 0x3F, 0x5E),
                logo: LogoGradient {
                    start: RgbColor::new(0xE1, 0x1D, 0x48),
                    end: RgbColor::new(0xF5, 0x9E, 0x0B),
                },
            },
            AccentColor::Cyan => Self {
                accent,
                text: "text-cyan-600 dark:text-cyan-400",
                hover: "hover:text-cyan-500 dark:hover:text-cyan-200",
                group_hover: "group-hover:text-cyan-700 dark:group-hover:text-cyan-200",
                bg: "bg-cyan-600 hover:bg-cyan-500",
                border: "border-cyan-500/20",
                glow: "shadow-cyan-600/30 dark:shadow-cyan-600/20",
                gradient: "from-cyan-600 via-blue-600 to-indigo-600 dark:from-cyan-300 dark:via-blue-300 dark:to-indigo-300",
                bg_light: "bg-cyan-500/10",
                swatch: "bg-cyan-500",
                swatch_color: RgbColor::new(0x06, 0xB6, 0xD4),
                logo: LogoGradient {
                    start: RgbColor::new(0x08, 0x91, 0xB2),
                    end: RgbColor::new(0x4F, 0x46, 0xE5),
                },
            },
            AccentColor::Orange => Self {
                accent,
                text: "text-orange-600 dark:text-orange-400",
                hover: "hover:text-orange-500 dark:hover:text-orange-200",
                group_hover: "group-hover:text-orange-700 dark:group-hover:text-orange-200",
                bg: "bg-orange-600 hover:bg-orange-500",
                border: "border-orange-500/20",
                glow: "shadow-orange-600/30 dark:shadow-orange-600/20",
                gradient: "from-orange-600 via-amber-600 to-yellow-600 dark:from-orange-300 dark:via-amber-300 dark:to-yellow-300",
                bg_light: "bg-orange-500/10",
                swatch: "bg-orange-500",
                swatch_color: RgbColor::new(0xF9, 0x73, 0x16),
                logo: LogoGradient {
                    start: RgbColor::new(0xF9, 0x73, 0x16),
                    end: RgbColor::new(0xFB, 0xBF, 0x24),
                },
            },
        }
    }

    /// Underline background for nav items: the first token of `bg`.
    #[must_use]
    pub fn underline(&self) -> &'static str {
        self.bg.split(' ').next().unwrap_or(self.bg)
    }
}

impl From<AccentColor> for AccentPalette {
    fn from(accent: AccentColor) -> Self {
        Self::for_accent(accent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_token_mentions_its_accent() {
        for &accent in AccentColor::all() {
            let palette = AccentPalette::for_accent(accent);
            let name = accent.name();
            assert_eq!(palette.accent, accent);
            for token in [
                palette.text,
                palette.hover,
                palette.group_hover,
                palette.bg,
                palette.border,
                palette.glow,
                palette.gradient,
                palette.bg_light,
                palette.swatch,
            ] {
                assert!(token.contains(name), "{token} should reference {name}");
            }
        }
    }

    #[test]
    fn test_logo_gradient_stops() {
        let orange = AccentPalette::for_accent(AccentColor::Orange);
        assert_eq!(orange.logo.start.to_hex(), "#F97316");
        assert_eq!(orange.logo.end.to_hex(), "#FBBF24");

        let cyan = AccentPalette::from(AccentColor::Cyan);
        assert_eq!(cyan.logo.start.to_hex(), "#0891B2");
        assert_eq!(cyan.logo.end.to_hex(), "#4F46E5");
    }

    #[test]
    fn test_underline_is_first_bg_token() {
        let rose = AccentPalette::for_accent(AccentColor::Rose);
        assert_eq!(rose.underline(), "bg-rose-600");
    }

    #[test]
    fn test_palettes_are_distinct() {
        let palettes: Vec<AccentPalette> = AccentColor::all()
            .iter()
            .map(|&a| AccentPalette::for_accent(a))
            .collect();
        for (i, a) in palettes.iter().enumerate() {
            for b in &palettes[i + 1..] {
                assert_ne!(a.logo, b.logo);
                assert_ne!(a.text, b.text);
            }
        }
    }
}
