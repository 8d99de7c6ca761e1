//! Application-wide constants.
//!
//! This module defines the application name, the preference storage key and
//! the reveal timing policy shared by the library and the CLI.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Folio";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "folio";

/// Environment variable that overrides the platform config directory.
pub const CONFIG_DIR_ENV: &str = "FOLIO_CONFIG_DIR";

/// Preference storage key holding the accent variant name.
pub const ACCENT_STORAGE_KEY: &str = "accent";

/// Fraction of an element's area that must be visible before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Bottom root margin in pixels. Negative values pull the trigger line up
/// from the bottom edge of the viewport.
pub const REVEAL_ROOT_MARGIN_BOTTOM: f64 = -50.0;

/// Sections of the page that play an entrance animation.
pub const ANIMATED_SECTIONS: [&str; 3] = ["skills", "resume", "contact"];
