//! Data models for accents and the presentation tokens derived from them.
//!
//! Models are independent of storage and of the observation mechanism.

pub mod accent;
pub mod palette;
pub mod rgb;

pub use accent::{AccentColor, DEFAULT_ACCENT};
pub use palette::{AccentPalette, LogoGradient};
pub use rgb::RgbColor;
