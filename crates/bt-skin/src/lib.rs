//! Theme palettes and the stylesheet applied to the browser chrome.
//!
//! Each [`Theme`](bt_types::theme::Theme) maps to a fixed [`Palette`]; the
//! `squared_buttons` profile flag picks the corner radius. [`stylesheet`]
//! renders both into the Qt-style sheet the window applies on every theme
//! change.

pub mod palette;
mod stylesheet;

pub use palette::{Color, Palette, parse_hex_color};
pub use stylesheet::{ChromeStyle, stylesheet};
