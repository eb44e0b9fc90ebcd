//! UI theme selection stored in each profile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BrowserError;

/// Color theme of the browser chrome.
///
/// Persisted as its display name (`"Light"`, `"Dark"`, `"Orange Juice"`).
/// Unrecognized names load as [`Theme::Light`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    OrangeJuice,
}

impl Theme {
    /// All themes in menu order.
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::OrangeJuice];

    /// Display name, also the persisted form.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::OrangeJuice => "Orange Juice",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = BrowserError;

    /// Case-insensitive; spaces, dashes and underscores are ignored so that
    /// `orange-juice` and `OrangeJuice` both resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "orangejuice" => Ok(Theme::OrangeJuice),
            _ => Err(BrowserError::Config(format!("unknown theme: {s}"))),
        }
    }
}

impl From<String> for Theme {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_else(|_| {
            log::warn!("Unknown theme {s:?} in profile, using Light");
            Theme::Light
        })
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.name().to_string()
    }
}
