//! The profile schema and its default-merging rules.

use bt_types::error::{BrowserError, Result};
use bt_types::theme::Theme;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved account that always exists and can never be deleted.
pub const GUEST: &str = "Guest";

/// Homepage of a freshly created profile.
pub const DEFAULT_HOMEPAGE: &str = "https://www.google.com";

/// Persisted configuration and accumulated state of one account.
///
/// Field names are the on-disk JSON keys. Keys this version does not know
/// about are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub username: String,
    /// Plaintext; empty means the account has no password.
    pub password: String,
    pub homepage: String,
    pub theme: Theme,
    pub squared_buttons: bool,
    pub show_bookmarks_tab: bool,
    pub show_calendar_tab: bool,
    pub adblock_enabled: bool,
    pub auto_accept_cookies: bool,
    pub coins: u64,
    /// Chronological, oldest first.
    pub history: Vec<String>,
    pub bookmarks: Vec<String>,
    pub incognito: bool,
    pub debug_mode: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Stored theme name this version does not know. The chrome falls back
    /// to [`Theme::Light`], but the name is written back until a theme is set.
    #[serde(skip)]
    pub unknown_theme: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            username: GUEST.to_string(),
            password: String::new(),
            homepage: DEFAULT_HOMEPAGE.to_string(),
            theme: Theme::Light,
            squared_buttons: true,
            show_bookmarks_tab: true,
            show_calendar_tab: true,
            adblock_enabled: true,
            auto_accept_cookies: true,
            coins: 0,
            history: Vec::new(),
            bookmarks: Vec::new(),
            incognito: false,
            debug_mode: false,
            extra: Map::new(),
            unknown_theme: None,
        }
    }
}

/// Keys editable through [`Profile::set`]. History, bookmarks and coins are
/// only changed through their ledgers.
pub const SETTING_KEYS: &[&str] = &[
    "homepage",
    "username",
    "password",
    "theme",
    "squared_buttons",
    "show_bookmarks_tab",
    "show_calendar_tab",
    "adblock_enabled",
    "auto_accept_cookies",
    "incognito",
    "debug_mode",
];

impl Profile {
    /// Default profile for a new account.
    pub fn for_user(username: &str) -> Self {
        Self {
            username: username.to_string(),
            ..Self::default()
        }
    }

    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }

    /// Plaintext comparison. Accounts without a password accept anything.
    pub fn check_password(&self, attempt: Option<&str>) -> bool {
        !self.has_password() || attempt == Some(self.password.as_str())
    }

    /// Build a profile from a parsed JSON document, backfilling absent keys
    /// from the defaults. Present keys always win; a key whose value has the
    /// wrong type is reset to its default and the rest of the document is
    /// kept. Anything that is not a JSON object yields the defaults.
    pub fn from_json_value(value: Value) -> Self {
        let Value::Object(data) = value else {
            log::warn!("Profile document is not a JSON object, using defaults");
            return Self::default();
        };

        let unknown_theme = data
            .get("theme")
            .and_then(Value::as_str)
            .filter(|name| name.parse::<Theme>().is_err())
            .map(str::to_string);

        let mut merged = default_object();
        merged.extend(data.clone());
        let mut profile = match serde_json::from_value(Value::Object(merged)) {
            Ok(profile) => profile,
            Err(e) => {
                log::warn!("Profile has mistyped keys ({e}), repairing");
                repair(data)
            },
        };
        profile.unknown_theme = unknown_theme;
        profile
    }

    /// Parse profile JSON text. See [`Profile::from_json_value`].
    pub fn from_json(text: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(text)?;
        Ok(Self::from_json_value(value))
    }

    /// Pretty-printed JSON document for storage.
    pub fn to_json(&self) -> Result<String> {
        let Some(raw) = &self.unknown_theme else {
            return Ok(serde_json::to_string_pretty(self)?);
        };
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            map.insert("theme".to_string(), Value::String(raw.clone()));
        }
        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Change one setting from its textual form, as typed in a settings
    /// dialog or command line.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<()> {
        let flag = || parse_bool(key, raw);
        match key {
            "homepage" => self.homepage = raw.to_string(),
            "username" => self.username = raw.to_string(),
            "password" => self.password = raw.to_string(),
            "theme" => {
                self.theme = raw.parse()?;
                self.unknown_theme = None;
            },
            "squared_buttons" => self.squared_buttons = flag()?,
            "show_bookmarks_tab" => self.show_bookmarks_tab = flag()?,
            "show_calendar_tab" => self.show_calendar_tab = flag()?,
            "adblock_enabled" => self.adblock_enabled = flag()?,
            "auto_accept_cookies" => self.auto_accept_cookies = flag()?,
            "incognito" => self.incognito = flag()?,
            "debug_mode" => self.debug_mode = flag()?,
            _ => {
                return Err(BrowserError::Config(format!(
                    "unknown setting {key:?} (expected one of: {})",
                    SETTING_KEYS.join(", ")
                )));
            },
        }
        Ok(())
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(BrowserError::Config(format!(
            "{key} expects true/false, got {raw:?}"
        ))),
    }
}

fn default_object() -> Map<String, Value> {
    match serde_json::to_value(Profile::default()) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Keep each key of `data` that deserializes on its own against the
/// defaults; reset the others.
fn repair(data: Map<String, Value>) -> Profile {
    let defaults = default_object();
    let mut repaired = defaults.clone();
    for (key, value) in data {
        let mut candidate = defaults.clone();
        candidate.insert(key.clone(), value.clone());
        if serde_json::from_value::<Profile>(Value::Object(candidate)).is_ok() {
            repaired.insert(key, value);
        } else {
            log::warn!("Resetting profile key {key:?} to its default");
        }
    }
    serde_json::from_value(Value::Object(repaired)).unwrap_or_default()
}
