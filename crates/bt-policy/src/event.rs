//! Navigation request descriptor passed from the UI to the policy.

use std::fmt;

/// Identifier of a browser tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A request to load `url` in `source_tab`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    pub url: String,
    /// `true` for user link clicks, `false` for programmatic loads such as
    /// the homepage, the URL bar, or back/forward.
    pub is_link_initiated: bool,
    pub source_tab: TabId,
}

impl NavigationEvent {
    pub fn link(url: &str, source_tab: TabId) -> Self {
        Self {
            url: url.to_string(),
            is_link_initiated: true,
            source_tab,
        }
    }

    pub fn programmatic(url: &str, source_tab: TabId) -> Self {
        Self {
            url: url.to_string(),
            is_link_initiated: false,
            source_tab,
        }
    }
}
