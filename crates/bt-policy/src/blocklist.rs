//! Ad and tracking host blocklist.

use url::Url;

/// Hosts blocked when a profile has ad blocking enabled.
pub const DEFAULT_AD_DOMAINS: &[&str] = &[
    "doubleclick.net",
    "adservice.google.com",
    "ads.twitter.com",
    "ads.facebook.com",
];

/// A list of host fragments matched by substring against a URL's host.
///
/// Substring matching is loose: `doubleclick.net` also matches
/// `notdoubleclick.network`. Entries are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdBlocklist {
    entries: Vec<String>,
}

impl Default for AdBlocklist {
    fn default() -> Self {
        Self::new(DEFAULT_AD_DOMAINS.iter().copied())
    }
}

impl AdBlocklist {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|e| e.as_ref().trim().to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The first entry contained in `host`, compared case-insensitively.
    pub fn match_host(&self, host: &str) -> Option<&str> {
        let host = host.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|entry| host.contains(entry.as_str()))
            .map(String::as_str)
    }

    /// The first entry matching the host of `url`. URLs that do not parse or
    /// have no host never match.
    pub fn match_url(&self, url: &str) -> Option<&str> {
        let host = host_of(url)?;
        self.match_host(&host)
    }
}

/// Lowercased host of an absolute URL.
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(str::to_ascii_lowercase)
}
