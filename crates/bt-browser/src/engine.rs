//! Boundary to the web engine that actually fetches and renders pages.

use std::collections::VecDeque;

use bt_policy::TabId;
use url::Url;

/// Lifecycle events raised by the engine for a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The page at `url` replaced the tab's previous content.
    Committed { tab: TabId, url: String },
    TitleChanged { tab: TabId, title: String },
    IconChanged { tab: TabId, icon: String },
}

/// The rendering engine as seen by the window: it is told what to load and
/// reports back through [`EngineEvent`]s.
pub trait WebEngine {
    /// Start loading `url` in `tab`.
    fn load(&mut self, tab: TabId, url: &str);

    /// Release anything held for a closed tab.
    fn close(&mut self, _tab: TabId) {}

    /// Drain events raised since the last poll.
    fn poll_events(&mut self) -> Vec<EngineEvent>;
}

/// Engine without rendering. Every load commits at once and reports the URL
/// host as the page title and `/favicon.ico` as the icon. Used by the
/// terminal front end and in tests.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    events: VecDeque<EngineEvent>,
    loads: Vec<(TabId, String)>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every load requested so far, oldest first.
    pub fn loads(&self) -> &[(TabId, String)] {
        &self.loads
    }
}

impl WebEngine for HeadlessEngine {
    fn load(&mut self, tab: TabId, url: &str) {
        log::debug!("Headless load in tab {tab}: {url}");
        self.loads.push((tab, url.to_string()));
        self.events.push_back(EngineEvent::Committed {
            tab,
            url: url.to_string(),
        });
        if let Ok(parsed) = Url::parse(url)
            && let Some(host) = parsed.host_str()
        {
            self.events.push_back(EngineEvent::TitleChanged {
                tab,
                title: host.to_string(),
            });
            if let Ok(icon) = parsed.join("/favicon.ico") {
                self.events.push_back(EngineEvent::IconChanged {
                    tab,
                    icon: icon.to_string(),
                });
            }
        }
    }

    fn close(&mut self, tab: TabId) {
        self.events.retain(|event| match event {
            EngineEvent::Committed { tab: t, .. }
            | EngineEvent::TitleChanged { tab: t, .. }
            | EngineEvent::IconChanged { tab: t, .. } => *t != tab,
        });
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain(..).collect()
    }
}
