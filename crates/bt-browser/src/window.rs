//! The browser window: tabs, policy-gated navigation, and profile effects.

use std::collections::{HashMap, VecDeque};

use bt_policy::{LINK_REWARD, NavigationEvent, NavigationPolicy, TabId, Verdict};
use bt_profile::{ProfileSession, ProfileStore};
use bt_skin::{ChromeStyle, stylesheet};
use bt_types::error::{BrowserError, Result};

use crate::engine::{EngineEvent, WebEngine};
use crate::nav::NavigationController;

/// Turn URL-bar text into a loadable address: anything not starting with
/// `http` gets an `http://` prefix.
pub fn normalize_address(input: &str) -> String {
    let input = input.trim();
    if input.starts_with("http") {
        input.to_string()
    } else {
        format!("http://{input}")
    }
}

/// One open tab.
#[derive(Debug)]
pub struct Tab {
    pub id: TabId,
    /// Tab strip label; the page title once one is known.
    pub label: String,
    pub nav: NavigationController,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Traversal {
    New,
    Back,
    Forward,
    Reload,
}

/// An allowed navigation waiting for the engine to commit it.
#[derive(Debug, Clone)]
struct Pending {
    traversal: Traversal,
    reward: bool,
    record: bool,
}

/// A top-level browser window bound to one logged-in account.
pub struct BrowserWindow {
    session: ProfileSession,
    policy: NavigationPolicy,
    engine: Box<dyn WebEngine>,
    tabs: Vec<Tab>,
    active: usize,
    next_tab: u32,
    /// Allowed requests per tab, oldest first, awaiting their commits.
    pending: HashMap<TabId, VecDeque<Pending>>,
    blocked: u64,
    stylesheet: String,
    title_prefix: String,
}

impl BrowserWindow {
    /// Open a window for `session` with a single tab on the homepage.
    pub fn new(
        session: ProfileSession,
        policy: NavigationPolicy,
        engine: Box<dyn WebEngine>,
    ) -> Self {
        let mut window = Self {
            session,
            policy,
            engine,
            tabs: Vec::new(),
            active: 0,
            next_tab: 1,
            pending: HashMap::new(),
            blocked: 0,
            stylesheet: String::new(),
            title_prefix: "BT Browser".to_string(),
        };
        window.apply_styles();
        let home = window.homepage();
        window.add_tab(Some(&home), "Home");
        window
    }

    /// Window title: `<prefix> - <account>`.
    pub fn title(&self) -> String {
        format!("{} - {}", self.title_prefix, self.session.key())
    }

    pub fn set_title_prefix(&mut self, prefix: &str) {
        self.title_prefix = prefix.to_string();
    }

    pub fn session(&self) -> &ProfileSession {
        &self.session
    }

    pub fn policy(&self) -> &NavigationPolicy {
        &self.policy
    }

    pub fn homepage(&self) -> String {
        self.session.profile().homepage.clone()
    }

    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// Navigations blocked by the ad blocklist in this window.
    pub fn blocked_count(&self) -> u64 {
        self.blocked
    }

    fn apply_styles(&mut self) {
        let profile = self.session.profile();
        let style = ChromeStyle::new(profile.theme, profile.squared_buttons);
        self.stylesheet = stylesheet(&style);
        log::debug!("Applied {} theme", profile.theme);
    }

    // -- Tabs --

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.get(self.active)
    }

    fn active_id(&self) -> Result<TabId> {
        self.active_tab()
            .map(|t| t.id)
            .ok_or_else(|| BrowserError::Command("no open tab".to_string()))
    }

    fn tab_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    /// Open a tab, make it active, and load `url` (homepage when `None`).
    pub fn add_tab(&mut self, url: Option<&str>, label: &str) -> TabId {
        let id = TabId(self.next_tab);
        self.next_tab += 1;
        self.tabs.push(Tab {
            id,
            label: label.to_string(),
            nav: NavigationController::new(),
        });
        self.active = self.tabs.len() - 1;
        let url = url.map_or_else(|| self.homepage(), str::to_string);
        self.on_navigation_requested(&NavigationEvent::programmatic(&url, id));
        id
    }

    /// Close a tab. The last tab is never closed; it returns to the
    /// homepage instead.
    pub fn close_tab(&mut self, id: TabId) -> Result<()> {
        let index = self
            .tabs
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| BrowserError::Command(format!("no tab {id}")))?;
        if self.tabs.len() == 1 {
            let home = self.homepage();
            self.on_navigation_requested(&NavigationEvent::programmatic(&home, id));
            return Ok(());
        }
        self.tabs.remove(index);
        self.pending.remove(&id);
        self.engine.close(id);
        if self.active >= self.tabs.len() || self.active > index {
            self.active = self.active.saturating_sub(1);
        }
        Ok(())
    }

    /// Make the tab at `index` (0-based) active.
    pub fn switch_tab(&mut self, index: usize) -> Result<()> {
        if index >= self.tabs.len() {
            return Err(BrowserError::Command(format!(
                "tab index {} out of range (1-{})",
                index + 1,
                self.tabs.len()
            )));
        }
        self.active = index;
        Ok(())
    }

    /// URL-bar text to show: the active tab's current URL.
    pub fn address(&self) -> Option<&str> {
        self.active_tab().and_then(|t| t.nav.current_url())
    }

    // -- Navigation requests --

    /// Navigate the active tab to typed URL-bar text.
    pub fn navigate_address(&mut self, input: &str) -> Result<bool> {
        let tab = self.active_id()?;
        let url = normalize_address(input);
        Ok(self.on_navigation_requested(&NavigationEvent::programmatic(&url, tab)))
    }

    /// Follow a link clicked in the active tab.
    pub fn click_link(&mut self, url: &str) -> Result<bool> {
        let tab = self.active_id()?;
        Ok(self.on_navigation_requested(&NavigationEvent::link(url, tab)))
    }

    pub fn go_home(&mut self) -> Result<bool> {
        let tab = self.active_id()?;
        let home = self.homepage();
        Ok(self.on_navigation_requested(&NavigationEvent::programmatic(&home, tab)))
    }

    pub fn go_back(&mut self) -> Result<bool> {
        self.traverse(Traversal::Back)
    }

    pub fn go_forward(&mut self) -> Result<bool> {
        self.traverse(Traversal::Forward)
    }

    pub fn reload(&mut self) -> Result<bool> {
        self.traverse(Traversal::Reload)
    }

    fn traverse(&mut self, traversal: Traversal) -> Result<bool> {
        let tab = self.active_id()?;
        let nav = &self.tabs[self.active].nav;
        let target = match traversal {
            Traversal::Back => nav.back_target(),
            Traversal::Forward => nav.forward_target(),
            Traversal::Reload | Traversal::New => nav.current_url(),
        };
        let Some(url) = target.map(str::to_string) else {
            return Ok(false);
        };
        Ok(self.request(&NavigationEvent::programmatic(&url, tab), traversal))
    }

    /// The engine (or the UI) wants to load `event.url`. Returns whether the
    /// load was allowed; allowed loads are passed on to the engine.
    pub fn on_navigation_requested(&mut self, event: &NavigationEvent) -> bool {
        self.request(event, Traversal::New)
    }

    fn request(&mut self, event: &NavigationEvent, traversal: Traversal) -> bool {
        match self.policy.evaluate(event, self.session.profile()) {
            Verdict::Blocked { rule } => {
                self.blocked += 1;
                log::info!("Ad blocker stopped {} ({rule})", event.url);
                false
            },
            Verdict::Allowed { reward, record } => {
                self.pending
                    .entry(event.source_tab)
                    .or_default()
                    .push_back(Pending {
                        traversal,
                        reward,
                        record,
                    });
                self.engine.load(event.source_tab, &event.url);
                true
            },
        }
    }

    // -- Engine events --

    /// The engine committed `url` in `tab`: update the tab and apply the
    /// reward and history effects decided at request time.
    pub fn on_navigation_committed(&mut self, tab: TabId, url: &str) {
        // The engine commits a tab's loads in the order they were requested.
        let pending = self.pending.get_mut(&tab).and_then(VecDeque::pop_front);
        if self.pending.get(&tab).is_some_and(VecDeque::is_empty) {
            self.pending.remove(&tab);
        }
        let Some(t) = self.tab_mut(tab) else {
            log::debug!("Commit for closed tab {tab} ignored");
            return;
        };
        let traversal = pending.as_ref().map_or(Traversal::New, |p| p.traversal);
        match traversal {
            Traversal::New => t.nav.commit_new(url),
            Traversal::Reload => t.nav.commit_reload(url),
            // A commit that landed between the request and this one can move
            // the stacks; fall back to a plain commit if the target moved.
            Traversal::Back if t.nav.back_target() == Some(url) => {
                t.nav.commit_back();
            },
            Traversal::Forward if t.nav.forward_target() == Some(url) => {
                t.nav.commit_forward();
            },
            Traversal::Back | Traversal::Forward => t.nav.commit_new(url),
        }

        let Some(pending) = pending else {
            return;
        };
        if pending.reward {
            self.session.award_coins(LINK_REWARD);
        }
        if pending.record {
            self.session.record_history(url);
        }
    }

    pub fn on_title_changed(&mut self, tab: TabId, title: &str) {
        if let Some(t) = self.tab_mut(tab) {
            t.nav.update_title(title);
            t.label = title.to_string();
        }
    }

    pub fn on_icon_changed(&mut self, tab: TabId, icon: &str) {
        if let Some(t) = self.tab_mut(tab) {
            t.nav.update_icon(icon);
        }
    }

    /// Dispatch every event the engine has raised. Returns how many were
    /// handled.
    pub fn pump_events(&mut self) -> usize {
        let events = self.engine.poll_events();
        let count = events.len();
        for event in events {
            match event {
                EngineEvent::Committed { tab, url } => self.on_navigation_committed(tab, &url),
                EngineEvent::TitleChanged { tab, title } => self.on_title_changed(tab, &title),
                EngineEvent::IconChanged { tab, icon } => self.on_icon_changed(tab, &icon),
            }
        }
        count
    }

    // -- Profile --

    /// History, most recent first.
    pub fn history(&self) -> Vec<String> {
        self.session.history().map(str::to_string).collect()
    }

    pub fn remove_history(&mut self, url: &str) -> usize {
        self.session.remove_history(url)
    }

    pub fn clear_history(&mut self) -> usize {
        self.session.clear_history()
    }

    pub fn coins(&self) -> u64 {
        self.session.coins()
    }

    /// Change a setting and save it; restyles the chrome.
    pub fn update_setting(&mut self, key: &str, value: &str) -> Result<()> {
        self.session.update(|p| p.set(key, value))?;
        self.apply_styles();
        log::info!("Setting {key} updated");
        Ok(())
    }

    /// Status bar text: coin balance, clock, and the incognito marker.
    pub fn status_line(&self) -> String {
        let clock = chrono::Local::now().format("%H:%M:%S");
        let mut line = format!("Coins: {}  {clock}", self.session.coins());
        if self.session.profile().incognito {
            line.push_str("  Incognito");
        }
        line
    }

    /// Close the window and hand back the profile store.
    pub fn into_store(self) -> ProfileStore {
        self.session.into_store()
    }
}
