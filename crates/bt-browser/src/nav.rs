//! Per-tab navigation controller: back/forward stacks and page metadata.

/// A page shown in a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    pub url: String,
    pub title: String,
    /// Favicon reference as reported by the engine (URL or data URI).
    pub icon: Option<String>,
}

impl PageEntry {
    fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: String::new(),
            icon: None,
        }
    }
}

/// Session history of one tab.
///
/// Traversal is two-phase so the policy and the engine sit in between:
/// `back_target` / `forward_target` tell the window which URL to request,
/// and `commit_back` / `commit_forward` move the stacks once the engine
/// reports the page committed.
#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    back_stack: Vec<PageEntry>,
    forward_stack: Vec<PageEntry>,
    current: Option<PageEntry>,
}

impl NavigationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new page committed: push the current one onto the back stack and
    /// clear the forward stack.
    pub fn commit_new(&mut self, url: &str) {
        if let Some(entry) = self.current.take() {
            self.back_stack.push(entry);
        }
        self.forward_stack.clear();
        self.current = Some(PageEntry::new(url));
    }

    /// The current page reloaded, possibly landing on a different URL.
    pub fn commit_reload(&mut self, url: &str) {
        match self.current.as_mut() {
            Some(entry) if entry.url == url => {},
            Some(entry) => *entry = PageEntry::new(url),
            None => self.current = Some(PageEntry::new(url)),
        }
    }

    pub fn back_target(&self) -> Option<&str> {
        self.back_stack.last().map(|e| e.url.as_str())
    }

    pub fn forward_target(&self) -> Option<&str> {
        self.forward_stack.last().map(|e| e.url.as_str())
    }

    /// Step back. Returns the entry now current, or `None` at the start.
    pub fn commit_back(&mut self) -> Option<&PageEntry> {
        let prev = self.back_stack.pop()?;
        if let Some(current) = self.current.take() {
            self.forward_stack.push(current);
        }
        self.current = Some(prev);
        self.current.as_ref()
    }

    /// Step forward. Returns the entry now current, or `None` at the end.
    pub fn commit_forward(&mut self) -> Option<&PageEntry> {
        let next = self.forward_stack.pop()?;
        if let Some(current) = self.current.take() {
            self.back_stack.push(current);
        }
        self.current = Some(next);
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&PageEntry> {
        self.current.as_ref()
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|e| e.url.as_str())
    }

    pub fn update_title(&mut self, title: &str) {
        if let Some(entry) = self.current.as_mut() {
            entry.title = title.to_string();
        }
    }

    pub fn update_icon(&mut self, icon: &str) {
        if let Some(entry) = self.current.as_mut() {
            entry.icon = Some(icon.to_string());
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }
}
