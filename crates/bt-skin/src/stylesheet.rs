//! Stylesheet text for the browser chrome.

use bt_types::theme::Theme;

use crate::palette::Palette;

/// Everything the stylesheet depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeStyle {
    pub palette: Palette,
    pub squared_buttons: bool,
}

impl ChromeStyle {
    pub fn new(theme: Theme, squared_buttons: bool) -> Self {
        Self {
            palette: Palette::for_theme(theme),
            squared_buttons,
        }
    }

    pub fn border_radius(&self) -> &'static str {
        if self.squared_buttons { "0px" } else { "6px" }
    }
}

/// Stylesheet for the main window, toolbar, URL bar, tabs, history list and
/// status labels.
pub fn stylesheet(style: &ChromeStyle) -> String {
    let bg = style.palette.background;
    let fg = style.palette.text;
    let status = style.palette.status_text;
    let radius = style.border_radius();
    format!(
        "QMainWindow {{ background-color: {bg}; color: {fg}; }}\n\
         QToolBar {{ background-color: {bg}; spacing: 6px; }}\n\
         QLineEdit {{ background-color: #f0f0f0; color: {fg}; border: 1px solid #888; border-radius: {radius}; padding: 4px; }}\n\
         QPushButton {{ background-color: #ddd; color: {fg}; border-radius: {radius}; padding: 6px; }}\n\
         QPushButton:hover {{ background-color: #bbb; }}\n\
         QTabBar::tab {{ background: #ccc; color: {fg}; padding: 6px; border-radius: {radius}; }}\n\
         QTabBar::tab:selected {{ background: #aaa; }}\n\
         QListWidget {{ background-color: #f9f9f9; color: {fg}; }}\n\
         QLabel {{ color: {status}; }}\n"
    )
}
