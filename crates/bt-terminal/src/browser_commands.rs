//! Commands available once an account is logged in.

use bt_browser::BrowserWindow;
use bt_types::error::{BrowserError, Result};
use bt_types::theme::Theme;
use chrono::{Datelike, NaiveDate};

use crate::account_commands::QuitCmd;
use crate::{Command, CommandOutput, CommandRegistry, Environment};

/// Register the browser-phase commands.
pub fn register_browser_commands(reg: &mut CommandRegistry) {
    for nav in [
        NavCmd::Open,
        NavCmd::Click,
        NavCmd::Back,
        NavCmd::Forward,
        NavCmd::Reload,
        NavCmd::Home,
    ] {
        reg.register(Box::new(nav));
    }
    reg.register(Box::new(TabCmd));
    reg.register(Box::new(HistoryCmd));
    reg.register(Box::new(CoinsCmd));
    reg.register(Box::new(SetCmd));
    reg.register(Box::new(SettingsCmd));
    reg.register(Box::new(ThemeCmd));
    reg.register(Box::new(StatusCmd));
    reg.register(Box::new(StyleCmd));
    reg.register(Box::new(CalendarCmd));
    reg.register(Box::new(BookmarksCmd));
    reg.register(Box::new(AboutCmd));
    reg.register(Box::new(LogoutCmd));
    reg.register(Box::new(QuitCmd));
}

fn usage_error(cmd: &dyn Command) -> BrowserError {
    BrowserError::Command(format!("usage: {}", cmd.usage()))
}

/// Let the engine finish the load, then describe where the active tab is.
fn settle(window: &mut BrowserWindow, allowed: bool, what: &str) -> CommandOutput {
    window.pump_events();
    if !allowed {
        return CommandOutput::Text(format!("{what}: blocked or nothing to load."));
    }
    match window.active_tab().and_then(|t| t.nav.current()) {
        Some(page) if page.title.is_empty() => CommandOutput::Text(page.url.clone()),
        Some(page) => CommandOutput::Text(format!("{}  [{}]", page.url, page.title)),
        None => CommandOutput::None,
    }
}

// ---------------------------------------------------------------------------
// open / click / back / forward / reload / home
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum NavCmd {
    Open,
    Click,
    Back,
    Forward,
    Reload,
    Home,
}

impl Command for NavCmd {
    fn name(&self) -> &str {
        match self {
            NavCmd::Open => "open",
            NavCmd::Click => "click",
            NavCmd::Back => "back",
            NavCmd::Forward => "forward",
            NavCmd::Reload => "reload",
            NavCmd::Home => "home",
        }
    }
    fn description(&self) -> &str {
        match self {
            NavCmd::Open => "Load a typed address in the active tab",
            NavCmd::Click => "Follow a link in the active tab (earns a coin)",
            NavCmd::Back => "Go back one page",
            NavCmd::Forward => "Go forward one page",
            NavCmd::Reload => "Reload the current page",
            NavCmd::Home => "Load the homepage",
        }
    }
    fn usage(&self) -> &str {
        match self {
            NavCmd::Open => "open <address>",
            NavCmd::Click => "click <url>",
            _ => self.name(),
        }
    }
    fn category(&self) -> &str {
        "navigation"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let window = env.window(self.name())?;
        let allowed = match (self, args) {
            (NavCmd::Open, [address]) => window.navigate_address(address)?,
            (NavCmd::Click, [url]) => window.click_link(url)?,
            (NavCmd::Back, []) => window.go_back()?,
            (NavCmd::Forward, []) => window.go_forward()?,
            (NavCmd::Reload, []) => window.reload()?,
            (NavCmd::Home, []) => window.go_home()?,
            _ => return Err(usage_error(self)),
        };
        Ok(settle(window, allowed, self.name()))
    }
}

// ---------------------------------------------------------------------------
// tab
// ---------------------------------------------------------------------------

struct TabCmd;

impl Command for TabCmd {
    fn name(&self) -> &str {
        "tab"
    }
    fn description(&self) -> &str {
        "Open, close, list, or switch tabs"
    }
    fn usage(&self) -> &str {
        "tab [new [url]|close [n]|list|switch <n>]"
    }
    fn category(&self) -> &str {
        "navigation"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let window = env.window("tab")?;
        match args {
            [] | ["list"] => {
                let active = window.active_tab().map(|t| t.id);
                let rows = window
                    .tabs()
                    .iter()
                    .enumerate()
                    .map(|(i, tab)| {
                        let marker = if Some(tab.id) == active { "*" } else { "" };
                        vec![
                            format!("{}{marker}", i + 1),
                            tab.label.clone(),
                            tab.nav.current_url().unwrap_or("").to_string(),
                        ]
                    })
                    .collect();
                Ok(CommandOutput::Table {
                    headers: vec!["#".into(), "Title".into(), "URL".into()],
                    rows,
                })
            },
            ["new"] => {
                window.add_tab(None, "New Tab");
                Ok(settle(window, true, "tab"))
            },
            ["new", url] => {
                let url = bt_browser::normalize_address(url);
                window.add_tab(Some(url.as_str()), "New Tab");
                Ok(settle(window, true, "tab"))
            },
            ["close"] => {
                let id = window
                    .active_tab()
                    .map(|t| t.id)
                    .ok_or_else(|| BrowserError::Command("no open tab".into()))?;
                window.close_tab(id)?;
                window.pump_events();
                Ok(CommandOutput::None)
            },
            ["close", n] => {
                let index = parse_index(n)?;
                let id = window
                    .tabs()
                    .get(index)
                    .map(|t| t.id)
                    .ok_or_else(|| BrowserError::Command(format!("no tab {n}")))?;
                window.close_tab(id)?;
                window.pump_events();
                Ok(CommandOutput::None)
            },
            ["switch", n] => {
                window.switch_tab(parse_index(n)?)?;
                Ok(CommandOutput::Text(
                    window.address().unwrap_or_default().to_string(),
                ))
            },
            _ => Err(usage_error(self)),
        }
    }
}

/// Parse a 1-based tab number into an index.
fn parse_index(raw: &str) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(BrowserError::Command(format!("not a tab number: {raw}"))),
    }
}

// ---------------------------------------------------------------------------
// history
// ---------------------------------------------------------------------------

struct HistoryCmd;

impl Command for HistoryCmd {
    fn name(&self) -> &str {
        "history"
    }
    fn description(&self) -> &str {
        "Show, remove from, or clear browsing history"
    }
    fn usage(&self) -> &str {
        "history [rm <url>|clear]"
    }
    fn category(&self) -> &str {
        "profile"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let window = env.window("history")?;
        match args {
            [] => {
                let history = window.history();
                if history.is_empty() {
                    return Ok(CommandOutput::Text("History is empty.".into()));
                }
                Ok(CommandOutput::Text(history.join("\n")))
            },
            ["rm", url] => {
                let removed = window.remove_history(url);
                Ok(CommandOutput::Text(format!("Removed {removed} entries.")))
            },
            ["clear"] => {
                let removed = window.clear_history();
                Ok(CommandOutput::Text(format!("Cleared {removed} entries.")))
            },
            _ => Err(usage_error(self)),
        }
    }
}

// ---------------------------------------------------------------------------
// coins / status / style
// ---------------------------------------------------------------------------

struct CoinsCmd;

impl Command for CoinsCmd {
    fn name(&self) -> &str {
        "coins"
    }
    fn description(&self) -> &str {
        "Show the coin balance"
    }
    fn usage(&self) -> &str {
        "coins"
    }
    fn category(&self) -> &str {
        "profile"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let coins = env.window("coins")?.coins();
        Ok(CommandOutput::Text(format!("Coins: {coins}")))
    }
}

struct StatusCmd;

impl Command for StatusCmd {
    fn name(&self) -> &str {
        "status"
    }
    fn description(&self) -> &str {
        "Show the status bar"
    }
    fn usage(&self) -> &str {
        "status"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let window = env.window("status")?;
        let mut text = format!("{}\n{}", window.title(), window.status_line());
        if window.blocked_count() > 0 {
            text.push_str(&format!(
                "\nAds blocked: {} ({} hosts listed)",
                window.blocked_count(),
                window.policy().blocklist().entries().len()
            ));
        }
        Ok(CommandOutput::Text(text))
    }
}

struct StyleCmd;

impl Command for StyleCmd {
    fn name(&self) -> &str {
        "style"
    }
    fn description(&self) -> &str {
        "Print the chrome stylesheet"
    }
    fn usage(&self) -> &str {
        "style"
    }
    fn category(&self) -> &str {
        "settings"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.window("style")?.stylesheet().to_string()))
    }
}

// ---------------------------------------------------------------------------
// set / settings / theme
// ---------------------------------------------------------------------------

struct SetCmd;

impl Command for SetCmd {
    fn name(&self) -> &str {
        "set"
    }
    fn description(&self) -> &str {
        "Change a setting and save it"
    }
    fn usage(&self) -> &str {
        "set <key> <value>"
    }
    fn category(&self) -> &str {
        "settings"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let [key, value] = args else {
            return Err(usage_error(self));
        };
        env.window("set")?.update_setting(key, value)?;
        Ok(CommandOutput::Text(format!("{key} updated.")))
    }
}

struct SettingsCmd;

impl Command for SettingsCmd {
    fn name(&self) -> &str {
        "settings"
    }
    fn description(&self) -> &str {
        "Show the account's settings"
    }
    fn usage(&self) -> &str {
        "settings"
    }
    fn category(&self) -> &str {
        "settings"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let p = env.window("settings")?.session().profile();
        let password = if p.has_password() { "(set)" } else { "" };
        let rows = [
            ("homepage", p.homepage.clone()),
            ("username", p.username.clone()),
            ("password", password.to_string()),
            ("theme", p.theme.to_string()),
            ("squared_buttons", p.squared_buttons.to_string()),
            ("show_bookmarks_tab", p.show_bookmarks_tab.to_string()),
            ("show_calendar_tab", p.show_calendar_tab.to_string()),
            ("adblock_enabled", p.adblock_enabled.to_string()),
            ("auto_accept_cookies", p.auto_accept_cookies.to_string()),
            ("incognito", p.incognito.to_string()),
            ("debug_mode", p.debug_mode.to_string()),
        ]
        .into_iter()
        .map(|(k, v)| vec![k.to_string(), v])
        .collect();
        Ok(CommandOutput::Table {
            headers: vec!["Setting".into(), "Value".into()],
            rows,
        })
    }
}

struct ThemeCmd;

impl Command for ThemeCmd {
    fn name(&self) -> &str {
        "theme"
    }
    fn description(&self) -> &str {
        "List themes or switch to one"
    }
    fn usage(&self) -> &str {
        "theme [name]"
    }
    fn category(&self) -> &str {
        "settings"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let window = env.window("theme")?;
        if args.is_empty() {
            let current = window.session().profile().theme;
            let mut lines = String::from("Themes:\n");
            for theme in Theme::ALL {
                let marker = if theme == current { " *" } else { "" };
                lines.push_str(&format!("  {theme}{marker}\n"));
            }
            return Ok(CommandOutput::Text(lines));
        }
        // Multi-word names arrive split when unquoted.
        let name = args.join(" ");
        let theme: Theme = name.parse()?;
        window.update_setting("theme", theme.name())?;
        Ok(CommandOutput::Text(format!("Theme set to {theme}.")))
    }
}

// ---------------------------------------------------------------------------
// calendar / bookmarks / about
// ---------------------------------------------------------------------------

struct CalendarCmd;

impl Command for CalendarCmd {
    fn name(&self) -> &str {
        "calendar"
    }
    fn description(&self) -> &str {
        "Show this month (needs show_calendar_tab)"
    }
    fn usage(&self) -> &str {
        "calendar"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let window = env.window("calendar")?;
        if !window.session().profile().show_calendar_tab {
            return Err(BrowserError::Command(
                "calendar is hidden (set show_calendar_tab true)".into(),
            ));
        }
        let today = chrono::Local::now().date_naive();
        Ok(CommandOutput::Text(month_grid(today)))
    }
}

/// Monday-first month view of the month containing `day`.
fn month_grid(day: NaiveDate) -> String {
    let first = day.with_day(1).unwrap_or(day);
    let blanks = first.weekday().num_days_from_monday() as usize;
    let mut cells = vec!["  ".to_string(); blanks];
    cells.extend(
        first
            .iter_days()
            .take_while(|d| d.month() == first.month())
            .map(|d| format!("{:>2}", d.day())),
    );
    let mut lines = vec![
        first.format("%B %Y").to_string(),
        "Mo Tu We Th Fr Sa Su".to_string(),
    ];
    lines.extend(cells.chunks(7).map(|week| week.join(" ").trim_end().to_string()));
    lines.join("\n")
}

struct BookmarksCmd;

impl Command for BookmarksCmd {
    fn name(&self) -> &str {
        "bookmarks"
    }
    fn description(&self) -> &str {
        "List saved bookmarks (needs show_bookmarks_tab)"
    }
    fn usage(&self) -> &str {
        "bookmarks"
    }
    fn category(&self) -> &str {
        "profile"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let profile = env.window("bookmarks")?.session().profile();
        if !profile.show_bookmarks_tab {
            return Err(BrowserError::Command(
                "bookmarks are hidden (set show_bookmarks_tab true)".into(),
            ));
        }
        if profile.bookmarks.is_empty() {
            return Ok(CommandOutput::Text("No bookmarks.".into()));
        }
        Ok(CommandOutput::Text(profile.bookmarks.join("\n")))
    }
}

struct AboutCmd;

impl Command for AboutCmd {
    fn name(&self) -> &str {
        "about"
    }
    fn description(&self) -> &str {
        "Show version information"
    }
    fn usage(&self) -> &str {
        "about"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(format!(
            "BT Browser v{}\nCoins system included\nFavicon support and themes.",
            env!("CARGO_PKG_VERSION")
        )))
    }
}

// ---------------------------------------------------------------------------
// logout
// ---------------------------------------------------------------------------

struct LogoutCmd;

impl Command for LogoutCmd {
    fn name(&self) -> &str {
        "logout"
    }
    fn description(&self) -> &str {
        "Close the window and return to the account chooser"
    }
    fn usage(&self) -> &str {
        "logout"
    }
    fn category(&self) -> &str {
        "account"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        env.window("logout")?;
        Ok(CommandOutput::Logout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bt_browser::HeadlessEngine;
    use bt_policy::NavigationPolicy;
    use bt_profile::{ProfileSession, ProfileStore};
    use bt_vfs::MemoryVfs;

    fn window() -> BrowserWindow {
        let mut store = ProfileStore::new(Box::new(MemoryVfs::new()), "/accounts");
        let mut profile = store.create("erin").unwrap();
        profile.homepage = "https://home.example/".into();
        store.save("erin", &profile);
        let session = ProfileSession::login(store, "erin", None).unwrap();
        let mut window = BrowserWindow::new(
            session,
            NavigationPolicy::default(),
            Box::new(HeadlessEngine::new()),
        );
        window.pump_events();
        window
    }

    fn registry() -> CommandRegistry {
        let mut reg = CommandRegistry::new();
        register_browser_commands(&mut reg);
        reg
    }

    fn run(reg: &mut CommandRegistry, w: &mut BrowserWindow, line: &str) -> Result<CommandOutput> {
        reg.execute(line, &mut Environment::browser(w))
    }

    fn text(out: CommandOutput) -> String {
        match out {
            CommandOutput::Text(s) => s,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn click_earns_and_records() {
        let mut w = window();
        let mut reg = registry();
        let out = text(run(&mut reg, &mut w, "click https://news.example/a").unwrap());
        assert_eq!(out, "https://news.example/a  [news.example]");
        assert_eq!(text(run(&mut reg, &mut w, "coins").unwrap()), "Coins: 1");
        assert_eq!(
            text(run(&mut reg, &mut w, "history").unwrap()),
            "https://news.example/a"
        );
    }

    #[test]
    fn blocked_click_reports_block() {
        let mut w = window();
        let mut reg = registry();
        let out = text(run(&mut reg, &mut w, "click https://ads.doubleclick.net/x").unwrap());
        assert!(out.contains("blocked"));
        assert_eq!(w.coins(), 0);
        let status = text(run(&mut reg, &mut w, "status").unwrap());
        assert!(status.starts_with("BT Browser - erin\nCoins: 0"));
        assert!(status.ends_with("Ads blocked: 1 (4 hosts listed)"));
    }

    #[test]
    fn open_back_forward_home() {
        let mut w = window();
        let mut reg = registry();
        run(&mut reg, &mut w, "open example.org").unwrap();
        assert_eq!(w.address(), Some("http://example.org"));
        run(&mut reg, &mut w, "back").unwrap();
        assert_eq!(w.address(), Some("https://home.example/"));
        run(&mut reg, &mut w, "forward").unwrap();
        assert_eq!(w.address(), Some("http://example.org"));
        run(&mut reg, &mut w, "home").unwrap();
        assert_eq!(w.address(), Some("https://home.example/"));
        run(&mut reg, &mut w, "reload").unwrap();
        assert_eq!(w.coins(), 0);
        assert!(matches!(run(&mut reg, &mut w, "open"), Err(BrowserError::Command(_))));
    }

    #[test]
    fn tabs_new_list_switch_close() {
        let mut w = window();
        let mut reg = registry();
        run(&mut reg, &mut w, "tab new two.example").unwrap();
        let CommandOutput::Table { rows, .. } = run(&mut reg, &mut w, "tab list").unwrap() else {
            panic!("expected table");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], ["2*", "two.example", "http://two.example"]);
        assert_eq!(
            text(run(&mut reg, &mut w, "tab switch 1").unwrap()),
            "https://home.example/"
        );
        run(&mut reg, &mut w, "tab close 2").unwrap();
        assert_eq!(w.tabs().len(), 1);
        assert!(run(&mut reg, &mut w, "tab switch 0").is_err());
        assert!(run(&mut reg, &mut w, "tab close 9").is_err());
    }

    #[test]
    fn history_rm_and_clear() {
        let mut w = window();
        let mut reg = registry();
        for url in ["https://a.example/", "https://b.example/", "https://a.example/"] {
            run(&mut reg, &mut w, &format!("click {url}")).unwrap();
        }
        assert_eq!(
            text(run(&mut reg, &mut w, "history rm https://a.example/").unwrap()),
            "Removed 2 entries."
        );
        assert_eq!(w.history(), ["https://b.example/"]);
        run(&mut reg, &mut w, "history clear").unwrap();
        assert_eq!(
            text(run(&mut reg, &mut w, "history").unwrap()),
            "History is empty."
        );
    }

    #[test]
    fn set_and_settings() {
        let mut w = window();
        let mut reg = registry();
        run(&mut reg, &mut w, "set incognito on").unwrap();
        let CommandOutput::Table { rows, .. } = run(&mut reg, &mut w, "settings").unwrap() else {
            panic!("expected table");
        };
        assert!(rows.contains(&vec!["incognito".to_string(), "true".to_string()]));
        assert!(run(&mut reg, &mut w, "set coins 100").is_err());
        assert!(run(&mut reg, &mut w, "set theme").is_err());
        assert!(w.session().store().load("erin").incognito);
    }

    #[test]
    fn theme_switch_accepts_unquoted_names() {
        let mut w = window();
        let mut reg = registry();
        let list = text(run(&mut reg, &mut w, "theme").unwrap());
        assert!(list.contains("Light *"));
        run(&mut reg, &mut w, "theme orange juice").unwrap();
        assert_eq!(w.session().profile().theme, Theme::OrangeJuice);
        assert!(text(run(&mut reg, &mut w, "style").unwrap()).contains("#ffe4b5"));
        assert!(run(&mut reg, &mut w, "theme plaid").is_err());
    }

    #[test]
    fn month_grid_starts_on_the_right_weekday() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let grid = month_grid(day);
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines[0], "October 2026");
        assert_eq!(lines[1], "Mo Tu We Th Fr Sa Su");
        assert_eq!(lines[2], "          1  2  3  4");
        assert_eq!(lines.last(), Some(&"26 27 28 29 30 31"));
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn calendar_follows_its_flag() {
        let mut w = window();
        let mut reg = registry();
        assert!(text(run(&mut reg, &mut w, "calendar").unwrap()).contains("Mo Tu We"));
        run(&mut reg, &mut w, "set show_calendar_tab false").unwrap();
        assert!(matches!(
            run(&mut reg, &mut w, "calendar"),
            Err(BrowserError::Command(_))
        ));
    }

    #[test]
    fn bookmarks_follow_their_flag() {
        let mut w = window();
        let mut reg = registry();
        assert_eq!(text(run(&mut reg, &mut w, "bookmarks").unwrap()), "No bookmarks.");
        run(&mut reg, &mut w, "set show_bookmarks_tab off").unwrap();
        assert!(run(&mut reg, &mut w, "bookmarks").is_err());
    }

    #[test]
    fn about_names_the_version() {
        let mut w = window();
        let mut reg = registry();
        let about = text(run(&mut reg, &mut w, "about").unwrap());
        assert!(about.starts_with(&format!("BT Browser v{}", env!("CARGO_PKG_VERSION"))));
    }

    #[test]
    fn logout_and_quit_signal() {
        let mut w = window();
        let mut reg = registry();
        assert_eq!(run(&mut reg, &mut w, "logout").unwrap(), CommandOutput::Logout);
        assert_eq!(run(&mut reg, &mut w, "quit").unwrap(), CommandOutput::Quit);
    }

    #[test]
    fn browser_commands_need_a_window() {
        let mut store = ProfileStore::new(Box::new(MemoryVfs::new()), "/accounts");
        let mut reg = registry();
        let out = reg.execute("coins", &mut Environment::chooser(&mut store));
        assert!(matches!(out, Err(BrowserError::Command(_))));
    }
}
