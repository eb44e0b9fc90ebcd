//! Line-driven front end: the account chooser, then one browser window per
//! login.

use std::io::{BufRead, Write};

use anyhow::Result;
use bt_browser::{BrowserWindow, HeadlessEngine};
use bt_policy::NavigationPolicy;
use bt_profile::{Profile, ProfileSession, ProfileStore};
use bt_terminal::{
    CommandOutput, CommandRegistry, Environment, register_account_commands,
    register_browser_commands,
};

use crate::config::AppConfig;

/// Who currently owns the profile store.
enum Phase {
    Chooser(ProfileStore),
    Browser(Box<BrowserWindow>),
}

/// Open a window for a freshly authenticated account.
fn open_window(
    config: &AppConfig,
    store: ProfileStore,
    username: &str,
    profile: Profile,
) -> BrowserWindow {
    let session = ProfileSession::with_profile(store, username, profile);
    let mut window = BrowserWindow::new(
        session,
        NavigationPolicy::default(),
        Box::new(HeadlessEngine::new()),
    );
    window.set_title_prefix(&config.window_title);
    window.pump_events();
    window
}

/// Read commands from `input` until `quit` or end of input. Returns the
/// profile store so the caller can inspect what was persisted.
pub fn run<R: BufRead, W: Write>(
    config: &AppConfig,
    store: ProfileStore,
    input: R,
    out: &mut W,
) -> Result<ProfileStore> {
    let mut chooser = CommandRegistry::new();
    register_account_commands(&mut chooser);
    let mut browser = CommandRegistry::new();
    register_browser_commands(&mut browser);

    writeln!(
        out,
        "{}: choose an account. Type 'help' for commands.",
        config.window_title
    )?;
    let mut phase = Phase::Chooser(store);
    prompt(out, &phase)?;

    for line in input.lines() {
        let line = line?;
        phase = match phase {
            Phase::Chooser(mut store) => {
                let result = chooser.execute(&line, &mut Environment::chooser(&mut store));
                match result {
                    Ok(CommandOutput::Login { username, profile }) => {
                        let window = open_window(config, store, &username, *profile);
                        writeln!(out, "{}", window.title())?;
                        if let Some(url) = window.address() {
                            writeln!(out, "{url}")?;
                        }
                        Phase::Browser(Box::new(window))
                    },
                    Ok(CommandOutput::Quit) => return Ok(store),
                    result => {
                        render(out, result)?;
                        Phase::Chooser(store)
                    },
                }
            },
            Phase::Browser(mut window) => {
                let result = browser.execute(&line, &mut Environment::browser(&mut window));
                match result {
                    Ok(CommandOutput::Logout) => {
                        log::info!("Closed window for {:?}", window.session().key());
                        writeln!(out, "Logged out.")?;
                        Phase::Chooser(window.into_store())
                    },
                    Ok(CommandOutput::Quit) => return Ok(window.into_store()),
                    result => {
                        render(out, result)?;
                        Phase::Browser(window)
                    },
                }
            },
        };
        prompt(out, &phase)?;
    }

    writeln!(out)?;
    Ok(match phase {
        Phase::Chooser(store) => store,
        Phase::Browser(window) => window.into_store(),
    })
}

fn prompt<W: Write>(out: &mut W, phase: &Phase) -> Result<()> {
    match phase {
        Phase::Chooser(_) => write!(out, "accounts> ")?,
        Phase::Browser(window) => write!(out, "{}> ", window.session().key())?,
    }
    out.flush()?;
    Ok(())
}

fn render<W: Write>(out: &mut W, result: bt_types::error::Result<CommandOutput>) -> Result<()> {
    match result {
        Ok(CommandOutput::Text(text)) => writeln!(out, "{text}")?,
        Ok(CommandOutput::Table { headers, rows }) => {
            write!(out, "{}", format_table(&headers, &rows))?;
        },
        Ok(_) => {},
        Err(e) => writeln!(out, "Error: {e}")?,
    }
    Ok(())
}

/// Left-aligned columns separated by two spaces.
fn format_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }
    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };
    let mut text = line(headers);
    for row in rows {
        text.push_str(&line(row.as_slice()));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use bt_vfs::{MemoryVfs, RealVfs};
    use std::io::Cursor;

    fn session(script: &str, store: ProfileStore) -> (String, ProfileStore) {
        let mut out = Vec::new();
        let store = run(&AppConfig::default(), store, Cursor::new(script), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), store)
    }

    fn memory_store() -> ProfileStore {
        ProfileStore::new(Box::new(MemoryVfs::new()), "/accounts")
    }

    #[test]
    fn format_table_aligns_columns() {
        let text = format_table(
            &["Account".into(), "Password".into()],
            &[vec!["Guest".into(), String::new()], vec!["alice".into(), "yes".into()]],
        );
        assert_eq!(text, "Account  Password\nGuest\nalice    yes\n");
    }

    #[test]
    fn create_login_browse_logout_quit() {
        let script = "create alice\nlogin alice\nclick https://a.example/\ncoins\nlogout\naccounts\nquit\n";
        let (out, store) = session(script, memory_store());
        assert!(out.contains("Account 'alice' created."));
        assert!(out.contains("BT Browser - alice"));
        assert!(out.contains("Coins: 1"));
        assert!(out.contains("Logged out."));
        assert!(out.contains("alice> "));
        let saved = store.load("alice");
        assert_eq!(saved.coins, 1);
        assert_eq!(saved.history, ["https://a.example/"]);
    }

    #[test]
    fn failed_login_stays_in_chooser() {
        let mut store = memory_store();
        let mut p = store.create("bob").unwrap();
        p.password = "pw".into();
        store.save("bob", &p);
        let (out, _) = session("login bob nope\nlogin bob pw\nquit\n", store);
        assert!(out.contains("Error: wrong password for account: bob"));
        assert!(out.contains("BT Browser - bob"));
    }

    #[test]
    fn browser_commands_are_refused_in_chooser() {
        let (out, _) = session("coins\n", memory_store());
        assert!(out.contains("unknown command: coins"));
    }

    #[test]
    fn end_of_input_closes_window_and_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(Box::new(RealVfs::new(dir.path())), "accounts");
        let (_, store) = session("login Guest\nset theme Dark\n", store);
        assert_eq!(store.load("Guest").theme, bt_types::theme::Theme::Dark);
        assert!(dir.path().join("accounts/Guest.json").is_file());
    }

    #[test]
    fn configured_title_is_used() {
        let config = AppConfig {
            window_title: "Kiosk".into(),
            ..AppConfig::default()
        };
        let mut out = Vec::new();
        run(&config, memory_store(), Cursor::new("login Guest\nstatus\n"), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Kiosk: choose an account."));
        assert!(out.contains("Kiosk - Guest"));
    }
}
