//! Command trait, registry, and dispatch logic.

use std::collections::BTreeMap;

use bt_browser::BrowserWindow;
use bt_profile::{Profile, ProfileStore};
use bt_types::error::{BrowserError, Result};

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// Plain text lines.
    Text(String),
    /// Tabular data (header row + data rows).
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Command produced no visible output.
    None,
    /// Signal to the app to open a browser window for an authenticated
    /// account.
    Login {
        username: String,
        profile: Box<Profile>,
    },
    /// Signal to the app to close the window and return to the chooser.
    Logout,
    /// Signal to the app to exit.
    Quit,
}

/// State a command may act on. The chooser phase provides `store`; once an
/// account is logged in, the window owns the store and only `window` is set.
pub struct Environment<'a> {
    pub store: Option<&'a mut ProfileStore>,
    pub window: Option<&'a mut BrowserWindow>,
}

impl<'a> Environment<'a> {
    pub fn chooser(store: &'a mut ProfileStore) -> Self {
        Self {
            store: Some(store),
            window: None,
        }
    }

    pub fn browser(window: &'a mut BrowserWindow) -> Self {
        Self {
            store: None,
            window: Some(window),
        }
    }

    /// The account store, or an error naming the command that needed it.
    pub fn store(&mut self, cmd: &str) -> Result<&mut ProfileStore> {
        self.store
            .as_deref_mut()
            .ok_or_else(|| BrowserError::Command(format!("{cmd}: log out first")))
    }

    /// The browser window, or an error naming the command that needed it.
    pub fn window(&mut self, cmd: &str) -> Result<&mut BrowserWindow> {
        self.window
            .as_deref_mut()
            .ok_or_else(|| BrowserError::Command(format!("{cmd}: log in first")))
    }
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "login <name> \[password\]").
    fn usage(&self) -> &str;

    /// Command category for grouping in `help` output.
    fn category(&self) -> &str {
        "general"
    }

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Maximum number of history entries to retain.
const MAX_HISTORY: usize = 100;

/// Registry of available commands with dispatch and input history.
pub struct CommandRegistry {
    commands: BTreeMap<String, Box<dyn Command>>,
    history: Vec<String>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
            history: Vec::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_ascii_lowercase(), cmd);
    }

    /// Lines entered so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn push_history(&mut self, line: &str) {
        if self.history.last().is_some_and(|last| last == line) {
            return;
        }
        self.history.push(line.to_string());
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
    }

    /// Parse and execute one input line. `help` is answered by the registry
    /// itself.
    pub fn execute(&mut self, line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(CommandOutput::None);
        }
        self.push_history(trimmed);

        let tokens = tokenize(trimmed)?;
        let Some((name, rest)) = tokens.split_first() else {
            return Ok(CommandOutput::None);
        };
        let name = name.to_ascii_lowercase();
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        if name == "help" {
            return Ok(self.help(args.first().copied()));
        }
        match self.commands.get(&name) {
            Some(cmd) => {
                log::debug!("Running {name} with {} args", args.len());
                cmd.execute(&args, env)
            },
            None => Err(BrowserError::Command(format!(
                "unknown command: {name} (type 'help')"
            ))),
        }
    }

    fn help(&self, topic: Option<&str>) -> CommandOutput {
        if let Some(topic) = topic {
            return match self.commands.get(&topic.to_ascii_lowercase()) {
                Some(cmd) => CommandOutput::Text(format!(
                    "{}\n  {}",
                    cmd.usage(),
                    cmd.description()
                )),
                None => CommandOutput::Text(format!("No help for '{topic}'.")),
            };
        }
        let mut by_category: BTreeMap<&str, Vec<&dyn Command>> = BTreeMap::new();
        for cmd in self.commands.values() {
            by_category
                .entry(cmd.category())
                .or_default()
                .push(cmd.as_ref());
        }
        let mut text = String::new();
        for (category, cmds) in by_category {
            text.push_str(&format!("[{category}]\n"));
            for cmd in cmds {
                text.push_str(&format!("  {:<28} {}\n", cmd.usage(), cmd.description()));
            }
        }
        text.push_str(&format!(
            "  {:<28} {}",
            "help [command]", "Show this list or one command's usage"
        ));
        CommandOutput::Text(text)
    }
}

/// Split a line into arguments. Single and double quotes group words,
/// a backslash escapes the next character outside single quotes.
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_token = true;
            },
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(ch);
                in_token = true;
            },
            (None, c) if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            },
            (None, c) => {
                current.push(c);
                in_token = true;
            },
        }
    }
    if let Some(q) = quote {
        return Err(BrowserError::Command(format!("unterminated {q} quote")));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
