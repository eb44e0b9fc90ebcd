//! Command interpreter and terminal front end.
//!
//! Commands implement the [`Command`] trait and are registered by name in a
//! [`CommandRegistry`]. The interpreter splits an input line into quoted
//! arguments, resolves the command name case-insensitively, and runs it
//! against an [`Environment`] holding either the account store (chooser
//! phase) or the open browser window.

mod account_commands;
mod browser_commands;
mod interpreter;

/// Register account chooser commands (accounts, login, create, delete).
pub use account_commands::register_account_commands;
/// Register browser commands (open, click, tab, history, set, ...).
pub use browser_commands::register_browser_commands;
pub use interpreter::{Command, CommandOutput, CommandRegistry, Environment, tokenize};
