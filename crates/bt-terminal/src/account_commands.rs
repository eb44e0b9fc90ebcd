//! Account chooser commands: list, log in, create, and delete accounts.

use bt_profile::GUEST;
use bt_types::error::{BrowserError, Result};

use crate::{Command, CommandOutput, CommandRegistry, Environment};

/// Register the chooser-phase commands.
pub fn register_account_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(AccountsCmd));
    reg.register(Box::new(LoginCmd));
    reg.register(Box::new(CreateCmd));
    reg.register(Box::new(DeleteCmd));
    reg.register(Box::new(QuitCmd));
}

fn usage_error(cmd: &dyn Command) -> BrowserError {
    BrowserError::Command(format!("usage: {}", cmd.usage()))
}

// ---------------------------------------------------------------------------
// accounts
// ---------------------------------------------------------------------------

struct AccountsCmd;

impl Command for AccountsCmd {
    fn name(&self) -> &str {
        "accounts"
    }
    fn description(&self) -> &str {
        "List accounts"
    }
    fn usage(&self) -> &str {
        "accounts"
    }
    fn category(&self) -> &str {
        "account"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let store = env.store("accounts")?;
        let rows = store
            .list()
            .into_iter()
            .map(|name| {
                let lock = if store.load(&name).has_password() {
                    "yes"
                } else {
                    ""
                };
                vec![name, lock.to_string()]
            })
            .collect();
        Ok(CommandOutput::Table {
            headers: vec!["Account".into(), "Password".into()],
            rows,
        })
    }
}

// ---------------------------------------------------------------------------
// login
// ---------------------------------------------------------------------------

struct LoginCmd;

impl Command for LoginCmd {
    fn name(&self) -> &str {
        "login"
    }
    fn description(&self) -> &str {
        "Open a browser window for an account"
    }
    fn usage(&self) -> &str {
        "login <name> [password]"
    }
    fn category(&self) -> &str {
        "account"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let (name, password) = match args {
            [name] => (*name, None),
            [name, password] => (*name, Some(*password)),
            _ => return Err(usage_error(self)),
        };
        let profile = env.store("login")?.authenticate(name, password)?;
        log::info!("Logged in as {name:?}");
        Ok(CommandOutput::Login {
            username: name.to_string(),
            profile: Box::new(profile),
        })
    }
}

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

struct CreateCmd;

impl Command for CreateCmd {
    fn name(&self) -> &str {
        "create"
    }
    fn description(&self) -> &str {
        "Create a new account with default settings"
    }
    fn usage(&self) -> &str {
        "create <name>"
    }
    fn category(&self) -> &str {
        "account"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let [name] = args else {
            return Err(usage_error(self));
        };
        env.store("create")?.create(name)?;
        Ok(CommandOutput::Text(format!("Account '{name}' created.")))
    }
}

// ---------------------------------------------------------------------------
// delete
// ---------------------------------------------------------------------------

struct DeleteCmd;

impl Command for DeleteCmd {
    fn name(&self) -> &str {
        "delete"
    }
    fn description(&self) -> &str {
        "Delete an account (asks for --yes)"
    }
    fn usage(&self) -> &str {
        "delete <name> [--yes]"
    }
    fn category(&self) -> &str {
        "account"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let (name, confirmed) = match args {
            [name] => (*name, false),
            [name, "--yes"] | ["--yes", name] => (*name, true),
            _ => return Err(usage_error(self)),
        };
        let store = env.store("delete")?;
        if !confirmed {
            // Surface protected/unknown accounts before asking.
            if name == GUEST {
                return Err(BrowserError::ProtectedAccount(name.to_string()));
            }
            if !store.list().contains(name) {
                return Err(BrowserError::UnknownAccount(name.to_string()));
            }
            return Ok(CommandOutput::Text(format!(
                "Delete account '{name}'? Run 'delete {name} --yes' to confirm."
            )));
        }
        store.delete(name)?;
        Ok(CommandOutput::Text(format!("Account '{name}' deleted.")))
    }
}

// ---------------------------------------------------------------------------
// quit
// ---------------------------------------------------------------------------

/// Shared by both phases.
pub(crate) struct QuitCmd;

impl Command for QuitCmd {
    fn name(&self) -> &str {
        "quit"
    }
    fn description(&self) -> &str {
        "Exit BT Browser"
    }
    fn usage(&self) -> &str {
        "quit"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Quit)
    }
}
