//! The logged-in account: owned profile plus save-after-every-mutation.

use bt_types::error::Result;

use crate::coins::CoinLedger;
use crate::history::HistoryLedger;
use crate::profile::Profile;
use crate::store::ProfileStore;

/// Owns the active profile and the store it came from.
///
/// `key` is the account name chosen at login and is what the profile is
/// saved under; it does not follow later edits of `profile.username`.
pub struct ProfileSession {
    store: ProfileStore,
    key: String,
    profile: Profile,
}

impl ProfileSession {
    /// Log in as `username`, checking `password` if the account has one.
    pub fn login(store: ProfileStore, username: &str, password: Option<&str>) -> Result<Self> {
        let profile = store.authenticate(username, password)?;
        log::info!("Logged in as {username:?}");
        Ok(Self {
            store,
            key: username.to_string(),
            profile,
        })
    }

    /// Start a session with an already loaded profile.
    pub fn with_profile(store: ProfileStore, key: &str, profile: Profile) -> Self {
        Self {
            store,
            key: key.to_string(),
            profile,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    fn persist(&mut self) {
        self.store.save(&self.key, &self.profile);
    }

    /// Record a visit. Incognito profiles record nothing.
    pub fn record_history(&mut self, url: &str) -> bool {
        if self.profile.incognito {
            return false;
        }
        let changed = HistoryLedger::new(&mut self.profile).record(url);
        if changed {
            self.persist();
        }
        changed
    }

    /// Remove every occurrence of `url` from history.
    pub fn remove_history(&mut self, url: &str) -> usize {
        let removed = HistoryLedger::new(&mut self.profile).remove(url);
        self.persist();
        removed
    }

    pub fn clear_history(&mut self) -> usize {
        let removed = HistoryLedger::new(&mut self.profile).clear();
        self.persist();
        removed
    }

    /// History, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.profile.history.iter().rev().map(String::as_str)
    }

    /// Award coins unless incognito.
    pub fn award_coins(&mut self, amount: u64) -> bool {
        let changed = CoinLedger::new(&mut self.profile).award(amount);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn coins(&self) -> u64 {
        self.profile.coins
    }

    /// Apply a settings change and save. If `edit` fails nothing is saved
    /// and the in-memory profile is left as it was.
    pub fn update<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Profile) -> Result<()>,
    {
        let mut draft = self.profile.clone();
        edit(&mut draft)?;
        self.profile = draft;
        self.persist();
        Ok(())
    }

    /// End the session, handing the store back for the account chooser.
    pub fn into_store(self) -> ProfileStore {
        log::info!("Logged out of {:?}", self.key);
        self.store
    }
}
