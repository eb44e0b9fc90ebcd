//! JSON profile persistence, one file per account.

use std::collections::BTreeSet;

use bt_types::error::{BrowserError, Result};
use bt_vfs::{EntryKind, Vfs, join};

use crate::profile::{GUEST, Profile};

const EXTENSION: &str = ".json";

/// Loads, saves, lists, creates and deletes account profiles stored as
/// `<dir>/<username>.json` on a [`Vfs`].
pub struct ProfileStore {
    vfs: Box<dyn Vfs>,
    dir: String,
}

impl ProfileStore {
    /// Open a store in `dir`, creating the directory if it is missing. A
    /// failure to create it is logged; saves will fail until it exists.
    pub fn new(mut vfs: Box<dyn Vfs>, dir: &str) -> Self {
        let dir = bt_vfs::normalize(dir).into_owned();
        if let Err(e) = vfs.mkdir(&dir) {
            log::warn!("Could not create accounts directory {dir}: {e}");
        }
        Self { vfs, dir }
    }

    /// Directory holding the account files.
    pub fn dir(&self) -> &str {
        &self.dir
    }

    fn path_for(&self, username: &str) -> String {
        join(&self.dir, &format!("{username}{EXTENSION}"))
    }

    /// Profile for `username`, merged onto the defaults. Missing, unreadable
    /// or corrupt files all yield the default schema.
    pub fn load(&self, username: &str) -> Profile {
        match self.try_load(username) {
            Ok(Some(profile)) => profile,
            Ok(None) => Profile::default(),
            Err(e) => {
                log::warn!("Could not load profile {username:?}, using defaults: {e}");
                Profile::default()
            },
        }
    }

    /// Like [`ProfileStore::load`] but reports what went wrong. `Ok(None)`
    /// means no file exists.
    pub fn try_load(&self, username: &str) -> Result<Option<Profile>> {
        validate_username(username)?;
        let path = self.path_for(username);
        if !self.vfs.exists(&path) {
            return Ok(None);
        }
        let bytes = self.vfs.read(&path)?;
        Ok(Some(Profile::from_json(&bytes)?))
    }

    /// Persist `profile` under `username`, replacing earlier state. Errors
    /// are logged and dropped.
    pub fn save(&mut self, username: &str, profile: &Profile) {
        if let Err(e) = self.try_save(username, profile) {
            log::warn!("Error saving account {username:?}: {e}");
        }
    }

    /// Persist `profile` under `username`, reporting failure as
    /// [`BrowserError::Persistence`].
    pub fn try_save(&mut self, username: &str, profile: &Profile) -> Result<()> {
        validate_username(username)?;
        let path = self.path_for(username);
        let json = profile.to_json()?;
        self.vfs
            .write(&path, json.as_bytes())
            .map_err(|e| BrowserError::Persistence(format!("{path}: {e}")))?;
        log::debug!("Saved profile {username:?} ({} bytes)", json.len());
        Ok(())
    }

    /// Every persisted account plus `Guest`.
    pub fn list(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::from([GUEST.to_string()]);
        match self.vfs.readdir(&self.dir) {
            Ok(entries) => names.extend(
                entries
                    .into_iter()
                    .filter(|e| e.kind == EntryKind::File)
                    .filter_map(|e| e.name.strip_suffix(EXTENSION).map(str::to_string))
                    .filter(|name| !name.is_empty()),
            ),
            Err(e) => log::warn!("Could not list accounts in {}: {e}", self.dir),
        }
        names
    }

    /// Create and persist a default profile for a new account.
    pub fn create(&mut self, username: &str) -> Result<Profile> {
        validate_username(username)?;
        if self.list().contains(username) {
            return Err(BrowserError::AlreadyExists(username.to_string()));
        }
        let profile = Profile::for_user(username);
        self.try_save(username, &profile)?;
        log::info!("Created account {username:?}");
        Ok(profile)
    }

    /// Remove an account's file. `Guest` is protected.
    pub fn delete(&mut self, username: &str) -> Result<()> {
        if username == GUEST {
            return Err(BrowserError::ProtectedAccount(username.to_string()));
        }
        validate_username(username)?;
        let path = self.path_for(username);
        if !self.vfs.exists(&path) {
            return Err(BrowserError::UnknownAccount(username.to_string()));
        }
        self.vfs
            .remove(&path)
            .map_err(|e| BrowserError::Persistence(format!("{path}: {e}")))?;
        log::info!("Deleted account {username:?}");
        Ok(())
    }

    /// Load `username` and check `password` against it.
    pub fn authenticate(&self, username: &str, password: Option<&str>) -> Result<Profile> {
        validate_username(username)?;
        if !self.list().contains(username) {
            return Err(BrowserError::UnknownAccount(username.to_string()));
        }
        let profile = self.load(username);
        if !profile.check_password(password) {
            log::info!("Rejected login for {username:?}");
            return Err(BrowserError::InvalidCredential(username.to_string()));
        }
        Ok(profile)
    }
}

/// Usernames become file names, so they must be non-empty, free of path
/// separators and control characters, and not start with a dot.
pub fn validate_username(username: &str) -> Result<()> {
    let bad = username.trim().is_empty()
        || username.starts_with('.')
        || username
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control());
    if bad {
        return Err(BrowserError::InvalidUsername(username.to_string()));
    }
    Ok(())
}
