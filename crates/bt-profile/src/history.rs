//! Visited-URL ledger over a profile's history list.

use crate::profile::Profile;

/// Mutating view of a profile's history.
///
/// Storage order is chronological; [`HistoryLedger::list`] presents it most
/// recent first. Persisting after a change is the caller's job (see
/// [`crate::ProfileSession`]).
pub struct HistoryLedger<'a> {
    profile: &'a mut Profile,
}

impl<'a> HistoryLedger<'a> {
    pub fn new(profile: &'a mut Profile) -> Self {
        Self { profile }
    }

    /// Append `url` unless it equals the most recent entry. Non-adjacent
    /// repeats are kept. Returns whether the history changed.
    pub fn record(&mut self, url: &str) -> bool {
        let history = &mut self.profile.history;
        if history.last().is_some_and(|last| last == url) {
            return false;
        }
        history.push(url.to_string());
        true
    }

    /// Remove every occurrence of `url`. Returns how many were removed.
    pub fn remove(&mut self, url: &str) -> usize {
        let history = &mut self.profile.history;
        let before = history.len();
        history.retain(|entry| entry != url);
        before - history.len()
    }

    /// Drop all entries. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.profile.history.len();
        self.profile.history.clear();
        removed
    }

    /// Entries in display order, most recent first.
    pub fn list(&self) -> Vec<&str> {
        self.profile.history.iter().rev().map(String::as_str).collect()
    }
}
