//! Coin reward counter.

use crate::profile::Profile;

/// Mutating view of a profile's coin balance.
///
/// Coins only ever go up, and never while the profile is incognito.
pub struct CoinLedger<'a> {
    profile: &'a mut Profile,
}

impl<'a> CoinLedger<'a> {
    pub fn new(profile: &'a mut Profile) -> Self {
        Self { profile }
    }

    /// Add `amount` coins. Returns whether the balance changed; incognito
    /// profiles and zero awards leave it alone.
    pub fn award(&mut self, amount: u64) -> bool {
        if self.profile.incognito || amount == 0 {
            return false;
        }
        self.profile.coins = self.profile.coins.saturating_add(amount);
        true
    }

    pub fn balance(&self) -> u64 {
        self.profile.coins
    }
}
