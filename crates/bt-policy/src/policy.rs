//! Allow / block decision for a single navigation request.

use bt_profile::Profile;

use crate::blocklist::AdBlocklist;
use crate::event::NavigationEvent;

/// Coins granted for one allowed link navigation.
pub const LINK_REWARD: u64 = 1;

/// Outcome of evaluating a [`NavigationEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Do not load, record, or reward. `rule` is the blocklist entry that
    /// matched.
    Blocked { rule: String },
    /// Load the page. The two flags are gated independently: `reward` only
    /// depends on the navigation being a link click (the coin ledger applies
    /// its own incognito rule), `record` additionally requires the profile to
    /// be out of incognito.
    Allowed { reward: bool, record: bool },
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed { .. })
    }
}

/// Decides what happens to each navigation request.
#[derive(Debug, Clone, Default)]
pub struct NavigationPolicy {
    blocklist: AdBlocklist,
}

impl NavigationPolicy {
    pub fn new(blocklist: AdBlocklist) -> Self {
        Self { blocklist }
    }

    pub fn blocklist(&self) -> &AdBlocklist {
        &self.blocklist
    }

    /// Judge `event` under `profile`'s current flags.
    pub fn evaluate(&self, event: &NavigationEvent, profile: &Profile) -> Verdict {
        if profile.adblock_enabled
            && let Some(rule) = self.blocklist.match_url(&event.url)
        {
            log::debug!("Blocked {} (matched {rule})", event.url);
            return Verdict::Blocked {
                rule: rule.to_string(),
            };
        }
        let link = event.is_link_initiated;
        Verdict::Allowed {
            reward: link,
            record: link && !profile.incognito,
        }
    }
}
