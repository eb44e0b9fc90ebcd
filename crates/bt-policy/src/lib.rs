//! Navigation policy.
//!
//! Every navigation the web engine asks for is described by a
//! [`NavigationEvent`] and judged by [`NavigationPolicy::evaluate`] against
//! the active profile: blocked by the ad-domain list, or allowed with flags
//! saying whether to reward and record it.

pub mod blocklist;
pub mod event;
pub mod policy;

pub use blocklist::{AdBlocklist, DEFAULT_AD_DOMAINS};
pub use event::{NavigationEvent, TabId};
pub use policy::{LINK_REWARD, NavigationPolicy, Verdict};
