//! Per-account profiles and the state they accumulate.
//!
//! A [`Profile`] is one account's settings plus its history and coin balance.
//! [`ProfileStore`] persists profiles as JSON files, merging every read onto
//! the default schema. [`HistoryLedger`] and [`CoinLedger`] are the only
//! writers of history and coins; [`ProfileSession`] owns the logged-in
//! profile and saves it after every mutation.

pub mod coins;
pub mod history;
pub mod profile;
pub mod session;
pub mod store;

pub use coins::CoinLedger;
pub use history::HistoryLedger;
pub use profile::{GUEST, Profile};
pub use session::ProfileSession;
pub use store::ProfileStore;
