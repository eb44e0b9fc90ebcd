//! Browser window for BT Browser.
//!
//! Rendering is delegated to a [`WebEngine`]. The window owns the logged-in
//! [`ProfileSession`](bt_profile::ProfileSession), the tabs and the
//! [`NavigationPolicy`](bt_policy::NavigationPolicy), and routes engine
//! events between them:
//!
//! 1. a navigation request is judged by the policy; blocked requests are
//!    dropped, allowed ones are handed to the engine;
//! 2. when the engine reports the page committed, the pending reward and
//!    history effects are applied to the profile, which saves itself.

pub mod engine;
pub mod nav;
pub mod window;

pub use bt_policy::{NavigationEvent, TabId};
pub use engine::{EngineEvent, HeadlessEngine, WebEngine};
pub use nav::{NavigationController, PageEntry};
pub use window::{BrowserWindow, Tab, normalize_address};
