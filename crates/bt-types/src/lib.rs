//! Foundation types for BT Browser.
//!
//! This crate contains the types shared by every BT Browser crate: the error
//! taxonomy used across profile storage and navigation, and the `Theme`
//! enum persisted in account profiles.

pub mod error;
pub mod theme;
