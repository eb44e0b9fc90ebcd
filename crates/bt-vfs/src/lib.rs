//! File system abstraction used by the profile store.
//!
//! Paths are `/`-separated and absolute within the backend. [`MemoryVfs`]
//! keeps everything in a map and backs the tests; [`RealVfs`] maps paths onto
//! a directory on disk and replaces files atomically.

mod memory;
mod path;
mod real;

use bt_types::error::Result;

pub use memory::MemoryVfs;
pub use path::{join, normalize};
pub use real::RealVfs;

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry returned by [`Vfs::readdir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfsEntry {
    pub name: String,
    pub kind: EntryKind,
    pub size: u64,
}

/// Storage backend operations needed by BT Browser.
pub trait Vfs {
    /// List the direct children of a directory, sorted by name.
    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>>;

    /// Read a whole file.
    fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Create or replace a file. The parent directory must exist.
    fn write(&mut self, path: &str, data: &[u8]) -> Result<()>;

    /// Create a directory and any missing parents. Existing directories are
    /// not an error.
    fn mkdir(&mut self, path: &str) -> Result<()>;

    /// Remove a file or an empty directory.
    fn remove(&mut self, path: &str) -> Result<()>;

    /// Whether anything exists at `path`.
    fn exists(&self, path: &str) -> bool;
}
