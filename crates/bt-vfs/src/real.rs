//! Disk-backed VFS rooted at a host directory.
//!
//! VFS path `/accounts/Guest.json` maps to `<root>/accounts/Guest.json`.
//! Writes go to a hidden sibling temp file first and are renamed into place,
//! so a crash mid-write leaves the previous file intact.

use std::fs;
use std::path::{Path, PathBuf};

use bt_types::error::{BrowserError, Result};

use crate::path::normalize;
use crate::{EntryKind, Vfs, VfsEntry};

/// A VFS backed by the real file system.
#[derive(Debug, Clone)]
pub struct RealVfs {
    root: PathBuf,
}

impl RealVfs {
    /// Create a VFS rooted at `root`. The directory is created on first
    /// `mkdir`, not here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Host directory this VFS is rooted at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a VFS path to a host path. `..` segments are refused so that
    /// nothing escapes the root.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let path = normalize(path);
        let mut host = self.root.clone();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if segment == ".." {
                return Err(BrowserError::Vfs(format!("path escapes root: {path}")));
            }
            host.push(segment);
        }
        Ok(host)
    }
}

fn temp_sibling(target: &Path) -> Result<PathBuf> {
    let name = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| BrowserError::Vfs(format!("invalid file name: {}", target.display())))?;
    Ok(target.with_file_name(format!(".{name}.tmp")))
}

impl Vfs for RealVfs {
    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>> {
        let host = self.resolve(path)?;
        let mut entries = Vec::new();
        for entry in fs::read_dir(&host)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // In-flight temp files from `write`.
            if name.starts_with('.') && name.ends_with(".tmp") {
                continue;
            }
            let meta = entry.metadata()?;
            entries.push(VfsEntry {
                name,
                kind: if meta.is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                },
                size: if meta.is_dir() { 0 } else { meta.len() },
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.resolve(path)?)?)
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let target = self.resolve(path)?;
        if target.is_dir() {
            return Err(BrowserError::Vfs(format!("is a directory: {path}")));
        }
        let tmp = temp_sibling(&target)?;
        fs::write(&tmp, data)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        log::trace!("Wrote {} bytes to {}", data.len(), target.display());
        Ok(())
    }

    fn mkdir(&mut self, path: &str) -> Result<()> {
        let host = self.resolve(path)?;
        fs::create_dir_all(&host)?;
        Ok(())
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        let host = self.resolve(path)?;
        if host == self.root {
            return Err(BrowserError::Vfs("cannot remove root".to_string()));
        }
        if host.is_dir() {
            fs::remove_dir(&host)?;
        } else {
            fs::remove_file(&host)?;
        }
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|p| p.exists())
    }
}
