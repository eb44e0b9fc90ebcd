//! In-memory VFS implementation.
//!
//! Backs unit tests and throwaway sessions. The whole tree lives in a
//! `BTreeMap<String, Node>` keyed by normalized absolute paths, so sorted
//! iteration doubles as directory listing.

use std::collections::BTreeMap;

use bt_types::error::{BrowserError, Result};

use crate::path::{normalize, parent};
use crate::{EntryKind, Vfs, VfsEntry};

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
}

/// A fully in-memory virtual file system.
#[derive(Debug, Clone)]
pub struct MemoryVfs {
    nodes: BTreeMap<String, Node>,
    read_only: bool,
}

impl MemoryVfs {
    /// Create a new in-memory VFS with only the root directory.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::Dir);
        Self {
            nodes,
            read_only: false,
        }
    }

    /// Make every subsequent write, mkdir and remove fail. Used to exercise
    /// best-effort persistence paths.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn check_writable(&self, path: &str) -> Result<()> {
        if self.read_only {
            return Err(BrowserError::Vfs(format!("read-only file system: {path}")));
        }
        Ok(())
    }
}

impl Default for MemoryVfs {
    fn default() -> Self {
        Self::new()
    }
}

impl Vfs for MemoryVfs {
    fn readdir(&self, path: &str) -> Result<Vec<VfsEntry>> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::Dir) => {},
            Some(Node::File(_)) => {
                return Err(BrowserError::Vfs(format!("not a directory: {path}")));
            },
            None => return Err(BrowserError::Vfs(format!("no such directory: {path}"))),
        }

        let prefix = if path == "/" {
            "/".to_string()
        } else {
            format!("{path}/")
        };
        let entries = self
            .nodes
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter_map(|(key, node)| {
                let rest = &key[prefix.len()..];
                if rest.is_empty() || rest.contains('/') {
                    return None;
                }
                Some(match node {
                    Node::Dir => VfsEntry {
                        name: rest.to_string(),
                        kind: EntryKind::Directory,
                        size: 0,
                    },
                    Node::File(data) => VfsEntry {
                        name: rest.to_string(),
                        kind: EntryKind::File,
                        size: data.len() as u64,
                    },
                })
            })
            .collect();
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::File(data)) => Ok(data.clone()),
            Some(Node::Dir) => Err(BrowserError::Vfs(format!("is a directory: {path}"))),
            None => Err(BrowserError::Vfs(format!("no such file: {path}"))),
        }
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let path = normalize(path);
        self.check_writable(&path)?;
        match self.nodes.get(parent(&path)) {
            Some(Node::Dir) => {},
            _ => {
                return Err(BrowserError::Vfs(format!(
                    "parent directory does not exist: {}",
                    parent(&path)
                )));
            },
        }
        if matches!(self.nodes.get(path.as_ref()), Some(Node::Dir)) {
            return Err(BrowserError::Vfs(format!("is a directory: {path}")));
        }
        self.nodes.insert(path.into_owned(), Node::File(data.to_vec()));
        Ok(())
    }

    fn mkdir(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        match self.nodes.get(path.as_ref()) {
            Some(Node::Dir) => return Ok(()),
            Some(Node::File(_)) => {
                return Err(BrowserError::Vfs(format!("file exists: {path}")));
            },
            None => {},
        }
        self.check_writable(&path)?;
        let par = parent(&path).to_string();
        if !self.nodes.contains_key(&par) {
            self.mkdir(&par)?;
        }
        self.nodes.insert(path.into_owned(), Node::Dir);
        Ok(())
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        if path == "/" {
            return Err(BrowserError::Vfs("cannot remove root".to_string()));
        }
        self.check_writable(&path)?;
        match self.nodes.get(path.as_ref()) {
            Some(Node::Dir) => {
                let prefix = format!("{path}/");
                let has_children = self
                    .nodes
                    .range(prefix.clone()..)
                    .next()
                    .is_some_and(|(k, _)| k.starts_with(&prefix));
                if has_children {
                    return Err(BrowserError::Vfs(format!("directory not empty: {path}")));
                }
            },
            Some(Node::File(_)) => {},
            None => return Err(BrowserError::Vfs(format!("no such path: {path}"))),
        }
        self.nodes.remove(path.as_ref());
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.nodes.contains_key(normalize(path).as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_exists() {
        assert!(MemoryVfs::new().exists("/"));
    }

    #[test]
    fn mkdir_creates_parents() {
        let mut vfs = MemoryVfs::new();
        vfs.mkdir("/data/accounts").unwrap();
        assert!(vfs.exists("/data"));
        assert!(vfs.exists("/data/accounts"));
        vfs.mkdir("/data/accounts").unwrap();
    }

    #[test]
    fn readdir_lists_direct_children_sorted() {
        let mut vfs = MemoryVfs::new();
        vfs.mkdir("/accounts/archive").unwrap();
        vfs.write("/accounts/zed.json", b"{}").unwrap();
        vfs.write("/accounts/amy.json", b"{}").unwrap();
        vfs.write("/accounts/archive/old.json", b"{}").unwrap();
        let names: Vec<_> = vfs
            .readdir("/accounts")
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["amy.json", "archive", "zed.json"]);
    }

    #[test]
    fn readdir_on_file_fails() {
        let mut vfs = MemoryVfs::new();
        vfs.write("/a.json", b"{}").unwrap();
        assert!(vfs.readdir("/a.json").is_err());
    }

    #[test]
    fn write_overwrites_and_reports_size() {
        let mut vfs = MemoryVfs::new();
        vfs.write("/a.json", b"{\"coins\":1}").unwrap();
        vfs.write("/a.json", b"{}").unwrap();
        assert_eq!(vfs.read("/a.json").unwrap(), b"{}");
        assert_eq!(vfs.readdir("/").unwrap()[0].size, 2);
    }

    #[test]
    fn write_without_parent_fails() {
        let mut vfs = MemoryVfs::new();
        assert!(vfs.write("/accounts/a.json", b"{}").is_err());
    }

    #[test]
    fn remove_file_and_nonempty_dir() {
        let mut vfs = MemoryVfs::new();
        vfs.mkdir("/accounts").unwrap();
        vfs.write("/accounts/a.json", b"{}").unwrap();
        assert!(vfs.remove("/accounts").is_err());
        vfs.remove("/accounts/a.json").unwrap();
        assert!(!vfs.exists("/accounts/a.json"));
        vfs.remove("/accounts").unwrap();
        assert!(vfs.remove("/").is_err());
        assert!(vfs.remove("/missing").is_err());
    }

    #[test]
    fn read_only_rejects_mutations_but_allows_reads() {
        let mut vfs = MemoryVfs::new();
        vfs.write("/a.json", b"{}").unwrap();
        vfs.set_read_only(true);
        assert!(vfs.write("/a.json", b"[]").is_err());
        assert!(vfs.remove("/a.json").is_err());
        assert!(vfs.mkdir("/new").is_err());
        assert_eq!(vfs.read("/a.json").unwrap(), b"{}");
    }
}
