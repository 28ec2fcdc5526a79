//! In-memory project tree.
//!
//! All generation steps stage their writes on a [`ProjectTree`]; nothing touches
//! the real filesystem until [`ProjectTree::commit`]. Reads see staged content
//! first, then fall back to disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::ScaffoldError;

pub struct ProjectTree {
    root: PathBuf,
    staged: BTreeMap<PathBuf, String>,
}

impl ProjectTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProjectTree {
            root: root.into(),
            staged: BTreeMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        let rel = normalize(path.as_ref());
        self.staged.contains_key(&rel) || self.root.join(&rel).is_file()
    }

    /// Read a file as text. Returns `Ok(None)` when it does not exist.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<Option<String>, ScaffoldError> {
        let rel = normalize(path.as_ref());
        if let Some(content) = self.staged.get(&rel) {
            return Ok(Some(content.clone()));
        }
        let abs = self.root.join(&rel);
        if !abs.is_file() {
            return Ok(None);
        }
        fs::read_to_string(&abs)
            .map(Some)
            .map_err(|e| ScaffoldError::io(abs, e))
    }

    /// Stage `content` at `path`, creating or replacing it.
    pub fn write(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let rel = normalize(path.as_ref());
        debug!(path = %rel.display(), "staged");
        self.staged.insert(rel, content.into());
    }

    pub fn staged(&self) -> impl Iterator<Item = &Path> {
        self.staged.keys().map(PathBuf::as_path)
    }

    /// Persist every staged file and return the paths actually written.
    ///
    /// Files whose staged content equals what is already on disk are not
    /// rewritten.
    pub fn commit(self) -> Result<Vec<PathBuf>, ScaffoldError> {
        let mut written = Vec::new();
        for (rel, content) in self.staged {
            let abs = self.root.join(&rel);
            if let Ok(existing) = fs::read_to_string(&abs) {
                if existing == content {
                    continue;
                }
            }
            if let Some(parent) = abs.parent() {
                fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
            }
            fs::write(&abs, content).map_err(|e| ScaffoldError::io(&abs, e))?;
            written.push(rel);
        }
        Ok(written)
    }
}

/// Normalize a project-relative path: `\` is treated as a separator, leading
/// `/` and `.` segments are dropped and `..` pops the previous segment.
pub fn normalize(path: &Path) -> PathBuf {
    let unified = path.to_string_lossy().replace('\\', "/");
    let mut out = PathBuf::new();
    for component in Path::new(&unified).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    out
}
