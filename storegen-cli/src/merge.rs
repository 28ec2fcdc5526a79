//! Containment-based merge of generated files into the project tree.
//!
//! A generated file is written only when nothing exists at its destination.
//! An existing file that already contains the generated content (trimmed) is
//! considered merged and left untouched. Existing files are never overwritten.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::ScaffoldError;
use crate::report::{Report, Warning};
use crate::tree::ProjectTree;

/// A rendered file, with its path relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

/// What to do when an existing file does not contain the generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Abort the run with [`ScaffoldError::FileConflict`].
    Strict,
    /// Keep the existing file and record a [`Warning::Conflict`].
    Smart,
}

/// Merge `files` into `tree` according to `mode`.
pub fn merge_files(
    tree: &mut ProjectTree,
    files: Vec<GeneratedFile>,
    mode: MergeMode,
    report: &mut Report,
) -> Result<(), ScaffoldError> {
    for file in files {
        let Some(existing) = tree.read(&file.path)? else {
            tree.write(&file.path, file.content);
            continue;
        };

        if existing.contains(file.content.trim()) {
            debug!(path = %file.path.display(), "already merged");
            report.skipped.push(file.path);
            continue;
        }

        match mode {
            MergeMode::Strict => return Err(ScaffoldError::FileConflict(file.path)),
            MergeMode::Smart => {
                warn!(path = %file.path.display(), "existing file differs from generated content; keeping it");
                report.warn(Warning::Conflict(file.path));
            }
        }
    }
    Ok(())
}
