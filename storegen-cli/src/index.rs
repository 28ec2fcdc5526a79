//! Incremental maintenance of a directory's `index.ts` barrel file.
//!
//! The file holds one section per entity, each opened by a `/* NAME */` header
//! comment followed by that entity's export lines. A section header is never
//! written twice; when it already exists, only the export lines missing from
//! the file are appended at the end of the file.

use std::path::Path;

use tracing::debug;

use crate::error::ScaffoldError;
use crate::tree::ProjectTree;

/// A section header plus its ordered export lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBlock {
    pub header: String,
    pub lines: Vec<String>,
}

impl ExportBlock {
    pub fn new(name: &str, lines: Vec<String>) -> Self {
        ExportBlock {
            header: format!("/* {} */", name.to_uppercase()),
            lines,
        }
    }

    /// The export block for one generated entity. `class` is the PascalCase
    /// entity name and `dash` its kebab-case file stem.
    pub fn for_entity(class: &str, dash: &str, grouped: bool) -> Self {
        let models = if grouped { "/models" } else { "" };
        let services = if grouped { "/services" } else { "" };
        ExportBlock::new(
            class,
            vec![
                format!("export * from './{dash}{models}/{dash}.model';"),
                format!("export * from './{dash}{services}/{dash}.service';"),
                format!("export * from './{dash}/{dash}.store';"),
            ],
        )
    }

    /// The block as it is written into an index that lacks it.
    pub fn to_text(&self) -> String {
        let mut text = format!("{}\n", self.header);
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

fn has_line(content: &str, line: &str) -> bool {
    let line = line.trim();
    content.lines().any(|l| l.trim() == line)
}

/// Merge `block` into the index `content` and return the new text.
pub fn merge_block(content: &str, block: &ExportBlock) -> String {
    if !has_line(content, &block.header) {
        let existing = content.trim();
        return if existing.is_empty() {
            block.to_text()
        } else {
            format!("{existing}\n\n{}", block.to_text())
        };
    }

    let mut out = content.to_string();
    for line in &block.lines {
        if line.trim().is_empty() || has_line(&out, line) {
            continue;
        }
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Merge `block` into the index file at `path`, staging the result on `tree`.
///
/// Returns `true` when the index content changed.
pub fn update_index(
    tree: &mut ProjectTree,
    path: &Path,
    block: &ExportBlock,
) -> Result<bool, ScaffoldError> {
    let current = tree.read(path)?.unwrap_or_default();
    let updated = merge_block(&current, block);
    if updated == current {
        debug!(path = %path.display(), header = %block.header, "index already up to date");
        return Ok(false);
    }
    tree.write(path, updated);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_upper_cased() {
        let block = ExportBlock::for_entity("UserProfile", "user-profile", false);
        assert_eq!(block.header, "/* USERPROFILE */");
    }

    #[test]
    fn grouped_block_points_into_subfolders() {
        let block = ExportBlock::for_entity("User", "user", true);
        assert_eq!(block.lines[0], "export * from './user/models/user.model';");
        assert_eq!(block.lines[1], "export * from './user/services/user.service';");
        assert_eq!(block.lines[2], "export * from './user/user.store';");
    }

    #[test]
    fn header_match_is_line_exact() {
        let existing = ExportBlock::for_entity("SuperUser", "super-user", false).to_text();
        let merged = merge_block(&existing, &ExportBlock::for_entity("User", "user", false));
        assert!(merged.contains("/* USER */"));
        assert!(merged.contains("/* SUPERUSER */"));
    }
}
