//! Typed views of the JSON documents an Angular workspace keeps at its root.
//!
//! Only the keys this tool reads or mutates are typed; every other key is kept
//! in a flattened `rest` map so documents round-trip without losing data.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ScaffoldError;
use crate::tree::ProjectTree;

pub const PACKAGE_JSON: &str = "package.json";
pub const ANGULAR_JSON: &str = "angular.json";
pub const TSCONFIG_JSON: &str = "tsconfig.json";
pub const TSCONFIG_APP_JSON: &str = "tsconfig.app.json";

/// `package.json`. Dependency tables are kept sorted by key.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PackageJson {
    #[serde(flatten)]
    pub rest: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, Value>>,
    #[serde(
        default,
        rename = "devDependencies",
        skip_serializing_if = "Option::is_none"
    )]
    pub dev_dependencies: Option<BTreeMap<String, Value>>,
}

impl PackageJson {
    /// Version requirement of `name`, looked up in `dependencies` first.
    pub fn dependency_version(&self, name: &str) -> Option<&str> {
        [&self.dependencies, &self.dev_dependencies]
            .into_iter()
            .flatten()
            .find_map(|table| table.get(name).and_then(Value::as_str))
    }
}

/// `angular.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AngularJson {
    #[serde(flatten)]
    pub rest: Map<String, Value>,
    #[serde(
        default,
        rename = "defaultProject",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cli: Option<CliSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schematics: Option<Map<String, Value>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CliSection {
    #[serde(flatten)]
    pub rest: Map<String, Value>,
    #[serde(
        default,
        rename = "schematicCollections",
        skip_serializing_if = "Option::is_none"
    )]
    pub schematic_collections: Option<Vec<String>>,
}

/// Per-generator default options stored under `schematics`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl AngularJson {
    /// Source root of the default project (or the first declared one).
    pub fn source_root(&self) -> String {
        let projects = self.projects.as_ref();
        let project = self
            .default_project
            .as_deref()
            .and_then(|name| projects?.get(name))
            .or_else(|| projects?.values().next());
        project
            .and_then(|p| p.get("sourceRoot"))
            .and_then(Value::as_str)
            .unwrap_or("src")
            .to_string()
    }

    /// Defaults stored under `schematics[key]`, if present and well-formed.
    pub fn generator_defaults(&self, key: &str) -> Option<GeneratorDefaults> {
        let entry = self.schematics.as_ref()?.get(key)?;
        serde_json::from_value(entry.clone()).ok()
    }
}

/// `tsconfig.json` / `tsconfig.app.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TsConfig {
    #[serde(
        default,
        rename = "compilerOptions",
        skip_serializing_if = "Option::is_none"
    )]
    pub compiler_options: Option<CompilerOptions>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CompilerOptions {
    #[serde(flatten)]
    pub rest: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Map<String, Value>>,
}

/// Nearest ancestor of `start` (inclusive) holding an `angular.json`, falling
/// back to the nearest one holding a `package.json`.
pub fn find_root(start: &Path) -> Option<PathBuf> {
    [ANGULAR_JSON, PACKAGE_JSON].iter().find_map(|marker| {
        start
            .ancestors()
            .find(|dir| dir.join(marker).is_file())
            .map(Path::to_path_buf)
    })
}

/// Read and parse a JSON document. Returns `Ok(None)` if the file is absent.
pub fn read_json<T: DeserializeOwned>(
    tree: &ProjectTree,
    path: &str,
) -> Result<Option<T>, ScaffoldError> {
    let Some(text) = tree.read(path)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| invalid(path, e))
}

/// Parse a JSON document that may carry comments.
///
/// The comment-stripped text is tried first, then the raw text.
pub fn parse_lenient<T: DeserializeOwned>(path: &str, text: &str) -> Result<T, ScaffoldError> {
    match serde_json::from_str(&strip_comments(text)) {
        Ok(value) => Ok(value),
        Err(_) => serde_json::from_str(text).map_err(|e| invalid(path, e)),
    }
}

/// Serialize with two-space indentation and a trailing newline, then stage it.
pub fn write_json<T: Serialize>(
    tree: &mut ProjectTree,
    path: &str,
    value: &T,
) -> Result<(), ScaffoldError> {
    let mut text = serde_json::to_string_pretty(value).map_err(|e| invalid(path, e))?;
    text.push('\n');
    tree.write(path, text);
    Ok(())
}

fn invalid(path: &str, err: serde_json::Error) -> ScaffoldError {
    ScaffoldError::InvalidConfig {
        path: Path::new(path).to_path_buf(),
        message: err.to_string(),
    }
}

/// Remove `//` and `/* */` comments outside of string literals.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek().copied()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }
    out
}
