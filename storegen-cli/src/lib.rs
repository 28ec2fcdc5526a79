//! # storegen-cli
//!
//! Command-line tool for scaffolding signal-store state modules into Angular
//! projects.
//!
//! This crate provides the `storegen` binary with the following commands:
//!
//! | Command | Description |
//! |---------|-------------|
//! | `storegen add` | First-time setup: dependencies, workspace registration, path alias |
//! | `storegen store <name>` | Generate model, service and store for an entity |
//!
//! ## Architecture
//!
//! Every command stages its writes on a [`tree::ProjectTree`] and commits them
//! in one pass at the end:
//!
//! - [`commands::add`] - workspace patching (`package.json`, `angular.json`, tsconfig)
//! - [`commands::store`] - path resolution and template rendering
//! - [`commands::templates`] - case helpers, pluralization and the embedded templates
//! - [`index`] - incremental `index.ts` maintenance
//! - [`merge`] - containment-based merge of generated files
//! - [`manifest`] - typed JSON documents
//! - [`report`] / [`error`] - non-fatal warnings and fatal errors

pub mod commands;
pub mod error;
pub mod index;
pub mod logging;
pub mod manifest;
pub mod merge;
pub mod report;
pub mod tree;
