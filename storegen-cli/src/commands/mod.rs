//! Command implementations for the `storegen` CLI.
//!
//! Each submodule corresponds to a top-level CLI command.

/// First-time project setup - `storegen add`.
///
/// Pins `@ngrx/signals` to the detected Angular major, moves this tool into
/// `devDependencies`, registers it in `angular.json` and declares the
/// `@shared-state/*` path alias.
pub mod add;

/// State module generation - `storegen store <name>`.
///
/// Renders the store, service and model templates for one entity, merges
/// the shared entity files and updates the `state/index.ts` barrel.
pub mod store;

/// Shared template helpers and code templates.
///
/// Provides string utilities (`to_kebab_case`, `to_pascal_case`,
/// `to_camel_case`, `pluralize`, `render`) and the embedded template groups.
pub mod templates;
