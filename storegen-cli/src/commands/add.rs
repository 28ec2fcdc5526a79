use colored::Colorize;
use dialoguer::{Input, Select};
use std::io::IsTerminal;
use std::path::Path;
use std::process::Command;
use tracing::{error, info};

use crate::error::ScaffoldError;
use crate::manifest::{
    self, AngularJson, CliSection, GeneratorDefaults, PackageJson, TsConfig, ANGULAR_JSON,
    PACKAGE_JSON, TSCONFIG_APP_JSON, TSCONFIG_JSON,
};
use crate::report::{Report, Warning};
use crate::tree::ProjectTree;

/// npm package name this tool registers itself under.
pub const GENERATOR_PACKAGE: &str = "ngx-storegen";
/// Key of the generator defaults entry in `angular.json` `schematics`.
pub const DEFAULTS_KEY: &str = "ngx-storegen:all";
pub const FRAMEWORK_PACKAGE: &str = "@angular/core";
pub const STATE_LIBRARY: &str = "@ngrx/signals";
pub const MIN_FRAMEWORK_MAJOR: u32 = 20;
pub const SHARED_STATE_ALIAS: &str = "@shared-state/*";
pub const SHARED_STATE_PATH: &str = "src/app/shared/state/*";

/// Resolved options for `storegen add`.
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    pub pk: Option<String>,
    pub lang: Option<String>,
}

/// Raw CLI flags for `storegen add`, before resolution into [`AddOptions`].
pub struct CliAddOpts {
    pub pk: Option<String>,
    pub lang: Option<String>,
    pub no_interactive: bool,
    pub skip_install: bool,
}

/// First-time project setup.
///
/// Resolves the options (prompting for missing ones when attached to a
/// terminal), patches the workspace files via [`apply`], then runs
/// `npm install` unless `--skip-install` was given or the version gate halted
/// the run.
pub fn run(root: &Path, cli_opts: CliAddOpts) -> Result<Report, ScaffoldError> {
    let interactive = !cli_opts.no_interactive && std::io::stdin().is_terminal();
    let skip_install = cli_opts.skip_install;
    let opts = if interactive && (cli_opts.pk.is_none() || cli_opts.lang.is_none()) {
        prompt_options(cli_opts)?
    } else {
        AddOptions {
            pk: cli_opts.pk,
            lang: cli_opts.lang,
        }
    };

    let report = apply(root, &opts)?;
    if !report.halted() && !skip_install {
        install(root)?;
    }
    Ok(report)
}

fn prompt_options(cli_opts: CliAddOpts) -> Result<AddOptions, ScaffoldError> {
    println!("{} Configuring {}", "->".blue(), GENERATOR_PACKAGE.green());

    let pk = match cli_opts.pk {
        Some(pk) => pk,
        None => Input::<String>::new()
            .with_prompt("Primary key field")
            .default("id".into())
            .interact_text()?,
    };

    let lang = match cli_opts.lang {
        Some(lang) => lang,
        None => {
            let choices = &["en", "es"];
            let idx = Select::new()
                .with_prompt("Pluralization language")
                .items(choices)
                .default(0)
                .interact()?;
            choices[idx].to_string()
        }
    };

    Ok(AddOptions {
        pk: Some(pk),
        lang: Some(lang),
    })
}

/// Patch `package.json`, `angular.json` and the tsconfig under `root`, then
/// persist the changes.
///
/// A framework older than [`MIN_FRAMEWORK_MAJOR`] is not an error: it is
/// logged, reported as [`Warning::VersionGate`], and nothing is written.
pub fn apply(root: &Path, opts: &AddOptions) -> Result<Report, ScaffoldError> {
    let mut tree = ProjectTree::new(root);
    let mut report = Report::default();
    patch(&mut tree, opts, &mut report)?;
    report.written = tree.commit()?;
    Ok(report)
}

/// Stage every workspace mutation on `tree`.
pub fn patch(
    tree: &mut ProjectTree,
    opts: &AddOptions,
    report: &mut Report,
) -> Result<(), ScaffoldError> {
    let mut package: PackageJson =
        manifest::read_json(tree, PACKAGE_JSON)?.ok_or(ScaffoldError::MissingManifest)?;

    let major = package
        .dependency_version(FRAMEWORK_PACKAGE)
        .and_then(major_version)
        .ok_or(ScaffoldError::FrameworkNotDetected)?;

    if major < MIN_FRAMEWORK_MAJOR {
        error!(
            detected = major,
            minimum = MIN_FRAMEWORK_MAJOR,
            "{GENERATOR_PACKAGE} requires Angular v{MIN_FRAMEWORK_MAJOR} or higher"
        );
        report.warn(Warning::VersionGate {
            detected: major,
            minimum: MIN_FRAMEWORK_MAJOR,
        });
        return Ok(());
    }

    info!(major, "configuring dependencies");
    update_package_json(&mut package, major);
    manifest::write_json(tree, PACKAGE_JSON, &package)?;

    update_angular_json(tree, opts)?;
    update_tsconfig(tree)?;
    Ok(())
}

/// Major version of a semver requirement such as `^20.1.0` or `~19.2`.
pub fn major_version(requirement: &str) -> Option<u32> {
    let cleaned: String = requirement
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.split('.').next()?.parse().ok()
}

/// Pin the state library to the framework major and move this tool into
/// `devDependencies`.
pub fn update_package_json(package: &mut PackageJson, major: u32) {
    let deps = package.dependencies.get_or_insert_with(Default::default);
    deps.insert(STATE_LIBRARY.into(), format!("^{major}.0.0").into());

    if let Some(version) = deps.remove(GENERATOR_PACKAGE) {
        package
            .dev_dependencies
            .get_or_insert_with(Default::default)
            .insert(GENERATOR_PACKAGE.into(), version);
    }
}

/// Register the collection and store generator defaults. Skipped when the
/// project has no `angular.json`.
pub fn update_angular_json(tree: &mut ProjectTree, opts: &AddOptions) -> Result<(), ScaffoldError> {
    let Some(mut workspace) = manifest::read_json::<AngularJson>(tree, ANGULAR_JSON)? else {
        return Ok(());
    };

    let collections = workspace
        .cli
        .get_or_insert_with(CliSection::default)
        .schematic_collections
        .get_or_insert_with(Vec::new);
    if !collections.iter().any(|c| c == GENERATOR_PACKAGE) {
        collections.push(GENERATOR_PACKAGE.into());
    }

    let defaults = GeneratorDefaults {
        pk: opts.pk.clone(),
        lang: opts.lang.clone(),
    };
    let defaults = serde_json::to_value(defaults).map_err(|e| ScaffoldError::InvalidConfig {
        path: ANGULAR_JSON.into(),
        message: e.to_string(),
    })?;
    workspace
        .schematics
        .get_or_insert_with(Default::default)
        .insert(DEFAULTS_KEY.into(), defaults);

    manifest::write_json(tree, ANGULAR_JSON, &workspace)
}

/// Declare the shared-state path alias in `tsconfig.json` (or
/// `tsconfig.app.json`). The file is rewritten only when the alias is added.
pub fn update_tsconfig(tree: &mut ProjectTree) -> Result<(), ScaffoldError> {
    let path = if tree.exists(TSCONFIG_JSON) {
        TSCONFIG_JSON
    } else {
        TSCONFIG_APP_JSON
    };
    let Some(text) = tree.read(path)? else {
        return Ok(());
    };

    let mut tsconfig: TsConfig = manifest::parse_lenient(path, &text)?;
    let paths = tsconfig
        .compiler_options
        .get_or_insert_with(Default::default)
        .paths
        .get_or_insert_with(Default::default);

    if paths.contains_key(SHARED_STATE_ALIAS) {
        return Ok(());
    }
    paths.insert(
        SHARED_STATE_ALIAS.into(),
        serde_json::json!([SHARED_STATE_PATH]),
    );
    manifest::write_json(tree, path, &tsconfig)
}

/// Run `npm install` in `root`.
pub fn install(root: &Path) -> Result<(), ScaffoldError> {
    println!("{} Installing packages...", "->".blue());
    let status = Command::new("npm")
        .arg("install")
        .current_dir(root)
        .status()
        .map_err(|e| ScaffoldError::Install(e.to_string()))?;

    if !status.success() {
        return Err(ScaffoldError::Install(format!("npm install exited with {status}")));
    }
    Ok(())
}
