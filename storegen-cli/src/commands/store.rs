use std::path::{Path, PathBuf};
use tracing::info;

use super::add::DEFAULTS_KEY;
use super::templates::state::{self, render_group};
use super::templates::{pluralize, to_camel_case, to_kebab_case, to_pascal_case, Language};
use crate::error::ScaffoldError;
use crate::index::{update_index, ExportBlock};
use crate::manifest::{self, AngularJson, ANGULAR_JSON};
use crate::merge::{merge_files, MergeMode};
use crate::report::Report;
use crate::tree::{normalize, ProjectTree};

/// Directory the shared entity group is merged into.
pub const SHARED_STATE_DIR: &str = "src/app/shared/state";
pub const INDEX_FILE: &str = "index.ts";

/// Options for `storegen store`, as given on the command line.
///
/// Unset options are filled from the workspace defaults written by
/// `storegen add`, then from built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    pub name: String,
    pub path: Option<String>,
    pub grouped: bool,
    pub pk: Option<String>,
    pub lang: Option<Language>,
}

/// Every spelling of the entity name the templates need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityNames {
    pub class: String,
    pub camel: String,
    pub dash: String,
    pub plural_class: String,
    pub plural_camel: String,
    pub plural_dash: String,
}

impl EntityNames {
    pub fn new(name: &str, lang: Language) -> Result<Self, ScaffoldError> {
        let dash = to_kebab_case(name);
        if dash.is_empty() {
            return Err(ScaffoldError::InvalidName(name.to_string()));
        }
        let class = to_pascal_case(name);
        let camel = to_camel_case(name);
        Ok(EntityNames {
            plural_class: pluralize(&class, lang),
            plural_camel: pluralize(&camel, lang),
            plural_dash: pluralize(&dash, lang),
            class,
            camel,
            dash,
        })
    }
}

/// Fully resolved generation plan.
#[derive(Debug, Clone)]
pub struct Plan {
    pub names: EntityNames,
    /// The `state` directory holding the index, relative to the project root.
    pub state_dir: PathBuf,
    pub grouped: bool,
    pub pk: String,
    pub lang: Language,
}

impl Plan {
    pub fn entity_dir(&self) -> PathBuf {
        self.state_dir.join(&self.names.dash)
    }

    fn grouped_dir(&self, folder: &str) -> PathBuf {
        if self.grouped {
            self.entity_dir().join(folder)
        } else {
            self.entity_dir()
        }
    }

    pub fn services_dir(&self) -> PathBuf {
        self.grouped_dir("services")
    }

    pub fn models_dir(&self) -> PathBuf {
        self.grouped_dir("models")
    }

    pub fn index_path(&self) -> PathBuf {
        self.state_dir.join(INDEX_FILE)
    }
}

/// Fill in defaults and compute every target path.
///
/// `cwd` is only consulted when no explicit path was given: a working
/// directory strictly inside the project root becomes the output path,
/// otherwise `<sourceRoot>/app` is used.
pub fn resolve(
    tree: &ProjectTree,
    cwd: &Path,
    opts: &GenerationOptions,
) -> Result<Plan, ScaffoldError> {
    let workspace: AngularJson = manifest::read_json(tree, ANGULAR_JSON)?.unwrap_or_default();
    let defaults = workspace.generator_defaults(DEFAULTS_KEY).unwrap_or_default();

    let pk = opts
        .pk
        .clone()
        .or(defaults.pk)
        .unwrap_or_else(|| "id".to_string());
    let lang = opts
        .lang
        .or_else(|| defaults.lang.as_deref().map(Language::from_tag))
        .unwrap_or_default();

    let base = match &opts.path {
        Some(path) => normalize(Path::new(path)),
        None => inferred_path(tree.root(), cwd)
            .unwrap_or_else(|| normalize(Path::new(&workspace.source_root())).join("app")),
    };
    let state_dir = if base.ends_with("state") {
        base
    } else {
        base.join("state")
    };

    Ok(Plan {
        names: EntityNames::new(&opts.name, lang)?,
        state_dir,
        grouped: opts.grouped,
        pk,
        lang,
    })
}

fn inferred_path(root: &Path, cwd: &Path) -> Option<PathBuf> {
    let rel = cwd.strip_prefix(root).ok()?;
    if rel.as_os_str().is_empty() {
        return None;
    }
    Some(normalize(rel))
}

/// Generate the state module for one entity and persist it.
pub fn run(root: &Path, cwd: &Path, opts: &GenerationOptions) -> Result<Report, ScaffoldError> {
    let mut tree = ProjectTree::new(root);
    let mut report = Report::default();
    generate(&mut tree, cwd, opts, &mut report)?;
    report.written = tree.commit()?;
    Ok(report)
}

/// Stage the index update and the four template groups on `tree`.
///
/// Store, service and model files must either be absent or already contain
/// the generated content; anything else aborts the run. Shared entity files
/// that diverge are kept and reported as warnings.
pub fn generate(
    tree: &mut ProjectTree,
    cwd: &Path,
    opts: &GenerationOptions,
    report: &mut Report,
) -> Result<(), ScaffoldError> {
    let plan = resolve(tree, cwd, opts)?;
    let names = &plan.names;
    info!(
        entity = %names.class,
        state_dir = %plan.state_dir.display(),
        grouped = plan.grouped,
        lang = %plan.lang,
        "generating state module"
    );

    let block = ExportBlock::for_entity(&names.class, &names.dash, plan.grouped);
    update_index(tree, &plan.index_path(), &block)?;

    let dash = &names.dash;
    let (store_model_import, store_service_import, service_model_import) = if plan.grouped {
        (
            format!("./models/{dash}.model"),
            format!("./services/{dash}.service"),
            format!("../models/{dash}.model"),
        )
    } else {
        (
            format!("./{dash}.model"),
            format!("./{dash}.service"),
            format!("./{dash}.model"),
        )
    };

    let vars: [(&str, &str); 10] = [
        ("class", names.class.as_str()),
        ("camel", names.camel.as_str()),
        ("dash", names.dash.as_str()),
        ("plural_class", names.plural_class.as_str()),
        ("plural_camel", names.plural_camel.as_str()),
        ("plural_dash", names.plural_dash.as_str()),
        ("pk", plan.pk.as_str()),
        ("store_model_import", store_model_import.as_str()),
        ("store_service_import", store_service_import.as_str()),
        ("service_model_import", service_model_import.as_str()),
    ];

    let groups = [
        (state::STORE, plan.entity_dir()),
        (state::SERVICES, plan.services_dir()),
        (state::MODELS, plan.models_dir()),
    ];
    for (group, dest) in groups {
        merge_files(tree, render_group(group, &dest, &vars), MergeMode::Strict, report)?;
    }

    merge_files(
        tree,
        render_group(state::ENTITY, Path::new(SHARED_STATE_DIR), &vars),
        MergeMode::Smart,
        report,
    )
}
