use std::fs;
use std::path::{Path, PathBuf};
use storegen_cli::commands::store::{self, GenerationOptions};
use storegen_cli::commands::templates::Language;
use storegen_cli::error::ScaffoldError;
use storegen_cli::report::Warning;
use storegen_cli::tree::ProjectTree;
use tempfile::TempDir;

fn options(name: &str) -> GenerationOptions {
    GenerationOptions {
        name: name.to_string(),
        ..Default::default()
    }
}

fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap()
}

fn write(root: &Path, path: &str, content: &str) {
    let abs = root.join(path);
    fs::create_dir_all(abs.parent().unwrap()).unwrap();
    fs::write(abs, content).unwrap();
}

// ── layout ──────────────────────────────────────────────────────────

#[test]
fn store_generates_flat_layout_under_src_app_state() {
    let tmp = TempDir::new().unwrap();
    let report = store::run(tmp.path(), tmp.path(), &options("user")).unwrap();

    for path in [
        "src/app/state/index.ts",
        "src/app/state/user/user.store.ts",
        "src/app/state/user/user.service.ts",
        "src/app/state/user/user.model.ts",
        "src/app/shared/state/entity.model.ts",
        "src/app/shared/state/index.ts",
    ] {
        assert!(tmp.path().join(path).exists(), "missing {path}");
        assert!(report.written.contains(&PathBuf::from(path)), "not reported: {path}");
    }
    assert!(report.is_clean());
}

#[test]
fn store_grouped_layout_uses_subfolders() {
    let tmp = TempDir::new().unwrap();
    let opts = GenerationOptions {
        grouped: true,
        ..options("orderLine")
    };
    store::run(tmp.path(), tmp.path(), &opts).unwrap();

    let base = tmp.path().join("src/app/state/order-line");
    assert!(base.join("order-line.store.ts").exists());
    assert!(base.join("services/order-line.service.ts").exists());
    assert!(base.join("models/order-line.model.ts").exists());

    let store_ts = read(tmp.path(), "src/app/state/order-line/order-line.store.ts");
    assert!(store_ts.contains("from './models/order-line.model'"));
    assert!(store_ts.contains("from './services/order-line.service'"));
    let service_ts = read(tmp.path(), "src/app/state/order-line/services/order-line.service.ts");
    assert!(service_ts.contains("from '../models/order-line.model'"));

    let index = read(tmp.path(), "src/app/state/index.ts");
    assert_eq!(
        index,
        "/* ORDERLINE */\n\
         export * from './order-line/models/order-line.model';\n\
         export * from './order-line/services/order-line.service';\n\
         export * from './order-line/order-line.store';\n"
    );
}

#[test]
fn explicit_path_gets_state_appended() {
    let tmp = TempDir::new().unwrap();
    let opts = GenerationOptions {
        path: Some("src/app/features".into()),
        ..options("user")
    };
    store::run(tmp.path(), tmp.path(), &opts).unwrap();

    assert!(tmp.path().join("src/app/features/state/user/user.store.ts").exists());
    assert!(tmp.path().join("src/app/features/state/index.ts").exists());
}

#[test]
fn explicit_path_ending_in_state_is_used_as_is() {
    let tmp = TempDir::new().unwrap();
    let opts = GenerationOptions {
        path: Some("/libs/data/state/".into()),
        ..options("user")
    };
    store::run(tmp.path(), tmp.path(), &opts).unwrap();

    assert!(tmp.path().join("libs/data/state/user/user.store.ts").exists());
    assert!(!tmp.path().join("libs/data/state/state").exists());
}

#[test]
fn working_directory_inside_project_is_inferred() {
    let tmp = TempDir::new().unwrap();
    let cwd = tmp.path().join("src/app/admin");
    fs::create_dir_all(&cwd).unwrap();

    store::run(tmp.path(), &cwd, &options("user")).unwrap();

    assert!(tmp.path().join("src/app/admin/state/user/user.store.ts").exists());
}

#[test]
fn explicit_path_wins_over_working_directory() {
    let tmp = TempDir::new().unwrap();
    let cwd = tmp.path().join("src/app/admin");
    let opts = GenerationOptions {
        path: Some("src/app".into()),
        ..options("user")
    };
    store::run(tmp.path(), &cwd, &opts).unwrap();

    assert!(tmp.path().join("src/app/state/user/user.store.ts").exists());
    assert!(!tmp.path().join("src/app/admin").exists());
}

#[test]
fn source_root_comes_from_angular_json() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "angular.json",
        r#"{ "projects": { "shop": { "sourceRoot": "projects/shop/src" } } }"#,
    );

    store::run(tmp.path(), tmp.path(), &options("product")).unwrap();

    assert!(tmp
        .path()
        .join("projects/shop/src/app/state/product/product.store.ts")
        .exists());
}

// ── options ─────────────────────────────────────────────────────────

#[test]
fn primary_key_defaults_to_id() {
    let tmp = TempDir::new().unwrap();
    store::run(tmp.path(), tmp.path(), &options("user")).unwrap();

    let model = read(tmp.path(), "src/app/state/user/user.model.ts");
    assert!(model.contains("export interface User {\n  id: EntityId;\n}"));
    assert!(model.contains("Omit<User, 'id'>"));
}

#[test]
fn workspace_defaults_fill_unset_options() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "angular.json",
        r#"{ "projects": {}, "schematics": { "ngx-storegen:all": { "pk": "uuid", "lang": "es" } } }"#,
    );

    store::run(tmp.path(), tmp.path(), &options("ciudad")).unwrap();

    let model = read(tmp.path(), "src/app/state/ciudad/ciudad.model.ts");
    assert!(model.contains("uuid: EntityId;"));
    let service = read(tmp.path(), "src/app/state/ciudad/ciudad.service.ts");
    assert!(service.contains("'/api/ciudades'"));
}

#[test]
fn explicit_options_override_workspace_defaults() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "angular.json",
        r#"{ "schematics": { "ngx-storegen:all": { "pk": "uuid", "lang": "es" } } }"#,
    );
    let opts = GenerationOptions {
        pk: Some("code".into()),
        lang: Some(Language::En),
        ..options("city")
    };

    store::run(tmp.path(), tmp.path(), &opts).unwrap();

    let store_ts = read(tmp.path(), "src/app/state/city/city.store.ts");
    assert!(store_ts.contains("item.code"));
    assert!(store_ts.contains("loadCities()"));
}

#[test]
fn names_are_rendered_in_every_case() {
    let tmp = TempDir::new().unwrap();
    store::run(tmp.path(), tmp.path(), &options("user-profile")).unwrap();

    let store_ts = read(tmp.path(), "src/app/state/user-profile/user-profile.store.ts");
    assert!(store_ts.contains("export const UserProfileStore = signalStore("));
    assert!(store_ts.contains("inject(UserProfileService)"));
    assert!(store_ts.contains("userProfiles: computed(() => entities())"));
    assert!(store_ts.contains("async loadUserProfiles()"));
    assert!(!store_ts.contains("{{"));

    let service = read(tmp.path(), "src/app/state/user-profile/user-profile.service.ts");
    assert!(service.contains("export class UserProfileService"));
    assert!(service.contains("'/api/user-profiles'"));
}

#[test]
fn invalid_name_errors_before_writing() {
    let tmp = TempDir::new().unwrap();
    let err = store::run(tmp.path(), tmp.path(), &options("--")).unwrap_err();
    assert!(matches!(err, ScaffoldError::InvalidName(_)));
    assert!(fs::read_dir(tmp.path()).unwrap().next().is_none());
}

// ── re-runs ─────────────────────────────────────────────────────────

#[test]
fn rerun_for_same_entity_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    store::run(tmp.path(), tmp.path(), &options("user")).unwrap();
    let index_before = read(tmp.path(), "src/app/state/index.ts");

    let report = store::run(tmp.path(), tmp.path(), &options("user")).unwrap();

    assert!(report.written.is_empty());
    assert_eq!(report.skipped.len(), 5);
    assert_eq!(read(tmp.path(), "src/app/state/index.ts"), index_before);
}

#[test]
fn second_entity_extends_index_and_reuses_shared_files() {
    let tmp = TempDir::new().unwrap();
    store::run(tmp.path(), tmp.path(), &options("user")).unwrap();

    let report = store::run(tmp.path(), tmp.path(), &options("product")).unwrap();

    let index = read(tmp.path(), "src/app/state/index.ts");
    assert!(index.starts_with("/* USER */\n"));
    assert!(index.contains("\n\n/* PRODUCT */\n"));
    assert!(report
        .skipped
        .contains(&PathBuf::from("src/app/shared/state/entity.model.ts")));
    assert!(!report
        .written
        .contains(&PathBuf::from("src/app/shared/state/index.ts")));
}

#[test]
fn edited_shared_file_is_kept_with_warning() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "src/app/shared/state/entity.model.ts",
        "export type EntityId = string;\n",
    );

    let report = store::run(tmp.path(), tmp.path(), &options("user")).unwrap();

    assert_eq!(
        report.warnings,
        vec![Warning::Conflict(PathBuf::from(
            "src/app/shared/state/entity.model.ts"
        ))]
    );
    assert_eq!(
        read(tmp.path(), "src/app/shared/state/entity.model.ts"),
        "export type EntityId = string;\n"
    );
    assert!(tmp.path().join("src/app/state/user/user.store.ts").exists());
}

#[test]
fn edited_store_file_aborts_without_writing() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/app/state/user/user.store.ts", "// mine\n");

    let err = store::run(tmp.path(), tmp.path(), &options("user")).unwrap_err();

    assert!(matches!(err, ScaffoldError::FileConflict(_)));
    assert!(!tmp.path().join("src/app/state/index.ts").exists());
    assert!(!tmp.path().join("src/app/state/user/user.model.ts").exists());
    assert_eq!(read(tmp.path(), "src/app/state/user/user.store.ts"), "// mine\n");
}

#[test]
fn generate_only_stages_until_commit() {
    let tmp = TempDir::new().unwrap();
    let mut tree = ProjectTree::new(tmp.path());
    let mut report = Default::default();

    store::generate(&mut tree, tmp.path(), &options("user"), &mut report).unwrap();

    assert_eq!(tree.staged().count(), 6);
    assert!(!tmp.path().join("src").exists());
    assert_eq!(tree.commit().unwrap().len(), 6);
}
