use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use storegen_cli::commands::templates::Language;
use storegen_cli::commands::{add, store};
use storegen_cli::error::ScaffoldError;
use storegen_cli::report::Report;
use storegen_cli::{logging, manifest};

#[derive(Parser)]
#[command(
    name = "storegen",
    version,
    about = "storegen - scaffold signal-store state modules for Angular projects"
)]
struct Cli {
    /// Project root (defaults to the nearest directory with angular.json or package.json)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up the project: dependencies, workspace registration, path alias
    Add {
        /// Primary key field used by generated code
        #[arg(long)]
        pk: Option<String>,
        /// Pluralization language (en, es)
        #[arg(long)]
        lang: Option<String>,
        /// Skip interactive prompts
        #[arg(long)]
        no_interactive: bool,
        /// Do not run `npm install` afterwards
        #[arg(long)]
        skip_install: bool,
    },
    /// Generate model, service and store for an entity
    #[command(alias = "s")]
    Store {
        /// Entity name (e.g. user, orderLine, order-line)
        name: String,
        /// Output path; `state` is appended unless it is already the last segment
        #[arg(long)]
        path: Option<String>,
        /// Place services and models in dedicated subfolders
        #[arg(long)]
        grouped: bool,
        /// Primary key field
        #[arg(long)]
        pk: Option<String>,
        /// Pluralization language
        #[arg(long, value_enum)]
        lang: Option<Language>,
    },
}

fn run(cli: Cli) -> Result<Report, ScaffoldError> {
    let cwd = std::env::current_dir().map_err(|e| ScaffoldError::Io {
        path: PathBuf::from("."),
        source: e,
    })?;
    let root = match cli.root {
        Some(root) => std::fs::canonicalize(&root).map_err(|e| ScaffoldError::Io {
            path: root.clone(),
            source: e,
        })?,
        None => manifest::find_root(&cwd).unwrap_or_else(|| cwd.clone()),
    };

    match cli.command {
        Commands::Add {
            pk,
            lang,
            no_interactive,
            skip_install,
        } => add::run(
            &root,
            add::CliAddOpts {
                pk,
                lang,
                no_interactive,
                skip_install,
            },
        ),
        Commands::Store {
            name,
            path,
            grouped,
            pk,
            lang,
        } => store::run(
            &root,
            &cwd,
            &store::GenerationOptions {
                name,
                path,
                grouped,
                pk,
                lang,
            },
        ),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match run(cli) {
        Ok(report) => {
            report.print();
            if report.halted() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{}", format!("Error: {e}").red());
            std::process::exit(1);
        }
    }
}
