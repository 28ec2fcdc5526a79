use colored::Colorize;
use std::path::PathBuf;

/// A non-fatal condition raised during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A shared file exists with diverging content and was left untouched.
    Conflict(PathBuf),
    /// The detected framework major version is below the supported floor.
    /// Nothing was modified.
    VersionGate { detected: u32, minimum: u32 },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::Conflict(path) => write!(
                f,
                "{} already exists with different content; left untouched",
                path.display()
            ),
            Warning::VersionGate { detected, minimum } => write!(
                f,
                "Angular v{minimum} or higher is required. Detected: v{detected}"
            ),
        }
    }
}

/// Outcome of a successful (non-aborted) run.
#[derive(Debug, Default)]
pub struct Report {
    /// Files written to disk, relative to the project root.
    pub written: Vec<PathBuf>,
    /// Generated files that were already merged and left alone.
    pub skipped: Vec<PathBuf>,
    pub warnings: Vec<Warning>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn halted(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, Warning::VersionGate { .. }))
    }

    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Print the report with the CLI's colored markers.
    pub fn print(&self) {
        for path in &self.written {
            println!("{} {}", "✓".green(), path.display().to_string().cyan());
        }
        for path in &self.skipped {
            println!(
                "{} {}",
                "-".dimmed(),
                format!("{} (up to date)", path.display()).dimmed()
            );
        }
        for warning in &self.warnings {
            println!("{} {}", "!".yellow(), warning.to_string().yellow());
        }
    }
}
