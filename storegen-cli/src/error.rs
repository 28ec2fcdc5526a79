use std::path::PathBuf;

/// Fatal error type for scaffolding operations.
///
/// Anything that should merely be reported while the run continues is a
/// [`Warning`](crate::report::Warning) on the returned report instead.
#[derive(Debug)]
pub enum ScaffoldError {
    /// No `package.json` at the project root.
    MissingManifest,
    /// `@angular/core` is not declared, or its version has no major number.
    FrameworkNotDetected,
    /// A JSON document could not be parsed or has an unexpected shape.
    InvalidConfig { path: PathBuf, message: String },
    /// An entity file already exists with different content.
    FileConflict(PathBuf),
    /// The entity name yields no usable identifier.
    InvalidName(String),
    /// A filesystem operation failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// An interactive prompt failed.
    Prompt(String),
    /// The package install step failed.
    Install(String),
}

impl ScaffoldError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScaffoldError::Io {
            path: path.into(),
            source,
        }
    }
}

impl std::fmt::Display for ScaffoldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaffoldError::MissingManifest => write!(
                f,
                "Could not find package.json. Make sure you are in the root of an Angular project."
            ),
            ScaffoldError::FrameworkNotDetected => write!(
                f,
                "The version of @angular/core could not be determined. Please ensure that Angular is installed in your project."
            ),
            ScaffoldError::InvalidConfig { path, message } => write!(
                f,
                "Could not parse {}: {message}. Make sure it is valid JSON.",
                path.display()
            ),
            ScaffoldError::FileConflict(path) => write!(
                f,
                "File '{}' already exists with different content",
                path.display()
            ),
            ScaffoldError::InvalidName(name) => write!(f, "Invalid entity name '{name}'"),
            ScaffoldError::Io { path, source } => {
                write!(f, "I/O error on '{}': {source}", path.display())
            }
            ScaffoldError::Prompt(msg) => write!(f, "Prompt failed: {msg}"),
            ScaffoldError::Install(msg) => write!(f, "Package install failed: {msg}"),
        }
    }
}

impl std::error::Error for ScaffoldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaffoldError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<dialoguer::Error> for ScaffoldError {
    fn from(err: dialoguer::Error) -> Self {
        ScaffoldError::Prompt(err.to_string())
    }
}
