use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PrepError>;

/// Everything that can go wrong while preparing a docking run.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("I/O error on '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read structure '{path}': {message}", path = path.display())]
    Structure { path: PathBuf, message: String },

    #[error("No {what} found in '{path}'", path = path.display())]
    EmptyStructure { path: PathBuf, what: &'static str },

    #[error("Could not determine bodies from an empty atom list")]
    NoBodies,

    #[error("'{tool}' exited with {status}: {stderr}")]
    ExternalTool {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("Invalid residue number '{0}'")]
    ResidueNumber(String),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Table(#[from] polars::error::PolarsError),
}

impl PrepError {
    /// Attach the offending path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PrepError::Io {
            path: path.into(),
            source,
        }
    }
}
