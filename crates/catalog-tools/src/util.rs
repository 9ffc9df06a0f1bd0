use models::snapshot::{CatalogSnapshot, StudentSnapshot};
use recommender::{ConfigError, EngineError};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Environment variable holding the catalog snapshot path
pub const CATALOG_PATH_VAR: &str = "CATALOG_PATH";
/// Environment variable holding the student snapshot path
pub const STUDENTS_PATH_VAR: &str = "STUDENTS_PATH";

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0} is not set")]
    MissingVar(&'static str),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unknown course code {0}")]
    UnknownCourse(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl From<ConfigError> for ToolError {
    fn from(error: ConfigError) -> Self {
        Self::Engine(error.into())
    }
}

/// Reads a path from the environment, loading `.env` first
///
/// # Arguments
/// * `var` - Name of the environment variable
pub fn env_path(var: &'static str) -> Result<PathBuf, ToolError> {
    dotenvy::dotenv().ok();
    std::env::var(var)
        .map(PathBuf::from)
        .map_err(|_| ToolError::MissingVar(var))
}

fn read(path: &Path) -> Result<String, ToolError> {
    fs::read_to_string(path).map_err(|source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a catalog snapshot exported by the curriculum service
pub fn load_catalog(path: &Path) -> Result<CatalogSnapshot, ToolError> {
    CatalogSnapshot::from_json(&read(path)?).map_err(|source| ToolError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the list of student snapshots
pub fn load_students(path: &Path) -> Result<Vec<StudentSnapshot>, ToolError> {
    StudentSnapshot::list_from_json(&read(path)?).map_err(|source| ToolError::Json {
        path: path.to_path_buf(),
        source,
    })
}
