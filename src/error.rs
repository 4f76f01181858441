use std::path::PathBuf;

use thiserror::Error;

/// Row-level failures of the fixed-width catalogue parser.
#[derive(Error, Debug, PartialEq)]
pub enum ParseLineError {
    #[error("column {start}..{end} does not fall on a character boundary")]
    NotCharBoundary { start: usize, end: usize },
    #[error("missing frequency")]
    MissingFrequency,
    #[error("invalid frequency '{0}'")]
    InvalidFrequency(String),
}

/// Failure to load a line catalogue. Either kind fails the whole file.
#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("catalogue file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unable to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", .path.display())]
    Encoding { path: PathBuf },

    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseLineError,
    },
}

impl CatalogueError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogueError::NotFound(_))
    }
}

/// Failure to load a synthetic line list.
#[derive(Error, Debug)]
pub enum SyntheticError {
    #[error("synthetic spectrum not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unable to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}
