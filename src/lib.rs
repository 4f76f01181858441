pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod source;

pub use config::Config;
pub use data::model::{LineRecord, LineStatus, Origin};
pub use error::{CatalogueError, SyntheticError};
pub use source::{SourceCatalogue, TableKind};
