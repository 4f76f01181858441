use std::fmt;
use std::path::PathBuf;

use log::{error, info};

use crate::config::Config;
use crate::data::catalogue::{catalogue_path, read_catalogue_file};
use crate::data::filter::{apply_filter, LineFilter};
use crate::data::model::{LineRecord, TableSummary};
use crate::data::origin::{split_catalogue, ClassifiedLines};
use crate::data::species::classify_rrls;
use crate::error::CatalogueError;

/// Name of the reference catalogue that lists recombination lines only.
pub const REFERENCE_RRLS: &str = "rrls";

// ---------------------------------------------------------------------------
// TableKind – selects one of the three output tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableKind {
    Rrls,
    Molecules,
    Unidentified,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [
        TableKind::Rrls,
        TableKind::Molecules,
        TableKind::Unidentified,
    ];

    /// Short name used in file names and headings.
    pub fn name(self) -> &'static str {
        match self {
            TableKind::Rrls => "rrls",
            TableKind::Molecules => "molecules",
            TableKind::Unidentified => "uf",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// SourceCatalogue – one astronomical source, parsed and classified
// ---------------------------------------------------------------------------

/// A loaded source catalogue together with its three derived tables.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceCatalogue {
    pub name: String,
    pub path: PathBuf,
    /// Parsed catalogue in file order.
    pub catalogue: Vec<LineRecord>,
    pub lines: ClassifiedLines,
}

impl SourceCatalogue {
    /// Parse `<catalogue_dir>/<name>.my-lines.list` and classify it.
    pub fn load(config: &Config, name: &str) -> Result<Self, CatalogueError> {
        let path = catalogue_path(&config.catalogue_dir, name);
        let catalogue = read_catalogue_file(&path)?;
        info!("{name} data read successfully ({} lines)", catalogue.len());
        Ok(Self::from_records(config, name, path, catalogue))
    }

    /// Like [`SourceCatalogue::load`], but logs a failure and returns `None`.
    pub fn open(config: &Config, name: &str) -> Option<Self> {
        match Self::load(config, name) {
            Ok(source) => Some(source),
            Err(e) => {
                if e.is_not_found() {
                    error!("{name}: file not found ({e})");
                } else {
                    error!("{name}: error reading catalogue: {e}");
                }
                None
            }
        }
    }

    /// Classify records that were parsed elsewhere.
    pub fn from_records(
        config: &Config,
        name: &str,
        path: PathBuf,
        catalogue: Vec<LineRecord>,
    ) -> Self {
        let mut lines = split_catalogue(
            &catalogue,
            &config.bands,
            config.band_naming,
            config.helium_overlap,
        );
        if config.tag_telescopes {
            lines = lines.tag_telescopes(&config.telescopes);
        }
        Self {
            name: name.to_string(),
            path,
            catalogue,
            lines,
        }
    }

    pub fn table(&self, kind: TableKind) -> &[LineRecord] {
        match kind {
            TableKind::Rrls => &self.lines.rrls,
            TableKind::Molecules => &self.lines.molecules,
            TableKind::Unidentified => &self.lines.unidentified,
        }
    }

    pub fn filtered(&self, kind: TableKind, filter: &LineFilter) -> Vec<LineRecord> {
        apply_filter(self.table(kind), filter)
    }

    pub fn summary(&self, kind: TableKind) -> TableSummary {
        TableSummary::from_records(self.table(kind))
    }
}

/// Read the reference `rrls` catalogue and classify all of it by element and
/// series, without an origin split or bands.
pub fn reference_rrls(config: &Config) -> Result<Vec<LineRecord>, CatalogueError> {
    let path = catalogue_path(&config.catalogue_dir, REFERENCE_RRLS);
    let catalogue = read_catalogue_file(&path)?;
    info!("{REFERENCE_RRLS} data read successfully ({} lines)", catalogue.len());
    Ok(classify_rrls(&catalogue, config.helium_overlap))
}
