use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{CatalogueError, ParseLineError};

use super::model::{LineRecord, LineStatus, Origin};

/// File name suffix of a source catalogue: `<source>.my-lines.list`.
pub const CATALOGUE_SUFFIX: &str = ".my-lines.list";

/// Non-blank rows preceding the data.
pub const HEADER_ROWS: usize = 5;

/// Byte offsets `[start, end)` of the twelve catalogue columns.
pub const COLUMN_SPECS: [(usize, usize); 12] = [
    (0, 1),    // status
    (1, 4),    // number of lines displayed
    (4, 19),   // species
    (19, 29),  // frequency [MHz]
    (29, 37),  // frequency error [MHz]
    (37, 45),  // upper energy [K]
    (45, 50),  // upper degeneracy
    (50, 60),  // Einstein A [s-1]
    (60, 75),  // upper level
    (75, 79),  // " -- "
    (79, 94),  // lower level
    (94, 100), // origin
];

const STATUS: usize = 0;
const SPECIES: usize = 2;
const FREQUENCY: usize = 3;
const UPPER: usize = 8;
const LOWER: usize = 10;
const ORIGIN: usize = 11;

/// Header written by [`format_catalogue`].
pub const CATALOGUE_HEADER: [&str; HEADER_ROWS] = [
    "         1         2         3         4         5         6         7         8         9         0",
    "1234567890123456789012345678901234567890123456789012345678901234567890123456789012345678901234567890",
    "----------------------------------------------------------------------------------------------------",
    "S  # Species        Freq[MHz] Err[MHz] Eup[K]  Gup  Aij[s-1]    Upper level -- Lower level    Origin",
    "----------------------------------------------------------------------------------------------------",
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// `<dir>/<source>.my-lines.list`
pub fn catalogue_path(dir: &Path, source: &str) -> PathBuf {
    dir.join(format!("{source}{CATALOGUE_SUFFIX}"))
}

/// Read and parse a fixed-width line catalogue.
///
/// The whole file is read in one go; any row failing to parse fails the load.
pub fn read_catalogue_file(path: &Path) -> Result<Vec<LineRecord>, CatalogueError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogueError::NotFound(path.to_path_buf()),
        _ => CatalogueError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let text = String::from_utf8(bytes).map_err(|_| CatalogueError::Encoding {
        path: path.to_path_buf(),
    })?;
    parse_catalogue(&text)
}

/// Parse catalogue text. Blank lines are ignored and the first
/// [`HEADER_ROWS`] non-blank rows are skipped. Row order is preserved.
///
/// `line` in a returned [`CatalogueError::Parse`] is 1-based and counts every
/// physical line of the input.
pub fn parse_catalogue(text: &str) -> Result<Vec<LineRecord>, CatalogueError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .skip(HEADER_ROWS)
        .map(|(i, line)| {
            parse_row(line).map_err(|source| CatalogueError::Parse { line: i + 1, source })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Parse one data row into a [`LineRecord`] with no band.
pub fn parse_row(line: &str) -> Result<LineRecord, ParseLineError> {
    // unrecognised status annotations read as no status
    let mut code = column(line, STATUS)?.chars();
    let status = match (code.next(), code.next()) {
        (Some(c), None) => LineStatus::from_code(c),
        _ => None,
    };

    let frequency_mhz = match column(line, FREQUENCY)? {
        "" => return Err(ParseLineError::MissingFrequency),
        raw => raw
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .ok_or_else(|| ParseLineError::InvalidFrequency(raw.to_string()))?,
    };

    Ok(LineRecord {
        status,
        species: column(line, SPECIES)?.to_string(),
        frequency_mhz,
        upper_level: column(line, UPPER)?.to_string(),
        lower_level: column(line, LOWER)?.to_string(),
        origin: Origin::parse(column(line, ORIGIN)?),
        band: None,
        telescope: None,
    })
}

/// Trimmed text of column `idx`. Columns past the end of a short line are empty.
fn column(line: &str, idx: usize) -> Result<&str, ParseLineError> {
    let (start, end) = COLUMN_SPECS[idx];
    if start >= line.len() {
        return Ok("");
    }
    let end = end.min(line.len());
    line.get(start..end)
        .map(str::trim)
        .ok_or(ParseLineError::NotCharBoundary { start, end })
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Format a record as a catalogue row. Unused columns are written as zeros;
/// text wider than its column is truncated.
pub fn format_row(number: usize, record: &LineRecord) -> String {
    let status = record.status.map(LineStatus::code).unwrap_or(' ');
    format!(
        "{status}{number:>3} {species:<14.14}{freq:>10.3}{err:>8.3}{eup:>8.1}{gup:>5}{aij:>10}{upper:>15.15} -- {lower:<15.15}{origin:>6.6}",
        number = number % 1000,
        species = record.species,
        freq = record.frequency_mhz,
        err = 0.0,
        eup = 0.0,
        gup = 1,
        aij = "0.00e+00",
        upper = record.upper_level,
        lower = record.lower_level,
        origin = record.origin.as_str(),
    )
}

/// Full catalogue text, header included.
pub fn format_catalogue(records: &[LineRecord]) -> String {
    let mut out = String::new();
    for line in CATALOGUE_HEADER {
        out.push_str(line);
        out.push('\n');
    }
    for (i, record) in records.iter().enumerate() {
        out.push_str(&format_row(i + 1, record));
        out.push('\n');
    }
    out
}
