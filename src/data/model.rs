use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::greek::GreekSeries;

/// Origin tag used by the catalogue for radio recombination lines.
pub const RRL_TAG: &str = "rrline";

/// Origin tag used by the catalogue for lines with no known carrier.
/// The catalogue writer spells it without the trailing `n`.
pub const UNKNOWN_TAG: &str = "unknow";

/// Species prefix marking an unidentified feature.
pub const UNIDENTIFIED_PREFIX: &str = "U-";

// ---------------------------------------------------------------------------
// LineStatus – the one-character status column
// ---------------------------------------------------------------------------

/// Observation status of a catalogue line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LineStatus {
    #[serde(rename = "D")]
    Detected,
    #[serde(rename = "T")]
    Tentative,
    #[serde(rename = "?")]
    Doubtful,
    #[serde(rename = "F")]
    Failed,
    #[serde(rename = "C")]
    Calculated,
}

impl LineStatus {
    pub const ALL: [LineStatus; 5] = [
        LineStatus::Detected,
        LineStatus::Tentative,
        LineStatus::Doubtful,
        LineStatus::Failed,
        LineStatus::Calculated,
    ];

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'D' => Some(LineStatus::Detected),
            'T' => Some(LineStatus::Tentative),
            '?' => Some(LineStatus::Doubtful),
            'F' => Some(LineStatus::Failed),
            'C' => Some(LineStatus::Calculated),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            LineStatus::Detected => 'D',
            LineStatus::Tentative => 'T',
            LineStatus::Doubtful => '?',
            LineStatus::Failed => 'F',
            LineStatus::Calculated => 'C',
        }
    }
}

impl fmt::Display for LineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for LineStatus {
    type Err = String;

    /// Accepts either the catalogue code (`D`, `T`, `?`, `F`, `C`) or the
    /// lowercase status name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(status) = LineStatus::from_code(c) {
                return Ok(status);
            }
        }
        match s.to_ascii_lowercase().as_str() {
            "detected" => Ok(LineStatus::Detected),
            "tentative" => Ok(LineStatus::Tentative),
            "doubtful" => Ok(LineStatus::Doubtful),
            "failed" => Ok(LineStatus::Failed),
            "calculated" => Ok(LineStatus::Calculated),
            _ => Err(format!("unknown line status '{s}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Origin – where the line identification comes from
// ---------------------------------------------------------------------------

/// Origin tag of a catalogue line: the discriminant of the origin splitter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Origin {
    /// Radio recombination line (`rrline`).
    RecombinationLine,
    /// No known carrier (`unknow`).
    Unknown,
    /// A molecular line database such as `jpl` or `cdms`.
    Database(String),
    /// The origin column was blank. Treated as molecular.
    Unspecified,
}

impl Origin {
    pub fn parse(tag: &str) -> Self {
        match tag.trim() {
            "" => Origin::Unspecified,
            RRL_TAG => Origin::RecombinationLine,
            "unknow" | "unknown" => Origin::Unknown,
            other => Origin::Database(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Origin::RecombinationLine => RRL_TAG,
            Origin::Unknown => UNKNOWN_TAG,
            Origin::Database(db) => db,
            Origin::Unspecified => "",
        }
    }

    /// Anything that is neither a recombination line nor unknown, blank
    /// origins included.
    pub fn is_molecular(&self) -> bool {
        !matches!(self, Origin::RecombinationLine | Origin::Unknown)
    }
}

impl From<String> for Origin {
    fn from(tag: String) -> Self {
        Origin::parse(&tag)
    }
}

impl From<Origin> for String {
    fn from(origin: Origin) -> Self {
        origin.as_str().to_string()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LineRecord – one row of the catalogue
// ---------------------------------------------------------------------------

/// One catalogue line. `band` and `telescope` are derived after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub status: Option<LineStatus>,
    pub species: String,
    #[serde(rename = "frequency_MHz")]
    pub frequency_mhz: f64,
    pub upper_level: String,
    pub lower_level: String,
    pub origin: Origin,
    pub band: Option<String>,
    pub telescope: Option<String>,
}

impl LineRecord {
    /// A record with blank status and levels, as used for hand-built tables.
    pub fn new(species: impl Into<String>, frequency_mhz: f64, origin: Origin) -> Self {
        Self {
            status: None,
            species: species.into(),
            frequency_mhz,
            upper_level: String::new(),
            lower_level: String::new(),
            origin,
            band: None,
            telescope: None,
        }
    }

    pub fn with_status(mut self, status: LineStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_levels(mut self, upper: impl Into<String>, lower: impl Into<String>) -> Self {
        self.upper_level = upper.into();
        self.lower_level = lower.into();
        self
    }

    /// Transition series given by the trailing letter of the species label.
    pub fn greek_series(&self) -> Option<GreekSeries> {
        GreekSeries::of_species(&self.species)
    }

    pub fn is_unidentified(&self) -> bool {
        self.species.starts_with(UNIDENTIFIED_PREFIX)
    }
}

// ---------------------------------------------------------------------------
// TableSummary – per-band counts for one output table
// ---------------------------------------------------------------------------

/// Row counts of a line table broken down by band.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSummary {
    pub rows: usize,
    /// band label → number of rows.
    pub bands: BTreeMap<String, usize>,
    /// Rows whose frequency fell outside every band.
    pub unbanded: usize,
    /// Lowest and highest frequency in MHz.
    pub frequency_range: Option<(f64, f64)>,
}

impl TableSummary {
    pub fn from_records(records: &[LineRecord]) -> Self {
        let mut summary = TableSummary {
            rows: records.len(),
            ..Default::default()
        };
        for record in records {
            match &record.band {
                Some(band) => *summary.bands.entry(band.clone()).or_default() += 1,
                None => summary.unbanded += 1,
            }
            let f = record.frequency_mhz;
            summary.frequency_range = Some(match summary.frequency_range {
                Some((lo, hi)) => (lo.min(f), hi.max(f)),
                None => (f, f),
            });
        }
        summary
    }
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lines", self.rows)?;
        if let Some((lo, hi)) = self.frequency_range {
            write!(f, " ({lo:.3} - {hi:.3} MHz)")?;
        }
        for (band, count) in &self.bands {
            write!(f, "\n  {band:>6}: {count}")?;
        }
        if self.unbanded > 0 {
            write!(f, "\n  {:>6}: {}", "<none>", self.unbanded)?;
        }
        Ok(())
    }
}
