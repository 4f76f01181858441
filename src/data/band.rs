use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::model::LineRecord;

// ---------------------------------------------------------------------------
// Frequency bands
// ---------------------------------------------------------------------------

/// One observing band: an inclusive frequency interval in MHz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSpec {
    /// Wavelength label, e.g. `3mm` or `20cm`.
    pub label: String,
    pub lower_mhz: f64,
    pub upper_mhz: f64,
    /// Radar band letter used instead of `label` under [`BandNaming::Radar`].
    #[serde(default)]
    pub radar_code: Option<String>,
}

impl BandSpec {
    pub fn new(label: &str, lower_mhz: f64, upper_mhz: f64, radar_code: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            lower_mhz,
            upper_mhz,
            radar_code: radar_code.map(str::to_string),
        }
    }

    pub fn contains(&self, frequency_mhz: f64) -> bool {
        frequency_mhz >= self.lower_mhz && frequency_mhz <= self.upper_mhz
    }

    pub fn name(&self, naming: BandNaming) -> &str {
        match (naming, &self.radar_code) {
            (BandNaming::Radar, Some(code)) => code,
            _ => &self.label,
        }
    }
}

/// Which label a banded line carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandNaming {
    /// Radar letter for bands that have one, wavelength label otherwise.
    #[default]
    Radar,
    /// Always the wavelength label.
    Wavelength,
}

/// Ordered, immutable list of observing bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BandTable {
    bands: Vec<BandSpec>,
}

impl Default for BandTable {
    /// 0.9 mm down to 20 cm.
    fn default() -> Self {
        Self::new(vec![
            BandSpec::new("0.9mm", 277.0e3, 375.0e3, None),
            BandSpec::new("1mm", 202.0e3, 274.0e3, None),
            BandSpec::new("2mm", 125.0e3, 184.0e3, None),
            BandSpec::new("3mm", 73.0e3, 117.0e3, None),
            BandSpec::new("7mm", 30.0e3, 50.0e3, Some("Q")),
            BandSpec::new("13mm", 16.0e3, 27.0e3, Some("K")),
            BandSpec::new("25mm", 8.0e3, 12.0e3, Some("X")),
            BandSpec::new("5cm", 4.0e3, 8.0e3, Some("C")),
            BandSpec::new("10cm", 2.0e3, 4.0e3, Some("S")),
            BandSpec::new("20cm", 1.0e3, 2.0e3, Some("L")),
        ])
    }
}

impl BandTable {
    pub fn new(bands: Vec<BandSpec>) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> &[BandSpec] {
        &self.bands
    }

    /// Band containing a frequency. When intervals share a bound the later
    /// band in table order wins.
    pub fn find(&self, frequency_mhz: f64) -> Option<&BandSpec> {
        self.bands.iter().rev().find(|b| b.contains(frequency_mhz))
    }

    pub fn label_for(&self, frequency_mhz: f64, naming: BandNaming) -> Option<&str> {
        self.find(frequency_mhz).map(|b| b.name(naming))
    }

    /// Every label a line can be given, under either naming.
    pub fn canonical_labels(&self) -> BTreeSet<&str> {
        self.bands
            .iter()
            .flat_map(|b| std::iter::once(b.label.as_str()).chain(b.radar_code.as_deref()))
            .collect()
    }

    /// Copy of `records` with `band` set from each line's frequency.
    pub fn assign(&self, records: &[LineRecord], naming: BandNaming) -> Vec<LineRecord> {
        records
            .iter()
            .map(|r| LineRecord {
                band: self.label_for(r.frequency_mhz, naming).map(str::to_string),
                ..r.clone()
            })
            .collect()
    }
}
