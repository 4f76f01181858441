//! Synthetic line lists used for comparison against observed spectra.
//!
//! A synthetic spectrum file holds one predicted transition per row:
//! frequency in MHz and Einstein A coefficient in s⁻¹, separated by
//! whitespace, after [`SYNTHETIC_HEADER_ROWS`] header lines. Transitions with
//! `A = 0` are forbidden and are dropped on load.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::SyntheticError;

/// Lines preceding the data in a synthetic spectrum file.
pub const SYNTHETIC_HEADER_ROWS: usize = 8;

const PLANCK: f64 = 6.626_070_15e-34; // J s
const BOLTZMANN: f64 = 1.380_649e-23; // J / K
const SPEED_OF_LIGHT: f64 = 299_792_458.0; // m / s

/// One predicted transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticLine {
    #[serde(rename = "frequency_MHz")]
    pub frequency_mhz: f64,
    /// Einstein A coefficient, s⁻¹.
    pub einstein_a: f64,
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// `<dir>/<molecule>/<molecule>.dat`
pub fn synthetic_path(dir: &Path, molecule: &str) -> PathBuf {
    dir.join(molecule).join(format!("{molecule}.dat"))
}

pub fn read_synthetic_spectrum(path: &Path) -> Result<Vec<SyntheticLine>, SyntheticError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SyntheticError::NotFound(path.to_path_buf()),
        _ => SyntheticError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    parse_synthetic_spectrum(&text)
}

/// Parse the text of a synthetic spectrum. Only the first two columns are
/// read; blank lines after the header are ignored.
pub fn parse_synthetic_spectrum(text: &str) -> Result<Vec<SyntheticLine>, SyntheticError> {
    let mut lines = Vec::new();
    for (i, row) in text.lines().enumerate().skip(SYNTHETIC_HEADER_ROWS) {
        let mut fields = row.split_whitespace();
        let (freq, a) = match (fields.next(), fields.next()) {
            (None, _) => continue,
            (Some(freq), Some(a)) => (freq, a),
            (Some(_), None) => {
                return Err(SyntheticError::Parse {
                    line: i + 1,
                    reason: "expected frequency and Einstein A columns".into(),
                })
            }
        };
        let frequency_mhz = parse_number(freq, i + 1, "frequency")?;
        let einstein_a = parse_number(a, i + 1, "Einstein A")?;
        if einstein_a != 0.0 {
            lines.push(SyntheticLine {
                frequency_mhz,
                einstein_a,
            });
        }
    }
    Ok(lines)
}

fn parse_number(token: &str, line: usize, what: &str) -> Result<f64, SyntheticError> {
    token.parse::<f64>().map_err(|_| SyntheticError::Parse {
        line,
        reason: format!("{what} '{token}' is not a number"),
    })
}

// ---------------------------------------------------------------------------
// SyntheticLibrary – several molecules keyed by name
// ---------------------------------------------------------------------------

/// Synthetic line lists keyed by molecule name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntheticLibrary {
    spectra: BTreeMap<String, Vec<SyntheticLine>>,
}

impl SyntheticLibrary {
    /// Load `<dir>/<m>/<m>.dat` for every molecule. Fails on the first
    /// molecule that cannot be read.
    pub fn load<S: AsRef<str>>(dir: &Path, molecules: &[S]) -> Result<Self, SyntheticError> {
        let mut library = Self::default();
        for molecule in molecules {
            let molecule = molecule.as_ref();
            let lines = read_synthetic_spectrum(&synthetic_path(dir, molecule))?;
            info!("{molecule}: {} synthetic line(s) read", lines.len());
            library.insert(molecule, lines);
        }
        Ok(library)
    }

    pub fn insert(&mut self, molecule: &str, lines: Vec<SyntheticLine>) {
        self.spectra.insert(molecule.to_string(), lines);
    }

    pub fn get(&self, molecule: &str) -> Option<&[SyntheticLine]> {
        self.spectra.get(molecule).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SyntheticLine])> {
        self.spectra.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.spectra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spectra.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Antenna temperature
// ---------------------------------------------------------------------------

/// Emission parameters for [`antenna_temperature`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionParams {
    /// Line width in km/s.
    pub width_km_s: f64,
    /// Beam dilution factor, 1 when absent.
    pub dilution: Option<f64>,
    /// Optical depth, optically thin when absent.
    pub tau: Option<f64>,
    /// Upper-level column density in m⁻².
    pub column_density: f64,
}

impl EmissionParams {
    pub fn new(width_km_s: f64) -> Self {
        Self {
            width_km_s,
            dilution: None,
            tau: None,
            column_density: 1.0,
        }
    }
}

/// Antenna temperature in K of one transition:
/// `T = h c³ N A / (8π k ν² Δv) · η / C_τ`, with `C_τ = τ / (1 − e^−τ)`.
pub fn antenna_temperature(line: &SyntheticLine, params: &EmissionParams) -> f64 {
    let corr_tau = match params.tau {
        Some(tau) if tau > 0.0 => tau / (1.0 - (-tau).exp()),
        _ => 1.0,
    };
    let dilution = params.dilution.unwrap_or(1.0);
    let nu = line.frequency_mhz * 1.0e6;
    let dv = params.width_km_s * 1.0e3;

    PLANCK * SPEED_OF_LIGHT.powi(3) * params.column_density * line.einstein_a
        / (8.0 * PI * BOLTZMANN * nu * nu * dv)
        * dilution
        / corr_tau
}
