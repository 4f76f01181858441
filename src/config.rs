use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::band::{BandNaming, BandTable};
use crate::data::species::HeliumOverlap;
use crate::data::telescope::{default_windows, TelescopeWindow};

// ---------------------------------------------------------------------------
// Config – paths and classification settings
// ---------------------------------------------------------------------------

/// Run configuration. Every field is optional in the JSON file.
///
/// ```json
/// {
///   "catalogue_dir": "./Source_Catalogues/",
///   "band_naming": "wavelength",
///   "helium_overlap": "exclusive",
///   "tag_telescopes": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `<source>.my-lines.list` files.
    pub catalogue_dir: PathBuf,
    /// Directory holding `<molecule>/<molecule>.dat` synthetic spectra.
    pub synthetic_dir: PathBuf,
    /// Where exported tables are written.
    pub results_dir: PathBuf,
    pub bands: BandTable,
    pub band_naming: BandNaming,
    pub telescopes: Vec<TelescopeWindow>,
    /// Fill the `telescope` column of the output tables.
    pub tag_telescopes: bool,
    pub helium_overlap: HeliumOverlap,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalogue_dir: PathBuf::from("./Source_Catalogues/"),
            synthetic_dir: PathBuf::from("./Synthetic/"),
            results_dir: PathBuf::from("RadioChem/Results/"),
            bands: BandTable::default(),
            band_naming: BandNaming::default(),
            telescopes: default_windows(),
            tag_telescopes: false,
            helium_overlap: HeliumOverlap::default(),
        }
    }
}

impl Config {
    /// Read a JSON configuration file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// [`Config::load`] when a path is given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "catalogue_dir": "/data/cats", "band_naming": "wavelength", "helium_overlap": "legacy" }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.catalogue_dir, PathBuf::from("/data/cats"));
        assert_eq!(config.band_naming, BandNaming::Wavelength);
        assert_eq!(config.helium_overlap, HeliumOverlap::Legacy);
        assert_eq!(config.results_dir, PathBuf::from("RadioChem/Results/"));
        assert_eq!(config.bands, BandTable::default());
        assert_eq!(config.telescopes.len(), 4);
        assert!(!config.tag_telescopes);
    }

    #[test]
    fn default_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
