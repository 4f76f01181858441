use log::debug;

use super::band::{BandNaming, BandTable};
use super::model::{LineRecord, Origin};
use super::species::{classify_rrls, HeliumOverlap};
use super::telescope::{tag_telescopes, TelescopeWindow};

/// The three output tables of a source catalogue, each banded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedLines {
    /// Recombination lines by element and series.
    pub rrls: Vec<LineRecord>,
    /// Lines from a molecular database, in catalogue order.
    pub molecules: Vec<LineRecord>,
    /// Unidentified features (`U-` species), in catalogue order.
    pub unidentified: Vec<LineRecord>,
}

impl ClassifiedLines {
    pub fn tag_telescopes(self, windows: &[TelescopeWindow]) -> Self {
        Self {
            rrls: tag_telescopes(&self.rrls, windows),
            molecules: tag_telescopes(&self.molecules, windows),
            unidentified: tag_telescopes(&self.unidentified, windows),
        }
    }

    pub fn total(&self) -> usize {
        self.rrls.len() + self.molecules.len() + self.unidentified.len()
    }
}

/// Recombination lines (origin `rrline`), classified by element and series.
pub fn get_rrls(records: &[LineRecord], overlap: HeliumOverlap) -> Vec<LineRecord> {
    let rrls: Vec<LineRecord> = records
        .iter()
        .filter(|r| r.origin == Origin::RecombinationLine)
        .cloned()
        .collect();
    classify_rrls(&rrls, overlap)
}

/// Lines whose origin is neither `rrline` nor `unknow`.
pub fn get_molecules(records: &[LineRecord]) -> Vec<LineRecord> {
    records
        .iter()
        .filter(|r| r.origin.is_molecular())
        .cloned()
        .collect()
}

/// Unidentified features. Keyed on the species prefix, not on origin.
pub fn get_unidentified(records: &[LineRecord]) -> Vec<LineRecord> {
    records
        .iter()
        .filter(|r| r.is_unidentified())
        .cloned()
        .collect()
}

/// Split a parsed catalogue into recombination lines, molecules and
/// unidentified features, and band all three.
pub fn split_catalogue(
    records: &[LineRecord],
    bands: &BandTable,
    naming: BandNaming,
    overlap: HeliumOverlap,
) -> ClassifiedLines {
    let lines = ClassifiedLines {
        rrls: bands.assign(&get_rrls(records, overlap), naming),
        molecules: bands.assign(&get_molecules(records), naming),
        unidentified: bands.assign(&get_unidentified(records), naming),
    };
    debug!(
        "split {} line(s): {} rrl, {} molecular, {} unidentified",
        records.len(),
        lines.rrls.len(),
        lines.molecules.len(),
        lines.unidentified.len()
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue() -> Vec<LineRecord> {
        vec![
            LineRecord::new("H185a", 87317.0, Origin::RecombinationLine),
            LineRecord::new("HC3N", 90979.0, Origin::Database("cdms".into())),
            LineRecord::new("U-12.345", 12.345, Origin::Database("jpl".into())),
            LineRecord::new("U-35000.0", 35000.0, Origin::Unknown),
            LineRecord::new("CH3OH", 96741.4, Origin::Database("jpl".into())),
            LineRecord::new("He42a", 85000.0, Origin::RecombinationLine),
            LineRecord::new("X-odd", 1500.0, Origin::Unspecified),
        ]
    }

    fn species(records: &[LineRecord]) -> Vec<&str> {
        records.iter().map(|r| r.species.as_str()).collect()
    }

    #[test]
    fn splits_by_origin_and_prefix() {
        let lines = split_catalogue(
            &catalogue(),
            &BandTable::default(),
            BandNaming::Radar,
            HeliumOverlap::Exclusive,
        );
        assert_eq!(species(&lines.rrls), vec!["H185a", "He42a"]);
        assert_eq!(
            species(&lines.molecules),
            vec!["HC3N", "U-12.345", "CH3OH", "X-odd"]
        );
        assert_eq!(species(&lines.unidentified), vec!["U-12.345", "U-35000.0"]);
    }

    #[test]
    fn blank_origin_is_kept_as_molecular() {
        let input = [LineRecord::new("SiC2", 93063.6, Origin::Unspecified)];
        let lines = split_catalogue(
            &input,
            &BandTable::default(),
            BandNaming::Radar,
            HeliumOverlap::Exclusive,
        );
        assert_eq!(species(&lines.molecules), vec!["SiC2"]);
        assert_eq!(lines.molecules[0].band.as_deref(), Some("3mm"));
        assert!(lines.rrls.is_empty());
        assert!(lines.unidentified.is_empty());
    }

    #[test]
    fn hydrogen_alpha_at_3mm() {
        let lines = split_catalogue(
            &catalogue(),
            &BandTable::default(),
            BandNaming::Radar,
            HeliumOverlap::Exclusive,
        );
        let h = &lines.rrls[0];
        assert_eq!(h.species, "H185a");
        assert_eq!(h.band.as_deref(), Some("3mm"));
    }

    #[test]
    fn unidentified_features_are_banded_per_row() {
        let lines = split_catalogue(
            &catalogue(),
            &BandTable::default(),
            BandNaming::Radar,
            HeliumOverlap::Exclusive,
        );
        let bands: Vec<Option<&str>> = lines
            .unidentified
            .iter()
            .map(|r| r.band.as_deref())
            .collect();
        assert_eq!(bands, vec![None, Some("Q")]);
    }

    #[test]
    fn input_is_not_modified() {
        let input = catalogue();
        let before = input.clone();
        let _ = split_catalogue(
            &input,
            &BandTable::default(),
            BandNaming::Radar,
            HeliumOverlap::Exclusive,
        );
        assert_eq!(input, before);
    }
}
