use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::greek::{sort_greek, GreekSeries};
use super::model::LineRecord;

// ---------------------------------------------------------------------------
// SpeciesClass – element and ionization stage of a recombination line
// ---------------------------------------------------------------------------

/// Element/ionization class of a recombination line, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpeciesClass {
    Hydrogen,
    Deuterium,
    Helium3,
    Helium,
    Carbon,
    Helium3II,
    HeliumII,
    CarbonII,
    CarbonIII,
    OxygenIII,
}

impl SpeciesClass {
    pub const ALL: [SpeciesClass; 10] = [
        SpeciesClass::Hydrogen,
        SpeciesClass::Deuterium,
        SpeciesClass::Helium3,
        SpeciesClass::Helium,
        SpeciesClass::Carbon,
        SpeciesClass::Helium3II,
        SpeciesClass::HeliumII,
        SpeciesClass::CarbonII,
        SpeciesClass::CarbonIII,
        SpeciesClass::OxygenIII,
    ];

    pub fn label(self) -> &'static str {
        self.rule().prefix
    }

    fn rule(self) -> &'static Rule {
        &RULES[self as usize]
    }

    /// Whether a species label belongs to this class.
    pub fn matches(self, species: &str, overlap: HeliumOverlap) -> bool {
        self.rule().matches(species, overlap)
    }
}

impl fmt::Display for SpeciesClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How `He…` and `HeII…` labels are separated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeliumOverlap {
    /// Helium excludes `HeII`, so every label lands in at most one class.
    #[default]
    Exclusive,
    /// Helium is every label starting with `He`; `HeII` lines are listed
    /// under both Helium and Helium II.
    Legacy,
}

// ---------------------------------------------------------------------------
// Prefix rules
// ---------------------------------------------------------------------------

struct Rule {
    class: SpeciesClass,
    prefix: &'static str,
    excludes: &'static [&'static str],
}

impl Rule {
    fn matches(&self, species: &str, overlap: HeliumOverlap) -> bool {
        if !species.starts_with(self.prefix) {
            return false;
        }
        let legacy_helium =
            self.class == SpeciesClass::Helium && overlap == HeliumOverlap::Legacy;
        legacy_helium || !self.excludes.iter().any(|ex| species.starts_with(ex))
    }
}

/// Indexed by `SpeciesClass as usize`.
const RULES: [Rule; 10] = [
    Rule {
        class: SpeciesClass::Hydrogen,
        prefix: "H",
        excludes: &["He", "3He"],
    },
    Rule {
        class: SpeciesClass::Deuterium,
        prefix: "D",
        excludes: &[],
    },
    Rule {
        class: SpeciesClass::Helium3,
        prefix: "3He",
        excludes: &["3HeII"],
    },
    Rule {
        class: SpeciesClass::Helium,
        prefix: "He",
        excludes: &["HeII"],
    },
    Rule {
        class: SpeciesClass::Carbon,
        prefix: "C",
        excludes: &["CII", "CIII"],
    },
    Rule {
        class: SpeciesClass::Helium3II,
        prefix: "3HeII",
        excludes: &[],
    },
    Rule {
        class: SpeciesClass::HeliumII,
        prefix: "HeII",
        excludes: &[],
    },
    Rule {
        class: SpeciesClass::CarbonII,
        prefix: "CII",
        excludes: &["CIII"],
    },
    Rule {
        class: SpeciesClass::CarbonIII,
        prefix: "CIII",
        excludes: &[],
    },
    Rule {
        class: SpeciesClass::OxygenIII,
        prefix: "OIII",
        excludes: &[],
    },
];

/// Class of a recombination-line species label, or `None` when no prefix
/// rule matches.
pub fn classify_species(species: &str) -> Option<SpeciesClass> {
    RULES
        .iter()
        .find(|rule| rule.matches(species, HeliumOverlap::Exclusive))
        .map(|rule| rule.class)
}

/// Group recombination lines by class, each class sorted by series.
///
/// Classes are concatenated in [`SpeciesClass::ALL`] order. Lines matching no
/// class, or without a series suffix, are dropped. Under
/// [`HeliumOverlap::Legacy`] a `HeII` line is also listed under Helium.
pub fn classify_rrls(records: &[LineRecord], overlap: HeliumOverlap) -> Vec<LineRecord> {
    let mut buckets: [Vec<LineRecord>; 10] = Default::default();
    let mut unmatched = 0;
    for record in records {
        let Some(class) = classify_species(&record.species) else {
            unmatched += 1;
            continue;
        };
        buckets[class as usize].push(record.clone());
        let also_helium = SpeciesClass::Helium.matches(&record.species, overlap);
        if class != SpeciesClass::Helium && also_helium {
            buckets[SpeciesClass::Helium as usize].push(record.clone());
        }
    }

    let mut classified = Vec::with_capacity(records.len());
    for bucket in &buckets {
        classified.extend(sort_greek(bucket));
    }

    if unmatched > 0 {
        debug!(
            "classify_rrls: {unmatched} of {} line(s) matched no class",
            records.len()
        );
    }
    classified
}

/// Number of lines per class and series, for recombination lines that have
/// both.
pub fn series_counts(records: &[LineRecord]) -> BTreeMap<(SpeciesClass, GreekSeries), usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        if let (Some(class), Some(series)) =
            (classify_species(&record.species), record.greek_series())
        {
            *counts.entry((class, series)).or_default() += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Origin;

    fn rrl(species: &str) -> LineRecord {
        LineRecord::new(species, 1000.0, Origin::RecombinationLine)
    }

    fn species(records: &[LineRecord]) -> Vec<&str> {
        records.iter().map(|r| r.species.as_str()).collect()
    }

    #[test]
    fn rules_are_indexed_by_class() {
        for class in SpeciesClass::ALL {
            assert_eq!(class.rule().class, class);
        }
    }

    #[test]
    fn prefixes() {
        use SpeciesClass::*;
        let cases = [
            ("H185a", Some(Hydrogen)),
            ("D90a", Some(Deuterium)),
            ("3He91a", Some(Helium3)),
            ("He42a", Some(Helium)),
            ("C65a", Some(Carbon)),
            ("3HeII120b", Some(Helium3II)),
            ("HeII84b", Some(HeliumII)),
            ("CII100a", Some(CarbonII)),
            ("CIII110a", Some(CarbonIII)),
            ("OIII120a", Some(OxygenIII)),
            ("HCN", Some(Hydrogen)),
            ("OII90a", None),
            ("N90a", None),
            ("U-87317.0", None),
        ];
        for (label, expected) in cases {
            assert_eq!(classify_species(label), expected, "{label}");
        }
    }

    #[test]
    fn exclusive_classes_are_disjoint() {
        let labels = [
            "H50a", "D50a", "3He50a", "He50a", "C50a", "3HeII50a", "HeII50a", "CII50a",
            "CIII50a", "OIII50a",
        ];
        for label in labels {
            let hits = SpeciesClass::ALL
                .iter()
                .filter(|c| c.matches(label, HeliumOverlap::Exclusive))
                .count();
            assert_eq!(hits, 1, "{label}");
        }
    }

    #[test]
    fn classes_in_fixed_order_then_series() {
        let input = vec![
            rrl("OIII90a"),
            rrl("He60b"),
            rrl("H60b"),
            rrl("C60a"),
            rrl("H61a"),
            rrl("He60a"),
            rrl("D60a"),
        ];
        let out = classify_rrls(&input, HeliumOverlap::Exclusive);
        assert_eq!(
            species(&out),
            vec!["H61a", "H60b", "D60a", "He60a", "He60b", "C60a", "OIII90a"]
        );
    }

    #[test]
    fn kept_plus_dropped_equals_input() {
        let input = vec![
            rrl("H60a"),
            rrl("N60a"),   // no class
            rrl("He60j"),  // no series
            rrl("CII60b"),
        ];
        let out = classify_rrls(&input, HeliumOverlap::Exclusive);
        assert_eq!(out.len() + 2, input.len());
    }

    #[test]
    fn legacy_overlap_lists_ionized_helium_twice() {
        let input = vec![rrl("HeII84b"), rrl("He42a")];

        let exclusive = classify_rrls(&input, HeliumOverlap::Exclusive);
        assert_eq!(species(&exclusive), vec!["He42a", "HeII84b"]);

        let legacy = classify_rrls(&input, HeliumOverlap::Legacy);
        assert_eq!(species(&legacy), vec!["He42a", "HeII84b", "HeII84b"]);
    }

    #[test]
    fn legacy_helium_keeps_file_order_before_sorting() {
        let input = vec![rrl("HeII84b"), rrl("He42a"), rrl("HeII85a")];
        let legacy = classify_rrls(&input, HeliumOverlap::Legacy);
        assert_eq!(
            species(&legacy),
            vec!["He42a", "HeII85a", "HeII84b", "HeII85a", "HeII84b"]
        );
    }

    #[test]
    fn exclusive_output_agrees_with_classify_species() {
        let input = vec![
            rrl("CIII60a"),
            rrl("3He60a"),
            rrl("H60b"),
            rrl("3HeII60a"),
            rrl("CII60a"),
            rrl("H60a"),
        ];
        let out = classify_rrls(&input, HeliumOverlap::Exclusive);
        let classes: Vec<SpeciesClass> = out
            .iter()
            .filter_map(|r| classify_species(&r.species))
            .collect();
        let mut sorted = classes.clone();
        sorted.sort();
        assert_eq!(classes.len(), input.len());
        assert_eq!(classes, sorted);
    }

    #[test]
    fn counts_by_class_and_series() {
        let input = vec![rrl("H41a"), rrl("H40a"), rrl("H41b"), rrl("HeII84b"), rrl("N90a")];
        let counts = series_counts(&input);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[&(SpeciesClass::Hydrogen, GreekSeries::Alpha)], 2);
        assert_eq!(counts[&(SpeciesClass::HeliumII, GreekSeries::Beta)], 1);

        let labels: Vec<String> = counts
            .keys()
            .map(|(class, series)| format!("{class}{series}"))
            .collect();
        assert_eq!(labels, vec!["Hα", "Hβ", "HeIIβ"]);
    }
}
