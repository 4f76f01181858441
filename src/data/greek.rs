use std::fmt;

use log::debug;

use super::model::LineRecord;

// ---------------------------------------------------------------------------
// GreekSeries – transition series from the trailing species letter
// ---------------------------------------------------------------------------

/// Transition series of a recombination line (α: Δn = 1, β: Δn = 2, ...).
///
/// The catalogue writes the Greek letter as a single ASCII code at the end of
/// the species label (`H185\ga` is Hα). The variant order is the Greek
/// alphabetical order, which is the order lines are sorted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GreekSeries {
    Alpha,
    Beta,
    Gamma,
    Delta,
    Epsilon,
    Zeta,
    Eta,
    Theta,
    Iota,
    Kappa,
    Lambda,
    Mu,
    Nu,
    Xi,
    Omicron,
    Pi,
    Rho,
    Sigma,
    Tau,
    Upsilon,
    Phi,
    Chi,
    Psi,
    Omega,
}

use GreekSeries::*;

impl GreekSeries {
    pub const ALL: [GreekSeries; 24] = [
        Alpha, Beta, Gamma, Delta, Epsilon, Zeta, Eta, Theta, Iota, Kappa, Lambda, Mu, Nu, Xi,
        Omicron, Pi, Rho, Sigma, Tau, Upsilon, Phi, Chi, Psi, Omega,
    ];

    /// ASCII codes in Greek order. Not the Latin alphabet: θ is `q`, ξ is `x`,
    /// φ is `f`, χ is `c`, ψ is `y`.
    const CODES: [char; 24] = [
        'a', 'b', 'g', 'd', 'e', 'z', 'h', 'q', 'i', 'k', 'l', 'm', 'n', 'x', 'o', 'p', 'r', 's',
        't', 'u', 'f', 'c', 'y', 'w',
    ];

    const SYMBOLS: [char; 24] = [
        'α', 'β', 'γ', 'δ', 'ε', 'ζ', 'η', 'θ', 'ι', 'κ', 'λ', 'μ', 'ν', 'ξ', 'ο', 'π', 'ρ', 'σ',
        'τ', 'υ', 'φ', 'χ', 'ψ', 'ω',
    ];

    pub fn from_code(code: char) -> Option<Self> {
        Self::CODES
            .iter()
            .position(|&c| c == code)
            .map(|i| Self::ALL[i])
    }

    /// Series of a species label, read from its last character.
    pub fn of_species(species: &str) -> Option<Self> {
        species.chars().last().and_then(Self::from_code)
    }

    pub fn code(self) -> char {
        Self::CODES[self as usize]
    }

    pub fn symbol(self) -> char {
        Self::SYMBOLS[self as usize]
    }

    /// Jump in principal quantum number.
    pub fn delta_n(self) -> u32 {
        self as u32 + 1
    }
}

impl fmt::Display for GreekSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Order lines by transition series, α first.
///
/// Lines whose species does not end in one of the 24 series codes are
/// dropped. Lines of the same series keep their relative order.
pub fn sort_greek(records: &[LineRecord]) -> Vec<LineRecord> {
    let mut keyed: Vec<(GreekSeries, &LineRecord)> = records
        .iter()
        .filter_map(|r| r.greek_series().map(|g| (g, r)))
        .collect();

    let dropped = records.len() - keyed.len();
    if dropped > 0 {
        debug!("sort_greek: dropped {dropped} line(s) without a series suffix");
    }

    // sort_by_key is stable
    keyed.sort_by_key(|(series, _)| *series);
    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Origin;

    fn rrl(species: &str, freq: f64) -> LineRecord {
        LineRecord::new(species, freq, Origin::RecombinationLine)
    }

    fn species(records: &[LineRecord]) -> Vec<&str> {
        records.iter().map(|r| r.species.as_str()).collect()
    }

    #[test]
    fn code_mapping_is_greek_order() {
        assert_eq!(GreekSeries::from_code('a'), Some(Alpha));
        assert_eq!(GreekSeries::from_code('q'), Some(Theta));
        assert_eq!(GreekSeries::from_code('x'), Some(Xi));
        assert_eq!(GreekSeries::from_code('f'), Some(Phi));
        assert_eq!(GreekSeries::from_code('c'), Some(Chi));
        assert_eq!(GreekSeries::from_code('y'), Some(Psi));
        assert_eq!(GreekSeries::from_code('w'), Some(Omega));
        assert_eq!(GreekSeries::from_code('j'), None);
        assert_eq!(GreekSeries::from_code('v'), None);
        assert_eq!(Gamma.delta_n(), 3);
        assert_eq!(Omega.delta_n(), 24);
        for series in GreekSeries::ALL {
            assert_eq!(GreekSeries::from_code(series.code()), Some(series));
        }
    }

    #[test]
    fn sorts_by_series_not_latin_alphabet() {
        let input = vec![
            rrl("H60c", 1.0),  // chi
            rrl("H60f", 2.0),  // phi
            rrl("H60q", 3.0),  // theta
            rrl("H60h", 4.0),  // eta
            rrl("H60a", 5.0),  // alpha
        ];
        let sorted = sort_greek(&input);
        assert_eq!(species(&sorted), vec!["H60a", "H60h", "H60q", "H60f", "H60c"]);
    }

    #[test]
    fn stable_within_series() {
        let input = vec![
            rrl("H41b", 1.0),
            rrl("H40a", 2.0),
            rrl("H39b", 3.0),
            rrl("H38a", 4.0),
        ];
        let sorted = sort_greek(&input);
        assert_eq!(species(&sorted), vec!["H40a", "H38a", "H41b", "H39b"]);
    }

    #[test]
    fn drops_unknown_suffixes() {
        let input = vec![rrl("H40a", 1.0), rrl("H40j", 2.0), rrl("H40", 3.0), rrl("", 4.0)];
        let sorted = sort_greek(&input);
        assert_eq!(species(&sorted), vec!["H40a"]);
    }

    #[test]
    fn idempotent() {
        let input = vec![
            rrl("He50g", 1.0),
            rrl("H50a", 2.0),
            rrl("C50b", 3.0),
            rrl("H51a", 4.0),
        ];
        let once = sort_greek(&input);
        let twice = sort_greek(&once);
        assert_eq!(once, twice);
    }
}
