use std::path::PathBuf;

use anyhow::{Context, Result};

use radiochem::data::catalogue::{catalogue_path, format_catalogue};
use radiochem::data::greek::GreekSeries;
use radiochem::{LineRecord, LineStatus, Origin};

/// Rydberg constant times c, in MHz.
const RYDBERG_MHZ: f64 = 3.289_841_960_250_8e9;

/// Electron mass in atomic mass units.
const ELECTRON_MASS_U: f64 = 5.485_799_09e-4;

/// Nuclear masses in atomic mass units.
const ATOMS: [(&str, f64); 4] = [
    ("H", 1.007_276_467),
    ("D", 2.013_553_213),
    ("He", 4.001_506_179),
    ("C", 11.996_708_53),
];

/// Rest frequency of the `n + Δn → n` recombination line of a hydrogenic atom.
fn rrl_frequency(nuclear_mass_u: f64, n: u32, series: GreekSeries) -> f64 {
    let upper = (n + series.delta_n()) as f64;
    let lower = n as f64;
    let reduced = RYDBERG_MHZ / (1.0 + ELECTRON_MASS_U / nuclear_mass_u);
    reduced * (1.0 / (lower * lower) - 1.0 / (upper * upper))
}

fn rrl(element: &str, mass: f64, n: u32, series: GreekSeries, status: LineStatus) -> LineRecord {
    let upper = n + series.delta_n();
    LineRecord::new(
        format!("{element}{n}\\g{}", series.code()),
        rrl_frequency(mass, n, series),
        Origin::RecombinationLine,
    )
    .with_status(status)
    .with_levels(upper.to_string(), n.to_string())
}

fn molecule(species: &str, freq: f64, db: &str, upper: &str, lower: &str) -> LineRecord {
    LineRecord::new(species, freq, Origin::Database(db.to_string()))
        .with_status(LineStatus::Detected)
        .with_levels(upper, lower)
}

fn unidentified(freq: f64, status: LineStatus) -> LineRecord {
    LineRecord::new(format!("U-{freq:.1}"), freq, Origin::Unknown).with_status(status)
}

fn main() -> Result<()> {
    env_logger::init();

    let mut records = Vec::new();

    // Hydrogen α/β/γ across the 3 mm, 2 mm, 7 mm and 20 cm bands.
    let (_, h_mass) = ATOMS[0];
    for &n in &[39u32, 40, 41, 42, 48, 52, 56, 57, 166, 185] {
        records.push(rrl("H", h_mass, n, GreekSeries::Alpha, LineStatus::Detected));
    }
    for &n in &[49u32, 50, 51, 52, 53] {
        records.push(rrl("H", h_mass, n, GreekSeries::Beta, LineStatus::Detected));
    }
    for &n in &[57u32, 58, 59] {
        records.push(rrl("H", h_mass, n, GreekSeries::Gamma, LineStatus::Tentative));
    }

    // Heavier atoms: α lines only, near the hydrogen ones.
    for &(element, mass) in &ATOMS[1..] {
        for &n in &[41u32, 42, 56] {
            let status = if element == "D" {
                LineStatus::Doubtful
            } else {
                LineStatus::Detected
            };
            records.push(rrl(element, mass, n, GreekSeries::Alpha, status));
        }
    }

    records.push(molecule("HCN", 88631.602, "cdms", "1", "0"));
    records.push(molecule("HCO+", 89188.525, "cdms", "1", "0"));
    records.push(molecule("HC3N", 90979.023, "jpl", "10", "9"));
    records.push(molecule("CS", 97980.953, "cdms", "2", "1"));
    records.push(molecule("CN", 113490.970, "cdms", "1", "0"));
    records.push(molecule("CO", 115271.202, "cdms", "1", "0"));
    records.push(molecule("13CO", 220398.684, "cdms", "2", "1"));

    for (i, &freq) in [86754.3, 87317.0, 93173.4, 145103.2, 42820.6].iter().enumerate() {
        let status = if i % 2 == 0 {
            LineStatus::Tentative
        } else {
            LineStatus::Detected
        };
        records.push(unidentified(freq, status));
    }

    records.sort_by(|a, b| a.frequency_mhz.total_cmp(&b.frequency_mhz));

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("Source_Catalogues"));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating {}", dir.display()))?;

    let path = catalogue_path(&dir, "SAMPLE");
    std::fs::write(&path, format_catalogue(&records))
        .with_context(|| format!("writing {}", path.display()))?;

    println!("Wrote {} lines to {}", records.len(), path.display());
    Ok(())
}
