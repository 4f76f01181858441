use std::path::Path;

use approx::assert_relative_eq;
use radiochem::data::filter::FrequencyWindow;
use radiochem::data::synthetic::{
    antenna_temperature, read_synthetic_spectrum, synthetic_path, EmissionParams,
    SyntheticLibrary,
};
use radiochem::SyntheticError;

const DIR: &str = "tests/data/synthetic";

#[test]
fn forbidden_transitions_are_dropped() {
    let lines = read_synthetic_spectrum(&synthetic_path(Path::new(DIR), "C60CN+")).unwrap();
    let freqs: Vec<f64> = lines.iter().map(|l| l.frequency_mhz).collect();
    assert_eq!(freqs, vec![87301.25, 87324.125, 87335.5]);
    assert!(lines.iter().all(|l| l.einstein_a > 0.0));
    assert_relative_eq!(lines[0].einstein_a, 2.31e-5);
}

#[test]
fn library_keyed_by_molecule() {
    let library = SyntheticLibrary::load(Path::new(DIR), &["C60CN+"]).unwrap();
    assert_eq!(library.len(), 1);
    assert_eq!(library.get("C60CN+").map(<[_]>::len), Some(3));
    assert!(library.get("C60").is_none());
}

#[test]
fn missing_molecule_fails_the_load() {
    let err = SyntheticLibrary::load(Path::new(DIR), &["C60CN+", "C70"]).unwrap_err();
    assert!(matches!(err, SyntheticError::NotFound(ref p) if p.ends_with("C70/C70.dat")));
}

#[test]
fn synthetic_lines_inside_a_velocity_window() {
    let library = SyntheticLibrary::load(Path::new(DIR), &["C60CN+"]).unwrap();
    let window = FrequencyWindow::around(87317.0, 60.0);
    let inside: Vec<f64> = library
        .get("C60CN+")
        .unwrap()
        .iter()
        .map(|l| l.frequency_mhz)
        .filter(|&f| window.contains(f))
        .collect();
    assert_eq!(inside, vec![87301.25, 87324.125]);
}

#[test]
fn temperature_falls_with_width_and_depth() {
    let library = SyntheticLibrary::load(Path::new(DIR), &["C60CN+"]).unwrap();
    let line = library.get("C60CN+").unwrap()[0];

    let narrow = antenna_temperature(&line, &EmissionParams::new(1.0));
    let wide = antenna_temperature(&line, &EmissionParams::new(4.0));
    assert_relative_eq!(narrow / wide, 4.0, max_relative = 1e-12);

    let thick = EmissionParams {
        tau: Some(2.0),
        ..EmissionParams::new(1.0)
    };
    assert!(antenna_temperature(&line, &thick) < narrow);
}
