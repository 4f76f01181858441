use serde::{Deserialize, Serialize};

use super::model::LineRecord;

/// Frequency coverage of one antenna setup, in MHz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelescopeWindow {
    pub name: String,
    pub lower_mhz: f64,
    pub upper_mhz: f64,
}

impl TelescopeWindow {
    pub fn new(name: &str, lower_mhz: f64, upper_mhz: f64) -> Self {
        Self {
            name: name.to_string(),
            lower_mhz,
            upper_mhz,
        }
    }

    pub fn contains(&self, frequency_mhz: f64) -> bool {
        frequency_mhz >= self.lower_mhz && frequency_mhz <= self.upper_mhz
    }
}

/// IRAM 30m windows at 1, 2 and 3 mm and the Yebes 40m Q band receiver.
pub fn default_windows() -> Vec<TelescopeWindow> {
    vec![
        TelescopeWindow::new("IRAM30m", 225.05e3, 232.837e3),
        TelescopeWindow::new("IRAM30m", 130.85e3, 139.1e3),
        TelescopeWindow::new("IRAM30m", 81.5e3, 89.76e3),
        TelescopeWindow::new("Yebes40m", 31.53e3, 50.0e3),
    ]
}

/// Name of the first window covering a frequency.
pub fn observing_telescope(frequency_mhz: f64, windows: &[TelescopeWindow]) -> Option<&str> {
    windows
        .iter()
        .find(|w| w.contains(frequency_mhz))
        .map(|w| w.name.as_str())
}

/// Copy of `records` with `telescope` set.
pub fn tag_telescopes(records: &[LineRecord], windows: &[TelescopeWindow]) -> Vec<LineRecord> {
    records
        .iter()
        .map(|r| LineRecord {
            telescope: observing_telescope(r.frequency_mhz, windows).map(str::to_string),
            ..r.clone()
        })
        .collect()
}
