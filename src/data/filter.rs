use std::collections::BTreeSet;

use super::model::{LineRecord, LineStatus};

/// Speed of light in km/s.
pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;

// ---------------------------------------------------------------------------
// Frequency window
// ---------------------------------------------------------------------------

/// Inclusive frequency interval in MHz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyWindow {
    pub min_mhz: f64,
    pub max_mhz: f64,
}

impl FrequencyWindow {
    /// Bounds may be given in either order.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min_mhz: a.min(b),
            max_mhz: a.max(b),
        }
    }

    /// Window covering a velocity width around a rest frequency:
    /// `center ± center · Δv / c`.
    pub fn around(center_mhz: f64, velocity_width_km_s: f64) -> Self {
        let half = center_mhz * velocity_width_km_s.abs() / SPEED_OF_LIGHT_KM_S;
        Self::new(center_mhz - half, center_mhz + half)
    }

    pub fn contains(&self, frequency_mhz: f64) -> bool {
        frequency_mhz >= self.min_mhz && frequency_mhz <= self.max_mhz
    }
}

// ---------------------------------------------------------------------------
// Row filter
// ---------------------------------------------------------------------------

/// Row selection over a line table.
///
/// `None` leaves a column unconstrained. A present but empty set selects
/// nothing. Lines without a status or band fail a status or band constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineFilter {
    pub statuses: Option<BTreeSet<LineStatus>>,
    pub bands: Option<BTreeSet<String>>,
    pub window: Option<FrequencyWindow>,
}

impl LineFilter {
    pub fn is_empty(&self) -> bool {
        self.statuses.is_none() && self.bands.is_none() && self.window.is_none()
    }

    pub fn matches(&self, record: &LineRecord) -> bool {
        if let Some(statuses) = &self.statuses {
            match record.status {
                Some(status) if statuses.contains(&status) => {}
                _ => return false,
            }
        }
        if let Some(bands) = &self.bands {
            match &record.band {
                Some(band) if bands.contains(band) => {}
                _ => return false,
            }
        }
        if let Some(window) = &self.window {
            if !window.contains(record.frequency_mhz) {
                return false;
            }
        }
        true
    }
}

/// Indices of the lines passing `filter`.
pub fn filtered_indices(records: &[LineRecord], filter: &LineFilter) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| filter.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Copy of the lines passing `filter`.
pub fn apply_filter(records: &[LineRecord], filter: &LineFilter) -> Vec<LineRecord> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Origin;
    use approx::assert_relative_eq;

    fn table() -> Vec<LineRecord> {
        let mut a = LineRecord::new("H41a", 92034.4, Origin::RecombinationLine)
            .with_status(LineStatus::Detected);
        a.band = Some("3mm".into());
        let mut b = LineRecord::new("H56a", 36466.3, Origin::RecombinationLine)
            .with_status(LineStatus::Tentative);
        b.band = Some("Q".into());
        let c = LineRecord::new("U-500.0", 500.0, Origin::Unknown);
        vec![a, b, c]
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let filter = LineFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filtered_indices(&table(), &filter), vec![0, 1, 2]);
    }

    #[test]
    fn status_filter_rejects_missing_status() {
        let filter = LineFilter {
            statuses: Some([LineStatus::Detected, LineStatus::Tentative].into()),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&table(), &filter), vec![0, 1]);
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let filter = LineFilter {
            bands: Some(BTreeSet::new()),
            ..Default::default()
        };
        assert!(filtered_indices(&table(), &filter).is_empty());
    }

    #[test]
    fn combined_constraints() {
        let filter = LineFilter {
            bands: Some(["3mm".to_string(), "Q".to_string()].into()),
            window: Some(FrequencyWindow::new(90000.0, 30000.0)),
            ..Default::default()
        };
        let kept = apply_filter(&table(), &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].species, "H56a");
    }

    #[test]
    fn velocity_window() {
        let window = FrequencyWindow::around(87317.0, 60.0);
        let half = 87317.0 * 60.0 / SPEED_OF_LIGHT_KM_S;
        assert_relative_eq!(window.max_mhz - window.min_mhz, 2.0 * half, epsilon = 1e-9);
        assert_relative_eq!(half, 17.475, epsilon = 1e-2);
        assert!(window.contains(87317.0));
        assert!(!window.contains(87340.0));
    }
}
