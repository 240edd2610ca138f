use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Closed ion-mobility window `[lower, upper]` in 1/K0.
///
/// The window describes the mobility region in which a precursor is isolated
/// by the instrument. Bounds are ordered on construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MobilityWindow {
    pub lower: f64,
    pub upper: f64,
}

impl MobilityWindow {
    pub fn new(lower: f64, upper: f64) -> MobilityWindow {
        if lower <= upper {
            MobilityWindow { lower, upper }
        } else {
            MobilityWindow { lower: upper, upper: lower }
        }
    }

    /// Window centered on `mobility` with the given total width.
    pub fn around(mobility: f64, width: f64) -> MobilityWindow {
        MobilityWindow::new(mobility - width / 2.0, mobility + width / 2.0)
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, mobility: f64) -> bool {
        self.lower <= mobility && mobility <= self.upper
    }

    /// Bounds rounded to `decimals` decimal digits and scaled to integers,
    /// e.g. `[1.004, 1.096]` with two decimals becomes `(100, 110)`.
    pub fn scaled(&self, decimals: u32) -> (i64, i64) {
        let factor = 10f64.powi(decimals as i32);
        (
            (self.lower * factor).round() as i64,
            (self.upper * factor).round() as i64,
        )
    }

    /// True if the two windows, rounded to `decimals` decimal digits, share
    /// at least one point. Touching endpoints count as connected, so two
    /// windows that differ only below the rounding precision are treated as
    /// overlapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedcore::data::precursor::MobilityWindow;
    ///
    /// let a = MobilityWindow::new(1.00, 1.05);
    /// let b = MobilityWindow::new(1.05, 1.10);
    /// let c = MobilityWindow::new(2.00, 2.05);
    /// assert!(a.is_connected(&b, 2));
    /// assert!(!a.is_connected(&c, 2));
    /// ```
    pub fn is_connected(&self, other: &MobilityWindow, decimals: u32) -> bool {
        let (a_lower, a_upper) = self.scaled(decimals);
        let (b_lower, b_upper) = other.scaled(decimals);
        a_lower <= b_upper && b_lower <= a_upper
    }

    /// Clamp a detected window to a width between `min_width` and
    /// `max_width`, re-centering on `mobility` when resized, then clip the
    /// result to the instrument mobility `bounds`.
    pub fn adjusted(
        mobility: f64,
        initial: MobilityWindow,
        min_width: f64,
        max_width: f64,
        bounds: MobilityWindow,
    ) -> MobilityWindow {
        let width = initial.width();

        let resized = if width < min_width {
            MobilityWindow::around(mobility, min_width)
        } else if width > max_width {
            MobilityWindow::around(mobility, max_width)
        } else {
            initial
        };

        MobilityWindow::new(
            resized.lower.max(bounds.lower),
            resized.upper.min(bounds.upper),
        )
    }
}

/// A candidate precursor ion selected for fragmentation.
///
/// Identity is the feature id referencing the caller's feature table; two
/// precursors are equal iff their feature ids are equal. The mobility window
/// and m/z are fixed once constructed, acquisition bookkeeping lives in the
/// collision energy tracker.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimsPrecursor {
    pub feature_id: u32,
    pub mz: f64,
    /// Ranking value, only used to keep the top N candidates per batch.
    pub intensity: f64,
    /// Scalar mobility (1/K0), the center of the isolation window.
    pub mobility: f64,
    pub mobility_window: MobilityWindow,
    /// Requested collision energies. May be empty, in which case the
    /// precursor can be scheduled into ramps but not tracked for acquisition.
    pub collision_energies: Vec<f64>,
}

impl TimsPrecursor {
    pub fn new(
        feature_id: u32,
        mz: f64,
        intensity: f64,
        mobility: f64,
        mobility_window: MobilityWindow,
        collision_energies: Vec<f64>,
    ) -> TimsPrecursor {
        TimsPrecursor {
            feature_id,
            mz,
            intensity,
            mobility,
            mobility_window,
            collision_energies,
        }
    }

    /// True if the mobility windows of `self` and `other` are connected at
    /// the given rounding precision. Callers comparing a precursor against
    /// itself must skip the pair, the overlap relation is non-reflexive.
    pub fn overlaps_with(&self, other: &TimsPrecursor, decimals: u32) -> bool {
        self.mobility_window
            .is_connected(&other.mobility_window, decimals)
    }
}

impl PartialEq for TimsPrecursor {
    fn eq(&self, other: &TimsPrecursor) -> bool {
        self.feature_id == other.feature_id
    }
}

impl Eq for TimsPrecursor {}

impl Hash for TimsPrecursor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.feature_id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn precursor(id: u32, lower: f64, upper: f64) -> TimsPrecursor {
        TimsPrecursor::new(
            id,
            500.0,
            1000.0,
            (lower + upper) / 2.0,
            MobilityWindow::new(lower, upper),
            vec![20.0, 35.0],
        )
    }

    #[test]
    fn test_window_orders_bounds() {
        let window = MobilityWindow::new(1.10, 1.00);
        assert_eq!(window.lower, 1.00);
        assert_eq!(window.upper, 1.10);
    }

    #[test]
    fn test_window_contains() {
        let window = MobilityWindow::new(0.85, 0.95);
        assert!(window.contains(0.85));
        assert!(window.contains(0.90));
        assert!(window.contains(0.95));
        assert!(!window.contains(0.96));
    }

    #[test]
    fn test_scaled_rounds_to_precision() {
        let window = MobilityWindow::new(1.004, 1.096);
        assert_eq!(window.scaled(2), (100, 110));
        assert_eq!(window.scaled(3), (1004, 1096));
    }

    #[test]
    fn test_touching_windows_are_connected() {
        let a = MobilityWindow::new(1.00, 1.05);
        let b = MobilityWindow::new(1.05, 1.10);
        assert!(a.is_connected(&b, 2));
        assert!(b.is_connected(&a, 2));
    }

    #[test]
    fn test_rounding_noise_connects_windows() {
        // Separated by less than the rounding precision
        let a = MobilityWindow::new(0.900, 0.948);
        let b = MobilityWindow::new(0.952, 1.000);
        assert!(a.is_connected(&b, 2));
        assert!(!a.is_connected(&b, 3));
    }

    #[test]
    fn test_disjoint_windows_are_not_connected() {
        let a = MobilityWindow::new(1.00, 1.05);
        let b = MobilityWindow::new(2.00, 2.05);
        assert!(!a.is_connected(&b, 2));
    }

    #[test]
    fn test_adjusted_widens_narrow_window() {
        let bounds = MobilityWindow::new(0.6, 1.6);
        let initial = MobilityWindow::new(0.99, 1.01);
        let adjusted = MobilityWindow::adjusted(1.0, initial, 0.1, 0.3, bounds);
        assert!((adjusted.width() - 0.1).abs() < 1e-9);
        assert!((adjusted.lower - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_adjusted_shrinks_wide_window() {
        let bounds = MobilityWindow::new(0.6, 1.6);
        let initial = MobilityWindow::new(0.5, 1.5);
        let adjusted = MobilityWindow::adjusted(1.0, initial, 0.1, 0.4, bounds);
        assert!((adjusted.width() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_adjusted_clips_to_bounds() {
        let bounds = MobilityWindow::new(0.6, 1.6);
        let initial = MobilityWindow::new(0.55, 0.70);
        let adjusted = MobilityWindow::adjusted(0.62, initial, 0.05, 0.3, bounds);
        assert_eq!(adjusted.lower, 0.6);
        assert_eq!(adjusted.upper, 0.70);
    }

    #[test]
    fn test_precursor_equality_by_identity() {
        let a = precursor(1, 1.00, 1.05);
        let mut b = precursor(1, 2.00, 2.05);
        b.mz = 600.0;
        let c = precursor(2, 1.00, 1.05);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_precursor_overlap_uses_window() {
        let a = precursor(1, 1.00, 1.05);
        let b = precursor(2, 1.04, 1.10);
        let c = precursor(3, 2.00, 2.05);
        assert!(a.overlaps_with(&b, 2));
        assert!(!a.overlaps_with(&c, 2));
    }
}
