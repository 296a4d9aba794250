/// One round's entry in the progress chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressPoint {
    pub round: u32,
    pub wpm: u32,
    pub accuracy: u32,
}

impl ProgressPoint {
    pub fn new(round: u32, wpm: u32, accuracy: u32) -> Self {
        Self {
            round,
            wpm,
            accuracy,
        }
    }
}

impl From<ProgressPoint> for (f64, f64) {
    fn from(p: ProgressPoint) -> Self {
        (p.round as f64, p.wpm as f64)
    }
}

/// Parallel per-round series feeding the summary chart.
///
/// A series is never modified in place; [`ProgressSeries::appended`] returns
/// the extended copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressSeries {
    time_points: Vec<u32>,
    wpm_data: Vec<u32>,
    accuracy_data: Vec<u32>,
}

impl ProgressSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn appended(&self, round: u32, wpm: u32, accuracy: u32) -> Self {
        let mut next = self.clone();
        next.time_points.push(round);
        next.wpm_data.push(wpm);
        next.accuracy_data.push(accuracy);
        next
    }

    pub fn time_points(&self) -> &[u32] {
        &self.time_points
    }

    pub fn wpm_data(&self) -> &[u32] {
        &self.wpm_data
    }

    pub fn accuracy_data(&self) -> &[u32] {
        &self.accuracy_data
    }

    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = ProgressPoint> + '_ {
        self.time_points
            .iter()
            .zip(&self.wpm_data)
            .zip(&self.accuracy_data)
            .map(|((&round, &wpm), &accuracy)| ProgressPoint::new(round, wpm, accuracy))
    }

    /// (round, wpm) pairs for plotting
    pub fn wpm_coords(&self) -> Vec<(f64, f64)> {
        self.points().map(Into::into).collect()
    }

    /// (round, accuracy) pairs for plotting
    pub fn accuracy_coords(&self) -> Vec<(f64, f64)> {
        self.points()
            .map(|p| (p.round as f64, p.accuracy as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appended_leaves_original_untouched() {
        let empty = ProgressSeries::new();
        let one = empty.appended(1, 40, 95);
        let two = one.appended(2, 0, 0);

        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        assert_eq!(two.time_points(), &[1, 2]);
        assert_eq!(two.wpm_data(), &[40, 0]);
        assert_eq!(two.accuracy_data(), &[95, 0]);
    }

    #[test]
    fn test_coords() {
        let series = ProgressSeries::new().appended(1, 40, 95).appended(2, 52, 88);

        assert_eq!(series.wpm_coords(), vec![(1.0, 40.0), (2.0, 52.0)]);
        assert_eq!(series.accuracy_coords(), vec![(1.0, 95.0), (2.0, 88.0)]);
        assert_eq!(
            series.points().last(),
            Some(ProgressPoint::new(2, 52, 88))
        );
    }
}
