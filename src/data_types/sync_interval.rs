
/// A stretch of the reference between two consecutive sync points of a replay path.
/// Counts are taken from the path's include/exclude decisions for variants starting inside the interval.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SyncInterval {
    /// Previous sync point, or 0 for the first interval
    pub start: i64,
    /// This sync point; None for the trailing interval that runs to the end of the chromosome
    pub end: Option<i64>,
    /// Indices of baseline variants included in this interval
    pub baseline_included: Vec<usize>,
    /// Indices of called variants included in this interval
    pub called_included: Vec<usize>,
    /// Indices of baseline variants excluded in this interval
    pub baseline_excluded: Vec<usize>,
    /// Indices of called variants excluded in this interval
    pub called_excluded: Vec<usize>
}

impl SyncInterval {
    /// Creates an empty interval
    pub fn new(start: i64, end: Option<i64>) -> Self {
        Self {
            start,
            end,
            ..Default::default()
        }
    }

    /// Weight given to each called variant included in this interval.
    /// This is the ratio of baseline TPs to called TPs, and 0 when there are no baseline TPs.
    pub fn weight(&self) -> f64 {
        if self.baseline_included.is_empty() || self.called_included.is_empty() {
            0.0
        } else {
            self.baseline_included.len() as f64 / self.called_included.len() as f64
        }
    }

    /// True if nothing was decided in this interval
    pub fn is_empty(&self) -> bool {
        self.baseline_included.is_empty() && self.called_included.is_empty() &&
            self.baseline_excluded.is_empty() && self.called_excluded.is_empty()
    }
}
