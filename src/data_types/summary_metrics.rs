
use std::ops::AddAssign;

use crate::data_types::variants::{MatchStatus, Variant};

/// Which statuses count as true positives when tallying metrics
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum_macros::AsRefStr, strum_macros::Display, strum_macros::EnumIter)]
pub enum ComparisonMode {
    /// Only GenotypeMatch counts as a true positive
    #[strum(serialize = "GT")]
    Genotype,
    /// GenotypeMatch and AlleleMatch both count as true positives
    #[strum(serialize = "AL")]
    Allele
}

impl ComparisonMode {
    /// Returns true if `status` is a true positive in this mode, false if it is a false one, and None if it was never assessed
    pub fn is_positive(&self, status: MatchStatus) -> Option<bool> {
        match (self, status) {
            (_, MatchStatus::NotAssessed) => None,
            (_, MatchStatus::GenotypeMatch) => Some(true),
            (ComparisonMode::Allele, MatchStatus::AlleleMatch) => Some(true),
            _ => Some(false)
        }
    }
}

/// High-level summary metrics for one chromosome or the whole run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SummaryMetrics {
    /// Number of baseline variants found in the called set
    pub truth_tp: u64,
    /// Number of baseline variants missing from the called set
    pub truth_fn: u64,
    /// Number of called variants that match the baseline
    pub query_tp: u64,
    /// Number of called variants that are not in the baseline
    pub query_fp: u64,
}

impl AddAssign for SummaryMetrics {
    // Enables += with stats
    fn add_assign(&mut self, rhs: Self) {
        self.truth_tp += rhs.truth_tp;
        self.truth_fn += rhs.truth_fn;
        self.query_tp += rhs.query_tp;
        self.query_fp += rhs.query_fp;
    }
}

impl SummaryMetrics {
    /// Constructor
    pub fn new(truth_tp: u64, truth_fn: u64, query_tp: u64, query_fp: u64) -> Self {
        Self {
            truth_tp, truth_fn, query_tp, query_fp
        }
    }

    /// Tallies the reconciled statuses of both variant lists.
    /// Variants that were never assessed do not contribute.
    /// # Arguments
    /// * `baseline` - the baseline variants, after statuses are applied
    /// * `called` - the called variants, after statuses are applied
    /// * `mode` - controls whether allele matches count as true positives
    pub fn from_variants(baseline: &[Variant], called: &[Variant], mode: ComparisonMode) -> Self {
        let (truth_tp, truth_fn) = count_positives(baseline, mode);
        let (query_tp, query_fp) = count_positives(called, mode);
        Self::new(truth_tp, truth_fn, query_tp, query_fp)
    }

    /// Total assessed baseline variants
    pub fn truth_total(&self) -> u64 {
        self.truth_tp + self.truth_fn
    }

    /// Calculates recall if it can, which is relative to truth
    pub fn recall(&self) -> Option<f64> {
        let denom = self.truth_total();
        if denom > 0 {
            Some(self.truth_tp as f64 / denom as f64)
        } else {
            None
        }
    }

    /// Calculates precision if it can, which is relative to query
    pub fn precision(&self) -> Option<f64> {
        let denom = self.query_tp + self.query_fp;
        if denom > 0 {
            Some(self.query_tp as f64 / denom as f64)
        } else {
            None
        }
    }

    /// Calculates F1 score if possible
    pub fn f1(&self) -> Option<f64> {
        match (self.recall(), self.precision()) {
            (Some(recall), Some(precision)) if recall + precision > 0.0 => {
                Some(2.0 * recall * precision / (recall + precision))
            },
            (Some(_), Some(_)) => Some(0.0),
            _ => None
        }
    }
}

/// Returns (positives, negatives) over the assessed variants
fn count_positives(variants: &[Variant], mode: ComparisonMode) -> (u64, u64) {
    variants.iter()
        .filter_map(|v| mode.is_positive(v.match_status()))
        .fold((0, 0), |(tp, fp), positive| {
            if positive { (tp + 1, fp) } else { (tp, fp + 1) }
        })
}
