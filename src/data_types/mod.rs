
/// Reference contig wrapper
pub mod contig;
/// Variants paired with a haplotype orientation
pub mod oriented_variant;
/// Contains tracker for TP, FP, FN and derived metrics
pub mod summary_metrics;
/// Intervals between replay sync points
pub mod sync_interval;
/// Contains variant definition functionality and checks
pub mod variants;
/// Baseline / called enumeration
pub mod vcf_side;
