
/*!
# Haplotype replay
Core search for comparing two variant sets by replaying them as edits over a shared reference.
*/

/// Persistent linked list used for cheap path branching
pub mod chain_list;
/// Single-strand replay state machine
pub mod haplotype_sequence;
/// Baseline + called semi-paths with sync-point bookkeeping
pub mod path;
/// The path search engine
pub mod path_replay;
/// Two haplotypes plus the include/exclude decisions for one input
pub mod semi_path;

/// Runtime failures during replay
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("out of order variants during replay: template position {template_position}, variant start {variant_start}")]
    OutOfOrderVariant { template_position: i64, variant_start: i64 }
}
