
/*!
# Path replay
Best-first search over replay paths.
The frontier always yields the least-advanced path, so all live paths move across the reference together.
When only one path remains it is a safe restart point if the frontier later grows past the configured limits.
*/

use std::collections::BTreeSet;

use derive_builder::Builder;
use log::{debug, trace, warn};

use crate::data_types::contig::Contig;
use crate::data_types::oriented_variant::OrientedVariant;
use crate::data_types::variants::Variant;
use crate::data_types::vcf_side::VcfSide;
use crate::replay::ReplayError;
use crate::replay::path::Path;
use crate::replay::semi_path::SemiPath;

/// Default maximum number of unresolved paths before falling back
pub const DEFAULT_MAX_PATH_SIZE: usize = 150_000;
/// Default maximum number of iterations between sync points before falling back
pub const DEFAULT_MAX_ITERATION_COUNT: usize = 10_000_000;

/// Search limits for the replay engine
#[derive(Builder, Clone, Copy, Debug)]
#[builder(default)]
pub struct ReplayConfig {
    /// Frontier size that triggers the complexity fallback
    max_path_size: usize,
    /// Iterations since the last sync point that trigger the complexity fallback
    max_iteration_count: usize
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            max_path_size: DEFAULT_MAX_PATH_SIZE,
            max_iteration_count: DEFAULT_MAX_ITERATION_COUNT
        }
    }
}

impl ReplayConfig {
    pub fn max_path_size(&self) -> usize {
        self.max_path_size
    }

    pub fn max_iteration_count(&self) -> usize {
        self.max_iteration_count
    }
}

/// Bookkeeping from a single search
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReplayStats {
    /// Largest frontier seen between two sync points
    pub max_frontier_size: usize,
    /// Most iterations seen between two sync points
    pub max_iterations: usize,
    /// Number of times the complexity fallback fired
    pub complex_regions: usize,
    /// Variants excluded without evaluation by the fallback
    pub skipped_variants: usize
}

/// One input's variants and their interleaved orientations
#[derive(Clone, Copy, Debug)]
pub struct VariantSet<'a> {
    pub variants: &'a [Variant],
    pub oriented: &'a [OrientedVariant]
}

impl<'a> VariantSet<'a> {
    /// # Panics
    /// * if `oriented` does not have exactly two entries per variant
    pub fn new(variants: &'a [Variant], oriented: &'a [OrientedVariant]) -> Self {
        assert_eq!(variants.len() * 2, oriented.len(), "orientation list must have two entries per variant");
        Self { variants, oriented }
    }
}

/// Everything the search needs for one chromosome
#[derive(Clone, Copy, Debug)]
pub struct ReplayContext<'a> {
    pub contig: &'a Contig,
    pub baseline: VariantSet<'a>,
    pub called: VariantSet<'a>
}

impl<'a> ReplayContext<'a> {
    pub fn new(contig: &'a Contig, baseline: VariantSet<'a>, called: VariantSet<'a>) -> Self {
        Self { contig, baseline, called }
    }

    fn side(&self, side: VcfSide) -> &VariantSet<'a> {
        match side {
            VcfSide::Base => &self.baseline,
            VcfSide::Called => &self.called
        }
    }
}

/// The winning path and how hard it was to find
#[derive(Debug)]
pub struct ReplayResult<'a> {
    pub best_path: Path<'a>,
    pub stats: ReplayStats
}

pub struct PathReplay {
    config: ReplayConfig
}

impl PathReplay {
    pub fn new(config: ReplayConfig) -> Self {
        Self { config }
    }

    /// Searches for the path that explains the most variants on both sides with identical haplotypes.
    /// # Arguments
    /// * `context` - the reference contig and both variant sets
    /// * `genotype_match` - label for the pass being run; the orientations in `context` decide the actual matching mode
    /// # Errors
    /// * if a path replays variants out of order
    pub fn find_best_path<'a>(&self, context: &ReplayContext<'a>, genotype_match: bool) -> Result<ReplayResult<'a>, ReplayError> {
        let contig = context.contig;
        let reference_length = contig.length();
        let pass_label = if genotype_match { "genotype" } else { "allele" };

        let initial = Path::new(contig.sequence(), context.baseline.variants, context.called.variants);
        let mut frontier: BTreeSet<Path<'a>> = BTreeSet::new();
        frontier.insert(initial.clone());
        let mut best = initial.clone();
        let mut last_sync_path = initial;
        let mut last_sync_position: i64 = 0;

        let mut stats = ReplayStats::default();
        let mut current_max = 0;
        let mut current_iterations = 0;
        let mut current_position: i64 = 0;

        while let Some(mut path) = frontier.pop_first() {
            current_max = current_max.max(frontier.len() + 1);
            current_iterations += 1;
            stats.max_iterations = stats.max_iterations.max(current_iterations);

            if frontier.is_empty() {
                // the only survivor is a safe restart point
                stats.max_frontier_size = stats.max_frontier_size.max(current_max);
                current_max = 0;
                current_iterations = 0;
                last_sync_position = path.semi_path(VcfSide::Called).position();
                last_sync_path = path.clone();
            } else if frontier.len() > self.config.max_path_size || current_iterations > self.config.max_iteration_count {
                warn!(
                    "Evaluation is too complex ({pass_label} pass): {} unresolved paths, {current_iterations} iterations at {}:{}-{}",
                    frontier.len(), contig.name(), last_sync_position + 1, current_position + 2
                );
                stats.complex_regions += 1;
                stats.max_frontier_size = stats.max_frontier_size.max(current_max);
                frontier.clear();
                current_max = 0;
                current_iterations = 0;
                path = last_sync_path.clone();
                stats.skipped_variants += path.skip_variants_to(current_position + 1, reference_length);
            }

            if path.has_finished() {
                let position = path.semi_path(VcfSide::Called).position();
                let candidate = path.with_sync_point(position);
                if !find_better(&best, &candidate) {
                    best = candidate;
                }
                continue;
            }

            if enqueue_variant(&mut frontier, &path, VcfSide::Called, context, &mut current_position) ||
                enqueue_variant(&mut frontier, &path, VcfSide::Base, context, &mut current_position) {
                continue;
            }

            path.step()?;
            if path.in_sync() {
                skip_to_next_variant(&mut path, context)?;
            }

            if path.matches() {
                add_if_better(&mut frontier, path);
            } else {
                trace!("Discarding mismatched path at {}:{}", contig.name(), path.semi_path(VcfSide::Called).position());
            }
        }

        debug!(
            "{} {pass_label} pass: {} baseline / {} called included, {} complex regions, {} skipped variants, max frontier {}, max iterations {}",
            contig.name(),
            best.semi_path(VcfSide::Base).included_variants().len(),
            best.semi_path(VcfSide::Called).included_variants().len(),
            stats.complex_regions, stats.skipped_variants, stats.max_frontier_size, stats.max_iterations
        );

        Ok(ReplayResult {
            best_path: best,
            stats
        })
    }
}

/// Inserts `path` unless an equivalent state is already queued that wins the tie-break
fn add_if_better<'a>(frontier: &mut BTreeSet<Path<'a>>, path: Path<'a>) {
    let replace = frontier.get(&path).map(|existing| find_better(&path, existing));
    match replace {
        Some(true) => {
            frontier.replace(path);
        },
        Some(false) => {},
        None => {
            frontier.insert(path);
        }
    };
}

/// Returns true if `lhs` should be kept over `rhs`.
/// Paths with more included variants win.
/// Ties are broken by the baseline/called balance since the last sync, then by the later sync point, then by allele index.
pub fn find_better(lhs: &Path, rhs: &Path) -> bool {
    // drop obvious no-ops first
    let lhs_sync = lhs.in_sync() || lhs.has_finished();
    let rhs_sync = rhs.in_sync() || rhs.has_finished();
    if lhs_sync && rhs_sync {
        if lhs.has_no_operation() {
            return false;
        } else if rhs.has_no_operation() {
            return true;
        }
    }

    let lhs_count = lhs.included_count();
    let rhs_count = rhs.included_count();
    if lhs_count == rhs_count {
        if let (Some(lhs_last), Some(rhs_last)) = (lhs.last_included(), rhs.last_included()) {
            let lhs_delta = lhs.since_sync_delta();
            let rhs_delta = rhs.since_sync_delta();
            if lhs_delta != rhs_delta {
                return lhs_delta < rhs_delta;
            }

            let lhs_sync_point = lhs.last_sync_point();
            let rhs_sync_point = rhs.last_sync_point();
            if lhs_sync_point != rhs_sync_point {
                return lhs_sync_point > rhs_sync_point;
            }

            return lhs_last.allele_index() < rhs_last.allele_index();
        }
    }
    lhs_count > rhs_count
}

/// Index of the next variant on this side that should be decided now, if any
fn next_variant(semi_path: &SemiPath, variants: &[Variant]) -> Option<usize> {
    let index = semi_path.next_variant_index();
    let variant = variants.get(index)?;
    let reachable = variant.start() <= semi_path.position() + 1;
    let needed = semi_path.wants_future_variant_bases() && variant.start() <= semi_path.variant_end_position();
    if reachable || needed {
        Some(index)
    } else {
        None
    }
}

/// Branches `path` on the next variant of `side`, returning false if there was nothing to branch on
fn enqueue_variant<'a>(
    frontier: &mut BTreeSet<Path<'a>>, path: &Path<'a>, side: VcfSide, context: &ReplayContext<'a>, current_position: &mut i64
) -> bool {
    let variant_set = context.side(side);
    let index = match next_variant(path.semi_path(side), variant_set.variants) {
        Some(index) => index,
        None => return false
    };

    *current_position = (*current_position).max(variant_set.variants[index].start());
    for child in path.add_variant(side, variant_set.oriented, index) {
        add_if_better(frontier, child);
    }
    true
}

/// Start of the next undecided variant on this side, or the last reference base if there is none
fn future_variant_position(semi_path: &SemiPath, variants: &[Variant], reference_length: i64) -> i64 {
    variants.get(semi_path.next_variant_index())
        .map(|v| v.start())
        .unwrap_or(reference_length - 1)
}

/// Moves an in-sync path to just before the next variant on either side
fn skip_to_next_variant(path: &mut Path, context: &ReplayContext) -> Result<(), ReplayError> {
    let reference_length = context.contig.length();
    let called_next = future_variant_position(path.semi_path(VcfSide::Called), context.called.variants, reference_length);
    let base_next = future_variant_position(path.semi_path(VcfSide::Base), context.baseline.variants, reference_length);
    let next_position = called_next.min(base_next).min(reference_length - 1) - 1;
    if next_position > path.semi_path(VcfSide::Called).position() {
        path.move_forward(next_position)?;
    }
    Ok(())
}
