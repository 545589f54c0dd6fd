/*!
# Duo comparison
Compares the baseline and called variants of one chromosome.
A genotype pass finds the variants that agree on both haplotypes.
An optional allele pass then re-runs the search over everything the first pass left out, looking for agreement on at least one haplotype.
The result is a set of per-variant decisions that are applied to the provider afterwards, in a single thread.
*/

use anyhow::{Context, bail};
use derive_builder::Builder;
use log::debug;
use strum::IntoEnumIterator;

use crate::data_types::oriented_variant::{OrientedVariant, oriented_variant_list};
use crate::data_types::sync_interval::SyncInterval;
use crate::data_types::variants::{MatchStatus, Variant};
use crate::data_types::vcf_side::VcfSide;
use crate::provider::VariantProvider;
use crate::replay::path_replay::{PathReplay, ReplayConfig, ReplayContext, ReplayStats, VariantSet};

/// Controls which passes run and how hard the search tries
#[derive(Builder, Clone, Copy, Debug)]
#[builder(default)]
pub struct ComparisonConfig {
    /// Search limits shared by both passes
    replay_config: ReplayConfig,
    /// If true, run the allele pass over the genotype pass leftovers
    allele_match: bool
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            replay_config: ReplayConfig::default(),
            allele_match: true
        }
    }
}

impl ComparisonConfig {
    pub fn replay_config(&self) -> ReplayConfig {
        self.replay_config
    }

    pub fn allele_match(&self) -> bool {
        self.allele_match
    }
}

/// Variant indices for one side, grouped by the status they should receive
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SideDecisions {
    pub genotype_match: Vec<usize>,
    pub allele_match: Vec<usize>,
    pub no_match: Vec<usize>
}

/// Everything decided for one chromosome
#[derive(Clone, Debug, Default)]
pub struct ChromosomeOutcome {
    pub chromosome: String,
    pub baseline: SideDecisions,
    pub called: SideDecisions,
    /// Weight of each called genotype match, keyed by variant index
    pub called_weights: Vec<(usize, f64)>,
    /// Intervals between sync points of the genotype pass
    pub sync_intervals: Vec<SyncInterval>,
    pub genotype_stats: ReplayStats,
    /// Only present if the allele pass ran
    pub allele_stats: Option<ReplayStats>
}

impl ChromosomeOutcome {
    pub fn decisions(&self, side: VcfSide) -> &SideDecisions {
        match side {
            VcfSide::Base => &self.baseline,
            VcfSide::Called => &self.called
        }
    }
}

/// Runs the genotype pass, then the allele pass if enabled, for a single chromosome.
/// # Arguments
/// * `provider` - source of the variants and the reference contig
/// * `chromosome` - the chromosome to compare
/// * `config` - pass selection and search limits
/// # Errors
/// * if the chromosome has no reference contig
/// * if either pass replays variants out of order
pub fn compare_chromosome<P: VariantProvider + ?Sized>(provider: &P, chromosome: &str, config: &ComparisonConfig) -> anyhow::Result<ChromosomeOutcome> {
    let Some(contig) = provider.contig(chromosome) else {
        bail!("No reference contig found for {chromosome}");
    };
    let baseline = provider.variant_list(VcfSide::Base, chromosome);
    let called = provider.variant_list(VcfSide::Called, chromosome);
    let baseline_oriented = provider.oriented_variant_list(VcfSide::Base, chromosome, true);
    let called_oriented = provider.oriented_variant_list(VcfSide::Called, chromosome, true);

    let replay = PathReplay::new(config.replay_config);
    let context = ReplayContext::new(
        contig,
        VariantSet::new(baseline, &baseline_oriented),
        VariantSet::new(called, &called_oriented)
    );
    let genotype_result = replay.find_best_path(&context, true)
        .with_context(|| format!("Error during genotype pass on {chromosome}:"))?;
    let genotype_path = &genotype_result.best_path;

    let baseline_included = included_indices(&genotype_path.included_variants(VcfSide::Base));
    let called_included = included_indices(&genotype_path.included_variants(VcfSide::Called));
    let baseline_leftover = complement(baseline.len(), &baseline_included);
    let called_leftover = complement(called.len(), &called_included);

    let mut outcome = ChromosomeOutcome {
        chromosome: chromosome.to_string(),
        called_weights: genotype_path.calculate_weights(),
        sync_intervals: genotype_path.calculate_sync_intervals(),
        genotype_stats: genotype_result.stats,
        ..Default::default()
    };

    if config.allele_match && !(baseline_leftover.is_empty() && called_leftover.is_empty()) {
        let reduced_baseline: Vec<Variant> = baseline_leftover.iter().map(|&i| baseline[i].clone()).collect();
        let reduced_called: Vec<Variant> = called_leftover.iter().map(|&i| called[i].clone()).collect();
        let reduced_baseline_oriented = oriented_variant_list(&reduced_baseline, false);
        let reduced_called_oriented = oriented_variant_list(&reduced_called, false);
        let allele_context = ReplayContext::new(
            contig,
            VariantSet::new(&reduced_baseline, &reduced_baseline_oriented),
            VariantSet::new(&reduced_called, &reduced_called_oriented)
        );
        let allele_result = replay.find_best_path(&allele_context, false)
            .with_context(|| format!("Error during allele pass on {chromosome}:"))?;
        let allele_path = &allele_result.best_path;

        // map reduced indices back to the full lists
        let baseline_allele: Vec<usize> = included_indices(&allele_path.included_variants(VcfSide::Base)).into_iter()
            .map(|i| baseline_leftover[i])
            .collect();
        let called_allele: Vec<usize> = included_indices(&allele_path.included_variants(VcfSide::Called)).into_iter()
            .map(|i| called_leftover[i])
            .collect();

        outcome.baseline = split_decisions(baseline_included, &baseline_leftover, baseline_allele);
        outcome.called = split_decisions(called_included, &called_leftover, called_allele);
        outcome.allele_stats = Some(allele_result.stats);
    } else {
        outcome.baseline = split_decisions(baseline_included, &baseline_leftover, vec![]);
        outcome.called = split_decisions(called_included, &called_leftover, vec![]);
    }

    debug!(
        "{chromosome}: baseline GT/AL/NO = {}/{}/{}, called GT/AL/NO = {}/{}/{}",
        outcome.baseline.genotype_match.len(), outcome.baseline.allele_match.len(), outcome.baseline.no_match.len(),
        outcome.called.genotype_match.len(), outcome.called.allele_match.len(), outcome.called.no_match.len()
    );
    Ok(outcome)
}

/// Applies the decisions of one chromosome to the provider.
/// Statuses only ever upgrade, so the order here does not change the result.
pub fn apply_outcome<P: VariantProvider + ?Sized>(provider: &mut P, outcome: &ChromosomeOutcome) {
    for side in VcfSide::iter() {
        let decisions = outcome.decisions(side);
        provider.set_variant_status(side, &outcome.chromosome, &decisions.genotype_match, MatchStatus::GenotypeMatch);
        provider.set_variant_status(side, &outcome.chromosome, &decisions.allele_match, MatchStatus::AlleleMatch);
        provider.set_variant_status(side, &outcome.chromosome, &decisions.no_match, MatchStatus::NoMatch);
    }
}

fn included_indices(included: &[OrientedVariant]) -> Vec<usize> {
    included.iter().map(|ov| ov.variant_index()).collect()
}

/// Indices in `0..count` missing from the sorted `included` list
fn complement(count: usize, included: &[usize]) -> Vec<usize> {
    let mut is_included = vec![false; count];
    for &index in included.iter() {
        is_included[index] = true;
    }
    (0..count).filter(|&i| !is_included[i]).collect()
}

fn split_decisions(genotype_match: Vec<usize>, leftover: &[usize], allele_match: Vec<usize>) -> SideDecisions {
    let no_match = complement_of(leftover, &allele_match);
    SideDecisions {
        genotype_match,
        allele_match,
        no_match
    }
}

/// Entries of sorted `all` that are not in sorted `subset`
fn complement_of(all: &[usize], subset: &[usize]) -> Vec<usize> {
    let mut cursor = 0;
    let mut remainder = Vec::with_capacity(all.len() - subset.len().min(all.len()));
    for &value in all.iter() {
        if subset.get(cursor) == Some(&value) {
            cursor += 1;
        } else {
            remainder.push(value);
        }
    }
    remainder
}
