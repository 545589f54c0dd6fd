/*!
# Variant provider
Serves normalized, per-chromosome variant lists to the comparison engine and records the final match status of each variant.
The in-memory provider loads everything up front from a [`ComparisonProblem`].
*/

use anyhow::{Context, bail};
use derive_builder::Builder;
use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, info};
use strum::IntoEnumIterator;

use crate::data_types::contig::Contig;
use crate::data_types::oriented_variant::{OrientedVariant, oriented_variant_list};
use crate::data_types::variants::{MatchStatus, Variant, VariantCategory};
use crate::data_types::vcf_side::VcfSide;
use crate::parsing::bed::ConfidenceRegions;
use crate::parsing::problem::ComparisonProblem;

/// Default maximum allele length before a variant is considered structural
pub const DEFAULT_MAX_VARIANT_SIZE: usize = 1000;

/// Read access to the normalized variants, plus the one write path for match statuses
pub trait VariantProvider {
    /// Chromosome names in contig order
    fn chromosome_names(&self) -> Vec<String>;

    /// Sorted variants for one side of a chromosome, empty if the chromosome is unknown
    fn variant_list(&self, side: VcfSide, chromosome: &str) -> &[Variant];

    /// Interleaved orientations, two per variant
    fn oriented_variant_list(&self, side: VcfSide, chromosome: &str, genotype_match: bool) -> Vec<OrientedVariant> {
        oriented_variant_list(self.variant_list(side, chromosome), genotype_match)
    }

    /// Reference contig for a chromosome
    fn contig(&self, chromosome: &str) -> Option<&Contig>;

    /// Applies `status` to each listed variant index, subject to [`MatchStatus::upgrade`]
    fn set_variant_status(&mut self, side: VcfSide, chromosome: &str, indices: &[usize], status: MatchStatus);
}

/// Controls how records are normalized and filtered on load
#[derive(Builder, Clone, Copy, Debug)]
#[builder(default)]
pub struct ProviderConfig {
    /// Ignore reference alleles and trim shared bases so alleles may overlap
    ref_overlap: bool,
    /// Only assess records that pass all filters
    filter_enabled: bool,
    /// Only assess SNP records
    snp_only: bool,
    /// Only assess INDEL records
    indel_only: bool,
    /// Alleles longer than this are not assessed
    max_variant_size: usize
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            ref_overlap: true,
            filter_enabled: true,
            snp_only: false,
            indel_only: false,
            max_variant_size: DEFAULT_MAX_VARIANT_SIZE
        }
    }
}

impl ProviderConfig {
    pub fn ref_overlap(&self) -> bool {
        self.ref_overlap
    }

    pub fn filter_enabled(&self) -> bool {
        self.filter_enabled
    }

    pub fn snp_only(&self) -> bool {
        self.snp_only
    }

    pub fn indel_only(&self) -> bool {
        self.indel_only
    }

    pub fn max_variant_size(&self) -> usize {
        self.max_variant_size
    }

    /// Returns true if a loaded variant should be reported but not compared
    fn is_not_assessed(&self, variant: &Variant) -> bool {
        (self.filter_enabled && !variant.is_filter_pass()) ||
            (self.snp_only && variant.category() != VariantCategory::Snp) ||
            (self.indel_only && variant.category() != VariantCategory::Indel) ||
            variant.is_structural(self.max_variant_size)
    }
}

/// Everything loaded for a single chromosome
#[derive(Clone, Debug)]
struct ChromosomeData {
    contig: Contig,
    baseline: Vec<Variant>,
    called: Vec<Variant>,
    baseline_not_assessed: Vec<Variant>,
    called_not_assessed: Vec<Variant>
}

impl ChromosomeData {
    fn new(contig: Contig) -> Self {
        Self {
            contig,
            baseline: vec![],
            called: vec![],
            baseline_not_assessed: vec![],
            called_not_assessed: vec![]
        }
    }

    fn assessed(&self, side: VcfSide) -> &Vec<Variant> {
        match side {
            VcfSide::Base => &self.baseline,
            VcfSide::Called => &self.called
        }
    }

    fn assessed_mut(&mut self, side: VcfSide) -> &mut Vec<Variant> {
        match side {
            VcfSide::Base => &mut self.baseline,
            VcfSide::Called => &mut self.called
        }
    }

    fn not_assessed(&self, side: VcfSide) -> &Vec<Variant> {
        match side {
            VcfSide::Base => &self.baseline_not_assessed,
            VcfSide::Called => &self.called_not_assessed
        }
    }

    fn not_assessed_mut(&mut self, side: VcfSide) -> &mut Vec<Variant> {
        match side {
            VcfSide::Base => &mut self.baseline_not_assessed,
            VcfSide::Called => &mut self.called_not_assessed
        }
    }
}

/// Holds both inputs fully in memory, keyed by chromosome in contig order
#[derive(Clone, Debug, Default)]
pub struct InMemoryVariantProvider {
    chromosomes: IndexMap<String, ChromosomeData>
}

impl InMemoryVariantProvider {
    /// Normalizes, filters, and sorts every record in the problem.
    /// Ids are assigned in input order, baseline first.
    /// # Arguments
    /// * `problem` - the loaded problem description
    /// * `regions` - optional confidence regions; records outside them are dropped
    /// * `config` - normalization and filtering options
    /// # Errors
    /// * if a contig name is repeated
    /// * if a record names an unknown chromosome
    /// * if a record cannot be normalized
    pub fn new(problem: &ComparisonProblem, regions: Option<&ConfidenceRegions>, config: &ProviderConfig) -> anyhow::Result<Self> {
        let mut chromosomes: IndexMap<String, ChromosomeData> = IndexMap::new();
        for contig in problem.contigs.iter() {
            if chromosomes.contains_key(&contig.name) {
                bail!("Duplicate contig name in input: {}", contig.name);
            }
            let sequence = contig.sequence.as_bytes().to_ascii_uppercase();
            chromosomes.insert(contig.name.clone(), ChromosomeData::new(Contig::new(contig.name.clone(), sequence)));
        }

        let mut next_id = 0;
        for side in VcfSide::iter() {
            let records = match side {
                VcfSide::Base => &problem.baseline,
                VcfSide::Called => &problem.called
            };

            let mut dropped = 0;
            for record in records.iter() {
                let id = next_id;
                next_id += 1;

                let Some(chrom_data) = chromosomes.get_mut(&record.chromosome) else {
                    bail!("{side} record #{id} is on unknown chromosome {:?}", record.chromosome);
                };
                let variant = Variant::from_record(id, record, config.ref_overlap)
                    .with_context(|| format!("Error while loading {side} record #{id} at {}:{}:", record.chromosome, record.position))?;

                let in_regions = regions
                    .map(|r| r.overlaps(variant.chromosome(), variant.original_start(), variant.end()))
                    .unwrap_or(true);
                if !in_regions || variant.is_hom_ref() {
                    dropped += 1;
                } else if config.is_not_assessed(&variant) {
                    chrom_data.not_assessed_mut(side).push(variant);
                } else {
                    chrom_data.assessed_mut(side).push(variant);
                }
            }
            debug!("Dropped {dropped} {side} records outside regions or homozygous reference.");
        }

        for (chrom, chrom_data) in chromosomes.iter_mut() {
            let reference_length = chrom_data.contig.length();
            for side in VcfSide::iter() {
                // anything running past the reference end can never be replayed
                let (sorted, out_of_bounds): (Vec<Variant>, Vec<Variant>) = std::mem::take(chrom_data.assessed_mut(side)).into_iter()
                    .sorted_by_key(|v| (v.start(), v.end(), v.id()))
                    .partition(|v| v.end() <= reference_length);
                if !out_of_bounds.is_empty() {
                    debug!("{chrom} {side}: dropped {} variants past the contig end ({reference_length} bp)", out_of_bounds.len());
                }
                *chrom_data.assessed_mut(side) = sorted;
                debug!("{chrom} {side}: {} assessed, {} not assessed", chrom_data.assessed(side).len(), chrom_data.not_assessed(side).len());
            }
        }

        let provider = Self { chromosomes };
        for side in VcfSide::iter() {
            let (assessed, not_assessed) = provider.chromosomes.values()
                .fold((0, 0), |acc, data| (acc.0 + data.assessed(side).len(), acc.1 + data.not_assessed(side).len()));
            info!("Loaded {assessed} {side} variants for comparison, {not_assessed} not assessed.");
        }
        Ok(provider)
    }

    /// Variants that were loaded but filtered from comparison
    pub fn not_assessed_list(&self, side: VcfSide, chromosome: &str) -> &[Variant] {
        self.chromosomes.get(chromosome)
            .map(|data| data.not_assessed(side).as_slice())
            .unwrap_or_default()
    }
}

impl VariantProvider for InMemoryVariantProvider {
    fn chromosome_names(&self) -> Vec<String> {
        self.chromosomes.keys().cloned().collect()
    }

    fn variant_list(&self, side: VcfSide, chromosome: &str) -> &[Variant] {
        self.chromosomes.get(chromosome)
            .map(|data| data.assessed(side).as_slice())
            .unwrap_or_default()
    }

    fn contig(&self, chromosome: &str) -> Option<&Contig> {
        self.chromosomes.get(chromosome).map(|data| &data.contig)
    }

    fn set_variant_status(&mut self, side: VcfSide, chromosome: &str, indices: &[usize], status: MatchStatus) {
        if let Some(data) = self.chromosomes.get_mut(chromosome) {
            let variants = data.assessed_mut(side);
            for &index in indices.iter() {
                variants[index].set_match_status(status);
            }
        }
    }
}
