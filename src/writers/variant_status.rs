
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use strum::IntoEnumIterator;

use crate::data_types::variants::{MatchStatus, Variant};
use crate::data_types::vcf_side::VcfSide;
use crate::duo_comparison::ChromosomeOutcome;
use crate::provider::{InMemoryVariantProvider, VariantProvider};

/// One line per loaded variant
#[derive(Serialize)]
struct VariantRow<'a> {
    /// BASE or CALLED
    source: String,
    chromosome: &'a str,
    /// 0-based record position
    position: i64,
    /// REF,ALT as provided
    alleles: &'a str,
    genotype: String,
    category: String,
    /// GT, AL, NO, or NA
    status: String,
    /// Only set for called genotype matches
    weight: Option<f64>
}

/// Writes the final status of every variant, including the ones that were not assessed
pub struct VariantStatusWriter {
    csv_writer: csv::Writer<File>
}

impl VariantStatusWriter {
    /// Opens the output file and writes the header on the first row
    pub fn new(filename: &Path) -> csv::Result<Self> {
        let csv_writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_path(filename)?;
        Ok(Self { csv_writer })
    }

    /// Writes both sides of one chromosome, sorted by position within each side.
    /// # Arguments
    /// * `provider` - holds the reconciled variants
    /// * `chromosome` - the chromosome to write
    /// * `outcome` - comparison outcome for the chromosome, if it succeeded; supplies the weights
    pub fn write_chromosome(&mut self, provider: &InMemoryVariantProvider, chromosome: &str, outcome: Option<&ChromosomeOutcome>) -> csv::Result<()> {
        let weights: FxHashMap<usize, f64> = outcome
            .map(|o| o.called_weights.iter().copied().collect())
            .unwrap_or_default();

        for side in VcfSide::iter() {
            let assessed = provider.variant_list(side, chromosome).iter()
                .enumerate()
                .map(|(index, variant)| {
                    let weight = match (side, variant.match_status()) {
                        (VcfSide::Called, MatchStatus::GenotypeMatch) => weights.get(&index).copied(),
                        _ => None
                    };
                    (variant, weight)
                });
            let not_assessed = provider.not_assessed_list(side, chromosome).iter()
                .map(|variant| (variant, None));

            for (variant, weight) in assessed.chain(not_assessed).sorted_by_key(|(v, _)| (v.original_start(), v.id())) {
                self.write_variant(side, variant, weight)?;
            }
        }
        Ok(())
    }

    fn write_variant(&mut self, source: VcfSide, variant: &Variant, weight: Option<f64>) -> csv::Result<()> {
        let row = VariantRow {
            source: source.to_string(),
            chromosome: variant.chromosome(),
            position: variant.original_start(),
            alleles: variant.original_alleles(),
            genotype: variant.genotype_string(),
            category: variant.category().to_string(),
            status: variant.match_status().to_string(),
            weight
        };
        self.csv_writer.serialize(&row)
    }

    /// Flushes everything to disk
    pub fn finalize(mut self) -> csv::Result<()> {
        self.csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::variants::VariantRecord;
    use crate::duo_comparison::{ComparisonConfig, apply_outcome, compare_chromosome};
    use crate::parsing::problem::{ComparisonProblem, ContigRecord};
    use crate::provider::ProviderConfig;

    fn record(position: i64, reference: &str, alternate: &str, genotype: &[usize], filter_pass: bool) -> VariantRecord {
        VariantRecord {
            chromosome: "chr1".to_string(),
            position,
            reference: reference.to_string(),
            alternates: vec![alternate.to_string()],
            genotype: genotype.iter().map(|&g| Some(g)).collect(),
            phased: false,
            filter_pass
        }
    }

    #[test]
    fn test_variant_file() {
        let problem = ComparisonProblem {
            contigs: vec![ContigRecord { name: "chr1".to_string(), sequence: "ACGTACGT".to_string() }],
            baseline: vec![record(2, "G", "T", &[0, 1], true), record(0, "A", "C", &[1, 1], false)],
            called: vec![record(2, "G", "T", &[0, 1], true), record(5, "C", "A", &[1, 1], true)]
        };
        let mut provider = InMemoryVariantProvider::new(&problem, None, &ProviderConfig::default()).unwrap();
        let outcome = compare_chromosome(&provider, "chr1", &ComparisonConfig::default()).unwrap();
        apply_outcome(&mut provider, &outcome);

        let out_dir = std::env::temp_dir().join(format!("hapreplay_variants_{}", std::process::id()));
        std::fs::create_dir_all(&out_dir).unwrap();
        let filename = out_dir.join("variants.tsv");
        let mut writer = VariantStatusWriter::new(&filename).unwrap();
        writer.write_chromosome(&provider, "chr1", Some(&outcome)).unwrap();
        writer.finalize().unwrap();

        let text = std::fs::read_to_string(&filename).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![
            "source\tchromosome\tposition\talleles\tgenotype\tcategory\tstatus\tweight",
            "BASE\tchr1\t0\tA,C\t1/1\tSNP\tNA\t",
            "BASE\tchr1\t2\tG,T\t0/1\tSNP\tGT\t",
            "CALLED\tchr1\t2\tG,T\t0/1\tSNP\tGT\t1.0",
            "CALLED\tchr1\t5\tC,A\t1/1\tSNP\tNO\t"
        ]);
        std::fs::remove_dir_all(&out_dir).unwrap();
    }
}
