
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use strum::IntoEnumIterator;

use crate::data_types::summary_metrics::{ComparisonMode, SummaryMetrics};
use crate::data_types::variants::Variant;

/// Label used for rows that cover every chromosome
pub const ALL_CHROMOSOMES: &str = "ALL";

/// Metrics for both comparison modes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeMetrics {
    pub genotype: SummaryMetrics,
    pub allele: SummaryMetrics
}

impl ModeMetrics {
    pub fn get(&self, mode: ComparisonMode) -> &SummaryMetrics {
        match mode {
            ComparisonMode::Genotype => &self.genotype,
            ComparisonMode::Allele => &self.allele
        }
    }
}

/// This is a wrapper for writing out summary stats to a file
#[derive(Default)]
pub struct SummaryWriter {
    /// Per-chromosome metrics, in the order they were added
    chromosome_metrics: Vec<(String, ModeMetrics)>,
    /// Running total over all chromosomes
    all_metrics: ModeMetrics
}

/// Contains all the data written to each row of our stats file
#[derive(Serialize)]
struct SummaryRow {
    /// Chromosome name, or ALL
    chromosome: String,
    /// Comparison type
    comparison: String,
    /// Total number of assessed variants in the baseline
    truth_total: u64,
    /// Total number of true positives in the baseline
    truth_tp: u64,
    /// Total number of false negatives
    truth_fn: u64,
    /// Total number of true positives in the called set
    query_tp: u64,
    /// Total number of false positives
    query_fp: u64,
    /// Recall = truth.TP / (truth.TP+truth.FN)
    metric_recall: Option<f64>,
    /// Precision = query.TP / (query.TP + query.FP)
    metric_precision: Option<f64>,
    /// F1 = combination score of recall and precision
    metric_f1: Option<f64>
}

impl SummaryRow {
    /// Creates a new row from labels and summary metrics
    pub fn new(chromosome: String, mode: ComparisonMode, metrics: &SummaryMetrics) -> Self {
        Self {
            chromosome,
            comparison: mode.to_string(),
            truth_total: metrics.truth_total(),
            truth_tp: metrics.truth_tp,
            truth_fn: metrics.truth_fn,
            query_tp: metrics.query_tp,
            query_fp: metrics.query_fp,
            metric_recall: metrics.recall(),
            metric_precision: metrics.precision(),
            metric_f1: metrics.f1(),
        }
    }
}

impl SummaryWriter {
    /// Creates a new writer to accumulate stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies the reconciled statuses of one chromosome in both modes
    /// # Arguments
    /// * `chromosome` - the chromosome label for the rows
    /// * `baseline` - assessed baseline variants with final statuses
    /// * `called` - assessed called variants with final statuses
    pub fn add_chromosome(&mut self, chromosome: &str, baseline: &[Variant], called: &[Variant]) {
        let metrics = ModeMetrics {
            genotype: SummaryMetrics::from_variants(baseline, called, ComparisonMode::Genotype),
            allele: SummaryMetrics::from_variants(baseline, called, ComparisonMode::Allele)
        };
        self.all_metrics.genotype += metrics.genotype;
        self.all_metrics.allele += metrics.allele;
        self.chromosome_metrics.push((chromosome.to_string(), metrics));
    }

    pub fn all_metrics(&self) -> &ModeMetrics {
        &self.all_metrics
    }

    /// Will write the summary out to the given file path
    /// # Arguments
    /// * `filename` - the filename for the output (tsv/csv)
    pub fn write_summary(&self, filename: &Path) -> csv::Result<()> {
        // modify the delimiter to "," if it ends with .csv
        let is_csv: bool = filename.extension().unwrap_or_default() == "csv";
        let delimiter: u8 = if is_csv { b',' } else { b'\t' };
        let mut csv_writer: csv::Writer<File> = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_path(filename)?;

        for mode in ComparisonMode::iter() {
            csv_writer.serialize(SummaryRow::new(ALL_CHROMOSOMES.to_string(), mode, self.all_metrics.get(mode)))?;
        }

        for (chromosome, metrics) in self.chromosome_metrics.iter() {
            for mode in ComparisonMode::iter() {
                csv_writer.serialize(SummaryRow::new(chromosome.clone(), mode, metrics.get(mode)))?;
            }
        }

        // save everything
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::variants::{Allele, MatchStatus};

    fn variant_with_status(id: usize, status: MatchStatus) -> Variant {
        let mut variant = Variant::from_alleles(id, "chr1", vec![Allele::new(b"T".to_vec(), id as i64, id as i64 + 1, false)], false).unwrap();
        variant.set_match_status(status);
        variant
    }

    #[test]
    fn test_summary_file() {
        let baseline = vec![
            variant_with_status(0, MatchStatus::GenotypeMatch),
            variant_with_status(1, MatchStatus::AlleleMatch)
        ];
        let called = vec![
            variant_with_status(2, MatchStatus::GenotypeMatch),
            variant_with_status(3, MatchStatus::NoMatch),
            variant_with_status(4, MatchStatus::NotAssessed)
        ];

        let mut writer = SummaryWriter::new();
        writer.add_chromosome("chr1", &baseline, &called);
        writer.add_chromosome("chr2", &baseline, &[]);
        assert_eq!(writer.all_metrics().genotype, SummaryMetrics::new(2, 2, 1, 1));
        assert_eq!(writer.all_metrics().allele, SummaryMetrics::new(4, 0, 1, 1));

        let out_dir = std::env::temp_dir().join(format!("hapreplay_summary_{}", std::process::id()));
        std::fs::create_dir_all(&out_dir).unwrap();
        let filename = out_dir.join("summary.tsv");
        writer.write_summary(&filename).unwrap();

        let text = std::fs::read_to_string(&filename).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "chromosome\tcomparison\ttruth_total\ttruth_tp\ttruth_fn\tquery_tp\tquery_fp\tmetric_recall\tmetric_precision\tmetric_f1");
        assert!(lines[1].starts_with("ALL\tGT\t4\t2\t2\t1\t1\t0.5\t0.5\t0.5"));
        assert!(lines[2].starts_with("ALL\tAL\t4\t4\t0\t1\t1\t1.0\t0.5\t"));
        assert!(lines[5].starts_with("chr2\tGT\t2\t1\t1\t0\t0\t0.5\t\t"));
        std::fs::remove_dir_all(&out_dir).unwrap();
    }
}
