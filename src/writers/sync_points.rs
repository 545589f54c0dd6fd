
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::duo_comparison::ChromosomeOutcome;

/// One line per non-empty interval between sync points
#[derive(Serialize)]
struct SyncPointRow<'a> {
    chromosome: &'a str,
    start: i64,
    /// Empty for the trailing interval
    end: Option<i64>,
    baseline_tp: usize,
    called_tp: usize,
    baseline_fn: usize,
    called_fp: usize
}

/// Writes the genotype pass sync intervals for debugging
pub struct SyncPointWriter {
    csv_writer: csv::Writer<File>
}

impl SyncPointWriter {
    pub fn new(filename: &Path) -> csv::Result<Self> {
        let csv_writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_path(filename)?;
        Ok(Self { csv_writer })
    }

    /// Writes every interval of the outcome that contains a decision
    pub fn write_outcome(&mut self, outcome: &ChromosomeOutcome) -> csv::Result<()> {
        for interval in outcome.sync_intervals.iter().filter(|si| !si.is_empty()) {
            let row = SyncPointRow {
                chromosome: &outcome.chromosome,
                start: interval.start,
                end: interval.end,
                baseline_tp: interval.baseline_included.len(),
                called_tp: interval.called_included.len(),
                baseline_fn: interval.baseline_excluded.len(),
                called_fp: interval.called_excluded.len()
            };
            self.csv_writer.serialize(&row)?;
        }
        Ok(())
    }

    pub fn finalize(mut self) -> csv::Result<()> {
        self.csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::sync_interval::SyncInterval;

    #[test]
    fn test_sync_point_file() {
        let mut first = SyncInterval::new(0, Some(4));
        first.baseline_included = vec![0];
        first.called_included = vec![0, 1];
        let mut trailing = SyncInterval::new(4, None);
        trailing.called_excluded = vec![2];
        let outcome = ChromosomeOutcome {
            chromosome: "chr1".to_string(),
            sync_intervals: vec![first, SyncInterval::new(4, Some(6)), trailing],
            ..Default::default()
        };

        let out_dir = std::env::temp_dir().join(format!("hapreplay_sync_{}", std::process::id()));
        std::fs::create_dir_all(&out_dir).unwrap();
        let filename = out_dir.join("sync_points.tsv");
        let mut writer = SyncPointWriter::new(&filename).unwrap();
        writer.write_outcome(&outcome).unwrap();
        writer.finalize().unwrap();

        let text = std::fs::read_to_string(&filename).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![
            "chromosome\tstart\tend\tbaseline_tp\tcalled_tp\tbaseline_fn\tcalled_fp",
            "chr1\t0\t4\t1\t2\t0\t0",
            "chr1\t4\t\t0\t0\t0\t1"
        ]);
        std::fs::remove_dir_all(&out_dir).unwrap();
    }
}
