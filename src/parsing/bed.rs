
use anyhow::{Context, bail};
use coitrees::{COITree, Interval, IntervalTree};
use indexmap::IndexMap;
use log::debug;
use std::path::Path;

use crate::util::json_io::open_reader;

/// Confidence regions loaded from a BED file, one interval tree per chromosome in file order.
#[derive(Clone)]
pub struct ConfidenceRegions {
    /// Lookup from a chromosome to a COITree, which has 0-based inclusive ranges
    lookup_trees: IndexMap<String, COITree<(), usize>>
}

impl std::fmt::Debug for ConfidenceRegions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // COITree does not have Debug, report the interval counts instead
        let lookup_counts: IndexMap<&str, usize> = self.lookup_trees.iter()
            .map(|(chrom, coi_tree)| (chrom.as_str(), coi_tree.len()))
            .collect();
        f.debug_struct("ConfidenceRegions").field("lookup_trees_len", &lookup_counts).finish()
    }
}

impl ConfidenceRegions {
    /// Loads an entire BED file into memory. Only the first three columns are used.
    /// # Arguments
    /// * `filename` - path to the .bed(.gz) file to open
    /// # Errors
    /// * if the file cannot be opened or a line cannot be parsed
    /// * if an interval has end <= start
    pub fn from_bed(filename: &Path) -> anyhow::Result<Self> {
        debug!("Pre-loading {filename:?}...");
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .from_reader(open_reader(filename)?);

        let mut intervals: Vec<(String, i64, i64)> = vec![];
        for (line_index, result) in reader.records().enumerate() {
            let record = result
                .with_context(|| format!("Error while reading line {} of {filename:?}:", line_index + 1))?;
            let chrom = record.get(0).unwrap_or_default();
            if chrom.is_empty() || chrom.starts_with("track") || chrom.starts_with("browser") {
                continue;
            }
            if record.len() < 3 {
                bail!("BED line {} of {filename:?} has fewer than 3 columns", line_index + 1);
            }

            let start: i64 = record[1].trim().parse()
                .with_context(|| format!("Error while parsing start on line {} of {filename:?}:", line_index + 1))?;
            let end: i64 = record[2].trim().parse()
                .with_context(|| format!("Error while parsing end on line {} of {filename:?}:", line_index + 1))?;
            if end <= start {
                bail!("BED line {} of {filename:?} has end <= start: {start}-{end}", line_index + 1);
            }
            intervals.push((chrom.to_string(), start, end));
        }

        Ok(Self::from_intervals(intervals))
    }

    /// Builds regions from half-open (chromosome, start, end) triples.
    /// Overlapping entries are allowed, a lookup only counts hits.
    pub fn from_intervals(intervals: impl IntoIterator<Item = (String, i64, i64)>) -> Self {
        let mut chrom_lookup: IndexMap<String, Vec<Interval<()>>> = IndexMap::new();
        for (chrom, start, end) in intervals {
            // half-open to 0-based inclusive
            chrom_lookup.entry(chrom).or_default()
                .push(Interval::new(start as i32, (end - 1) as i32, ()));
        }

        let lookup_trees: IndexMap<String, COITree<(), usize>> = chrom_lookup.into_iter()
            .map(|(chrom, coi_intervals)| {
                debug!("Loaded {} BED entries for {chrom}.", coi_intervals.len());
                (chrom, COITree::new(&coi_intervals))
            })
            .collect();

        Self { lookup_trees }
    }

    /// True if `[start, end)` touches any region on `chrom`.
    /// Zero-length spans count if a region covers `start`.
    pub fn overlaps(&self, chrom: &str, start: i64, end: i64) -> bool {
        match self.lookup_trees.get(chrom) {
            Some(coi_tree) => {
                let first = start as i32;
                let last = (end.max(start + 1) - 1) as i32;
                coi_tree.query_count(first, last) > 0
            },
            None => false
        }
    }

    /// Total number of loaded regions
    pub fn len(&self) -> usize {
        self.lookup_trees.values().map(|t| t.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
