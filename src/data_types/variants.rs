
use serde::{Deserialize, Serialize};

/// Characters that mark an allele as symbolic or otherwise outside what replay can handle
const STRUCTURAL_MARKERS: [u8; 4] = [b'[', b'<', b'*', b'.'];

/// Broad variant category used for the SNP/INDEL filters
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, strum_macros::AsRefStr, strum_macros::Display)]
pub enum VariantCategory {
    /// REF and every genotyped allele are exactly 1 bp
    #[strum(serialize = "SNP")]
    Snp,
    /// Anything else
    #[strum(serialize = "INDEL")]
    Indel
}

/// Outcome of the comparison for a single variant.
/// The ordering of upgrades is enforced by [`MatchStatus::upgrade`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, strum_macros::AsRefStr, strum_macros::Display)]
pub enum MatchStatus {
    /// Not evaluated, either filtered out or never reached
    #[default]
    #[strum(serialize = "NA")]
    NotAssessed,
    /// Both haplotypes agree with the other input
    #[strum(serialize = "GT")]
    GenotypeMatch,
    /// At least one haplotype agrees with the other input
    #[strum(serialize = "AL")]
    AlleleMatch,
    /// Could not be reconciled with the other input
    #[strum(serialize = "NO")]
    NoMatch
}

impl MatchStatus {
    /// Returns the status after trying to apply `new_status`.
    /// GenotypeMatch is never downgraded, AlleleMatch cannot replace GenotypeMatch, and NoMatch only replaces NotAssessed.
    pub fn upgrade(self, new_status: MatchStatus) -> MatchStatus {
        match (self, new_status) {
            (MatchStatus::GenotypeMatch, _) => MatchStatus::GenotypeMatch,
            (_, MatchStatus::GenotypeMatch) => MatchStatus::GenotypeMatch,
            (_, MatchStatus::AlleleMatch) => MatchStatus::AlleleMatch,
            (MatchStatus::NotAssessed, MatchStatus::NoMatch) => MatchStatus::NoMatch,
            (current, _) => current
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum VariantError {
    #[error("reference allele is empty")]
    EmptyReference,
    #[error("genotype is empty")]
    EmptyGenotype,
    #[error("genotype has {count} entries, only haploid and diploid calls are supported")]
    UnsupportedPloidy { count: usize },
    #[error("genotype index {index} is out of range for {allele_count} record alleles")]
    GenotypeIndexOutOfRange { index: usize, allele_count: usize },
    #[error("a variant must have 1 or 2 alleles, found {count}")]
    AlleleCount { count: usize }
}

/// A single record as it arrives from the input file, prior to any normalization.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct VariantRecord {
    /// Chromosome name, must match one of the contigs
    pub chromosome: String,
    /// 0-based position of the first REF base
    pub position: i64,
    /// REF sequence
    pub reference: String,
    /// ALT sequences, in record order
    #[serde(default)]
    pub alternates: Vec<String>,
    /// Genotype indices into [REF, ALT...]; `null` is a missing call
    pub genotype: Vec<Option<usize>>,
    /// True if the genotype is phased
    #[serde(default)]
    pub phased: bool,
    /// True if the record passed all filters
    #[serde(default = "default_filter_pass")]
    pub filter_pass: bool
}

fn default_filter_pass() -> bool {
    true
}

/// One possible edit relative to the reference.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Allele {
    /// Bases that replace the reference span
    sequence: Vec<u8>,
    /// 0-based start of the replaced span, negative if the allele has no placement
    start: i64,
    /// 0-based exclusive end of the replaced span
    end: i64,
    /// If true, replay treats this allele as a no-op
    is_ignored: bool,
    /// If true, normalization removed bases from this allele
    is_trimmed: bool,
    /// If true, the allele was called as REF (or missing)
    is_reference: bool
}

impl Allele {
    /// Constructor
    /// # Arguments
    /// * `sequence` - the bases of the allele
    /// * `start` - 0-based start of the reference span it replaces
    /// * `end` - exclusive end of the reference span it replaces
    /// * `is_ignored` - if true, the allele is a no-op during replay
    pub fn new(sequence: Vec<u8>, start: i64, end: i64, is_ignored: bool) -> Self {
        Self {
            sequence,
            start,
            end,
            is_ignored,
            is_trimmed: false,
            is_reference: false
        }
    }

    /// An allele with no placement, used to pad haploid calls
    pub fn unplaced() -> Self {
        Self {
            sequence: vec![],
            start: -1,
            end: -1,
            is_ignored: true,
            is_trimmed: false,
            is_reference: false
        }
    }

    /// True if the allele replaces nothing with nothing, e.g. the empty side of a pure insertion
    pub fn is_redundant(&self) -> bool {
        self.start == self.end && self.sequence.is_empty()
    }

    pub fn has_start(&self) -> bool {
        self.start >= 0
    }

    /// True if the allele is symbolic or longer than `max_size`
    pub fn is_structural(&self, max_size: usize) -> bool {
        self.sequence.len() > max_size || self.sequence.iter().any(|b| STRUCTURAL_MARKERS.contains(b))
    }

    /// Removes the shared anchor base at the front of the allele
    fn trim_first_nucleotide(&mut self) {
        if !self.sequence.is_empty() {
            self.sequence.remove(0);
            self.start += 1;
            self.is_trimmed = true;
        }
    }

    /// Removes any prefix and then suffix that the allele shares with the reference allele.
    /// Spanning deletions (`*`) are left untouched.
    fn trim_reference_overlap(&mut self, reference: &[u8]) {
        if self.sequence == b"*" {
            return;
        }

        let prefix = self.sequence.iter()
            .zip(reference.iter())
            .take_while(|(a, r)| a == r)
            .count();

        let suffix = self.sequence[prefix..].iter().rev()
            .zip(reference[prefix..].iter().rev())
            .take_while(|(a, r)| a == r)
            .count();

        if prefix + suffix > 0 {
            self.sequence = self.sequence[prefix..(self.sequence.len() - suffix)].to_vec();
            self.start += prefix as i64;
            self.end -= suffix as i64;
            self.is_trimmed = true;
        }
    }

    // getters
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn is_ignored(&self) -> bool {
        self.is_ignored
    }

    pub fn is_trimmed(&self) -> bool {
        self.is_trimmed
    }

    pub fn is_reference(&self) -> bool {
        self.is_reference
    }
}

/// A normalized, diploid (or haploid) variant call.
/// Once built, only the match status changes, and only via [`Variant::set_match_status`].
#[derive(Clone, Debug, PartialEq)]
pub struct Variant {
    /// Unique sequential identifier across both inputs
    id: usize,
    /// Chromosome name
    chromosome: String,
    /// Start of the variant after normalization, min over non-ignored alleles
    start: i64,
    /// End of the variant after normalization, max over non-ignored alleles
    end: i64,
    /// Record position before any trimming
    original_start: i64,
    /// The record alleles as "REF,ALT1,ALT2"
    original_alleles: String,
    /// Genotype indices as provided, `None` is missing
    genotype: Vec<Option<usize>>,
    /// The one or two genotyped alleles; the second is a copy or unplaced when `allele_count` is 1
    alleles: [Allele; 2],
    /// 1 for homozygous or haploid calls, 2 for heterozygous calls
    allele_count: usize,
    is_heterozygous: bool,
    is_phased: bool,
    /// True if every genotype entry is missing
    is_no_call: bool,
    is_filter_pass: bool,
    /// True if the shared anchor base was removed from every allele
    first_nucleotide_trimmed: bool,
    category: VariantCategory,
    match_status: MatchStatus
}

impl Variant {
    /// Builds a variant from a raw record, normalizing alleles along the way.
    /// # Arguments
    /// * `id` - unique identifier for this variant
    /// * `record` - the raw input record
    /// * `ref_overlap` - if true, reference alleles are ignored and shared prefix/suffix bases are trimmed from the others;
    ///   otherwise only a shared anchor base is trimmed
    /// # Errors
    /// * if REF is empty
    /// * if the genotype is empty, or has more than two entries
    /// * if a genotype index does not point at a record allele
    pub fn from_record(id: usize, record: &VariantRecord, ref_overlap: bool) -> Result<Variant, VariantError> {
        let reference = record.reference.as_bytes();
        if reference.is_empty() {
            return Err(VariantError::EmptyReference);
        }

        let genotype = &record.genotype;
        if genotype.is_empty() {
            return Err(VariantError::EmptyGenotype);
        }
        if genotype.len() > 2 {
            return Err(VariantError::UnsupportedPloidy { count: genotype.len() });
        }

        let record_alleles: Vec<&[u8]> = std::iter::once(reference)
            .chain(record.alternates.iter().map(|a| a.as_bytes()))
            .collect();
        for &index in genotype.iter().flatten() {
            if index >= record_alleles.len() {
                return Err(VariantError::GenotypeIndexOutOfRange { index, allele_count: record_alleles.len() });
            }
        }

        // missing calls replay as REF
        let position = record.position;
        let ref_end = position + reference.len() as i64;
        let mut alleles: Vec<Allele> = genotype.iter()
            .map(|gt| {
                let index = gt.unwrap_or(0);
                let mut allele = Allele::new(record_alleles[index].to_vec(), position, ref_end, false);
                allele.is_reference = index == 0;
                allele
            })
            .collect();

        let (allele_count, is_heterozygous) = if alleles.len() == 2 && alleles[0].sequence != alleles[1].sequence {
            (2, true)
        } else {
            (1, false)
        };

        // classified on the untrimmed alleles
        let category = if reference.len() == 1 && alleles.iter().all(|a| a.sequence.len() == 1) {
            VariantCategory::Snp
        } else {
            VariantCategory::Indel
        };

        let mut first_nucleotide_trimmed = false;
        if ref_overlap {
            for (allele, gt) in alleles.iter_mut().zip(genotype.iter()) {
                match gt {
                    None | Some(0) => allele.is_ignored = true,
                    Some(_) => allele.trim_reference_overlap(reference)
                };
            }
        } else if record_alleles.iter().all(|a| a.first() == reference.first()) {
            first_nucleotide_trimmed = true;
            for allele in alleles.iter_mut() {
                allele.trim_first_nucleotide();
            }
        }

        let (start, end) = placed_span(&alleles[..allele_count]).unwrap_or((position, position));
        let second = match alleles.get(1) {
            Some(allele) => allele.clone(),
            None => Allele::unplaced()
        };

        Ok(Variant {
            id,
            chromosome: record.chromosome.clone(),
            start,
            end,
            original_start: position,
            original_alleles: record_alleles.iter()
                .map(|a| String::from_utf8_lossy(a))
                .collect::<Vec<_>>()
                .join(","),
            genotype: genotype.clone(),
            alleles: [alleles.swap_remove(0), second],
            allele_count,
            is_heterozygous,
            is_phased: record.phased,
            is_no_call: genotype.iter().all(|gt| gt.is_none()),
            is_filter_pass: record.filter_pass,
            first_nucleotide_trimmed,
            category,
            match_status: MatchStatus::NotAssessed
        })
    }

    /// Builds a variant directly from already-normalized alleles.
    /// A single allele is a homozygous call; two alleles are heterozygous if their sequences differ.
    /// # Arguments
    /// * `id` - unique identifier for this variant
    /// * `chromosome` - chromosome name
    /// * `alleles` - one or two alleles
    /// * `is_phased` - phasing flag to carry along
    /// # Errors
    /// * if `alleles` does not have exactly 1 or 2 entries
    pub fn from_alleles(id: usize, chromosome: &str, alleles: Vec<Allele>, is_phased: bool) -> Result<Variant, VariantError> {
        if alleles.is_empty() || alleles.len() > 2 {
            return Err(VariantError::AlleleCount { count: alleles.len() });
        }

        let is_heterozygous = alleles.len() == 2 && alleles[0].sequence != alleles[1].sequence;
        let allele_count = if is_heterozygous { 2 } else { 1 };
        let first = alleles[0].clone();
        let second = alleles.get(1).cloned().unwrap_or_else(|| first.clone());
        let (start, end) = placed_span(&alleles[..allele_count]).unwrap_or((first.start, first.start));
        let category = if alleles.iter().all(|a| a.sequence.len() == 1 && a.end - a.start == 1) {
            VariantCategory::Snp
        } else {
            VariantCategory::Indel
        };

        // ignored alleles read as REF, each distinct sequence after that gets the next ALT index
        let mut alt_sequences: Vec<&[u8]> = vec![];
        let genotype: Vec<Option<usize>> = alleles.iter()
            .map(|a| {
                if a.is_ignored || a.is_reference {
                    return Some(0);
                }
                let index = match alt_sequences.iter().position(|&seq| seq == a.sequence.as_slice()) {
                    Some(index) => index,
                    None => {
                        alt_sequences.push(&a.sequence);
                        alt_sequences.len() - 1
                    }
                };
                Some(index + 1)
            })
            .collect();

        Ok(Variant {
            id,
            chromosome: chromosome.to_string(),
            start,
            end,
            original_start: start,
            original_alleles: alleles.iter()
                .map(|a| String::from_utf8_lossy(&a.sequence).to_string())
                .collect::<Vec<_>>()
                .join(","),
            genotype,
            alleles: [first, second],
            allele_count,
            is_heterozygous,
            is_phased,
            is_no_call: false,
            is_filter_pass: true,
            first_nucleotide_trimmed: false,
            category,
            match_status: MatchStatus::NotAssessed
        })
    }

    /// True if this is a called 0/0 (missing entries count as 0)
    pub fn is_hom_ref(&self) -> bool {
        !self.is_no_call && self.genotype.iter().all(|gt| gt.unwrap_or(0) == 0)
    }

    /// True if any genotyped allele is symbolic or longer than `max_size`
    pub fn is_structural(&self, max_size: usize) -> bool {
        self.alleles[..self.allele_count].iter().any(|a| a.is_structural(max_size))
    }

    /// Formats the genotype the way it would appear in a VCF, e.g. "0|1" or "./1"
    pub fn genotype_string(&self) -> String {
        let separator = if self.is_phased { "|" } else { "/" };
        self.genotype.iter()
            .map(|gt| gt.map(|g| g.to_string()).unwrap_or_else(|| ".".to_string()))
            .collect::<Vec<String>>()
            .join(separator)
    }

    /// Applies a new status subject to the monotonic upgrade rule.
    pub fn set_match_status(&mut self, status: MatchStatus) {
        self.match_status = self.match_status.upgrade(status);
    }

    // getters
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn original_start(&self) -> i64 {
        self.original_start
    }

    pub fn original_alleles(&self) -> &str {
        &self.original_alleles
    }

    pub fn genotype(&self) -> &[Option<usize>] {
        &self.genotype
    }

    pub fn alleles(&self) -> &[Allele; 2] {
        &self.alleles
    }

    pub fn allele(&self, index: usize) -> &Allele {
        &self.alleles[index]
    }

    pub fn allele_count(&self) -> usize {
        self.allele_count
    }

    pub fn is_heterozygous(&self) -> bool {
        self.is_heterozygous
    }

    pub fn is_phased(&self) -> bool {
        self.is_phased
    }

    pub fn is_no_call(&self) -> bool {
        self.is_no_call
    }

    pub fn is_filter_pass(&self) -> bool {
        self.is_filter_pass
    }

    pub fn first_nucleotide_trimmed(&self) -> bool {
        self.first_nucleotide_trimmed
    }

    pub fn category(&self) -> VariantCategory {
        self.category
    }

    pub fn match_status(&self) -> MatchStatus {
        self.match_status
    }
}

/// Min start and max end over the non-ignored alleles, if there are any
fn placed_span(alleles: &[Allele]) -> Option<(i64, i64)> {
    alleles.iter()
        .filter(|a| !a.is_ignored)
        .fold(None, |acc, a| match acc {
            None => Some((a.start, a.end)),
            Some((s, e)) => Some((s.min(a.start), e.max(a.end)))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(position: i64, reference: &str, alternates: &[&str], genotype: Vec<Option<usize>>) -> VariantRecord {
        VariantRecord {
            chromosome: "chr1".to_string(),
            position,
            reference: reference.to_string(),
            alternates: alternates.iter().map(|a| a.to_string()).collect(),
            genotype,
            phased: false,
            filter_pass: true
        }
    }

    #[test]
    fn test_status_upgrade() {
        // GT then AL stays GT
        let mut status = MatchStatus::NotAssessed;
        status = status.upgrade(MatchStatus::GenotypeMatch);
        status = status.upgrade(MatchStatus::AlleleMatch);
        assert_eq!(status, MatchStatus::GenotypeMatch);

        // AL then GT becomes GT
        let status = MatchStatus::AlleleMatch.upgrade(MatchStatus::GenotypeMatch);
        assert_eq!(status, MatchStatus::GenotypeMatch);

        // NO only replaces NA
        assert_eq!(MatchStatus::NotAssessed.upgrade(MatchStatus::NoMatch), MatchStatus::NoMatch);
        assert_eq!(MatchStatus::AlleleMatch.upgrade(MatchStatus::NoMatch), MatchStatus::AlleleMatch);
        assert_eq!(MatchStatus::GenotypeMatch.upgrade(MatchStatus::NoMatch), MatchStatus::GenotypeMatch);

        // AL can replace NO
        assert_eq!(MatchStatus::NoMatch.upgrade(MatchStatus::AlleleMatch), MatchStatus::AlleleMatch);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(MatchStatus::NotAssessed.as_ref(), "NA");
        assert_eq!(MatchStatus::GenotypeMatch.to_string(), "GT");
        assert_eq!(MatchStatus::AlleleMatch.to_string(), "AL");
        assert_eq!(MatchStatus::NoMatch.to_string(), "NO");
    }

    #[test]
    fn test_snv_ref_overlap() {
        let variant = Variant::from_record(0, &record(10, "A", &["C"], vec![Some(0), Some(1)]), true).unwrap();
        assert!(variant.is_heterozygous());
        assert_eq!(variant.allele_count(), 2);
        assert!(variant.allele(0).is_ignored());
        assert!(!variant.allele(1).is_ignored());
        assert_eq!(variant.allele(1).sequence(), b"C");
        assert_eq!((variant.start(), variant.end()), (10, 11));
        assert_eq!(variant.category(), VariantCategory::Snp);
        assert_eq!(variant.genotype_string(), "0/1");
        assert_eq!(variant.original_alleles(), "A,C");
    }

    #[test]
    fn test_deletion_ref_overlap() {
        // ACGT -> A, shared prefix "A" trimmed
        let variant = Variant::from_record(0, &record(5, "ACGT", &["A"], vec![Some(1), Some(1)]), true).unwrap();
        assert!(!variant.is_heterozygous());
        assert_eq!(variant.allele_count(), 1);
        let allele = variant.allele(0);
        assert_eq!(allele.sequence(), b"");
        assert_eq!((allele.start(), allele.end()), (6, 9));
        assert!(allele.is_trimmed());
        assert_eq!((variant.start(), variant.end()), (6, 9));
        assert_eq!(variant.category(), VariantCategory::Indel);
    }

    #[test]
    fn test_insertion_suffix_trim() {
        // G -> GG, prefix trims the anchor, leaving a pure insertion at 3
        let variant = Variant::from_record(0, &record(2, "G", &["GG"], vec![Some(1), Some(1)]), true).unwrap();
        let allele = variant.allele(0);
        assert_eq!(allele.sequence(), b"G");
        assert_eq!((allele.start(), allele.end()), (3, 3));
        assert_eq!(variant.category(), VariantCategory::Indel);

        // mixed prefix and suffix: ACGT -> AGT becomes a deletion of C
        let variant = Variant::from_record(0, &record(0, "ACGT", &["AGT"], vec![Some(1)]), true).unwrap();
        let allele = variant.allele(0);
        assert_eq!(allele.sequence(), b"");
        assert_eq!((allele.start(), allele.end()), (1, 2));
    }

    #[test]
    fn test_first_nucleotide_trim() {
        let variant = Variant::from_record(0, &record(2, "G", &["GTT"], vec![Some(0), Some(1)]), false).unwrap();
        assert!(variant.first_nucleotide_trimmed());
        assert_eq!(variant.allele(0).sequence(), b"");
        assert_eq!((variant.allele(0).start(), variant.allele(0).end()), (3, 3));
        assert_eq!(variant.allele(1).sequence(), b"TT");
        assert_eq!((variant.start(), variant.end()), (3, 3));

        // no shared anchor, nothing trimmed
        let variant = Variant::from_record(0, &record(2, "G", &["T"], vec![Some(0), Some(1)]), false).unwrap();
        assert!(!variant.first_nucleotide_trimmed());
        assert_eq!(variant.allele(0).sequence(), b"G");
        assert!(!variant.allele(0).is_ignored());
        assert!(variant.allele(0).is_reference());
        assert!(!variant.allele(1).is_reference());
    }

    #[test]
    fn test_no_call() {
        let variant = Variant::from_record(0, &record(2, "G", &["T"], vec![None, None]), true).unwrap();
        assert!(variant.is_no_call());
        assert!(!variant.is_hom_ref());
        assert!(variant.allele(0).is_ignored());
        assert_eq!((variant.start(), variant.end()), (2, 2));
        assert_eq!(variant.genotype_string(), "./.");

        let variant = Variant::from_record(0, &record(2, "G", &["T"], vec![Some(0), Some(0)]), true).unwrap();
        assert!(variant.is_hom_ref());
    }

    #[test]
    fn test_haploid() {
        let variant = Variant::from_record(3, &record(2, "G", &["T"], vec![Some(1)]), true).unwrap();
        assert_eq!(variant.allele_count(), 1);
        assert!(!variant.is_heterozygous());
        assert!(!variant.allele(1).has_start());
        assert_eq!(variant.id(), 3);
    }

    #[test]
    fn test_record_errors() {
        assert!(matches!(
            Variant::from_record(0, &record(2, "", &["T"], vec![Some(1)]), true),
            Err(VariantError::EmptyReference)
        ));
        assert!(matches!(
            Variant::from_record(0, &record(2, "G", &["T"], vec![]), true),
            Err(VariantError::EmptyGenotype)
        ));
        assert!(matches!(
            Variant::from_record(0, &record(2, "G", &["T"], vec![Some(1), Some(1), Some(1)]), true),
            Err(VariantError::UnsupportedPloidy { count: 3 })
        ));
        assert!(matches!(
            Variant::from_record(0, &record(2, "G", &["T"], vec![Some(0), Some(2)]), true),
            Err(VariantError::GenotypeIndexOutOfRange { index: 2, allele_count: 2 })
        ));
    }

    #[test]
    fn test_structural() {
        let variant = Variant::from_record(0, &record(2, "G", &["<DEL>"], vec![Some(0), Some(1)]), true).unwrap();
        assert!(variant.is_structural(1000));

        let variant = Variant::from_record(0, &record(2, "G", &["GTTTT"], vec![Some(1), Some(1)]), true).unwrap();
        assert!(!variant.is_structural(1000));
        assert!(variant.is_structural(3));
    }

    #[test]
    fn test_from_alleles() {
        let variant = Variant::from_alleles(4, "chr1", vec![Allele::new(b"GG".to_vec(), 2, 3, false)], false).unwrap();
        assert!(!variant.is_heterozygous());
        assert_eq!(variant.genotype_string(), "1");
        assert_eq!(variant.allele(1), variant.allele(0));
        assert_eq!((variant.start(), variant.end()), (2, 3));

        let variant = Variant::from_alleles(5, "chr1", vec![
            Allele::new(b"G".to_vec(), 2, 3, true),
            Allele::new(b"T".to_vec(), 2, 3, false)
        ], true).unwrap();
        assert!(variant.is_heterozygous());
        assert_eq!(variant.genotype_string(), "0|1");

        let variant = Variant::from_alleles(6, "chr1", vec![
            Allele::new(b"A".to_vec(), 2, 3, false),
            Allele::new(b"T".to_vec(), 2, 3, false)
        ], false).unwrap();
        assert_eq!(variant.genotype_string(), "1/2");

        let variant = Variant::from_alleles(7, "chr1", vec![
            Allele::new(b"T".to_vec(), 2, 3, false),
            Allele::new(b"T".to_vec(), 2, 3, false)
        ], false).unwrap();
        assert!(!variant.is_heterozygous());
        assert_eq!(variant.genotype_string(), "1/1");

        assert!(matches!(
            Variant::from_alleles(8, "chr1", vec![], false),
            Err(VariantError::AlleleCount { count: 0 })
        ));
    }

    #[test]
    fn test_set_match_status() {
        let mut variant = Variant::from_alleles(0, "chr1", vec![Allele::new(b"T".to_vec(), 2, 3, false)], false).unwrap();
        variant.set_match_status(MatchStatus::AlleleMatch);
        variant.set_match_status(MatchStatus::NoMatch);
        assert_eq!(variant.match_status(), MatchStatus::AlleleMatch);
        variant.set_match_status(MatchStatus::GenotypeMatch);
        variant.set_match_status(MatchStatus::AlleleMatch);
        assert_eq!(variant.match_status(), MatchStatus::GenotypeMatch);
    }
}
