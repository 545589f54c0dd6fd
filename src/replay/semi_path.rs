
use std::cmp::Ordering;

use crate::data_types::oriented_variant::OrientedVariant;
use crate::data_types::variants::Variant;
use crate::data_types::vcf_side::VcfSide;
use crate::replay::ReplayError;
use crate::replay::chain_list::ChainList;
use crate::replay::haplotype_sequence::HaplotypeSequence;

/// Replay state for one input: both haplotypes plus the include/exclude decision for every variant considered so far.
#[derive(Clone)]
pub struct SemiPath<'a> {
    haplotype_a: HaplotypeSequence<'a>,
    haplotype_b: HaplotypeSequence<'a>,
    /// The ordered variants of this input
    variants: &'a [Variant],
    vcf_side: VcfSide,
    /// Index of the last variant decided on, None before the first decision
    variant_index: Option<usize>,
    /// Furthest end over all decided variants
    variant_end_position: i64,
    /// Furthest end over included variants only
    included_variant_end_position: i64,
    included_variants: ChainList<OrientedVariant>,
    excluded_variants: ChainList<usize>,
    finished_a: bool,
    finished_b: bool
}

impl<'a> SemiPath<'a> {
    pub fn new(reference: &'a [u8], variants: &'a [Variant], vcf_side: VcfSide) -> Self {
        Self {
            haplotype_a: HaplotypeSequence::new(reference, variants),
            haplotype_b: HaplotypeSequence::new(reference, variants),
            variants,
            vcf_side,
            variant_index: None,
            variant_end_position: 0,
            included_variant_end_position: 0,
            included_variants: ChainList::new(),
            excluded_variants: ChainList::new(),
            finished_a: false,
            finished_b: false
        }
    }

    /// Places `oriented` on haplotype A and its complement on haplotype B.
    /// # Panics
    /// * if `index` is not greater than the last decided index
    pub fn include_variant(&mut self, oriented: OrientedVariant, index: usize) {
        self.assert_increasing(index);
        let variant_end = oriented.variant(self.variants).end();
        self.included_variants.push(oriented);
        self.variant_index = Some(index);
        self.variant_end_position = self.variant_end_position.max(variant_end);
        self.included_variant_end_position = self.included_variant_end_position.max(variant_end);
        self.haplotype_a.add_variant(oriented);
        self.haplotype_b.add_variant(oriented.other());
    }

    /// Records that the variant at `index` is left out of this path.
    /// # Panics
    /// * if `index` is not greater than the last decided index
    pub fn exclude_variant(&mut self, index: usize) {
        self.assert_increasing(index);
        self.excluded_variants.push(index);
        self.variant_end_position = self.variant_end_position.max(self.variants[index].end());
        self.variant_index = Some(index);
    }

    fn assert_increasing(&self, index: usize) {
        if let Some(previous) = self.variant_index {
            assert!(index > previous, "{} variant index {index} is not after {previous}", self.vcf_side);
        }
    }

    /// Excludes every undecided variant that starts before `max_position`, returning how many were skipped
    pub fn skip_variants_before(&mut self, max_position: i64) -> usize {
        let mut skipped = 0;
        while self.variants.get(self.next_variant_index()).is_some_and(|v| v.start() < max_position) {
            self.exclude_variant(self.next_variant_index());
            skipped += 1;
        }
        skipped
    }

    /// True if the orientation can be included without clashing with what is already included
    pub fn is_new(&self, oriented: &OrientedVariant) -> bool {
        oriented.variant(self.variants).start() >= self.included_variant_end_position ||
            (self.haplotype_a.is_new(oriented) && self.haplotype_b.is_new(&oriented.other()))
    }

    /// True if both haplotypes emit the same bases as `other`, ignoring case.
    /// A finished haplotype on either side matches anything.
    pub fn matches(&self, other: &SemiPath) -> bool {
        let a_matches = self.finished_a || other.finished_a ||
            self.haplotype_a.next_base().eq_ignore_ascii_case(&other.haplotype_a.next_base());
        let b_matches = self.finished_b || other.finished_b ||
            self.haplotype_b.next_base().eq_ignore_ascii_case(&other.haplotype_b.next_base());
        a_matches && b_matches
    }

    pub fn step_haplotype_a(&mut self) -> Result<(), ReplayError> {
        if self.haplotype_a.has_next() {
            self.haplotype_a.next()
        } else {
            self.finished_a = true;
            Ok(())
        }
    }

    pub fn step_haplotype_b(&mut self) -> Result<(), ReplayError> {
        if self.haplotype_b.has_next() {
            self.haplotype_b.next()
        } else {
            self.finished_b = true;
            Ok(())
        }
    }

    /// Positive if haplotype A is ahead of haplotype B, negative if behind
    pub fn compare_haplotype_positions(&self) -> i64 {
        self.haplotype_a.template_position() - self.haplotype_b.template_position()
    }

    /// The furthest template position over both haplotypes
    pub fn position(&self) -> i64 {
        self.haplotype_a.template_position().max(self.haplotype_b.template_position())
    }

    pub fn move_forward(&mut self, position: i64) -> Result<(), ReplayError> {
        self.haplotype_a.move_forward(position)?;
        self.haplotype_b.move_forward(position)
    }

    /// Abandons any partially replayed variants and parks both haplotypes at `position`
    pub fn reset_to(&mut self, position: i64) {
        self.haplotype_a.reset_to(position);
        self.haplotype_b.reset_to(position);
    }

    pub fn has_finished(&self) -> bool {
        self.finished_a && self.finished_b
    }

    pub fn is_on_template(&self) -> bool {
        self.haplotype_a.is_on_template() && self.haplotype_b.is_on_template()
    }

    pub fn wants_future_variant_bases(&self) -> bool {
        self.haplotype_a.wants_future_variant_bases() || self.haplotype_b.wants_future_variant_bases()
    }

    /// Index of the next undecided variant
    pub fn next_variant_index(&self) -> usize {
        self.variant_index.map_or(0, |i| i + 1)
    }

    // getters
    pub fn variants(&self) -> &'a [Variant] {
        self.variants
    }

    pub fn vcf_side(&self) -> VcfSide {
        self.vcf_side
    }

    pub fn variant_index(&self) -> Option<usize> {
        self.variant_index
    }

    pub fn variant_end_position(&self) -> i64 {
        self.variant_end_position
    }

    pub fn included_variant_end_position(&self) -> i64 {
        self.included_variant_end_position
    }

    pub fn included_variants(&self) -> &ChainList<OrientedVariant> {
        &self.included_variants
    }

    pub fn excluded(&self) -> &ChainList<usize> {
        &self.excluded_variants
    }
}

impl std::fmt::Debug for SemiPath<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemiPath")
            .field("vcf_side", &self.vcf_side)
            .field("position", &self.position())
            .field("variant_index", &self.variant_index)
            .field("variant_end_position", &self.variant_end_position)
            .field("included", &self.included_variants.len())
            .field("excluded", &self.excluded_variants.len())
            .field("haplotype_a", &self.haplotype_a)
            .field("haplotype_b", &self.haplotype_b)
            .finish()
    }
}

impl PartialEq for SemiPath<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemiPath<'_> {}

impl PartialOrd for SemiPath<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemiPath<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.haplotype_a.cmp(&other.haplotype_a)
            .then_with(|| self.haplotype_b.cmp(&other.haplotype_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::variants::Allele;

    const REFERENCE: &[u8] = b"ACGTACGT";

    fn het(id: usize, alt: &[u8], start: i64, end: i64) -> Variant {
        let reference = REFERENCE[start as usize..end as usize].to_vec();
        Variant::from_alleles(id, "chr1", vec![
            Allele::new(reference, start, end, true),
            Allele::new(alt.to_vec(), start, end, false)
        ], false).unwrap()
    }

    fn hom(id: usize, alt: &[u8], start: i64, end: i64) -> Variant {
        Variant::from_alleles(id, "chr1", vec![Allele::new(alt.to_vec(), start, end, false)], false).unwrap()
    }

    #[test]
    fn test_include_exclude() {
        let variants = vec![het(0, b"T", 1, 2), hom(1, b"", 3, 6)];
        let mut semi_path = SemiPath::new(REFERENCE, &variants, VcfSide::Called);
        assert_eq!(semi_path.next_variant_index(), 0);

        semi_path.include_variant(OrientedVariant::new(0, &variants[0], true), 0);
        assert_eq!(semi_path.variant_index(), Some(0));
        assert_eq!(semi_path.variant_end_position(), 2);
        assert_eq!(semi_path.included_variant_end_position(), 2);

        semi_path.exclude_variant(1);
        assert_eq!(semi_path.variant_end_position(), 6);
        assert_eq!(semi_path.included_variant_end_position(), 2);
        assert_eq!(semi_path.included_variants().len(), 1);
        assert_eq!(semi_path.excluded().to_vec(), vec![1]);
        assert_eq!(semi_path.next_variant_index(), 2);
    }

    #[test]
    #[should_panic]
    fn test_repeated_index() {
        let variants = vec![het(0, b"T", 1, 2), hom(1, b"", 3, 6)];
        let mut semi_path = SemiPath::new(REFERENCE, &variants, VcfSide::Base);
        semi_path.include_variant(OrientedVariant::new(1, &variants[1], true), 1);
        semi_path.exclude_variant(0);
    }

    #[test]
    #[should_panic]
    fn test_same_index_twice() {
        let variants = vec![het(0, b"T", 1, 2)];
        let mut semi_path = SemiPath::new(REFERENCE, &variants, VcfSide::Base);
        semi_path.exclude_variant(0);
        semi_path.exclude_variant(0);
    }

    #[test]
    fn test_haplotype_split() {
        // 0/1 oriented forward puts the alt on haplotype B only
        let variants = vec![het(0, b"T", 1, 2)];
        let mut semi_path = SemiPath::new(REFERENCE, &variants, VcfSide::Called);
        semi_path.include_variant(OrientedVariant::new(0, &variants[0], true), 0);
        semi_path.move_forward(1).unwrap();
        assert_eq!(semi_path.haplotype_a.next_base(), b'C');
        assert_eq!(semi_path.haplotype_b.next_base(), b'T');
        assert!(semi_path.haplotype_a.is_on_template());
        assert!(!semi_path.is_on_template());
    }

    #[test]
    fn test_is_new() {
        let variants = vec![hom(0, b"A", 2, 4), het(1, b"T", 3, 4), het(2, b"G", 4, 5)];
        let mut semi_path = SemiPath::new(REFERENCE, &variants, VcfSide::Called);
        semi_path.include_variant(OrientedVariant::new(0, &variants[0], true), 0);

        // overlaps the included deletion on both haplotypes
        assert!(!semi_path.is_new(&OrientedVariant::new(1, &variants[1], true)));
        // starts after everything included
        assert!(semi_path.is_new(&OrientedVariant::new(2, &variants[2], true)));
    }

    #[test]
    fn test_matches() {
        let variants = vec![hom(0, b"t", 1, 2)];
        let no_variants: Vec<Variant> = vec![];
        let mut called = SemiPath::new(REFERENCE, &variants, VcfSide::Called);
        let mut base = SemiPath::new(REFERENCE, &no_variants, VcfSide::Base);
        assert!(called.matches(&base));

        called.include_variant(OrientedVariant::new(0, &variants[0], true), 0);
        called.move_forward(1).unwrap();
        base.move_forward(1).unwrap();
        assert!(!called.matches(&base));

        let mut lowercase = SemiPath::new(b"ATGTACGT", &no_variants, VcfSide::Base);
        lowercase.move_forward(1).unwrap();
        assert!(called.matches(&lowercase));

        // a finished haplotype matches anything
        base.finished_a = true;
        base.finished_b = true;
        assert!(called.matches(&base));
    }

    #[test]
    fn test_step_to_finish() {
        let variants: Vec<Variant> = vec![];
        let mut semi_path = SemiPath::new(b"ACG", &variants, VcfSide::Base);
        for _ in 0..3 {
            semi_path.step_haplotype_a().unwrap();
            semi_path.step_haplotype_b().unwrap();
        }
        assert_eq!(semi_path.position(), 2);
        assert!(!semi_path.has_finished());
        semi_path.step_haplotype_a().unwrap();
        assert!(!semi_path.has_finished());
        semi_path.step_haplotype_b().unwrap();
        assert!(semi_path.has_finished());
    }

    #[test]
    fn test_skip_variants_before() {
        let variants = vec![het(0, b"T", 1, 2), het(1, b"A", 3, 4), het(2, b"T", 5, 6)];
        let mut semi_path = SemiPath::new(REFERENCE, &variants, VcfSide::Base);
        semi_path.exclude_variant(0);
        assert_eq!(semi_path.skip_variants_before(5), 1);
        assert_eq!(semi_path.excluded().to_vec(), vec![0, 1]);
        assert_eq!(semi_path.next_variant_index(), 2);
        assert_eq!(semi_path.skip_variants_before(5), 0);
    }

    #[test]
    fn test_ordering() {
        let variants: Vec<Variant> = vec![];
        let mut first = SemiPath::new(REFERENCE, &variants, VcfSide::Base);
        let mut second = first.clone();
        assert_eq!(first, second);
        second.step_haplotype_b().unwrap();
        assert!(first < second);
        assert!(second.compare_haplotype_positions() < 0);
        first.step_haplotype_a().unwrap();
        assert!(first > second);
    }
}
