
/*!
# Oriented variants
An oriented variant pairs a variant with one hypothesis about which haplotype each of its alleles sits on.
Replay places `allele()` on haplotype A and `other().allele()` on haplotype B.
*/

use std::cmp::Ordering;

use crate::data_types::variants::{Allele, Variant};

/// A variant reference plus an allele-to-haplotype assignment.
/// The variant itself lives in a per-chromosome list and is referenced by index.
#[derive(Clone, Copy, Debug)]
pub struct OrientedVariant {
    /// Index into the variant list this orientation was built from
    variant_index: usize,
    /// Copy of the variant id, used for ordering without a list lookup
    variant_id: usize,
    /// Allele placed on the first haplotype
    allele_index: usize,
    /// Allele placed on the second haplotype
    other_allele_index: usize,
    /// True if the alleles follow genotype order
    order_of_genotype: bool
}

impl OrientedVariant {
    /// Builds an orientation for a full genotype.
    /// Heterozygous variants get 0/1 when `order_of_genotype` is true and 1/0 otherwise; homozygous variants always get 0/0.
    pub fn new(variant_index: usize, variant: &Variant, order_of_genotype: bool) -> Self {
        let (allele_index, other_allele_index) = match (variant.is_heterozygous(), order_of_genotype) {
            (true, true) => (0, 1),
            (true, false) => (1, 0),
            (false, _) => (0, 0)
        };
        Self {
            variant_index,
            variant_id: variant.id(),
            allele_index,
            other_allele_index,
            order_of_genotype
        }
    }

    /// Builds an orientation that places allele `allele_index` on both haplotypes, used for allele-level matching
    pub fn from_allele(variant_index: usize, variant: &Variant, allele_index: usize) -> Self {
        Self {
            variant_index,
            variant_id: variant.id(),
            allele_index,
            other_allele_index: allele_index,
            order_of_genotype: true
        }
    }

    /// The complementary orientation, which swaps haplotypes
    pub fn other(&self) -> Self {
        Self {
            variant_index: self.variant_index,
            variant_id: self.variant_id,
            allele_index: self.other_allele_index,
            other_allele_index: self.allele_index,
            order_of_genotype: !self.order_of_genotype
        }
    }

    /// Resolves the variant from the list this orientation indexes into
    pub fn variant<'a>(&self, variants: &'a [Variant]) -> &'a Variant {
        &variants[self.variant_index]
    }

    /// Resolves the allele placed on the first haplotype
    pub fn allele<'a>(&self, variants: &'a [Variant]) -> &'a Allele {
        self.variant(variants).allele(self.allele_index)
    }

    /// True if neither haplotype would receive a non-reference edit from this orientation
    pub fn is_inert(&self, variants: &[Variant]) -> bool {
        let variant = self.variant(variants);
        [self.allele_index, self.other_allele_index].iter()
            .map(|&i| variant.allele(i))
            .all(|a| a.is_ignored() || a.is_reference())
    }

    // getters
    pub fn variant_index(&self) -> usize {
        self.variant_index
    }

    pub fn variant_id(&self) -> usize {
        self.variant_id
    }

    pub fn allele_index(&self) -> usize {
        self.allele_index
    }

    pub fn other_allele_index(&self) -> usize {
        self.other_allele_index
    }

    pub fn order_of_genotype(&self) -> bool {
        self.order_of_genotype
    }
}

impl PartialEq for OrientedVariant {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrientedVariant {}

impl PartialOrd for OrientedVariant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrientedVariant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.variant_id.cmp(&other.variant_id)
            .then(self.order_of_genotype.cmp(&other.order_of_genotype))
            .then(self.allele_index.cmp(&other.allele_index))
            .then(self.other_allele_index.cmp(&other.other_allele_index))
    }
}

/// Builds the interleaved orientation list for a variant list, two entries per variant.
/// In genotype mode, the entries are the two genotype orientations.
/// In allele mode, the entries are `from_allele` orientations for each allele; single-allele variants repeat the first.
pub fn oriented_variant_list(variants: &[Variant], genotype_match: bool) -> Vec<OrientedVariant> {
    let mut oriented = Vec::with_capacity(variants.len() * 2);
    for (index, variant) in variants.iter().enumerate() {
        if genotype_match {
            oriented.push(OrientedVariant::new(index, variant, true));
            oriented.push(OrientedVariant::new(index, variant, false));
        } else {
            let second = if variant.allele_count() > 1 { 1 } else { 0 };
            oriented.push(OrientedVariant::from_allele(index, variant, 0));
            oriented.push(OrientedVariant::from_allele(index, variant, second));
        }
    }
    oriented
}

#[cfg(test)]
mod tests {
    use super::*;

    fn het_variant() -> Variant {
        Variant::from_alleles(7, "chr1", vec![
            Allele::new(b"G".to_vec(), 2, 3, true),
            Allele::new(b"T".to_vec(), 2, 3, false)
        ], false).unwrap()
    }

    fn hom_variant() -> Variant {
        Variant::from_alleles(8, "chr1", vec![Allele::new(b"T".to_vec(), 4, 5, false)], false).unwrap()
    }

    #[test]
    fn test_het_orientations() {
        let variant = het_variant();
        let forward = OrientedVariant::new(0, &variant, true);
        assert_eq!((forward.allele_index(), forward.other_allele_index()), (0, 1));
        let reverse = OrientedVariant::new(0, &variant, false);
        assert_eq!((reverse.allele_index(), reverse.other_allele_index()), (1, 0));
        assert_eq!(forward.other(), reverse);
        assert!(reverse < forward);
    }

    #[test]
    fn test_hom_orientation() {
        let variant = hom_variant();
        let ov = OrientedVariant::new(0, &variant, false);
        assert_eq!((ov.allele_index(), ov.other_allele_index()), (0, 0));
        assert!(!ov.order_of_genotype());
    }

    #[test]
    fn test_other_identity() {
        let het = het_variant();
        let hom = hom_variant();
        let candidates = [
            OrientedVariant::new(0, &het, true),
            OrientedVariant::new(0, &het, false),
            OrientedVariant::new(1, &hom, true),
            OrientedVariant::from_allele(0, &het, 1)
        ];
        for ov in candidates.iter() {
            let round_trip = ov.other().other();
            assert_eq!(round_trip, *ov);
            assert_eq!(round_trip.variant_index(), ov.variant_index());
            assert_eq!(round_trip.order_of_genotype(), ov.order_of_genotype());
        }
    }

    #[test]
    fn test_resolution() {
        let variants = vec![het_variant(), hom_variant()];
        let ov = OrientedVariant::new(0, &variants[0], false);
        assert_eq!(ov.allele(&variants).sequence(), b"T");
        assert_eq!(ov.other().allele(&variants).sequence(), b"G");
        assert_eq!(ov.variant(&variants).id(), 7);
        assert!(!ov.is_inert(&variants));

        let ref_only = OrientedVariant::from_allele(0, &variants[0], 0);
        assert!(ref_only.is_inert(&variants));
    }

    #[test]
    fn test_list_builder() {
        let variants = vec![het_variant(), hom_variant()];
        let gt_list = oriented_variant_list(&variants, true);
        assert_eq!(gt_list.len(), 4);
        assert_eq!(gt_list[0], OrientedVariant::new(0, &variants[0], true));
        assert_eq!(gt_list[1], OrientedVariant::new(0, &variants[0], false));
        assert_eq!(gt_list[2].variant_index(), 1);

        let al_list = oriented_variant_list(&variants, false);
        assert_eq!(al_list.len(), 4);
        assert_eq!((al_list[0].allele_index(), al_list[0].other_allele_index()), (0, 0));
        assert_eq!((al_list[1].allele_index(), al_list[1].other_allele_index()), (1, 1));
        assert_eq!((al_list[3].allele_index(), al_list[3].other_allele_index()), (0, 0));
    }
}
