
/*!
# Replay path
A path pairs the baseline and called semi-paths and tracks where they last agreed (sync points).
Paths are values; the search extends them by cloning, which is cheap because all history lives in persistent lists.
*/

use std::cmp::Ordering;

use crate::data_types::oriented_variant::OrientedVariant;
use crate::data_types::sync_interval::SyncInterval;
use crate::data_types::variants::Variant;
use crate::data_types::vcf_side::VcfSide;
use crate::replay::ReplayError;
use crate::replay::chain_list::ChainList;
use crate::replay::semi_path::SemiPath;

#[derive(Clone)]
pub struct Path<'a> {
    base_semi_path: SemiPath<'a>,
    called_semi_path: SemiPath<'a>,
    /// Called positions where the two sides agreed with nothing outstanding
    sync_points: ChainList<i64>,
    /// Baseline variants included since the last sync point
    count_since_sync_base: usize,
    /// Called variants included since the last sync point
    count_since_sync_called: usize
}

impl<'a> Path<'a> {
    /// Creates the initial path with nothing decided
    pub fn new(reference: &'a [u8], baseline: &'a [Variant], called: &'a [Variant]) -> Self {
        Self {
            base_semi_path: SemiPath::new(reference, baseline, VcfSide::Base),
            called_semi_path: SemiPath::new(reference, called, VcfSide::Called),
            sync_points: ChainList::new(),
            count_since_sync_base: 0,
            count_since_sync_called: 0
        }
    }

    pub fn semi_path(&self, side: VcfSide) -> &SemiPath<'a> {
        match side {
            VcfSide::Base => &self.base_semi_path,
            VcfSide::Called => &self.called_semi_path
        }
    }

    fn semi_path_mut(&mut self, side: VcfSide) -> &mut SemiPath<'a> {
        match side {
            VcfSide::Base => &mut self.base_semi_path,
            VcfSide::Called => &mut self.called_semi_path
        }
    }

    /// Branches this path on the variant at `index` of `side`.
    /// Returns the exclude branch, followed by one include branch per usable orientation.
    /// # Arguments
    /// * `side` - which input the variant belongs to
    /// * `oriented` - the interleaved orientation list for that input, two entries per variant
    /// * `index` - index of the variant being decided
    pub fn add_variant(&self, side: VcfSide, oriented: &[OrientedVariant], index: usize) -> Vec<Path<'a>> {
        let mut parent = self.clone();
        if parent.in_sync() {
            parent.sync_points.push(parent.called_semi_path.position());
            parent.count_since_sync_base = 0;
            parent.count_since_sync_called = 0;
        }

        let mut children = Vec::with_capacity(3);
        let mut excluded = parent.clone();
        excluded.semi_path_mut(side).exclude_variant(index);
        children.push(excluded);

        let semi_path = parent.semi_path(side);
        let orientation_count = if semi_path.variants()[index].is_heterozygous() { 2 } else { 1 };
        for candidate in oriented[2 * index..2 * index + orientation_count].iter() {
            if semi_path.is_new(candidate) && !candidate.is_inert(semi_path.variants()) {
                let mut included = parent.clone();
                included.include(side, *candidate, index);
                children.push(included);
            }
        }
        children
    }

    fn include(&mut self, side: VcfSide, oriented: OrientedVariant, index: usize) {
        self.semi_path_mut(side).include_variant(oriented, index);
        match side {
            VcfSide::Base => self.count_since_sync_base += 1,
            VcfSide::Called => self.count_since_sync_called += 1
        };
    }

    /// True if all four haplotypes sit on the template at the same position with no variant outstanding
    pub fn in_sync(&self) -> bool {
        let called = &self.called_semi_path;
        let base = &self.base_semi_path;
        called.compare_haplotype_positions() == 0 &&
            base.compare_haplotype_positions() == 0 &&
            called.position() == base.position() &&
            called.position() >= called.variant_end_position() &&
            base.position() >= base.variant_end_position() &&
            called.is_on_template() &&
            base.is_on_template()
    }

    /// Advances whichever haplotype is behind, or all of them when level
    pub fn step(&mut self) -> Result<(), ReplayError> {
        match self.called_semi_path.compare_haplotype_positions().cmp(&0) {
            Ordering::Greater => {
                self.called_semi_path.step_haplotype_b()?;
                self.base_semi_path.step_haplotype_b()
            },
            Ordering::Less => {
                self.called_semi_path.step_haplotype_a()?;
                self.base_semi_path.step_haplotype_a()
            },
            Ordering::Equal => {
                self.called_semi_path.step_haplotype_a()?;
                self.called_semi_path.step_haplotype_b()?;
                self.base_semi_path.step_haplotype_a()?;
                self.base_semi_path.step_haplotype_b()
            }
        }
    }

    pub fn move_forward(&mut self, position: i64) -> Result<(), ReplayError> {
        self.called_semi_path.move_forward(position)?;
        self.base_semi_path.move_forward(position)
    }

    /// Excludes every undecided variant on both sides that starts before the target, then parks all haplotypes on the base just before it.
    /// The target is `max_position`, or further if either side already passed it, capped at the last reference base.
    /// A target of 0 parks the haplotypes at -1, the same state as a fresh path.
    /// Returns the number of variants skipped.
    pub fn skip_variants_to(&mut self, max_position: i64, reference_length: i64) -> usize {
        let target = max_position
            .max(self.base_semi_path.position())
            .max(self.called_semi_path.position())
            .min(reference_length - 1);
        // variants starting at the target must still be enterable on the next step
        let parked_position = (target - 1).max(-1);

        let mut skipped = 0;
        for semi_path in [&mut self.base_semi_path, &mut self.called_semi_path] {
            skipped += semi_path.skip_variants_before(target);
            semi_path.reset_to(parked_position);
        }
        skipped
    }

    /// Copy of this path with an extra sync point; the since-sync counters are kept
    pub fn with_sync_point(&self, position: i64) -> Path<'a> {
        let mut synced = self.clone();
        synced.sync_points.push(position);
        synced
    }

    /// True if the called side emits the same bases as the baseline side
    pub fn matches(&self) -> bool {
        self.called_semi_path.matches(&self.base_semi_path)
    }

    /// True if exactly one side has included variants since the last sync point
    pub fn has_no_operation(&self) -> bool {
        (self.count_since_sync_base == 0 && self.count_since_sync_called > 0) ||
            (self.count_since_sync_called == 0 && self.count_since_sync_base > 0)
    }

    pub fn has_finished(&self) -> bool {
        self.base_semi_path.has_finished() && self.called_semi_path.has_finished()
    }

    /// Total included variants over both sides
    pub fn included_count(&self) -> usize {
        self.base_semi_path.included_variants().len() + self.called_semi_path.included_variants().len()
    }

    /// Most recent inclusion on the called side, or the baseline side if the called side has none
    pub fn last_included(&self) -> Option<&OrientedVariant> {
        self.called_semi_path.included_variants().last()
            .or_else(|| self.base_semi_path.included_variants().last())
    }

    /// Most recent sync point, 0 if there are none
    pub fn last_sync_point(&self) -> i64 {
        self.sync_points.last().copied().unwrap_or(0)
    }

    /// |baseline - called| inclusions since the last sync point
    pub fn since_sync_delta(&self) -> usize {
        self.count_since_sync_base.abs_diff(self.count_since_sync_called)
    }

    /// Included orientations for one side, in inclusion order
    pub fn included_variants(&self, side: VcfSide) -> Vec<OrientedVariant> {
        self.semi_path(side).included_variants().to_vec()
    }

    /// Excluded variant indices for one side, in ascending order
    pub fn excluded(&self, side: VcfSide) -> Vec<usize> {
        self.semi_path(side).excluded().to_vec()
    }

    /// Sync points in ascending order without repeats
    pub fn sync_points(&self) -> Vec<i64> {
        let mut points = self.sync_points.to_vec();
        points.dedup();
        points
    }

    /// Partitions every decided variant into the intervals between consecutive sync points.
    /// A variant belongs to the first interval whose sync point is at or after its start; the rest go to a trailing open interval.
    pub fn calculate_sync_intervals(&self) -> Vec<SyncInterval> {
        let base_variants = self.base_semi_path.variants();
        let called_variants = self.called_semi_path.variants();
        let base_included: Vec<usize> = self.included_variants(VcfSide::Base).iter().map(|ov| ov.variant_index()).collect();
        let called_included: Vec<usize> = self.included_variants(VcfSide::Called).iter().map(|ov| ov.variant_index()).collect();
        let base_excluded = self.excluded(VcfSide::Base);
        let called_excluded = self.excluded(VcfSide::Called);

        let mut cursors = [0; 4];
        let points = self.sync_points();
        let mut intervals = Vec::with_capacity(points.len() + 1);
        let mut previous = 0;
        for end in points.iter().copied().map(Some).chain(std::iter::once(None)) {
            let mut interval = SyncInterval::new(previous, end);
            interval.baseline_included = take_through(&base_included, &mut cursors[0], base_variants, end);
            interval.called_included = take_through(&called_included, &mut cursors[1], called_variants, end);
            interval.baseline_excluded = take_through(&base_excluded, &mut cursors[2], base_variants, end);
            interval.called_excluded = take_through(&called_excluded, &mut cursors[3], called_variants, end);
            intervals.push(interval);
            if let Some(end) = end {
                previous = end;
            }
        }
        intervals
    }

    /// Weight for every included called variant, keyed by its index.
    /// See [`SyncInterval::weight`].
    pub fn calculate_weights(&self) -> Vec<(usize, f64)> {
        self.calculate_sync_intervals().iter()
            .flat_map(|interval| {
                let weight = interval.weight();
                interval.called_included.iter().map(move |&index| (index, weight))
            })
            .collect()
    }
}

/// Takes indices from `cursor` onward while the variant start is at or before `end` (all remaining if `end` is None)
fn take_through(indices: &[usize], cursor: &mut usize, variants: &[Variant], end: Option<i64>) -> Vec<usize> {
    let begin = *cursor;
    while *cursor < indices.len() && end.map_or(true, |e| variants[indices[*cursor]].start() <= e) {
        *cursor += 1;
    }
    indices[begin..*cursor].to_vec()
}

impl std::fmt::Debug for Path<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Path")
            .field("sync_points", &self.sync_points.len())
            .field("count_since_sync_base", &self.count_since_sync_base)
            .field("count_since_sync_called", &self.count_since_sync_called)
            .field("base_semi_path", &self.base_semi_path)
            .field("called_semi_path", &self.called_semi_path)
            .finish()
    }
}

impl PartialEq for Path<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Path<'_> {}

impl PartialOrd for Path<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Path<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.called_semi_path.cmp(&other.called_semi_path)
            .then_with(|| self.base_semi_path.cmp(&other.base_semi_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;
    use crate::data_types::oriented_variant::oriented_variant_list;
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
    fn test_initial_state() {
        let baseline: Vec<Variant> = vec![];
        let called: Vec<Variant> = vec![];
        let mut path = Path::new(REFERENCE, &baseline, &called);
        assert!(!path.in_sync());
        assert!(path.matches());
        path.step().unwrap();
        assert!(path.in_sync());
        assert!(!path.has_no_operation());
        assert_eq!(path.included_count(), 0);
        assert!(path.last_included().is_none());
    }

    #[test]
    fn test_add_variant_branches() {
        let baseline: Vec<Variant> = vec![];
        let called = vec![het(0, b"T", 1, 2), hom(1, b"A", 3, 4)];
        let oriented = oriented_variant_list(&called, true);
        let mut path = Path::new(REFERENCE, &baseline, &called);
        path.step().unwrap();
        assert!(path.in_sync());

        // het gives exclude + two orientations
        let children = path.add_variant(VcfSide::Called, &oriented, 0);
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].excluded(VcfSide::Called), vec![0]);
        assert_eq!(children[1].included_variants(VcfSide::Called), vec![oriented[0]]);
        assert_eq!(children[2].included_variants(VcfSide::Called), vec![oriented[1]]);
        for child in children.iter() {
            assert_eq!(child.sync_points(), vec![0]);
        }
        assert_eq!(children[1].count_since_sync_called, 1);
        assert!(children[1].has_no_operation());

        // hom gives exclude + one orientation
        let children = children[0].add_variant(VcfSide::Called, &oriented, 1);
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn test_inert_orientations_dropped() {
        let baseline: Vec<Variant> = vec![];
        let called = vec![het(0, b"T", 1, 2)];
        let oriented = oriented_variant_list(&called, false);
        let path = Path::new(REFERENCE, &baseline, &called);

        // the reference-only orientation is never included
        let children = path.add_variant(VcfSide::Called, &oriented, 0);
        assert_eq!(children.len(), 2);
        assert_eq!(children[1].included_variants(VcfSide::Called)[0].allele_index(), 1);
    }

    #[test]
    fn test_step_catches_up() {
        let baseline: Vec<Variant> = vec![];
        let called = vec![hom(0, b"", 1, 3)];
        let oriented = oriented_variant_list(&called, true);
        let path = Path::new(REFERENCE, &baseline, &called);
        let mut included = path.add_variant(VcfSide::Called, &oriented, 0).remove(1);
        included.step().unwrap();
        included.step().unwrap();
        // both called haplotypes jump over the deletion together
        assert_eq!(included.called_semi_path.position(), 3);
        assert_eq!(included.base_semi_path.position(), 1);
        assert!(!included.matches());
    }

    #[test]
    fn test_with_sync_point() {
        let baseline: Vec<Variant> = vec![];
        let called = vec![hom(0, b"A", 3, 4)];
        let oriented = oriented_variant_list(&called, true);
        let path = Path::new(REFERENCE, &baseline, &called);
        let included = path.add_variant(VcfSide::Called, &oriented, 0).remove(1);
        let synced = included.with_sync_point(5);
        assert_eq!(synced.sync_points(), vec![5]);
        assert_eq!(synced.last_sync_point(), 5);
        assert_eq!(synced.count_since_sync_called, 1);
        assert_eq!(included.last_sync_point(), 0);
    }

    #[test]
    fn test_skip_variants_to() {
        let baseline = vec![het(0, b"T", 1, 2), het(1, b"T", 5, 6)];
        let called = vec![het(2, b"A", 3, 4)];
        let mut path = Path::new(REFERENCE, &baseline, &called);
        let skipped = path.skip_variants_to(4, REFERENCE.len() as i64);
        assert_eq!(skipped, 2);
        assert_eq!(path.excluded(VcfSide::Base), vec![0]);
        assert_eq!(path.excluded(VcfSide::Called), vec![0]);
        assert_eq!(path.base_semi_path.position(), 3);
        assert_eq!(path.called_semi_path.position(), 3);

        // capped at the last reference base
        let skipped = path.skip_variants_to(100, REFERENCE.len() as i64);
        assert_eq!(skipped, 1);
        assert_eq!(path.base_semi_path.position(), 6);
    }

    #[test]
    fn test_skip_variants_to_start() {
        let baseline = vec![het(0, b"T", 0, 1)];
        let called: Vec<Variant> = vec![];
        let mut path = Path::new(REFERENCE, &baseline, &called);
        assert_eq!(path.skip_variants_to(0, REFERENCE.len() as i64), 0);
        assert_eq!(path.base_semi_path.position(), -1);
        assert_eq!(path.called_semi_path.position(), -1);
        assert_eq!(path.base_semi_path.next_variant_index(), 0);

        // an empty reference never parks below a fresh path
        let mut path = Path::new(b"", &called, &called);
        assert_eq!(path.skip_variants_to(0, 0), 0);
        assert_eq!(path.base_semi_path.position(), -1);
        assert_eq!(path.called_semi_path.position(), -1);
    }

    #[test]
    fn test_sync_intervals() {
        let baseline = vec![hom(0, b"T", 1, 2), hom(1, b"T", 5, 6)];
        let called = vec![hom(2, b"T", 1, 2), hom(3, b"TT", 5, 6), het(4, b"G", 6, 7)];
        let base_oriented = oriented_variant_list(&baseline, true);
        let called_oriented = oriented_variant_list(&called, true);

        let mut path = Path::new(REFERENCE, &baseline, &called);
        path = path.add_variant(VcfSide::Base, &base_oriented, 0).remove(1);
        path = path.add_variant(VcfSide::Called, &called_oriented, 0).remove(1);
        path = path.with_sync_point(3);
        path = path.add_variant(VcfSide::Base, &base_oriented, 1).remove(1);
        path = path.add_variant(VcfSide::Called, &called_oriented, 1).remove(1);
        path = path.add_variant(VcfSide::Called, &called_oriented, 2).remove(1);

        let intervals = path.calculate_sync_intervals();
        assert_eq!(intervals.len(), 2);
        assert_eq!((intervals[0].start, intervals[0].end), (0, Some(3)));
        assert_eq!(intervals[0].baseline_included, vec![0]);
        assert_eq!(intervals[0].called_included, vec![0]);
        assert_eq!((intervals[1].start, intervals[1].end), (3, None));
        assert_eq!(intervals[1].baseline_included, vec![1]);
        assert_eq!(intervals[1].called_included, vec![1, 2]);

        let weights = path.calculate_weights();
        assert_eq!(weights.len(), 3);
        assert_eq!(weights[0].0, 0);
        assert_approx_eq!(weights[0].1, 1.0);
        assert_approx_eq!(weights[1].1, 0.5);
        assert_approx_eq!(weights[2].1, 0.5);
    }

    #[test]
    fn test_no_sync_points() {
        let baseline = vec![hom(0, b"T", 1, 2)];
        let called: Vec<Variant> = vec![];
        let path = Path::new(REFERENCE, &baseline, &called);
        let path = path.add_variant(VcfSide::Base, &oriented_variant_list(&baseline, true), 0).remove(0);
        let intervals = path.calculate_sync_intervals();
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].baseline_excluded, vec![0]);
        assert!(path.calculate_weights().is_empty());
    }
}
