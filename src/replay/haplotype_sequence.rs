
/*!
# Haplotype sequence
Replays a queue of oriented variants over the reference, emitting one base at a time.
The sequence is either on the template (copying reference bases) or inside exactly one active variant allele.
*/

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::data_types::oriented_variant::OrientedVariant;
use crate::data_types::variants::Variant;
use crate::replay::ReplayError;

/// Single-strand replay state over a reference sequence
#[derive(Clone)]
pub struct HaplotypeSequence<'a> {
    /// The reference bases being replayed
    reference: &'a [u8],
    /// Variant list that the queued orientations index into
    variants: &'a [Variant],
    /// Current reference position, -1 before the first step
    template_position: i64,
    /// Offset into the active allele; None while on the template
    position_in_variant: Option<usize>,
    /// The active (or next to be entered) variant
    next_variant: Option<OrientedVariant>,
    /// Variants queued behind the active one, in replay order
    pending_variants: VecDeque<OrientedVariant>,
    /// End of the most recently queued allele
    last_variant_end: i64
}

impl<'a> HaplotypeSequence<'a> {
    /// Creates a sequence that has not yet emitted anything
    pub fn new(reference: &'a [u8], variants: &'a [Variant]) -> Self {
        Self {
            reference,
            variants,
            template_position: -1,
            position_in_variant: None,
            next_variant: None,
            pending_variants: VecDeque::new(),
            last_variant_end: -1
        }
    }

    /// Queues the orientation's allele for replay.
    /// Alleles that are ignored, unplaced, or replace nothing with nothing are skipped.
    pub fn add_variant(&mut self, oriented: OrientedVariant) {
        let allele = oriented.allele(self.variants);
        if allele.is_redundant() || allele.is_ignored() || !allele.has_start() {
            return;
        }

        self.last_variant_end = allele.end();
        if self.next_variant.is_none() {
            self.next_variant = Some(oriented);
        } else {
            self.pending_variants.push_back(oriented);
        }
    }

    /// The base at the current replay position, or 0 outside the reference
    pub fn next_base(&self) -> u8 {
        match (self.position_in_variant, self.next_variant) {
            (Some(offset), Some(oriented)) => {
                oriented.allele(self.variants).sequence().get(offset).copied().unwrap_or(0)
            },
            _ => {
                usize::try_from(self.template_position).ok()
                    .and_then(|p| self.reference.get(p))
                    .copied()
                    .unwrap_or(0)
            }
        }
    }

    /// Advances one base.
    /// # Errors
    /// * if a queued variant starts before the position replay has already reached
    pub fn next(&mut self) -> Result<(), ReplayError> {
        match self.position_in_variant {
            None => {
                self.template_position += 1;
                if let Some(oriented) = self.next_variant {
                    if oriented.allele(self.variants).start() == self.template_position {
                        self.position_in_variant = Some(0);
                    }
                }
            },
            Some(offset) => {
                self.position_in_variant = Some(offset + 1);
            }
        };

        // leave any fully consumed alleles, entering adjacent ones as we go
        while let (Some(oriented), Some(offset)) = (self.next_variant, self.position_in_variant) {
            let allele = oriented.allele(self.variants);
            if offset != allele.sequence().len() {
                break;
            }

            self.template_position = allele.end();
            self.position_in_variant = None;
            let queued = match self.pending_variants.pop_front() {
                Some(queued) => queued,
                None => {
                    self.next_variant = None;
                    break;
                }
            };
            self.next_variant = Some(queued);

            let variant_start = queued.allele(self.variants).start();
            match self.template_position.cmp(&variant_start) {
                Ordering::Less => break,
                Ordering::Equal => self.position_in_variant = Some(0),
                Ordering::Greater => {
                    return Err(ReplayError::OutOfOrderVariant {
                        template_position: self.template_position,
                        variant_start
                    });
                }
            };
        }

        Ok(())
    }

    /// Jumps to `position` and advances onto it.
    /// # Panics
    /// * if the sequence is currently inside a variant
    pub fn move_forward(&mut self, position: i64) -> Result<(), ReplayError> {
        assert!(self.is_on_template(), "attempt to move forward while still in a variant");
        self.template_position = position - 1;
        self.next()
    }

    /// Drops all queued variants and parks the sequence on the template at `position`
    pub fn reset_to(&mut self, position: i64) {
        self.template_position = position;
        self.position_in_variant = None;
        self.next_variant = None;
        self.pending_variants.clear();
        self.last_variant_end = self.last_variant_end.min(position);
    }

    /// True if there is reference left to replay
    pub fn has_next(&self) -> bool {
        self.template_position < self.reference.len() as i64 - 1
    }

    pub fn is_on_template(&self) -> bool {
        self.position_in_variant.is_none()
    }

    /// True if the orientation's allele could still be queued without overlapping what is already queued
    pub fn is_new(&self, oriented: &OrientedVariant) -> bool {
        let allele = oriented.allele(self.variants);
        allele.is_ignored() || allele.start() >= self.last_variant_end
    }

    /// True if this sequence is about to need bases beyond what its queued alleles provide
    pub fn wants_future_variant_bases(&self) -> bool {
        let oriented = match self.next_variant {
            Some(oriented) => oriented,
            None => return true
        };

        if let Some(offset) = self.position_in_variant {
            if offset + 1 < oriented.allele(self.variants).sequence().len() {
                return false;
            }
        }

        !self.pending_variants.iter()
            .any(|queued| !queued.allele(self.variants).sequence().is_empty())
    }

    pub fn template_position(&self) -> i64 {
        self.template_position
    }
}

impl std::fmt::Debug for HaplotypeSequence<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HaplotypeSequence")
            .field("template_position", &self.template_position)
            .field("position_in_variant", &self.position_in_variant)
            .field("next_variant", &self.next_variant)
            .field("pending_variants", &self.pending_variants.len())
            .field("last_variant_end", &self.last_variant_end)
            .finish()
    }
}

impl PartialEq for HaplotypeSequence<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HaplotypeSequence<'_> {}

impl PartialOrd for HaplotypeSequence<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HaplotypeSequence<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.template_position.cmp(&other.template_position)
            .then_with(|| self.next_variant.cmp(&other.next_variant))
            .then_with(|| self.position_in_variant.cmp(&other.position_in_variant))
            .then_with(|| self.pending_variants.iter().cmp(other.pending_variants.iter()))
    }
}
