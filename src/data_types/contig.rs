
/// A named reference sequence that variants are replayed against
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Contig {
    /// Chromosome name, e.g. "chr1"
    name: String,
    /// Reference bases, stored as provided (case is ignored when comparing)
    sequence: Vec<u8>
}

impl Contig {
    /// Constructor
    pub fn new(name: String, sequence: Vec<u8>) -> Self {
        Self { name, sequence }
    }

    /// Reference length as a signed coordinate, which is what the replay engine works in
    pub fn length(&self) -> i64 {
        self.sequence.len() as i64
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    // getters
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }
}
