
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::data_types::variants::VariantRecord;
use crate::util::json_io::load_json;

/// A named reference sequence as it appears in the input
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ContigRecord {
    pub name: String,
    pub sequence: String
}

/// The full comparison input: reference contigs plus the two record sets
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ComparisonProblem {
    /// Reference contigs, in output order
    pub contigs: Vec<ContigRecord>,
    /// Baseline (truth) records
    #[serde(default)]
    pub baseline: Vec<VariantRecord>,
    /// Called (query) records
    #[serde(default)]
    pub called: Vec<VariantRecord>
}

impl ComparisonProblem {
    /// Loads a problem from a .json or .json.gz file
    /// # Errors
    /// * if the file cannot be opened or parsed
    pub fn from_file(filename: &Path) -> anyhow::Result<Self> {
        load_json(filename)
    }
}
