
/// Identifies which of the two inputs a variant (or replay state) belongs to
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, strum_macros::AsRefStr, strum_macros::Display, strum_macros::EnumIter)]
pub enum VcfSide {
    /// The baseline / truth set
    #[strum(serialize = "BASE")]
    Base,
    /// The called / query set
    #[strum(serialize = "CALLED")]
    Called
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_labels() {
        let labels: Vec<String> = VcfSide::iter().map(|s| s.to_string()).collect();
        assert_eq!(labels, vec!["BASE".to_string(), "CALLED".to_string()]);
        assert_eq!(VcfSide::Called.as_ref(), "CALLED");
    }
}
