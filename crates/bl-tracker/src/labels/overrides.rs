/// A hand-maintained correction for a label the generic pipeline gets wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelOverride {
    /// Upper-case fragment looked up in the upper-cased raw label.
    pub contains: &'static str,
    pub corrected: &'static str,
}

/// Exception table. Each entry is a literal, not a rule: a brand trailing a
/// multi-token batch/dimension phrase cannot be re-ordered by the pipeline,
/// which would otherwise emit `PIERRE CARD VALISES LOT DE 3 50/60/70 CM`.
pub const LABEL_OVERRIDES: &[LabelOverride] = &[LabelOverride {
    contains: "LOT DE 3 VALISES 50/60/70 CM PIERRE CARD",
    corrected: "PIERRE CARD LOT DE 3 VALISES 50/60/70 CM",
}];

pub(crate) fn find_override(upper_label: &str) -> Option<&'static LabelOverride> {
    LABEL_OVERRIDES
        .iter()
        .find(|entry| upper_label.contains(entry.contains))
}
