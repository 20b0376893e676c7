use regex::Regex;
use serde::Serialize;

/// Quantity/format families recognised in a label. Declaration order is the
/// tie-break priority when two families match at the same offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityCategory {
    /// `PET1.5L`, `500G`, `33 CL`
    UnitMeasure,
    /// `6X33CL`, `4 X 25`
    MultiPack,
    /// `X20`
    Multiplier,
    /// `4 RLX`
    Rolls,
    /// `LOT DE 2`
    Batch,
    /// `50/60/70 CM`
    Dimensions,
    /// `38/41`
    Ratio,
    /// `4 ANS`
    Age,
    /// `XL`
    Size,
    /// `80%`
    Percentage,
}

impl QuantityCategory {
    pub const fn label(self) -> &'static str {
        match self {
            QuantityCategory::UnitMeasure => "Unit measure",
            QuantityCategory::MultiPack => "Multi-pack",
            QuantityCategory::Multiplier => "Multiplier",
            QuantityCategory::Rolls => "Roll count",
            QuantityCategory::Batch => "Batch",
            QuantityCategory::Dimensions => "Dimensions",
            QuantityCategory::Ratio => "Ratio",
            QuantityCategory::Age => "Age",
            QuantityCategory::Size => "Size",
            QuantityCategory::Percentage => "Percentage",
        }
    }
}

/// Pattern sources in priority order. Input is upper-cased before matching,
/// the `(?i)` flag only guards direct callers. Word boundaries are ASCII
/// (`(?-u:\b)`), so an accented letter glued to a number still separates it:
/// `THÉ0.5L` yields `0.5L`.
pub const QUANTITY_PATTERNS: &[(QuantityCategory, &str)] = &[
    (
        QuantityCategory::UnitMeasure,
        r"(?i)(?-u:\b)(PET|BLE|BTE|BRK|CAN)?\s*[0-9]+([.,][0-9]+)?\s*(L|G|CL|KG|ML)(?-u:\b)",
    ),
    (
        QuantityCategory::MultiPack,
        r"(?i)(?-u:\b)[0-9]+\s*X\s*[0-9]+\s*(CL|L)?(?-u:\b)",
    ),
    (QuantityCategory::Multiplier, r"(?i)(?-u:\b)X[0-9]+(?-u:\b)"),
    (QuantityCategory::Rolls, r"(?i)(?-u:\b)[0-9]+\s*RLX(?-u:\b)"),
    (QuantityCategory::Batch, r"(?i)(?-u:\b)LOT\s+DE\s+[0-9]+(?-u:\b)"),
    (
        QuantityCategory::Dimensions,
        r"(?i)(?-u:\b)[0-9]+(/[0-9]+)*\s*CM(?-u:\b)",
    ),
    (QuantityCategory::Ratio, r"(?i)(?-u:\b)[0-9]+/[0-9]+(?-u:\b)"),
    (QuantityCategory::Age, r"(?i)(?-u:\b)[0-9]+\s*ANS?(?-u:\b)"),
    (
        QuantityCategory::Size,
        r"(?i)(?-u:\b)(XS|S|M|L|XL|XXL)(?-u:\b)",
    ),
    // No boundary before `%` but one after it: `20%MG` matches, `20% MG` does not.
    (QuantityCategory::Percentage, r"(?i)(?-u:\b)[0-9]+%(?-u:\b)"),
];

/// A quantity substring as it appeared in the label, with its byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QuantityMatch {
    pub(crate) category: QuantityCategory,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) text: String,
}

#[derive(Debug)]
pub(crate) struct QuantityExtractor {
    patterns: Vec<(QuantityCategory, Regex)>,
}

impl QuantityExtractor {
    pub(crate) fn new() -> Self {
        let patterns = QUANTITY_PATTERNS
            .iter()
            .map(|(category, source)| (*category, super::compile(source)))
            .collect();
        Self { patterns }
    }

    /// Scans left to right for non-overlapping quantity tokens. At each step
    /// the earliest match wins; on equal offsets the higher-priority category
    /// wins, regardless of how long the competing matches are.
    ///
    /// Each category keeps its next match until the cursor passes its start,
    /// so every category walks the text once.
    pub(crate) fn find_all(&self, text: &str) -> Vec<QuantityMatch> {
        let mut next: Vec<Option<regex::Match<'_>>> = self
            .patterns
            .iter()
            .map(|(_, regex)| regex.find(text))
            .collect();
        let mut matches = Vec::new();

        loop {
            let mut best: Option<(usize, regex::Match<'_>)> = None;
            for (index, candidate) in next.iter().enumerate() {
                let Some(found) = *candidate else {
                    continue;
                };
                let better = match &best {
                    Some((_, current)) => found.start() < current.start(),
                    None => true,
                };
                if better {
                    best = Some((index, found));
                }
            }

            let Some((index, found)) = best else {
                break;
            };

            matches.push(QuantityMatch {
                category: self.patterns[index].0,
                start: found.start(),
                end: found.end(),
                text: found.as_str().to_string(),
            });

            let cursor = found.end();
            for (slot, (_, regex)) in next.iter_mut().zip(&self.patterns) {
                let stale = matches!(slot, Some(cached) if cached.start() < cursor);
                if stale {
                    *slot = if cursor < text.len() {
                        regex.find_at(text, cursor)
                    } else {
                        None
                    };
                }
            }
        }

        matches
    }

    /// Returns the matches and the text with every matched span replaced by
    /// a single space.
    pub(crate) fn extract(&self, text: &str) -> (Vec<QuantityMatch>, String) {
        let matches = self.find_all(text);
        let mut remainder = String::with_capacity(text.len());
        let mut last = 0;

        for found in &matches {
            remainder.push_str(&text[last..found.start]);
            remainder.push(' ');
            last = found.end;
        }
        remainder.push_str(&text[last..]);

        (matches, remainder)
    }
}
