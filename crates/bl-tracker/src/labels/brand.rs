use regex::Regex;

/// Known brands, longest name first so compound brands win over the shorter
/// names they contain ("PIERRE CARDIN" before "PIERRE CARD").
pub const BRAND_DICTIONARY: &[&str] = &[
    "NECTAR OF BEAUTY",
    "PIERRE CARDIN",
    "SPORT AND FUN",
    "TRAVEL WORLD",
    "PIERRE CARD",
    "SCHWEPPES",
    "BEUCHAT",
    "PERRIER",
    "VOLVIC",
    "OASIS",
    "SIMPL",
    "SCHW",
    "CRF",
];

#[derive(Debug)]
struct BrandPattern {
    name: &'static str,
    regex: Regex,
}

/// Finds at most one dictionary brand in a label and cuts it out.
#[derive(Debug)]
pub(crate) struct BrandMatcher {
    patterns: Vec<BrandPattern>,
}

impl BrandMatcher {
    pub(crate) fn new(dictionary: &'static [&'static str]) -> Self {
        let mut names: Vec<&'static str> = dictionary.to_vec();
        // Stable, so equal-length names keep dictionary order.
        names.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

        let patterns = names
            .into_iter()
            .map(|name| BrandPattern {
                name,
                regex: super::compile(&format!(
                    r"(?i)(?-u:\b){}(?-u:\b)",
                    regex::escape(name)
                )),
            })
            .collect();

        Self { patterns }
    }

    /// Returns the matched brand and the label with that single occurrence
    /// replaced by a space. Later occurrences are left in place.
    pub(crate) fn extract(&self, label: &str) -> (Option<&'static str>, String) {
        for pattern in &self.patterns {
            if let Some(found) = pattern.regex.find(label) {
                let mut remainder = String::with_capacity(label.len());
                remainder.push_str(&label[..found.start()]);
                remainder.push(' ');
                remainder.push_str(&label[found.end()..]);
                return (Some(pattern.name), remainder);
            }
        }

        (None, label.to_string())
    }

    #[cfg(test)]
    fn candidates(&self) -> Vec<&'static str> {
        self.patterns.iter().map(|pattern| pattern.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> BrandMatcher {
        BrandMatcher::new(BRAND_DICTIONARY)
    }

    #[test]
    fn dictionary_is_written_longest_first() {
        let lengths: Vec<usize> = BRAND_DICTIONARY
            .iter()
            .map(|name| name.chars().count())
            .collect();
        assert!(lengths.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(matcher().candidates(), BRAND_DICTIONARY.to_vec());
    }

    #[test]
    fn longer_brand_shadows_contained_name() {
        let (brand, remainder) = matcher().extract(" VALISE PIERRE CARDIN 70 CM ");
        assert_eq!(brand, Some("PIERRE CARDIN"));
        assert!(!remainder.contains("CARD"));
    }

    #[test]
    fn matches_whole_words_only() {
        let (brand, remainder) = matcher().extract(" CRFX BOISSON ");
        assert_eq!(brand, None);
        assert_eq!(remainder, " CRFX BOISSON ");
    }

    #[test]
    fn brand_glued_to_punctuation_still_matches() {
        let (brand, remainder) = matcher().extract(" BLEU.MED.CRF EXP ");
        assert_eq!(brand, Some("CRF"));
        assert_eq!(remainder, " BLEU.MED.  EXP ");
    }

    #[test]
    fn removes_only_the_first_occurrence() {
        let (brand, remainder) = matcher().extract(" OASIS TROPICAL OASIS ");
        assert_eq!(brand, Some("OASIS"));
        assert_eq!(remainder, "   TROPICAL OASIS ");
    }

    #[test]
    fn accented_letters_are_not_word_characters() {
        let (brand, remainder) = matcher().extract(" THÉCRF 1L ");
        assert_eq!(brand, Some("CRF"));
        assert_eq!(remainder, " THÉ  1L ");

        let (brand, _) = matcher().extract(" CRFÉTÉ ");
        assert_eq!(brand, Some("CRF"));
    }

    #[test]
    fn matching_ignores_case() {
        let (brand, _) = matcher().extract(" eau volvic ");
        assert_eq!(brand, Some("VOLVIC"));
    }
}
