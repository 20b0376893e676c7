use regex::Regex;

/// Which block of a label is being normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockKind {
    Brand,
    Description,
    Quantity,
}

#[derive(Debug)]
pub(crate) struct BlockNormalizer {
    decimal_point: Regex,
    letter_digit: Regex,
    separators: Regex,
    whitespace: Regex,
}

impl BlockNormalizer {
    pub(crate) fn new() -> Self {
        Self {
            decimal_point: super::compile(r"([0-9])\.([0-9])"),
            letter_digit: super::compile(r"([A-Z])([0-9])"),
            // `/` stays: it separates dimensions and ratios.
            separators: super::compile(r"[-'.]"),
            whitespace: super::compile(r"\s+"),
        }
    }

    pub(crate) fn normalize(&self, text: &str, kind: BlockKind) -> String {
        let upper = text.to_uppercase();
        let mut normalized = upper.trim().to_string();

        if kind == BlockKind::Quantity {
            normalized = self
                .decimal_point
                .replace_all(&normalized, "$1,$2")
                .into_owned();
        }

        normalized = self
            .letter_digit
            .replace_all(&normalized, "$1 $2")
            .into_owned();
        normalized = self.separators.replace_all(&normalized, " ").into_owned();

        self.collapse(&normalized)
    }

    /// Collapses whitespace runs to a single space and trims the ends.
    pub(crate) fn collapse(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str, kind: BlockKind) -> String {
        BlockNormalizer::new().normalize(text, kind)
    }

    #[test]
    fn quantity_block_uses_decimal_comma() {
        assert_eq!(normalize("2.2l", BlockKind::Quantity), "2,2L");
        assert_eq!(normalize("pet1.5l", BlockKind::Quantity), "PET 1,5L");
    }

    #[test]
    fn description_periods_become_spaces() {
        assert_eq!(
            normalize("LESS.LIQ BLEU.MED.", BlockKind::Description),
            "LESS LIQ BLEU MED"
        );
        assert_eq!(normalize("VERSION 2.5", BlockKind::Description), "VERSION 2 5");
    }

    #[test]
    fn letters_glued_to_digits_are_split() {
        assert_eq!(normalize("BTE12 A3B4", BlockKind::Description), "BTE 12 A 3B 4");
    }

    #[test]
    fn slash_survives_while_other_separators_go() {
        assert_eq!(
            normalize("l'eau  d-ete 38/41", BlockKind::Description),
            "L EAU D ETE 38/41"
        );
    }

    #[test]
    fn blank_blocks_normalize_to_empty() {
        assert_eq!(normalize("  .- ' ", BlockKind::Description), "");
        assert_eq!(normalize("", BlockKind::Brand), "");
    }

    #[test]
    fn comma_decimal_is_left_alone() {
        assert_eq!(normalize("PET1,5L", BlockKind::Quantity), "PET 1,5L");
    }
}
