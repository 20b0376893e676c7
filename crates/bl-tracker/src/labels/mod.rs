//! Product-label correction for delivery-note lines.
//!
//! A raw label is split into a brand, a free-text description and a
//! quantity/format block. Each block is normalized on its own and the label
//! is recomposed as `BRAND DESCRIPTION QUANTITY`, skipping empty blocks.

pub mod batch;
mod brand;
mod normalizer;
mod overrides;
mod quantity;

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use brand::BrandMatcher;
use normalizer::{BlockKind, BlockNormalizer};
use quantity::QuantityExtractor;

pub use batch::{correct_csv, BatchSummary, LabelBatchError};
pub use brand::BRAND_DICTIONARY;
pub use overrides::{LabelOverride, LABEL_OVERRIDES};
pub use quantity::{QuantityCategory, QUANTITY_PATTERNS};

static SHARED_CORRECTOR: OnceLock<LabelCorrector> = OnceLock::new();

/// Corrects a raw product label with the process-wide corrector.
///
/// Never fails: a label without a known brand or quantity comes back as a
/// normalized description, and `""` comes back as `""`.
pub fn correct_label(raw: &str) -> String {
    LabelCorrector::shared().correct(raw)
}

/// How a [`CorrectedLabel`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionSource {
    Empty,
    Override,
    Pipeline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuantityToken {
    pub category: QuantityCategory,
    pub text: String,
}

/// The normalized blocks of a label alongside the recomposed string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectedLabel {
    pub original: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub quantity: Vec<QuantityToken>,
    pub corrected: String,
    pub source: CorrectionSource,
}

impl CorrectedLabel {
    fn passthrough(raw: &str, corrected: String, source: CorrectionSource) -> Self {
        Self {
            original: raw.to_string(),
            brand: None,
            description: None,
            quantity: Vec::new(),
            corrected,
            source,
        }
    }

    /// The quantity block as it appears at the end of the corrected label.
    pub fn quantity_block(&self) -> Option<String> {
        if self.quantity.is_empty() {
            return None;
        }

        let tokens: Vec<&str> = self.quantity.iter().map(|token| token.text.as_str()).collect();
        Some(tokens.join(" "))
    }
}

/// Compiled brand and quantity tables. Immutable once built, so a single
/// instance can serve any number of threads.
#[derive(Debug)]
pub struct LabelCorrector {
    brands: BrandMatcher,
    quantities: QuantityExtractor,
    normalizer: BlockNormalizer,
}

impl Default for LabelCorrector {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelCorrector {
    pub fn new() -> Self {
        Self {
            brands: BrandMatcher::new(BRAND_DICTIONARY),
            quantities: QuantityExtractor::new(),
            normalizer: BlockNormalizer::new(),
        }
    }

    pub fn shared() -> &'static LabelCorrector {
        SHARED_CORRECTOR.get_or_init(LabelCorrector::new)
    }

    pub fn correct(&self, raw: &str) -> String {
        self.analyze(raw).corrected
    }

    pub fn analyze(&self, raw: &str) -> CorrectedLabel {
        if raw.is_empty() {
            return CorrectedLabel::passthrough(raw, String::new(), CorrectionSource::Empty);
        }

        let upper = raw.to_uppercase();
        if let Some(entry) = overrides::find_override(&upper) {
            tracing::trace!(override_for = entry.contains, "label override applied");
            return CorrectedLabel::passthrough(
                raw,
                entry.corrected.to_string(),
                CorrectionSource::Override,
            );
        }

        let padded = format!(" {upper} ");
        let (brand, without_brand) = self.brands.extract(&padded);
        let (matches, remainder) = self.quantities.extract(&without_brand);
        let description = remainder.trim();

        let brand = brand
            .map(|name| self.normalizer.normalize(name, BlockKind::Brand))
            .filter(|block| !block.is_empty());
        let description = Some(self.normalizer.normalize(description, BlockKind::Description))
            .filter(|block| !block.is_empty());
        let quantity: Vec<QuantityToken> = matches
            .into_iter()
            .map(|found| QuantityToken {
                category: found.category,
                text: self.normalizer.normalize(&found.text, BlockKind::Quantity),
            })
            .filter(|token| !token.text.is_empty())
            .collect();

        let mut corrected = CorrectedLabel {
            original: raw.to_string(),
            brand,
            description,
            quantity,
            corrected: String::new(),
            source: CorrectionSource::Pipeline,
        };
        corrected.corrected = self.recompose(&corrected);

        tracing::trace!(
            brand = ?corrected.brand,
            description = ?corrected.description,
            quantity = ?corrected.quantity_block(),
            "label blocks extracted"
        );

        corrected
    }

    /// Joins the present blocks as brand, description, quantity.
    fn recompose(&self, label: &CorrectedLabel) -> String {
        let parts: Vec<String> = [
            label.brand.clone(),
            label.description.clone(),
            label.quantity_block(),
        ]
        .into_iter()
        .flatten()
        .collect();

        self.normalizer.collapse(&parts.join(" "))
    }
}

/// Compiles one of the built-in constant patterns.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in label pattern should be valid")
}
