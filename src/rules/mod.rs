//! Immutable rule tables consulted by the pipeline.
//!
//! A [`RuleSet`] is compiled once and handed to the extractor; tests and
//! callers can swap any table by loading a TOML file through [`RuleSetRaw`].

mod defaults;
mod dto;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::line::NoiseReason;
use crate::errors::{ExtractionError, ExtractionResult};
use crate::normalize::{fold_accents, fold_upper};

pub use dto::{CategoryRuleRaw, NoisePatternRaw, RuleSetRaw};

#[derive(Debug, Clone)]
pub struct NoisePattern {
    pub reason: NoiseReason,
    pub regex: Regex,
}

#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub regex: Regex,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    metadata_markers: Vec<String>,
    operation_keywords: Option<Regex>,
    noise_patterns: Vec<NoisePattern>,
    boilerplate: Vec<Regex>,
    residual_noise: Vec<Regex>,
    category_rules: Vec<CategoryRule>,
    subscription_brands: Option<Regex>,
    validator_blocklist: Option<Regex>,
}

static DEFAULT_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::try_from(RuleSetRaw::default()).expect("built-in rule tables compile")
});

impl Default for RuleSet {
    fn default() -> Self {
        DEFAULT_RULES.clone()
    }
}

impl RuleSet {
    pub fn from_toml_str(content: &str) -> ExtractionResult<Self> {
        let raw: RuleSetRaw = toml::from_str(content)?;
        raw.try_into()
    }

    /// Folded uppercase substrings marking account metadata.
    pub fn metadata_markers(&self) -> &[String] {
        &self.metadata_markers
    }

    pub fn has_operation_keyword(&self, folded_line: &str) -> bool {
        self.operation_keywords
            .as_ref()
            .is_some_and(|re| re.is_match(folded_line))
    }

    pub fn noise_patterns(&self) -> &[NoisePattern] {
        &self.noise_patterns
    }

    pub fn boilerplate(&self) -> &[Regex] {
        &self.boilerplate
    }

    pub fn residual_noise(&self) -> &[Regex] {
        &self.residual_noise
    }

    pub fn category_rules(&self) -> &[CategoryRule] {
        &self.category_rules
    }

    pub fn is_subscription_brand(&self, folded_description: &str) -> bool {
        self.subscription_brands
            .as_ref()
            .is_some_and(|re| re.is_match(folded_description))
    }

    pub fn is_blocklisted(&self, folded_description: &str) -> bool {
        self.validator_blocklist
            .as_ref()
            .is_some_and(|re| re.is_match(folded_description))
    }
}

impl TryFrom<RuleSetRaw> for RuleSet {
    type Error = ExtractionError;

    fn try_from(raw: RuleSetRaw) -> Result<Self, Self::Error> {
        let metadata_markers = raw
            .metadata_markers
            .unwrap_or_else(|| owned(defaults::METADATA_MARKERS))
            .iter()
            .map(|m| fold_upper(m))
            .filter(|m| !m.is_empty())
            .collect();

        let operation_keywords = word_alternation(
            &raw.operation_keywords
                .unwrap_or_else(|| owned(defaults::OPERATION_KEYWORDS)),
            r"\b",
            "",
        )?;

        let noise_patterns = match raw.noise_patterns {
            Some(patterns) => patterns
                .iter()
                .map(|p| {
                    Ok(NoisePattern {
                        reason: p.reason,
                        regex: compile_folded(&p.pattern)?,
                    })
                })
                .collect::<ExtractionResult<Vec<_>>>()?,
            None => defaults::NOISE_PATTERNS
                .iter()
                .map(|(reason, pattern)| {
                    Ok(NoisePattern {
                        reason: *reason,
                        regex: compile_folded(pattern)?,
                    })
                })
                .collect::<ExtractionResult<Vec<_>>>()?,
        };

        let boilerplate = raw
            .boilerplate
            .unwrap_or_else(|| owned(defaults::BOILERPLATE_PATTERNS))
            .iter()
            .map(|p| compile_insensitive(p))
            .collect::<ExtractionResult<Vec<_>>>()?;

        let residual_noise = raw
            .residual_noise
            .unwrap_or_else(|| owned(defaults::RESIDUAL_NOISE_PATTERNS))
            .iter()
            .map(|p| compile_insensitive(p))
            .collect::<ExtractionResult<Vec<_>>>()?;

        let category_rules = match raw.category_rules {
            Some(rules) => rules
                .iter()
                .map(|r| category_rule(&r.pattern, &r.category))
                .collect::<ExtractionResult<Vec<_>>>()?,
            None => defaults::CATEGORY_RULES
                .iter()
                .map(|(pattern, category)| category_rule(pattern, category))
                .collect::<ExtractionResult<Vec<_>>>()?,
        };

        // brands such as "DISNEY+" end in punctuation, so no \b here
        let subscription_brands = word_alternation(
            &raw.subscription_brands
                .unwrap_or_else(|| owned(defaults::SUBSCRIPTION_BRANDS)),
            r"(?:^|[^A-Z0-9])",
            r"(?:$|[^A-Z0-9])",
        )?;

        let validator_blocklist = word_alternation(
            &raw.validator_blocklist
                .unwrap_or_else(|| owned(defaults::VALIDATOR_BLOCKLIST)),
            r"\b",
            r"\b",
        )?;

        Ok(RuleSet {
            metadata_markers,
            operation_keywords,
            noise_patterns,
            boilerplate,
            residual_noise,
            category_rules,
            subscription_brands,
            validator_blocklist,
        })
    }
}

fn owned(table: &[&str]) -> Vec<String> {
    table.iter().map(|s| s.to_string()).collect()
}

fn compile_insensitive(pattern: &str) -> ExtractionResult<Regex> {
    Regex::new(&format!("(?i){pattern}"))
        .map_err(|e| ExtractionError::invalid_pattern(pattern, e))
}

/// For patterns run against folded text: accents in the pattern are folded
/// the same way so a rule written as "FARMÁCIA" still matches.
fn compile_folded(pattern: &str) -> ExtractionResult<Regex> {
    Regex::new(&format!("(?i){}", fold_accents(pattern)))
        .map_err(|e| ExtractionError::invalid_pattern(pattern, e))
}

fn category_rule(pattern: &str, category: &str) -> ExtractionResult<CategoryRule> {
    Ok(CategoryRule {
        regex: compile_folded(pattern)?,
        category: category.to_string(),
    })
}

/// One regex matching any of `words` (folded, escaped) between the given
/// boundaries. `None` for an empty list.
fn word_alternation(words: &[String], before: &str, after: &str) -> ExtractionResult<Option<Regex>> {
    let escaped: Vec<String> = words
        .iter()
        .map(|w| fold_upper(w))
        .filter(|w| !w.is_empty())
        .map(|w| regex::escape(&w))
        .collect();
    if escaped.is_empty() {
        return Ok(None);
    }

    let pattern = format!("(?i){before}(?:{}){after}", escaped.join("|"));
    Regex::new(&pattern)
        .map(Some)
        .map_err(|e| ExtractionError::invalid_pattern(&pattern, e))
}
