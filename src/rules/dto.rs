use serde::Deserialize;

use crate::classify::line::NoiseReason;

/// Rule tables as written in a TOML file. Any table left out keeps its
/// built-in default.
///
/// ```toml
/// [[category_rules]]
/// pattern = "\\bACADEMIA\\b"
/// category = "Saúde"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetRaw {
    pub metadata_markers: Option<Vec<String>>,
    pub operation_keywords: Option<Vec<String>>,
    pub noise_patterns: Option<Vec<NoisePatternRaw>>,
    pub boilerplate: Option<Vec<String>>,
    pub residual_noise: Option<Vec<String>>,
    pub category_rules: Option<Vec<CategoryRuleRaw>>,
    pub subscription_brands: Option<Vec<String>>,
    pub validator_blocklist: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoisePatternRaw {
    pub reason: NoiseReason,
    pub pattern: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRuleRaw {
    pub pattern: String,
    pub category: String,
}
