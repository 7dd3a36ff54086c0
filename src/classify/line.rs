use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::parsers::date::starts_with_date;
use crate::parsers::numeric::MONEY_TOKEN;
use crate::rules::RuleSet;

/// Why a line was left out before amount extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseReason {
    TooShort,
    /// Agência, conta, cabeçalho do extrato...
    Metadata,
    /// No money token, or neither a leading date nor an operation keyword.
    NoShape,
    Balance,
    FeeOrTax,
    Divider,
    Total,
    /// Nothing but numbers, dates and codes.
    CodeOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineVerdict {
    Candidate,
    Noise(NoiseReason),
}

impl LineVerdict {
    pub fn is_candidate(&self) -> bool {
        matches!(self, LineVerdict::Candidate)
    }
}

static DATES_AND_TIMES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{1,2}/\d{1,2}(?:/\d{2,4})?\b|\b\d{4}-\d{2}-\d{2}\b|\b\d{1,2}:\d{2}(?::\d{2})?\b")
        .unwrap()
});

/// Decides whether a raw statement line may hold a transaction.
///
/// `folded` is the line passed through [`crate::normalize::fold_upper`]; the
/// caller folds once and reuses it downstream.
pub fn classify_line(line: &str, folded: &str, rules: &RuleSet, min_len: usize) -> LineVerdict {
    // 1. ruído óbvio
    if line.trim().chars().count() < min_len {
        return LineVerdict::Noise(NoiseReason::TooShort);
    }
    if rules.metadata_markers().iter().any(|m| folded.contains(m.as_str())) {
        return LineVerdict::Noise(NoiseReason::Metadata);
    }

    // 2. formato de lançamento
    let has_money = MONEY_TOKEN.is_match(folded);
    let has_anchor = starts_with_date(folded) || rules.has_operation_keyword(folded);
    if !has_money || !has_anchor {
        return LineVerdict::Noise(NoiseReason::NoShape);
    }

    // 3. ruído específico
    if let Some(pattern) = rules.noise_patterns().iter().find(|p| p.regex.is_match(folded)) {
        return LineVerdict::Noise(pattern.reason);
    }
    if is_code_only(folded) {
        return LineVerdict::Noise(NoiseReason::CodeOnly);
    }

    LineVerdict::Candidate
}

fn is_code_only(folded: &str) -> bool {
    let stripped = MONEY_TOKEN.replace_all(folded, " ");
    let stripped = DATES_AND_TIMES.replace_all(&stripped, " ");
    !stripped.chars().any(char::is_alphabetic)
}
