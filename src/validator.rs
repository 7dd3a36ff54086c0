use rust_decimal::Decimal;

use crate::config::ExtractionConfig;
use crate::normalize::fold_upper;
use crate::rules::RuleSet;
use crate::types::TransactionCandidate;

/// Motivo pelo qual um candidato foi descartado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    ZeroAmount,
    BelowMinimum,
    AboveMaximum,
    ShortDescription,
    /// Descrição sem nenhuma letra (só códigos).
    NoLetters,
    Blocklisted,
    ConfidenceOutOfRange,
}

/// Última barreira antes de emitir um candidato.
pub struct Validator<'a> {
    min_amount: Decimal,
    max_amount: Decimal,
    min_description_len: usize,
    rules: &'a RuleSet,
}

impl<'a> Validator<'a> {
    pub fn new(config: &ExtractionConfig, rules: &'a RuleSet) -> Self {
        Self {
            min_amount: config.min_transaction_amount,
            max_amount: config.max_amount,
            min_description_len: config.min_description_len,
            rules,
        }
    }

    pub fn check(&self, candidate: &TransactionCandidate) -> Result<(), Rejection> {
        let magnitude = candidate.amount.abs();
        if magnitude.is_zero() {
            return Err(Rejection::ZeroAmount);
        }
        if magnitude < self.min_amount {
            return Err(Rejection::BelowMinimum);
        }
        if magnitude > self.max_amount {
            return Err(Rejection::AboveMaximum);
        }

        let description = candidate.description.trim();
        if description.chars().count() < self.min_description_len {
            return Err(Rejection::ShortDescription);
        }
        if !description.chars().any(char::is_alphabetic) {
            return Err(Rejection::NoLetters);
        }
        if self.rules.is_blocklisted(&fold_upper(description)) {
            return Err(Rejection::Blocklisted);
        }

        if !(0.0..=1.0).contains(&candidate.confidence) {
            return Err(Rejection::ConfidenceOutOfRange);
        }
        Ok(())
    }
}
