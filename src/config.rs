use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{ExtractionError, ExtractionResult};

/// Tunables for the extraction pipeline.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// safety_cap = 300
/// reference_year = 2024
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lines shorter than this (in chars) are noise before any parsing.
    pub min_line_len: usize,
    /// Floor of the amount extractor's plausibility window.
    pub min_amount: Decimal,
    /// Ceiling shared by the extractor window and the validator.
    pub max_amount: Decimal,
    /// Validator floor, stricter than `min_amount`.
    pub min_transaction_amount: Decimal,
    pub min_description_len: usize,
    /// Integral amounts inside this range look like a calendar year.
    pub year_like_range: (i64, i64),
    /// Hard limit on the number of emitted candidates.
    pub safety_cap: usize,
    /// Above this many raw candidates the output is considered suspicious.
    pub high_volume_threshold: usize,
    /// Cap applied after degrading a suspicious output.
    pub degraded_cap: usize,
    pub degraded_min_confidence: f64,
    /// Date used when a line carries no parseable date.
    pub fallback_date: NaiveDate,
    /// Year completing `DD/MM` tokens; `None` leaves them unparsed.
    pub reference_year: Option<i32>,
    pub self_transfer_as_expense: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_line_len: 10,
            min_amount: Decimal::new(1, 2),
            max_amount: Decimal::new(50_000, 0),
            min_transaction_amount: Decimal::new(50, 2),
            min_description_len: 3,
            year_like_range: (2020, 2030),
            safety_cap: 200,
            high_volume_threshold: 180,
            degraded_cap: 150,
            degraded_min_confidence: 0.95,
            fallback_date: NaiveDate::default(),
            reference_year: None,
            self_transfer_as_expense: true,
        }
    }
}

impl ExtractionConfig {
    pub fn from_toml_str(content: &str) -> ExtractionResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the tunables are coherent with each other.
    pub fn validate(&self) -> ExtractionResult<()> {
        if self.min_amount.is_sign_negative() || self.min_amount > self.max_amount {
            return Err(ExtractionError::InvalidConfig(format!(
                "amount window [{}, {}] is empty or negative",
                self.min_amount, self.max_amount
            )));
        }
        if self.min_transaction_amount < self.min_amount
            || self.min_transaction_amount > self.max_amount
        {
            return Err(ExtractionError::InvalidConfig(format!(
                "min_transaction_amount {} must lie inside [{}, {}]",
                self.min_transaction_amount, self.min_amount, self.max_amount
            )));
        }
        if self.year_like_range.0 > self.year_like_range.1 {
            return Err(ExtractionError::InvalidConfig(
                "year_like_range start is after its end".to_string(),
            ));
        }
        if self.degraded_cap > self.safety_cap {
            return Err(ExtractionError::InvalidConfig(format!(
                "degraded_cap {} exceeds safety_cap {}",
                self.degraded_cap, self.safety_cap
            )));
        }
        if !(0.0..=1.0).contains(&self.degraded_min_confidence) {
            return Err(ExtractionError::InvalidConfig(format!(
                "degraded_min_confidence {} is outside [0, 1]",
                self.degraded_min_confidence
            )));
        }
        Ok(())
    }
}
