use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of money flow for a statement line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Applies this direction to a magnitude: income positive, expense negative.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            TransactionType::Income => amount.abs(),
            TransactionType::Expense => -amount.abs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Pix,
    Ted,
    DebitCard,
    CreditCard,
    Other,
}

/// A transaction extracted from one statement line.
///
/// Serializes with the field names shared by every producer of candidates
/// (`type`, `paymentMethod`, `isSubscription`), so the output of this crate
/// can be merged with candidates decoded from other sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCandidate {
    pub date: NaiveDate,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub payment_method: PaymentMethod,
    pub confidence: f64,
    pub is_subscription: bool,
}

/// Counters describing what happened to each scanned line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    pub lines_scanned: usize,
    pub noise_lines: usize,
    pub without_amount: usize,
    pub rejected: usize,
    pub raw_emitted: usize,
    pub degraded: bool,
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub transactions: Vec<TransactionCandidate>,
    pub stats: ExtractionStats,
}
