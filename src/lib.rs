//! Extract transactions from raw Brazilian bank-statement text.
//!
//! Deterministic: no model call, no I/O beyond optionally reading the
//! statement file. Lines that do not look like transactions are dropped.
//!
//! ```rust,ignore
//! use extrato_rs::ExtractorBuilder;
//!
//! let transactions = ExtractorBuilder::new()
//!     .content(&statement_text)
//!     .account_holder("Maria Silva")
//!     .extract()?;
//! ```

mod builder;
mod config;
mod normalize;
mod pipeline;
mod types;
mod validator;

pub mod classify;
pub mod errors;
pub mod parsers;
pub mod rules;

pub use builder::ExtractorBuilder;
pub use config::ExtractionConfig;
pub use errors::{ExtractionError, ExtractionResult};
pub use normalize::{fold_upper, normalize_description};
pub use parsers::prelude::*;
pub use pipeline::{Extractor, extract_transactions};
pub use rules::RuleSet;
pub use types::{
    ExtractionReport, ExtractionStats, PaymentMethod, TransactionCandidate, TransactionType,
};
pub use validator::{Rejection, Validator};
