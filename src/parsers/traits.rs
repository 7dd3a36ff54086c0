use rust_decimal::Decimal;

use super::amount::AmountSource;

/// One step of the amount-extraction cascade.
///
/// Strategies receive the line already folded to unaccented uppercase and
/// return every value they recognise, in line order and already signed.
/// Plausibility filtering is done by the caller.
pub trait AmountStrategy: Send + Sync {
    fn source(&self) -> AmountSource;

    fn candidates(&self, folded_line: &str) -> Vec<Decimal>;
}
