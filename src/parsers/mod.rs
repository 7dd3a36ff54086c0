pub mod amount;
pub mod date;
pub mod numeric;
pub mod traits;

pub mod prelude {
    pub use super::amount::{
        AmountExtractor, AmountSource, ContextualStrategy, ExtractedAmount, PlausibilityWindow,
        PositionalStrategy, SignedStrategy,
    };
    pub use super::date::{StatementDate, extract_date};
    pub use super::numeric::{find_amounts, parse_brl_amount};
    pub use super::traits::AmountStrategy;
}
