//! Per-line classification: noise filter, direction, payment rail,
//! self-transfers, categories and subscriptions.

pub mod category;
pub mod line;
pub mod nature;
pub mod payment;
pub mod subscription;
pub mod transfer;

pub mod prelude {
    pub use super::category::{Categorizer, INTERNAL_TRANSFER, OUTROS};
    pub use super::line::{LineVerdict, NoiseReason, classify_line};
    pub use super::nature::resolve_nature;
    pub use super::payment::detect_payment_method;
    pub use super::subscription::is_subscription;
    pub use super::transfer::is_self_transfer;
}
