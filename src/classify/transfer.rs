use super::payment::PIX;
use crate::normalize::fold_upper;

/// A PIX whose counterparty is the account holder: money moved between the
/// holder's own accounts.
///
/// Both names are compared folded, so "João  Silva" and "JOAO SILVA" match.
/// An empty holder never matches.
pub fn is_self_transfer(folded_line: &str, description: &str, holder: &str) -> bool {
    let holder = fold_upper(holder);
    if holder.is_empty() || !PIX.is_match(folded_line) {
        return false;
    }
    fold_upper(description).contains(&holder)
}
