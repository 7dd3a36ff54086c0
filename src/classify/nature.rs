use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::parsers::amount::CARD_PHRASES;
use crate::types::TransactionType;

static INCOME_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"RECEBIMENTO\s+PIX|PIX[\s_]*CRED|\bCREDITO\b").unwrap());

static EXPENSE_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"PAGAMENTO\s+PIX|PIX[\s_]*DEB|\bDEBITO\b|\bCOMPRA|\bBOLETO\b|\bTARIFA").unwrap()
});

/// Resolve a natureza (entrada/saída) de um lançamento.
///
/// Palavras-chave vencem o sinal do valor: `RECEBIMENTO PIX -200,00` é
/// receita. Sem palavra-chave, valor negativo é despesa e o resto é receita.
pub fn resolve_nature(folded_line: &str, amount: Decimal) -> TransactionType {
    // cartão de crédito/débito é meio de pagamento, não direção
    let text = CARD_PHRASES.replace_all(folded_line, " ");

    if INCOME_MARKERS.is_match(&text) {
        TransactionType::Income
    } else if EXPENSE_MARKERS.is_match(&text) {
        TransactionType::Expense
    } else if amount.is_sign_negative() && !amount.is_zero() {
        TransactionType::Expense
    } else {
        TransactionType::Income
    }
}
