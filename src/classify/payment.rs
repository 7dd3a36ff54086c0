use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::PaymentMethod;

pub(crate) static PIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bPIX").unwrap());

static WIRE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:TED|DOC)\b").unwrap());

static CREDIT_CARD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"CARTAO\s+(?:DE\s+)?CREDITO|\bNO\s+CREDITO\b|CREDITO\s+A\s+VISTA|\bFATURA\b").unwrap()
});

static DEBIT_CARD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"CARTAO\s+(?:DE\s+)?DEBITO|\bNO\s+DEBITO\b|\bCOMPRAS?\b|\bELO\s+DEBITO\b|\bMAESTRO\b")
        .unwrap()
});

/// Detects the payment rail from the folded line. First match wins:
/// PIX, then TED/DOC, then credit-card and debit-card phrases.
pub fn detect_payment_method(folded_line: &str) -> PaymentMethod {
    if PIX.is_match(folded_line) {
        PaymentMethod::Pix
    } else if WIRE.is_match(folded_line) {
        PaymentMethod::Ted
    } else if CREDIT_CARD.is_match(folded_line) {
        PaymentMethod::CreditCard
    } else if DEBIT_CARD.is_match(folded_line) {
        PaymentMethod::DebitCard
    } else {
        PaymentMethod::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("10/12/2024 PAGAMENTO PIX 45,90 SUPERMERCADO", PaymentMethod::Pix)]
    #[case("PIX_DEB 30,00 JOAO", PaymentMethod::Pix)]
    #[case("TED ENVIADA 1.000,00 FULANO", PaymentMethod::Ted)]
    #[case("DOC 987654 200,00", PaymentMethod::Ted)]
    #[case("COMPRA CARTAO DE CREDITO 59,90 LOJA", PaymentMethod::CreditCard)]
    #[case("PAGAMENTO FATURA 1.200,00", PaymentMethod::CreditCard)]
    #[case("COMPRA CARTAO DEBITO 12,00 PADARIA", PaymentMethod::DebitCard)]
    #[case("COMPRAS NACIONAIS 89,90 POSTO", PaymentMethod::DebitCard)]
    #[case("PAGAMENTO BOLETO 320,00", PaymentMethod::Other)]
    #[case("05/03/2024 LOJA EXEMPLO 150,00", PaymentMethod::Other)]
    fn test_detect_payment_method(#[case] line: &str, #[case] expected: PaymentMethod) {
        assert_eq!(detect_payment_method(line), expected);
    }

    #[test]
    fn test_pix_inside_word_is_ignored() {
        assert_eq!(detect_payment_method("COMPRA 10,00 APIXABA"), PaymentMethod::DebitCard);
    }
}
