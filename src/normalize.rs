//! Text folding and the description normalizer.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parsers::date::{LEADING_DATE, LEADING_ISO_DATE};
use crate::parsers::numeric::MONEY_TOKEN;
use crate::rules::RuleSet;

static TIME_OF_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}:\d{2}(?::\d{2})?\b").unwrap());

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-–—_*|;#]+").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Replaces accented Latin letters by their ASCII base letter.
pub fn fold_accents(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ç' => 'c',
            'Ç' => 'C',
            'ñ' => 'n',
            'Ñ' => 'N',
            other => other,
        })
        .collect()
}

/// Unaccented uppercase with runs of whitespace collapsed; the form every
/// keyword table is matched against.
pub fn fold_upper(text: &str) -> String {
    let folded = fold_accents(text).to_uppercase();
    WHITESPACE.replace_all(folded.trim(), " ").into_owned()
}

/// Turns a raw statement line into a merchant-facing description.
///
/// Strips, in order: monetary tokens, the leading date (BR or ISO) and times of day, bank
/// boilerplate from `rules`, then separators and repeated whitespace.
/// Returns `None` when what is left is shorter than `min_len` chars or
/// matches one of the residual-noise patterns.
pub fn normalize_description(line: &str, rules: &RuleSet, min_len: usize) -> Option<String> {
    let text = MONEY_TOKEN.replace_all(line, " ");
    let text = LEADING_DATE.replace(&text, " ");
    let text = LEADING_ISO_DATE.replace(&text, " ");
    let mut text = TIME_OF_DAY.replace_all(&text, " ").into_owned();

    for pattern in rules.boilerplate() {
        text = pattern.replace_all(&text, " ").into_owned();
    }

    let text = SEPARATORS.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(text.trim(), " ");

    // "Descrição:" e afins são cabeçalhos
    if text.ends_with(':') {
        return None;
    }

    let text = text.trim_matches(|c: char| matches!(c, '.' | ',' | '/' | '\\' | ' '));
    if text.chars().count() < min_len {
        return None;
    }
    if rules.residual_noise().iter().any(|re| re.is_match(text)) {
        return None;
    }

    Some(capitalize_first(text))
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Farmácia São João", "Farmacia Sao Joao")]
    #[case("CRÉDITO", "CREDITO")]
    #[case("ação", "acao")]
    #[case("plain", "plain")]
    fn test_fold_accents(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(fold_accents(input), expected);
    }

    #[test]
    fn test_fold_upper_collapses_whitespace() {
        assert_eq!(fold_upper("  Maria   da  Conceição "), "MARIA DA CONCEICAO");
    }

    #[rstest]
    #[case("10/12/2024 PAGAMENTO PIX 45,90 SUPERMERCADO BOM PRECO", "SUPERMERCADO BOM PRECO")]
    #[case("10/12/2024 PAGAMENTO PIX 123456 45,90 PADARIA REAL", "PADARIA REAL")]
    #[case("02/01 PIX_DEB 30,00 joão silva", "João silva")]
    #[case("03/01/2025 COMPRAS NACIONAIS 89,90 POSTO IPIRANGA SAO PAULO BR", "POSTO IPIRANGA")]
    #[case("03/01/2025 14:32 COMPRA DEBITO 12,00 *** PADARIA --- CENTRAL", "PADARIA CENTRAL")]
    #[case("04/01/2025 PIX CRED - 250,00 - Cliente Fulano", "Cliente Fulano")]
    #[case("2024-12-10 PAGAMENTO PIX 45,90 SUPERMERCADO BOM PRECO", "SUPERMERCADO BOM PRECO")]
    #[case("2024-12-10 AMAZON MARKETPLACE 150,00 4.820,00", "AMAZON MARKETPLACE")]
    fn test_normalize_description(#[case] line: &str, #[case] expected: &str) {
        let rules = RuleSet::default();
        assert_eq!(normalize_description(line, &rules, 3).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("10/12/2024 PAGAMENTO PIX 45,90")] // nada sobra
    #[case("10/12/2024 DEBITO 45,90 AB")] // curto demais
    #[case("10/12/2024 DOC 987654321 45,90")] // só código
    #[case("10/12/2024 Descrição: 45,90")] // cabeçalho com dois-pontos
    #[case("Histórico 45,90 ref")] // fragmento de cabeçalho
    fn test_normalize_description_rejects(#[case] line: &str) {
        let rules = RuleSet::default();
        assert_eq!(normalize_description(line, &rules, 3), None);
    }
}
