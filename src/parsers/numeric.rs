use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Digits of a Brazilian monetary literal: `1.234,56` or `1234,56`.
pub(crate) const MONEY_DIGITS: &str = r"(?:\d{1,3}(?:\.\d{3})+|\d+),\d{2}";

/// A whole monetary token, including sign, currency symbol and parentheses.
pub(crate) static MONEY_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\(?(?:R\$\s*)?[+-]?(?:R\$\s*)?{MONEY_DIGITS}\b\)?(?:-(?:\s|$))?"
    ))
    .unwrap()
});

/// Converte um valor monetário no formato brasileiro para `Decimal`.
///
/// Aceita separador de milhar `.`, decimal `,`, prefixo `R$`, sinal `+`/`-`
/// à esquerda, `-` à direita (`45,90-`) e parênteses como negativo.
/// Nunca falha: entradas ilegíveis viram zero.
pub fn parse_brl_amount(token: &str) -> Decimal {
    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    let compact = compact.replace("R$", "");

    let (body, parenthesized) = match compact
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
    {
        Some(inner) => (inner, true),
        None => (compact.as_str(), false),
    };

    let (body, trailing_minus) = match body.strip_suffix('-') {
        Some(rest) => (rest, true),
        None => (body, false),
    };

    let (body, leading_minus) = if let Some(rest) = body.strip_prefix('-') {
        (rest, true)
    } else {
        (body.strip_prefix('+').unwrap_or(body), false)
    };

    let normalized = body.replace('.', "").replace(',', ".");

    match Decimal::from_str(&normalized) {
        Ok(value) if parenthesized || trailing_minus || leading_minus => -value.abs(),
        Ok(value) => value,
        Err(_) => Decimal::ZERO,
    }
}

/// Finds every monetary token in a line, in order of appearance.
pub fn find_amounts(line: &str) -> Vec<Decimal> {
    MONEY_TOKEN
        .find_iter(line)
        .map(|m| parse_brl_amount(m.as_str()))
        .collect()
}
