use num_traits::ToPrimitive;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::numeric::{MONEY_DIGITS, find_amounts, parse_brl_amount};
use super::traits::AmountStrategy;
use crate::config::ExtractionConfig;

/// Which step of the cascade produced an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountSource {
    /// Explicit `+`/`-`, trailing `-` or parentheses.
    Signed,
    /// Value right after a bank-operation keyword.
    Contextual,
    /// First of several values; the last one is the running balance.
    Positional,
}

impl AmountSource {
    pub fn confidence(self) -> f64 {
        match self {
            AmountSource::Signed => 0.95,
            AmountSource::Contextual => 0.90,
            AmountSource::Positional => 0.75,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractedAmount {
    pub value: Decimal,
    pub source: AmountSource,
}

impl ExtractedAmount {
    pub fn confidence(&self) -> f64 {
        self.source.confidence()
    }
}

static SIGNED_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?:^|[\s:(])(?P<signed>(?:R\$\s*)?[+-](?:R\$\s*)?{d})\b|(?P<paren>\((?:R\$\s*)?{d}\))|(?P<trailing>{d}-)(?:\s|$)",
        d = MONEY_DIGITS
    ))
    .unwrap()
});

pub struct SignedStrategy;

impl AmountStrategy for SignedStrategy {
    fn source(&self) -> AmountSource {
        AmountSource::Signed
    }

    fn candidates(&self, folded_line: &str) -> Vec<Decimal> {
        SIGNED_VALUE
            .captures_iter(folded_line)
            .filter_map(|caps| {
                caps.name("signed")
                    .or_else(|| caps.name("paren"))
                    .or_else(|| caps.name("trailing"))
            })
            .map(|m| parse_brl_amount(m.as_str()))
            .collect()
    }
}

/// Card phrases name a payment method, not a direction. They are blanked
/// before keyword matching so `PAGAMENTO CARTAO CREDITO` is not read as a
/// credit.
pub(crate) static CARD_PHRASES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"CARTAO\s+(?:DE\s+)?(?:CREDITO|DEBITO)|\b(?:NO|A)\s+(?:CREDITO|DEBITO)\b|CREDITO\s+A\s+VISTA")
        .unwrap()
});

/// Keyword → sign table, most specific phrases first.
const CONTEXT_KEYWORDS: &[(&str, bool)] = &[
    (r"PIX[\s_]*(?:CRED(?:ITO)?|RECEBIDO)", true),
    (r"PIX[\s_]*(?:DEB(?:ITO)?|ENVIADO)", false),
    (r"RECEBIMENTO\s+PIX", true),
    (r"PAGAMENTO\s+PIX", false),
    (r"TED\s+RECEBIDA|DOC\s+RECEBIDO", true),
    (r"TED(?:\s+ENVIADA)?|DOC(?:\s+ENVIADO)?", false),
    (
        r"COMPRAS?(?:\s+NACIONAIS)?(?:\s+CARTAO(?:\s+(?:DE\s+)?(?:DEBITO|CREDITO))?)?",
        false,
    ),
    (r"PAGAMENTO(?:\s+(?:DE\s+)?(?:BOLETO|FATURA|CONTA|TITULO))?", false),
    (r"DEBITO(?:\s+AUTOMATICO)?|TARIFA(?:\s+BANCARIA)?|SAQUE", false),
    (r"RECEBIMENTO|CREDITO|DEPOSITO|SALARIO", true),
];

static BRAZILIAN_CONTEXT: Lazy<Vec<(Regex, bool)>> = Lazy::new(|| {
    CONTEXT_KEYWORDS
        .iter()
        .map(|(pattern, positive)| {
            let re = Regex::new(&format!(
                r"\b(?:{pattern})[\s:\-]*(?:R\$\s*)?(?P<value>{MONEY_DIGITS})\b"
            ))
            .unwrap();
            (re, *positive)
        })
        .collect()
});

pub struct ContextualStrategy {
    keywords: Vec<(Regex, bool)>,
}

impl ContextualStrategy {
    /// `keywords` pairs a regex with a `value` capture group holding the
    /// amount, and whether the keyword means money coming in.
    pub fn new(keywords: Vec<(Regex, bool)>) -> Self {
        Self { keywords }
    }

    /// Keyword table for Brazilian retail-bank statements.
    pub fn brazilian() -> Self {
        Self::new(BRAZILIAN_CONTEXT.clone())
    }
}

impl AmountStrategy for ContextualStrategy {
    fn source(&self) -> AmountSource {
        AmountSource::Contextual
    }

    fn candidates(&self, folded_line: &str) -> Vec<Decimal> {
        let text = CARD_PHRASES.replace_all(folded_line, " ");
        let mut values = Vec::new();
        for (re, positive) in &self.keywords {
            for value in re.captures_iter(&text).filter_map(|caps| caps.name("value")) {
                let magnitude = parse_brl_amount(value.as_str()).abs();
                values.push(if *positive { magnitude } else { -magnitude });
            }
        }
        values
    }
}

/// Words marking an unsigned value as money leaving the account. Inflow
/// words ("RECEBIMENTO", "CREDITO") and unmarked lines stay positive.
const OUTFLOW_WORDS: &[&str] = &["PAGAMENTO", "COMPRA", "DEBITO"];

pub struct PositionalStrategy;

impl AmountStrategy for PositionalStrategy {
    fn source(&self) -> AmountSource {
        AmountSource::Positional
    }

    fn candidates(&self, folded_line: &str) -> Vec<Decimal> {
        let amounts = find_amounts(folded_line);
        if amounts.len() < 2 {
            return Vec::new();
        }

        let outflow = OUTFLOW_WORDS.iter().any(|w| folded_line.contains(w));

        // the last value is the running balance
        amounts[..amounts.len() - 1]
            .iter()
            .map(|v| if outflow { -v.abs() } else { v.abs() })
            .collect()
    }
}

/// Window outside of which a value cannot be a transaction amount.
#[derive(Debug, Clone, PartialEq)]
pub struct PlausibilityWindow {
    pub min: Decimal,
    pub max: Decimal,
    pub year_like: (i64, i64),
}

impl PlausibilityWindow {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            min: config.min_amount,
            max: config.max_amount,
            year_like: config.year_like_range,
        }
    }

    pub fn is_plausible(&self, value: Decimal) -> bool {
        let magnitude = value.abs();
        if magnitude < self.min || magnitude > self.max {
            return false;
        }
        if magnitude.fract().is_zero() {
            if let Some(whole) = magnitude.to_i64() {
                if (self.year_like.0..=self.year_like.1).contains(&whole) {
                    return false;
                }
            }
        }
        true
    }
}

/// Runs the strategies in order and keeps the first plausible value.
pub struct AmountExtractor {
    strategies: Vec<Box<dyn AmountStrategy>>,
    window: PlausibilityWindow,
}

impl AmountExtractor {
    /// Signed, then contextual, then positional.
    pub fn new(window: PlausibilityWindow) -> Self {
        Self::with_strategies(
            vec![
                Box::new(SignedStrategy),
                Box::new(ContextualStrategy::brazilian()),
                Box::new(PositionalStrategy),
            ],
            window,
        )
    }

    pub fn with_strategies(strategies: Vec<Box<dyn AmountStrategy>>, window: PlausibilityWindow) -> Self {
        Self { strategies, window }
    }

    pub fn extract(&self, folded_line: &str) -> Option<ExtractedAmount> {
        self.strategies.iter().find_map(|strategy| {
            strategy
                .candidates(folded_line)
                .into_iter()
                .find(|value| self.window.is_plausible(*value))
                .map(|value| ExtractedAmount {
                    value,
                    source: strategy.source(),
                })
        })
    }
}
