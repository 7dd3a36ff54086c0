//! Line-by-line orchestration: classify, extract, build, validate, then
//! finalize the whole batch.

use tracing::{debug, info, trace, warn};

use crate::classify::prelude::*;
use crate::config::ExtractionConfig;
use crate::errors::ExtractionResult;
use crate::normalize::{fold_upper, normalize_description};
use crate::parsers::prelude::*;
use crate::rules::RuleSet;
use crate::types::{ExtractionReport, ExtractionStats, TransactionCandidate, TransactionType};
use crate::validator::{Rejection, Validator};

/// What happened to a single line.
#[derive(Debug)]
enum LineOutcome {
    Noise(NoiseReason),
    NoAmount,
    NoDescription,
    Rejected(Rejection),
    Emitted(TransactionCandidate),
}

/// Deterministic statement extractor.
///
/// Immutable once built; share it freely between threads. Built through
/// [`crate::ExtractorBuilder`] or, with every default, [`extract_transactions`].
pub struct Extractor {
    config: ExtractionConfig,
    rules: RuleSet,
    amounts: AmountExtractor,
    categorizer: Categorizer,
    account_holder: Option<String>,
}

impl Extractor {
    pub(crate) fn new(
        config: ExtractionConfig,
        rules: RuleSet,
        categorizer: Categorizer,
        account_holder: Option<String>,
    ) -> Self {
        let amounts = AmountExtractor::new(PlausibilityWindow::from_config(&config));
        let account_holder = account_holder.filter(|h| !h.trim().is_empty());
        Self {
            config,
            rules,
            amounts,
            categorizer,
            account_holder,
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extracts candidates in input line order. Never fails: lines that do
    /// not look like transactions are left out.
    pub fn extract(&self, text: &str) -> Vec<TransactionCandidate> {
        self.extract_with_report(text).transactions
    }

    /// Same as [`Extractor::extract`], also returning per-stage counters.
    #[tracing::instrument(
        name = "Extract transactions",
        skip(self, text),
        fields(text_len = text.len())
    )]
    pub fn extract_with_report(&self, text: &str) -> ExtractionReport {
        let validator = Validator::new(&self.config, &self.rules);
        let mut stats = ExtractionStats::default();
        let mut candidates = Vec::new();

        for (index, line) in text.lines().enumerate() {
            stats.lines_scanned += 1;
            match self.process_line(line, &validator) {
                LineOutcome::Noise(reason) => {
                    stats.noise_lines += 1;
                    trace!(line = index + 1, ?reason, "noise line");
                }
                LineOutcome::NoAmount => {
                    stats.without_amount += 1;
                    trace!(line = index + 1, "no plausible amount");
                }
                LineOutcome::NoDescription => {
                    stats.rejected += 1;
                    trace!(line = index + 1, "description empty after normalization");
                }
                LineOutcome::Rejected(rejection) => {
                    stats.rejected += 1;
                    trace!(line = index + 1, ?rejection, "candidate rejected");
                }
                LineOutcome::Emitted(candidate) => {
                    debug!(
                        line = index + 1,
                        description = %candidate.description,
                        amount = %candidate.amount,
                        confidence = candidate.confidence,
                        "candidate emitted"
                    );
                    candidates.push(candidate);
                }
            }
        }

        stats.raw_emitted = candidates.len();
        let transactions = self.finalize(candidates, &mut stats);
        info!(
            lines = stats.lines_scanned,
            raw = stats.raw_emitted,
            emitted = transactions.len(),
            "extraction finished"
        );

        ExtractionReport {
            transactions,
            stats,
        }
    }

    /// Extracted candidates as a JSON array.
    pub fn extract_json(&self, text: &str) -> ExtractionResult<String> {
        Ok(serde_json::to_string(&self.extract(text))?)
    }

    fn process_line(&self, line: &str, validator: &Validator<'_>) -> LineOutcome {
        let folded = fold_upper(line);

        if let LineVerdict::Noise(reason) =
            classify_line(line, &folded, &self.rules, self.config.min_line_len)
        {
            return LineOutcome::Noise(reason);
        }

        let Some(extracted) = self.amounts.extract(&folded) else {
            return LineOutcome::NoAmount;
        };

        let Some(description) =
            normalize_description(line, &self.rules, self.config.min_description_len)
        else {
            return LineOutcome::NoDescription;
        };

        let self_transfer = self
            .account_holder
            .as_deref()
            .is_some_and(|holder| is_self_transfer(&folded, &description, holder));

        let kind = if self_transfer && self.config.self_transfer_as_expense {
            TransactionType::Expense
        } else {
            resolve_nature(&folded, extracted.value)
        };

        let category = if self_transfer {
            self.categorizer.canonical(INTERNAL_TRANSFER)
        } else {
            self.categorizer.categorize(&description, &self.rules)
        };

        let candidate = TransactionCandidate {
            date: extract_date(line, self.config.reference_year)
                .unwrap_or(self.config.fallback_date),
            amount: kind.signed(extracted.value),
            kind,
            category,
            payment_method: detect_payment_method(&folded),
            confidence: extracted.confidence(),
            is_subscription: is_subscription(&description, &self.rules),
            description,
        };

        match validator.check(&candidate) {
            Ok(()) => LineOutcome::Emitted(candidate),
            Err(rejection) => LineOutcome::Rejected(rejection),
        }
    }

    /// Guards against over-production. Above the high-volume threshold only
    /// high-confidence candidates survive, up to the degraded cap; the safety
    /// cap applies in every case. Input order is preserved.
    fn finalize(
        &self,
        mut candidates: Vec<TransactionCandidate>,
        stats: &mut ExtractionStats,
    ) -> Vec<TransactionCandidate> {
        if candidates.len() > self.config.high_volume_threshold {
            let raw = candidates.len();
            candidates.retain(|c| c.confidence >= self.config.degraded_min_confidence);
            candidates.truncate(self.config.degraded_cap);
            stats.degraded = true;
            warn!(
                raw,
                kept = candidates.len(),
                min_confidence = self.config.degraded_min_confidence,
                "suspicious volume, keeping only high-confidence candidates"
            );
        }

        if candidates.len() > self.config.safety_cap {
            warn!(
                count = candidates.len(),
                cap = self.config.safety_cap,
                "truncating to safety cap"
            );
            candidates.truncate(self.config.safety_cap);
            stats.truncated = true;
        }

        candidates
    }
}

/// Extracts candidates with the built-in rules and default tunables.
///
/// `categories` are the caller's category names; emitted labels are spelled
/// the caller's way when they match ignoring case and accents.
/// `account_holder` enables self-transfer detection.
pub fn extract_transactions(
    text: &str,
    categories: Option<&[String]>,
    account_holder: Option<&str>,
) -> Vec<TransactionCandidate> {
    let categorizer = Categorizer::new(
        Default::default(),
        categories.map(<[String]>::to_vec).unwrap_or_default(),
    );
    Extractor::new(
        ExtractionConfig::default(),
        RuleSet::default(),
        categorizer,
        account_holder.map(str::to_string),
    )
    .extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const SAMPLE_STATEMENT: &str = "\
SICOOB - COOPERATIVA DE CREDITO
Agência: 3069 Conta: 12345-6
EXTRATO DE CONTA CORRENTE
DATA HISTÓRICO VALOR
01/12/2024 SALDO ANTERIOR 1.500,00
10/12/2024 PAGAMENTO PIX 45,90 SUPERMERCADO BOM PRECO
11/12/2024 PIX CRED 250,00 Cliente Fulano
12/12/2024 COMPRA CARTAO DEBITO 39,90 NETFLIX.COM
13/12/2024 IOF DIARIO 0,87
13/12/2024 PAGAMENTO BOLETO 2025 REF
---------------------------------
SALDO DO DIA R$ 1.664,20
";

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn default_extractor() -> Extractor {
        Extractor::new(
            ExtractionConfig::default(),
            RuleSet::default(),
            Categorizer::default(),
            None,
        )
    }

    #[test]
    fn test_reference_scenario() {
        let result = extract_transactions(
            "10/12/2024 PAGAMENTO PIX 45,90 SUPERMERCADO BOM PRECO",
            None,
            None,
        );

        assert_eq!(result.len(), 1);
        let txn = &result[0];
        assert_eq!(txn.date, date(2024, 12, 10));
        assert_eq!(txn.description, "SUPERMERCADO BOM PRECO");
        assert_eq!(txn.amount, dec("-45.90"));
        assert_eq!(txn.kind, TransactionType::Expense);
        assert_eq!(txn.category, "Alimentação");
        assert_eq!(txn.payment_method, PaymentMethod::Pix);
        assert_eq!(txn.confidence, 0.90);
        assert!(!txn.is_subscription);
    }

    #[test]
    fn test_sample_statement() {
        let report = default_extractor().extract_with_report(SAMPLE_STATEMENT);
        let descriptions: Vec<&str> = report
            .transactions
            .iter()
            .map(|t| t.description.as_str())
            .collect();

        assert_eq!(
            descriptions,
            vec!["SUPERMERCADO BOM PRECO", "Cliente Fulano", "NETFLIX.COM"]
        );

        let netflix = &report.transactions[2];
        assert!(netflix.is_subscription);
        assert_eq!(netflix.category, "Lazer");
        assert_eq!(netflix.payment_method, PaymentMethod::DebitCard);
        assert_eq!(netflix.amount, dec("-39.90"));

        let income = &report.transactions[1];
        assert_eq!(income.kind, TransactionType::Income);
        assert_eq!(income.amount, dec("250.00"));

        assert_eq!(report.stats.lines_scanned, 12);
        assert_eq!(report.stats.raw_emitted, 3);
        assert!(!report.stats.degraded);
        assert!(!report.stats.truncated);
    }

    #[test]
    fn test_idempotence() {
        let extractor = default_extractor();
        assert_eq!(extractor.extract(SAMPLE_STATEMENT), extractor.extract(SAMPLE_STATEMENT));
    }

    #[test]
    fn test_keyword_precedence_over_sign() {
        let result = extract_transactions("RECEBIMENTO PIX -200,00 FULANO DE TAL", None, None);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, TransactionType::Income);
        assert_eq!(result[0].amount, dec("200.00"));
        assert_eq!(result[0].confidence, 0.95);
    }

    #[test]
    fn test_positional_disambiguation() {
        let result = extract_transactions("05/03/2024 LOJA EXEMPLO 150,00 4.820,00", None, None);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].amount, dec("150.00"));
        assert_eq!(result[0].confidence, 0.75);
        assert_eq!(result[0].date, date(2024, 3, 5));
        assert_eq!(result[0].description, "LOJA EXEMPLO");
    }

    #[rstest]
    #[case("SALDO ANTERIOR R$ 500,00")]
    #[case("01/12/2024 SALDO ANTERIOR 500,00")]
    #[case("01/12/2024 TAXA DE JUROS 2,5% 12,00")]
    #[case("Agência: 3069 Conta: 12345-6 0,00")]
    #[case("----------------------------")]
    fn test_noise_yields_nothing(#[case] line: &str) {
        assert!(extract_transactions(line, None, None).is_empty());
    }

    #[rstest]
    #[case("10/12/2024 PAGAMENTO CARTAO CREDITO 500,00", "-500.00", PaymentMethod::CreditCard)]
    #[case("10/12/2024 COMPRA CARTAO DE DEBITO 80,00 PADARIA REAL", "-80.00", PaymentMethod::DebitCard)]
    fn test_card_phrase_does_not_flip_direction(
        #[case] line: &str,
        #[case] expected: &str,
        #[case] method: PaymentMethod,
    ) {
        let result = extract_transactions(line, None, None);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, TransactionType::Expense);
        assert_eq!(result[0].amount, dec(expected));
        assert_eq!(result[0].payment_method, method);
    }

    #[rstest]
    #[case("2024-12-10 PAGAMENTO PIX 45,90 SUPERMERCADO BOM PRECO", "SUPERMERCADO BOM PRECO", "-45.90")]
    #[case("2024-12-10 AMAZON MARKETPLACE 150,00 4.820,00", "AMAZON MARKETPLACE", "150.00")]
    fn test_iso_dated_lines(
        #[case] line: &str,
        #[case] description: &str,
        #[case] amount: &str,
    ) {
        let result = extract_transactions(line, None, None);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].date, date(2024, 12, 10));
        assert_eq!(result[0].description, description);
        assert_eq!(result[0].amount, dec(amount));
    }

    #[test]
    fn test_merchant_named_total_is_kept() {
        let result = extract_transactions("10/12/2024 COMPRA 150,00 AUTO POSTO TOTAL", None, None);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].description, "AUTO POSTO TOTAL");
        assert_eq!(result[0].category, "Transporte");
        assert_eq!(result[0].amount, dec("-150.00"));
    }

    #[test]
    fn test_self_transfer() {
        let result = extract_transactions("PIX DEB 300,00 MARIA SILVA", None, Some("Maria Silva"));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, INTERNAL_TRANSFER);
        assert_eq!(result[0].kind, TransactionType::Expense);
        assert_eq!(result[0].amount, dec("-300.00"));
    }

    #[test]
    fn test_self_transfer_without_holder_is_regular_pix() {
        let result = extract_transactions("PIX DEB 300,00 MARIA SILVA", None, None);
        assert_eq!(result[0].category, OUTROS);
    }

    #[test]
    fn test_self_transfer_keeps_nature_when_configured() {
        let config = ExtractionConfig {
            self_transfer_as_expense: false,
            ..Default::default()
        };
        let extractor = Extractor::new(
            config,
            RuleSet::default(),
            Categorizer::default(),
            Some("Maria Silva".to_string()),
        );

        let result = extractor.extract("PIX CRED 300,00 MARIA SILVA");
        assert_eq!(result[0].category, INTERNAL_TRANSFER);
        assert_eq!(result[0].kind, TransactionType::Income);
        assert_eq!(result[0].amount, dec("300.00"));
    }

    #[test]
    fn test_degradation_keeps_high_confidence_only() {
        let mut lines: Vec<String> = (0..220).map(|i| format!("PIX DEB -10,00 LOJA {i}")).collect();
        lines.extend((0..50).map(|i| format!("COMPRA 20,00 MERCADO {i}")));
        let text = lines.join("\n");

        let report = default_extractor().extract_with_report(&text);

        assert_eq!(report.stats.raw_emitted, 270);
        assert!(report.stats.degraded);
        assert_eq!(report.transactions.len(), 150);
        assert!(report.transactions.iter().all(|t| t.confidence >= 0.95));
        assert_eq!(report.transactions[0].description, "LOJA 0");
    }

    #[test]
    fn test_safety_cap_without_degradation() {
        let config = ExtractionConfig {
            high_volume_threshold: 1_000,
            ..Default::default()
        };
        let extractor = Extractor::new(config, RuleSet::default(), Categorizer::default(), None);
        let text: Vec<String> = (0..250).map(|i| format!("COMPRA 20,00 MERCADO {i}")).collect();

        let report = extractor.extract_with_report(&text.join("\n"));

        assert!(!report.stats.degraded);
        assert!(report.stats.truncated);
        assert_eq!(report.transactions.len(), 200);
        assert_eq!(report.transactions[199].description, "MERCADO 199");
    }

    #[test]
    fn test_below_threshold_is_untouched() {
        let text: Vec<String> = (0..180).map(|i| format!("COMPRA 20,00 MERCADO {i}")).collect();
        let report = default_extractor().extract_with_report(&text.join("\n"));

        assert!(!report.stats.degraded);
        assert_eq!(report.transactions.len(), 180);
    }

    #[test]
    fn test_caller_category_spelling() {
        let categories = vec!["alimentação".to_string(), "Transporte".to_string()];
        let result = extract_transactions(
            "10/12/2024 PAGAMENTO PIX 45,90 SUPERMERCADO BOM PRECO",
            Some(&categories),
            None,
        );
        assert_eq!(result[0].category, "alimentação");
    }

    #[rstest]
    #[case(None, date(1970, 1, 1))]
    #[case(Some(2025), date(2025, 1, 2))]
    fn test_day_month_date(#[case] reference_year: Option<i32>, #[case] expected: NaiveDate) {
        let config = ExtractionConfig {
            reference_year,
            ..Default::default()
        };
        let extractor = Extractor::new(config, RuleSet::default(), Categorizer::default(), None);

        let result = extractor.extract("02/01 PIX_DEB 30,00 joão silva");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].date, expected);
        assert_eq!(result[0].description, "João silva");
    }

    #[test]
    fn test_validator_minimum_drops_small_amounts() {
        let report = default_extractor().extract_with_report("10/12/2024 PIX DEB 0,30 PADARIA REAL");
        assert!(report.transactions.is_empty());
        assert_eq!(report.stats.rejected, 1);
    }

    #[test]
    fn test_extract_json_shape() {
        let json = default_extractor()
            .extract_json("10/12/2024 PAGAMENTO PIX 45,90 SUPERMERCADO BOM PRECO")
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["date"], "2024-12-10");
        assert_eq!(value[0]["type"], "expense");
        assert_eq!(value[0]["paymentMethod"], "pix");
        assert_eq!(value[0]["isSubscription"], false);
    }

    #[test]
    fn test_extractor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Extractor>();
    }
}
