use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `DD/MM` no início da linha, com ano opcional.
pub(crate) static LEADING_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?\b").unwrap()
});

/// `AAAA-MM-DD` no início da linha (exportações em ISO).
pub(crate) static LEADING_ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d{4}-\d{2}-\d{2}\b").unwrap());

/// A linha começa com uma data, brasileira ou ISO?
pub(crate) fn starts_with_date(line: &str) -> bool {
    LEADING_DATE.is_match(line) || LEADING_ISO_DATE.is_match(line)
}

static BR_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})\b").unwrap());

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap());

/// Representa o trecho de texto de uma linha de extrato que contém a data.
///
/// Os extratos brasileiros trazem datas em:
/// - DD/MM/AAAA (ou DD/MM/AA, promovido para 20AA)
/// - AAAA-MM-DD (exportações em ISO)
/// - DD/MM, quando o ano só aparece no cabeçalho do extrato
///
/// Este wrapper centraliza a lógica de parsing; não há fuso horário,
/// as datas são de calendário.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementDate(String);

impl StatementDate {
    /// Tenta os formatos em ordem: brasileiro primeiro, depois ISO.
    pub fn parse(&self) -> Option<NaiveDate> {
        self.parse_with_year(None)
    }

    /// Como `parse`, completando um `DD/MM` inicial com `reference_year`.
    pub fn parse_with_year(&self, reference_year: Option<i32>) -> Option<NaiveDate> {
        let s = self.0.trim();

        let br = BR_DATE.captures_iter(s).find_map(|caps| {
            let day: u32 = caps[1].parse().ok()?;
            let month: u32 = caps[2].parse().ok()?;
            let year = promote_year(&caps[3])?;
            NaiveDate::from_ymd_opt(year, month, day)
        });
        if br.is_some() {
            return br;
        }

        let iso = ISO_DATE.captures_iter(s).find_map(|caps| {
            let year: i32 = caps[1].parse().ok()?;
            let month: u32 = caps[2].parse().ok()?;
            let day: u32 = caps[3].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        });
        if iso.is_some() {
            return iso;
        }

        // DD/MM sem ano: só com ano de referência configurado
        let year = reference_year?;
        let caps = LEADING_DATE.captures(s)?;
        if caps.get(3).is_some() {
            return None;
        }
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

fn promote_year(raw: &str) -> Option<i32> {
    let year: i32 = raw.parse().ok()?;
    if raw.len() == 2 { Some(2000 + year) } else { Some(year) }
}

impl From<String> for StatementDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StatementDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Extrai a data de uma linha de extrato, se houver.
pub fn extract_date(line: &str, reference_year: Option<i32>) -> Option<NaiveDate> {
    StatementDate::from(line).parse_with_year(reference_year)
}

// -----------------------------------------------------------------------------
// Testes
// -----------------------------------------------------------------------------
