use std::collections::HashMap;

use crate::normalize::fold_upper;
use crate::rules::RuleSet;

pub const OUTROS: &str = "Outros";
pub const INTERNAL_TRANSFER: &str = "Transferência Interna";

/// Assigns a category to a normalized description.
///
/// Lookup order: caller's known merchants (exact match on the folded
/// description), then the ordered rule table, then [`OUTROS`]. Labels are
/// spelled the way the caller spells them when the caller supplied category
/// names.
#[derive(Debug, Clone, Default)]
pub struct Categorizer {
    known_merchants: HashMap<String, String>,
    caller_categories: Vec<String>,
}

impl Categorizer {
    pub fn new(known_merchants: HashMap<String, String>, caller_categories: Vec<String>) -> Self {
        let known_merchants = known_merchants
            .into_iter()
            .map(|(merchant, category)| (fold_upper(&merchant), category))
            .collect();
        Self {
            known_merchants,
            caller_categories,
        }
    }

    pub fn categorize(&self, description: &str, rules: &RuleSet) -> String {
        let folded = fold_upper(description);

        if let Some(category) = self.known_merchants.get(&folded) {
            return self.canonical(category);
        }

        let label = rules
            .category_rules()
            .iter()
            .find(|rule| rule.regex.is_match(&folded))
            .map(|rule| rule.category.as_str())
            .unwrap_or(OUTROS);
        self.canonical(label)
    }

    /// Caller's spelling of `label` when one matches ignoring case and
    /// accents; `label` itself otherwise.
    pub fn canonical(&self, label: &str) -> String {
        let folded = fold_upper(label);
        self.caller_categories
            .iter()
            .find(|c| fold_upper(c) == folded)
            .cloned()
            .unwrap_or_else(|| label.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("SUPERMERCADO BOM PRECO", "Alimentação")]
    #[case("Posto Ipiranga", "Transporte")]
    #[case("Uber *trip", "Transporte")]
    #[case("IFOOD *RESTAURANTE", "Alimentação")]
    #[case("Drogaria São Paulo", "Saúde")]
    #[case("Netflix.com", "Lazer")]
    #[case("Vivo Fibra", "Casa")]
    #[case("MERCADO PAGO *LOJA", "Outros")]
    #[case("Cliente Fulano", "Outros")]
    fn test_builtin_rules(#[case] description: &str, #[case] expected: &str) {
        let categorizer = Categorizer::default();
        assert_eq!(categorizer.categorize(description, &RuleSet::default()), expected);
    }

    #[test]
    fn test_known_merchant_wins_over_rules() {
        let merchants = HashMap::from([("Padaria Real".to_string(), "Lanches".to_string())]);
        let categorizer = Categorizer::new(merchants, vec![]);

        assert_eq!(categorizer.categorize("PADARIA REAL", &RuleSet::default()), "Lanches");
        assert_eq!(categorizer.categorize("PADARIA CENTRAL", &RuleSet::default()), "Alimentação");
    }

    #[test]
    fn test_caller_spelling_is_used() {
        let categorizer = Categorizer::new(
            HashMap::new(),
            vec!["alimentacao".to_string(), "TRANSFERENCIA INTERNA".to_string()],
        );

        assert_eq!(
            categorizer.categorize("SUPERMERCADO BOM PRECO", &RuleSet::default()),
            "alimentacao"
        );
        assert_eq!(categorizer.canonical(INTERNAL_TRANSFER), "TRANSFERENCIA INTERNA");
        assert_eq!(categorizer.canonical("Saúde"), "Saúde");
    }
}
