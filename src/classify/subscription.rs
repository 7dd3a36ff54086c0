use crate::normalize::fold_upper;
use crate::rules::RuleSet;

/// True when the description names a recurring-service brand. Looks at the
/// brand only; recurrence across months is not analysed.
pub fn is_subscription(description: &str, rules: &RuleSet) -> bool {
    rules.is_subscription_brand(&fold_upper(description))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Netflix.com", true)]
    #[case("Spotify AB", true)]
    #[case("Apple.com/bill", true)]
    #[case("Microsoft 365", true)]
    #[case("Claro Celular", true)]
    #[case("SUPERMERCADO BOM PRECO", false)]
    #[case("Timbauba Materiais", false)]
    fn test_is_subscription(#[case] description: &str, #[case] expected: bool) {
        assert_eq!(is_subscription(description, &RuleSet::default()), expected);
    }

    #[test]
    fn test_brand_table_is_replaceable() {
        let rules = RuleSet::from_toml_str(r#"subscription_brands = ["SMART FIT"]"#).unwrap();
        assert!(is_subscription("Smart Fit Mensalidade", &rules));
        assert!(!is_subscription("Netflix.com", &rules));
    }
}
