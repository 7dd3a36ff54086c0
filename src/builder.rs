use std::collections::HashMap;
use std::fs;

use crate::classify::category::Categorizer;
use crate::config::ExtractionConfig;
use crate::errors::{ExtractionError, ExtractionResult};
use crate::pipeline::Extractor;
use crate::rules::RuleSet;
use crate::types::TransactionCandidate;

#[derive(Default)]
pub struct ExtractorBuilder {
    content: Option<String>,
    filepath: Option<String>,
    categories: Vec<String>,
    account_holder: Option<String>,
    config: Option<ExtractionConfig>,
    rules: Option<RuleSet>,
    known_merchants: HashMap<String, String>,
}

impl ExtractorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    /// Category names the caller uses; emitted labels follow their spelling.
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn account_holder(mut self, name: &str) -> Self {
        self.account_holder = Some(name.to_string());
        self
    }

    pub fn config(mut self, config: ExtractionConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Exact description → category mapping, checked before the rule table.
    pub fn known_merchant(mut self, description: &str, category: &str) -> Self {
        self.known_merchants
            .insert(description.to_string(), category.to_string());
        self
    }

    pub fn build(self) -> ExtractionResult<Extractor> {
        self.split().map(|(extractor, _, _)| extractor)
    }

    pub fn extract(self) -> ExtractionResult<Vec<TransactionCandidate>> {
        let (extractor, content, filepath) = self.split()?;

        let content = content
            .map(Ok)
            .unwrap_or_else(|| {
                filepath
                    .ok_or(ExtractionError::MissingContentAndFilepath)
                    .and_then(|path| fs::read_to_string(path).map_err(Into::into))
            })?;

        Ok(extractor.extract(&content))
    }

    fn split(self) -> ExtractionResult<(Extractor, Option<String>, Option<String>)> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let categorizer = Categorizer::new(self.known_merchants, self.categories);
        let extractor = Extractor::new(
            config,
            self.rules.unwrap_or_default(),
            categorizer,
            self.account_holder,
        );
        Ok((extractor, self.content, self.filepath))
    }
}
