use thiserror::Error;

/// Erros possíveis ao montar o extrator.
///
/// A extração em si nunca falha: linhas ruins são descartadas em silêncio.
/// Só a construção (regras customizadas, configuração) pode dar errado.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Um padrão de regra não compila como expressão regular
    #[error("Invalid rule pattern `{pattern}`: {source}")]
    InvalidRulePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// O arquivo TOML de regras ou de configuração está malformado
    #[error("Failed to parse rules/config TOML: {0}")]
    RulesParseFailed(#[from] toml::de::Error),

    /// Valores de configuração incoerentes entre si (ex: mínimo > máximo)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Erro ao ler o extrato do disco
    #[error("Failed to read statement content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// O builder foi chamado sem fornecer conteúdo nem caminho de arquivo
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    /// Falha ao serializar a saída para JSON
    #[error("Failed to serialize transactions: {0}")]
    SerializeFailed(#[from] serde_json::Error),
}

/// Alias conveniente para Result com nosso tipo de erro principal
pub type ExtractionResult<T> = Result<T, ExtractionError>;

impl ExtractionError {
    pub(crate) fn invalid_pattern(pattern: &str, source: regex::Error) -> Self {
        Self::InvalidRulePattern {
            pattern: pattern.to_string(),
            source,
        }
    }
}
