//! # Erros do Aumentador
//!
//! Erros de contrato (categoria ou tipo de entidade desconhecidos) e falhas de carga
//! (vocabulário vazio, arquivo ilegível, configuração inválida).
//!
//! Falhas de flexão de palavras individuais **não** aparecem aqui: são recuperadas
//! localmente mantendo a palavra original.

use std::path::PathBuf;

use thiserror::Error;

/// Erro principal das operações de aumentação.
#[derive(Error, Debug)]
pub enum AugmentError {
    /// Tipo de entidade fora do conjunto reconhecido (ex: "full_name", "address").
    #[error("tipo de entidade desconhecido: {0}")]
    UnknownEntityKind(String),

    /// Categoria de entrada diferente de "PER" ou "LOC".
    #[error("categoria de entrada desconhecida: {0}")]
    UnknownInputCategory(String),

    /// Categoria semântica desconhecida (ex: "CITY", "STREET").
    #[error("categoria semântica desconhecida: {0}")]
    UnknownSemanticCategory(String),

    /// Formato de etiquetagem diferente de "BIOLU", "BIO" ou "single_token".
    #[error("formato de etiquetagem desconhecido: {0}")]
    UnknownTaggingFormat(String),

    /// Transformação de sentença desconhecida.
    #[error("transformação desconhecida: {0}")]
    UnknownTransformation(String),

    /// Lista de vocabulário sem nenhuma entrada após a normalização.
    #[error("vocabulário vazio: {0}")]
    EmptyVocabulary(String),

    /// Falha de leitura de arquivo (vocabulário ou configuração).
    #[error("erro de I/O em {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Arquivo de configuração inválido.
    #[error("erro de configuração: {0}")]
    Config(String),

    /// Linha de entrada com quantidade diferente de tokens e tags.
    #[error("linha inválida: {tokens} tokens e {tags} tags")]
    LengthMismatch { tokens: usize, tags: usize },

    /// Linha de arquivo JSON Lines que não é um `{tokens, ner_tags}`.
    #[error("linha {line} mal formada: {message}")]
    MalformedRow { line: usize, message: String },
}

/// Alias de resultado para as operações do crate.
pub type Result<T> = std::result::Result<T, AugmentError>;

impl From<toml::de::Error> for AugmentError {
    fn from(err: toml::de::Error) -> Self {
        AugmentError::Config(err.to_string())
    }
}
