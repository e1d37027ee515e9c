//! # Configuração do Aumentador
//!
//! Objeto imutável construído uma vez na inicialização e injetado no [`crate::NerAugmentor`].
//! Pode ser montado em código (`AugmentorConfig::default()`) ou lido de um arquivo TOML:
//!
//! ```toml
//! tagging_format = "BIO"
//! seed = 7
//! vocab_dir = "/srv/vocabs"
//! person_name_parts = false
//! transformation = "orig_lowercase"
//! ```
//!
//! Campos ausentes recebem o valor padrão.

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AugmentError, Result};
use crate::format::TaggingFormat;
use crate::transform::TransformationCase;

/// Gerador pseudoaleatório usado em todo o crate.
pub type AugmentRng = ChaCha8Rng;

pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentorConfig {
    /// Formato das tags de saída
    pub tagging_format: TaggingFormat,
    /// Semente global; todos os geradores derivam dela.
    pub seed: u64,
    /// Diretório com `location/*.txt` e `names/*.txt`.
    /// Sem ele, usam-se os vocabulários embutidos.
    pub vocab_dir: Option<PathBuf>,
    /// `PER` sorteia entre nome completo, sobrenome, prenome e patronímico.
    /// Desligado, `PER` sempre gera nome completo.
    pub person_name_parts: bool,
    /// Transformação fixa de sentença; sem ela, sorteia-se uma por linha.
    pub transformation: Option<TransformationCase>,
}

impl Default for AugmentorConfig {
    fn default() -> Self {
        Self {
            tagging_format: TaggingFormat::default(),
            seed: DEFAULT_SEED,
            vocab_dir: None,
            person_name_parts: true,
            transformation: None,
        }
    }
}

impl AugmentorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AugmentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Gerador semeado com `seed`.
    pub fn rng(&self) -> AugmentRng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }

    /// Gerador independente para um worker (ou linha) a partir da mesma semente.
    ///
    /// Streams diferentes nunca se sobrepõem, então o resultado de cada linha
    /// depende só de `(seed, stream)`, não da ordem de execução.
    pub fn rng_for_stream(&self, stream: u64) -> AugmentRng {
        let mut rng = self.rng();
        rng.set_stream(stream);
        rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_default_config() {
        let config = AugmentorConfig::default();
        assert_eq!(config.tagging_format, TaggingFormat::Biolu);
        assert_eq!(config.seed, 42);
        assert!(config.vocab_dir.is_none());
        assert!(config.person_name_parts);
        assert!(config.transformation.is_none());
    }

    #[test]
    fn test_from_toml_str() {
        let config = AugmentorConfig::from_toml_str(
            r#"
            tagging_format = "single_token"
            seed = 7
            person_name_parts = false
            transformation = "transliterated"
            "#,
        )
        .unwrap();
        assert_eq!(config.tagging_format, TaggingFormat::SingleToken);
        assert_eq!(config.seed, 7);
        assert!(!config.person_name_parts);
        assert_eq!(config.transformation, Some(TransformationCase::Transliterated));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AugmentorConfig::from_toml_str("seed = 1").unwrap();
        assert_eq!(config.seed, 1);
        assert_eq!(config.tagging_format, TaggingFormat::Biolu);
        assert!(config.person_name_parts);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AugmentorConfig::from_toml_str("tagging_format = \"IOB\"").unwrap_err();
        assert!(matches!(err, AugmentError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AugmentorConfig::from_file("/nonexistent/ner-aug.toml").unwrap_err();
        assert!(matches!(err, AugmentError::Io { .. }));
    }

    #[test]
    fn test_rng_is_reproducible() {
        let config = AugmentorConfig::default();
        let a: u32 = config.rng().gen();
        let b: u32 = config.rng().gen();
        assert_eq!(a, b);

        let mut s1 = config.rng_for_stream(1);
        let mut s1_again = config.rng_for_stream(1);
        let mut s2 = config.rng_for_stream(2);
        let x: u64 = s1.gen();
        assert_eq!(x, s1_again.gen::<u64>());
        assert_ne!(x, s2.gen::<u64>());
    }
}
