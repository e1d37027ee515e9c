//! # Conversão de Formato de Tags
//!
//! O etiquetador produz BIOLU; a saída pode ser convertida para BIO ou para o formato
//! de token único. As funções trabalham só com as tags, sem olhar os tokens.
//!
//! | BIOLU   | BIO     | single_token |
//! |---------|---------|--------------|
//! | `U-X`   | `B-X`   | `X`          |
//! | `B-X`   | `B-X`   | `X`          |
//! | `I-X`   | `I-X`   | `X`          |
//! | `L-X`   | `I-X`   | `X`          |
//! | `O`     | `O`     | `O`          |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::SemanticCategory;
use crate::error::AugmentError;

/// Formato das tags de saída.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaggingFormat {
    /// Formato nativo do etiquetador (sem conversão).
    #[default]
    #[serde(rename = "BIOLU")]
    Biolu,
    #[serde(rename = "BIO")]
    Bio,
    /// Apenas a categoria, sem prefixo posicional.
    #[serde(rename = "single_token")]
    SingleToken,
}

impl TaggingFormat {
    /// Aplica a conversão correspondente a uma sequência BIOLU.
    pub fn apply(&self, tags: Vec<String>) -> Vec<String> {
        match self {
            TaggingFormat::Biolu => tags,
            TaggingFormat::Bio => to_bio(&tags),
            TaggingFormat::SingleToken => to_single_token(&tags),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TaggingFormat::Biolu => "BIOLU",
            TaggingFormat::Bio => "BIO",
            TaggingFormat::SingleToken => "single_token",
        }
    }
}

impl FromStr for TaggingFormat {
    type Err = AugmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BIOLU" => Ok(TaggingFormat::Biolu),
            "BIO" => Ok(TaggingFormat::Bio),
            "single_token" => Ok(TaggingFormat::SingleToken),
            other => Err(AugmentError::UnknownTaggingFormat(other.to_string())),
        }
    }
}

/// Separa "B-CITY" em `(Some("B"), "CITY")`; "CITY" e "O" não têm prefixo.
fn split_prefix(tag: &str) -> (Option<&str>, &str) {
    match tag.split_once('-') {
        Some((prefix, rest)) => (Some(prefix), rest),
        None => (None, tag),
    }
}

/// BIOLU → BIO: `U` vira `B`, `L` vira `I`.
pub fn to_bio(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| match split_prefix(tag) {
            (Some("U"), cat) => format!("B-{cat}"),
            (Some("L"), cat) => format!("I-{cat}"),
            _ => tag.clone(),
        })
        .collect()
}

/// Remove o prefixo posicional, mantendo só a categoria (ou `O`).
///
/// # Exemplo
/// `["B-COUNTRY", "L-COUNTRY"]` → `["COUNTRY", "COUNTRY"]`
pub fn to_single_token(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| split_prefix(tag).1.to_string())
        .collect()
}

/// Troca o nome interno da categoria pelo nome externo, preservando o prefixo.
///
/// `"L-STREET"` → `"L-DMN_STREET"`, `"CITY"` → `"DMN_CITY"`, `"O"` → `"O"`.
/// Nomes desconhecidos passam inalterados.
pub fn to_domain_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| {
            let (prefix, name) = split_prefix(tag);
            let Ok(cat) = name.parse::<SemanticCategory>() else {
                return tag.clone();
            };
            match prefix {
                Some(p) => format!("{}-{}", p, cat.domain_name()),
                None => cat.domain_name().to_string(),
            }
        })
        .collect()
}
