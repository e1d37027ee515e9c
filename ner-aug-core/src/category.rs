//! # Categorias Semânticas e Palavras-Âncora
//!
//! Cada valor sintético gerado pertence a uma categoria semântica. As categorias
//! são mais finas que as tags de entrada (`PER`, `LOC`): um endereço vira país,
//! região, cidade, distrito, rua e casa.
//!
//! ## Palavras-âncora
//!
//! Algumas palavras fazem parte do texto de uma entidade mas **não** da sua tag:
//! qualificadores administrativos ("область", "район") e abreviações de logradouro
//! ("ул.", "пр."). Dentro de um span da categoria elas recebem `O`.
//!
//! | Categoria | Âncoras (forma base)                                              |
//! |-----------|-------------------------------------------------------------------|
//! | REGION    | республика, область, ао, автономная, автономный, округ, край, народная |
//! | CITY      | г.                                                                |
//! | DISTRICT  | район                                                             |
//! | STREET    | алл., ш., пр., наб., бул., пер., ул.                              |
//!
//! As listas também trazem as formas declinadas das âncoras por extenso, já que o
//! gerador flexiona os valores antes da etiquetagem.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AugmentError;

const REGION_ANCHORS: &[&str] = &[
    "республика", "республики", "республике", "республику", "республикой",
    "область", "области", "областью",
    "ао",
    "автономная", "автономной", "автономную",
    "автономный", "автономного", "автономному", "автономным", "автономном",
    "округ", "округа", "округу", "округом", "округе",
    "край", "края", "краю", "краем", "крае",
    "народная", "народной", "народную",
];

const CITY_ANCHORS: &[&str] = &["г."];

const DISTRICT_ANCHORS: &[&str] = &["район", "района", "району", "районом", "районе"];

const STREET_ANCHORS: &[&str] = &["алл.", "ш.", "пр.", "наб.", "бул.", "пер.", "ул."];

/// Categoria semântica de um campo de substituição.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemanticCategory {
    Country,
    Region,
    City,
    District,
    Street,
    House,
    LastName,
    FirstName,
    MiddleName,
    /// Sentinela "fora de entidade" (ex: código postal dentro de um endereço).
    #[serde(rename = "O")]
    Outside,
}

impl SemanticCategory {
    /// Todas as categorias de entidade (sem o sentinela `O`).
    pub const ENTITIES: [SemanticCategory; 9] = [
        SemanticCategory::Country,
        SemanticCategory::Region,
        SemanticCategory::City,
        SemanticCategory::District,
        SemanticCategory::Street,
        SemanticCategory::House,
        SemanticCategory::LastName,
        SemanticCategory::FirstName,
        SemanticCategory::MiddleName,
    ];

    /// Nome interno da categoria (ex: "CITY")
    pub fn name(&self) -> &'static str {
        match self {
            SemanticCategory::Country => "COUNTRY",
            SemanticCategory::Region => "REGION",
            SemanticCategory::City => "CITY",
            SemanticCategory::District => "DISTRICT",
            SemanticCategory::Street => "STREET",
            SemanticCategory::House => "HOUSE",
            SemanticCategory::LastName => "LAST_NAME",
            SemanticCategory::FirstName => "FIRST_NAME",
            SemanticCategory::MiddleName => "MIDDLE_NAME",
            SemanticCategory::Outside => "O",
        }
    }

    /// Nome externo usado nas tags finais (ex: "DMN_CITY").
    /// O sentinela `O` permanece "O".
    pub fn domain_name(&self) -> &'static str {
        match self {
            SemanticCategory::Country => "DMN_COUNTRY",
            SemanticCategory::Region => "DMN_REGION",
            SemanticCategory::City => "DMN_CITY",
            SemanticCategory::District => "DMN_DISTRICT",
            SemanticCategory::Street => "DMN_STREET",
            SemanticCategory::House => "DMN_HOUSE",
            SemanticCategory::LastName => "DMN_LAST_NAME",
            SemanticCategory::FirstName => "DMN_FIRST_NAME",
            SemanticCategory::MiddleName => "DMN_MIDDLE_NAME",
            SemanticCategory::Outside => "O",
        }
    }

    /// Lista de âncoras (lowercase) da categoria.
    pub fn anchors(&self) -> &'static [&'static str] {
        match self {
            SemanticCategory::Region => REGION_ANCHORS,
            SemanticCategory::City => CITY_ANCHORS,
            SemanticCategory::District => DISTRICT_ANCHORS,
            SemanticCategory::Street => STREET_ANCHORS,
            _ => &[],
        }
    }

    /// Verifica se o token (em qualquer caixa) é âncora desta categoria.
    pub fn is_anchor(&self, token: &str) -> bool {
        let anchors = self.anchors();
        !anchors.is_empty() && anchors.contains(&token.to_lowercase().as_str())
    }

    /// O token é âncora de alguma categoria?
    ///
    /// Usado pela capitalização: âncoras ficam como estão ("Ленинский район").
    pub fn is_any_anchor(token: &str) -> bool {
        let lower = token.to_lowercase();
        Self::ENTITIES
            .iter()
            .any(|c| c.anchors().contains(&lower.as_str()))
    }

    pub fn is_outside(&self) -> bool {
        *self == SemanticCategory::Outside
    }
}

impl FromStr for SemanticCategory {
    type Err = AugmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "O" {
            return Ok(SemanticCategory::Outside);
        }
        Self::ENTITIES
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| AugmentError::UnknownSemanticCategory(s.to_string()))
    }
}

impl fmt::Display for SemanticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for cat in SemanticCategory::ENTITIES {
            assert_eq!(cat.name().parse::<SemanticCategory>().unwrap(), cat);
            assert_eq!(cat.domain_name(), format!("DMN_{}", cat.name()));
        }
        assert_eq!("O".parse::<SemanticCategory>().unwrap(), SemanticCategory::Outside);
        assert!("PERSON".parse::<SemanticCategory>().is_err());
    }

    #[test]
    fn test_anchor_lookup_is_case_insensitive() {
        assert!(SemanticCategory::District.is_anchor("район"));
        assert!(SemanticCategory::District.is_anchor("Района"));
        assert!(SemanticCategory::Street.is_anchor("УЛ."));
        assert!(SemanticCategory::Region.is_anchor("АО"));
        assert!(!SemanticCategory::City.is_anchor("район"));
        assert!(!SemanticCategory::LastName.is_anchor("г."));
        assert!(!SemanticCategory::Outside.is_anchor("г."));
    }

    #[test]
    fn test_any_anchor() {
        assert!(SemanticCategory::is_any_anchor("область"));
        assert!(SemanticCategory::is_any_anchor("г."));
        assert!(!SemanticCategory::is_any_anchor("Москва"));
    }

    #[test]
    fn test_anchor_lists_are_lowercase() {
        for cat in SemanticCategory::ENTITIES {
            for anchor in cat.anchors() {
                assert_eq!(anchor.to_lowercase(), *anchor);
            }
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&SemanticCategory::LastName).unwrap();
        assert_eq!(json, "\"LAST_NAME\"");
        let outside: SemanticCategory = serde_json::from_str("\"O\"").unwrap();
        assert_eq!(outside, SemanticCategory::Outside);
    }
}
