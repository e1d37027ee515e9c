//! # Esquema BIOLU e Etiquetagem de Spans
//!
//! Converte a lista de campos gerados (`texto`, `categoria`) em tokens e tags BIOLU.
//!
//! ## Esquema BIOLU
//!
//! | Prefixo | Significado                                      |
//! |---------|--------------------------------------------------|
//! | `U-X`   | Unit — a entidade inteira é um único token       |
//! | `B-X`   | Begin — primeiro token de uma entidade longa     |
//! | `I-X`   | Inner — token interno                            |
//! | `L-X`   | Last — último token                              |
//! | `O`     | Outside — fora de entidade (inclui as âncoras)   |
//!
//! ## Máquina de estados
//!
//! Para cada campo, `run_length` conta quantos tokens de entidade foram emitidos em
//! sequência. Uma âncora emite `O` e zera o contador; a decisão entre fechar (`U`/`L`)
//! ou continuar (`B`/`I`) olha apenas o **próximo** token do campo.
//!
//! ```rust
//! use ner_aug_core::category::SemanticCategory;
//! use ner_aug_core::tagger::{tag_fields, ReplacementField};
//!
//! let span = tag_fields(&[ReplacementField::new("Ленинский район", SemanticCategory::District)]);
//! assert_eq!(span.tokens, vec!["Ленинский", "район"]);
//! assert_eq!(span.tags, vec!["U-DISTRICT", "O"]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::SemanticCategory;

/// Tag BIOLU aplicada a um token gerado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    /// **Unit**: entidade de um único token. Ex: **Москва** (U-CITY).
    Unit(SemanticCategory),
    /// **Begin**: início de uma entidade de vários tokens.
    Begin(SemanticCategory),
    /// **Inner**: token interno de uma entidade.
    Inner(SemanticCategory),
    /// **Last**: último token de uma entidade.
    Last(SemanticCategory),
    /// **Outside**: fora de entidade.
    Outside,
}

impl Tag {
    /// Representação textual (ex: "U-CITY", "B-STREET", "O")
    pub fn label(&self) -> String {
        match self {
            Tag::Unit(cat) => format!("U-{}", cat.name()),
            Tag::Begin(cat) => format!("B-{}", cat.name()),
            Tag::Inner(cat) => format!("I-{}", cat.name()),
            Tag::Last(cat) => format!("L-{}", cat.name()),
            Tag::Outside => "O".to_string(),
        }
    }

    /// Categoria da tag (`None` para `O`)
    pub fn category(&self) -> Option<SemanticCategory> {
        match self {
            Tag::Unit(c) | Tag::Begin(c) | Tag::Inner(c) | Tag::Last(c) => Some(*c),
            Tag::Outside => None,
        }
    }

    /// Parseia uma tag a partir de string (ex: "L-STREET" → Last(Street))
    pub fn from_label(s: &str) -> Option<Self> {
        if s == "O" {
            return Some(Tag::Outside);
        }
        let (prefix, name) = s.split_once('-')?;
        let cat: SemanticCategory = name.parse().ok()?;
        if cat.is_outside() {
            return None;
        }
        match prefix {
            "U" => Some(Tag::Unit(cat)),
            "B" => Some(Tag::Begin(cat)),
            "I" => Some(Tag::Inner(cat)),
            "L" => Some(Tag::Last(cat)),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Um valor sintético com sua categoria (ex: `("Иванов", LAST_NAME)`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementField {
    pub text: String,
    pub category: SemanticCategory,
}

impl ReplacementField {
    pub fn new(text: impl Into<String>, category: SemanticCategory) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

/// Tokens e tags de um span gerado. Sempre com o mesmo comprimento.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSpan {
    pub tokens: Vec<String>,
    pub tags: Vec<String>,
}

impl TaggedSpan {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Etiqueta uma lista de campos no esquema BIOLU.
///
/// Os campos são processados em ordem e seus tokens concatenados. Campos com categoria
/// `O` emitem apenas `O`. Nos demais, âncoras da categoria recebem `O` em qualquer posição.
///
/// # Exemplo
/// `[("Иванов", LAST_NAME), ("Иван", FIRST_NAME)]` → `[U-LAST_NAME, U-FIRST_NAME]`
pub fn tag_fields(fields: &[ReplacementField]) -> TaggedSpan {
    let mut tokens = Vec::new();
    let mut tags = Vec::new();

    for field in fields {
        for (token, tag) in tag_field(field) {
            tokens.push(token.to_string());
            tags.push(tag.label());
        }
    }

    assert_eq!(tokens.len(), tags.len(), "tokens e tags desalinhados");
    TaggedSpan { tokens, tags }
}

/// Aplica a máquina de estados a um único campo.
fn tag_field(field: &ReplacementField) -> Vec<(&str, Tag)> {
    let sub_tokens: Vec<&str> = field.text.split(' ').filter(|t| !t.is_empty()).collect();
    let cat = field.category;

    if cat.is_outside() {
        return sub_tokens.into_iter().map(|t| (t, Tag::Outside)).collect();
    }

    let n = sub_tokens.len();
    let mut run_length = 0usize;
    let mut out = Vec::with_capacity(n);

    for (i, token) in sub_tokens.iter().enumerate() {
        // Âncora tem prioridade sobre qualquer outra regra
        if cat.is_anchor(token) {
            out.push((*token, Tag::Outside));
            run_length = 0;
            continue;
        }

        if n == 1 {
            out.push((*token, Tag::Unit(cat)));
            continue;
        }

        let closing = if run_length == 0 { Tag::Unit(cat) } else { Tag::Last(cat) };

        if i == n - 1 {
            out.push((*token, closing));
        } else if cat.is_anchor(sub_tokens[i + 1]) {
            out.push((*token, closing));
            run_length = 0;
        } else {
            let opening = if run_length == 0 { Tag::Begin(cat) } else { Tag::Inner(cat) };
            out.push((*token, opening));
            run_length += 1;
        }
    }

    out
}
