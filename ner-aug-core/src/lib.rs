//! # ner-aug-core — Aumentação de Dados para NER em Russo
//!
//! Este crate gera novas amostras de treino para modelos de Reconhecimento de Entidades
//! Nomeadas: spans anotados como pessoa (`PER`) ou local (`LOC`) são trocados por valores
//! sintéticos (nomes, endereços, unidades administrativas) que concordam gramaticalmente
//! com a frase original, e as tags do span são recalculadas token a token.
//!
//! ## Arquitetura do Sistema
//!
//! O fluxo de uma aumentação passa pelos módulos na ordem:
//!
//! 1.  **Entrada**: texto do span original e categoria (`PER`/`LOC`).
//! 2.  **Morfologia** ([`morphology`]): traços gramaticais do texto original (caso, gênero, número).
//! 3.  **Geração** ([`generator`]): campos `(texto, categoria)` a partir dos vocabulários ([`vocabulary`]),
//!     flexionados para concordar com os traços detectados.
//! 4.  **Etiquetagem** ([`tagger`]): máquina de estados BIOLU com palavras-âncora ([`category`]).
//! 5.  **Formato** ([`format`]): conversão opcional para BIO ou token único e nomes externos (`DMN_*`).
//! 6.  **Saída**: [`TaggedSpan`] com tokens e tags alinhados.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use ner_aug_core::{AugmentorConfig, InputCategory, NerAugmentor};
//!
//! // 1. Carrega vocabulários e morfologia (uma vez por processo)
//! let config = AugmentorConfig::default();
//! let augmentor = NerAugmentor::new(config).unwrap();
//!
//! // 2. O gerador pseudoaleatório é explícito: mesma semente, mesmo resultado
//! let mut rng = augmentor.config().rng();
//!
//! // 3. Substitui "Москве" por um local sintético no mesmo caso
//! let span = augmentor.augment("Москве", InputCategory::Loc, &mut rng);
//!
//! for (token, tag) in span.tokens.iter().zip(&span.tags) {
//!     println!("{token}\t{tag}");
//! }
//! ```
//!
//! ## Módulos Principais
//!
//! - [`augmentor`]: Orquestrador principal, linhas anotadas e processamento em lote.
//! - [`tagger`]: Máquina de estados BIOLU.
//! - [`generator`]: Tipos de entidade e composição de campos.
//! - [`corpus`]: Sentenças de demonstração anotadas (BIO).
//! - [`dataset`]: Leitura e escrita de linhas em JSON Lines.

pub mod augmentor;
pub mod category;
pub mod config;
pub mod corpus;
pub mod dataset;
pub mod error;
pub mod format;
pub mod generator;
pub mod morphology;
pub mod tagger;
pub mod transform;
pub mod vocabulary;

pub use augmentor::{AugmentEvent, InputCategory, NerAugmentor, NerRow};
pub use category::SemanticCategory;
pub use config::{AugmentRng, AugmentorConfig};
pub use error::{AugmentError, Result};
pub use format::TaggingFormat;
pub use generator::{EntityGenerator, EntityKind};
pub use morphology::{GrammaticalFeatures, Morphology, SuffixMorphology};
pub use tagger::{tag_fields, ReplacementField, Tag, TaggedSpan};
pub use transform::TransformationCase;
pub use vocabulary::{Vocabulary, VocabularyStore};
