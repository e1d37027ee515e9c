//! # Aumentador — Orquestrador com Eventos Observáveis
//!
//! Coordena os módulos para um par `(texto do span, categoria)`:
//!
//! 1. Sorteia o tipo de entidade a partir da categoria de entrada (`PER` ou `LOC`).
//! 2. Detecta os traços gramaticais do texto original.
//! 3. Gera os campos de substituição ([`crate::generator`]).
//! 4. Etiqueta os campos em BIOLU ([`crate::tagger`]).
//! 5. Converte o formato das tags ([`crate::format`]) e troca os nomes das categorias
//!    pelos nomes externos (`CITY` → `DMN_CITY`).
//!
//! Cada passo emite um [`AugmentEvent`] por um canal `mpsc`, o que permite ao servidor
//! WebSocket mostrar o processo em tempo real. A versão síncrona ([`NerAugmentor::augment`])
//! só consome esse fluxo.
//!
//! ## Linhas e lotes
//!
//! [`NerAugmentor::augment_row`] aplica a aumentação a uma sentença anotada: cada token
//! `PER`/`LOC` é substituído pelo span gerado e os demais tokens recebem `O`. Depois a
//! sentença inteira passa pela transformação de caixa/transliteração.
//! [`NerAugmentor::augment_rows`] processa várias linhas em paralelo (rayon): cada chamada
//! é uma passada nova sobre os dados, com semente tirada do gerador do chamador.

use std::fmt;
use std::str::FromStr;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{AugmentRng, AugmentorConfig};
use crate::error::{AugmentError, Result};
use crate::format::to_domain_tags;
use crate::generator::{EntityGenerator, EntityKind};
use crate::morphology::{GrammaticalFeatures, Morphology, SuffixMorphology};
use crate::tagger::{tag_fields, ReplacementField, TaggedSpan};
use crate::transform::{transform, TransformationCase};
use crate::vocabulary::VocabularyStore;

/// Categoria NER de entrada que dispara a aumentação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputCategory {
    #[serde(rename = "PER")]
    Per,
    #[serde(rename = "LOC")]
    Loc,
}

impl InputCategory {
    pub fn name(&self) -> &'static str {
        match self {
            InputCategory::Per => "PER",
            InputCategory::Loc => "LOC",
        }
    }

    /// Categoria de uma tag de linha, pelo texto após o último `-`.
    ///
    /// `"B-PER"` e `"PER"` → `Some(Per)`; `"I-ORG"` e `"O"` → `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        tag.rsplit('-').next().and_then(|suffix| suffix.parse().ok())
    }
}

impl FromStr for InputCategory {
    type Err = AugmentError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PER" => Ok(InputCategory::Per),
            "LOC" => Ok(InputCategory::Loc),
            other => Err(AugmentError::UnknownInputCategory(other.to_string())),
        }
    }
}

impl fmt::Display for InputCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Uma sentença anotada: tokens e tags alinhados.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NerRow {
    pub tokens: Vec<String>,
    pub ner_tags: Vec<String>,
}

impl NerRow {
    pub fn new<S: Into<String>>(pairs: impl IntoIterator<Item = (S, S)>) -> Self {
        let (tokens, ner_tags) = pairs.into_iter().map(|(t, g)| (t.into(), g.into())).unzip();
        Self { tokens, ner_tags }
    }
}

/// Eventos emitidos durante uma aumentação.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AugmentEvent {
    /// **Passo 1**: tipo de entidade sorteado para a categoria de entrada.
    KindChosen {
        category: InputCategory,
        kind: EntityKind,
    },
    /// **Passo 2**: traços gramaticais do texto original (com fallbacks aplicados).
    FeaturesDetected {
        text: String,
        features: GrammaticalFeatures,
    },
    /// **Passo 3**: campos gerados, já flexionados.
    FieldsGenerated { fields: Vec<ReplacementField> },
    /// **Passo 4**: tokens e tags BIOLU, antes da conversão de formato.
    SpanTagged { tokens: Vec<String>, tags: Vec<String> },
    /// **Conclusão**: span final com as tags no formato configurado.
    Done { span: TaggedSpan, processing_us: u64 },
}

/// Fachada da aumentação.
///
/// Construída uma vez a partir da configuração; vocabulários e morfologia são
/// imutáveis e podem ser usados por várias threads ao mesmo tempo. O gerador
/// pseudoaleatório é sempre passado pelo chamador.
pub struct NerAugmentor<M: Morphology = SuffixMorphology> {
    config: AugmentorConfig,
    vocab: Arc<VocabularyStore>,
    morph: M,
}

impl NerAugmentor<SuffixMorphology> {
    /// Carrega os vocabulários indicados em `config` e usa a morfologia embutida.
    pub fn new(config: AugmentorConfig) -> Result<Self> {
        let vocab = VocabularyStore::from_config(&config)?;
        Ok(Self::with_parts(config, Arc::new(vocab), SuffixMorphology))
    }
}

impl<M: Morphology> NerAugmentor<M> {
    pub fn with_parts(config: AugmentorConfig, vocab: Arc<VocabularyStore>, morph: M) -> Self {
        Self { config, vocab, morph }
    }

    pub fn config(&self) -> &AugmentorConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Arc<VocabularyStore> {
        &self.vocab
    }

    /// `PER` → um dos tipos de nome (ou sempre `full_name`); `LOC` → um dos tipos de local.
    pub fn choose_kind<R: Rng + ?Sized>(&self, category: InputCategory, rng: &mut R) -> EntityKind {
        match category {
            InputCategory::Per if self.config.person_name_parts => {
                *EntityKind::PERSON.choose(rng).expect("tipos de pessoa")
            }
            InputCategory::Per => EntityKind::FullName,
            InputCategory::Loc => *EntityKind::LOCATION.choose(rng).expect("tipos de local"),
        }
    }

    /// Gera um span substituto para `span_text`.
    pub fn augment<R: Rng + ?Sized>(
        &self,
        span_text: &str,
        category: InputCategory,
        rng: &mut R,
    ) -> TaggedSpan {
        self.augment_inner(span_text, category, rng, None)
    }

    /// Executa a aumentação enviando eventos de progresso por `tx`.
    ///
    /// # Fluxo de Eventos
    /// 1. `KindChosen`
    /// 2. `FeaturesDetected`
    /// 3. `FieldsGenerated`
    /// 4. `SpanTagged`
    /// 5. `Done`
    pub fn augment_streaming<R: Rng + ?Sized>(
        &self,
        span_text: &str,
        category: InputCategory,
        rng: &mut R,
        tx: mpsc::Sender<AugmentEvent>,
    ) {
        let start = Instant::now();
        let span = self.augment_inner(span_text, category, rng, Some(&tx));
        let _ = tx.send(AugmentEvent::Done {
            span,
            processing_us: start.elapsed().as_micros() as u64,
        });
    }

    /// Passos 1 a 5. Os eventos intermediários só são montados quando há um canal.
    fn augment_inner<R: Rng + ?Sized>(
        &self,
        span_text: &str,
        category: InputCategory,
        rng: &mut R,
        tx: Option<&mpsc::Sender<AugmentEvent>>,
    ) -> TaggedSpan {
        // === Passo 1: tipo de entidade ===
        let kind = self.choose_kind(category, rng);
        if let Some(tx) = tx {
            let _ = tx.send(AugmentEvent::KindChosen { category, kind });
        }

        // === Passo 2: traços gramaticais ===
        let features = GrammaticalFeatures::detect(&self.morph, span_text, rng);
        if let Some(tx) = tx {
            let _ = tx.send(AugmentEvent::FeaturesDetected {
                text: span_text.to_string(),
                features,
            });
        }

        // === Passo 3: geração ===
        let generator = EntityGenerator::new(&self.vocab, &self.morph);
        let fields = generator.generate(kind, &features, rng);
        if let Some(tx) = tx {
            let _ = tx.send(AugmentEvent::FieldsGenerated {
                fields: fields.clone(),
            });
        }

        // === Passo 4: etiquetagem BIOLU ===
        let tagged = tag_fields(&fields);
        if let Some(tx) = tx {
            let _ = tx.send(AugmentEvent::SpanTagged {
                tokens: tagged.tokens.clone(),
                tags: tagged.tags.clone(),
            });
        }

        // === Passo 5: formato e nomes externos ===
        let tags = to_domain_tags(&self.config.tagging_format.apply(tagged.tags));
        let span = TaggedSpan {
            tokens: tagged.tokens,
            tags,
        };
        debug!(
            text = span_text,
            %category,
            %kind,
            %features,
            tokens = span.len(),
            "span aumentado"
        );
        span
    }

    /// Aumenta uma sentença anotada.
    ///
    /// Tokens com tag `PER`/`LOC` (qualquer prefixo) são substituídos; todos os outros
    /// são mantidos com tag `O`. A transformação de sentença vem da configuração ou é
    /// sorteada antes de processar os tokens.
    pub fn augment_row<R: Rng + ?Sized>(&self, row: &NerRow, rng: &mut R) -> Result<NerRow> {
        if row.tokens.len() != row.ner_tags.len() {
            return Err(AugmentError::LengthMismatch {
                tokens: row.tokens.len(),
                tags: row.ner_tags.len(),
            });
        }

        let case = self
            .config
            .transformation
            .unwrap_or_else(|| TransformationCase::choose(rng));

        let mut tokens = Vec::with_capacity(row.tokens.len());
        let mut ner_tags = Vec::with_capacity(row.ner_tags.len());
        for (token, tag) in row.tokens.iter().zip(&row.ner_tags) {
            match InputCategory::from_tag(tag) {
                Some(category) => {
                    let span = self.augment(token, category, rng);
                    tokens.extend(span.tokens);
                    ner_tags.extend(span.tags);
                }
                None => {
                    tokens.push(token.clone());
                    ner_tags.push("O".to_string());
                }
            }
        }

        Ok(NerRow {
            tokens: transform(&tokens, case),
            ner_tags,
        })
    }

    /// Aumenta várias linhas em paralelo.
    ///
    /// Cada passada tira uma semente nova de `rng`; dentro da passada a linha `i` usa o
    /// stream `i` dessa semente, então o resultado não depende do escalonamento das
    /// threads. Falha na primeira linha inválida.
    pub fn augment_rows<R: Rng + ?Sized>(
        &self,
        rows: &[NerRow],
        rng: &mut R,
    ) -> Result<Vec<NerRow>> {
        let pass_seed: u64 = rng.gen();
        debug!(rows = rows.len(), pass_seed, "lote iniciado");
        rows.par_iter()
            .enumerate()
            .map(|(i, row)| {
                let mut row_rng = AugmentRng::seed_from_u64(pass_seed);
                row_rng.set_stream(i as u64);
                self.augment_row(row, &mut row_rng)
            })
            .collect()
    }
}
