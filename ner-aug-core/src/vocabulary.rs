//! # Vocabulários
//!
//! Listas de valores reais usadas pelo gerador: países, regiões, cidades, distritos,
//! ruas e nomes por gênero. Cada lista é carregada uma vez, deduplicada e mantida
//! ordenada; depois disso é somente leitura e pode ser compartilhada entre threads.
//!
//! ## Estrutura em disco
//!
//! ```text
//! vocabs/
//! ├── location/{countries,regions,cities,districts,streets}.txt
//! └── names/{last,first,middle}_names_{male,female}.txt
//! ```
//!
//! Uma entrada por linha. Espaços nas bordas são removidos, espaços internos repetidos
//! viram um só e linhas vazias são ignoradas. As mesmas listas vêm embutidas no binário.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use tracing::info;

use crate::config::AugmentorConfig;
use crate::error::{AugmentError, Result};
use crate::morphology::Gender;

/// Lista deduplicada e ordenada de valores.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    name: String,
    words: Vec<String>,
}

fn inner_whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("regex válida"))
}

impl Vocabulary {
    /// Constrói a lista a partir de linhas de texto.
    ///
    /// Falha com [`AugmentError::EmptyVocabulary`] se nenhuma linha sobrar: amostrar de uma
    /// lista vazia não tem resultado definido.
    pub fn from_lines<I, S>(name: impl Into<String>, lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let mut words: Vec<String> = lines
            .into_iter()
            .map(|line| inner_whitespace().replace_all(line.as_ref().trim(), " ").into_owned())
            .filter(|line| !line.is_empty())
            .collect();
        words.sort_unstable();
        words.dedup();

        if words.is_empty() {
            return Err(AugmentError::EmptyVocabulary(name));
        }
        Ok(Self { name, words })
    }

    pub fn from_file(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AugmentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_lines(name, text.lines())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Valor uniforme da lista.
    ///
    /// Nunca falha: [`Vocabulary::from_lines`] rejeita listas vazias.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.words.choose(rng).expect("vocabulário não vazio")
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.binary_search_by(|w| w.as_str().cmp(word)).is_ok()
    }

    /// Todas as entradas que começam com `prefix`, em ordem.
    pub fn with_prefix(&self, prefix: &str) -> &[String] {
        let start = self.words.partition_point(|w| w.as_str() < prefix);
        let len = self.words[start..].partition_point(|w| w.starts_with(prefix));
        &self.words[start..start + len]
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Sempre falso para listas construídas por `from_lines`.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Parte de um nome de pessoa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamePart {
    Last,
    First,
    Middle,
}

/// Identificador de cada lista exigida pelo gerador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VocabularyKind {
    Countries,
    Regions,
    Cities,
    Districts,
    Streets,
    LastNamesMale,
    LastNamesFemale,
    FirstNamesMale,
    FirstNamesFemale,
    MiddleNamesMale,
    MiddleNamesFemale,
}

impl VocabularyKind {
    pub const ALL: [VocabularyKind; 11] = [
        VocabularyKind::Countries,
        VocabularyKind::Regions,
        VocabularyKind::Cities,
        VocabularyKind::Districts,
        VocabularyKind::Streets,
        VocabularyKind::LastNamesMale,
        VocabularyKind::LastNamesFemale,
        VocabularyKind::FirstNamesMale,
        VocabularyKind::FirstNamesFemale,
        VocabularyKind::MiddleNamesMale,
        VocabularyKind::MiddleNamesFemale,
    ];

    /// Caminho relativo ao diretório de vocabulários
    pub fn relative_path(&self) -> &'static str {
        match self {
            VocabularyKind::Countries => "location/countries.txt",
            VocabularyKind::Regions => "location/regions.txt",
            VocabularyKind::Cities => "location/cities.txt",
            VocabularyKind::Districts => "location/districts.txt",
            VocabularyKind::Streets => "location/streets.txt",
            VocabularyKind::LastNamesMale => "names/last_names_male.txt",
            VocabularyKind::LastNamesFemale => "names/last_names_female.txt",
            VocabularyKind::FirstNamesMale => "names/first_names_male.txt",
            VocabularyKind::FirstNamesFemale => "names/first_names_female.txt",
            VocabularyKind::MiddleNamesMale => "names/middle_names_male.txt",
            VocabularyKind::MiddleNamesFemale => "names/middle_names_female.txt",
        }
    }

    fn embedded_text(&self) -> &'static str {
        match self {
            VocabularyKind::Countries => include_str!("../vocabs/location/countries.txt"),
            VocabularyKind::Regions => include_str!("../vocabs/location/regions.txt"),
            VocabularyKind::Cities => include_str!("../vocabs/location/cities.txt"),
            VocabularyKind::Districts => include_str!("../vocabs/location/districts.txt"),
            VocabularyKind::Streets => include_str!("../vocabs/location/streets.txt"),
            VocabularyKind::LastNamesMale => include_str!("../vocabs/names/last_names_male.txt"),
            VocabularyKind::LastNamesFemale => include_str!("../vocabs/names/last_names_female.txt"),
            VocabularyKind::FirstNamesMale => include_str!("../vocabs/names/first_names_male.txt"),
            VocabularyKind::FirstNamesFemale => {
                include_str!("../vocabs/names/first_names_female.txt")
            }
            VocabularyKind::MiddleNamesMale => include_str!("../vocabs/names/middle_names_male.txt"),
            VocabularyKind::MiddleNamesFemale => {
                include_str!("../vocabs/names/middle_names_female.txt")
            }
        }
    }

    /// Lista de nomes para uma parte e um gênero.
    /// Gênero neutro usa as listas masculinas.
    pub fn for_name(part: NamePart, gender: Gender) -> Self {
        let female = gender == Gender::Feminine;
        match (part, female) {
            (NamePart::Last, false) => VocabularyKind::LastNamesMale,
            (NamePart::Last, true) => VocabularyKind::LastNamesFemale,
            (NamePart::First, false) => VocabularyKind::FirstNamesMale,
            (NamePart::First, true) => VocabularyKind::FirstNamesFemale,
            (NamePart::Middle, false) => VocabularyKind::MiddleNamesMale,
            (NamePart::Middle, true) => VocabularyKind::MiddleNamesFemale,
        }
    }
}

/// Todas as listas, uma por [`VocabularyKind`].
#[derive(Debug, Clone)]
pub struct VocabularyStore {
    lists: HashMap<VocabularyKind, Vocabulary>,
}

impl VocabularyStore {
    /// Listas compiladas no crate.
    pub fn embedded() -> Result<Self> {
        let lists = VocabularyKind::ALL
            .iter()
            .map(|&kind| {
                Vocabulary::from_lines(kind.relative_path(), kind.embedded_text().lines())
                    .map(|v| (kind, v))
            })
            .collect::<Result<HashMap<_, _>>>()?;
        let store = Self { lists };
        store.log_loaded("embutido");
        Ok(store)
    }

    /// Carrega todas as listas de `dir`; qualquer arquivo ausente ou vazio é erro.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let lists = VocabularyKind::ALL
            .iter()
            .map(|&kind| {
                Vocabulary::from_file(kind.relative_path(), dir.join(kind.relative_path()))
                    .map(|v| (kind, v))
            })
            .collect::<Result<HashMap<_, _>>>()?;
        let store = Self { lists };
        store.log_loaded(&dir.display().to_string());
        Ok(store)
    }

    pub fn from_config(config: &AugmentorConfig) -> Result<Self> {
        match &config.vocab_dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::embedded(),
        }
    }

    pub fn get(&self, kind: VocabularyKind) -> &Vocabulary {
        // Os construtores preenchem todas as listas de VocabularyKind::ALL
        &self.lists[&kind]
    }

    pub fn names(&self, part: NamePart, gender: Gender) -> &Vocabulary {
        self.get(VocabularyKind::for_name(part, gender))
    }

    fn log_loaded(&self, source: &str) {
        let total: usize = self.lists.values().map(Vocabulary::len).sum();
        info!(source, lists = self.lists.len(), entries = total, "vocabulários carregados");
    }
}
