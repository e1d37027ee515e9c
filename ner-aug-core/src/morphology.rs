//! # Morfologia — Detecção de Traços e Flexão
//!
//! O aumentador precisa que o valor gerado concorde com a frase original: se a entidade
//! substituída estava no genitivo ("из Москвы"), o novo valor também deve estar
//! ("из Казани"). Este módulo fornece:
//!
//! - **Detecção**: traços gramaticais (classe, caso, gênero, número) de uma palavra.
//!   Traços não detectados são sorteados.
//! - **Flexão**: a forma de uma palavra/frase para um conjunto de traços.
//!   Uma palavra que não pode ser flexionada é mantida como está.
//!
//! ## Implementação embutida
//!
//! [`SuffixMorphology`] trabalha só com terminações (sem dicionário), no mesmo espírito
//! das features de sufixo do extrator: uma tabela ordenada para análise e um conjunto
//! de paradigmas de declinação reconhecidos pela terminação do lema.
//!
//! | Paradigma         | Exemplo (nomn → gent) |
//! |-------------------|-----------------------|
//! | Sobrenome masc.   | Иванов → Иванова      |
//! | Sobrenome fem.    | Иванова → Ивановой    |
//! | Adjetivo masc.    | Ленинский → Ленинского |
//! | Adjetivo fem.     | Московская → Московской |
//! | Substantivo em -а | Москва → Москвы       |
//! | Substantivo em -ия| Мария → Марии         |
//! | Substantivo em -ий| Василий → Василия     |
//! | Consoante dura    | Иван → Ивана          |
//! | -ь feminino       | Пермь → Перми         |
//!
//! Palavras terminadas em vogais indeclináveis (-о, -е, -и, -у, -ю, -ы), abreviações
//! e números não são flexionados.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

use crate::category::SemanticCategory;

/// Classe gramatical (códigos OpenCorpora)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    #[serde(rename = "NOUN")]
    Noun,
    #[serde(rename = "ADJF")]
    Adjective,
    #[serde(rename = "VERB")]
    Verb,
    #[serde(rename = "OTHER")]
    Other,
}

/// Caso gramatical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrammaticalCase {
    #[serde(rename = "nomn")]
    Nominative,
    #[serde(rename = "gent")]
    Genitive,
    #[serde(rename = "datv")]
    Dative,
    #[serde(rename = "accs")]
    Accusative,
    #[serde(rename = "ablt")]
    Ablative,
    #[serde(rename = "loct")]
    Locative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "masc")]
    Masculine,
    #[serde(rename = "femn")]
    Feminine,
    #[serde(rename = "neut")]
    Neuter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Number {
    #[serde(rename = "sing")]
    Singular,
    #[serde(rename = "plur")]
    Plural,
}

/// Classe lexical do valor a flexionar.
///
/// Equivale às marcas `Surn`, `Name`, `Patr` e `Geox` do OpenCorpora: decide entre
/// paradigmas ambíguos pela terminação ("Валентин" vs "Ильин") e a animacidade do acusativo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LexicalClass {
    Surname,
    GivenName,
    Patronymic,
    Toponym,
    Common,
}

impl LexicalClass {
    pub fn is_animate(&self) -> bool {
        matches!(
            self,
            LexicalClass::Surname | LexicalClass::GivenName | LexicalClass::Patronymic
        )
    }
}

impl PartOfSpeech {
    pub fn code(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Adjective => "ADJF",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::Other => "OTHER",
        }
    }
}

impl GrammaticalCase {
    pub fn code(&self) -> &'static str {
        match self {
            GrammaticalCase::Nominative => "nomn",
            GrammaticalCase::Genitive => "gent",
            GrammaticalCase::Dative => "datv",
            GrammaticalCase::Accusative => "accs",
            GrammaticalCase::Ablative => "ablt",
            GrammaticalCase::Locative => "loct",
        }
    }
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Masculine => "masc",
            Gender::Feminine => "femn",
            Gender::Neuter => "neut",
        }
    }
}

impl Number {
    pub fn code(&self) -> &'static str {
        match self {
            Number::Singular => "sing",
            Number::Plural => "plur",
        }
    }
}

/// Casos sorteados quando a detecção falha
const FALLBACK_CASES: [GrammaticalCase; 5] = [
    GrammaticalCase::Nominative,
    GrammaticalCase::Genitive,
    GrammaticalCase::Dative,
    GrammaticalCase::Accusative,
    GrammaticalCase::Ablative,
];

const FALLBACK_GENDERS: [Gender; 2] = [Gender::Masculine, Gender::Feminine];

const FALLBACK_NUMBERS: [Number; 2] = [Number::Singular, Number::Plural];

/// Resultado bruto da análise: cada traço pode estar ausente.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedFeatures {
    pub pos: Option<PartOfSpeech>,
    pub case: Option<GrammaticalCase>,
    pub gender: Option<Gender>,
    pub number: Option<Number>,
}

/// Traços gramaticais completos de uma chamada de aumentação.
///
/// Calculados uma vez a partir do texto original e compartilhados por todos os campos
/// gerados, garantindo concordância entre partes do nome ou do endereço.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrammaticalFeatures {
    pub pos: PartOfSpeech,
    pub case: GrammaticalCase,
    pub gender: Gender,
    pub number: Number,
}

impl GrammaticalFeatures {
    pub fn new(pos: PartOfSpeech, case: GrammaticalCase, gender: Gender, number: Number) -> Self {
        Self { pos, case, gender, number }
    }

    /// Detecta os traços da última palavra de `text`, sorteando os ausentes.
    ///
    /// Os sorteios de fallback são feitos sempre (antes da análise), então o consumo do
    /// gerador não depende do que foi detectado.
    /// Gênero neutro detectado também cai no sorteio: os vocabulários de nomes só
    /// existem em masculino e feminino.
    pub fn detect<M, R>(morph: &M, text: &str, rng: &mut R) -> Self
    where
        M: Morphology + ?Sized,
        R: Rng + ?Sized,
    {
        // Tabelas constantes e não vazias
        let fallback_case = *FALLBACK_CASES.choose(rng).expect("casos de fallback");
        let fallback_gender = *FALLBACK_GENDERS.choose(rng).expect("gêneros de fallback");
        let fallback_number = *FALLBACK_NUMBERS.choose(rng).expect("números de fallback");

        let word = text.split_whitespace().last().unwrap_or("");
        let detected = morph.analyze(word);

        Self {
            pos: detected.pos.unwrap_or(PartOfSpeech::Noun),
            case: detected.case.unwrap_or(fallback_case),
            gender: match detected.gender {
                Some(g @ (Gender::Masculine | Gender::Feminine)) => g,
                _ => fallback_gender,
            },
            number: detected.number.unwrap_or(fallback_number),
        }
    }

    /// Códigos OpenCorpora na ordem (classe, caso, gênero, número)
    pub fn codes(&self) -> [&'static str; 4] {
        [self.pos.code(), self.case.code(), self.gender.code(), self.number.code()]
    }
}

impl fmt::Display for GrammaticalFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.codes().join(","))
    }
}

/// Capacidade morfológica usada pelo gerador.
pub trait Morphology: Send + Sync {
    /// Analisa uma palavra isolada.
    fn analyze(&self, word: &str) -> DetectedFeatures;

    /// Flexiona uma palavra. `None` quando a palavra não pode ser flexionada.
    fn inflect_word(
        &self,
        word: &str,
        features: &GrammaticalFeatures,
        class: LexicalClass,
    ) -> Option<String>;
}

/// Flexiona cada palavra de `phrase` (separadas por espaço simples).
///
/// Palavras que falham são mantidas. Com `casing`, a primeira letra de cada palavra vira
/// maiúscula, exceto palavras-âncora ("район", "ул.").
pub fn inflect<M>(
    morph: &M,
    phrase: &str,
    features: &GrammaticalFeatures,
    class: LexicalClass,
    casing: bool,
) -> String
where
    M: Morphology + ?Sized,
{
    phrase
        .split(' ')
        .map(|word| {
            let inflected = morph.inflect_word(word, features, class).unwrap_or_else(|| {
                trace!(word, features = %features, "palavra mantida sem flexão");
                word.to_string()
            });
            if casing && !SemanticCategory::is_any_anchor(&inflected) {
                capitalize(&inflected)
            } else {
                inflected
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Primeiro grafema em maiúscula, resto intacto.
pub fn capitalize(word: &str) -> String {
    let mut graphemes = word.graphemes(true);
    match graphemes.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), graphemes.as_str()),
        None => String::new(),
    }
}

/// Nome de rua adjetival ("Садовая", "Невский") concorda com o contexto;
/// complementos no genitivo ("Ленина", "Победы") têm forma fixa.
pub fn is_adjectival(word: &str) -> bool {
    let lower = word.to_lowercase();
    ["ая", "яя", "ый", "ий", "ой"].iter().any(|s| lower.ends_with(s))
}

// =====================================================================
// Análise por sufixo
// =====================================================================

struct SuffixRule {
    suffix: &'static str,
    pos: Option<PartOfSpeech>,
    case: Option<GrammaticalCase>,
    gender: Option<Gender>,
    number: Option<Number>,
}

const fn rule(
    suffix: &'static str,
    pos: Option<PartOfSpeech>,
    case: Option<GrammaticalCase>,
    gender: Option<Gender>,
    number: Option<Number>,
) -> SuffixRule {
    SuffixRule { suffix, pos, case, gender, number }
}

use GrammaticalCase::*;
use PartOfSpeech::{Adjective, Noun, Verb};

const NOUN: Option<PartOfSpeech> = Some(Noun);
const ADJF: Option<PartOfSpeech> = Some(Adjective);
const MASC: Option<Gender> = Some(Gender::Masculine);
const FEMN: Option<Gender> = Some(Gender::Feminine);
const SING: Option<Number> = Some(Number::Singular);
const PLUR: Option<Number> = Some(Number::Plural);

/// Regras de análise, da terminação mais longa para a mais curta.
/// A primeira que casar vence.
const ANALYSIS_RULES: &[SuffixRule] = &[
    // Patronímicos
    rule("овичем", NOUN, Some(Ablative), MASC, SING),
    rule("евичем", NOUN, Some(Ablative), MASC, SING),
    rule("овича", NOUN, Some(Genitive), MASC, SING),
    rule("евича", NOUN, Some(Genitive), MASC, SING),
    rule("овичу", NOUN, Some(Dative), MASC, SING),
    rule("евичу", NOUN, Some(Dative), MASC, SING),
    rule("овной", NOUN, Some(Ablative), FEMN, SING),
    rule("евной", NOUN, Some(Ablative), FEMN, SING),
    rule("овны", NOUN, Some(Genitive), FEMN, SING),
    rule("евны", NOUN, Some(Genitive), FEMN, SING),
    rule("овну", NOUN, Some(Accusative), FEMN, SING),
    rule("евну", NOUN, Some(Accusative), FEMN, SING),
    rule("овна", NOUN, Some(Nominative), FEMN, SING),
    rule("евна", NOUN, Some(Nominative), FEMN, SING),
    rule("ична", NOUN, Some(Nominative), FEMN, SING),
    rule("ович", NOUN, Some(Nominative), MASC, SING),
    rule("евич", NOUN, Some(Nominative), MASC, SING),
    // Adjetivos e sobrenomes adjetivais
    rule("ского", ADJF, Some(Genitive), MASC, SING),
    rule("скому", ADJF, Some(Dative), MASC, SING),
    rule("ским", ADJF, Some(Ablative), MASC, SING),
    rule("ской", ADJF, None, FEMN, SING),
    rule("скую", ADJF, Some(Accusative), FEMN, SING),
    rule("ская", ADJF, Some(Nominative), FEMN, SING),
    rule("ский", ADJF, Some(Nominative), MASC, SING),
    rule("цкий", ADJF, Some(Nominative), MASC, SING),
    rule("ыми", ADJF, Some(Ablative), None, PLUR),
    rule("ими", ADJF, Some(Ablative), None, PLUR),
    rule("ого", ADJF, Some(Genitive), MASC, SING),
    rule("его", ADJF, Some(Genitive), MASC, SING),
    rule("ому", ADJF, Some(Dative), MASC, SING),
    rule("ему", ADJF, Some(Dative), MASC, SING),
    rule("ую", ADJF, Some(Accusative), FEMN, SING),
    rule("ая", ADJF, Some(Nominative), FEMN, SING),
    rule("яя", ADJF, Some(Nominative), FEMN, SING),
    rule("ый", ADJF, Some(Nominative), MASC, SING),
    rule("ых", None, Some(Genitive), None, PLUR),
    rule("их", None, Some(Genitive), None, PLUR),
    // Sobrenomes possessivos
    rule("овым", NOUN, Some(Ablative), MASC, SING),
    rule("евым", NOUN, Some(Ablative), MASC, SING),
    rule("иным", NOUN, Some(Ablative), MASC, SING),
    rule("овой", NOUN, None, FEMN, SING),
    rule("евой", NOUN, None, FEMN, SING),
    rule("иной", NOUN, None, FEMN, SING),
    rule("ова", NOUN, None, None, SING),
    rule("ева", NOUN, None, None, SING),
    rule("ов", NOUN, Some(Nominative), MASC, SING),
    rule("ев", NOUN, Some(Nominative), MASC, SING),
    rule("ин", NOUN, Some(Nominative), MASC, SING),
    // Substantivos
    rule("ией", NOUN, Some(Ablative), FEMN, SING),
    rule("ия", NOUN, Some(Nominative), FEMN, SING),
    rule("ью", NOUN, Some(Ablative), FEMN, SING),
    rule("ой", NOUN, None, None, SING),
    rule("ом", NOUN, Some(Ablative), MASC, SING),
    rule("ем", NOUN, Some(Ablative), MASC, SING),
    rule("ть", Some(Verb), None, None, None),
    rule("ий", NOUN, Some(Nominative), MASC, SING),
    rule("ы", NOUN, None, None, None),
    rule("и", NOUN, None, None, None),
    rule("у", NOUN, None, None, SING),
    rule("ю", NOUN, None, None, SING),
    rule("е", NOUN, None, None, SING),
    rule("а", NOUN, Some(Nominative), FEMN, SING),
    rule("я", NOUN, Some(Nominative), FEMN, SING),
    rule("ь", NOUN, Some(Nominative), None, SING),
    rule("й", NOUN, Some(Nominative), MASC, SING),
];

const HARD_CONSONANTS: &str = "бвгджзклмнпрстфхцчшщ";

/// Letras após as quais -ы vira -и e o adjetivo usa -им/-их
const VELARS_AND_HUSHING: &str = "гкхжшчщ";

/// Letras após as quais a terminação átona -ом vira -ем
const HUSHING_AND_TS: &str = "жшчщц";

/// Vogal móvel ("Павел" → "Павла")
const FLEETING_VOWEL_STEMS: &[(&str, &str)] = &[("павел", "павл"), ("лев", "льв"), ("пётр", "петр")];

/// Morfologia por terminações, sem dicionário.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixMorphology;

impl SuffixMorphology {
    pub fn new() -> Self {
        Self
    }
}

impl Morphology for SuffixMorphology {
    fn analyze(&self, word: &str) -> DetectedFeatures {
        let lower = word.to_lowercase();
        if !is_word(&lower) {
            return DetectedFeatures::default();
        }

        if let Some(r) = ANALYSIS_RULES.iter().find(|r| lower.ends_with(r.suffix)) {
            return DetectedFeatures {
                pos: r.pos,
                case: r.case,
                gender: r.gender,
                number: r.number,
            };
        }

        match lower.chars().last() {
            Some(c) if HARD_CONSONANTS.contains(c) => DetectedFeatures {
                pos: NOUN,
                case: Some(Nominative),
                gender: MASC,
                number: SING,
            },
            _ => DetectedFeatures::default(),
        }
    }

    fn inflect_word(
        &self,
        word: &str,
        features: &GrammaticalFeatures,
        class: LexicalClass,
    ) -> Option<String> {
        let lower = word.to_lowercase();
        if !is_word(&lower) || is_abbreviation(word) {
            return None;
        }

        let paradigm = Paradigm::detect(&lower, class, features.gender)?;
        let (cut, ending) = match paradigm.ending(&lower, features.case, features.number, class) {
            Ending::Unchanged => return Some(word.to_string()),
            Ending::Replace(cut, ending) => (cut, ending),
        };

        let stem = match FLEETING_VOWEL_STEMS.iter().find(|(lemma, _)| *lemma == lower) {
            Some((_, stem)) if paradigm == Paradigm::HardNoun => restore_case(word, stem),
            _ => {
                let keep = word.chars().count().checked_sub(cut)?;
                word.chars().take(keep).collect()
            }
        };
        Some(format!("{stem}{ending}"))
    }
}

/// Só letras e hífens, ao menos duas letras
fn is_word(lower: &str) -> bool {
    lower.chars().filter(|c| c.is_alphabetic()).count() >= 2
        && lower.chars().all(|c| c.is_alphabetic() || c == '-')
}

/// Sigla toda em maiúsculas ("АО", "США")
fn is_abbreviation(word: &str) -> bool {
    word.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase)
}

/// Aplica a capitalização da primeira letra de `original` a `stem`
fn restore_case(original: &str, stem: &str) -> String {
    match original.chars().next() {
        Some(c) if c.is_uppercase() => capitalize(stem),
        _ => stem.to_string(),
    }
}

fn char_before(lower: &str, cut: usize) -> Option<char> {
    lower.chars().rev().nth(cut)
}

fn after_velar_or_hushing(lower: &str, cut: usize) -> bool {
    char_before(lower, cut).is_some_and(|c| VELARS_AND_HUSHING.contains(c))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paradigm {
    /// Иванов, Ильин
    SurnameMasc,
    /// Иванова, Ильина
    SurnameFem,
    /// Ленинский, Новый, Толстой
    AdjMasc,
    /// Московская, Садовая
    AdjFem,
    /// Мария, Россия
    NounIa,
    /// Москва, Ольга, Никита
    NounA,
    /// Дарья, Илья
    NounYa,
    /// Василий, Юрий
    NounIy,
    /// Андрей, край, Ярославль, Игорь
    SoftMasc,
    /// Пермь, область, Любовь
    SoftFem,
    /// Иван, район, Иванович
    HardNoun,
}

enum Ending {
    Unchanged,
    /// (caracteres removidos do fim, nova terminação)
    Replace(usize, &'static str),
}

impl Paradigm {
    fn detect(lower: &str, class: LexicalClass, gender: Gender) -> Option<Self> {
        let ends = |s: &str| lower.ends_with(s);

        if class == LexicalClass::Surname {
            if ["ов", "ев", "ёв", "ин", "ын"].iter().any(|s| ends(s)) {
                return Some(Paradigm::SurnameMasc);
            }
            if ["ова", "ева", "ёва", "ина", "ына"].iter().any(|s| ends(s)) {
                return Some(Paradigm::SurnameFem);
            }
        }

        if ends("ая") || ends("яя") {
            return Some(Paradigm::AdjFem);
        }
        if ends("ый") || ends("ой") {
            return Some(Paradigm::AdjMasc);
        }
        if ends("ий") {
            let noun = matches!(class, LexicalClass::GivenName | LexicalClass::Patronymic);
            return Some(if noun { Paradigm::NounIy } else { Paradigm::AdjMasc });
        }
        if ends("ия") {
            return Some(Paradigm::NounIa);
        }
        if ends("а") {
            return Some(Paradigm::NounA);
        }
        if ends("я") {
            return Some(Paradigm::NounYa);
        }
        if ends("й") {
            return Some(Paradigm::SoftMasc);
        }
        if ends("ь") {
            let feminine = if class.is_animate() {
                gender == Gender::Feminine
            } else {
                !ends("вль")
            };
            return Some(if feminine { Paradigm::SoftFem } else { Paradigm::SoftMasc });
        }

        match lower.chars().last() {
            Some(c) if HARD_CONSONANTS.contains(c) => Some(Paradigm::HardNoun),
            _ => None,
        }
    }

    fn ending(
        &self,
        lower: &str,
        case: GrammaticalCase,
        number: Number,
        class: LexicalClass,
    ) -> Ending {
        use Ending::{Replace, Unchanged};

        let animate = class.is_animate();
        let plural = number == Number::Plural && class == LexicalClass::Surname;

        match self {
            Paradigm::SurnameMasc | Paradigm::SurnameFem if plural => {
                let cut = if *self == Paradigm::SurnameFem { 1 } else { 0 };
                match case {
                    Nominative => Replace(cut, "ы"),
                    Genitive | Accusative | Locative => Replace(cut, "ых"),
                    Dative => Replace(cut, "ым"),
                    Ablative => Replace(cut, "ыми"),
                }
            }
            Paradigm::SurnameMasc => match case {
                Nominative => Unchanged,
                Genitive | Accusative => Replace(0, "а"),
                Dative => Replace(0, "у"),
                Ablative => Replace(0, "ым"),
                Locative => Replace(0, "е"),
            },
            Paradigm::SurnameFem => match case {
                Nominative => Unchanged,
                Accusative => Replace(1, "у"),
                _ => Replace(1, "ой"),
            },
            Paradigm::AdjMasc | Paradigm::AdjFem if plural => {
                let i = after_velar_or_hushing(lower, 2) || lower.ends_with("ий");
                let (nomn, gent, datv, ablt) = if i {
                    ("ие", "их", "им", "ими")
                } else {
                    ("ые", "ых", "ым", "ыми")
                };
                match case {
                    Nominative => Replace(2, nomn),
                    Genitive | Accusative | Locative => Replace(2, gent),
                    Dative => Replace(2, datv),
                    Ablative => Replace(2, ablt),
                }
            }
            Paradigm::AdjMasc => {
                // -ий depois de г/к/х declina como duro (Ленинский → Ленинского)
                let soft =
                    lower.ends_with("ий") && !char_before(lower, 2).is_some_and(|c| "гкх".contains(c));
                let i = after_velar_or_hushing(lower, 2) || soft;
                match case {
                    Nominative => Unchanged,
                    Genitive => Replace(2, if soft { "его" } else { "ого" }),
                    Accusative if animate => Replace(2, if soft { "его" } else { "ого" }),
                    Accusative => Unchanged,
                    Dative => Replace(2, if soft { "ему" } else { "ому" }),
                    Ablative => Replace(2, if i { "им" } else { "ым" }),
                    Locative => Replace(2, if soft { "ем" } else { "ом" }),
                }
            }
            Paradigm::AdjFem => {
                let soft = lower.ends_with("яя");
                match case {
                    Nominative => Unchanged,
                    Accusative => Replace(2, if soft { "юю" } else { "ую" }),
                    _ => Replace(2, if soft { "ей" } else { "ой" }),
                }
            }
            Paradigm::NounIa => match case {
                Nominative => Unchanged,
                Accusative => Replace(1, "ю"),
                Ablative => Replace(1, "ей"),
                _ => Replace(1, "и"),
            },
            Paradigm::NounA => {
                let velar = after_velar_or_hushing(lower, 1);
                let hushing = char_before(lower, 1).is_some_and(|c| HUSHING_AND_TS.contains(c));
                match case {
                    Nominative => Unchanged,
                    Genitive => Replace(1, if velar { "и" } else { "ы" }),
                    Dative | Locative => Replace(1, "е"),
                    Accusative => Replace(1, "у"),
                    Ablative => Replace(1, if hushing { "ей" } else { "ой" }),
                }
            }
            Paradigm::NounYa => match case {
                Nominative => Unchanged,
                Genitive => Replace(1, "и"),
                Dative | Locative => Replace(1, "е"),
                Accusative => Replace(1, "ю"),
                Ablative => Replace(1, "ей"),
            },
            Paradigm::NounIy => match case {
                Nominative => Unchanged,
                Genitive | Accusative => Replace(1, "я"),
                Dative => Replace(1, "ю"),
                Ablative => Replace(1, "ем"),
                Locative => Replace(1, "и"),
            },
            Paradigm::SoftMasc => match case {
                Nominative => Unchanged,
                Genitive => Replace(1, "я"),
                Accusative if animate => Replace(1, "я"),
                Accusative => Unchanged,
                Dative => Replace(1, "ю"),
                Ablative => Replace(1, "ем"),
                Locative => Replace(1, "е"),
            },
            Paradigm::SoftFem => match case {
                Nominative | Accusative => Unchanged,
                Ablative => Replace(1, "ью"),
                _ => Replace(1, "и"),
            },
            Paradigm::HardNoun => {
                let hushing = char_before(lower, 0).is_some_and(|c| HUSHING_AND_TS.contains(c));
                match case {
                    Nominative => Unchanged,
                    Genitive => Replace(0, "а"),
                    Accusative if animate => Replace(0, "а"),
                    Accusative => Unchanged,
                    Dative => Replace(0, "у"),
                    Ablative => Replace(0, if hushing { "ем" } else { "ом" }),
                    Locative => Replace(0, "е"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn features(case: GrammaticalCase, gender: Gender, number: Number) -> GrammaticalFeatures {
        GrammaticalFeatures::new(PartOfSpeech::Noun, case, gender, number)
    }

    fn sing(case: GrammaticalCase) -> GrammaticalFeatures {
        features(case, Gender::Masculine, Number::Singular)
    }

    fn inflect_one(word: &str, case: GrammaticalCase, class: LexicalClass) -> String {
        let m = SuffixMorphology;
        m.inflect_word(word, &sing(case), class).unwrap_or_else(|| word.to_string())
    }

    #[test]
    fn test_analyze_known_endings() {
        let m = SuffixMorphology;
        let f = m.analyze("Ивановичем");
        assert_eq!(f.case, Some(Ablative));
        assert_eq!(f.gender, Some(Gender::Masculine));

        let f = m.analyze("Москва");
        assert_eq!(f.pos, Some(PartOfSpeech::Noun));
        assert_eq!(f.case, Some(Nominative));
        assert_eq!(f.gender, Some(Gender::Feminine));

        let f = m.analyze("Ленинского");
        assert_eq!(f.pos, Some(PartOfSpeech::Adjective));
        assert_eq!(f.case, Some(Genitive));

        assert_eq!(m.analyze("Иван").case, Some(Nominative));
        assert_eq!(m.analyze("123"), DetectedFeatures::default());
        assert_eq!(m.analyze("ул."), DetectedFeatures::default());
    }

    #[test]
    fn test_detect_fills_missing_features() {
        let m = SuffixMorphology;
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let f = GrammaticalFeatures::detect(&m, "2024", &mut rng);
            assert_eq!(f.pos, PartOfSpeech::Noun);
            assert!(FALLBACK_CASES.contains(&f.case));
            assert!(matches!(f.gender, Gender::Masculine | Gender::Feminine));
        }
    }

    #[test]
    fn test_detect_keeps_detected_features() {
        let m = SuffixMorphology;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let f = GrammaticalFeatures::detect(&m, "в Москве с Ивановичем", &mut rng);
        assert_eq!(f.case, Ablative);
        assert_eq!(f.gender, Gender::Masculine);
        assert_eq!(f.number, Number::Singular);
    }

    #[test]
    fn test_detect_is_deterministic_per_seed() {
        let m = SuffixMorphology;
        let a = GrammaticalFeatures::detect(&m, "???", &mut ChaCha8Rng::seed_from_u64(3));
        let b = GrammaticalFeatures::detect(&m, "???", &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_inflect_surnames() {
        use LexicalClass::Surname;
        assert_eq!(inflect_one("Иванов", Genitive, Surname), "Иванова");
        assert_eq!(inflect_one("Иванов", Ablative, Surname), "Ивановым");
        assert_eq!(inflect_one("Иванова", Dative, Surname), "Ивановой");
        assert_eq!(inflect_one("Иванова", Accusative, Surname), "Иванову");
        assert_eq!(inflect_one("Достоевский", Genitive, Surname), "Достоевского");
        assert_eq!(inflect_one("Толстая", Ablative, Surname), "Толстой");

        let m = SuffixMorphology;
        let plural = features(Genitive, Gender::Masculine, Number::Plural);
        assert_eq!(m.inflect_word("Иванов", &plural, Surname).unwrap(), "Ивановых");
        assert_eq!(m.inflect_word("Иванова", &plural, Surname).unwrap(), "Ивановых");
    }

    #[test]
    fn test_inflect_given_names_and_patronymics() {
        use LexicalClass::{GivenName, Patronymic};
        assert_eq!(inflect_one("Иван", Accusative, GivenName), "Ивана");
        assert_eq!(inflect_one("Василий", Genitive, GivenName), "Василия");
        assert_eq!(inflect_one("Андрей", Ablative, GivenName), "Андреем");
        assert_eq!(inflect_one("Мария", Locative, GivenName), "Марии");
        assert_eq!(inflect_one("Ольга", Genitive, GivenName), "Ольги");
        assert_eq!(inflect_one("Павел", Dative, GivenName), "Павлу");
        assert_eq!(inflect_one("Пётр", Genitive, GivenName), "Петра");
        assert_eq!(inflect_one("Иванович", Ablative, Patronymic), "Ивановичем");
        assert_eq!(inflect_one("Ивановна", Genitive, Patronymic), "Ивановны");
    }

    #[test]
    fn test_inflect_toponyms() {
        use LexicalClass::Toponym;
        assert_eq!(inflect_one("Москва", Genitive, Toponym), "Москвы");
        assert_eq!(inflect_one("Казань", Genitive, Toponym), "Казани");
        assert_eq!(inflect_one("Ярославль", Genitive, Toponym), "Ярославля");
        assert_eq!(inflect_one("Новгород", Accusative, Toponym), "Новгород");
        assert_eq!(inflect_one("Нижний", Genitive, Toponym), "Нижнего");
        assert_eq!(inflect_one("Ленинский", Dative, Toponym), "Ленинскому");
        assert_eq!(inflect_one("Московская", Accusative, Toponym), "Московскую");
        assert_eq!(inflect_one("область", Ablative, Toponym), "областью");
        assert_eq!(inflect_one("Россия", Dative, Toponym), "России");
        assert_eq!(inflect_one("Сочи", Genitive, Toponym), "Сочи");
    }

    #[test]
    fn test_uninflectable_words_fail_closed() {
        let m = SuffixMorphology;
        let f = sing(Genitive);
        assert_eq!(m.inflect_word("ул.", &f, LexicalClass::Common), None);
        assert_eq!(m.inflect_word("15/2", &f, LexicalClass::Common), None);
        assert_eq!(m.inflect_word("АО", &f, LexicalClass::Toponym), None);
        assert_eq!(m.inflect_word("Кемерово", &f, LexicalClass::Toponym), None);
    }

    #[test]
    fn test_inflect_phrase_with_casing() {
        let m = SuffixMorphology;
        let f = sing(Genitive);
        assert_eq!(
            inflect(&m, "Ленинский район", &f, LexicalClass::Toponym, true),
            "Ленинского района"
        );
        assert_eq!(
            inflect(&m, "Ханты-Мансийский автономный округ", &f, LexicalClass::Toponym, true),
            "Ханты-Мансийского автономного округа"
        );
        assert_eq!(
            inflect(&m, "нижний новгород", &f, LexicalClass::Toponym, true),
            "Нижнего Новгорода"
        );
        assert_eq!(inflect(&m, "г. Москва", &f, LexicalClass::Toponym, true), "г. Москвы");
        assert_eq!(
            inflect(&m, "нижний новгород", &f, LexicalClass::Toponym, false),
            "нижнего новгорода"
        );
    }

    #[test]
    fn test_capitalize_and_adjectival() {
        assert_eq!(capitalize("москва"), "Москва");
        assert_eq!(capitalize(""), "");
        assert!(is_adjectival("Садовая"));
        assert!(is_adjectival("Невский"));
        assert!(!is_adjectival("Ленина"));
        assert!(!is_adjectival("Победы"));
    }

    #[test]
    fn test_features_display() {
        let f = features(Dative, Gender::Feminine, Number::Plural);
        assert_eq!(f.to_string(), "NOUN,datv,femn,plur");
    }
}
