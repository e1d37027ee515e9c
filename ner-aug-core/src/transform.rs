//! # Transformação de Sentença
//!
//! Depois de substituir as entidades, a sentença inteira pode mudar de caixa ou ser
//! transliterada para o alfabeto latino. Isso gera variações de escrita que aparecem em
//! textos reais (mensagens em caixa alta, nomes em latim).
//!
//! | Caso                       | Peso | "Ул. Ленина" →  |
//! |----------------------------|------|-----------------|
//! | `orig`                     | 0.50 | `Ул. Ленина`    |
//! | `orig_lowercase`           | 0.15 | `ул. ленина`    |
//! | `orig_uppercase`           | 0.10 | `УЛ. ЛЕНИНА`    |
//! | `transliterated`           | 0.15 | `Ul. Lenina`    |
//! | `transliterated_lowercase` | 0.05 | `ul. lenina`    |
//! | `transliterated_uppercase` | 0.05 | `UL. LENINA`    |
//!
//! As tags não mudam: a transformação atua token a token e preserva o alinhamento.

use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AugmentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformationCase {
    #[serde(rename = "orig")]
    Original,
    #[serde(rename = "orig_lowercase")]
    Lowercase,
    #[serde(rename = "orig_uppercase")]
    Uppercase,
    #[serde(rename = "transliterated")]
    Transliterated,
    #[serde(rename = "transliterated_lowercase")]
    TransliteratedLowercase,
    #[serde(rename = "transliterated_uppercase")]
    TransliteratedUppercase,
}

/// Casos e pesos do sorteio (somam 1.0)
const WEIGHTED_CASES: [(TransformationCase, f64); 6] = [
    (TransformationCase::Original, 0.5),
    (TransformationCase::Lowercase, 0.15),
    (TransformationCase::Uppercase, 0.1),
    (TransformationCase::Transliterated, 0.15),
    (TransformationCase::TransliteratedLowercase, 0.05),
    (TransformationCase::TransliteratedUppercase, 0.05),
];

impl TransformationCase {
    pub const ALL: [TransformationCase; 6] = [
        TransformationCase::Original,
        TransformationCase::Lowercase,
        TransformationCase::Uppercase,
        TransformationCase::Transliterated,
        TransformationCase::TransliteratedLowercase,
        TransformationCase::TransliteratedUppercase,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TransformationCase::Original => "orig",
            TransformationCase::Lowercase => "orig_lowercase",
            TransformationCase::Uppercase => "orig_uppercase",
            TransformationCase::Transliterated => "transliterated",
            TransformationCase::TransliteratedLowercase => "transliterated_lowercase",
            TransformationCase::TransliteratedUppercase => "transliterated_uppercase",
        }
    }

    /// Sorteia um caso segundo os pesos da tabela.
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Self {
        // A tabela é constante, não vazia e só tem pesos positivos
        WEIGHTED_CASES
            .choose_weighted(rng, |(_, weight)| *weight)
            .map(|(case, _)| *case)
            .expect("tabela de pesos válida")
    }

    /// Transforma um único token.
    pub fn apply(&self, token: &str) -> String {
        match self {
            TransformationCase::Original => token.to_string(),
            TransformationCase::Lowercase => token.to_lowercase(),
            TransformationCase::Uppercase => token.to_uppercase(),
            TransformationCase::Transliterated => transliterate(token),
            TransformationCase::TransliteratedLowercase => transliterate(&token.to_lowercase()),
            TransformationCase::TransliteratedUppercase => transliterate(token).to_uppercase(),
        }
    }
}

impl FromStr for TransformationCase {
    type Err = AugmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| AugmentError::UnknownTransformation(s.to_string()))
    }
}

/// Aplica `case` a cada token, mantendo a quantidade de tokens.
pub fn transform(tokens: &[String], case: TransformationCase) -> Vec<String> {
    tokens.iter().map(|t| case.apply(t)).collect()
}

/// Romanização de uma letra cirílica minúscula (`None` se não for cirílica).
fn latin(c: char) -> Option<&'static str> {
    let s = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' => "'",
        'ы' => "y",
        'ь' => "'",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(s)
}

/// Cirílico russo → latim. Letra maiúscula vira dígrafo com só a primeira maiúscula
/// ("Щ" → "Shch"); caracteres não cirílicos passam inalterados.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let lower = c.to_lowercase().next().unwrap_or(c);
        match latin(lower) {
            Some(l) if c.is_uppercase() => {
                let mut chars = l.chars();
                if let Some(first) = chars.next() {
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                }
            }
            Some(l) => out.push_str(l),
            None => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample() -> Vec<String> {
        "Задача NLP - извлечение именованных сущностей (NER)"
            .split(' ')
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_case_changes() {
        assert_eq!(transform(&sample(), TransformationCase::Original), sample());
        assert_eq!(
            transform(&sample(), TransformationCase::Lowercase),
            vec!["задача", "nlp", "-", "извлечение", "именованных", "сущностей", "(ner)"]
        );
        assert_eq!(
            transform(&sample(), TransformationCase::Uppercase),
            vec!["ЗАДАЧА", "NLP", "-", "ИЗВЛЕЧЕНИЕ", "ИМЕНОВАННЫХ", "СУЩНОСТЕЙ", "(NER)"]
        );
    }

    #[test]
    fn test_transliteration() {
        assert_eq!(
            transform(&sample(), TransformationCase::Transliterated),
            vec!["Zadacha", "NLP", "-", "izvlechenie", "imenovannykh", "sushchnostey", "(NER)"]
        );
        assert_eq!(transliterate("Щукин"), "Shchukin");
        assert_eq!(transliterate("ул. Льва Толстого"), "ul. L'va Tolstogo");
        assert_eq!(transliterate("Москва-2024"), "Moskva-2024");
    }

    #[test]
    fn test_transliterated_case_variants() {
        let tokens = vec!["Жуков".to_string()];
        assert_eq!(transform(&tokens, TransformationCase::TransliteratedLowercase), vec!["zhukov"]);
        assert_eq!(transform(&tokens, TransformationCase::TransliteratedUppercase), vec!["ZHUKOV"]);
    }

    #[test]
    fn test_parse_names() {
        for case in TransformationCase::ALL {
            assert_eq!(case.name().parse::<TransformationCase>().unwrap(), case);
        }
        assert!("reversed".parse::<TransformationCase>().is_err());
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = WEIGHTED_CASES.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_choose_follows_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let n = 10_000;
        let original = (0..n)
            .filter(|_| TransformationCase::choose(&mut rng) == TransformationCase::Original)
            .count();
        let share = original as f64 / n as f64;
        assert!((0.45..0.55).contains(&share), "share = {share}");
    }

    #[test]
    fn test_choose_reaches_every_case() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let seen: std::collections::HashSet<_> =
            (0..2_000).map(|_| TransformationCase::choose(&mut rng)).collect();
        assert_eq!(seen.len(), TransformationCase::ALL.len());
    }
}
