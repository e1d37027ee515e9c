//! # Gerador de Entidades
//!
//! Dado um tipo de entidade e os traços gramaticais detectados, produz a lista ordenada
//! de campos `(texto, categoria)` que substituirá o span original.
//!
//! ## Tipos de entidade
//!
//! | Tipo          | Campos gerados                                      |
//! |---------------|-----------------------------------------------------|
//! | `full_name`   | subconjunto não vazio de sobrenome/prenome/patronímico, embaralhado |
//! | `last_name`   | LAST_NAME                                           |
//! | `first_name`  | FIRST_NAME                                          |
//! | `middle_name` | MIDDLE_NAME                                         |
//! | `country`     | COUNTRY                                             |
//! | `region`      | REGION                                              |
//! | `city`        | CITY                                                |
//! | `district`    | DISTRICT                                            |
//! | `street`      | STREET (+ HOUSE opcional)                           |
//! | `address`     | um dos modelos de [`AddressTemplate`]               |
//!
//! Valores de vocabulário passam pela flexão com os traços detectados. Código postal,
//! número da casa e o nome de rua "cru" de alguns modelos entram sem alteração.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::category::SemanticCategory;
use crate::error::AugmentError;
use crate::morphology::{inflect, is_adjectival, GrammaticalFeatures, LexicalClass, Morphology};
use crate::tagger::ReplacementField;
use crate::vocabulary::{NamePart, VocabularyKind, VocabularyStore};

/// Tipo de entidade a gerar (conjunto fechado).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    FullName,
    LastName,
    FirstName,
    MiddleName,
    Country,
    Region,
    City,
    District,
    Street,
    Address,
}

impl EntityKind {
    /// Tipos sorteados para `PER`
    pub const PERSON: [EntityKind; 4] = [
        EntityKind::FullName,
        EntityKind::LastName,
        EntityKind::FirstName,
        EntityKind::MiddleName,
    ];

    /// Tipos sorteados para `LOC`
    pub const LOCATION: [EntityKind; 6] = [
        EntityKind::Address,
        EntityKind::Country,
        EntityKind::Region,
        EntityKind::City,
        EntityKind::District,
        EntityKind::Street,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::FullName => "full_name",
            EntityKind::LastName => "last_name",
            EntityKind::FirstName => "first_name",
            EntityKind::MiddleName => "middle_name",
            EntityKind::Country => "country",
            EntityKind::Region => "region",
            EntityKind::City => "city",
            EntityKind::District => "district",
            EntityKind::Street => "street",
            EntityKind::Address => "address",
        }
    }
}

impl FromStr for EntityKind {
    type Err = AugmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PERSON
            .iter()
            .chain(Self::LOCATION.iter())
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| AugmentError::UnknownEntityKind(s.to_string()))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Composição de campos de um endereço.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressTemplate {
    /// índice, país, região, distrito, cidade, rua, casa
    Full,
    /// cidade, rua (crua), casa, índice
    Postal,
    /// região, cidade, rua, casa
    Regional,
    /// rua (crua), casa, cidade
    Minimal,
}

impl AddressTemplate {
    pub const ALL: [AddressTemplate; 4] = [
        AddressTemplate::Full,
        AddressTemplate::Postal,
        AddressTemplate::Regional,
        AddressTemplate::Minimal,
    ];
}

const HOUSE_PREFIXES: &[&str] = &["д.", "дом", "д"];

const UNIT_PREFIXES: &[&str] = &["кв.", "оф.", "к."];

/// Prefixos de rua, iguais às âncoras de STREET
const STREET_PREFIXES: &[&str] = &["ул.", "пр.", "пер.", "наб.", "бул.", "ш.", "алл."];

/// Sorteio em uma das tabelas de prefixos acima (todas não vazias).
fn pick<'s, R: Rng + ?Sized>(items: &[&'s str], rng: &mut R) -> &'s str {
    items.choose(rng).copied().expect("tabela de prefixos não vazia")
}

/// Gerador de campos de substituição.
///
/// Só guarda referências: vocabulários e morfologia são compartilhados e imutáveis.
pub struct EntityGenerator<'a, M: Morphology + ?Sized> {
    vocab: &'a VocabularyStore,
    morph: &'a M,
}

impl<'a, M: Morphology + ?Sized> EntityGenerator<'a, M> {
    pub fn new(vocab: &'a VocabularyStore, morph: &'a M) -> Self {
        Self { vocab, morph }
    }

    /// Gera os campos de uma entidade do tipo `kind`, concordando com `features`.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        kind: EntityKind,
        features: &GrammaticalFeatures,
        rng: &mut R,
    ) -> Vec<ReplacementField> {
        match kind {
            EntityKind::FullName => self.full_name(features, rng),
            EntityKind::LastName => vec![self.name_part(NamePart::Last, features, rng)],
            EntityKind::FirstName => vec![self.name_part(NamePart::First, features, rng)],
            EntityKind::MiddleName => vec![self.name_part(NamePart::Middle, features, rng)],
            EntityKind::Country => {
                vec![self.toponym(VocabularyKind::Countries, SemanticCategory::Country, features, rng)]
            }
            EntityKind::Region => {
                vec![self.toponym(VocabularyKind::Regions, SemanticCategory::Region, features, rng)]
            }
            EntityKind::City => {
                vec![self.toponym(VocabularyKind::Cities, SemanticCategory::City, features, rng)]
            }
            EntityKind::District => vec![self.toponym(
                VocabularyKind::Districts,
                SemanticCategory::District,
                features,
                rng,
            )],
            EntityKind::Street => {
                let mut fields = vec![self.street(features, true, rng)];
                if rng.gen_bool(0.5) {
                    fields.push(house(rng));
                }
                fields
            }
            EntityKind::Address => {
                let template = *AddressTemplate::ALL.choose(rng).expect("modelos de endereço");
                trace!(?template, "modelo de endereço");
                self.address(template, features, rng)
            }
        }
    }

    fn name_part<R: Rng + ?Sized>(
        &self,
        part: NamePart,
        features: &GrammaticalFeatures,
        rng: &mut R,
    ) -> ReplacementField {
        let (class, category) = match part {
            NamePart::Last => (LexicalClass::Surname, SemanticCategory::LastName),
            NamePart::First => (LexicalClass::GivenName, SemanticCategory::FirstName),
            NamePart::Middle => (LexicalClass::Patronymic, SemanticCategory::MiddleName),
        };
        let value = self.vocab.names(part, features.gender).sample(rng);
        ReplacementField::new(inflect(self.morph, value, features, class, true), category)
    }

    /// Sobrenome, prenome e patronímico; mantém um dos 7 subconjuntos não vazios
    /// (uniforme) e embaralha a ordem.
    fn full_name<R: Rng + ?Sized>(
        &self,
        features: &GrammaticalFeatures,
        rng: &mut R,
    ) -> Vec<ReplacementField> {
        let parts = [NamePart::Last, NamePart::First, NamePart::Middle]
            .map(|part| self.name_part(part, features, rng));
        let mask = rng.gen_range(1u8..8);
        let mut fields: Vec<_> = parts
            .into_iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, field)| field)
            .collect();
        fields.shuffle(rng);
        fields
    }

    fn toponym<R: Rng + ?Sized>(
        &self,
        kind: VocabularyKind,
        category: SemanticCategory,
        features: &GrammaticalFeatures,
        rng: &mut R,
    ) -> ReplacementField {
        let value = self.vocab.get(kind).sample(rng);
        ReplacementField::new(
            inflect(self.morph, value, features, LexicalClass::Toponym, true),
            category,
        )
    }

    /// "ул. Садовой": prefixo + nome. Só nomes adjetivais concordam com o contexto.
    fn street<R: Rng + ?Sized>(
        &self,
        features: &GrammaticalFeatures,
        inflected: bool,
        rng: &mut R,
    ) -> ReplacementField {
        let prefix = pick(STREET_PREFIXES, rng);
        let name = self.vocab.get(VocabularyKind::Streets).sample(rng);
        let name = if inflected && is_adjectival(name) {
            inflect(self.morph, name, features, LexicalClass::Toponym, true)
        } else {
            name.to_string()
        };
        ReplacementField::new(format!("{prefix} {name}"), SemanticCategory::Street)
    }

    /// Cidade em uma das grafias "г. Москва", "г.Москва" ou "Москва".
    fn city_with_prefix<R: Rng + ?Sized>(
        &self,
        features: &GrammaticalFeatures,
        rng: &mut R,
    ) -> ReplacementField {
        let city =
            self.toponym(VocabularyKind::Cities, SemanticCategory::City, features, rng).text;
        let text = match rng.gen_range(0..3) {
            0 => format!("г. {city}"),
            1 => format!("г.{city}"),
            _ => city,
        };
        ReplacementField::new(text, SemanticCategory::City)
    }

    fn address<R: Rng + ?Sized>(
        &self,
        template: AddressTemplate,
        features: &GrammaticalFeatures,
        rng: &mut R,
    ) -> Vec<ReplacementField> {
        use SemanticCategory as C;
        use VocabularyKind as V;

        match template {
            AddressTemplate::Full => vec![
                postcode(rng),
                self.toponym(V::Countries, C::Country, features, rng),
                self.toponym(V::Regions, C::Region, features, rng),
                self.toponym(V::Districts, C::District, features, rng),
                self.city_with_prefix(features, rng),
                self.street(features, true, rng),
                house(rng),
            ],
            AddressTemplate::Postal => vec![
                self.city_with_prefix(features, rng),
                self.street(features, false, rng),
                house(rng),
                postcode(rng),
            ],
            AddressTemplate::Regional => vec![
                self.toponym(V::Regions, C::Region, features, rng),
                self.city_with_prefix(features, rng),
                self.street(features, true, rng),
                house(rng),
            ],
            AddressTemplate::Minimal => vec![
                self.street(features, false, rng),
                house(rng),
                self.city_with_prefix(features, rng),
            ],
        }
    }
}

/// Código postal de 6 dígitos (com zeros à esquerda), fora de entidade.
fn postcode<R: Rng + ?Sized>(rng: &mut R) -> ReplacementField {
    ReplacementField::new(format!("{:06}", rng.gen_range(0..1_000_000)), SemanticCategory::Outside)
}

/// "д. 15", "дом 7/2", "д 120 кв. 34"
fn house<R: Rng + ?Sized>(rng: &mut R) -> ReplacementField {
    let mut text = format!("{} {}", pick(HOUSE_PREFIXES, rng), rng.gen_range(1..=200));
    if rng.gen_bool(0.3) {
        text.push_str(&format!("/{}", rng.gen_range(1..=9)));
    }
    if rng.gen_bool(0.4) {
        text.push_str(&format!(" {} {}", pick(UNIT_PREFIXES, rng), rng.gen_range(1..=300)));
    }
    ReplacementField::new(text, SemanticCategory::House)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::{
        DetectedFeatures, Gender, GrammaticalCase, Number, PartOfSpeech, SuffixMorphology,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn nominative(gender: Gender) -> GrammaticalFeatures {
        GrammaticalFeatures::new(
            PartOfSpeech::Noun,
            GrammaticalCase::Nominative,
            gender,
            Number::Singular,
        )
    }

    fn categories(fields: &[ReplacementField]) -> Vec<SemanticCategory> {
        fields.iter().map(|f| f.category).collect()
    }

    /// Morfologia que marca toda palavra flexionada com `*`
    struct Marking;

    impl Morphology for Marking {
        fn analyze(&self, _word: &str) -> DetectedFeatures {
            DetectedFeatures::default()
        }

        fn inflect_word(
            &self,
            word: &str,
            _features: &GrammaticalFeatures,
            _class: LexicalClass,
        ) -> Option<String> {
            Some(format!("{word}*"))
        }
    }

    #[test]
    fn test_entity_kind_parse() {
        for kind in EntityKind::PERSON.iter().chain(EntityKind::LOCATION.iter()) {
            assert_eq!(kind.name().parse::<EntityKind>().unwrap(), *kind);
        }
        let err = "street_name".parse::<EntityKind>().unwrap_err();
        assert!(matches!(err, AugmentError::UnknownEntityKind(s) if s == "street_name"));
    }

    #[test]
    fn test_single_field_kinds() {
        let store = VocabularyStore::embedded().unwrap();
        let morph = SuffixMorphology;
        let generator = EntityGenerator::new(&store, &morph);
        let features = nominative(Gender::Masculine);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let cases = [
            (EntityKind::LastName, SemanticCategory::LastName),
            (EntityKind::FirstName, SemanticCategory::FirstName),
            (EntityKind::MiddleName, SemanticCategory::MiddleName),
            (EntityKind::Country, SemanticCategory::Country),
            (EntityKind::Region, SemanticCategory::Region),
            (EntityKind::City, SemanticCategory::City),
            (EntityKind::District, SemanticCategory::District),
        ];
        for (kind, category) in cases {
            let fields = generator.generate(kind, &features, &mut rng);
            assert_eq!(categories(&fields), vec![category], "{kind}");
            assert!(!fields[0].text.is_empty());
        }
    }

    #[test]
    fn test_names_follow_gender() {
        let store = VocabularyStore::embedded().unwrap();
        let morph = SuffixMorphology;
        let generator = EntityGenerator::new(&store, &morph);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for gender in [Gender::Masculine, Gender::Feminine] {
            let features = nominative(gender);
            for _ in 0..20 {
                let field = &generator.generate(EntityKind::MiddleName, &features, &mut rng)[0];
                assert!(store.names(NamePart::Middle, gender).contains(&field.text));
            }
        }
    }

    #[test]
    fn test_full_name_covers_every_subset() {
        let store = VocabularyStore::embedded().unwrap();
        let morph = SuffixMorphology;
        let generator = EntityGenerator::new(&store, &morph);
        let features = nominative(Gender::Feminine);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let mut seen = HashSet::new();
        for _ in 0..300 {
            let fields = generator.generate(EntityKind::FullName, &features, &mut rng);
            assert!((1..=3).contains(&fields.len()));
            let mut cats: Vec<_> = categories(&fields).iter().map(|c| c.name()).collect();
            let before = cats.len();
            cats.sort_unstable();
            cats.dedup();
            assert_eq!(cats.len(), before, "partes repetidas");
            seen.insert(cats);
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_full_name_order_is_shuffled() {
        let store = VocabularyStore::embedded().unwrap();
        let morph = SuffixMorphology;
        let generator = EntityGenerator::new(&store, &morph);
        let features = nominative(Gender::Masculine);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let orders: HashSet<_> = (0..300)
            .map(|_| generator.generate(EntityKind::FullName, &features, &mut rng))
            .filter(|fields| fields.len() == 3)
            .map(|fields| categories(&fields))
            .collect();
        assert!(orders.len() > 1);
    }

    #[test]
    fn test_street_has_prefix_and_optional_house() {
        let store = VocabularyStore::embedded().unwrap();
        let morph = SuffixMorphology;
        let generator = EntityGenerator::new(&store, &morph);
        let features = nominative(Gender::Masculine);
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let mut with_house = 0;
        for _ in 0..50 {
            let fields = generator.generate(EntityKind::Street, &features, &mut rng);
            assert_eq!(fields[0].category, SemanticCategory::Street);
            let prefix = fields[0].text.split(' ').next().unwrap();
            assert!(STREET_PREFIXES.contains(&prefix));
            assert!(SemanticCategory::Street.is_anchor(prefix));
            if fields.len() == 2 {
                assert_eq!(fields[1].category, SemanticCategory::House);
                with_house += 1;
            }
        }
        assert!(with_house > 0 && with_house < 50);
    }

    #[test]
    fn test_address_templates() {
        let store = VocabularyStore::embedded().unwrap();
        let morph = SuffixMorphology;
        let generator = EntityGenerator::new(&store, &morph);
        let features = nominative(Gender::Masculine);
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let mut lengths = HashSet::new();
        for _ in 0..100 {
            let fields = generator.generate(EntityKind::Address, &features, &mut rng);
            let cats = categories(&fields);
            assert!(cats.contains(&SemanticCategory::Street));
            assert!(cats.contains(&SemanticCategory::House));
            assert!(cats.contains(&SemanticCategory::City));
            lengths.insert(fields.len());

            for field in fields.iter().filter(|f| f.category.is_outside()) {
                assert_eq!(field.text.len(), 6);
                assert!(field.text.chars().all(|c| c.is_ascii_digit()));
            }
        }
        // 7, 4 (Postal e Regional) e 3 campos
        assert_eq!(lengths, HashSet::from([7, 4, 3]));
    }

    #[test]
    fn test_house_format() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            let field = house(&mut rng);
            let mut words = field.text.split(' ');
            assert!(HOUSE_PREFIXES.contains(&words.next().unwrap()));
            let number = words.next().unwrap();
            assert!(number.split('/').all(|n| n.parse::<u32>().is_ok()));
            if let Some(unit) = words.next() {
                assert!(UNIT_PREFIXES.contains(&unit));
                assert!(words.next().unwrap().parse::<u32>().is_ok());
            }
        }
    }

    #[test]
    fn test_inflection_applies_to_vocabulary_values_only() {
        let store = VocabularyStore::embedded().unwrap();
        let generator = EntityGenerator::new(&store, &Marking);
        let features = nominative(Gender::Masculine);
        let mut rng = ChaCha8Rng::seed_from_u64(13);

        for kind in [EntityKind::Country, EntityKind::City, EntityKind::LastName] {
            let fields = generator.generate(kind, &features, &mut rng);
            assert!(fields[0].text.ends_with('*'), "{kind}: {}", fields[0].text);
        }

        for _ in 0..40 {
            for field in generator.generate(EntityKind::Address, &features, &mut rng) {
                match field.category {
                    SemanticCategory::Outside | SemanticCategory::House => {
                        assert!(!field.text.contains('*'))
                    }
                    SemanticCategory::Country
                    | SemanticCategory::Region
                    | SemanticCategory::District
                    | SemanticCategory::City => assert!(field.text.contains('*')),
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let store = VocabularyStore::embedded().unwrap();
        let morph = SuffixMorphology;
        let generator = EntityGenerator::new(&store, &morph);
        let features = nominative(Gender::Feminine);

        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            generator.generate(EntityKind::Address, &features, &mut rng)
        };
        assert_eq!(run(77), run(77));
    }
}
