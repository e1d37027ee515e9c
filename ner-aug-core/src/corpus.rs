//! # Corpus de Demonstração em Russo com Anotações BIO
//!
//! Pequeno conjunto de sentenças anotadas com `PER`, `LOC` e `ORG`, usado pela demo web
//! e pelos testes do aumentador. As entidades aparecem em vários casos gramaticais
//! ("в Москве", "с Ивановым") para exercitar a concordância.

use serde::Serialize;

use crate::augmentor::NerRow;

/// Uma sentença anotada no formato BIO
pub struct AnnotatedSentence {
    pub text: &'static str,
    /// Domínio temático
    pub domain: &'static str,
    /// Pares (palavra, tag_BIO)
    pub annotations: &'static [(&'static str, &'static str)],
}

/// Sentença de demonstração como é servida pela demo web
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoSentence {
    pub text: &'static str,
    pub domain: &'static str,
    pub row: NerRow,
}

impl AnnotatedSentence {
    pub fn to_row(&self) -> NerRow {
        NerRow::new(self.annotations.iter().copied())
    }

    pub fn to_demo(&self) -> DemoSentence {
        DemoSentence {
            text: self.text,
            domain: self.domain,
            row: self.to_row(),
        }
    }
}

/// Retorna o corpus completo
pub fn get_corpus() -> Vec<AnnotatedSentence> {
    vec![
        // ===== NOTÍCIAS =====
        AnnotatedSentence {
            text: "Вчера Сергей Петров прилетел в Москву из Новосибирска.",
            domain: "notícias",
            annotations: &[
                ("Вчера", "O"), ("Сергей", "B-PER"), ("Петров", "I-PER"), ("прилетел", "O"),
                ("в", "O"), ("Москву", "B-LOC"), ("из", "O"), ("Новосибирска", "B-LOC"), (".", "O"),
            ],
        },
        AnnotatedSentence {
            text: "Губернатор Свердловской области встретился с Анной Ивановой.",
            domain: "notícias",
            annotations: &[
                ("Губернатор", "O"), ("Свердловской", "B-LOC"), ("области", "I-LOC"),
                ("встретился", "O"), ("с", "O"), ("Анной", "B-PER"), ("Ивановой", "I-PER"), (".", "O"),
            ],
        },
        AnnotatedSentence {
            text: "Компания Газпром открыла офис в Казани.",
            domain: "economia",
            annotations: &[
                ("Компания", "O"), ("Газпром", "B-ORG"), ("открыла", "O"), ("офис", "O"),
                ("в", "O"), ("Казани", "B-LOC"), (".", "O"),
            ],
        },
        // ===== ENDEREÇOS =====
        AnnotatedSentence {
            text: "Посылку отправили на улицу Ленина в Екатеринбурге.",
            domain: "endereços",
            annotations: &[
                ("Посылку", "O"), ("отправили", "O"), ("на", "O"), ("улицу", "B-LOC"),
                ("Ленина", "I-LOC"), ("в", "O"), ("Екатеринбурге", "B-LOC"), (".", "O"),
            ],
        },
        AnnotatedSentence {
            text: "Офис находится в Ленинском районе Самары.",
            domain: "endereços",
            annotations: &[
                ("Офис", "O"), ("находится", "O"), ("в", "O"), ("Ленинском", "B-LOC"),
                ("районе", "I-LOC"), ("Самары", "B-LOC"), (".", "O"),
            ],
        },
        // ===== CULTURA =====
        AnnotatedSentence {
            text: "Роман Льва Толстого издали в Санкт-Петербурге.",
            domain: "cultura",
            annotations: &[
                ("Роман", "O"), ("Льва", "B-PER"), ("Толстого", "I-PER"), ("издали", "O"),
                ("в", "O"), ("Санкт-Петербурге", "B-LOC"), (".", "O"),
            ],
        },
        AnnotatedSentence {
            text: "Мария Сергеевна Кузнецова преподаёт в университете Томска.",
            domain: "educação",
            annotations: &[
                ("Мария", "B-PER"), ("Сергеевна", "I-PER"), ("Кузнецова", "I-PER"),
                ("преподаёт", "O"), ("в", "O"), ("университете", "O"), ("Томска", "B-LOC"), (".", "O"),
            ],
        },
        // ===== ESPORTES =====
        AnnotatedSentence {
            text: "Сборная России сыграет с Германией в Сочи.",
            domain: "esportes",
            annotations: &[
                ("Сборная", "O"), ("России", "B-LOC"), ("сыграет", "O"), ("с", "O"),
                ("Германией", "B-LOC"), ("в", "O"), ("Сочи", "B-LOC"), (".", "O"),
            ],
        },
        AnnotatedSentence {
            text: "Тренер Дмитрий Смирнов поблагодарил болельщиков Краснодарского края.",
            domain: "esportes",
            annotations: &[
                ("Тренер", "O"), ("Дмитрий", "B-PER"), ("Смирнов", "I-PER"), ("поблагодарил", "O"),
                ("болельщиков", "O"), ("Краснодарского", "B-LOC"), ("края", "I-LOC"), (".", "O"),
            ],
        },
        // ===== SEM ENTIDADES =====
        AnnotatedSentence {
            text: "Погода сегодня хорошая.",
            domain: "geral",
            annotations: &[("Погода", "O"), ("сегодня", "O"), ("хорошая", "O"), (".", "O")],
        },
    ]
}

/// O corpus como linhas prontas para [`crate::NerAugmentor::augment_rows`].
pub fn demo_rows() -> Vec<NerRow> {
    get_corpus().iter().map(AnnotatedSentence::to_row).collect()
}

/// O corpus com texto e domínio de cada sentença.
pub fn demo_sentences() -> Vec<DemoSentence> {
    get_corpus().iter().map(AnnotatedSentence::to_demo).collect()
}
