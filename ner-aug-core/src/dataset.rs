//! # Arquivos de Linhas Anotadas (JSON Lines)
//!
//! Formato de entrada e saída do processamento em lote fora do servidor: um [`NerRow`]
//! por linha do arquivo.
//!
//! ```text
//! {"tokens":["Вчера","Иванов","прилетел"],"ner_tags":["O","B-PER","O"]}
//! ```
//!
//! Linhas em branco são ignoradas na leitura.

use std::path::Path;

use crate::augmentor::NerRow;
use crate::error::{AugmentError, Result};

/// Lê as linhas de um texto JSON Lines.
///
/// O número reportado em [`AugmentError::MalformedRow`] conta a partir de 1 e inclui
/// as linhas em branco, como num editor.
pub fn parse_rows(text: &str) -> Result<Vec<NerRow>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| AugmentError::MalformedRow {
                line: i + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Serializa as linhas, uma por linha, com `\n` no final.
pub fn to_json_lines(rows: &[NerRow]) -> Result<String> {
    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        let json = serde_json::to_string(row).map_err(|e| AugmentError::MalformedRow {
            line: i + 1,
            message: e.to_string(),
        })?;
        out.push_str(&json);
        out.push('\n');
    }
    Ok(out)
}

pub fn read_rows_file(path: impl AsRef<Path>) -> Result<Vec<NerRow>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| AugmentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rows(&text)
}

pub fn write_rows_file(path: impl AsRef<Path>, rows: &[NerRow]) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_json_lines(rows)?).map_err(|source| AugmentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::demo_rows;

    #[test]
    fn test_parse_rows_skips_blank_lines() {
        let text = "{\"tokens\":[\"в\",\"Москве\"],\"ner_tags\":[\"O\",\"B-LOC\"]}\n\n  \n\
                    {\"tokens\":[\"Иванов\"],\"ner_tags\":[\"B-PER\"]}\n";
        let rows = parse_rows(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], NerRow::new([("в", "O"), ("Москве", "B-LOC")]));
        assert_eq!(rows[1].ner_tags, vec!["B-PER"]);
    }

    #[test]
    fn test_parse_rows_reports_line_number() {
        let text = "{\"tokens\":[],\"ner_tags\":[]}\n\n{\"tokens\":[\"x\"]}\n";
        let err = parse_rows(text).unwrap_err();
        assert!(matches!(err, AugmentError::MalformedRow { line: 3, .. }), "{err}");
    }

    #[test]
    fn test_json_lines_layout() {
        let out = to_json_lines(&demo_rows()).unwrap();
        assert_eq!(out.lines().count(), demo_rows().len());
        assert!(out.ends_with('\n'));
        assert!(out.lines().all(|l| l.starts_with("{\"tokens\":")));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("ner-aug-rows-{}.jsonl", std::process::id()));
        let rows = demo_rows();
        write_rows_file(&path, &rows).unwrap();
        assert_eq!(read_rows_file(&path).unwrap(), rows);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_rows_file("/nao/existe/linhas.jsonl").unwrap_err();
        assert!(matches!(err, AugmentError::Io { .. }));
    }
}
