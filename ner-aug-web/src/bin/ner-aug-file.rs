//! Aumentação em lote de um arquivo JSON Lines, sem o servidor
//!
//! ```text
//! ner-aug-file amostras.jsonl aumentadas.jsonl --passes 3
//! ```
//!
//! Todas as passadas usam um único gerador semeado pela configuração: a mesma
//! configuração reproduz o mesmo arquivo, e passadas diferentes não se repetem.

use std::path::PathBuf;

use clap::Parser;
use ner_aug_core::{dataset, AugmentorConfig, NerAugmentor};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ner-aug-file")]
#[command(about = "Aumenta linhas {tokens, ner_tags} de um arquivo JSON Lines")]
#[command(version)]
struct Args {
    /// Arquivo de entrada, uma linha anotada por linha
    input: PathBuf,

    /// Arquivo de saída
    output: PathBuf,

    /// Configuração TOML do aumentador
    #[arg(long, env = "NER_AUG_CONFIG")]
    config: Option<PathBuf>,

    /// Quantas vezes a entrada inteira é aumentada
    #[arg(long, default_value_t = 1)]
    passes: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => AugmentorConfig::from_file(path)?,
        None => AugmentorConfig::default(),
    };
    let mut rng = config.rng();
    let augmentor = NerAugmentor::new(config)?;

    let rows = dataset::read_rows_file(&args.input)?;
    info!(input = %args.input.display(), rows = rows.len(), "linhas carregadas");

    let mut augmented = Vec::with_capacity(rows.len() * args.passes);
    for pass in 0..args.passes {
        let out = augmentor.augment_rows(&rows, &mut rng)?;
        info!(pass, rows = out.len(), "passada concluída");
        augmented.extend(out);
    }

    dataset::write_rows_file(&args.output, &augmented)?;
    info!(output = %args.output.display(), rows = augmented.len(), "arquivo escrito");
    Ok(())
}
