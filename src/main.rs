use std::error::Error;
use std::io::{self, BufRead, Write};

use simcohort::{CohortConfig, CohortPipeline, text_cohorts};
use tracing_subscriber::EnvFilter;

/// Reads one document per line from stdin and prints, tab separated, the
/// padded text SimHash cohort, the projection cohort and the document.
///
/// An optional first argument names a YAML config file.
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => CohortConfig::from_file(path)?,
        None => CohortConfig::default(),
    };

    let documents = io::stdin()
        .lock()
        .lines()
        .collect::<Result<Vec<String>, _>>()?;
    if documents.is_empty() {
        return Ok(());
    }

    let text = text_cohorts(
        &documents,
        &config.text.to_text_config(),
        config.text.tokenizer,
    )?;
    let mut pipeline = CohortPipeline::from_config(&config)?;
    let projected = pipeline.fit_transform(&documents)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for ((fingerprint, cohort), document) in text.iter().zip(&projected).zip(&documents) {
        writeln!(
            out,
            "{}\t{}\t{}",
            fingerprint.to_padded_hex(),
            cohort,
            document
        )?;
    }
    Ok(())
}
