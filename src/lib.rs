//! Workspace umbrella crate for SimHash cohorting.
//!
//! This crate stitches together the text hashers from `textsim` and the
//! random-projection hasher from `projection` so callers can assign cohort
//! identifiers to documents through a single API entry point:
//!
//! - [`text_cohort`] hashes one document with the token-majority SimHash,
//!   optionally truncated to a coarser prefix.
//! - [`CohortPipeline`] vectorizes a corpus into sparse term rows and hashes
//!   each row against random hyperplanes.
//!
//! A process-wide [`PipelineMetrics`] observer can be installed with
//! [`set_pipeline_metrics`] to receive per-stage latencies and outcomes.

pub mod config;
mod pipeline;
mod vectorize;

pub use projection::{
    CsrMatrix, FeatureMatrix, MAX_PROJECTION_BITS, ProjectionConfig, ProjectionError,
    ProjectionSimHash,
};
pub use textsim::{
    BuiltinTokenizer, DIGEST_BITS, Fingerprint, NormalizingTokenizer, SimHash, SpaceTokenizer,
    TEXT_SIMHASH_ALGORITHM, TextSimHashConfig, TextSimHashError, Tokenizer, TruncatedSimHash,
    WhitespaceTokenizer, bit_consensus, clip_digest, hamming_distance, to_padded_hex,
};

pub use crate::config::{CohortConfig, ConfigLoadError};
pub use crate::pipeline::CohortPipeline;
pub use crate::vectorize::{BinaryCountVectorizer, VectorizeError, VectorizerConfig};

use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use tracing::{info, info_span, warn};

/// Errors that can occur while assigning cohorts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Text(TextSimHashError),
    Vectorize(VectorizeError),
    Projection(ProjectionError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Text(err) => write!(f, "text simhash failed: {err}"),
            PipelineError::Vectorize(err) => write!(f, "vectorization failed: {err}"),
            PipelineError::Projection(err) => write!(f, "projection simhash failed: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Text(err) => Some(err),
            PipelineError::Vectorize(err) => Some(err),
            PipelineError::Projection(err) => Some(err),
        }
    }
}

impl From<TextSimHashError> for PipelineError {
    fn from(value: TextSimHashError) -> Self {
        PipelineError::Text(value)
    }
}

impl From<VectorizeError> for PipelineError {
    fn from(value: VectorizeError) -> Self {
        PipelineError::Vectorize(value)
    }
}

impl From<ProjectionError> for PipelineError {
    fn from(value: ProjectionError) -> Self {
        PipelineError::Projection(value)
    }
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_text_hash(&self, latency: Duration, result: Result<(), TextSimHashError>);
    fn record_vectorize(&self, latency: Duration, result: Result<(), VectorizeError>);
    fn record_projection(&self, latency: Duration, result: Result<(), ProjectionError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

pub(crate) struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    pub(crate) fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    pub(crate) fn record_text_hash(self, result: Result<(), TextSimHashError>) {
        self.recorder.record_text_hash(self.start.elapsed(), result);
    }

    pub(crate) fn record_vectorize(self, result: Result<(), VectorizeError>) {
        self.recorder.record_vectorize(self.start.elapsed(), result);
    }

    pub(crate) fn record_projection(self, result: Result<(), ProjectionError>) {
        self.recorder
            .record_projection(self.start.elapsed(), result);
    }
}

/// Hash one document with the default space tokenizer.
///
/// When `cfg.bits_to_keep` is set the result is the truncated (sorting)
/// SimHash and the fingerprint width is `bits_to_keep`.
pub fn text_cohort(document: &str, cfg: &TextSimHashConfig) -> Result<Fingerprint, PipelineError> {
    text_cohort_with_tokenizer(document, cfg, SpaceTokenizer)
}

/// Hash one document with an explicit tokenizer.
pub fn text_cohort_with_tokenizer<T: Tokenizer>(
    document: &str,
    cfg: &TextSimHashConfig,
    tokenizer: T,
) -> Result<Fingerprint, PipelineError> {
    let span = info_span!(
        "simcohort.text_cohort",
        n_bits = cfg.n_bits,
        bits_to_keep = cfg.output_bits()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let mut metrics = MetricsSpan::start();
    let result = TruncatedSimHash::from_config(cfg, tokenizer)
        .and_then(|hasher| hasher.hash_int(document));

    match result {
        Ok(value) => {
            if let Some(span) = metrics.take() {
                span.record_text_hash(Ok(()));
            }
            let fingerprint = Fingerprint::new(value, cfg.output_bits());
            info!(
                cohort = %fingerprint.to_hex(),
                elapsed_micros = start.elapsed().as_micros() as u64,
                "text_cohort_success"
            );
            Ok(fingerprint)
        }
        Err(err) => {
            if let Some(span) = metrics.take() {
                span.record_text_hash(Err(err.clone()));
            }
            warn!(
                error = %err,
                elapsed_micros = start.elapsed().as_micros() as u64,
                "text_cohort_failure"
            );
            Err(PipelineError::Text(err))
        }
    }
}

/// Hash a batch of documents, on the rayon pool when `cfg.use_parallel`.
///
/// Fails on the first document that yields no tokens.
pub fn text_cohorts<S, T>(
    documents: &[S],
    cfg: &TextSimHashConfig,
    tokenizer: T,
) -> Result<Vec<Fingerprint>, PipelineError>
where
    S: AsRef<str> + Sync,
    T: Tokenizer,
{
    let span = info_span!(
        "simcohort.text_cohorts",
        documents = documents.len(),
        n_bits = cfg.n_bits
    );
    let _guard = span.enter();
    let start = Instant::now();

    let mut metrics = MetricsSpan::start();
    let result = TruncatedSimHash::from_config(cfg, tokenizer)
        .and_then(|hasher| hasher.hash_batch(documents));

    match result {
        Ok(values) => {
            if let Some(span) = metrics.take() {
                span.record_text_hash(Ok(()));
            }
            info!(
                documents = values.len(),
                elapsed_micros = start.elapsed().as_micros() as u64,
                "text_cohorts_success"
            );
            let bits = cfg.output_bits();
            Ok(values
                .into_iter()
                .map(|value| Fingerprint::new(value, bits))
                .collect())
        }
        Err(err) => {
            if let Some(span) = metrics.take() {
                span.record_text_hash(Err(err.clone()));
            }
            warn!(error = %err, "text_cohorts_failure");
            Err(PipelineError::Text(err))
        }
    }
}
