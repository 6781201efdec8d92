//! Vectorizer → projection-hash chain over raw documents.

use std::time::Instant;

use tracing::{info, info_span, warn};

use crate::config::CohortConfig;
use crate::{
    BinaryCountVectorizer, BuiltinTokenizer, CsrMatrix, MetricsSpan, PipelineError,
    ProjectionSimHash, Tokenizer, VectorizeError,
};

/// Assigns projection-SimHash cohorts to documents.
///
/// `fit` learns the vocabulary and draws the hyperplane basis for its
/// dimension. `transform` then maps each document to a `0x`-prefixed hex
/// cohort. Terms outside the fitted vocabulary do not affect the hash.
#[derive(Debug, Clone)]
pub struct CohortPipeline<T = BuiltinTokenizer> {
    vectorizer: BinaryCountVectorizer<T>,
    hasher: ProjectionSimHash,
}

impl CohortPipeline<BuiltinTokenizer> {
    /// Build an unfitted pipeline from a loaded configuration file.
    pub fn from_config(config: &CohortConfig) -> Result<Self, PipelineError> {
        let vectorizer = BinaryCountVectorizer::with_tokenizer(
            config.vectorizer.to_vectorizer_config(),
            config.vectorizer.tokenizer,
        );
        let hasher = ProjectionSimHash::from_config(config.projection.to_projection_config())?;
        Ok(Self::new(vectorizer, hasher))
    }
}

impl<T: Tokenizer> CohortPipeline<T> {
    pub fn new(vectorizer: BinaryCountVectorizer<T>, hasher: ProjectionSimHash) -> Self {
        Self { vectorizer, hasher }
    }

    pub fn vectorizer(&self) -> &BinaryCountVectorizer<T> {
        &self.vectorizer
    }

    pub fn hasher(&self) -> &ProjectionSimHash {
        &self.hasher
    }

    pub fn is_fitted(&self) -> bool {
        self.vectorizer.vocabulary().is_some() && self.hasher.is_fitted()
    }

    /// Learn the vocabulary of `documents` and fit the hasher to its size.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<&mut Self, PipelineError> {
        let span = info_span!("simcohort.pipeline_fit", documents = documents.len());
        let _guard = span.enter();
        let start = Instant::now();

        let features = self.vectorize(|v| v.fit_transform(documents))?;

        let mut metrics = MetricsSpan::start();
        match self.hasher.fit(&features) {
            Ok(_) => {
                if let Some(span) = metrics.take() {
                    span.record_projection(Ok(()));
                }
            }
            Err(err) => {
                if let Some(span) = metrics.take() {
                    span.record_projection(Err(err.clone()));
                }
                warn!(error = %err, "pipeline_fit_failure");
                return Err(PipelineError::Projection(err));
            }
        }

        info!(
            vocabulary = features.n_cols(),
            elapsed_micros = start.elapsed().as_micros() as u64,
            "pipeline_fit_success"
        );
        Ok(self)
    }

    /// Integer cohorts for `documents`, one per document.
    pub fn transform_int<S: AsRef<str>>(
        &self,
        documents: &[S],
    ) -> Result<Vec<u128>, PipelineError> {
        let span = info_span!("simcohort.pipeline_transform", documents = documents.len());
        let _guard = span.enter();
        let start = Instant::now();

        let features = self.vectorize_ref(|v| v.transform(documents))?;

        let mut metrics = MetricsSpan::start();
        match self.hasher.transform_int(&features) {
            Ok(hashes) => {
                if let Some(span) = metrics.take() {
                    span.record_projection(Ok(()));
                }
                info!(
                    documents = hashes.len(),
                    elapsed_micros = start.elapsed().as_micros() as u64,
                    "pipeline_transform_success"
                );
                Ok(hashes)
            }
            Err(err) => {
                if let Some(span) = metrics.take() {
                    span.record_projection(Err(err.clone()));
                }
                warn!(error = %err, "pipeline_transform_failure");
                Err(PipelineError::Projection(err))
            }
        }
    }

    /// Hex cohorts for `documents`, formatted like the projection hasher's.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vec<String>, PipelineError> {
        Ok(self
            .transform_int(documents)?
            .into_iter()
            .map(|h| format!("{h:#x}"))
            .collect())
    }

    pub fn fit_transform<S: AsRef<str>>(
        &mut self,
        documents: &[S],
    ) -> Result<Vec<String>, PipelineError> {
        self.fit(documents)?;
        self.transform(documents)
    }

    fn vectorize<F>(&mut self, op: F) -> Result<CsrMatrix, PipelineError>
    where
        F: FnOnce(&mut BinaryCountVectorizer<T>) -> Result<CsrMatrix, VectorizeError>,
    {
        let metrics = MetricsSpan::start();
        record_vectorize(metrics, op(&mut self.vectorizer))
    }

    fn vectorize_ref<F>(&self, op: F) -> Result<CsrMatrix, PipelineError>
    where
        F: FnOnce(&BinaryCountVectorizer<T>) -> Result<CsrMatrix, VectorizeError>,
    {
        let metrics = MetricsSpan::start();
        record_vectorize(metrics, op(&self.vectorizer))
    }
}

fn record_vectorize(
    metrics: Option<MetricsSpan>,
    result: Result<CsrMatrix, VectorizeError>,
) -> Result<CsrMatrix, PipelineError> {
    match result {
        Ok(features) => {
            if let Some(span) = metrics {
                span.record_vectorize(Ok(()));
            }
            Ok(features)
        }
        Err(err) => {
            if let Some(span) = metrics {
                span.record_vectorize(Err(err.clone()));
            }
            warn!(error = %err, "vectorize_failure");
            Err(PipelineError::Vectorize(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProjectionConfig, ProjectionError, VectorizerConfig};

    fn pipeline(n_bits: u32, seed: u64) -> CohortPipeline {
        CohortPipeline::new(
            BinaryCountVectorizer::new(VectorizerConfig::default()),
            ProjectionSimHash::from_config(
                ProjectionConfig::new().with_n_bits(n_bits).with_seed(seed),
            )
            .unwrap(),
        )
    }

    #[test]
    fn fit_transform_yields_one_prefixed_cohort_per_document() {
        let docs = ["red green blue", "green blue", "cyan magenta"];
        let mut p = pipeline(16, 3);
        let cohorts = p.fit_transform(&docs).unwrap();

        assert!(p.is_fitted());
        assert_eq!(p.hasher().dimension(), Some(5));
        assert_eq!(cohorts.len(), 3);
        for c in &cohorts {
            assert!(c.starts_with("0x"), "{c}");
            assert!(u128::from_str_radix(&c[2..], 16).unwrap() < 1 << 16);
        }
    }

    #[test]
    fn identical_documents_share_cohort() {
        let mut p = pipeline(32, 9);
        let cohorts = p.fit_transform(&["x y z", "q r", "X Y Z"]).unwrap();
        assert_eq!(cohorts[0], cohorts[2]);
    }

    #[test]
    fn unseen_terms_do_not_change_cohort() {
        let mut p = pipeline(32, 4);
        p.fit(&["alpha beta", "gamma"]).unwrap();
        let a = p.transform(&["alpha beta"]).unwrap();
        let b = p.transform(&["alpha beta omega"]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn document_without_known_terms_hashes_to_zero() {
        let mut p = pipeline(8, 1);
        p.fit(&["alpha"]).unwrap();
        assert_eq!(p.transform(&["nothing known"]).unwrap(), vec!["0x0"]);
    }

    #[test]
    fn transform_before_fit_fails() {
        let p = pipeline(8, 1);
        assert_eq!(
            p.transform(&["a"]).unwrap_err(),
            PipelineError::Vectorize(VectorizeError::NotFitted)
        );
    }

    #[test]
    fn empty_corpus_fails_to_fit() {
        let mut p = pipeline(8, 1);
        assert_eq!(
            p.fit(&["", "   "]).unwrap_err(),
            PipelineError::Vectorize(VectorizeError::EmptyVocabulary)
        );
        assert!(!p.is_fitted());
    }

    #[test]
    fn from_config_rejects_invalid_projection_width() {
        let mut config = CohortConfig::default();
        config.projection.n_bits = 0;
        assert_eq!(
            CohortPipeline::from_config(&config).unwrap_err(),
            PipelineError::Projection(ProjectionError::InvalidBits { n_bits: 0 })
        );
    }
}
