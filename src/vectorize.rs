//! Bag-of-words vectorizer feeding the projection hasher.
//!
//! Learns a sorted vocabulary from a corpus and turns documents into sparse
//! count (or presence) rows. Terms unseen at fit time are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BuiltinTokenizer, CsrMatrix, ProjectionError, Tokenizer};

/// Vectorizer options.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct VectorizerConfig {
    /// Emit 1 for present terms instead of their counts.
    pub binary: bool,
    /// Lowercase tokens before vocabulary lookup.
    pub lowercase: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            binary: true,
            lowercase: true,
        }
    }
}

/// Errors raised by [`BinaryCountVectorizer`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VectorizeError {
    #[error("vectorizer has not been fitted")]
    NotFitted,
    #[error("empty vocabulary; documents produced no tokens")]
    EmptyVocabulary,
    #[error("failed to build feature matrix: {0}")]
    Matrix(#[from] ProjectionError),
}

/// Term-count vectorizer over a pluggable tokenizer.
#[derive(Debug, Clone)]
pub struct BinaryCountVectorizer<T = BuiltinTokenizer> {
    config: VectorizerConfig,
    tokenizer: T,
    vocabulary: Option<BTreeMap<String, usize>>,
}

impl BinaryCountVectorizer<BuiltinTokenizer> {
    /// Whitespace-tokenizing vectorizer.
    pub fn new(config: VectorizerConfig) -> Self {
        Self::with_tokenizer(config, BuiltinTokenizer::Whitespace)
    }
}

impl<T: Tokenizer> BinaryCountVectorizer<T> {
    pub fn with_tokenizer(config: VectorizerConfig, tokenizer: T) -> Self {
        Self {
            config,
            tokenizer,
            vocabulary: None,
        }
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// Term → column mapping, in sorted term order.
    pub fn vocabulary(&self) -> Option<&BTreeMap<String, usize>> {
        self.vocabulary.as_ref()
    }

    fn terms(&self, document: &str) -> Vec<String> {
        self.tokenizer
            .tokenize(document)
            .into_iter()
            .map(|t| {
                if self.config.lowercase {
                    t.to_lowercase()
                } else {
                    t.into_owned()
                }
            })
            .collect()
    }

    /// Learn the vocabulary of `documents`, replacing any previous one.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<&mut Self, VectorizeError> {
        let mut vocabulary: BTreeMap<String, usize> = BTreeMap::new();
        for document in documents {
            for term in self.terms(document.as_ref()) {
                vocabulary.entry(term).or_insert(0);
            }
        }
        if vocabulary.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }
        for (column, index) in vocabulary.values_mut().enumerate() {
            *index = column;
        }
        self.vocabulary = Some(vocabulary);
        Ok(self)
    }

    /// One sparse row per document, with one column per vocabulary term.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<CsrMatrix, VectorizeError> {
        let vocabulary = self.vocabulary.as_ref().ok_or(VectorizeError::NotFitted)?;

        let rows = documents
            .iter()
            .map(|document| {
                let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
                for term in self.terms(document.as_ref()) {
                    if let Some(&column) = vocabulary.get(&term) {
                        *counts.entry(column).or_insert(0.0) += 1.0;
                    }
                }
                counts
                    .into_iter()
                    .map(|(column, count)| {
                        let value = if self.config.binary { 1.0 } else { count };
                        (column, value)
                    })
                    .collect()
            })
            .collect();

        Ok(CsrMatrix::from_rows(vocabulary.len(), rows)?)
    }

    pub fn fit_transform<S: AsRef<str>>(
        &mut self,
        documents: &[S],
    ) -> Result<CsrMatrix, VectorizeError> {
        self.fit(documents)?;
        self.transform(documents)
    }
}
