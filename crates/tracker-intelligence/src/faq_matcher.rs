// ABOUTME: FAQ matcher answering free-text questions from a fixed corpus via TF-IDF cosine similarity
// ABOUTME: Accepts the best match when it clears max(floor, mean similarity), otherwise falls back
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: corpus sizes are small

//! # FAQ Matcher
//!
//! The corpus questions are vectorized once when the matcher is built. Queries are projected
//! into that frozen space and compared with every question; the answer of the most similar
//! question is returned if its score reaches the acceptance threshold:
//!
//! ```text
//! threshold = max(SIMILARITY_FLOOR, mean(similarities))
//! ```
//!
//! The mean moves with every query. Because the best score can never be below the mean, the
//! threshold only rejects a query when the best score is under the fixed floor.

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracker_core::constants::faq::{FALLBACK_ANSWER, SIMILARITY_FLOOR};
use tracker_core::errors::AppError;
use tracker_core::models::FaqEntry;

use crate::tfidf::{SparseVector, TfIdfVectorizer};

/// Corpus bundled with the binary
const DEFAULT_CORPUS: &str = include_str!("../data/faq.json");

/// Problems building a matcher from a corpus
#[derive(Debug, Error)]
pub enum FaqError {
    /// Corpus has no entries
    #[error("FAQ corpus is empty")]
    EmptyCorpus,
    /// An entry has a blank question or answer
    #[error("FAQ entry {index} has a blank question or answer")]
    BlankEntry {
        /// Zero-based position in the corpus
        index: usize,
    },
    /// Corpus JSON could not be parsed
    #[error("invalid FAQ corpus JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<FaqError> for AppError {
    fn from(error: FaqError) -> Self {
        Self::config(error.to_string())
    }
}

/// Outcome of matching one query
#[derive(Debug, Clone, Serialize)]
pub struct FaqMatch {
    /// Corpus answer, or the fallback text
    pub answer: String,
    /// Question that matched, if the threshold was met
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_question: Option<String>,
    /// Best cosine similarity
    pub score: f64,
    /// Threshold the best score was compared against
    pub threshold: f64,
}

impl FaqMatch {
    /// Whether a corpus answer was returned
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.matched_question.is_some()
    }
}

/// Immutable matcher over a fixed corpus
#[derive(Debug, Clone)]
pub struct FaqMatcher {
    entries: Vec<FaqEntry>,
    vectorizer: TfIdfVectorizer,
    question_vectors: Vec<SparseVector>,
}

impl FaqMatcher {
    /// Build the vector space from `entries`
    pub fn new(entries: Vec<FaqEntry>) -> Result<Self, FaqError> {
        if entries.is_empty() {
            return Err(FaqError::EmptyCorpus);
        }
        if let Some(index) = entries
            .iter()
            .position(|e| e.question.trim().is_empty() || e.answer.trim().is_empty())
        {
            return Err(FaqError::BlankEntry { index });
        }

        let questions: Vec<&str> = entries.iter().map(|e| e.question.as_str()).collect();
        let vectorizer = TfIdfVectorizer::fit(&questions);
        let question_vectors = questions.iter().map(|q| vectorizer.transform(q)).collect();

        tracing::info!(
            entries = entries.len(),
            vocabulary = vectorizer.vocabulary_size(),
            "FAQ matcher initialized"
        );

        Ok(Self {
            entries,
            vectorizer,
            question_vectors,
        })
    }

    /// Build from a JSON array of `{"question", "answer"}` objects
    pub fn from_json(json: &str) -> Result<Self, FaqError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Build from the bundled corpus
    pub fn with_default_corpus() -> Result<Self, FaqError> {
        Self::from_json(DEFAULT_CORPUS)
    }

    /// Cosine similarity of `query` against every corpus question, in corpus order
    #[must_use]
    pub fn similarities(&self, query: &str) -> Vec<f64> {
        let query_vector = self.vectorizer.transform(query);
        self.question_vectors
            .par_iter()
            .map(|v| v.dot(&query_vector))
            .collect()
    }

    /// Match `query` against the corpus
    #[must_use]
    pub fn find_match(&self, query: &str) -> FaqMatch {
        let scores = self.similarities(query);
        let (best_index, best_score) = best_of(&scores);
        let threshold = acceptance_threshold(&scores);

        if best_score >= threshold {
            let entry = &self.entries[best_index];
            tracing::debug!(score = best_score, threshold, index = best_index, "FAQ match");
            FaqMatch {
                answer: entry.answer.clone(),
                matched_question: Some(entry.question.clone()),
                score: best_score,
                threshold,
            }
        } else {
            tracing::debug!(score = best_score, threshold, "FAQ query below threshold");
            FaqMatch {
                answer: FALLBACK_ANSWER.to_owned(),
                matched_question: None,
                score: best_score,
                threshold,
            }
        }
    }

    /// Answer text for `query`
    #[must_use]
    pub fn answer(&self, query: &str) -> String {
        self.find_match(query).answer
    }

    /// Entries whose question or answer contains `term` (case-insensitive); blank returns all
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&FaqEntry> {
        let needle = term.trim().to_lowercase();
        self.entries.iter().filter(|e| e.contains(&needle)).collect()
    }

    /// The corpus in load order
    #[must_use]
    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }
}

/// Arg-max with the first index winning ties; `(0, 0.0)` for an empty slice
fn best_of(scores: &[f64]) -> (usize, f64) {
    let mut best = (0, 0.0);
    for (index, &score) in scores.iter().enumerate() {
        if index == 0 || score > best.1 {
            best = (index, score);
        }
    }
    best
}

/// `max(SIMILARITY_FLOOR, mean(scores))`
fn acceptance_threshold(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return SIMILARITY_FLOOR;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    SIMILARITY_FLOOR.max(mean)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn matcher() -> FaqMatcher {
        FaqMatcher::with_default_corpus().unwrap()
    }

    #[test]
    fn test_every_question_matches_itself() {
        let matcher = matcher();
        for entry in matcher.entries() {
            let result = matcher.find_match(&entry.question);
            assert_eq!(result.answer, entry.answer, "self-match failed for {}", entry.question);
            assert!((result.score - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_paraphrase_finds_related_answer() {
        let result = matcher().find_match("how much protein should I eat");
        assert_eq!(
            result.matched_question.as_deref(),
            Some("How much protein do I need?")
        );
    }

    #[test]
    fn test_unrelated_query_gets_fallback() {
        let result = matcher().find_match("quantum chromodynamics");
        assert!(!result.is_match());
        assert_eq!(result.answer, FALLBACK_ANSWER);
        assert!(result.score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_search_is_case_insensitive_over_answers() {
        let matcher = matcher();
        let hits = matcher.search("MIFFLIN");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].question, "What is BMR?");
        assert_eq!(matcher.search("  ").len(), matcher.entries().len());
    }

    #[test]
    fn test_rejects_empty_and_blank_corpora() {
        assert!(matches!(FaqMatcher::new(vec![]), Err(FaqError::EmptyCorpus)));
        let blank = vec![FaqEntry {
            question: "  ".into(),
            answer: "x".into(),
        }];
        assert!(matches!(
            FaqMatcher::new(blank),
            Err(FaqError::BlankEntry { index: 0 })
        ));
        assert!(matches!(FaqMatcher::from_json("{"), Err(FaqError::Parse(_))));
    }

    #[test]
    fn test_ties_resolve_to_first_entry() {
        let entries = vec![
            FaqEntry {
                question: "rest days".into(),
                answer: "first".into(),
            },
            FaqEntry {
                question: "rest days".into(),
                answer: "second".into(),
            },
        ];
        let matcher = FaqMatcher::new(entries).unwrap();
        assert_eq!(matcher.answer("rest days"), "first");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        // The per-query mean can raise the bar above the floor, but never above the best
        // score, so a match only fails when the best score is under the floor.
        #[test]
        fn prop_mean_threshold_never_exceeds_best_score(
            words in prop::collection::vec("[a-z]{2,8}", 1..8),
            pick in prop::collection::vec(0usize..16, 0..4),
        ) {
            let matcher = matcher();
            let mut query = words.join(" ");
            for i in pick {
                query.push(' ');
                query.push_str(&matcher.entries()[i % matcher.entries().len()].question);
            }

            let scores = matcher.similarities(&query);
            let (_, best) = best_of(&scores);
            let threshold = acceptance_threshold(&scores);
            let result = matcher.find_match(&query);

            prop_assert!(best + 1e-12 >= scores.iter().sum::<f64>() / scores.len() as f64);
            prop_assert_eq!(result.is_match(), best >= SIMILARITY_FLOOR);
            prop_assert!(threshold >= SIMILARITY_FLOOR);
        }
    }
}
