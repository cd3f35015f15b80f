// ABOUTME: TF-IDF vector space with smoothed inverse document frequency and L2 normalization
// ABOUTME: Vocabulary is fixed at construction; later texts are projected, never added
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: document counts are small

use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

/// Tokens are runs of two or more word characters
/// Stored as Option so a compile failure degrades to whitespace splitting instead of panicking
static TOKEN_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").ok());

/// Lowercase `text` and split it into terms
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN.as_ref().map_or_else(
        || {
            lowered
                .split(|c: char| !c.is_alphanumeric() && c != '_')
                .filter(|t| t.chars().count() >= 2)
                .map(str::to_owned)
                .collect()
        },
        |re| re.find_iter(&lowered).map(|m| m.as_str().to_owned()).collect(),
    )
}

/// Sparse L2-normalized vector keyed by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: BTreeMap<usize, f64>,
}

impl SparseVector {
    /// Dot product; equals cosine similarity when both vectors are normalized
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        let (small, large) = if self.entries.len() <= other.entries.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .entries
            .iter()
            .filter_map(|(k, v)| large.entries.get(k).map(|w| v * w))
            .sum()
    }

    /// Whether no known term was present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Euclidean norm
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.entries.values().map(|v| v * v).sum::<f64>().sqrt()
    }
}

/// Vocabulary and IDF weights learned from a fixed document set
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Learn vocabulary and `idf(t) = ln((1 + n) / (1 + df(t))) + 1` from `documents`
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for document in documents {
            let mut seen: Vec<usize> = tokenize(document.as_ref())
                .into_iter()
                .map(|term| {
                    let next = vocabulary.len();
                    *vocabulary.entry(term).or_insert(next)
                })
                .collect();
            seen.sort_unstable();
            seen.dedup();
            for index in seen {
                if index >= document_frequency.len() {
                    document_frequency.resize(index + 1, 0);
                }
                document_frequency[index] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|df| ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        Self { vocabulary, idf }
    }

    /// Project `text` into the learned space; unknown terms are dropped
    #[must_use]
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut entries: BTreeMap<usize, f64> = BTreeMap::new();
        for term in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *entries.entry(index).or_insert(0.0) += 1.0;
            }
        }
        for (index, value) in &mut entries {
            *value *= self.idf[*index];
        }

        let norm = entries.values().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in entries.values_mut() {
                *value /= norm;
            }
        }
        SparseVector { entries }
    }

    /// Number of distinct terms
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}
