// ABOUTME: FAQ corpus entry model
// ABOUTME: Question/answer pair loaded once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// One question and its canned answer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FaqEntry {
    /// Question text, vectorized by the matcher
    pub question: String,
    /// Answer returned when the question matches
    pub answer: String,
}

impl FaqEntry {
    /// Case-insensitive substring match against question or answer
    #[must_use]
    pub fn contains(&self, needle_lowercase: &str) -> bool {
        self.question.to_lowercase().contains(needle_lowercase)
            || self.answer.to_lowercase().contains(needle_lowercase)
    }
}
