//! Quiz question record.

use serde::{Deserialize, Serialize};

/// A single multiple-choice question.
///
/// `correct_answer` is expected to be one of `options`; this is upheld by
/// whoever builds the record and is not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    pub fn new<I, S>(
        question: impl Into<String>,
        options: I,
        correct_answer: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer: correct_answer.into(),
        }
    }

    /// Whether `answer` matches the correct answer exactly.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }

    /// Whether the correct answer is among the options.
    pub fn is_well_formed(&self) -> bool {
        self.options.iter().any(|o| *o == self.correct_answer)
    }
}
