//! Scoring submitted answers.

use serde::{Deserialize, Serialize};

use super::QuizQuestion;

/// One submitted answer, keyed by question text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question: String,
    pub answer: String,
}

impl Answer {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Result of grading a set of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

/// Count correct answers against `questions`.
///
/// Answers to unknown questions are ignored; a question answered more than
/// once counts once, using its first answer.
pub fn grade(questions: &[QuizQuestion], answers: &[Answer]) -> Score {
    let correct = questions
        .iter()
        .filter(|q| {
            answers
                .iter()
                .find(|a| a.question == q.question)
                .is_some_and(|a| q.is_correct(&a.answer))
        })
        .count();

    Score {
        correct,
        total: questions.len(),
    }
}
