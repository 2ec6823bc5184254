//! Quiz dataset.
//!
//! A fixed list of trivia questions, shuffled once per process and then
//! served in the same order for the rest of its lifetime.

mod dataset;
mod grade;
mod question;

pub use dataset::{questions, source_questions, QuestionSet};
pub use grade::{grade, Answer, Score};
pub use question::QuizQuestion;
