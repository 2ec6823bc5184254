//! Fixed trivia dataset and its once-per-process ordering.

use std::ops::Deref;
use std::sync::OnceLock;

use rand::seq::SliceRandom;
use rand::Rng;

use super::QuizQuestion;

const SOURCE: &[(&str, &[&str], &str)] = &[
    (
        "What is the capital of France?",
        &["Berlin", "London", "Paris"],
        "Paris",
    ),
    ("What is 2 + 2?", &["3", "4", "5"], "4"),
    (
        "In Vue 3, what is the new composition API used for?",
        &[
            "Managing server-side routes",
            "Handling HTTP requests",
            "Managing state and logic in components",
        ],
        "Managing state and logic in components",
    ),
    (
        "In JavaScript, what primitive data type can hold whole numbers?",
        &["String", "Number", "Boolean"],
        "Number",
    ),
    (
        "In Vue 3, how can you create a reactive data property in a component?",
        &[
            "Using the `ref` function from Vue composition API",
            "Using the `reactive` function from Vue composition API",
            "Using the `data` option in the component's options object",
        ],
        "Using the `ref` function from Vue composition API",
    ),
    (
        "What is the highest mountain in the solar system?",
        &["Mount Everest", "Olympus Mons", "K2"],
        "Olympus Mons",
    ),
    (
        "What is the largest living organism on Earth?",
        &["Blue Whale", "Giant Sequoia Tree", "African Bush Elephant"],
        "Giant Sequoia Tree",
    ),
    ("What is the currency of Japan?", &["Euro", "Yuan", "Yen"], "Yen"),
    (
        "In CSS, what property controls the spacing between lines of text?",
        &["margin", "padding", "line-height"],
        "line-height",
    ),
    (
        "What is the capital of Australia?",
        &["Sydney", "Melbourne", "Canberra"],
        "Canberra",
    ),
];

/// The source questions in declaration order.
pub fn source_questions() -> Vec<QuizQuestion> {
    SOURCE
        .iter()
        .map(|(question, options, answer)| {
            QuizQuestion::new(*question, options.iter().copied(), *answer)
        })
        .collect()
}

/// An ordered, immutable permutation of the source questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<QuizQuestion>,
}

impl QuestionSet {
    /// Shuffle the source list with the thread-local RNG.
    pub fn shuffled() -> Self {
        Self::shuffled_with(&mut rand::rng())
    }

    /// Shuffle the source list with a caller-supplied RNG.
    ///
    /// Uses a uniform Fisher-Yates shuffle.
    pub fn shuffled_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut questions = source_questions();
        questions.shuffle(rng);
        Self { questions }
    }

    pub fn as_slice(&self) -> &[QuizQuestion] {
        &self.questions
    }
}

impl Deref for QuestionSet {
    type Target = [QuizQuestion];

    fn deref(&self) -> &Self::Target {
        &self.questions
    }
}

static QUESTIONS: OnceLock<QuestionSet> = OnceLock::new();

/// The process-wide question order, shuffled on first access.
pub fn questions() -> &'static [QuizQuestion] {
    QUESTIONS.get_or_init(QuestionSet::shuffled).as_slice()
}
