//! Fetching and decoding of quiz questions.

mod provider;

pub use provider::{Difficulty, FetchError, FetchParams, QuestionProvider, QUESTION_COUNT};
