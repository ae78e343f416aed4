//! # trivia-quiz
//!
//! A terminal trivia quiz backed by the Open Trivia DB.
//!
//! A player enters a name, ten questions are fetched from the question
//! source, answered one at a time against a five-minute clock, and the
//! attempt is scored on a summary screen. Everything lives in one
//! [`Session`] value driven by discrete events; see [`session`] for the
//! state machine and [`run`] for the terminal runtime.
//!
//! ```rust,no_run
//! use trivia_quiz::{run, FetchParams, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     run(FetchParams::default()).await
//! }
//! ```

mod app;
mod data;
mod models;
pub mod session;
pub mod terminal;
mod ui;

pub use app::{run, QuizError};
pub use data::{Difficulty, FetchError, FetchParams, QuestionProvider, QUESTION_COUNT};
pub use models::Question;
pub use session::{
    score, Effect, FetchApplied, LoadFailure, LoadFailureKind, Phase, ScoreSummary, Session,
    QUIZ_SECONDS,
};
