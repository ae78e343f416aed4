use rand::rng;
use rand::seq::SliceRandom;

/// A single multiple-choice question with its answers in display order.
///
/// The answer list is shuffled once at construction and never reordered
/// afterwards, so the display order is stable for the whole quiz.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub correct_answer: String,
    pub answers: Vec<String>,
}

impl Question {
    /// Build a question from the correct answer and its distractors,
    /// mixing them into a uniform random order.
    pub fn compose(text: String, correct_answer: String, incorrect_answers: Vec<String>) -> Self {
        let mut answers = incorrect_answers;
        answers.push(correct_answer.clone());
        answers.shuffle(&mut rng());

        Self {
            text,
            correct_answer,
            answers,
        }
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}
