//! Question provider backed by the Open Trivia DB HTTP API.
//!
//! One GET per fetch, always for a full batch of [`QUESTION_COUNT`]
//! questions with base64-encoded text fields. The wire payload is decoded
//! here; the rest of the crate only ever sees plain-text [`Question`]s.

use std::fmt;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::Question;

/// Questions requested per quiz. Fixed by contract with the session.
pub const QUESTION_COUNT: u8 = 10;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Difficulty filter understood by the question source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed request parameters for one quiz session.
#[derive(Debug, Clone)]
pub struct FetchParams {
    pub api_url: String,
    pub category: u16,
    pub difficulty: Difficulty,
}

impl FetchParams {
    pub const DEFAULT_API_URL: &'static str = "https://opentdb.com/api.php";
    /// Anime & Manga, the category the app was written around.
    pub const DEFAULT_CATEGORY: u16 = 31;
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            category: Self::DEFAULT_CATEGORY,
            difficulty: Difficulty::Easy,
        }
    }
}

/// Why a fetch produced no questions.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The source answered but declined to serve the request, e.g. no
    /// questions exist for the requested filters.
    #[error("the question source rejected the request (code {code})")]
    SourceRejected { code: u8 },

    /// The source claimed success but sent an empty batch.
    #[error("the question source returned no questions")]
    NoQuestions,

    /// The request never completed, timed out, hit an error status, or
    /// the body could not be parsed.
    #[error("could not reach the question source: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// True when the source itself turned the request down, as opposed
    /// to the request not getting through.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::SourceRejected { .. } | Self::NoQuestions)
    }
}

/// Issues question requests with fixed parameters.
pub struct QuestionProvider {
    client: reqwest::Client,
    params: FetchParams,
}

impl QuestionProvider {
    pub fn new(params: FetchParams) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, params })
    }

    pub fn params(&self) -> &FetchParams {
        &self.params
    }

    /// Request one full batch of questions.
    pub async fn fetch(&self) -> Result<Vec<Question>, FetchError> {
        debug!(
            category = self.params.category,
            difficulty = %self.params.difficulty,
            "requesting question batch"
        );

        let response = self
            .client
            .get(&self.params.api_url)
            .query(&[
                ("amount", QUESTION_COUNT.to_string()),
                ("category", self.params.category.to_string()),
                ("difficulty", self.params.difficulty.to_string()),
                ("encode", "base64".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: ApiResponse = response.json().await?;
        questions_from_response(body)
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    response_code: u8,
    results: Vec<ApiQuestion>,
}

#[derive(Debug, Deserialize)]
struct ApiQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

fn questions_from_response(body: ApiResponse) -> Result<Vec<Question>, FetchError> {
    if body.response_code != 0 {
        return Err(FetchError::SourceRejected {
            code: body.response_code,
        });
    }
    if body.results.is_empty() {
        return Err(FetchError::NoQuestions);
    }

    Ok(body
        .results
        .into_iter()
        .map(|q| {
            let text = decode_field(&q.question);
            let correct = decode_field(&q.correct_answer);
            let incorrect = q.incorrect_answers.iter().map(|a| decode_field(a)).collect();
            Question::compose(text, correct, incorrect)
        })
        .collect())
}

/// Decode one base64 text field. A string the source failed to encode
/// properly is kept verbatim rather than sinking the whole batch.
fn decode_field(raw: &str) -> String {
    match STANDARD.decode(raw) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => {
                debug!("decoded field is not utf-8, keeping raw value");
                raw.to_string()
            }
        },
        Err(_) => {
            debug!("field is not valid base64, keeping raw value");
            raw.to_string()
        }
    }
}
