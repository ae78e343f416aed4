//! Quiz session state machine.
//!
//! One [`Session`] value owns everything about a single player's attempt:
//! the login input, the fetched questions, the answer sheet, and the
//! countdown. Transitions are plain methods; the ones that need I/O return
//! an [`Effect`] ticket that the runtime turns into a spawned task. Every
//! ticket carries a sequence number so a completion that arrives after the
//! session has moved on is discarded instead of clobbering newer state.

use crate::models::Question;

/// Seconds on the clock when a quiz begins.
pub const QUIZ_SECONDS: u32 = 300;

/// Longest accepted player name, in characters.
pub const MAX_NAME_LENGTH: usize = 16;

const EMPTY_NAME_ERROR: &str = "Name must not be empty";

/// Lifecycle phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No player yet; the name prompt is showing.
    LoggedOut,
    /// A question fetch is in flight.
    Loading,
    /// The last fetch failed; waiting for the player to retry.
    Error,
    /// Questions on screen, clock running.
    Playing,
    /// Out of questions or out of time; score is showing.
    Finished,
}

/// Which side of the failure taxonomy a load error falls on. The retry
/// path is identical for both; only the message shown differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailureKind {
    /// The source answered but could not serve the request.
    SourceRejected,
    /// The request never completed or the body was unusable.
    Transport,
}

/// An owned, displayable record of a failed load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub kind: LoadFailureKind,
    pub message: String,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Issue a question fetch tagged with this sequence number.
    Fetch { seq: u64 },
    /// Schedule the delayed advance for the answer just recorded.
    ScheduleAdvance { seq: u64 },
}

/// Outcome of delivering a fetch result back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchApplied {
    /// Questions accepted; the session entered `Playing`.
    Playing,
    /// The failure was recorded; the session entered `Error`.
    Failed,
    /// The result belonged to a superseded fetch and was dropped.
    Stale,
}

pub struct Session {
    phase: Phase,
    username: String,
    name_input: String,
    name_error: Option<&'static str>,
    questions: Vec<Question>,
    answers: Vec<Option<String>>,
    current_index: usize,
    cursor: usize,
    remaining_seconds: u32,
    failure: Option<LoadFailure>,
    fetch_seq: u64,
    timer_epoch: u64,
    advance_seq: u64,
    advance_pending: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::LoggedOut,
            username: String::new(),
            name_input: String::new(),
            name_error: None,
            questions: Vec::new(),
            answers: Vec::new(),
            current_index: 0,
            cursor: 0,
            remaining_seconds: 0,
            failure: None,
            fetch_seq: 0,
            timer_epoch: 0,
            advance_seq: 0,
            advance_pending: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn name_error(&self) -> Option<&'static str> {
        self.name_error
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<String>] {
        &self.answers
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// Answer recorded for the question currently on screen, if any.
    pub fn current_answer(&self) -> Option<&str> {
        self.answers.get(self.current_index)?.as_deref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        self.failure.as_ref()
    }

    pub fn timer_epoch(&self) -> u64 {
        self.timer_epoch
    }

    /// Whether answer input is locked while the delayed advance runs.
    pub fn input_locked(&self) -> bool {
        self.advance_pending
    }

    /// True while a countdown task holding this epoch should keep ticking.
    pub fn countdown_live(&self, epoch: u64) -> bool {
        self.phase == Phase::Playing && self.timer_epoch == epoch
    }

    pub fn name_push(&mut self, c: char) {
        if self.phase != Phase::LoggedOut {
            return;
        }
        self.name_error = None;
        if self.name_input.chars().count() < MAX_NAME_LENGTH {
            self.name_input.push(c);
        }
    }

    pub fn name_pop(&mut self) {
        if self.phase != Phase::LoggedOut {
            return;
        }
        self.name_error = None;
        self.name_input.pop();
    }

    /// Submit the typed name. A blank name is rejected in place with an
    /// inline error and no fetch is issued.
    pub fn submit_name(&mut self) -> Option<Effect> {
        if self.phase != Phase::LoggedOut {
            return None;
        }

        let trimmed = self.name_input.trim();
        if trimmed.is_empty() {
            self.name_error = Some(EMPTY_NAME_ERROR);
            return None;
        }

        self.username = trimmed.to_string();
        self.name_error = None;
        Some(self.begin_loading())
    }

    /// Re-issue the fetch after a failed load, with identical parameters.
    pub fn retry(&mut self) -> Option<Effect> {
        if self.phase != Phase::Error {
            return None;
        }
        Some(self.begin_loading())
    }

    /// Throw away the finished attempt and fetch a fresh question set.
    pub fn restart(&mut self) -> Option<Effect> {
        if self.phase != Phase::Finished {
            return None;
        }
        Some(self.begin_loading())
    }

    /// Full reset back to the name prompt. Reachable from any phase; the
    /// sequence counters survive so late completions from the abandoned
    /// attempt stay orphaned.
    pub fn logout(&mut self) {
        self.phase = Phase::LoggedOut;
        self.username.clear();
        self.name_input.clear();
        self.name_error = None;
        self.questions.clear();
        self.answers.clear();
        self.current_index = 0;
        self.cursor = 0;
        self.remaining_seconds = 0;
        self.failure = None;
        self.advance_pending = false;
        self.fetch_seq += 1;
        self.timer_epoch += 1;
    }

    fn begin_loading(&mut self) -> Effect {
        self.phase = Phase::Loading;
        self.questions.clear();
        self.answers.clear();
        self.current_index = 0;
        self.cursor = 0;
        self.remaining_seconds = 0;
        self.failure = None;
        self.advance_pending = false;
        self.fetch_seq += 1;
        self.timer_epoch += 1;
        Effect::Fetch {
            seq: self.fetch_seq,
        }
    }

    /// Deliver the outcome of fetch `seq`. Results from any fetch other
    /// than the latest one are dropped.
    pub fn apply_fetch(
        &mut self,
        seq: u64,
        result: Result<Vec<Question>, LoadFailure>,
    ) -> FetchApplied {
        if self.phase != Phase::Loading || seq != self.fetch_seq {
            return FetchApplied::Stale;
        }

        match result {
            Ok(questions) if !questions.is_empty() => {
                self.answers = vec![None; questions.len()];
                self.questions = questions;
                self.current_index = 0;
                self.cursor = 0;
                self.remaining_seconds = QUIZ_SECONDS;
                self.failure = None;
                self.phase = Phase::Playing;
                self.timer_epoch += 1;
                FetchApplied::Playing
            }
            Ok(_) => {
                self.fail_load(LoadFailure {
                    kind: LoadFailureKind::SourceRejected,
                    message: "the question source returned no questions".to_string(),
                });
                FetchApplied::Failed
            }
            Err(failure) => {
                self.fail_load(failure);
                FetchApplied::Failed
            }
        }
    }

    fn fail_load(&mut self, failure: LoadFailure) {
        self.failure = Some(failure);
        self.phase = Phase::Error;
    }

    pub fn select_next(&mut self) {
        if let Some(len) = self.selectable_len() {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(len) = self.selectable_len() {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    fn selectable_len(&self) -> Option<usize> {
        if self.phase != Phase::Playing || self.advance_pending {
            return None;
        }
        let len = self.current_question()?.answers.len();
        (len > 0).then_some(len)
    }

    /// Record the answer under the cursor for the current question. The
    /// first recorded answer is final: input stays locked until the
    /// delayed advance fires, and an already-answered index rejects any
    /// further selection.
    pub fn choose_selected(&mut self) -> Option<Effect> {
        if self.phase != Phase::Playing || self.advance_pending {
            return None;
        }
        if self.answers.get(self.current_index)?.is_some() {
            return None;
        }

        let answer = self.current_question()?.answers.get(self.cursor)?.clone();
        self.answers[self.current_index] = Some(answer);
        self.advance_pending = true;
        self.advance_seq += 1;
        Some(Effect::ScheduleAdvance {
            seq: self.advance_seq,
        })
    }

    /// The delayed advance scheduled by [`choose_selected`] has elapsed.
    /// Ignored when the clock already forced the quiz to finish, or when a
    /// newer attempt superseded the ticket.
    ///
    /// [`choose_selected`]: Session::choose_selected
    pub fn advance_due(&mut self, seq: u64) {
        if self.phase != Phase::Playing || !self.advance_pending || seq != self.advance_seq {
            return;
        }

        self.advance_pending = false;
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.cursor = 0;
        } else {
            self.finish();
        }
    }

    /// One second of quiz time has passed. Returns true when this tick
    /// ran the clock out and forced the quiz to finish.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Playing || self.remaining_seconds == 0 {
            return false;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.finish();
            return true;
        }
        false
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        self.advance_pending = false;
        self.timer_epoch += 1;
    }

    pub fn score(&self) -> ScoreSummary {
        score(&self.questions, &self.answers)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Final tally for one quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    pub correct: usize,
    pub incorrect: usize,
    pub answered: usize,
    /// Share of all questions answered correctly, rounded to one decimal.
    pub percent: f64,
}

/// Tally a quiz from the stored questions and answer sheet alone.
pub fn score(questions: &[Question], answers: &[Option<String>]) -> ScoreSummary {
    let mut correct = 0;
    let mut incorrect = 0;

    for (question, answer) in questions.iter().zip(answers) {
        match answer {
            Some(a) if question.is_correct(a) => correct += 1,
            Some(_) => incorrect += 1,
            None => {}
        }
    }

    let percent = if questions.is_empty() {
        0.0
    } else {
        (correct as f64 / questions.len() as f64 * 1000.0).round() / 10.0
    };

    ScoreSummary {
        correct,
        incorrect,
        answered: correct + incorrect,
        percent,
    }
}
