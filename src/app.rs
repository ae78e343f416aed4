//! Interactive quiz runtime.
//!
//! The session lives behind an `Arc<Mutex<_>>`; the render loop, the
//! fetch task, the countdown task, and the advance-delay task all mutate
//! it under the lock, one discrete event at a time. Tasks spawned for a
//! superseded attempt find their sequence number stale and bow out.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::data::{FetchError, FetchParams, QuestionProvider};
use crate::session::{Effect, FetchApplied, LoadFailure, LoadFailureKind, Phase, Session};
use crate::terminal;
use crate::ui;

/// Pause between recording an answer and advancing to the next question,
/// so the player sees their choice highlighted.
const ADVANCE_DELAY: Duration = Duration::from_millis(400);

/// How long the input poll waits before the next render pass.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

type SharedSession = Arc<Mutex<Session>>;

/// Error type for running the quiz.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("terminal failure: {0}")]
    Io(#[from] io::Error),

    #[error("failed to set up the question provider: {0}")]
    Provider(#[from] FetchError),
}

/// Take over the terminal and run the quiz until the player quits.
pub async fn run(params: FetchParams) -> Result<(), QuizError> {
    let provider = Arc::new(QuestionProvider::new(params)?);
    let session = Arc::new(Mutex::new(Session::new()));

    let mut term = terminal::init()?;
    let result = run_loop(&mut term, &session, &provider).await;
    terminal::restore()?;
    result
}

async fn run_loop(
    term: &mut terminal::QuizTerminal,
    session: &SharedSession,
    provider: &Arc<QuestionProvider>,
) -> Result<(), QuizError> {
    loop {
        {
            let session = session.lock().await;
            term.draw(|frame| ui::render(frame, &session))?;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let outcome = {
                let mut session = session.lock().await;
                handle_key(&mut session, key.code)
            };

            match outcome {
                KeyOutcome::Quit => break,
                KeyOutcome::Run(effect) => dispatch(effect, session, provider),
                KeyOutcome::Idle => {}
            }
        }
    }

    Ok(())
}

enum KeyOutcome {
    Idle,
    Quit,
    Run(Effect),
}

impl KeyOutcome {
    fn from_effect(effect: Option<Effect>) -> Self {
        effect.map_or(Self::Idle, Self::Run)
    }
}

fn handle_key(session: &mut Session, key: KeyCode) -> KeyOutcome {
    match session.phase() {
        Phase::LoggedOut => match key {
            KeyCode::Esc => KeyOutcome::Quit,
            KeyCode::Enter => KeyOutcome::from_effect(session.submit_name()),
            KeyCode::Backspace => {
                session.name_pop();
                KeyOutcome::Idle
            }
            KeyCode::Char(c) => {
                session.name_push(c);
                KeyOutcome::Idle
            }
            _ => KeyOutcome::Idle,
        },
        Phase::Loading => match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyOutcome::Quit,
            _ => KeyOutcome::Idle,
        },
        Phase::Error => match key {
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
                KeyOutcome::from_effect(session.retry())
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                session.logout();
                KeyOutcome::Idle
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyOutcome::Quit,
            _ => KeyOutcome::Idle,
        },
        Phase::Playing => match key {
            KeyCode::Up | KeyCode::Char('k') => {
                session.select_previous();
                KeyOutcome::Idle
            }
            KeyCode::Down | KeyCode::Char('j') => {
                session.select_next();
                KeyOutcome::Idle
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                KeyOutcome::from_effect(session.choose_selected())
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                session.logout();
                KeyOutcome::Idle
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyOutcome::Quit,
            _ => KeyOutcome::Idle,
        },
        Phase::Finished => match key {
            KeyCode::Char('r') | KeyCode::Char('R') => KeyOutcome::from_effect(session.restart()),
            KeyCode::Char('l') | KeyCode::Char('L') => {
                session.logout();
                KeyOutcome::Idle
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyOutcome::Quit,
            _ => KeyOutcome::Idle,
        },
    }
}

fn dispatch(effect: Effect, session: &SharedSession, provider: &Arc<QuestionProvider>) {
    match effect {
        Effect::Fetch { seq } => spawn_fetch(seq, session, provider),
        Effect::ScheduleAdvance { seq } => spawn_advance(seq, session),
    }
}

/// Fetch a question batch and deliver it back under the lock. On success
/// the session enters `Playing` and the countdown for the new attempt is
/// started here.
fn spawn_fetch(seq: u64, session: &SharedSession, provider: &Arc<QuestionProvider>) {
    let session = Arc::clone(session);
    let provider = Arc::clone(provider);

    tokio::spawn(async move {
        info!(seq, "fetching question batch");
        let result = provider.fetch().await.map_err(to_load_failure);

        let mut guard = session.lock().await;
        match guard.apply_fetch(seq, result) {
            FetchApplied::Playing => {
                let epoch = guard.timer_epoch();
                drop(guard);
                info!(seq, "questions loaded, quiz started");
                spawn_countdown(epoch, &session);
            }
            FetchApplied::Failed => warn!(seq, "question fetch failed"),
            FetchApplied::Stale => debug!(seq, "dropping result of superseded fetch"),
        }
    });
}

/// One-second countdown tied to a single stay in `Playing`. The task
/// exits as soon as the session's epoch moves on, so leaving the phase
/// cancels it and re-entering never double-counts.
fn spawn_countdown(epoch: u64, session: &SharedSession) {
    let session = Arc::clone(session);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.tick().await;

        loop {
            interval.tick().await;
            let mut session = session.lock().await;
            if !session.countdown_live(epoch) {
                break;
            }
            if session.tick() {
                info!("time expired, quiz finished");
                break;
            }
        }
    });
}

/// Let the chosen answer sit highlighted briefly before moving on.
fn spawn_advance(seq: u64, session: &SharedSession) {
    let session = Arc::clone(session);

    tokio::spawn(async move {
        tokio::time::sleep(ADVANCE_DELAY).await;
        session.lock().await.advance_due(seq);
    });
}

fn to_load_failure(err: FetchError) -> LoadFailure {
    let kind = if err.is_rejection() {
        LoadFailureKind::SourceRejected
    } else {
        LoadFailureKind::Transport
    };
    LoadFailure {
        kind,
        message: err.to_string(),
    }
}
