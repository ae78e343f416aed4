//! End-to-end session scenarios, driven purely through the state machine.

use trivia_quiz::{
    score, Effect, FetchApplied, LoadFailure, LoadFailureKind, Phase, Question, Session,
    QUIZ_SECONDS,
};

fn question(n: usize) -> Question {
    Question {
        text: format!("Question {n}"),
        correct_answer: format!("right {n}"),
        answers: vec![
            format!("wrong {n}a"),
            format!("wrong {n}b"),
            format!("right {n}"),
            format!("wrong {n}c"),
        ],
    }
}

fn batch(count: usize) -> Vec<Question> {
    (0..count).map(question).collect()
}

fn login(session: &mut Session, name: &str) -> u64 {
    for c in name.chars() {
        session.name_push(c);
    }
    match session.submit_name() {
        Some(Effect::Fetch { seq }) => seq,
        other => panic!("expected a fetch ticket, got {other:?}"),
    }
}

/// Move the cursor onto `target` and answer with it, then deliver the
/// delayed advance.
fn answer_with(session: &mut Session, target: &str) {
    let position = session
        .current_question()
        .expect("a question should be on screen")
        .answers
        .iter()
        .position(|a| a == target)
        .expect("target answer should be present");

    while session.cursor() != position {
        session.select_next();
    }

    match session.choose_selected() {
        Some(Effect::ScheduleAdvance { seq }) => session.advance_due(seq),
        other => panic!("expected an advance ticket, got {other:?}"),
    }
}

#[test]
fn alice_answers_everything_correctly() {
    let mut session = Session::new();
    let seq = login(&mut session, "Alice");
    assert_eq!(session.apply_fetch(seq, Ok(batch(10))), FetchApplied::Playing);
    assert_eq!(session.username(), "Alice");

    for n in 0..10 {
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.current_index(), n);
        answer_with(&mut session, &format!("right {n}"));
    }

    assert_eq!(session.phase(), Phase::Finished);
    let summary = session.score();
    assert_eq!(summary.correct, 10);
    assert_eq!(summary.incorrect, 0);
    assert_eq!(summary.answered, 10);
    assert_eq!(summary.percent, 100.0);
}

#[test]
fn timer_expiry_finishes_a_half_answered_quiz() {
    let mut session = Session::new();
    let seq = login(&mut session, "Bob");
    session.apply_fetch(seq, Ok(batch(10)));

    answer_with(&mut session, "right 0");
    answer_with(&mut session, "right 1");
    answer_with(&mut session, "wrong 2a");
    answer_with(&mut session, "wrong 3b");
    assert_eq!(session.current_index(), 4);

    for _ in 0..QUIZ_SECONDS {
        session.tick();
    }

    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.remaining_seconds(), 0);

    let summary = session.score();
    assert_eq!(summary.correct, 2);
    assert_eq!(summary.incorrect, 2);
    assert_eq!(summary.answered, 4);
    assert_eq!(summary.percent, 20.0);
}

#[test]
fn rejection_message_differs_from_transport_and_retry_recovers() {
    let mut session = Session::new();
    let seq = login(&mut session, "Carol");

    let rejection = LoadFailure {
        kind: LoadFailureKind::SourceRejected,
        message: "the question source rejected the request (code 1)".to_string(),
    };
    session.apply_fetch(seq, Err(rejection.clone()));
    assert_eq!(session.phase(), Phase::Error);

    let shown = session.failure().expect("failure should be recorded");
    assert_eq!(shown.kind, LoadFailureKind::SourceRejected);

    let transport = LoadFailure {
        kind: LoadFailureKind::Transport,
        message: "could not reach the question source: connection refused".to_string(),
    };
    assert_ne!(shown.kind, transport.kind);
    assert_ne!(shown.message, transport.message);

    // Retry re-issues the fetch; success lands in a fresh Playing state.
    let seq = match session.retry() {
        Some(Effect::Fetch { seq }) => seq,
        other => panic!("expected a fetch ticket, got {other:?}"),
    };
    assert_eq!(session.phase(), Phase::Loading);
    assert_eq!(session.apply_fetch(seq, Ok(batch(10))), FetchApplied::Playing);
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.remaining_seconds(), QUIZ_SECONDS);
    assert!(session.answers().iter().all(Option::is_none));
}

#[test]
fn empty_name_never_leaves_the_login_screen() {
    let mut session = Session::new();
    assert_eq!(session.submit_name(), None);
    assert_eq!(session.phase(), Phase::LoggedOut);
    assert!(session.name_error().is_some());

    for c in "   ".chars() {
        session.name_push(c);
    }
    assert_eq!(session.submit_name(), None);
    assert_eq!(session.phase(), Phase::LoggedOut);
    assert!(session.name_error().is_some());
}

#[test]
fn every_recorded_answer_comes_from_the_question() {
    let mut session = Session::new();
    let seq = login(&mut session, "Dave");
    session.apply_fetch(seq, Ok(batch(10)));

    answer_with(&mut session, "right 0");
    answer_with(&mut session, "wrong 1c");

    assert_eq!(session.answers().len(), session.questions().len());
    for (answer, question) in session.answers().iter().zip(session.questions()) {
        if let Some(a) = answer {
            assert!(question.answers.contains(a));
        }
    }
}

#[test]
fn restart_and_logout_round_trip() {
    let mut session = Session::new();
    let seq = login(&mut session, "Erin");
    session.apply_fetch(seq, Ok(batch(1)));

    answer_with(&mut session, "right 0");
    assert_eq!(session.phase(), Phase::Finished);

    let seq = match session.restart() {
        Some(Effect::Fetch { seq }) => seq,
        other => panic!("expected a fetch ticket, got {other:?}"),
    };
    session.apply_fetch(seq, Ok(batch(10)));
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.username(), "Erin");
    assert_eq!(session.score().answered, 0);

    session.logout();
    assert_eq!(session.phase(), Phase::LoggedOut);
    assert_eq!(session.username(), "");

    // Everything is reachable again after logging out.
    let seq = login(&mut session, "Frank");
    session.apply_fetch(seq, Ok(batch(10)));
    assert_eq!(session.phase(), Phase::Playing);
}

#[test]
fn scoring_matches_the_stored_state_alone() {
    let questions = batch(10);
    let mut answers: Vec<Option<String>> = vec![None; 10];
    answers[0] = Some("right 0".to_string());
    answers[5] = Some("wrong 5a".to_string());

    let summary = score(&questions, &answers);
    assert_eq!(summary.correct, 1);
    assert_eq!(summary.incorrect, 1);
    assert_eq!(summary.answered, 2);
    assert_eq!(summary.percent, 10.0);
    assert_eq!(summary, score(&questions, &answers));
}
