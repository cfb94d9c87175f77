use perceptron_trainer::dataset::sample_dataset;
use perceptron_trainer::perceptron::Model;
use perceptron_trainer::session::{
    Accepted, InteractionState, JudgeOutcome, Rejection, TrainingSession, Verdict,
};

fn sample_session() -> TrainingSession {
    let mut session = TrainingSession::default();
    session.switch_table(sample_dataset().examples);
    session
}

/// Answer truthfully for every point until one full epoch needs no update.
/// Returns the number of updates applied.
fn train_until_clean(session: &mut TrainingSession, max_epochs: u64) -> usize {
    let mut updates = 0;
    let mut clean_epoch = true;
    while session.epoch() < max_epochs {
        let example = session.current_example().cloned().unwrap();
        let outcome = if session.model().is_mistake(&example) {
            clean_epoch = false;
            updates += 1;
            assert!(matches!(
                session.judge(Verdict::Mistake),
                JudgeOutcome::Accepted(Accepted::Updated(_))
            ));
            session.acknowledge()
        } else {
            session.judge(Verdict::Correct)
        };
        let JudgeOutcome::Accepted(Accepted::Advanced { wrapped }) = outcome else {
            panic!("unexpected outcome {outcome:?}");
        };
        if wrapped {
            if clean_epoch {
                break;
            }
            clean_epoch = true;
        }
    }
    updates
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

#[test]
fn truthful_learner_separates_the_sample_dataset() {
    let mut session = sample_session();
    assert_close(session.evaluate().accuracy, 5.0 / 9.0);

    let updates = train_until_clean(&mut session, 20);
    assert_eq!(updates, 3);
    assert_eq!(session.epoch(), 3);
    let model = session.model();
    assert_close(model.w1, 0.2);
    assert_close(model.w2, -0.7);
    assert_close(model.c, 0.3);
    assert_close(session.evaluate().accuracy, 1.0);
}

#[test]
fn wrong_claims_never_change_the_session() {
    let mut session = sample_session();
    let before = session.export_state();
    // RA is predicted correctly, RB is not.
    assert_eq!(
        session.judge(Verdict::Mistake).rejection(),
        Some(Rejection::RuleActuallyWorks)
    );
    assert_eq!(session.export_state(), before);
    session.judge(Verdict::Correct);
    let before = session.export_state();
    assert_eq!(
        session.judge(Verdict::Correct).rejection(),
        Some(Rejection::RuleActuallyFails)
    );
    assert_eq!(session.export_state(), before);
}

#[test]
fn pending_update_blocks_judgments_until_acknowledged() {
    let mut session = sample_session();
    session.judge(Verdict::Correct);
    let JudgeOutcome::Accepted(Accepted::Updated(report)) = session.judge(Verdict::Mistake) else {
        panic!("RB should trigger an update");
    };
    assert_eq!(report.before, Model::DEFAULT);
    assert_eq!(report.after, session.model());
    assert_eq!(session.active_previous_model(), Some(Model::DEFAULT));
    assert_eq!(
        session.judge(Verdict::Correct).rejection(),
        Some(Rejection::AwaitingAcknowledgement)
    );
    assert_eq!(session.current_index(), 1);

    assert!(session.acknowledge().is_accepted());
    assert_eq!(session.current_index(), 2);
    assert_eq!(session.active_previous_model(), None);
    assert_eq!(
        session.acknowledge().rejection(),
        Some(Rejection::NothingToAcknowledge)
    );
}

#[test]
fn exported_state_restores_into_a_fresh_session() {
    let mut session = sample_session();
    session.judge(Verdict::Correct);
    session.judge(Verdict::Mistake);
    session.set_learning_rate(0.3);
    session.display_mut().show_error = true;

    let text = session.export_state().to_json_pretty().unwrap();
    assert!(text.contains("\"curIndex\": 1"));
    assert!(text.contains("\"prevLineActive\": true"));
    let state = InteractionState::from_json(&text).unwrap();

    let mut restored = TrainingSession::default();
    restored.restore(&state);
    restored.load_examples(sample_dataset().examples);
    assert_eq!(restored.model(), session.model());
    assert_eq!(restored.current_index(), 1);
    assert_eq!(restored.learning_rate(), 0.3);
    assert!(restored.display().show_error);
    assert_eq!(restored.active_previous_model(), Some(Model::DEFAULT));
}

#[test]
fn empty_session_is_idle() {
    let mut session = TrainingSession::default();
    assert_eq!(session.judge(Verdict::Correct), JudgeOutcome::Idle);
    assert_eq!(session.acknowledge(), JudgeOutcome::Idle);
    assert!(session.current_summary().is_none());
    session.advance();
    assert_eq!(session.epoch(), 0);
}
