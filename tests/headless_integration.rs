use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use teclea::exercise::Exercise;
use teclea::runtime::{key_descriptor, FixedTicker, InputEvent, Runner, TestEventSource};
use teclea::session::{Session, SessionConfig};

fn key(c: char) -> InputEvent {
    InputEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn drive(session: &mut Session, runner: &Runner<TestEventSource>, max_steps: u32) {
    for _ in 0..max_steps {
        match runner.step() {
            InputEvent::Tick => session.on_tick(),
            InputEvent::Resize => {}
            InputEvent::Key(ev) => {
                if let Some(descriptor) = key_descriptor(ev.code) {
                    session.on_key_event(&descriptor);
                }
                if session.exercise.has_finished() {
                    break;
                }
            }
        }
    }
}

// Headless integration using the internal runtime + Session without a TTY.
#[test]
fn headless_typing_flow_completes() {
    let mut session = Session::new(SessionConfig { number_of_words: 1 });
    session.exercise = Exercise::new("hola".to_string(), 1);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for c in "hola".chars() {
        tx.send(key(c)).unwrap();
    }

    drive(&mut session, &runner, 100);

    assert!(session.exercise.has_finished(), "exercise should complete");
    assert_eq!(session.exercise.correct, 4);
    assert_eq!(session.exercise.incorrect, 0);
    assert!(!session.is_sampling(), "sampler must be released at finish");
}

#[test]
fn headless_mismatches_are_counted_but_do_not_advance() {
    let mut session = Session::new(SessionConfig { number_of_words: 2 });
    session.exercise = Exercise::new("ab cd".to_string(), 2);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for c in "ab xcd".chars() {
        tx.send(key(c)).unwrap();
    }

    drive(&mut session, &runner, 100);

    assert!(session.exercise.has_finished());
    assert_eq!(session.exercise.correct, 5);
    assert_eq!(session.exercise.incorrect, 1);
    assert_eq!(session.exercise.cursor, 5);
}

#[test]
fn headless_escape_resets_mid_exercise() {
    let mut session = Session::new(SessionConfig { number_of_words: 2 });
    session.exercise = Exercise::new("ab cd".to_string(), 2);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for c in "ab ".chars() {
        tx.send(key(c)).unwrap();
    }
    tx.send(InputEvent::Key(KeyEvent::new(
        KeyCode::Esc,
        KeyModifiers::NONE,
    )))
    .unwrap();

    // Bounded number of steps: keystrokes, escape, then ticks
    for _ in 0..10u32 {
        match runner.step() {
            InputEvent::Tick => session.on_tick(),
            InputEvent::Resize => {}
            InputEvent::Key(ev) => {
                if let Some(descriptor) = key_descriptor(ev.code) {
                    session.on_key_event(&descriptor);
                }
            }
        }
    }

    assert_eq!(session.exercise.cursor, 0);
    assert_eq!(session.exercise.correct, 0);
    assert!(!session.exercise.has_started());
    assert!(!session.is_sampling(), "reset must stop in-flight sampling");
    // Reset draws a fresh target from the vocabulary
    assert_ne!(session.exercise.target, "ab cd");
    assert_eq!(session.exercise.target.split(' ').count(), 2);
}

#[test]
fn headless_full_sized_exercise_from_vocabulary() {
    // Default-sized exercise typed to completion using the generated target
    let mut session = Session::new(SessionConfig::default());
    let target = session.exercise.target.clone();
    assert_eq!(target.split(' ').count(), 20);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for c in target.chars() {
        tx.send(key(c)).unwrap();
    }

    drive(&mut session, &runner, 1000);

    assert!(session.exercise.has_finished());
    assert_eq!(session.exercise.correct, target.chars().count());
    assert_eq!(session.exercise.incorrect, 0);
}
