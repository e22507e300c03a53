use crate::exercise::Exercise;
use crate::vocabulary::{Vocabulary, DEFAULT_LIST};

/// Key descriptor that resets the exercise at any time.
pub const CANCEL_KEY: &str = "Escape";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub number_of_words: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { number_of_words: 20 }
    }
}

/// Marker for the armed elapsed-time sampler.
///
/// Held from the first counted keystroke until the exercise finishes or the
/// session resets; [`Session::on_tick`] only samples while this is held, so
/// no stray updates can land after teardown.
#[derive(Debug)]
pub struct SamplerGuard(());

/// Owns the current [`Exercise`], wires raw key descriptors to it, and
/// implements reset. The presentation layer reads state through this and
/// never mutates it.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    vocabulary: Vocabulary,
    pub exercise: Exercise,
    sampler: Option<SamplerGuard>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let vocabulary = Vocabulary::load(DEFAULT_LIST);
        let exercise = new_exercise(&vocabulary, config.number_of_words);
        Self {
            config,
            vocabulary,
            exercise,
            sampler: None,
        }
    }

    /// Full replacement of the exercise: fresh random target, counters and
    /// clock zeroed, sampler released. Nothing survives across a reset.
    pub fn reset(&mut self) {
        self.sampler = None;
        self.exercise = new_exercise(&self.vocabulary, self.config.number_of_words);
    }

    /// Route one raw key descriptor. The cancellation key resets; anything
    /// else goes to the exercise while it is unfinished.
    pub fn on_key_event(&mut self, key: &str) {
        if key == CANCEL_KEY {
            self.reset();
            return;
        }

        if self.exercise.has_finished() {
            return;
        }

        self.exercise.process_key(key);

        if self.exercise.has_finished() {
            self.sampler = None;
        } else if self.exercise.has_started() && self.sampler.is_none() {
            self.sampler = Some(SamplerGuard(()));
        }
    }

    /// Recurring 500ms callback: sample elapsed time while armed.
    pub fn on_tick(&mut self) {
        if self.sampler.is_some() {
            self.exercise.sample_elapsed();
            if self.exercise.has_finished() {
                self.sampler = None;
            }
        }
    }

    pub fn is_sampling(&self) -> bool {
        self.sampler.is_some()
    }

    pub fn number_of_words(&self) -> usize {
        self.config.number_of_words
    }
}

fn new_exercise(vocabulary: &Vocabulary, number_of_words: usize) -> Exercise {
    let target = vocabulary.generate_target(&mut rand::thread_rng(), number_of_words);
    Exercise::new(target, number_of_words)
}
