use std::time::SystemTime;

/// represents one typing exercise being displayed to the user
///
/// The transition logic lives entirely in [`Exercise::process_key`], taking
/// raw key descriptor strings so it can be driven without any terminal
/// harness. A wrong keystroke is counted but never advances the cursor;
/// there is no correction of earlier input.
#[derive(Debug, Clone)]
pub struct Exercise {
    pub target: String,
    pub cursor: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub started_at: Option<SystemTime>,
    pub elapsed_secs: u64,
    pub finished: bool,
    pub number_of_words: usize,
    length: usize,
}

impl Exercise {
    pub fn new(target: String, number_of_words: usize) -> Self {
        let length = target.chars().count();
        Self {
            target,
            cursor: 0,
            correct: 0,
            incorrect: 0,
            started_at: None,
            elapsed_secs: 0,
            finished: false,
            number_of_words,
            length,
        }
    }

    /// Number of characters in the target.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Consume one raw key descriptor and advance the state machine.
    ///
    /// Descriptors longer than one character (modifier and navigation key
    /// names) produce no state change at all: not counted, and they do not
    /// start the clock.
    pub fn process_key(&mut self, key: &str) {
        if self.finished {
            return;
        }

        // Completion is also checked before consuming anything; together
        // with the advance-triggered check below this keeps re-entrant
        // calls from ever over-running the target.
        if self.cursor >= self.length {
            self.finished = true;
            return;
        }

        let mut chars = key.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return,
        };

        if self.started_at.is_none() {
            self.started_at = Some(SystemTime::now());
        }

        if Some(c) == self.expected_char() {
            self.correct += 1;
            self.cursor += 1;
            if self.cursor == self.length {
                self.finished = true;
            }
        } else {
            self.incorrect += 1;
        }
    }

    /// The next character the user is expected to type, if any.
    pub fn expected_char(&self) -> Option<char> {
        self.target.chars().nth(self.cursor)
    }

    /// Recompute elapsed whole seconds since the first counted keystroke.
    ///
    /// Called on a 500ms cadence by the session tick. Once finished the
    /// last sampled value is kept, not forced to the completion instant.
    pub fn sample_elapsed(&mut self) {
        if self.finished {
            return;
        }
        if let Some(started) = self.started_at {
            if let Ok(elapsed) = started.elapsed() {
                self.elapsed_secs = elapsed.as_secs();
            }
        }
    }

    /// Correct characters per minute, rounded; 0 before the first sample.
    pub fn speed(&self) -> u64 {
        if self.elapsed_secs == 0 {
            return 0;
        }
        (self.correct as f64 / self.elapsed_secs as f64 * 60.0).round() as u64
    }

    pub fn typed_text(&self) -> String {
        self.target.chars().take(self.cursor).collect()
    }

    pub fn untyped_text(&self) -> String {
        self.target.chars().skip(self.cursor).collect()
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_finished(&self) -> bool {
        self.finished
    }
}
