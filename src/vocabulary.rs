use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

static WORDS_DIR: Dir = include_dir!("src/words");

/// Word list the practice prompts are drawn from.
pub const DEFAULT_LIST: &str = "spanish";

#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug)]
pub struct Vocabulary {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Vocabulary {
    pub fn load(list_name: &str) -> Self {
        read_vocabulary_from_file(format!("{list_name}.json")).unwrap()
    }

    /// Draw `count` distinct words uniformly at random.
    ///
    /// Generic over the random source so tests can drive it with a seeded
    /// `StdRng`. Asking for more words than the list holds yields every
    /// available word.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<String> {
        self.words.choose_multiple(rng, count).cloned().collect()
    }

    /// Build one practice target: sampled words joined by single spaces.
    pub fn generate_target<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> String {
        self.sample(rng, count).join(" ")
    }
}

fn read_vocabulary_from_file(file_name: String) -> Result<Vocabulary, Box<dyn Error>> {
    let file = WORDS_DIR
        .get_file(file_name)
        .expect("Word list file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let vocab = from_str(file_as_str).expect("Unable to deserialize word list json");

    Ok(vocab)
}
