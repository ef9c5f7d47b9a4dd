use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

lazy_static! {
    // The fixed ASCII punctuation set: !"#$%&'()*+,-./:;<=>?@[\]^_`{|}~
    static ref PUNCT: Regex = Regex::new(r"[!-/:-@\[-`{-~]").expect("valid regex");
}

/// Normalizes raw text into index terms.
///
/// The stopword set is injected at construction; there is no ambient
/// configuration. Normalization is pure and never fails.
pub struct Tokenizer {
    stopwords: HashSet<String>,
    stemmer: Stemmer,
}

impl Tokenizer {
    pub fn new(stopwords: HashSet<String>) -> Self {
        Self {
            stopwords,
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Lowercase, strip punctuation, split on whitespace, drop stopwords,
    /// then Porter-stem each remaining word. Relative order and duplicates
    /// are preserved; downstream term counting relies on both.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let stripped = PUNCT.replace_all(&lowered, "");
        stripped
            .split_whitespace()
            .filter(|word| !self.stopwords.contains(*word))
            .map(|word| self.stemmer.stem(word).into_owned())
            .collect()
    }
}
