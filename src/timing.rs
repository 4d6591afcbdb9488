/*!
 * Speech timing data for narration/animation synchronization.
 *
 * A `TimingModel` is built once from the character alignment the speech
 * service reports, and read-only afterwards. Word spans are derived by
 * greedily concatenating non-whitespace characters between whitespace
 * boundaries.
 */

use serde::{Deserialize, Serialize};

/// Timing of a single character of the narration, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharTiming {
    /// The character as spoken
    pub character: char,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl CharTiming {
    pub fn new(character: char, start: f64, end: f64) -> Self {
        Self {
            character,
            start,
            end,
        }
    }
}

/// Timing of a whole word, derived from its characters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTiming {
    /// The word text (no whitespace)
    pub word: String,
    /// Start time of the first character, in seconds
    pub start: f64,
    /// End time of the last character, in seconds
    pub end: f64,
}

/// Character and word level timing for one narration run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingModel {
    characters: Vec<CharTiming>,
    words: Vec<WordTiming>,
}

impl TimingModel {
    /// Build a timing model from the ordered character alignment.
    ///
    /// Word segmentation scans left to right: the first non-whitespace
    /// character of a word fixes its start, every character added advances its
    /// end, and whitespace (or end of input) closes the word out. Zero-width
    /// characters still belong to the owning word's span; leading or trailing
    /// whitespace produces no empty words.
    pub fn from_characters(characters: Vec<CharTiming>) -> Self {
        let words = segment_words(&characters);
        Self { characters, words }
    }

    /// The per-character timings, in narration order
    pub fn characters(&self) -> &[CharTiming] {
        &self.characters
    }

    /// The derived word spans, in narration order
    pub fn words(&self) -> &[WordTiming] {
        &self.words
    }

    /// End time of the final character, or 0 for an empty sequence
    pub fn total_duration(&self) -> f64 {
        self.characters.last().map_or(0.0, |c| c.end)
    }

    /// Whether the model holds any character timings at all
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// The narration text reassembled from the character sequence
    pub fn text(&self) -> String {
        self.characters.iter().map(|c| c.character).collect()
    }
}

/// Greedy whitespace segmentation over the character timings
fn segment_words(characters: &[CharTiming]) -> Vec<WordTiming> {
    let mut words = Vec::new();
    let mut buffer = String::new();
    let mut word_start = 0.0;
    let mut word_end = 0.0;

    for timing in characters {
        if timing.character.is_whitespace() {
            if !buffer.is_empty() {
                words.push(WordTiming {
                    word: std::mem::take(&mut buffer),
                    start: word_start,
                    end: word_end,
                });
            }
        } else {
            if buffer.is_empty() {
                word_start = timing.start;
            }
            buffer.push(timing.character);
            word_end = timing.end;
        }
    }

    // Flush the trailing word when the input does not end in whitespace
    if !buffer.is_empty() {
        words.push(WordTiming {
            word: buffer,
            start: word_start,
            end: word_end,
        });
    }

    words
}
