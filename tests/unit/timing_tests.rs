/*!
 * Unit tests for the speech timing model
 */

use narrimate::{CharTiming, TimingModel};

fn evenly_timed(text: &str, seconds_per_char: f64) -> Vec<CharTiming> {
    text.chars()
        .enumerate()
        .map(|(i, c)| {
            CharTiming::new(
                c,
                i as f64 * seconds_per_char,
                (i + 1) as f64 * seconds_per_char,
            )
        })
        .collect()
}

#[test]
fn test_model_keeps_characters_in_narration_order() {
    let model = TimingModel::from_characters(evenly_timed("abc", 0.1));
    let chars: Vec<char> = model.characters().iter().map(|c| c.character).collect();
    assert_eq!(chars, vec!['a', 'b', 'c']);
    for pair in model.characters().windows(2) {
        assert!(pair[0].start <= pair[1].start);
    }
}

#[test]
fn test_word_spans_match_whitespace_boundaries() {
    let model = TimingModel::from_characters(evenly_timed("vector addition", 0.1));
    assert_eq!(model.words().len(), 2);
    assert_eq!(model.words()[0].word, "vector");
    assert_eq!(model.words()[1].word, "addition");

    // The second word starts after the space between them
    assert!(model.words()[1].start > model.words()[0].end);
}

#[test]
fn test_total_duration_tracks_the_final_character() {
    let model = TimingModel::from_characters(evenly_timed("hi there", 0.25));
    assert_eq!(model.total_duration(), 8.0 * 0.25);

    let empty = TimingModel::from_characters(Vec::new());
    assert_eq!(empty.total_duration(), 0.0);
    assert!(empty.is_empty());
}

#[test]
fn test_text_reassembles_the_narration() {
    let model = TimingModel::from_characters(evenly_timed("one two", 0.1));
    assert_eq!(model.text(), "one two");
}

#[test]
fn test_consecutive_whitespace_yields_no_empty_words() {
    let model = TimingModel::from_characters(evenly_timed("a  \t b", 0.1));
    let words: Vec<&str> = model.words().iter().map(|w| w.word.as_str()).collect();
    assert_eq!(words, vec!["a", "b"]);
}
