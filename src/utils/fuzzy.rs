//! Fuzzy matching utilities for answer checking
//!
//! Decides whether a typed or spoken guess names one of the answers on the
//! board. Matching is layered: exact, then substring (either direction),
//! then a bounded Levenshtein distance.

use crate::core::normalize;
use tracing::debug;

/// Strings longer than this get the looser edit allowance
const SHORT_ANSWER_LEN: usize = 4;
/// Edits tolerated once the longer string exceeds `SHORT_ANSWER_LEN`
const LONG_ANSWER_MAX_EDITS: usize = 2;
/// Edits tolerated for short strings
const SHORT_ANSWER_MAX_EDITS: usize = 1;

/// Anything that can be matched against a guess
pub trait Candidate {
    fn text(&self) -> &str;
}

impl Candidate for str {
    fn text(&self) -> &str {
        self
    }
}

impl Candidate for String {
    fn text(&self) -> &str {
        self.as_str()
    }
}

impl<T: Candidate + ?Sized> Candidate for &T {
    fn text(&self) -> &str {
        (**self).text()
    }
}

/// Levenshtein distance between two strings, counted in chars
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Maximum edit distance accepted for a pair whose longer side is `max_len` chars
pub fn edit_threshold(max_len: usize) -> usize {
    if max_len > SHORT_ANSWER_LEN {
        LONG_ANSWER_MAX_EDITS
    } else {
        SHORT_ANSWER_MAX_EDITS
    }
}

/// Check whether `guess` and `answer` name the same answer
///
/// Empty (after normalization) strings never match.
pub fn fuzzy_match(guess: &str, answer: &str) -> bool {
    let guess = normalize(guess);
    let answer = normalize(answer);

    if guess.is_empty() || answer.is_empty() {
        return false;
    }

    // 1. Exact
    if guess == answer {
        return true;
    }

    // 2. Substring, either direction
    if answer.contains(&guess) || guess.contains(&answer) {
        return true;
    }

    // 3. Edit distance
    let distance = levenshtein(&guess, &answer);
    let max_len = guess.chars().count().max(answer.chars().count());
    let matched = distance <= edit_threshold(max_len);

    debug!(
        "fuzzy '{}' vs '{}': distance {} (max len {}) -> {}",
        guess, answer, distance, max_len, matched
    );

    matched
}

/// Find the position of the first candidate that fuzzy matches the guess
pub fn find_fuzzy_match_index<C: Candidate>(guess: &str, candidates: &[C]) -> Option<usize> {
    candidates
        .iter()
        .position(|candidate| fuzzy_match(guess, candidate.text()))
}

/// Find the first candidate, in list order, that fuzzy matches the guess
///
/// Returns the original element so callers keep its id, points, etc.
pub fn find_fuzzy_match<'a, C: Candidate>(guess: &str, candidates: &'a [C]) -> Option<&'a C> {
    candidates
        .iter()
        .find(|candidate| fuzzy_match(guess, candidate.text()))
}
