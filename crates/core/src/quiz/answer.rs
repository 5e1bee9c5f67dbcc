//! Free-text answer checking.
//!
//! Guesses are compared token-wise: a guess is accepted when, after
//! normalization, it equals any single space-separated word of the accepted
//! answer. "shakespeare" therefore matches "William Shakespeare".

/// Characters dropped before comparison.
const STRIPPED: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

/// Strips punctuation and lower-cases `text`. Whitespace is left untouched.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|ch| !STRIPPED.contains(ch))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns true when the normalized guess equals one word of the normalized answer.
///
/// Words are split on single spaces; empty words never match, so neither an
/// empty answer nor an empty guess can ever be correct.
#[must_use]
pub fn is_correct(guess: &str, accepted_answer: &str) -> bool {
    let guess = normalize(guess);
    if guess.is_empty() {
        return false;
    }
    normalize(accepted_answer)
        .split(' ')
        .any(|token| !token.is_empty() && token == guess)
}
