//! Sentence tokenization.

/// Sentence-final punctuation.
pub const END_PUNCTUATION: [char; 3] = ['.', '!', '?'];

/// Punctuation found inside sentences.
pub const MID_PUNCTUATION: [char; 16] = [
    ':', ',', ';', '-', '—', '(', ')', '[', ']', '{', '}', '<', '>', '"', '«', '»',
];

/// A word and the punctuation that immediately follows it.
///
/// A punctuation sign that is not glued to a word gets its own token, with an empty word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    pub punct: Option<char>,
}

impl Token {
    fn new(word: String, punct: Option<char>) -> Self {
        Self { word, punct }
    }
}

fn is_punctuation(c: char) -> bool {
    END_PUNCTUATION.contains(&c) || MID_PUNCTUATION.contains(&c)
}

/// Lowercase `sentence` and split it into [Token]s.
///
/// Any other character (letters, digits, apostrophes…) is part of a word,
/// so `d'habitants` is a single word.
pub fn tokenize(sentence: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    for c in sentence.trim().to_lowercase().chars() {
        if c.is_whitespace() {
            if !word.is_empty() {
                tokens.push(Token::new(std::mem::take(&mut word), None));
            }
        } else if is_punctuation(c) {
            tokens.push(Token::new(std::mem::take(&mut word), Some(c)));
        } else {
            word.push(c);
        }
    }

    if !word.is_empty() {
        tokens.push(Token::new(word, None));
    }
    tokens
}
