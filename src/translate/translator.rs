//! All-or-nothing sentence translation.
use std::fmt;

use super::{tokenize, Lexicon};

/// A sentence holding words that are not in the lexicon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Untranslatable {
    /// Unknown words, lower-cased, in sentence order (repeated if repeated).
    pub missing: Vec<String>,
}

impl fmt::Display for Untranslatable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown words: {}", self.missing.join(", "))
    }
}

/// Translates sentences with a shared, read-only [Lexicon].
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> Translator<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Translate every word of `sentence`, each code being followed by the punctuation glued to its word.
    /// Tokens are separated by a space.
    ///
    /// ```
    /// use stenocorpus::translate::{Lexicon, Translator};
    ///
    /// let lexicon: Lexicon = vec![("bonjour", "BNJR")].into_iter().collect();
    /// let translator = Translator::new(&lexicon);
    /// assert_eq!(translator.translate("Bonjour."), Ok("BNJR.".to_string()));
    /// ```
    pub fn translate(&self, sentence: &str) -> Result<String, Untranslatable> {
        let mut parts = Vec::new();
        let mut missing = Vec::new();

        for token in tokenize(sentence) {
            let mut part = String::new();
            if !token.word.is_empty() {
                match self.lexicon.get(&token.word) {
                    Some(codes) => part.push_str(codes),
                    None => {
                        missing.push(token.word);
                        continue;
                    }
                }
            }
            if let Some(punct) = token.punct {
                part.push(punct);
            }
            parts.push(part);
        }

        if missing.is_empty() {
            Ok(parts.join(" "))
        } else {
            Err(Untranslatable { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Translator, Untranslatable};
    use crate::translate::Lexicon;

    fn lexicon() -> Lexicon {
        vec![
            ("chat", "KAT"),
            ("noir", "NWR"),
            ("le", "HR-"),
            ("bonjour", "BNJR"),
            ("il", "EUL"),
            ("dit", "TKEU"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn single_word() {
        let lexicon = lexicon();
        assert_eq!(
            Translator::new(&lexicon).translate("Bonjour."),
            Ok("BNJR.".to_string())
        );
    }

    #[test]
    fn missing_words() {
        let lexicon: Lexicon = vec![("chat", "KAT"), ("noir", "NWR")].into_iter().collect();
        assert_eq!(
            Translator::new(&lexicon).translate("le chat noir."),
            Err(Untranslatable {
                missing: vec!["le".to_string()]
            })
        );
    }

    #[test]
    fn every_missing_word_is_listed() {
        let lexicon = lexicon();
        let err = Translator::new(&lexicon)
            .translate("Le chien et le loup.")
            .unwrap_err();
        assert_eq!(err.missing, vec!["chien", "et", "loup"]);
    }

    #[test]
    fn punctuation_tokens() {
        let lexicon = lexicon();
        assert_eq!(
            Translator::new(&lexicon).translate("Il dit : « bonjour » !"),
            Ok("EUL TKEU : « BNJR » !".to_string())
        );
        assert_eq!(
            Translator::new(&lexicon).translate("Le chat, noir."),
            Ok("HR- KAT, NWR.".to_string())
        );
    }

    #[test]
    fn empty_sentence() {
        let lexicon = lexicon();
        assert_eq!(Translator::new(&lexicon).translate(""), Ok(String::new()));
    }
}
