//! sentence-level filtering
//!
//! [Validator] applies an ordered chain of rejection rules to a candidate sentence.
//! The first rule that matches rejects the sentence, and its reason is returned as a [Rejection].
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::Filter;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\b\w+\b").unwrap();
    static ref IMAGE_FILE: Regex = Regex::new(r"(?i)Image:|File:|Fichier:").unwrap();
    static ref FORMAT_RESIDUE: Regex = Regex::new(r"\b(?:px|right|left)\b").unwrap();
    static ref ENUMERATION_VERB: Regex =
        Regex::new(r"\b(?:est|sont|était|étaient|a|ont|avait|avaient|sera|seront)\b").unwrap();
    static ref GLOSSARY_COLON: Regex = Regex::new(r"^[A-Z][a-z]+\s*:").unwrap();
    static ref GLOSSARY_PAREN: Regex = Regex::new(r"^[A-Z][a-z]+\s+\(").unwrap();
    static ref FINITE_VERB: Regex = Regex::new(
        r"\b[A-Za-zÀ-ÿ]+\b[\s\w]*\b(?:est|sont|était|étaient|a|ont|avait|avaient|(?:[a-zéèêëàâäôöîïù]+(?:e|es|ent|ons|ez|ait|aient)))\b"
    )
    .unwrap();
    static ref YEAR_RANGE: Regex = Regex::new(r"\(\d{4}\s*[-–]\s*\d{4}\)").unwrap();
    static ref MATH_RESIDUE: Regex = Regex::new(r"[_\^{}\\]").unwrap();
    static ref PARENTHETICAL_LIST: Regex =
        Regex::new(r"^[\w\s]+\s+\([^)]+\)(,\s+[\w\s]+\s+\([^)]+\))+").unwrap();
    static ref FOUR_DIGITS: Regex = Regex::new(r"\d{4}").unwrap();
    static ref BALANCE_PUNCTUATION: Regex = Regex::new(r"[,;:]").unwrap();
}

const MIN_LENGTH: usize = 15;
const SEE_ALSO: &str = "Voir aussi";
const MATH_TOKENS: [&str; 8] = ["lim", "\\to", "\\infty", "→", "ℓ", "}}", "{{", "px"];
const TERMINAL_PUNCTUATION: [char; 3] = ['.', '!', '?'];

/// Reason of a sentence rejection, one per rule of the [Validator] chain.
///
/// Variants are declared in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Less than 15 characters.
    TooShort,
    /// Image/file link leftovers or formatting words (`small`, `px`, `right`, `left`).
    MarkupResidue,
    /// More than one comma every three words (or no word at all).
    CommaDensity,
    /// Comma-separated enumeration without a verb.
    BareEnumeration,
    /// Starts with a "see also" reference.
    SeeAlso,
    /// Looks like `Word: definition` or `Word (…)` and has no verb.
    GlossaryEntry,
    /// Several `(YYYY-YYYY)` year ranges in a comma-separated list.
    BiographicalList,
    /// Mathematical or template residue.
    MathResidue,
    /// No finite verb.
    NoVerb,
    /// `Item (…), Item (…)` enumeration.
    ParentheticalList,
    /// Does not end with `.`, `!` or `?`.
    NoTerminalPunctuation,
    /// More than three four-digit numbers.
    TooManyNumbers,
    /// Three words or less per `,;:` punctuation.
    Unbalanced,
}

impl Rejection {
    /// Every rejection, in chain order.
    pub const ALL: [Rejection; 13] = [
        Rejection::TooShort,
        Rejection::MarkupResidue,
        Rejection::CommaDensity,
        Rejection::BareEnumeration,
        Rejection::SeeAlso,
        Rejection::GlossaryEntry,
        Rejection::BiographicalList,
        Rejection::MathResidue,
        Rejection::NoVerb,
        Rejection::ParentheticalList,
        Rejection::NoTerminalPunctuation,
        Rejection::TooManyNumbers,
        Rejection::Unbalanced,
    ];

    /// 1-based rank of the rule in the chain.
    pub fn rule(&self) -> usize {
        *self as usize + 1
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rejection::TooShort => "too_short",
            Rejection::MarkupResidue => "markup_residue",
            Rejection::CommaDensity => "comma_density",
            Rejection::BareEnumeration => "bare_enumeration",
            Rejection::SeeAlso => "see_also",
            Rejection::GlossaryEntry => "glossary_entry",
            Rejection::BiographicalList => "biographical_list",
            Rejection::MathResidue => "math_residue",
            Rejection::NoVerb => "no_verb",
            Rejection::ParentheticalList => "parenthetical_list",
            Rejection::NoTerminalPunctuation => "no_terminal_punctuation",
            Rejection::TooManyNumbers => "too_many_numbers",
            Rejection::Unbalanced => "unbalanced",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {} ({})", self.rule(), self.name())
    }
}

/// Sentence validator.
///
/// Thresholds are fixed: changing them changes which corpus gets produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Run the rejection chain over a trimmed sentence.
    pub fn check(&self, sentence: &str) -> Result<(), Rejection> {
        if sentence.chars().count() < MIN_LENGTH {
            return Err(Rejection::TooShort);
        }

        if IMAGE_FILE.is_match(sentence)
            || sentence.contains("small")
            || FORMAT_RESIDUE.is_match(sentence)
        {
            return Err(Rejection::MarkupResidue);
        }

        let words = WORD.find_iter(sentence).count();
        let commas = sentence.matches(',').count();

        // commas > words / 3
        if words == 0 || 3 * commas > words {
            return Err(Rejection::CommaDensity);
        }

        if commas > 3 && sentence.matches('.').count() < 2 && !ENUMERATION_VERB.is_match(sentence)
        {
            return Err(Rejection::BareEnumeration);
        }

        if sentence.starts_with(SEE_ALSO) {
            return Err(Rejection::SeeAlso);
        }

        let has_verb = FINITE_VERB.is_match(sentence);

        if (GLOSSARY_COLON.is_match(sentence) || GLOSSARY_PAREN.is_match(sentence)) && !has_verb {
            return Err(Rejection::GlossaryEntry);
        }

        if YEAR_RANGE.find_iter(sentence).count() > 1 && commas > 2 {
            return Err(Rejection::BiographicalList);
        }

        if MATH_TOKENS.iter().any(|token| sentence.contains(token)) || MATH_RESIDUE.is_match(sentence)
        {
            return Err(Rejection::MathResidue);
        }

        if !has_verb {
            return Err(Rejection::NoVerb);
        }

        if PARENTHETICAL_LIST.is_match(sentence) {
            return Err(Rejection::ParentheticalList);
        }

        if !sentence.ends_with(&TERMINAL_PUNCTUATION[..]) {
            return Err(Rejection::NoTerminalPunctuation);
        }

        if FOUR_DIGITS.find_iter(sentence).count() > 3 {
            return Err(Rejection::TooManyNumbers);
        }

        // words / punctuation <= 3
        let punctuation = BALANCE_PUNCTUATION.find_iter(sentence).count();
        if punctuation > 0 && words <= 3 * punctuation {
            return Err(Rejection::Unbalanced);
        }

        Ok(())
    }
}

impl Filter<&str> for Validator {
    fn detect(&self, sentence: &str) -> bool {
        self.check(sentence).is_ok()
    }
}
