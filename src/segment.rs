//! Sentence segmentation.
//!
//! Boundaries come from [unicode_segmentation] (UAX #29), that breaks after every
//! `. ` followed by an uppercase letter. Pieces that end with a French abbreviation
//! (`M. Dupont`) are joined back with the next one. Pieces that end with a capital initial
//! (`J. Verne`) are joined only when the next piece starts with something that looks like a name,
//! so that `la vitamine A. Elle est utile.` still gives two sentences.
use unicode_segmentation::UnicodeSegmentation;

/// Abbreviations that do not end a sentence.
const ABBREVIATIONS: [&str; 15] = [
    "M.", "MM.", "Mme.", "Dr.", "St.", "Ste.", "cf.", "p.", "pp.", "vol.", "av.", "apr.", "env.",
    "chap.", "éd.",
];

/// Words that open a sentence rather than continue a name.
const OPENERS: [&str; 40] = [
    "Il", "Elle", "Ils", "Elles", "On", "Je", "Tu", "Nous", "Vous", "Le", "La", "Les", "Un", "Une",
    "Des", "Ce", "Cet", "Cette", "Ces", "Son", "Sa", "Ses", "Leur", "Leurs", "En", "Dans", "Au",
    "Aux", "Du", "De", "Par", "Pour", "Sur", "Avec", "Mais", "Et", "Ou", "Donc", "Puis", "Ainsi",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ending {
    Sentence,
    Abbreviation,
    Initial,
}

/// How `piece` ends, judging by its last word.
fn ending(piece: &str) -> Ending {
    let last = match piece.split_whitespace().last() {
        Some(word) => word.trim_start_matches(|c: char| !c.is_alphanumeric()),
        None => return Ending::Sentence,
    };

    if ABBREVIATIONS.contains(&last) {
        return Ending::Abbreviation;
    }

    let mut chars = last.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(initial), Some('.'), None) if initial.is_uppercase() => Ending::Initial,
        _ => Ending::Sentence,
    }
}

/// `true` if `piece` starts with a capitalized word that is neither an elided article
/// (`L'`, `C'`) nor a usual sentence opener.
fn starts_with_name(piece: &str) -> bool {
    let word = match piece.split_whitespace().next() {
        Some(word) => word,
        None => return false,
    };
    let end = word
        .char_indices()
        .find(|(_, c)| !c.is_alphabetic())
        .map_or(word.len(), |(idx, _)| idx);
    let (name, rest) = word.split_at(end);

    let capitalized = name.chars().next().map_or(false, char::is_uppercase);
    let elided = rest.starts_with('\'') || rest.starts_with('’');
    capitalized && !elided && !OPENERS.contains(&name)
}

/// Split text into trimmed, non-empty sentences.
pub fn sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut pending = String::new();
    let mut pieces = text.split_sentence_bounds().peekable();

    while let Some(piece) = pieces.next() {
        pending.push_str(piece);
        let join = match ending(pending.trim_end()) {
            Ending::Sentence => false,
            Ending::Abbreviation => true,
            Ending::Initial => pieces.peek().map_or(false, |next| starts_with_name(next)),
        };
        if join {
            continue;
        }
        let sentence = pending.trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        pending.clear();
    }

    let sentence = pending.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }

    sentences
}
