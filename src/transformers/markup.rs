//! Wiki markup removal.
//!
//! Rules are applied in a fixed order, and the order matters:
//!
//! 1. redirects short-circuit to an empty body,
//! 2. math (`<math>`, LaTeX commands, `$…$`) and math symbols go first, so that formula
//!    delimiters do not leak into link and template parsing,
//! 3. category/portal blocks and tables are dropped before templates,
//! 4. templates are removed innermost first, then comments, references and any remaining tag,
//! 5. links are unwrapped (the visible text is kept) once nested templates are gone,
//! 6. emphasis, headings, list markers, table lines and HTML attributes are removed,
//! 7. whitespace is collapsed last.
use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

use super::Transform;

type Rule = (Regex, &'static str);

fn compile(table: &[(&str, &'static str)]) -> Vec<Rule> {
    table
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
        .collect()
}

lazy_static! {
    static ref REDIRECT: Regex = Regex::new(r"(?i)^\s*#redirect").unwrap();

    /// Math, categories and tables.
    static ref STRUCTURE: Vec<Rule> = compile(&[
        (r"(?s)<math[^>]*>.*?</math>", ""),
        (r"\\lim_[^}]+\}|\\to|\\[a-zA-Z]+", ""),
        (r"\$\$[^$]*\$\$|\$[^$]*\$", ""),
        (r"[+*^_~→∞ℓ∑∫≤≥±×÷∈∀∃√]", " "),
        (r"\[\[(?:Catégorie|Category):[^\]]*\]\]", ""),
        (r"(?m)(?:Catégorie|Category|Portail|Portal):.*$", ""),
        (r"(?s)\{\|.*?\|\}", " "),
    ]);

    /// A template that contains no other template.
    static ref INNER_TEMPLATE: Regex = Regex::new(r"\{\{[^{}]*\}\}").unwrap();

    /// Unbalanced template leftovers, tags, links and line-level markup.
    static ref INLINE: Vec<Rule> = compile(&[
        (r"(?s)\{\{.*?\}\}", " "),
        (r"(?s)<!--.*?-->", " "),
        (r"<ref[^>]*/>", " "),
        (r"(?s)<ref(?:\s[^>]*)?>.*?</ref>", " "),
        (r"<[^>]+>", " "),
        (r"\[\[(?:File|Image|Fichier):[^\]]*\]\]", ""),
        (r"\[\[[^\]]*\|([^\]]*)\]\]", "${1}"),
        (r"\[\[([^\]]*)\]\]", "${1}"),
        (r"\[https?://[^\s\]]+\s+([^\]]*)\]", "${1}"),
        (r"\[https?://[^\s\]]+\]", ""),
        (r"'{2,}", ""),
        (r"==+[^=]+==+", " "),
        (r"(?m)^[*#:;]+[ \t]*", ""),
        (r"(?m)^[|!].*$", ""),
        (r"(?i)Image:.*?(?:\.jpg|\.png|\.gif)", ""),
        (
            r#"(?:class|style|align|cellpadding|cellspacing|colspan|bgcolor|width|height)="[^"]*""#,
            ""
        ),
    ]);

    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Replace every match, without reallocating when nothing matches.
fn substitute(pattern: &Regex, text: String, replacement: &str) -> String {
    let replaced = match pattern.replace_all(&text, replacement) {
        Cow::Owned(replaced) => Some(replaced),
        Cow::Borrowed(_) => None,
    };
    replaced.unwrap_or(text)
}

/// Strips wiki markup from a page body, yielding plain prose.
///
/// An empty result means that the body holds no text (redirects, markup-only pages).
#[derive(Debug, Clone, Copy, Default)]
pub struct StripMarkup;

impl Transform for StripMarkup {
    fn transform_own(&self, text: String) -> String {
        if REDIRECT.is_match(&text) {
            return String::new();
        }

        let mut text = STRUCTURE
            .iter()
            .fold(text, |text, (pattern, replacement)| {
                substitute(pattern, text, replacement)
            });

        while INNER_TEMPLATE.is_match(&text) {
            text = substitute(&INNER_TEMPLATE, text, " ");
        }

        let text = INLINE.iter().fold(text, |text, (pattern, replacement)| {
            substitute(pattern, text, replacement)
        });

        WHITESPACE.replace_all(&text, " ").trim().to_string()
    }
}
