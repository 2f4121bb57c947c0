//! Numbers to words.
//!
//! Three passes, in this order:
//!
//! 1. ranges (`39-45`) get their hyphen replaced by ` à `,
//! 2. ordinals (`1er`, `1re`, `22ème`, `19e`) are spelled out,
//! 3. every remaining digit run is spelled out as a cardinal.
//!
//! The cardinal pattern matches inside ranges and ordinals, so it has to run last.
use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::Transform;
use crate::numerals;

lazy_static! {
    static ref RANGE: Regex = Regex::new(r"([0-9]+)-([0-9]+)").unwrap();
    static ref ORDINAL: Regex =
        Regex::new(r"\b(?:(?P<fem>1(?:ère|re))|(?P<masc>1er)|(?P<num>[0-9]+)(?:ème|e))\b").unwrap();
    static ref CARDINAL: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// French number expansion.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpandNumbers;

impl ExpandNumbers {
    /// First pass: `39-45` -> `39 à 45`.
    pub fn ranges<'t>(&self, text: &'t str) -> Cow<'t, str> {
        RANGE.replace_all(text, "${1} à ${2}")
    }

    /// Second pass: ordinal markers.
    pub fn ordinals<'t>(&self, text: &'t str) -> Cow<'t, str> {
        ORDINAL.replace_all(text, |caps: &Captures| {
            if caps.name("fem").is_some() {
                "première".to_string()
            } else if caps.name("masc").is_some() {
                "premier".to_string()
            } else {
                caps.name("num")
                    .map(|digits| numerals::ordinal(digits.as_str()))
                    .unwrap_or_default()
            }
        })
    }

    /// Third pass: plain integers.
    pub fn cardinals<'t>(&self, text: &'t str) -> Cow<'t, str> {
        CARDINAL.replace_all(text, |caps: &Captures| numerals::cardinal(&caps[0]))
    }
}

impl Transform for ExpandNumbers {
    fn transform_own(&self, text: String) -> String {
        let text = self.ranges(&text).into_owned();
        let text = self.ordinals(&text).into_owned();
        self.cardinals(&text).into_owned()
    }
}
