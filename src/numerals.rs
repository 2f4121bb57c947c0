//! French numerals.
//!
//! Spells out digit strings of any length as French cardinals or ordinals,
//! following the traditional orthography (`vingt et un`, `quatre-vingts`, `deux cents`)
//! and the long scale (`million`, `milliard`, `billion`, …).
//!
//! Numbers that are too large for the scale table are read digit by digit.

const UNITS: [&str; 17] = [
    "zéro", "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf", "dix", "onze",
    "douze", "treize", "quatorze", "quinze", "seize",
];

const TENS: [&str; 7] = [
    "", "dix", "vingt", "trente", "quarante", "cinquante", "soixante",
];

/// Long scale, starting at 10^6. Each name is 10^3 times the previous one.
const SCALES: [&str; 20] = [
    "million",
    "milliard",
    "billion",
    "billiard",
    "trillion",
    "trilliard",
    "quadrillion",
    "quadrilliard",
    "quintillion",
    "quintilliard",
    "sextillion",
    "sextilliard",
    "septillion",
    "septilliard",
    "octillion",
    "octilliard",
    "nonillion",
    "nonilliard",
    "décillion",
    "décilliard",
];

/// Below 100.
///
/// `final_form` controls the plural of `quatre-vingts`, that is lost before `mille`.
fn tens(n: u32, final_form: bool) -> String {
    match n {
        0..=16 => UNITS[n as usize].to_string(),
        17..=19 => format!("dix-{}", UNITS[(n - 10) as usize]),
        20..=69 => {
            let (t, u) = ((n / 10) as usize, n % 10);
            match u {
                0 => TENS[t].to_string(),
                1 => format!("{} et un", TENS[t]),
                _ => format!("{}-{}", TENS[t], UNITS[u as usize]),
            }
        }
        71 => "soixante et onze".to_string(),
        70..=79 => format!("soixante-{}", tens(n - 60, final_form)),
        80 if final_form => "quatre-vingts".to_string(),
        80 => "quatre-vingt".to_string(),
        _ => format!("quatre-vingt-{}", tens(n - 80, final_form)),
    }
}

/// Below 1000.
fn hundreds(n: u32, final_form: bool) -> String {
    let (h, rest) = (n / 100, n % 100);
    let mut words = match h {
        0 => String::new(),
        1 => "cent".to_string(),
        _ if rest == 0 && final_form => format!("{} cents", UNITS[h as usize]),
        _ => format!("{} cent", UNITS[h as usize]),
    };

    if rest > 0 || h == 0 {
        if !words.is_empty() {
            words.push(' ');
        }
        words.push_str(&tens(rest, final_form));
    }
    words
}

fn digit_by_digit(digits: &str) -> String {
    digits
        .bytes()
        .map(|b| UNITS[(b - b'0') as usize])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Spell out a string of ASCII digits as a French cardinal.
///
/// Leading zeros are ignored. Non-digit input yields an empty string.
pub fn cardinal(digits: &str) -> String {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return String::new();
    }
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return UNITS[0].to_string();
    }

    // groups of three digits, least significant first
    let groups: Vec<u32> = digits
        .as_bytes()
        .rchunks(3)
        .map(|chunk| {
            chunk
                .iter()
                .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'))
        })
        .collect();

    if groups.len() > SCALES.len() + 2 {
        return digit_by_digit(digits);
    }

    let mut words: Vec<String> = Vec::new();
    for (rank, &value) in groups.iter().enumerate().rev() {
        if value == 0 {
            continue;
        }
        match rank {
            0 => words.push(hundreds(value, true)),
            1 if value == 1 => words.push("mille".to_string()),
            1 => words.push(format!("{} mille", hundreds(value, false))),
            _ => {
                let scale = SCALES[rank - 2];
                let plural = if value > 1 { "s" } else { "" };
                words.push(format!("{} {}{}", hundreds(value, true), scale, plural));
            }
        }
    }
    words.join(" ")
}

/// Spell out a string of ASCII digits as a French ordinal (`premier`, `deuxième`, …).
pub fn ordinal(digits: &str) -> String {
    let words = cardinal(digits);
    if words.is_empty() {
        return words;
    }
    if words == "un" {
        return "premier".to_string();
    }

    let split = words.rfind(|c: char| c == ' ' || c == '-').map_or(0, |idx| idx + 1);
    let (head, last) = words.split_at(split);

    let mut last = last.to_string();
    let plural = last == "vingts"
        || last == "cents"
        || SCALES
            .iter()
            .any(|scale| last.len() == scale.len() + 1 && last.starts_with(scale));
    if plural {
        last.pop();
    }
    if last.ends_with('e') {
        last.pop();
    }
    match last.as_str() {
        "cinq" => last.push('u'),
        "neuf" => {
            last.pop();
            last.push('v');
        }
        _ => (),
    }

    format!("{}{}ième", head, last)
}
