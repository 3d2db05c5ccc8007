//! Country name to ISO3 lookup seam. The normalizer only sees this trait; the
//! built-in implementation is [`crate::reference::Gazetteer`].
use std::borrow::Cow;

use crate::types::Iso3;

/// Result of resolving one free-text country name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Matched(Iso3),
    /// The name fits more than one country; codes sorted
    Ambiguous(Vec<Iso3>),
    Unmatched,
}

impl LookupOutcome {
    pub fn code(&self) -> Option<Iso3> {
        match self {
            LookupOutcome::Matched(code) => Some(*code),
            _ => None,
        }
    }
}

pub trait CountryLookup {
    fn lookup(&self, name: &str) -> LookupOutcome;
}

/// Fold a country name to the key used for matching: lowercase ASCII words
/// separated by single spaces, common Latin diacritics stripped, `&` read as
/// `and`, apostrophes and periods dropped, and a leading `the` removed.
/// Comma-inverted official names ("Korea, Republic of", "Gambia, The") are
/// put back in reading order first.
pub fn name_key(name: &str) -> String {
    let name = uninvert(name);
    let mut folded = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        match c {
            '\'' | '\u{2019}' | '.' => {}
            '&' => folded.push_str(" and "),
            c if c.is_ascii_alphanumeric() => folded.push(c),
            c => match fold_diacritic(c) {
                Some(base) => folded.push(base),
                None => folded.push(' '),
            },
        }
    }

    let words: Vec<&str> = folded.split_whitespace().collect();
    let words = match words.split_first() {
        Some((&"the", rest)) if !rest.is_empty() => rest,
        _ => &words[..],
    };
    words.join(" ")
}

fn uninvert(name: &str) -> Cow<'_, str> {
    match name.rsplit_once(',') {
        Some((head, tail)) if is_inverted_tail(tail) => {
            Cow::Owned(format!("{} {}", tail.trim(), head.trim()))
        }
        _ => Cow::Borrowed(name),
    }
}

/// Tails that only make sense in front of the head: `The`, `... of`, `... of the`
fn is_inverted_tail(tail: &str) -> bool {
    let words: Vec<String> = tail.split_whitespace().map(str::to_lowercase).collect();
    match words.as_slice() {
        [word] if word == "the" => true,
        [.., last] if last == "of" => true,
        [.., of, the] => of == "of" && the == "the",
        _ => false,
    }
}

fn fold_diacritic(c: char) -> Option<char> {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base)
}
