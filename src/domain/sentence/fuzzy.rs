//! Kana-tolerant match patterns for stored sentence text
//!
//! A head word such as 食べる should also find sentences containing 食べた or
//! 食べない. Each maximal run of kana in the term becomes "zero up to the same
//! number of kana"; every other character is matched literally.
//!
//! Patterns use only syntax understood by both the `regex` crate and
//! PostgreSQL advanced regular expressions: bracketed ranges of literal code
//! points, `{0,n}` bounds and backslash-escaped metacharacters.

use std::fmt;

use crate::domain::storage::PatternFilter;

use super::term::Term;

/// Hiragana and katakana letters with their iteration marks, the long vowel
/// mark ー, Katakana Phonetic Extensions and halfwidth katakana (whose
/// ｰ, ﾞ and ﾟ are spelled as separate characters and stay part of the run).
///
/// Left out: combining and spacing voicing marks (U+3099-U+309C), ゠ and the
/// middle dot ・, which separate words rather than spell them.
const KANA_RANGES: [(char, char); 6] = [
    ('\u{3041}', '\u{3096}'),
    ('\u{309D}', '\u{309F}'),
    ('\u{30A1}', '\u{30FA}'),
    ('\u{30FC}', '\u{30FF}'),
    ('\u{31F0}', '\u{31FF}'),
    ('\u{FF66}', '\u{FF9F}'),
];

pub fn is_kana(c: char) -> bool {
    KANA_RANGES
        .iter()
        .any(|(start, end)| (*start..=*end).contains(&c))
}

fn kana_class() -> String {
    let mut class = String::from("[");
    for (start, end) in KANA_RANGES {
        class.push(start);
        class.push('-');
        class.push(end);
    }
    class.push(']');
    class
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyPattern(String);

impl FuzzyPattern {
    pub fn from_term(term: &Term) -> Self {
        let class = kana_class();
        let mut pattern = String::new();
        let mut literal = String::new();
        let mut kana_run = 0usize;

        for c in term.as_str().chars() {
            if is_kana(c) {
                if !literal.is_empty() {
                    pattern.push_str(&regex::escape(&literal));
                    literal.clear();
                }
                kana_run += 1;
            } else {
                if kana_run > 0 {
                    pattern.push_str(&format!("{}{{0,{}}}", class, kana_run));
                    kana_run = 0;
                }
                literal.push(c);
            }
        }

        if kana_run > 0 {
            pattern.push_str(&format!("{}{{0,{}}}", class, kana_run));
        }
        if !literal.is_empty() {
            pattern.push_str(&regex::escape(&literal));
        }

        Self(pattern)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filter applying this pattern to `field`
    pub fn to_filter(&self, field: &str) -> PatternFilter {
        PatternFilter::new(field, self.0.clone())
    }
}

impl fmt::Display for FuzzyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
