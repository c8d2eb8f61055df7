//! Word tokenizer and case-insensitive token sets.
//!
//! Tokens keep their original casing. Every comparison between tokens goes
//! through `TokenSet`, which folds case once on insertion.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// Splits text into maximal runs of word characters (Unicode letters, digits,
/// marks and underscore). Never fails; empty input yields no tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    WORD_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// An insertion-ordered set of tokens with case-insensitive membership.
/// The first spelling seen for a token is the one kept.
#[derive(Debug, Clone, Default)]
pub struct TokenSet {
    tokens: Vec<String>,
    keys: HashSet<String>,
}

impl TokenSet {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for token in tokens {
            let token = token.as_ref();
            if set.keys.insert(token.to_lowercase()) {
                set.tokens.push(token.to_string());
            }
        }
        set
    }

    pub fn from_text(text: &str) -> Self {
        Self::from_tokens(tokenize(text))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.keys.contains(&token.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Tokens of `self` also present in `other`, in `self`'s order and spelling.
    pub fn intersection<'a>(&'a self, other: &'a TokenSet) -> impl Iterator<Item = &'a str> {
        self.iter().filter(move |t| other.contains(t))
    }

    /// Tokens of `self` absent from `other`, in `self`'s order and spelling.
    pub fn difference<'a>(&'a self, other: &'a TokenSet) -> impl Iterator<Item = &'a str> {
        self.iter().filter(move |t| !other.contains(t))
    }
}
