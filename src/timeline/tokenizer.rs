use once_cell::sync::Lazy;
use regex::Regex;

// @const: Word characters; everything else separates tokens
static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z']+").unwrap());

/// Lazily split `text` into word tokens.
///
/// The whole text is lower-cased before matching, so characters whose
/// lower-case form is ASCII (the Kelvin sign, for one) still form words.
pub fn tokenize(text: &str) -> Tokens {
    Tokens {
        lowered: text.to_lowercase(),
        pos: 0,
    }
}

/// Iterator over the word tokens of a text
#[derive(Debug, Clone)]
pub struct Tokens {
    lowered: String,
    pos: usize,
}

impl Iterator for Tokens {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let m = WORD_REGEX.find_at(&self.lowered, self.pos)?;
        self.pos = m.end();
        Some(m.as_str().to_string())
    }
}

/// Restartable token stream: every `iter()` call starts over from the first token
#[derive(Debug, Clone, Copy)]
pub struct TokenStream<'t> {
    text: &'t str,
}

impl<'t> TokenStream<'t> {
    pub fn new(text: &'t str) -> Self {
        Self { text }
    }

    pub fn iter(&self) -> Tokens {
        tokenize(self.text)
    }
}

impl<'t> IntoIterator for &TokenStream<'t> {
    type Item = String;
    type IntoIter = Tokens;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
