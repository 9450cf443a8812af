//! Input tokenization.
//!
//! Splits player input into whitespace-delimited words while remembering
//! where each word sits in the original line, so that free-text slots can
//! recover the raw remainder verbatim.

/// A word from player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// The word as typed.
    pub text: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

/// Tokenizes player input.
pub struct InputTokenizer;

impl InputTokenizer {
    /// Splits `input` on whitespace. Case and punctuation are preserved.
    #[must_use]
    pub fn tokenize(input: &str) -> Vec<Token<'_>> {
        let mut tokens = Vec::new();
        let mut start = None;

        for (i, ch) in input.char_indices() {
            match (ch.is_whitespace(), start) {
                (true, Some(s)) => {
                    tokens.push(Token {
                        text: &input[s..i],
                        start: s,
                        end: i,
                    });
                    start = None;
                }
                (false, None) => start = Some(i),
                _ => {}
            }
        }
        if let Some(s) = start {
            tokens.push(Token {
                text: &input[s..],
                start: s,
                end: input.len(),
            });
        }

        tokens
    }

    /// Splits a command line into its first word and the trimmed rest.
    ///
    /// ```
    /// use parley_parser::tokenizer::InputTokenizer;
    ///
    /// assert_eq!(InputTokenizer::split_verb("  take  the frog "), ("take", "the frog"));
    /// assert_eq!(InputTokenizer::split_verb("look"), ("look", ""));
    /// ```
    #[must_use]
    pub fn split_verb(line: &str) -> (&str, &str) {
        let line = line.trim();
        match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        }
    }
}
