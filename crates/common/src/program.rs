//! Program text format.
//!
//! A program is one line of comma-separated signed decimal integers, e.g.
//! `1,9,10,3,2,3,11,0,99,30,40,50`. Surrounding whitespace (including a
//! trailing newline) and whitespace around individual values is accepted.

use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;

/// An Intcode program: the initial memory image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    words: Vec<i64>,
}

impl Program {
    /// Create a program from raw words.
    pub fn new(words: Vec<i64>) -> Self {
        Self { words }
    }

    /// Parse comma-separated program text.
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DecodeError::EmptyProgram);
        }

        let words = text
            .split(',')
            .enumerate()
            .map(|(index, token)| {
                let token = token.trim();
                token
                    .parse::<i64>()
                    .map_err(|_| DecodeError::InvalidInteger {
                        index,
                        token: token.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { words })
    }

    /// The initial memory image.
    pub fn words(&self) -> &[i64] {
        &self.words
    }

    /// Consume the program, yielding its words.
    pub fn into_words(self) -> Vec<i64> {
        self.words
    }

    /// Number of words in the program.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the program has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromStr for Program {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Vec<i64>> for Program {
    fn from(words: Vec<i64>) -> Self {
        Self::new(words)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{word}")?;
        }
        Ok(())
    }
}
