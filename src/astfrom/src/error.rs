//! Errors

use std::fmt;

use thiserror::Error;

use crate::Category;

/// Why a fragment couldn't be parsed at some rung.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The parser rejected the text.
    #[error("{source}")]
    Parse {
        category: Category,
        source: syntax::Error,
    },

    /// The parser hit one of the standard library's runtime checks.
    #[error("runtime error: {message}")]
    Runtime { fault: Fault, message: String },

    /// The parser panicked for some other reason.
    #[error("panic: {0}")]
    Panic(String),
}

impl Error {
    /// The rung the error came from, if it came from the parser.
    pub fn category(&self) -> Option<Category> {
        match self {
            Error::Parse { category, .. } => Some(*category),
            _ => None,
        }
    }
}

/// The kinds of runtime check failure a panic message can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    IndexOutOfBounds,
    SliceRange,
    Overflow,
    DivideByZero,
    Unwrap,
}

impl Fault {
    /// Recognize the message of a panic raised by one of the standard
    /// library's checks.
    pub fn classify(message: &str) -> Option<Fault> {
        const PATTERNS: &[(&str, Fault)] = &[
            ("index out of bounds", Fault::IndexOutOfBounds),
            ("range start index", Fault::SliceRange),
            ("range end index", Fault::SliceRange),
            ("slice index starts at", Fault::SliceRange),
            ("byte index", Fault::SliceRange),
            ("with overflow", Fault::Overflow),
            ("divide by zero", Fault::DivideByZero),
            ("divisor of zero", Fault::DivideByZero),
            ("called `Option::unwrap()`", Fault::Unwrap),
            ("called `Result::unwrap()`", Fault::Unwrap),
        ];

        PATTERNS
            .iter()
            .find(|(pattern, _)| message.contains(pattern))
            .map(|(_, fault)| *fault)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Fault::IndexOutOfBounds => "index out of bounds",
            Fault::SliceRange => "slice range",
            Fault::Overflow => "overflow",
            Fault::DivideByZero => "divide by zero",
            Fault::Unwrap => "unwrap",
        };
        f.write_str(name)
    }
}
