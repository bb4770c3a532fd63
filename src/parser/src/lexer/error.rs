//! Lexer errors

use std::{error, fmt};

use diagnostic::Caret;

/// Lexical errors with all the contextual information needed present it nicely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    EmptyRadixLiteral(Caret, u32),
    HexMantissaNoExponent(Caret),
    InvalidDigit(Caret, char, u32),
    InvalidEscape(Caret, char),
    InvalidFloatExponent(Caret),
    NotStartOfToken(Caret, char),
    UnclosedCharacter(Caret),
    UnclosedComment(Caret),
    UnclosedRawString(Caret),
    UnclosedString(Caret),
    UnexpectedEOF(Caret),
    WrongRuneLength(Caret),
}

impl Error {
    /// Where the problem was found.
    pub fn location(&self) -> Caret {
        use Error::*;
        match self {
            EmptyRadixLiteral(c, _)
            | HexMantissaNoExponent(c)
            | InvalidDigit(c, _, _)
            | InvalidEscape(c, _)
            | InvalidFloatExponent(c)
            | NotStartOfToken(c, _)
            | UnclosedCharacter(c)
            | UnclosedComment(c)
            | UnclosedRawString(c)
            | UnclosedString(c)
            | UnexpectedEOF(c)
            | WrongRuneLength(c) => *c,
        }
    }
}

fn radix_name(radix: u32) -> &'static str {
    match radix {
        2 => "binary",
        8 => "octal",
        16 => "hexadecimal",
        _ => "decimal",
    }
}

impl Error {
    /// The message without the location prefix.
    pub fn message(&self) -> String {
        match self {
            Error::EmptyRadixLiteral(_, radix) => {
                format!("{} literal has no digits", radix_name(*radix))
            }
            Error::HexMantissaNoExponent(_) => {
                "hexadecimal mantissa requires a 'p' exponent".into()
            }
            Error::InvalidDigit(_, c, radix) => {
                format!("invalid digit '{}' in {} literal", c, radix_name(*radix))
            }
            Error::InvalidEscape(_, c) => {
                format!("unknown escape sequence '\\{}'", c)
            }
            Error::InvalidFloatExponent(_) => "exponent has no digits".into(),
            Error::NotStartOfToken(_, c) => format!("invalid character {:?}", c),
            Error::UnclosedCharacter(_) => "rune literal not terminated".into(),
            Error::UnclosedComment(_) => "comment not terminated".into(),
            Error::UnclosedRawString(_) => {
                "raw string literal not terminated".into()
            }
            Error::UnclosedString(_) => "string literal not terminated".into(),
            Error::UnexpectedEOF(_) => "unexpected end of input".into(),
            Error::WrongRuneLength(_) => {
                "rune literal must hold exactly one character".into()
            }
        }
    }
}

// These mirror the wording of Go's own scanner where there is one, so the
// messages look familiar next to `go build` output.
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location(), self.message())
    }
}

impl error::Error for Error {}
