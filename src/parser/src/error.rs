//! Parser errors

use std::{error, fmt};

use diagnostic::{Diagnostic, Span};

use crate::lexer;

/// Errors the [`Parser`][crate::Parser] itself knows about, plus whatever
/// errors the grammar built on top of it wants to raise as `S`.
#[derive(Debug, Clone, PartialEq)]
pub enum Error<S> {
    ParserDepthExceeded(Span),
    UnconsumedInput(Span),
    LexerError(lexer::Error),
    Syntax(S),
}

impl<S: fmt::Display> fmt::Display for Error<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ParserDepthExceeded(span) => {
                write!(f, "{}: exceeded max nesting depth", span.start())
            }
            Error::UnconsumedInput(span) => {
                write!(f, "{}: expected end of input", span.start())
            }
            Error::LexerError(e) => write!(f, "{}", e),
            Error::Syntax(e) => write!(f, "{}", e),
        }
    }
}

impl<S: fmt::Debug + fmt::Display> error::Error for Error<S> {}

impl<S> From<lexer::Error> for Error<S> {
    fn from(e: lexer::Error) -> Error<S> {
        Error::LexerError(e)
    }
}

impl<S> From<&Error<S>> for Diagnostic
where
    S: Clone + Into<Diagnostic>,
{
    fn from(e: &Error<S>) -> Self {
        match e {
            Error::ParserDepthExceeded(span) => {
                Diagnostic::new("the input is nested too deeply")
                    .location(span.start())
                    .highlight(*span, "the parser gave up here")
            }
            Error::UnconsumedInput(span) => {
                Diagnostic::new("there was input left over after parsing")
                    .location(span.start())
                    .highlight(*span, "this wasn't expected here")
            }
            Error::LexerError(e) => {
                let span = Span::at(e.location());
                Diagnostic::new(e.message())
                    .location(e.location())
                    .highlight(span, "here")
            }
            Error::Syntax(e) => e.clone().into(),
        }
    }
}
