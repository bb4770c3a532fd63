//! A parser-writing tool and a Go lexer.
//!
//! [`Parser`] doesn't parse a specific grammar, but instead provides tools for
//! writing parsers centered around the [`Parse`] trait where each type of
//! syntax node knows how to parse itself. This is geared towards building
//! recursive decent (i.e. top down) parsers for "mostly LL(k)" grammars, but
//! there are escape hatches for the messy edges.
//!
//! It scans the whole input up front with [`Lexer`][crate::lexer::Lexer], and
//! provides arbitrary lookahead with [`peek_nth`][Parser::peek_nth]. If your
//! grammar needs it, you can backtrack with [`Parser::with_backtracking`].
//!
//! Anywhere your grammar is recursive you should call [`Parser::depth_track`]
//! to help prevent the parser from blowing the stack, and anywhere a loop
//! builds a deeper tree, [`Parser::deepen`].
//!
//! Binary operator precedence lives in the [`operator`][op] module.
//!
//! [op]: crate::operator

pub mod error;
pub mod lexer;
pub mod operator;
pub mod parser;

pub use crate::{error::Error, parser::Parser};

/// Implementing this trait tells a [`Parser`] how to parse your piece of
/// syntax. The idea is to implement this for as many AST nodes as possible to
/// allow the parser to start parsing at different places in the grammar.
pub trait Parse<'a>: Sized {
    type SyntaxError;

    /// Parse all of `input` as this piece of syntax.
    ///
    /// Automatically inserted semicolons at the very end are fine to leave
    /// behind, anything else is [`Error::UnconsumedInput`].
    ///
    /// Parsing happens on its own thread, see [`Parser::with_stack`].
    fn parse(input: &'a str) -> Result<Self, Error<Self::SyntaxError>>
    where
        Self: Send,
        Self::SyntaxError: Send,
    {
        Parser::with_stack(|| -> Result<Self, Error<Self::SyntaxError>> {
            let mut parser = Parser::new(input)?;
            let syntax = parser.parse::<Self>()?;

            parser.skip_automatic_semicolon();

            if parser.is_empty() {
                Ok(syntax)
            } else {
                Err(Error::UnconsumedInput(parser.peek_span()))
            }
        })
    }

    /// This is the method used to compose pieces of syntax which implement
    /// [`Parse`] into a larger syntax tree.
    ///
    /// Typically, unless we're done parsing, parser will not be empty
    /// afterwards.
    fn parse_with(
        parser: &mut Parser<'a>,
    ) -> Result<Self, Error<Self::SyntaxError>>;
}
