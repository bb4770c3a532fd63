//! Lexing - converting Go source into [`Token`]s.
//!
//! Generally speaking you shouldn't need these directly, and can go straight to
//! using a [`Parser`][crate::parser::Parser] instead.
//!
//! The lexer follows Go's lexical grammar, including the rule
//! that turns some newlines into semicolons. Comments are treated as
//! whitespace, except that a comment which contains (or runs up to) a newline
//! counts as that newline for the purposes of semicolon insertion.
//!
//! # Notes
//!
//! The lexer doesn't implement `Iterator`, instead use a `while` loop over
//! [`Lexer::is_empty`] like in the example on the struct definition.

mod combinator;
mod error;
mod number;
mod rules;
mod string;
mod token;

use diagnostic::{Caret, Span};

pub use crate::lexer::{
    error::Error,
    token::{Delimiter, Keyword, Kind as TokenKind, Operator, Token},
};

/// A [`Lexer`] scans over a `&str` character by character and breaks things
/// into component meaningful parts ([`Token`]s).
///
/// # Example
///
/// ```
/// # use parser::lexer::Lexer;
/// let mut lexer = Lexer::new("a := b");
/// while !lexer.is_empty() {
///     let token = lexer.token().unwrap();
///     // do something with token
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'i> {
    /// The input being consumed, as utf8
    pub(crate) input: &'i str,

    /// The location of the caret, as a line and column
    pub(crate) location: Caret,

    /// The location of the caret, as a byte offset
    pub(crate) offset: usize,

    /// Set after a token which would end a statement if a newline followed
    /// it. While this is set, only whitespace on the current line has been
    /// skipped.
    pub(crate) insert_semicolon: bool,
}

impl<'i> Lexer<'i> {
    /// Create a new lexer over some input.
    pub fn new(input: &'i str) -> Self {
        let mut lexer = Lexer {
            input,
            location: Caret::default(),
            offset: 0,
            insert_semicolon: false,
        };

        lexer.whitespace();

        lexer
    }

    /// Has the lexer produced every token, including any final automatic
    /// semicolon?
    ///
    /// # Examples
    ///
    /// ```
    /// # use parser::lexer::Lexer;
    /// let lexer = Lexer::new(" // nothing here ");
    /// assert!(lexer.is_empty());
    ///
    /// let mut lexer = Lexer::new("x");
    /// let _x = lexer.token();
    /// assert!(!lexer.is_empty()); // the implicit ';'
    /// ```
    pub fn is_empty(&self) -> bool {
        self.offset == self.input.len() && !self.insert_semicolon
    }

    /// Produce the token (or [`Error`]), advancing the lexer.
    ///
    /// If the lexer is empty this will return [`Error::UnexpectedEOF`] since
    /// this call _expects_ to produce a token.
    pub fn token(&mut self) -> Result<Token<'i>, Error> {
        if self.insert_semicolon {
            self.insert_semicolon = false;

            if self.at_line_end() {
                let span = Span::at(self.location);
                self.whitespace();
                return Ok(Token {
                    kind: TokenKind::Semicolon,
                    span,
                    body: "\n",
                });
            }
        }

        self.whitespace();

        if self.offset == self.input.len() {
            return Err(Error::UnexpectedEOF(self.location));
        }

        let start_location = self.location;
        let start_offset = self.offset;

        let kind = self.token_kind()?;

        let span = Span::new(start_location, self.location);
        let body = &self.input[start_offset..self.offset];

        self.insert_semicolon = kind.ends_line();

        if self.insert_semicolon {
            self.line_whitespace();
        } else {
            self.whitespace();
        }

        Ok(Token { kind, span, body })
    }

    /// Lex all of the input up front.
    pub fn tokenize(input: &'i str) -> Result<Vec<Token<'i>>, Error> {
        let mut buf = Vec::new();
        let mut lexer = Lexer::new(input);

        while !lexer.is_empty() {
            buf.push(lexer.token()?);
        }

        Ok(buf)
    }

    /// The input fed into the lexer that hasn't been broken into tokens yet.
    ///
    /// # Example
    ///
    /// ```
    /// # use parser::lexer::Lexer;
    /// let mut lexer = Lexer::new("abc + def");
    /// let abc = lexer.token();
    /// assert_eq!(lexer.remaining_input(), "+ def");
    /// ```
    pub fn remaining_input(&self) -> &'i str {
        &self.input[self.offset..]
    }
}
