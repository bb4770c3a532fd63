//! Parsers.
//!
//! See the [module documentation][crate] for more information on how this all
//! fits together, and how to use it.

use std::{panic, thread};

use diagnostic::Span;

use crate::{
    error::Error,
    lexer::{self, Lexer, Token, TokenKind},
    Parse,
};

/// A Parser wraps breaks input up into tokens and provides ways to work with
/// that sequence of tokens to define a grammar using [`Parse`].
///
/// See the [module documentation][crate] for more information on how this all
/// fits together, and how to use it.
#[derive(Debug)]
pub struct Parser<'a> {
    /// The tokens from our input.
    tokens: Vec<Token<'a>>,

    /// The cursor is the index into the `tokens` which tracks where we've parsed to.
    cursor: usize,

    /// The grammar can be recursive in a few places, we track our 'depth' into
    /// these recursive forms here to prevent stack overflows.
    depth: usize,

    /// Below zero while parsing the header of a control clause, where a `{`
    /// starts the body rather than a composite literal. Parentheses and
    /// brackets bring it back up.
    expr_level: i32,
}

impl<'a> Parser<'a> {
    /// Create a parser over some input with the default configuration.
    ///
    /// This will immediately return a lexical error if the input isn't
    /// lexically valid.
    pub fn new(input: &'a str) -> Result<Parser<'a>, lexer::Error> {
        let tokens = Lexer::tokenize(input)?;

        Ok(Parser {
            cursor: 0,
            depth: 0,
            tokens,
            expr_level: 0,
        })
    }

    /// Consume input to produce the specified piece of [`Parse`]able syntax.
    ///
    /// # Note
    ///
    /// Generally you'll want to use [`Parse::parse`] instead, as it ensures
    /// that all input is consumed. This method is instead used for _making_
    /// parsers.
    pub fn parse<T: Parse<'a>>(&mut self) -> Result<T, Error<T::SyntaxError>> {
        T::parse_with(self)
    }

    /// Has the parser consumed all of the input?
    pub fn is_empty(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Consume the next token if it has the [`TokenKind`] we wanted. If the
    /// next token has the wrong kind or we're at the end of the input, `None`
    /// is returned.
    ///
    /// See [`Parser::consume_if`] for more complicated matching.
    pub fn consume(&mut self, wanted: TokenKind) -> Option<Token<'a>> {
        self.consume_if(|t| t.kind() == wanted)
    }

    /// Consume the next token if it's [`TokenKind`] satisfies the predicated
    /// provided.
    ///
    /// If you just want a specific kind, use [`Parser::consume`] instead.
    ///
    /// Ultimately, this is the only method that moves the parser forward over
    /// input.
    pub fn consume_if(
        &mut self,
        predicate: impl Fn(&Token) -> bool,
    ) -> Option<Token<'a>> {
        if let Some(token) = self.tokens.get(self.cursor) {
            if predicate(token) {
                self.cursor += 1;
                return Some(*token);
            }
        }

        None
    }

    /// Skip a semicolon the lexer inserted at the end of a line. Explicit
    /// semicolons are left alone.
    pub fn skip_automatic_semicolon(&mut self) -> bool {
        self.consume_if(|t| t.is_automatic_semicolon()).is_some()
    }

    /// Returns the `TokenKind` of the next token, without consuming it.
    pub fn peek(&self) -> Option<TokenKind> {
        self.peek_nth(0)
    }

    /// Like `Parser::peek` but looking ahead `n` tokens instead of just one.
    ///
    /// Note that this means `peek_n(0)` is like `peek`.
    ///
    /// This returns `None` if there are not `n` more tokens.`
    pub fn peek_nth(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.cursor + n).map(Token::kind)
    }

    /// The next token itself, without consuming it.
    pub fn peek_token(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.cursor)
    }

    /// The span of the next token. This is sometimes useful when parsing
    /// delimiters.
    ///
    /// If there's no next token, the end of the last token is used. If the
    /// input is empty, the default span.
    pub fn peek_span(&self) -> Span {
        if let Some(token) = self.tokens.get(self.cursor) {
            token.span()
        } else {
            self.eof_span()
        }
    }

    /// An empty span right at the end of the last token.
    ///
    /// If there's no input, the default span is used.
    pub fn eof_span(&self) -> Span {
        self.tokens
            .last()
            .map(|t| Span::at(t.span().end()))
            .unwrap_or_default()
    }

    /// The span of the most recently consumed token.
    pub fn previous_span(&self) -> Span {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(Token::span)
            .unwrap_or_default()
    }

    /// A `sep` separated list of elements, with an optional trailing
    /// separator, ending before `close`. The `close` token is not consumed.
    pub fn sep_by_trailing<T, E>(
        &mut self,
        sep: TokenKind,
        close: TokenKind,
        mut element: impl FnMut(&mut Self) -> Result<T, E>,
    ) -> Result<Vec<T>, E> {
        let mut elements = Vec::new();

        while !self.is_empty() && self.peek() != Some(close) {
            elements.push(element(self)?);

            if self.consume(sep).is_none() {
                break;
            }
        }

        Ok(elements)
    }
}

// Depth tracking
impl<'a> Parser<'a> {
    /// The maximum 'depth' of the parser.
    ///
    /// This only counts parser activity within
    /// [`depth_track`][Parser::depth_track] blocks and calls to
    /// [`deepen`][Parser::deepen] towards this limit, not just general grammar
    /// depth.
    pub const MAX_DEPTH: usize = 512;

    /// The stack size of the thread [`Parse::parse`] runs on.
    ///
    /// This needs to fit [`Parser::MAX_DEPTH`] levels of the deepest recursion
    /// in a grammar, in unoptimized builds too.
    pub const STACK_SIZE: usize = 64 * 1024 * 1024;

    /// Increases the depth of the current production, returning an error if
    /// the max depth is hit. This is to prevent parsing from blowing the stack
    /// where the grammar is recursive.
    ///
    /// In Go's grammar that's expressions, types, and statements nested
    /// through blocks.
    ///
    /// The depth is put back to where it was when `inner` returns, including
    /// any levels `inner` added with [`Parser::deepen`].
    pub fn depth_track<F, S, E>(&mut self, inner: F) -> Result<S, Error<E>>
    where
        F: FnOnce(&mut Self) -> Result<S, Error<E>>,
    {
        let old_depth = self.depth;
        self.deepen::<E>()?;

        let result = inner(self);
        self.depth = old_depth;
        result
    }

    /// Add a level of depth until the enclosing
    /// [`depth_track`][Parser::depth_track] returns.
    ///
    /// This is for trees that get deeper in a loop rather than by recursion,
    /// like `a + b + c` or `a.b.c`. Building them doesn't use the stack, but
    /// dropping or walking them does.
    pub fn deepen<E>(&mut self) -> Result<(), Error<E>> {
        if self.depth >= Parser::MAX_DEPTH {
            Err(Error::ParserDepthExceeded(self.peek_span()))
        } else {
            self.depth += 1;
            Ok(())
        }
    }

    /// Run `op` on a thread with a [`Parser::STACK_SIZE`] stack, so that
    /// [`Parser::MAX_DEPTH`] is reached before the stack runs out.
    ///
    /// A panic in `op` is resumed on the calling thread. If a thread can't be
    /// spawned, `op` runs on the calling thread instead.
    pub fn with_stack<T, F>(op: F) -> T
    where
        T: Send,
        F: Fn() -> T + Sync,
    {
        thread::scope(|scope| {
            let spawned = thread::Builder::new()
                .name("parser".into())
                .stack_size(Parser::STACK_SIZE)
                .spawn_scoped(scope, || op());

            match spawned {
                Ok(handle) => handle
                    .join()
                    .unwrap_or_else(|payload| panic::resume_unwind(payload)),
                Err(_) => op(),
            }
        })
    }
}

// Expression level
impl<'a> Parser<'a> {
    /// Can a `{` here start a composite literal?
    pub fn composite_allowed(&self) -> bool {
        self.expr_level >= 0
    }

    /// Run `inner` with a specific expression level, restoring the old one
    /// afterwards.
    ///
    /// Control clause headers use `-1`, and anything in parentheses, brackets,
    /// or braces goes back to `0` or above.
    pub fn with_expr_level<S, F>(&mut self, level: i32, inner: F) -> S
    where
        F: FnOnce(&mut Self) -> S,
    {
        let old = std::mem::replace(&mut self.expr_level, level);
        let result = inner(self);
        self.expr_level = old;
        result
    }

    /// Like [`Parser::with_expr_level`] but one level deeper than the current
    /// one, or `0` if in a control clause.
    pub fn nested<S, F>(&mut self, inner: F) -> S
    where
        F: FnOnce(&mut Self) -> S,
    {
        let level = (self.expr_level + 1).max(0);
        self.with_expr_level(level, inner)
    }
}

// Backtracking
impl<'a> Parser<'a> {
    /// Attempt to the inner parser action F but on error the parser is returned
    /// to the state it was in before failure.
    #[inline(always)]
    pub fn with_backtracking<S, F, E>(&mut self, inner: F) -> Result<S, E>
    where
        F: FnOnce(&mut Self) -> Result<S, E>,
    {
        let old_depth = self.depth;
        let old_cursor = self.cursor;
        let old_level = self.expr_level;

        match inner(self) {
            Ok(syntax) => Ok(syntax),
            Err(e) => {
                self.depth = old_depth;
                self.cursor = old_cursor;
                self.expr_level = old_level;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod parser_tests {
    use diagnostic::{Caret, Span};

    use super::*;

    #[test]
    fn consume() {
        let mut p = Parser::new("hi").unwrap();

        assert!(!p.is_empty());
        assert!(p.consume(TokenKind::Define).is_none());
        assert!(p.consume(TokenKind::Identifier).is_some());
        assert!(!p.is_empty());
        assert!(p.consume(TokenKind::Semicolon).is_some());
        assert!(p.is_empty());
        assert!(p.consume(TokenKind::Define).is_none());
    }

    #[test]
    fn consume_if() {
        fn pred(token: &Token) -> bool {
            token.kind() == TokenKind::Identifier
        }

        let mut p = Parser::new("hi").unwrap();

        assert!(!p.is_empty());
        assert!(p.consume_if(pred).is_some());
        assert!(!p.consume_if(pred).is_some());
    }

    #[test]
    fn automatic_semicolon() {
        let mut p = Parser::new("a;").unwrap();
        p.consume(TokenKind::Identifier);
        assert!(!p.skip_automatic_semicolon());

        let mut p = Parser::new("a\n").unwrap();
        p.consume(TokenKind::Identifier);
        assert!(p.skip_automatic_semicolon());
        assert!(p.is_empty());
    }

    #[test]
    fn peek() {
        assert!(Parser::new("").unwrap().peek().is_none());
        assert!(Parser::new("a").unwrap().peek().is_some());
    }

    #[test]
    fn peek_nth() {
        assert!(Parser::new("").unwrap().peek_nth(0).is_none());
        assert!(Parser::new("a").unwrap().peek_nth(0).is_some());
        assert!(Parser::new("a +").unwrap().peek_nth(2).is_none());
    }

    #[test]
    fn peek_span() {
        assert_eq!(Parser::new("").unwrap().peek_span(), Span::default());
        assert_eq!(
            Parser::new("hi").unwrap().peek_span(),
            Span::new(Caret::new(0, 0), Caret::new(0, 2))
        );
    }

    #[test]
    fn is_empty() {
        assert!(Parser::new("").unwrap().is_empty());
        assert!(Parser::new(" ").unwrap().is_empty());
        assert!(!Parser::new("nope").unwrap().is_empty());
    }

    #[test]
    fn expr_level() {
        let mut parser = Parser::new("").unwrap();
        assert!(parser.composite_allowed());

        parser.with_expr_level(-1, |p| {
            assert!(!p.composite_allowed());
            p.nested(|p| assert!(p.composite_allowed()));
            assert!(!p.composite_allowed());
        });

        assert!(parser.composite_allowed());
    }

    #[test]
    fn deepen_is_undone_by_depth_track() {
        let mut parser = Parser::new("").unwrap();

        let result: Result<(), Error<()>> = parser.depth_track(|p| {
            for _ in 1..Parser::MAX_DEPTH {
                p.deepen::<()>()?;
            }
            assert!(p.deepen::<()>().is_err());
            Ok(())
        });

        assert!(result.is_ok());
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn with_stack_runs_elsewhere() {
        let here = std::thread::current().id();
        let there = Parser::with_stack(|| std::thread::current().id());
        assert_ne!(here, there);
    }

    #[test]
    fn with_stack_resumes_panics() {
        let result = panic::catch_unwind(|| {
            Parser::with_stack(|| -> u8 { panic!("inner") })
        });

        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"inner"));
    }

    #[test]
    fn backtracking() {
        // lets make sure no backtracking does what we expect.
        let mut parser = Parser::new("1 2;").unwrap();
        let result1 = parser.consume(TokenKind::Int);
        let result2 = parser.consume(TokenKind::Int);
        let result3 = parser.consume(TokenKind::Int);

        assert!(result1.is_some());
        assert!(result2.is_some());
        assert!(result3.is_none());

        // Okay now we can try backtracking.

        struct Error;

        let mut parser = Parser::new("1 2;").unwrap();
        let result = parser.with_backtracking(|p| {
            p.consume(TokenKind::Int).ok_or(Error)?;
            p.consume(TokenKind::Int).ok_or(Error)?;
            p.consume(TokenKind::Int).ok_or(Error)
        });

        assert!(result.is_err());
        assert!(!parser.is_empty());
        assert_eq!(parser.peek_span().start().column(), 0);
    }

    // A few things are tested elsewhere since testing makes more sense with a
    // grammar specified. See tests in `/tests/parser_tests.rs` for more.
    //
    // - `depth_track`
    // - `sep_by_trailing`
}
