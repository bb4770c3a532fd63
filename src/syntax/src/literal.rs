//! Basic literals

use diagnostic::Span;

use parser::{lexer::TokenKind, Parse, Parser};

use crate::{
    error::{expected, SyntaxError},
    Error, Syntax,
};

/// The kind of a [`Literal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Int,
    Float,
    Imaginary,
    Char,
    String,
}

/// A literal of a basic type, like `42`, `1.5`, `'x'` or `"str"`.
///
/// The value is kept exactly as it was written, quotes, prefixes and
/// underscores included.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    kind: Kind,
    value: String,
    span: Span,
}

impl Literal {
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The literal's text in the source.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Syntax for Literal {
    const NAME: &'static str = "literal";

    fn span(&self) -> Span {
        self.span
    }
}

impl<'a> Parse<'a> for Literal {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<Literal, Error> {
        let kind = match parser.peek() {
            Some(TokenKind::Int) => Kind::Int,
            Some(TokenKind::Float) => Kind::Float,
            Some(TokenKind::Imaginary) => Kind::Imaginary,
            Some(TokenKind::Char) => Kind::Char,
            Some(TokenKind::String) => Kind::String,
            _ => return Err(expected(parser, Self::NAME)),
        };

        let token = parser
            .consume_if(|t| t.kind().is_literal())
            .ok_or_else(|| expected(parser, Self::NAME))?;

        Ok(Literal {
            kind,
            value: token.body().into(),
            span: token.span(),
        })
    }
}
