//! Identifiers

use diagnostic::Span;

use parser::{lexer::TokenKind, Parse, Parser};

use crate::{
    error::{expect, SyntaxError},
    Error, Syntax,
};

/// A name, like `foo` or the blank identifier `_`.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    name: String,
    span: Span,
}

impl Identifier {
    /// Create an identifier that wasn't parsed from anywhere in particular.
    pub fn new(name: impl Into<String>, span: Span) -> Identifier {
        Identifier {
            name: name.into(),
            span,
        }
    }

    /// View the identifier as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Is this the blank identifier `_`?
    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

impl Syntax for Identifier {
    const NAME: &'static str = "identifier";

    fn span(&self) -> Span {
        self.span
    }
}

impl<'a> Parse<'a> for Identifier {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<Identifier, Error> {
        let token = expect(parser, TokenKind::Identifier, Self::NAME)?;
        Ok(Identifier::new(token.body(), token.span()))
    }
}

impl Identifier {
    /// A comma separated list of one or more identifiers.
    pub(crate) fn list(parser: &mut Parser) -> Result<Vec<Identifier>, Error> {
        let mut names = vec![parser.parse::<Identifier>()?];

        while parser.consume(TokenKind::Comma).is_some() {
            names.push(parser.parse()?);
        }

        Ok(names)
    }
}

#[cfg(test)]
mod parser_tests {
    use super::*;

    #[test]
    fn test_identifier() {
        let mut parser = Parser::new("hello").unwrap();
        let ident = parser.parse::<Identifier>().unwrap();
        assert_eq!(ident.as_str(), "hello");
        assert!(!ident.is_blank());
    }

    #[test]
    fn blank() {
        assert!(Identifier::parse("_").unwrap().is_blank());
    }

    #[test]
    fn keyword_is_not_identifier() {
        assert!(Identifier::parse("func").is_err());
    }

    #[test]
    fn list() {
        let mut parser = Parser::new("a, b, c int").unwrap();
        let names = Identifier::list(&mut parser).unwrap();
        assert_eq!(names.len(), 3);
        assert_eq!(parser.peek(), Some(TokenKind::Identifier));
    }
}
