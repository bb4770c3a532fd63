//! Syntax Errors
//!
//! This differs from [`parser::Error`] because these are specific to the Go
//! grammar we're parsing.

use std::fmt;

use diagnostic::{Caret, Diagnostic, Span};
use parser::{
    lexer::{Token, TokenKind},
    Parser,
};

use crate::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// The general case, where we know what kind of thing should be next.
    Expected {
        wanted: &'static str,
        found: String,
        span: Span,
    },

    ImportAfterDeclaration(Span),
    MissingCondition(&'static str, Span),
    MixedParameters(Span),
    NonNameOnLeft(Span),
    NotAValue(&'static str, Span),
    RangeTooManyVariables(Span),
    StatementOutsideFunction(Span),
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        *match self {
            SyntaxError::Expected { span, .. } => span,
            SyntaxError::ImportAfterDeclaration(s) => s,
            SyntaxError::MissingCondition(_, s) => s,
            SyntaxError::MixedParameters(s) => s,
            SyntaxError::NonNameOnLeft(s) => s,
            SyntaxError::NotAValue(_, s) => s,
            SyntaxError::RangeTooManyVariables(s) => s,
            SyntaxError::StatementOutsideFunction(s) => s,
        }
    }

    pub fn start(&self) -> Caret {
        self.span().start()
    }

    /// The message, without any location.
    pub fn message(&self) -> String {
        match self {
            SyntaxError::Expected { wanted, found, .. } => {
                format!("expected {}, found {}", wanted, found)
            }
            SyntaxError::ImportAfterDeclaration(_) => {
                "imports must appear before other declarations".into()
            }
            SyntaxError::MissingCondition(statement, _) => {
                format!("missing condition in {} statement", statement)
            }
            SyntaxError::MixedParameters(_) => {
                "mixed named and unnamed parameters".into()
            }
            SyntaxError::NonNameOnLeft(_) => {
                "non-name on left side of :=".into()
            }
            SyntaxError::NotAValue(statement, _) => {
                format!("cannot use {} as value", statement)
            }
            SyntaxError::RangeTooManyVariables(_) => {
                "range clause permits at most two iteration variables".into()
            }
            SyntaxError::StatementOutsideFunction(_) => {
                "non-declaration statement outside function body".into()
            }
        }
    }
}

/// The `line:column:` prefix matches Go's own parser errors.
impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.start(), self.message())
    }
}

impl std::error::Error for SyntaxError {}

impl From<SyntaxError> for Error {
    fn from(val: SyntaxError) -> Self {
        parser::Error::Syntax(val)
    }
}

impl From<SyntaxError> for Diagnostic {
    fn from(e: SyntaxError) -> Self {
        let note = match &e {
            SyntaxError::Expected { wanted, .. } => {
                format!("expected {} here", wanted)
            }
            SyntaxError::ImportAfterDeclaration(_) => {
                "move this up to the top of the file".into()
            }
            SyntaxError::MissingCondition(_, _) => {
                "the condition should be here".into()
            }
            SyntaxError::MixedParameters(_) => {
                "this parameter needs a name and a type".into()
            }
            SyntaxError::NonNameOnLeft(_) => {
                "only names can be declared with `:=`".into()
            }
            SyntaxError::NotAValue(_, _) => "expected an expression".into(),
            SyntaxError::RangeTooManyVariables(_) => {
                "this is one too many".into()
            }
            SyntaxError::StatementOutsideFunction(_) => {
                "statements must be inside a function".into()
            }
        };

        Diagnostic::new(e.message())
            .location(e.start())
            .highlight(e.span(), note)
    }
}

/// Describe the next token the way Go's parser does in its errors.
fn found(parser: &Parser) -> String {
    match parser.peek_token() {
        None => "EOF".into(),
        Some(token) if token.is_automatic_semicolon() => "newline".into(),
        Some(token) => describe(token),
    }
}

fn describe(token: &Token) -> String {
    match token.kind() {
        TokenKind::Identifier => format!("identifier {}", token.body()),
        k if k.is_literal() => format!("{} {}", k.name(), token.body()),
        TokenKind::Keyword(k) => format!("'{}'", k.as_str()),
        TokenKind::Operator(o) => format!("'{}'", o),
        TokenKind::OperatorAssign(o) => format!("'{}'", o.assign_str()),
        k => k.name().into(),
    }
}

/// An error for when the next token isn't what we `wanted`.
pub(crate) fn expected(parser: &Parser, wanted: &'static str) -> Error {
    SyntaxError::Expected {
        wanted,
        found: found(parser),
        span: parser.peek_span(),
    }
    .into()
}

/// Consume a token of the `kind` we need, or fail saying what we `wanted`.
pub(crate) fn expect<'a>(
    parser: &mut Parser<'a>,
    kind: TokenKind,
    wanted: &'static str,
) -> Result<Token<'a>, Error> {
    parser.consume(kind).ok_or_else(|| expected(parser, wanted))
}

/// Statements and declarations end in a `;`, which can be left out right
/// before a closing `)` or `}`.
pub(crate) fn expect_semi(parser: &mut Parser) -> Result<(), Error> {
    use parser::lexer::Delimiter;

    match parser.peek() {
        Some(TokenKind::Close(Delimiter::Parenthesis | Delimiter::Brace)) => {
            Ok(())
        }
        Some(TokenKind::Semicolon) => {
            parser.consume(TokenKind::Semicolon);
            Ok(())
        }
        _ => Err(expected(parser, "';'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_names() {
        let parser = Parser::new("foo").unwrap();
        assert_eq!(found(&parser), "identifier foo");

        let parser = Parser::new("\"s\"").unwrap();
        assert_eq!(found(&parser), "string literal \"s\"");

        let parser = Parser::new("+=").unwrap();
        assert_eq!(found(&parser), "'+='");

        let parser = Parser::new("").unwrap();
        assert_eq!(found(&parser), "EOF");
    }

    #[test]
    fn display_has_location() {
        let mut parser = Parser::new("\n  )").unwrap();
        let error = expect(&mut parser, TokenKind::Identifier, "name");
        assert_eq!(
            error.unwrap_err().to_string(),
            "2:3: expected name, found ')'"
        );
    }

    #[test]
    fn semicolon_optional_before_close() {
        let mut parser = Parser::new("}").unwrap();
        assert!(expect_semi(&mut parser).is_ok());
        assert_eq!(
            parser.peek(),
            Some(TokenKind::Close(parser::lexer::Delimiter::Brace))
        );
    }
}
