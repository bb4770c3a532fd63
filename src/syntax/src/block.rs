//! Blocks, like `{ a; b }`

use diagnostic::Span;

use parser::{
    lexer::{Delimiter, TokenKind as Kind},
    Parse, Parser,
};

use crate::{
    error::{expect, SyntaxError},
    Error, Stmt, Syntax,
};

/// A block is a brace-delimited sequence of statements, like
/// `{ first(); second() }`.
///
/// Statements end in a `;` which is usually inserted by the lexer at the end
/// of a line, and can be left out before the closing brace.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub open: Span,
    pub statements: Vec<Stmt>,
    pub close: Span,
}

impl Block {
    /// Get a reference to the top level statements.
    pub fn statements(&self) -> &[Stmt] {
        &self.statements
    }
}

impl Syntax for Block {
    const NAME: &'static str = "block";

    fn span(&self) -> Span {
        self.open + self.close
    }
}

impl<'a> Parse<'a> for Block {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<Block, Error> {
        let open = expect(parser, Kind::Open(Delimiter::Brace), "'{'")?;
        let statements = Stmt::list(parser)?;
        let close = expect(parser, Kind::Close(Delimiter::Brace), "'}'")?;

        Ok(Block {
            open: open.span(),
            statements,
            close: close.span(),
        })
    }
}

#[cfg(test)]
mod parser_tests {
    use super::*;

    #[test]
    fn test_empty_block() {
        let block = Block::parse("{}");
        assert!(block.is_ok(), "expected a block but got {:?}", block);
        assert!(block.unwrap().statements().is_empty())
    }

    #[test]
    fn test_block_semicolon_only() {
        let block = Block::parse("{ ; }").unwrap();
        assert_eq!(block.statements().len(), 1);
        assert!(matches!(block.statements()[0], Stmt::Empty(_)));
    }

    #[test]
    fn test_block_multiple_statements() {
        let block = Block::parse("{ 1;2;3 }").unwrap();
        assert_eq!(block.statements().len(), 3);

        let block = Block::parse("{\n\ta := 1\n\tb := 2\n}").unwrap();
        assert_eq!(block.statements().len(), 2);
    }

    #[test]
    fn test_block_needs_separators() {
        assert!(Block::parse("{ a b }").is_err());
    }

    #[test]
    fn test_unclosed_block() {
        assert!(Block::parse("{ a := 1").is_err());
    }
}
