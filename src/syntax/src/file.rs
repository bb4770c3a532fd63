//! Source files

use diagnostic::Span;

use parser::{
    lexer::{Keyword, TokenKind},
    Parse, Parser,
};

use crate::{
    error::{expect, expect_semi, expected, SyntaxError},
    statement::starts_simple,
    Decl, Error, Identifier, Syntax,
};

/// A whole Go source file.
///
/// Imports are kept in `decls` along with everything else, the way they
/// appear in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub package: Span,
    pub name: Identifier,
    pub decls: Vec<Decl>,
}

impl File {
    /// The import declarations, which are all at the start.
    pub fn imports(&self) -> impl Iterator<Item = &Decl> {
        self.decls.iter().take_while(|d| {
            matches!(d, Decl::Gen(g) if g.keyword == Keyword::Import)
        })
    }
}

impl Syntax for File {
    const NAME: &'static str = "file";

    fn span(&self) -> Span {
        match self.decls.last() {
            Some(last) => self.package + last.span(),
            None => self.package + self.name.span(),
        }
    }
}

impl<'a> Parse<'a> for File {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<File, Error> {
        let package = expect(
            parser,
            TokenKind::Keyword(Keyword::Package),
            "'package'",
        )?;
        let name = parser.parse::<Identifier>()?;
        end_of_declaration(parser)?;

        let mut decls = Vec::new();
        let mut imports_done = false;

        while !parser.is_empty() {
            let decl = match parser.peek() {
                Some(TokenKind::Keyword(Keyword::Import)) if imports_done => {
                    let span = parser.peek_span();
                    return Err(SyntaxError::ImportAfterDeclaration(span).into());
                }

                Some(TokenKind::Keyword(Keyword::Import)) => parser.parse()?,

                Some(TokenKind::Keyword(
                    Keyword::Func | Keyword::Const | Keyword::Type | Keyword::Var,
                )) => {
                    imports_done = true;
                    parser.parse()?
                }

                kind if starts_simple(kind) || starts_statement(kind) => {
                    let span = parser.peek_span();
                    return Err(SyntaxError::StatementOutsideFunction(span).into());
                }

                _ => return Err(expected(parser, Decl::NAME)),
            };

            decls.push(decl);
            end_of_declaration(parser)?;
        }

        Ok(File {
            package: package.span(),
            name,
            decls,
        })
    }
}

/// Keywords that can only start a statement.
fn starts_statement(kind: Option<TokenKind>) -> bool {
    matches!(
        kind,
        Some(TokenKind::Keyword(
            Keyword::If
                | Keyword::For
                | Keyword::Switch
                | Keyword::Select
                | Keyword::Return
                | Keyword::Go
                | Keyword::Defer
                | Keyword::Break
                | Keyword::Continue
                | Keyword::Goto
                | Keyword::Fallthrough
        ))
    )
}

/// A declaration needs a `;` unless it's the last thing in the file.
fn end_of_declaration(parser: &mut Parser) -> Result<(), Error> {
    if parser.is_empty() {
        Ok(())
    } else {
        expect_semi(parser)
    }
}

#[cfg(test)]
mod parser_tests {
    use super::*;

    fn parse(input: &str) -> File {
        match File::parse(input) {
            Ok(file) => file,
            Err(e) => panic!("{:?} failed with {}", input, e),
        }
    }

    #[test]
    fn package_clause_only() {
        let file = parse("package main");
        assert_eq!(file.name.as_str(), "main");
        assert!(file.decls.is_empty());

        assert!(File::parse("package main;").is_ok());
    }

    #[test]
    fn imports_and_declarations() {
        let file = parse(
            "package main\n\nimport (\n\t\"fmt\"\n)\n\nimport \"os\"\n\nfunc main() {\n\tfmt.Println(os.Args)\n}\n",
        );
        assert_eq!(file.decls.len(), 3);
        assert_eq!(file.imports().count(), 2);
    }

    #[test]
    fn import_after_declaration() {
        assert!(matches!(
            File::parse("package main\nvar x = 1\nimport \"fmt\"\n"),
            Err(parser::Error::Syntax(SyntaxError::ImportAfterDeclaration(_)))
        ));
    }

    #[test]
    fn statement_outside_function() {
        for input in ["package p\nx := 1\n", "package p\nif x {}\n"] {
            assert!(
                matches!(
                    File::parse(input),
                    Err(parser::Error::Syntax(
                        SyntaxError::StatementOutsideFunction(_)
                    ))
                ),
                "{:?}",
                input
            );
        }
    }

    #[test]
    fn missing_package_clause() {
        let error = File::parse("func main() {}").unwrap_err();
        assert_eq!(error.to_string(), "1:1: expected 'package', found 'func'");
    }

    #[test]
    fn declarations_need_separators() {
        assert!(File::parse("package p; var x = 1 var y = 2").is_err());
    }
}
