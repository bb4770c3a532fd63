//! Declarations
//!
//! Go has two kinds of declarations: function declarations, and the
//! "general" ones that start with `import`, `const`, `type` or `var` and can
//! group several specs in parentheses.

use diagnostic::Span;

use parser::{
    lexer::{Delimiter, Keyword, TokenKind},
    Parse, Parser,
};

use crate::{
    error::{expect, expect_semi, expected, SyntaxError},
    function::{parameters, Field, FuncType},
    types::{parse_type, starts_type},
    Block, Error, Expr, Identifier, Literal, Syntax,
};

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Gen(GenDecl),
    Func(FuncDecl),
}

/// An `import`, `const`, `type` or `var` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    pub keyword: Keyword,
    pub keyword_span: Span,
    /// The `(` and `)` spans for a grouped declaration.
    pub parens: Option<(Span, Span)>,
    pub specs: Vec<Spec>,
}

/// One of the things a [`GenDecl`] declares.
#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

/// `name "path"`, where the name is optional and can also be `.` or `_`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    pub name: Option<Identifier>,
    pub path: Literal,
}

/// The `a, b int = 1, 2` part of a `const` or `var`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub names: Vec<Identifier>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
}

/// `Name T`, or an alias `Name = T`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: Identifier,
    pub alias: bool,
    pub ty: Expr,
}

/// A function or method declaration. The body is missing for functions
/// implemented outside Go.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub recv: Option<Vec<Field>>,
    pub name: Identifier,
    pub ty: FuncType,
    pub body: Option<Block>,
}

impl Syntax for Decl {
    const NAME: &'static str = "declaration";

    fn span(&self) -> Span {
        match self {
            Decl::Gen(g) => g.span(),
            Decl::Func(f) => f.span(),
        }
    }
}

impl Syntax for GenDecl {
    const NAME: &'static str = "declaration";

    fn span(&self) -> Span {
        match (&self.parens, self.specs.last()) {
            (Some((_, close)), _) => self.keyword_span + *close,
            (None, Some(spec)) => self.keyword_span + spec.span(),
            (None, None) => self.keyword_span,
        }
    }
}

impl Syntax for Spec {
    const NAME: &'static str = "spec";

    fn span(&self) -> Span {
        match self {
            Spec::Import(i) => match &i.name {
                Some(name) => name.span() + i.path.span(),
                None => i.path.span(),
            },
            Spec::Value(v) => v
                .names
                .iter()
                .map(Syntax::span)
                .chain(v.ty.iter().map(Syntax::span))
                .chain(v.values.iter().map(Syntax::span))
                .reduce(|a, b| a + b)
                .unwrap_or_default(),
            Spec::Type(t) => t.name.span() + t.ty.span(),
        }
    }
}

impl Syntax for FuncDecl {
    const NAME: &'static str = "function declaration";

    fn span(&self) -> Span {
        match &self.body {
            Some(body) => self.ty.span() + body.span(),
            None => self.ty.span(),
        }
    }
}

impl<'a> Parse<'a> for Decl {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<Decl, Error> {
        match parser.peek() {
            Some(TokenKind::Keyword(Keyword::Func)) => {
                parser.parse().map(Decl::Func)
            }
            Some(TokenKind::Keyword(
                Keyword::Import | Keyword::Const | Keyword::Type | Keyword::Var,
            )) => parser.parse().map(Decl::Gen),
            _ => Err(expected(parser, Self::NAME)),
        }
    }
}

impl<'a> Parse<'a> for GenDecl {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<GenDecl, Error> {
        let keyword_span = parser.peek_span();
        let keyword = match parser.peek() {
            Some(TokenKind::Keyword(
                k @ (Keyword::Import | Keyword::Const | Keyword::Type | Keyword::Var),
            )) => {
                parser.consume(TokenKind::Keyword(k));
                k
            }
            _ => return Err(expected(parser, Self::NAME)),
        };

        let close_kind = TokenKind::Close(Delimiter::Parenthesis);

        if let Some(open) = parser.consume(TokenKind::Open(Delimiter::Parenthesis)) {
            let specs = parser.nested(|parser| {
                let mut specs = Vec::new();

                while !matches!(parser.peek(), None | Some(TokenKind::Close(_))) {
                    specs.push(spec(parser, keyword)?);
                    expect_semi(parser)?;
                }

                Ok::<_, Error>(specs)
            })?;

            let close = expect(parser, close_kind, "')'")?;

            Ok(GenDecl {
                keyword,
                keyword_span,
                parens: Some((open.span(), close.span())),
                specs,
            })
        } else {
            Ok(GenDecl {
                keyword,
                keyword_span,
                parens: None,
                specs: vec![spec(parser, keyword)?],
            })
        }
    }
}

fn spec(parser: &mut Parser, keyword: Keyword) -> Result<Spec, Error> {
    match keyword {
        Keyword::Import => import_spec(parser).map(Spec::Import),
        Keyword::Type => type_spec(parser).map(Spec::Type),
        _ => value_spec(parser, keyword).map(Spec::Value),
    }
}

fn import_spec(parser: &mut Parser) -> Result<ImportSpec, Error> {
    let name = match parser.peek() {
        Some(TokenKind::Identifier) => Some(parser.parse()?),
        Some(TokenKind::Dot) => {
            let span = parser.peek_span();
            parser.consume(TokenKind::Dot);
            Some(Identifier::new(".", span))
        }
        _ => None,
    };

    if parser.peek() != Some(TokenKind::String) {
        return Err(expected(parser, "import path"));
    }

    let path = parser.parse()?;
    Ok(ImportSpec { name, path })
}

fn type_spec(parser: &mut Parser) -> Result<TypeSpec, Error> {
    let name = parser.parse()?;
    let alias = parser.consume(TokenKind::Assign).is_some();
    let ty = parse_type(parser)?;

    Ok(TypeSpec { name, alias, ty })
}

fn value_spec(parser: &mut Parser, keyword: Keyword) -> Result<ValueSpec, Error> {
    let names = Identifier::list(parser)?;

    let ty = if starts_type(parser.peek()) {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let values = if parser.consume(TokenKind::Assign).is_some() {
        Expr::list(parser)?
    } else {
        Vec::new()
    };

    // Constants in a group can repeat the previous spec's values.
    if keyword == Keyword::Var && ty.is_none() && values.is_empty() {
        return Err(expected(parser, "type"));
    }

    Ok(ValueSpec { names, ty, values })
}

impl<'a> Parse<'a> for FuncDecl {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<FuncDecl, Error> {
        let func = expect(parser, TokenKind::Keyword(Keyword::Func), "'func'")?;

        let recv = if parser.peek() == Some(TokenKind::Open(Delimiter::Parenthesis)) {
            Some(parameters(parser)?)
        } else {
            None
        };

        let name = parser.parse()?;
        let ty = FuncType::signature(parser, Some(func.span()))?;

        let body = if parser.peek() == Some(TokenKind::Open(Delimiter::Brace)) {
            Some(parser.with_expr_level(0, Block::parse_with)?)
        } else {
            None
        };

        Ok(FuncDecl {
            recv,
            name,
            ty,
            body,
        })
    }
}

#[cfg(test)]
mod parser_tests {
    use super::*;

    fn parse(input: &str) -> Decl {
        match Decl::parse(input) {
            Ok(decl) => decl,
            Err(e) => panic!("{:?} failed with {}", input, e),
        }
    }

    #[test]
    fn single_specs() {
        let Decl::Gen(decl) = parse("type foo string") else {
            panic!("expected a general declaration");
        };
        assert_eq!(decl.keyword, Keyword::Type);
        assert!(decl.parens.is_none());

        assert!(matches!(parse("const int = 5"), Decl::Gen(_)));
        assert!(matches!(parse("var i int64 = 10"), Decl::Gen(_)));
        assert!(matches!(parse("import \"fmt\""), Decl::Gen(_)));
    }

    #[test]
    fn grouped() {
        let Decl::Gen(decl) =
            parse("import (\n\t\"fmt\"\n\tstr \"strings\"\n\t. \"math\"\n)")
        else {
            panic!("expected a general declaration");
        };
        assert_eq!(decl.specs.len(), 3);

        let Decl::Gen(decl) = parse("const (\n\tA = iota\n\tB\n\tC\n)") else {
            panic!("expected a general declaration");
        };
        assert_eq!(decl.specs.len(), 3);

        let Decl::Gen(decl) = parse("var ()") else {
            panic!("expected a general declaration");
        };
        assert!(decl.specs.is_empty());
    }

    #[test]
    fn type_alias() {
        let Decl::Gen(decl) = parse("type A = B") else {
            panic!("expected a general declaration");
        };
        assert!(matches!(&decl.specs[0], Spec::Type(t) if t.alias));
    }

    #[test]
    fn var_needs_type_or_value() {
        assert!(Decl::parse("var x").is_err());
    }

    #[test]
    fn functions() {
        let Decl::Func(decl) = parse("func main() {}") else {
            panic!("expected a function");
        };
        assert_eq!(decl.name.as_str(), "main");
        assert!(decl.recv.is_none());
        assert!(decl.body.is_some());

        let Decl::Func(decl) = parse("func (p *Point) Len() float64 { return 0 }")
        else {
            panic!("expected a method");
        };
        assert_eq!(decl.recv.map(|r| r.len()), Some(1));

        let Decl::Func(decl) = parse("func external(x int) int") else {
            panic!("expected a function");
        };
        assert!(decl.body.is_none());
    }

    #[test]
    fn not_a_declaration() {
        assert!(Decl::parse("x := 1").is_err());
    }
}
