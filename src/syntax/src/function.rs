//! Functions
//!
//! Function types, their parameter lists, and function literals. Declared
//! functions are in [`crate::declaration`].

use diagnostic::Span;

use parser::{
    lexer::{Delimiter, Keyword, TokenKind},
    Parse, Parser,
};

use crate::{
    error::{expect, SyntaxError},
    expression::Ellipsis,
    types::{parse_type, starts_type},
    Block, Error, Expr, Identifier, Literal, Syntax,
};

/// A field in a struct, a parameter or result group, or an interface
/// method.
///
/// Embedded struct fields and unnamed parameters have no names.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub names: Vec<Identifier>,
    pub ty: Expr,
    pub tag: Option<Literal>,
}

/// A function signature like `func(a, b int) (int, error)`.
///
/// Interface methods and method declarations don't have their own `func`
/// keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncType {
    pub func: Option<Span>,
    pub params: Vec<Field>,
    pub results: Vec<Field>,
    /// Where the parameter list opens.
    pub open: Span,
    /// The last token of the signature.
    pub end: Span,
}

/// A function literal, `func(x int) int { return x }`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncLit {
    pub ty: FuncType,
    pub body: Block,
}

impl Syntax for FuncType {
    const NAME: &'static str = "function type";

    fn span(&self) -> Span {
        self.func.unwrap_or(self.open) + self.end
    }
}

impl Syntax for FuncLit {
    const NAME: &'static str = "function literal";

    fn span(&self) -> Span {
        self.ty.span() + self.body.span()
    }
}

impl<'a> Parse<'a> for FuncType {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<FuncType, Error> {
        let func = expect(parser, TokenKind::Keyword(Keyword::Func), "'func'")?;
        FuncType::signature(parser, Some(func.span()))
    }
}

impl FuncType {
    /// The parameters and results, after the `func` keyword or the name of a
    /// method.
    ///
    /// # Grammar
    ///
    /// ```text
    /// signature := parameters (parameters | type)?
    /// ```
    pub(crate) fn signature(
        parser: &mut Parser,
        func: Option<Span>,
    ) -> Result<FuncType, Error> {
        let open = parser.peek_span();
        let params = parameters(parser)?;

        let results = match parser.peek() {
            Some(TokenKind::Open(Delimiter::Parenthesis)) => parameters(parser)?,
            kind if starts_type(kind) => vec![Field {
                names: Vec::new(),
                ty: parse_type(parser)?,
                tag: None,
            }],
            _ => Vec::new(),
        };

        Ok(FuncType {
            func,
            params,
            results,
            open,
            end: parser.previous_span(),
        })
    }
}

/// A parenthesized parameter list.
///
/// Either every parameter has a name or none do. Since `(a, b int)` starts
/// out looking like two unnamed types, entries are collected first and
/// grouped once the whole list has been seen.
pub(crate) fn parameters(parser: &mut Parser) -> Result<Vec<Field>, Error> {
    let close_kind = TokenKind::Close(Delimiter::Parenthesis);
    expect(parser, TokenKind::Open(Delimiter::Parenthesis), "'('")?;

    let entries = parser.nested(|parser| {
        parser.sep_by_trailing(TokenKind::Comma, close_kind, |parser| {
            let first = parameter_type(parser)?;

            let second = match parser.peek() {
                Some(TokenKind::Comma) => None,
                kind if kind == Some(close_kind) => None,
                Some(TokenKind::Ellipsis) => Some(parameter_type(parser)?),
                kind if starts_type(kind) => Some(parameter_type(parser)?),
                _ => None,
            };

            Ok::<_, Error>((first, second))
        })
    })?;

    expect(parser, close_kind, "')'")?;

    group(entries)
}

fn parameter_type(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.consume(TokenKind::Ellipsis) {
        Some(token) => {
            let element = parse_type(parser)?;
            Ok(Expr::Ellipsis(Ellipsis {
                span: token.span(),
                element: Some(Box::new(element)),
            }))
        }
        None => parse_type(parser),
    }
}

fn group(entries: Vec<(Expr, Option<Expr>)>) -> Result<Vec<Field>, Error> {
    let named = entries.iter().any(|(_, ty)| ty.is_some());

    if !named {
        return Ok(entries
            .into_iter()
            .map(|(ty, _)| Field {
                names: Vec::new(),
                ty,
                tag: None,
            })
            .collect());
    }

    let mut fields = Vec::new();
    let mut names = Vec::new();

    for (first, ty) in entries {
        match first {
            Expr::Ident(name) => names.push(name),
            other => return Err(SyntaxError::MixedParameters(other.span()).into()),
        }

        if let Some(ty) = ty {
            fields.push(Field {
                names: std::mem::take(&mut names),
                ty,
                tag: None,
            });
        }
    }

    match names.last() {
        Some(dangling) => {
            Err(SyntaxError::MixedParameters(dangling.span()).into())
        }
        None => Ok(fields),
    }
}

#[cfg(test)]
mod parser_tests {
    use super::*;

    fn signature(input: &str) -> FuncType {
        match FuncType::parse(input) {
            Ok(ty) => ty,
            Err(e) => panic!("{:?} failed with {}", input, e),
        }
    }

    #[test]
    fn empty() {
        let ty = signature("func()");
        assert!(ty.params.is_empty());
        assert!(ty.results.is_empty());
    }

    #[test]
    fn unnamed() {
        let ty = signature("func(int, string) error");
        assert_eq!(ty.params.len(), 2);
        assert!(ty.params.iter().all(|f| f.names.is_empty()));
        assert_eq!(ty.results.len(), 1);
    }

    #[test]
    fn grouped_names() {
        let ty = signature("func(a, b int, s string) (n int, err error)");
        assert_eq!(ty.params.len(), 2);
        assert_eq!(ty.params[0].names.len(), 2);
        assert_eq!(ty.params[1].names[0].as_str(), "s");
        assert_eq!(ty.results.len(), 2);
    }

    #[test]
    fn variadic() {
        let ty = signature("func(format string, args ...interface{})");
        assert!(matches!(ty.params[1].ty, Expr::Ellipsis(_)));

        let ty = signature("func(...int)");
        assert!(matches!(ty.params[0].ty, Expr::Ellipsis(_)));
    }

    #[test]
    fn qualified_parameter_types() {
        let ty = signature("func(w io.Writer, r *http.Request)");
        assert_eq!(ty.params.len(), 2);
    }

    #[test]
    fn mixed() {
        assert!(matches!(
            FuncType::parse("func(a, b int, string)"),
            Err(parser::Error::Syntax(SyntaxError::MixedParameters(_)))
        ));
    }

    #[test]
    fn function_results() {
        let ty = signature("func() func() int");
        assert!(matches!(ty.results[0].ty, Expr::FuncType(_)));
    }
}
