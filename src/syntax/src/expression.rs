//! Expressions
//!
//! Go's grammar doesn't separate types from expressions very cleanly, since
//! conversions like `[]byte(s)` and composite literals like `map[K]V{}` put
//! types in expression position. Like `go/ast`, types are just more kinds of
//! [`Expr`] here.

use diagnostic::Span;

use parser::{
    lexer::{Delimiter, Keyword, Operator, TokenKind},
    operator::Precedence,
    Parse, Parser,
};

use crate::{
    error::{expect, expected, SyntaxError},
    function::{FuncLit, FuncType},
    types::{
        self, ArrayType, ChanDir, ChanType, InterfaceType, MapType,
        StructType,
    },
    Block, Error, Identifier, Literal, Syntax,
};

/// This type is a syntax tree enum, like those found in the [`syn`][syn-crate]
/// crate. This means it's an `enum` to dispatch on different types of
/// expressions, each of which is their own actual struct.
///
/// [syn-crate]: https://docs.rs/syn/1.0.84/syn/enum.Expr.html#syntax-tree-enums
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Identifier),
    BasicLit(Literal),
    CompositeLit(CompositeLit),
    FuncLit(FuncLit),
    Paren(Paren),
    Selector(Selector),
    Index(Index),
    Slice(Slice),
    TypeAssert(TypeAssert),
    Call(Call),
    Star(Star),
    Unary(Unary),
    Binary(Binary),
    KeyValue(KeyValue),
    Ellipsis(Ellipsis),

    ArrayType(ArrayType),
    StructType(StructType),
    FuncType(FuncType),
    InterfaceType(InterfaceType),
    MapType(MapType),
    ChanType(ChanType),
}

/// A composite literal like `[]int{1, 2}` or `Point{X: 1}`.
///
/// The type is left out for literals nested in another composite literal,
/// like the inner ones in `[][]int{{1}, {2}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeLit {
    pub ty: Option<Box<Expr>>,
    pub open: Span,
    pub elements: Vec<Expr>,
    pub close: Span,
}

/// A parenthesized expression, `(x)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Paren {
    pub open: Span,
    pub inner: Box<Expr>,
    pub close: Span,
}

/// A selector like `x.name`, or a qualified identifier like `fmt.Println`.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub target: Box<Expr>,
    pub name: Identifier,
}

/// An index expression, `x[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub target: Box<Expr>,
    pub index: Box<Expr>,
    pub close: Span,
}

/// A slice expression, either `x[low:high]` or `x[low:high:max]`. Any of the
/// indices can be missing from the two index form.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub target: Box<Expr>,
    pub low: Option<Box<Expr>>,
    pub high: Option<Box<Expr>>,
    pub max: Option<Box<Expr>>,
    pub close: Span,
}

/// A type assertion `x.(T)`. In a type switch guard it's `x.(type)` and the
/// type is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAssert {
    pub target: Box<Expr>,
    pub ty: Option<Box<Expr>>,
    pub close: Span,
}

/// A function call or conversion, `f(a, b...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub target: Box<Expr>,
    pub arguments: Vec<Expr>,
    /// Where the `...` is, if the last argument is spread.
    pub ellipsis: Option<Span>,
    pub close: Span,
}

/// Either a pointer type `*T` or a dereference `*p`. The parser can't tell.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub star: Span,
    pub inner: Box<Expr>,
}

/// A prefix operator applied to an operand, like `-x` or `<-ch`.
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub op: Operator,
    pub op_span: Span,
    pub operand: Box<Expr>,
}

/// A binary operator expression like `a + b`.
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub op: Operator,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
}

/// A `key: value` pair in a composite literal.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub key: Box<Expr>,
    pub value: Box<Expr>,
}

/// The `...` in a variadic parameter `...T`, or as an array length `[...]T`
/// where there is no element.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipsis {
    pub span: Span,
    pub element: Option<Box<Expr>>,
}

impl Syntax for Expr {
    const NAME: &'static str = "expression";

    fn span(&self) -> Span {
        match self {
            Expr::Ident(i) => i.span(),
            Expr::BasicLit(l) => l.span(),
            Expr::CompositeLit(c) => match &c.ty {
                Some(ty) => ty.span() + c.close,
                None => c.open + c.close,
            },
            Expr::FuncLit(f) => f.span(),
            Expr::Paren(p) => p.open + p.close,
            Expr::Selector(s) => s.target.span() + s.name.span(),
            Expr::Index(i) => i.target.span() + i.close,
            Expr::Slice(s) => s.target.span() + s.close,
            Expr::TypeAssert(t) => t.target.span() + t.close,
            Expr::Call(c) => c.target.span() + c.close,
            Expr::Star(s) => s.star + s.inner.span(),
            Expr::Unary(u) => u.op_span + u.operand.span(),
            Expr::Binary(b) => b.lhs.span() + b.rhs.span(),
            Expr::KeyValue(kv) => kv.key.span() + kv.value.span(),
            Expr::Ellipsis(e) => match &e.element {
                Some(element) => e.span + element.span(),
                None => e.span,
            },
            Expr::ArrayType(a) => a.span(),
            Expr::StructType(s) => s.span(),
            Expr::FuncType(f) => f.span(),
            Expr::InterfaceType(i) => i.span(),
            Expr::MapType(m) => m.span(),
            Expr::ChanType(c) => c.span(),
        }
    }
}

impl<'a> Parse<'a> for Expr {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<Expr, Error> {
        parser.depth_track(|parser| Expr::binary(parser, Precedence::MIN))
    }
}

impl Expr {
    /// A comma separated list of one or more expressions.
    pub(crate) fn list(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
        let mut list = vec![parser.parse::<Expr>()?];

        while parser.consume(TokenKind::Comma).is_some() {
            list.push(parser.parse()?);
        }

        Ok(list)
    }

    /// Can this expression be the type of a composite literal?
    ///
    /// Named types only count when the parser allows it, since in `if x {`
    /// the brace belongs to the `if`.
    fn starts_composite(&self, parser: &Parser) -> bool {
        match self {
            Expr::Ident(_) => parser.composite_allowed(),
            Expr::Selector(s) => {
                matches!(*s.target, Expr::Ident(_)) && parser.composite_allowed()
            }
            Expr::ArrayType(_) | Expr::StructType(_) | Expr::MapType(_) => true,
            _ => false,
        }
    }

    /// Precedence climbing over Go's five levels of binary operators.
    ///
    /// # Grammar
    ///
    /// ```text
    /// binary(max) := unary (op(max) unary)*
    /// binary(n)   := binary(n+1) (op(n) binary(n+1))*
    /// ```
    fn binary(
        parser: &mut Parser,
        precedence: Precedence,
    ) -> Result<Expr, Error> {
        let mut lhs = Expr::unary(parser)?;

        loop {
            let (op, op_precedence) = match parser.peek() {
                Some(TokenKind::Operator(op)) => match op.precedence() {
                    Some(p) if p >= precedence => (op, p),
                    _ => break,
                },
                _ => break,
            };

            parser.consume(TokenKind::Operator(op));
            parser.deepen::<SyntaxError>()?;

            let rhs = match op_precedence.next() {
                Some(next) => Expr::binary(parser, next)?,
                None => Expr::unary(parser)?,
            };

            lhs = Expr::Binary(Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            });
        }

        Ok(lhs)
    }

    /// Prefix operators.
    ///
    /// # Grammar
    ///
    /// ```text
    /// unary := unary_op unary | primary
    /// ```
    fn unary(parser: &mut Parser) -> Result<Expr, Error> {
        parser.depth_track(|parser| match parser.peek() {
            Some(TokenKind::Operator(Operator::Mul)) => {
                let star = parser.peek_span();
                parser.consume(TokenKind::Operator(Operator::Mul));
                let inner = Expr::unary(parser)?;
                Ok(Expr::Star(Star {
                    star,
                    inner: Box::new(inner),
                }))
            }

            Some(TokenKind::Operator(op)) if op.is_unary() => {
                let op_span = parser.peek_span();
                parser.consume(TokenKind::Operator(op));
                let operand = Expr::unary(parser)?;

                match (op, operand) {
                    // `<-chan T` is a receive-only channel type, not a
                    // receive from a `chan T`.
                    (Operator::Arrow, Expr::ChanType(mut chan))
                        if chan.dir == ChanDir::Both =>
                    {
                        chan.dir = ChanDir::Recv;
                        chan.begin = op_span;
                        Ok(Expr::ChanType(chan))
                    }
                    (op, operand) => Ok(Expr::Unary(Unary {
                        op,
                        op_span,
                        operand: Box::new(operand),
                    })),
                }
            }

            _ => Expr::primary(parser),
        })
    }

    /// An operand followed by any number of selectors, indexes, slices,
    /// type assertions, calls, or composite literal bodies.
    pub(crate) fn primary(parser: &mut Parser) -> Result<Expr, Error> {
        let mut expr = Expr::operand(parser)?;

        loop {
            if matches!(
                parser.peek(),
                Some(TokenKind::Dot | TokenKind::Open(_))
            ) {
                parser.deepen::<SyntaxError>()?;
            }

            expr = match parser.peek() {
                Some(TokenKind::Dot) => Expr::selector(parser, expr)?,

                Some(TokenKind::Open(Delimiter::Bracket)) => {
                    Expr::index_or_slice(parser, expr)?
                }

                Some(TokenKind::Open(Delimiter::Parenthesis)) => {
                    Expr::call(parser, expr)?
                }

                Some(TokenKind::Open(Delimiter::Brace))
                    if expr.starts_composite(parser) =>
                {
                    let literal = CompositeLit::body(parser, Some(expr))?;
                    Expr::CompositeLit(literal)
                }

                _ => break,
            }
        }

        Ok(expr)
    }

    /// Operands are expressions without any suffix parts or operators.
    ///
    /// # Grammar
    ///
    /// ```text
    /// operand := identifier | literal | '(' expression ')' | func_lit | type
    /// ```
    fn operand(parser: &mut Parser) -> Result<Expr, Error> {
        match parser.peek() {
            Some(TokenKind::Identifier) => parser.parse().map(Expr::Ident),

            Some(k) if k.is_literal() => parser.parse().map(Expr::BasicLit),

            Some(TokenKind::Open(Delimiter::Parenthesis)) => {
                parser.parse().map(Expr::Paren)
            }

            Some(TokenKind::Keyword(Keyword::Func)) => {
                let ty = parser.parse::<FuncType>()?;

                if parser.peek() == Some(TokenKind::Open(Delimiter::Brace)) {
                    let body = parser.with_expr_level(0, Block::parse_with)?;
                    Ok(Expr::FuncLit(FuncLit { ty, body }))
                } else {
                    Ok(Expr::FuncType(ty))
                }
            }

            Some(
                TokenKind::Open(Delimiter::Bracket)
                | TokenKind::Keyword(
                    Keyword::Chan
                    | Keyword::Interface
                    | Keyword::Map
                    | Keyword::Struct,
                ),
            ) => types::parse_type(parser),

            _ => Err(expected(parser, "operand")),
        }
    }

    fn selector(parser: &mut Parser, target: Expr) -> Result<Expr, Error> {
        expect(parser, TokenKind::Dot, "'.'")?;

        match parser.peek() {
            Some(TokenKind::Identifier) => {
                let name = parser.parse()?;
                Ok(Expr::Selector(Selector {
                    target: Box::new(target),
                    name,
                }))
            }

            Some(TokenKind::Open(Delimiter::Parenthesis)) => {
                parser.consume(TokenKind::Open(Delimiter::Parenthesis));

                let guard = parser.consume(TokenKind::Keyword(Keyword::Type));

                let ty = if guard.is_some() {
                    None
                } else {
                    Some(Box::new(parser.nested(types::parse_type)?))
                };

                let close = expect(
                    parser,
                    TokenKind::Close(Delimiter::Parenthesis),
                    "')'",
                )?;

                Ok(Expr::TypeAssert(TypeAssert {
                    target: Box::new(target),
                    ty,
                    close: close.span(),
                }))
            }

            _ => Err(expected(parser, "selector or type assertion")),
        }
    }

    fn index_or_slice(
        parser: &mut Parser,
        target: Expr,
    ) -> Result<Expr, Error> {
        expect(parser, TokenKind::Open(Delimiter::Bracket), "'['")?;

        parser.nested(|parser| {
            let low = if parser.peek() == Some(TokenKind::Colon) {
                None
            } else {
                Some(Box::new(parser.parse::<Expr>()?))
            };

            if parser.consume(TokenKind::Colon).is_none() {
                let close = expect(
                    parser,
                    TokenKind::Close(Delimiter::Bracket),
                    "']'",
                )?;
                let index = low.ok_or_else(|| expected(parser, "index"))?;

                return Ok(Expr::Index(Index {
                    target: Box::new(target),
                    index,
                    close: close.span(),
                }));
            }

            let high = if at_index_end(parser) {
                None
            } else {
                Some(Box::new(parser.parse::<Expr>()?))
            };

            let max = if parser.consume(TokenKind::Colon).is_some() {
                if high.is_none() {
                    return Err(expected(parser, "middle index"));
                }
                Some(Box::new(parser.parse::<Expr>()?))
            } else {
                None
            };

            let close =
                expect(parser, TokenKind::Close(Delimiter::Bracket), "']'")?;

            Ok(Expr::Slice(Slice {
                target: Box::new(target),
                low,
                high,
                max,
                close: close.span(),
            }))
        })
    }

    fn call(parser: &mut Parser, target: Expr) -> Result<Expr, Error> {
        let close_kind = TokenKind::Close(Delimiter::Parenthesis);
        expect(parser, TokenKind::Open(Delimiter::Parenthesis), "'('")?;

        let mut ellipsis = None;

        let arguments = parser.nested(|parser| {
            parser.sep_by_trailing(TokenKind::Comma, close_kind, |parser| {
                let argument = parser.parse::<Expr>()?;

                if let Some(token) = parser.consume(TokenKind::Ellipsis) {
                    ellipsis = Some(token.span());
                }

                Ok::<_, Error>(argument)
            })
        })?;

        let close = expect(parser, close_kind, "')'")?;

        Ok(Expr::Call(Call {
            target: Box::new(target),
            arguments,
            ellipsis,
            close: close.span(),
        }))
    }
}

fn at_index_end(parser: &Parser) -> bool {
    matches!(
        parser.peek(),
        Some(TokenKind::Colon | TokenKind::Close(Delimiter::Bracket))
    )
}

impl<'a> Parse<'a> for Paren {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<Paren, Error> {
        let open =
            expect(parser, TokenKind::Open(Delimiter::Parenthesis), "'('")?;
        let inner = parser.nested(|parser| parser.parse::<Expr>())?;
        let close =
            expect(parser, TokenKind::Close(Delimiter::Parenthesis), "')'")?;

        Ok(Paren {
            open: open.span(),
            inner: Box::new(inner),
            close: close.span(),
        })
    }
}

impl CompositeLit {
    /// The `{ ... }` part of a composite literal, after the type.
    pub(crate) fn body(
        parser: &mut Parser,
        ty: Option<Expr>,
    ) -> Result<CompositeLit, Error> {
        let close_kind = TokenKind::Close(Delimiter::Brace);
        let open = expect(parser, TokenKind::Open(Delimiter::Brace), "'{'")?;

        let elements = parser.nested(|parser| {
            parser.sep_by_trailing(
                TokenKind::Comma,
                close_kind,
                CompositeLit::element,
            )
        })?;

        let close = expect(parser, close_kind, "'}'")?;

        Ok(CompositeLit {
            ty: ty.map(Box::new),
            open: open.span(),
            elements,
            close: close.span(),
        })
    }

    /// An element is a value, optionally with a key.
    fn element(parser: &mut Parser) -> Result<Expr, Error> {
        let key = CompositeLit::value(parser)?;

        if parser.consume(TokenKind::Colon).is_some() {
            let value = CompositeLit::value(parser)?;
            Ok(Expr::KeyValue(KeyValue {
                key: Box::new(key),
                value: Box::new(value),
            }))
        } else {
            Ok(key)
        }
    }

    /// Keys and values can be literals with their type elided.
    fn value(parser: &mut Parser) -> Result<Expr, Error> {
        if parser.peek() == Some(TokenKind::Open(Delimiter::Brace)) {
            parser
                .depth_track(|parser| CompositeLit::body(parser, None))
                .map(Expr::CompositeLit)
        } else {
            parser.parse()
        }
    }
}

#[cfg(test)]
mod parser_tests {
    use super::*;

    fn parse(input: &str) -> Expr {
        match Expr::parse(input) {
            Ok(expr) => expr,
            Err(e) => panic!("{:?} failed with {}", input, e),
        }
    }

    #[test]
    fn identifier_and_literal() {
        assert!(matches!(parse("foo"), Expr::Ident(_)));
        assert!(matches!(parse("42"), Expr::BasicLit(_)));
    }

    #[test]
    fn precedence() {
        let Expr::Binary(add) = parse("a + b * c") else {
            panic!("expected a binary expression");
        };
        assert_eq!(add.op, Operator::Add);
        assert!(matches!(*add.rhs, Expr::Binary(Binary { op: Operator::Mul, .. })));
    }

    #[test]
    fn left_associative() {
        let Expr::Binary(sub) = parse("a - b - c") else {
            panic!("expected a binary expression");
        };
        assert!(matches!(*sub.lhs, Expr::Binary(Binary { op: Operator::Sub, .. })));
        assert!(matches!(*sub.rhs, Expr::Ident(_)));
    }

    #[test]
    fn logical_lowest() {
        let Expr::Binary(or) = parse("a == b || c && d") else {
            panic!("expected a binary expression");
        };
        assert_eq!(or.op, Operator::LogicalOr);
    }

    #[test]
    fn unary_binds_tighter() {
        let Expr::Binary(mul) = parse("-a * *b") else {
            panic!("expected a binary expression");
        };
        assert!(matches!(*mul.lhs, Expr::Unary(_)));
        assert!(matches!(*mul.rhs, Expr::Star(_)));
    }

    #[test]
    fn receive() {
        let Expr::Unary(recv) = parse("<-ch") else {
            panic!("expected a unary expression");
        };
        assert_eq!(recv.op, Operator::Arrow);
    }

    #[test]
    fn postfix_chain() {
        assert!(matches!(parse("a.b.c"), Expr::Selector(_)));
        assert!(matches!(parse("f(x)(y)"), Expr::Call(_)));
        assert!(matches!(parse("m[k]"), Expr::Index(_)));
        assert!(matches!(parse("s[1:]"), Expr::Slice(_)));
        assert!(matches!(parse("s[:]"), Expr::Slice(_)));
        assert!(matches!(parse("s[a:b:c]"), Expr::Slice(_)));
        assert!(matches!(parse("x.(T)"), Expr::TypeAssert(_)));
        assert!(matches!(parse("fmt.Println(a, b...)"), Expr::Call(_)));
    }

    #[test]
    fn slice_three_index_needs_middle() {
        assert!(Expr::parse("s[a::c]").is_err());
    }

    #[test]
    fn spread_call() {
        let Expr::Call(call) = parse("append(a, b...)") else {
            panic!("expected a call");
        };
        assert_eq!(call.arguments.len(), 2);
        assert!(call.ellipsis.is_some());
    }

    #[test]
    fn composite_literals() {
        assert!(matches!(parse("[]int{1, 2}"), Expr::CompositeLit(_)));
        assert!(matches!(parse("Point{X: 1, Y: 2}"), Expr::CompositeLit(_)));
        assert!(matches!(parse("map[string]int{\"a\": 1}"), Expr::CompositeLit(_)));
        assert!(matches!(parse("[][]int{{1}, {2, 3}}"), Expr::CompositeLit(_)));
        assert!(matches!(parse("pkg.T{}"), Expr::CompositeLit(_)));
        assert!(matches!(parse("[...]string{\"a\"}"), Expr::CompositeLit(_)));
        assert!(matches!(parse("struct{}{}"), Expr::CompositeLit(_)));
    }

    #[test]
    fn composite_trailing_comma() {
        let Expr::CompositeLit(literal) = parse("[]int{\n\t1,\n\t2,\n}") else {
            panic!("expected a composite literal");
        };
        assert_eq!(literal.elements.len(), 2);
    }

    #[test]
    fn composite_missing_comma_before_newline() {
        assert!(Expr::parse("[]int{\n\t1,\n\t2\n}").is_err());
    }

    #[test]
    fn conversions() {
        assert!(matches!(parse("[]byte(s)"), Expr::Call(_)));
        assert!(matches!(parse("(*T)(p)"), Expr::Call(_)));
        assert!(matches!(parse("make(chan int, 1)"), Expr::Call(_)));
    }

    #[test]
    fn function_literal() {
        assert!(matches!(parse("func() {}"), Expr::FuncLit(_)));
        assert!(matches!(
            parse("func(a, b int) (int, error) { return a + b, nil }"),
            Expr::FuncLit(_)
        ));
        assert!(matches!(parse("func(int) bool"), Expr::FuncType(_)));
    }

    #[test]
    fn receive_only_channel_type() {
        let Expr::ChanType(chan) = parse("<-chan int") else {
            panic!("expected a channel type");
        };
        assert_eq!(chan.dir, ChanDir::Recv);
    }

    #[test]
    fn parenthesized() {
        assert!(matches!(parse("(a + b)"), Expr::Paren(_)));
    }

    #[test]
    fn not_expressions() {
        for input in ["", "x := 1", "type foo string", "{ a }", "a;", "if x {}"] {
            assert!(Expr::parse(input).is_err(), "{:?} parsed", input);
        }
    }

    #[test]
    fn trailing_newline_is_fine() {
        assert!(Expr::parse("a + b\n").is_ok());
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let input = format!("{}x{}", "(".repeat(500), ")".repeat(500));
        assert!(matches!(
            Expr::parse(&input),
            Err(parser::Error::ParserDepthExceeded(_))
        ));
    }
}
