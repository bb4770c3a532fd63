//! Types
//!
//! The type forms that have their own syntax. Named types are just
//! [`Identifier`]s or [`Selector`][crate::Selector]s, and pointer types are
//! [`Star`][crate::Star]s.

use diagnostic::Span;

use parser::{
    lexer::{Delimiter, Keyword, Operator, TokenKind},
    Parse, Parser,
};

use crate::{
    error::{expect, expect_semi, expected, SyntaxError},
    expression::{Ellipsis, Paren, Selector, Star},
    function::{Field, FuncType},
    Error, Expr, Identifier, Literal, Syntax,
};

/// An array type `[N]T`, or a slice type `[]T` when there is no length.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub open: Span,
    pub len: Option<Box<Expr>>,
    pub element: Box<Expr>,
}

/// `map[K]V`
#[derive(Debug, Clone, PartialEq)]
pub struct MapType {
    pub keyword: Span,
    pub key: Box<Expr>,
    pub value: Box<Expr>,
}

/// Which way values can move through a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// A channel type, `chan T`, `chan<- T` or `<-chan T`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChanType {
    pub begin: Span,
    pub dir: ChanDir,
    pub value: Box<Expr>,
}

/// `struct { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub keyword: Span,
    pub fields: Vec<Field>,
    pub close: Span,
}

/// `interface { ... }`
///
/// Methods are a [`Field`] with one name and a [`FuncType`], and embedded
/// interfaces have no names.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceType {
    pub keyword: Span,
    pub methods: Vec<Field>,
    pub close: Span,
}

impl Syntax for ArrayType {
    const NAME: &'static str = "array or slice type";

    fn span(&self) -> Span {
        self.open + self.element.span()
    }
}

impl Syntax for MapType {
    const NAME: &'static str = "map type";

    fn span(&self) -> Span {
        self.keyword + self.value.span()
    }
}

impl Syntax for ChanType {
    const NAME: &'static str = "channel type";

    fn span(&self) -> Span {
        self.begin + self.value.span()
    }
}

impl Syntax for StructType {
    const NAME: &'static str = "struct type";

    fn span(&self) -> Span {
        self.keyword + self.close
    }
}

impl Syntax for InterfaceType {
    const NAME: &'static str = "interface type";

    fn span(&self) -> Span {
        self.keyword + self.close
    }
}

/// Can a type start with this token?
pub(crate) fn starts_type(kind: Option<TokenKind>) -> bool {
    matches!(
        kind,
        Some(
            TokenKind::Identifier
                | TokenKind::Operator(Operator::Mul | Operator::Arrow)
                | TokenKind::Open(Delimiter::Bracket | Delimiter::Parenthesis)
                | TokenKind::Keyword(
                    Keyword::Chan
                        | Keyword::Func
                        | Keyword::Interface
                        | Keyword::Map
                        | Keyword::Struct
                )
        )
    )
}

/// Parse a type.
///
/// # Grammar
///
/// ```text
/// type := name | name '.' name | '*' type | '(' type ')'
///       | array | slice | map | chan | func | struct | interface
/// ```
pub(crate) fn parse_type(parser: &mut Parser) -> Result<Expr, Error> {
    parser.depth_track(|parser| match parser.peek() {
        Some(TokenKind::Identifier) => {
            let name = parser.parse::<Identifier>()?;

            if parser.peek() == Some(TokenKind::Dot)
                && parser.peek_nth(1) == Some(TokenKind::Identifier)
            {
                parser.consume(TokenKind::Dot);
                let selected = parser.parse()?;
                Ok(Expr::Selector(Selector {
                    target: Box::new(Expr::Ident(name)),
                    name: selected,
                }))
            } else {
                Ok(Expr::Ident(name))
            }
        }

        Some(TokenKind::Operator(Operator::Mul)) => {
            let star = parser.peek_span();
            parser.consume(TokenKind::Operator(Operator::Mul));
            let inner = parse_type(parser)?;
            Ok(Expr::Star(Star {
                star,
                inner: Box::new(inner),
            }))
        }

        Some(TokenKind::Open(Delimiter::Parenthesis)) => {
            let open = parser.peek_span();
            parser.consume(TokenKind::Open(Delimiter::Parenthesis));
            let inner = parser.nested(parse_type)?;
            let close = expect(
                parser,
                TokenKind::Close(Delimiter::Parenthesis),
                "')'",
            )?;
            Ok(Expr::Paren(Paren {
                open,
                inner: Box::new(inner),
                close: close.span(),
            }))
        }

        Some(TokenKind::Open(Delimiter::Bracket)) => {
            parser.parse().map(Expr::ArrayType)
        }
        Some(TokenKind::Keyword(Keyword::Map)) => {
            parser.parse().map(Expr::MapType)
        }
        Some(
            TokenKind::Keyword(Keyword::Chan)
            | TokenKind::Operator(Operator::Arrow),
        ) => parser.parse().map(Expr::ChanType),
        Some(TokenKind::Keyword(Keyword::Func)) => {
            parser.parse().map(Expr::FuncType)
        }
        Some(TokenKind::Keyword(Keyword::Struct)) => {
            parser.parse().map(Expr::StructType)
        }
        Some(TokenKind::Keyword(Keyword::Interface)) => {
            parser.parse().map(Expr::InterfaceType)
        }

        _ => Err(expected(parser, "type")),
    })
}

impl<'a> Parse<'a> for ArrayType {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<ArrayType, Error> {
        let close_kind = TokenKind::Close(Delimiter::Bracket);
        let open = expect(parser, TokenKind::Open(Delimiter::Bracket), "'['")?;

        let len = if parser.peek() == Some(close_kind) {
            None
        } else if parser.peek() == Some(TokenKind::Ellipsis)
            && parser.peek_nth(1) == Some(close_kind)
        {
            let span = parser.peek_span();
            parser.consume(TokenKind::Ellipsis);
            Some(Box::new(Expr::Ellipsis(Ellipsis {
                span,
                element: None,
            })))
        } else {
            Some(Box::new(parser.nested(|parser| parser.parse::<Expr>())?))
        };

        expect(parser, close_kind, "']'")?;
        let element = parse_type(parser)?;

        Ok(ArrayType {
            open: open.span(),
            len,
            element: Box::new(element),
        })
    }
}

impl<'a> Parse<'a> for MapType {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<MapType, Error> {
        let keyword = expect(parser, TokenKind::Keyword(Keyword::Map), "'map'")?;
        expect(parser, TokenKind::Open(Delimiter::Bracket), "'['")?;
        let key = parser.nested(parse_type)?;
        expect(parser, TokenKind::Close(Delimiter::Bracket), "']'")?;
        let value = parse_type(parser)?;

        Ok(MapType {
            keyword: keyword.span(),
            key: Box::new(key),
            value: Box::new(value),
        })
    }
}

impl<'a> Parse<'a> for ChanType {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<ChanType, Error> {
        let begin = parser.peek_span();
        let arrow = TokenKind::Operator(Operator::Arrow);

        let dir = if parser.consume(arrow).is_some() {
            expect(parser, TokenKind::Keyword(Keyword::Chan), "'chan'")?;
            ChanDir::Recv
        } else {
            expect(parser, TokenKind::Keyword(Keyword::Chan), "'chan'")?;

            if parser.consume(arrow).is_some() {
                ChanDir::Send
            } else {
                ChanDir::Both
            }
        };

        let value = parse_type(parser)?;

        Ok(ChanType {
            begin,
            dir,
            value: Box::new(value),
        })
    }
}

impl<'a> Parse<'a> for StructType {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<StructType, Error> {
        let keyword =
            expect(parser, TokenKind::Keyword(Keyword::Struct), "'struct'")?;
        expect(parser, TokenKind::Open(Delimiter::Brace), "'{'")?;

        let fields = parser.nested(|parser| {
            let mut fields = Vec::new();

            while !matches!(
                parser.peek(),
                None | Some(TokenKind::Close(Delimiter::Brace))
            ) {
                fields.push(struct_field(parser)?);
                expect_semi(parser)?;
            }

            Ok::<_, Error>(fields)
        })?;

        let close = expect(parser, TokenKind::Close(Delimiter::Brace), "'}'")?;

        Ok(StructType {
            keyword: keyword.span(),
            fields,
            close: close.span(),
        })
    }
}

/// A struct field is a list of names and a type, or an embedded type, and
/// then an optional tag.
fn struct_field(parser: &mut Parser) -> Result<Field, Error> {
    let embedded = match parser.peek() {
        Some(TokenKind::Operator(Operator::Mul)) => true,
        Some(TokenKind::Identifier) => matches!(
            parser.peek_nth(1),
            Some(
                TokenKind::Dot
                    | TokenKind::Semicolon
                    | TokenKind::String
                    | TokenKind::Close(Delimiter::Brace)
            )
        ),
        _ => return Err(expected(parser, "field name or embedded type")),
    };

    let (names, ty) = if embedded {
        (Vec::new(), parse_type(parser)?)
    } else {
        (Identifier::list(parser)?, parse_type(parser)?)
    };

    let tag = if parser.peek() == Some(TokenKind::String) {
        Some(parser.parse::<Literal>()?)
    } else {
        None
    };

    Ok(Field { names, ty, tag })
}

impl<'a> Parse<'a> for InterfaceType {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<InterfaceType, Error> {
        let keyword = expect(
            parser,
            TokenKind::Keyword(Keyword::Interface),
            "'interface'",
        )?;
        expect(parser, TokenKind::Open(Delimiter::Brace), "'{'")?;

        let methods = parser.nested(|parser| {
            let mut methods = Vec::new();

            while !matches!(
                parser.peek(),
                None | Some(TokenKind::Close(Delimiter::Brace))
            ) {
                methods.push(interface_element(parser)?);
                expect_semi(parser)?;
            }

            Ok::<_, Error>(methods)
        })?;

        let close = expect(parser, TokenKind::Close(Delimiter::Brace), "'}'")?;

        Ok(InterfaceType {
            keyword: keyword.span(),
            methods,
            close: close.span(),
        })
    }
}

fn interface_element(parser: &mut Parser) -> Result<Field, Error> {
    let is_method = parser.peek() == Some(TokenKind::Identifier)
        && parser.peek_nth(1)
            == Some(TokenKind::Open(Delimiter::Parenthesis));

    if is_method {
        let name = parser.parse::<Identifier>()?;
        let signature = FuncType::signature(parser, None)?;

        Ok(Field {
            names: vec![name],
            ty: Expr::FuncType(signature),
            tag: None,
        })
    } else {
        Ok(Field {
            names: Vec::new(),
            ty: parse_type(parser)?,
            tag: None,
        })
    }
}

#[cfg(test)]
mod parser_tests {
    use super::*;

    fn parse(input: &str) -> Expr {
        let mut parser = Parser::new(input).unwrap();
        let ty = parse_type(&mut parser);
        parser.skip_automatic_semicolon();
        assert!(parser.is_empty(), "left over input in {:?}", input);
        ty.unwrap()
    }

    #[test]
    fn names() {
        assert!(matches!(parse("int"), Expr::Ident(_)));
        assert!(matches!(parse("time.Duration"), Expr::Selector(_)));
        assert!(matches!(parse("*T"), Expr::Star(_)));
        assert!(matches!(parse("(T)"), Expr::Paren(_)));
    }

    #[test]
    fn arrays_and_slices() {
        let Expr::ArrayType(slice) = parse("[]int") else {
            panic!("expected a slice type");
        };
        assert!(slice.len.is_none());

        let Expr::ArrayType(array) = parse("[4]int") else {
            panic!("expected an array type");
        };
        assert!(array.len.is_some());

        let Expr::ArrayType(array) = parse("[...]int") else {
            panic!("expected an array type");
        };
        assert!(matches!(array.len.as_deref(), Some(Expr::Ellipsis(_))));
    }

    #[test]
    fn maps() {
        assert!(matches!(parse("map[string][]int"), Expr::MapType(_)));
    }

    #[test]
    fn channels() {
        let dir = |input| match parse(input) {
            Expr::ChanType(c) => c.dir,
            other => panic!("expected a channel type, found {:?}", other),
        };

        assert_eq!(dir("chan int"), ChanDir::Both);
        assert_eq!(dir("chan<- int"), ChanDir::Send);
        assert_eq!(dir("<-chan int"), ChanDir::Recv);
    }

    #[test]
    fn structs() {
        let Expr::StructType(s) =
            parse("struct {\n\ta, b int\n\tio.Reader\n\t*Node\n\tName string `json:\"name\"`\n}")
        else {
            panic!("expected a struct type");
        };

        assert_eq!(s.fields.len(), 4);
        assert_eq!(s.fields[0].names.len(), 2);
        assert!(s.fields[1].names.is_empty());
        assert!(s.fields[2].names.is_empty());
        assert!(s.fields[3].tag.is_some());
    }

    #[test]
    fn empty_struct() {
        let Expr::StructType(s) = parse("struct{}") else {
            panic!("expected a struct type");
        };
        assert!(s.fields.is_empty());
    }

    #[test]
    fn interfaces() {
        let Expr::InterfaceType(i) =
            parse("interface {\n\tio.Reader\n\tClose() error\n}")
        else {
            panic!("expected an interface type");
        };

        assert_eq!(i.methods.len(), 2);
        assert!(i.methods[0].names.is_empty());
        assert_eq!(i.methods[1].names[0].as_str(), "Close");
    }

    #[test]
    fn functions() {
        assert!(matches!(parse("func(int) (bool, error)"), Expr::FuncType(_)));
    }

    #[test]
    fn not_a_type() {
        let mut parser = Parser::new("1").unwrap();
        assert!(parse_type(&mut parser).is_err());
    }
}
