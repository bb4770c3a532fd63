//! Control flow statements
//!
//! The headers of `if`, `switch` and `for` are parsed at expression level
//! `-1`, so that in `if x {` the `{` starts the body instead of a composite
//! literal `x{...}`.

use diagnostic::Span;

use parser::{
    lexer::{Delimiter, Keyword, TokenKind},
    Parse, Parser,
};

use crate::{
    error::{expect, expected, SyntaxError},
    statement::{into_expr, simple, simple_rest, Mode},
    types::parse_type,
    AssignOp, Block, Error, Expr, Stmt, Syntax,
};

/// `if init; cond { ... } else ...`
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub keyword: Span,
    pub init: Option<Box<Stmt>>,
    pub cond: Expr,
    pub body: Block,
    /// Either another [`Stmt::If`] or a [`Stmt::Block`].
    pub else_branch: Option<Box<Stmt>>,
}

/// An expression switch, `switch init; tag { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub keyword: Span,
    pub init: Option<Box<Stmt>>,
    pub tag: Option<Expr>,
    pub clauses: Vec<CaseClause>,
    pub close: Span,
}

/// A type switch, `switch v := x.(type) { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSwitch {
    pub keyword: Span,
    pub init: Option<Box<Stmt>>,
    /// Either `x.(type)` as an expression statement, or assigned with `:=`.
    pub guard: Box<Stmt>,
    pub clauses: Vec<CaseClause>,
    pub close: Span,
}

/// A `case a, b:` or `default:` clause of a switch.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseClause {
    pub keyword: Span,
    /// Empty for `default`.
    pub list: Vec<Expr>,
    pub body: Vec<Stmt>,
}

/// `select { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub keyword: Span,
    pub clauses: Vec<CommClause>,
    pub close: Span,
}

/// A `case` of a select, with a send or receive, or the `default`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommClause {
    pub keyword: Span,
    /// `None` for `default`.
    pub comm: Option<Box<Stmt>>,
    pub body: Vec<Stmt>,
}

/// `for init; cond; post { ... }`, where all three parts are optional.
#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub keyword: Span,
    pub init: Option<Box<Stmt>>,
    pub cond: Option<Expr>,
    pub post: Option<Box<Stmt>>,
    pub body: Block,
}

/// `for key, value := range expr { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub keyword: Span,
    pub key: Option<Expr>,
    pub value: Option<Expr>,
    /// Set when the variables are declared with `:=` rather than assigned.
    pub define: bool,
    pub expr: Expr,
    pub body: Block,
}

impl CaseClause {
    pub fn is_default(&self) -> bool {
        self.list.is_empty()
    }
}

impl Syntax for If {
    const NAME: &'static str = "if statement";

    fn span(&self) -> Span {
        match &self.else_branch {
            Some(branch) => self.keyword + branch.span(),
            None => self.keyword + self.body.span(),
        }
    }
}

impl Syntax for Switch {
    const NAME: &'static str = "switch statement";

    fn span(&self) -> Span {
        self.keyword + self.close
    }
}

impl Syntax for TypeSwitch {
    const NAME: &'static str = "type switch statement";

    fn span(&self) -> Span {
        self.keyword + self.close
    }
}

impl Syntax for Select {
    const NAME: &'static str = "select statement";

    fn span(&self) -> Span {
        self.keyword + self.close
    }
}

impl Syntax for For {
    const NAME: &'static str = "for statement";

    fn span(&self) -> Span {
        self.keyword + self.body.span()
    }
}

impl Syntax for Range {
    const NAME: &'static str = "range statement";

    fn span(&self) -> Span {
        self.keyword + self.body.span()
    }
}

fn keyword(parser: &mut Parser, keyword: Keyword) -> Result<Span, Error> {
    parser
        .consume(TokenKind::Keyword(keyword))
        .map(|t| t.span())
        .ok_or_else(|| expected(parser, keyword.as_str()))
}

fn at_body(parser: &Parser) -> bool {
    parser.peek() == Some(TokenKind::Open(Delimiter::Brace))
}

impl<'a> Parse<'a> for If {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<If, Error> {
        let keyword = keyword(parser, Keyword::If)?;

        if at_body(parser) {
            let span = parser.peek_span();
            return Err(SyntaxError::MissingCondition("if", span).into());
        }

        let (init, cond) = parser.with_expr_level(-1, |parser| {
            let mut init = None;

            if parser.peek() != Some(TokenKind::Semicolon) {
                init = Some(simple(parser, Mode::Basic)?);
            }

            let cond = if at_body(parser) {
                init.take()
            } else {
                expect(parser, TokenKind::Semicolon, "'{' after if clause")?;

                if at_body(parser) {
                    None
                } else {
                    Some(simple(parser, Mode::Basic)?)
                }
            };

            Ok::<_, Error>((init, cond))
        })?;

        let cond = match cond {
            Some(stmt) => into_expr(stmt)?,
            None => {
                let span = parser.peek_span();
                return Err(SyntaxError::MissingCondition("if", span).into());
            }
        };

        let body = parser.parse::<Block>()?;

        let else_branch = if parser
            .consume(TokenKind::Keyword(Keyword::Else))
            .is_some()
        {
            match parser.peek() {
                Some(TokenKind::Keyword(Keyword::If)) => {
                    let chained = parser.depth_track(|parser| parser.parse())?;
                    Some(Box::new(Stmt::If(chained)))
                }
                Some(TokenKind::Open(Delimiter::Brace)) => {
                    Some(Box::new(Stmt::Block(parser.parse()?)))
                }
                _ => return Err(expected(parser, "if statement or block")),
            }
        } else {
            None
        };

        Ok(If {
            keyword,
            init: init.map(Box::new),
            cond,
            body,
            else_branch,
        })
    }
}

/// Is this the `x.(type)` or `v := x.(type)` guard of a type switch?
fn is_type_guard(stmt: &Stmt) -> bool {
    let is_guard =
        |e: &Expr| matches!(e, Expr::TypeAssert(assert) if assert.ty.is_none());

    match stmt {
        Stmt::Expr(e) => is_guard(e),
        Stmt::Assign(a) => {
            a.op == AssignOp::Define
                && a.lhs.len() == 1
                && a.rhs.len() == 1
                && is_guard(&a.rhs[0])
        }
        _ => false,
    }
}

/// Parse either kind of `switch`.
pub(crate) fn switch(parser: &mut Parser) -> Result<Stmt, Error> {
    let keyword = keyword(parser, Keyword::Switch)?;

    let (init, tag) = parser.with_expr_level(-1, |parser| {
        let mut init = None;
        let mut tag = None;

        if !at_body(parser) {
            if parser.peek() != Some(TokenKind::Semicolon) {
                tag = Some(simple(parser, Mode::Basic)?);
            }

            if parser.consume(TokenKind::Semicolon).is_some() {
                init = tag.take();

                if !at_body(parser) {
                    tag = Some(simple(parser, Mode::Basic)?);
                }
            }
        }

        Ok::<_, Error>((init, tag))
    })?;

    let type_switch = tag.as_ref().map_or(false, is_type_guard);

    expect(parser, TokenKind::Open(Delimiter::Brace), "'{'")?;

    let mut clauses = Vec::new();
    while matches!(
        parser.peek(),
        Some(TokenKind::Keyword(Keyword::Case | Keyword::Default))
    ) {
        clauses.push(case_clause(parser, type_switch)?);
    }

    let close = expect(parser, TokenKind::Close(Delimiter::Brace), "'}'")?;
    let close = close.span();
    let init = init.map(Box::new);

    match tag {
        Some(guard) if type_switch => Ok(Stmt::TypeSwitch(TypeSwitch {
            keyword,
            init,
            guard: Box::new(guard),
            clauses,
            close,
        })),
        tag => Ok(Stmt::Switch(Switch {
            keyword,
            init,
            tag: tag.map(into_expr).transpose()?,
            clauses,
            close,
        })),
    }
}

fn case_clause(
    parser: &mut Parser,
    type_switch: bool,
) -> Result<CaseClause, Error> {
    let keyword = parser.peek_span();

    let list = if parser.consume(TokenKind::Keyword(Keyword::Case)).is_some() {
        if type_switch {
            let mut types = vec![parse_type(parser)?];
            while parser.consume(TokenKind::Comma).is_some() {
                types.push(parse_type(parser)?);
            }
            types
        } else {
            Expr::list(parser)?
        }
    } else {
        expect(parser, TokenKind::Keyword(Keyword::Default), "'case' or 'default'")?;
        Vec::new()
    };

    expect(parser, TokenKind::Colon, "':'")?;
    let body = Stmt::list(parser)?;

    Ok(CaseClause {
        keyword,
        list,
        body,
    })
}

impl<'a> Parse<'a> for Select {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<Select, Error> {
        let keyword = keyword(parser, Keyword::Select)?;
        expect(parser, TokenKind::Open(Delimiter::Brace), "'{'")?;

        let mut clauses = Vec::new();
        while matches!(
            parser.peek(),
            Some(TokenKind::Keyword(Keyword::Case | Keyword::Default))
        ) {
            clauses.push(parser.parse()?);
        }

        let close = expect(parser, TokenKind::Close(Delimiter::Brace), "'}'")?;

        Ok(Select {
            keyword,
            clauses,
            close: close.span(),
        })
    }
}

impl<'a> Parse<'a> for CommClause {
    type SyntaxError = SyntaxError;

    fn parse_with(parser: &mut Parser<'a>) -> Result<CommClause, Error> {
        let keyword = parser.peek_span();

        let comm = if parser.consume(TokenKind::Keyword(Keyword::Case)).is_some()
        {
            Some(Box::new(simple(parser, Mode::Basic)?))
        } else {
            expect(
                parser,
                TokenKind::Keyword(Keyword::Default),
                "'case' or 'default'",
            )?;
            None
        };

        expect(parser, TokenKind::Colon, "':'")?;
        let body = Stmt::list(parser)?;

        Ok(CommClause {
            keyword,
            comm,
            body,
        })
    }
}

/// The header of a `for` loop.
enum Header {
    Clauses(Option<Stmt>, Option<Stmt>, Option<Stmt>),
    Range(Option<Expr>, Option<Expr>, bool, Expr),
}

/// Parse a `for` loop, which could be a [`For`] or a [`Range`].
pub(crate) fn for_loop(parser: &mut Parser) -> Result<Stmt, Error> {
    let keyword = keyword(parser, Keyword::For)?;

    let header = if at_body(parser) {
        Header::Clauses(None, None, None)
    } else {
        parser.with_expr_level(-1, for_header)?
    };

    let body = parser.parse::<Block>()?;

    match header {
        Header::Clauses(init, cond, post) => Ok(Stmt::For(For {
            keyword,
            init: init.map(Box::new),
            cond: cond.map(into_expr).transpose()?,
            post: post.map(Box::new),
            body,
        })),
        Header::Range(key, value, define, expr) => Ok(Stmt::Range(Range {
            keyword,
            key,
            value,
            define,
            expr,
            body,
        })),
    }
}

fn for_header(parser: &mut Parser) -> Result<Header, Error> {
    let range = TokenKind::Keyword(Keyword::Range);

    if parser.consume(range).is_some() {
        let expr = parser.parse()?;
        return Ok(Header::Range(None, None, false, expr));
    }

    let mut cond = None;

    if parser.peek() != Some(TokenKind::Semicolon) {
        let lhs = Expr::list(parser)?;

        let define = match parser.peek() {
            Some(TokenKind::Define) => Some(true),
            Some(TokenKind::Assign) => Some(false),
            _ => None,
        };

        match define {
            Some(define) if parser.peek_nth(1) == Some(range) => {
                parser.consume_if(|_| true);
                parser.consume(range);
                return range_clause(lhs, define, parser.parse()?);
            }
            _ => cond = Some(simple_rest(parser, lhs, Mode::Basic)?),
        }
    }

    if parser.consume(TokenKind::Semicolon).is_none() {
        return Ok(Header::Clauses(None, cond, None));
    }

    let init = cond.take();

    if parser.peek() != Some(TokenKind::Semicolon) {
        cond = Some(simple(parser, Mode::Basic)?);
    }

    expect(parser, TokenKind::Semicolon, "';'")?;

    let post = if at_body(parser) {
        None
    } else {
        Some(simple(parser, Mode::Basic)?)
    };

    Ok(Header::Clauses(init, cond, post))
}

fn range_clause(
    lhs: Vec<Expr>,
    define: bool,
    expr: Expr,
) -> Result<Header, Error> {
    if let Some(extra) = lhs.get(2) {
        return Err(SyntaxError::RangeTooManyVariables(extra.span()).into());
    }

    let mut lhs = lhs.into_iter();
    let key = lhs.next();
    let value = lhs.next();

    Ok(Header::Range(key, value, define, expr))
}
