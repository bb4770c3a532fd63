//! Statements

use std::fmt;

use diagnostic::Span;

use parser::{
    lexer::{Delimiter, Keyword, Operator, TokenKind},
    Parse, Parser,
};

use crate::{
    error::{expect_semi, expected, SyntaxError},
    Block, Error, Expr, For, GenDecl, Identifier, If, Range, Select, Switch,
    Syntax, TypeSwitch,
};

/// This type is a syntax tree enum, like those found in the [`syn`][syn-crate]
/// crate. This means it's a pretty simple `enum` to dispatch on different types
/// of statements.
///
/// [syn-crate]: https://docs.rs/syn/1.0.84/syn/enum.Expr.html#syntax-tree-enums
///
/// Note that the statement never includes the semicolon at the end (if
/// present).
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A `const`, `type` or `var` declaration inside a function.
    Decl(GenDecl),
    Empty(Empty),
    Labeled(Labeled),
    Expr(Expr),
    Send(Send),
    IncDec(IncDec),
    Assign(Assign),
    Go(Go),
    Defer(Defer),
    Return(Return),
    Branch(Branch),
    Block(Block),
    If(If),
    Switch(Switch),
    TypeSwitch(TypeSwitch),
    Select(Select),
    For(For),
    Range(Range),
}

/// An empty statement, either an explicit `;` or one the parser made up
/// before a `}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Empty {
    pub span: Span,
    pub implicit: bool,
}

/// `label: statement`
#[derive(Debug, Clone, PartialEq)]
pub struct Labeled {
    pub label: Identifier,
    pub stmt: Box<Stmt>,
}

/// `ch <- value`
#[derive(Debug, Clone, PartialEq)]
pub struct Send {
    pub channel: Expr,
    pub value: Expr,
}

/// `x++` or `x--`
#[derive(Debug, Clone, PartialEq)]
pub struct IncDec {
    pub target: Expr,
    pub op: Operator,
    pub op_span: Span,
}

/// The operator in an [`Assign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `:=`
    Define,
    /// Compound assignments like `+=`.
    Operator(Operator),
}

/// An assignment or short variable declaration, like `a, b = b, a` or
/// `x := 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub lhs: Vec<Expr>,
    pub op: AssignOp,
    pub op_span: Span,
    pub rhs: Vec<Expr>,
}

/// `go f()`
#[derive(Debug, Clone, PartialEq)]
pub struct Go {
    pub keyword: Span,
    pub call: Expr,
}

/// `defer f()`
#[derive(Debug, Clone, PartialEq)]
pub struct Defer {
    pub keyword: Span,
    pub call: Expr,
}

/// `return a, b`
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub keyword: Span,
    pub results: Vec<Expr>,
}

/// `break`, `continue`, `goto` or `fallthrough`, with an optional label.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub keyword: Keyword,
    pub keyword_span: Span,
    pub label: Option<Identifier>,
}

impl AssignOp {
    /// The operator as it's written in source.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Define => ":=",
            AssignOp::Operator(o) => o.assign_str(),
        }
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Syntax for Stmt {
    const NAME: &'static str = "statement";

    fn span(&self) -> Span {
        match self {
            Stmt::Decl(d) => d.span(),
            Stmt::Empty(e) => e.span,
            Stmt::Labeled(l) => l.label.span() + l.stmt.span(),
            Stmt::Expr(e) => e.span(),
            Stmt::Send(s) => s.channel.span() + s.value.span(),
            Stmt::IncDec(i) => i.target.span() + i.op_span,
            Stmt::Assign(a) => {
                let start = a.lhs.first().map_or(a.op_span, Syntax::span);
                let end = a.rhs.last().map_or(a.op_span, Syntax::span);
                start + end
            }
            Stmt::Go(g) => g.keyword + g.call.span(),
            Stmt::Defer(d) => d.keyword + d.call.span(),
            Stmt::Return(r) => match r.results.last() {
                Some(last) => r.keyword + last.span(),
                None => r.keyword,
            },
            Stmt::Branch(b) => match &b.label {
                Some(label) => b.keyword_span + label.span(),
                None => b.keyword_span,
            },
            Stmt::Block(b) => b.span(),
            Stmt::If(i) => i.span(),
            Stmt::Switch(s) => s.span(),
            Stmt::TypeSwitch(s) => s.span(),
            Stmt::Select(s) => s.span(),
            Stmt::For(f) => f.span(),
            Stmt::Range(r) => r.span(),
        }
    }
}

impl Stmt {
    /// How to refer to this statement in an error message, when it was
    /// used where a value was needed.
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Stmt::Assign(a) if a.op == AssignOp::Define => {
                "a short variable declaration"
            }
            Stmt::Assign(_) => "an assignment",
            Stmt::Send(_) => "a send statement",
            Stmt::IncDec(_) => "an increment or decrement statement",
            Stmt::Labeled(_) => "a labeled statement",
            _ => "a statement",
        }
    }

    /// Statements up to the end of the enclosing block or case clause.
    pub(crate) fn list(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
        let mut statements = Vec::new();

        while !matches!(
            parser.peek(),
            None | Some(
                TokenKind::Close(Delimiter::Brace)
                    | TokenKind::Keyword(Keyword::Case | Keyword::Default)
            )
        ) {
            statements.push(parser.parse()?);
        }

        Ok(statements)
    }
}

impl<'a> Parse<'a> for Stmt {
    type SyntaxError = SyntaxError;

    /// Parse a statement along with the `;` that ends it.
    fn parse_with(parser: &mut Parser<'a>) -> Result<Stmt, Error> {
        parser.depth_track(|parser| {
            let stmt = match parser.peek() {
                Some(TokenKind::Keyword(
                    Keyword::Const | Keyword::Type | Keyword::Var,
                )) => Stmt::Decl(parser.parse()?),

                kind if starts_simple(kind) => {
                    match simple(parser, Mode::LabelOk)? {
                        // The labeled statement already ate its `;`.
                        labeled @ Stmt::Labeled(_) => return Ok(labeled),
                        stmt => stmt,
                    }
                }

                Some(TokenKind::Keyword(Keyword::Go)) => {
                    let keyword = parser.peek_span();
                    parser.consume(TokenKind::Keyword(Keyword::Go));
                    let call = parser.parse()?;
                    Stmt::Go(Go { keyword, call })
                }

                Some(TokenKind::Keyword(Keyword::Defer)) => {
                    let keyword = parser.peek_span();
                    parser.consume(TokenKind::Keyword(Keyword::Defer));
                    let call = parser.parse()?;
                    Stmt::Defer(Defer { keyword, call })
                }

                Some(TokenKind::Keyword(Keyword::Return)) => {
                    let keyword = parser.peek_span();
                    parser.consume(TokenKind::Keyword(Keyword::Return));

                    let results = match parser.peek() {
                        Some(
                            TokenKind::Semicolon
                            | TokenKind::Close(Delimiter::Brace),
                        ) => Vec::new(),
                        _ => Expr::list(parser)?,
                    };

                    Stmt::Return(Return { keyword, results })
                }

                Some(TokenKind::Keyword(
                    keyword @ (Keyword::Break
                    | Keyword::Continue
                    | Keyword::Goto
                    | Keyword::Fallthrough),
                )) => {
                    let keyword_span = parser.peek_span();
                    parser.consume(TokenKind::Keyword(keyword));

                    let label = if keyword != Keyword::Fallthrough
                        && parser.peek() == Some(TokenKind::Identifier)
                    {
                        Some(parser.parse()?)
                    } else {
                        None
                    };

                    Stmt::Branch(Branch {
                        keyword,
                        keyword_span,
                        label,
                    })
                }

                Some(TokenKind::Open(Delimiter::Brace)) => {
                    Stmt::Block(parser.parse()?)
                }
                Some(TokenKind::Keyword(Keyword::If)) => Stmt::If(parser.parse()?),
                Some(TokenKind::Keyword(Keyword::Switch)) => {
                    crate::control::switch(parser)?
                }
                Some(TokenKind::Keyword(Keyword::Select)) => {
                    Stmt::Select(parser.parse()?)
                }
                Some(TokenKind::Keyword(Keyword::For)) => {
                    crate::control::for_loop(parser)?
                }

                Some(TokenKind::Semicolon) => {
                    let implicit = parser
                        .peek_token()
                        .map_or(false, |t| t.is_automatic_semicolon());
                    let span = parser.peek_span();
                    parser.consume(TokenKind::Semicolon);
                    return Ok(Stmt::Empty(Empty { span, implicit }));
                }

                // A `;` can be left out before a `}`.
                Some(TokenKind::Close(Delimiter::Brace)) => {
                    let span = Span::at(parser.peek_span().start());
                    return Ok(Stmt::Empty(Empty {
                        span,
                        implicit: true,
                    }));
                }

                _ => return Err(expected(parser, Self::NAME)),
            };

            expect_semi(parser)?;
            Ok(stmt)
        })
    }
}

/// Where a simple statement is being parsed, which changes what's allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// In a control clause header.
    Basic,
    /// At the start of a statement, where `label:` is allowed.
    LabelOk,
}

/// Can this token start a simple statement?
pub(crate) fn starts_simple(kind: Option<TokenKind>) -> bool {
    match kind {
        Some(TokenKind::Identifier) => true,
        Some(k) if k.is_literal() => true,
        Some(TokenKind::Operator(op)) => op.is_unary(),
        Some(
            TokenKind::Open(Delimiter::Parenthesis | Delimiter::Bracket)
            | TokenKind::Keyword(
                Keyword::Func
                | Keyword::Struct
                | Keyword::Map
                | Keyword::Chan
                | Keyword::Interface,
            ),
        ) => true,
        _ => false,
    }
}

/// Simple statements are the ones allowed in control clause headers:
/// expressions, sends, increments, assignments and short variable
/// declarations.
pub(crate) fn simple(parser: &mut Parser, mode: Mode) -> Result<Stmt, Error> {
    let lhs = Expr::list(parser)?;
    simple_rest(parser, lhs, mode)
}

/// The rest of a simple statement once the first expression list is known.
pub(crate) fn simple_rest(
    parser: &mut Parser,
    mut lhs: Vec<Expr>,
    mode: Mode,
) -> Result<Stmt, Error> {
    let op = match parser.peek() {
        Some(TokenKind::Assign) => Some(AssignOp::Assign),
        Some(TokenKind::Define) => Some(AssignOp::Define),
        Some(TokenKind::OperatorAssign(o)) => Some(AssignOp::Operator(o)),
        _ => None,
    };

    if let Some(op) = op {
        let op_span = parser.peek_span();
        parser.consume_if(|_| true);
        let rhs = Expr::list(parser)?;

        if op == AssignOp::Define {
            if let Some(bad) = lhs.iter().find(|e| !matches!(e, Expr::Ident(_))) {
                return Err(SyntaxError::NonNameOnLeft(bad.span()).into());
            }
        }

        return Ok(Stmt::Assign(Assign {
            lhs,
            op,
            op_span,
            rhs,
        }));
    }

    if lhs.len() > 1 {
        return Err(expected(parser, "':=' or '=' or ','"));
    }

    let Some(first) = lhs.pop() else {
        return Err(expected(parser, "expression"));
    };

    match parser.peek() {
        Some(TokenKind::Colon) if mode == Mode::LabelOk => {
            let Expr::Ident(label) = first else {
                return Err(expected(parser, "':=' or '=' or ','"));
            };

            parser.consume(TokenKind::Colon);
            let stmt = parser.parse::<Stmt>()?;

            Ok(Stmt::Labeled(Labeled {
                label,
                stmt: Box::new(stmt),
            }))
        }

        Some(TokenKind::Operator(Operator::Arrow)) => {
            parser.consume(TokenKind::Operator(Operator::Arrow));
            let value = parser.parse()?;
            Ok(Stmt::Send(Send {
                channel: first,
                value,
            }))
        }

        Some(TokenKind::Operator(
            op @ (Operator::Increment | Operator::Decrement),
        )) => {
            let op_span = parser.peek_span();
            parser.consume(TokenKind::Operator(op));
            Ok(Stmt::IncDec(IncDec {
                target: first,
                op,
                op_span,
            }))
        }

        _ => Ok(Stmt::Expr(first)),
    }
}

/// The statement as a value, for `if` conditions, `switch` tags and `for`
/// conditions.
pub(crate) fn into_expr(stmt: Stmt) -> Result<Expr, Error> {
    match stmt {
        Stmt::Expr(e) => Ok(e),
        other => {
            Err(SyntaxError::NotAValue(other.describe(), other.span()).into())
        }
    }
}

#[cfg(test)]
mod parser_tests {
    use super::*;

    fn parse(input: &str) -> Stmt {
        match Stmt::parse(input) {
            Ok(stmt) => stmt,
            Err(e) => panic!("{:?} failed with {}", input, e),
        }
    }

    #[test]
    fn expression_statement() {
        assert!(matches!(parse("f(x)"), Stmt::Expr(Expr::Call(_))));
    }

    #[test]
    fn assignments() {
        let Stmt::Assign(assign) = parse("a, b = b, a") else {
            panic!("expected an assignment");
        };
        assert_eq!(assign.op, AssignOp::Assign);
        assert_eq!(assign.lhs.len(), 2);

        let Stmt::Assign(assign) = parse("x += 2") else {
            panic!("expected an assignment");
        };
        assert_eq!(assign.op, AssignOp::Operator(Operator::Add));
    }

    #[test]
    fn short_variable_declaration() {
        let Stmt::Assign(assign) = parse("foo := 42") else {
            panic!("expected an assignment");
        };
        assert_eq!(assign.op, AssignOp::Define);
    }

    #[test]
    fn define_needs_names() {
        assert!(matches!(
            Stmt::parse("a.b := 1"),
            Err(parser::Error::Syntax(SyntaxError::NonNameOnLeft(_)))
        ));
    }

    #[test]
    fn inc_dec_and_send() {
        assert!(matches!(parse("i++"), Stmt::IncDec(_)));
        assert!(matches!(parse("i--"), Stmt::IncDec(_)));
        assert!(matches!(parse("ch <- v"), Stmt::Send(_)));
    }

    #[test]
    fn declarations() {
        assert!(matches!(parse("var i int64 = 10"), Stmt::Decl(_)));
        assert!(matches!(parse("type foo string"), Stmt::Decl(_)));
        assert!(matches!(parse("const x = 1"), Stmt::Decl(_)));
    }

    #[test]
    fn keywords() {
        assert!(matches!(parse("go f()"), Stmt::Go(_)));
        assert!(matches!(parse("defer f()"), Stmt::Defer(_)));
        assert!(matches!(parse("return"), Stmt::Return(_)));
        assert!(matches!(parse("return a, b"), Stmt::Return(_)));

        let Stmt::Branch(branch) = parse("break outer") else {
            panic!("expected a branch");
        };
        assert_eq!(branch.keyword, Keyword::Break);
        assert!(branch.label.is_some());

        assert!(matches!(parse("fallthrough"), Stmt::Branch(_)));
    }

    #[test]
    fn labeled() {
        let Stmt::Labeled(labeled) = parse("outer: for {}") else {
            panic!("expected a labeled statement");
        };
        assert_eq!(labeled.label.as_str(), "outer");
        assert!(matches!(*labeled.stmt, Stmt::For(_)));
    }

    #[test]
    fn empty() {
        let mut parser = Parser::new(";").unwrap();
        let Stmt::Empty(empty) = parser.parse::<Stmt>().unwrap() else {
            panic!("expected an empty statement");
        };
        assert!(!empty.implicit);
        assert!(parser.is_empty());
    }

    #[test]
    fn needs_a_separator() {
        assert!(Stmt::parse("a b").is_err());
    }

    #[test]
    fn not_a_statement() {
        assert!(Stmt::parse(")").is_err());
        assert!(Stmt::parse("package main").is_err());
    }
}
