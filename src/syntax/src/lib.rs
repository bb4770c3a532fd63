//! Go syntax trees.
//!
//! The tree is a set of closed sum types ([`Expr`], [`Stmt`], [`Decl`]) and
//! structs, modeled after the shape of Go's own `go/ast` package, but owning
//! all of their text so a tree can outlive the input it was parsed from.
//!
//! Each piece of syntax implements [`Parse`], so the [`Parser`] can start at
//! different places in the grammar. Most callers only need [`parse_expr`] and
//! [`parse_file`].
//!
//! The [`print`] module renders trees back into gofmt-style source.

mod block;
mod control;
mod declaration;
mod error;
mod expression;
mod file;
mod function;
mod ident;
mod literal;
mod node;
pub mod print;
mod statement;
mod types;

use diagnostic::Span;
pub use parser::Parse;

pub use crate::{
    block::Block,
    control::{
        CaseClause, CommClause, For, If, Range, Select, Switch, TypeSwitch,
    },
    declaration::{
        Decl, FuncDecl, GenDecl, ImportSpec, Spec, TypeSpec, ValueSpec,
    },
    error::SyntaxError,
    expression::{
        Binary, Call, CompositeLit, Ellipsis, Expr, Index, KeyValue, Paren,
        Selector, Slice, Star, TypeAssert, Unary,
    },
    file::File,
    function::{Field, FuncLit, FuncType},
    ident::Identifier,
    literal::{Kind as LiteralKind, Literal},
    node::Node,
    statement::{
        Assign, AssignOp, Branch, Defer, Empty, Go, IncDec, Labeled, Return,
        Send, Stmt,
    },
    types::{ArrayType, ChanDir, ChanType, InterfaceType, MapType, StructType},
};

/// Errors from parsing Go source: lexical errors, the parser's own limits,
/// or a [`SyntaxError`].
pub type Error = parser::Error<SyntaxError>;

/// Common behavior of every piece of syntax.
pub trait Syntax {
    /// A user-facing name for the piece of syntax, like `"an expression"`.
    const NAME: &'static str;

    /// The region of the input the syntax was parsed from.
    fn span(&self) -> Span;
}

/// Parse a single expression, using all of `input`.
///
/// A trailing newline is fine, but an explicit `;` is not.
///
/// # Example
///
/// ```
/// let expr = syntax::parse_expr("1 + 2").unwrap();
/// assert!(matches!(expr, syntax::Expr::Binary(_)));
///
/// assert!(syntax::parse_expr("x := 1").is_err());
/// ```
pub fn parse_expr(input: &str) -> Result<Expr, Error> {
    Expr::parse(input)
}

/// Parse a complete Go source file: the package clause, imports, and
/// top-level declarations.
///
/// # Example
///
/// ```
/// let file = syntax::parse_file("package main\n\nfunc main() {}\n").unwrap();
/// assert_eq!(file.name.as_str(), "main");
/// assert_eq!(file.decls.len(), 1);
/// ```
pub fn parse_file(input: &str) -> Result<File, Error> {
    File::parse(input)
}
