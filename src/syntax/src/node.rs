//! Nodes
//!
//! A [`Node`] is any of the tree's top-level kinds of syntax, for code that
//! doesn't know ahead of time what kind of thing it'll get back.

use diagnostic::Span;

use crate::{Decl, Expr, File, Stmt, Syntax};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    File(File),
    Decl(Decl),
    Stmt(Stmt),
    Expr(Expr),
}

impl Node {
    /// The name of the node's type in Go's `go/ast` package, like
    /// `"CallExpr"` or `"AssignStmt"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::File(_) => "File",
            Node::Decl(Decl::Gen(_)) => "GenDecl",
            Node::Decl(Decl::Func(_)) => "FuncDecl",
            Node::Stmt(s) => match s {
                Stmt::Decl(_) => "DeclStmt",
                Stmt::Empty(_) => "EmptyStmt",
                Stmt::Labeled(_) => "LabeledStmt",
                Stmt::Expr(_) => "ExprStmt",
                Stmt::Send(_) => "SendStmt",
                Stmt::IncDec(_) => "IncDecStmt",
                Stmt::Assign(_) => "AssignStmt",
                Stmt::Go(_) => "GoStmt",
                Stmt::Defer(_) => "DeferStmt",
                Stmt::Return(_) => "ReturnStmt",
                Stmt::Branch(_) => "BranchStmt",
                Stmt::Block(_) => "BlockStmt",
                Stmt::If(_) => "IfStmt",
                Stmt::Switch(_) => "SwitchStmt",
                Stmt::TypeSwitch(_) => "TypeSwitchStmt",
                Stmt::Select(_) => "SelectStmt",
                Stmt::For(_) => "ForStmt",
                Stmt::Range(_) => "RangeStmt",
            },
            Node::Expr(e) => match e {
                Expr::Ident(_) => "Ident",
                Expr::BasicLit(_) => "BasicLit",
                Expr::CompositeLit(_) => "CompositeLit",
                Expr::FuncLit(_) => "FuncLit",
                Expr::Paren(_) => "ParenExpr",
                Expr::Selector(_) => "SelectorExpr",
                Expr::Index(_) => "IndexExpr",
                Expr::Slice(_) => "SliceExpr",
                Expr::TypeAssert(_) => "TypeAssertExpr",
                Expr::Call(_) => "CallExpr",
                Expr::Star(_) => "StarExpr",
                Expr::Unary(_) => "UnaryExpr",
                Expr::Binary(_) => "BinaryExpr",
                Expr::KeyValue(_) => "KeyValueExpr",
                Expr::Ellipsis(_) => "Ellipsis",
                Expr::ArrayType(_) => "ArrayType",
                Expr::StructType(_) => "StructType",
                Expr::FuncType(_) => "FuncType",
                Expr::InterfaceType(_) => "InterfaceType",
                Expr::MapType(_) => "MapType",
                Expr::ChanType(_) => "ChanType",
            },
        }
    }
}

impl Syntax for Node {
    const NAME: &'static str = "node";

    fn span(&self) -> Span {
        match self {
            Node::File(f) => f.span(),
            Node::Decl(d) => d.span(),
            Node::Stmt(s) => s.span(),
            Node::Expr(e) => e.span(),
        }
    }
}

impl From<File> for Node {
    fn from(file: File) -> Node {
        Node::File(file)
    }
}

impl From<Decl> for Node {
    fn from(decl: Decl) -> Node {
        Node::Decl(decl)
    }
}

impl From<Stmt> for Node {
    fn from(stmt: Stmt) -> Node {
        Node::Stmt(stmt)
    }
}

impl From<Expr> for Node {
    fn from(expr: Expr) -> Node {
        Node::Expr(expr)
    }
}
