//! Reduction strips the layers promotion added, leaving the node that
//! matches what was actually written.

use syntax::{Decl, Expr, FuncDecl, Node, Stmt};

use crate::promote::{FUNCTION, PACKAGE};

/// Reduce a node to the most specific node inside it.
///
/// Wrappers are recognized by their shape and sentinel names. A block with
/// one statement reduces to that statement even when it was written that
/// way, since the two can't be told apart.
pub fn reduce(node: Node) -> Node {
    match node {
        Node::File(mut file)
            if file.name.as_str() == PACKAGE && !file.decls.is_empty() =>
        {
            reduce(Node::Decl(file.decls.swap_remove(0)))
        }

        Node::Decl(Decl::Func(FuncDecl {
            name,
            body: Some(body),
            ..
        })) if name.as_str() == FUNCTION => reduce(Node::Stmt(Stmt::Block(body))),

        Node::Stmt(Stmt::Block(mut block)) if block.statements.len() == 1 => {
            reduce(Node::Stmt(block.statements.remove(0)))
        }

        Node::Stmt(Stmt::Decl(decl)) => Node::Decl(Decl::Gen(decl)),

        Node::Stmt(Stmt::Assign(mut assign)) if is_blank_assign(&assign) => {
            Node::Expr(assign.rhs.swap_remove(0))
        }

        node => node,
    }
}

/// `_ = x`
fn is_blank_assign(assign: &syntax::Assign) -> bool {
    let blank = matches!(assign.lhs.as_slice(), [Expr::Ident(i)] if i.is_blank());
    blank && !assign.rhs.is_empty()
}
