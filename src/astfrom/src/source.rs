//! The attempt loop: parse, and on failure promote and try again.

use std::borrow::Cow;

use syntax::{Identifier, Node};
use tracing::debug;

use crate::{guard, promote, reduce, Category, Error};

/// A successful parse, and the rung it happened at.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub node: Node,
    pub category: Category,
}

/// Parse `text` at the narrowest category that works.
///
/// The raw text is tried as an expression first. Each time a rung fails the
/// original text is promoted to the next rung and tried again, up to a whole
/// package file. If every rung fails, the last error is returned.
///
/// The node is returned as parsed, see [`reduce`] to strip the wrappers.
pub fn source(text: &str) -> Result<Parsed, Error> {
    let mut category = Category::Expr;
    let mut attempt = Cow::Borrowed(text);

    loop {
        let result = if category == Category::Expr {
            guard(|| {
                syntax::parse_expr(&attempt)
                    .map(Node::Expr)
                    .map_err(|source| Error::Parse { category, source })
            })
        } else {
            guard(|| {
                syntax::parse_file(&attempt)
                    .map(Node::File)
                    .map_err(|source| Error::Parse { category, source })
            })
        };

        match result {
            Ok(node) => {
                debug!(%category, "parsed");
                return Ok(Parsed { node, category });
            }
            Err(error) => {
                debug!(%category, %error, "rung failed");

                match category.next() {
                    Some(next) => {
                        attempt = Cow::Owned(promote(text, next, Category::Pkg));
                        category = next;
                    }
                    None => return Err(error),
                }
            }
        }
    }
}

/// Parse `text` into the node that best matches it. This never fails.
///
/// When no rung works, the result is an identifier named with the error
/// message.
///
/// # Example
///
/// ```
/// use syntax::{Node, Stmt};
///
/// let node = astfrom::parse_fragment("foo := 42");
/// assert!(matches!(node, Node::Stmt(Stmt::Assign(_))));
/// ```
pub fn parse_fragment(text: &str) -> Node {
    match source(text) {
        Ok(parsed) => reduce(parsed.node),
        Err(error) => fallback(&error),
    }
}

/// The identifier standing in for a fragment that couldn't be parsed.
pub fn fallback(error: &Error) -> Node {
    Node::Expr(syntax::Expr::Ident(Identifier::new(
        error.to_string(),
        Default::default(),
    )))
}
