//! Forgiving parsing of Go fragments.
//!
//! A fragment like `x + 1`, `foo := 42`, `type T int` or a whole file is
//! parsed by trying the narrowest category first, and wrapping the fragment
//! in a bit more Go each time a parse fails: an assignment, a statement, a
//! block, a function and finally a package. Once something parses, the
//! wrapper nodes are stripped back off, so what comes back looks like what
//! was written.
//!
//! ```
//! use syntax::{Decl, Expr, Node};
//!
//! assert!(matches!(astfrom::parse_fragment("x + 1"), Node::Expr(Expr::Binary(_))));
//! assert!(matches!(astfrom::parse_fragment("type T int"), Node::Decl(Decl::Gen(_))));
//! ```

mod category;
mod error;
mod guard;
pub mod promote;
mod reduce;
mod source;

pub use crate::{
    category::Category,
    error::{Error, Fault},
    guard::guard,
    promote::promote,
    reduce::reduce,
    source::{fallback, parse_fragment, source, Parsed},
};
