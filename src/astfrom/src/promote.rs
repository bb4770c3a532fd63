//! Promotion wraps a fragment in just enough Go to parse it as a wider
//! category.
//!
//! For example `x + 1` promoted from [`Category::Expr`] to [`Category::Pkg`]
//! becomes:
//!
//! ```text
//! package astfrom
//!
//! func astfromFunc() {
//!     _ = x + 1
//! }
//! ```

use tracing::trace;

use crate::Category;

/// The package name of a synthetic file.
pub const PACKAGE: &str = "astfrom";

/// The name of the synthetic function statements are put in.
pub const FUNCTION: &str = "astfromFunc";

/// One layer of promotion.
///
/// A wrapper applies when promoting from below its rung to its rung or above.
#[derive(Debug, Clone, Copy)]
pub struct Wrapper {
    pub rung: Category,
    /// The sentinel name this wrapper introduces, if any.
    pub sentinel: Option<&'static str>,
    apply: fn(&str) -> String,
}

impl Wrapper {
    /// Does this wrapper apply to a promotion from `from` to `to`?
    pub fn applies(&self, from: Category, to: Category) -> bool {
        from < self.rung && self.rung <= to
    }

    pub fn wrap(&self, text: &str) -> String {
        (self.apply)(text)
    }
}

/// The wrappers, innermost first.
pub const WRAPPERS: [Wrapper; 5] = [
    Wrapper {
        rung: Category::Decl,
        sentinel: None,
        apply: blank_assign,
    },
    Wrapper {
        rung: Category::Stmt,
        sentinel: None,
        apply: statement_line,
    },
    Wrapper {
        rung: Category::Block,
        sentinel: None,
        apply: braces,
    },
    Wrapper {
        rung: Category::File,
        sentinel: Some(FUNCTION),
        apply: function,
    },
    Wrapper {
        rung: Category::Pkg,
        sentinel: Some(PACKAGE),
        apply: package,
    },
];

fn blank_assign(text: &str) -> String {
    format!("_ = {}", text)
}

fn statement_line(text: &str) -> String {
    format!("\t{}\n", text)
}

fn braces(text: &str) -> String {
    format!("{{\n{}\n}}\n", text.trim_end_matches(['\n', '\t']))
}

fn function(text: &str) -> String {
    format!("func {}() {}", FUNCTION, text)
}

fn package(text: &str) -> String {
    format!("package {}\n\n{}", PACKAGE, text)
}

/// Wrap `text` in every layer between `from` and `to`.
///
/// An empty fragment is treated as the blank identifier `_`. Wrappers
/// outside the range are skipped, so `promote(text, c, c)` is `text`.
pub fn promote(text: &str, from: Category, to: Category) -> String {
    let mut text = if text.is_empty() {
        String::from("_")
    } else {
        text.to_owned()
    };

    for wrapper in WRAPPERS.iter().filter(|w| w.applies(from, to)) {
        text = wrapper.wrap(&text);
        trace!(rung = %wrapper.rung, %from, %to, "applied wrapper");
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expr_to_pkg() {
        assert_eq!(
            promote("x + 1", Category::Expr, Category::Pkg),
            "package astfrom\n\nfunc astfromFunc() {\n\t_ = x + 1\n}\n"
        );
    }

    #[test]
    fn empty_is_blank() {
        assert_eq!(promote("", Category::Expr, Category::Expr), "_");
        assert_eq!(promote("", Category::Expr, Category::Decl), "_ = _");
    }

    #[test]
    fn same_category_is_unchanged() {
        for category in Category::ALL {
            assert_eq!(promote("a b c", category, category), "a b c");
        }
    }

    #[test]
    fn decl_skips_blank_assign() {
        assert_eq!(
            promote("type foo string", Category::Decl, Category::Pkg),
            "package astfrom\n\nfunc astfromFunc() {\n\ttype foo string\n}\n"
        );
    }

    #[test]
    fn block_trims_trailing_newlines_and_tabs() {
        assert_eq!(
            promote("x++\n\t\n", Category::Stmt, Category::Block),
            "{\nx++\n}\n"
        );
    }

    #[test]
    fn file_only_adds_package() {
        assert_eq!(
            promote("func f() {}", Category::File, Category::Pkg),
            "package astfrom\n\nfunc f() {}"
        );
    }

    #[test]
    fn block_gets_function() {
        assert_eq!(
            promote("{ x++ }", Category::Block, Category::File),
            "func astfromFunc() { x++ }"
        );
    }

    #[test]
    fn sentinels() {
        let sentinels: Vec<_> =
            WRAPPERS.iter().filter_map(|w| w.sentinel).collect();
        assert_eq!(sentinels, [FUNCTION, PACKAGE]);
    }
}
