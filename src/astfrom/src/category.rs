//! The ladder of syntactic categories a fragment can be parsed at.

use std::fmt;

/// A syntactic category, ordered from the narrowest to the widest.
///
/// `Node` is a sentinel below every real rung, and is also what any
/// out-of-range value shows up as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Node,
    Expr,
    Decl,
    Stmt,
    Block,
    File,
    Pkg,
}

impl Category {
    /// Every category, in order.
    pub const ALL: [Category; 7] = [
        Category::Node,
        Category::Expr,
        Category::Decl,
        Category::Stmt,
        Category::Block,
        Category::File,
        Category::Pkg,
    ];

    /// The rungs that are actually attempted, narrowest first.
    pub const LADDER: [Category; 6] = [
        Category::Expr,
        Category::Decl,
        Category::Stmt,
        Category::Block,
        Category::File,
        Category::Pkg,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Node => "Node",
            Category::Expr => "Expr",
            Category::Decl => "Decl",
            Category::Stmt => "Stmt",
            Category::Block => "Block",
            Category::File => "File",
            Category::Pkg => "Pkg",
        }
    }

    /// The category at position `index` in [`Category::ALL`], or
    /// [`Category::Node`] if there isn't one.
    pub fn from_index(index: isize) -> Category {
        usize::try_from(index)
            .ok()
            .and_then(|i| Category::ALL.get(i).copied())
            .unwrap_or(Category::Node)
    }

    /// The name of the category at `index`. See [`Category::from_index`].
    pub fn name_of(index: isize) -> &'static str {
        Category::from_index(index).name()
    }

    /// One rung up the ladder, if there is one.
    pub fn next(self) -> Option<Category> {
        Category::ALL.get(self as usize + 1).copied()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        let names: Vec<_> = Category::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            ["Node", "Expr", "Decl", "Stmt", "Block", "File", "Pkg"]
        );
    }

    #[test]
    fn out_of_range() {
        assert_eq!(Category::name_of(-1), "Node");
        assert_eq!(Category::name_of(7), "Node");
        assert_eq!(Category::name_of(isize::MAX), "Node");
        assert_eq!(Category::name_of(4), "Block");
    }

    #[test]
    fn ordered() {
        assert!(Category::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn next() {
        assert_eq!(Category::Expr.next(), Some(Category::Decl));
        assert_eq!(Category::File.next(), Some(Category::Pkg));
        assert_eq!(Category::Pkg.next(), None);
    }
}
