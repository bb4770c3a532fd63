//! Caret
//!
//! A [`Caret`] is a line and column number in plain text, i.e. where a caret is
//! in the source text.

use std::fmt;

/// A location in some input stream or document.
///
/// Carets are zero-indexed, and with the cursor before the first character. So
/// `Caret::new(0, 0)` is with the caret at the beginning of the document,
/// typically 0 bytes into some input.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Caret {
    line: u32,
    column: u32,
}

impl Caret {
    /// Create a new [`Caret`], from a line and column number. These are
    /// 0-indexed.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The line the caret in on.
    pub fn line(self) -> u32 {
        self.line
    }

    /// The column of the caret.
    pub fn column(self) -> u32 {
        self.column
    }

    /// Increment a caret by a character. Only `\n` starts a new line, which
    /// also covers `\r\n` since that sequence ends with the `\n`.
    ///
    /// This counts [`char`]s i.e. unicode code points, not bytes. Go's own
    /// scanner reports byte columns, so positions past non-ascii text will
    /// differ from `go vet` and friends.
    pub fn increment(&mut self, c: char) {
        match c {
            '\n' => {
                self.line += 1;
                self.column = 0;
            }
            _ => self.column += 1,
        }
    }
}

/// Carets display one-indexed, as `line:column`, which is what editors and the
/// Go toolchain print.
impl fmt::Display for Caret {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn caret_order() {
        let l = Caret::new(2, 200);
        let r = Caret::new(10, 100);
        assert!(l < r);
    }

    #[test]
    fn caret_newline_resets_column() {
        let mut caret = Caret::new(0, 0);
        for c in "ab\ncd".chars() {
            caret.increment(c);
        }
        assert_eq!(caret, Caret::new(1, 2));
    }

    #[test]
    fn caret_display_is_one_indexed() {
        assert_eq!(Caret::new(0, 0).to_string(), "1:1");
        assert_eq!(Caret::new(3, 9).to_string(), "4:10");
    }

    #[test]
    fn caret_unicode() {
        let mut caret = Caret::new(0, 0);

        for c in "🤦🏼‍♀️".chars() {
            caret.increment(c);
        }

        assert_eq!(caret.column(), 5);
    }
}
