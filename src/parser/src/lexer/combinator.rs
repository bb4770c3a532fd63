//! The functions in here implement tools used in defining production rules in
//! the lexical grammar.
//!
//! If these can fail, they return an [`Option`] rather than an
//! [`Error`][crate::lexer::Error]. This is so that the user of these _must_
//! craft the appropriate error rather than passing it up.

use crate::lexer::Lexer;

impl<'a> Lexer<'a> {
    /// Get the _n_th character in the input, starting with zero.
    ///
    /// # Notes
    ///
    /// `peek_n(0)` is always the same as `peek()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parser::lexer::Lexer;
    /// let lexer = Lexer::new("0123abc");
    /// assert_eq!(lexer.peek_nth(3), Some('3'));
    /// assert_eq!(lexer.remaining_input(), "0123abc");
    /// ```
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.remaining_input().chars().nth(n)
    }

    /// Get the next character in the input.
    pub fn peek(&self) -> Option<char> {
        self.peek_nth(0)
    }

    /// Advance the lexer by a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parser::lexer::Lexer;
    /// let mut lexer = Lexer::new("123abc");
    /// assert_eq!(lexer.advance().unwrap(), '1');
    /// assert_eq!(lexer.remaining_input(), "23abc");
    /// ```
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;

        self.location.increment(c);
        self.offset += c.len_utf8();

        Some(c)
    }

    /// Consume a specific expected character in the input.
    pub fn char(&mut self, expected: char) -> Option<char> {
        match self.peek() {
            Some(found) if expected == found => self.advance(),
            _ => None,
        }
    }

    /// Consume a specific expected string in the input, or nothing at all.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parser::lexer::Lexer;
    /// let mut lexer = Lexer::new("&^= x");
    /// assert!(lexer.str("&&").is_none());
    /// assert_eq!(lexer.str("&^"), Some("&^"));
    /// assert_eq!(lexer.remaining_input(), "= x");
    /// ```
    pub fn str<'b>(&mut self, s: &'b str) -> Option<&'b str> {
        if !self.remaining_input().starts_with(s) {
            return None;
        }

        for _ in s.chars() {
            self.advance();
        }

        Some(s)
    }

    /// Consume characters in the input while they match a predicate. Might
    /// return an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// # use parser::lexer::Lexer;
    /// let mut lexer = Lexer::new("aababbcab");
    /// let consumed = lexer.consume_while(|c| c == 'a' || c == 'b');
    /// assert_eq!(consumed, "aababb");
    /// assert_eq!(lexer.remaining_input(), "cab");
    /// ```
    pub fn consume_while<F>(&mut self, predicate: F) -> &'a str
    where
        F: Fn(char) -> bool,
    {
        let start = self.offset;

        while let Some(c) = self.peek() {
            if predicate(c) {
                self.advance();
            } else {
                break;
            }
        }

        &self.input[start..self.offset]
    }

    /// Consume the next character of input, if it's in the string `cs`.
    pub fn one_of(&mut self, cs: &'static str) -> Option<char> {
        let c = self.peek()?;

        if cs.contains(c) {
            self.advance()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek() {
        let lex = Lexer::new("ab");
        assert_eq!(lex.peek(), Some('a'));
        assert_eq!(lex.remaining_input(), "ab");
    }

    #[test]
    fn peek_nth() {
        let lex = Lexer::new("ab");
        assert_eq!(lex.peek_nth(0), Some('a'));
        assert_eq!(lex.peek_nth(1), Some('b'));
        assert_eq!(lex.peek_nth(2), None);
    }

    #[test]
    fn advance_empty() {
        let mut lex = Lexer::new("");
        assert_eq!(lex.advance(), None);
    }

    #[test]
    fn str_partial_match_consumes_nothing() {
        let mut lex = Lexer::new("<-x");
        assert_eq!(lex.str("<<"), None);
        assert_eq!(lex.remaining_input(), "<-x");
        assert_eq!(lex.str(""), Some(""));
    }

    #[test]
    fn one_of() {
        let mut lex = Lexer::new("xX");
        assert_eq!(lex.one_of("xX"), Some('x'));
        assert_eq!(lex.one_of("b"), None);
        assert_eq!(lex.one_of("xX"), Some('X'));
    }

    #[test]
    fn consume_while_fail() {
        let mut lex = Lexer::new("not a single leading a");
        let result = lex.consume_while(|c| c == 'a');
        assert_eq!(result, "");
    }
}
