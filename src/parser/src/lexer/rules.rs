//! The rules of the lexical grammar

use unicode_categories::UnicodeCategories;

use crate::lexer::{Delimiter, Error, Keyword, Lexer, Operator, TokenKind};

/// Every punctuation token, longest first so the first match is the longest
/// one.
const PUNCTUATION: &[(&str, TokenKind)] = &[
    ("<<=", TokenKind::OperatorAssign(Operator::Shl)),
    (">>=", TokenKind::OperatorAssign(Operator::Shr)),
    ("&^=", TokenKind::OperatorAssign(Operator::AndNot)),
    ("+=", TokenKind::OperatorAssign(Operator::Add)),
    ("-=", TokenKind::OperatorAssign(Operator::Sub)),
    ("*=", TokenKind::OperatorAssign(Operator::Mul)),
    ("/=", TokenKind::OperatorAssign(Operator::Quo)),
    ("%=", TokenKind::OperatorAssign(Operator::Rem)),
    ("&=", TokenKind::OperatorAssign(Operator::And)),
    ("|=", TokenKind::OperatorAssign(Operator::Or)),
    ("^=", TokenKind::OperatorAssign(Operator::Xor)),
    ("<<", TokenKind::Operator(Operator::Shl)),
    (">>", TokenKind::Operator(Operator::Shr)),
    ("&^", TokenKind::Operator(Operator::AndNot)),
    ("&&", TokenKind::Operator(Operator::LogicalAnd)),
    ("||", TokenKind::Operator(Operator::LogicalOr)),
    ("<-", TokenKind::Operator(Operator::Arrow)),
    ("++", TokenKind::Operator(Operator::Increment)),
    ("--", TokenKind::Operator(Operator::Decrement)),
    ("==", TokenKind::Operator(Operator::Equal)),
    ("!=", TokenKind::Operator(Operator::NotEqual)),
    ("<=", TokenKind::Operator(Operator::LessEqual)),
    (">=", TokenKind::Operator(Operator::GreaterEqual)),
    (":=", TokenKind::Define),
    ("+", TokenKind::Operator(Operator::Add)),
    ("-", TokenKind::Operator(Operator::Sub)),
    ("*", TokenKind::Operator(Operator::Mul)),
    ("/", TokenKind::Operator(Operator::Quo)),
    ("%", TokenKind::Operator(Operator::Rem)),
    ("&", TokenKind::Operator(Operator::And)),
    ("|", TokenKind::Operator(Operator::Or)),
    ("^", TokenKind::Operator(Operator::Xor)),
    ("<", TokenKind::Operator(Operator::Less)),
    (">", TokenKind::Operator(Operator::Greater)),
    ("!", TokenKind::Operator(Operator::Not)),
    ("~", TokenKind::Operator(Operator::Tilde)),
    ("=", TokenKind::Assign),
    (":", TokenKind::Colon),
    (",", TokenKind::Comma),
    (";", TokenKind::Semicolon),
    ("(", TokenKind::Open(Delimiter::Parenthesis)),
    (")", TokenKind::Close(Delimiter::Parenthesis)),
    ("[", TokenKind::Open(Delimiter::Bracket)),
    ("]", TokenKind::Close(Delimiter::Bracket)),
    ("{", TokenKind::Open(Delimiter::Brace)),
    ("}", TokenKind::Close(Delimiter::Brace)),
];

impl Lexer<'_> {
    /// This is the main entry point into the lexer internals. It dispatches to
    /// smaller handlers for more complicated token types.
    pub(crate) fn token_kind(&mut self) -> Result<TokenKind, Error> {
        let next = self.peek().ok_or(Error::UnexpectedEOF(self.location))?;

        match next {
            '.' => match self.peek_nth(1) {
                Some(c) if c.is_ascii_digit() => self.number(),
                _ => Ok(self.dots()),
            },

            '\'' => self.rune(),
            '"' => self.string(),
            '`' => self.raw_string(),

            // A closed comment would have been skipped as whitespace.
            '/' if self.peek_nth(1) == Some('*') => {
                Err(Error::UnclosedComment(self.location))
            }

            c if c.is_ascii_digit() => self.number(),
            c if is_letter(c) => Ok(self.word()),

            c => self
                .punctuation()
                .ok_or(Error::NotStartOfToken(self.location, c)),
        }
    }

    /// Skip whitespace and comments, across any number of lines.
    ///
    /// ```text
    /// Whitespace := (' ' | '\t' | '\r' | '\n' | comment)*
    /// ```
    pub(crate) fn whitespace(&mut self) {
        loop {
            self.consume_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));

            let rest = self.remaining_input();

            if rest.starts_with("//") {
                self.consume_while(|c| c != '\n');
            } else if let Some(len) = general_comment_len(rest) {
                self.skip_bytes(len);
            } else {
                break;
            }
        }
    }

    /// Skip whitespace and comments, but only up to the end of the current
    /// line. A `/* */` comment containing a newline is left alone, since it
    /// acts like a newline.
    pub(crate) fn line_whitespace(&mut self) {
        loop {
            self.consume_while(|c| matches!(c, ' ' | '\t' | '\r'));

            match general_comment_len(self.remaining_input()) {
                Some(len) if !self.remaining_input()[..len].contains('\n') => {
                    self.skip_bytes(len)
                }
                _ => break,
            }
        }
    }

    /// Is the lexer sitting at something which ends the current line?
    pub(crate) fn at_line_end(&self) -> bool {
        let rest = self.remaining_input();

        if rest.is_empty() || rest.starts_with('\n') || rest.starts_with("//") {
            return true;
        }

        if rest.starts_with("/*") {
            return match general_comment_len(rest) {
                Some(len) => rest[..len].contains('\n'),
                // An unterminated comment runs to the end of the input.
                None => true,
            };
        }

        false
    }

    fn skip_bytes(&mut self, len: usize) {
        let end = self.offset + len;
        while self.offset < end {
            self.advance();
        }
    }

    /// Any number of `.` characters in a row is either a `...` or a `.`, but
    /// never `..`.
    fn dots(&mut self) -> TokenKind {
        if self.str("...").is_some() {
            TokenKind::Ellipsis
        } else {
            self.char('.');
            TokenKind::Dot
        }
    }

    fn punctuation(&mut self) -> Option<TokenKind> {
        PUNCTUATION
            .iter()
            .find(|(text, _)| self.str(text).is_some())
            .map(|(_, kind)| *kind)
    }

    /// A word is any keyword or identifier.
    ///
    /// ```text
    /// identifier := letter (letter | unicode_digit)*
    /// ```
    fn word(&mut self) -> TokenKind {
        let word = self.consume_while(|c| is_letter(c) || is_digit(c));

        match Keyword::try_from_str(word) {
            Some(k) => TokenKind::Keyword(k),
            None => TokenKind::Identifier,
        }
    }
}

/// The length in bytes of the `/* ... */` comment at the start of `input`, if
/// there is one and it's closed.
fn general_comment_len(input: &str) -> Option<usize> {
    let body = input.strip_prefix("/*")?;
    body.find("*/").map(|end| end + 4)
}

/// Go's `letter` production: any Unicode letter, or an underscore.
fn is_letter(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic() || (!c.is_ascii() && c.is_letter())
}

/// Go's `unicode_digit` production.
fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || (!c.is_ascii() && c.is_number_decimal_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::tokenize(input)
            .unwrap()
            .iter()
            .map(|t| t.kind())
            .collect()
    }

    #[test]
    fn longest_operator_wins() {
        assert_eq!(
            kinds("a &^= b"),
            vec![
                TokenKind::Identifier,
                TokenKind::OperatorAssign(Operator::AndNot),
                TokenKind::Identifier,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn dots() {
        assert_eq!(
            kinds("...."),
            vec![TokenKind::Ellipsis, TokenKind::Dot]
        );
    }

    #[test]
    fn unicode_identifier() {
        assert_eq!(
            kinds("héllo٣"),
            vec![TokenKind::Identifier, TokenKind::Semicolon]
        );
    }

    #[test]
    fn keyword() {
        assert_eq!(
            kinds("package"),
            vec![TokenKind::Keyword(Keyword::Package)]
        );
    }

    #[test]
    fn unclosed_comment() {
        assert!(matches!(
            Lexer::tokenize("x /* nope"),
            Err(Error::UnclosedComment(_))
        ));
    }

    #[test]
    fn not_a_token() {
        assert!(matches!(
            Lexer::tokenize("a # b"),
            Err(Error::NotStartOfToken(_, '#'))
        ));
    }
}
