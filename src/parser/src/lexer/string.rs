//! Rune and string literals.
//!
//! Escapes are checked for shape here, but not decoded. The token body keeps
//! the literal exactly as written, quotes included.

use crate::lexer::{Error, Lexer, TokenKind};

impl Lexer<'_> {
    /// A rune literal like `'a'`, `'\n'` or `'é'`.
    pub(crate) fn rune(&mut self) -> Result<TokenKind, Error> {
        let start = self.location;
        self.char('\'');

        let mut count = 0;

        loop {
            match self.peek() {
                None | Some('\n') => return Err(Error::UnclosedCharacter(start)),
                Some('\'') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.escape('\'')?;
                    count += 1;
                }
                Some(_) => {
                    self.advance();
                    count += 1;
                }
            }
        }

        if count == 1 {
            Ok(TokenKind::Char)
        } else {
            Err(Error::WrongRuneLength(start))
        }
    }

    /// An interpreted string literal like `"hello\tworld"`. These can't span
    /// lines.
    pub(crate) fn string(&mut self) -> Result<TokenKind, Error> {
        let start = self.location;
        self.char('"');

        loop {
            match self.peek() {
                None | Some('\n') => return Err(Error::UnclosedString(start)),
                Some('"') => {
                    self.advance();
                    return Ok(TokenKind::String);
                }
                Some('\\') => self.escape('"')?,
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// A raw string literal between back quotes. These can span lines, and
    /// have no escapes.
    pub(crate) fn raw_string(&mut self) -> Result<TokenKind, Error> {
        let start = self.location;
        self.char('`');
        self.consume_while(|c| c != '`');

        match self.char('`') {
            Some(_) => Ok(TokenKind::String),
            None => Err(Error::UnclosedRawString(start)),
        }
    }

    /// An escape sequence, starting at the `\`. The `quote` is the only quote
    /// character which can be escaped in this kind of literal.
    fn escape(&mut self, quote: char) -> Result<(), Error> {
        self.char('\\');
        let location = self.location;

        let (count, radix) = match self.peek() {
            Some(c) if c == quote => {
                self.advance();
                return Ok(());
            }
            Some('a' | 'b' | 'f' | 'n' | 'r' | 't' | 'v' | '\\') => {
                self.advance();
                return Ok(());
            }
            Some('0'..='7') => (3, 8),
            Some('x') => {
                self.advance();
                (2, 16)
            }
            Some('u') => {
                self.advance();
                (4, 16)
            }
            Some('U') => {
                self.advance();
                (8, 16)
            }
            Some(c) => return Err(Error::InvalidEscape(location, c)),
            None => return Err(Error::UnexpectedEOF(location)),
        };

        for _ in 0..count {
            match self.peek() {
                Some(c) if c.is_digit(radix) => {
                    self.advance();
                }
                Some(c) => {
                    return Err(Error::InvalidDigit(self.location, c, radix))
                }
                None => return Err(Error::UnexpectedEOF(self.location)),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Result<TokenKind, Error> {
        Lexer::new(input).token().map(|t| t.kind())
    }

    #[test]
    fn runes() {
        for input in [r"'a'", r"'é'", r"'\n'", r"'\''", r"'\x41'", r"'é'", r"'\U0001F600'", r"'\101'"] {
            assert_eq!(lex(input), Ok(TokenKind::Char), "for {}", input);
        }
    }

    #[test]
    fn rune_length() {
        assert!(matches!(lex("''"), Err(Error::WrongRuneLength(_))));
        assert!(matches!(lex("'ab'"), Err(Error::WrongRuneLength(_))));
    }

    #[test]
    fn rune_unclosed() {
        assert!(matches!(lex("'a"), Err(Error::UnclosedCharacter(_))));
    }

    #[test]
    fn strings() {
        for input in [r#""""#, r#""str""#, r#""tab\there""#, r#""\"quoted\"""#, r#""\xff\377""#] {
            assert_eq!(lex(input), Ok(TokenKind::String), "for {}", input);
        }
    }

    #[test]
    fn string_escaped_single_quote_is_invalid() {
        assert!(matches!(lex(r#""\'""#), Err(Error::InvalidEscape(_, '\''))));
    }

    #[test]
    fn string_bad_escape() {
        assert!(matches!(lex(r#""\q""#), Err(Error::InvalidEscape(_, 'q'))));
        assert!(matches!(lex(r#""\xg0""#), Err(Error::InvalidDigit(_, 'g', 16))));
    }

    #[test]
    fn string_across_lines() {
        assert!(matches!(lex("\"abc\ndef\""), Err(Error::UnclosedString(_))));
    }

    #[test]
    fn raw_strings() {
        assert_eq!(lex("`a\\n\nb`"), Ok(TokenKind::String));
        assert!(matches!(lex("`abc"), Err(Error::UnclosedRawString(_))));
    }

    #[test]
    fn body_keeps_quotes() {
        let token = Lexer::new(r#""a\tb""#).token().unwrap();
        assert_eq!(token.body(), r#""a\tb""#);
    }
}
