//! Numeric literals lexing.
//!
//! This follows Go's integer, floating-point and imaginary literal
//! productions:
//!
//! 1. Decimal integers, and the prefixed radix forms `0b`, `0o` and `0x`.
//! 2. Legacy octal integers which are just a leading `0`, like `0755`.
//! 3. Decimal floats like `1.5`, `1.`, `.5` and `1e9`.
//! 4. Hexadecimal floats like `0x1.8p3`, which always need a `p` exponent.
//! 5. Any of the above with an `i` suffix is an imaginary literal.
//!
//! Underscores are allowed between digits. The lexer is a little more
//! permissive than Go about where they go, `1__0` is accepted.
//!
//! The actual value isn't interpreted at this stage, since we only care about
//! the shape of the syntax.

use crate::lexer::{Error, Lexer, TokenKind};

impl<'a> Lexer<'a> {
    /// The entry point for numeric literals. The next character is either a
    /// digit, or a `.` followed by a digit.
    pub(crate) fn number(&mut self) -> Result<TokenKind, Error> {
        let start = self.location;
        let mut radix = 10;
        let mut kind = TokenKind::Int;
        let mut invalid = None;

        if self.peek() != Some('.') {
            if self.peek() == Some('0') {
                radix = match self.peek_nth(1) {
                    Some('x' | 'X') => 16,
                    Some('o' | 'O') => 8,
                    Some('b' | 'B') => 2,
                    _ => 10,
                };
            }

            let prefixed = radix != 10;
            if prefixed {
                self.advance();
                self.advance();
            }

            let digit_location = self.location;
            let digits = self.digits(radix);

            let hex_fraction = radix == 16 && self.peek() == Some('.');
            if prefixed && digits.is_empty() && !hex_fraction {
                return Err(Error::EmptyRadixLiteral(digit_location, radix));
            }

            if radix < 10 {
                invalid = digits
                    .chars()
                    .find(|c| *c != '_' && c.to_digit(radix).is_none());
            } else if radix == 10 && digits.len() > 1 && digits.starts_with('0')
            {
                // Only an error if this turns out to be an integer.
                invalid = digits.chars().find(|c| matches!(*c, '8' | '9'));
            }
        }

        if radix == 10 || radix == 16 {
            if self.char('.').is_some() {
                kind = TokenKind::Float;
                self.digits(radix);
            }

            let exponent = if radix == 16 { "pP" } else { "eE" };

            if self.one_of(exponent).is_some() {
                kind = TokenKind::Float;
                self.one_of("+-");

                let location = self.location;
                if self.digits(10).is_empty() {
                    return Err(Error::InvalidFloatExponent(location));
                }
            } else if radix == 16 && kind == TokenKind::Float {
                return Err(Error::HexMantissaNoExponent(start));
            }
        }

        if self.char('i').is_some() {
            kind = TokenKind::Imaginary;
        }

        match invalid {
            Some(c) if kind == TokenKind::Int => {
                let radix = if radix == 10 { 8 } else { radix };
                Err(Error::InvalidDigit(start, c, radix))
            }
            _ => Ok(kind),
        }
    }

    /// Consumes zero or more digits with underscores between them.
    ///
    /// Decimal digits are consumed for any radix up to 10 so that a literal
    /// like `0b102` is one bad token rather than two good ones.
    fn digits(&mut self, radix: u32) -> &'a str {
        let scan = radix.max(10);
        self.consume_while(|c| c == '_' || c.is_digit(scan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Result<TokenKind, Error> {
        let mut lexer = Lexer::new(input);
        let kind = lexer.token().map(|t| t.kind());
        assert!(
            lexer.remaining_input().is_empty(),
            "left over {:?}",
            lexer.remaining_input()
        );
        kind
    }

    #[test]
    fn integers() {
        for input in ["0", "42", "1_000_000", "0x1F", "0XdeadBEEF", "0o17", "0b1010", "0755"] {
            assert_eq!(lex(input), Ok(TokenKind::Int), "for {}", input);
        }
    }

    #[test]
    fn floats() {
        for input in ["0.0", "1.", ".5", "1e9", "1E-9", "6.67428e-11", "0x1p-2", "0x1.8p3", "089.5"] {
            assert_eq!(lex(input), Ok(TokenKind::Float), "for {}", input);
        }
    }

    #[test]
    fn imaginary() {
        for input in ["2i", "0i", "1.5i", "1e3i", "0x1p2i"] {
            assert_eq!(lex(input), Ok(TokenKind::Imaginary), "for {}", input);
        }
    }

    #[test]
    fn empty_radix() {
        assert!(matches!(lex("0x"), Err(Error::EmptyRadixLiteral(_, 16))));
        assert!(matches!(lex("0b"), Err(Error::EmptyRadixLiteral(_, 2))));
    }

    #[test]
    fn bad_digits() {
        assert!(matches!(lex("0b102"), Err(Error::InvalidDigit(_, '2', 2))));
        assert!(matches!(lex("09"), Err(Error::InvalidDigit(_, '9', 8))));
    }

    #[test]
    fn exponent_without_digits() {
        assert!(matches!(lex("1e+"), Err(Error::InvalidFloatExponent(_))));
    }

    #[test]
    fn hex_float_needs_exponent() {
        assert!(matches!(lex("0x1.8"), Err(Error::HexMantissaNoExponent(_))));
    }

    #[test]
    fn method_on_integer_literal() {
        let kinds: Vec<_> = Lexer::tokenize("1 .String")
            .unwrap()
            .into_iter()
            .map(|t| t.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Int,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::Semicolon
            ]
        );
    }
}
