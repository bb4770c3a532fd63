//! Operator precedence definitions.
//!
//! Go has five levels of binary operator precedence, and every binary
//! operator is left associative:
//!
//! ```text
//! 5   *  /  %  <<  >>  &  &^
//! 4   +  -  |  ^
//! 3   ==  !=  <  <=  >  >=
//! 2   &&
//! 1   ||
//! ```
//!
//! Unary operators always bind more tightly than any binary operator, so
//! `-a * b` is `(-a) * b`.

use crate::lexer::Operator;

/// The precedence of a binary operator.
///
/// When multiple operators are used, precedence is how we decide which one
/// 'happens first'. For example, `a + b * c` is read as the same as `a + (b *
/// c)` because the `*` has higher precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Precedence(u8);

impl Precedence {
    /// The highest binary precedence.
    pub const MAX: Precedence = Precedence(5);

    /// The lowest binary precedence.
    pub const MIN: Precedence = Precedence(1);

    /// The next higher precedence, if there is one.
    pub fn next(self) -> Option<Self> {
        if self == Precedence::MAX {
            None
        } else {
            Some(Precedence(self.0 + 1))
        }
    }
}

impl Operator {
    /// The precedence of this operator when used as a binary operator, or
    /// `None` if it can't be used that way.
    pub fn precedence(self) -> Option<Precedence> {
        use Operator::*;

        let level = match self {
            Mul | Quo | Rem | Shl | Shr | And | AndNot => 5,
            Add | Sub | Or | Xor => 4,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => 3,
            LogicalAnd => 2,
            LogicalOr => 1,
            _ => return None,
        };

        Some(Precedence(level))
    }

    /// Can this operator be used as a prefix operator?
    pub fn is_unary(self) -> bool {
        use Operator::*;
        matches!(self, Add | Sub | Not | Xor | Mul | And | Arrow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplication_binds_tighter() {
        assert!(Operator::Mul.precedence() > Operator::Add.precedence());
        assert!(Operator::Add.precedence() > Operator::Equal.precedence());
        assert!(
            Operator::LogicalAnd.precedence()
                > Operator::LogicalOr.precedence()
        );
    }

    #[test]
    fn not_binary() {
        assert_eq!(Operator::Not.precedence(), None);
        assert_eq!(Operator::Arrow.precedence(), None);
        assert_eq!(Operator::Increment.precedence(), None);
    }

    #[test]
    fn next() {
        assert_eq!(Precedence::MIN.next(), Some(Precedence(2)));
        assert_eq!(Precedence::MAX.next(), None);
    }
}
