//! # Tokens
//!
//! Each token is an individual lexeme of Go source -- the smallest unit of
//! meaning.
//!
//! Tokens provide both the semantic information in the form of their `Kind`,
//! and the context they were found in.

use diagnostic::Span;

/// An individual lexeme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    /// The semantic kind thing the token is. See `Kind` for more.
    pub(crate) kind: Kind,

    /// This is the `Span` of this token's body, not including any surrounding
    /// whitespace.
    pub(crate) span: Span,

    /// The body of the token as it was represented in the original input.
    ///
    /// Automatically inserted semicolons have the body `"\n"`, which is how
    /// they're told apart from ones that were typed.
    pub(crate) body: &'a str,
}

impl<'a> Token<'a> {
    /// The kind of token this is.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The span of the body of this token, not including surrounding
    /// whitespace.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The way the token was represented in the source.
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// Was this token made up by the lexer at the end of a line?
    pub fn is_automatic_semicolon(&self) -> bool {
        self.kind == Kind::Semicolon && self.body == "\n"
    }
}

impl<'a> ::std::fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(f, "{}", self.body)
    }
}

/// A [`Token`]'s kind is the semantically-relevant part of the token, removed
/// from the source context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Words which are used by the language and can't be identifiers.
    Keyword(Keyword),

    /// Things like `foo` are identifies, names for things.
    Identifier,

    /// An integer like `5`, `0x1F`, `0o17` or `0b1`.
    Int,
    /// A floating point number like `12.34e-56` or `0x1p-2`.
    Float,
    /// An imaginary number like `2i`.
    Imaginary,
    /// A rune literal like `'a'` or `'\n'`.
    Char,
    /// An interpreted `"..."` or raw `` `...` `` string.
    String,

    /// Operators which can appear in expressions, like `+` or `<-`.
    Operator(Operator),

    /// `=`
    Assign,
    /// `:=`
    Define,
    /// An operator followed by `=`, like `+=` or `&^=`.
    OperatorAssign(Operator),

    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `...`
    Ellipsis,
    /// `;`, or a newline the lexer decided ends a statement.
    Semicolon,

    /// Open a paired delimiter.
    Open(Delimiter),

    /// Close a paired delimiter
    Close(Delimiter),
}

impl Kind {
    /// The user-facing name of this kind of token.
    pub fn name(&self) -> &'static str {
        use Delimiter::*;
        use Kind::*;
        match self {
            Keyword(k) => k.as_str(),
            Identifier => "identifier",
            Int => "integer literal",
            Float => "floating-point literal",
            Imaginary => "imaginary literal",
            Char => "rune literal",
            String => "string literal",
            Operator(o) => o.as_str(),
            Assign => "'='",
            Define => "':='",
            OperatorAssign(o) => o.assign_str(),
            Colon => "':'",
            Comma => "','",
            Dot => "'.'",
            Ellipsis => "'...'",
            Semicolon => "';'",
            Open(Parenthesis) => "'('",
            Close(Parenthesis) => "')'",
            Open(Bracket) => "'['",
            Close(Bracket) => "']'",
            Open(Brace) => "'{'",
            Close(Brace) => "'}'",
        }
    }

    /// Is this token kind always a literal?
    pub fn is_literal(&self) -> bool {
        use Kind::*;
        matches!(self, Int | Float | Imaginary | Char | String)
    }

    /// Does a newline after this kind of token end the statement?
    ///
    /// This is Go's semicolon insertion rule.
    pub(crate) fn ends_line(&self) -> bool {
        use Kind::*;
        match self {
            Identifier | Int | Float | Imaginary | Char | String => true,
            Keyword(k) => matches!(
                k,
                self::Keyword::Break
                    | self::Keyword::Continue
                    | self::Keyword::Fallthrough
                    | self::Keyword::Return
            ),
            Operator(self::Operator::Increment)
            | Operator(self::Operator::Decrement) => true,
            Close(_) => true,
            _ => false,
        }
    }
}

/// Delimiters are the different sorts of characters with a distinct opening and
/// closing characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `{}`
    Brace,

    /// `[]`
    Bracket,

    /// `()`
    Parenthesis,
}

/// Every operator token that isn't also an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Quo,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,
    LogicalAnd,
    LogicalOr,
    Arrow,
    Increment,
    Decrement,
    Equal,
    Less,
    Greater,
    Not,
    NotEqual,
    LessEqual,
    GreaterEqual,
    Tilde,
}

impl Operator {
    /// The operator as it's written in source.
    pub fn as_str(self) -> &'static str {
        use Operator::*;
        match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Quo => "/",
            Rem => "%",
            And => "&",
            Or => "|",
            Xor => "^",
            Shl => "<<",
            Shr => ">>",
            AndNot => "&^",
            LogicalAnd => "&&",
            LogicalOr => "||",
            Arrow => "<-",
            Increment => "++",
            Decrement => "--",
            Equal => "==",
            Less => "<",
            Greater => ">",
            Not => "!",
            NotEqual => "!=",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Tilde => "~",
        }
    }

    /// The compound assignment form, e.g. `+=` for [`Operator::Add`].
    ///
    /// Only the arithmetic operators have one, everything else returns the
    /// plain `=`.
    pub fn assign_str(self) -> &'static str {
        use Operator::*;
        match self {
            Add => "+=",
            Sub => "-=",
            Mul => "*=",
            Quo => "/=",
            Rem => "%=",
            And => "&=",
            Or => "|=",
            Xor => "^=",
            Shl => "<<=",
            Shr => ">>=",
            AndNot => "&^=",
            _ => "=",
        }
    }
}

impl ::std::fmt::Display for Operator {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Go's reserved words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,
}

impl Keyword {
    /// The in-code representation of a reserved word.
    pub fn as_str(self) -> &'static str {
        use self::Keyword::*;
        match self {
            Break => "break",
            Case => "case",
            Chan => "chan",
            Const => "const",
            Continue => "continue",
            Default => "default",
            Defer => "defer",
            Else => "else",
            Fallthrough => "fallthrough",
            For => "for",
            Func => "func",
            Go => "go",
            Goto => "goto",
            If => "if",
            Import => "import",
            Interface => "interface",
            Map => "map",
            Package => "package",
            Range => "range",
            Return => "return",
            Select => "select",
            Struct => "struct",
            Switch => "switch",
            Type => "type",
            Var => "var",
        }
    }

    pub(crate) fn try_from_str(word: &str) -> Option<Keyword> {
        use self::Keyword::*;
        Some(match word {
            "break" => Break,
            "case" => Case,
            "chan" => Chan,
            "const" => Const,
            "continue" => Continue,
            "default" => Default,
            "defer" => Defer,
            "else" => Else,
            "fallthrough" => Fallthrough,
            "for" => For,
            "func" => Func,
            "go" => Go,
            "goto" => Goto,
            "if" => If,
            "import" => Import,
            "interface" => Interface,
            "map" => Map,
            "package" => Package,
            "range" => Range,
            "return" => Return,
            "select" => Select,
            "struct" => Struct,
            "switch" => Switch,
            "type" => Type,
            "var" => Var,
            _ => return None,
        })
    }
}

impl ::std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
