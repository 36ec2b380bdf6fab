//! Token representation for the NEON scanner and grammar.
//!
//! [`TokenKind`] is a closed tagged variant carrying the payload produced by
//! the scanner: typed scalar values, single-character symbols, and the
//! structural tokens the indentation pass synthesizes (indent, dedent, line
//! breaks, end of input). [`TokenTag`] is the fieldless discriminant used for
//! "expect one of" sets in the grammar, where only the kind matters.
//!
//! Exhaustion of the stream is modeled as a terminal [`TokenTag::End`] token
//! rather than an `Option`, which keeps every grammar call site uniform.

use std::fmt;

use chrono::{DateTime, FixedOffset};

/// A token kind together with its payload.
///
/// Scalar kinds carry the already-converted value (literal typing happens in
/// the scanner). `Indent` carries the indentation width in characters,
/// `Dedent` the width being popped, and `NewLine` the number of consecutive
/// line breaks it stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    DateTime(DateTime<FixedOffset>),
    Comma,
    Colon,
    EqualSign,
    Hyphen,
    LeftRound,
    RightRound,
    LeftSquare,
    RightSquare,
    LeftBrace,
    RightBrace,
    Indent(usize),
    Dedent(usize),
    NewLine(usize),
    End,
}

/// Fieldless discriminant of [`TokenKind`], used for expectation sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenTag {
    Str,
    Int,
    Float,
    Bool,
    Null,
    DateTime,
    Comma,
    Colon,
    EqualSign,
    Hyphen,
    LeftRound,
    RightRound,
    LeftSquare,
    RightSquare,
    LeftBrace,
    RightBrace,
    Indent,
    Dedent,
    NewLine,
    End,
}

impl TokenKind {
    pub fn tag(&self) -> TokenTag {
        match self {
            TokenKind::Str(_) => TokenTag::Str,
            TokenKind::Int(_) => TokenTag::Int,
            TokenKind::Float(_) => TokenTag::Float,
            TokenKind::Bool(_) => TokenTag::Bool,
            TokenKind::Null => TokenTag::Null,
            TokenKind::DateTime(_) => TokenTag::DateTime,
            TokenKind::Comma => TokenTag::Comma,
            TokenKind::Colon => TokenTag::Colon,
            TokenKind::EqualSign => TokenTag::EqualSign,
            TokenKind::Hyphen => TokenTag::Hyphen,
            TokenKind::LeftRound => TokenTag::LeftRound,
            TokenKind::RightRound => TokenTag::RightRound,
            TokenKind::LeftSquare => TokenTag::LeftSquare,
            TokenKind::RightSquare => TokenTag::RightSquare,
            TokenKind::LeftBrace => TokenTag::LeftBrace,
            TokenKind::RightBrace => TokenTag::RightBrace,
            TokenKind::Indent(_) => TokenTag::Indent,
            TokenKind::Dedent(_) => TokenTag::Dedent,
            TokenKind::NewLine(_) => TokenTag::NewLine,
            TokenKind::End => TokenTag::End,
        }
    }
}

impl TokenTag {
    /// Human-readable token name used in syntax error messages.
    ///
    /// Symbols render as their literal character in quotes; the synthetic
    /// end-of-input token renders as `end of file`.
    pub fn name(&self) -> &'static str {
        match self {
            TokenTag::Str => "string",
            TokenTag::Int => "integer",
            TokenTag::Float => "float",
            TokenTag::Bool => "boolean",
            TokenTag::Null => "null",
            TokenTag::DateTime => "datetime",
            TokenTag::Comma => "','",
            TokenTag::Colon => "':'",
            TokenTag::EqualSign => "'='",
            TokenTag::Hyphen => "'-'",
            TokenTag::LeftRound => "'('",
            TokenTag::RightRound => "')'",
            TokenTag::LeftSquare => "'['",
            TokenTag::RightSquare => "']'",
            TokenTag::LeftBrace => "'{'",
            TokenTag::RightBrace => "'}'",
            TokenTag::Indent => "indent",
            TokenTag::Dedent => "dedent",
            TokenTag::NewLine => "new line",
            TokenTag::End => "end of file",
        }
    }

    /// Whether this kind has a lexical pattern of its own.
    ///
    /// Typed scalars come out of the literal rule and dedent/end are
    /// synthesized, so none of them is ever listed among the expected
    /// alternatives of a syntax error.
    pub fn has_pattern(&self) -> bool {
        !matches!(
            self,
            TokenTag::Int
                | TokenTag::Float
                | TokenTag::Bool
                | TokenTag::Null
                | TokenTag::DateTime
                | TokenTag::Dedent
                | TokenTag::End
        )
    }
}

impl fmt::Display for TokenTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A positioned token.
///
/// `line` is the 1-based source line the token was found on; the terminal
/// end-of-input token carries no line. Equality compares kind and payload
/// only, so tokens from different positions compare equal.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub line: Option<usize>,
}

impl Token {
    pub fn new(kind: TokenKind) -> Self {
        Token { kind, line: None }
    }

    pub fn at(kind: TokenKind, line: usize) -> Self {
        Token {
            kind,
            line: Some(line),
        }
    }

    pub fn end() -> Self {
        Token::new(TokenKind::End)
    }

    pub fn tag(&self) -> TokenTag {
        self.kind.tag()
    }

    /// Whether this token carries a typed scalar value.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Str(_)
                | TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Bool(_)
                | TokenKind::Null
                | TokenKind::DateTime(_)
        )
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        // Line numbers are deliberately excluded.
        self.kind == other.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_line() {
        let a = Token::at(TokenKind::Str("x".into()), 1);
        let b = Token::at(TokenKind::Str("x".into()), 7);
        assert_eq!(a, b);
        assert_ne!(a, Token::at(TokenKind::Str("y".into()), 1));
    }

    #[test]
    fn test_symbol_names() {
        assert_eq!(TokenTag::Comma.name(), "','");
        assert_eq!(TokenTag::RightSquare.name(), "']'");
        assert_eq!(TokenTag::End.name(), "end of file");
        assert_eq!(TokenTag::NewLine.name(), "new line");
    }

    #[test]
    fn test_pattern_kinds() {
        assert!(TokenTag::Comma.has_pattern());
        assert!(TokenTag::NewLine.has_pattern());
        assert!(TokenTag::Indent.has_pattern());
        assert!(!TokenTag::End.has_pattern());
        assert!(!TokenTag::Dedent.has_pattern());
        assert!(!TokenTag::Int.has_pattern());
    }
}
