//! Error types for NEON decoding.
//!
//! Two failure modes exist, mirroring the two phases of decoding:
//!
//! - **Lexical errors** ([`Error::Token`]): the scanner reached a position
//!   that no lexical rule matches.
//! - **Syntax errors** ([`Error::Syntax`]): the grammar received a token kind
//!   outside the set it allows at that point. The message carries the token
//!   name, its line, and the allowed alternatives.
//!
//! Both are unrecoverable at the point raised: no partial tree is returned.
//!
//! ## Examples
//!
//! ```rust
//! use neon_rs::decode;
//!
//! let err = decode("a: [1: 2]").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Unexpected ':' on line 1, expected ',' or ']'."
//! );
//! ```

use thiserror::Error;

/// All errors that can occur while decoding NEON input.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The scanner hit a character sequence no lexical rule matches.
    #[error("Unknown character sequence: {0:?}")]
    Token(String),

    /// The grammar received an unexpected token. The message is fully
    /// rendered at construction time so that its wording stays stable.
    #[error("{0}")]
    Syntax(String),

    /// IO error while reading input for [`crate::decode_reader`].
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Creates a lexical error for an unmatched character sequence.
    pub(crate) fn token(offending: &str) -> Self {
        Error::Token(offending.to_string())
    }

    /// Creates a syntax error from a pre-rendered message.
    pub(crate) fn syntax(msg: String) -> Self {
        Error::Syntax(msg)
    }

    /// Creates an I/O error for reader failures.
    pub(crate) fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
