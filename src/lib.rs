//! # neon-rs
//!
//! A parser and encoder for [NEON](https://ne-on.org/), a human-friendly,
//! indentation-sensitive configuration format. NEON looks like YAML's core
//! subset with a few twists of its own: inline `[...]`, `{...}` and `(...)`
//! structures that may span lines, typed bare literals (integers in several
//! bases, floats, booleans, datetimes, null), and entity literals such as
//! `Column(type=integer)`.
//!
//! ## Quick Start
//!
//! ```rust
//! use neon_rs::{decode, Value};
//!
//! let document = r#"
//! name: Homer
//! children:
//!     - Bart
//!     - Lisa
//!     - Maggie
//! address:
//!     street: 742 Evergreen Terrace
//!     city: Springfield
//! "#;
//!
//! let tree = decode(document).unwrap();
//! assert_eq!(tree.get("name").and_then(Value::as_str), Some("Homer"));
//!
//! let children = tree.get("children").and_then(Value::as_sequence).unwrap();
//! assert_eq!(children.len(), 3);
//! ```
//!
//! ## Features
//!
//! - **Indentation-aware blocks**: nested mappings and `- item` sequences,
//!   closed by dedent, with tabs or spaces
//! - **Inline structures**: `[a, b]`, `{key: value}` and attribute lists
//!   `(x=1, y)` that may span multiple lines
//! - **Typed literals**: `42`, `0x2A`, `4.2`, `yes`/`no`/`on`/`off`,
//!   `2015-01-01 10:00:00`, `null`, everything else a string
//! - **Entities**: `Name(attr=value, positional)` parsed into
//!   [`Entity`] with an ordered attribute map
//! - **Order preserving**: mappings keep document order via `IndexMap`
//! - **Serde interop**: [`Value`] implements `Serialize` and `Deserialize`
//!   for conversion to and from other formats
//!
//! ## Encoding
//!
//! ```rust
//! use neon_rs::{encode, Map, Value};
//!
//! let mut tree = Map::new();
//! tree.insert(Value::from("a"), Value::Integer(1));
//! assert_eq!(encode(&Value::Mapping(tree)), "\na: 1");
//! ```
//!
//! ## Error Reporting
//!
//! Lexical failures surface as [`Error::Token`], grammar failures as
//! [`Error::Syntax`] with the offending token, its line, and the expected
//! alternatives:
//!
//! ```rust
//! let err = neon_rs::decode("a: [1: 2]").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Unexpected ':' on line 1, expected ',' or ']'."
//! );
//! ```

use std::io;

mod encoder;
mod error;
mod parser;
mod scanner;
mod stream;
mod token;
mod value;

pub use error::{Error, Result};
pub use value::{Entity, Map, Value};

/// Decodes a NEON document into a [`Value`] tree.
///
/// The top level of a document is usually a mapping, but a lone sequence or
/// a bare scalar decodes to itself. An empty document decodes to an empty
/// mapping.
///
/// # Examples
///
/// ```rust
/// use neon_rs::{decode, Value};
///
/// let tree = decode("a: 1\nb: yes").unwrap();
/// assert_eq!(tree.get("a"), Some(&Value::Integer(1)));
/// assert_eq!(tree.get("b"), Some(&Value::Bool(true)));
/// ```
///
/// # Errors
///
/// Returns [`Error::Token`] when the input contains an unrecognizable
/// character sequence and [`Error::Syntax`] when it violates the grammar.
pub fn decode(input: &str) -> Result<Value> {
    let mut tokens = stream::tokenize(input)?;
    parser::parse_document(&mut tokens)
}

/// Decodes a NEON document from any [`io::Read`] source.
///
/// # Examples
///
/// ```rust
/// use neon_rs::{decode_reader, Value};
///
/// let tree = decode_reader("a: 1".as_bytes()).unwrap();
/// assert_eq!(tree.get("a"), Some(&Value::Integer(1)));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] when reading fails, otherwise the same errors as
/// [`decode`].
pub fn decode_reader<R: io::Read>(mut reader: R) -> Result<Value> {
    let mut buffer = String::new();
    reader
        .read_to_string(&mut buffer)
        .map_err(|err| Error::io(&err.to_string()))?;
    decode(&buffer)
}

/// Encodes a [`Value`] tree as NEON text.
///
/// Blocks are indented with one tab per level and top-level entries are
/// separated by a blank line. Container values start on the line below
/// their key, so a tree whose top level is a container begins with a line
/// break.
///
/// # Examples
///
/// ```rust
/// use neon_rs::{decode, encode, Value};
///
/// let tree = decode("a:\n  b: 1").unwrap();
/// assert_eq!(encode(&tree), "\na: \n\tb: 1");
/// ```
pub fn encode(value: &Value) -> String {
    encoder::to_string(value, 0)
}
