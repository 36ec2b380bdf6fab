//! Recursive-descent grammar over the structural token stream.
//!
//! Every production takes the token that opens it and pulls the rest from
//! the stream. Lookahead is a single [`TokenStream::peek`]: a scalar
//! followed by `(` becomes an entity, a block whose first significant token
//! is `-` is a sequence, a key followed by a bare line break maps to null.
//!
//! Structural tokens in value position (a dedent closing an empty block,
//! the end of input) parse as null rather than failing, which is what lets
//! `key:` with nothing under it and a trailing `-` item come out as null
//! values while malformed documents still die on the following
//! expectation.

use crate::error::Result;
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind, TokenTag};
use crate::value::{Entity, Map, Value};

/// Parses a whole document: an indented block at depth zero.
pub(crate) fn parse_document(tokens: &mut TokenStream) -> Result<Value> {
    parse_block(tokens)
}

/// Parses an indented block, deciding between sequence and mapping by
/// looking at the first significant token.
fn parse_block(tokens: &mut TokenStream) -> Result<Value> {
    while tokens.peek().tag() == TokenTag::NewLine {
        tokens.advance();
    }
    if tokens.peek().tag() == TokenTag::Hyphen {
        parse_block_seq(tokens)
    } else {
        parse_block_map(tokens)
    }
}

/// Parses a block of `key: value` lines until the block closes.
///
/// A document consisting of one bare scalar is returned as that scalar.
fn parse_block_map(tokens: &mut TokenStream) -> Result<Value> {
    let mut data = Map::new();
    let mut tok = tokens.advance();

    if tok.is_scalar() && matches!(tokens.peek().tag(), TokenTag::End | TokenTag::Dedent) {
        return parse_value(tokens, tok);
    }

    while !matches!(tok.tag(), TokenTag::Dedent | TokenTag::End) {
        let key = parse_value(tokens, tok)?;
        tokens.expect(&[TokenTag::Colon])?;

        tok = tokens.advance();
        if tok.tag() == TokenTag::NewLine {
            tok = tokens.advance();
            if !matches!(tok.tag(), TokenTag::Indent | TokenTag::Dedent) {
                // Key with nothing under it; `tok` is already the next key.
                data.insert(key, Value::Null);
                continue;
            }
        }
        let value = parse_value(tokens, tok)?;
        data.insert(key, value);

        tok = tokens.expect(&[TokenTag::End, TokenTag::NewLine, TokenTag::Dedent])?;
        if tok.tag() == TokenTag::NewLine {
            tok = tokens.advance_skipping(TokenTag::NewLine);
        }
    }

    Ok(Value::Mapping(data))
}

/// Parses a block of `- item` lines until the block closes.
fn parse_block_seq(tokens: &mut TokenStream) -> Result<Value> {
    let mut data = Vec::new();
    let mut tok = tokens.advance();

    while !matches!(tok.tag(), TokenTag::Dedent | TokenTag::End) {
        if tokens.peek().tag() == TokenTag::NewLine {
            // Nothing on the dash's own line: either a nested block is
            // indented under it, or the item is null.
            tokens.advance();
            if tokens.peek().tag() == TokenTag::Indent {
                let indent = tokens.advance();
                data.push(parse_value(tokens, indent)?);
                tok = tokens.expect(&[TokenTag::End, TokenTag::NewLine, TokenTag::Dedent])?;
                if tok.tag() == TokenTag::NewLine {
                    tok = tokens.expect(&[TokenTag::Hyphen, TokenTag::Dedent])?;
                }
            } else {
                data.push(Value::Null);
                tok = tokens.expect(&[TokenTag::Hyphen, TokenTag::Dedent])?;
            }
            continue;
        }

        let item = tokens.advance();
        let value = if tokens.peek().tag() == TokenTag::Colon {
            // `- key: value` makes the item a single-entry mapping.
            tokens.advance();
            let key = parse_value(tokens, item)?;
            let next = tokens.advance_skipping(TokenTag::NewLine);
            let mut entry = Map::new();
            entry.insert(key, parse_value(tokens, next)?);
            Value::Mapping(entry)
        } else {
            parse_value(tokens, item)?
        };
        data.push(value);

        tok = tokens.expect(&[TokenTag::End, TokenTag::NewLine, TokenTag::Dedent])?;
        if tok.tag() == TokenTag::NewLine {
            tok = tokens.expect(&[TokenTag::Hyphen, TokenTag::Dedent])?;
        }
    }

    Ok(Value::Sequence(data))
}

/// Parses the value a single token opens.
fn parse_value(tokens: &mut TokenStream, token: Token) -> Result<Value> {
    let scalar = match token.kind {
        TokenKind::Str(s) => Value::String(s),
        TokenKind::Int(i) => Value::Integer(i),
        TokenKind::Float(f) => Value::Float(f),
        TokenKind::Bool(b) => Value::Bool(b),
        TokenKind::Null => Value::Null,
        TokenKind::DateTime(dt) => Value::DateTime(dt),
        TokenKind::LeftRound => return Ok(Value::Mapping(parse_paren(tokens)?)),
        TokenKind::LeftSquare => return Ok(Value::Sequence(parse_square(tokens)?)),
        TokenKind::LeftBrace => return Ok(Value::Mapping(parse_brace(tokens)?)),
        TokenKind::Indent(_) => return parse_block(tokens),
        // Structural tokens in value position stand for an absent value.
        _ => return Ok(Value::Null),
    };

    // A scalar directly followed by `(` names an entity.
    if tokens.peek().tag() == TokenTag::LeftRound {
        tokens.advance();
        let attributes = parse_paren(tokens)?;
        let name = match scalar {
            Value::String(s) => s,
            other => other.to_string(),
        };
        return Ok(Value::Entity(Entity::new(name, attributes)));
    }
    Ok(scalar)
}

/// Parses a parenthesized attribute list after its `(` was consumed.
///
/// Items followed by `=` are keyword attributes; bare items are stored
/// under consecutive integer keys counting unnamed items only.
fn parse_paren(tokens: &mut TokenStream) -> Result<Map> {
    let mut data = Map::new();
    let mut positional = 0i64;
    let mut tok = tokens.advance_skipping(TokenTag::NewLine);

    while tok.tag() != TokenTag::RightRound {
        let item = parse_value(tokens, tok)?;
        tok = tokens.expect(&[TokenTag::EqualSign, TokenTag::Comma, TokenTag::RightRound])?;

        match tok.tag() {
            TokenTag::EqualSign => {
                let next = tokens.advance();
                let value = parse_value(tokens, next)?;
                data.insert(item, value);
                tok = tokens.expect(&[TokenTag::Comma, TokenTag::RightRound])?;
                if tok.tag() == TokenTag::Comma {
                    tok = tokens.advance_skipping(TokenTag::NewLine);
                }
            }
            TokenTag::Comma => {
                data.insert(Value::Integer(positional), item);
                positional += 1;
                tok = tokens.advance_skipping(TokenTag::NewLine);
            }
            _ => {
                data.insert(Value::Integer(positional), item);
                positional += 1;
            }
        }
    }

    Ok(data)
}

/// Parses a bracketed list after its `[` was consumed.
fn parse_square(tokens: &mut TokenStream) -> Result<Vec<Value>> {
    let mut data = Vec::new();
    let mut tok = tokens.advance_skipping(TokenTag::NewLine);

    while tok.tag() != TokenTag::RightSquare {
        data.push(parse_value(tokens, tok)?);
        tok = tokens.expect(&[TokenTag::Comma, TokenTag::RightSquare])?;
        if tok.tag() == TokenTag::Comma {
            tok = tokens.advance_skipping(TokenTag::NewLine);
        }
    }

    Ok(data)
}

/// Parses a braced map after its `{` was consumed.
fn parse_brace(tokens: &mut TokenStream) -> Result<Map> {
    let mut data = Map::new();
    let mut tok = tokens.advance_skipping(TokenTag::NewLine);

    while tok.tag() != TokenTag::RightBrace {
        let key = parse_value(tokens, tok)?;
        tokens.expect(&[TokenTag::Colon])?;
        let next = tokens.advance();
        let value = parse_value(tokens, next)?;
        data.insert(key, value);

        tok = tokens.expect(&[TokenTag::Comma, TokenTag::RightBrace])?;
        if tok.tag() == TokenTag::Comma {
            tok = tokens.advance_skipping(TokenTag::NewLine);
        }
    }

    Ok(data)
}
