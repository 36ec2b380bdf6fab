//! Indentation pass and token cursor.
//!
//! [`tokenize`] turns raw scanner output into the stream the grammar
//! consumes: it stamps line numbers, rewrites indentation changes into
//! synthetic `Indent`/`Dedent` tokens, and suppresses line breaks inside
//! brackets so multi-line `[...]`, `{...}` and `(...)` read as a single
//! line. [`TokenStream`] is a cursor over the result; running past the end
//! yields a terminal end-of-input token instead of panicking or returning
//! options, which keeps the grammar uniform.

use crate::error::{Error, Result};
use crate::scanner::scan;
use crate::token::{Token, TokenKind, TokenTag};

/// Tokenizes `input` and wraps the result in a cursor.
///
/// Line numbering starts after any stripped leading whitespace, so a
/// document opening with blank lines reports errors on the lines the reader
/// sees in the file.
pub(crate) fn tokenize(input: &str) -> Result<TokenStream> {
    let mut position = input.chars().take_while(|c| c.is_whitespace()).count() + 1;
    let raw = scan(input.trim())?;

    let mut out = Vec::new();
    let mut curr_indent = 0usize;
    let mut indent_stack = vec![0usize];
    let mut newline_last = false;
    let mut inside_bracket = 0i32;

    let mut iter = raw.into_iter().peekable();
    while let Some(mut tok) = iter.next() {
        let mut indent_change = 0i64;
        tok.line = Some(position);

        match tok.kind {
            TokenKind::LeftRound | TokenKind::LeftSquare | TokenKind::LeftBrace => {
                inside_bracket += 1;
            }
            TokenKind::RightRound | TokenKind::RightSquare | TokenKind::RightBrace => {
                inside_bracket -= 1;
            }
            _ => {}
        }

        // Indentation is only significant at the start of a line, and never
        // inside brackets.
        if newline_last && inside_bracket == 0 {
            let indent = match tok.kind {
                TokenKind::Indent(width) => width,
                _ => 0,
            };
            if indent != curr_indent {
                indent_change = indent as i64 - curr_indent as i64;
                curr_indent = indent;
            }
        }

        if let TokenKind::NewLine(count) = tok.kind {
            newline_last = true;
            let mut total = count;
            // Runs separated by comments or trailing whitespace arrive as
            // several NewLine tokens; fold them into one, keeping the full
            // line count so positions stay accurate.
            while matches!(
                iter.peek(),
                Some(Token {
                    kind: TokenKind::NewLine(_),
                    ..
                })
            ) {
                if let Some(Token {
                    kind: TokenKind::NewLine(more),
                    ..
                }) = iter.next()
                {
                    total += more;
                }
            }
            tok.kind = TokenKind::NewLine(total);
            position += total;
        } else {
            newline_last = false;
        }

        // A drop in indentation closes every block deeper than the new
        // level. Each dedent is followed by a line break so block parsers
        // see the same shape as an explicitly terminated line.
        if indent_change < 0 {
            while let Some(&top) = indent_stack.last() {
                if top <= curr_indent {
                    break;
                }
                indent_stack.pop();
                out.push(Token::at(TokenKind::Dedent(top), position));
                out.push(Token::at(TokenKind::NewLine(1), position));
            }
        }

        if indent_change > 0 {
            indent_stack.push(curr_indent);
            out.push(tok.clone());
        }

        let suppressed = matches!(tok.kind, TokenKind::Indent(_))
            || (inside_bracket != 0 && matches!(tok.kind, TokenKind::NewLine(_)));
        if !suppressed {
            out.push(tok);
        }
    }

    // Close blocks still open at end of input. No trailing line breaks here.
    while indent_stack.len() > 1 {
        if let Some(top) = indent_stack.pop() {
            out.push(Token::at(TokenKind::Dedent(top), position));
        }
    }
    out.push(Token::end());

    Ok(TokenStream::new(out))
}

/// A cursor over the tokenized document.
pub(crate) struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    fn new(tokens: Vec<Token>) -> Self {
        TokenStream { tokens, cursor: 0 }
    }

    /// Looks at the next token without consuming it.
    pub(crate) fn peek(&self) -> Token {
        self.tokens
            .get(self.cursor)
            .cloned()
            .unwrap_or_else(Token::end)
    }

    /// Consumes and returns the next token.
    pub(crate) fn advance(&mut self) -> Token {
        let tok = self.peek();
        self.cursor += 1;
        tok
    }

    /// Consumes tokens of `skip` kind, returning the first other token.
    pub(crate) fn advance_skipping(&mut self, skip: TokenTag) -> Token {
        let mut tok = self.advance();
        while tok.tag() == skip {
            tok = self.advance();
        }
        tok
    }

    /// Consumes the next token and checks it against the allowed kinds.
    pub(crate) fn expect(&mut self, allowed: &[TokenTag]) -> Result<Token> {
        let tok = self.advance();
        if allowed.contains(&tok.tag()) {
            Ok(tok)
        } else {
            Err(unexpected(allowed, &tok))
        }
    }
}

/// Builds the syntax error for an unexpected token.
///
/// The line is reported when the token has one, which the terminal
/// end-of-input token does not. The expected alternatives list only kinds
/// with a lexical pattern of their own, and is left out entirely when the
/// offending token is an indent.
pub(crate) fn unexpected(expected: &[TokenTag], token: &Token) -> Error {
    use std::fmt::Write;

    let mut msg = format!("Unexpected {}", token.tag().name());
    if let Some(line) = token.line {
        let _ = write!(msg, " on line {}", line);
    }
    if token.tag() != TokenTag::Indent {
        let allowed: Vec<&str> = expected
            .iter()
            .filter(|tag| tag.has_pattern())
            .map(TokenTag::name)
            .collect();
        if !allowed.is_empty() {
            let _ = write!(msg, ", expected {}", allowed.join(" or "));
        }
    }
    msg.push('.');
    Error::syntax(msg)
}
