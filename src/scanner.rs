//! Lexical scanner for NEON source text.
//!
//! The scanner walks the input with an ordered set of rules, taking the
//! first rule that matches at the current position. Rule order is load
//! bearing: quoted strings win over literals, literals win over the symbol
//! characters they are allowed to start with (`:x` and `-x` open a literal,
//! `:` and `-` alone do not), and the indent rule only applies at the start
//! of a line.
//!
//! Bare literals are typed eagerly: integer, then float, then boolean, then
//! datetime, then null, falling back to a plain string. The resulting tokens
//! carry converted values; no line numbers are assigned here, that is the
//! job of the indentation pass in [`crate::stream`].

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};
use crate::token::{Token, TokenKind};

/// Scans `source` into a flat token list.
///
/// Comments and insignificant whitespace are dropped. The caller is expected
/// to pass input with leading and trailing whitespace already stripped.
pub(crate) fn scan(source: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut at_line_start = true;

    while pos < chars.len() {
        let rest = &chars[pos..];
        let (consumed, kind) = next_match(rest, at_line_start)?;
        debug_assert!(consumed > 0);
        at_line_start = matches!(kind, Some(TokenKind::NewLine(_)));
        if let Some(kind) = kind {
            tokens.push(Token::new(kind));
        }
        pos += consumed;
    }

    Ok(tokens)
}

/// Applies the scan rules in priority order at the start of `rest`.
///
/// Returns the number of characters consumed and the produced token kind,
/// `None` for matches that produce no token (comments, whitespace).
fn next_match(rest: &[char], at_line_start: bool) -> Result<(usize, Option<TokenKind>)> {
    if let Some(len) = match_string(rest) {
        let inner: String = rest[1..len - 1].iter().collect();
        return Ok((len, Some(TokenKind::Str(unescape(&inner)))));
    }

    if let Some(len) = match_literal(rest) {
        let text: String = rest[..len].iter().collect();
        return Ok((len, Some(classify_literal(&text))));
    }

    if let Some(symbol) = match_symbol(rest[0]) {
        return Ok((1, Some(symbol)));
    }

    if rest[0] == '#' {
        let len = rest.iter().take_while(|&&c| c != '\n').count();
        return Ok((len, None));
    }

    if at_line_start && is_inline_space(rest[0]) {
        let len = rest.iter().take_while(|&&c| is_inline_space(c)).count();
        return Ok((len, Some(TokenKind::Indent(len))));
    }

    if rest[0] == '\n' {
        let len = rest.iter().take_while(|&&c| c == '\n').count();
        return Ok((len, Some(TokenKind::NewLine(len))));
    }

    if is_inline_space(rest[0]) {
        let len = rest.iter().take_while(|&&c| is_inline_space(c)).count();
        return Ok((len, None));
    }

    let text: String = rest.iter().take_while(|&&c| c != '\n').collect();
    Err(Error::token(&text))
}

fn is_inline_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn match_symbol(c: char) -> Option<TokenKind> {
    let kind = match c {
        ',' => TokenKind::Comma,
        ':' => TokenKind::Colon,
        '=' => TokenKind::EqualSign,
        '-' => TokenKind::Hyphen,
        '(' => TokenKind::LeftRound,
        ')' => TokenKind::RightRound,
        '[' => TokenKind::LeftSquare,
        ']' => TokenKind::RightSquare,
        '{' => TokenKind::LeftBrace,
        '}' => TokenKind::RightBrace,
        _ => return None,
    };
    Some(kind)
}

/// Matches a single- or double-quoted string, including the quotes.
///
/// A backslash escapes the following character. Line breaks are not allowed
/// inside a quoted string, so an unterminated quote never swallows the rest
/// of the document.
fn match_string(rest: &[char]) -> Option<usize> {
    let quote = rest[0];
    if quote != '"' && quote != '\'' {
        return None;
    }
    let mut i = 1;
    loop {
        match rest.get(i)? {
            '\n' => return None,
            '\\' => {
                if matches!(rest.get(i + 1), None | Some('\n')) {
                    return None;
                }
                i += 2;
            }
            &c if c == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
}

/// Collapses `\"`, `\'` and `\\` escapes; any other backslash pair is kept
/// verbatim.
fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ ('"' | '\'' | '\\')) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Matches a bare literal.
///
/// A literal opens with any character that is not a comment marker, quote,
/// symbol or control character; `:` and `-` may also open one when directly
/// followed by another literal character. After the opening, three kinds of
/// continuation are taken greedily: a run of plain literal characters, a
/// `:` that is not followed by whitespace or a closing delimiter, or a run
/// of spaces and tabs bridging to one more literal character. The bridge is
/// what keeps `one two` and `2015-01-01 10:00:00` single tokens while still
/// stopping before an inline comment.
fn match_literal(rest: &[char]) -> Option<usize> {
    const STOP: &str = ",:=]})(";
    const BRIDGE_STOP: &str = "#,:=]})(";

    let first = rest[0];
    let mut i = if first == ':' || first == '-' {
        let next = *rest.get(1)?;
        if next <= '\x20' || next.is_whitespace() || "\"',]})".contains(next) {
            return None;
        }
        2
    } else {
        if first <= '\x20' || "#\"',:=[]{}()!`-".contains(first) {
            return None;
        }
        1
    };

    loop {
        if let Some(&c) = rest.get(i) {
            if c > '\x20' && !STOP.contains(c) {
                i += 1;
                continue;
            }
        }

        if rest.get(i) == Some(&':') {
            if let Some(&next) = rest.get(i + 1) {
                if !next.is_whitespace() && !",]})".contains(next) {
                    i += 1;
                    continue;
                }
            }
        }

        if matches!(rest.get(i), Some(&c) if is_inline_space(c)) {
            let mut j = i;
            while matches!(rest.get(j), Some(&c) if is_inline_space(c)) {
                j += 1;
            }
            if let Some(&c) = rest.get(j) {
                if c > '\x20' && !BRIDGE_STOP.contains(c) {
                    i = j + 1;
                    continue;
                }
            }
        }

        return Some(i);
    }
}

const TRUE_VARIANTS: [&str; 9] = [
    "true", "True", "TRUE", "yes", "Yes", "YES", "on", "On", "ON",
];
const FALSE_VARIANTS: [&str; 9] = [
    "false", "False", "FALSE", "no", "No", "NO", "off", "Off", "OFF",
];
const NULL_VARIANTS: [&str; 3] = ["null", "Null", "NULL"];

/// Types a bare literal: integer, float, boolean, datetime, null, string.
///
/// Each conversion either claims the whole literal or passes. The order
/// matters: `-5` fails the integer conversion (a sign is not a digit) and
/// becomes a float, `TruE` misses the recognized boolean spellings and stays
/// a string.
fn classify_literal(text: &str) -> TokenKind {
    if let Some(int) = convert_integer(text) {
        return TokenKind::Int(int);
    }
    if let Ok(float) = text.parse::<f64>() {
        return TokenKind::Float(float);
    }
    if TRUE_VARIANTS.contains(&text) {
        return TokenKind::Bool(true);
    }
    if FALSE_VARIANTS.contains(&text) {
        return TokenKind::Bool(false);
    }
    if let Some(dt) = parse_datetime(text) {
        return TokenKind::DateTime(dt);
    }
    if NULL_VARIANTS.contains(&text) {
        return TokenKind::Null;
    }
    TokenKind::Str(text.to_string())
}

/// Integer conversion: an unsigned run of decimal digits, or a `0x`/`0o`/`0b`
/// prefixed number. Anything else, including values too large for `i64`,
/// passes.
fn convert_integer(text: &str) -> Option<i64> {
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse().ok();
    }
    let radix = match text.get(..2) {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return None;
    }
    i64::from_str_radix(digits, radix).ok()
}

/// Best-effort datetime recognition.
///
/// Accepts RFC 3339, the same layouts with a space instead of `T`, the
/// offset-free variants of both, second-less times, and a bare date. Values
/// without an explicit offset are taken as UTC.
fn parse_datetime(text: &str) -> Option<DateTime<FixedOffset>> {
    const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0)?;
        return Some(naive.and_utc().fixed_offset());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn kinds(source: &str) -> Vec<TokenKind> {
        scan(source)
            .unwrap()
            .into_iter()
            .map(|tok| tok.kind)
            .collect()
    }

    fn single(source: &str) -> TokenKind {
        let mut tokens = kinds(source);
        assert_eq!(tokens.len(), 1, "expected one token from {:?}", source);
        tokens.remove(0)
    }

    #[test]
    fn test_symbols() {
        assert_eq!(
            kinds("[]{}()"),
            vec![
                TokenKind::LeftSquare,
                TokenKind::RightSquare,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftRound,
                TokenKind::RightRound,
            ]
        );
    }

    #[test]
    fn test_key_and_value() {
        assert_eq!(
            kinds("a: 1"),
            vec![
                TokenKind::Str("a".into()),
                TokenKind::Colon,
                TokenKind::Int(1),
            ]
        );
    }

    #[test]
    fn test_integers() {
        assert_eq!(single("0"), TokenKind::Int(0));
        assert_eq!(single("42"), TokenKind::Int(42));
        assert_eq!(single("0x1A"), TokenKind::Int(26));
        assert_eq!(single("0o17"), TokenKind::Int(15));
        assert_eq!(single("0b101"), TokenKind::Int(5));
    }

    #[test]
    fn test_floats() {
        assert_eq!(single("4.2"), TokenKind::Float(4.2));
        assert_eq!(single("1e3"), TokenKind::Float(1000.0));
        // A sign is not a digit, so signed numbers fall through to float.
        assert_eq!(single("-5"), TokenKind::Float(-5.0));
        assert_eq!(single("-4.2"), TokenKind::Float(-4.2));
    }

    #[test]
    fn test_booleans_and_null() {
        for text in TRUE_VARIANTS {
            assert_eq!(single(text), TokenKind::Bool(true));
        }
        for text in FALSE_VARIANTS {
            assert_eq!(single(text), TokenKind::Bool(false));
        }
        for text in NULL_VARIANTS {
            assert_eq!(single(text), TokenKind::Null);
        }
        assert_eq!(single("TruE"), TokenKind::Str("TruE".into()));
        assert_eq!(single("nulllll"), TokenKind::Str("nulllll".into()));
    }

    #[test]
    fn test_quoted_strings() {
        assert_eq!(single("\"on\""), TokenKind::Str("on".into()));
        assert_eq!(single("'12'"), TokenKind::Str("12".into()));
        assert_eq!(single("\"a\\\"b\""), TokenKind::Str("a\"b".into()));
        assert_eq!(single("'a\\'b'"), TokenKind::Str("a'b".into()));
        assert_eq!(single("\"a\\\\b\""), TokenKind::Str("a\\b".into()));
        // Unrecognized escapes stay verbatim.
        assert_eq!(single("\"a\\nb\""), TokenKind::Str("a\\nb".into()));
    }

    #[test]
    fn test_literal_spans_inner_spaces_and_colons() {
        assert_eq!(single("one two"), TokenKind::Str("one two".into()));
        assert_eq!(single("a:b"), TokenKind::Str("a:b".into()));
        assert_eq!(
            single("http://example.com"),
            TokenKind::Str("http://example.com".into())
        );
    }

    #[test]
    fn test_literal_stops_before_comment() {
        assert_eq!(kinds("value # note"), vec![TokenKind::Str("value".into())]);
    }

    #[test]
    fn test_hyphen_versus_literal() {
        assert_eq!(
            kinds("- b"),
            vec![TokenKind::Hyphen, TokenKind::Str("b".into())]
        );
        assert_eq!(single("-dashed-word"), TokenKind::Str("-dashed-word".into()));
    }

    #[test]
    fn test_datetimes() {
        let expected = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2015, 1, 1, 10, 0, 0)
            .unwrap();
        assert_eq!(
            single("2015-01-01T10:00:00+01:00"),
            TokenKind::DateTime(expected)
        );

        let naive = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2015, 5, 10, 0, 0, 0)
            .unwrap();
        assert_eq!(single("2015-5-10"), TokenKind::DateTime(naive));
    }

    #[test]
    fn test_indent_and_newline() {
        assert_eq!(
            kinds("a:\n  b: 1"),
            vec![
                TokenKind::Str("a".into()),
                TokenKind::Colon,
                TokenKind::NewLine(1),
                TokenKind::Indent(2),
                TokenKind::Str("b".into()),
                TokenKind::Colon,
                TokenKind::Int(1),
            ]
        );
        assert_eq!(
            kinds("a\n\n\nb"),
            vec![
                TokenKind::Str("a".into()),
                TokenKind::NewLine(3),
                TokenKind::Str("b".into()),
            ]
        );
    }

    #[test]
    fn test_comment_only_lines() {
        assert_eq!(
            kinds("# first\na: 1"),
            vec![
                TokenKind::NewLine(1),
                TokenKind::Str("a".into()),
                TokenKind::Colon,
                TokenKind::Int(1),
            ]
        );
    }

    #[test]
    fn test_unknown_sequence() {
        let err = scan("a: !tag").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown character sequence: \"!tag\""
        );
    }
}
