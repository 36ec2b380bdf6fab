//! Rendering of value trees back to NEON text.
//!
//! Blocks use one tab per nesting level. Top-level entries are separated by
//! a blank line, nested ones by a single line break, and container values
//! start on the line below their key or dash. Scalars render through their
//! `Display` form, so booleans come out as `True`/`False` and null as
//! `Null`.

use crate::value::{Map, Value};

pub(crate) fn to_string(value: &Value, level: usize) -> String {
    match value {
        Value::Mapping(map) => format!("\n{}", format_map(map, level)),
        Value::Sequence(seq) => format!("\n{}", format_seq(seq, level)),
        other => other.to_string(),
    }
}

fn format_map(map: &Map, level: usize) -> String {
    let indent = "\t".repeat(level);
    let separator = if level > 0 { "\n" } else { "\n\n" };
    map.iter()
        .map(|(key, value)| format!("{}{}: {}", indent, key, to_string(value, level + 1)))
        .collect::<Vec<_>>()
        .join(separator)
}

fn format_seq(seq: &[Value], level: usize) -> String {
    let indent = "\t".repeat(level);
    let separator = if level > 0 { "\n" } else { "\n\n" };
    seq.iter()
        .map(|value| format!("{}- {}", indent, to_string(value, level + 1)))
        .collect::<Vec<_>>()
        .join(separator)
}
