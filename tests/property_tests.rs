use proptest::prelude::*;

use neon_rs::{decode, encode, Map, Value};

// Bare words the literal typer claims for itself; they cannot be used as
// plain string keys in generated documents.
const RESERVED: [&str; 10] = [
    "true", "false", "yes", "no", "on", "off", "null", "inf", "infinity", "nan",
];

fn unique_keys(raw: Vec<String>) -> Vec<String> {
    let mut keys = Vec::new();
    for key in raw {
        if !RESERVED.contains(&key.as_str()) && !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

proptest! {
    #[test]
    fn prop_nonnegative_integers_decode_exactly(n in 0i64..=i64::MAX) {
        let tree = decode(&format!("n: {}", n)).unwrap();
        prop_assert_eq!(tree.get("n"), Some(&Value::Integer(n)));
    }

    #[test]
    fn prop_quoted_strings_keep_their_text(s in "[a-zA-Z0-9 _.]{0,40}") {
        let tree = decode(&format!("s: \"{}\"", s)).unwrap();
        prop_assert_eq!(tree.get("s"), Some(&Value::String(s)));
    }

    #[test]
    fn prop_key_order_is_document_order(raw in prop::collection::vec("[a-z]{1,8}", 1..12)) {
        let keys = unique_keys(raw);
        prop_assume!(!keys.is_empty());

        let document: String = keys
            .iter()
            .enumerate()
            .map(|(i, key)| format!("{}: {}\n", key, i))
            .collect();
        let tree = decode(&document).unwrap();

        let decoded: Vec<String> = tree
            .as_mapping()
            .unwrap()
            .keys()
            .map(|key| key.as_str().unwrap().to_string())
            .collect();
        prop_assert_eq!(decoded, keys);
    }

    #[test]
    fn prop_integer_trees_roundtrip(
        raw in prop::collection::vec("[a-z]{1,8}", 1..10),
        values in prop::collection::vec(0i64..=i64::MAX, 10),
    ) {
        let keys = unique_keys(raw);
        prop_assume!(!keys.is_empty());

        let mut map = Map::new();
        for (key, value) in keys.iter().zip(&values) {
            map.insert(Value::from(key.as_str()), Value::Integer(*value));
        }
        let tree = Value::Mapping(map);
        prop_assert_eq!(decode(&encode(&tree)).unwrap(), tree);
    }

    #[test]
    fn prop_finite_floats_roundtrip(f in any::<f64>()) {
        prop_assume!(f.is_finite());
        let tree = Value::Mapping(
            [(Value::from("f"), Value::Float(f))].into_iter().collect(),
        );
        prop_assert_eq!(decode(&encode(&tree)).unwrap(), tree);
    }

    #[test]
    fn prop_sequences_of_integers_roundtrip(
        values in prop::collection::vec(0i64..=i64::MAX, 1..10),
    ) {
        let tree = Value::Sequence(values.into_iter().map(Value::Integer).collect());
        prop_assert_eq!(decode(&encode(&tree)).unwrap(), tree);
    }
}
