use neon_rs::{decode, encode, Map, Value};

fn map(entries: Vec<(Value, Value)>) -> Value {
    Value::Mapping(entries.into_iter().collect())
}

#[test]
fn test_encode_scalars() {
    assert_eq!(encode(&Value::Null), "Null");
    assert_eq!(encode(&Value::Bool(true)), "True");
    assert_eq!(encode(&Value::Bool(false)), "False");
    assert_eq!(encode(&Value::Integer(42)), "42");
    assert_eq!(encode(&Value::Float(5.234)), "5.234");
    assert_eq!(encode(&Value::Float(5e10)), "50000000000.0");
    assert_eq!(encode(&Value::from("hello")), "hello");
}

#[test]
fn test_encode_flat_mapping() {
    let tree = map(vec![
        (Value::from("a"), Value::Integer(1)),
        (Value::from("b"), Value::Null),
    ]);
    assert_eq!(encode(&tree), "\na: 1\n\nb: Null");
}

#[test]
fn test_encode_nested_mapping() {
    let tree = map(vec![(
        Value::from("address"),
        map(vec![
            (Value::from("street"), Value::from("742 Evergreen Terrace")),
            (Value::from("city"), Value::from("Springfield")),
        ]),
    )]);
    assert_eq!(
        encode(&tree),
        "\naddress: \n\tstreet: 742 Evergreen Terrace\n\tcity: Springfield"
    );
}

#[test]
fn test_encode_sequence() {
    let tree = Value::Sequence(vec![
        Value::from("Bart"),
        Value::from("Lisa"),
        Value::from("Maggie"),
    ]);
    assert_eq!(encode(&tree), "\n- Bart\n\n- Lisa\n\n- Maggie");
}

#[test]
fn test_encode_empty_mapping() {
    assert_eq!(encode(&Value::Mapping(Map::new())), "\n");
}

#[test]
fn test_roundtrip_nested_blocks() {
    let tree = map(vec![
        (
            Value::from("a"),
            map(vec![
                (Value::from("b"), Value::Integer(1)),
                (Value::from("c"), Value::Null),
            ]),
        ),
        (
            Value::from("d"),
            Value::Sequence(vec![Value::Integer(2), Value::Integer(3)]),
        ),
    ]);
    assert_eq!(decode(&encode(&tree)).unwrap(), tree);
}

#[test]
fn test_roundtrip_sequence_of_mappings() {
    let tree = Value::Sequence(vec![
        map(vec![(Value::from("x"), Value::Integer(1))]),
        map(vec![(Value::from("y"), Value::Bool(false))]),
    ]);
    assert_eq!(decode(&encode(&tree)).unwrap(), tree);
}

#[test]
fn test_encode_entity_renders_literal_form() {
    let tree = decode("entity: Column(something, type=int)").unwrap();
    assert_eq!(encode(&tree), "\nentity: Column(something, type=int)");
}
