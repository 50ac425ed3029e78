use scdil::{scdil, FrozenMap, Key, Mapping, Value};

#[test]
fn test_scdil_macro_null() {
    assert_eq!(scdil!(null), Value::Null);
}

#[test]
fn test_scdil_macro_booleans() {
    assert_eq!(scdil!(true), Value::Bool(true));
    assert_eq!(scdil!(false), Value::Bool(false));
}

#[test]
fn test_scdil_macro_numbers() {
    assert_eq!(scdil!(42), Value::Int(42));
    assert_eq!(scdil!(3.5), Value::Float(3.5));
    assert_eq!(scdil!(-123), Value::Int(-123));
    assert_eq!(
        scdil!(u64::MAX),
        Value::BigInt(num_bigint::BigInt::from(u64::MAX))
    );
}

#[test]
fn test_scdil_macro_strings() {
    assert_eq!(scdil!("hello world"), Value::from("hello world"));
    assert_eq!(scdil!(""), Value::String(String::new()));
}

#[test]
fn test_scdil_macro_sequences() {
    assert_eq!(scdil!([]), Value::Sequence(vec![]));
    assert_eq!(
        scdil!([1, "hello", true, null]),
        Value::Sequence(vec![
            Value::Int(1),
            Value::from("hello"),
            Value::Bool(true),
            Value::Null,
        ])
    );
    assert_eq!(
        scdil!([[1, 2], [], [[3]]]),
        Value::Sequence(vec![
            Value::Sequence(vec![Value::Int(1), Value::Int(2)]),
            Value::Sequence(vec![]),
            Value::Sequence(vec![Value::Sequence(vec![Value::Int(3)])]),
        ])
    );
}

#[test]
fn test_scdil_macro_mappings() {
    assert_eq!(scdil!({}), Value::Mapping(Mapping::new()));

    let value = scdil!({
        "name": "Alice",
        "age": 30,
        "tags": ["a", "b"],
        "address": {"city": "Paris"}
    });
    let map = value.as_mapping().unwrap();
    assert_eq!(map.len(), 4);
    assert!(map.has_string_keys());
    assert_eq!(map.get("name"), Some(&Value::from("Alice")));
    assert_eq!(map.get("age"), Some(&Value::Int(30)));
    let keys: Vec<_> = map.keys().filter_map(Key::as_str).collect();
    assert_eq!(keys, vec!["name", "age", "tags", "address"]);
}

#[test]
fn test_scdil_macro_composite_keys_are_frozen() {
    let value = scdil!({[1, [2]]: "tuple", {"k": [3]}: "map", 7: "int"});
    let map = value.as_mapping().unwrap();
    assert!(!map.has_string_keys());

    let tuple = Key::Tuple(vec![Key::Int(1), Key::Tuple(vec![Key::Int(2)])]);
    assert_eq!(map.get(&tuple), Some(&Value::from("tuple")));

    let frozen: FrozenMap = vec![(Key::from("k"), Key::Tuple(vec![Key::Int(3)]))]
        .into_iter()
        .collect();
    assert_eq!(map.get(&Key::Map(frozen)), Some(&Value::from("map")));
    assert_eq!(map.get(&Key::Int(7)), Some(&Value::from("int")));
}

#[test]
fn test_scdil_macro_matches_loader() {
    let loaded = scdil::load("a: [1, 2]\nb:\n  c: null\n").unwrap();
    assert_eq!(loaded, scdil!({"a": [1, 2], "b": {"c": null}}));
}
