//! Property-based tests for the load/dump round trip.

use proptest::prelude::*;
use scdil::{dumps_with_options, load, DumpOptions, FrozenMap, Key, Mapping, Value};

fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z_][a-zA-Z0-9_]{0,8}",
        prop::collection::vec(any::<char>(), 0..12).prop_map(String::from_iter),
        "[ a-z\\n\\t\"\\\\#|>-]{0,16}",
    ]
}

fn float() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("NaN only reloads as the canonical NaN", |f| !f.is_nan())
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<i128>().prop_map(Value::from),
        float().prop_map(Value::Float),
        text().prop_map(Value::String),
    ]
}

fn key() -> impl Strategy<Value = Key> {
    let leaf = prop_oneof![
        Just(Key::Null),
        any::<bool>().prop_map(Key::Bool),
        any::<i64>().prop_map(Key::Int),
        float().prop_map(Key::Float),
        text().prop_map(Key::String),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Key::Tuple),
            prop::collection::vec((inner.clone(), inner), 0..4)
                .prop_map(|entries| Key::Map(entries.into_iter().collect::<FrozenMap>())),
        ]
    })
}

fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Sequence),
            prop::collection::vec((key(), inner.clone()), 0..6)
                .prop_map(|entries| Value::Mapping(entries.into_iter().collect::<Mapping>())),
            prop::collection::vec((text(), inner), 0..6).prop_map(|entries| {
                Value::Mapping(
                    entries
                        .into_iter()
                        .map(|(k, v)| (Key::String(k), v))
                        .collect::<Mapping>(),
                )
            }),
        ]
    })
}

/// Keys of every mapping in `value`, outer mappings first.
fn key_order(value: &Value) -> Vec<Vec<Key>> {
    let mut orders = Vec::new();
    collect_key_order(value, &mut orders);
    orders
}

fn collect_key_order(value: &Value, orders: &mut Vec<Vec<Key>>) {
    match value {
        Value::Sequence(items) => items.iter().for_each(|item| collect_key_order(item, orders)),
        Value::Mapping(map) => {
            orders.push(map.keys().cloned().collect());
            map.values().for_each(|item| collect_key_order(item, orders));
        }
        _ => {}
    }
}

proptest! {
    #[test]
    fn prop_machine_round_trip(v in value()) {
        let text = dumps_with_options(&v, DumpOptions::machine()).unwrap();
        let back = load(&text).unwrap();
        prop_assert_eq!(key_order(&back), key_order(&v));
        prop_assert_eq!(back, v);
    }

    #[test]
    fn prop_human_round_trip(v in value()) {
        let text = dumps_with_options(&v, DumpOptions::human()).unwrap();
        let back = load(&text).unwrap();
        prop_assert_eq!(key_order(&back), key_order(&v));
        prop_assert_eq!(back, v);
    }

    #[test]
    fn prop_machine_idempotent(v in value()) {
        let first = dumps_with_options(&v, DumpOptions::machine()).unwrap();
        let second = dumps_with_options(&load(&first).unwrap(), DumpOptions::machine()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_escaped_unicode_round_trip(s in text()) {
        let v = Value::String(s);
        let options = DumpOptions::human().with_escape_unicode(true);
        let text = dumps_with_options(&v, options).unwrap();
        prop_assert!(text.is_ascii());
        prop_assert_eq!(load(&text).unwrap(), v);
    }

    #[test]
    fn prop_folding_never_doubles_spaces(words in prop::collection::vec("[a-z]{1,6}", 1..8)) {
        let source: String = words.iter().map(|w| format!(">  {}  \n", w)).collect();
        let folded = load(&source).unwrap();
        prop_assert_eq!(folded, Value::String(words.join(" ")));
    }
}
