use scdil::{
    from_str, from_value, to_string, to_string_with_options, to_value, Category, DumpOptions,
    Error, Key, Value,
};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u64,
    customer: User,
    items: Vec<Product>,
    notes: Option<String>,
    total: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Event {
    Started,
    Progress(u8),
    Moved(i32, i32),
    Finished { code: i32, message: String },
}

fn sample_order() -> Order {
    Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        notes: Some("leave at the door\nring twice".to_string()),
        total: 109.97,
    }
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let text = to_string(&user).unwrap();
    assert_eq!(
        text,
        "id: 123\nname: \"Alice\"\nactive: true\ntags:\n  - \"admin\"\n  - \"developer\"\n"
    );
    let user_back: User = from_str(&text).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct_both_modes() {
    let order = sample_order();
    for options in [DumpOptions::human(), DumpOptions::machine()] {
        let text = to_string_with_options(&order, options).unwrap();
        let order_back: Order = from_str(&text).unwrap();
        assert_eq!(order, order_back);
    }
}

#[test]
fn test_enum_representation() {
    let events = vec![
        Event::Started,
        Event::Progress(50),
        Event::Moved(-1, 2),
        Event::Finished {
            code: 0,
            message: "ok".to_string(),
        },
    ];
    let text = to_string_with_options(&events, DumpOptions::machine()).unwrap();
    assert_eq!(
        text,
        "[\"Started\",{\"Progress\":50},{\"Moved\":[-1,2]},{\"Finished\":{\"code\":0,\"message\":\"ok\"}}]"
    );
    let back: Vec<Event> = from_str(&text).unwrap();
    assert_eq!(back, events);

    let human = to_string(&events).unwrap();
    let back: Vec<Event> = from_str(&human).unwrap();
    assert_eq!(back, events);
}

#[test]
fn test_map_with_tuple_keys() {
    let mut grid = HashMap::new();
    grid.insert((0u8, 1u8), "a".to_string());
    grid.insert((2, 3), "b".to_string());

    let value = to_value(&grid).unwrap();
    let map = value.as_mapping().unwrap();
    assert_eq!(
        map.get(&Key::Tuple(vec![Key::Int(2), Key::Int(3)])),
        Some(&Value::from("b"))
    );

    let text = to_string(&grid).unwrap();
    let back: HashMap<(u8, u8), String> = from_str(&text).unwrap();
    assert_eq!(back, grid);
}

#[test]
fn test_wide_integers() {
    let values = vec![u64::MAX as u128, u128::MAX, 0];
    let text = to_string_with_options(&values, DumpOptions::machine()).unwrap();
    assert_eq!(
        text,
        "[18446744073709551615,340282366920938463463374607431768211455,0]"
    );
    let back: Vec<u128> = from_str(&text).unwrap();
    assert_eq!(back, values);

    let signed: i128 = from_str("-170141183460469231731687303715884105728").unwrap();
    assert_eq!(signed, i128::MIN);
}

#[test]
fn test_special_floats() {
    let floats = vec![f64::INFINITY, f64::NEG_INFINITY, 0.5];
    let text = to_string_with_options(&floats, DumpOptions::machine()).unwrap();
    assert_eq!(text, "[inf,-inf,0.5]");
    let back: Vec<f64> = from_str(&text).unwrap();
    assert_eq!(back, floats);

    let nan: f64 = from_str("nan").unwrap();
    assert!(nan.is_nan());
}

#[test]
fn test_options_and_units() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Marker;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Holder {
        marker: Marker,
        missing: Option<i32>,
        present: Option<i32>,
        unit: (),
    }

    let holder = Holder {
        marker: Marker,
        missing: None,
        present: Some(1),
        unit: (),
    };
    let text = to_string(&holder).unwrap();
    assert_eq!(text, "marker: null\nmissing: null\npresent: 1\nunit: null\n");
    assert_eq!(from_str::<Holder>(&text).unwrap(), holder);
}

#[test]
fn test_byte_arrays_are_unsupported() {
    struct Blob;

    impl Serialize for Blob {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_bytes(&[1, 2, 3])
        }
    }

    let err = to_string(&Blob).unwrap_err();
    assert!(matches!(err, Error::UnsupportedType(_)));
    assert_eq!(err.category(), Category::Dump);
}

#[test]
fn test_type_mismatch() {
    let err = from_str::<User>("id: \"not a number\"\n").unwrap_err();
    assert_eq!(err.category(), Category::Data);

    let err = from_str::<User>("id: [\n").unwrap_err();
    assert!(err.is_syntax());
}

#[test]
fn test_value_serde_round_trip() {
    let value = scdil::scdil!({"a": [1, 2.5, null], "b": {"c": true}});
    let text = to_string(&value).unwrap();
    let back: Value = from_str(&text).unwrap();
    assert_eq!(back, value);

    let ordered: BTreeMap<String, Value> = from_value(value).unwrap();
    assert_eq!(ordered.keys().collect::<Vec<_>>(), vec!["a", "b"]);
}
