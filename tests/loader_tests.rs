use scdil::{load, load_reader, Category, FrozenMap, Key, LoadOptions, Position, Value};
use std::io::Cursor;

fn string(source: &str) -> String {
    match load(source).unwrap() {
        Value::String(s) => s,
        other => panic!("expected string, got {:?}", other),
    }
}

#[test]
fn test_block_mapping_document() {
    let value = load("a: 1\nb:\n  c: 1\n").unwrap();
    assert_eq!(value, scdil::scdil!({"a": 1, "b": {"c": 1}}));
}

#[test]
fn test_colon_joined_names_are_single_keys() {
    assert_eq!(load("a:b: 1\n").unwrap(), scdil::scdil!({"a:b": 1}));
    assert_eq!(
        load("ns:key: true\nplain: ns:value: 2\n").unwrap(),
        scdil::scdil!({"ns:key": true, "plain": {"ns:value": 2}})
    );
    assert!(load("key:value\n").is_err());

    let value = scdil::scdil!({"a:b": [1, 2]});
    assert_eq!(load(&scdil::dumps(&value).unwrap()).unwrap(), value);
}

#[test]
fn test_mixed_styles() {
    let source = concat!(
        "a: [1, 2, {\"a\": 1}]\n",
        "b: - - 1\n",
        "     - false\n",
        "     - 0.1\n",
        "\"c\": d: null\n",
    );
    let expected = scdil::scdil!({
        "a": [1, 2, {"a": 1}],
        "b": [[1, false, 0.1]],
        "c": {"d": null}
    });
    assert_eq!(load(source).unwrap(), expected);
}

#[test]
fn test_composite_keys() {
    let value = load("{{}: null, [1, 2, 3]: null}\n").unwrap();
    let map = value.as_mapping().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&Key::Map(FrozenMap::new())), Some(&Value::Null));
    assert_eq!(
        map.get(&Key::Tuple(vec![Key::Int(1), Key::Int(2), Key::Int(3)])),
        Some(&Value::Null)
    );
}

#[test]
fn test_literal_block_string() {
    let source = "|for i in range(10):\n|    if i % 2 == 0:\n|        print(i)\n|\n";
    assert_eq!(
        string(source),
        "for i in range(10):\n    if i % 2 == 0:\n        print(i)\n"
    );
    assert_eq!(string("|abc\n|\n|def\n"), "abc\n\ndef");
}

#[test]
fn test_folded_block_string() {
    let source = concat!(
        "        >This is a long\n",
        "        >sentence, split\n",
        "        >over many lines.\n",
        "        >\n",
        "        >And here is another\n",
        "        >long sentence.\n",
        "        ",
    );
    assert_eq!(
        string(source),
        "This is a long sentence, split over many lines.\nAnd here is another long sentence."
    );
    assert_eq!(string(">123\n>\n>\n>       jeb\n>\n"), "123\n\njeb\n");
}

#[test]
fn test_escaped_block_strings() {
    let literal = "\\|Control codes are \\x00 through \\x1F\n\\|and \\x7F through \\x9F.\n";
    assert_eq!(
        string(literal),
        "Control codes are \x00 through \x1F\nand \x7F through \u{9F}."
    );

    let folded = "\\>Control codes are \\x00 through \\x1F\n\\>and \\x7F through \\x9F.\n\\>\n";
    assert_eq!(
        string(folded),
        "Control codes are \x00 through \x1F and \x7F through \u{9F}.\n"
    );
}

#[test]
fn test_mixed_line_kinds_end_a_run() {
    // a folded run cannot continue a literal one, so the second line is trailing input
    let err = load("|a\n>b\n").unwrap_err();
    assert_eq!(err.category(), Category::Parse);
    assert_eq!(err.position(), Some(Position::new(1, 0)));
}

#[test]
fn test_column_discipline() {
    let value = load("outer:\n  - 1\n  - 2\nnext: 3\n").unwrap();
    assert_eq!(value, scdil::scdil!({"outer": [1, 2], "next": 3}));

    // a sibling one column to the right is not part of the run
    let err = load("- 1\n - 2\n").unwrap_err();
    assert_eq!(err.category(), Category::Parse);
}

#[test]
fn test_comments_and_whitespace() {
    let value = load("# header\n\nkey: 1 # trailing\n# between\nother: [1, # inside\n 2]\n").unwrap();
    assert_eq!(value, scdil::scdil!({"key": 1, "other": [1, 2]}));
}

#[test]
fn test_scalars() {
    assert_eq!(load("null").unwrap(), Value::Null);
    assert_eq!(load("  true  # yes").unwrap(), Value::Bool(true));
    assert_eq!(load("0x1F").unwrap(), Value::Int(31));
    assert_eq!(load("0o17").unwrap(), Value::Int(15));
    assert_eq!(load("0B101").unwrap(), Value::Int(5));
    assert_eq!(load("+01").unwrap(), Value::Int(1));
    assert_eq!(load("-0123.123e+123").unwrap(), Value::Float(-123.123e123));
    assert_eq!(load("+inf").unwrap(), Value::Float(f64::INFINITY));
    assert!(load("nan").unwrap().as_f64().unwrap().is_nan());
    assert_eq!(
        load("\"\\x7F\\u0Fa9\\U0001F6a6\"").unwrap(),
        Value::from("\x7F\u{0FA9}\u{1F6A6}")
    );
    assert_eq!(
        load("123456789012345678901234567890").unwrap(),
        Value::BigInt("123456789012345678901234567890".parse().unwrap())
    );
}

#[test]
fn test_block_keys_are_strings_even_when_quoted() {
    // `one` is a name, not a value
    let err = load("\"1\": one\n").unwrap_err();
    assert_eq!(err.category(), Category::Parse);

    let value = load("\"1\": \"one\"\nname: 2\n").unwrap();
    let map = value.as_mapping().unwrap();
    assert_eq!(map.get("1"), Some(&Value::from("one")));
    assert_eq!(map.get("name"), Some(&Value::Int(2)));
}

#[test]
fn test_lex_errors_carry_position() {
    let err = load("[1, $]").unwrap_err();
    assert_eq!(err.category(), Category::Lex);
    assert_eq!(err.position(), Some(Position::new(0, 4)));

    let err = load("a: \"open\n").unwrap_err();
    assert_eq!(err.category(), Category::Lex);
    assert_eq!(err.position(), Some(Position::new(0, 3)));

    for source in ["-one", "0XJ6", "0b2", "\"\\j\"", "\tvalue", "|\t\n"] {
        let err = load(source).unwrap_err();
        assert!(err.is_syntax(), "{:?} should fail to lex", source);
        assert_eq!(err.category(), Category::Lex, "{:?}", source);
    }
}

#[test]
fn test_parse_errors() {
    let err = load("").unwrap_err();
    assert_eq!(err.category(), Category::Parse);
    assert!(err.to_string().contains("expected a value"));

    let err = load("a:\n").unwrap_err();
    assert_eq!(err.category(), Category::Parse);
    assert_eq!(err.position(), Some(Position::new(1, 0)));

    let err = load("1 2").unwrap_err();
    assert!(err.to_string().contains("expected end of input"));
    assert_eq!(err.position(), Some(Position::new(0, 2)));

    let err = load("{\"a\" 1}").unwrap_err();
    assert_eq!(err.category(), Category::Parse);
}

#[test]
fn test_depth_limit() {
    let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
    let err = load(&deep).unwrap_err();
    assert_eq!(err.category(), Category::Parse);
    assert!(err.to_string().contains("nesting deeper than 128 levels"));

    let options = LoadOptions::new().with_max_depth(256);
    assert!(scdil::load_with_options(&deep, options).is_ok());
}

#[test]
fn test_load_reader() {
    let value = load_reader(Cursor::new("- 1\n- 2\n")).unwrap();
    assert_eq!(value, scdil::scdil!([1, 2]));
}
