/// Builds a [`Value`](crate::Value) from flow-style literal syntax.
///
/// Mapping keys may be any literal or nested composite; composites used as
/// keys become tuples and frozen maps. Anything else is converted with
/// [`to_value`](crate::to_value), falling back to `null` if that fails.
///
/// ```rust
/// use scdil::{scdil, Key, Value};
///
/// let value = scdil!({
///     "name": "scdil",
///     [1, 2]: [true, null],
///     {"nested": 1}: 2.5
/// });
/// let map = value.as_mapping().unwrap();
/// assert_eq!(map.get("name"), Some(&Value::from("scdil")));
/// assert!(map.contains_key(&Key::Tuple(vec![Key::Int(1), Key::Int(2)])));
/// assert_eq!(map.len(), 3);
/// ```
#[macro_export]
macro_rules! scdil {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::scdil!($elem)),*])
    };

    ({}) => {
        $crate::Value::Mapping($crate::Mapping::new())
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {{
        let mut mapping = $crate::Mapping::new();
        $(
            mapping.insert($crate::scdil!($key).into_key(), $crate::scdil!($value));
        )*
        $crate::Value::Mapping(mapping)
    }};

    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}
