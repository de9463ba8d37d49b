/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// `null`, `true` and `false` map to their values, `[..]` builds a sequence,
/// `{"name": value, ..}` builds a record with fields in the order written.
/// Anything else goes through `Value::from`.
///
/// ```rust
/// use yabe::{yabe, Value};
///
/// let value = yabe!({
///     "name": "Alice",
///     "tags": ["a", "b"],
///     "manager": null
/// });
/// assert_eq!(value.as_record().unwrap().len(), 3);
/// ```
#[macro_export]
macro_rules! yabe {
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
        $crate::Value::Sequence(::std::vec::Vec::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(::std::vec![$($crate::yabe!($elem)),*])
    };

    ({}) => {
        $crate::Value::Record($crate::Record::new())
    };

    ({ $($name:literal : $value:tt),* $(,)? }) => {{
        let mut record = $crate::Record::new();
        $(
            record.push($name, $crate::yabe!($value));
        )*
        $crate::Value::Record(record)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Record, Value};

    #[test]
    fn test_yabe_macro_scalars() {
        assert_eq!(yabe!(null), Value::Null);
        assert_eq!(yabe!(true), Value::Bool(true));
        assert_eq!(yabe!(false), Value::Bool(false));
        assert_eq!(yabe!(42), Value::Int(42));
        assert_eq!(yabe!(3.5), Value::Float(3.5));
        assert_eq!(yabe!("hello"), Value::Str("hello".to_string()));
    }

    #[test]
    fn test_yabe_macro_sequences() {
        assert_eq!(yabe!([]), Value::Sequence(vec![]));
        assert_eq!(
            yabe!([1, "two", null]),
            Value::Sequence(vec![Value::Int(1), Value::from("two"), Value::Null])
        );
    }

    #[test]
    fn test_yabe_macro_records_keep_order() {
        assert_eq!(yabe!({}), Value::Record(Record::new()));

        let value = yabe!({ "z": 1, "a": 2, "z": 3 });
        let record = value.as_record().unwrap();
        assert_eq!(record.names().collect::<Vec<_>>(), vec!["z", "a", "z"]);
    }
}
