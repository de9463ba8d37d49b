use yabe::{decode, encode, yabe, Blob, Record, Value};

#[test]
fn test_yabe_macro_null() {
    let value = yabe!(null);
    assert_eq!(value, Value::Null);
}

#[test]
fn test_yabe_macro_booleans() {
    let true_val = yabe!(true);
    assert_eq!(true_val, Value::Bool(true));

    let false_val = yabe!(false);
    assert_eq!(false_val, Value::Bool(false));
}

#[test]
fn test_yabe_macro_numbers() {
    let int_val = yabe!(42);
    assert_eq!(int_val, Value::Int(42));

    let float_val = yabe!(3.5);
    assert_eq!(float_val, Value::Float(3.5));

    let negative_val = yabe!(-123);
    assert_eq!(negative_val, Value::Int(-123));
}

#[test]
fn test_yabe_macro_strings() {
    let string_val = yabe!("hello world");
    assert_eq!(string_val, Value::Str("hello world".to_string()));

    let empty_string = yabe!("");
    assert_eq!(empty_string, Value::Str(String::new()));
}

#[test]
fn test_yabe_macro_sequences() {
    let empty = yabe!([]);
    assert_eq!(empty, Value::Sequence(vec![]));

    let mixed = yabe!([1, "hello", true, null]);
    assert_eq!(
        mixed,
        Value::Sequence(vec![
            Value::Int(1),
            Value::Str("hello".to_string()),
            Value::Bool(true),
            Value::Null,
        ])
    );

    let nested = yabe!([[1, 2], [3]]);
    assert_eq!(nested.as_sequence().map(<[Value]>::len), Some(2));
}

#[test]
fn test_yabe_macro_records() {
    let empty = yabe!({});
    assert_eq!(empty, Value::Record(Record::new()));

    let user = yabe!({
        "name": "Alice",
        "age": 30,
        "address": {
            "city": "Lisbon",
            "zip": "1100"
        },
    });

    let record = user.as_record().unwrap();
    assert_eq!(record.names().collect::<Vec<_>>(), vec!["name", "age", "address"]);
    assert_eq!(record.get("age"), Some(&Value::Int(30)));

    let address = record.get("address").and_then(Value::as_record).unwrap();
    assert_eq!(address.get("city").and_then(Value::as_str), Some("Lisbon"));
}

#[test]
fn test_yabe_macro_variables() {
    let name = String::from("Bob");
    let scores = vec![Value::from(1), Value::from(2)];
    let avatar = Blob::new("image/gif", vec![0x47, 0x49, 0x46]);
    let missing: Option<i32> = None;

    let value = yabe!({
        "name": name,
        "scores": scores,
        "avatar": avatar,
        "missing": missing
    });

    let record = value.as_record().unwrap();
    assert_eq!(record.get("name"), Some(&Value::from("Bob")));
    assert_eq!(record.get("scores").and_then(Value::as_sequence).map(<[Value]>::len), Some(2));
    assert!(record.get("avatar").is_some_and(Value::is_blob));
    assert_eq!(record.get("missing"), Some(&Value::Null));
}

#[test]
fn test_yabe_macro_value_roundtrips() {
    let value = yabe!({
        "id": 1,
        "ok": true,
        "items": [1.5, "x", null, {"k": 7}]
    });
    assert_eq!(decode(&encode(&value).unwrap()).unwrap(), value);
}
