use super::*;

fn decode(json: &str) -> Value {
    serde_json::from_str(json).unwrap()
}

#[test]
fn integers_decode_to_narrowest_type() {
    assert!(matches!(decode("7"), Value::I32(7)));
    assert!(matches!(decode("-2147483648"), Value::I32(i32::MIN)));
    assert!(matches!(decode("2147483648"), Value::I64(2_147_483_648)));
    assert!(matches!(decode("-9223372036854775808"), Value::I64(i64::MIN)));
}

#[test]
fn non_integers_decode_to_f64() {
    assert_eq!(decode("1.5"), Value::F64(1.5));
    assert_eq!(decode("2.0"), Value::F64(2.0));
    // Beyond i64: only a float holds it.
    assert_eq!(decode("18446744073709551615"), Value::F64(18_446_744_073_709_551_615.0));
}

#[test]
fn scalars_and_composites_decode_verbatim() {
    assert_eq!(decode("null"), Value::Null);
    assert_eq!(decode("true"), Value::Bool(true));
    assert_eq!(decode("\"hi\""), Value::String("hi".to_owned()));
    assert_eq!(
        decode(r#"{"a":[1,2]}"#),
        Value::Structured(serde_json::json!({"a": [1, 2]}))
    );
}

#[test]
fn composites_encode_unchanged() {
    let v = decode(r#"[1,"two",{"three":3}]"#);
    assert_eq!(serde_json::to_string(&v).unwrap(), r#"[1,"two",{"three":3}]"#);
}

#[test]
fn int_constructor_normalizes() {
    assert!(matches!(Value::int(5), Value::I32(5)));
    assert!(matches!(Value::I64(5).normalized(), Value::I32(5)));
    assert!(matches!(Value::from(5_000_000_000i64), Value::I64(5_000_000_000)));
    assert!(matches!(
        Value::Structured(serde_json::json!(true)).normalized(),
        Value::Bool(true)
    ));
    assert!(matches!(
        Value::Structured(serde_json::json!([1])).normalized(),
        Value::Structured(_)
    ));
}

#[test]
fn equality_ignores_integer_width() {
    assert_eq!(Value::I64(5), Value::I32(5));
    assert_eq!(Value::I32(-1), Value::I64(-1));
    assert_ne!(Value::I64(5), Value::I32(6));
    assert_ne!(Value::I32(5), Value::F64(5.0));
}

#[test]
fn structured_scalars_equal_their_decoded_value() {
    use serde_json::json;

    assert_eq!(Value::Structured(json!(true)), Value::Bool(true));
    assert_eq!(Value::I64(7), Value::Structured(json!(7)));
    assert_eq!(Value::Structured(json!(null)), Value::Null);
    assert_eq!(Value::Structured(json!("x")), Value::String("x".to_owned()));
    assert_ne!(Value::Structured(json!([true])), Value::Bool(true));
    assert_ne!(Value::Structured(json!(false)), Value::Bool(true));
}

#[test]
fn arithmetic_widens_instead_of_overflowing() {
    assert_eq!(
        Value::I32(i32::MAX).checked_add(&Value::I32(1)),
        Some(Value::I64(i64::from(i32::MAX) + 1))
    );
    assert_eq!(
        Value::I64(i64::MAX).checked_add(&Value::I32(1)),
        Some(Value::F64(i64::MAX as f64 + 1.0))
    );
    assert_eq!(
        Value::I32(3).checked_sub(&Value::F64(0.5)),
        Some(Value::F64(2.5))
    );
    assert_eq!(Value::Bool(true).checked_add(&Value::I32(1)), None);
}

#[derive(serde::Deserialize)]
struct Holder {
    #[serde(default, deserialize_with = "deserialize_present")]
    value: Option<Value>,
}

#[test]
fn absent_and_null_are_distinct() {
    let absent: Holder = serde_json::from_str("{}").unwrap();
    let null: Holder = serde_json::from_str(r#"{"value":null}"#).unwrap();
    assert_eq!(absent.value, None);
    assert_eq!(null.value, Some(Value::Null));
}
