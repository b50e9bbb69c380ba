use crate::Value;
pub use serde_json::Value as JsonValue;


impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(seq) => Value::List(
                seq.into_iter()
                    .map(Value::from)
                    .collect::<_>()
            ),
            JsonValue::Object(obj) => Value::Map(
                obj.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<_>()
            ),
        }
    }
}

impl From<&JsonValue> for Value {
    fn from(json: &JsonValue) -> Self {
        Value::from(json.clone())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_document() {
        let value = Value::from(json!({
            "a": { "b": [1, "two", null, true] }
        }));
        match value.get("a").and_then(|a| a.get("b")) {
            Some(Value::List(items)) => {
                let texts = items.iter().map(Value::to_text).collect::<Vec<_>>();
                assert_eq!(texts, vec!["1", "two", "", "true"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn decimal_keeps_json_formatting() {
        assert_eq!(Value::from(json!(1.210)).to_text(), "1.21");
    }
}
