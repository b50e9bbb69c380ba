use serde_json::Number;

use crate::Value;
pub use serde_yaml::Value as YamlValue;


impl From<YamlValue> for Value {
    fn from(yaml: YamlValue) -> Self {
        match yaml {
            YamlValue::Null => Value::Null,
            YamlValue::Bool(b) => Value::Bool(b),
            YamlValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(i.into())
                } else if let Some(u) = n.as_u64() {
                    Value::Number(u.into())
                } else {
                    n.as_f64()
                        .and_then(Number::from_f64)
                        .map_or(Value::Null, Value::Number)
                }
            },
            YamlValue::String(s) => Value::String(s),
            YamlValue::Sequence(seq) => Value::List(
                seq.into_iter()
                    .map(Value::from)
                    .collect::<_>()
            ),
            YamlValue::Mapping(obj) => Value::Map(
                obj.into_iter()
                    .filter_map(|(k, v)| map_key(k).map(|k| (k, Value::from(v))))
                    .collect::<_>()
            ),
            YamlValue::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

impl From<&YamlValue> for Value {
    fn from(yaml: &YamlValue) -> Self {
        Value::from(yaml.clone())
    }
}

// Scalar keys are stringified, other keys cannot be named from a template.
fn map_key(key: YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
