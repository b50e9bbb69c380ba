use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Number;


/// Data a template is rendered against.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
    Lambda(Lambda),
}

impl Value {
    /// A lambda called without the section text.
    pub fn lambda0<T>(fun: T) -> Value
    where
        T: Fn() -> String + Send + Sync + 'static,
    {
        Value::Lambda(Lambda::Nullary(Arc::new(fun)))
    }

    /// A lambda called with the raw text of the section it guards.
    pub fn lambda1<T>(fun: T) -> Value
    where
        T: Fn(&str) -> String + Send + Sync + 'static,
    {
        Value::Lambda(Lambda::Unary(Arc::new(fun)))
    }

    /// Convert any serializable value through its JSON data model.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Value, serde_json::Error> {
        serde_json::to_value(value).map(Value::from)
    }

    /// Member access; only maps have members.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }

    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(_) | Value::Lambda(_) => false,
        }
    }

    /// Text substituted for a variable holding this value.
    pub(crate) fn to_text(&self) -> String {
        match self {
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            _ => String::new(),
        }
    }
}


/// A callable value producing template source.
#[derive(Clone)]
pub enum Lambda {
    Nullary(Arc<dyn Fn() -> String + Send + Sync>),
    Unary(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl Lambda {
    /// Variables pass no text, sections pass their raw source.
    /// A unary lambda in variable position receives an empty string and
    /// a nullary lambda guarding a section ignores the text.
    pub(crate) fn call(&self, text: Option<&str>) -> String {
        match self {
            Lambda::Nullary(fun) => fun(),
            Lambda::Unary(fun) => fun(text.unwrap_or_default()),
        }
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lambda::Nullary(_) => write!(f, "Lambda(fn())"),
            Lambda::Unary(_) => write!(f, "Lambda(fn(&str))"),
        }
    }
}


impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(map: HashMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect::<HashMap<_, _>>(),
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_values() {
        assert!(Value::Null.is_falsy());
        assert!(Value::from(false).is_falsy());
        assert!(Value::from("").is_falsy());
        assert!(Value::from(0).is_falsy());
        assert!(Value::from(0.0).is_falsy());
        assert!(Value::List(vec![]).is_falsy());
    }

    #[test]
    fn truthy_values() {
        assert!(!Value::from(true).is_falsy());
        assert!(!Value::from("0").is_falsy());
        assert!(!Value::from(-1).is_falsy());
        assert!(!Value::List(vec![Value::Null]).is_falsy());
        assert!(!Value::Map(HashMap::new()).is_falsy());
        assert!(!Value::lambda0(String::new).is_falsy());
    }

    #[test]
    fn text_of_scalars() {
        assert_eq!(Value::from(85).to_text(), "85");
        assert_eq!(Value::from(1.21).to_text(), "1.21");
        assert_eq!(Value::from(true).to_text(), "true");
        assert_eq!(Value::Null.to_text(), "");
        assert_eq!(Value::List(vec![Value::from("a")]).to_text(), "");
    }

    #[test]
    fn map_from_pairs() {
        let value = [("a", Value::from(1)), ("b", Value::from("x"))]
            .into_iter()
            .collect::<Value>();
        assert_eq!(value.get("b").map(Value::to_text), Some("x".to_owned()));
        assert!(value.get("c").is_none());
        assert!(Value::from("a").get("a").is_none());
    }

    #[test]
    fn from_serialize_struct() {
        #[derive(Serialize)]
        struct Person {
            name: &'static str,
            age: u32,
        }
        let value = Value::from_serialize(&Person { name: "Chris", age: 42 }).unwrap();
        assert_eq!(value.get("name").map(Value::to_text), Some("Chris".to_owned()));
        assert_eq!(value.get("age").map(Value::to_text), Some("42".to_owned()));
    }

    #[test]
    fn lambda_arity() {
        let nullary = Lambda::Nullary(Arc::new(|| "n".to_owned()));
        let unary = Lambda::Unary(Arc::new(|text: &str| format!("<{}>", text)));
        assert_eq!(nullary.call(Some("x")), "n");
        assert_eq!(unary.call(Some("x")), "<x>");
        assert_eq!(unary.call(None), "<>");
    }
}
