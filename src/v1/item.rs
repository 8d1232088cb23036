use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

pub const ID_FIELD: &str = "id";

/// Schema-less record keyed by its `id` field. Only JSON objects qualify;
/// no other shape is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

impl Item {
    pub fn new(fields: Map<String, Value>) -> Self {
        Item(fields)
    }
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_FIELD).and_then(Value::as_str)
    }
    pub fn set_id(&mut self, id: &str) {
        self.0
            .insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    }
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Rewrites floating-point numbers with no fractional part as integers, so
/// a stored 5.0 serializes as `5`. Magnitudes outside the i64 range stay in
/// floating form; precision beyond that is out of contract.
pub fn coerce_integral_numbers(value: Value) -> Value {
    match value {
        Value::Number(number) => match number.as_f64() {
            Some(real)
                if number.is_f64()
                    && real.fract() == 0.0
                    && real >= i64::MIN as f64
                    && real <= i64::MAX as f64 =>
            {
                Value::Number(Number::from(real as i64))
            }
            _ => Value::Number(number),
        },
        Value::Array(entries) => {
            Value::Array(entries.into_iter().map(coerce_integral_numbers).collect())
        }
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(name, field)| (name, coerce_integral_numbers(field)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_accepts_objects_only() {
        assert!(Item::parse("{\"id\":\"a1\",\"name\":\"widget\"}").is_ok());
        assert!(Item::parse("[1,2,3]").is_err());
        assert!(Item::parse("\"a1\"").is_err());
        assert!(Item::parse("not json").is_err());
    }

    #[test]
    fn set_id_overwrites_body_id() {
        let mut item = Item::parse("{\"id\":\"other\",\"name\":\"widget\"}").unwrap();
        item.set_id("a1");
        assert_eq!(item.id(), Some("a1"));
    }

    #[test]
    fn integral_floats_become_integers() {
        let coerced = coerce_integral_numbers(json!({"count": 5.0, "price": 2.5}));
        assert_eq!(coerced.to_string(), "{\"count\":5,\"price\":2.5}");
    }

    #[test]
    fn coercion_recurses_into_nested_structures() {
        let coerced = coerce_integral_numbers(json!({
            "tags": [1.0, 2.0, "three"],
            "nested": {"depth": 3.0}
        }));
        assert_eq!(coerced["tags"], json!([1, 2, "three"]));
        assert_eq!(coerced["nested"]["depth"], json!(3));
    }

    #[test]
    fn plain_integers_and_strings_pass_through() {
        let original = json!({"count": 5, "name": "widget", "live": true});
        assert_eq!(coerce_integral_numbers(original.clone()), original);
    }
}
