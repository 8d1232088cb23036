use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_json::{Map, Number, Value};

use super::{ItemStore, StoreError};
use crate::v1::item::{Item, ID_FIELD};

/// DynamoDB-backed store bound to a single table keyed by `id`.
#[derive(Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl ItemStore for DynamoStore {
    async fn scan(&self) -> Result<Vec<Item>, StoreError> {
        self.client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| StoreError::ScanFail(format!("{:?}", e.into_source())))?
            .items()
            .iter()
            .map(record_to_item)
            .collect()
    }

    async fn get(&self, id: &str) -> Result<Option<Item>, StoreError> {
        self.client
            .get_item()
            .table_name(&self.table_name)
            .key(ID_FIELD, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::GetFail(format!("{:?}", e.into_source())))?
            .item()
            .map(record_to_item)
            .transpose()
    }

    async fn put(&self, item: Item) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_to_record(&item)?))
            .send()
            .await
            .map_err(|e| StoreError::PutFail(format!("{:?}", e.into_source())))?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(ID_FIELD, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::DeleteFail(format!("{:?}", e.into_source())))?;
        Ok(())
    }
}

fn record_to_item(record: &HashMap<String, AttributeValue>) -> Result<Item, StoreError> {
    let mut fields = Map::new();
    for (name, attribute) in record {
        fields.insert(name.clone(), attribute_to_value(attribute)?);
    }
    Ok(Item::new(fields))
}

fn item_to_record(item: &Item) -> Result<HashMap<String, AttributeValue>, StoreError> {
    item.fields()
        .iter()
        .map(|(name, field)| Ok((name.clone(), value_to_attribute(field)?)))
        .collect()
}

fn attribute_to_value(attribute: &AttributeValue) -> Result<Value, StoreError> {
    match attribute {
        AttributeValue::S(text) => Ok(Value::String(text.clone())),
        AttributeValue::Bool(flag) => Ok(Value::Bool(*flag)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::N(digits) => number_value(digits),
        AttributeValue::L(entries) => entries
            .iter()
            .map(attribute_to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(entries) => {
            let mut fields = Map::new();
            for (name, entry) in entries {
                fields.insert(name.clone(), attribute_to_value(entry)?);
            }
            Ok(Value::Object(fields))
        }
        AttributeValue::Ss(values) => Ok(Value::Array(
            values.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|digits| number_value(digits))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Err(StoreError::Encoding(format!("{:?}", other))),
    }
}

fn value_to_attribute(value: &Value) -> Result<AttributeValue, StoreError> {
    match value {
        Value::String(text) => Ok(AttributeValue::S(text.clone())),
        Value::Bool(flag) => Ok(AttributeValue::Bool(*flag)),
        Value::Null => Ok(AttributeValue::Null(true)),
        Value::Number(number) => Ok(AttributeValue::N(number.to_string())),
        Value::Array(entries) => entries
            .iter()
            .map(value_to_attribute)
            .collect::<Result<Vec<_>, _>>()
            .map(AttributeValue::L),
        Value::Object(fields) => {
            let mut entries = HashMap::new();
            for (name, field) in fields {
                entries.insert(name.clone(), value_to_attribute(field)?);
            }
            Ok(AttributeValue::M(entries))
        }
    }
}

/// Table numbers are arbitrary-precision decimal strings. Integral values
/// decode to integer JSON numbers, the rest to f64.
fn number_value(digits: &str) -> Result<Value, StoreError> {
    if let Ok(whole) = digits.parse::<i64>() {
        return Ok(Value::Number(Number::from(whole)));
    }
    let real = digits
        .parse::<f64>()
        .map_err(|err| StoreError::Encoding(format!("bad number {}: {}", digits, err)))?;
    Number::from_f64(real)
        .map(Value::Number)
        .ok_or_else(|| StoreError::Encoding(format!("unrepresentable number: {}", digits)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integral_decimals_decode_as_integers() {
        assert_eq!(number_value("5").unwrap(), json!(5));
        assert_eq!(number_value("5.0").unwrap(), json!(5.0));
        assert_eq!(number_value("-12").unwrap(), json!(-12));
        assert_eq!(number_value("2.5").unwrap(), json!(2.5));
        assert!(number_value("not-a-number").is_err());
    }

    #[test]
    fn record_conversion_round_trips() {
        let item = Item::parse(
            "{\"id\":\"a1\",\"name\":\"widget\",\"count\":5,\"live\":true,\
             \"tags\":[\"x\",2],\"dims\":{\"depth\":3},\"gone\":null}",
        )
        .unwrap();
        let record = item_to_record(&item).unwrap();
        assert_eq!(
            record.get("id"),
            Some(&AttributeValue::S("a1".to_string()))
        );
        assert_eq!(record.get("count"), Some(&AttributeValue::N("5".to_string())));
        let back = record_to_item(&record).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn string_sets_read_back_as_arrays() {
        let attribute = AttributeValue::Ss(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(attribute_to_value(&attribute).unwrap(), json!(["a", "b"]));
    }

    #[test]
    fn binary_attributes_are_an_encoding_error() {
        let attribute = AttributeValue::B(aws_sdk_dynamodb::primitives::Blob::new(vec![1u8]));
        assert!(matches!(
            attribute_to_value(&attribute),
            Err(StoreError::Encoding(_))
        ));
    }
}
