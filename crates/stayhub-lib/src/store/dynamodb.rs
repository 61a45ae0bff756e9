//! DynamoDB backend for [`Store`].

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_json::{Number, Value};
use tracing::debug;

use super::{Item, Key, Store, StoreError};

/// Store backed by Amazon DynamoDB tables with a single string partition key.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
}

impl DynamoStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Store for DynamoStore {
    async fn get(&self, table: &str, key: &Key) -> Result<Option<Item>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(table)
            .key(&key.attribute, AttributeValue::S(key.value.clone()))
            .send()
            .await
            .map_err(|err| backend_error("GetItem", table, err))?;

        output.item().map(attributes_to_item).transpose()
    }

    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item_to_attributes(item)))
            .send()
            .await
            .map_err(|err| backend_error("PutItem", table, err))?;
        Ok(())
    }

    async fn delete(&self, table: &str, key: &Key) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(table)
            .key(&key.attribute, AttributeValue::S(key.value.clone()))
            .send()
            .await
            .map_err(|err| backend_error("DeleteItem", table, err))?;
        Ok(())
    }

    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError> {
        let mut items = Vec::new();
        let mut start_key = None;
        let mut pages = 0usize;

        loop {
            let output = self
                .client
                .scan()
                .table_name(table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|err| backend_error("Scan", table, err))?;
            pages += 1;

            for attributes in output.items() {
                items.push(attributes_to_item(attributes)?);
            }

            match output.last_evaluated_key() {
                Some(last) if !last.is_empty() => start_key = Some(last.clone()),
                _ => break,
            }
        }

        debug!(table, pages, item_count = items.len(), "scan complete");
        Ok(items)
    }
}

fn backend_error(operation: &'static str, table: &str, err: impl std::error::Error) -> StoreError {
    StoreError::Backend {
        operation,
        table: table.to_string(),
        message: DisplayErrorContext(&err).to_string(),
    }
}

/// Convert a JSON item into DynamoDB attributes.
pub(crate) fn item_to_attributes(item: Item) -> HashMap<String, AttributeValue> {
    item.into_iter()
        .map(|(name, value)| (name, value_to_attribute(value)))
        .collect()
}

/// Convert DynamoDB attributes into a JSON item.
pub(crate) fn attributes_to_item(
    attributes: &HashMap<String, AttributeValue>,
) -> Result<Item, StoreError> {
    attributes
        .iter()
        .map(|(name, attribute)| {
            Ok::<_, StoreError>((name.clone(), attribute_to_value(name, attribute)?))
        })
        .collect()
}

fn value_to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => {
            AttributeValue::L(values.into_iter().map(value_to_attribute).collect())
        }
        Value::Object(map) => AttributeValue::M(item_to_attributes(map)),
    }
}

fn attribute_to_value(name: &str, attribute: &AttributeValue) -> Result<Value, StoreError> {
    let value = match attribute {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => Value::Number(parse_number(name, n)?),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(|v| attribute_to_value(name, v))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(attributes_to_item(map)?),
        AttributeValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| parse_number(name, n).map(Value::Number))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        _ => {
            return Err(StoreError::UnsupportedAttribute {
                attribute: name.to_string(),
                message: "binary and unknown attribute types are not supported".to_string(),
            })
        }
    };
    Ok(value)
}

fn parse_number(name: &str, raw: &str) -> Result<Number, StoreError> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Ok(Number::from(u));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| StoreError::UnsupportedAttribute {
            attribute: name.to_string(),
            message: format!("number {raw} is out of range"),
        })
}
