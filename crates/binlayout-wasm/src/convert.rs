use binlayout::{Operation, Record, Value};
use serde_json::{Map, Number};
use wasm_bindgen::JsValue;

pub fn error_to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// `"little"` / `"big"` select a suffixed pair, anything else the generic one.
pub fn operation(order: Option<String>) -> Result<Operation, JsValue> {
    match order.as_deref() {
        None | Some("") => Ok(Operation::Generic),
        Some("little") => Ok(Operation::Ordered(binlayout::ByteOrder::Little)),
        Some("big") => Ok(Operation::Ordered(binlayout::ByteOrder::Big)),
        Some(other) => Err(JsValue::from_str(&format!("unknown byte order `{}`", other))),
    }
}

pub fn value_to_json(value: Value) -> serde_json::Value {
    match value {
        Value::U64(v) => serde_json::Value::Number(Number::from(v)),
        Value::I64(v) => serde_json::Value::Number(Number::from(v)),
        Value::Enum(s) | Value::Text(s) => serde_json::Value::String(s),
        Value::Bytes(bytes) => serde_json::Value::Array(
            bytes
                .into_iter()
                .map(|b| serde_json::Value::Number(Number::from(b)))
                .collect(),
        ),
        Value::Record(record) => serde_json::Value::Object(record_to_json(record)),
    }
}

pub fn record_to_json(record: Record) -> Map<String, serde_json::Value> {
    record
        .into_iter()
        .map(|(k, v)| (k, value_to_json(v)))
        .collect()
}

pub fn json_to_value(value: serde_json::Value) -> Result<Value, JsValue> {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Ok(Value::U64(u))
            } else if let Some(i) = n.as_i64() {
                Ok(Value::I64(i))
            } else {
                Err(JsValue::from_str(&format!("`{}` is not an integer", n)))
            }
        }
        serde_json::Value::String(s) => Ok(Value::Text(s)),
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|b| u8::try_from(b).ok())
                    .ok_or_else(|| JsValue::from_str("byte arrays must hold values 0..=255"))
            })
            .collect::<Result<Vec<u8>, _>>()
            .map(Value::Bytes),
        serde_json::Value::Object(map) => json_to_record(map).map(Value::Record),
        other => Err(JsValue::from_str(&format!("unsupported value `{}`", other))),
    }
}

pub fn json_to_record(map: Map<String, serde_json::Value>) -> Result<Record, JsValue> {
    map.into_iter()
        .map(|(k, v)| json_to_value(v).map(|v| (k, v)))
        .collect()
}
