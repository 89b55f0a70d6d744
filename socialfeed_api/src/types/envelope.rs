use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::GENERIC_FAILURE;

/// The uniform `{success, message, data, errors}` wrapper every backend
/// response follows.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    /// Missing is treated the same as `false`.
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
    /// Field name -> list of messages, in the order the backend sent them.
    pub errors: Option<Value>,
}

impl<T> Envelope<T> {
    /// Builds the message reported when this envelope denotes a failure.
    ///
    /// Field-level errors win, joined with `", "` across every field in key
    /// order. Then the top-level `message`, then a generic fallback.
    pub fn failure_message(&self) -> String {
        if let Some(errors) = &self.errors {
            let joined = field_messages(errors).join(", ");
            if !joined.is_empty() {
                return joined;
            }
        }
        match self.message.as_deref() {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    /// Consumes the envelope, returning `data` or `err` when it is absent.
    pub fn into_data<E>(self, err: impl FnOnce() -> E) -> Result<T, E> {
        self.data.ok_or_else(err)
    }
}

/// Flattens one level: each field's list contributes its entries, a bare
/// string contributes itself.
fn field_messages(errors: &Value) -> Vec<String> {
    let fields: Vec<&Value> = match errors {
        Value::Object(map) => map.values().collect(),
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    };
    let mut out = Vec::new();
    for field in fields {
        match field {
            Value::Array(items) => out.extend(items.iter().map(value_text)),
            other => out.push(value_text(other)),
        }
    }
    out
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A paginator object. The page's items live under `data`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: Option<i64>,
    pub last_page: Option<i64>,
    pub per_page: Option<i64>,
    pub total: Option<i64>,
}
