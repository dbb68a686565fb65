//! Cursor key extraction.
//!
//! A timeline orders its items by a caller-designated key. The pager never
//! looks inside items except through a [`KeyFn`]; for `serde_json::Value`
//! records keyed by a named field, [`json_field`] builds one.

use std::sync::Arc;

use serde_json::Value;

/// Extracts the cursor key from an item.
pub type KeyFn<T, K> = Arc<dyn Fn(&T) -> K + Send + Sync>;

/// Key extractor for JSON object records: the value of field `name`.
///
/// Missing fields (and non-object records) key as `Value::Null`.
pub fn json_field(name: impl Into<String>) -> impl Fn(&Value) -> Value + Send + Sync + 'static {
    let name = name.into();
    move |item: &Value| item.get(&name).cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_field_reads_named_field() {
        let key = json_field("id");
        assert_eq!(key(&json!({"id": 5, "memo": "x"})), json!(5));
        assert_eq!(key(&json!({"hash": "ab"})), Value::Null);
        assert_eq!(key(&json!([1, 2])), Value::Null);
    }
}
