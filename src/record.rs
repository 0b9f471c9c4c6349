//! Owned comment record built fresh from each parsed line.

use crate::date::convert_timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One comment: every field of its JSON line, with `body` cleaned and
/// `created_utc` (and, in record mode, `retrieved_on`) converted to ISO-8601.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub(crate) fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn str_field(&self, key: &str) -> &str {
        self.fields.get(key).and_then(Value::as_str).unwrap_or("")
    }

    pub fn body(&self) -> &str {
        self.str_field("body")
    }

    /// `YYYY-MM-DDTHH:MM:SS`, or `""` when the source timestamp was unusable.
    pub fn created_utc(&self) -> &str {
        self.str_field("created_utc")
    }

    /// Converted only for records yielded in record mode.
    pub fn retrieved_on(&self) -> Option<&str> {
        self.fields.get("retrieved_on").and_then(Value::as_str)
    }

    pub fn subreddit(&self) -> Option<&str> {
        self.fields.get("subreddit").and_then(Value::as_str)
    }

    pub fn author(&self) -> Option<&str> {
        self.fields.get("author").and_then(Value::as_str)
    }

    pub fn score(&self) -> Option<i64> {
        self.fields.get("score").and_then(Value::as_i64)
    }

    pub fn gilded(&self) -> Option<i64> {
        self.fields.get("gilded").and_then(Value::as_i64)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    pub fn into_body(mut self) -> String {
        match self.fields.remove("body") {
            Some(Value::String(s)) => s,
            _ => String::new(),
        }
    }

    pub(crate) fn set_body(&mut self, body: String) {
        self.fields.insert("body".to_string(), Value::String(body));
    }

    /// Replace a numeric/string epoch field with its ISO-8601 form (`""` on failure).
    pub(crate) fn convert_timestamp_field(&mut self, key: &str) {
        let iso = convert_timestamp(self.fields.get(key));
        self.fields.insert(key.to_string(), Value::String(iso));
    }
}
