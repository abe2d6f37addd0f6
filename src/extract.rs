// Text extractors, one per dataset shape. Each maps raw rows to plain-text
// strings, one per row, order preserved. A missing or ill-typed field is a
// schema error for the whole dataset, not a row to skip.

use serde_json::Value;

use crate::error::{Error, Result};

fn field<'a>(record: &'a Value, name: &str) -> Result<&'a Value> {
    record
        .get(name)
        .ok_or_else(|| Error::Schema(format!("record is missing field `{name}`")))
}

fn str_field<'a>(record: &'a Value, name: &str) -> Result<&'a str> {
    field(record, name)?
        .as_str()
        .ok_or_else(|| Error::Schema(format!("field `{name}` is not a string")))
}

fn array_field<'a>(record: &'a Value, name: &str) -> Result<&'a Vec<Value>> {
    field(record, name)?
        .as_array()
        .ok_or_else(|| Error::Schema(format!("field `{name}` is not an array")))
}

/// String values pass through unchanged; anything else is rendered in its
/// JSON textual form.
fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// HellaSwag rows carry the sample context in `ctx`.
pub fn hellaswag(records: &[Value]) -> Result<Vec<String>> {
    records
        .iter()
        .map(|record| field(record, "ctx").map(coerce_string))
        .collect()
}

/// ARC rows pair `question` with parallel `choices.text` / `choices.label`
/// arrays, combined as `"<question> <label>: <text> <label>: <text> ..."`.
/// The positional zip truncates to the shorter array on a length mismatch.
pub fn arc(records: &[Value]) -> Result<Vec<String>> {
    records
        .iter()
        .map(|record| {
            let question = str_field(record, "question")?;
            let choices = field(record, "choices")?;
            let texts = array_field(choices, "text")?;
            let labels = array_field(choices, "label")?;

            let joined = texts
                .iter()
                .zip(labels.iter())
                .map(|(text, label)| format!("{}: {}", coerce_string(label), coerce_string(text)))
                .collect::<Vec<_>>()
                .join(" ");

            Ok(format!("{question} {joined}"))
        })
        .collect()
}

/// SciQA nests the question text under `question.string`.
pub fn sciqa(records: &[Value]) -> Result<Vec<String>> {
    records
        .iter()
        .map(|record| {
            let question = field(record, "question")?;
            Ok(coerce_string(field(question, "string")?))
        })
        .collect()
}
