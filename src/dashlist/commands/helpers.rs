use crate::config::DashConfig;
use crate::error::{DashError, Result};
use crate::model::{EntityKind, Fields};
use crate::view::{ViewController, ViewSpec};
use serde_json::Value;

/// A view for `kind` with the configured search fields, page sizes and
/// default page size applied.
pub fn build_controller(config: &DashConfig, kind: EntityKind) -> Result<ViewController> {
    let mut spec = ViewSpec::for_kind(kind);
    if let Some(fields) = config.search_fields_for(kind) {
        spec = spec.with_search_fields(fields.to_vec());
    }
    let mut view = ViewController::new(spec).with_page_sizes(config.page_sizes.clone());
    view.set_page_size(config.default_page_size)?;
    Ok(view)
}

/// Parse user-supplied JSON into a field map. Only objects are accepted.
pub fn parse_fields(input: &str) -> Result<Fields> {
    match serde_json::from_str::<Value>(input)? {
        Value::Object(fields) => Ok(fields),
        other => Err(DashError::Api(format!(
            "expected a JSON object, got {}",
            json_type(&other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
