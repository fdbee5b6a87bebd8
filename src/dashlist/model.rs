use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Raw field map of a record, as stored by the backend.
pub type Fields = Map<String, Value>;

pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";

/// The collections a dashboard view can be built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Blog,
    Content,
    User,
    Employee,
}

impl EntityKind {
    /// Name of the backing collection in the document store.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Blog => "blogs",
            EntityKind::Content => "content",
            EntityKind::User => "users",
            EntityKind::Employee => "employees",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blog" | "blogs" => Ok(EntityKind::Blog),
            "content" | "contents" => Ok(EntityKind::Content),
            "user" | "users" => Ok(EntityKind::User),
            "employee" | "employees" => Ok(EntityKind::Employee),
            other => Err(format!(
                "unknown collection '{}' (expected blogs, content, users or employees)",
                other
            )),
        }
    }
}

/// One domain entity fetched from the document store.
///
/// The view engine only ever reads records; mutations go through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    /// A brand new record with a generated id and creation timestamps.
    pub fn new(mut fields: Fields) -> Self {
        fields.remove("id");
        let now = Value::String(now_rfc3339());
        fields.insert(CREATED_AT.to_string(), now.clone());
        fields.insert(UPDATED_AT.to_string(), now);
        Self {
            id: Uuid::new_v4().to_string(),
            fields,
        }
    }

    pub fn with_id(id: impl Into<String>, mut fields: Fields) -> Self {
        fields.remove("id");
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Overwrite the given keys and bump `updatedAt`. The id never changes.
    pub fn apply_patch(&mut self, patch: Fields) {
        for (key, value) in patch {
            if key == "id" {
                continue;
            }
            self.fields.insert(key, value);
        }
        self.fields
            .insert(UPDATED_AT.to_string(), Value::String(now_rfc3339()));
    }

    /// Dotted-path lookup (`author.name`). `null` counts as absent.
    ///
    /// The special path `id` resolves to the record id.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.fields.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }

    /// Field as text, including the record id for the `id` path.
    pub fn text(&self, path: &str) -> Option<String> {
        if path == "id" {
            return Some(self.id.clone());
        }
        self.get_path(path).and_then(scalar_text)
    }

    /// Field coerced to a UTC timestamp, `None` meaning "never".
    pub fn timestamp(&self, path: &str) -> Option<DateTime<Utc>> {
        self.get_path(path).and_then(value_to_datetime)
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// String form of a scalar JSON value. Objects, arrays and null have none.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Coerce a stored value into a timestamp.
///
/// Accepts RFC 3339 strings, bare `YYYY-MM-DD` dates, epoch milliseconds and
/// the document store's `{seconds, nanoseconds}` objects.
pub fn value_to_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_datetime(s),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        Value::Object(obj) => {
            let seconds = obj
                .get("seconds")
                .or_else(|| obj.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = obj
                .get("nanoseconds")
                .or_else(|| obj.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            Utc.timestamp_opt(seconds, u32::try_from(nanos).ok()?).single()
        }
        _ => None,
    }
}

pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
