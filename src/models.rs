use serde::{Deserialize, Deserializer, Serialize};

/// One chaser action item, as delivered by the task listing.
///
/// Every field is optional on the wire. Missing or non-string values are
/// treated as absent, so they display as empty text and rank lowest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, deserialize_with = "string_or_none")]
    pub item: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub target: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub required_for: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub source: Option<String>,
}

impl TaskRecord {
    pub fn item(&self) -> &str {
        self.item.as_deref().unwrap_or("")
    }

    pub fn priority(&self) -> &str {
        self.priority.as_deref().unwrap_or("")
    }

    pub fn state(&self) -> &str {
        self.state.as_deref().unwrap_or("")
    }

    pub fn due_date(&self) -> &str {
        self.due_date.as_deref().unwrap_or("")
    }

    pub fn action(&self) -> &str {
        self.action.as_deref().unwrap_or("")
    }

    pub fn target(&self) -> &str {
        self.target.as_deref().unwrap_or("")
    }

    pub fn required_for(&self) -> &str {
        self.required_for.as_deref().unwrap_or("")
    }

    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or("")
    }
}

/// A per-client batch of tasks. The same client may appear in several batches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBatch {
    #[serde(default, deserialize_with = "null_as_default")]
    pub client: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: Vec<TaskRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryHit {
    #[serde(default, deserialize_with = "null_as_default")]
    pub client: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAnswer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<QueryHit>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}
