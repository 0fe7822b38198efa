use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::DataSourceRef;

#[derive(Debug, Deserialize)]
struct RichText {
    #[serde(default)]
    plain_text: String,
}

#[derive(Debug, Deserialize)]
struct DatabaseObject {
    id: String,
    #[serde(default)]
    object: Option<String>,
    #[serde(default)]
    title: Vec<RichText>,
    #[serde(default)]
    data_sources: Vec<DataSourceRef>,
    #[serde(default)]
    created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    last_edited_time: Option<DateTime<Utc>>,
}

/// Typed view over the parts of a database object worth showing to a person.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseSummary {
    pub id: String,
    pub object: Option<String>,
    pub title: String,
    pub data_sources: Vec<DataSourceRef>,
    pub created_time: Option<DateTime<Utc>>,
    pub last_edited_time: Option<DateTime<Utc>>,
}

impl DatabaseSummary {
    pub fn from_value(value: &Value) -> serde_json::Result<Self> {
        let raw = DatabaseObject::deserialize(value)?;
        Ok(Self {
            id: raw.id,
            object: raw.object,
            title: raw.title.iter().map(|t| t.plain_text.as_str()).collect(),
            data_sources: raw.data_sources,
            created_time: raw.created_time,
            last_edited_time: raw.last_edited_time,
        })
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(untitled)"
        } else {
            &self.title
        }
    }

    pub fn display_last_edited(&self) -> String {
        match self.last_edited_time {
            Some(t) => t.format("%Y-%m-%d %H:%M UTC").to_string(),
            None => "Unknown".to_string(),
        }
    }
}
