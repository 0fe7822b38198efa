use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reference to a queryable data source, as listed in a database's `data_sources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Which data source of a database an operation should target.
///
/// Notion does not document an ordering guarantee for `data_sources`; `First`
/// is the client-side "primary" convention and the default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DataSourceSelection {
    #[default]
    First,
    Index(usize),
    Id(String),
    Name(String),
}

impl DataSourceSelection {
    /// Pick the matching data source out of a database's list.
    pub fn select<'a>(&self, sources: &'a [DataSourceRef]) -> Option<&'a DataSourceRef> {
        match self {
            DataSourceSelection::First => sources.first(),
            DataSourceSelection::Index(i) => sources.get(*i),
            DataSourceSelection::Id(id) => {
                let wanted = normalize_id(id);
                sources.iter().find(|s| normalize_id(&s.id) == wanted)
            }
            DataSourceSelection::Name(name) => {
                sources.iter().find(|s| s.name.as_deref() == Some(name.as_str()))
            }
        }
    }
}

/// Notion accepts IDs with or without dashes; compare them without.
fn normalize_id(id: &str) -> String {
    id.chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for DataSourceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceSelection::First => write!(f, "first"),
            DataSourceSelection::Index(i) => write!(f, "index:{}", i),
            DataSourceSelection::Id(id) => write!(f, "id:{}", id),
            DataSourceSelection::Name(name) => write!(f, "name:{}", name),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid data source selection '{0}' (expected first, index:N, id:ID or name:NAME)")]
pub struct ParseSelectionError(String);

impl FromStr for DataSourceSelection {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("first") {
            return Ok(DataSourceSelection::First);
        }
        let invalid = || ParseSelectionError(s.to_string());
        let (kind, value) = s.split_once(':').ok_or_else(invalid)?;
        if value.is_empty() {
            return Err(invalid());
        }
        match kind {
            "index" => value
                .parse()
                .map(DataSourceSelection::Index)
                .map_err(|_| invalid()),
            "id" => Ok(DataSourceSelection::Id(value.to_string())),
            "name" => Ok(DataSourceSelection::Name(value.to_string())),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources() -> Vec<DataSourceRef> {
        serde_json::from_value(serde_json::json!([
            {"id": "aaaa-1111", "name": "Tasks", "type": "database"},
            {"id": "bbbb2222", "name": "Archive"},
            {"id": "cccc3333"}
        ]))
        .expect("Failed to parse data source test JSON")
    }

    #[test]
    fn test_parse_data_source_ref() {
        let list = sources();
        assert_eq!(list[0].kind.as_deref(), Some("database"));
        assert_eq!(list[1].kind, None);
        assert_eq!(list[2].name, None);
    }

    #[test]
    fn test_select_first() {
        let list = sources();
        assert_eq!(DataSourceSelection::First.select(&list).map(|s| s.id.as_str()), Some("aaaa-1111"));
        assert_eq!(DataSourceSelection::First.select(&[]), None);
    }

    #[test]
    fn test_select_by_index_id_and_name() {
        let list = sources();
        assert_eq!(DataSourceSelection::Index(2).select(&list).map(|s| s.id.as_str()), Some("cccc3333"));
        assert_eq!(DataSourceSelection::Index(3).select(&list), None);

        // Dashes and case are ignored when matching IDs
        let by_id = DataSourceSelection::Id("AAAA1111".into());
        assert_eq!(by_id.select(&list).map(|s| s.id.as_str()), Some("aaaa-1111"));

        let by_name = DataSourceSelection::Name("Archive".into());
        assert_eq!(by_name.select(&list).map(|s| s.id.as_str()), Some("bbbb2222"));
        assert_eq!(DataSourceSelection::Name("archive".into()).select(&list), None);
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!("first".parse(), Ok(DataSourceSelection::First));
        assert_eq!(" FIRST ".parse(), Ok(DataSourceSelection::First));
        assert_eq!("index:1".parse(), Ok(DataSourceSelection::Index(1)));
        assert_eq!("id:abc".parse(), Ok(DataSourceSelection::Id("abc".into())));
        assert_eq!("name:My: Tasks".parse(), Ok(DataSourceSelection::Name("My: Tasks".into())));

        assert!("index:x".parse::<DataSourceSelection>().is_err());
        assert!("name:".parse::<DataSourceSelection>().is_err());
        assert!("second".parse::<DataSourceSelection>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for sel in [
            DataSourceSelection::First,
            DataSourceSelection::Index(4),
            DataSourceSelection::Id("x1".into()),
            DataSourceSelection::Name("Tasks".into()),
        ] {
            assert_eq!(sel.to_string().parse(), Ok(sel));
        }
    }
}
