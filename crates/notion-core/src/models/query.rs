use serde::Serialize;
use serde_json::{Map, Value};

/// Filter, sort and pagination directives for a data source query, sent verbatim.
pub type FilterParams = Map<String, Value>;

/// Body of `POST /search`. The `query` key is left out entirely when there is
/// nothing to search for; Notion treats an absent key differently from `""`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
}

impl<'a> SearchRequest<'a> {
    pub fn new(query: &'a str) -> Self {
        Self {
            query: Some(query).filter(|q| !q.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_omits_key() {
        let body = serde_json::to_value(SearchRequest::new("")).unwrap();
        assert_eq!(body, serde_json::json!({}));

        let body = serde_json::to_value(SearchRequest::default()).unwrap();
        assert_eq!(body, serde_json::json!({}));
    }

    #[test]
    fn test_query_is_sent_as_given() {
        let body = serde_json::to_value(SearchRequest::new("foo")).unwrap();
        assert_eq!(body, serde_json::json!({"query": "foo"}));

        // Whitespace is a real query, not an empty one
        let body = serde_json::to_value(SearchRequest::new(" ")).unwrap();
        assert_eq!(body, serde_json::json!({"query": " "}));
    }
}
