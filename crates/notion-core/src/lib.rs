//! Core library for notion-lite: a narrow, read-oriented Notion API client.
//!
//! A database may expose several data sources; most callers want the first
//! one listed, so `NotionClient::query_database` resolves it before querying.
//! `DataSourceSelection` makes that choice explicit when the default is wrong.

pub mod api;
pub mod models;

pub use api::{ApiError, NotionClient, Result, API_BASE_URL, NOTION_VERSION};
pub use models::{DataSourceRef, DataSourceSelection, DatabaseSummary, FilterParams};
