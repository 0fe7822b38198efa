//! Data models for Notion API payloads.
//!
//! Responses are returned to callers as decoded JSON; these types cover only
//! the pieces the client has to look inside:
//!
//! - `DataSourceRef`, `DataSourceSelection`: data source descriptors and how to pick one
//! - `DatabaseSummary`: an optional typed view over a database object
//! - `SearchRequest`, `FilterParams`: request bodies

pub mod data_source;
pub mod database;
pub mod query;

pub use data_source::{DataSourceRef, DataSourceSelection, ParseSelectionError};
pub use database::DatabaseSummary;
pub use query::{FilterParams, SearchRequest};
