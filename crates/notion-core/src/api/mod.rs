//! REST API client module for the Notion API.
//!
//! This module provides the `NotionClient` for read-only access to
//! search, databases, and data sources.
//!
//! The API uses integration-token bearer authentication and a fixed
//! `Notion-Version` header pinning the API contract.

pub mod client;
pub mod error;

pub use client::{NotionClient, API_BASE_URL, NOTION_VERSION};
pub use error::{ApiError, Result};
