//! Per-endpoint argument shaping.
//!
//! Every submodule exposes pure constructors returning an [`Endpoint`] and
//! extends [`RetailCrm`](crate::RetailCrm) with methods that send them.
//! Structured records are accepted as any `Serialize` value and encoded to
//! a JSON string inside a single form field, which is what the CRM expects.

pub mod customers;
pub mod orders;
pub mod packs;
pub mod payments;
pub mod reference;
pub mod statistic;
pub mod store;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::request::{Endpoint, Filter};

/// Which identifier a path segment holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum By {
    Id,
    #[default]
    ExternalId,
}

impl By {
    pub fn as_str(self) -> &'static str {
        match self {
            By::Id => "id",
            By::ExternalId => "externalId",
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `limit`/`page` of a list call. The CRM accepts limits of 20, 50 or 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub page: u32,
}

impl Page {
    pub fn new(limit: u32, page: u32) -> Self {
        Self { limit, page }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { limit: 20, page: 1 }
    }
}

/// GET `path` with pagination and a filter.
pub(crate) fn list(path: &str, filter: &Filter, page: Page) -> Endpoint {
    Endpoint::get(path)
        .param("limit", page.limit)
        .param("page", page.page)
        .filter(filter.clone())
}

pub(crate) fn to_value<T: Serialize + ?Sized>(record: &T) -> Result<Value> {
    serde_json::to_value(record).map_err(ApiError::Serialization)
}

pub(crate) fn to_json<T: Serialize + ?Sized>(record: &T) -> Result<String> {
    serde_json::to_string(record).map_err(ApiError::Serialization)
}

/// Read `field` from a record as a path segment.
///
/// Strings are used verbatim and numbers in decimal; the result is
/// percent-encoded so it stays one segment.
pub(crate) fn identifier(record: &Value, field: &str) -> Result<String> {
    let raw = match record.get(field) {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => {
            return Err(ApiError::MissingIdentifier {
                field: field.to_string(),
            })
        }
    };
    Ok(segment(&raw))
}

/// Percent-encode a caller-supplied id for use as one path segment.
pub(crate) fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}
