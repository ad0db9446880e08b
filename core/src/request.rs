//! Turning an [`Endpoint`] into a dispatchable [`HttpRequest`].
//!
//! # Design
//! An `Endpoint` is built fresh for every call and carries everything that
//! varies per call, filter and id list included. `RequestBuilder` holds only
//! the base URL and credentials, so a client can be shared between threads
//! without one call's filter leaking into another.
//!
//! Serialization order is fixed: endpoint params in insertion order, then
//! `apiKey`, then the filter fragment, then the id-list fragment.

use std::fmt::Display;

use serde_json::Value;
use url::Url;

use crate::config::{Credentials, API_KEY_FIELD};
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, FORM_CONTENT_TYPE};

/// Ordered form fields. A `None` value is dropped at serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    fields: Vec<(String, Option<String>)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Display) {
        self.fields.push((name.into(), Some(value.to_string())));
    }

    pub fn push_opt<V: Display>(&mut self, name: impl Into<String>, value: Option<V>) {
        self.fields.push((name.into(), value.map(|v| v.to_string())));
    }

    /// Remove every field called `name`.
    pub fn remove(&mut self, name: &str) {
        self.fields.retain(|(field, _)| field != name);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(field, _)| field == name)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|(_, value)| value.is_none())
    }

    /// `application/x-www-form-urlencoded` rendering of the present fields.
    pub fn encode(&self) -> String {
        self.fields
            .iter()
            .filter_map(|(name, value)| {
                value
                    .as_ref()
                    .map(|value| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FilterValue {
    One(String),
    Any(Vec<String>),
}

/// Conjunction of equality constraints for list endpoints.
///
/// Renders as `filter[key]=value`, or `filter[key][]=value` repeated for a
/// multi-valued constraint, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    constraints: Vec<(String, FilterValue)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`.
    pub fn with(mut self, field: impl Into<String>, value: impl Display) -> Self {
        self.constraints
            .push((field.into(), FilterValue::One(value.to_string())));
        self
    }

    /// Require `field` to equal one of `values`.
    pub fn any_of<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        self.constraints.push((field.into(), FilterValue::Any(values)));
        self
    }

    /// Build a filter from a JSON object.
    ///
    /// `null` yields an empty filter and null members are skipped. Scalars
    /// become equality constraints and arrays of scalars become multi-valued
    /// ones, in the object's key order. Any other shape is rejected rather
    /// than silently dropped.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = match value {
            Value::Null => return Ok(Self::new()),
            Value::Object(object) => object,
            other => {
                return Err(ApiError::InvalidFilter(format!(
                    "expected a JSON object, got {}",
                    json_kind(other)
                )))
            }
        };

        let mut filter = Self::new();
        for (field, value) in object {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    let values = items
                        .iter()
                        .map(|item| {
                            scalar_text(item).ok_or_else(|| {
                                ApiError::InvalidFilter(format!(
                                    "`{field}` holds a nested {}",
                                    json_kind(item)
                                ))
                            })
                        })
                        .collect::<Result<Vec<_>>>()?;
                    filter = filter.any_of(field.as_str(), values);
                }
                scalar => match scalar_text(scalar) {
                    Some(text) => filter = filter.with(field.as_str(), text),
                    None => {
                        return Err(ApiError::InvalidFilter(format!(
                            "`{field}` holds a nested {}",
                            json_kind(scalar)
                        )))
                    }
                },
            }
        }
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn render(&self) -> String {
        let mut pairs = Vec::new();
        for (field, value) in &self.constraints {
            let field = urlencoding::encode(field);
            match value {
                FilterValue::One(value) => {
                    pairs.push(format!("filter[{field}]={}", urlencoding::encode(value)));
                }
                FilterValue::Any(values) => {
                    for value in values {
                        pairs.push(format!("filter[{field}][]={}", urlencoding::encode(value)));
                    }
                }
            }
        }
        pairs.join("&")
    }
}

/// Ordered identifiers for batch lookups, rendered as `ids[]=value`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdList {
    field: &'static str,
    ids: Vec<String>,
}

impl IdList {
    /// Internal CRM ids (`ids[]`).
    pub fn new<I, V>(ids: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        Self {
            field: "ids",
            ids: ids.into_iter().map(|id| id.to_string()).collect(),
        }
    }

    /// External ids (`externalIds[]`).
    pub fn external<I, V>(ids: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        Self {
            field: "externalIds",
            ..Self::new(ids)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn render(&self) -> String {
        self.ids
            .iter()
            .map(|id| format!("{}[]={}", self.field, urlencoding::encode(id)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// One call against one remote path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    /// Path relative to `/api/v5/`, identifiers already substituted.
    pub path: String,
    pub params: Params,
    pub filter: Filter,
    pub ids: IdList,
}

impl Endpoint {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Params::new(),
            filter: Filter::new(),
            ids: IdList::default(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.params.push(name, value);
        self
    }

    pub fn param_opt<V: Display>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        self.params.push_opt(name, value);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn ids(mut self, ids: IdList) -> Self {
        self.ids = ids;
        self
    }
}

/// Combines an [`Endpoint`] with the base URL and credentials.
#[derive(Debug)]
pub struct RequestBuilder {
    base_url: String,
    credentials: Credentials,
}

impl RequestBuilder {
    /// `base_url` is the versioned prefix, e.g. `https://demo.retailcrm.ru/api/v5`.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build(&self, endpoint: &Endpoint) -> Result<HttpRequest> {
        let path = endpoint.path.trim_start_matches('/');
        if path.is_empty() {
            return Err(ApiError::InvalidRequest("endpoint path is empty".to_string()));
        }
        let url = format!("{}/{path}", self.base_url);

        let mut params = endpoint.params.clone();
        params.remove(API_KEY_FIELD);
        params.push(API_KEY_FIELD, self.credentials.api_key());
        let encoded = params.encode();

        match endpoint.method {
            HttpMethod::Get => {
                let query = [encoded, endpoint.filter.render(), endpoint.ids.render()]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join("&");
                let url = format!("{url}?{query}");
                Url::parse(&url)?;
                Ok(HttpRequest {
                    method: HttpMethod::Get,
                    url,
                    headers: vec![("accept".to_string(), "application/json".to_string())],
                    body: None,
                })
            }
            HttpMethod::Post => {
                if !endpoint.filter.is_empty() || !endpoint.ids.is_empty() {
                    return Err(ApiError::InvalidRequest(format!(
                        "POST {path} cannot carry a filter or id list"
                    )));
                }
                Url::parse(&url)?;
                Ok(HttpRequest {
                    method: HttpMethod::Post,
                    url,
                    headers: vec![
                        ("accept".to_string(), "application/json".to_string()),
                        ("content-type".to_string(), FORM_CONTENT_TYPE.to_string()),
                    ],
                    body: Some(encoded),
                })
            }
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
