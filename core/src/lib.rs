//! Synchronous client for the RetailCRM v5 REST API.
//!
//! # Overview
//! One method per endpoint (orders, customers, store inventories, packs,
//! payments, reference dictionaries, statistics). Each builds an
//! [`Endpoint`], turns it into a plain-data [`HttpRequest`], hands that to a
//! [`Transport`] for the single round trip and wraps the result in a
//! [`Response`] envelope.
//!
//! # Design
//! - `RetailCrm` holds only its base URL, credentials and transport. Filters
//!   and id lists travel with each call.
//! - Request building and response parsing are pure; only
//!   `Transport::execute` does I/O. `UreqTransport` is the default.
//! - A remote rejection (status >= 400) is a normal `Response` whose
//!   `is_successful()` is false. Errors are reserved for transport failures,
//!   unparsable bodies and invalid arguments.
//!
//! ```no_run
//! use retailcrm_core::{Filter, Page, RetailCrm};
//!
//! let crm = RetailCrm::new("https://demo.retailcrm.ru", "api-key")?;
//! let response = crm.orders(&Filter::new().with("status", "new"), Page::new(50, 1))?;
//! if response.is_successful() {
//!     println!("{}", response.payload()["orders"]);
//! }
//! # Ok::<(), retailcrm_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod transport;

pub use client::RetailCrm;
pub use config::{ClientConfig, Credentials};
pub use endpoints::orders::HistoryQuery;
pub use endpoints::reference::Reference;
pub use endpoints::{By, Page};
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use request::{Endpoint, Filter, IdList, Params, RequestBuilder};
pub use response::Response;
pub use transport::{Transport, UreqTransport};
