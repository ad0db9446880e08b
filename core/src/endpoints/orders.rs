//! `orders/*` endpoints.

use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::{identifier, list, segment, to_json, to_value, By, Page};
use crate::client::RetailCrm;
use crate::error::Result;
use crate::request::{Endpoint, Filter, IdList};
use crate::response::Response;
use crate::transport::Transport;

/// Timestamp format of the history bounds.
pub const HISTORY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Arguments of `orders/history`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub limit: u32,
    pub offset: u32,
    pub skip_my_changes: bool,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            limit: 100,
            offset: 0,
            skip_my_changes: true,
        }
    }
}

pub fn list_orders(filter: &Filter, page: Page) -> Endpoint {
    list("orders", filter, page)
}

pub fn statuses(ids: &IdList) -> Endpoint {
    Endpoint::get("orders/statuses").ids(ids.clone())
}

pub fn get(id: impl Display, by: By, site: Option<&str>) -> Endpoint {
    Endpoint::get(format!("orders/{}", segment(&id.to_string())))
        .param("by", by)
        .param_opt("site", site)
}

pub fn create<T: Serialize + ?Sized>(order: &T, site: Option<&str>) -> Result<Endpoint> {
    Ok(Endpoint::post("orders/create")
        .param("order", to_json(order)?)
        .param_opt("site", site))
}

/// The path id is read from `order[by]`.
pub fn edit<T: Serialize + ?Sized>(order: &T, by: By, site: Option<&str>) -> Result<Endpoint> {
    let order = to_value(order)?;
    let id = identifier(&order, by.as_str())?;
    Ok(Endpoint::post(format!("orders/{id}/edit"))
        .param("by", by)
        .param("order", to_json(&order)?)
        .param_opt("site", site))
}

pub fn upload<T: Serialize + ?Sized>(orders: &T, site: Option<&str>) -> Result<Endpoint> {
    Ok(Endpoint::post("orders/upload")
        .param("orders", to_json(orders)?)
        .param_opt("site", site))
}

/// `orders` is a list of `{id, externalId}` pairs.
pub fn fix_external_ids<T: Serialize + ?Sized>(orders: &T) -> Result<Endpoint> {
    Ok(Endpoint::post("orders/fix-external-ids").param("orders", to_json(orders)?))
}

pub fn history(query: &HistoryQuery) -> Endpoint {
    Endpoint::get("orders/history")
        .param_opt(
            "startDate",
            query.start_date.map(|date| date.format(HISTORY_DATE_FORMAT)),
        )
        .param_opt(
            "endDate",
            query.end_date.map(|date| date.format(HISTORY_DATE_FORMAT)),
        )
        .param("limit", query.limit)
        .param("offset", query.offset)
        .param("skipMyChanges", query.skip_my_changes)
}

impl<T: Transport> RetailCrm<T> {
    /// Orders matching `filter`.
    pub fn orders(&self, filter: &Filter, page: Page) -> Result<Response> {
        self.send(list_orders(filter, page))
    }

    /// Status of each listed order.
    pub fn orders_statuses(&self, ids: &IdList) -> Result<Response> {
        self.send(statuses(ids))
    }

    pub fn orders_get(&self, id: impl Display, by: By, site: Option<&str>) -> Result<Response> {
        self.send(get(id, by, site))
    }

    pub fn orders_create<O: Serialize + ?Sized>(
        &self,
        order: &O,
        site: Option<&str>,
    ) -> Result<Response> {
        self.send(create(order, site)?)
    }

    pub fn orders_edit<O: Serialize + ?Sized>(
        &self,
        order: &O,
        by: By,
        site: Option<&str>,
    ) -> Result<Response> {
        self.send(edit(order, by, site)?)
    }

    pub fn orders_upload<O: Serialize + ?Sized>(
        &self,
        orders: &O,
        site: Option<&str>,
    ) -> Result<Response> {
        self.send(upload(orders, site)?)
    }

    /// Attach external ids to orders created inside the CRM.
    pub fn orders_fix_external_ids<O: Serialize + ?Sized>(&self, orders: &O) -> Result<Response> {
        self.send(fix_external_ids(orders)?)
    }

    pub fn orders_history(&self, query: &HistoryQuery) -> Result<Response> {
        self.send(history(query))
    }
}
