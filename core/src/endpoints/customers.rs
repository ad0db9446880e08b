//! `customers/*` endpoints.

use std::fmt::Display;

use serde::Serialize;

use super::{identifier, list, segment, to_json, to_value, By, Page};
use crate::client::RetailCrm;
use crate::error::Result;
use crate::request::{Endpoint, Filter};
use crate::response::Response;
use crate::transport::Transport;

pub fn list_customers(filter: &Filter, page: Page) -> Endpoint {
    list("customers", filter, page)
}

pub fn get(id: impl Display, by: By, site: Option<&str>) -> Endpoint {
    Endpoint::get(format!("customers/{}", segment(&id.to_string())))
        .param("by", by)
        .param_opt("site", site)
}

pub fn create<T: Serialize + ?Sized>(customer: &T, site: Option<&str>) -> Result<Endpoint> {
    Ok(Endpoint::post("customers/create")
        .param("customer", to_json(customer)?)
        .param_opt("site", site))
}

/// The path id is read from `customer[by]`.
pub fn edit<T: Serialize + ?Sized>(customer: &T, by: By, site: Option<&str>) -> Result<Endpoint> {
    let customer = to_value(customer)?;
    let id = identifier(&customer, by.as_str())?;
    Ok(Endpoint::post(format!("customers/{id}/edit"))
        .param("by", by)
        .param("customer", to_json(&customer)?)
        .param_opt("site", site))
}

pub fn upload<T: Serialize + ?Sized>(customers: &T, site: Option<&str>) -> Result<Endpoint> {
    Ok(Endpoint::post("customers/upload")
        .param("customers", to_json(customers)?)
        .param_opt("site", site))
}

pub fn fix_external_ids<T: Serialize + ?Sized>(customers: &T) -> Result<Endpoint> {
    Ok(Endpoint::post("customers/fix-external-ids").param("customers", to_json(customers)?))
}

impl<T: Transport> RetailCrm<T> {
    pub fn customers(&self, filter: &Filter, page: Page) -> Result<Response> {
        self.send(list_customers(filter, page))
    }

    pub fn customers_get(&self, id: impl Display, by: By, site: Option<&str>) -> Result<Response> {
        self.send(get(id, by, site))
    }

    pub fn customers_create<C: Serialize + ?Sized>(
        &self,
        customer: &C,
        site: Option<&str>,
    ) -> Result<Response> {
        self.send(create(customer, site)?)
    }

    pub fn customers_edit<C: Serialize + ?Sized>(
        &self,
        customer: &C,
        by: By,
        site: Option<&str>,
    ) -> Result<Response> {
        self.send(edit(customer, by, site)?)
    }

    pub fn customers_upload<C: Serialize + ?Sized>(
        &self,
        customers: &C,
        site: Option<&str>,
    ) -> Result<Response> {
        self.send(upload(customers, site)?)
    }

    pub fn customers_fix_external_ids<C: Serialize + ?Sized>(
        &self,
        customers: &C,
    ) -> Result<Response> {
        self.send(fix_external_ids(customers)?)
    }
}
