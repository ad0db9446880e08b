//! `orders/payments/*` endpoints.

use serde::Serialize;

use super::{identifier, to_json, to_value, By};
use crate::client::RetailCrm;
use crate::error::Result;
use crate::request::Endpoint;
use crate::response::Response;
use crate::transport::Transport;

pub fn create<T: Serialize + ?Sized>(payment: &T, site: Option<&str>) -> Result<Endpoint> {
    Ok(Endpoint::post("orders/payments/create")
        .param("payment", to_json(payment)?)
        .param_opt("site", site))
}

/// The path id is `payment[by]`; that field is left out of the payload.
pub fn edit<T: Serialize + ?Sized>(payment: &T, by: By, site: Option<&str>) -> Result<Endpoint> {
    let mut payment = to_value(payment)?;
    let id = identifier(&payment, by.as_str())?;
    if let Some(fields) = payment.as_object_mut() {
        fields.remove(by.as_str());
    }
    Ok(Endpoint::post(format!("orders/payments/{id}/edit"))
        .param("by", by)
        .param("payment", to_json(&payment)?)
        .param_opt("site", site))
}

impl<T: Transport> RetailCrm<T> {
    pub fn payments_create<P: Serialize + ?Sized>(
        &self,
        payment: &P,
        site: Option<&str>,
    ) -> Result<Response> {
        self.send(create(payment, site)?)
    }

    pub fn payments_edit<P: Serialize + ?Sized>(
        &self,
        payment: &P,
        by: By,
        site: Option<&str>,
    ) -> Result<Response> {
        self.send(edit(payment, by, site)?)
    }
}
