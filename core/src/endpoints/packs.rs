//! `orders/packs/*` endpoints: order item packing.

use std::fmt::Display;

use serde::Serialize;

use super::{identifier, list, segment, to_json, to_value, Page};
use crate::client::RetailCrm;
use crate::error::Result;
use crate::request::{Endpoint, Filter};
use crate::response::Response;
use crate::transport::Transport;

pub fn list_packs(filter: &Filter, page: Page) -> Endpoint {
    list("orders/packs", filter, page)
}

pub fn create<T: Serialize + ?Sized>(pack: &T, site: Option<&str>) -> Result<Endpoint> {
    Ok(Endpoint::post("orders/packs/create")
        .param("pack", to_json(pack)?)
        .param_opt("site", site))
}

/// Assembly history, filtered by e.g. `orderId` or `startDate`.
pub fn history(filter: &Filter, page: Page) -> Endpoint {
    list("orders/packs/history", filter, page)
}

pub fn get(id: impl Display, site: Option<&str>) -> Endpoint {
    Endpoint::get(format!("orders/packs/{}", segment(&id.to_string()))).param_opt("site", site)
}

/// Packs are always addressed by their internal `id`.
pub fn edit<T: Serialize + ?Sized>(pack: &T, site: Option<&str>) -> Result<Endpoint> {
    let pack = to_value(pack)?;
    let id = identifier(&pack, "id")?;
    Ok(Endpoint::post(format!("orders/packs/{id}/edit"))
        .param("pack", to_json(&pack)?)
        .param_opt("site", site))
}

pub fn delete(id: impl Display, site: Option<&str>) -> Endpoint {
    Endpoint::post(format!("orders/packs/{}/delete", segment(&id.to_string())))
        .param_opt("site", site)
}

impl<T: Transport> RetailCrm<T> {
    pub fn packs(&self, filter: &Filter, page: Page) -> Result<Response> {
        self.send(list_packs(filter, page))
    }

    pub fn packs_create<P: Serialize + ?Sized>(
        &self,
        pack: &P,
        site: Option<&str>,
    ) -> Result<Response> {
        self.send(create(pack, site)?)
    }

    pub fn packs_history(&self, filter: &Filter, page: Page) -> Result<Response> {
        self.send(history(filter, page))
    }

    pub fn packs_get(&self, id: impl Display, site: Option<&str>) -> Result<Response> {
        self.send(get(id, site))
    }

    pub fn packs_edit<P: Serialize + ?Sized>(
        &self,
        pack: &P,
        site: Option<&str>,
    ) -> Result<Response> {
        self.send(edit(pack, site)?)
    }

    pub fn packs_delete(&self, id: impl Display, site: Option<&str>) -> Result<Response> {
        self.send(delete(id, site))
    }
}
