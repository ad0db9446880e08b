//! `store/inventories*` endpoints: purchase prices and stock balances.

use serde::Serialize;

use super::{list, to_json, Page};
use crate::client::RetailCrm;
use crate::error::Result;
use crate::request::{Endpoint, Filter};
use crate::response::Response;
use crate::transport::Transport;

pub fn inventories(filter: &Filter, page: Page) -> Endpoint {
    list("store/inventories", filter, page)
}

/// `offers` is a list of offers, each with per-store stock and prices.
pub fn inventories_upload<T: Serialize + ?Sized>(offers: &T, site: Option<&str>) -> Result<Endpoint> {
    Ok(Endpoint::post("store/inventories/upload")
        .param("offers", to_json(offers)?)
        .param_opt("site", site))
}

impl<T: Transport> RetailCrm<T> {
    pub fn store_inventories(&self, filter: &Filter, page: Page) -> Result<Response> {
        self.send(inventories(filter, page))
    }

    pub fn store_inventories_upload<O: Serialize + ?Sized>(
        &self,
        offers: &O,
        site: Option<&str>,
    ) -> Result<Response> {
        self.send(inventories_upload(offers, site)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::http::HttpMethod;

    #[test]
    fn inventories_filter_by_product() {
        let filter = Filter::new().with("productExternalId", 26120).with("details", 1);
        let endpoint = inventories(&filter, Page::new(50, 2));
        assert_eq!(endpoint.method, HttpMethod::Get);
        assert_eq!(endpoint.path, "store/inventories");
        assert_eq!(
            endpoint.filter.render(),
            "filter[productExternalId]=26120&filter[details]=1"
        );
    }

    #[test]
    fn upload_encodes_offers_as_json() {
        let offers = json!([{
            "externalId": 123,
            "stores": [{"code": "store_1", "available": 15, "purchasePrice": 1000}]
        }]);
        let endpoint = inventories_upload(&offers, Some("main_site")).unwrap();
        assert_eq!(endpoint.method, HttpMethod::Post);
        let decoded: serde_json::Value =
            serde_json::from_str(endpoint.params.get("offers").unwrap()).unwrap();
        assert_eq!(decoded, offers);
        assert_eq!(endpoint.params.get("site"), Some("main_site"));
    }
}
