//! `statistic/update`.

use crate::client::RetailCrm;
use crate::error::Result;
use crate::request::Endpoint;
use crate::response::Response;
use crate::transport::Transport;

pub fn update() -> Endpoint {
    Endpoint::get("statistic/update")
}

impl<T: Transport> RetailCrm<T> {
    /// Ask the CRM to recompute its statistics.
    pub fn statistic_update(&self) -> Result<Response> {
        self.send(update())
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testing::{client_with, RecordingTransport};
    use crate::http::HttpMethod;

    #[test]
    fn update_is_a_bare_get() {
        let crm = client_with(RecordingTransport::default().respond(200, ""));
        let response = crm.statistic_update().unwrap();
        assert!(response.is_successful());

        let request = crm.transport().last();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.url,
            "https://demo.retailcrm.ru/api/v5/statistic/update?apiKey=test-key"
        );
    }
}
