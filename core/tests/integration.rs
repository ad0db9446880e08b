//! End-to-end tests against the mock CRM over real HTTP.
//!
//! Each test starts its own mock server on a random port, then drives the
//! client through `UreqTransport`, exactly as an application would.

use std::future::Future;
use std::net::SocketAddr;

use retailcrm_core::{ApiError, By, Filter, IdList, Page, RetailCrm};
use serde_json::json;

const KEY: &str = "test-key";

/// Serve on a random local port from a background thread.
fn spawn<F, Fut>(serve: F) -> SocketAddr
where
    F: FnOnce(tokio::net::TcpListener) -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), std::io::Error>>,
{
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            serve(listener).await
        })
        .unwrap();
    });

    addr
}

fn crm_with_key(api_key: &str) -> RetailCrm {
    let addr = spawn(|listener| mock_server::run(listener, KEY));
    RetailCrm::new(format!("http://{addr}"), api_key).unwrap()
}

fn crm() -> RetailCrm {
    crm_with_key(KEY)
}

#[test]
fn order_lifecycle() {
    let crm = crm();

    // Step 1: list, should be empty.
    let response = crm.orders(&Filter::new(), Page::default()).unwrap();
    assert!(response.is_successful());
    assert_eq!(response.payload()["orders"], json!([]));

    // Step 2: create two orders; the order record travels as a JSON string field.
    let created = crm
        .orders_create(
            &json!({"externalId": "A-1", "status": "new", "email": "a+b@example.com"}),
            Some("main"),
        )
        .unwrap();
    assert_eq!(created.status(), 201);
    assert_eq!(created.payload()["order"]["site"], "main");
    assert_eq!(created.payload()["order"]["email"], "a+b@example.com");
    let id = created.payload()["id"].as_u64().unwrap();

    crm.orders_create(&json!({"externalId": "A-2", "status": "complete"}), None)
        .unwrap();

    // Step 3: get by externalId and by internal id.
    let fetched = crm.orders_get("A-1", By::ExternalId, None).unwrap();
    assert_eq!(fetched.payload()["order"]["id"], id);
    let fetched = crm.orders_get(id, By::Id, None).unwrap();
    assert_eq!(fetched.payload()["order"]["externalId"], "A-1");

    // Step 4: edit, addressed by the record's own externalId.
    let edited = crm
        .orders_edit(
            &json!({"externalId": "A-1", "status": "assembling"}),
            By::ExternalId,
            None,
        )
        .unwrap();
    assert!(edited.is_successful());

    // Step 5: list with a filter sees only the edited order.
    let response = crm
        .orders(&Filter::new().with("status", "assembling"), Page::new(50, 1))
        .unwrap();
    let orders = response.payload()["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["externalId"], "A-1");
    assert_eq!(response.payload()["pagination"]["limit"], 50);

    // Step 6: multi-valued filter.
    let response = crm
        .orders(
            &Filter::new().any_of("status", ["assembling", "complete"]),
            Page::default(),
        )
        .unwrap();
    assert_eq!(response.payload()["orders"].as_array().unwrap().len(), 2);

    // Step 7: statuses by internal and by external id.
    let response = crm.orders_statuses(&IdList::new([id])).unwrap();
    assert_eq!(
        response.payload()["orders"],
        json!([{"id": id, "externalId": "A-1", "status": "assembling"}])
    );
    let response = crm.orders_statuses(&IdList::external(["A-2"])).unwrap();
    assert_eq!(response.payload()["orders"][0]["status"], "complete");

    // Step 8: pagination past the end.
    let response = crm.orders(&Filter::new(), Page::new(20, 2)).unwrap();
    assert_eq!(response.payload()["orders"], json!([]));
}

#[test]
fn missing_order_is_an_unsuccessful_envelope() {
    let response = crm().orders_get("nope", By::ExternalId, None).unwrap();
    assert_eq!(response.status(), 404);
    assert!(!response.is_successful());
    assert_eq!(response.error_message(), Some("Not found"));
}

#[test]
fn edit_of_unknown_order_is_rejected_remotely() {
    let response = crm()
        .orders_edit(&json!({"id": 404}), By::Id, None)
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[test]
fn wrong_api_key_is_an_unsuccessful_envelope() {
    let response = crm_with_key("wrong").countries().unwrap();
    assert_eq!(response.status(), 403);
    assert!(!response.is_successful());
    assert_eq!(response.error_message(), Some("Wrong \"apiKey\" value."));
}

#[test]
fn empty_body_becomes_empty_array() {
    let response = crm().statistic_update().unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.is_successful());
    assert_eq!(response.payload(), &json!([]));
}

#[test]
fn post_endpoints_send_form_fields_with_api_key() {
    let response = crm().packs_delete(14, Some("main")).unwrap();
    assert_eq!(response.payload()["method"], "POST");
    assert_eq!(response.payload()["path"], "/api/v5/orders/packs/14/delete");
    assert_eq!(
        response.payload()["params"],
        json!([["site", "main"], ["apiKey", KEY]])
    );
}

#[test]
fn reference_edit_posts_double_encoded_entry() {
    let entry = json!({"code": "courier", "name": "Courier & Co"});
    let response = crm().delivery_types_edit(&entry).unwrap();
    assert_eq!(
        response.payload()["path"],
        "/api/v5/reference/delivery-types/courier/edit"
    );
    let field = &response.payload()["params"][0];
    assert_eq!(field[0], "deliveryType");
    let sent: serde_json::Value = serde_json::from_str(field[1].as_str().unwrap()).unwrap();
    assert_eq!(sent, entry);
}

#[test]
fn payments_edit_strips_identifier_from_payload() {
    let response = crm()
        .payments_edit(&json!({"externalId": "pay-1", "amount": 10}), By::ExternalId, None)
        .unwrap();
    assert_eq!(
        response.payload()["path"],
        "/api/v5/orders/payments/pay-1/edit"
    );
    assert_eq!(
        response.payload()["params"],
        json!([["by", "externalId"], ["payment", "{\"amount\":10}"], ["apiKey", KEY]])
    );
}

#[test]
fn get_endpoints_send_query_with_filter_after_api_key() {
    let response = crm()
        .packs(&Filter::new().with("store", "main"), Page::new(50, 2))
        .unwrap();
    assert_eq!(response.payload()["method"], "GET");
    assert_eq!(
        response.payload()["params"],
        json!([
            ["limit", "50"],
            ["page", "2"],
            ["apiKey", KEY],
            ["filter[store]", "main"]
        ])
    );
}

#[test]
fn concurrent_calls_keep_their_own_filters() {
    let crm = crm();
    for (external_id, status) in [("A-1", "new"), ("A-2", "complete")] {
        crm.orders_create(&json!({"externalId": external_id, "status": status}), None)
            .unwrap();
    }

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let crm = &crm;
                scope.spawn(move || {
                    let (status, expected) = if i % 2 == 0 {
                        ("new", "A-1")
                    } else {
                        ("complete", "A-2")
                    };
                    let response = crm
                        .orders(&Filter::new().with("status", status), Page::default())
                        .unwrap();
                    let orders = response.payload()["orders"].as_array().unwrap().clone();
                    assert_eq!(orders.len(), 1);
                    assert_eq!(orders[0]["externalId"], expected);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    });
}

#[test]
fn malformed_body_is_an_error() {
    let addr = spawn(mock_server::run_outage);
    let crm = RetailCrm::new(format!("http://{addr}"), KEY).unwrap();
    let err = crm.sites().unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse { status: 502, .. }));
}

#[test]
fn refused_connection_is_a_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let crm = RetailCrm::new(format!("http://{addr}"), KEY).unwrap();
    let err = crm.countries().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
