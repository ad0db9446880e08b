//! In-memory stand-in for the RetailCRM v5 API, used by the client tests.
//!
//! Orders are stored for real so create/get/edit/list round trips can be
//! checked end to end. Every other path echoes the decoded request back.
//! All routes check `apiKey` the way the CRM does.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const API_PREFIX: &str = "/api/v5";

#[derive(Debug, Default)]
pub struct Store {
    pub orders: Vec<Value>,
    next_id: u64,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct Crm {
    api_key: Arc<str>,
    db: Db,
}

type Params = Vec<(String, String)>;

pub fn app(api_key: &str) -> Router {
    let crm = Crm {
        api_key: api_key.into(),
        db: Db::default(),
    };
    Router::new()
        .route("/api/v5/orders", get(list_orders))
        .route("/api/v5/orders/create", post(create_order))
        .route("/api/v5/orders/statuses", get(order_statuses))
        // Static siblings of `orders/{id}` that are not modelled.
        .route("/api/v5/orders/upload", post(echo))
        .route("/api/v5/orders/fix-external-ids", post(echo))
        .route("/api/v5/orders/history", get(echo))
        .route("/api/v5/orders/packs", get(echo))
        .route("/api/v5/orders/{id}", get(get_order))
        .route("/api/v5/orders/{id}/edit", post(edit_order))
        .route("/api/v5/statistic/update", get(statistic_update))
        .fallback(echo)
        .with_state(crm)
}

/// A gateway in front of the CRM that has lost its upstream.
pub fn outage() -> Router {
    Router::new().fallback(|| async {
        (
            StatusCode::BAD_GATEWAY,
            "<html><body><h1>502 Bad Gateway</h1></body></html>",
        )
    })
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

pub async fn run_outage(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, outage()).await
}

fn pairs(raw: &str) -> Params {
    url::form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect()
}

fn field<'a>(params: &'a Params, name: &str) -> Option<&'a str> {
    params
        .iter()
        .rev()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn all<'a>(params: &'a Params, name: &str) -> Vec<&'a str> {
    params
        .iter()
        .filter(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .collect()
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"success": false, "errorMsg": message}))).into_response()
}

fn authorize(crm: &Crm, params: &Params) -> Result<(), Response> {
    match field(params, "apiKey") {
        Some(key) if key == &*crm.api_key => Ok(()),
        Some(_) => Err(failure(StatusCode::FORBIDDEN, "Wrong \"apiKey\" value.")),
        None => Err(failure(
            StatusCode::FORBIDDEN,
            "\"apiKey\" is missing.",
        )),
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn json_object(params: &Params, name: &str) -> Result<Value, Response> {
    let raw = field(params, name).ok_or_else(|| {
        failure(
            StatusCode::BAD_REQUEST,
            &format!("Parameter '{name}' is missing"),
        )
    })?;
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => Ok(value),
        _ => Err(failure(
            StatusCode::BAD_REQUEST,
            &format!("Parameter '{name}' must be a JSON object"),
        )),
    }
}

/// `filter[field]=v` and `filter[field][]=v` pairs, grouped by field.
fn filters(params: &Params) -> HashMap<String, Vec<String>> {
    let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
    for (key, value) in params {
        let Some(inner) = key
            .strip_prefix("filter[")
            .and_then(|rest| rest.strip_suffix(']'))
        else {
            continue;
        };
        let name = inner.strip_suffix("][").unwrap_or(inner);
        grouped
            .entry(name.to_string())
            .or_default()
            .push(value.clone());
    }
    grouped
}

fn matches(order: &Value, filters: &HashMap<String, Vec<String>>) -> bool {
    filters.iter().all(|(name, accepted)| {
        order
            .get(name)
            .and_then(text)
            .is_some_and(|actual| accepted.contains(&actual))
    })
}

fn lookup<'a>(orders: &'a mut [Value], by: &str, id: &str) -> Option<&'a mut Value> {
    orders
        .iter_mut()
        .find(|order| order.get(by).and_then(text).as_deref() == Some(id))
}

async fn list_orders(State(crm): State<Crm>, RawQuery(query): RawQuery) -> Response {
    let params = pairs(query.as_deref().unwrap_or_default());
    if let Err(rejection) = authorize(&crm, &params) {
        return rejection;
    }

    let limit = field(&params, "limit")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(20)
        .max(1);
    let page = field(&params, "page")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1);
    let filters = filters(&params);

    let store = crm.db.read().await;
    let found: Vec<&Value> = store
        .orders
        .iter()
        .filter(|order| matches(order, &filters))
        .collect();
    let total = found.len();
    let orders: Vec<&Value> = found
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .collect();

    Json(json!({
        "success": true,
        "pagination": {
            "limit": limit,
            "totalCount": total,
            "currentPage": page,
            "totalPageCount": total.div_ceil(limit),
        },
        "orders": orders,
    }))
    .into_response()
}

async fn create_order(State(crm): State<Crm>, body: String) -> Response {
    let params = pairs(&body);
    if let Err(rejection) = authorize(&crm, &params) {
        return rejection;
    }
    let mut order = match json_object(&params, "order") {
        Ok(order) => order,
        Err(rejection) => return rejection,
    };

    let mut store = crm.db.write().await;
    store.next_id += 1;
    let id = store.next_id;
    order["id"] = json!(id);
    if let Some(site) = field(&params, "site") {
        order["site"] = json!(site);
    }
    store.orders.push(order.clone());

    (
        StatusCode::CREATED,
        Json(json!({"success": true, "id": id, "order": order})),
    )
        .into_response()
}

async fn get_order(
    State(crm): State<Crm>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    let params = pairs(query.as_deref().unwrap_or_default());
    if let Err(rejection) = authorize(&crm, &params) {
        return rejection;
    }
    let by = field(&params, "by").unwrap_or("externalId");

    let mut store = crm.db.write().await;
    match lookup(&mut store.orders, by, &id) {
        Some(order) => Json(json!({"success": true, "order": order})).into_response(),
        None => failure(StatusCode::NOT_FOUND, "Not found"),
    }
}

async fn edit_order(State(crm): State<Crm>, Path(id): Path<String>, body: String) -> Response {
    let params = pairs(&body);
    if let Err(rejection) = authorize(&crm, &params) {
        return rejection;
    }
    let by = field(&params, "by").unwrap_or("externalId");
    let changes = match json_object(&params, "order") {
        Ok(changes) => changes,
        Err(rejection) => return rejection,
    };

    let mut store = crm.db.write().await;
    let Some(order) = lookup(&mut store.orders, by, &id) else {
        return failure(StatusCode::NOT_FOUND, "Not found");
    };
    if let (Some(target), Value::Object(changes)) = (order.as_object_mut(), changes) {
        for (key, value) in changes {
            if key != "id" {
                target.insert(key, value);
            }
        }
    }
    Json(json!({"success": true, "id": order["id"]})).into_response()
}

async fn order_statuses(State(crm): State<Crm>, RawQuery(query): RawQuery) -> Response {
    let params = pairs(query.as_deref().unwrap_or_default());
    if let Err(rejection) = authorize(&crm, &params) {
        return rejection;
    }
    let ids = all(&params, "ids[]");
    let external_ids = all(&params, "externalIds[]");

    let store = crm.db.read().await;
    let orders: Vec<Value> = store
        .orders
        .iter()
        .filter(|order| {
            let id = order.get("id").and_then(text);
            let external_id = order.get("externalId").and_then(text);
            id.is_some_and(|id| ids.contains(&id.as_str()))
                || external_id.is_some_and(|id| external_ids.contains(&id.as_str()))
        })
        .map(|order| {
            json!({
                "id": order["id"],
                "externalId": order["externalId"],
                "status": order["status"],
            })
        })
        .collect();

    Json(json!({"success": true, "orders": orders})).into_response()
}

/// Answers with an empty body.
async fn statistic_update(State(crm): State<Crm>, RawQuery(query): RawQuery) -> Response {
    let params = pairs(query.as_deref().unwrap_or_default());
    if let Err(rejection) = authorize(&crm, &params) {
        return rejection;
    }
    StatusCode::OK.into_response()
}

/// Reflects method, path and decoded parameters (query for GET, form body
/// for POST) as `[[name, value], ...]` in arrival order.
async fn echo(State(crm): State<Crm>, method: Method, uri: Uri, body: String) -> Response {
    let params = if method == Method::GET {
        pairs(uri.query().unwrap_or_default())
    } else {
        pairs(&body)
    };
    if let Err(rejection) = authorize(&crm, &params) {
        return rejection;
    }
    tracing::debug!(%method, path = uri.path(), "echo");

    Json(json!({
        "success": true,
        "method": method.as_str(),
        "path": uri.path(),
        "params": params,
    }))
    .into_response()
}
