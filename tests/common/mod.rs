//! Shared fixtures for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::Json,
    http::{HeaderMap, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use doaas::catalog::{Catalog, Endpoint, Mode};
use doaas::config::ServiceConfig;
use doaas::http::HttpServer;
use doaas::routing::{Selector, ThreadRngSelector};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Small catalog covering mode pools, fallbacks and the `random` entry.
pub fn fixture_catalog() -> Catalog {
    Catalog::new(vec![
        Endpoint::new(
            "blame",
            "Blame someone",
            vec![Mode::Normal, Mode::Toxic, Mode::Chaos],
            strings(&["It was DNS.", "It was the intern.", "It was a cosmic ray."]),
        )
        .with_mode_examples(Mode::Toxic, strings(&["It was you.", "It was your PR."])),
        Endpoint::new("lgtm", "Approve a PR", vec![Mode::Normal], strings(&["Ship it."])),
        Endpoint::new(
            "motivate",
            "Pep talk",
            vec![Mode::Normal, Mode::Wholesome],
            strings(&["You got this.", "Rollback is a feature."]),
        )
        .with_mode_examples(Mode::Wholesome, strings(&["Drink some water."])),
        Endpoint::new("random", "Anything", Mode::ALL.to_vec(), strings(&["?"])),
    ])
}

#[allow(dead_code)]
pub fn app() -> Router {
    app_with(fixture_catalog(), Arc::new(ThreadRngSelector))
}

pub fn app_with(catalog: Catalog, selector: Arc<dyn Selector>) -> Router {
    HttpServer::with_selector(ServiceConfig::default(), Arc::new(catalog), selector).app()
}

/// Status, headers and body text of one in-process request.
pub async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, HeaderMap, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("host", "doaas.test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), 1_000_000)
        .await
        .unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> (StatusCode, HeaderMap, String) {
    send(app, Method::GET, uri).await
}

#[allow(dead_code)]
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

/// Start a mock JSON backend on an ephemeral port. `f` maps the request body
/// to a status and JSON response.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(Value) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = (u16, Value)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new().route(
        "/v1/moderations",
        post(move |Json(body): Json<Value>| {
            let f = f.clone();
            async move {
                let (status, body) = f(body).await;
                let response: Response =
                    (StatusCode::from_u16(status).unwrap(), Json(body)).into_response();
                response
            }
        }),
    );

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}
