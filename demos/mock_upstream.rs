//! Stand-in for the upstream feed, for running the proxy locally:
//!
//! ```text
//! cargo run --example mock_upstream
//! cargo run -- --config demos/local.toml
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

async fn feed(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    let api = params.get("api").map(String::as_str).unwrap_or_default();
    match (api, params.get("key")) {
        ("lc79_hu", _) => (
            StatusCode::OK,
            Json(json!({"phien": 1024, "xuc_xac": [3, 5, 6], "ket_qua": "Tai"})),
        ),
        ("lc79_md5", Some(_)) => (
            StatusCode::OK,
            Json(json!({"phien": 2048, "md5": "9e107d9d372bb6826bd81d3542a419d6"})),
        ),
        ("lc79_md5", None) => (StatusCode::FORBIDDEN, Json(json!({"error": "key required"}))),
        _ => (StatusCode::NOT_FOUND, Json(json!({"error": "unknown api"}))),
    }
}

#[tokio::main]
async fn main() {
    let app = Router::new().route("/", get(feed));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8081));
    println!("Mock upstream listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
