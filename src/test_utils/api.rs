//! A stand-in for the backend transactions API.

use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Serve `app` on a random local port and return its base URL.
pub(crate) async fn spawn_test_api(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test API listener");
    let address = listener
        .local_addr()
        .expect("Could not get test API address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Test API server failed");
    });

    format!("http://{address}")
}

/// A router that answers `GET /transactions` with `status` and `body`.
pub(crate) fn transactions_api(status: StatusCode, body: Value) -> Router {
    Router::new().route(
        "/transactions",
        get(move || async move { (status, Json(body)) }),
    )
}

/// One income of 5000 and one outcome of 1200, with the balance as strings.
pub(crate) fn transactions_body() -> Value {
    json!({
        "transactions": [
            {
                "id": "1",
                "title": "Salary",
                "value": 5000,
                "type": "income",
                "category": { "title": "Job" },
                "created_at": "2020-05-01T00:00:00.000Z"
            },
            {
                "id": "2",
                "title": "Rent",
                "value": 1200,
                "type": "outcome",
                "category": { "title": "House" },
                "created_at": "2020-05-02T12:30:00.000Z"
            }
        ],
        "balance": { "income": "5000", "outcome": "1200", "total": "3800" }
    })
}
