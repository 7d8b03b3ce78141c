//! Defines the page to display when a route does not exist.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// Respond with the 404 page.
pub async fn get_404_not_found() -> Response {
    let page = error_view(
        "Not Found",
        StatusCode::NOT_FOUND,
        "Página não encontrada.",
        "pt-BR",
    );

    (StatusCode::NOT_FOUND, page).into_response()
}
