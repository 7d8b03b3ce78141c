//! Dashboard HTTP handlers.
//!
//! Each request mounts its own [DashboardView], waits for it to load, and
//! renders whatever the view committed.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::{
    AppState, Error,
    api::ApiClient,
    config::FormatConfig,
    dashboard::{
        state::{DashboardView, ViewState},
        view::dashboard_view,
    },
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The client for the backend transactions API.
    pub api: ApiClient,
    /// How to format amounts and dates.
    pub format_config: Arc<FormatConfig>,
    /// Cancelled when the server shuts down.
    pub shutdown: CancellationToken,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            format_config: state.format_config.clone(),
            shutdown: state.shutdown.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Display a page with the balance cards and the transactions table.
///
/// The page is rendered even when loading fails, with an alert in place of
/// the data and a status code that describes the failure.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Response {
    let view_state = load_view_state(&state).await;
    let language = state.format_config.locale().language_tag();

    (
        status_code(&view_state),
        dashboard_view(&view_state, language),
    )
        .into_response()
}

/// Get the normalized dashboard data as JSON.
pub async fn get_dashboard_json(State(state): State<DashboardState>) -> Response {
    match load_view_state(&state).await {
        ViewState::Loaded(dashboard) => Json(dashboard).into_response(),
        ViewState::Failed(error) => error_json(&error),
        ViewState::Loading => error_json(&Error::Cancelled),
    }
}

async fn load_view_state(state: &DashboardState) -> ViewState {
    let mut view = DashboardView::mount(
        state.api.clone(),
        state.format_config.clone(),
        state.shutdown.child_token(),
    );

    let view_state = view.settled().await;
    view.unmount();

    if let ViewState::Failed(error) = &view_state {
        tracing::error!("Could not load the dashboard: {error}");
    }

    view_state
}

fn status_code(view_state: &ViewState) -> StatusCode {
    match view_state {
        ViewState::Loaded(_) => StatusCode::OK,
        ViewState::Failed(error) => error.status_code(),
        ViewState::Loading => Error::Cancelled.status_code(),
    }
}

fn error_json(error: &Error) -> Response {
    (
        error.status_code(),
        Json(ErrorBody {
            error: error.to_string(),
        }),
    )
        .into_response()
}
