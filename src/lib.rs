//! Finance Dashboard is a web app that shows an overview of your personal
//! finances.
//!
//! <br>
//!
//! The server fetches the transaction list and the aggregate balance from a
//! backend REST API, formats the amounts and dates, and serves the result as
//! HTML pages with summary cards and a transactions table.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::http::StatusCode;
use axum_server::Handle;
use tokio::signal;
use tokio_util::sync::CancellationToken;

mod api;
mod app_state;
mod config;
mod currency;
mod dashboard;
mod date;
mod endpoints;
mod header;
mod html;
mod logging;
mod normalize;
mod not_found;
mod routing;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use api::{
    ApiClient, Category, RawBalance, RawTransaction, TransactionType, TransactionsResponse,
};
pub use app_state::AppState;
pub use config::{DEFAULT_DATE_FORMAT, FormatConfig, Locale};
pub use currency::format_currency;
pub use dashboard::{DashboardView, ViewState};
pub use date::format_date;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use normalize::{
    Dashboard, DisplayBalance, DisplayTransaction, normalize_balance, normalize_response,
    normalize_transaction,
};
pub use routing::build_router;
pub use timezone::Timezone;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`. `shutdown` is cancelled before
/// the server starts draining so that in-flight dashboard fetches are abandoned.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>, shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
        },
    }

    shutdown.cancel();
    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}

/// The errors that may occur in the application.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// The base URL of the transactions API could not be used.
    ///
    /// Callers should pass in the offending URL and the reason it was rejected.
    #[error("invalid API URL \"{0}\": {1}")]
    InvalidApiUrl(String, String),

    /// The request to the transactions API failed before a response was
    /// received, e.g. the connection was refused or the request timed out.
    #[error("could not reach the transactions API: {0}")]
    ApiRequest(String),

    /// The transactions API responded with a non-2xx status code.
    #[error("the transactions API responded with status {0}")]
    ApiStatus(u16),

    /// The transactions API responded with a body that does not have the
    /// expected shape.
    #[error("could not parse the transactions API response: {0}")]
    InvalidResponse(String),

    /// An amount could not be converted to a number, or is not finite.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// A transaction date could not be parsed as an ISO 8601 date.
    ///
    /// Callers should pass in the date string that caused the error and the
    /// original error as a string.
    #[error("could not parse the date \"{0}\": {1}")]
    InvalidDate(String, String),

    /// The date format description is invalid or cannot format a date.
    #[error("invalid date format \"{0}\": {1}")]
    InvalidDateFormat(String, String),

    /// The canonical timezone name does not refer to a known timezone.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The currency symbol cannot be used as a prefix for amounts, e.g. it is too long.
    #[error("invalid currency symbol \"{0}\"")]
    InvalidCurrencySymbol(String),

    /// The locale is not one of the supported locales.
    #[error("unsupported locale \"{0}\"")]
    InvalidLocale(String),

    /// The work was abandoned because the view was unmounted or the server is
    /// shutting down.
    #[error("the request was cancelled")]
    Cancelled,
}

impl Error {
    /// The HTTP status code to respond with when this error ends a request.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::ApiRequest(_) | Error::ApiStatus(_) | Error::InvalidResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
