//! Implements a struct that holds the state of the web server.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{api::ApiClient, config::FormatConfig};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The client for the backend transactions API.
    pub api: ApiClient,

    /// The config that controls how amounts and dates are displayed.
    pub format_config: Arc<FormatConfig>,

    /// Cancelled when the server starts shutting down.
    ///
    /// Each dashboard view is given a child of this token, so pending fetches
    /// are abandoned on shutdown.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Create a new [AppState].
    pub fn new(api: ApiClient, format_config: FormatConfig, shutdown: CancellationToken) -> Self {
        Self {
            api,
            format_config: Arc::new(format_config),
            shutdown,
        }
    }
}
