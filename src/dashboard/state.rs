//! The state of one dashboard view and the task that loads it.
//!
//! A view is mounted once per page request. Mounting spawns exactly one
//! fetch. The fetch commits its result only if the view is still mounted, so a
//! response that arrives after the request was abandoned is discarded.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{
    Error,
    api::ApiClient,
    config::FormatConfig,
    normalize::{Dashboard, normalize_response},
};

/// What the dashboard view currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Nothing has been committed yet. Renders blank cards and an empty table.
    Loading,
    /// The transactions were fetched and normalized.
    Loaded(Dashboard),
    /// Fetching or normalizing failed.
    Failed(Error),
}

/// A mounted dashboard view.
///
/// Dropping the view unmounts it.
pub struct DashboardView {
    state: watch::Receiver<ViewState>,
    cancel: CancellationToken,
}

impl DashboardView {
    /// Mount a view and start loading its data in the background.
    ///
    /// `cancel` unmounts the view when cancelled, e.g. when the server shuts down.
    pub fn mount(api: ApiClient, config: Arc<FormatConfig>, cancel: CancellationToken) -> Self {
        let (sender, receiver) = watch::channel(ViewState::Loading);

        tokio::spawn(load_dashboard(api, config, cancel.clone(), sender));

        Self {
            state: receiver,
            cancel,
        }
    }

    /// The state as of now.
    pub fn current(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Wait until the load has finished and return the committed state.
    ///
    /// Returns [ViewState::Loading] if the load ended without committing,
    /// i.e. the view was unmounted first.
    pub async fn settled(&mut self) -> ViewState {
        match self
            .state
            .wait_for(|state| !matches!(state, ViewState::Loading))
            .await
        {
            Ok(state) => state.clone(),
            Err(_) => ViewState::Loading,
        }
    }

    /// Unmount the view. A load that is still running will not commit its result.
    pub fn unmount(&self) {
        self.cancel.cancel();
    }

    /// Whether the view has been unmounted.
    pub fn is_unmounted(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn load_dashboard(
    api: ApiClient,
    config: Arc<FormatConfig>,
    cancel: CancellationToken,
    sender: watch::Sender<ViewState>,
) {
    let result = api
        .get_transactions(&cancel)
        .await
        .and_then(|response| normalize_response(&response, &config));

    let state = match result {
        Ok(dashboard) => ViewState::Loaded(dashboard),
        Err(Error::Cancelled) => return,
        Err(error) => ViewState::Failed(error),
    };

    if !commit(&sender, &cancel, state) {
        tracing::debug!("Dashboard view was unmounted before it loaded, discarding the result.");
    }
}

/// Store `state` unless the view has been unmounted.
///
/// The check runs while the channel is locked, so readers never see a state
/// committed after unmounting. Returns whether `state` was stored.
fn commit(
    sender: &watch::Sender<ViewState>,
    cancel: &CancellationToken,
    state: ViewState,
) -> bool {
    sender.send_if_modified(|current| {
        if cancel.is_cancelled() {
            return false;
        }

        *current = state;
        true
    })
}
