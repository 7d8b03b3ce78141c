//! Dashboard module
//!
//! Provides the overview page with the balance cards and the transactions
//! table, and the same data as JSON.

mod handlers;
mod state;
mod view;

pub use handlers::{get_dashboard_json, get_dashboard_page};
pub use state::{DashboardView, ViewState};
