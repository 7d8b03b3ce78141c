//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The page with the balance cards and the transactions table.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The route for the normalized dashboard data as JSON.
pub const DASHBOARD_API: &str = "/api/dashboard";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The icon shown on the income card.
pub const INCOME_ICON: &str = "/static/income.svg";
/// The icon shown on the outcome card.
pub const OUTCOME_ICON: &str = "/static/outcome.svg";
/// The icon shown on the total card.
pub const TOTAL_ICON: &str = "/static/total.svg";
