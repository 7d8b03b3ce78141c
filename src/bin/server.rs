use std::{fs::OpenOptions, net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use finance_dashboard::{
    ApiClient, AppState, FormatConfig, Locale, Timezone, build_router, graceful_shutdown,
    logging_middleware,
};

/// The web server for the finance dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The base URL of the backend API, e.g. "http://localhost:3333".
    #[arg(long)]
    api_url: String,

    /// The port to serve the dashboard from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The symbol to put in front of amounts.
    #[arg(long, default_value = "$")]
    currency_symbol: String,

    /// The locale for number formatting and the page language, "en-US" or "pt-BR".
    #[arg(long, default_value = "en-US")]
    locale: String,

    /// How to display transaction dates, as a `time` format description.
    #[arg(long, default_value = finance_dashboard::DEFAULT_DATE_FORMAT)]
    date_format: String,

    /// The canonical timezone name dates are displayed in, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// How long to wait for the backend API before giving up.
    #[arg(long, default_value_t = 30)]
    api_timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let locale = Locale::from_str(&args.locale).unwrap_or_else(|error| exit_with(&error));
    let timezone = Timezone::from_name(&args.timezone).unwrap_or_else(|error| exit_with(&error));
    let format_config =
        FormatConfig::new(&args.currency_symbol, locale, &args.date_format, timezone)
            .unwrap_or_else(|error| exit_with(&error));
    let api = ApiClient::new(&args.api_url, Duration::from_secs(args.api_timeout_secs))
        .unwrap_or_else(|error| exit_with(&error));

    let shutdown = CancellationToken::new();
    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone(), shutdown.clone()));

    let state = AppState::new(api, format_config, shutdown);
    let router = build_router(state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    tracing::info!("HTTP server listening on {}", addr);
    tracing::info!("Fetching transactions from {}", args.api_url);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();
}

fn exit_with(error: &finance_dashboard::Error) -> ! {
    tracing::error!("Invalid configuration: {error}");
    eprintln!("error: {error}");
    std::process::exit(2);
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they happen.
        .on_failure(());

    router.layer(tracing_layer)
}
