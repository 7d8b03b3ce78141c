//! Client for the backend transactions API.
//!
//! The backend exposes `GET /transactions`, which responds with every
//! transaction and the aggregate balance:
//!
//! ```json
//! {
//!   "transactions": [
//!     {
//!       "id": "1",
//!       "title": "Salary",
//!       "value": 5000,
//!       "type": "income",
//!       "category": { "title": "Job" },
//!       "created_at": "2020-05-01T00:00:00.000Z"
//!     }
//!   ],
//!   "balance": { "income": "5000", "outcome": "0", "total": "5000" }
//! }
//! ```

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Deserializer, Serialize};
use tokio_util::sync::CancellationToken;

use crate::Error;

/// The path of the transactions endpoint, relative to the API base URL.
const TRANSACTIONS_PATH: &str = "transactions";

/// Whether a transaction added money or took it away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in.
    Income,
    /// Money going out.
    Outcome,
}

impl TransactionType {
    /// The name used by the API, also used as a CSS class.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Outcome => "outcome",
        }
    }
}

/// The category a transaction was filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The name of the category, e.g. "Food".
    pub title: String,
}

/// A transaction exactly as received from the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTransaction {
    /// The ID assigned by the backend.
    pub id: String,
    /// A short description of the transaction.
    pub title: String,
    /// The amount of money. The sign is given by `type_`, not by this value.
    pub value: f64,
    /// Whether the transaction is income or an outcome.
    #[serde(rename = "type")]
    pub type_: TransactionType,
    /// The category the transaction belongs to.
    pub category: Category,
    /// When the transaction was created, as an ISO 8601 timestamp.
    pub created_at: String,
}

/// The aggregate balance exactly as received from the API.
///
/// Each field is a numeric string, e.g. "1200.50". Numbers are also accepted
/// and kept in their textual form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawBalance {
    /// The sum of all income.
    #[serde(deserialize_with = "numeric_text")]
    pub income: String,
    /// The sum of all outcomes.
    #[serde(deserialize_with = "numeric_text")]
    pub outcome: String,
    /// Income minus outcomes.
    #[serde(deserialize_with = "numeric_text")]
    pub total: String,
}

/// The body of the response to `GET /transactions`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionsResponse {
    /// Every transaction, in the order the backend sent them.
    pub transactions: Vec<RawTransaction>,
    /// The aggregate balance over all transactions.
    pub balance: RawBalance,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumericText {
    Text(String),
    Number(serde_json::Number),
}

fn numeric_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumericText::deserialize(deserializer)? {
        NumericText::Text(text) => text,
        NumericText::Number(number) => number.to_string(),
    })
}

/// Fetches transactions from the backend API.
///
/// Cloning is cheap, the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    transactions_url: Url,
}

impl ApiClient {
    /// Create a client for the API hosted at `base_url`, e.g. "http://localhost:3333".
    ///
    /// Requests that take longer than `timeout` fail with [Error::ApiRequest].
    ///
    /// # Errors
    /// Returns [Error::InvalidApiUrl] if `base_url` is not an absolute HTTP(S) URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let mut url = Url::parse(base_url)
            .map_err(|error| Error::InvalidApiUrl(base_url.to_owned(), error.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::InvalidApiUrl(
                base_url.to_owned(),
                format!("unsupported scheme \"{}\"", url.scheme()),
            ));
        }

        // Without a trailing slash, joining would replace the last path segment.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let transactions_url = url
            .join(TRANSACTIONS_PATH)
            .map_err(|error| Error::InvalidApiUrl(base_url.to_owned(), error.to_string()))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .inspect_err(|error| tracing::error!("could not create HTTP client: {error}"))
            .map_err(|error| Error::ApiRequest(error.to_string()))?;

        tracing::info!("Transactions API client initialized: {transactions_url}");

        Ok(Self {
            client,
            transactions_url,
        })
    }

    /// The full URL of the transactions endpoint.
    pub fn transactions_url(&self) -> &Url {
        &self.transactions_url
    }

    /// Fetch every transaction and the aggregate balance with a single request.
    ///
    /// There is no retry. If `cancel` is cancelled before the response
    /// arrives, the request is dropped.
    ///
    /// # Errors
    /// - [Error::ApiRequest] if the request could not be sent or timed out,
    /// - [Error::ApiStatus] if the API responded with a non-2xx status code,
    /// - [Error::InvalidResponse] if the response body has the wrong shape,
    /// - [Error::Cancelled] if `cancel` was cancelled first.
    pub async fn get_transactions(
        &self,
        cancel: &CancellationToken,
    ) -> Result<TransactionsResponse, Error> {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                tracing::debug!("Request to {} was cancelled", self.transactions_url);
                Err(Error::Cancelled)
            }
            result = self.fetch_transactions() => result,
        }
    }

    async fn fetch_transactions(&self) -> Result<TransactionsResponse, Error> {
        tracing::debug!("Fetching transactions from {}", self.transactions_url);

        let response = self
            .client
            .get(self.transactions_url.clone())
            .send()
            .await
            .inspect_err(|error| tracing::error!("could not reach the transactions API: {error}"))
            .map_err(|error| Error::ApiRequest(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                "the transactions API at {} responded with status {status}",
                self.transactions_url
            );
            return Err(Error::ApiStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .inspect_err(|error| tracing::error!("could not read the transactions response: {error}"))
            .map_err(|error| Error::ApiRequest(error.to_string()))?;

        serde_json::from_slice(&body)
            .inspect_err(|error| tracing::error!("could not parse the transactions response: {error}"))
            .map_err(|error| Error::InvalidResponse(error.to_string()))
    }
}
