//! Turns the raw records from the transactions API into display records
//! with formatted amounts and dates.
//!
//! Every function here is pure: the output depends only on the input record
//! and the [FormatConfig].

use serde::Serialize;

use crate::{
    Error,
    api::{Category, RawBalance, RawTransaction, TransactionType, TransactionsResponse},
    config::FormatConfig,
    currency::{format_currency, format_currency_text},
    date::format_date,
};

/// The prefix that marks an outcome's amount as money going out.
const OUTCOME_PREFIX: &str = "- ";

/// A transaction with its amount and date formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayTransaction {
    /// The ID assigned by the backend.
    pub id: String,
    /// A short description of the transaction.
    pub title: String,
    /// The amount of money, as received.
    pub value: f64,
    /// Whether the transaction is income or an outcome.
    #[serde(rename = "type")]
    pub type_: TransactionType,
    /// The category the transaction belongs to.
    pub category: Category,
    /// When the transaction was created, as received.
    pub created_at: String,
    /// The amount as currency, prefixed with "- " for outcomes, e.g. "- $1,200.00".
    pub formatted_value: String,
    /// The calendar date the transaction was created on, e.g. "05/01/2020".
    pub formatted_date: String,
}

/// The aggregate balance with each amount formatted as currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayBalance {
    /// The sum of all income, e.g. "$5,000.00".
    pub income: String,
    /// The sum of all outcomes, e.g. "$1,200.00".
    pub outcome: String,
    /// Income minus outcomes, e.g. "$3,800.00".
    pub total: String,
}

/// Everything the dashboard displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// The transactions, in the order the backend sent them.
    pub transactions: Vec<DisplayTransaction>,
    /// The aggregate balance.
    pub balance: DisplayBalance,
}

/// Format the amount and date of `raw`.
///
/// The sign of `formatted_value` depends only on the transaction type, never
/// on the magnitude of the amount.
///
/// # Errors
/// Returns an error if the amount is not finite or `created_at` is not an
/// ISO 8601 date.
pub fn normalize_transaction(
    raw: &RawTransaction,
    config: &FormatConfig,
) -> Result<DisplayTransaction, Error> {
    let amount = format_currency(raw.value, config)?;
    let formatted_value = match raw.type_ {
        TransactionType::Income => amount,
        TransactionType::Outcome => format!("{OUTCOME_PREFIX}{amount}"),
    };
    let formatted_date = format_date(&raw.created_at, config)?;

    Ok(DisplayTransaction {
        id: raw.id.clone(),
        title: raw.title.clone(),
        value: raw.value,
        type_: raw.type_,
        category: raw.category.clone(),
        created_at: raw.created_at.clone(),
        formatted_value,
        formatted_date,
    })
}

/// Format each amount of `raw` as currency.
///
/// The three amounts are formatted independently, they are not checked
/// against each other.
///
/// # Errors
/// Returns [Error::InvalidAmount] if any amount is not a number.
pub fn normalize_balance(raw: &RawBalance, config: &FormatConfig) -> Result<DisplayBalance, Error> {
    Ok(DisplayBalance {
        income: format_currency_text(&raw.income, config)?,
        outcome: format_currency_text(&raw.outcome, config)?,
        total: format_currency_text(&raw.total, config)?,
    })
}

/// Normalize every transaction and the balance in `response`.
///
/// # Errors
/// Returns the first error from [normalize_transaction] or
/// [normalize_balance]. No partial dashboard is returned.
pub fn normalize_response(
    response: &TransactionsResponse,
    config: &FormatConfig,
) -> Result<Dashboard, Error> {
    let transactions = response
        .transactions
        .iter()
        .map(|transaction| {
            normalize_transaction(transaction, config).inspect_err(|error| {
                tracing::error!("could not normalize transaction {}: {error}", transaction.id)
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let balance = normalize_balance(&response.balance, config)
        .inspect_err(|error| tracing::error!("could not normalize balance: {error}"))?;

    Ok(Dashboard {
        transactions,
        balance,
    })
}

#[cfg(test)]
mod normalize_transaction_tests {
    use crate::{
        Error,
        api::{Category, RawTransaction, TransactionType},
        config::FormatConfig,
        normalize::{DisplayTransaction, normalize_transaction},
    };

    fn raw_transaction(id: &str, title: &str, value: f64, type_: TransactionType) -> RawTransaction {
        RawTransaction {
            id: id.to_owned(),
            title: title.to_owned(),
            value,
            type_,
            category: Category {
                title: "Job".to_owned(),
            },
            created_at: "2020-05-01T00:00:00.000Z".to_owned(),
        }
    }

    #[test]
    fn normalizes_income() {
        let raw = raw_transaction("1", "Salary", 5000.0, TransactionType::Income);

        let got = normalize_transaction(&raw, &FormatConfig::default());

        assert_eq!(
            got,
            Ok(DisplayTransaction {
                id: "1".to_owned(),
                title: "Salary".to_owned(),
                value: 5000.0,
                type_: TransactionType::Income,
                category: Category {
                    title: "Job".to_owned()
                },
                created_at: "2020-05-01T00:00:00.000Z".to_owned(),
                formatted_value: "$5,000.00".to_owned(),
                formatted_date: "05/01/2020".to_owned(),
            })
        );
    }

    #[test]
    fn outcome_is_prefixed_with_minus_sign() {
        let raw = raw_transaction("2", "Rent", 1200.0, TransactionType::Outcome);

        let got = normalize_transaction(&raw, &FormatConfig::default())
            .expect("Could not normalize transaction");

        assert_eq!(got.formatted_value, "- $1,200.00");
    }

    #[test]
    fn sign_depends_only_on_type() {
        let config = FormatConfig::default();

        for value in [0.0, 0.01, 1.0, 99.99, 1200.0, 1_000_000.0] {
            let income = normalize_transaction(
                &raw_transaction("1", "In", value, TransactionType::Income),
                &config,
            )
            .unwrap();
            let outcome = normalize_transaction(
                &raw_transaction("2", "Out", value, TransactionType::Outcome),
                &config,
            )
            .unwrap();

            assert!(
                !income.formatted_value.starts_with("- "),
                "income {value} formatted as {:?}",
                income.formatted_value
            );
            assert!(
                outcome.formatted_value.starts_with("- "),
                "outcome {value} formatted as {:?}",
                outcome.formatted_value
            );
        }
    }

    #[test]
    fn zero_income_has_no_sign() {
        let raw = raw_transaction("1", "Nothing", 0.0, TransactionType::Income);

        let got = normalize_transaction(&raw, &FormatConfig::default()).unwrap();

        assert_eq!(got.formatted_value, "$0.00");
    }

    #[test]
    fn malformed_date_is_an_error() {
        let mut raw = raw_transaction("1", "Salary", 5000.0, TransactionType::Income);
        raw.created_at = "01/05/2020".to_owned();

        let got = normalize_transaction(&raw, &FormatConfig::default());

        assert!(
            matches!(got, Err(Error::InvalidDate(ref text, _)) if text == "01/05/2020"),
            "want invalid date error, got {got:?}"
        );
    }
}
