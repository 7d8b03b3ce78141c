//! Formats amounts of money for display.

use numfmt::{Formatter, Precision};

use crate::{
    Error,
    config::{FormatConfig, Locale},
};

/// Formats amounts for one currency symbol and locale.
///
/// `numfmt` groups the whole part and adds the symbol. The cents are appended
/// here because `numfmt` drops trailing zeros and only knows the decimal point.
pub(crate) struct CurrencyFormatter {
    positive: Formatter,
    negative: Formatter,
    zero: String,
    decimal_separator: char,
}

impl CurrencyFormatter {
    /// Create a formatter that prefixes `symbol` and groups digits per `locale`.
    ///
    /// # Errors
    /// Returns [Error::InvalidCurrencySymbol] if `numfmt` cannot use `symbol` as a prefix.
    pub(crate) fn new(symbol: &str, locale: Locale) -> Result<Self, Error> {
        let prefix = format!("{symbol}{}", locale.symbol_spacing());

        let build = |prefix: &str| {
            Formatter::currency(prefix)
                .and_then(|formatter| formatter.separator(locale.thousands_separator()))
                .map(|formatter| formatter.precision(Precision::Decimals(0)))
                .map_err(|_| {
                    tracing::error!("could not use {symbol:?} as a currency symbol");
                    Error::InvalidCurrencySymbol(symbol.to_owned())
                })
        };

        Ok(Self {
            positive: build(&prefix)?,
            negative: build(&format!("-{prefix}"))?,
            // Zero is hardcoded as "0" by numfmt, without the prefix.
            zero: format!("{prefix}0"),
            decimal_separator: locale.decimal_separator(),
        })
    }

    fn format(&self, amount: f64) -> String {
        let total_cents = (amount.abs() * 100.0).round();
        let whole = (total_cents / 100.0).trunc();
        let cents = (total_cents % 100.0) as u64;
        let is_negative = amount < 0.0;

        let whole = if whole > 0.0 && is_negative {
            self.negative.fmt_string(whole)
        } else if whole > 0.0 {
            self.positive.fmt_string(whole)
        } else if is_negative && cents > 0 {
            format!("-{}", self.zero)
        } else {
            // Amounts that round to zero, e.g. -0.001, should not show a minus sign.
            self.zero.clone()
        };

        format!("{whole}{}{cents:02}", self.decimal_separator)
    }
}

impl std::fmt::Debug for CurrencyFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencyFormatter")
            .field("zero", &self.zero)
            .field("decimal_separator", &self.decimal_separator)
            .finish_non_exhaustive()
    }
}

/// Format `amount` as currency, rounded to two decimal places.
///
/// The symbol and the digit separators come from `config`, e.g. "$1,234.56"
/// for en-US or "R$ 1.234,56" for pt-BR.
/// Negative amounts are prefixed with a minus sign, e.g. "-$12.30".
///
/// # Errors
/// Returns [Error::InvalidAmount] if `amount` is NaN or infinite.
pub fn format_currency(amount: f64, config: &FormatConfig) -> Result<String, Error> {
    if !amount.is_finite() {
        return Err(Error::InvalidAmount(amount.to_string()));
    }

    Ok(config.currency_formatter().format(amount))
}

/// Parse a numeric string, e.g. "1200.50", and format it with [format_currency].
///
/// # Errors
/// Returns [Error::InvalidAmount] if `text` is not a number.
pub(crate) fn format_currency_text(text: &str, config: &FormatConfig) -> Result<String, Error> {
    let amount: f64 = text
        .trim()
        .parse()
        .inspect_err(|error| tracing::error!("could not parse amount {text:?}: {error}"))
        .map_err(|_| Error::InvalidAmount(text.to_owned()))?;

    format_currency(amount, config)
}
