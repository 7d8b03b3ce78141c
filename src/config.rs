//! The configuration that controls how amounts and dates are displayed.

use std::{fmt, str::FromStr};

use time::{
    format_description::{self, BorrowedFormatItem, OwnedFormatItem},
    macros::format_description,
};

use crate::{Error, currency::CurrencyFormatter, timezone::Timezone};

/// The date format used when none is configured, e.g. "05/01/2020".
pub const DEFAULT_DATE_FORMAT: &str = "[month]/[day]/[year]";

const DEFAULT_DATE_FORMAT_ITEMS: &[BorrowedFormatItem] =
    format_description!("[month]/[day]/[year]");

/// The locales that amounts can be formatted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// English (United States), e.g. "$1,200.00".
    #[default]
    EnUs,
    /// Portuguese (Brazil), e.g. "R$ 1.200,00".
    PtBr,
}

impl Locale {
    /// The character placed between groups of three digits.
    pub fn thousands_separator(self) -> char {
        match self {
            Locale::EnUs => ',',
            Locale::PtBr => '.',
        }
    }

    /// The character placed between the whole and fractional part of a number.
    pub fn decimal_separator(self) -> char {
        match self {
            Locale::EnUs => '.',
            Locale::PtBr => ',',
        }
    }

    /// The text placed between the currency symbol and the number.
    pub fn symbol_spacing(self) -> &'static str {
        match self {
            Locale::EnUs => "",
            Locale::PtBr => " ",
        }
    }

    /// The BCP 47 language tag, for use in the HTML `lang` attribute.
    pub fn language_tag(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::PtBr => "pt-BR",
        }
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "en-us" | "en" => Ok(Locale::EnUs),
            "pt-br" | "pt" => Ok(Locale::PtBr),
            _ => Err(Error::InvalidLocale(text.to_owned())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.language_tag())
    }
}

/// Controls how the normalizer formats currency and dates.
///
/// The same config is shared by every request, so it is created once at
/// start up and wrapped in an `Arc`.
#[derive(Debug)]
pub struct FormatConfig {
    /// The timezone that transaction dates are displayed in.
    pub timezone: Timezone,
    currency_symbol: String,
    locale: Locale,
    currency_formatter: CurrencyFormatter,
    date_format: OwnedFormatItem,
    date_format_text: String,
}

impl FormatConfig {
    /// Create a new [FormatConfig].
    ///
    /// `date_format` is a [time format description], e.g. "[month]/[day]/[year]".
    ///
    /// # Errors
    /// Returns [Error::InvalidDateFormat] if `date_format` is not a valid format description,
    /// or [Error::InvalidCurrencySymbol] if `currency_symbol` cannot prefix amounts.
    ///
    /// [time format description]: https://time-rs.github.io/book/api/format-description.html
    pub fn new(
        currency_symbol: &str,
        locale: Locale,
        date_format: &str,
        timezone: Timezone,
    ) -> Result<Self, Error> {
        let items = format_description::parse_owned::<2>(date_format)
            .inspect_err(|error| tracing::error!("invalid date format {date_format:?}: {error}"))
            .map_err(|error| Error::InvalidDateFormat(date_format.to_owned(), error.to_string()))?;

        Ok(Self {
            currency_formatter: CurrencyFormatter::new(currency_symbol, locale)?,
            currency_symbol: currency_symbol.to_owned(),
            locale,
            timezone,
            date_format: items,
            date_format_text: date_format.to_owned(),
        })
    }

    /// The symbol placed in front of amounts, e.g. "$" or "R$".
    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// The locale that decides the digit separators and the page language.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub(crate) fn currency_formatter(&self) -> &CurrencyFormatter {
        &self.currency_formatter
    }

    /// The parsed date format.
    pub fn date_format(&self) -> &OwnedFormatItem {
        &self.date_format
    }

    /// The date format as it was written, e.g. "[month]/[day]/[year]".
    pub fn date_format_text(&self) -> &str {
        &self.date_format_text
    }
}

impl Default for FormatConfig {
    /// US dollars, US digit grouping, "MM/dd/yyyy" dates and UTC.
    fn default() -> Self {
        let locale = Locale::default();

        Self {
            currency_formatter: CurrencyFormatter::new("$", locale)
                .expect("\"$\" is a valid currency prefix"),
            currency_symbol: "$".to_owned(),
            locale,
            timezone: Timezone::default(),
            date_format: OwnedFormatItem::from(DEFAULT_DATE_FORMAT_ITEMS),
            date_format_text: DEFAULT_DATE_FORMAT.to_owned(),
        }
    }
}
