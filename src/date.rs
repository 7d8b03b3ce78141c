//! Parses the ISO 8601 timestamps sent by the transactions API and formats them as calendar dates.

use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time,
    format_description::{
        BorrowedFormatItem,
        well_known::{Iso8601, Rfc3339},
    },
    macros::format_description,
};

use crate::{Error, config::FormatConfig, timezone::Timezone};

/// Date-times as written by SQL databases, e.g. "2020-05-01 13:45:00.123".
const SQL_DATETIME_FORMAT: &[BorrowedFormatItem] = format_description!(
    version = 2,
    "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
);

/// Format the timestamp `created_at` as a calendar date in the configured
/// timezone and date format, e.g. "2020-05-01T00:00:00.000Z" becomes "05/01/2020".
///
/// # Errors
/// Returns [Error::InvalidDate] if `created_at` is not an ISO 8601 date or
/// date-time, or [Error::InvalidDateFormat] if the configured format cannot
/// be used to format the date.
pub fn format_date(created_at: &str, config: &FormatConfig) -> Result<String, Error> {
    let timestamp = parse_timestamp(created_at, &config.timezone)?;
    let offset = config.timezone.offset_at(timestamp);
    let local = timestamp.checked_to_offset(offset).ok_or_else(|| {
        Error::InvalidDate(
            created_at.to_owned(),
            format!("the date is out of range for the UTC offset {offset}"),
        )
    })?;

    local
        .format(config.date_format())
        .inspect_err(|error| {
            tracing::error!(
                "could not format {created_at:?} with {:?}: {error}",
                config.date_format_text()
            )
        })
        .map_err(|error| {
            Error::InvalidDateFormat(config.date_format_text().to_owned(), error.to_string())
        })
}

/// Parse an ISO 8601 timestamp.
///
/// Timestamps with an offset are used as is. Date-times without an offset
/// and bare dates are interpreted as local time in `timezone`, bare dates at
/// midnight.
pub(crate) fn parse_timestamp(text: &str, timezone: &Timezone) -> Result<OffsetDateTime, Error> {
    let trimmed = text.trim();

    if let Ok(timestamp) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(timestamp);
    }

    if let Ok(timestamp) = OffsetDateTime::parse(trimmed, &Iso8601::DEFAULT) {
        return Ok(timestamp);
    }

    if let Ok(datetime) = PrimitiveDateTime::parse(trimmed, &Iso8601::DEFAULT)
        .or_else(|_| PrimitiveDateTime::parse(trimmed, SQL_DATETIME_FORMAT))
    {
        return Ok(timezone.assume_local(datetime));
    }

    Date::parse(trimmed, &Iso8601::DEFAULT)
        .map(|date| timezone.assume_local(PrimitiveDateTime::new(date, Time::MIDNIGHT)))
        .inspect_err(|error| tracing::error!("could not parse date {text:?}: {error}"))
        .map_err(|error| Error::InvalidDate(text.to_owned(), error.to_string()))
}
