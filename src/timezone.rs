//! Resolves canonical timezone names, e.g. "Pacific/Auckland", to UTC offsets.

use std::fmt;

use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};
use time_tz::{Offset, TimeZone, Tz};

use crate::Error;

/// The timezone that transaction dates are displayed in.
#[derive(Clone)]
pub enum Timezone {
    /// A fixed offset from UTC.
    Fixed(UtcOffset),
    /// A timezone from the IANA database. The offset follows daylight saving
    /// time at the instant being converted.
    Named {
        /// The canonical timezone name, e.g. "Pacific/Auckland".
        name: String,
        /// The timezone rules.
        tz: &'static Tz,
    },
}

impl Timezone {
    /// Look up a timezone by its canonical name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if `canonical_timezone` is not a known timezone.
    pub fn from_name(canonical_timezone: &str) -> Result<Self, Error> {
        time_tz::timezones::get_by_name(canonical_timezone)
            .map(|tz| Timezone::Named {
                name: canonical_timezone.to_owned(),
                tz,
            })
            .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
    }

    /// The UTC offset of this timezone at `datetime`.
    pub fn offset_at(&self, datetime: OffsetDateTime) -> UtcOffset {
        match self {
            Timezone::Fixed(offset) => *offset,
            Timezone::Named { tz, .. } => tz.get_offset_utc(&datetime).to_utc(),
        }
    }

    /// Interpret a date-time without an offset as local time in this timezone.
    pub(crate) fn assume_local(&self, datetime: PrimitiveDateTime) -> OffsetDateTime {
        let offset = self.offset_at(datetime.assume_utc());

        datetime.assume_offset(offset)
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Timezone::Fixed(UtcOffset::UTC)
    }
}

impl fmt::Debug for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timezone::Fixed(offset) => f.debug_tuple("Fixed").field(offset).finish(),
            Timezone::Named { name, .. } => f.debug_tuple("Named").field(name).finish(),
        }
    }
}
