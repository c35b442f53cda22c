use std::{fmt, num::NonZeroUsize, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const PREFIX: &str = "DREQ";
const DATE_DIGITS: usize = 8;
const SEQUENCE_DIGITS: usize = 3;

/// A human-readable tracking number for a data request.
///
/// Format: `DREQ{YYYY}{MM}{DD}{NNN}`, where `NNN` is the zero-padded sequence
/// number of the request at the time it was submitted. Sequences above 999
/// widen rather than wrap.
///
/// Tracking numbers are a best-effort identifier. Two requests submitted on
/// different days can share a sequence suffix, and the sequence derives from
/// the collection size, so they are not a strict unique key. Use the request
/// id for lookups that must be exact.
///
/// The year is written with four digits, so only dates from year 0 to 9999
/// survive a round trip through [`Display`](fmt::Display) and [`FromStr`].
///
/// ```
/// use chrono::NaiveDate;
/// use portal::TrackingNumber;
///
/// let date = NaiveDate::from_ymd_opt(2024, 11, 15).unwrap();
/// let tracking = TrackingNumber::generate(date, 0);
/// assert_eq!(tracking.to_string(), "DREQ20241115001");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackingNumber {
    date: NaiveDate,
    sequence: NonZeroUsize,
}

impl TrackingNumber {
    /// Builds a tracking number from its parts.
    #[must_use]
    pub const fn new(date: NaiveDate, sequence: NonZeroUsize) -> Self {
        Self { date, sequence }
    }

    /// Generates the tracking number for a new request.
    ///
    /// `existing` is the number of requests already in the collection; the
    /// sequence is one more than that.
    #[must_use]
    pub fn generate(date: NaiveDate, existing: usize) -> Self {
        let sequence = NonZeroUsize::MIN.saturating_add(existing);
        Self::new(date, sequence)
    }

    /// The date encoded in the tracking number.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// The sequence suffix.
    #[must_use]
    pub const fn sequence(&self) -> NonZeroUsize {
        self.sequence
    }
}

impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PREFIX}{:04}{:02}{:02}{:0width$}",
            self.date.year(),
            self.date.month(),
            self.date.day(),
            self.sequence,
            width = SEQUENCE_DIGITS
        )
    }
}

/// Errors that can occur when parsing a tracking number.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The string does not start with `DREQ`.
    #[error("Invalid tracking number '{0}': expected prefix DREQ")]
    Prefix(String),

    /// The string is too short or contains non-digit characters.
    #[error("Invalid tracking number '{0}': expected DREQ followed by digits")]
    Syntax(String),

    /// The date component is not a real calendar date.
    #[error("Invalid date in tracking number '{0}'")]
    Date(String),

    /// The sequence component is zero.
    #[error("Invalid sequence in tracking number '{0}': cannot be zero")]
    ZeroSequence(String),
}

impl FromStr for TrackingNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(PREFIX)
            .ok_or_else(|| Error::Prefix(s.to_string()))?;

        if digits.len() < DATE_DIGITS + SEQUENCE_DIGITS
            || !digits.chars().all(|c| c.is_ascii_digit())
        {
            return Err(Error::Syntax(s.to_string()));
        }

        let (date_str, sequence_str) = digits.split_at(DATE_DIGITS);
        let date = parse_date(date_str).ok_or_else(|| Error::Date(s.to_string()))?;
        let sequence = sequence_str
            .parse::<usize>()
            .map_err(|_| Error::Syntax(s.to_string()))?;
        let sequence =
            NonZeroUsize::new(sequence).ok_or_else(|| Error::ZeroSequence(s.to_string()))?;

        Ok(Self::new(date, sequence))
    }
}

/// Parses a fixed-width `YYYYMMDD` string.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let year = s.get(0..4)?.parse().ok()?;
    let month = s.get(4..6)?.parse().ok()?;
    let day = s.get(6..8)?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

impl TryFrom<String> for TrackingNumber {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TrackingNumber> for String {
    fn from(value: TrackingNumber) -> Self {
        value.to_string()
    }
}
