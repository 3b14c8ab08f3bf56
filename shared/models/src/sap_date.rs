//! SAP OData v2 date codec.
//!
//! Gateway services serialize `Edm.DateTime` values as `/Date(<millis>)/`,
//! sometimes with a signed offset suffix. Decoding never fails loudly: a value
//! that does not match yields `None`.
//!
//! All calendar fields are taken from the UTC representation so bucketing
//! does not depend on the server's timezone.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use regex::Regex;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn sap_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"/Date\((\d+)([+-]\d+)?\)/").expect("SAP date pattern is a valid regex")
    })
}

/// How the optional `[+-]NNNN` suffix of a SAP date is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetPolicy {
    /// The suffix is a signed millisecond delta added to the timestamp.
    #[default]
    Millis,
    /// The suffix is a signed `HHMM` offset.
    HoursMinutes,
    /// The suffix is dropped.
    Ignore,
}

impl OffsetPolicy {
    fn apply(self, instant: DateTime<Utc>, suffix: &str) -> Option<DateTime<Utc>> {
        let (sign, digits) = match suffix.split_at(1) {
            ("+", rest) => (1i64, rest),
            ("-", rest) => (-1i64, rest),
            _ => return Some(instant),
        };
        let magnitude: i64 = digits.parse().ok()?;

        let delta = match self {
            OffsetPolicy::Ignore => return Some(instant),
            OffsetPolicy::Millis => Duration::try_milliseconds(sign * magnitude)?,
            OffsetPolicy::HoursMinutes => {
                let minutes = (magnitude / 100) * 60 + magnitude % 100;
                Duration::try_minutes(sign * minutes)?
            }
        };
        instant.checked_add_signed(delta)
    }
}

/// Decode `/Date(1748822400000)/` into an instant, applying any offset suffix
/// as milliseconds.
pub fn decode(value: &str) -> Option<DateTime<Utc>> {
    decode_with(value, OffsetPolicy::Millis)
}

pub fn decode_with(value: &str, policy: OffsetPolicy) -> Option<DateTime<Utc>> {
    let captures = sap_date_pattern().captures(value)?;
    let millis: i64 = captures.get(1)?.as_str().parse().ok()?;
    let instant = Utc.timestamp_millis_opt(millis).single()?;

    match captures.get(2) {
        Some(suffix) => policy.apply(instant, suffix.as_str()),
        None => Some(instant),
    }
}

/// Encode an instant in the SAP wire format, without an offset suffix.
pub fn encode(instant: &DateTime<Utc>) -> String {
    format!("/Date({})/", instant.timestamp_millis())
}

/// Chart bucket label, e.g. `"Jun '25"`.
pub fn month_label(instant: &DateTime<Utc>) -> String {
    let month = MONTH_ABBREVIATIONS[instant.month0() as usize];
    format!("{} '{:02}", month, instant.year().rem_euclid(100))
}

/// Sort/filter key, e.g. `"2025-06-02"`.
pub fn iso_day(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

/// Display form used by the RFQ list, e.g. `"06/02/2025"`.
pub fn us_day(instant: &DateTime<Utc>) -> String {
    instant.format("%m/%d/%Y").to_string()
}

/// Calendar day of the instant in UTC.
pub fn utc_day(instant: &DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// Recover `(year, month)` from a label produced by [`month_label`].
///
/// Two-digit years are read as 20YY.
pub fn parse_month_label(label: &str) -> Option<(i32, u32)> {
    let (month, year) = label.trim().split_once(" '")?;
    let month_index = MONTH_ABBREVIATIONS.iter().position(|m| *m == month)?;
    if year.len() != 2 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    Some((2000 + year, month_index as u32 + 1))
}
