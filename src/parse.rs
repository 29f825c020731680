//! Classification and parsing of date-like input.
//!
//! A string whose four-digit year is below [`JALALI_YEAR_THRESHOLD`] is read
//! as Jalali; everything else goes through the Gregorian ISO-8601 path.

use std::fmt;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::{Captures, Regex};
use tracing::trace;

use crate::DateError;
use crate::consts::{JALALI_YEAR_THRESHOLD, TODAY_SENTINEL};
use crate::date::{normalize_separators, CivilDateTime, GregorianDate, JalaliDate};
use crate::prelude::*;
use crate::types::TimeOfDay;

/// `YYYY-M-D` with an optional `H:MM[:SS]`, after separator normalization
static JALALI_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<y>[12][0-9]{3})-(?P<m>0?[1-9]|1[0-2])-(?P<d>0?[1-9]|[12][0-9]|3[01])",
        r"(?:\s+(?P<h>[0-9]{1,2}):(?P<mi>[0-9]{2})(?::(?P<s>[0-9]{2}))?)?$",
    ))
    .expect("Jalali date pattern is valid")
});

const ISO_TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Input accepted by [`resolve`] and the formatting functions.
///
/// Structured values are Gregorian by convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub enum DateLike<'a> {
    Text(&'a str),
    Date(GregorianDate),
    DateTime(CivilDateTime),
}

impl DateLike<'_> {
    /// Empty or whitespace-only text
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl<'a> From<&'a String> for DateLike<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl TryFrom<NaiveDate> for DateLike<'_> {
    type Error = DateError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        Ok(Self::Date(value.try_into()?))
    }
}

impl TryFrom<chrono::NaiveDateTime> for DateLike<'_> {
    type Error = DateError;

    fn try_from(value: chrono::NaiveDateTime) -> Result<Self, Self::Error> {
        Ok(Self::DateTime(value.try_into()?))
    }
}

impl fmt::Display for DateLike<'_> {
    /// Text is written back verbatim
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Date(date) => write!(f, "{date}"),
            Self::DateTime(date_time) => write!(f, "{date_time}"),
        }
    }
}

/// Pieces of a Jalali date string, borrowed from the caller's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JalaliFields<'a> {
    pub year:   &'a str,
    pub month:  &'a str,
    pub day:    &'a str,
    pub hour:   Option<&'a str>,
    pub minute: Option<&'a str>,
    pub second: Option<&'a str>,
}

impl<'a> JalaliFields<'a> {
    fn from_captures(source: &'a str, caps: &Captures<'_>) -> Option<Self> {
        let slice = move |name: &str| caps.name(name).map(|m| &source[m.range()]);
        Some(Self {
            year:   slice("y")?,
            month:  slice("m")?,
            day:    slice("d")?,
            hour:   slice("h"),
            minute: slice("mi"),
            second: slice("s"),
        })
    }

    fn numeric_year(&self) -> Option<u16> {
        self.year.parse().ok()
    }

    /// Validates the date part.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDay` for days the month does not have.
    pub fn date(&self) -> Result<JalaliDate, DateError> {
        let invalid = |_| DateError::InvalidFormat(format!("{}-{}-{}", self.year, self.month, self.day));
        JalaliDate::new(
            self.year.parse().map_err(invalid)?,
            self.month.parse().map_err(invalid)?,
            self.day.parse().map_err(invalid)?,
        )
    }

    /// Validates the time part; seconds default to 0.
    ///
    /// # Errors
    /// Returns `DateError::InvalidTime` for hours past 23 and the like.
    pub fn time(&self) -> Result<Option<TimeOfDay>, DateError> {
        let (Some(hour), Some(minute)) = (self.hour, self.minute) else {
            return Ok(None);
        };
        let invalid = |_| DateError::InvalidFormat(format!("{hour}:{minute}"));
        let second = self.second.map_or(Ok(0), str::parse::<u8>).map_err(invalid)?;
        TimeOfDay::new(hour.parse().map_err(invalid)?, minute.parse().map_err(invalid)?, second)
            .map(Some)
    }
}

/// What a raw string turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedInput<'a> {
    JalaliDateString(JalaliFields<'a>),
    GregorianIsoString(CivilDateTime),
    Unparseable,
}

impl ParsedInput<'_> {
    pub const fn is_jalali(&self) -> bool {
        matches!(self, Self::JalaliDateString(_))
    }
}

/// Matches the Jalali pattern without the year threshold.
/// `input` must already be trimmed.
fn match_jalali_pattern(input: &str) -> Option<JalaliFields<'_>> {
    // Separator normalization swaps single ASCII bytes, so capture
    // offsets in `normalized` are valid in `input` too.
    let normalized = normalize_separators(input);
    let caps = JALALI_DATE_RE.captures(&normalized)?;
    JalaliFields::from_captures(input, &caps)
}

/// The Jalali reading of `input`, if it has one.
fn jalali_candidate(input: &str) -> Option<JalaliFields<'_>> {
    if input.is_empty() || input.eq_ignore_ascii_case(TODAY_SENTINEL) {
        return None;
    }
    let fields = match_jalali_pattern(input)?;
    let year = fields.numeric_year()?;
    if year < JALALI_YEAR_THRESHOLD {
        Some(fields)
    } else {
        trace!(input, year, "year at or above threshold, not Jalali");
        None
    }
}

/// Classifies a raw string.
///
/// Empty input and `today` are never Jalali; with no clock in this crate
/// they come back `Unparseable`.
pub fn classify(input: &str) -> ParsedInput<'_> {
    let trimmed = input.trim();
    if let Some(fields) = jalali_candidate(trimmed) {
        trace!(input = trimmed, "classified as Jalali");
        return ParsedInput::JalaliDateString(fields);
    }
    match parse_gregorian_iso(trimmed) {
        Ok(date_time) => ParsedInput::GregorianIsoString(date_time),
        Err(err) => {
            trace!(input = trimmed, %err, "unparseable date input");
            ParsedInput::Unparseable
        }
    }
}

/// Whether `input` reads as a Jalali date string.
pub fn is_jalali_date(input: &str) -> bool {
    jalali_candidate(input.trim()).is_some()
}

/// Parses the date part of a Jalali string, e.g. `1402/07/15`.
///
/// # Errors
/// `DateError::InvalidFormat` if the pattern does not match,
/// `DateError::GregorianYear` if the year is 1700 or later, and the
/// validation errors of [`JalaliDate::new`].
pub fn parse_jalali(input: &str) -> Result<JalaliDate, DateError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DateError::EmptyInput);
    }
    let fields =
        match_jalali_pattern(trimmed).ok_or_else(|| DateError::InvalidFormat(trimmed.to_owned()))?;
    match fields.numeric_year() {
        Some(year) if year >= JALALI_YEAR_THRESHOLD => Err(DateError::GregorianYear(year)),
        _ => fields.date(),
    }
}

/// Splits on the first space into date and optional time parts.
pub fn split_date_time(value: &str) -> (&str, Option<&str>) {
    match value.split_once(' ') {
        Some((date, time)) => {
            let time = time.trim();
            (date.trim(), (!time.is_empty()).then_some(time))
        }
        None => (value.trim(), None),
    }
}

/// Parses `YYYY-MM-DD` with an optional `HH:MM[:SS[.fff]]`, separated by a
/// space or `T`. Date separators may be `-`, `/` or `.`; sub-second digits
/// are dropped.
///
/// # Errors
/// `DateError::InvalidFormat` when chrono rejects the text.
pub fn parse_gregorian_iso(input: &str) -> Result<CivilDateTime, DateError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DateError::EmptyInput);
    }
    let invalid = || DateError::InvalidFormat(trimmed.to_owned());

    let (date_part, time_part) = match split_date_time(trimmed) {
        (date, None) => date.split_once('T').map_or((date, None), |(d, t)| (d, Some(t))),
        split => split,
    };

    let naive_date =
        NaiveDate::parse_from_str(&normalize_separators(date_part), "%Y-%m-%d").map_err(|_| invalid())?;
    let date = GregorianDate::try_from(naive_date)?;

    let time = match time_part {
        None => None,
        Some(text) => {
            let naive_time = ISO_TIME_FORMATS
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
                .ok_or_else(invalid)?;
            Some(TimeOfDay::try_from(naive_time)?)
        }
    };
    Ok(CivilDateTime::new(date, time))
}

/// Normalizes any supported input to a Gregorian date with optional time.
///
/// Text with a Jalali-range year that misses the Jalali pattern, such as
/// `1402-07-15T14:05` or `1402-07-15 14:05:09.5`, falls through to the ISO
/// path and resolves as Gregorian year 1402.
///
/// # Errors
/// `DateError::EmptyInput` for blank text, otherwise whichever error the
/// Jalali or ISO path produced.
pub fn resolve<'a>(value: impl Into<DateLike<'a>>) -> Result<CivilDateTime, DateError> {
    match value.into() {
        DateLike::Date(date) => Ok(CivilDateTime::date_only(date)),
        DateLike::DateTime(date_time) => Ok(date_time),
        DateLike::Text(text) => resolve_text(text),
    }
}

fn resolve_text(text: &str) -> Result<CivilDateTime, DateError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DateError::EmptyInput);
    }
    match jalali_candidate(trimmed) {
        Some(fields) => {
            let date = fields.date()?.to_gregorian()?;
            Ok(CivilDateTime::new(date, fields.time()?))
        }
        None => parse_gregorian_iso(trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gregorian(y: u16, m: u8, d: u8) -> GregorianDate {
        GregorianDate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_classification_boundary() {
        assert!(classify("1699-01-01").is_jalali());
        assert!(!classify("1700-01-01").is_jalali());
        assert_eq!(
            classify("1700-01-01"),
            ParsedInput::GregorianIsoString(CivilDateTime::date_only(gregorian(1700, 1, 1)))
        );
    }

    #[test]
    fn test_classify_extracts_fields() {
        let ParsedInput::JalaliDateString(fields) = classify(" 1402/7/15 14:05:09 ") else {
            panic!("expected a Jalali classification");
        };
        assert_eq!(fields.year, "1402");
        assert_eq!(fields.month, "7");
        assert_eq!(fields.day, "15");
        assert_eq!(fields.hour, Some("14"));
        assert_eq!(fields.minute, Some("05"));
        assert_eq!(fields.second, Some("09"));
    }

    #[test]
    fn test_classify_sentinels_and_garbage() {
        for input in ["", "   ", "today", "TODAY", "Today", "not-a-date", "1402-13-01", "1402-07-32"] {
            assert_eq!(classify(input), ParsedInput::Unparseable, "input {input:?}");
            assert!(!is_jalali_date(input), "input {input:?}");
        }
    }

    #[test]
    fn test_classify_rejects_bad_year_prefix() {
        // First digit must be 1 or 2
        assert!(!is_jalali_date("0402-07-15"));
        assert!(!is_jalali_date("402-07-15"));
    }

    #[test]
    fn test_classify_time_shapes() {
        assert!(is_jalali_date("1402-07-15 9:05"));
        assert!(is_jalali_date("1402-07-15 09:05:00"));
        assert!(!is_jalali_date("1402-07-15 9"));
        assert!(!is_jalali_date("1402-07-15 09:5"));
    }

    #[test]
    fn test_separator_equivalence() {
        let expected = JalaliDate::new(1402, 7, 15).unwrap();
        for input in ["1402/07/15", "1402.07.15", "1402-07-15"] {
            assert_eq!(parse_jalali(input).unwrap(), expected, "input {input}");
        }
    }

    #[test]
    fn test_parse_jalali_errors() {
        assert_eq!(parse_jalali("2023-10-07"), Err(DateError::GregorianYear(2023)));
        assert_eq!(parse_jalali("1700-01-01"), Err(DateError::GregorianYear(1700)));
        assert!(matches!(parse_jalali("hello"), Err(DateError::InvalidFormat(_))));
        assert_eq!(parse_jalali(""), Err(DateError::EmptyInput));
        assert!(matches!(
            parse_jalali("1402-12-30"),
            Err(DateError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_parse_jalali_ignores_time_suffix() {
        let date = parse_jalali("1402-07-15 14:05").unwrap();
        assert_eq!(date.to_tuple(), (1402, 7, 15));
    }

    #[test]
    fn test_split_date_time() {
        assert_eq!(split_date_time("2023-10-07"), ("2023-10-07", None));
        assert_eq!(
            split_date_time("2023-10-07 14:05"),
            ("2023-10-07", Some("14:05"))
        );
        assert_eq!(split_date_time("2023-10-07 "), ("2023-10-07", None));
    }

    #[test]
    fn test_parse_gregorian_iso() {
        let dt = parse_gregorian_iso("2023-10-07").unwrap();
        assert_eq!(dt, CivilDateTime::date_only(gregorian(2023, 10, 7)));

        let dt = parse_gregorian_iso("2023/10/07 14:05").unwrap();
        assert_eq!(dt.to_string(), "2023-10-07 14:05:00");

        let dt = parse_gregorian_iso("2023-10-07T14:05:09.123").unwrap();
        assert_eq!(dt.to_string(), "2023-10-07 14:05:09");

        assert!(parse_gregorian_iso("2023-02-30").is_err());
        assert!(parse_gregorian_iso("2023-10-07 25:00").is_err());
        assert!(parse_gregorian_iso("today").is_err());
    }

    #[test]
    fn test_resolve_jalali_text() {
        let dt = resolve("1402-07-15").unwrap();
        assert_eq!(dt, CivilDateTime::date_only(gregorian(2023, 10, 7)));

        let dt = resolve("1402/07/15 14:05").unwrap();
        assert_eq!(dt.to_string(), "2023-10-07 14:05:00");

        let dt = resolve("1402.07.15 14:05:09").unwrap();
        assert_eq!(dt.to_string(), "2023-10-07 14:05:09");
    }

    #[test]
    fn test_resolve_gregorian_text() {
        let dt = resolve("2023-10-07 14:05:09").unwrap();
        assert_eq!(dt.to_string(), "2023-10-07 14:05:09");
        assert!(dt.has_time());
    }

    #[test]
    fn test_resolve_structured_values_pass_through() {
        let date = gregorian(2023, 10, 7);
        assert_eq!(resolve(date).unwrap(), CivilDateTime::date_only(date));

        let dt = CivilDateTime::new(date, Some(TimeOfDay::new(1, 2, 3).unwrap()));
        assert_eq!(resolve(dt).unwrap(), dt);
    }

    #[test]
    fn test_resolve_errors() {
        assert_eq!(resolve(""), Err(DateError::EmptyInput));
        assert!(matches!(resolve("not-a-date"), Err(DateError::InvalidFormat(_))));
        assert!(matches!(
            resolve("1402-07-15 24:00"),
            Err(DateError::InvalidTime { hour: 24, .. })
        ));
        assert!(matches!(
            resolve("1402-12-30"),
            Err(DateError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_leap_second_on_both_paths() {
        assert_eq!(
            resolve("2023-10-07 23:59:60"),
            Err(DateError::InvalidTime {
                hour:   23,
                minute: 59,
                second: 60,
            })
        );
        assert_eq!(
            resolve("1402-07-15 23:59:60"),
            Err(DateError::InvalidTime {
                hour:   23,
                minute: 59,
                second: 60,
            })
        );
    }

    #[test]
    fn test_resolve_jalali_year_outside_pattern_reads_as_gregorian() {
        for input in ["1402-07-15T14:05", "1402-07-15 14:05:09.5"] {
            assert!(!is_jalali_date(input), "input {input}");
            let dt = resolve(input).unwrap();
            assert_eq!(dt.date, gregorian(1402, 7, 15), "input {input}");
            assert!(dt.has_time());
        }
    }

    #[test]
    fn test_date_like_conversions() {
        let owned = String::from("1402-07-15");
        assert_eq!(DateLike::from(&owned), DateLike::Text("1402-07-15"));

        let naive = NaiveDate::from_ymd_opt(2023, 10, 7).unwrap();
        assert_eq!(
            DateLike::try_from(naive).unwrap(),
            DateLike::Date(gregorian(2023, 10, 7))
        );

        assert!(DateLike::Text("  ").is_blank());
        assert!(!DateLike::Date(gregorian(2023, 10, 7)).is_blank());
        assert_eq!(DateLike::Text(" raw ").to_string(), " raw ");
    }
}
