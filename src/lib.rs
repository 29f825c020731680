//! Exact conversion between the Gregorian and Jalali (Persian solar hijri)
//! calendars, and between their textual forms.
//!
//! Every function is pure: values in, converted values or a [`DateError`]
//! out. Which calendar a user prefers is the caller's business; pass it in
//! as a [`CalendarKind`].

mod calendar;
mod consts;
mod date;
mod format;
mod parse;
mod prelude;
mod types;

pub use calendar::{Calendar, Gregorian, Jalali, days_in_month, is_jalali_leap_year, is_leap_year};
pub use consts::*;
pub use date::{
    CivilDate, CivilDateTime, GregorianDate, JalaliDate, gregorian_to_jalali, jalali_to_gregorian,
    jalali_weekday_name, jalali_weekday_short,
};
pub use format::{
    CalendarKind, DateFormatter, GregorianFormatter, JalaliFormatter, format_gregorian,
    format_jalali, to_gregorian_input_string, to_jalali_display_string,
};
pub use parse::{
    DateLike, JalaliFields, ParsedInput, classify, is_jalali_date, parse_gregorian_iso,
    parse_jalali, resolve, split_date_time,
};
pub use types::{Day, Month, TimeOfDay, Year};

/// Why a date could not be parsed, validated, or converted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("Empty date string")]
    EmptyInput,

    #[error("Invalid date format: {0}")]
    InvalidFormat(String),

    #[error("Invalid year: {0} (must be 1-{max})", max = MAX_YEAR)]
    InvalidYear(i64),

    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),

    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },

    #[error("Invalid time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u8, minute: u8, second: u8 },

    /// A year offered as Jalali is at or past the Gregorian threshold.
    #[error("Year {0} looks Gregorian; refusing to parse as Jalali")]
    GregorianYear(u16),

    /// A converted date would land outside years `1..=9999`.
    #[error("Converted year {0} is outside the supported range")]
    OutOfRange(i64),

    #[error("Unknown calendar: {0:?} (expected \"gregorian\" or \"jalali\")")]
    UnknownCalendar(String),
}
