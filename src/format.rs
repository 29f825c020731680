//! Rendering resolved dates in either calendar.
//!
//! Strict functions return `DateError`. The display and storage helpers
//! never fail: a bad value is handed back as written, since a wrong label
//! is better than a crashed page and storage callers can still see what
//! was typed.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::DateError;
use crate::date::CivilDateTime;
use crate::parse::{resolve, DateLike};
use crate::prelude::*;

fn render(date: impl std::fmt::Display, resolved: &CivilDateTime, include_time: bool) -> String {
    if include_time {
        format!("{date} {}", resolved.time_or_midnight())
    } else {
        date.to_string()
    }
}

/// Resolves `value` and renders it as a Jalali `YYYY-MM-DD`, plus
/// ` HH:MM:SS` when `include_time` is set.
///
/// # Errors
/// Whatever [`resolve`] returns, or `DateError::OutOfRange` for dates
/// before the Jalali epoch.
pub fn format_jalali<'a>(value: impl Into<DateLike<'a>>, include_time: bool) -> Result<String, DateError> {
    let resolved = resolve(value)?;
    let jalali = resolved.date.to_jalali()?;
    Ok(render(jalali, &resolved, include_time))
}

/// Resolves `value` and renders it as a Gregorian `YYYY-MM-DD`, plus
/// ` HH:MM:SS` when `include_time` is set.
///
/// # Errors
/// Whatever [`resolve`] returns.
pub fn format_gregorian<'a>(value: impl Into<DateLike<'a>>, include_time: bool) -> Result<String, DateError> {
    let resolved = resolve(value)?;
    Ok(render(resolved.date, &resolved, include_time))
}

/// Canonical Gregorian text for storage.
///
/// `None` for blank input. The time is kept only when the value carried
/// one. Text that cannot be resolved is returned trimmed but otherwise
/// unchanged.
pub fn to_gregorian_input_string<'a>(value: impl Into<DateLike<'a>>) -> Option<String> {
    let value = value.into();
    if value.is_blank() {
        return None;
    }
    match resolve(value) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(err) => {
            let raw = value.to_string();
            debug!(input = %raw, %err, "keeping unresolvable date input as entered");
            Some(raw.trim().to_owned())
        }
    }
}

/// Jalali text for display.
///
/// `None` for blank input; the original value, stringified, when it
/// cannot be converted.
pub fn to_jalali_display_string<'a>(value: impl Into<DateLike<'a>>, include_time: bool) -> Option<String> {
    JalaliFormatter.display(value.into(), include_time)
}

/// A way of rendering dates, picked per call from the viewer's preference.
pub trait DateFormatter: Send + Sync {
    /// The calendar this formatter renders in
    fn calendar(&self) -> CalendarKind;

    /// # Errors
    /// Any error from resolving or converting `value`.
    fn format(&self, value: DateLike<'_>, include_time: bool) -> Result<String, DateError>;

    /// Best-effort [`format`](Self::format): `None` for blank input, the
    /// original value when formatting fails.
    fn display(&self, value: DateLike<'_>, include_time: bool) -> Option<String> {
        if value.is_blank() {
            return None;
        }
        match self.format(value, include_time) {
            Ok(text) => Some(text),
            Err(err) => {
                debug!(calendar = %self.calendar(), input = %value, %err, "displaying date input as-is");
                Some(value.to_string())
            }
        }
    }
}

/// Renders in the Jalali calendar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JalaliFormatter;

/// Renders in the Gregorian calendar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GregorianFormatter;

impl DateFormatter for JalaliFormatter {
    fn calendar(&self) -> CalendarKind {
        CalendarKind::Jalali
    }

    fn format(&self, value: DateLike<'_>, include_time: bool) -> Result<String, DateError> {
        format_jalali(value, include_time)
    }
}

impl DateFormatter for GregorianFormatter {
    fn calendar(&self) -> CalendarKind {
        CalendarKind::Gregorian
    }

    fn format(&self, value: DateLike<'_>, include_time: bool) -> Result<String, DateError> {
        format_gregorian(value, include_time)
    }
}

/// The calendar a user wants to see dates in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarKind {
    #[default]
    #[display(fmt = "gregorian")]
    Gregorian,
    #[display(fmt = "jalali")]
    Jalali,
}

impl CalendarKind {
    pub const fn is_jalali(self) -> bool {
        matches!(self, Self::Jalali)
    }

    /// The formatting strategy for this calendar
    pub fn formatter(self) -> &'static dyn DateFormatter {
        match self {
            Self::Gregorian => &GregorianFormatter,
            Self::Jalali => &JalaliFormatter,
        }
    }

    /// # Errors
    /// Any error from resolving or converting `value`.
    pub fn format<'a>(self, value: impl Into<DateLike<'a>>, include_time: bool) -> Result<String, DateError> {
        self.formatter().format(value.into(), include_time)
    }

    pub fn display<'a>(self, value: impl Into<DateLike<'a>>, include_time: bool) -> Option<String> {
        self.formatter().display(value.into(), include_time)
    }
}

impl FromStr for CalendarKind {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gregorian" => Ok(Self::Gregorian),
            "jalali" => Ok(Self::Jalali),
            _ => Err(DateError::UnknownCalendar(s.trim().to_owned())),
        }
    }
}
