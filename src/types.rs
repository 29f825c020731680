use crate::DateError;
use crate::consts::{MAX_MONTH, MAX_YEAR, TIME_SEPARATOR};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;
use std::str::FromStr;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, DateError> {
        let non_zero = NonZeroU16::new(value).ok_or(DateError::InvalidYear(i64::from(value)))?;
        if value > MAX_YEAR {
            return Err(DateError::InvalidYear(i64::from(value)));
        }
        Ok(Self(non_zero))
    }

    /// Narrows a year computed on the day-number axis.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the year is outside `1..=MAX_YEAR`.
    pub(crate) fn from_computed(value: i64) -> Result<Self, DateError> {
        u16::try_from(value)
            .ok()
            .and_then(|y| Self::new(y).ok())
            .ok_or(DateError::OutOfRange(value))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = DateError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, DateError> {
        let non_zero = NonZeroU8::new(value).ok_or(DateError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(DateError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day-of-month value checked against a month length
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating it against `max_day`, the length of
    /// month `month` of `year` in whichever calendar the caller works in.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDay` if the value is 0 or > `max_day`.
    pub fn new(value: u8, year: u16, month: u8, max_day: u8) -> Result<Self, DateError> {
        let invalid = DateError::InvalidDay {
            year,
            month,
            day: value,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;
        if value > max_day {
            return Err(invalid);
        }
        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A zone-less wall-clock time with whole-second precision.
///
/// `Default` is midnight, which is what date-only values format with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:02}:{:02}:{:02}", hour, minute, second)]
pub struct TimeOfDay {
    hour:   u8,
    minute: u8,
    second: u8,
}

impl TimeOfDay {
    /// Midnight, `00:00:00`
    pub const MIDNIGHT: Self = Self {
        hour:   0,
        minute: 0,
        second: 0,
    };

    /// Creates a new time, validating a 24-hour clock.
    ///
    /// # Errors
    /// Returns `DateError::InvalidTime` if any component is out of range.
    pub const fn new(hour: u8, minute: u8, second: u8) -> Result<Self, DateError> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(DateError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    pub const fn hour(self) -> u8 {
        self.hour
    }

    pub const fn minute(self) -> u8 {
        self.minute
    }

    pub const fn second(self) -> u8 {
        self.second
    }
}

impl FromStr for TimeOfDay {
    type Err = DateError;

    /// Parses `H:MM` or `H:MM:SS`; seconds default to 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split(TIME_SEPARATOR).collect();
        let component = |part: &str| {
            part.parse::<u8>()
                .map_err(|_| DateError::InvalidFormat(trimmed.to_owned()))
        };
        match parts.as_slice() {
            [h, m] => Self::new(component(*h)?, component(*m)?, 0),
            [h, m, sec] => Self::new(component(*h)?, component(*m)?, component(*sec)?),
            _ => Err(DateError::InvalidFormat(trimmed.to_owned())),
        }
    }
}

impl TryFrom<chrono::NaiveTime> for TimeOfDay {
    type Error = DateError;

    /// Drops sub-second precision. A leap second is rejected, not folded into :59.
    fn try_from(value: chrono::NaiveTime) -> Result<Self, Self::Error> {
        use chrono::Timelike;

        let narrow = |v: u32| u8::try_from(v).unwrap_or(u8::MAX);
        let (hour, minute) = (narrow(value.hour()), narrow(value.minute()));
        // chrono stores second 60 as :59 with nanoseconds past one billion
        if value.nanosecond() >= 1_000_000_000 {
            return Err(DateError::InvalidTime {
                hour,
                minute,
                second: 60,
            });
        }
        Self::new(hour, minute, narrow(value.second()))
    }
}

impl serde::Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
