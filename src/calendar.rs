//! Calendar rules and the day-number arithmetic that links them.
//!
//! Both calendars map onto one integer axis: the number of days since
//! Gregorian 1600-01-01. Converting a date is a trip through that axis, so
//! the two directions are exact inverses by construction.

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DAYS_PER_4_YEARS, DAYS_PER_400_YEARS, DAYS_PER_CENTURY,
    DAYS_PER_JALALI_CYCLE, DAYS_PER_YEAR, EPOCH_OFFSET, ESFAND, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, GREGORIAN_EPOCH_YEAR, GREGORIAN_MONTHS, JALALI_CYCLE_YEARS,
    JALALI_DAYS_IN_MONTH, JALALI_EPOCH_YEAR, JALALI_LEAPS_PER_CYCLE, JALALI_MONTHS,
    LEAP_YEAR_CYCLE, MAX_MONTH,
};
use std::fmt::Debug;
use std::hash::Hash;

/// A civil calendar that can place its dates on the shared day-number axis.
pub trait Calendar: Debug + Clone + Copy + Default + PartialEq + Eq + PartialOrd + Ord + Hash {
    /// Lowercase calendar name
    const NAME: &'static str;

    /// Length of `month` (1..=12) in `year`.
    fn days_in_month(year: u16, month: u8) -> u8;

    /// English name of `month` (1..=12).
    fn month_name(month: u8) -> &'static str;

    /// Day-number of a date whose components are already validated.
    fn day_number(year: u16, month: u8, day: u8) -> i64;

    /// Splits a day-number back into `(year, month, day)`.
    /// The year is unbounded; callers narrow it.
    fn from_day_number(day_number: i64) -> (i64, u8, u8);
}

/// The Gregorian civil calendar, proleptic before 1582.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gregorian;

/// The Jalali (Persian solar hijri) calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Jalali;

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Whether Esfand of `year` has 30 days.
///
/// There is no separate leap rule: the answer falls out of the 33-year
/// cycle arithmetic used for conversion.
pub fn is_jalali_leap_year(year: u16) -> bool {
    Jalali::days_in_month(year, ESFAND) == 30
}

impl Calendar for Gregorian {
    const NAME: &'static str = "gregorian";

    fn days_in_month(year: u16, month: u8) -> u8 {
        days_in_month(year, month)
    }

    fn month_name(month: u8) -> &'static str {
        GREGORIAN_MONTHS[usize::from(month) - 1]
    }

    fn day_number(year: u16, month: u8, day: u8) -> i64 {
        let gy = i64::from(year) - GREGORIAN_EPOCH_YEAR;

        let mut day_number = DAYS_PER_YEAR * gy;
        day_number += (gy + 3).div_euclid(4);
        day_number -= (gy + 99).div_euclid(100);
        day_number += (gy + 399).div_euclid(400);

        day_number += DAYS_IN_MONTH[1..usize::from(month)]
            .iter()
            .map(|&len| i64::from(len))
            .sum::<i64>();
        if month > FEBRUARY && is_leap_year(year) {
            day_number += 1;
        }
        day_number + i64::from(day) - 1
    }

    fn from_day_number(day_number: i64) -> (i64, u8, u8) {
        let mut year = GREGORIAN_EPOCH_YEAR + 400 * day_number.div_euclid(DAYS_PER_400_YEARS);
        let mut rest = day_number.rem_euclid(DAYS_PER_400_YEARS);

        // Cycle order matters: 400-year block, then the century with its
        // missing leap day, then the 4-year block, then the single year.
        let mut leap = true;
        if rest > DAYS_PER_CENTURY {
            rest -= 1;
            year += 100 * (rest / DAYS_PER_CENTURY);
            rest %= DAYS_PER_CENTURY;

            if rest >= DAYS_PER_YEAR {
                rest += 1;
            } else {
                leap = false;
            }
        }

        year += 4 * (rest / DAYS_PER_4_YEARS);
        rest %= DAYS_PER_4_YEARS;

        if rest > DAYS_PER_YEAR {
            leap = false;
            rest -= 1;
            year += rest / DAYS_PER_YEAR;
            rest %= DAYS_PER_YEAR;
        }

        let (month, day) = walk_months(rest, |month| {
            if month == FEBRUARY && leap {
                FEBRUARY_DAYS_LEAP
            } else {
                DAYS_IN_MONTH[usize::from(month)]
            }
        });
        (year, month, day)
    }
}

impl Calendar for Jalali {
    const NAME: &'static str = "jalali";

    fn days_in_month(year: u16, month: u8) -> u8 {
        debug_assert!(month != 0 && month <= MAX_MONTH);

        if month < ESFAND {
            return JALALI_DAYS_IN_MONTH[usize::from(month)];
        }
        let years = i64::from(year) - JALALI_EPOCH_YEAR;
        let length =
            jalali_days_since_epoch(years + 1, 0, 0) - jalali_days_since_epoch(years, ESFAND - 1, 0);
        u8::try_from(length).unwrap_or(JALALI_DAYS_IN_MONTH[usize::from(ESFAND)])
    }

    fn month_name(month: u8) -> &'static str {
        JALALI_MONTHS[usize::from(month) - 1]
    }

    fn day_number(year: u16, month: u8, day: u8) -> i64 {
        let jy = i64::from(year) - JALALI_EPOCH_YEAR;
        jalali_days_since_epoch(jy, month - 1, day - 1) + EPOCH_OFFSET
    }

    fn from_day_number(day_number: i64) -> (i64, u8, u8) {
        let days = day_number - EPOCH_OFFSET;

        let cycles = days.div_euclid(DAYS_PER_JALALI_CYCLE);
        let mut rest = days.rem_euclid(DAYS_PER_JALALI_CYCLE);

        let mut year = JALALI_EPOCH_YEAR + JALALI_CYCLE_YEARS * cycles + 4 * (rest / DAYS_PER_4_YEARS);
        rest %= DAYS_PER_4_YEARS;

        // The first year of each 4-year block is the leap year.
        if rest > DAYS_PER_YEAR {
            year += (rest - 1) / DAYS_PER_YEAR;
            rest = (rest - 1) % DAYS_PER_YEAR;
        }

        let (month, day) = walk_months(rest, |month| JALALI_DAYS_IN_MONTH[usize::from(month)]);
        (year, month, day)
    }
}

/// Days from Farvardin 1 of the epoch year to the given zero-based position,
/// `years` counted from `JALALI_EPOCH_YEAR`.
fn jalali_days_since_epoch(years: i64, month_index: u8, day_index: u8) -> i64 {
    let mut days = DAYS_PER_YEAR * years
        + years.div_euclid(JALALI_CYCLE_YEARS) * JALALI_LEAPS_PER_CYCLE
        + (years.rem_euclid(JALALI_CYCLE_YEARS) + 3) / 4;
    days += JALALI_DAYS_IN_MONTH[1..=usize::from(month_index)]
        .iter()
        .map(|&len| i64::from(len))
        .sum::<i64>();
    days + i64::from(day_index)
}

/// Locates a zero-based day-of-year in a month table.
/// Whatever is left after month 11 belongs to month 12, so a leap day
/// never spills past the end of the year.
fn walk_months(mut day_of_year: i64, month_length: impl Fn(u8) -> u8) -> (u8, u8) {
    let mut month = 1;
    while month < MAX_MONTH {
        let length = i64::from(month_length(month));
        if day_of_year < length {
            break;
        }
        day_of_year -= length;
        month += 1;
    }
    (month, u8::try_from(day_of_year + 1).unwrap_or(u8::MAX))
}
