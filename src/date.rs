use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use chrono::{Datelike, Weekday};

use crate::calendar::{Calendar, Gregorian, Jalali};
use crate::consts::{ALTERNATE_SEPARATORS, DATE_SEPARATOR, JALALI_WEEKDAYS, JALALI_WEEKDAYS_SHORT};
use crate::types::{Day, Month, TimeOfDay, Year};
use crate::DateError;

const WEEKDAYS_FROM_SATURDAY: [Weekday; 7] = [
    Weekday::Sat,
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// A validated civil date in calendar `C`.
///
/// The calendar is part of the type, so a Jalali date cannot be handed to
/// code expecting a Gregorian one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDate<C> {
    year:     Year,
    month:    Month,
    day:      Day,
    calendar: PhantomData<C>,
}

/// A date in the Gregorian calendar
pub type GregorianDate = CivilDate<Gregorian>;

/// A date in the Jalali calendar
pub type JalaliDate = CivilDate<Jalali>;

impl<C: Calendar> CivilDate<C> {
    /// Creates a date, checking the day against `C`'s month length.
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear`, `InvalidMonth` or `InvalidDay`.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let year_nz = Year::new(year)?;
        let month_nz = Month::new(month)?;
        let day_nz = Day::new(day, year, month, C::days_in_month(year, month))?;
        Ok(Self {
            year: year_nz,
            month: month_nz,
            day: day_nz,
            calendar: PhantomData,
        })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns `(year, month, day)`
    pub const fn to_tuple(&self) -> (u16, u8, u8) {
        (self.year.get(), self.month.get(), self.day.get())
    }

    /// English name of this date's month
    pub fn month_name(&self) -> &'static str {
        C::month_name(self.month.get())
    }

    /// Days since Gregorian 1600-01-01
    pub fn day_number(&self) -> i64 {
        C::day_number(self.year.get(), self.month.get(), self.day.get())
    }

    /// Builds the date at `day_number` on the shared axis.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` when the year leaves `1..=9999`.
    pub fn from_day_number(day_number: i64) -> Result<Self, DateError> {
        let (year, month, day) = C::from_day_number(day_number);
        let year = Year::from_computed(year)?;
        Self::new(year.get(), month, day)
    }

    /// The same day expressed in calendar `T`.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` when the result's year leaves `1..=9999`.
    pub fn convert<T: Calendar>(&self) -> Result<CivilDate<T>, DateError> {
        CivilDate::<T>::from_day_number(self.day_number())
    }

    pub fn weekday(&self) -> Weekday {
        // 1600-01-01, day zero, was a Saturday
        let offset = usize::try_from(self.day_number().rem_euclid(7)).unwrap_or_default();
        WEEKDAYS_FROM_SATURDAY[offset]
    }
}

impl GregorianDate {
    /// # Errors
    /// Returns `DateError::OutOfRange` for dates before the Jalali epoch.
    pub fn to_jalali(&self) -> Result<JalaliDate, DateError> {
        self.convert()
    }
}

impl JalaliDate {
    /// # Errors
    /// Returns `DateError::OutOfRange` when the Gregorian year would pass 9999.
    pub fn to_gregorian(&self) -> Result<GregorianDate, DateError> {
        self.convert()
    }

    /// Saturday-first weekday name, e.g. `Shanbeh`
    pub fn weekday_name(&self) -> &'static str {
        jalali_weekday_name(self.weekday())
    }

    /// Label in the `Mehr 15, 1402` form
    pub fn to_long_string(&self) -> String {
        format!("{} {}, {}", self.month_name(), self.day(), self.year())
    }
}

/// Jalali name of `weekday`
pub fn jalali_weekday_name(weekday: Weekday) -> &'static str {
    JALALI_WEEKDAYS[saturday_index(weekday)]
}

/// Two-letter Jalali abbreviation of `weekday`
pub fn jalali_weekday_short(weekday: Weekday) -> &'static str {
    JALALI_WEEKDAYS_SHORT[saturday_index(weekday)]
}

fn saturday_index(weekday: Weekday) -> usize {
    ((weekday.num_days_from_monday() + 2) % 7) as usize
}

/// Validates and converts a Gregorian date.
///
/// # Errors
/// Returns a validation error for impossible dates (day 32, 1900-02-29) and
/// `DateError::OutOfRange` before the Jalali epoch.
pub fn gregorian_to_jalali(year: u16, month: u8, day: u8) -> Result<JalaliDate, DateError> {
    GregorianDate::new(year, month, day)?.to_jalali()
}

/// Validates and converts a Jalali date.
///
/// # Errors
/// Returns a validation error for impossible dates (month 13, Esfand 30 of a
/// common year) and `DateError::OutOfRange` past Gregorian 9999.
pub fn jalali_to_gregorian(year: u16, month: u8, day: u8) -> Result<GregorianDate, DateError> {
    JalaliDate::new(year, month, day)?.to_gregorian()
}

impl<C> fmt::Display for CivilDate<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{sep}{:02}{sep}{:02}",
            self.year.get(),
            self.month.get(),
            self.day.get(),
            sep = DATE_SEPARATOR
        )
    }
}

/// Rewrites `/` and `.` to `-`; byte offsets are unchanged.
pub(crate) fn normalize_separators(value: &str) -> String {
    value.replace(&ALTERNATE_SEPARATORS[..], &DATE_SEPARATOR.to_string())
}

impl<C: Calendar> FromStr for CivilDate<C> {
    type Err = DateError;

    /// Strict `YYYY-MM-DD` in calendar `C`; `/` and `.` are accepted as separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        let normalized = normalize_separators(trimmed);
        let parts: Vec<&str> = normalized.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(DateError::InvalidFormat(trimmed.to_owned()));
        };
        let invalid = |_| DateError::InvalidFormat(trimmed.to_owned());
        Self::new(
            year.parse().map_err(invalid)?,
            month.parse().map_err(invalid)?,
            day.parse().map_err(invalid)?,
        )
    }
}

impl<C> serde::Serialize for CivilDate<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de, C: Calendar> serde::Deserialize<'de> for CivilDate<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl TryFrom<chrono::NaiveDate> for GregorianDate {
    type Error = DateError;

    fn try_from(value: chrono::NaiveDate) -> Result<Self, Self::Error> {
        let year = u16::try_from(value.year())
            .map_err(|_| DateError::InvalidYear(i64::from(value.year())))?;
        let narrow = |v: u32| u8::try_from(v).unwrap_or(u8::MAX);
        Self::new(year, narrow(value.month()), narrow(value.day()))
    }
}

/// A Gregorian date with an optional wall-clock time.
///
/// `time` is `None` for date-only values; formatting with time then uses midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDateTime {
    pub date: GregorianDate,
    pub time: Option<TimeOfDay>,
}

impl CivilDateTime {
    pub const fn new(date: GregorianDate, time: Option<TimeOfDay>) -> Self {
        Self { date, time }
    }

    pub const fn date_only(date: GregorianDate) -> Self {
        Self { date, time: None }
    }

    pub const fn has_time(&self) -> bool {
        self.time.is_some()
    }

    /// The time component, midnight if absent
    pub fn time_or_midnight(&self) -> TimeOfDay {
        self.time.unwrap_or_default()
    }
}

impl From<GregorianDate> for CivilDateTime {
    fn from(date: GregorianDate) -> Self {
        Self::date_only(date)
    }
}

impl fmt::Display for CivilDateTime {
    /// `YYYY-MM-DD`, or `YYYY-MM-DD HH:MM:SS` when a time is present
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time {
            Some(time) => write!(f, "{} {time}", self.date),
            None => write!(f, "{}", self.date),
        }
    }
}

impl TryFrom<chrono::NaiveDateTime> for CivilDateTime {
    type Error = DateError;

    fn try_from(value: chrono::NaiveDateTime) -> Result<Self, Self::Error> {
        Ok(Self {
            date: value.date().try_into()?,
            time: Some(value.time().try_into()?),
        })
    }
}

impl serde::Serialize for CivilDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gregorian(y: u16, m: u8, d: u8) -> GregorianDate {
        GregorianDate::new(y, m, d).unwrap()
    }

    fn jalali(y: u16, m: u8, d: u8) -> JalaliDate {
        JalaliDate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_known_conversion_pair() {
        let j = gregorian_to_jalali(2023, 10, 7).unwrap();
        assert_eq!(j.to_tuple(), (1402, 7, 15));

        let g = jalali_to_gregorian(1402, 7, 15).unwrap();
        assert_eq!(g.to_tuple(), (2023, 10, 7));
    }

    #[test]
    fn test_leap_day_2000_round_trips() {
        let g = gregorian(2000, 2, 29);
        let j = g.to_jalali().unwrap();
        assert_eq!(j.to_tuple(), (1378, 12, 10));
        assert_eq!(j.to_gregorian().unwrap(), g);
    }

    #[test]
    fn test_1900_02_29_is_rejected() {
        assert_eq!(
            gregorian_to_jalali(1900, 2, 29),
            Err(DateError::InvalidDay {
                year:  1900,
                month: 2,
                day:   29,
            })
        );
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        assert!(matches!(
            gregorian_to_jalali(2023, 1, 32),
            Err(DateError::InvalidDay { .. })
        ));
        assert!(matches!(
            jalali_to_gregorian(1402, 13, 1),
            Err(DateError::InvalidMonth(13))
        ));
        assert!(matches!(
            jalali_to_gregorian(1402, 7, 31),
            Err(DateError::InvalidDay { .. })
        ));
        assert!(matches!(
            jalali_to_gregorian(1402, 12, 30),
            Err(DateError::InvalidDay { .. })
        ));
        assert!(jalali_to_gregorian(1403, 12, 30).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            gregorian_to_jalali(100, 1, 1),
            Err(DateError::OutOfRange(_))
        ));
        assert!(matches!(
            jalali_to_gregorian(9999, 1, 1),
            Err(DateError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_round_trip_every_gregorian_day_1900_2100() {
        let mut date = gregorian(1900, 1, 1);
        let end = gregorian(2100, 12, 31);
        while date <= end {
            let back = date.to_jalali().unwrap().to_gregorian().unwrap();
            assert_eq!(back, date, "round trip failed for {date}");
            date = GregorianDate::from_day_number(date.day_number() + 1).unwrap();
        }
    }

    #[test]
    fn test_round_trip_every_jalali_day_1200_1500() {
        for year in 1200..=1500 {
            for month in 1..=12 {
                for day in 1..=Jalali::days_in_month(year, month) {
                    let j = jalali(year, month, day);
                    let back = j.to_gregorian().unwrap().to_jalali().unwrap();
                    assert_eq!(back, j, "round trip failed for {j}");
                }
            }
        }
    }

    #[test]
    fn test_display_zero_pads() {
        assert_eq!(jalali(1402, 7, 5).to_string(), "1402-07-05");
        assert_eq!(gregorian(999, 1, 2).to_string(), "0999-01-02");
    }

    #[test]
    fn test_from_str() {
        let j: JalaliDate = "1402/07/15".parse().unwrap();
        assert_eq!(j, jalali(1402, 7, 15));

        let g: GregorianDate = "2023-10-07".parse().unwrap();
        assert_eq!(g, gregorian(2023, 10, 7));

        assert!(matches!(
            "".parse::<GregorianDate>(),
            Err(DateError::EmptyInput)
        ));
        assert!(matches!(
            "2023-10".parse::<GregorianDate>(),
            Err(DateError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2023-02-30".parse::<GregorianDate>(),
            Err(DateError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_ordering_follows_date() {
        assert!(jalali(1402, 7, 15) < jalali(1402, 8, 1));
        assert!(jalali(1401, 12, 29) < jalali(1402, 1, 1));
    }

    #[test]
    fn test_month_name_and_long_string() {
        let j = jalali(1402, 7, 15);
        assert_eq!(j.month_name(), "Mehr");
        assert_eq!(j.to_long_string(), "Mehr 15, 1402");
        assert_eq!(gregorian(2023, 10, 7).month_name(), "October");
    }

    #[test]
    fn test_weekday() {
        // 2023-10-07 was a Saturday
        let g = gregorian(2023, 10, 7);
        assert_eq!(g.weekday(), Weekday::Sat);
        let j = g.to_jalali().unwrap();
        assert_eq!(j.weekday(), Weekday::Sat);
        assert_eq!(j.weekday_name(), "Shanbeh");

        assert_eq!(gregorian(2023, 10, 13).weekday(), Weekday::Fri);
        assert_eq!(jalali_weekday_name(Weekday::Fri), "Jomeh");
        assert_eq!(jalali_weekday_short(Weekday::Sun), "Ye");
    }

    #[test]
    fn test_weekday_agrees_with_chrono() {
        for (y, m, d) in [(1600, 1, 1), (1970, 1, 1), (2000, 2, 29), (2024, 3, 20)] {
            let naive = chrono::NaiveDate::from_ymd_opt(i32::from(y), u32::from(m), u32::from(d)).unwrap();
            assert_eq!(gregorian(y, m, d).weekday(), naive.weekday(), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn test_from_naive_date() {
        let naive = chrono::NaiveDate::from_ymd_opt(2023, 10, 7).unwrap();
        let g = GregorianDate::try_from(naive).unwrap();
        assert_eq!(g, gregorian(2023, 10, 7));

        let too_early = chrono::NaiveDate::from_ymd_opt(-5, 1, 1).unwrap();
        assert!(GregorianDate::try_from(too_early).is_err());
    }

    #[test]
    fn test_civil_date_time_display() {
        let date = gregorian(2023, 10, 7);
        assert_eq!(CivilDateTime::date_only(date).to_string(), "2023-10-07");

        let time = TimeOfDay::new(14, 5, 9).unwrap();
        let dt = CivilDateTime::new(date, Some(time));
        assert_eq!(dt.to_string(), "2023-10-07 14:05:09");
        assert!(dt.has_time());
        assert_eq!(CivilDateTime::date_only(date).time_or_midnight(), TimeOfDay::MIDNIGHT);
    }

    #[test]
    fn test_civil_date_time_from_naive() {
        let naive = chrono::NaiveDate::from_ymd_opt(2023, 10, 7)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap();
        let dt = CivilDateTime::try_from(naive).unwrap();
        assert_eq!(dt.to_string(), "2023-10-07 14:05:09");
    }

    #[test]
    fn test_serde() {
        let j = jalali(1402, 7, 15);
        let json = serde_json::to_string(&j).unwrap();
        assert_eq!(json, "\"1402-07-15\"");

        let parsed: JalaliDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, j);

        assert!(serde_json::from_str::<JalaliDate>("\"1402-12-30\"").is_err());

        let dt = CivilDateTime::new(gregorian(2023, 10, 7), Some(TimeOfDay::MIDNIGHT));
        assert_eq!(serde_json::to_string(&dt).unwrap(), "\"2023-10-07 00:00:00\"");
    }
}
