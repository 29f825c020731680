/// Maximum valid year in either calendar (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (Esfand / December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Month number for Esfand, the leap-sensitive last Jalali month
pub const ESFAND: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each Gregorian month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Days in each Jalali month (index 0 is unused)
/// Esfand shows 29 days; leap years get 30 from the day-number arithmetic.
pub const JALALI_DAYS_IN_MONTH: [u8; 13] = [0, 31, 31, 31, 31, 31, 31, 30, 30, 30, 30, 30, 29];

/// A four-digit year below this is read as Jalali, anything else as Gregorian.
/// Stored data depends on this exact value.
pub const JALALI_YEAR_THRESHOLD: u16 = 1700;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Gregorian year the shared day-number axis starts from (1600-01-01 is day 0)
pub(crate) const GREGORIAN_EPOCH_YEAR: i64 = 1600;
/// Jalali year whose first day lines up with day-number `EPOCH_OFFSET`
pub(crate) const JALALI_EPOCH_YEAR: i64 = 979;
/// Day-number of Farvardin 1, 979 on the Gregorian axis
pub(crate) const EPOCH_OFFSET: i64 = 79;

pub(crate) const DAYS_PER_YEAR: i64 = 365;
pub(crate) const DAYS_PER_400_YEARS: i64 = 146_097;
pub(crate) const DAYS_PER_CENTURY: i64 = 36_524;
pub(crate) const DAYS_PER_4_YEARS: i64 = 1461;
/// Length of the 33-year Jalali intercalation cycle
pub(crate) const DAYS_PER_JALALI_CYCLE: i64 = 12_053;
pub(crate) const JALALI_CYCLE_YEARS: i64 = 33;
pub(crate) const JALALI_LEAPS_PER_CYCLE: i64 = 8;

/// Date component separator, the only one emitted
pub const DATE_SEPARATOR: char = '-';
/// Separators accepted on input in place of `DATE_SEPARATOR`
pub const ALTERNATE_SEPARATORS: [char; 2] = ['/', '.'];
/// Time component separator
pub const TIME_SEPARATOR: char = ':';

/// Input treated as "now" by the host application; never a Jalali date here
pub const TODAY_SENTINEL: &str = "today";

/// Jalali months in English transliteration
pub const JALALI_MONTHS: [&str; 12] = [
    "Farvardin",
    "Ordibehesht",
    "Khordad",
    "Tir",
    "Mordad",
    "Shahrivar",
    "Mehr",
    "Aban",
    "Azar",
    "Dey",
    "Bahman",
    "Esfand",
];

/// Gregorian months in English
pub const GREGORIAN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Jalali weekdays, Saturday first
pub const JALALI_WEEKDAYS: [&str; 7] = [
    "Shanbeh",
    "Yekshanbeh",
    "Doshanbeh",
    "Seshanbeh",
    "Chaharshanbeh",
    "Panjshanbeh",
    "Jomeh",
];

/// [`JALALI_WEEKDAYS`] abbreviated to two letters
pub const JALALI_WEEKDAYS_SHORT: [&str; 7] = ["Sh", "Ye", "Do", "Se", "Ch", "Pa", "Jo"];
