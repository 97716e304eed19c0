//! Gregorian ↔ Jalali conversion.
//!
//! Both directions go through an absolute day number.  Gregorian days
//! are counted from 1600-01-01 using the 4/100/400 leap rule; Jalali
//! days are counted from 979-01-01 using the 33-year cycle (eight leap
//! years per cycle, 12053 days).  The two epochs are 79 days apart,
//! which is the only constant tying the calendars together.
//!
//! The conversions are exact inverses of each other for every date
//! from Gregorian 1600 onward, which comfortably covers the Jalali
//! years 1300–1500 used by the rest of the engine.

use serde::{Deserialize, Serialize};

use crate::jalali::JalaliDate;

/// Month lengths of a common Jalali year.  Month 12 gains a day in
/// leap years.
pub const JALALI_MONTH_DAYS: [u32; 12] = [31, 31, 31, 31, 31, 31, 30, 30, 30, 30, 30, 29];

const GREGORIAN_MONTH_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const GREGORIAN_EPOCH_YEAR: i64 = 1600;
const JALALI_EPOCH_YEAR: i64 = 979;
/// Days from 1600-01-01 (Gregorian) to 979-01-01 (Jalali).
const EPOCH_OFFSET: i64 = 79;

const DAYS_PER_400_YEARS: i64 = 146_097;
const DAYS_PER_100_YEARS: i64 = 36_524;
const DAYS_PER_4_YEARS: i64 = 1_461;
const DAYS_PER_33_YEARS: i64 = 12_053;

/// A plain Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GregorianDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl GregorianDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl From<chrono::NaiveDate> for GregorianDate {
    fn from(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        Self::new(date.year(), date.month(), date.day())
    }
}

pub fn is_gregorian_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn gregorian_days_in_month(year: i32, month: u32) -> u32 {
    if month == 2 && is_gregorian_leap_year(year) {
        29
    } else {
        GREGORIAN_MONTH_DAYS[(month as usize).clamp(1, 12) - 1]
    }
}

/// Days since 1600-01-01 for a Gregorian date.
pub fn gregorian_day_number(year: i32, month: u32, day: u32) -> i64 {
    let gy = year as i64 - GREGORIAN_EPOCH_YEAR;
    let mut days = 365 * gy + (gy + 3).div_euclid(4) - (gy + 99).div_euclid(100)
        + (gy + 399).div_euclid(400);
    for m in 1..month.min(13) {
        days += gregorian_days_in_month(year, m) as i64;
    }
    days + day as i64 - 1
}

/// Days since 979-01-01 for a Jalali date.
pub fn jalali_day_number(year: i32, month: u32, day: u32) -> i64 {
    let jy = year as i64 - JALALI_EPOCH_YEAR;
    let mut days = 365 * jy + jy.div_euclid(33) * 8 + (jy.rem_euclid(33) + 3) / 4;
    for m in 0..(month.clamp(1, 13) - 1) as usize {
        days += JALALI_MONTH_DAYS[m] as i64;
    }
    days + day as i64 - 1
}

/// Inverse of [`jalali_day_number`].
pub fn jalali_from_day_number(day_number: i64) -> JalaliDate {
    let cycles = day_number.div_euclid(DAYS_PER_33_YEARS);
    let mut rest = day_number.rem_euclid(DAYS_PER_33_YEARS);
    let mut year = JALALI_EPOCH_YEAR + 33 * cycles + 4 * (rest / DAYS_PER_4_YEARS);
    rest %= DAYS_PER_4_YEARS;
    // The first year of every four-year group is the 366-day one.
    if rest >= 366 {
        year += (rest - 1) / 365;
        rest = (rest - 1) % 365;
    }
    let mut month = 0;
    while month < 11 && rest >= JALALI_MONTH_DAYS[month] as i64 {
        rest -= JALALI_MONTH_DAYS[month] as i64;
        month += 1;
    }
    JalaliDate::new(year as i32, month as u32 + 1, rest as u32 + 1)
}

/// Inverse of [`gregorian_day_number`].
pub fn gregorian_from_day_number(day_number: i64) -> GregorianDate {
    let mut rest = day_number;
    let mut year = GREGORIAN_EPOCH_YEAR + 400 * rest.div_euclid(DAYS_PER_400_YEARS);
    rest = rest.rem_euclid(DAYS_PER_400_YEARS);

    let mut leap = true;
    if rest >= DAYS_PER_100_YEARS + 1 {
        rest -= 1;
        year += 100 * (rest / DAYS_PER_100_YEARS);
        rest %= DAYS_PER_100_YEARS;
        if rest >= 365 {
            rest += 1;
        } else {
            leap = false;
        }
    }

    year += 4 * (rest / DAYS_PER_4_YEARS);
    rest %= DAYS_PER_4_YEARS;

    if rest >= 366 {
        leap = false;
        rest -= 1;
        year += rest / 365;
        rest %= 365;
    }

    let mut month = 0;
    loop {
        let length = GREGORIAN_MONTH_DAYS[month] as i64 + i64::from(month == 1 && leap);
        if month == 11 || rest < length {
            break;
        }
        rest -= length;
        month += 1;
    }
    GregorianDate::new(year as i32, month as u32 + 1, rest as u32 + 1)
}

pub fn gregorian_to_jalali(year: i32, month: u32, day: u32) -> JalaliDate {
    jalali_from_day_number(gregorian_day_number(year, month, day) - EPOCH_OFFSET)
}

pub fn jalali_to_gregorian(year: i32, month: u32, day: u32) -> GregorianDate {
    gregorian_from_day_number(jalali_day_number(year, month, day) + EPOCH_OFFSET)
}
