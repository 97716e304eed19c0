//! Jalali calendar rules and date-string helpers.
//!
//! Dates cross every boundary of the engine as zero-padded
//! `YYYY-MM-DD` strings.  Because the format is fixed-width, two valid
//! date strings compare lexically in the same order as the dates they
//! denote, so [`compare`] and [`is_in_range`] work on the strings
//! directly without parsing them.
//!
//! Leap years follow the 33-year cycle used by the
//! [`calendar`](crate::calendar) converter.  This is an approximation
//! of the astronomical calendar; report periods and month boundaries
//! depend on exactly this rule, so it must not be swapped for another.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::calendar::{self, GregorianDate, JALALI_MONTH_DAYS};
use crate::error::EngineError;

pub const MIN_YEAR: i32 = 1300;
pub const MAX_YEAR: i32 = 1500;

/// Positions within the 33-year cycle that are leap years.
pub const LEAP_CYCLE_POSITIONS: [i32; 8] = [1, 5, 9, 13, 17, 22, 26, 30];

const MONTH_NAMES: [&str; 12] = [
    "حمل", "ثور", "جوزا", "سرطان", "اسد", "سنبله", "میزان", "عقرب", "قوس", "جدی", "دلو", "حوت",
];

const MONTH_NAMES_EN: [&str; 12] = [
    "Hamal", "Saur", "Jawza", "Saratan", "Asad", "Sonbola", "Mizan", "Aqrab", "Qaws", "Jadi",
    "Dalv", "Hoot",
];

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("date pattern is a valid regex")
});

/// A Jalali calendar date.  Serialises as its canonical
/// `YYYY-MM-DD` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct JalaliDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl JalaliDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// The following calendar day.
    pub fn succ(&self) -> Self {
        if self.day < days_in_month(self.month, self.year) {
            Self::new(self.year, self.month, self.day + 1)
        } else {
            let next = next_month(self.year, self.month);
            Self::new(next.year, next.month, 1)
        }
    }

    pub fn to_gregorian(&self) -> GregorianDate {
        calendar::jalali_to_gregorian(self.year, self.month, self.day)
    }

    fn day_number(&self) -> i64 {
        calendar::jalali_day_number(self.year, self.month, self.day)
    }
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for JalaliDate {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_parts(s)
            .filter(|&(year, month, day)| is_valid_date(year, month, day))
            .map(|(year, month, day)| Self::new(year, month, day))
            .ok_or_else(|| EngineError::InvalidDate(s.to_string()))
    }
}

impl TryFrom<String> for JalaliDate {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<JalaliDate> for String {
    fn from(date: JalaliDate) -> Self {
        date.to_string()
    }
}

/// First and last day of one Jalali month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRange {
    pub start: JalaliDate,
    pub end: JalaliDate,
}

impl MonthRange {
    pub fn contains(&self, date: &str) -> bool {
        is_in_range(date, &self.start.to_string(), &self.end.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

pub fn is_leap_year(year: i32) -> bool {
    LEAP_CYCLE_POSITIONS.contains(&year.rem_euclid(33))
}

pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        12 if is_leap_year(year) => 30,
        1..=12 => JALALI_MONTH_DAYS[month as usize - 1],
        _ => 0,
    }
}

fn is_valid_date(year: i32, month: u32, day: u32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
        && (1..=12).contains(&month)
        && day >= 1
        && day <= days_in_month(month, year)
}

fn parse_parts(date: &str) -> Option<(i32, u32, u32)> {
    let caps = DATE_PATTERN.captures(date)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?))
}

/// Checks that `date` is a strictly formatted `YYYY-MM-DD` string
/// naming a real day between the years 1300 and 1500.
pub fn validate(date: &str) -> bool {
    matches!(parse_parts(date), Some((y, m, d)) if is_valid_date(y, m, d))
}

pub fn month_start_date(year: i32, month: u32) -> String {
    JalaliDate::new(year, month, 1).to_string()
}

pub fn month_end_date(year: i32, month: u32) -> String {
    JalaliDate::new(year, month, days_in_month(month, year)).to_string()
}

pub fn month_date_range(year: i32, month: u32) -> MonthRange {
    MonthRange {
        start: JalaliDate::new(year, month, 1),
        end: JalaliDate::new(year, month, days_in_month(month, year)),
    }
}

/// The month after `year`/`month`; the year saturates at `i32::MAX`.
pub fn next_month(year: i32, month: u32) -> YearMonth {
    if month >= 12 {
        YearMonth { year: year.saturating_add(1), month: 1 }
    } else {
        YearMonth { year, month: month + 1 }
    }
}

/// The month following the month of `last_end_date`; used when a
/// registration is renewed.  `None` if the date does not parse.
pub fn renewal_range(last_end_date: &str) -> Option<MonthRange> {
    let (year, month, _) = parse_parts(last_end_date)?;
    let next = next_month(year, month);
    Some(month_date_range(next.year, next.month))
}

/// Lexical comparison of two canonical date strings.
pub fn compare(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Inclusive on both ends.
pub fn is_in_range(date: &str, start: &str, end: &str) -> bool {
    compare(date, start) != Ordering::Less && compare(date, end) != Ordering::Greater
}

/// Signed number of days from `a` to `b`.
pub fn days_between(a: &JalaliDate, b: &JalaliDate) -> i64 {
    b.day_number() - a.day_number()
}

/// Today's date in the Jalali calendar, from the local system clock.
pub fn today() -> JalaliDate {
    let date = GregorianDate::from(chrono::Local::now().date_naive());
    calendar::gregorian_to_jalali(date.year, date.month, date.day)
}

pub fn now() -> String {
    today().to_string()
}

/// Dari month name, or an empty string for an out-of-range month.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

pub fn month_name_en(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES_EN.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// Human-readable form such as `15 میزان 1403`.
pub fn format_display(date: &str) -> String {
    if date.is_empty() || date == "0000-00-00" {
        return String::new();
    }
    let parts: Vec<&str> = date.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return date.to_string();
    };
    match (year.parse::<i32>(), month.parse::<u32>(), day.parse::<u32>()) {
        (Ok(year), Ok(month), Ok(day)) => {
            let name = match month_name(month) {
                "" => month.to_string(),
                name => name.to_string(),
            };
            format!("{day} {name} {year}")
        }
        _ => date.to_string(),
    }
}
