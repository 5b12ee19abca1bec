//! Accepted date/time layouts and their human-readable names.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Month, Time};

use crate::error::FailureSignal;

const DAY_MONTH_YEAR: &[BorrowedFormatItem<'static>] =
    format_description!("[day]-[month]-[year]");
const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const HOUR_MINUTE: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeLayout {
    DayMonthYear,
    IsoDate,
    Year,
    HourMinute,
}

impl TimeLayout {
    pub const fn readable(self) -> &'static str {
        match self {
            TimeLayout::DayMonthYear => "DD-MM-YYYY",
            TimeLayout::IsoDate => "YYYY-MM-DD",
            TimeLayout::Year => "YYYY",
            TimeLayout::HourMinute => "hh:mm",
        }
    }

    /// Parse a calendar date. `Year` resolves to January 1st of that year.
    pub fn parse_date(self, value: &str) -> Result<Date, FailureSignal> {
        let parsed = match self {
            TimeLayout::DayMonthYear => Date::parse(value, DAY_MONTH_YEAR).ok(),
            TimeLayout::IsoDate => Date::parse(value, ISO_DATE).ok(),
            TimeLayout::Year => parse_year(value)
                .and_then(|year| Date::from_calendar_date(year, Month::January, 1).ok()),
            TimeLayout::HourMinute => None,
        };
        parsed.ok_or_else(|| FailureSignal::time_parse(self, value))
    }

    /// Parse a wall-clock time. Only `HourMinute` carries one.
    pub fn parse_time(self, value: &str) -> Result<Time, FailureSignal> {
        let parsed = match self {
            TimeLayout::HourMinute => Time::parse(value, HOUR_MINUTE).ok(),
            _ => None,
        };
        parsed.ok_or_else(|| FailureSignal::time_parse(self, value))
    }

    pub fn format_date(self, date: Date) -> Option<String> {
        match self {
            TimeLayout::DayMonthYear => date.format(DAY_MONTH_YEAR).ok(),
            TimeLayout::IsoDate => date.format(ISO_DATE).ok(),
            TimeLayout::Year => Some(format!("{:04}", date.year())),
            TimeLayout::HourMinute => None,
        }
    }
}

fn parse_year(value: &str) -> Option<i32> {
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
