//! Calendar windows for the reports.

use time::{Date, Month};

use crate::Error;

/// An inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

/// The first to the last day of `month` in `year`.
///
/// # Errors
///
/// Returns [Error::InvalidMonth] if `month` is not 1-12, or [Error::InvalidYear] if `year` is
/// outside the supported calendar range.
pub fn month_range(year: i32, month: u8) -> Result<DateRange, Error> {
    let calendar_month = Month::try_from(month).map_err(|_| Error::InvalidMonth(month))?;
    let start = Date::from_calendar_date(year, calendar_month, 1)
        .map_err(|_| Error::InvalidYear(year))?;
    let end = Date::from_calendar_date(
        year,
        calendar_month,
        last_day_of_month(year, calendar_month),
    )
    .map_err(|_| Error::InvalidYear(year))?;

    Ok(DateRange { start, end })
}

/// January 1st to December 31st of `year`.
///
/// # Errors
///
/// Returns [Error::InvalidYear] if `year` is outside the supported calendar range.
pub fn year_range(year: i32) -> Result<DateRange, Error> {
    let start =
        Date::from_calendar_date(year, Month::January, 1).map_err(|_| Error::InvalidYear(year))?;
    let end = Date::from_calendar_date(year, Month::December, 31)
        .map_err(|_| Error::InvalidYear(year))?;

    Ok(DateRange { start, end })
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
