//! Month and week layouts. Weeks start on Sunday.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::ValidationError;

/// One cell per day of the month, preceded by `None` padding so the 1st lands
/// on its weekday column (0 = Sunday). No trailing padding.
pub fn build_month_grid(year: i32, month: u32) -> Result<Vec<Option<NaiveDate>>, ValidationError> {
    let first = first_of_month(year, month)?;
    let offset = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(first);

    let mut cells = Vec::with_capacity(offset + days as usize);
    cells.resize(offset, None);
    cells.extend((0..days).map(|d| Some(first + Duration::days(i64::from(d)))));
    Ok(cells)
}

/// Move `delta` months from (year, month), crossing year boundaries.
pub fn shift_month(year: i32, month: u32, delta: i32) -> Result<(i32, u32), ValidationError> {
    first_of_month(year, month)?;
    let index = i64::from(year) * 12 + i64::from(month - 1) + i64::from(delta);
    let year = i32::try_from(index.div_euclid(12))
        .map_err(|_| ValidationError::invalid("year", "out of range"))?;
    let month = index.rem_euclid(12) as u32 + 1;
    first_of_month(year, month)?;
    Ok((year, month))
}

/// The seven days of the week containing `date`, Sunday first.
pub fn build_week(date: NaiveDate) -> [NaiveDate; 7] {
    let start = date - Duration::days(i64::from(date.weekday().num_days_from_sunday()));
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

pub fn days_in_month(first: NaiveDate) -> u32 {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .map(|next| (next - first).num_days() as u32)
        .unwrap_or(31)
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, ValidationError> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::invalid(
            "month",
            format!("{month} is outside 1..=12"),
        ));
    }
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ValidationError::invalid("year", format!("{year} is out of range")))
}
