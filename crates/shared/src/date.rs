use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// Calendar dates are stored as `YYYY-MM-DD` text so lexicographic order
/// matches chronological order in SQL range filters.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn format_date(date: Date) -> String {
    date.format(&DATE_FORMAT).unwrap_or_default()
}

pub fn parse_date(value: &str) -> crate::Result<Date> {
    Ok(Date::parse(value, &DATE_FORMAT)?)
}
