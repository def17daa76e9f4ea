use chrono::{Datelike, Months, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
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

/// Calendar-month addition. Day-of-month is clamped to the end of the target
/// month, so Jan 31 + 1 lands on the last day of February.
pub fn add_calendar_months(start: NaiveDate, months: u32) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(months))
}

pub fn month_label(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

/// Zero-based month index for a label. Accepts full names and any prefix of
/// at least three letters ("Mar", "Sept"), ignoring case.
pub fn month_index(label: &str) -> Option<u32> {
    let needle = label.trim().to_ascii_lowercase();
    if needle.len() < 3 {
        return None;
    }

    MONTH_NAMES
        .iter()
        .position(|name| name.to_ascii_lowercase().starts_with(&needle))
        .map(|index| index as u32)
}
