//! Date normalization for raw date tokens.
//!
//! Exports write dates in the device locale, so the same chat can read
//! `5/12/23` or `5.12.2023`. Normalization accepts `/`, `.` and `-` as
//! separators and 2- or 4-digit years, and reads day and month in the
//! configured [`DateOrder`].

use chrono::NaiveDate;

use crate::config::DateOrder;

impl DateOrder {
    /// Returns chrono format strings for 2-digit and 4-digit years.
    fn parse_formats(self) -> [&'static str; 2] {
        match self {
            DateOrder::DayFirst => ["%d/%m/%y", "%d/%m/%Y"],
            DateOrder::MonthFirst => ["%m/%d/%y", "%m/%d/%Y"],
        }
    }
}

/// Normalizes a raw date token into a calendar date.
///
/// Two-digit years follow chrono's `%y` pivot: `00`-`69` map to 2000-2069 and
/// `70`-`99` to 1970-1999. Tokens with any other year width, a day or month
/// out of range, or extra components yield `None`.
///
/// # Example
///
/// ```rust
/// use chatlens::config::DateOrder;
/// use chatlens::parsing::normalize_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     normalize_date("12/5/23", DateOrder::DayFirst),
///     NaiveDate::from_ymd_opt(2023, 5, 12)
/// );
/// assert_eq!(normalize_date("32/13/9999", DateOrder::DayFirst), None);
/// ```
pub fn normalize_date(text: &str, order: DateOrder) -> Option<NaiveDate> {
    let canonical: String = text
        .trim()
        .chars()
        .map(|c| if matches!(c, '.' | '-') { '/' } else { c })
        .collect();

    let year = canonical.rsplit('/').next()?;
    if canonical.split('/').count() != 3 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let [short_year, long_year] = order.parse_formats();
    let format = match year.len() {
        2 => short_year,
        4 => long_year,
        _ => return None,
    };

    NaiveDate::parse_from_str(&canonical, format).ok()
}
