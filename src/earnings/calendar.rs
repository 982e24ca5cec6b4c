use chrono::{Datelike, NaiveDate, Weekday};

/// Count the weekdays (Monday through Friday) in `date`'s calendar month,
/// from the 1st through the last day inclusive. No holiday calendar.
pub fn business_days_in_month(date: NaiveDate) -> u32 {
    let mut count = 0;
    let mut day = date.with_day(1).unwrap_or(date);

    while day.month() == date.month() && day.year() == date.year() {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            count += 1;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    count
}
