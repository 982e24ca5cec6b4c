use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::settings::{Period, Settings};

use super::calendar::business_days_in_month;

/// Everything the display needs to render one refresh of the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsSnapshot {
    pub business_days: u32,
    pub daily_pay: f64,
    pub workday_secs: i64,
    pub elapsed_secs: i64,
    pub percent_complete: f64,
    pub earned: f64,
}

/// Derive the earnings snapshot for `now` from the configured pay and shift
/// window. Pure: the clock sample always comes from the caller.
pub fn compute_snapshot(settings: &Settings, now: NaiveDateTime) -> EarningsSnapshot {
    let business_days = business_days_in_month(now.date());

    let monthly_pay = match settings.period {
        Period::Monthly => settings.pay,
        Period::Yearly => settings.pay / 12.0,
    };
    // Every month has at least one weekday; guard the division anyway.
    let daily_pay = if business_days == 0 {
        0.0
    } else {
        monthly_pay / f64::from(business_days)
    };

    let start_secs = settings.shift_start.seconds_from_midnight();
    let end_secs = settings.shift_end.seconds_from_midnight();
    // An end before the start is a zero-length workday, not an error.
    let workday_secs = (end_secs - start_secs).max(0);

    let since_midnight = i64::from(now.time().num_seconds_from_midnight());
    let elapsed_secs = (since_midnight - start_secs).clamp(0, workday_secs);

    let (percent_complete, earned) = if workday_secs == 0 {
        (0.0, 0.0)
    } else {
        let per_second = daily_pay / workday_secs as f64;
        (
            elapsed_secs as f64 / workday_secs as f64 * 100.0,
            per_second * elapsed_secs as f64,
        )
    };

    EarningsSnapshot {
        business_days,
        daily_pay,
        workday_secs,
        elapsed_secs,
        percent_complete,
        earned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ShiftTime;
    use chrono::NaiveDate;

    const EPSILON: f64 = 1e-9;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        // A Monday in a 21-business-day month (June 2025).
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn yearly_nine_to_five() -> Settings {
        Settings::default()
    }

    #[test]
    fn nothing_earned_at_shift_start() {
        let snapshot = compute_snapshot(&yearly_nine_to_five(), at(9, 0, 0));
        assert_eq!(snapshot.elapsed_secs, 0);
        assert_eq!(snapshot.percent_complete, 0.0);
        assert_eq!(snapshot.earned, 0.0);
        assert_eq!(snapshot.business_days, 21);
    }

    #[test]
    fn half_of_daily_pay_at_shift_midpoint() {
        let snapshot = compute_snapshot(&yearly_nine_to_five(), at(13, 0, 0));
        let daily_pay = 120_000.0 / 12.0 / 21.0;
        assert!((snapshot.percent_complete - 50.0).abs() < EPSILON);
        assert!((snapshot.earned - daily_pay / 2.0).abs() < EPSILON);
    }

    #[test]
    fn frozen_at_daily_pay_after_shift_end() {
        let settings = yearly_nine_to_five();
        let at_end = compute_snapshot(&settings, at(17, 0, 0));
        let late_evening = compute_snapshot(&settings, at(22, 30, 0));

        assert_eq!(at_end.elapsed_secs, 8 * 3600);
        assert_eq!(late_evening.elapsed_secs, 8 * 3600);
        assert!((late_evening.percent_complete - 100.0).abs() < EPSILON);
        assert!((late_evening.earned - late_evening.daily_pay).abs() < EPSILON);
    }

    #[test]
    fn zero_before_shift_start() {
        let snapshot = compute_snapshot(&yearly_nine_to_five(), at(6, 45, 0));
        assert_eq!(snapshot.elapsed_secs, 0);
        assert_eq!(snapshot.earned, 0.0);
    }

    #[test]
    fn inverted_shift_window_earns_nothing() {
        let mut settings = yearly_nine_to_five();
        settings.shift_start = ShiftTime { hour: 17, minute: 0 };
        settings.shift_end = ShiftTime { hour: 9, minute: 0 };

        let snapshot = compute_snapshot(&settings, at(12, 0, 0));
        assert_eq!(snapshot.workday_secs, 0);
        assert_eq!(snapshot.percent_complete, 0.0);
        assert_eq!(snapshot.earned, 0.0);
    }

    #[test]
    fn monthly_pay_in_a_twenty_business_day_month() {
        let mut settings = yearly_nine_to_five();
        settings.period = Period::Monthly;
        settings.pay = 5000.0;

        // February 2026 has 20 business days.
        let noon = NaiveDate::from_ymd_opt(2026, 2, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let snapshot = compute_snapshot(&settings, noon);
        assert_eq!(snapshot.business_days, 20);
        assert!((snapshot.daily_pay - 250.0).abs() < EPSILON);
    }

    #[test]
    fn earned_is_monotonic_across_the_day() {
        let settings = yearly_nine_to_five();
        let mut previous = f64::MIN;
        for hour in 0..24 {
            for minute in [0, 15, 30, 45] {
                let snapshot = compute_snapshot(&settings, at(hour, minute, 0));
                assert!(
                    snapshot.earned >= previous,
                    "earned decreased at {hour:02}:{minute:02}"
                );
                previous = snapshot.earned;
            }
        }
    }

    #[test]
    fn percent_stays_within_bounds() {
        let settings = yearly_nine_to_five();
        for hour in 0..24 {
            let snapshot = compute_snapshot(&settings, at(hour, 29, 59));
            assert!((0.0..=100.0).contains(&snapshot.percent_complete));
        }
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let snapshot = compute_snapshot(&yearly_nine_to_five(), at(10, 0, 0));
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("dailyPay").is_some());
        assert!(json.get("percentComplete").is_some());
        assert!(json.get("workdaySecs").is_some());
    }
}
