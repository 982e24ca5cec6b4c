pub mod calendar;
pub mod compute;

pub use calendar::business_days_in_month;
pub use compute::{compute_snapshot, EarningsSnapshot};
