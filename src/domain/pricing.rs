//! Tiered rental pricing
//!
//! Price is determined by which duration bracket the interval falls into:
//! up to four hours, up to twelve hours, otherwise per started day.
//! Amounts are in the smallest currency unit.

use super::vehicle::RateSchedule;
use super::{DomainResult, Interval};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Compute the total price for renting at `rates` over `interval`.
///
/// First matching tier wins:
/// - duration ≤ 4h  → `rate_4h`
/// - duration ≤ 12h → `rate_12h`
/// - otherwise      → `ceil(duration / 24h) * daily_rate`
///
/// Any fraction of a day rounds up ("pay for any part of a day").
/// Pure and deterministic; interval validity is enforced by [`Interval`].
pub fn price(rates: &RateSchedule, interval: &Interval) -> DomainResult<i64> {
    let hours = interval.duration_seconds() as f64 / SECONDS_PER_HOUR;

    let amount = if hours <= 4.0 {
        rates.rate_4h
    } else if hours <= 12.0 {
        rates.rate_12h
    } else {
        let days = (hours / 24.0).ceil() as i64;
        days * rates.daily_rate
    };

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn rates() -> RateSchedule {
        RateSchedule {
            rate_4h: 500,
            rate_12h: 900,
            daily_rate: 1200,
        }
    }

    fn interval_of(duration: Duration) -> Interval {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        Interval::new(start, start + duration).unwrap()
    }

    fn price_for(duration: Duration) -> i64 {
        price(&rates(), &interval_of(duration)).unwrap()
    }

    #[test]
    fn four_hour_tier() {
        assert_eq!(price_for(Duration::hours(1)), 500);
        assert_eq!(price_for(Duration::hours(4)), 500); // inclusive boundary
    }

    #[test]
    fn just_over_four_hours_charges_twelve_hour_rate() {
        assert_eq!(price_for(Duration::hours(4) + Duration::seconds(1)), 900);
    }

    #[test]
    fn twelve_hour_tier() {
        assert_eq!(price_for(Duration::hours(12)), 900); // inclusive boundary
    }

    #[test]
    fn just_over_twelve_hours_charges_one_day() {
        assert_eq!(price_for(Duration::hours(12) + Duration::seconds(1)), 1200);
    }

    #[test]
    fn partial_days_round_up() {
        assert_eq!(price_for(Duration::hours(24)), 1200);
        assert_eq!(price_for(Duration::hours(25)), 2 * 1200);
        assert_eq!(price_for(Duration::hours(48)), 2 * 1200);
        assert_eq!(price_for(Duration::hours(48) + Duration::seconds(1)), 3 * 1200);
    }

    #[test]
    fn price_is_deterministic() {
        let iv = interval_of(Duration::hours(30));
        let r = rates();
        assert_eq!(price(&r, &iv).unwrap(), price(&r, &iv).unwrap());
    }
}
