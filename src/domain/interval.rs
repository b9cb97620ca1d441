//! Half-open rental interval `[start, end)`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DomainError, DomainResult};

/// A half-open time range during which a vehicle is reserved.
///
/// `end` is always strictly after `start`; zero-duration intervals are
/// rejected at construction so downstream code never sees one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        if end <= start {
            return Err(DomainError::InvalidInterval);
        }
        Ok(Self { start, end })
    }

    /// Elapsed duration in whole seconds.
    pub fn duration_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    /// Open-overlap test on half-open intervals.
    ///
    /// Back-to-back intervals (one ends exactly when the other begins)
    /// do NOT overlap, so same-instant handover between renters is legal.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap()
    }

    fn iv(start: u32, end: u32) -> Interval {
        Interval::new(at(start), at(end)).unwrap()
    }

    #[test]
    fn rejects_empty_interval() {
        assert!(matches!(
            Interval::new(at(9), at(9)),
            Err(DomainError::InvalidInterval)
        ));
        assert!(matches!(
            Interval::new(at(10), at(9)),
            Err(DomainError::InvalidInterval)
        ));
    }

    #[test]
    fn overlapping_intervals_conflict() {
        assert!(iv(9, 13).overlaps(&iv(12, 15)));
        assert!(iv(12, 15).overlaps(&iv(9, 13)));
        // containment
        assert!(iv(9, 18).overlaps(&iv(10, 11)));
        assert!(iv(10, 11).overlaps(&iv(9, 18)));
        // identical
        assert!(iv(9, 13).overlaps(&iv(9, 13)));
    }

    #[test]
    fn disjoint_intervals_do_not_conflict() {
        assert!(!iv(9, 11).overlaps(&iv(12, 14)));
        assert!(!iv(12, 14).overlaps(&iv(9, 11)));
    }

    #[test]
    fn back_to_back_is_disjoint() {
        assert!(!iv(9, 12).overlaps(&iv(12, 15)));
        assert!(!iv(12, 15).overlaps(&iv(9, 12)));
    }

    #[test]
    fn overlap_is_symmetric_and_exclusive_with_disjoint() {
        let pairs = [
            (iv(9, 12), iv(12, 15)),
            (iv(9, 13), iv(12, 15)),
            (iv(9, 18), iv(10, 11)),
            (iv(8, 9), iv(10, 11)),
        ];
        for (a, b) in pairs {
            assert_eq!(a.overlaps(&b), b.overlaps(&a));
            let conflicting = a.start < b.end && a.end > b.start;
            assert_eq!(a.overlaps(&b), conflicting);
        }
    }
}
