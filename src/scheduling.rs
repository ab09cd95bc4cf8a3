//! Working-hours rule for accepting a booking time.
//!
//! The rule only looks at the time of day. It does not consult existing
//! bookings, so two appointments for the same doctor at the same minute
//! both pass.

use chrono::{NaiveDateTime, NaiveTime, Timelike};

/// Inclusive daily window in which appointments may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WorkingHours {
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time <= self.end
    }

    /// Whether `doctor_name` can be booked at `at`.
    ///
    /// Only the time of day decides; every doctor shares one window.
    pub fn is_available(&self, doctor_name: &str, at: NaiveDateTime) -> bool {
        let accepted = self.contains(at.time());
        if !accepted {
            tracing::debug!(doctor_name, hour = at.hour(), minute = at.minute(), "Outside working hours");
        }
        accepted
    }
}

impl Default for WorkingHours {
    /// 09:00 to 17:00, both ends accepted.
    fn default() -> Self {
        Self::new(hm(9, 0), hm(17, 0))
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Check against the default 09:00-17:00 window.
pub fn is_available(doctor_name: &str, at: NaiveDateTime) -> bool {
    WorkingHours::default().is_available(doctor_name, at)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 4, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn window_edges_are_inclusive() {
        assert!(is_available("Dr. Smith", at(9, 0, 0)));
        assert!(is_available("Dr. Smith", at(17, 0, 0)));
    }

    #[test]
    fn minute_outside_window_is_rejected() {
        assert!(!is_available("Dr. Smith", at(8, 59, 0)));
        assert!(!is_available("Dr. Smith", at(17, 1, 0)));
    }

    #[test]
    fn second_past_closing_is_rejected() {
        assert!(!is_available("Dr. Smith", at(17, 0, 1)));
    }

    #[test]
    fn doctor_name_does_not_change_the_answer() {
        for doctor in ["Dr. Smith", "Dr. Brown", ""] {
            assert!(is_available(doctor, at(12, 30, 0)));
            assert!(!is_available(doctor, at(0, 0, 0)));
        }
    }

    #[test]
    fn custom_window_is_respected() {
        let evening = WorkingHours::new(hm(18, 0), hm(21, 30));
        assert!(evening.is_available("Dr. Smith", at(21, 30, 0)));
        assert!(!evening.is_available("Dr. Smith", at(10, 0, 0)));
    }
}
