//! Doctors that can be booked. Fixed at build time, never persisted.

pub const DOCTORS: [&str; 4] = ["Dr. Smith", "Dr. Johnson", "Dr. Williams", "Dr. Brown"];

/// Doctor at a 1-based menu position.
pub fn doctor_at(position: usize) -> Option<&'static str> {
    position.checked_sub(1).and_then(|i| DOCTORS.get(i)).copied()
}

pub fn len() -> usize {
    DOCTORS.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_one_based() {
        assert_eq!(doctor_at(1), Some("Dr. Smith"));
        assert_eq!(doctor_at(4), Some("Dr. Brown"));
    }

    #[test]
    fn out_of_range_positions_are_none() {
        assert_eq!(doctor_at(0), None);
        assert_eq!(doctor_at(len() + 1), None);
    }
}
