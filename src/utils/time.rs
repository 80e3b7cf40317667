use chrono::NaiveDate;

/// Calendar days per year used when scaling time value.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Fraction of a year covered by `days` calendar days.
pub fn year_fraction(days: u32) -> f64 {
    f64::from(days) / DAYS_PER_YEAR
}

/// Days left on a longer-dated leg once a shorter-dated one expires.
///
/// Negative when the "shorter" leg actually outlives the longer one.
pub fn days_remaining_after(longer_days: u32, shorter_days: u32) -> i64 {
    i64::from(longer_days) - i64::from(shorter_days)
}

/// Calendar days from `as_of` until `expires_on`, floored at zero for past dates.
pub fn days_until(as_of: NaiveDate, expires_on: NaiveDate) -> u32 {
    let days = (expires_on - as_of).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_fraction() {
        assert!((year_fraction(45) - 45.0 / 365.0).abs() < 1e-12);
        assert_eq!(year_fraction(0), 0.0);
    }

    #[test]
    fn test_days_remaining_after() {
        assert_eq!(days_remaining_after(44, 9), 35);
        assert_eq!(days_remaining_after(9, 44), -35);
    }

    #[test]
    fn test_days_until() {
        let as_of = NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();
        let dec19 = NaiveDate::from_ymd_opt(2025, 12, 19).unwrap();
        assert_eq!(days_until(as_of, dec19), 44);
        assert_eq!(days_until(dec19, as_of), 0);
    }
}
