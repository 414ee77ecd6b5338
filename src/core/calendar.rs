//! Gregorian month lengths.

/// Divisible by 400, or divisible by 4 but not by 100.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-based) of `year`.  Out-of-range months
/// report 30.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn february_lengths() {
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
    }

    #[test]
    fn thirty_and_thirty_one() {
        assert_eq!(days_in_month(2023, 1), 31);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 8), 31);
        assert_eq!(days_in_month(2023, 11), 30);
    }

    #[test]
    fn agrees_with_chrono() {
        for year in 1890..=2110 {
            for month in 1..=12u32 {
                let last = days_in_month(year, month);
                assert!(NaiveDate::from_ymd_opt(year, month, last).is_some());
                assert!(
                    NaiveDate::from_ymd_opt(year, month, last + 1).is_none(),
                    "{year}-{month}"
                );
            }
        }
    }
}
