use std::fmt;

use chrono::{Datelike, NaiveDate};

/// A calendar month, the unit the Events API is queried by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        // Reject anything chrono cannot place a first day for.
        NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(&self) -> u32 {
        self.succ()
            .first_day()
            .signed_duration_since(self.first_day())
            .num_days() as u32
    }

    /// Column of the 1st in a Sunday-first week.
    pub fn start_weekday(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Same day of month in this month, clamped to its last day.
    pub fn clamp_day(&self, day: u32) -> NaiveDate {
        let day = day.clamp(1, self.days_in_month());
        self.day(day).unwrap_or_else(|| self.first_day())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self.month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            12 => "December",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_months() {
        assert!(YearMonth::new(2024, 0).is_none());
        assert!(YearMonth::new(2024, 13).is_none());
        assert!(YearMonth::new(2024, 12).is_some());
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(YearMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(YearMonth::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(1900, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(2024, 12).unwrap().days_in_month(), 31);
        assert_eq!(YearMonth::new(2024, 4).unwrap().days_in_month(), 30);
    }

    #[test]
    fn march_2024_starts_on_friday() {
        assert_eq!(YearMonth::new(2024, 3).unwrap().start_weekday(), 5);
        // September 2024 starts on a Sunday: no leading blanks.
        assert_eq!(YearMonth::new(2024, 9).unwrap().start_weekday(), 0);
    }

    #[test]
    fn navigation_wraps_years() {
        let jan = YearMonth::new(2025, 1).unwrap();
        assert_eq!(jan.pred(), YearMonth::new(2024, 12).unwrap());
        assert_eq!(jan.pred().succ(), jan);
        assert_eq!(jan.to_string(), "January 2025");
    }

    #[test]
    fn clamp_day_keeps_within_month() {
        let feb = YearMonth::new(2024, 2).unwrap();
        assert_eq!(feb.clamp_day(31), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(feb.clamp_day(0), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }
}
