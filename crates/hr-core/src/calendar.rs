//! Calendar classification: holidays, weekends and workdays.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A named, organization-wide holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    pub date: NaiveDate,
    pub name: String,
}

/// Which weekdays count as the weekend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekendPolicy {
    days: BTreeSet<u32>,
}

impl WeekendPolicy {
    /// Builds a policy from the given weekdays.
    pub fn new(days: impl IntoIterator<Item = Weekday>) -> Self {
        Self {
            days: days
                .into_iter()
                .map(|day| day.num_days_from_monday())
                .collect(),
        }
    }

    /// Returns true if `date` falls on a weekend day.
    #[must_use]
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.days.contains(&date.weekday().num_days_from_monday())
    }
}

impl Default for WeekendPolicy {
    fn default() -> Self {
        Self::new([Weekday::Sat, Weekday::Sun])
    }
}

/// Classification of a single calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayType<'a> {
    /// A holiday, carrying its display name.
    Holiday(&'a str),
    Weekend,
    Workday,
}

/// Holiday list plus weekend rule.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    holidays: BTreeMap<NaiveDate, String>,
    weekend: WeekendPolicy,
}

impl HolidayCalendar {
    pub fn new(holidays: impl IntoIterator<Item = HolidayEntry>, weekend: WeekendPolicy) -> Self {
        Self {
            holidays: holidays
                .into_iter()
                .map(|entry| (entry.date, entry.name))
                .collect(),
            weekend,
        }
    }

    /// Classifies `date`.
    ///
    /// Holidays are checked before the weekend rule, so a holiday that lands
    /// on a weekend is still reported as a holiday with its name.
    #[must_use]
    pub fn classify(&self, date: NaiveDate) -> DayType<'_> {
        if let Some(name) = self.holidays.get(&date) {
            return DayType::Holiday(name);
        }
        if self.weekend.is_weekend(date) {
            return DayType::Weekend;
        }
        DayType::Workday
    }

    /// Returns the holiday name for `date`, if any.
    #[must_use]
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.holidays.get(&date).map(String::as_str)
    }

    pub fn weekend(&self) -> &WeekendPolicy {
        &self.weekend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar(entries: &[(NaiveDate, &str)]) -> HolidayCalendar {
        HolidayCalendar::new(
            entries.iter().map(|(date, name)| HolidayEntry {
                date: *date,
                name: (*name).to_string(),
            }),
            WeekendPolicy::default(),
        )
    }

    #[test]
    fn holiday_on_weekday_is_holiday() {
        // 2024-01-26 is a Friday
        let cal = calendar(&[(date(2024, 1, 26), "Republic Day")]);
        assert_eq!(
            cal.classify(date(2024, 1, 26)),
            DayType::Holiday("Republic Day")
        );
    }

    #[test]
    fn holiday_wins_over_weekend() {
        // 2024-08-17 is a Saturday
        let cal = calendar(&[(date(2024, 8, 17), "Founders Day")]);
        assert_eq!(
            cal.classify(date(2024, 8, 17)),
            DayType::Holiday("Founders Day")
        );
        assert_eq!(cal.classify(date(2024, 8, 18)), DayType::Weekend);
    }

    #[test]
    fn plain_days_follow_the_weekend_rule() {
        let cal = calendar(&[]);
        assert_eq!(cal.classify(date(2024, 3, 9)), DayType::Weekend);
        assert_eq!(cal.classify(date(2024, 3, 10)), DayType::Weekend);
        assert_eq!(cal.classify(date(2024, 3, 11)), DayType::Workday);
    }

    #[test]
    fn custom_weekend_policy() {
        let cal = HolidayCalendar::new([], WeekendPolicy::new([Weekday::Fri, Weekday::Sat]));
        // 2024-03-08 Friday, 2024-03-10 Sunday
        assert_eq!(cal.classify(date(2024, 3, 8)), DayType::Weekend);
        assert_eq!(cal.classify(date(2024, 3, 10)), DayType::Workday);
    }

    #[test]
    fn holiday_weekend_tie_break_holds_for_a_whole_year() {
        let holidays: Vec<_> = date(2024, 1, 1)
            .iter_days()
            .take(366)
            .filter(|d| d.day() == 1)
            .map(|d| (d, "First"))
            .collect();
        let cal = calendar(&holidays);
        for (day, _) in &holidays {
            assert_eq!(cal.classify(*day), DayType::Holiday("First"));
        }
    }
}
