//! Tariff calendar: season and day-type resolution.
//!
//! The ERSE tariff calendar splits the year into a summer and a winter
//! period at the same movable boundaries as European DST (last Sunday of
//! March, last Sunday of October), and folds national holidays onto the
//! Sunday slot tables.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Last Sunday of the given month, or `None` for an out-of-range year.
///
/// Computed by taking the final day of the month and walking back to the
/// nearest Sunday, so the boundary shifts per year.
pub fn last_sunday(year: i32, month: u32) -> Option<NaiveDate> {
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next_first?.pred_opt()?;
    last.checked_sub_days(Days::new(u64::from(last.weekday().num_days_from_sunday())))
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    #[display("summer")]
    Summer,

    #[display("winter")]
    Winter,
}

impl Season {
    /// Summer is the half-open interval from the last Sunday of March
    /// (inclusive) to the last Sunday of October (exclusive); winter is the
    /// complement.
    pub fn of(date: NaiveDate) -> Self {
        let summer_start = last_sunday(date.year(), 3);
        let summer_end = last_sunday(date.year(), 10);
        match (summer_start, summer_end) {
            (Some(start), Some(end)) if (start <= date) && (date < end) => Self::Summer,
            _ => Self::Winter,
        }
    }
}

/// Day type for slot-table selection. Coarser than a weekday: the tariff
/// tables only distinguish working days, Saturdays and Sundays.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    #[display("weekday")]
    Weekday,

    #[display("saturday")]
    Saturday,

    #[display("sunday")]
    Sunday,
}

impl DayType {
    /// Holidays count as Sundays regardless of the actual weekday.
    pub fn of(date: NaiveDate, holidays: &HolidayCalendar) -> Self {
        if holidays.contains(date) {
            return Self::Sunday;
        }
        match date.weekday() {
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
            Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => {
                Self::Weekday
            }
        }
    }
}

/// National holidays by exact calendar date, with display names.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayCalendar(BTreeMap<NaiveDate, String>);

impl HolidayCalendar {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains_key(&date)
    }

    pub fn name_of(&self, date: NaiveDate) -> Option<&str> {
        self.0.get(&date).map(String::as_str)
    }

    pub fn insert(&mut self, date: NaiveDate, name: impl Into<String>) {
        self.0.insert(date, name.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(NaiveDate, String)> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
