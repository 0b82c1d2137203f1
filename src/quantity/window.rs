use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::prelude::*;

/// Wall-clock time of day in minutes since midnight.
///
/// `24:00` (1440 minutes) is accepted as a window *end* so that a full day
/// can be written `00:00..24:00`; no instant ever equals it.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: Self = Self(0);
    pub const END_OF_DAY: Self = Self(1440);

    pub const fn new(hour: u16, minute: u16) -> Self {
        Self(hour * 60 + minute)
    }

    pub const fn minutes(self) -> u16 {
        self.0
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        Self::new(time.hour() as u16, time.minute() as u16)
    }
}

impl FromStr for ClockTime {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self> {
        let (hour, minute) =
            string.trim().split_once(':').context("expected a `HH:MM` clock time")?;
        let hour: u16 = hour.parse().with_context(|| format!("bad hour in `{string}`"))?;
        let minute: u16 = minute.parse().with_context(|| format!("bad minute in `{string}`"))?;
        ensure!(minute < 60, "bad minute in `{string}`");
        ensure!(hour < 24 || (hour == 24 && minute == 0), "bad hour in `{string}`");
        Ok(Self::new(hour, minute))
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Debug for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// Time-of-day window, start inclusive, end exclusive.
///
/// A window with `start > end` spans midnight: `22:00..08:00` is the union
/// of `22:00..24:00` and `00:00..08:00`.
#[serde_as]
#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClockWindow {
    #[serde_as(as = "DisplayFromStr")]
    pub start: ClockTime,

    #[serde_as(as = "DisplayFromStr")]
    pub end: ClockTime,
}

impl ClockWindow {
    pub const fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    pub const FULL_DAY: Self = Self::new(ClockTime::MIDNIGHT, ClockTime::END_OF_DAY);

    pub fn contains(self, time: ClockTime) -> bool {
        if self.start <= self.end {
            (self.start <= time) && (time < self.end)
        } else {
            (time >= self.start) || (time < self.end)
        }
    }

    /// Window length in minutes, accounting for the midnight wrap.
    pub const fn len_minutes(self) -> u16 {
        if self.start.0 <= self.end.0 {
            self.end.0 - self.start.0
        } else {
            1440 - self.start.0 + self.end.0
        }
    }
}

impl Debug for ClockWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl Display for ClockWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}–{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() -> Result {
        assert_eq!(ClockTime::from_str("08:00")?, ClockTime::new(8, 0));
        assert_eq!(ClockTime::from_str("10:30")?, ClockTime::new(10, 30));
        assert_eq!(ClockTime::from_str("24:00")?, ClockTime::END_OF_DAY);
        assert!(ClockTime::from_str("24:01").is_err());
        assert!(ClockTime::from_str("12:60").is_err());
        assert!(ClockTime::from_str("noon").is_err());
        Ok(())
    }

    #[test]
    fn test_contains_plain() {
        let window = ClockWindow::new(ClockTime::new(8, 0), ClockTime::new(22, 0));
        assert!(!window.contains(ClockTime::new(7, 59)));
        assert!(window.contains(ClockTime::new(8, 0)));
        assert!(window.contains(ClockTime::new(21, 59)));
        assert!(!window.contains(ClockTime::new(22, 0)));
    }

    #[test]
    fn test_contains_wrapping() {
        let window = ClockWindow::new(ClockTime::new(22, 0), ClockTime::new(8, 0));
        assert!(!window.contains(ClockTime::new(21, 59)));
        assert!(window.contains(ClockTime::new(22, 0)));
        assert!(window.contains(ClockTime::MIDNIGHT));
        assert!(window.contains(ClockTime::new(7, 59)));
        assert!(!window.contains(ClockTime::new(8, 0)));
    }

    #[test]
    fn test_full_day() {
        assert!(ClockWindow::FULL_DAY.contains(ClockTime::MIDNIGHT));
        assert!(ClockWindow::FULL_DAY.contains(ClockTime::new(23, 59)));
        assert_eq!(ClockWindow::FULL_DAY.len_minutes(), 1440);
    }

    #[test]
    fn test_len_minutes() {
        assert_eq!(
            ClockWindow::new(ClockTime::new(22, 0), ClockTime::new(8, 0)).len_minutes(),
            600
        );
        assert_eq!(
            ClockWindow::new(ClockTime::new(8, 0), ClockTime::new(10, 30)).len_minutes(),
            150
        );
    }
}
