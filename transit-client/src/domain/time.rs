//! Schedule time handling.
//!
//! The backend provides departure times as "HH:MM:SS" strings measured from
//! the start of the service day, so a trip that runs past midnight reports
//! hours of 24 or more ("25:30:00"). Riders read times on a 12-hour clock,
//! so this module converts service-day times into [`ClockTime`] values that
//! order by time of day and display as "H:MM AM/PM".

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time measured from the start of a service day.
///
/// Unlike a wall-clock time, the hour is unbounded above: "24:10:00" is ten
/// past midnight at the end of the service day.
///
/// # Examples
///
/// ```
/// use transit_client::domain::ServiceTime;
///
/// let t = ServiceTime::parse("25:30:00").unwrap();
/// assert_eq!(t.hours(), 25);
/// assert_eq!(t.to_clock().to_string(), "1:30 AM");
///
/// assert!(ServiceTime::parse("12:60:00").is_err());
/// assert!(ServiceTime::parse("noon").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceTime {
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl ServiceTime {
    /// Parse "HH:MM:SS" or "HH:MM". The hour may have one to three digits.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let mut parts = s.trim().split(':');

        let hours = parts
            .next()
            .filter(|h| (1..=3).contains(&h.len()) && h.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| TimeError::new("invalid hour digits"))?
            .parse::<u32>()
            .map_err(|_| TimeError::new("invalid hour digits"))?;

        let minutes = parts
            .next()
            .and_then(|m| parse_two_digits(m.as_bytes()))
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minutes > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let seconds = match parts.next() {
            Some(sec) => {
                parse_two_digits(sec.as_bytes()).ok_or_else(|| TimeError::new("invalid second digits"))?
            }
            None => 0,
        };
        if seconds > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        if parts.next().is_some() {
            return Err(TimeError::new("expected HH:MM:SS format"));
        }

        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Returns the hour, which may be 24 or more.
    pub fn hours(&self) -> u32 {
        self.hours
    }

    /// Returns the minute (0-59).
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Returns the second (0-59).
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Convert to a wall-clock time of day, wrapping hours past midnight.
    ///
    /// Seconds are dropped: riders are shown minute precision.
    pub fn to_clock(&self) -> ClockTime {
        ClockTime::from_hm(self.hours % 24, self.minutes)
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// A wall-clock time of day with minute precision, shown on a 12-hour clock.
///
/// Ordering follows the time of day: 12:00 AM (midnight) sorts first and
/// 11:59 PM last.
///
/// # Examples
///
/// ```
/// use transit_client::domain::ClockTime;
///
/// let midnight: ClockTime = "12:05 AM".parse().unwrap();
/// let noon: ClockTime = "12:00 PM".parse().unwrap();
/// let one: ClockTime = "1:00 PM".parse().unwrap();
///
/// assert!(midnight < noon);
/// assert!(noon < one);
/// assert_eq!(one.to_string(), "1:00 PM");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Build a clock time from a 24-hour hour (0-23) and minute (0-59).
    ///
    /// Out-of-range components are wrapped into range.
    pub fn from_hm(hour: u32, minute: u32) -> Self {
        let time = NaiveTime::from_hms_opt(hour % 24, minute % 60, 0).unwrap_or(NaiveTime::MIN);
        Self(time)
    }

    /// Returns the 24-hour hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes since midnight.
    pub fn minute_of_day(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Returns true for times from noon onwards.
    pub fn is_pm(&self) -> bool {
        self.0.hour12().0
    }
}

impl Ord for ClockTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for ClockTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (pm, hour) = self.0.hour12();
        let suffix = if pm { "PM" } else { "AM" };
        write!(f, "{}:{:02} {}", hour, self.minute(), suffix)
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    /// Parse "H:MM AM" / "HH:MM PM". The suffix is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (clock, suffix) = s
            .trim()
            .split_once(' ')
            .ok_or_else(|| TimeError::new("expected H:MM AM/PM format"))?;

        let pm = match suffix.trim() {
            x if x.eq_ignore_ascii_case("AM") => false,
            x if x.eq_ignore_ascii_case("PM") => true,
            _ => return Err(TimeError::new("suffix must be AM or PM")),
        };

        let (hour, minute) = clock
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected colon between hour and minute"))?;

        let hour = match hour.as_bytes() {
            [d] => (*d as char).to_digit(10),
            bytes @ [_, _] => parse_two_digits(bytes),
            _ => None,
        }
        .ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if !(1..=12).contains(&hour) {
            return Err(TimeError::new("hour must be 1-12"));
        }

        let minute =
            parse_two_digits(minute.as_bytes()).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        // 12 AM is midnight, 12 PM is noon.
        let hour = match (pm, hour) {
            (false, 12) => 0,
            (true, 12) => 12,
            (true, h) => h + 12,
            (false, h) => h,
        };

        Ok(Self::from_hm(hour, minute))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
