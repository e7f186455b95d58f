#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ClockError {
    #[error("Expected a time like \"08:00 AM\", got {0:?}")]
    Malformed(String),
    #[error("Hour {0} is out of range")]
    HourOutOfRange(u16),
    #[error("Minute {0} is out of range")]
    MinuteOutOfRange(u16),
}

/// A time of day, stored as `hour * 100 + minute` on the 24-hour clock.
///
/// The encoding is not minutes since midnight, but it orders the same way,
/// which is all the free slot sweep needs.
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(try_from = "String", into = "String")
)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallClock(u16);

impl WallClock {
    /// Builds a time from 24-hour parts
    ///
    /// # Examples
    /// ```
    /// use raumplan_libs::clock::WallClock;
    ///
    /// let time = WallClock::new(17, 30).unwrap();
    /// assert_eq!(time.to_string(), "05:30 PM");
    /// assert!(WallClock::new(24, 0).is_err());
    /// ```
    pub fn new(hour: u16, minute: u16) -> Result<WallClock, ClockError> {
        if hour > 23 {
            Err(ClockError::HourOutOfRange(hour))
        } else if minute > 59 {
            Err(ClockError::MinuteOutOfRange(minute))
        } else {
            Ok(WallClock(hour * 100 + minute))
        }
    }

    /// Only for values produced by `encoded` on a valid time.
    pub(crate) fn from_encoded(encoded: u16) -> WallClock {
        debug_assert!(encoded / 100 < 24 && encoded % 100 < 60);
        WallClock(encoded)
    }

    pub fn encoded(self) -> u16 {
        self.0
    }

    /// Hour of day, 0-23
    pub fn hour(self) -> u16 {
        self.0 / 100
    }

    pub fn minute(self) -> u16 {
        self.0 % 100
    }
}

impl FromStr for WallClock {
    type Err = ClockError;

    /// Parses `"H:MM AM"` / `"HH:MM PM"`. The suffix is case-insensitive and
    /// the space before it is optional.
    ///
    /// # Examples
    /// ```
    /// use raumplan_libs::clock::WallClock;
    ///
    /// let noon: WallClock = "12:00 PM".parse().unwrap();
    /// let midnight: WallClock = "12:00 AM".parse().unwrap();
    /// let evening: WallClock = "7:45pm".parse().unwrap();
    ///
    /// assert_eq!(noon.encoded(), 1200);
    /// assert_eq!(midnight.encoded(), 0);
    /// assert_eq!(evening.encoded(), 1945);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ClockError::Malformed(s.to_string());
        let trimmed = s.trim();

        if trimmed.len() < 2 || !trimmed.is_char_boundary(trimmed.len() - 2) {
            return Err(malformed());
        }
        let (clock, meridiem) = trimmed.split_at(trimmed.len() - 2);
        let pm = if meridiem.eq_ignore_ascii_case("pm") {
            true
        } else if meridiem.eq_ignore_ascii_case("am") {
            false
        } else {
            return Err(malformed());
        };

        let clock = clock.strip_suffix(' ').unwrap_or(clock);
        let (hour, minute) = clock.split_once(':').ok_or_else(malformed)?;
        if hour.is_empty()
            || hour.len() > 2
            || minute.len() != 2
            || !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }

        let hour: u16 = hour.parse().map_err(|_| malformed())?;
        let minute: u16 = minute.parse().map_err(|_| malformed())?;

        if !(1..=12).contains(&hour) {
            return Err(ClockError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ClockError::MinuteOutOfRange(minute));
        }

        let hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (hour, true) => hour + 12,
            (hour, false) => hour,
        };

        Ok(WallClock(hour * 100 + minute))
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = self.hour();
        let meridiem = if hour < 12 { "AM" } else { "PM" };
        let hour = match hour % 12 {
            0 => 12,
            hour => hour,
        };

        write!(f, "{:02}:{:02} {}", hour, self.minute(), meridiem)
    }
}

impl TryFrom<String> for WallClock {
    type Error = ClockError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<u16> for WallClock {
    type Error = ClockError;

    /// Reads back an `encoded` value
    ///
    /// # Examples
    /// ```
    /// use raumplan_libs::clock::WallClock;
    /// use std::convert::TryFrom;
    ///
    /// assert_eq!(WallClock::try_from(1330_u16).unwrap().to_string(), "01:30 PM");
    /// assert!(WallClock::try_from(2500_u16).is_err());
    /// assert!(WallClock::try_from(1075_u16).is_err());
    /// ```
    fn try_from(encoded: u16) -> Result<Self, Self::Error> {
        WallClock::new(encoded / 100, encoded % 100)
    }
}

impl From<WallClock> for String {
    fn from(time: WallClock) -> Self {
        time.to_string()
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for WallClock {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let hour: u16 = u.int_in_range(0..=23)?;
        let minute: u16 = u.int_in_range(0..=59)?;
        Ok(WallClock(hour * 100 + minute))
    }
}
