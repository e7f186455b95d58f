use crate::clock::{ClockError, WallClock};
use crate::time::{Available, TimeRange};
use itertools::Itertools;
use log::debug;
#[cfg(feature = "serde")]
use serde::Serialize;
use std::convert::TryFrom;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum RangeError {
    #[error(transparent)]
    Clock(#[from] ClockError),
    #[error("Range must end after it starts: {start} - {end}")]
    EmptyRange { start: WallClock, end: WallClock },
}

fn checked_range(start: WallClock, end: WallClock) -> Result<(WallClock, WallClock), RangeError> {
    if start < end {
        Ok((start, end))
    } else {
        Err(RangeError::EmptyRange { start, end })
    }
}

/// The daily window in which a room can be booked. No overnight wraparound.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RoomHours {
    start: WallClock,
    end: WallClock,
}

impl RoomHours {
    pub fn new(start: WallClock, end: WallClock) -> Result<RoomHours, RangeError> {
        let (start, end) = checked_range(start, end)?;
        Ok(RoomHours { start, end })
    }

    /// # Examples
    /// ```
    /// use raumplan_libs::room::RoomHours;
    ///
    /// assert!(RoomHours::parse("08:00 AM", "05:00 PM").is_ok());
    /// assert!(RoomHours::parse("05:00 PM", "08:00 AM").is_err());
    /// ```
    pub fn parse(start: &str, end: &str) -> Result<RoomHours, RangeError> {
        RoomHours::new(start.parse()?, end.parse()?)
    }

    pub fn start(&self) -> WallClock {
        self.start
    }

    pub fn end(&self) -> WallClock {
        self.end
    }

    pub fn range(&self) -> TimeRange<u16> {
        TimeRange::new(self.start.encoded(), self.end.encoded())
    }
}

/// An existing reservation of a room on the day being looked at.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Booking {
    start: WallClock,
    end: WallClock,
}

impl Booking {
    pub fn new(start: WallClock, end: WallClock) -> Result<Booking, RangeError> {
        let (start, end) = checked_range(start, end)?;
        Ok(Booking { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Booking, RangeError> {
        Booking::new(start.parse()?, end.parse()?)
    }

    pub fn start(&self) -> WallClock {
        self.start
    }

    pub fn end(&self) -> WallClock {
        self.end
    }

    pub fn range(&self) -> TimeRange<u16> {
        TimeRange::new(self.start.encoded(), self.end.encoded())
    }

    /// Only for non-empty ranges built from valid bookings
    pub(crate) fn from_range(range: TimeRange<u16>) -> Booking {
        debug_assert!(!range.is_empty());
        Booking {
            start: WallClock::from_encoded(range.start()),
            end: WallClock::from_encoded(range.end()),
        }
    }
}

impl TryFrom<TimeRange<u16>> for Booking {
    type Error = RangeError;

    fn try_from(range: TimeRange<u16>) -> Result<Self, Self::Error> {
        Booking::new(
            WallClock::try_from(range.start())?,
            WallClock::try_from(range.end())?,
        )
    }
}

/// A maximal span inside the operating hours with no booking on it.
/// Displays as `"08:00 AM - 10:00 AM"`.
#[cfg_attr(feature = "serde", derive(Serialize), serde(into = "String"))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FreeInterval {
    start: WallClock,
    end: WallClock,
}

impl FreeInterval {
    pub fn start(&self) -> WallClock {
        self.start
    }

    pub fn end(&self) -> WallClock {
        self.end
    }

    pub fn range(&self) -> TimeRange<u16> {
        TimeRange::new(self.start.encoded(), self.end.encoded())
    }

    /// Whether `[start, end)` can be booked without leaving this interval
    pub fn fits(&self, start: WallClock, end: WallClock) -> bool {
        self.range()
            .contains(TimeRange::new(start.encoded(), end.encoded()))
    }

    /// Only for non-empty ranges cut from valid room hours
    pub(crate) fn from_range(range: TimeRange<u16>) -> FreeInterval {
        debug_assert!(!range.is_empty());
        FreeInterval {
            start: WallClock::from_encoded(range.start()),
            end: WallClock::from_encoded(range.end()),
        }
    }
}

impl TryFrom<TimeRange<u16>> for FreeInterval {
    type Error = RangeError;

    /// # Examples
    /// ```
    /// use raumplan_libs::room::FreeInterval;
    /// use raumplan_libs::time::TimeRange;
    /// use std::convert::TryFrom;
    ///
    /// let free = FreeInterval::try_from(TimeRange::new(1300_u16, 1430)).unwrap();
    /// assert_eq!(free.to_string(), "01:00 PM - 02:30 PM");
    /// assert!(FreeInterval::try_from(TimeRange::new(1000_u16, 1000)).is_err());
    /// ```
    fn try_from(range: TimeRange<u16>) -> Result<Self, Self::Error> {
        let (start, end) = checked_range(
            WallClock::try_from(range.start())?,
            WallClock::try_from(range.end())?,
        )?;
        Ok(FreeInterval { start, end })
    }
}

impl fmt::Display for FreeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

impl From<FreeInterval> for String {
    fn from(interval: FreeInterval) -> Self {
        interval.to_string()
    }
}

/// Computes the free intervals of a room for one day.
///
/// `bookings` must all belong to the room and the day in question; they may
/// be unsorted and, although they should not, may overlap. The result is
/// ordered earliest first and never leaves `hours`, even for bookings that
/// reach outside of them.
///
/// # Examples
/// ```
/// use raumplan_libs::room::{compute_free_intervals, Booking, RoomHours};
///
/// let hours = RoomHours::parse("08:00 AM", "05:00 PM").unwrap();
/// let bookings = vec![Booking::parse("10:00 AM", "11:00 AM").unwrap()];
///
/// let free = compute_free_intervals(&hours, &bookings)
///     .iter()
///     .map(ToString::to_string)
///     .collect::<Vec<_>>();
///
/// assert_eq!(free, vec!["08:00 AM - 10:00 AM", "11:00 AM - 05:00 PM"]);
/// ```
pub fn compute_free_intervals(hours: &RoomHours, bookings: &[Booking]) -> Vec<FreeInterval> {
    if bookings.is_empty() {
        return vec![FreeInterval {
            start: hours.start,
            end: hours.end,
        }];
    }

    let blocked = bookings.iter().map(Booking::range).collect_vec();
    let free = blocked.iter().get_availability(hours.range());

    debug!(
        "{} free intervals between {} and {} around {} bookings",
        free.len(),
        hours.start,
        hours.end,
        bookings.len()
    );

    free.into_iter().map(FreeInterval::from_range).collect()
}
