use crate::clock::{ClockError, WallClock};
use crate::room::{compute_free_intervals, Booking, FreeInterval, RangeError, RoomHours};
use crate::time::{TimeMerge, TimeRange};
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ValidationError {
    #[error("Invalid time in {location}: {source}")]
    InvalidTime {
        location: String,
        source: ClockError,
    },
    #[error("{location} must end after it starts: {start} - {end}")]
    EmptyRange {
        location: String,
        start: WallClock,
        end: WallClock,
    },
    #[error("No room found with id {id}")]
    UnknownRoom { id: String },
    #[error("More than one room has id {id}")]
    DuplicateRoom { id: String },
}

impl ValidationError {
    fn located(location: String, error: RangeError) -> Self {
        match error {
            RangeError::Clock(source) => ValidationError::InvalidTime { location, source },
            RangeError::EmptyRange { start, end } => ValidationError::EmptyRange {
                location,
                start,
                end,
            },
        }
    }
}

/// The booking API hands out ids as either strings or numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(id) => id,
        Id::Number(id) => id.to_string(),
    })
}

/// A room as returned by the booking API
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RoomRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

impl RoomRecord {
    pub fn hours(&self) -> Result<RoomHours, ValidationError> {
        RoomHours::parse(&self.start_time, &self.end_time)
            .map_err(|e| ValidationError::located(format!("Room ({})", self.id), e))
    }
}

/// A booking as returned by the booking API
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BookingRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub place_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl BookingRecord {
    pub fn booking(&self) -> Result<Booking, ValidationError> {
        Booking::parse(&self.start_time, &self.end_time).map_err(|e| {
            ValidationError::located(format!("Booking ({} on {})", self.place_id, self.date), e)
        })
    }

    fn is_for(&self, room_id: &str, date: &str) -> bool {
        self.place_id == room_id && self.date == date
    }
}

/// Rooms and bookings as fetched from the booking API. Lookups filter the
/// bookings down to one room and one date before handing them to
/// `compute_free_intervals`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Input {
    pub rooms: Vec<RoomRecord>,
    pub bookings: Vec<BookingRecord>,
}

impl Input {
    pub fn new(rooms: Vec<RoomRecord>, bookings: Vec<BookingRecord>) -> Self {
        Input { rooms, bookings }
    }

    /// Checks that room ids are unique and every time field of every record
    /// parses, reporting the first bad one
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.check_room_ids()?;

        for room in self.rooms.iter() {
            room.hours()?;
        }

        for booking in self.bookings.iter() {
            booking.booking()?;
        }

        Ok(())
    }

    fn check_room_ids(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(self.rooms.len());
        match self.rooms.iter().find(|room| !seen.insert(room.id.as_str())) {
            Some(room) => Err(ValidationError::DuplicateRoom {
                id: room.id.clone(),
            }),
            None => Ok(()),
        }
    }

    fn room(&self, room_id: &str) -> Result<&RoomRecord, ValidationError> {
        let mut rooms = self.rooms.iter().filter(|room| room.id == room_id);

        match (rooms.next(), rooms.next()) {
            (Some(room), None) => Ok(room),
            (Some(_), Some(_)) => Err(ValidationError::DuplicateRoom {
                id: room_id.to_string(),
            }),
            (None, _) => Err(ValidationError::UnknownRoom {
                id: room_id.to_string(),
            }),
        }
    }

    fn bookings_for(&self, room_id: &str, date: &str) -> Result<Vec<Booking>, ValidationError> {
        let bookings = self
            .bookings
            .iter()
            .filter(|booking| booking.is_for(room_id, date))
            .map(BookingRecord::booking)
            .collect::<Result<Vec<_>, _>>()?;

        debug!("{} bookings for room {} on {}", bookings.len(), room_id, date);

        Ok(bookings)
    }

    /// Free intervals of one room on `date`
    ///
    /// # Examples
    /// ```
    /// use raumplan_libs::input::{BookingRecord, Input, RoomRecord};
    ///
    /// let input = Input::new(
    ///     vec![RoomRecord {
    ///         id: "1".to_string(),
    ///         name: "Boardroom".to_string(),
    ///         start_time: "08:00 AM".to_string(),
    ///         end_time: "05:00 PM".to_string(),
    ///     }],
    ///     vec![BookingRecord {
    ///         place_id: "1".to_string(),
    ///         date: "2024-03-01".to_string(),
    ///         start_time: "10:00 AM".to_string(),
    ///         end_time: "11:00 AM".to_string(),
    ///     }],
    /// );
    ///
    /// let free = input.free_intervals("1", "2024-03-01").unwrap();
    /// assert_eq!(free.len(), 2);
    ///
    /// // Nothing is booked the day after
    /// let free = input.free_intervals("1", "2024-03-02").unwrap();
    /// assert_eq!(free[0].to_string(), "08:00 AM - 05:00 PM");
    /// ```
    pub fn free_intervals(
        &self,
        room_id: &str,
        date: &str,
    ) -> Result<Vec<FreeInterval>, ValidationError> {
        let hours = self.room(room_id)?.hours()?;
        let bookings = self.bookings_for(room_id, date)?;

        Ok(compute_free_intervals(&hours, &bookings))
    }

    /// Free intervals of every room on `date`, paired with the room id, in
    /// the order the rooms were listed
    pub fn availability(
        &self,
        date: &str,
    ) -> Result<Vec<(String, Vec<FreeInterval>)>, ValidationError> {
        self.check_room_ids()?;

        self.rooms
            .iter()
            .map(|room| -> Result<_, ValidationError> {
                let hours = room.hours()?;
                let bookings = self.bookings_for(&room.id, date)?;
                Ok((room.id.clone(), compute_free_intervals(&hours, &bookings)))
            })
            .collect()
    }

    /// The booked spans of one room on `date`, merged and cut to the
    /// operating hours
    pub fn busy_intervals(&self, room_id: &str, date: &str) -> Result<Vec<Booking>, ValidationError> {
        let window = self.room(room_id)?.hours()?.range();

        let busy = self
            .bookings_for(room_id, date)?
            .iter()
            .filter_map(|booking| booking.range().clamp(window))
            .sorted_by_key(|range| range.start())
            .collect::<Vec<TimeRange<u16>>>()
            .iter()
            .time_merge();

        Ok(busy.into_iter().map(Booking::from_range).collect())
    }

    /// Whether `[start, end)` can still be booked in the room on `date`
    pub fn is_available(
        &self,
        room_id: &str,
        date: &str,
        start: WallClock,
        end: WallClock,
    ) -> Result<bool, ValidationError> {
        if start >= end {
            return Err(ValidationError::EmptyRange {
                location: "Requested slot".to_string(),
                start,
                end,
            });
        }

        Ok(self
            .free_intervals(room_id, date)?
            .iter()
            .any(|free| free.fits(start, end)))
    }
}

/// Display strings of the free intervals for one room, from records the
/// caller already narrowed to that room and one date
///
/// # Examples
/// ```
/// use raumplan_libs::input::{free_interval_strings, BookingRecord, RoomRecord};
///
/// let room = RoomRecord {
///     id: "7".to_string(),
///     name: "Studio".to_string(),
///     start_time: "09:00 AM".to_string(),
///     end_time: "12:00 PM".to_string(),
/// };
/// let bookings = vec![BookingRecord {
///     place_id: "7".to_string(),
///     date: "2024-03-01".to_string(),
///     start_time: "09:00 AM".to_string(),
///     end_time: "10:00 AM".to_string(),
/// }];
///
/// assert_eq!(
///     free_interval_strings(&room, &bookings).unwrap(),
///     vec!["10:00 AM - 12:00 PM"]
/// );
/// ```
pub fn free_interval_strings(
    room: &RoomRecord,
    bookings: &[BookingRecord],
) -> Result<Vec<String>, ValidationError> {
    let hours = room.hours()?;
    let bookings = bookings
        .iter()
        .map(BookingRecord::booking)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(compute_free_intervals(&hours, &bookings)
        .iter()
        .map(ToString::to_string)
        .collect())
}
