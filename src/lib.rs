pub mod clock;
#[cfg(feature = "serde")]
pub mod input;
pub mod room;
pub mod time;
#[cfg(feature = "wasm")]
mod wasm;

pub use clock::{ClockError, WallClock};
#[cfg(feature = "serde")]
pub use input::{free_interval_strings, BookingRecord, Input, RoomRecord, ValidationError};
pub use room::{compute_free_intervals, Booking, FreeInterval, RangeError, RoomHours};
