use crate::input::{free_interval_strings, BookingRecord, RoomRecord};
use wasm_bindgen::prelude::*;

/// `room` and `bookings` use the booking API's shapes. The bookings must
/// already be narrowed to the room and the selected date.
#[wasm_bindgen(js_name = freeIntervals)]
pub fn free_intervals(room: JsValue, bookings: JsValue) -> Result<JsValue, JsValue> {
    let room: RoomRecord = serde_wasm_bindgen::from_value(room)?;
    let bookings: Vec<BookingRecord> = serde_wasm_bindgen::from_value(bookings)?;

    let free = free_interval_strings(&room, &bookings)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;

    Ok(serde_wasm_bindgen::to_value(&free)?)
}
