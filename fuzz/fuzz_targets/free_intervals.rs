#![no_main]
use itertools::Itertools;
use libfuzzer_sys::fuzz_target;
use raumplan_libs::{
    clock::WallClock,
    room::{compute_free_intervals, Booking, RoomHours},
    time::{TimeMerge, TimeRange},
};

fuzz_target!(|data: (WallClock, WallClock, Vec<(WallClock, WallClock)>)| {
    #[cfg(feature = "log")]
    let _ = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Trace)
        .chain(std::io::stdout())
        .apply();

    let hours = match RoomHours::new(data.0, data.1) {
        Ok(hours) => hours,
        Err(_) => return,
    };
    let bookings = data
        .2
        .into_iter()
        .filter_map(|(start, end)| Booking::new(start, end).ok())
        .collect::<Vec<_>>();
    let window = hours.range();

    let free = compute_free_intervals(&hours, &bookings);

    for interval in free.iter() {
        assert!(!interval.range().is_empty(), "Empty interval {}", interval);
        assert!(
            window.contains(interval.range()),
            "Interval {} outside of {:?}",
            interval,
            hours
        );
        if let Some(booking) = bookings.iter().find(|b| b.range().overlaps(interval.range())) {
            panic!("Interval {} overlaps {:?}", interval, booking);
        }
    }

    assert!(
        free.iter()
            .tuple_windows()
            .all(|(l, r)| l.range().end() < r.range().start()),
        "Intervals are not strictly ascending"
    );

    let covered = free
        .iter()
        .map(|interval| interval.range())
        .chain(bookings.iter().filter_map(|b| b.range().clamp(window)))
        .sorted_by_key(|range| range.start())
        .collect::<Vec<TimeRange<u16>>>();

    assert_eq!(
        covered.iter().time_merge(),
        vec![window],
        "Free intervals and bookings do not cover the room hours"
    );
});
