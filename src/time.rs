use itertools::Itertools;
use log::trace;
use num::Integer;
use std::fmt::Debug;

/// Half-open [start, end) time range
/// <N>: Any integer type
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TimeRange<N>(pub N, pub N)
where
    N: Integer + Copy;

impl<N> TimeRange<N>
where
    N: Integer + Copy,
{
    /// Construct a new Time Range
    /// Range is half-open on [start, end)
    /// # Examples
    /// ```
    /// use raumplan_libs::time::TimeRange;
    ///
    /// let test = TimeRange::new(800, 1700);
    ///
    /// assert_eq!(test.0, 800);
    /// assert_eq!(test.1, 1700);
    /// ```
    pub fn new(start: N, end: N) -> TimeRange<N> {
        TimeRange(start, end)
    }

    /// Returns the start of the TimeRange
    pub fn start(self) -> N {
        self.0
    }

    /// Returns the end of the TimeRange
    pub fn end(self) -> N {
        self.1
    }

    /// A range which ends at or before its start covers nothing
    ///
    /// # Examples
    /// ```
    /// use raumplan_libs::time::TimeRange;
    ///
    /// assert!(TimeRange::new(900, 900).is_empty());
    /// assert!(!TimeRange::new(900, 901).is_empty());
    /// ```
    pub fn is_empty(self) -> bool {
        self.0 >= self.1
    }

    /// Half-open overlap: ranges which only touch do not overlap
    ///
    /// # Examples
    /// ```
    /// use raumplan_libs::time::TimeRange;
    ///
    /// let morning = TimeRange::new(800, 1000);
    ///
    /// assert!(morning.overlaps(TimeRange::new(930, 1100)));
    /// assert!(!morning.overlaps(TimeRange::new(1000, 1100)));
    /// ```
    pub fn overlaps(self, other: TimeRange<N>) -> bool {
        self.0 < other.1 && other.0 < self.1
    }

    /// True when `other` lies wholly inside self
    pub fn contains(self, other: TimeRange<N>) -> bool {
        self.0 <= other.0 && other.1 <= self.1
    }

    /// The part of self that falls inside `window`, if any
    ///
    /// # Examples
    /// ```
    /// use raumplan_libs::time::TimeRange;
    ///
    /// let window = TimeRange::new(800, 1700);
    ///
    /// assert_eq!(TimeRange::new(600, 900).clamp(window), Some(TimeRange::new(800, 900)));
    /// assert_eq!(TimeRange::new(1700, 1800).clamp(window), None);
    /// ```
    pub fn clamp(self, window: TimeRange<N>) -> Option<TimeRange<N>> {
        let clamped = TimeRange(self.0.max(window.0), self.1.min(window.1));
        if clamped.is_empty() {
            None
        } else {
            Some(clamped)
        }
    }
}

pub trait Available<N>
where
    N: Integer + Copy,
{
    fn get_availability(self, window: TimeRange<N>) -> Vec<TimeRange<N>>;
}

impl<'a, T, N> Available<N> for T
where
    T: Iterator<Item = &'a TimeRange<N>>,
    N: 'a + Integer + Copy + Debug,
{
    /// Self is blocked times that cannot be booked.
    /// Sweeps the blocks in start order and returns the gaps between them,
    /// clamped to `window`. `window - self`
    ///
    /// Blocks may arrive unsorted, nested or overlapping. Blocks sharing a
    /// start keep their input order.
    ///
    /// # Examples
    ///
    /// ```
    /// use raumplan_libs::time::{Available, TimeRange};
    ///
    /// let blocked_times = vec![TimeRange::new(1000, 1100)];
    /// let window = TimeRange::new(800, 1700);
    ///
    /// assert_eq!(
    ///     blocked_times.iter().get_availability(window),
    ///     vec![TimeRange::new(800, 1000), TimeRange::new(1100, 1700)]
    /// );
    /// ```
    ///
    /// Nested blocks are absorbed by the one around them:
    /// ```
    /// use raumplan_libs::time::{Available, TimeRange};
    ///
    /// let blocked_times = vec![TimeRange::new(900, 1500), TimeRange::new(1000, 1100)];
    ///
    /// assert_eq!(
    ///     blocked_times.iter().get_availability(TimeRange::new(800, 1800)),
    ///     vec![TimeRange::new(800, 900), TimeRange::new(1500, 1800)]
    /// );
    /// ```
    fn get_availability(self, window: TimeRange<N>) -> Vec<TimeRange<N>> {
        let mut cursor = window.start();
        let mut free = vec![];

        for block in self.sorted_by_key(|block| block.start()) {
            let until = block.start().min(window.end());
            if cursor < until {
                trace!("free {:?} - {:?}", cursor, until);
                free.push(TimeRange(cursor, until));
            }

            cursor = cursor.max(block.end());
            if cursor >= window.end() {
                return free;
            }
        }

        if cursor < window.end() {
            trace!("free {:?} - {:?}", cursor, window.end());
            free.push(TimeRange(cursor, window.end()));
        }

        free
    }
}

pub trait TimeMerge<N>
where
    N: Integer + Copy,
{
    fn time_merge(self) -> Vec<TimeRange<N>>;
}

impl<'a, T, N> TimeMerge<N> for T
where
    T: Iterator<Item = &'a TimeRange<N>>,
    N: 'a + Integer + Copy,
{
    /// Combines overlapping or touching TimeRanges together.
    /// Input must already be sorted by start.
    ///
    /// # Examples
    /// ```
    /// use raumplan_libs::time::{TimeMerge, TimeRange};
    ///
    /// let time_merge = vec![
    ///     TimeRange::new(900, 1000),
    ///     TimeRange::new(930, 1100),
    ///     TimeRange::new(1100, 1200),
    ///     TimeRange::new(1300, 1400),
    /// ];
    ///
    /// assert_eq!(
    ///     time_merge.iter().time_merge(),
    ///     vec![TimeRange::new(900, 1200), TimeRange::new(1300, 1400)]
    /// );
    /// ```
    fn time_merge(self) -> Vec<TimeRange<N>> {
        let size_hint = self.size_hint().1.unwrap_or(0);
        let (last, mut acc) = self.fold(
            (None, Vec::with_capacity(size_hint)),
            |(last, mut acc): (Option<TimeRange<N>>, Vec<TimeRange<N>>), &curr| match last {
                None => (Some(curr), acc),
                Some(time) if curr.start() <= time.end() => (
                    Some(TimeRange(time.start(), time.end().max(curr.end()))),
                    acc,
                ),
                Some(time) => {
                    acc.push(time);
                    (Some(curr), acc)
                }
            },
        );

        if let Some(time) = last {
            acc.push(time);
        }

        acc
    }
}
