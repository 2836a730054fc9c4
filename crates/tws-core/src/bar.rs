//! Bars and scanner rows.

use bytes::Bytes;

use crate::contract::ContractDetails;

/// One historical bar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bar {
    pub date: Bytes,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i32,
    pub bar_count: i32,
    pub wap: f64,
    pub has_gaps: bool,
}

impl Bar {
    /// The synthetic bar that terminates a historical data response.
    ///
    /// Its date reads `finished-<start>-<end>` and every numeric field is
    /// `-1`, with no gaps.
    pub fn finished_marker(start: &[u8], end: &[u8]) -> Self {
        let mut date = Vec::with_capacity(10 + start.len() + end.len());
        date.extend_from_slice(b"finished-");
        date.extend_from_slice(start);
        date.push(b'-');
        date.extend_from_slice(end);

        Bar {
            date: Bytes::from(date),
            open: -1.0,
            high: -1.0,
            low: -1.0,
            close: -1.0,
            volume: -1,
            bar_count: -1,
            wap: -1.0,
            has_gaps: false,
        }
    }

    /// Returns `true` for the end-of-dataset marker.
    pub fn is_finished_marker(&self) -> bool {
        self.date.starts_with(b"finished-")
    }
}

/// A five-second real-time bar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RealTimeBar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    pub wap: f64,
    pub count: i32,
}

/// One row of a market scanner result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanRow {
    pub rank: i32,
    pub details: ContractDetails,
    pub distance: Bytes,
    pub benchmark: Bytes,
    pub projection: Bytes,
    pub legs: Bytes,
}
