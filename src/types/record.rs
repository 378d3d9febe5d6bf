#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Calendar timestamp of one sample.
///
/// Field order is the sort priority, so the derived `Ord` compares
/// year, month, day, hour, minute, second in turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Timestamp {
    /// `YYYY/M/D`, month and day without padding
    pub fn date_text(&self) -> String {
        format!("{}/{}/{}", self.year, self.month, self.day)
    }

    /// `HH:MM:SS`, zero-padded
    pub fn time_text(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// One decoded sample: a timestamp and its measurements in source order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Record {
    pub timestamp: Timestamp,
    pub date_text: String,
    pub time_text: String,
    pub measurements: Vec<f64>,
}

impl Record {
    pub fn new(timestamp: Timestamp, measurements: Vec<f64>) -> Self {
        Self {
            date_text: timestamp.date_text(),
            time_text: timestamp.time_text(),
            timestamp,
            measurements,
        }
    }
}
