use chrono::{DateTime, Local, Utc};
use std::fmt;
use std::time::Duration;

/// What a [`MotionEvent`] reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MotionEventKind {
    /// Motion resumed after more than the loggable inactivity.
    MotionAfterInactivity,
    /// No motion for more than the loggable inactivity.
    NoMotionFor,
}

impl MotionEventKind {
    /// Value stored in the `event` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionEventKind::MotionAfterInactivity => "MOTION_AFTER_INACTIVITY",
            MotionEventKind::NoMotionFor => "NO_MOTION_FOR",
        }
    }
}

impl fmt::Display for MotionEventKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row for the event store. Built at decision time, written once, then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionEvent {
    device_name: String,
    kind: MotionEventKind,
    duration_seconds: f64,
    local_time: DateTime<Local>,
    utc_time: DateTime<Utc>,
}

impl MotionEvent {
    /// Stamps the event with the current wall-clock time.
    pub fn new(device_name: &str, kind: MotionEventKind, elapsed: Duration) -> Self {
        let utc_time = Utc::now();
        Self::at(device_name, kind, elapsed, utc_time)
    }

    pub fn at(device_name: &str, kind: MotionEventKind, elapsed: Duration, utc_time: DateTime<Utc>) -> Self {
        Self {
            device_name: device_name.to_string(),
            kind,
            duration_seconds: elapsed.as_secs_f64(),
            local_time: utc_time.with_timezone(&Local),
            utc_time,
        }
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn kind(&self) -> MotionEventKind {
        self.kind
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn local_time(&self) -> DateTime<Local> {
        self.local_time
    }

    pub fn utc_time(&self) -> DateTime<Utc> {
        self.utc_time
    }
}

impl fmt::Display for MotionEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "({}, {}, {:.3}, {}, {})",
            self.device_name,
            self.kind,
            self.duration_seconds,
            self.local_time.format("%Y-%m-%d %H:%M:%S"),
            self.utc_time.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
