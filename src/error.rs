use std::fmt;

use thiserror::Error;

/// Why a start/end pair was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFault {
    Equal,
    NegativeStart,
    StartAfterEnd,
}

impl fmt::Display for RangeFault {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RangeFault::Equal => write!(fmt, "start and end times cannot be equal"),
            RangeFault::NegativeStart => write!(fmt, "start time cannot be negative"),
            RangeFault::StartAfterEnd => write!(fmt, "start time cannot be after end time"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    #[error("Invalid time range {start_ms}ms --> {end_ms}ms: {reason}")]
    InvalidRange {
        start_ms: i64,
        end_ms: i64,
        reason: RangeFault,
    },
    #[error("Index {index} is out of range for a track of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Invalid line selector: {0} (choose line 1 or 2 of an existing line)")]
    InvalidLineSelector(usize),
    #[error("{0}")]
    CueSyntax(String),
}

impl TrackError {
    /// Checks invariant `0 <= start < end`, naming the first rule broken.
    pub(crate) fn check_range(start_ms: i64, end_ms: i64) -> Result<(), TrackError> {
        let reason = if start_ms >= 0 && start_ms < end_ms {
            return Ok(());
        } else if start_ms == end_ms {
            RangeFault::Equal
        } else if start_ms < 0 {
            RangeFault::NegativeStart
        } else {
            RangeFault::StartAfterEnd
        };
        Err(TrackError::InvalidRange {
            start_ms,
            end_ms,
            reason,
        })
    }
}

pub type Result<T, E = TrackError> = std::result::Result<T, E>;
