//! Subtitle cues, ordered subtitle tracks and their SubRip (SRT) rendering.

pub mod error;
pub mod parser;
pub mod serialiser;
pub mod shared;
pub mod srt;
pub mod track;

pub use crate::error::{RangeFault, TrackError};
pub use crate::shared::SharedTrack;
pub use crate::srt::{LineSelector, TimedEntry};
pub use crate::track::EntryTrack;
