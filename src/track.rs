use crate::error::{Result, TrackError};
use crate::serialiser;
use crate::srt::TimedEntry;

use std::fmt;
use std::slice;

use log::trace;

/// An ordered subtitle track.
///
/// Entries are kept in display order, which is also the order in which they
/// are serialised. Nothing forces that order to be chronological. Cue numbers
/// are derived from positions when rendering, so they are always contiguous
/// from 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryTrack {
    entries: Vec<TimedEntry>,
}

impl EntryTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: TimedEntry) {
        self.entries.push(entry);
    }

    /// Inserts `entries` so that the first of them lands at `index`, shifting
    /// everything from `index` onwards up by the number of inserted entries.
    ///
    /// `index == len()` appends. Inserting near the front of a large track
    /// moves every later entry, so the cost grows with the track length.
    pub fn insert_at<I>(&mut self, index: usize, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = TimedEntry>,
    {
        let len = self.entries.len();
        if index > len {
            return Err(TrackError::IndexOutOfRange { index, len });
        }
        if index == len {
            self.entries.extend(entries);
        } else {
            self.entries.splice(index..index, entries);
        }
        trace!(
            "Inserted {} entries at {}",
            self.entries.len() - len,
            index
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TimedEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[TimedEntry] {
        &self.entries
    }

    pub fn iter(&self) -> slice::Iter<'_, TimedEntry> {
        self.entries.iter()
    }

    /// Finds the entry on screen at `time_ms`, with its position.
    ///
    /// Entries are scanned in track order and the first one whose
    /// `[start, end)` range contains the time wins, so overlapping cues
    /// resolve to the earlier position.
    pub fn active_at(&self, time_ms: i64) -> Option<(usize, &TimedEntry)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.contains(time_ms))
    }

    /// The whole track as SRT text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EntryTrack {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        serialiser::write_track(fmt, self)
    }
}

impl From<Vec<TimedEntry>> for EntryTrack {
    fn from(entries: Vec<TimedEntry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<TimedEntry> for EntryTrack {
    fn from_iter<I: IntoIterator<Item = TimedEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EntryTrack {
    type Item = &'a TimedEntry;
    type IntoIter = slice::Iter<'a, TimedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
