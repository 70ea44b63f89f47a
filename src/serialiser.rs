use crate::srt::TimedEntry;
use crate::track::EntryTrack;

use std::fmt;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use log::debug;

/// Writes the SRT text of `track` to `output`, one entry at a time.
pub fn serialise<W: io::Write>(track: &EntryTrack, output: W) -> Result<()> {
    let mut writer = IoAdapter {
        inner: BufWriter::new(output),
        error: None,
    };
    if write_track(&mut writer, track).is_err() {
        let err = writer
            .error
            .take()
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "formatter error"));
        return Err(err).context("Failed to write to output.");
    }
    io::Write::flush(&mut writer.inner).context("Failed to write to output.")?;
    debug!("Serialised {} entries", track.len());
    Ok(())
}

/// Lets the `fmt::Write` based writers below feed an `io::Write`.
struct IoAdapter<W: io::Write> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: io::Write> fmt::Write for IoAdapter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        io::Write::write_all(&mut self.inner, s.as_bytes()).map_err(|err| {
            self.error = Some(err);
            fmt::Error
        })
    }
}

pub(crate) fn write_track<W: fmt::Write>(buf: &mut W, track: &EntryTrack) -> fmt::Result {
    for (idx, entry) in track.iter().enumerate() {
        write_entry(buf, idx + 1, entry)?;
    }
    Ok(())
}

fn write_entry<W: fmt::Write>(buf: &mut W, cue_number: usize, entry: &TimedEntry) -> fmt::Result {
    writeln!(buf, "{}", cue_number)?;
    writeln!(
        buf,
        "{} --> {}",
        Timestamp(entry.start_ms()),
        Timestamp(entry.end_ms())
    )?;
    for line in entry.lines() {
        writeln!(buf, "{}", line)?;
    }
    writeln!(buf)?;
    Ok(())
}

/// A millisecond offset displayed as `HH:MM:SS,mmm`. Hours past 99 print
/// every digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(pub i64);

impl fmt::Display for Timestamp {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let total_secs = self.0 / 1000;
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;
        let millis = self.0 % 1000;
        write!(
            fmt,
            "{:02}:{:02}:{:02},{:03}",
            hours, minutes, seconds, millis
        )
    }
}
