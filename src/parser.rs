//! Parsers for cue descriptions given on the command line.
//!
//! A cue is written as `START --> END|first line|second line`, using SRT
//! timestamps. Timestamps are read leniently: `1:1:1,2` means
//! `01:01:01,200`.
//!
//! `|` always separates lines and cannot be escaped, so a line can never
//! contain it. Line breaks inside a line are rejected, since they would
//! split the cue when written as SRT.

use crate::error::{Result, TrackError};
use crate::srt::TimedEntry;

use nom::bytes::complete::{tag, take_while, take_while_m_n};
use nom::character::complete::{char, space0, space1};
use nom::combinator::{all_consuming, map_res};
use nom::error::{convert_error, VerboseError};
use nom::multi::many0;
use nom::sequence::preceded;
use nom::{Err, IResult};

type Res<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Parses a cue description into a validated entry.
pub fn parse_cue(input: &str) -> Result<TimedEntry> {
    let (start_ms, end_ms, lines) = run(cue, input)?;
    TimedEntry::new(start_ms, end_ms, lines)
}

/// Parses a single timestamp into milliseconds.
pub fn parse_timestamp(input: &str) -> Result<i64> {
    run(timestamp, input.trim())
}

fn run<'a, T>(parser: impl FnMut(&'a str) -> Res<'a, T>, input: &'a str) -> Result<T> {
    match all_consuming(parser)(input) {
        Ok((_, value)) => Ok(value),
        Err(Err::Error(err)) | Err(Err::Failure(err)) => {
            Err(TrackError::CueSyntax(convert_error(input, err)))
        }
        Err(Err::Incomplete(_)) => {
            unreachable!("Incomplete data received by non-streaming parser.")
        }
    }
}

fn cue(input: &str) -> Res<(i64, i64, Vec<String>)> {
    let (input, _) = space0(input)?;
    let (input, (show_at, hide_at)) = show_hide(input)?;
    let line = take_while(|c: char| c != '|' && c != '\n' && c != '\r');
    let (input, lines) = many0(preceded(char('|'), line))(input)?;

    Ok((
        input,
        (show_at, hide_at, lines.into_iter().map(String::from).collect()),
    ))
}

fn show_hide(input: &str) -> Res<(i64, i64)> {
    let (input, show_at) = timestamp(input)?;
    let (input, _) = space1(input)?;
    let (input, _) = tag("-->")(input)?;
    let (input, _) = space1(input)?;
    let (input, hide_at) = timestamp(input)?;
    let (input, _) = space0(input)?;

    Ok((input, (show_at, hide_at)))
}

fn timestamp(input: &str) -> Res<i64> {
    const MILLIS_MAX: usize = 3;
    let take_millis = || {
        map_res(
            take_while_m_n(0, MILLIS_MAX, |c: char| c.is_ascii_digit()),
            // `,2` is short for `,200`, so pad on the right.
            |s: &str| format!("{:0<3}", s).parse::<i64>(),
        )
    };

    const HMS_MAX: usize = 2;
    let take_hms = || {
        map_res(
            take_while_m_n(0, HMS_MAX, |c: char| c.is_ascii_digit()),
            // `1:13:45` is `01:13:45`, so pad on the left.
            |s: &str| format!("{:0>2}", s).parse::<i64>(),
        )
    };

    let (input, hours) = take_hms()(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, minutes) = take_hms()(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, seconds) = take_hms()(input)?;
    let (input, _) = tag(",")(input)?;
    let (input, millis) = take_millis()(input)?;

    Ok((
        input,
        millis + seconds * 1000 + minutes * 60 * 1000 + hours * 60 * 60 * 1000,
    ))
}
