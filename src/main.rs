use subtrack::serialiser::{self, Timestamp};
use subtrack::{parser, EntryTrack, TimedEntry};

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser as ClapParser};
use log::{debug, info, warn, LevelFilter};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Build SRT subtitle tracks from cue descriptions")]
struct Cli {
    #[arg(
        value_name = "CUE",
        help = "Cues to append, in order, written as 'HH:MM:SS,mmm --> HH:MM:SS,mmm|line 1|line 2'."
    )]
    cues: Vec<String>,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to write to. If not supplied, the subtitles will be written to standard output.",
        default_value = "-"
    )]
    output: String,
    #[arg(
        long = "insert",
        value_name = "CUE",
        requires = "insert_at",
        help = "A cue to insert at the position given by --insert-at. May be repeated."
    )]
    inserted: Vec<String>,
    #[arg(
        long,
        value_name = "INDEX",
        help = "The 0-based position at which the --insert cues are placed."
    )]
    insert_at: Option<usize>,
    #[arg(
        long,
        value_name = "TIMESTAMP",
        help = "Write only the lines of the cue shown at this time instead of the whole track."
    )]
    active_at: Option<String>,
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Log more. Repeat for more detail. RUST_LOG overrides this."
    )]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn parse_cues(cues: &[String]) -> Result<Vec<TimedEntry>> {
    cues.iter()
        .map(|cue| parser::parse_cue(cue).context(format!("Invalid cue: '{}'", cue)))
        .collect()
}

fn build_track(cli: &Cli) -> Result<EntryTrack> {
    let mut track = EntryTrack::from(parse_cues(&cli.cues)?);
    debug!("Read {} cues from the command line", track.len());

    if let Some(index) = cli.insert_at {
        let inserted = parse_cues(&cli.inserted)?;
        let count = inserted.len();
        track
            .insert_at(index, inserted)
            .context(format!("Failed to insert cues at index {}", index))?;
        info!("Inserted {} cues at index {}", count, index);
    }
    Ok(track)
}

fn open_output(path: &str) -> Result<Box<dyn Write>> {
    if path == "-" {
        return Ok(Box::new(io::stdout()));
    }
    let file = std::fs::File::create(path)
        .context(format!("Failed to create output file: '{}'", path))?;
    Ok(Box::new(file))
}

fn run(cli: Cli) -> Result<()> {
    execute(&cli, || open_output(&cli.output))
}

/// Builds the track and writes what was asked for. `open` is only called
/// once there is something to write, so an existing output file survives
/// every failure and the no-cue case.
fn execute<W, F>(cli: &Cli, open: F) -> Result<()>
where
    W: Write,
    F: FnOnce() -> Result<W>,
{
    let track = build_track(cli)?;

    if let Some(at) = &cli.active_at {
        let time_ms = parser::parse_timestamp(at)
            .context(format!("Invalid timestamp: '{}'", at))?;
        let (idx, entry) = match track.active_at(time_ms) {
            Some(found) => found,
            None => {
                info!("No cue is shown at {}", Timestamp(time_ms));
                return Ok(());
            }
        };
        info!("Cue {} is shown at {}", idx + 1, Timestamp(time_ms));
        let mut dst = open()?;
        for line in entry.lines() {
            writeln!(dst, "{}", line).context("Failed to write to output.")?;
        }
        dst.flush().context("Failed to write to output.")?;
        return Ok(());
    }

    if track.is_empty() {
        warn!("The track is empty; writing an empty file.");
    }
    serialiser::serialise(&track, open()?)
}
