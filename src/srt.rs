use crate::error::{Result, TrackError};

/// Addresses a single line of a cue for in-place replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSelector {
    First,
    Second,
}

impl LineSelector {
    fn index(self) -> usize {
        match self {
            LineSelector::First => 0,
            LineSelector::Second => 1,
        }
    }
}

/// Converts a 1-based line number.
impl TryFrom<usize> for LineSelector {
    type Error = TrackError;

    fn try_from(line: usize) -> Result<Self> {
        match line {
            1 => Ok(LineSelector::First),
            2 => Ok(LineSelector::Second),
            other => Err(TrackError::InvalidLineSelector(other)),
        }
    }
}

/// A single cue: the lines shown between `start_ms` (inclusive) and
/// `end_ms` (exclusive), both measured in milliseconds from the start of
/// the track.
///
/// The fields are private so that `0 <= start_ms < end_ms` holds for the
/// whole lifetime of the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedEntry {
    start_ms: i64,
    end_ms: i64,
    lines: Vec<String>,
}

impl TimedEntry {
    pub fn new<I, S>(start_ms: i64, end_ms: i64, lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TrackError::check_range(start_ms, end_ms)?;
        Ok(Self {
            start_ms,
            end_ms,
            lines: lines.into_iter().map(Into::into).collect(),
        })
    }

    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> i64 {
        self.end_ms
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn duration(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Whether the cue is on screen at `time_ms`.
    pub fn contains(&self, time_ms: i64) -> bool {
        self.start_ms <= time_ms && time_ms < self.end_ms
    }

    /// Moves the start, validated against the current end.
    pub fn set_start(&mut self, start_ms: i64) -> Result<()> {
        TrackError::check_range(start_ms, self.end_ms)?;
        self.start_ms = start_ms;
        Ok(())
    }

    /// Moves the end, validated against the current start.
    pub fn set_end(&mut self, end_ms: i64) -> Result<()> {
        TrackError::check_range(self.start_ms, end_ms)?;
        self.end_ms = end_ms;
        Ok(())
    }

    /// Replaces every line. The new text may have fewer lines than before.
    pub fn set_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
    }

    pub fn set_line_at(&mut self, selector: LineSelector, text: impl Into<String>) -> Result<()> {
        let idx = selector.index();
        match self.lines.get_mut(idx) {
            Some(line) => {
                *line = text.into();
                Ok(())
            }
            None => Err(TrackError::InvalidLineSelector(idx + 1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RangeFault;

    use proptest::prelude::*;

    fn entry(start: i64, end: i64) -> TimedEntry {
        TimedEntry::new(start, end, vec!["Hello", "World"]).unwrap()
    }

    macro_rules! test_bad_range {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (start, end, reason) = $value;

                let err = TimedEntry::new(start, end, vec!["x"]).unwrap_err();

                assert_eq!(
                    err,
                    TrackError::InvalidRange { start_ms: start, end_ms: end, reason }
                );
            }
        )*
        }
    }

    test_bad_range! {
        test_bad_range_equal: (1000, 1000, RangeFault::Equal),
        test_bad_range_zero_equal: (0, 0, RangeFault::Equal),
        test_bad_range_negative: (-1, 1000, RangeFault::NegativeStart),
        test_bad_range_inverted: (3000, 1000, RangeFault::StartAfterEnd),
    }

    #[test]
    fn test_new_keeps_lines_verbatim() {
        let e = TimedEntry::new(0, 1, vec!["  padded  ", ""]).unwrap();
        assert_eq!(e.lines(), &["  padded  ".to_string(), String::new()]);
        assert_eq!(e.start_ms(), 0);
        assert_eq!(e.end_ms(), 1);
    }

    #[test]
    fn test_set_start_checks_current_end() {
        let mut e = entry(1000, 2000);
        assert!(e.set_start(2000).is_err());
        assert!(e.set_start(-5).is_err());
        assert_eq!((e.start_ms(), e.end_ms()), (1000, 2000));

        e.set_start(0).unwrap();
        assert_eq!(e.start_ms(), 0);
        assert_eq!(e.duration(), 2000);
    }

    #[test]
    fn test_set_end_checks_current_start() {
        let mut e = entry(1000, 2000);
        assert!(e.set_end(1000).is_err());
        assert!(e.set_end(500).is_err());
        assert_eq!((e.start_ms(), e.end_ms()), (1000, 2000));

        e.set_end(1001).unwrap();
        assert_eq!(e.duration(), 1);
    }

    #[test]
    fn test_set_lines_can_shrink() {
        let mut e = entry(0, 10);
        e.set_lines(vec!["Only"]);
        assert_eq!(e.lines(), &["Only".to_string()]);
    }

    #[test]
    fn test_set_line_at() {
        let mut e = entry(0, 10);
        e.set_line_at(LineSelector::Second, "There").unwrap();
        e.set_line_at(LineSelector::First, "Hi").unwrap();
        assert_eq!(e.lines(), &["Hi".to_string(), "There".to_string()]);
    }

    #[test]
    fn test_set_line_at_missing_line() {
        let mut e = TimedEntry::new(0, 10, vec!["Only"]).unwrap();
        assert_eq!(
            e.set_line_at(LineSelector::Second, "Nope"),
            Err(TrackError::InvalidLineSelector(2))
        );
        assert_eq!(e.lines(), &["Only".to_string()]);
    }

    #[test]
    fn test_line_selector_from_number() {
        assert_eq!(LineSelector::try_from(1usize), Ok(LineSelector::First));
        assert_eq!(LineSelector::try_from(2usize), Ok(LineSelector::Second));
        assert_eq!(
            LineSelector::try_from(0usize),
            Err(TrackError::InvalidLineSelector(0))
        );
        assert_eq!(
            LineSelector::try_from(3usize),
            Err(TrackError::InvalidLineSelector(3))
        );
    }

    #[test]
    fn test_contains_is_half_open() {
        let e = entry(1000, 2000);
        assert!(!e.contains(999));
        assert!(e.contains(1000));
        assert!(e.contains(1999));
        assert!(!e.contains(2000));
    }

    proptest! {
        #[test]
        fn prop_valid_range_builds(start in 0i64..1_000_000_000, len in 1i64..1_000_000) {
            let e = TimedEntry::new(start, start + len, vec!["x"]).unwrap();
            prop_assert_eq!(e.duration(), len);
        }

        #[test]
        fn prop_invalid_range_rejected(start in -1_000_000i64..1_000_000, end in -1_000_000i64..1_000_000) {
            prop_assume!(!(start >= 0 && start < end));
            let is_range_err = matches!(
                TimedEntry::new(start, end, vec!["x"]),
                Err(TrackError::InvalidRange { .. })
            );
            prop_assert!(is_range_err);
        }

        #[test]
        fn prop_setters_leave_entry_untouched_on_failure(
            start in 0i64..10_000,
            len in 1i64..10_000,
            value in -20_000i64..20_000,
        ) {
            let end = start + len;
            let mut e = entry(start, end);
            prop_assert_eq!(e.set_start(value).is_ok(), value >= 0 && value < end);
            if value < 0 || value >= end {
                prop_assert_eq!((e.start_ms(), e.end_ms()), (start, end));
            }

            let mut e = entry(start, end);
            prop_assert_eq!(e.set_end(value).is_ok(), value > start);
            if value <= start {
                prop_assert_eq!((e.start_ms(), e.end_ms()), (start, end));
            }
        }
    }
}
