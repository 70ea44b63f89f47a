use crate::error::Result;
use crate::srt::TimedEntry;
use crate::track::EntryTrack;

use std::sync::Arc;

use parking_lot::Mutex;

/// A track shared between threads, e.g. a loader appending cues while a
/// display thread asks which cue is active.
///
/// Every operation holds one lock for its whole duration, so readers never
/// observe a half-finished insertion.
#[derive(Debug, Clone, Default)]
pub struct SharedTrack {
    inner: Arc<Mutex<EntryTrack>>,
}

impl SharedTrack {
    pub fn new(track: EntryTrack) -> Self {
        Self {
            inner: Arc::new(Mutex::new(track)),
        }
    }

    pub fn append(&self, entry: TimedEntry) {
        self.inner.lock().append(entry);
    }

    pub fn insert_at<I>(&self, index: usize, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = TimedEntry>,
    {
        self.inner.lock().insert_at(index, entries)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn render(&self) -> String {
        self.inner.lock().render()
    }

    /// Copies out the lines of the cue on screen at `time_ms`.
    pub fn active_lines_at(&self, time_ms: i64) -> Option<Vec<String>> {
        self.inner
            .lock()
            .active_at(time_ms)
            .map(|(_, entry)| entry.lines().to_vec())
    }

    /// Runs `f` with exclusive access to the track.
    pub fn with<R>(&self, f: impl FnOnce(&mut EntryTrack) -> R) -> R {
        let mut track = self.inner.lock();
        f(&mut *track)
    }
}

impl From<EntryTrack> for SharedTrack {
    fn from(track: EntryTrack) -> Self {
        Self::new(track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    #[test]
    fn test_concurrent_appends() {
        let shared = SharedTrack::default();
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        let start = (t * 100 + i) * 1000;
                        shared.append(TimedEntry::new(start, start + 500, vec!["x"]).unwrap());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.len(), 100);
        assert_eq!(shared.render().matches(" --> ").count(), 100);
    }

    #[test]
    fn test_active_lines_and_with() {
        let shared = SharedTrack::from(EntryTrack::from(vec![
            TimedEntry::new(0, 1000, vec!["one"]).unwrap(),
        ]));
        assert_eq!(shared.active_lines_at(10), Some(vec!["one".to_string()]));
        assert_eq!(shared.active_lines_at(1000), None);

        let touched = shared.with(|track| {
            track.append(TimedEntry::new(1000, 2000, vec!["two"]).unwrap());
            track.len()
        });
        assert_eq!(touched, 2);
        assert!(shared.insert_at(5, Vec::new()).is_err());
        assert!(!shared.is_empty());
    }
}
