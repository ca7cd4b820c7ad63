//! Plurality vote over repeated version observations.

use indexmap::IndexMap;
use lenver_core::Versioned;
use tracing::debug;

/// Counts version strings in the order they were first observed.
///
/// The dominant value is the one with the highest count, provided that count
/// is greater than one. When several values share the highest count, the one
/// observed first wins.
#[derive(Debug, Clone, Default)]
pub struct VersionTally {
    counts: IndexMap<String, usize>,
}

impl VersionTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation of a version string
    pub fn observe(&mut self, version: impl AsRef<str>) {
        *self.counts.entry(version.as_ref().to_string()).or_insert(0) += 1;
    }

    /// Record a version value by its rendered form
    pub fn observe_version<V: Versioned + ?Sized>(&mut self, version: &V) {
        self.observe(version.render());
    }

    /// Number of times a version string was observed
    pub fn count(&self, version: &str) -> usize {
        self.counts.get(version).copied().unwrap_or(0)
    }

    /// Number of distinct version strings
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Distinct values with their counts, in first-observed order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(value, count)| (value.as_str(), *count))
    }

    /// The most common version string, if any value repeats
    pub fn dominant(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;

        for (value, count) in self.iter() {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((value, count));
            }
        }

        match best {
            Some((value, count)) if count > 1 => {
                debug!(value, count, "dominant version selected");
                Some(value)
            },
            _ => None,
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for VersionTally {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tally = Self::new();
        tally.extend(iter);
        tally
    }
}

impl<S: AsRef<str>> Extend<S> for VersionTally {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for version in iter {
            self.observe(version);
        }
    }
}
