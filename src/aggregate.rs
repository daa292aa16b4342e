//! Per-key running statistics.
//!
//! Every key maps to a single fixed-size accumulator, so memory scales
//! with the number of distinct keys rather than the number of records.
//! All values are integers in tenths throughout.

use rustc_hash::FxHashMap;

/// Running min/max/sum/count for one key, in tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationStats {
    pub min: i64,
    pub max: i64,
    pub sum: i64,
    pub count: u64,
}

impl StationStats {
    /// Stats after observing a single value.
    #[inline]
    pub fn of(value: i64) -> Self {
        StationStats {
            min: value,
            max: value,
            sum: value,
            count: 1,
        }
    }

    /// Folds one observation in.
    #[inline]
    pub fn update(&mut self, value: i64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.count += 1;
    }

    /// Combines the observations behind another accumulator in.
    #[inline]
    pub fn merge(&mut self, other: &StationStats) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Mean in tenths, rounded half away from zero.
    ///
    /// Pure integer arithmetic: the truncating quotient is bumped one
    /// step away from zero when twice the remainder reaches the
    /// divisor. Callers guarantee `count > 0` (an accumulator only
    /// exists once a value has been observed).
    #[inline]
    pub fn mean(&self) -> i64 {
        debug_assert!(self.count > 0);
        let n = self.count as i64;
        let q = self.sum / n;
        let r = self.sum % n;
        if 2 * r.abs() >= n {
            q + if self.sum < 0 { -1 } else { 1 }
        } else {
            q
        }
    }
}

/// Accumulated statistics for every key seen so far.
///
/// Keyed by raw key bytes; a key is allocated once on first sight and
/// every later observation updates in place.
#[derive(Debug, Default)]
pub struct SummaryTable {
    stations: FxHashMap<Vec<u8>, StationStats>,
}

impl SummaryTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        SummaryTable {
            stations: FxHashMap::default(),
        }
    }

    /// Folds one observation into the key's running stats.
    #[inline]
    pub fn record(&mut self, key: &[u8], value: i64) {
        match self.stations.get_mut(key) {
            Some(stats) => stats.update(value),
            None => {
                self.stations.insert(key.to_vec(), StationStats::of(value));
            }
        }
    }

    /// Looks up one key's stats.
    pub fn get(&self, key: &[u8]) -> Option<&StationStats> {
        self.stations.get(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if no key has been seen.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Merges another table in, combining stats for shared keys.
    pub fn merge(&mut self, other: SummaryTable) {
        for (key, stats) in other.stations {
            match self.stations.get_mut(&key) {
                Some(existing) => existing.merge(&stats),
                None => {
                    self.stations.insert(key, stats);
                }
            }
        }
    }

    /// Entries in ascending byte order of key, ready for output.
    pub fn sorted_entries(&self) -> Vec<(&[u8], &StationStats)> {
        let mut entries: Vec<_> = self
            .stations
            .iter()
            .map(|(key, stats)| (key.as_slice(), stats))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
