use chrono::{DateTime, Utc};

/// Where index 0 of a series sits relative to its reference epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexPolicy {
    /// Index `len / 2` is the reference epoch; the series spans equally before and after it.
    Centered,
    /// Index 0 is the reference epoch.
    Forward,
}

/// Dense, immutable, one-sample-per-second series anchored to a reference epoch.
///
/// The server never sends per-sample timestamps. The position of a sample in the
/// array *is* its timestamp, so every consumer maps wall-clock time to an index
/// through [`SampleSeries::index_at`] instead of doing its own arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries<T> {
    samples: Vec<T>,
    reference_epoch: DateTime<Utc>,
    policy: IndexPolicy,
}

impl<T> SampleSeries<T> {
    /// Returns `None` for an empty sample vector.
    pub fn new(samples: Vec<T>, reference_epoch: DateTime<Utc>, policy: IndexPolicy) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        Some(Self {
            samples,
            reference_epoch,
            policy,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    pub fn first(&self) -> &T {
        &self.samples[0]
    }

    pub fn last(&self) -> &T {
        &self.samples[self.samples.len() - 1]
    }

    fn origin_index(&self) -> i64 {
        match self.policy {
            IndexPolicy::Centered => (self.samples.len() / 2) as i64,
            IndexPolicy::Forward => 0,
        }
    }

    /// Sample index for wall-clock time `t`.
    ///
    /// Elapsed time is truncated toward zero to whole seconds. The result may lie
    /// outside `0..len`; callers decide whether to clamp or hide.
    pub fn index_at(&self, t: DateTime<Utc>) -> i64 {
        self.origin_index() + (t - self.reference_epoch).num_seconds()
    }

    pub fn contains_index(&self, idx: i64) -> bool {
        idx >= 0 && (idx as u64) < self.samples.len() as u64
    }

    /// Sample at `t`, or `None` when `t` falls outside the series.
    pub fn sample_at(&self, t: DateTime<Utc>) -> Option<&T> {
        let idx = self.index_at(t);
        self.contains_index(idx).then(|| &self.samples[idx as usize])
    }

    /// Sample at `t`, pinned to the first/last sample outside the series.
    pub fn clamped_at(&self, t: DateTime<Utc>) -> &T {
        let max = (self.samples.len() - 1) as i64;
        let idx = self.index_at(t).clamp(0, max);
        &self.samples[idx as usize]
    }
}
