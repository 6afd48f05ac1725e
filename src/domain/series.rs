use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Structural errors raised while building an index or a series over it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("timestamps are not strictly increasing at position {position}")]
    NotIncreasing { position: usize },
    #[error("series has {actual} values but its index has {expected} timestamps")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Strictly increasing sequence of UTC timestamps.
///
/// Cloning is cheap: every series built over the same index shares one allocation,
/// which is what lets the engine check alignment without comparing timestamps.
#[derive(Debug, Clone)]
pub struct TimeIndex(Arc<[DateTime<Utc>]>);

impl TimeIndex {
    pub fn new(timestamps: Vec<DateTime<Utc>>) -> Result<Self, SeriesError> {
        if let Some(position) = timestamps
            .windows(2)
            .position(|pair| pair[1] <= pair[0])
        {
            return Err(SeriesError::NotIncreasing {
                position: position + 1,
            });
        }
        Ok(Self(timestamps.into()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[DateTime<Utc>] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &DateTime<Utc>> {
        self.0.iter()
    }

    /// Same length and same timestamps, in the same order
    pub fn is_aligned_with(&self, other: &TimeIndex) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl PartialEq for TimeIndex {
    fn eq(&self, other: &Self) -> bool {
        self.is_aligned_with(other)
    }
}

/// Values keyed by a shared [`TimeIndex`]
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<T> {
    index: TimeIndex,
    values: Vec<T>,
}

impl<T> TimeSeries<T> {
    pub fn new(index: TimeIndex, values: Vec<T>) -> Result<Self, SeriesError> {
        if index.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                expected: index.len(),
                actual: values.len(),
            });
        }
        Ok(Self { index, values })
    }

    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateTime<Utc>, &T)> {
        self.index.iter().zip(self.values.iter())
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}
