use indexmap::IndexMap;
use tracing::debug;

use crate::core::{DataPoint, SeriesData};
use crate::error::{ChartError, ChartResult};

/// Loaded series keyed by id.
///
/// Entries are written once and never invalidated for the lifetime of the
/// page session.
#[derive(Debug, Clone, Default)]
pub struct SeriesCache {
    entries: IndexMap<String, SeriesData>,
}

impl SeriesCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `id`. Returns `false` if the id was already loaded;
    /// the first value wins.
    pub fn insert(&mut self, id: &str, data: SeriesData) -> bool {
        if self.entries.contains_key(id) {
            debug!(series_id = id, "ignoring repeated load of cached series");
            return false;
        }
        self.entries.insert(id.to_owned(), data);
        true
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&[DataPoint]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    pub fn require(&self, id: &str) -> ChartResult<&[DataPoint]> {
        self.get(id).ok_or_else(|| ChartError::SeriesNotLoaded { id: id.to_owned() })
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
