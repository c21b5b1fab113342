use std::fmt;

use indexmap::IndexSet;
use tracing::{debug, trace, warn};

use crate::core::{SeriesData, SeriesRef};
use crate::error::{ChartError, ChartResult};

use super::{SeriesCache, SeriesSource};

/// Continuation run once every series of a request is cached.
pub type ReadyFn = Box<dyn FnOnce(&SeriesCache)>;

/// Identifies one pending `load_series_data` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of starting a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTicket {
    /// Everything was cached; the continuation already ran.
    Ready,
    /// The continuation runs when the last missing series arrives.
    Pending(RequestId),
}

impl LoadTicket {
    #[must_use]
    pub fn request_id(self) -> Option<RequestId> {
        match self {
            Self::Ready => None,
            Self::Pending(id) => Some(id),
        }
    }

    #[must_use]
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

struct Waiter {
    request_id: RequestId,
    remaining: IndexSet<String>,
    on_ready: ReadyFn,
}

/// Cache, in-flight set and per-request waiters for series data.
pub struct SeriesStore<S> {
    source: S,
    cache: SeriesCache,
    pending: IndexSet<String>,
    waiters: Vec<Waiter>,
    next_request_id: u64,
}

impl<S: SeriesSource> SeriesStore<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_cache(source, SeriesCache::new())
    }

    /// Starts from an already populated cache, e.g. data embedded in the page.
    #[must_use]
    pub fn with_cache(source: S, cache: SeriesCache) -> Self {
        Self {
            source,
            cache,
            pending: IndexSet::new(),
            waiters: Vec::new(),
            next_request_id: 1,
        }
    }

    /// Requests every series in `series` that is not cached yet and runs
    /// `on_ready` once all of them are.
    ///
    /// When nothing is missing `on_ready` runs before this returns and no
    /// request is issued. Ids already in flight for another request are not
    /// requested twice.
    pub fn load_series_data<F>(
        &mut self,
        series: &[SeriesRef],
        on_ready: F,
    ) -> ChartResult<LoadTicket>
    where
        F: FnOnce(&SeriesCache) + 'static,
    {
        if let Some(series) = series.iter().find(|series| series.id.is_empty()) {
            return Err(ChartError::InvalidData(format!(
                "series `{}` has an empty id",
                series.name
            )));
        }

        let missing: IndexSet<String> = series
            .iter()
            .filter(|series| !self.cache.contains(&series.id))
            .map(|series| series.id.clone())
            .collect();
        debug!(
            missing = missing.len(),
            total = series.len(),
            "planning series load"
        );

        if missing.is_empty() {
            on_ready(&self.cache);
            return Ok(LoadTicket::Ready);
        }

        for id in &missing {
            if self.pending.insert(id.clone()) {
                debug!(series_id = %id, "requesting series data");
                self.source.request(id);
            } else {
                trace!(series_id = %id, "series already in flight");
            }
        }

        let request_id = RequestId(self.next_request_id);
        self.next_request_id = self.next_request_id.saturating_add(1);
        self.waiters.push(Waiter {
            request_id,
            remaining: missing,
            on_ready: Box::new(on_ready),
        });
        Ok(LoadTicket::Pending(request_id))
    }

    /// Records a completed load and runs every request it completes, in the
    /// order the requests were made. Returns how many continuations ran.
    pub fn notify_loaded(&mut self, series_id: &str, data: SeriesData) -> usize {
        trace!(series_id, points = data.len(), "series loaded");
        self.cache.insert(series_id, data);
        self.pending.shift_remove(series_id);

        for waiter in &mut self.waiters {
            waiter.remaining.shift_remove(series_id);
        }
        let (ready, waiting): (Vec<Waiter>, Vec<Waiter>) = std::mem::take(&mut self.waiters)
            .into_iter()
            .partition(|waiter| waiter.remaining.is_empty());
        self.waiters = waiting;

        let fired = ready.len();
        for waiter in ready {
            trace!(request = %waiter.request_id, "series request ready");
            (waiter.on_ready)(&self.cache);
        }
        fired
    }

    /// Records a failed load. Requests that needed the series are dropped
    /// without running; returns how many were dropped.
    pub fn notify_failed(&mut self, series_id: &str, reason: &str) -> usize {
        self.pending.shift_remove(series_id);
        let before = self.waiters.len();
        self.waiters.retain(|waiter| {
            let needs_series = waiter.remaining.contains(series_id);
            if needs_series {
                warn!(
                    request = %waiter.request_id,
                    series_id,
                    reason,
                    "dropping series request after failed load"
                );
            }
            !needs_series
        });
        before - self.waiters.len()
    }

    /// Forgets the continuation of `request_id`. Its loads keep running and
    /// still populate the cache. Returns `false` if it already ran.
    pub fn cancel(&mut self, request_id: RequestId) -> bool {
        let before = self.waiters.len();
        self.waiters.retain(|waiter| waiter.request_id != request_id);
        let cancelled = self.waiters.len() != before;
        if cancelled {
            debug!(request = %request_id, "cancelled series request");
        }
        cancelled
    }

    #[must_use]
    pub fn is_waiting(&self, request_id: RequestId) -> bool {
        self.waiters
            .iter()
            .any(|waiter| waiter.request_id == request_id)
    }

    pub fn pending_ids(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn waiter_count(&self) -> usize {
        self.waiters.len()
    }

    #[must_use]
    pub fn cache(&self) -> &SeriesCache {
        &self.cache
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
