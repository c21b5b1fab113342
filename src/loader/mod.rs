//! Series cache and the loading orchestration around it.
//!
//! `SeriesStore` is injected into whoever needs series data. It owns the
//! append-only cache, the set of ids in flight and one waiter per load
//! request, so overlapping chart loads each get their own completion.

mod cache;
mod fetch;
mod store;

pub use cache::SeriesCache;
pub use fetch::{DirectoryFetch, FetchQueue, SeriesFetch, parse_series_json};
pub use store::{LoadTicket, ReadyFn, RequestId, SeriesStore};

/// Transport that starts loading a series and reports back later.
///
/// Requests are fire-and-forget: completion arrives through
/// [`SeriesStore::notify_loaded`] or [`SeriesStore::notify_failed`].
pub trait SeriesSource {
    fn request(&mut self, series_id: &str);
}

impl<F: FnMut(&str)> SeriesSource for F {
    fn request(&mut self, series_id: &str) {
        self(series_id);
    }
}
