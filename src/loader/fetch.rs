use std::path::{Path, PathBuf};

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::Deserialize;

use crate::core::{DataPoint, SeriesData};
use crate::error::{ChartError, ChartResult};

use super::{SeriesSource, SeriesStore};

/// Asynchronous series transport.
pub trait SeriesFetch {
    fn fetch(&self, series_id: &str) -> LocalBoxFuture<'static, ChartResult<SeriesData>>;
}

type InFlight = LocalBoxFuture<'static, (String, ChartResult<SeriesData>)>;

/// Adapts a [`SeriesFetch`] into a fire-and-forget [`SeriesSource`].
///
/// Requests queue their futures here; the owning store is advanced with
/// [`SeriesStore::drive`] or [`SeriesStore::drain`].
pub struct FetchQueue<F> {
    fetcher: F,
    in_flight: FuturesUnordered<InFlight>,
}

impl<F: SeriesFetch> FetchQueue<F> {
    #[must_use]
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            in_flight: FuturesUnordered::new(),
        }
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    async fn next_completed(&mut self) -> Option<(String, ChartResult<SeriesData>)> {
        self.in_flight.next().await
    }
}

impl<F: SeriesFetch> SeriesSource for FetchQueue<F> {
    fn request(&mut self, series_id: &str) {
        let id = series_id.to_owned();
        let fetch = self.fetcher.fetch(series_id);
        self.in_flight
            .push(async move { (id, fetch.await) }.boxed_local());
    }
}

impl<F: SeriesFetch> SeriesStore<FetchQueue<F>> {
    /// Waits for the next fetch to finish and routes it to the store.
    /// Returns `false` when nothing is in flight.
    pub async fn drive(&mut self) -> bool {
        let Some((series_id, result)) = self.source_mut().next_completed().await else {
            return false;
        };
        match result {
            Ok(data) => {
                self.notify_loaded(&series_id, data);
            }
            Err(err) => {
                self.notify_failed(&series_id, &err.to_string());
            }
        }
        true
    }

    /// Drives until every queued fetch has finished.
    pub async fn drain(&mut self) {
        while self.drive().await {}
    }
}

/// Reads series from `<dir>/<id>.json` files.
#[derive(Debug, Clone)]
pub struct DirectoryFetch {
    dir: PathBuf,
}

impl DirectoryFetch {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, series_id: &str) -> ChartResult<PathBuf> {
        let escapes_dir = series_id.is_empty()
            || series_id.contains(['/', '\\'])
            || series_id.starts_with('.');
        if escapes_dir {
            return Err(ChartError::FetchFailed {
                id: series_id.to_owned(),
                reason: "series id is not a plain file name".to_owned(),
            });
        }
        Ok(self.dir.join(format!("{series_id}.json")))
    }
}

impl SeriesFetch for DirectoryFetch {
    fn fetch(&self, series_id: &str) -> LocalBoxFuture<'static, ChartResult<SeriesData>> {
        let id = series_id.to_owned();
        let path = self.path_for(series_id);
        async move {
            let path = path?;
            let raw = std::fs::read_to_string(&path).map_err(|e| ChartError::FetchFailed {
                id: id.clone(),
                reason: format!("{}: {e}", path.display()),
            })?;
            parse_series_json(&id, &raw)
        }
        .boxed_local()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPoint {
    Pair(f64, f64),
    Object { x: f64, y: f64 },
}

/// Parses a JSON array of `[x, y]` pairs or `{"x": .., "y": ..}` objects.
pub fn parse_series_json(series_id: &str, raw: &str) -> ChartResult<SeriesData> {
    let points: Vec<RawPoint> = serde_json::from_str(raw).map_err(|e| {
        ChartError::InvalidData(format!("failed to parse series `{series_id}`: {e}"))
    })?;
    Ok(points
        .into_iter()
        .map(|point| match point {
            RawPoint::Pair(x, y) | RawPoint::Object { x, y } => DataPoint::new(x, y),
        })
        .collect())
}
