use serde::Serialize;
use tracing::warn;

use crate::core::{SeriesData, SeriesRef};
use crate::error::ChartResult;
use crate::loader::SeriesCache;

/// A series reference with its loaded data attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSeries {
    #[serde(flatten)]
    pub series: SeriesRef,
    pub data: SeriesData,
}

/// Attaches cached data to each series, keeping chart order.
///
/// Series with no points are left out with a warning; the chart still
/// renders with the rest.
pub fn resolve_series(
    series: &[SeriesRef],
    cache: &SeriesCache,
) -> ChartResult<Vec<ResolvedSeries>> {
    let mut resolved = Vec::with_capacity(series.len());
    for series_ref in series {
        let data = cache.require(&series_ref.id)?;
        if data.is_empty() {
            warn!(
                series = %series_ref.name,
                series_id = %series_ref.id,
                "series has empty data array, it will be ignored"
            );
            continue;
        }
        resolved.push(ResolvedSeries {
            series: series_ref.clone(),
            data: data.to_vec(),
        });
    }
    Ok(resolved)
}
