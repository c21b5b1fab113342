use crate::config::ChartLayout;
use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::params::UrlParams;

/// Pixel size of the chart widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSizing {
    pub width: u32,
    pub height: u32,
}

impl ChartSizing {
    /// Uses explicit `width`/`height` query params when present, otherwise the
    /// viewport minus the page chrome.
    pub fn resolve(
        params: &UrlParams,
        viewport: Viewport,
        layout: ChartLayout,
    ) -> ChartResult<Self> {
        let width = params
            .parse_u32("width")
            .unwrap_or_else(|| viewport.width.saturating_sub(layout.horizontal_chrome));
        let height = params
            .parse_u32("height")
            .unwrap_or_else(|| viewport.height.saturating_sub(layout.vertical_chrome));

        if width == 0 || height == 0 {
            return Err(ChartError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }
}
