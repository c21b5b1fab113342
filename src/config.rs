use serde::{Deserialize, Serialize};

use crate::core::{ChartCatalog, ChartDefinition};
use crate::error::{ChartError, ChartResult};

/// Fixed page chrome around the chart widget, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartLayout {
    #[serde(default = "default_right_column_width")]
    pub right_column_width: u32,
    /// Height taken by the header and select box above the chart.
    #[serde(default = "default_vertical_chrome")]
    pub vertical_chrome: u32,
    #[serde(default)]
    pub horizontal_chrome: u32,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            right_column_width: default_right_column_width(),
            vertical_chrome: default_vertical_chrome(),
            horizontal_chrome: 0,
        }
    }
}

/// Dashboard page setup.
///
/// Serializable so a page generator can emit it next to the series files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub charts: Vec<ChartDefinition>,
    #[serde(default)]
    pub layout: ChartLayout,
    #[serde(default = "default_series_cache_dir")]
    pub series_cache_dir: String,
    #[serde(default)]
    pub default_chart: Option<String>,
}

impl DashboardConfig {
    #[must_use]
    pub fn new(charts: Vec<ChartDefinition>) -> Self {
        Self {
            charts,
            layout: ChartLayout::default(),
            series_cache_dir: default_series_cache_dir(),
            default_chart: None,
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_series_cache_dir(mut self, dir: impl Into<String>) -> Self {
        self.series_cache_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_default_chart(mut self, key: impl Into<String>) -> Self {
        self.default_chart = Some(key.into());
        self
    }

    /// Validates the chart list and indexes it by key.
    pub fn catalog(&self) -> ChartResult<ChartCatalog> {
        let catalog = ChartCatalog::new(self.charts.iter().cloned())?;
        if let Some(key) = &self.default_chart {
            catalog.find(key)?;
        }
        Ok(catalog)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_right_column_width() -> u32 {
    400
}

fn default_vertical_chrome() -> u32 {
    160
}

fn default_series_cache_dir() -> String {
    "jscache".to_owned()
}
