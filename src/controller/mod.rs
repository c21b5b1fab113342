//! Chart selection: from a chart key to a constructed chart widget.

mod chart_controller;
mod formatter;
mod series;
mod sizing;

pub use chart_controller::ChartController;
pub use formatter::timestamp_to_datetime_string;
pub use series::{ResolvedSeries, resolve_series};
pub use sizing::ChartSizing;

use serde::Serialize;

use crate::core::YAxisScalingMode;
use crate::error::ChartResult;

/// Handler invoked when the user switches the widget's y-axis scaling.
pub type YAxisScalingChangedFn = Box<dyn FnMut(YAxisScalingMode)>;

/// Everything the chart widget needs to draw one chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartWidgetConfig {
    pub chart_key: String,
    pub series: Vec<ResolvedSeries>,
    pub right_column_width: u32,
    pub width: u32,
    pub height: u32,
    #[serde(skip)]
    pub x_formatter: fn(f64) -> String,
    pub annotations: serde_json::Value,
    pub y_axis_scaling_mode: YAxisScalingMode,
}

/// A constructed chart widget.
pub trait ChartWidget {
    fn on_y_axis_scaling_changed(&mut self, handler: YAxisScalingChangedFn);
}

/// Constructor side of the chart widget.
pub trait ChartWidgetFactory {
    type Widget: ChartWidget;

    fn create(&mut self, config: ChartWidgetConfig) -> ChartResult<Self::Widget>;
}
