//! analysis-dashboard: chart selection and lazy series loading.
//!
//! A dashboard page lists a catalog of chart definitions. Picking one loads
//! the series it references (only the ones not already cached), then hands
//! the resolved data to a chart widget together with sizing, axis and
//! annotation settings. The widget, the select element and the series
//! transport are collaborators behind traits.

pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod loader;
pub mod params;
pub mod select;
pub mod telemetry;

pub use config::{ChartLayout, DashboardConfig};
pub use controller::{ChartController, ChartWidget, ChartWidgetConfig, ChartWidgetFactory};
pub use error::{ChartError, ChartResult};
pub use loader::{LoadTicket, RequestId, SeriesCache, SeriesSource, SeriesStore};
pub use params::{
    UrlParams, build_url_string_from_url_params, bytes_to_human_readable_size, get_url_params,
};
pub use select::{ChartSelect, init_select_box};
