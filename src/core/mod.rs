pub mod chart;
pub mod types;

pub use chart::{ChartCatalog, ChartDefinition, SeriesRef, YAxisScalingMode};
pub use types::{DataPoint, SeriesData, Viewport};
