use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Y-axis scaling applied by the chart widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum YAxisScalingMode {
    /// Uniform spacing in raw value units.
    #[default]
    Linear,
    /// Uniform spacing in natural-log units (all values must be > 0).
    Log,
    /// Percentage delta from the first visible value.
    Percentage,
    /// Values indexed to 100 at the first visible value.
    IndexedTo100,
}

impl YAxisScalingMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log => "log",
            Self::Percentage => "percentage",
            Self::IndexedTo100 => "indexedto100",
        }
    }
}

impl fmt::Display for YAxisScalingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YAxisScalingMode {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "log" | "logarithmic" => Ok(Self::Log),
            "percentage" | "percent" => Ok(Self::Percentage),
            "indexedto100" | "indexed" => Ok(Self::IndexedTo100),
            other => Err(ChartError::InvalidData(format!(
                "unknown y-axis scaling mode `{other}`"
            ))),
        }
    }
}

/// Reference from a chart to one series in the series cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRef {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Display attributes the widget understands but this crate does not.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl SeriesRef {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
            title: None,
            extra: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Static description of one selectable chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDefinition {
    #[serde(rename = "chartKey")]
    pub key: String,
    #[serde(rename = "chartTitle")]
    pub title: String,
    #[serde(rename = "chartSeries")]
    pub series: Vec<SeriesRef>,
    #[serde(rename = "chartAnnotations", default)]
    pub annotations: serde_json::Value,
    #[serde(rename = "chartYAxis", default)]
    pub y_axis: YAxisScalingMode,
}

impl ChartDefinition {
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>, series: Vec<SeriesRef>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            series,
            annotations: serde_json::Value::Null,
            y_axis: YAxisScalingMode::default(),
        }
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: serde_json::Value) -> Self {
        self.annotations = annotations;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, mode: YAxisScalingMode) -> Self {
        self.y_axis = mode;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.key.is_empty() {
            return Err(ChartError::InvalidData(
                "chart key must not be empty".to_owned(),
            ));
        }
        if let Some(series) = self.series.iter().find(|series| series.id.is_empty()) {
            return Err(ChartError::InvalidData(format!(
                "series `{}` in chart `{}` has an empty id",
                series.name, self.key
            )));
        }
        Ok(())
    }
}

/// Ordered set of chart definitions, unique by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartCatalog {
    charts: IndexMap<String, ChartDefinition>,
}

impl ChartCatalog {
    pub fn new(charts: impl IntoIterator<Item = ChartDefinition>) -> ChartResult<Self> {
        let mut catalog = Self::default();
        for chart in charts {
            catalog.insert(chart)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, chart: ChartDefinition) -> ChartResult<()> {
        chart.validate()?;
        if self.charts.contains_key(&chart.key) {
            return Err(ChartError::InvalidData(format!(
                "chart with key `{}` is already registered",
                chart.key
            )));
        }
        self.charts.insert(chart.key.clone(), chart);
        Ok(())
    }

    pub fn find(&self, key: &str) -> ChartResult<&ChartDefinition> {
        self.charts.get(key).ok_or_else(|| ChartError::UnknownChart {
            key: key.to_owned(),
        })
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.charts.contains_key(key)
    }

    #[must_use]
    pub fn first(&self) -> Option<&ChartDefinition> {
        self.charts.first().map(|(_, chart)| chart)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartDefinition> {
        self.charts.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}
