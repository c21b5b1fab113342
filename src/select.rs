//! Headless model of the chart select box.

use tracing::{debug, warn};

use crate::controller::{ChartController, ChartWidgetFactory};
use crate::core::ChartCatalog;
use crate::error::{ChartError, ChartResult};
use crate::loader::{LoadTicket, SeriesSource};
use crate::params::{History, PageLocation, UrlParams};

/// Query parameter holding the selected chart key.
pub const CHART_PARAM: &str = "chart";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Page element the select box is attached to.
pub trait SelectContainer {
    fn append_select(&mut self, select: &ChartSelect);
}

/// One option per chart, the current selection and focus state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSelect {
    options: Vec<SelectOption>,
    selected: Option<String>,
    focused: bool,
}

impl ChartSelect {
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }

    /// Handles a user selection: loads the chart, then rewrites the `chart`
    /// query param in place through `history`.
    pub fn change<S, F>(
        &mut self,
        chart_key: &str,
        controller: &mut ChartController<S, F>,
        location: &mut PageLocation,
        history: &mut impl History,
    ) -> ChartResult<LoadTicket>
    where
        S: SeriesSource,
        F: ChartWidgetFactory + 'static,
    {
        if !self.has_option(chart_key) {
            return Err(ChartError::UnknownChart {
                key: chart_key.to_owned(),
            });
        }
        debug!(chart = chart_key, "chart selection changed");
        let ticket = controller.load_chart(chart_key)?;
        self.selected = Some(chart_key.to_owned());
        location.replace_param(CHART_PARAM, chart_key, history);
        Ok(ticket)
    }
}

/// Builds the select box for `charts`, selects `initially_selected`, focuses
/// it and attaches it to `container`.
pub fn init_select_box(
    container: &mut impl SelectContainer,
    charts: &ChartCatalog,
    initially_selected: &str,
) -> ChartSelect {
    let options: Vec<SelectOption> = charts
        .iter()
        .map(|chart| SelectOption {
            label: chart.title.clone(),
            value: chart.key.clone(),
        })
        .collect();

    let mut select = ChartSelect {
        options,
        selected: None,
        focused: true,
    };
    if select.has_option(initially_selected) {
        select.selected = Some(initially_selected.to_owned());
    } else {
        warn!(
            chart = initially_selected,
            "initially selected chart is not in the catalog"
        );
    }
    container.append_select(&select);
    select
}

/// Chart to show on page load: the `chart` param, then the configured
/// default, then the first chart.
#[must_use]
pub fn initial_chart_key(
    params: &UrlParams,
    charts: &ChartCatalog,
    default_chart: Option<&str>,
) -> Option<String> {
    params
        .get(CHART_PARAM)
        .filter(|key| charts.contains(key))
        .or(default_chart.filter(|key| charts.contains(key)))
        .or_else(|| charts.first().map(|chart| chart.key.as_str()))
        .map(str::to_owned)
}
