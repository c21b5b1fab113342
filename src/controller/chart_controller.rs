use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::config::{ChartLayout, DashboardConfig};
use crate::core::{ChartCatalog, ChartDefinition, SeriesData, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::loader::{LoadTicket, RequestId, SeriesCache, SeriesSource, SeriesStore};
use crate::params::UrlParams;

use super::{
    ChartSizing, ChartWidget, ChartWidgetConfig, ChartWidgetFactory, resolve_series,
    timestamp_to_datetime_string,
};

/// State shared with load continuations that outlive a `load_chart` call.
struct WidgetSlot<F: ChartWidgetFactory> {
    factory: F,
    widget: Option<F::Widget>,
    chart_key: Option<String>,
    last_error: Option<ChartError>,
    /// Read when series become ready, so a resize during loading is honored.
    viewport: Viewport,
}

impl<F: ChartWidgetFactory> WidgetSlot<F> {
    fn show(&mut self, chart_key: &str, config: ChartWidgetConfig) -> ChartResult<()> {
        let mut widget = self.factory.create(config)?;
        let scaling_chart_key = chart_key.to_owned();
        widget.on_y_axis_scaling_changed(Box::new(move |mode| {
            // TODO: persist the mode as a `yAxis` query param so a reload keeps it.
            debug!(chart = %scaling_chart_key, %mode, "y-axis scaling changed");
        }));
        self.widget = Some(widget);
        self.chart_key = Some(chart_key.to_owned());
        info!(chart = chart_key, "chart constructed");
        Ok(())
    }
}

/// Resolves chart selections into constructed chart widgets.
///
/// Series are loaded through the injected [`SeriesStore`]. Selecting a new
/// chart while an earlier one is still loading supersedes the earlier one:
/// its series keep loading into the cache but its widget is never built.
pub struct ChartController<S, F: ChartWidgetFactory> {
    catalog: ChartCatalog,
    store: SeriesStore<S>,
    slot: Rc<RefCell<WidgetSlot<F>>>,
    layout: ChartLayout,
    params: UrlParams,
    active_request: Option<RequestId>,
}

impl<S, F> ChartController<S, F>
where
    S: SeriesSource,
    F: ChartWidgetFactory + 'static,
{
    #[must_use]
    pub fn new(
        catalog: ChartCatalog,
        store: SeriesStore<S>,
        factory: F,
        viewport: Viewport,
    ) -> Self {
        Self {
            catalog,
            store,
            slot: Rc::new(RefCell::new(WidgetSlot {
                factory,
                widget: None,
                chart_key: None,
                last_error: None,
                viewport,
            })),
            layout: ChartLayout::default(),
            params: UrlParams::new(),
            active_request: None,
        }
    }

    pub fn from_config(
        config: &DashboardConfig,
        store: SeriesStore<S>,
        factory: F,
        viewport: Viewport,
    ) -> ChartResult<Self> {
        Ok(Self::new(config.catalog()?, store, factory, viewport).with_layout(config.layout))
    }

    #[must_use]
    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Page query params; `width` and `height` override the computed size.
    #[must_use]
    pub fn with_params(mut self, params: UrlParams) -> Self {
        self.params = params;
        self
    }

    /// Updates the viewport; a chart still loading is sized with the new one.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.slot.borrow_mut().viewport = viewport;
    }

    /// Loads the series of `chart_key` and builds its widget once they are
    /// all cached.
    ///
    /// With everything cached the widget is built before this returns and
    /// any construction error is returned. Otherwise construction happens on
    /// the completing [`notify_loaded`](Self::notify_loaded) and errors are
    /// kept for [`take_last_error`](Self::take_last_error) until the next
    /// `load_chart`.
    pub fn load_chart(&mut self, chart_key: &str) -> ChartResult<LoadTicket> {
        let chart = self.catalog.find(chart_key)?.clone();
        self.slot.borrow_mut().last_error = None;

        if let Some(previous) = self.active_request.take() {
            if self.store.cancel(previous) {
                debug!(request = %previous, chart = chart_key, "superseded pending chart load");
            }
        }

        let layout = self.layout;
        let params = self.params.clone();
        let series = chart.series.clone();
        let slot = Rc::clone(&self.slot);

        let ticket = self.store.load_series_data(&series, move |cache| {
            let viewport = slot.borrow().viewport;
            let result = ChartSizing::resolve(&params, viewport, layout)
                .and_then(|sizing| build_widget_config(&chart, cache, sizing, layout))
                .and_then(|config| slot.borrow_mut().show(&chart.key, config));
            if let Err(err) = result {
                warn!(chart = %chart.key, error = %err, "failed to construct chart");
                slot.borrow_mut().last_error = Some(err);
            }
        })?;

        match ticket {
            LoadTicket::Ready => {
                if let Some(err) = self.slot.borrow_mut().last_error.take() {
                    return Err(err);
                }
            }
            LoadTicket::Pending(request_id) => self.active_request = Some(request_id),
        }
        Ok(ticket)
    }

    /// Forwards a "series loaded" notification to the store.
    pub fn notify_loaded(&mut self, series_id: &str, data: SeriesData) -> usize {
        self.store.notify_loaded(series_id, data)
    }

    /// Forwards a failed load to the store.
    pub fn notify_failed(&mut self, series_id: &str, reason: &str) -> usize {
        self.store.notify_failed(series_id, reason)
    }

    /// Whether the most recent `load_chart` is still waiting for series.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.active_request
            .is_some_and(|request_id| self.store.is_waiting(request_id))
    }

    /// Key of the chart whose widget is currently shown.
    #[must_use]
    pub fn current_chart_key(&self) -> Option<String> {
        self.slot.borrow().chart_key.clone()
    }

    pub fn with_widget<T>(&self, f: impl FnOnce(&mut F::Widget) -> T) -> Option<T> {
        self.slot.borrow_mut().widget.as_mut().map(f)
    }

    pub fn with_factory<T>(&self, f: impl FnOnce(&mut F) -> T) -> T {
        f(&mut self.slot.borrow_mut().factory)
    }

    pub fn take_last_error(&mut self) -> Option<ChartError> {
        self.slot.borrow_mut().last_error.take()
    }

    #[must_use]
    pub fn catalog(&self) -> &ChartCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn store(&self) -> &SeriesStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SeriesStore<S> {
        &mut self.store
    }
}

fn build_widget_config(
    chart: &ChartDefinition,
    cache: &SeriesCache,
    sizing: ChartSizing,
    layout: ChartLayout,
) -> ChartResult<ChartWidgetConfig> {
    Ok(ChartWidgetConfig {
        chart_key: chart.key.clone(),
        series: resolve_series(&chart.series, cache)?,
        right_column_width: layout.right_column_width,
        width: sizing.width,
        height: sizing.height,
        x_formatter: timestamp_to_datetime_string,
        annotations: chart.annotations.clone(),
        y_axis_scaling_mode: chart.y_axis,
    })
}
