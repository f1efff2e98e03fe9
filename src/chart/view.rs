use tracing::{debug, trace};

use crate::error::{DashboardError, DashboardResult};

use super::{
    ChartConfig, ChartData, ChartKind, ChartOptions, ChartRenderer, ChartSurface, ChartViewConfig,
};

/// Lifecycle state of a chart view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Unmounted,
    Mounted,
}

/// Reusable chart component bound to one drawing surface.
///
/// A view starts unmounted, mounts exactly once, and from then on re-renders
/// in place through [`update`](Self::update). Drawing is delegated to the
/// renderer the view was built with; render failures propagate to the caller
/// untouched.
#[derive(Debug)]
pub struct ChartView<R: ChartRenderer> {
    renderer: R,
    config: ChartConfig,
    surface: ChartSurface,
    state: ViewState,
}

impl<R: ChartRenderer> ChartView<R> {
    /// Builds an unmounted view owning a fresh surface.
    ///
    /// The optional kind input resolves here: absent means [`ChartKind::Line`].
    /// Presentation options are fixed at their defaults for every view.
    pub fn new(renderer: R, view_config: ChartViewConfig) -> DashboardResult<Self> {
        let surface = ChartSurface::new(view_config.width, view_config.height)?;
        let config = ChartConfig::new(view_config.resolved_kind(), view_config.data);
        Ok(Self {
            renderer,
            config,
            surface,
            state: ViewState::Unmounted,
        })
    }

    /// Mounts the view: exactly one delegated render into the owned surface.
    ///
    /// Mounting an already mounted view fails with
    /// [`DashboardError::AlreadyMounted`] and leaves the surface untouched.
    pub fn mount(&mut self) -> DashboardResult<()> {
        if self.state == ViewState::Mounted {
            return Err(DashboardError::AlreadyMounted);
        }
        self.config.validate()?;
        self.renderer.render(&self.config, &mut self.surface)?;
        self.state = ViewState::Mounted;
        debug!(
            kind = self.config.kind.as_str(),
            datasets = self.config.data.datasets.len(),
            "chart view mounted"
        );
        Ok(())
    }

    /// Replaces the chart data and re-renders the owned surface in place.
    ///
    /// Only valid once mounted; kind and options stay as they were at mount.
    pub fn update(&mut self, data: ChartData) -> DashboardResult<()> {
        if self.state != ViewState::Mounted {
            return Err(DashboardError::NotMounted);
        }
        data.validate()?;
        self.config.data = data;
        self.renderer.render(&self.config, &mut self.surface)?;
        trace!(
            points = self.config.data.point_count(),
            "chart view updated"
        );
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.state == ViewState::Mounted
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.config.kind
    }

    #[must_use]
    pub fn options(&self) -> ChartOptions {
        self.config.options
    }

    #[must_use]
    pub fn data(&self) -> &ChartData {
        &self.config.data
    }

    #[must_use]
    pub fn surface(&self) -> &ChartSurface {
        &self.surface
    }

    /// Finished SVG document of the owned surface.
    #[must_use]
    pub fn svg(&self) -> &str {
        self.surface.svg()
    }

    /// Renderer access, mainly for backends that record render state.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
