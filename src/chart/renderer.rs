use crate::error::DashboardResult;

use super::{ChartConfig, ChartKind, ChartSurface};

/// Contract implemented by any chart rendering backend.
///
/// Backends receive the assembled [`ChartConfig`] and the view-owned
/// surface, so drawing code stays isolated from lifecycle and data rules.
pub trait ChartRenderer {
    fn render(&mut self, config: &ChartConfig, surface: &mut ChartSurface)
    -> DashboardResult<()>;
}

/// No-op renderer used by tests and headless view usage.
///
/// It still validates the config so tests can catch bad payloads before a
/// real backend is introduced, and records what the last pass would have
/// drawn.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_kind: Option<ChartKind>,
    pub last_dataset_count: usize,
    pub last_point_count: usize,
}

impl ChartRenderer for NullRenderer {
    fn render(
        &mut self,
        config: &ChartConfig,
        _surface: &mut ChartSurface,
    ) -> DashboardResult<()> {
        config.validate()?;
        self.render_count += 1;
        self.last_kind = Some(config.kind);
        self.last_dataset_count = config.data.datasets.len();
        self.last_point_count = config.data.point_count();
        Ok(())
    }
}
