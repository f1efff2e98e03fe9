//! Chart view component and its rendering seam.
//!
//! A view owns one SVG drawing surface and delegates drawing to a
//! [`ChartRenderer`] backend, keeping chart data and lifecycle rules
//! isolated from backend specifics.

mod config;
mod data;
mod renderer;
mod surface;
mod view;

pub use config::{ChartConfig, ChartKind, ChartOptions, ChartViewConfig};
pub use data::{ChartData, Dataset, RgbColor, palette_color};
pub use renderer::{ChartRenderer, NullRenderer};
pub use surface::ChartSurface;
pub use view::{ChartView, ViewState};

#[cfg(feature = "plotters-backend")]
mod svg_renderer;
#[cfg(feature = "plotters-backend")]
pub use svg_renderer::SvgRenderer;
