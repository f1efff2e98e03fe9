//! dashboard-rs: presentation glue for server-rendered dashboards.
//!
//! Three concerns live here: a CSRF-aware client for partial page updates,
//! locale-aware currency and date formatters, and a chart view component
//! that renders dashboard payloads to embeddable SVG.

pub mod chart;
pub mod error;
pub mod format;
pub mod net;
pub mod telemetry;

pub use chart::{ChartConfig, ChartData, ChartKind, ChartView, ChartViewConfig, Dataset};
pub use error::{DashboardError, DashboardResult};
pub use net::{CsrfInterceptor, CsrfToken, UpdateClient};
