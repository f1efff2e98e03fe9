use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

use super::ChartData;

/// Kind of chart a view renders. The set is closed and part of the wire
/// contract; payloads carry it lowercase under the `type` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Pie,
    Doughnut,
}

impl ChartKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Doughnut => "doughnut",
        }
    }
}

/// Presentation options applied to the drawing surface.
///
/// Defaults follow the dashboard contract: `responsive` makes the rendered
/// root element scale with its container, and `maintain_aspect_ratio: false`
/// lets it fill the container instead of keeping the drawing proportions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
        }
    }
}

/// Assembled configuration handed to a rendering backend.
///
/// This type is serializable so dashboards can ship a whole chart setup from
/// the server as one payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type", default)]
    pub kind: ChartKind,
    pub data: ChartData,
    #[serde(default)]
    pub options: ChartOptions,
}

impl ChartConfig {
    #[must_use]
    pub fn new(kind: ChartKind, data: ChartData) -> Self {
        Self {
            kind,
            data,
            options: ChartOptions::default(),
        }
    }

    /// Validates the config as a whole before a render pass.
    pub fn validate(&self) -> DashboardResult<()> {
        self.data.validate()
    }

    /// Serializes to pretty JSON for debug output and fixture payloads.
    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DashboardError::Payload(format!("failed to serialize chart config: {e}")))
    }

    /// Deserializes a server-sent configuration payload.
    pub fn from_json(input: &str) -> DashboardResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| DashboardError::Payload(format!("failed to parse chart config: {e}")))
    }
}

/// Host-facing inputs of one chart view.
///
/// `data` is the one required input. `kind` is optional and resolves to
/// [`ChartKind::Line`] when the view is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartViewConfig {
    pub data: ChartData,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChartKind>,
    #[serde(default = "default_surface_width")]
    pub width: u32,
    #[serde(default = "default_surface_height")]
    pub height: u32,
}

impl ChartViewConfig {
    /// Creates a config with the required data input and defaults elsewhere.
    #[must_use]
    pub fn new(data: ChartData) -> Self {
        Self {
            data,
            kind: None,
            width: default_surface_width(),
            height: default_surface_height(),
        }
    }

    /// Sets an explicit chart kind.
    #[must_use]
    pub fn with_kind(mut self, kind: ChartKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the logical surface size.
    #[must_use]
    pub fn with_surface_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Chart kind with the optional input resolved.
    #[must_use]
    pub fn resolved_kind(&self) -> ChartKind {
        self.kind.unwrap_or_default()
    }
}

fn default_surface_width() -> u32 {
    640
}

fn default_surface_height() -> u32 {
    480
}
