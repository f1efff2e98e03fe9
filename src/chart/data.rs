use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// Fallback colors applied to datasets without explicit colors, keyed by
/// dataset index (or slice index for sector charts).
const FALLBACK_PALETTE: [RgbColor; 7] = [
    RgbColor::new(54, 162, 235),
    RgbColor::new(255, 99, 132),
    RgbColor::new(255, 159, 64),
    RgbColor::new(255, 205, 86),
    RgbColor::new(75, 192, 192),
    RgbColor::new(153, 102, 255),
    RgbColor::new(201, 203, 207),
];

/// Palette entry for an index, cycling past the palette length.
#[must_use]
pub fn palette_color(index: usize) -> RgbColor {
    FALLBACK_PALETTE[index % FALLBACK_PALETTE.len()]
}

/// Solid RGB color parsed from a `#RRGGBB` dataset string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#RRGGBB` color string.
    pub fn parse_hex(input: &str) -> DashboardResult<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DashboardError::InvalidData(format!(
                "color must look like #RRGGBB, got {input:?}"
            )));
        }
        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|e| {
                DashboardError::InvalidData(format!("color component in {input:?}: {e}"))
            })
        };
        Ok(Self {
            r: component(0..2)?,
            g: component(2..4)?,
            b: component(4..6)?,
        })
    }
}

/// One labeled series of a dashboard chart.
///
/// Mirrors the camelCase payload dashboards send: `backgroundColor` and
/// `borderColor` are optional `#RRGGBB` strings. Keys this crate does not
/// model land in `extra` and survive a round trip untouched, so
/// renderer-specific options are never dropped between server and host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Dataset {
    #[must_use]
    pub fn new(label: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            data,
            background_color: None,
            border_color: None,
            extra: IndexMap::new(),
        }
    }

    /// Sets the fill color.
    #[must_use]
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Sets the stroke color.
    #[must_use]
    pub fn with_border_color(mut self, color: impl Into<String>) -> Self {
        self.border_color = Some(color.into());
        self
    }

    /// Stroke color for line-like rendering: border first, then background,
    /// then the palette entry for `index`.
    pub fn stroke_color(&self, index: usize) -> DashboardResult<RgbColor> {
        match self.border_color.as_deref().or(self.background_color.as_deref()) {
            Some(hex) => RgbColor::parse_hex(hex),
            None => Ok(palette_color(index)),
        }
    }

    /// Fill color for area-like rendering: background first, then border,
    /// then the palette entry for `index`.
    pub fn fill_color(&self, index: usize) -> DashboardResult<RgbColor> {
        match self.background_color.as_deref().or(self.border_color.as_deref()) {
            Some(hex) => RgbColor::parse_hex(hex),
            None => Ok(palette_color(index)),
        }
    }
}

/// Labels plus one or more datasets, the wire shape dashboards send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    #[must_use]
    pub fn new(labels: Vec<String>, datasets: Vec<Dataset>) -> Self {
        Self { labels, datasets }
    }

    /// Validates the shape a render pass relies on.
    ///
    /// Every dataset must carry exactly one value per label, every value
    /// must be finite, and declared colors must parse.
    pub fn validate(&self) -> DashboardResult<()> {
        if self.labels.is_empty() {
            return Err(DashboardError::InvalidData(
                "chart data needs at least one label".to_owned(),
            ));
        }
        if self.datasets.is_empty() {
            return Err(DashboardError::InvalidData(
                "chart data needs at least one dataset".to_owned(),
            ));
        }
        for (index, dataset) in self.datasets.iter().enumerate() {
            if dataset.data.len() != self.labels.len() {
                return Err(DashboardError::InvalidData(format!(
                    "dataset {index} ({:?}) has {} values for {} labels",
                    dataset.label,
                    dataset.data.len(),
                    self.labels.len(),
                )));
            }
            if let Some(value) = dataset.data.iter().find(|v| !v.is_finite()) {
                return Err(DashboardError::InvalidData(format!(
                    "dataset {index} ({:?}) contains non-finite value {value}",
                    dataset.label,
                )));
            }
            for color in [&dataset.background_color, &dataset.border_color]
                .into_iter()
                .flatten()
            {
                RgbColor::parse_hex(color)?;
            }
        }
        Ok(())
    }

    /// Smallest and largest finite value across all datasets.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for value in self.datasets.iter().flat_map(|dataset| &dataset.data) {
            if !value.is_finite() {
                continue;
            }
            range = Some(match range {
                None => (*value, *value),
                Some((min, max)) => (min.min(*value), max.max(*value)),
            });
        }
        range
    }

    /// Number of points per dataset, which equals the label count.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.labels.len()
    }
}
