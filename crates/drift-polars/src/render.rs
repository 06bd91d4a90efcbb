//! Rendering boundary
//!
//! Charts are drawn elsewhere. This module only fixes what a renderer gets:
//! the bundle, an immutable [`RenderConfig`], and the `apply_log` flag
//! carried by the bundle's transform decision.

use crate::summary::SummaryBundle;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Series colours, assigned in order and reused cyclically
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub colors: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [
                "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d",
                "#666666",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl Palette {
    /// Colour of the `i`-th series; `None` for an empty palette
    pub fn color(&self, i: usize) -> Option<&str> {
        if self.colors.is_empty() {
            return None;
        }
        Some(self.colors[i % self.colors.len()].as_str())
    }
}

/// Mapping from table columns to plot channels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotAesthetics {
    pub x: String,
    pub y: String,
    pub color: Option<String>,
    pub linetype: Option<String>,
    pub group: Option<String>,
}

impl PlotAesthetics {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            color: None,
            linetype: None,
            group: None,
        }
    }

    pub fn with_color(mut self, field: impl Into<String>) -> Self {
        self.color = Some(field.into());
        self
    }

    pub fn with_linetype(mut self, field: impl Into<String>) -> Self {
        self.linetype = Some(field.into());
        self
    }

    pub fn with_group(mut self, field: impl Into<String>) -> Self {
        self.group = Some(field.into());
        self
    }

    /// Statistic lines over the buckets of the long table
    pub fn time_series() -> Self {
        Self::new("bucket", "value")
            .with_color("statistic")
            .with_linetype("provenance")
            .with_group("statistic")
    }

    /// One box per coarse bucket
    pub fn distribution() -> Self {
        Self::new("bucket", "value").with_group("bucket")
    }
}

/// Everything a renderer is configured with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub palette: Palette,
    pub time_series: PlotAesthetics,
    pub distribution: PlotAesthetics,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            time_series: PlotAesthetics::time_series(),
            distribution: PlotAesthetics::distribution(),
        }
    }
}

/// A consumer of summary bundles, such as a chart backend
///
/// Returning an error for a log-scaled bundle makes
/// [`SummaryBundle::render_with`] retry on the raw scale.
pub trait SummaryRenderer {
    type Output;

    fn render(&self, bundle: &SummaryBundle, config: &RenderConfig) -> Result<Self::Output>;
}
