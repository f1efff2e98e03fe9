use crate::error::{DashboardError, DashboardResult};

use super::ChartOptions;

/// Drawing surface owned by one chart view for its mounted lifetime.
///
/// The document is an SVG string. A render pass draws into it through
/// [`begin_pass`](Self::begin_pass) and then rewrites the root element per
/// [`ChartOptions`] with [`finalize`](Self::finalize), so the embedded chart
/// scales the way the dashboard layout expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSurface {
    width: u32,
    height: u32,
    document: String,
}

impl ChartSurface {
    /// Creates an empty surface with the given logical size.
    pub fn new(width: u32, height: u32) -> DashboardResult<Self> {
        if width == 0 || height == 0 {
            return Err(DashboardError::InvalidSurface { width, height });
        }
        Ok(Self {
            width,
            height,
            document: String::new(),
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Finished SVG document; empty before the first render pass.
    #[must_use]
    pub fn svg(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn is_rendered(&self) -> bool {
        !self.document.is_empty()
    }

    /// Begins a render pass, handing the backend a cleared document buffer.
    pub fn begin_pass(&mut self) -> &mut String {
        self.document.clear();
        &mut self.document
    }

    /// Rewrites the root `<svg>` element per the presentation options.
    ///
    /// A responsive surface gets `width="100%" height="100%"` plus the
    /// logical size as `viewBox`; `maintain_aspect_ratio: false` adds
    /// `preserveAspectRatio="none"`.
    pub fn finalize(&mut self, options: ChartOptions) -> DashboardResult<()> {
        let Some(open) = self.document.find("<svg") else {
            return Err(DashboardError::Render(
                "backend produced no svg root element".to_owned(),
            ));
        };
        let Some(close) = self.document[open..].find('>') else {
            return Err(DashboardError::Render(
                "svg root element is unterminated".to_owned(),
            ));
        };
        let root = self.root_tag(options);
        self.document.replace_range(open..open + close + 1, &root);
        Ok(())
    }

    fn root_tag(&self, options: ChartOptions) -> String {
        let mut tag = String::with_capacity(160);
        if options.responsive {
            tag.push_str(r#"<svg width="100%" height="100%""#);
        } else {
            tag.push_str(&format!(
                r#"<svg width="{}" height="{}""#,
                self.width, self.height
            ));
        }
        tag.push_str(&format!(r#" viewBox="0 0 {} {}""#, self.width, self.height));
        if !options.maintain_aspect_ratio {
            tag.push_str(r#" preserveAspectRatio="none""#);
        }
        tag.push_str(r#" xmlns="http://www.w3.org/2000/svg">"#);
        tag
    }
}
