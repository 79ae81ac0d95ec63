//! PDF output for service order reports
//!
//! - `fonts`: loading the report typeface and measuring text
//! - `writer`: the `printpdf` backed [`ReportRenderer`](crate::report::ReportRenderer)

pub mod fonts;
pub mod writer;

use std::path::PathBuf;

pub use fonts::{FontFace, FontSet, Measure};
pub use writer::{PdfRenderer, TableStats, PAGE_MARGIN, TABLE_BOTTOM_MARGIN};

use crate::config::ReportConfig;
use crate::report::{Company, Paginator, ReportBackend, ReportHeader, Result};

/// Lay out `companies` and return the encoded PDF
pub fn render_report(fonts: FontSet, header: &ReportHeader, companies: &[Company]) -> Result<Vec<u8>> {
    let renderer = PdfRenderer::new(fonts, header.title.clone());
    Paginator::new(header).generate(renderer, companies)
}

/// Renders PDFs with fonts read from disk on every request
#[derive(Debug, Clone)]
pub struct PdfBackend {
    font_regular: PathBuf,
    font_bold: PathBuf,
}

impl PdfBackend {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            font_regular: config.font_regular.clone(),
            font_bold: config.font_bold.clone(),
        }
    }
}

impl ReportBackend for PdfBackend {
    fn render(&self, header: &ReportHeader, companies: &[Company]) -> Result<Vec<u8>> {
        let fonts = FontSet::load(&self.font_regular, &self.font_bold)?;
        tracing::debug!(
            regular = %fonts.regular.path().display(),
            bold = %fonts.bold.path().display(),
            "Fonts loaded"
        );
        render_report(fonts, header, companies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportError;
    use chrono::NaiveDate;

    #[test]
    fn test_backend_fails_without_fonts() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig {
            font_regular: dir.path().join("AngsanaNew.ttf"),
            font_bold: dir.path().join("AngsanaNew-Bold.ttf"),
            ..ReportConfig::default()
        };
        let header = ReportHeader::new("Org", NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());

        let err = PdfBackend::new(&config)
            .render(&header, &[Company::default()])
            .unwrap_err();
        assert!(matches!(err, ReportError::Font { .. }));
    }
}
