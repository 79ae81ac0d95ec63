//! Report output backends

use super::error::Result;
use super::model::Company;
use super::paginator::ReportHeader;

/// Turns companies into a finished document.
///
/// Each call builds and discards its own renderer; implementations hold no
/// per-request state.
pub trait ReportBackend: Send + Sync {
    /// MIME type of the produced document
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn render(&self, header: &ReportHeader, companies: &[Company]) -> Result<Vec<u8>>;
}
