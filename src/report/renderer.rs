//! Drawing capability used by the paginator
//!
//! The paginator only speaks to this trait. The PDF backend lives in
//! [`crate::pdf`]; tests drive the paginator with a recording renderer.

use super::columns::TableSpec;
use super::error::Result;

/// Page orientation. Reports are printed landscape only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Landscape,
}

/// Font weight of the report typeface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Horizontal alignment of text or cell content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Start of the line (left for LTR scripts)
    Start,
    Left,
    Center,
    Right,
}

/// Vertical alignment of cell content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

/// Font selection for a run of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub weight: FontWeight,
    pub size: f32,
}

impl TextStyle {
    pub const fn bold(size: f32) -> Self {
        Self {
            weight: FontWeight::Bold,
            size,
        }
    }

    pub const fn regular(size: f32) -> Self {
        Self {
            weight: FontWeight::Regular,
            size,
        }
    }
}

/// Document drawing operations needed to lay out a report.
///
/// Coordinates are PDF points measured from the top-left corner of the
/// current page. Implementations own the vertical cursor.
pub trait ReportRenderer {
    /// Start a document. The first page is deferred until [`add_page`](Self::add_page).
    fn begin_document(&mut self) -> Result<()>;

    /// Append a page and move the cursor to its top margin
    fn add_page(&mut self, orientation: Orientation) -> Result<()>;

    /// Flow one block of text at the cursor and advance past it.
    ///
    /// `line_gap` is extra space added after each line; negative values pull
    /// the next block up onto the same baseline band.
    fn draw_text(
        &mut self,
        style: &TextStyle,
        content: &str,
        align: TextAlign,
        line_gap: f32,
    ) -> Result<()>;

    /// Advance the cursor by `lines` times the current line height
    fn move_down(&mut self, lines: f32);

    /// Draw `rows` as a table and return how many physical pages the draw
    /// consumed. A table that overflows the page continues on new pages, so
    /// the result is at least 1.
    fn draw_table(
        &mut self,
        table: &TableSpec,
        rows: &[Vec<String>],
        x: f32,
        y: f32,
        width: f32,
    ) -> Result<usize>;

    /// Current vertical cursor position
    fn cursor_y(&self) -> f32;

    /// Number of physical pages in the document so far
    fn page_count(&self) -> usize;

    /// Stamp a footer on an already drawn page (1-based)
    fn draw_footer(&mut self, page_number: usize, text: &str) -> Result<()>;

    /// Finalise the document and return its bytes
    fn finish(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}
