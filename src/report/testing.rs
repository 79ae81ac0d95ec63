//! In-memory renderer that records draw calls
//!
//! Used by unit tests, integration tests and benchmarks to exercise the
//! paginator without producing a PDF.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::backend::ReportBackend;
use super::columns::TableSpec;
use super::error::{ReportError, Result};
use super::model::Company;
use super::paginator::{Paginator, ReportHeader};
use super::renderer::{Orientation, ReportRenderer, TextAlign, TextStyle};

const TOP_MARGIN: f32 = 72.0;
const LINE_HEIGHT: f32 = 12.0;
const ROW_HEIGHT: f32 = 20.0;

/// A recorded renderer call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    BeginDocument,
    AddPage(Orientation),
    Text {
        style: TextStyle,
        content: String,
        align: TextAlign,
        line_gap: f32,
    },
    MoveDown(f32),
    Table {
        spec: TableSpec,
        rows: Vec<Vec<String>>,
        x: f32,
        y: f32,
        width: f32,
        pages: usize,
    },
    Footer {
        page: usize,
        text: String,
    },
}

/// Everything a [`RecordingRenderer`] saw
#[derive(Debug, Clone, Default)]
pub struct Recording {
    pub ops: Vec<DrawOp>,
    pub pages: usize,
    pub cursor_y: f32,
    pub finished: bool,
}

impl Recording {
    /// Row chunks in draw order
    pub fn tables(&self) -> Vec<Vec<Vec<String>>> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Table { rows, .. } => Some(rows.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn table_specs(&self) -> Vec<TableSpec> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Table { spec, .. } => Some(spec.clone()),
                _ => None,
            })
            .collect()
    }

    /// `(page, text)` of every footer in stamp order
    pub fn footers(&self) -> Vec<(usize, String)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Footer { page, text } => Some((*page, text.clone())),
                _ => None,
            })
            .collect()
    }

    /// Number of company headers drawn
    pub fn headers_drawn(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { content, .. } if content.starts_with("Account Name")))
            .count()
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }
}

/// Shared handle to a recording that outlives the renderer
#[derive(Debug, Clone)]
pub struct RecordingLog(Rc<RefCell<Recording>>);

impl RecordingLog {
    pub fn snapshot(&self) -> Recording {
        self.0.borrow().clone()
    }
}

/// Renderer that records calls instead of drawing.
///
/// Each table draw consumes one page unless an overflow count was queued with
/// [`with_overflow`](Self::with_overflow).
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    state: Rc<RefCell<Recording>>,
    overflow: VecDeque<usize>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages consumed by the first table draws, in order
    pub fn with_overflow(pages: Vec<usize>) -> Self {
        Self {
            overflow: pages.into(),
            ..Self::default()
        }
    }

    pub fn log(&self) -> RecordingLog {
        RecordingLog(Rc::clone(&self.state))
    }

    fn require_page(&self) -> Result<()> {
        if self.state.borrow().pages == 0 {
            return Err(ReportError::Layout("No page to draw on".to_string()));
        }
        Ok(())
    }
}

impl ReportRenderer for RecordingRenderer {
    fn begin_document(&mut self) -> Result<()> {
        self.state.borrow_mut().ops.push(DrawOp::BeginDocument);
        Ok(())
    }

    fn add_page(&mut self, orientation: Orientation) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.pages += 1;
        state.cursor_y = TOP_MARGIN;
        state.ops.push(DrawOp::AddPage(orientation));
        Ok(())
    }

    fn draw_text(
        &mut self,
        style: &TextStyle,
        content: &str,
        align: TextAlign,
        line_gap: f32,
    ) -> Result<()> {
        self.require_page()?;
        let mut state = self.state.borrow_mut();
        state.cursor_y += style.size + line_gap;
        state.ops.push(DrawOp::Text {
            style: *style,
            content: content.to_string(),
            align,
            line_gap,
        });
        Ok(())
    }

    fn move_down(&mut self, lines: f32) {
        let mut state = self.state.borrow_mut();
        state.cursor_y += lines * LINE_HEIGHT;
        state.ops.push(DrawOp::MoveDown(lines));
    }

    fn draw_table(
        &mut self,
        table: &TableSpec,
        rows: &[Vec<String>],
        x: f32,
        y: f32,
        width: f32,
    ) -> Result<usize> {
        self.require_page()?;
        let pages = self.overflow.pop_front().unwrap_or(1).max(1);

        let mut state = self.state.borrow_mut();
        state.pages += pages - 1;
        state.cursor_y = y + (rows.len() + 1) as f32 * ROW_HEIGHT;
        state.ops.push(DrawOp::Table {
            spec: table.clone(),
            rows: rows.to_vec(),
            x,
            y,
            width,
            pages,
        });
        Ok(pages)
    }

    fn cursor_y(&self) -> f32 {
        self.state.borrow().cursor_y
    }

    fn page_count(&self) -> usize {
        self.state.borrow().pages
    }

    fn draw_footer(&mut self, page_number: usize, text: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if page_number == 0 || page_number > state.pages {
            return Err(ReportError::Layout(format!(
                "Footer for page {} of a {} page document",
                page_number, state.pages
            )));
        }
        state.ops.push(DrawOp::Footer {
            page: page_number,
            text: text.to_string(),
        });
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        let mut state = self.state.borrow_mut();
        state.finished = true;
        Ok(format!("%RECORDING pages={}", state.pages).into_bytes())
    }
}

/// Backend that lays reports out on a [`RecordingRenderer`] and returns a
/// short text summary instead of PDF bytes
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordingBackend;

impl ReportBackend for RecordingBackend {
    fn render(&self, header: &ReportHeader, companies: &[Company]) -> Result<Vec<u8>> {
        Paginator::new(header).generate(RecordingRenderer::new(), companies)
    }
}
