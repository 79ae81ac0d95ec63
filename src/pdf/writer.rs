//! `printpdf` implementation of [`ReportRenderer`]
//!
//! Keeps a top-down cursor in points and converts to PDF user space
//! (bottom-left origin, millimetres for printpdf) at draw time.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfLayerReference, PdfPageIndex, Point, Polygon, Rgb,
};

use super::fonts::{FontFace, FontSet};
use crate::report::columns::{HeaderBorder, RgbColor, TableSpec};
use crate::report::{
    FontWeight, Orientation, ReportError, ReportRenderer, Result, TextAlign, TextStyle,
    VerticalAlign,
};

/// US Letter, in points
const LETTER_WIDTH: f32 = 612.0;
const LETTER_HEIGHT: f32 = 792.0;

/// Page margin for flowed text
pub const PAGE_MARGIN: f32 = 72.0;
/// Lowest point a table row may reach, measured from the bottom edge
pub const TABLE_BOTTOM_MARGIN: f32 = 30.0;
/// Footer baseline, measured from the bottom edge
pub const FOOTER_BASELINE: f32 = 12.0;

const TABLE_HEADER_STYLE: TextStyle = TextStyle::bold(18.0);
const TABLE_ROW_STYLE: TextStyle = TextStyle::regular(18.0);
const FOOTER_STYLE: TextStyle = TextStyle::regular(22.0);

const LAYER_NAME: &str = "Layer 1";

fn mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

fn page_size(orientation: Orientation) -> (f32, f32) {
    match orientation {
        Orientation::Landscape => (LETTER_HEIGHT, LETTER_WIDTH),
    }
}

fn rgb(color: RgbColor) -> Color {
    Color::Rgb(Rgb::new(color.r, color.g, color.b, None))
}

#[derive(Debug, Clone, Copy)]
struct PageRef {
    page: PdfPageIndex,
    layer: PdfLayerIndex,
    width: f32,
    height: f32,
    orientation: Orientation,
}

/// Embedded font handles, one per weight
struct DocumentFonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl DocumentFonts {
    fn get(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

/// Column geometry resolved against the table width
struct ColumnLayout {
    x: f32,
    width: f32,
}

/// Outcome of the most recent [`ReportRenderer::draw_table`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Physical pages the table touched, including the page it started on
    pub pages: usize,
    /// Header rows drawn, one per page the table touched
    pub header_rows: usize,
}

/// Renders a report into a PDF document held in memory
pub struct PdfRenderer {
    fonts: FontSet,
    title: String,
    started: bool,
    doc: Option<(PdfDocumentReference, DocumentFonts)>,
    pages: Vec<PageRef>,
    cursor_y: f32,
    line_height: f32,
    last_table: TableStats,
}

impl PdfRenderer {
    pub fn new(fonts: FontSet, title: impl Into<String>) -> Self {
        let line_height = fonts.regular.line_height(12.0);
        Self {
            fonts,
            title: title.into(),
            started: false,
            doc: None,
            pages: Vec::new(),
            cursor_y: PAGE_MARGIN,
            line_height,
            last_table: TableStats::default(),
        }
    }

    pub fn last_table(&self) -> TableStats {
        self.last_table
    }

    fn current_page(&self) -> Result<PageRef> {
        self.pages
            .last()
            .copied()
            .ok_or_else(|| ReportError::Layout("No page to draw on".to_string()))
    }

    fn layer(&self, page: &PageRef) -> Result<PdfLayerReference> {
        let (doc, _) = self
            .doc
            .as_ref()
            .ok_or_else(|| ReportError::Layout("Document has no pages".to_string()))?;
        Ok(doc.get_page(page.page).get_layer(page.layer))
    }

    fn font_ref(&self, weight: FontWeight) -> Result<IndirectFontRef> {
        let (_, fonts) = self
            .doc
            .as_ref()
            .ok_or_else(|| ReportError::Layout("Document has no pages".to_string()))?;
        Ok(fonts.get(weight).clone())
    }

    fn face(&self, weight: FontWeight) -> &FontFace {
        self.fonts.get(weight)
    }

    /// Write one line with its top edge at `top` (points from the page top)
    fn put_line(&self, page: &PageRef, style: &TextStyle, text: &str, x: f32, top: f32) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let layer = self.layer(page)?;
        let font = self.font_ref(style.weight)?;
        let baseline = top + self.face(style.weight).ascent(style.size);
        layer.set_fill_color(rgb(RgbColor::BLACK));
        layer.use_text(text, style.size, mm(x), mm(page.height - baseline), &font);
        Ok(())
    }

    fn hline(&self, page: &PageRef, x1: f32, x2: f32, y: f32, thickness: f32) -> Result<()> {
        let layer = self.layer(page)?;
        layer.set_outline_color(rgb(RgbColor::BLACK));
        layer.set_outline_thickness(thickness);
        layer.add_line(Line {
            points: vec![
                (Point::new(mm(x1), mm(page.height - y)), false),
                (Point::new(mm(x2), mm(page.height - y)), false),
            ],
            is_closed: false,
        });
        Ok(())
    }

    fn fill_rect(&self, page: &PageRef, x: f32, y: f32, width: f32, height: f32, color: RgbColor) -> Result<()> {
        let layer = self.layer(page)?;
        let (top, bottom) = (page.height - y, page.height - y - height);
        layer.set_fill_color(rgb(color));
        layer.add_polygon(Polygon {
            rings: vec![vec![
                (Point::new(mm(x), mm(bottom)), false),
                (Point::new(mm(x + width), mm(bottom)), false),
                (Point::new(mm(x + width), mm(top)), false),
                (Point::new(mm(x), mm(top)), false),
            ]],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
        Ok(())
    }

    fn aligned_x(&self, style: &TextStyle, text: &str, align: TextAlign, left: f32, right: f32) -> f32 {
        let width = self.face(style.weight).text_width(text, style.size);
        match align {
            TextAlign::Start | TextAlign::Left => left,
            TextAlign::Center => left + ((right - left) - width).max(0.0) / 2.0,
            TextAlign::Right => (right - width).max(left),
        }
    }

    /// Resolve column positions, shrinking them proportionally when the
    /// declared widths exceed the table width
    fn column_layout(table: &TableSpec, x: f32, width: f32) -> Vec<ColumnLayout> {
        let declared = table.total_width();
        let scale = if declared > width && declared > 0.0 {
            width / declared
        } else {
            1.0
        };

        let mut left = x;
        table
            .columns
            .iter()
            .map(|column| {
                let layout = ColumnLayout {
                    x: left,
                    width: column.width * scale,
                };
                left += layout.width;
                layout
            })
            .collect()
    }

    /// Wrapped cell lines and the height of the row that holds them
    fn layout_row(
        &self,
        style: &TextStyle,
        cells: &[&str],
        columns: &[ColumnLayout],
        padding: f32,
    ) -> (Vec<Vec<String>>, f32) {
        let face = self.face(style.weight);
        let line_height = face.line_height(style.size);
        let measure = face.measure();
        let lines: Vec<Vec<String>> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let text = cells.get(i).copied().unwrap_or("");
                measure.wrap(text, style.size, (column.width - 2.0 * padding).max(1.0))
            })
            .collect();

        let max_lines = lines.iter().map(Vec::len).max().unwrap_or(1).max(1);
        (lines, max_lines as f32 * line_height + 2.0 * padding)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_row(
        &self,
        page: &PageRef,
        table: &TableSpec,
        style: &TextStyle,
        lines: &[Vec<String>],
        columns: &[ColumnLayout],
        top: f32,
        height: f32,
        header: bool,
    ) -> Result<()> {
        let padding = table.defaults.padding;
        let line_height = self.face(style.weight).line_height(style.size);

        for ((spec, column), cell_lines) in table.columns.iter().zip(columns).zip(lines) {
            if header {
                self.fill_rect(page, column.x, top, column.width, height, spec.header_color)?;
            }

            let block = cell_lines.len() as f32 * line_height;
            let first_top = match spec.valign {
                VerticalAlign::Top => top + padding,
                VerticalAlign::Center => top + (height - block) / 2.0,
                VerticalAlign::Bottom => top + height - padding - block,
            };
            let align = if header { table.defaults.align } else { spec.align };

            for (n, line) in cell_lines.iter().enumerate() {
                let x = self.aligned_x(
                    style,
                    line,
                    align,
                    column.x + padding,
                    column.x + column.width - padding,
                );
                self.put_line(page, style, line, x, first_top + n as f32 * line_height)?;
            }
        }
        Ok(())
    }

    fn draw_header_row(&mut self, table: &TableSpec, columns: &[ColumnLayout], left: f32, right: f32) -> Result<()> {
        let page = self.current_page()?;
        let labels: Vec<&str> = table.columns.iter().map(|c| c.label.as_str()).collect();
        let (lines, height) = self.layout_row(&TABLE_HEADER_STYLE, &labels, columns, table.defaults.padding);
        let top = self.cursor_y;

        self.draw_row(&page, table, &TABLE_HEADER_STYLE, &lines, columns, top, height, true)?;
        match table.defaults.header_border {
            HeaderBorder::None => {}
            HeaderBorder::Bottom => self.hline(&page, left, right, top + height, 1.0)?,
            HeaderBorder::All => {
                self.hline(&page, left, right, top, 1.0)?;
                self.hline(&page, left, right, top + height, 1.0)?;
            }
        }

        self.cursor_y = top + height;
        Ok(())
    }
}

impl ReportRenderer for PdfRenderer {
    fn begin_document(&mut self) -> Result<()> {
        if self.started {
            return Err(ReportError::Layout("Document already started".to_string()));
        }
        self.started = true;
        Ok(())
    }

    fn add_page(&mut self, orientation: Orientation) -> Result<()> {
        if !self.started {
            return Err(ReportError::Layout("Document not started".to_string()));
        }
        let (width, height) = page_size(orientation);

        let appended = self
            .doc
            .as_ref()
            .map(|(doc, _)| doc.add_page(mm(width), mm(height), LAYER_NAME));

        let (page, layer) = match appended {
            Some(ids) => ids,
            None => {
                let (doc, page, layer) = PdfDocument::new(&self.title, mm(width), mm(height), LAYER_NAME);
                let regular = doc
                    .add_external_font(self.fonts.regular.bytes())
                    .map_err(|e| ReportError::Pdf(format!("{:?}", e)))?;
                let bold = doc
                    .add_external_font(self.fonts.bold.bytes())
                    .map_err(|e| ReportError::Pdf(format!("{:?}", e)))?;
                self.doc = Some((doc, DocumentFonts { regular, bold }));
                (page, layer)
            }
        };

        self.pages.push(PageRef {
            page,
            layer,
            width,
            height,
            orientation,
        });
        self.cursor_y = PAGE_MARGIN;
        Ok(())
    }

    fn draw_text(
        &mut self,
        style: &TextStyle,
        content: &str,
        align: TextAlign,
        line_gap: f32,
    ) -> Result<()> {
        let page = self.current_page()?;
        let (left, right) = (PAGE_MARGIN, page.width - PAGE_MARGIN);
        let face = self.face(style.weight);
        let line_height = face.line_height(style.size);
        let lines = face.wrap(content, style.size, right - left);

        for line in &lines {
            let x = self.aligned_x(style, line, align, left, right);
            self.put_line(&page, style, line, x, self.cursor_y)?;
            self.cursor_y += line_height + line_gap;
        }

        self.line_height = line_height;
        Ok(())
    }

    fn move_down(&mut self, lines: f32) {
        self.cursor_y += lines * self.line_height;
    }

    fn draw_table(
        &mut self,
        table: &TableSpec,
        rows: &[Vec<String>],
        x: f32,
        y: f32,
        width: f32,
    ) -> Result<usize> {
        let start_page = self.current_page()?;
        let pages_before = self.pages.len();
        let columns = Self::column_layout(table, x, width);
        let right = columns.last().map(|c| c.x + c.width).unwrap_or(x);
        let padding = table.defaults.padding;

        let labels: Vec<&str> = table.columns.iter().map(|c| c.label.as_str()).collect();
        let (_, header_height) = self.layout_row(&TABLE_HEADER_STYLE, &labels, &columns, padding);
        let first_row_height = rows
            .first()
            .map(|row| {
                let cells: Vec<&str> = row.iter().map(String::as_str).collect();
                self.layout_row(&TABLE_ROW_STYLE, &cells, &columns, padding).1
            })
            .unwrap_or(0.0);

        self.cursor_y = y;
        let limit = |page: &PageRef| page.height - TABLE_BOTTOM_MARGIN;
        let needed = header_height + first_row_height;
        // Rows taller than a whole page start where they are
        if self.cursor_y + needed > limit(&start_page) && PAGE_MARGIN + needed <= limit(&start_page) {
            self.add_page(start_page.orientation)?;
        }
        self.draw_header_row(table, &columns, x, right)?;
        let mut header_rows = 1;

        let mut rows_on_page = 0;
        for row in rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            let (lines, height) = self.layout_row(&TABLE_ROW_STYLE, &cells, &columns, padding);

            let page = self.current_page()?;
            if rows_on_page > 0 && self.cursor_y + height > limit(&page) {
                self.add_page(page.orientation)?;
                self.draw_header_row(table, &columns, x, right)?;
                header_rows += 1;
                rows_on_page = 0;
            }

            let page = self.current_page()?;
            let top = self.cursor_y;
            self.draw_row(&page, table, &TABLE_ROW_STYLE, &lines, &columns, top, height, false)?;
            self.hline(&page, x, right, top + height, 0.5)?;
            self.cursor_y = top + height;
            rows_on_page += 1;
        }

        self.line_height = self.face(TABLE_ROW_STYLE.weight).line_height(TABLE_ROW_STYLE.size);
        self.last_table = TableStats {
            pages: self.pages.len() - pages_before + 1,
            header_rows,
        };
        tracing::trace!(
            rows = rows.len(),
            pages = self.last_table.pages,
            header_rows,
            "Table drawn"
        );
        Ok(self.last_table.pages)
    }

    fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn draw_footer(&mut self, page_number: usize, text: &str) -> Result<()> {
        let page = page_number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .copied()
            .ok_or_else(|| {
                ReportError::Layout(format!(
                    "Footer for page {} of a {} page document",
                    page_number,
                    self.pages.len()
                ))
            })?;

        let face = self.face(FOOTER_STYLE.weight);
        let x = self.aligned_x(&FOOTER_STYLE, text, TextAlign::Right, PAGE_MARGIN, page.width - PAGE_MARGIN);
        let top = page.height - FOOTER_BASELINE - face.ascent(FOOTER_STYLE.size);
        self.put_line(&page, &FOOTER_STYLE, text, x, top)
    }

    fn finish(self) -> Result<Vec<u8>> {
        let (doc, _) = self
            .doc
            .ok_or_else(|| ReportError::Layout("Document has no pages".to_string()))?;
        doc.save_to_bytes()
            .map_err(|e| ReportError::Pdf(format!("{:?}", e)))
    }
}
