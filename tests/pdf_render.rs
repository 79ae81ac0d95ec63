//! End-to-end PDF rendering tests
//!
//! These need a TrueType font. `REPORT_TEST_FONT` wins, otherwise a few
//! common system locations are tried; tests are skipped when none exists.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde_json::json;

use service_order_report::pdf::{
    render_report, FontSet, PdfRenderer, TableStats, PAGE_MARGIN, TABLE_BOTTOM_MARGIN,
};
use service_order_report::report::{
    Company, Orientation, OrderRecord, ReportHeader, ReportRenderer, TableSpec,
};

const FONT_CANDIDATES: &[&str] = &[
    "public/fonts/AngsanaNew.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn test_font() -> Option<PathBuf> {
    std::env::var("REPORT_TEST_FONT")
        .ok()
        .map(PathBuf::from)
        .into_iter()
        .chain(FONT_CANDIDATES.iter().map(PathBuf::from))
        .find(|path| path.is_file())
}

fn fonts() -> Option<FontSet> {
    let Some(font) = test_font() else {
        eprintln!("No TrueType font available, skipping");
        return None;
    };
    Some(FontSet::load(&font, &font).expect("test font loads"))
}

fn company(name: &str, rows: usize, command: &str) -> Company {
    Company {
        company_name: name.to_string(),
        company_code: "C001".to_string(),
        service_order: (0..rows)
            .map(|i| {
                [
                    ("ServiceOrderNo", json!(format!("SO-{i}"))),
                    ("Command", json!(command)),
                    ("Status", json!("Open")),
                ]
                .into_iter()
                .collect::<OrderRecord>()
            })
            .collect(),
    }
}

#[test]
fn test_render_report_produces_pdf() {
    let Some(fonts) = fonts() else { return };
    let header = ReportHeader::new("Test Org", NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());

    let bytes = render_report(
        fonts,
        &header,
        &[company("Acme", 7, "Replace bearing"), company("Globex", 2, "Inspect")],
    )
    .expect("report renders");

    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_tall_rows_overflow_onto_new_pages() {
    let Some(fonts) = fonts() else { return };
    let long_command = "replace the worn bearing and realign the drive shaft ".repeat(40);
    let table = TableSpec::for_fields(["ServiceOrderNo", "Command", "Status"]);
    let rows: Vec<Vec<String>> = (0..5)
        .map(|i| vec![format!("SO-{i}"), long_command.clone(), "Open".to_string()])
        .collect();

    let mut renderer = PdfRenderer::new(fonts, "Overflow");
    renderer.begin_document().unwrap();
    renderer.add_page(Orientation::Landscape).unwrap();

    let y = renderer.cursor_y();
    let consumed = renderer.draw_table(&table, &rows, 10.0, y, 780.0).unwrap();

    assert!(consumed > 1, "expected overflow, got {consumed} page(s)");
    assert_eq!(renderer.page_count(), consumed);
    assert_eq!(renderer.last_table().header_rows, consumed);
    for page in 1..=consumed {
        renderer
            .draw_footer(page, &format!("Page {page} of {consumed}"))
            .unwrap();
    }
    assert!(renderer.draw_footer(consumed + 1, "Page ? of ?").is_err());

    let bytes = renderer.finish().unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_renderer_requires_started_document() {
    let Some(fonts) = fonts() else { return };
    let mut renderer = PdfRenderer::new(fonts, "Unstarted");

    assert!(renderer.add_page(Orientation::Landscape).is_err());
    renderer.begin_document().unwrap();
    assert!(renderer.begin_document().is_err());
}

fn started_renderer(fonts: FontSet) -> PdfRenderer {
    let mut renderer = PdfRenderer::new(fonts, "Table");
    renderer.begin_document().unwrap();
    renderer.add_page(Orientation::Landscape).unwrap();
    renderer
}

fn short_rows(count: usize) -> Vec<Vec<String>> {
    (0..count)
        .map(|i| vec![format!("SO-{i}"), "Inspect".to_string(), "Open".to_string()])
        .collect()
}

#[test]
fn test_header_row_repeats_on_every_overflow_page() {
    let Some(fonts) = fonts() else { return };
    let table = TableSpec::for_fields(["ServiceOrderNo", "Command", "Status"]);
    let mut renderer = started_renderer(fonts);

    let y = renderer.cursor_y();
    let consumed = renderer
        .draw_table(&table, &short_rows(60), 10.0, y, 780.0)
        .unwrap();

    assert!(consumed > 1, "60 rows should not fit on one page");
    assert_eq!(
        renderer.last_table(),
        TableStats {
            pages: consumed,
            header_rows: consumed,
        }
    );
    assert_eq!(renderer.page_count(), consumed);
}

#[test]
fn test_row_taller_than_page_stays_on_starting_page() {
    let Some(fonts) = fonts() else { return };
    let table = TableSpec::for_fields(["ServiceOrderNo", "Command", "Status"]);
    let mut renderer = started_renderer(fonts);
    let giant = "replace worn bearing ".repeat(400);
    let rows = vec![vec!["SO-1".to_string(), giant, "Open".to_string()]];

    let y = renderer.cursor_y();
    assert_eq!(y, PAGE_MARGIN);
    let consumed = renderer.draw_table(&table, &rows, 10.0, y, 780.0).unwrap();

    // Taller than the usable page height; no blank page is inserted ahead of it
    assert!(renderer.cursor_y() - y > 612.0 - PAGE_MARGIN - TABLE_BOTTOM_MARGIN);
    assert_eq!(consumed, 1);
    assert_eq!(renderer.page_count(), 1);
    assert_eq!(renderer.last_table().header_rows, 1);
}

#[test]
fn test_table_starting_near_bottom_moves_to_next_page() {
    let Some(fonts) = fonts() else { return };
    let table = TableSpec::for_fields(["ServiceOrderNo", "Command", "Status"]);
    let mut renderer = started_renderer(fonts);

    let y = 612.0 - TABLE_BOTTOM_MARGIN - 5.0;
    let consumed = renderer
        .draw_table(&table, &short_rows(1), 10.0, y, 780.0)
        .unwrap();

    assert_eq!(consumed, 2);
    assert_eq!(renderer.page_count(), 2);
    assert_eq!(renderer.last_table().header_rows, 1);
    assert!(renderer.cursor_y() < y);
}
