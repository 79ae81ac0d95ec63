//! Report paginator
//!
//! Walks companies in order, draws the company header, slices order rows
//! into chunks, draws each chunk as a table and stamps `Page X of Y` footers
//! once a company's physical pages are known.

use chrono::NaiveDate;

use super::columns::TableSpec;
use super::error::{ReportError, Result};
use super::layout::{plan_company, PageAccounting};
use super::model::Company;
use super::renderer::{Orientation, ReportRenderer, TextAlign, TextStyle};

/// Left edge of every table
pub const TABLE_X: f32 = 10.0;
/// Width every table is laid out in
pub const TABLE_WIDTH: f32 = 780.0;

/// Organisation name printed on every header unless configured otherwise
pub const DEFAULT_ORGANIZATION: &str = "SUB SRI THAI PUBLIC CO.,LTD";
/// Report title printed under the organisation name
pub const REPORT_TITLE: &str = "Service Order Report";

/// Text block drawn at the top of each page that starts a row chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub organization: String,
    pub title: String,
    /// Report date, already formatted as `dd/mm/yyyy`
    pub date: String,
}

impl ReportHeader {
    pub fn new(organization: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            organization: organization.into(),
            title: REPORT_TITLE.to_string(),
            date: format_report_date(date),
        }
    }

    /// Account line naming the company
    pub fn account_line(company: &Company) -> String {
        format!(
            "Account Name บริษัท {} {}",
            company.company_name, company.company_code
        )
    }

    pub fn draw<R: ReportRenderer>(&self, renderer: &mut R, company: &Company) -> Result<()> {
        renderer.draw_text(&TextStyle::bold(40.0), &self.organization, TextAlign::Center, 0.0)?;
        renderer.move_down(0.2);
        renderer.draw_text(&TextStyle::bold(35.0), &self.title, TextAlign::Center, 0.0)?;
        renderer.move_down(0.5);
        renderer.draw_text(
            &TextStyle::bold(25.0),
            &Self::account_line(company),
            TextAlign::Start,
            -20.0,
        )?;
        renderer.draw_text(&TextStyle::bold(23.0), &self.date, TextAlign::Right, 0.0)?;
        renderer.move_down(2.0);
        Ok(())
    }
}

/// `dd/mm/yyyy`
pub fn format_report_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Lays out companies onto a renderer
pub struct Paginator<'a> {
    header: &'a ReportHeader,
    orientation: Orientation,
}

impl<'a> Paginator<'a> {
    pub fn new(header: &'a ReportHeader) -> Self {
        Self {
            header,
            orientation: Orientation::Landscape,
        }
    }

    /// Render every company and return the finished document.
    ///
    /// Companies without order rows have no columns to derive and are
    /// skipped. Fails with [`ReportError::Validation`] when nothing remains.
    pub fn generate<R: ReportRenderer>(&self, mut renderer: R, companies: &[Company]) -> Result<Vec<u8>> {
        let printable: Vec<&Company> = companies
            .iter()
            .filter(|company| {
                let has_rows = company.row_count() > 0;
                if !has_rows {
                    tracing::warn!(
                        company = %company.company_code,
                        "Skipping company without service orders"
                    );
                }
                has_rows
            })
            .collect();

        if printable.is_empty() {
            return Err(ReportError::Validation(
                "No service orders to render".to_string(),
            ));
        }

        renderer.begin_document()?;
        renderer.add_page(self.orientation)?;

        let mut accounting = PageAccounting::new();
        let last = printable.len() - 1;
        for (index, company) in printable.into_iter().enumerate() {
            self.render_company(&mut renderer, company, index == last, &mut accounting)?;
        }

        tracing::info!(
            companies = last + 1,
            pages = renderer.page_count(),
            "Report laid out"
        );

        renderer.finish()
    }

    fn render_company<R: ReportRenderer>(
        &self,
        renderer: &mut R,
        company: &Company,
        is_last_company: bool,
        accounting: &mut PageAccounting,
    ) -> Result<()> {
        accounting.start_company(renderer.page_count());
        self.header.draw(renderer, company)?;

        let table = TableSpec::for_fields(company.field_names());
        let rows = company.display_rows();
        let plan = plan_company(rows.len(), is_last_company);

        for group in &plan.groups {
            renderer.move_down(1.0);
            let y = renderer.cursor_y();
            let consumed = renderer.draw_table(&table, &rows[group.rows.clone()], TABLE_X, y, TABLE_WIDTH)?;
            accounting.record_draw(consumed);

            tracing::debug!(
                company = %company.company_code,
                page = group.page,
                of = plan.total_pages,
                rows = group.rows.len(),
                consumed,
                "Drew row chunk"
            );

            if group.advance_after {
                renderer.add_page(self.orientation)?;
                if group.header_follows() {
                    self.header.draw(renderer, company)?;
                    accounting.next_logical_page();
                }
            }
        }

        for (page, label) in accounting.company_footers() {
            renderer.draw_footer(page, &label)?;
        }
        tracing::debug!(
            company = %company.company_code,
            first_page = accounting.company_start_page,
            pages = accounting.company_pages(),
            "Company laid out"
        );
        accounting.finish_company();

        Ok(())
    }
}
