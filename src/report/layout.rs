//! Row slicing and page accounting
//!
//! Everything here is pure: the paginator feeds it the page counts the
//! renderer reports and gets back chunk ranges and footer labels.

use std::ops::Range;

/// Maximum order rows drawn in one table
pub const ROWS_PER_PAGE: usize = 5;

/// Number of logical page groups a company's rows are split into
pub fn total_company_pages(row_count: usize) -> usize {
    row_count.div_ceil(ROWS_PER_PAGE)
}

/// Split rows into consecutive chunks of at most [`ROWS_PER_PAGE`]
pub fn chunk_rows<T>(rows: &[T]) -> std::slice::Chunks<'_, T> {
    rows.chunks(ROWS_PER_PAGE)
}

/// One row chunk and what happens around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGroup {
    /// 1-based logical page within the company
    pub page: usize,
    /// Row indices drawn on this page
    pub rows: Range<usize>,
    /// Whether rows of the same company follow this chunk
    pub more_rows: bool,
    /// Whether a new page is added after this chunk
    pub advance_after: bool,
}

impl PageGroup {
    /// A header is redrawn on the page that follows this chunk
    pub fn header_follows(&self) -> bool {
        self.advance_after && self.more_rows
    }
}

/// Logical layout of one company
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyPlan {
    pub total_pages: usize,
    pub groups: Vec<PageGroup>,
}

/// Plan the chunks of a company with `row_count` rows.
///
/// A page is added after every chunk except the final chunk of the last
/// company.
pub fn plan_company(row_count: usize, is_last_company: bool) -> CompanyPlan {
    let total_pages = total_company_pages(row_count);
    let groups = (0..total_pages)
        .map(|index| {
            let start = index * ROWS_PER_PAGE;
            let end = (start + ROWS_PER_PAGE).min(row_count);
            let more_rows = end < row_count;
            PageGroup {
                page: index + 1,
                rows: start..end,
                more_rows,
                advance_after: more_rows || !is_last_company,
            }
        })
        .collect();

    CompanyPlan {
        total_pages,
        groups,
    }
}

/// `Page X of Y` labels for every physical page of a company.
///
/// `pages_per_draw` holds the physical pages each table draw consumed, so a
/// chunk that overflowed onto a second page contributes two labels.
pub fn footer_labels(pages_per_draw: &[usize]) -> Vec<String> {
    let total: usize = pages_per_draw.iter().sum();
    (1..=total)
        .map(|page| format_footer(page, total))
        .collect()
}

pub fn format_footer(page: usize, total: usize) -> String {
    format!("Page {} of {}", page, total)
}

/// Footer labels emitted after drawing logical page `current_page` under the
/// precomputed scheme, where a label is printed only when
/// `current_page - (total - i) + 1` lands on `current_page`.
///
/// Only agrees with the physical page count when every draw consumes
/// exactly one page; see [`footer_labels`].
pub fn legacy_footer_labels(
    total_company_pages: usize,
    current_page: usize,
    start_page: usize,
) -> Vec<String> {
    let total = total_company_pages as isize;
    let current = current_page as isize;

    (start_page as isize..=total)
        .filter_map(|i| {
            let company_page = if i == total && total == 1 {
                total
            } else {
                current - (total - i) + 1
            };
            (company_page == current).then(|| format_footer(current_page, total_company_pages))
        })
        .collect()
}

/// Running page counters threaded through the paginator.
///
/// Physical page numbers are 1-based across the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageAccounting {
    /// Physical pages drawn so far in the document
    pub total_pages: usize,
    /// First physical page of the current company
    pub company_start_page: usize,
    /// Logical page counter within the current company
    pub company_logical_page: usize,
    /// Physical pages consumed by each table draw of the current company
    pub company_draws: Vec<usize>,
}

impl PageAccounting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a company whose first page is physical page `start_page`
    pub fn start_company(&mut self, start_page: usize) {
        self.company_start_page = start_page;
        self.company_logical_page = 1;
        self.company_draws.clear();
        self.total_pages = self.total_pages.max(start_page);
    }

    /// Record a table draw that consumed `pages` physical pages
    pub fn record_draw(&mut self, pages: usize) {
        let pages = pages.max(1);
        if self.company_draws.is_empty() {
            self.total_pages = self.company_start_page + pages - 1;
        } else {
            self.total_pages += pages;
        }
        self.company_draws.push(pages);
    }

    /// Move to the next logical page of the same company
    pub fn next_logical_page(&mut self) {
        self.company_logical_page += 1;
    }

    /// Physical pages the current company occupies so far
    pub fn company_pages(&self) -> usize {
        self.company_draws.iter().sum()
    }

    /// `(physical page, label)` for each page of the current company
    pub fn company_footers(&self) -> Vec<(usize, String)> {
        footer_labels(&self.company_draws)
            .into_iter()
            .enumerate()
            .map(|(offset, label)| (self.company_start_page + offset, label))
            .collect()
    }

    /// Reset the per-company counters once a company is complete
    pub fn finish_company(&mut self) {
        self.company_logical_page = 0;
        self.company_draws.clear();
    }
}
