//! Service order report layout
//!
//! Format-agnostic pagination of companies and their service orders.
//! Drawing goes through [`ReportRenderer`]; the PDF backend lives in
//! [`crate::pdf`].

pub mod backend;
pub mod columns;
pub mod error;
pub mod layout;
pub mod model;
pub mod paginator;
pub mod renderer;
#[doc(hidden)]
pub mod testing;

pub use backend::ReportBackend;
pub use columns::{ColumnSpec, TableSpec, DEFAULT_COLUMN_WIDTH};
pub use error::{ReportError, Result};
pub use layout::{PageAccounting, ROWS_PER_PAGE};
pub use model::{Company, OrderRecord, ReportRequest};
pub use paginator::{Paginator, ReportHeader, DEFAULT_ORGANIZATION};
pub use renderer::{FontWeight, Orientation, ReportRenderer, TextAlign, TextStyle, VerticalAlign};
