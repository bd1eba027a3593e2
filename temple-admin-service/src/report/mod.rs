//! Derived views over the transaction set: filtering, aggregation,
//! rendering and CSV import.

pub mod aggregate;
pub mod csv_format;
pub mod dashboard;
pub mod filter;
pub mod html;
pub mod labels;
pub mod model;
pub mod pdf;
mod service;
pub mod table;

pub use aggregate::{CategoryTotal, MonthlyTotal, Summary};
pub use dashboard::Dashboard;
pub use model::{Report, ReportBody};
pub use service::{ImportSummary, RenderedReport, ReportOutput, ReportService};
