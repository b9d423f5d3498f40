//! Options for requests to the server
//!

pub mod chart_opts;
pub mod export_opts;
pub mod paginate_opts;

pub use crate::opts::chart_opts::{ChartOpts, ChartType};
pub use crate::opts::export_opts::{CsvDelimiter, ExportFormat, ExportOpts, TextEncoding};
pub use crate::opts::paginate_opts::PaginateOpts;
