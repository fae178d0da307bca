//! Output formatting modules.

pub mod json;
pub mod report;

pub use json::format_column_map;
pub use report::format_report;
