//! Report generation for assembled rows
//!
//! These generators play the part of the document sink: they receive the
//! report title, the metric columns and the assembled [`ReportRow`](crate::facts::ReportRow)s,
//! and only decide how to lay them out.
//!
//! # Implementation Model
//!
//! Four report generators are provided, each accessed through a `generate` function:
//! - **Console**: Aligned plain-text table, optionally colored
//! - **CSV**: Spreadsheet-compatible format with proper escaping
//! - **HTML**: A minimal document with a linked dependency table
//! - **JSON**: Machine-readable structured data
//!
//! All generators operate on the same input, a [`Report`], and write into a
//! `core::fmt::Write` sink. Unresolved metric values become the
//! [`UNRESOLVED_PLACEHOLDER`] in the human-readable formats and `null` in JSON.

mod common;
mod console;
mod csv;
mod html;
mod json;
mod report;

pub use common::{UNRESOLVED_PLACEHOLDER, report_title};
pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use html::generate as generate_html;
pub use json::generate as generate_json;
pub use report::Report;
