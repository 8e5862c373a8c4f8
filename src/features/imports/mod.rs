//! Spreadsheet import pipeline shared by the geography and respondent
//! uploads: parse the file, validate the header, then reconcile rows
//! against what is already stored.

pub mod parser;
pub mod reconciler;
pub mod rows;
pub mod upload;

pub use parser::parse_upload;
pub use reconciler::{run_import, ImportReport, RowSink, SinkError, SkippedRow};
pub use upload::ImportFileDto;
