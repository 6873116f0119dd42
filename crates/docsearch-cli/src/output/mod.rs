//! # Output Formatting
//!
//! Every data command renders through one of four formats:
//!
//! - **Text**: colored, aligned output for terminals
//! - **JSON**: one pretty-printed document
//! - **JSONL**: one compact JSON object per line
//! - **Raw**: bare values (usually locations), one per line
//!
//! Commands build serializable values and hand them to [`json`] or
//! [`text`]; nothing below this module decides which format is used.

pub mod formatter;
pub mod json;
pub mod text;

pub use formatter::OutputFormat;
