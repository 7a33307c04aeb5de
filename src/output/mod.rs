mod json;
mod markdown;

pub use json::JsonOutput;
pub use markdown::MarkdownOutput;

use crate::model::AnalysisRecord;
use std::io::Write;

pub trait OutputFormatter {
    fn format<W: Write>(&self, record: &AnalysisRecord, writer: &mut W) -> std::io::Result<()>;
}
