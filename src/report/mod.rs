pub mod aggregate;
pub mod branches;
pub mod document;
pub mod exec;
pub mod fetch;
pub mod output;
pub mod pdf;

pub use aggregate::{group_commits, summarize};
pub use branches::{BranchResolver, FixedResolver, ProbeResolver};
pub use document::{build_document, sorted_sections, Block, CommitLine, Document, ReportMeta};
pub use exec::exec;
pub use fetch::{fetch_commits, fetch_commits_with_progress, fetch_or_empty, matches_author};
pub use output::{escape_markdown, output_json, output_markdown, write_report, OutputFormat};
pub use pdf::output_pdf;
