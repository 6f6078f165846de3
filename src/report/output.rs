use super::aggregate::summarize;
use super::document::{sorted_sections, Block, Document, ReportMeta};
use crate::error::Result;
use crate::model::{GroupedReport, ReportOutput, SCHEMA_VERSION};
use clap::ValueEnum;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pdf,
    Markdown,
    Json,
}

/// Write the report artifact to `path` in the requested format.
pub fn write_report(
    report: &GroupedReport,
    document: &Document,
    meta: &ReportMeta,
    format: OutputFormat,
    path: &Path,
) -> Result<()> {
    match format {
        OutputFormat::Pdf => super::pdf::output_pdf(document, path),
        OutputFormat::Markdown => {
            let mut out = BufWriter::new(File::create(path)?);
            output_markdown(document, &mut out)?;
            out.flush()?;
            Ok(())
        }
        OutputFormat::Json => {
            let mut out = BufWriter::new(File::create(path)?);
            output_json(report, meta, &mut out)?;
            out.flush()?;
            Ok(())
        }
    }
}

pub fn output_json<W: Write>(report: &GroupedReport, meta: &ReportMeta, out: &mut W) -> Result<()> {
    let output = ReportOutput {
        version: SCHEMA_VERSION,
        generated_at: meta.generated_at,
        author_filter: meta.author_filter.clone(),
        truncated_repositories: meta.truncated_repositories.clone(),
        summary: summarize(report),
        dates: sorted_sections(report),
    };
    serde_json::to_writer_pretty(&mut *out, &output)?;
    writeln!(out)?;
    Ok(())
}

/// Backslash-escape Markdown metacharacters so commit text cannot alter the document structure.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|' | '~') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub fn output_markdown<W: Write>(document: &Document, out: &mut W) -> Result<()> {
    let md = escape_markdown;
    for block in &document.blocks {
        match block {
            Block::Title(title) => writeln!(out, "# {}\n", md(title))?,
            Block::Paragraph(text) => writeln!(out, "{}\n", md(text))?,
            Block::Summary(rows) => {
                writeln!(out, "| Metric | Value |")?;
                writeln!(out, "|---|---|")?;
                for (label, value) in rows {
                    writeln!(out, "| {} | {} |", md(label), md(value))?;
                }
                writeln!(out)?;
            }
            Block::Date(date) => writeln!(out, "## {}\n", md(date))?,
            Block::Repository(name) => writeln!(out, "### Repository: {}\n", md(name))?,
            Block::Branch { name, count } => {
                writeln!(out, "#### Branch: {} ({count} commits)\n", md(name))?
            }
            Block::Commit(line) => {
                writeln!(out, "- **{}**  ", md(&line.headline))?;
                writeln!(out, "  {}  ", md(&line.author))?;
                writeln!(out, "  {}", md(&line.commit_id))?;
            }
            Block::Gap => writeln!(out)?,
        }
    }
    Ok(())
}
