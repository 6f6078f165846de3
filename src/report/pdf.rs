use super::document::{Block, Document};
use crate::error::{ReportError, Result};
use crate::util::{latin1_lossy, wrap};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Rgb,
};
use std::borrow::Cow;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::warn;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const INDENT: f32 = 7.0;
const GAP: f32 = 5.0;
const PT_TO_MM: f32 = 0.3528;
/// Helvetica glyphs average about half an em.
const AVG_GLYPH_EM: f32 = 0.5;

fn render_error(e: impl std::fmt::Display) -> ReportError {
    ReportError::Render(e.to_string())
}

#[derive(Clone, Copy)]
enum Face {
    Regular,
    Bold,
    Italic,
}

#[derive(Clone, Copy)]
struct Style {
    size: f32,
    face: Face,
    indent: f32,
    color: (f32, f32, f32),
}

const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);
const BLUE: (f32, f32, f32) = (0.0, 0.0, 1.0);
const GRAY: (f32, f32, f32) = (0.5, 0.5, 0.5);

const TITLE: Style = Style { size: 24.0, face: Face::Bold, indent: 0.0, color: BLACK };
const BODY: Style = Style { size: 10.0, face: Face::Regular, indent: 0.0, color: BLACK };
const SUMMARY: Style = Style { size: 10.0, face: Face::Bold, indent: 0.0, color: BLACK };
const DATE: Style = Style { size: 16.0, face: Face::Bold, indent: 0.0, color: BLUE };
const REPOSITORY: Style = Style { size: 14.0, face: Face::Bold, indent: INDENT, color: BLACK };
const BRANCH: Style = Style { size: 12.0, face: Face::Bold, indent: 2.0 * INDENT, color: GRAY };
const COMMIT_HEAD: Style = Style { size: 9.0, face: Face::Bold, indent: 3.0 * INDENT, color: BLACK };
const COMMIT_AUTHOR: Style = Style { size: 9.0, face: Face::Italic, indent: 3.0 * INDENT, color: BLACK };
const COMMIT_ID: Style = Style { size: 9.0, face: Face::Regular, indent: 3.0 * INDENT, color: BLUE };

/// Lays text out top to bottom on A4 pages, starting a new page when the current one fills.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    y: f32,
    pages: usize,
    /// Lines that lost characters the built-in fonts cannot draw.
    lossy_lines: usize,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render_error)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(render_error)?;
        let italic = doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(render_error)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            italic,
            y: PAGE_HEIGHT - MARGIN,
            pages: 1,
            lossy_lines: 0,
        })
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Layer {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn ensure_space(&mut self, height: f32) {
        if self.y - height < MARGIN {
            self.new_page();
        }
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
        if self.y < MARGIN {
            self.new_page();
        }
    }

    fn text(&mut self, text: &str, style: Style) {
        let line_height = style.size * PT_TO_MM * 1.35;
        let width = PAGE_WIDTH - 2.0 * MARGIN - style.indent;
        let per_line = (width / (style.size * PT_TO_MM * AVG_GLYPH_EM)) as usize;

        let (r, g, b) = style.color;
        let text = latin1_lossy(text);
        if let Cow::Owned(_) = text {
            self.lossy_lines += 1;
        }
        for line in wrap(&text, per_line) {
            self.ensure_space(line_height);
            self.y -= line_height;
            let font = match style.face {
                Face::Regular => &self.regular,
                Face::Bold => &self.bold,
                Face::Italic => &self.italic,
            };
            self.layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
            self.layer
                .use_text(line, style.size, Mm(MARGIN + style.indent), Mm(self.y), font);
        }
    }

    fn finish(self, path: &Path) -> Result<()> {
        if self.lossy_lines > 0 {
            warn!(
                "{} line(s) contain characters outside Latin-1, drawn as '?' in the PDF; \
                 use --format markdown or --format json to keep them",
                self.lossy_lines
            );
        }
        let mut out = BufWriter::new(File::create(path)?);
        self.doc.save(&mut out).map_err(render_error)?;
        Ok(())
    }
}

pub fn output_pdf(document: &Document, path: &Path) -> Result<()> {
    let mut writer = PageWriter::new(&document.title)?;

    for block in &document.blocks {
        match block {
            Block::Title(title) => {
                writer.text(title, TITLE);
                writer.gap(GAP);
            }
            Block::Paragraph(text) => writer.text(text, BODY),
            Block::Summary(rows) => {
                for (label, value) in rows {
                    writer.text(&format!("{label}: {value}"), SUMMARY);
                }
            }
            Block::Date(date) => {
                writer.gap(GAP / 2.0);
                writer.text(date, DATE);
            }
            Block::Repository(name) => writer.text(&format!("Repository: {name}"), REPOSITORY),
            Block::Branch { name, count } => {
                writer.text(&format!("Branch: {name} ({count} commits)"), BRANCH)
            }
            Block::Commit(line) => {
                writer.ensure_space(3.0 * 9.0 * PT_TO_MM * 1.35);
                writer.text(&line.headline, COMMIT_HEAD);
                writer.text(&line.author, COMMIT_AUTHOR);
                writer.text(&line.commit_id, COMMIT_ID);
                writer.gap(1.5);
            }
            Block::Gap => writer.gap(GAP),
        }
    }

    writer.finish(path)
}
