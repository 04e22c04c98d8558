// Renders parsed guide pages: headings, styled text, lists, highlighted code,
// screenshots and tables

use crate::content::{plain_text, Block, Span};
use crate::style::{self, Theme};
use eframe::egui;
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use tracing::warn;

/// Shared resources for rendering a document
pub struct RenderContext<'a> {
    pub syntax_set: &'a SyntaxSet,
    pub theme_set: &'a ThemeSet,
    pub theme: Theme,
    pub assets_root: &'a Path,
    pub image_width: f32,
    pub font_size: f32,
    pub code_font_size: f32,
    /// Images already reported as missing, so the log isn't flooded every frame
    pub missing_images: &'a RefCell<HashSet<String>>,
}

pub fn render_blocks(ui: &mut egui::Ui, blocks: &[Block], context: &RenderContext) {
    for (index, block) in blocks.iter().enumerate() {
        ui.push_id(index, |ui| render_block(ui, block, context));
    }
}

fn render_block(ui: &mut egui::Ui, block: &Block, context: &RenderContext) {
    match block {
        Block::Heading { level, spans } => {
            ui.add_space(if *level <= 2 { 10.0 } else { 6.0 });
            ui.label(
                egui::RichText::new(plain_text(spans))
                    .size(style::heading_size(*level))
                    .strong(),
            );
            ui.add_space(4.0);
        }
        Block::Paragraph(spans) => {
            render_spans(ui, spans, context);
            ui.add_space(6.0);
        }
        Block::List { start, items } => {
            for (i, item) in items.iter().enumerate() {
                let marker = match start {
                    Some(first) => format!("{}.", first + i as u64),
                    None => "•".to_string(),
                };
                ui.push_id(i, |ui| {
                    ui.horizontal_top(|ui| {
                        ui.add_space(8.0);
                        ui.label(egui::RichText::new(marker).size(context.font_size));
                        ui.vertical(|ui| {
                            for (j, block) in item.iter().enumerate() {
                                ui.push_id(j, |ui| render_list_item_block(ui, block, context));
                            }
                        });
                    });
                });
            }
            ui.add_space(6.0);
        }
        Block::Code { language, source } => render_code(ui, language.as_deref(), source, context),
        Block::Image { src, alt } => render_image(ui, src, alt, context),
        Block::Table { header, rows } => render_table(ui, header, rows, context),
        Block::Note(inner) => {
            render_note(ui, context.theme, |ui| render_blocks(ui, inner, context))
        }
        Block::Rule => {
            ui.add_space(4.0);
            ui.separator();
            ui.add_space(4.0);
        }
    }
}

/// Paragraphs inside list items sit tighter than top-level ones
fn render_list_item_block(ui: &mut egui::Ui, block: &Block, context: &RenderContext) {
    match block {
        Block::Paragraph(spans) => render_spans(ui, spans, context),
        other => render_block(ui, other, context),
    }
}

fn rich_text(span: &Span, context: &RenderContext) -> egui::RichText {
    let mut text = egui::RichText::new(&span.text).size(context.font_size);
    if span.style.strong {
        text = text.strong();
    }
    if span.style.emphasis {
        text = text.italics();
    }
    if span.style.code {
        text = text
            .monospace()
            .background_color(context.theme.code_background());
    }
    text
}

pub fn render_spans(ui: &mut egui::Ui, spans: &[Span], context: &RenderContext) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in spans {
            match &span.link {
                Some(url) => {
                    ui.hyperlink_to(rich_text(span, context), url);
                }
                None => {
                    ui.label(rich_text(span, context));
                }
            }
        }
    });
}

fn render_code(ui: &mut egui::Ui, language: Option<&str>, source: &str, context: &RenderContext) {
    let syntax = language
        .and_then(|lang| context.syntax_set.find_syntax_by_token(lang))
        .unwrap_or_else(|| context.syntax_set.find_syntax_plain_text());
    let font_id = egui::FontId::monospace(context.code_font_size);

    let mut job = egui::text::LayoutJob::default();
    match context.theme_set.themes.get(context.theme.syntax_theme()) {
        Some(theme) => {
            let mut highlighter = HighlightLines::new(syntax, theme);
            for line in LinesWithEndings::from(source) {
                let ranges = highlighter
                    .highlight_line(line, context.syntax_set)
                    .unwrap_or_default();
                for (style, text) in ranges {
                    let color = egui::Color32::from_rgb(
                        style.foreground.r,
                        style.foreground.g,
                        style.foreground.b,
                    );
                    job.append(
                        text,
                        0.0,
                        egui::TextFormat {
                            font_id: font_id.clone(),
                            color,
                            ..Default::default()
                        },
                    );
                }
            }
        }
        None => job.append(
            source,
            0.0,
            egui::TextFormat {
                font_id,
                color: ui.visuals().text_color(),
                ..Default::default()
            },
        ),
    }

    egui::Frame::group(ui.style())
        .fill(context.theme.code_background())
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_top(|ui| {
                ui.add(egui::Label::new(job).wrap());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.small_button("Copy").on_hover_text("Copy to clipboard").clicked() {
                        ui.ctx().copy_text(source.to_string());
                    }
                });
            });
        });
    ui.add_space(6.0);
}

/// Local file for a relative or absolute image reference; `None` for URLs
pub fn image_path(src: &str, assets_root: &Path) -> Option<PathBuf> {
    if src.contains("://") {
        return None;
    }
    let path = Path::new(src);
    Some(if path.is_absolute() {
        path.to_path_buf()
    } else {
        assets_root.join(path)
    })
}

fn render_image(ui: &mut egui::Ui, src: &str, alt: &str, context: &RenderContext) {
    let uri = match image_path(src, context.assets_root) {
        Some(path) if !path.is_file() => {
            if context.missing_images.borrow_mut().insert(src.to_string()) {
                warn!("Image not found: {}", path.display());
            }
            ui.label(
                egui::RichText::new(format!("🖼 {} (image not found: {})", alt, src))
                    .italics()
                    .weak(),
            );
            ui.add_space(6.0);
            return;
        }
        Some(path) => format!("file://{}", path.display()),
        None => src.to_string(),
    };

    let width = context.image_width.min(ui.available_width());
    ui.add(
        egui::Image::new(uri)
            .max_width(width)
            .maintain_aspect_ratio(true)
            .shrink_to_fit(),
    )
    .on_hover_text(alt);
    ui.add_space(8.0);
}

fn render_table(
    ui: &mut egui::Ui,
    header: &[Vec<Span>],
    rows: &[Vec<Vec<Span>>],
    context: &RenderContext,
) {
    use egui_extras::{Column, TableBuilder};

    let columns = header.len().max(1);
    TableBuilder::new(ui)
        .striped(true)
        .resizable(false)
        .vscroll(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(140.0), columns - 1)
        .column(Column::remainder())
        .header(style::TABLE_ROW_HEIGHT, |mut head| {
            for cell in header {
                head.col(|ui| {
                    ui.label(egui::RichText::new(plain_text(cell)).strong());
                });
            }
        })
        .body(|body| {
            body.rows(style::TABLE_ROW_HEIGHT, rows.len(), |mut row| {
                let cells = &rows[row.index()];
                for column in 0..columns {
                    row.col(|ui| {
                        if let Some(cell) = cells.get(column) {
                            style::truncated_label(ui, rich_text_cell(cell, context));
                        }
                    });
                }
            });
        });
    ui.add_space(8.0);
}

fn rich_text_cell(cell: &[Span], context: &RenderContext) -> egui::RichText {
    egui::RichText::new(plain_text(cell)).size(context.font_size)
}

/// Tinted callout used for block quotes and navigation placeholders
pub fn render_note(ui: &mut egui::Ui, theme: Theme, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::group(ui.style())
        .fill(theme.info_fill())
        .stroke(egui::Stroke::new(1.0, theme.info_text()))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_top(|ui| {
                ui.label(egui::RichText::new("ℹ").color(theme.info_text()).strong());
                ui.vertical(add_contents);
            });
        });
    ui.add_space(6.0);
}
