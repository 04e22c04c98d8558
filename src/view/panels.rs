// Panel rendering: navigation sidebar, content area and status bar

use crate::app::GuideApp;
use crate::content::{LoadedPage, Source};
use crate::state::{resolve, Category, ContentBlock, InstallTopic, NavigationState, SubPage};
use crate::style;
use crate::view::document::{render_blocks, render_note, RenderContext};
use eframe::egui;
use std::cell::RefCell;

pub const SIDEBAR_TITLE: &str = "Attendance System with Auto Report Guide & Manual";

impl GuideApp {
    pub(crate) fn render_sidebar(
        &self,
        ui: &mut egui::Ui,
        next_navigation: &RefCell<Option<NavigationState>>,
    ) {
        ui.add_space(6.0);
        ui.label(egui::RichText::new(SIDEBAR_TITLE).heading().strong());
        ui.add_space(6.0);
        ui.separator();

        let nav = self.navigation;
        egui::ScrollArea::vertical()
            .id_salt("sidebar_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for category in Category::ALL {
                    egui::CollapsingHeader::new(category.sidebar_label())
                        .id_salt(category.key())
                        .default_open(nav.category == Some(category))
                        .show(ui, |ui| match category {
                            Category::InstallationGuide => {
                                for topic in InstallTopic::ALL {
                                    let selected = nav.is_installation_selected(topic);
                                    if nav_button(ui, topic.label(), selected) {
                                        let next = nav.select_installation(topic);
                                        *next_navigation.borrow_mut() = Some(next);
                                    }
                                }
                            }
                            Category::UserManual => {
                                for page in SubPage::USER_MANUAL {
                                    let selected = nav.is_page_selected(category, page);
                                    if nav_button(ui, page.label(), selected) {
                                        let next = nav.select_user_manual(page);
                                        *next_navigation.borrow_mut() = Some(next);
                                    }
                                }
                            }
                            Category::About => {
                                for page in SubPage::ABOUT {
                                    let selected = nav.is_page_selected(category, page);
                                    if nav_button(ui, page.label(), selected) {
                                        let next = nav.select_about(page);
                                        *next_navigation.borrow_mut() = Some(next);
                                    }
                                }
                            }
                        });
                }
            });
    }

    pub(crate) fn render_content(&mut self, ui: &mut egui::Ui) {
        let block = resolve(&self.navigation);

        // Load before borrowing the render resources
        let page = match block {
            ContentBlock::Page(_, page) => {
                let (loaded, error) = self.library.page(page);
                if let Some(e) = error {
                    self.ui.set_error(e.to_string());
                }
                Some(loaded)
            }
            ContentBlock::Welcome | ContentBlock::Placeholder(_) => None,
        };
        let footer = (block.category() == Some(Category::About)).then(|| self.library.footer());

        let context = RenderContext {
            syntax_set: &self.syntax_set,
            theme_set: &self.theme_set,
            theme: self.ui.theme,
            assets_root: &self.assets_root,
            image_width: self.ui.image_width,
            font_size: self.ui.font_size,
            code_font_size: self.ui.code_font_size,
            missing_images: &self.missing_images,
        };
        let max_width = self.ui.content_max_width;

        egui::ScrollArea::vertical()
            .id_salt("content_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let available = ui.available_width();
                let column_width = max_width
                    .min(available - 2.0 * style::CONTENT_PADDING)
                    .max(style::CONTENT_MIN);
                let padding = ((available - column_width) / 2.0).max(style::CONTENT_PADDING);

                ui.horizontal_top(|ui| {
                    ui.add_space(padding);
                    ui.vertical(|ui| {
                        ui.set_max_width(column_width);
                        ui.add_space(12.0);
                        render_block_content(ui, block, page.as_deref(), &context);
                        if let Some(footer) = &footer {
                            render_blocks(ui, &footer.blocks, &context);
                        }
                        ui.add_space(24.0);
                    });
                });
            });
    }

    pub(crate) fn render_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let section = self.navigation.section().unwrap_or_else(|| "home".to_string());
            ui.label(egui::RichText::new(section).monospace());

            if let Some(dir) = self.library.override_dir() {
                ui.separator();
                style::truncated_label(ui, format!("pages: {}", dir.display()));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some((msg, _)) = &self.ui.error_message {
                    ui.colored_label(egui::Color32::RED, msg);
                } else if let Some((msg, _)) = &self.ui.info_message {
                    ui.colored_label(egui::Color32::GREEN, msg);
                }
            });
        });
    }
}

fn nav_button(ui: &mut egui::Ui, label: &str, selected: bool) -> bool {
    let width = ui.available_width();
    ui.add_sized(
        [width, 24.0],
        egui::Button::new(label).selected(selected),
    )
    .clicked()
}

fn render_block_content(
    ui: &mut egui::Ui,
    block: ContentBlock,
    page: Option<&LoadedPage>,
    context: &RenderContext,
) {
    if let Some(category) = block.category() {
        ui.label(
            egui::RichText::new(category.title())
                .size(style::TITLE_SIZE)
                .strong(),
        );
        ui.separator();
    }

    if let Some(message) = block.message() {
        render_note(ui, context.theme, |ui| {
            ui.label(egui::RichText::new(message).size(context.font_size));
        });
        return;
    }

    if let Some(page) = page {
        if let Source::Override(path) = &page.source {
            ui.label(
                egui::RichText::new(format!("from {}", path.display()))
                    .small()
                    .weak(),
            );
        }
        render_blocks(ui, &page.document.blocks, context);
    }
}
