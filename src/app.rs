use crate::config::Config;
use crate::content::ContentLibrary;
use crate::error::ConfigError;
use crate::io::ContentWatcher;
use crate::state::{NavigationState, UIState};
use crate::style::{self, Theme};
use eframe::egui;
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::PathBuf;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use tracing::{debug, info, warn};

pub struct GuideApp {
    pub navigation: NavigationState,
    pub ui: UIState,
    pub library: ContentLibrary,
    pub watcher: Option<ContentWatcher>,
    pub assets_root: PathBuf,
    pub syntax_set: SyntaxSet,
    pub theme_set: ThemeSet,
    pub missing_images: RefCell<HashSet<String>>,
    /// Where theme changes are persisted; `None` when no config dir exists
    config_path: Option<PathBuf>,
}

impl GuideApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: Config,
        config_path: Option<PathBuf>,
    ) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let mut ui = ui_state(&config);
        let navigation = start_navigation(&config.ui.start_section);
        let override_dir = config.content.override_dir();

        let watcher = match &override_dir {
            Some(dir) if config.content.watch => {
                let ctx = cc.egui_ctx.clone();
                match ContentWatcher::spawn(dir, move || ctx.request_repaint()) {
                    Ok(watcher) => Some(watcher),
                    Err(e) => {
                        warn!("{}", e);
                        ui.set_error(e.to_string());
                        None
                    }
                }
            }
            _ => None,
        };

        let assets_root = config.content.assets_root();
        info!(
            assets = %assets_root.display(),
            pages = ?override_dir,
            "Starting guide"
        );

        Self {
            navigation,
            ui,
            library: ContentLibrary::new(override_dir),
            watcher,
            assets_root,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            missing_images: RefCell::new(HashSet::new()),
            config_path,
        }
    }

    pub fn reload_content(&mut self) {
        self.library.reload();
        self.missing_images.borrow_mut().clear();
        info!("Content reloaded");
        self.ui.set_info("Content reloaded".to_string());
    }

    pub fn toggle_theme(&mut self) {
        self.ui.toggle_theme();
        if let Err(e) = self.persist_theme() {
            warn!("Could not save theme: {}", e);
            self.ui.set_error(format!("Could not save theme: {}", e));
        }
    }

    /// Store the theme in the config file without touching other settings.
    /// A file that can't be read or parsed is left alone.
    fn persist_theme(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.config_path else {
            return Ok(());
        };
        let mut stored = if path.exists() {
            Config::load_from(path)?
        } else {
            Config::default()
        };
        stored.theme.mode = self.ui.theme.config_value().to_string();
        stored.save_to(path)
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        if self.ui.applied_theme != Some(self.ui.theme) {
            ctx.set_visuals(self.ui.theme.visuals());
            self.ui.applied_theme = Some(self.ui.theme);
        }
    }

    fn poll_watcher(&mut self) {
        let changed = self
            .watcher
            .as_ref()
            .is_some_and(|watcher| watcher.poll_changed());
        if changed {
            self.reload_content();
        }
    }
}

/// UI state seeded from the config, with sizes clamped to usable ranges
fn ui_state(config: &Config) -> UIState {
    let mut ui = UIState::new(Theme::from_config(&config.theme.mode));
    ui.sidebar_width = config
        .layout
        .sidebar_width
        .clamp(style::SIDEBAR_MIN, style::SIDEBAR_MAX);
    ui.content_max_width = config.layout.content_max_width.max(style::CONTENT_MIN);
    ui.image_width = config.layout.image_width.max(style::IMAGE_MIN);
    ui.font_size = config.font.font_size;
    ui.code_font_size = config.font.code_font_size;
    ui
}

/// Initial selection from a configured section path
fn start_navigation(section: &str) -> NavigationState {
    if section.trim().is_empty() {
        return NavigationState::new();
    }
    match NavigationState::from_section(section) {
        Some(state) => {
            debug!(section, "Opening start section");
            state
        }
        None => {
            warn!("Unknown section '{}', starting at the welcome page", section);
            NavigationState::new()
        }
    }
}

impl eframe::App for GuideApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.poll_watcher();
        self.apply_theme(ctx);

        self.ui.clear_expired_messages(style::MESSAGE_TIMEOUT_SECS);
        if self.ui.error_message.is_some() || self.ui.info_message.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_secs(1));
        }

        // Deferred so the sidebar can borrow self immutably
        let next_navigation = RefCell::new(None);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(self.ui.sidebar_width)
            .width_range(style::SIDEBAR_MIN..=style::SIDEBAR_MAX)
            .show(ctx, |ui| {
                self.render_sidebar(ui, &next_navigation);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_content(ui);
        });

        if let Some(next) = next_navigation.into_inner() {
            if next != self.navigation {
                debug!(section = ?next.section(), "navigate");
            }
            self.navigation = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Category, SubPage};
    use std::fs;
    use std::path::Path;

    fn test_app(config_path: &Path) -> GuideApp {
        let config = Config::default();
        GuideApp {
            navigation: NavigationState::new(),
            ui: ui_state(&config),
            library: ContentLibrary::new(None),
            watcher: None,
            assets_root: PathBuf::from("."),
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            missing_images: RefCell::new(HashSet::new()),
            config_path: Some(config_path.to_path_buf()),
        }
    }

    #[test]
    fn test_toggle_theme_keeps_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[theme]\nmode = \"dark\"\n\n[content]\ndir = \"/srv/guide\"\n\n[ui]\nstart_section = \"about\"\n",
        )
        .unwrap();

        let mut app = test_app(&path);
        app.toggle_theme();

        let stored = Config::load_from(&path).unwrap();
        assert_eq!(stored.theme.mode, "light");
        assert_eq!(stored.content.dir, "/srv/guide");
        assert_eq!(stored.ui.start_section, "about");
        assert!(app.ui.error_message.is_none());
    }

    #[test]
    fn test_toggle_theme_leaves_broken_config_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let broken = "[content]\ndir = \"/srv/guide\"\n\n[ui]\nstart_section = \"about\"\n\n[layout\n";
        fs::write(&path, broken).unwrap();

        let mut app = test_app(&path);
        app.toggle_theme();

        assert_eq!(fs::read_to_string(&path).unwrap(), broken);
        assert_eq!(app.ui.theme, Theme::Light);
        assert!(app.ui.error_message.is_some());
    }

    #[test]
    fn test_toggle_theme_creates_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide").join("config.toml");

        let mut app = test_app(&path);
        app.toggle_theme();

        assert_eq!(Config::load_from(&path).unwrap().theme.mode, "light");
    }

    #[test]
    fn test_ui_state_clamps_sizes() {
        let mut config = Config::default();
        config.layout.image_width = 0.0;
        config.layout.sidebar_width = 5000.0;
        config.layout.content_max_width = -10.0;

        let ui = ui_state(&config);
        assert_eq!(ui.image_width, style::IMAGE_MIN);
        assert_eq!(ui.sidebar_width, style::SIDEBAR_MAX);
        assert_eq!(ui.content_max_width, style::CONTENT_MIN);

        assert_eq!(ui_state(&Config::default()).image_width, 700.0);
    }

    #[test]
    fn test_start_navigation() {
        assert_eq!(start_navigation(""), NavigationState::new());
        assert_eq!(start_navigation("nowhere/else"), NavigationState::new());
        assert_eq!(
            start_navigation("about/app-info"),
            NavigationState::new().select_about(SubPage::AppInfo)
        );
        assert_eq!(
            start_navigation("user-manual").category,
            Some(Category::UserManual)
        );
    }
}
