use eframe::egui;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Parse the config value; anything but "light" is dark
    pub fn from_config(mode: &str) -> Self {
        if mode.trim().eq_ignore_ascii_case("light") {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn config_value(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn visuals(&self) -> egui::Visuals {
        match self {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        }
    }

    /// syntect theme for code blocks
    pub fn syntax_theme(&self) -> &'static str {
        match self {
            Theme::Light => "base16-ocean.light",
            Theme::Dark => "base16-ocean.dark",
        }
    }

    pub fn code_background(&self) -> egui::Color32 {
        match self {
            Theme::Light => egui::Color32::from_gray(235),
            Theme::Dark => egui::Color32::from_gray(40),
        }
    }

    pub fn info_fill(&self) -> egui::Color32 {
        match self {
            Theme::Light => egui::Color32::from_rgb(222, 235, 250),
            Theme::Dark => egui::Color32::from_rgb(23, 45, 70),
        }
    }

    pub fn info_text(&self) -> egui::Color32 {
        match self {
            Theme::Light => egui::Color32::from_rgb(20, 70, 130),
            Theme::Dark => egui::Color32::from_rgb(150, 200, 255),
        }
    }
}

// --- Sizing ---
pub const SIDEBAR_MIN: f32 = 200.0;
pub const SIDEBAR_MAX: f32 = 420.0;
pub const CONTENT_MIN: f32 = 320.0;
pub const CONTENT_PADDING: f32 = 16.0;
pub const IMAGE_MIN: f32 = 120.0;
pub const TABLE_ROW_HEIGHT: f32 = 22.0;

// --- Headings ---
pub const TITLE_SIZE: f32 = 30.0;

pub fn heading_size(level: u8) -> f32 {
    match level {
        1 => 26.0,
        2 => 22.0,
        3 => 18.0,
        4 => 16.0,
        _ => 14.0,
    }
}

// --- Timing ---
pub const MESSAGE_TIMEOUT_SECS: u64 = 5;

// --- Helper functions ---

/// Render a label that truncates overflowing text with an ellipsis.
pub fn truncated_label(
    ui: &mut egui::Ui,
    text: impl Into<egui::WidgetText>,
) -> egui::Response {
    ui.add(egui::Label::new(text).truncate())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_config() {
        assert_eq!(Theme::from_config("light"), Theme::Light);
        assert_eq!(Theme::from_config(" Light "), Theme::Light);
        assert_eq!(Theme::from_config("dark"), Theme::Dark);
        assert_eq!(Theme::from_config("solarized"), Theme::Dark);
        assert_eq!(Theme::Dark.toggle().config_value(), "light");
    }

    #[test]
    fn test_heading_sizes_shrink_with_level() {
        assert!(heading_size(1) > heading_size(2));
        assert!(heading_size(3) > heading_size(6));
    }
}
