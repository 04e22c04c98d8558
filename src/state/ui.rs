// UI state - presentation settings and status messages
use crate::style::Theme;
use std::time::Instant;

pub struct UIState {
    pub theme: Theme,
    pub sidebar_width: f32,
    pub content_max_width: f32,
    pub image_width: f32,
    pub font_size: f32,
    pub code_font_size: f32,
    pub error_message: Option<(String, Instant)>,
    pub info_message: Option<(String, Instant)>,
    /// Theme last pushed to the egui context
    pub applied_theme: Option<Theme>,
}

impl UIState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            sidebar_width: 280.0,
            content_max_width: 740.0,
            image_width: 700.0,
            font_size: 14.0,
            code_font_size: 12.0,
            error_message: None,
            info_message: None,
            applied_theme: None,
        }
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some((message, Instant::now()));
    }

    pub fn set_info(&mut self, message: String) {
        self.info_message = Some((message, Instant::now()));
    }

    pub fn clear_expired_messages(&mut self, timeout_secs: u64) {
        if let Some((_, time)) = &self.error_message {
            if time.elapsed().as_secs() >= timeout_secs {
                self.error_message = None;
            }
        }
        if let Some((_, time)) = &self.info_message {
            if time.elapsed().as_secs() >= timeout_secs {
                self.info_message = None;
            }
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_messages_expire() {
        let mut ui = UIState::new(Theme::Dark);
        ui.set_info("Content reloaded".to_string());
        ui.set_error("Failed".to_string());

        ui.clear_expired_messages(60);
        assert!(ui.info_message.is_some());

        let past = Instant::now() - Duration::from_secs(10);
        ui.info_message = Some(("old".to_string(), past));
        ui.clear_expired_messages(5);
        assert!(ui.info_message.is_none());
        assert!(ui.error_message.is_some());
    }

    #[test]
    fn test_toggle_theme() {
        let mut ui = UIState::new(Theme::Dark);
        ui.toggle_theme();
        assert_eq!(ui.theme, Theme::Light);
    }
}
