// Keyboard shortcuts

use crate::app::GuideApp;
use crate::state::NavigationState;
use eframe::egui;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    ToggleTheme,
    ReloadContent,
    Home,
    Quit,
}

/// Map a key press to a shortcut. `text_focus` is set while a text field has
/// keyboard focus, where plain keys belong to the field.
pub fn shortcut_for(
    key: egui::Key,
    modifiers: egui::Modifiers,
    text_focus: bool,
) -> Option<Shortcut> {
    match key {
        egui::Key::T if modifiers.command => Some(Shortcut::ToggleTheme),
        egui::Key::Q if modifiers.command => Some(Shortcut::Quit),
        egui::Key::F5 => Some(Shortcut::ReloadContent),
        egui::Key::Home if !text_focus && !modifiers.any() => Some(Shortcut::Home),
        _ => None,
    }
}

impl GuideApp {
    pub fn handle_input(&mut self, ctx: &egui::Context) {
        let text_focus = ctx.wants_keyboard_input();
        let shortcuts: Vec<Shortcut> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        modifiers,
                        ..
                    } => shortcut_for(*key, *modifiers, text_focus),
                    _ => None,
                })
                .collect()
        });

        for shortcut in shortcuts {
            debug!(?shortcut, "shortcut");
            match shortcut {
                Shortcut::ToggleTheme => self.toggle_theme(),
                Shortcut::ReloadContent => self.reload_content(),
                Shortcut::Home => self.navigation = NavigationState::new(),
                Shortcut::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_shortcuts() {
        let command = egui::Modifiers::COMMAND;
        assert_eq!(shortcut_for(egui::Key::T, command, false), Some(Shortcut::ToggleTheme));
        assert_eq!(shortcut_for(egui::Key::Q, command, true), Some(Shortcut::Quit));
        assert_eq!(shortcut_for(egui::Key::T, egui::Modifiers::NONE, false), None);
    }

    #[test]
    fn test_home_only_without_text_focus() {
        assert_eq!(
            shortcut_for(egui::Key::Home, egui::Modifiers::NONE, false),
            Some(Shortcut::Home)
        );
        assert_eq!(shortcut_for(egui::Key::Home, egui::Modifiers::NONE, true), None);
        assert_eq!(shortcut_for(egui::Key::Home, egui::Modifiers::SHIFT, false), None);
    }

    #[test]
    fn test_reload() {
        assert_eq!(
            shortcut_for(egui::Key::F5, egui::Modifiers::NONE, false),
            Some(Shortcut::ReloadContent)
        );
    }
}
