// Command line options

use crate::config::Config;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ThemeArg {
    Dark,
    Light,
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Attendance System with Auto Report: installation guide and user manual"
)]
pub struct Args {
    /// Section to open at startup, e.g. "user-manual/for-students"
    #[arg(long = "open", value_name = "SECTION")]
    pub open: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory of Markdown pages that replace the built-in ones
    #[arg(long = "content-dir", value_name = "DIR")]
    pub content_dir: Option<PathBuf>,

    /// Directory that relative image paths are resolved against
    #[arg(long = "assets", value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Color theme
    #[arg(long = "theme", value_enum)]
    pub theme: Option<ThemeArg>,

    /// Enable debug logging
    #[arg(long = "debug", action)]
    pub debug: bool,

    /// Write a default config file (if none exists) and exit
    #[arg(long = "write-default-config", action)]
    pub write_default_config: bool,
}

impl Args {
    /// Config file location: `--config` or the platform default
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Config::config_path)
    }

    /// Overlay command line values on the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(section) = &self.open {
            config.ui.start_section = section.clone();
        }
        if let Some(dir) = &self.content_dir {
            config.content.dir = dir.to_string_lossy().to_string();
        }
        if let Some(dir) = &self.assets {
            config.content.assets_dir = dir.to_string_lossy().to_string();
        }
        if let Some(theme) = self.theme {
            config.theme.mode = match theme {
                ThemeArg::Dark => "dark",
                ThemeArg::Light => "light",
            }
            .to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "attendance-guide",
            "--open",
            "about/contact",
            "--content-dir",
            "/srv/pages",
            "--theme",
            "light",
        ])
        .unwrap();

        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.ui.start_section, "about/contact");
        assert_eq!(config.content.dir, "/srv/pages");
        assert_eq!(config.theme.mode, "light");
        assert!(config.content.assets_dir.is_empty());
    }

    #[test]
    fn test_no_flags_keep_config() {
        let args = Args::try_parse_from(["attendance-guide"]).unwrap();
        let mut config = Config::default();
        config.ui.start_section = "user-manual".to_string();
        args.apply(&mut config);
        assert_eq!(config.ui.start_section, "user-manual");
        assert_eq!(config.theme.mode, "dark");
        assert!(!args.debug);
    }

    #[test]
    fn test_rejects_unknown_theme() {
        assert!(Args::try_parse_from(["attendance-guide", "--theme", "sepia"]).is_err());
    }
}
