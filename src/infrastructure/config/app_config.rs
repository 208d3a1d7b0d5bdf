//! Application configuration.

use crate::application::services::{CarouselConfig, ScrollSpyConfig};
use crate::domain::entities::TextSize;
use crate::domain::keybinding::Action;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

pub(super) const APP_NAME: &str = "clinic-kiosk";
pub(super) const APP_QUALIFIER: &str = "com";
pub(super) const APP_ORGANIZATION: &str = "gabrielfamilyclinic";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Enable mouse support (carousel hover, clicks).
    #[serde(default = "default_true")]
    pub mouse: bool,

    /// JSON file replacing the bundled page content.
    #[serde(default)]
    pub content: Option<PathBuf>,

    /// Custom keybindings.
    #[serde(default)]
    pub keybindings: HashMap<String, Action>,

    /// Testimonial carousel behaviour.
    #[serde(default)]
    pub carousel: CarouselConfig,

    /// Section tracking.
    #[serde(default)]
    pub scroll_spy: ScrollSpyConfig,

    /// Accessibility options.
    #[serde(default)]
    pub accessibility: AccessibilityConfig,

    /// Interaction tracking.
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Accessibility configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessibilityConfig {
    /// Text size used until the reader picks one.
    #[serde(default)]
    pub default_text_size: TextSize,

    /// Disable transitions.
    #[serde(default)]
    pub reduce_motion: bool,

    /// Milliseconds before an announcement clears. Zero keeps it.
    #[serde(default = "default_announcement_clear_ms")]
    pub announcement_clear_ms: u64,
}

impl AccessibilityConfig {
    #[must_use]
    pub const fn announcement_clear_delay(&self) -> Option<Duration> {
        if self.announcement_clear_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.announcement_clear_ms))
        }
    }
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            default_text_size: TextSize::default(),
            reduce_motion: false,
            announcement_clear_ms: default_announcement_clear_ms(),
        }
    }
}

/// Where tracked interactions go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsSink {
    /// Emit as tracing events into the log file.
    #[default]
    Log,
    /// Append JSON lines to `analytics.path`.
    File,
}

/// Analytics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Track interactions at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub sink: AnalyticsSink,

    /// Output file for the `file` sink. Defaults to the data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sink: AnalyticsSink::default(),
            path: None,
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,

    /// Maximum contrast palette.
    #[serde(default)]
    pub high_contrast: bool,
}

fn default_accent_color() -> String {
    "#1E6FD9".to_string()
}

const fn default_announcement_clear_ms() -> u64 {
    3000
}

fn default_true() -> bool {
    true
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
            high_contrast: false,
        }
    }
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(mouse) = args.mouse {
            self.mouse = mouse;
        }
        if let Some(content) = args.content {
            self.content = Some(content);
        }
        if let Some(text_size) = args.text_size {
            self.accessibility.default_text_size = text_size;
        }
        if let Some(reduce_motion) = args.reduce_motion {
            self.accessibility.reduce_motion = reduce_motion;
        }
        if let Some(auto_play) = args.auto_play {
            self.carousel.enable_auto_play = auto_play;
        }
        if let Some(analytics_path) = args.analytics_path {
            self.analytics.sink = AnalyticsSink::File;
            self.analytics.path = Some(analytics_path);
        }
        if let Some(accent_color) = args.accent_color {
            self.theme.accent_color = accent_color;
        }
        if let Some(high_contrast) = args.high_contrast {
            self.theme.high_contrast = high_contrast;
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("clinic-kiosk.log"))
    }

    /// Returns default analytics file path.
    #[must_use]
    pub fn default_analytics_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("analytics.jsonl"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns effective analytics file path.
    #[must_use]
    pub fn effective_analytics_path(&self) -> Option<PathBuf> {
        self.analytics
            .path
            .clone()
            .or_else(Self::default_analytics_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            mouse: true,
            content: None,
            keybindings: HashMap::new(),
            carousel: CarouselConfig::default(),
            scroll_spy: ScrollSpyConfig::default(),
            accessibility: AccessibilityConfig::default(),
            analytics: AnalyticsConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::ActiveSectionPolicy;
    use clap::Parser;

    #[test]
    fn test_parse_config_sections() {
        let toml_content = r#"
            content = "/srv/kiosk/content.json"

            [carousel]
            auto_play_interval_ms = 6000
            loop = false

            [scroll_spy]
            policy = "nearest-top"

            [accessibility]
            default_text_size = "large"
            reduce_motion = true

            [analytics]
            sink = "file"

            [keybindings]
            "Ctrl+q" = "Quit"
            "p" = "TogglePlay"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.content, Some(PathBuf::from("/srv/kiosk/content.json")));
        assert_eq!(config.carousel.auto_play_interval_ms, 6000);
        assert!(!config.carousel.looping);
        assert!(config.carousel.pause_on_hover);
        assert_eq!(config.scroll_spy.policy, ActiveSectionPolicy::NearestTop);
        assert_eq!(config.accessibility.default_text_size, TextSize::Large);
        assert!(config.accessibility.reduce_motion);
        assert_eq!(config.accessibility.announcement_clear_ms, 3000);
        assert_eq!(config.analytics.sink, AnalyticsSink::File);
        assert!(config.analytics.enabled);
        assert_eq!(config.keybindings.get("p"), Some(&Action::TogglePlay));
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(config.mouse);
        assert!(config.keybindings.is_empty());
        assert!(config.carousel.enable_auto_play);
        assert_eq!(config.carousel.auto_play_interval_ms, 8000);
        assert_eq!(
            config.accessibility.announcement_clear_delay(),
            Some(Duration::from_secs(3))
        );
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut config: AppConfig =
            toml::from_str("[accessibility]\ndefault_text_size = \"large\"").unwrap();
        let args = CliArgs::parse_from([
            "clinic-kiosk",
            "--text-size",
            "extra-large",
            "--auto-play",
            "false",
            "--analytics-path",
            "/tmp/events.jsonl",
        ]);

        config.merge_with_args(args);

        assert_eq!(config.accessibility.default_text_size, TextSize::ExtraLarge);
        assert!(!config.carousel.enable_auto_play);
        assert_eq!(config.analytics.sink, AnalyticsSink::File);
        assert_eq!(
            config.effective_analytics_path(),
            Some(PathBuf::from("/tmp/events.jsonl"))
        );
        // Untouched values keep the file setting.
        assert!(config.mouse);
    }

    #[test]
    fn test_zero_clear_delay_keeps_announcements() {
        let config: AppConfig =
            toml::from_str("[accessibility]\nannouncement_clear_ms = 0").unwrap();
        assert_eq!(config.accessibility.announcement_clear_delay(), None);
    }
}
