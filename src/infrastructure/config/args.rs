use super::app_config::LogLevel;
use crate::domain::entities::TextSize;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "clinic-kiosk",
    version,
    about = "Gabriel Family Clinic waiting-room kiosk for the terminal",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable mouse support.
    #[arg(long)]
    pub mouse: Option<bool>,

    /// JSON content file replacing the bundled content.
    #[arg(long, value_name = "PATH")]
    pub content: Option<PathBuf>,

    /// Initial text size (normal, large, extra-large).
    #[arg(long, value_name = "SIZE")]
    pub text_size: Option<TextSize>,

    /// Disable transitions.
    #[arg(long)]
    pub reduce_motion: Option<bool>,

    /// Advance testimonials automatically.
    #[arg(long)]
    pub auto_play: Option<bool>,

    /// Append analytics events as JSON lines to this file.
    #[arg(long, value_name = "PATH")]
    pub analytics_path: Option<PathBuf>,

    /// Accent color (name or hex code).
    #[arg(long)]
    pub accent_color: Option<String>,

    /// Use the high contrast palette.
    #[arg(long)]
    pub high_contrast: Option<bool>,
}
