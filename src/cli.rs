//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::Config;

/// View images in the terminal as half-block color or braille glyph art
#[derive(Parser, Debug)]
#[command(name = "glyphview")]
#[command(version, about = "Render images as terminal glyph art", long_about = None)]
pub struct Args {
    /// Image files, directories, or glob patterns to view. Prefix an
    /// entry with '-' to remove its matches from the list. Sources are
    /// rendered in sorted order.
    #[arg(value_name = "SOURCE", allow_hyphen_values = true)]
    pub sources: Vec<String>,

    /// Output width in columns (defaults to the terminal width)
    #[arg(short = 'w', long)]
    pub width: Option<u32>,

    /// Output height in rows (defaults to the terminal height)
    #[arg(long)]
    pub height: Option<u32>,

    /// Render with 24-bit color escape codes (default)
    #[arg(short = 'c', long)]
    pub color: bool,

    /// Render monochrome braille dots instead of color blocks
    #[arg(short = 'n', long = "no-color", conflicts_with = "color")]
    pub no_color: bool,

    /// Contrast boost strength: 0 is no change, 1 is full autocontrast
    #[arg(long)]
    pub contrast: Option<f32>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity
    #[arg(short = 'q', long, action = ArgAction::Count)]
    pub quiet: u8,
}

impl Args {
    /// Whether color output is enabled, merging flags over the config.
    pub fn color_enabled(&self, config: &Config) -> bool {
        if self.no_color {
            false
        } else if self.color {
            true
        } else {
            config.render.color
        }
    }

    /// Effective contrast strength, flags over config.
    pub fn contrast_strength(&self, config: &Config) -> f32 {
        self.contrast.unwrap_or(config.render.contrast)
    }

    /// Effective output size overrides, flags over config.
    pub fn size_overrides(&self, config: &Config) -> (Option<u32>, Option<u32>) {
        (
            self.width.or(config.render.width),
            self.height.or(config.render.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["glyphview"]);
        assert!(args.sources.is_empty());
        assert!(args.width.is_none());
        assert!(args.height.is_none());
        assert!(!args.color);
        assert!(!args.no_color);
        assert!(args.contrast.is_none());
        assert!(args.config.is_none());
        assert_eq!(args.verbose, 0);
        assert_eq!(args.quiet, 0);
    }

    #[test]
    fn test_args_sources_including_exclusions() {
        let args = Args::parse_from(["glyphview", "a.png", "shots/", "-shots/old.png"]);
        assert_eq!(args.sources, vec!["a.png", "shots/", "-shots/old.png"]);
    }

    #[test]
    fn test_args_size_flags() {
        let args = Args::parse_from(["glyphview", "-w", "100", "--height", "30"]);
        assert_eq!(args.width, Some(100));
        assert_eq!(args.height, Some(30));
    }

    #[test]
    fn test_args_verbosity_counts() {
        let args = Args::parse_from(["glyphview", "-vv", "-q"]);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.quiet, 1);
    }

    #[test]
    fn test_color_merging() {
        let config = Config::default();
        assert!(Args::parse_from(["glyphview"]).color_enabled(&config));
        assert!(!Args::parse_from(["glyphview", "--no-color"]).color_enabled(&config));

        let mono_config = Config {
            render: RenderConfig {
                color: false,
                ..Default::default()
            },
        };
        assert!(!Args::parse_from(["glyphview"]).color_enabled(&mono_config));
        assert!(Args::parse_from(["glyphview", "--color"]).color_enabled(&mono_config));
    }

    #[test]
    fn test_contrast_merging() {
        let config = Config::default();
        assert_eq!(
            Args::parse_from(["glyphview"]).contrast_strength(&config),
            0.25
        );
        assert_eq!(
            Args::parse_from(["glyphview", "--contrast", "0.8"]).contrast_strength(&config),
            0.8
        );
    }

    #[test]
    fn test_size_merging() {
        let config = Config {
            render: RenderConfig {
                width: Some(64),
                ..Default::default()
            },
        };
        let args = Args::parse_from(["glyphview", "--height", "20"]);
        assert_eq!(args.size_overrides(&config), (Some(64), Some(20)));
    }
}
