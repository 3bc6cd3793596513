use std::io::Write;

use clap::Parser;
use log::LevelFilter;

use glyphview::cli::Args;
use glyphview::config::Config;
use glyphview::provider::{self, ProviderError, ThumbnailProvider};
use glyphview::render::{self, geometry, RenderOptions};
use glyphview::sources;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if let Err(err) = run(&args) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

/// Map -v/-q counts onto a log level, starting from warnings.
fn init_logging(verbose: u8, quiet: u8) {
    let level = match 1i16 + verbose as i16 - quiet as i16 {
        i16::MIN..=0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(args.config.as_deref())?;

    let expanded = sources::expand(&args.sources);
    if expanded.is_empty() {
        log::warn!("no sources to display");
        return Ok(());
    }

    let (width_override, height_override) = args.size_overrides(&config);
    let (columns, rows) = geometry::terminal_grid(width_override, height_override);
    let options = RenderOptions {
        color: args.color_enabled(&config),
        contrast: args.contrast_strength(&config),
        ..Default::default()
    };
    let (thumb_width, thumb_height) = geometry::plan_thumbnail(columns, rows, options.aspect);
    log::info!(
        "rendering {} source(s) at {columns}x{rows} cells ({thumb_width}x{thumb_height} px thumbnails)",
        expanded.len()
    );

    let mut stdout = std::io::stdout().lock();
    for source in &expanded {
        writeln!(stdout, "{source}")?;
        match render_source(source, thumb_width, thumb_height, &options) {
            Ok(lines) => {
                for line in lines {
                    writeln!(stdout, "{line}")?;
                }
            }
            // A bad source never aborts the batch
            Err(err) => log::warn!("skipping {source}: {err}"),
        }
    }
    Ok(())
}

fn render_source(
    source: &str,
    thumb_width: u32,
    thumb_height: u32,
    options: &RenderOptions,
) -> Result<Vec<String>, ProviderError> {
    let provider = provider::for_source(source)?;
    let raster = provider.thumbnail(thumb_width, thumb_height)?;
    Ok(render::render(&raster, options))
}
