use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sketchify::io::{DEFAULT_OUTPUT, load_image, save_image};
use sketchify::{Effect, EffectConfig, EffectKind};

#[derive(Parser)]
#[command(name = "sketchify")]
#[command(about = "Apply sketch, edge, threshold and other filters to images")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply one effect to an image and save the result
    Apply {
        /// Path to input image file
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,

        /// Effect to apply (see `sketchify list`)
        #[arg(short, long, default_value = "sketch")]
        effect: EffectKind,

        /// Cutoff for the threshold effect (0-255)
        #[arg(long, allow_negative_numbers = true)]
        cutoff: Option<i32>,

        /// Number of levels for the posterize effect
        #[arg(long, allow_negative_numbers = true)]
        levels: Option<i32>,

        /// Where to write the result (format from extension)
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// TOML file overriding effect constants
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Save every intermediate step to directory (must be empty)
        #[arg(long, value_name = "DIR")]
        debug_out: Option<PathBuf>,
    },

    /// List available effects
    List,

    /// Open the graphical editor
    #[cfg(feature = "gui")]
    Gui {
        /// TOML file overriding effect constants
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EffectConfig> {
    match path {
        Some(path) => EffectConfig::load(path),
        None => Ok(EffectConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Apply {
            image_path,
            effect,
            cutoff,
            levels,
            output,
            config,
            debug_out,
        } => {
            let mut config = load_config(config.as_ref())?;
            if let Some(cutoff) = cutoff {
                config = config.with_threshold_cutoff(cutoff);
            }
            if let Some(levels) = levels {
                config = config.with_posterize_levels(levels);
            }

            let img = load_image(&image_path)?;
            let effect = Effect::from_kind(effect, &config);
            info!(%effect, "Applying effect");

            let mut pipeline = effect.pipeline()?;
            if let Some(debug_dir) = debug_out {
                pipeline = pipeline.with_debug(debug_dir)?;
            }
            let result = pipeline.run(img)?;

            if let Some(count) = result.get_int("contour_count") {
                info!(count, "Contours drawn");
            }
            if let Some(fraction) = result.get_float("edge_fraction") {
                info!("Edge pixels: {:.1}%", fraction * 100.0);
            }

            save_image(&result.image, &output)?;
            println!(
                "{} -> {} ({}x{}, {} channel(s))",
                effect,
                output.display(),
                result.image.width(),
                result.image.height(),
                result.image.color().channel_count()
            );
        }
        Command::List => {
            for kind in EffectKind::ALL {
                match kind.parameter() {
                    Some(param) => println!("{:<18} {} [--{}]", kind.name(), kind.label(), param),
                    None => println!("{:<18} {}", kind.name(), kind.label()),
                }
            }
        }
        #[cfg(feature = "gui")]
        Command::Gui { config } => {
            let config = load_config(config.as_ref())?;
            config.validate()?;
            sketchify::gui::run(config)?;
        }
    }

    Ok(())
}
