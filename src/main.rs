use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use gallows::config::AppConfig;
use gallows::core::jokes::{JokeGenerator, JokeRequest, ModelAttempt, OutputType, TransitionType};
use gallows::core::logging::{self, print_error, print_success, print_warning, RichText};
use gallows::core::styles::{StyleWeights, StyleWheel};
use gallows::export::{export_jokes, ExportFormat};

#[derive(Parser)]
#[command(name = "gallows")]
#[command(about = "Dark comedy joke generator", long_about = None)]
#[command(version = gallows::VERSION)]
struct Cli {
    /// Config file (defaults to ~/.config/gallows/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Style file (JSON or YAML) replacing the bundled styles
    #[arg(long = "styles", global = true)]
    style_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate jokes about a topic
    Generate {
        /// What the jokes are about
        topic: String,

        /// Style weight as KEY=WEIGHT (repeatable)
        #[arg(long, value_parser = parse_style_weight)]
        style: Vec<(String, f32)>,

        /// Style wheel position as BEARING:DISTANCE (degrees, 0-1)
        #[arg(long, value_parser = parse_wheel, conflicts_with = "style")]
        wheel: Option<(f32, f32)>,

        /// Routines, One-liners, Punchlines or Random Jokes
        #[arg(long, default_value = "Random Jokes")]
        output_type: String,

        /// Transition style for routines
        #[arg(long, default_value = "Thematic")]
        transition: String,

        /// Creativity, 0 to 1
        #[arg(long, default_value_t = 0.7)]
        madness: f32,

        /// Darkness, 0 to 10
        #[arg(long, default_value_t = 5)]
        darkness: u8,

        /// Number of jokes
        #[arg(short = 'n', long, default_value_t = 5)]
        num_jokes: usize,

        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Also save the jokes as txt or pdf
        #[arg(long)]
        export: Option<String>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available styles
    Styles,

    /// Run the REST API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
}

fn parse_style_weight(s: &str) -> Result<(String, f32), String> {
    let (key, weight) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=WEIGHT, got '{s}'"))?;
    let weight: f32 = weight
        .trim()
        .parse()
        .map_err(|_| format!("invalid weight '{weight}'"))?;
    Ok((key.trim().to_string(), weight))
}

fn parse_wheel(s: &str) -> Result<(f32, f32), String> {
    let (bearing, distance) = s
        .split_once(':')
        .ok_or_else(|| format!("expected BEARING:DISTANCE, got '{s}'"))?;
    let bearing = bearing
        .trim()
        .parse()
        .map_err(|_| format!("invalid bearing '{bearing}'"))?;
    let distance = distance
        .trim()
        .parse()
        .map_err(|_| format!("invalid distance '{distance}'"))?;
    Ok((bearing, distance))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = AppConfig::load_from(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            config.apply_env_overrides();
            config
        }
        None => AppConfig::load(),
    };
    if let Some(path) = cli.style_file {
        config.styles.path = Some(path);
    }

    let _log_guard = logging::init(&config.logging);
    log::debug!("{} v{} starting", gallows::NAME, gallows::VERSION);

    let generator = Arc::new(JokeGenerator::from_config(&config));
    if generator.styles().is_empty() {
        print_warning("No styles loaded; jokes will use generic templates");
    }

    match cli.command {
        Commands::Generate {
            topic,
            style,
            wheel,
            output_type,
            transition,
            madness,
            darkness,
            num_jokes,
            seed,
            export,
            json,
        } => {
            let generator = match seed {
                Some(seed) => Arc::new(JokeGenerator::from_config(&config).with_seed(seed)),
                None => generator,
            };

            let weights: Option<StyleWeights> = if let Some((bearing, distance)) = wheel {
                Some(StyleWheel::from_store(generator.styles()).weights_polar(bearing, distance))
            } else if !style.is_empty() {
                Some(style.into_iter().collect())
            } else {
                None
            };

            let mut request = JokeRequest::new(topic)
                .with_output_type(OutputType::from_str(&output_type))
                .with_transition(TransitionType::from_str(&transition))
                .with_madness(madness)
                .with_darkness(darkness)
                .with_num_jokes(num_jokes);
            if let Some(weights) = weights {
                request = request.with_weights(weights);
            }

            let result = match generator.generate_jokes(&request).await {
                Ok(result) => result,
                Err(e) => {
                    print_error(&e.to_string());
                    std::process::exit(2);
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                eprintln!(
                    "{}",
                    RichText::new()
                        .muted("Style: ")
                        .accent(&result.style_description)
                );
                for (i, joke) in result.jokes.iter().enumerate() {
                    println!(
                        "{}",
                        RichText::new().accent(&format!("{:>2}. ", i + 1)).text(joke)
                    );
                }
                match &result.report.model {
                    ModelAttempt::Completed { provider, extracted, .. } => log::info!(
                        "{} usable jokes from {}",
                        extracted,
                        provider
                    ),
                    ModelAttempt::Unavailable { reason } | ModelAttempt::Failed { reason } => {
                        log::info!("Model not used: {}", reason)
                    }
                }
            }

            if let Some(format) = export {
                let format: ExportFormat = format.parse()?;
                let path = export_jokes(&result.jokes, format, &config.export.dir)?;
                print_success(&format!("Saved to {}", path.display()));
            }
        }

        Commands::Styles => {
            for style in generator.styles().iter() {
                let mut line = RichText::new().accent(&style.key).text("  ").bold(&style.display_name);
                if style.is_default {
                    line = line.muted(" (centre)");
                } else if let Some(angle) = style.angle {
                    line = line.muted(&format!(" ({angle:.0}°)"));
                }
                println!("{line}");
                if !style.description.is_empty() {
                    println!("    {}", style.description);
                }
            }
        }

        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if config.server.port == 0 {
                bail!("port must be non-zero");
            }
            gallows::server::serve(generator, &config.server).await?;
        }
    }

    Ok(())
}
