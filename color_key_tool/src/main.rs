use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use color_key::core_modules::utils::image_helper::image_helper;
use color_key::gallery::load_gallery;
use color_key::{
    FileStore, FilterSession, RingConfig, SessionConfig, SessionEvent, generate_rings, parse,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Palette color keying, ring templates and the tool gallery.
#[derive(Parser)]
#[command(name = "color_key_tool")]
#[command(version)]
struct Args {
    /// Session store (selected and custom colors)
    #[arg(long, env = "COLOR_KEY_STORE", default_value = "color_key_store.json", global = true)]
    store: PathBuf,

    /// Session configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Session(SessionCommand),
    /// Draw a square of concentric rings
    Rings {
        #[arg(long, default_value_t = 400)]
        size: u32,
        /// Ring color as r,g,b,a
        #[arg(long, default_value = "0,0,0,255", value_parser = parse_rgba)]
        colored: [u8; 4],
        /// Gap color as r,g,b,a
        #[arg(long, default_value = "0,0,0,0", value_parser = parse_rgba)]
        transparent: [u8; 4],
        #[arg(short, long, default_value = "rings.png")]
        output: PathBuf,
    },
    /// Print the cards of a tool gallery directory
    Gallery { root: PathBuf },
}

/// Commands that work on the stored selection and custom colors.
#[derive(Subcommand)]
enum SessionCommand {
    /// Make every non-selected color in an image transparent
    Filter {
        input: PathBuf,
        /// Output file; defaults to <name>_filtered.png next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the result as a PNG data URI instead of writing a file
        #[arg(long)]
        data_uri: bool,
    },
    /// Toggle swatches on or off
    Toggle {
        /// Colors in any accepted notation (hex or r,g,b)
        #[arg(required = true)]
        colors: Vec<String>,
    },
    /// Add a custom color and select it
    Add { color: String },
    /// Remove a custom color
    Remove { color: String },
    /// List swatches and their state
    List {
        /// Print swatches as JSON
        #[arg(long)]
        json: bool,
    },
}

fn setup_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn parse_rgba(text: &str) -> Result<[u8; 4], String> {
    let channels = text
        .split(',')
        .map(|part| part.trim().parse::<u8>().map_err(|err| format!("{part:?}: {err}")))
        .collect::<Result<Vec<u8>, String>>()?;
    channels
        .try_into()
        .map_err(|channels: Vec<u8>| format!("expected 4 channels, got {}", channels.len()))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    setup_logging(&args.log_level, args.json_logs);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Command::Rings {
            size,
            colored,
            transparent,
            output,
        } => {
            let rings = generate_rings(&RingConfig {
                size,
                colored,
                transparent,
            })?;
            image_helper::save(&output, &rings.buffer)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("{} pixels", rings.colored_pixels);
            info!(path = %output.display(), "rings saved");
            Ok(())
        }
        Command::Gallery { root } => {
            for card in load_gallery(&root).await? {
                let image = card
                    .image
                    .as_deref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{}\t{}\t{}\t{}", card.title, card.link, image, card.description);
            }
            Ok(())
        }
        Command::Session(command) => {
            let config = match &args.config {
                Some(path) => SessionConfig::load(path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => SessionConfig::default(),
            };
            let store = FileStore::open(&args.store)
                .with_context(|| format!("opening store {}", args.store.display()))?;
            let session = FilterSession::open(store, config)?;
            run_session(session, command)
        }
    }
}

fn run_session(mut session: FilterSession<FileStore>, command: SessionCommand) -> anyhow::Result<()> {
    match command {
        SessionCommand::Filter {
            input,
            output,
            data_uri,
        } => {
            let buffer = image_helper::load(&input)
                .with_context(|| format!("reading image {}", input.display()))?;
            let name = input
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("image")
                .to_string();
            session.dispatch(SessionEvent::Upload { name, buffer })?;
            session.dispatch(SessionEvent::ApplyFilter)?;

            if data_uri {
                println!("{}", session.export_data_uri()?);
                return Ok(());
            }
            let (file_name, png) = session.export_png()?;
            let output = output.unwrap_or_else(|| sibling(&input, &file_name));
            std::fs::write(&output, png).with_context(|| format!("writing {}", output.display()))?;
            info!(path = %output.display(), "filtered image saved");
        }
        SessionCommand::Toggle { colors } => {
            for color in colors {
                let key = parse(&color)
                    .with_context(|| format!("invalid color {color:?}"))?
                    .rgb_key();
                session.dispatch(SessionEvent::Toggle(key))?;
                let state = if session.state().active.contains(&key) { "on" } else { "off" };
                println!("{} {state}", key.to_hex());
            }
        }
        SessionCommand::Add { color } => {
            if let Err(err) = session.dispatch(SessionEvent::AddCustom(color)) {
                if let Some(notice) = session.notice() {
                    eprintln!("{}", notice.message);
                }
                return Err(err.into());
            }
        }
        SessionCommand::Remove { color } => {
            if !session.state().custom.contains(&color) {
                bail!("{color} is not a custom color");
            }
            session.dispatch(SessionEvent::RemoveCustom(color))?;
        }
        SessionCommand::List { json } => {
            let groups = session.swatches();
            if json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
                return Ok(());
            }
            for group in groups {
                println!("{}:", group.title);
                for swatch in group.swatches {
                    let mark = if swatch.active { '*' } else { ' ' };
                    let first_line = swatch.label.lines().next().unwrap_or_default();
                    println!("  [{mark}] {} {}", swatch.hex, first_line);
                }
            }
        }
    }
    Ok(())
}

fn sibling(input: &Path, file_name: &str) -> PathBuf {
    input
        .parent()
        .map(|dir| dir.join(file_name))
        .unwrap_or_else(|| PathBuf::from(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_argument() {
        assert_eq!(parse_rgba("1, 2,3,255"), Ok([1, 2, 3, 255]));
        assert!(parse_rgba("1,2,3").is_err());
        assert!(parse_rgba("1,2,3,256").is_err());
    }

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from(["color_key_tool", "rings", "--size", "8"]).unwrap();
        assert!(matches!(args.command, Command::Rings { size: 8, .. }));
        assert!(Args::try_parse_from(["color_key_tool", "toggle"]).is_err());

        let args = Args::try_parse_from(["color_key_tool", "toggle", "#fff", "1,2,3"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Session(SessionCommand::Toggle { ref colors }) if colors.len() == 2
        ));
        let args = Args::try_parse_from(["color_key_tool", "list", "--json"]).unwrap();
        assert!(matches!(args.command, Command::Session(SessionCommand::List { json: true })));
    }

    #[test]
    fn output_lands_next_to_input() {
        assert_eq!(
            sibling(Path::new("/tmp/in/cat.png"), "cat_filtered.png"),
            PathBuf::from("/tmp/in/cat_filtered.png")
        );
    }
}
