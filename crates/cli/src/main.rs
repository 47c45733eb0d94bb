use clap::{Parser, Subcommand};
use delegate::slack::{MessageParser, RawMessageEnvelope};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "delegate")]
#[command(about = "Delegate CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Run Slack message events through the parser and print what the bot would act on. Reads a JSON object, a JSON array, or JSON lines.
    Parse {
        /// Config file path (default: DELEGATE_CONFIG_PATH or ~/.delegate/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Bot user id; overrides the config file and DELEGATE_SELF_ID.
        #[arg(long, value_name = "ID")]
        self_id: Option<String>,

        /// Event file (default: stdin).
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("delegate {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Parse {
            config,
            self_id,
            file,
        }) => match run_parse(config, self_id, file) {
            Ok(0) => {}
            Ok(failed) => {
                log::error!("{} event(s) failed to parse", failed);
                std::process::exit(1);
            }
            Err(e) => {
                log::error!("parse failed: {:#}", e);
                std::process::exit(1);
            }
        },
        None => {
            println!("Run with --help for usage");
        }
    }
}

/// Parse every event in the input and print one JSON line per event. Returns the number of events that failed.
fn run_parse(
    config_path: Option<PathBuf>,
    self_id: Option<String>,
    file: Option<PathBuf>,
) -> anyhow::Result<usize> {
    let parser = match self_id {
        Some(id) => MessageParser::new(id),
        None => {
            let (config, path) = delegate::config::load_config(config_path)?;
            log::debug!("loaded config from {}", path.display());
            MessageParser::from_config(&config)?
        }
    };

    let input = read_input(file.as_deref())?;
    let events = split_events(&input)?;
    let mut failed = 0;
    for event in events {
        let line = match serde_json::from_value::<RawMessageEnvelope>(event)
            .map_err(delegate::Error::from)
            .and_then(|envelope| parser.parse_message(&envelope))
        {
            Ok(Some(msg)) => serde_json::to_value(&msg)?,
            Ok(None) => serde_json::json!({ "skipped": true }),
            Err(e) => {
                failed += 1;
                serde_json::json!({ "error": e.to_string() })
            }
        };
        println!("{}", line);
    }
    Ok(failed)
}

fn read_input(file: Option<&std::path::Path>) -> anyhow::Result<String> {
    use anyhow::Context;

    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading events from {}", path.display())),
        None => {
            let mut s = String::new();
            std::io::stdin()
                .read_to_string(&mut s)
                .context("reading events from stdin")?;
            Ok(s)
        }
    }
}

/// Accept a single event object, an array of events, or one event per line.
fn split_events(input: &str) -> anyhow::Result<Vec<serde_json::Value>> {
    let mut events = Vec::new();
    for value in serde_json::Deserializer::from_str(input).into_iter::<serde_json::Value>() {
        match value? {
            serde_json::Value::Array(items) => events.extend(items),
            other => events.push(other),
        }
    }
    Ok(events)
}
