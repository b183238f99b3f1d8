//! Command-line interface for the sendkeys engine.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use sendkeys::config::parse_duration;
use sendkeys::{codes, parse_keys, Config, KeyInput, KeySender, KeyTransmitter};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "skc",
    version,
    about = "Compile and replay SendKeys-style key sequences"
)]
struct Cli {
    /// Key sequence, e.g. "^a{DEL}hello{ENTER}"
    sequence: Option<String>,

    /// Load the run from a JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pause between actions (e.g. "50ms", "1s")
    #[arg(long, value_name = "DURATION")]
    pause: Option<String>,

    /// Keep space characters instead of dropping them
    #[arg(long)]
    with_spaces: bool,

    /// Keep tab characters instead of dropping them
    #[arg(long)]
    with_tabs: bool,

    /// Keep newline characters (sent as Enter)
    #[arg(long)]
    with_newlines: bool,

    /// How many times to send the sequence (0 = until Ctrl+C)
    #[arg(short, long, value_name = "N")]
    repeat: Option<u32>,

    /// Wait between repeats (e.g. "2s")
    #[arg(long, value_name = "DURATION")]
    interval: Option<String>,

    /// Print the compiled action list without sending
    #[arg(long)]
    show: bool,

    /// List all registered key-code names
    #[arg(long)]
    list_codes: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Renders each action to stdout instead of injecting input.
///
/// Platform injection backends (`SendInput`, `XTest`, ...) implement
/// [`KeyTransmitter`] in their own crates; the CLI ships with this echo
/// backend for inspecting and timing sequences.
struct EchoTransmitter;

impl KeyTransmitter for EchoTransmitter {
    fn transmit(&mut self, input: KeyInput, down: bool, up: bool) -> sendkeys::Result<()> {
        let transition = match (down, up) {
            (true, true) => "press",
            (true, false) => "down ",
            (false, true) => "up   ",
            (false, false) => "noop ",
        };
        println!("  {} {}", transition.cyan(), input);
        Ok(())
    }
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(&path.to_string_lossy())?,
        None => Config::default(),
    };

    if let Some(sequence) = &cli.sequence {
        config.sequence = sequence.clone();
    }
    if let Some(pause) = &cli.pause {
        config.pause = parse_duration(pause)?;
    }
    if let Some(interval) = &cli.interval {
        config.interval = parse_duration(interval)?;
    }
    if let Some(repeat) = cli.repeat {
        config.repeat_count = repeat;
    }
    config.with_spaces |= cli.with_spaces;
    config.with_tabs |= cli.with_tabs;
    config.with_newlines |= cli.with_newlines;
    config.verbose |= cli.verbose;

    Ok(config)
}

fn list_codes() {
    for (name, code) in codes::entries() {
        println!("{name:<24} {code}");
    }
}

fn show_actions(config: &Config) -> Result<()> {
    let actions = parse_keys(&config.sequence, &config.parse_options())?;
    println!(
        "{} compiled {} action(s):",
        "✓".green(),
        actions.len().to_string().bold()
    );
    for (i, action) in actions.iter().enumerate() {
        println!("{:>4}  {}", i + 1, action);
    }
    Ok(())
}

async fn run(config: Config) -> Result<()> {
    let mut iteration = 0u32;
    loop {
        iteration += 1;
        if config.repeat_count != 1 {
            println!("{} iteration {}", "▶".green(), iteration);
        }

        let sequence = config.sequence.clone();
        let options = config.send_options();
        tokio::task::spawn_blocking(move || {
            let mut sender = KeySender::new(EchoTransmitter);
            sender.send_keys(&sequence, &options)
        })
        .await??;

        if config.repeat_count != 0 && iteration >= config.repeat_count {
            break;
        }
        tokio::select! {
            _ = tokio::time::sleep(config.interval) => {}
            _ = tokio::signal::ctrl_c() => {
                println!("{}", "⏹  interrupted".yellow());
                break;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_codes {
        list_codes();
        return Ok(());
    }

    let config = build_config(&cli)?;

    let default_filter = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    if config.sequence.is_empty() {
        anyhow::bail!("no key sequence given (pass one as an argument or use --config)");
    }
    config.validate()?;
    debug!(?config, "resolved run configuration");

    if cli.show {
        return show_actions(&config);
    }

    run(config).await
}
