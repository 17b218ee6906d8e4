//! Arlo Demo Entry Point
//!
//! Launches the layers + notifications demo in the alternate screen.
//!
//! Usage:
//!   arlo-demo [OPTIONS]
//!
//! Options:
//!   --config <PATH>     TOML file with toast settings
//!   --fps <N>           Animation ticks per second
//!   --exit-animation    Slide toasts out when they expire

use std::io;
use std::panic;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arlo_tui::{App, ToastConfig};

/// Layer compositor and toast notification demo
#[derive(Parser, Debug)]
#[command(name = "arlo-demo", version, about)]
struct Args {
    /// TOML file with toast settings
    #[arg(long, env = "ARLO_TOAST_CONFIG")]
    config: Option<PathBuf>,

    /// Animation ticks per second
    #[arg(long)]
    fps: Option<u32>,

    /// Slide toasts out when they expire
    #[arg(long)]
    exit_animation: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the frame
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: arlo-demo requires a terminal (TTY)");
        std::process::exit(1);
    }

    let config = load_config(&args).await?;
    tracing::info!(?config, "starting demo");

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let size = terminal::size()?;
    let mut app = App::new(config, size);
    let result = app.run(&mut stdout).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, Show, LeaveAlternateScreen)?;

    result
}

/// Defaults, then the config file, then environment, then flags
async fn load_config(args: &Args) -> anyhow::Result<ToastConfig> {
    let base = match &args.config {
        Some(path) => {
            let source = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading config file {}", path.display()))?;
            ToastConfig::from_toml_str(&source)
                .with_context(|| format!("loading config file {}", path.display()))?
        }
        None => ToastConfig::default(),
    };

    let mut config = base.merge_env();
    if let Some(fps) = args.fps {
        config.tick_rate = fps;
    }
    if args.exit_animation {
        config.exit_animation = true;
    }
    config.validate()?;

    Ok(config)
}
