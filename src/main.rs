use anyhow::Context;
use clap::Parser;
use selection_overlay::config::types::Config;
use selection_overlay::replay::{parse_script, Replay};
use std::io::{Read, Write};
use std::path::PathBuf;

/// Replay recorded terminal frames through the selection overlay and print
/// what each frame left on the surface as JSON lines.
#[derive(Parser, Debug)]
#[command(name = "selection-overlay", version, about)]
struct Cli {
    /// Frame script to replay (JSON); read from stdin when omitted
    script: Option<PathBuf>,

    /// Config file (defaults to ~/.config/selection-overlay/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the documented default config and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() {
    let cli = Cli::parse();

    // Handle --print-default-config before any other initialization
    if cli.print_default_config {
        print!("{}", Config::print_default());
        return;
    }

    env_logger::init();
    log::info!("selection-overlay v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        log::error!("Replay failed: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Cli) -> anyhow::Result<()> {
    let config_path = args.config.unwrap_or_else(dirs_config_path);
    let config = match Config::load(&config_path) {
        Ok(cfg) => {
            log::info!("Config loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            log::warn!("Config load error ({}), using defaults", e);
            Config::default()
        }
    };
    log::info!(
        "Theme: {}, Opacity: {}, Scale factor: {}",
        config.colors.theme,
        config.selection.opacity,
        config.display.scale_factor
    );

    let json = match &args.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading frame script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading frame script from stdin")?;
            buf
        }
    };
    let script = parse_script(&json)?;
    log::info!("Replaying {} frames", script.frames.len());

    let mut replay = Replay::new(&config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for frame in &script.frames {
        let report = replay.step(frame)?;
        serde_json::to_writer(&mut out, &report)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Get the config file path (~/.config/selection-overlay/config.toml).
fn dirs_config_path() -> PathBuf {
    dirs_home()
        .join(".config")
        .join("selection-overlay")
        .join("config.toml")
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}
