use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::{
    error::{ErrorCode, SiteError},
    protocol::UiEvent,
};
use site_core::{
    load_settings, load_settings_from,
    orchestration::{dispatch_ui_event, event_queue},
    PageLayout, Site, SiteSettings, TypingConfig, TypingWidget,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "folio-replay", about = "Replay recorded portfolio page sessions")]
struct Cli {
    /// Settings file; defaults to ./site.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON event script against a page layout and print the final state.
    Replay {
        #[arg(long)]
        layout: PathBuf,
        #[arg(long)]
        script: PathBuf,
        #[arg(long, default_value_t = 1440)]
        width: u32,
    },
    /// Validate a page layout.
    Check {
        #[arg(long)]
        layout: PathBuf,
    },
    /// Print the typing widget options.
    Typing,
}

/// Stands in for the browser-side widget; records the mount in the log.
struct LoggedWidget;

impl TypingWidget for LoggedWidget {
    fn mount(&mut self, selector: &str, config: &TypingConfig) {
        info!(
            selector,
            strings = config.strings.len(),
            type_speed_ms = config.type_speed_ms,
            back_speed_ms = config.back_speed_ms,
            looping = config.looping,
            "typing widget mounted"
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings(),
    };

    match cli.command {
        Command::Replay {
            layout,
            script,
            width,
        } => {
            let layout = read_layout(&layout)?;
            let script = read_script(&script)?;
            let snapshot = replay(&layout, script, settings, width)?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::Check { layout } => {
            let layout = read_layout(&layout)?;
            match Site::new(&layout, settings, 0) {
                Ok(site) => {
                    let doc = site.document();
                    println!(
                        "layout ok: {} sections, {} nav links, {} cards",
                        doc.sections.len(),
                        doc.nav_links.len(),
                        doc.grid.as_ref().map_or(0, |g| g.cards.len())
                    );
                }
                Err(err) => {
                    let report = SiteError::new(ErrorCode::InvalidLayout, err.to_string());
                    println!("{}", serde_json::to_string(&report)?);
                    anyhow::bail!(err);
                }
            }
        }
        Command::Typing => {
            if let Err(err) = settings.typing.validate() {
                let report = SiteError::new(ErrorCode::InvalidTyping, err.to_string());
                println!("{}", serde_json::to_string(&report)?);
                anyhow::bail!(err);
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&settings.typing.widget_options())?
            );
        }
    }

    Ok(())
}

fn replay(
    layout: &PageLayout,
    script: Vec<UiEvent>,
    settings: SiteSettings,
    width: u32,
) -> Result<site_core::DocumentSnapshot> {
    let capacity = settings.queue_capacity;
    let mut site = Site::boot(layout, settings, width, &mut LoggedWidget)?;
    let (tx, rx) = event_queue(capacity);
    let mut status = String::new();
    let mut handled = 0;

    for event in script {
        if !dispatch_ui_event(&tx, event.clone(), &mut status) {
            // queue full: let the page catch up, then retry once
            handled += site.drain(&rx);
            anyhow::ensure!(dispatch_ui_event(&tx, event, &mut status), "{status}");
        }
    }
    handled += site.drain(&rx);
    info!(handled, "replay finished");
    Ok(site.snapshot())
}

fn read_layout(path: &Path) -> Result<PageLayout> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read layout '{}'", path.display()))?;
    let layout = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse layout '{}'", path.display()))?
    } else {
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse layout '{}'", path.display()))?
    };
    Ok(layout)
}

fn read_script(path: &Path) -> Result<Vec<UiEvent>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read script '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse script '{}'", path.display()))
}
