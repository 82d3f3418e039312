//! `enrol` — text-menu front end for the enrolment register.
//!
//! # Usage
//!
//! ```
//! enrol
//! enrol --config ~/enrol.toml --admin Alice
//! RUST_LOG=enrol_core=debug enrol --no-seed
//! ```
//!
//! Menu text goes to stdout; logs go to stderr.

mod console;
mod menu;
mod settings;

use std::{io, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;
use console::Console;
use enrol_api::Session;
use enrol_core::Administrator;
use menu::Menu;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Student enrolment register")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "enrol.toml")]
  config: PathBuf,

  /// Administrator name for this session (overrides `admin_name`).
  #[arg(long)]
  admin: Option<String>,

  /// Log filter used when `RUST_LOG` is unset (overrides `log_level`).
  #[arg(long, value_name = "FILTER")]
  log_level: Option<String>,

  /// Start with an empty register instead of the configured seed.
  #[arg(long)]
  no_seed: bool,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  let mut settings = Settings::load(&cli.config)
    .with_context(|| format!("loading settings from {}", cli.config.display()))?;
  if let Some(admin) = cli.admin {
    settings.admin_name = admin;
  }
  if let Some(level) = cli.log_level {
    settings.log_level = level;
  }

  init_tracing(&settings.log_level);

  let mut session = Session::new(Administrator::new(settings.admin_name.clone()));
  if !cli.no_seed {
    settings.seed.apply(&mut session).context("seeding register")?;
  }
  tracing::debug!(admin = %settings.admin_name, "session started");

  let console = Console::new(io::stdin().lock(), io::stdout().lock());
  Menu::new(session, console).run()
}

/// `RUST_LOG` wins when set; otherwise `directives` applies.
fn init_tracing(directives: &str) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    EnvFilter::builder()
      .with_default_directive(LevelFilter::WARN.into())
      .parse_lossy(directives)
  });
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}
