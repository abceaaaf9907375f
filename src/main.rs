mod commands;
mod core;
mod matrix;
mod repo;
mod utils;

use clap::Parser;
use crate::core::config::ConfigOverrides;
use crate::core::context::RunContext;
use crate::core::error::{MatrixError, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Turn a list of changed files (stdin) into a CI job matrix of affected projects
#[derive(Parser)]
#[command(name = "change-matrix")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Directory containing projects, relative to the repository root ("." = the root itself)
  #[arg(long, env = "PROJECT_ROOT")]
  project_root: Option<String>,

  /// Project names to never emit (space separated, repeatable)
  #[arg(long = "ignore", env = "IGNORE_LIST", value_delimiter = ' ')]
  ignore: Vec<String>,

  /// Omit the root {"project": "."} item
  #[arg(long)]
  no_root: bool,

  /// Also require dependency-triggered projects to exist on disk
  #[arg(long)]
  strict_existence: bool,

  /// Repository root (default: ask git for the enclosing working tree)
  #[arg(long)]
  repo_root: Option<PathBuf>,

  /// Config file (default: matrix.toml, .matrix.toml or .github/matrix.toml in the repository root)
  #[arg(long)]
  config: Option<PathBuf>,

  /// Pretty-print the JSON output
  #[arg(long)]
  pretty: bool,

  /// Log debug details to stderr (RUST_LOG takes precedence)
  #[arg(short, long)]
  verbose: bool,
}

impl Cli {
  fn overrides(&self) -> ConfigOverrides {
    ConfigOverrides {
      project_root: self.project_root.clone(),
      ignore: self.ignore.iter().filter(|s| !s.is_empty()).cloned().collect(),
      no_root: self.no_root,
      strict_existence: self.strict_existence,
    }
  }
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Logs go to stderr; stdout carries nothing but the matrix
fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let cwd = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let ctx = match RunContext::build(&cwd, cli.repo_root.as_deref(), cli.config.as_deref(), &cli.overrides()) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  if let Err(err) = commands::run_matrix(&ctx, cli.pretty) {
    handle_error(err);
  }
}

fn handle_error(err: MatrixError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
